pub mod runner;

pub use runner::BackgroundRunner;

use std::cell::RefCell;

use chem_engine::renderer::instance::{BOND_GLYPH_COLOR, LABELS, UNKNOWN_LABEL};
use chem_engine::{InputEvent, SimConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<BackgroundRunner>> = RefCell::new(None);
}

/// Run `f` against the runner. Calls made before `bg_init` are logged and
/// return `None`.
fn with_runner<R>(f: impl FnOnce(&mut BackgroundRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("chemical background not initialized; call bg_init() first");
                None
            }
        }
    })
}

#[wasm_bindgen]
pub fn bg_init(width: f32, height: f32) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::debug_1(&"chemical background: logger already installed".into());
    }

    let config = SimConfig {
        seed: js_sys::Date::now() as u64,
        ..SimConfig::for_viewport(width, height)
    };
    let runner = BackgroundRunner::new(config);

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
}

#[wasm_bindgen]
pub fn bg_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn bg_pointer_down(x: f32, y: f32, on_control: bool) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y, on_control }));
}

#[wasm_bindgen]
pub fn bg_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn bg_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn bg_pointer_leave() {
    with_runner(|r| r.push_input(InputEvent::PointerLeave));
}

#[wasm_bindgen]
pub fn bg_resize(width: f32, height: f32) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

/// Replace the content rectangles, given as flat `[x, y, w, h]*`.
#[wasm_bindgen]
pub fn bg_set_content_areas(flat: &[f32]) {
    with_runner(|r| r.set_content_areas(flat));
}

#[wasm_bindgen]
pub fn bg_load_config(json: &str) {
    with_runner(|r| r.load_config(json));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn bg_buffer_ptr() -> *const f32 {
    with_runner(|r| r.buffer_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn bg_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn bg_discs_ptr() -> *const f32 {
    with_runner(|r| r.discs_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn bg_disc_count() -> u32 {
    with_runner(|r| r.disc_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn bg_rings_ptr() -> *const f32 {
    with_runner(|r| r.rings_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn bg_ring_count() -> u32 {
    with_runner(|r| r.ring_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn bg_lines_ptr() -> *const f32 {
    with_runner(|r| r.lines_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn bg_line_count() -> u32 {
    with_runner(|r| r.line_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn bg_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn bg_events_len() -> u32 {
    with_runner(|r| r.events_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn bg_world_width() -> f32 {
    with_runner(|r| r.world_width()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn bg_world_height() -> f32 {
    with_runner(|r| r.world_height()).unwrap_or(0.0)
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn bg_max_discs() -> u32 {
    with_runner(|r| r.max_discs()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn bg_max_rings() -> u32 {
    with_runner(|r| r.max_rings()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn bg_max_lines() -> u32 {
    with_runner(|r| r.max_lines()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn bg_max_events() -> u32 {
    with_runner(|r| r.max_events()).unwrap_or(0)
}

// ---- Label table ----

/// Text for a disc's label index. Out-of-range indices give the fallback label.
#[wasm_bindgen]
pub fn bg_label(index: u32) -> String {
    LABELS
        .get(index as usize)
        .copied()
        .unwrap_or(LABELS[UNKNOWN_LABEL])
        .to_string()
}

#[wasm_bindgen]
pub fn bg_label_count() -> u32 {
    LABELS.len() as u32
}

/// Bond glyph color as `0xRRGGBB`.
#[wasm_bindgen]
pub fn bg_glyph_color() -> u32 {
    BOND_GLYPH_COLOR.to_hex()
}

// ---- Vector accessors (only when vectors feature is enabled) ----

#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn bg_vector_vertices_ptr() -> *const f32 {
    with_runner(|r| r.vector_vertices_ptr()).unwrap_or(std::ptr::null())
}

#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn bg_vector_vertex_count() -> u32 {
    with_runner(|r| r.vector_vertex_count()).unwrap_or(0)
}
