use chem_engine::{
    InputEvent, ProtocolLayout, SimConfig, Simulation, ContentAreas,
};
#[cfg(feature = "vectors")]
use chem_engine::VectorState;

/// Wires the simulation to the browser loop.
///
/// The bridge keeps one of these in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]`, since wasm-bindgen cannot export a
/// struct holding the whole simulation by reference.
pub struct BackgroundRunner {
    sim: Simulation,
    layout: ProtocolLayout,
    /// Header, instances and events packed into one flat buffer per frame.
    packed: Vec<f32>,
    frame_counter: u32,
    #[cfg(feature = "vectors")]
    vectors: VectorState,
}

impl BackgroundRunner {
    pub fn new(config: SimConfig) -> Self {
        let layout = ProtocolLayout::from_config(&config);
        Self {
            packed: Vec::with_capacity(layout.buffer_total_floats),
            layout,
            sim: Simulation::with_population(config),
            frame_counter: 0,
            #[cfg(feature = "vectors")]
            vectors: VectorState::new(),
        }
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.sim.push_input(event);
    }

    pub fn set_content_areas(&mut self, flat: &[f32]) {
        self.sim.set_content_areas(ContentAreas::from_flat(flat));
    }

    /// Apply a partial JSON config on top of the current one.
    /// A malformed document is logged and ignored.
    pub fn load_config(&mut self, json: &str) {
        match self.sim.config().merged_json(json) {
            Ok(config) => {
                self.layout = ProtocolLayout::from_config(&config);
                self.sim.apply_config(config);
                log::info!("chemical background: config updated");
            }
            Err(e) => log::warn!("chemical background: ignoring bad config: {}", e),
        }
    }

    /// Run one host frame: fixed ticks, then rebuild the frame buffers.
    pub fn tick(&mut self, dt: f32) {
        self.sim.step(dt);
        self.frame_counter = self.frame_counter.wrapping_add(1);

        let world = (self.sim.config().width, self.sim.config().height);
        self.sim.build_frame();
        self.layout.pack(
            self.frame_counter,
            world,
            self.sim.frame(),
            self.sim.events(),
            &mut self.packed,
        );

        #[cfg(feature = "vectors")]
        self.vectors.tessellate_frame(self.sim.frame());
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    // ---- Pointer accessors for host-side reads ----

    pub fn buffer_ptr(&self) -> *const f32 {
        self.packed.as_ptr()
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn discs_ptr(&self) -> *const f32 {
        self.sim.frame().discs_ptr()
    }

    pub fn disc_count(&self) -> u32 {
        self.sim.frame().disc_count()
    }

    pub fn rings_ptr(&self) -> *const f32 {
        self.sim.frame().rings_ptr()
    }

    pub fn ring_count(&self) -> u32 {
        self.sim.frame().ring_count()
    }

    pub fn lines_ptr(&self) -> *const f32 {
        self.sim.frame().lines_ptr()
    }

    pub fn line_count(&self) -> u32 {
        self.sim.frame().line_count()
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.sim.events().as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.sim.events().len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.sim.config().width
    }

    pub fn world_height(&self) -> f32 {
        self.sim.config().height
    }

    // ---- Capacity accessors ----

    pub fn max_discs(&self) -> u32 {
        self.layout.max_discs as u32
    }

    pub fn max_rings(&self) -> u32 {
        self.layout.max_rings as u32
    }

    pub fn max_lines(&self) -> u32 {
        self.layout.max_lines as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    // ---- Vector accessors ----

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.vectors.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertex_count(&self) -> u32 {
        self.vectors.vertex_count() as u32
    }
}
