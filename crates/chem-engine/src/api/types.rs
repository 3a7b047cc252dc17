use bytemuck::{Pod, Zeroable};

/// Unique identifier for a particle. Never reused within a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u32);

/// Event kinds written into `SimEvent::kind`.
pub mod event_kind {
    /// A reaction resolved. a = product code, b/c = position.
    pub const REACTION: f32 = 1.0;
    /// The host should re-measure content rectangles.
    pub const CONTENT_REFRESH: f32 = 2.0;
    /// A particle was picked up. a = particle id.
    pub const DRAG_STARTED: f32 = 3.0;
    /// A dragged particle was let go. a = particle id.
    pub const DRAG_RELEASED: f32 = 4.0;
}

/// An event communicated from the simulation to the host page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SimEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SimEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }

    pub fn content_refresh() -> Self {
        Self::new(event_kind::CONTENT_REFRESH, 0.0, 0.0, 0.0)
    }
}
