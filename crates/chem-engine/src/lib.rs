pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::{BurstProfile, ExplosionConfig, SimConfig};
pub use api::simulation::Simulation;
pub use api::types::{event_kind, ParticleId, SimEvent};
pub use components::color::Rgb;
pub use components::element::{BondOrder, ElementKind, Molecule, Species};
pub use components::particle::Particle;
pub use core::rng::Rng;
pub use core::store::ParticleStore;
pub use core::time::{FixedTimestep, Interval};
pub use renderer::instance::{
    label_index, DiscInstance, FrameBuffer, LineInstance, RingInstance, LABELS,
};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::ProtocolLayout;
pub use systems::content::{ContentAreas, Rect};
pub use systems::explosion::Explosion;
pub use systems::interaction::{InteractionMode, InteractionResult, InteractionSystem};
pub use systems::reactions::{Match, Product};

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorColor, VectorState, VectorVertex};
