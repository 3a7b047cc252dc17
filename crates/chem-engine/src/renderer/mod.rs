pub mod instance;

pub use instance::{DiscInstance, FrameBuffer, LineInstance, RingInstance, LABELS};
