pub mod bonding;
pub mod content;
pub mod explosion;
pub mod interaction;
pub mod reactions;
pub mod render;
#[cfg(feature = "vectors")]
pub mod vector;
