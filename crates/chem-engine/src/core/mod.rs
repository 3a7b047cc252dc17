pub mod rng;
pub mod store;
pub mod time;
