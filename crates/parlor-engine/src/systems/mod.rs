pub mod render;
pub mod rng;
pub mod text;
#[cfg(feature = "vectors")]
pub mod vector;
