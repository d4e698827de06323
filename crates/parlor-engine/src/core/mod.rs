pub mod lifecycle;
pub mod scene;
pub mod time;
