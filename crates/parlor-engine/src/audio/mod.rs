pub mod manager;

pub use manager::{AudioManager, SoundHandle, SoundRole};
