use wasm_bindgen::prelude::*;
use parlor_engine::*;

pub mod content;
pub mod game;
pub mod wheel;

use game::WheelGame;

parlor_web::export_game!(WheelGame, "wheel-of-fortune", vectors);
