use wasm_bindgen::prelude::*;
use parlor_engine::*;

pub mod board;
pub mod content;
pub mod game;
pub mod session;

use game::AnagramGame;

parlor_web::export_game!(AnagramGame, "anagram", vectors);
