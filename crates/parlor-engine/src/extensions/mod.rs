// extensions/mod.rs
//
// Optional animation helpers. Games opt in through EngineContext::tweens;
// nothing in the core scene depends on them.

pub mod easing;
pub mod tween;

pub use easing::{Easing, lerp, ease, ease_vec2};
pub use tween::{TweenState, Tween, TweenId, TweenTarget, TweenLoop};
