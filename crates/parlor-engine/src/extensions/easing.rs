// extensions/easing.rs
//
// Pure easing functions for tween interpolation, plus parsing of the
// easing names that appear in content JSON ("Cubic.easeOut", "Power2", ...).

use serde::{Deserialize, Deserializer};
use std::f32::consts::PI;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuartOut,
    SineInOut,
    SineOut,
    ExpoOut,
    /// Overshoot then settle.
    BackOut,
}

impl Easing {
    /// Apply the easing function to a normalized time value `t` in [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::QuartOut => 1.0 - (1.0 - t).powi(4),
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Easing::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            Easing::BackOut => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
            }
        }
    }

    /// Parse an easing name as written in content files.
    ///
    /// Accepts the `Family.easeIn|easeOut|easeInOut` form and the `PowerN`
    /// aliases (`Power1` = Quad, `Power2` = Cubic, `Power3` = Quart, out-easing).
    /// Matching is case-insensitive. Unknown names return `None`.
    pub fn from_name(name: &str) -> Option<Easing> {
        let lower = name.trim().to_ascii_lowercase();
        let (family, kind) = match lower.split_once('.') {
            Some((f, k)) => (f.to_string(), k.to_string()),
            None => (lower.clone(), "easeout".to_string()),
        };
        let easing = match (family.as_str(), kind.as_str()) {
            ("linear", _) => Easing::Linear,
            ("quad", "easein") => Easing::QuadIn,
            ("quad" | "power1", "easeout") => Easing::QuadOut,
            ("quad", "easeinout") => Easing::QuadInOut,
            ("cubic", "easein") => Easing::CubicIn,
            ("cubic" | "power2", "easeout") => Easing::CubicOut,
            ("cubic", "easeinout") => Easing::CubicInOut,
            ("quart" | "power3", "easeout") => Easing::QuartOut,
            ("sine", "easeout") => Easing::SineOut,
            ("sine", "easeinout") => Easing::SineInOut,
            ("expo", "easeout") => Easing::ExpoOut,
            ("back", "easeout") => Easing::BackOut,
            _ => return None,
        };
        Some(easing)
    }
}

impl<'de> Deserialize<'de> for Easing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Easing::from_name(&name).unwrap_or_else(|| {
            log::warn!("unknown easing '{}', using CubicOut", name);
            Easing::CubicOut
        }))
    }
}

/// Linear interpolation.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

/// Interpolate two points with easing.
#[inline]
pub fn ease_vec2(a: glam::Vec2, b: glam::Vec2, t: f32, easing: Easing) -> glam::Vec2 {
    a.lerp(b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 12] = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::QuartOut,
        Easing::SineInOut,
        Easing::SineOut,
        Easing::ExpoOut,
        Easing::BackOut,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for e in ALL {
            assert!(e.apply(0.0).abs() < 1e-4, "{:?} at 0", e);
            assert!((e.apply(1.0) - 1.0).abs() < 1e-4, "{:?} at 1", e);
        }
    }

    #[test]
    fn parses_content_names() {
        assert_eq!(Easing::from_name("Cubic.easeOut"), Some(Easing::CubicOut));
        assert_eq!(Easing::from_name("quad.easeInOut"), Some(Easing::QuadInOut));
        assert_eq!(Easing::from_name("Power3"), Some(Easing::QuartOut));
        assert_eq!(Easing::from_name("Linear"), Some(Easing::Linear));
        assert_eq!(Easing::from_name("Wobble.easeOut"), None);
    }

    #[test]
    fn deserializes_unknown_as_cubic_out() {
        let e: Easing = serde_json::from_str("\"Bogus\"").unwrap();
        assert_eq!(e, Easing::CubicOut);
        let e: Easing = serde_json::from_str("\"Sine.easeOut\"").unwrap();
        assert_eq!(e, Easing::SineOut);
    }

    #[test]
    fn ease_midpoint_linear() {
        assert_eq!(ease(0.0, 10.0, 0.5, Easing::Linear), 5.0);
    }
}
