//! `questions.json` for the wheel: wedges plus spin tuning.
//!
//! ```json
//! {
//!   "wheel": { "wedges": [{ "content": "Spin again!", "color": "#1e88e5", "textColor": "#ffffff" }] },
//!   "settings": { "spinDuration": { "min": 3000, "max": 5000 }, "rotations": { "min": 2, "max": 4 } }
//! }
//! ```

use parlor_engine::Easing;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct WheelContent {
    #[serde(default)]
    pub wheel: WheelSection,
    #[serde(default)]
    pub settings: SpinSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WheelSection {
    #[serde(default)]
    pub wedges: Vec<WedgeDoc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WedgeDoc {
    pub content: String,
    #[serde(default = "default_wedge_color")]
    pub color: String,
    #[serde(default = "default_text_color")]
    pub text_color: String,
}

/// Inclusive integer range as written in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Range {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinSection {
    /// Milliseconds.
    #[serde(default = "default_duration")]
    pub spin_duration: Range,
    #[serde(default = "default_rotations")]
    pub rotations: Range,
    #[serde(default = "default_easing", alias = "easingFunction")]
    pub easing: Easing,
}

fn default_wedge_color() -> String {
    "#808080".to_string()
}

fn default_text_color() -> String {
    "#ffffff".to_string()
}

fn default_duration() -> Range {
    Range { min: 3000, max: 5000 }
}

fn default_rotations() -> Range {
    Range { min: 2, max: 4 }
}

fn default_easing() -> Easing {
    Easing::CubicOut
}

impl Default for SpinSection {
    fn default() -> Self {
        Self {
            spin_duration: default_duration(),
            rotations: default_rotations(),
            easing: default_easing(),
        }
    }
}

fn default_wedges() -> Vec<WedgeDoc> {
    vec![
        WedgeDoc {
            content: "Spin again!".to_string(),
            color: "#1e88e5".to_string(),
            text_color: "#ffffff".to_string(),
        },
        WedgeDoc {
            content: "Tell us about yourself".to_string(),
            color: "#d32f2f".to_string(),
            text_color: "#ffffff".to_string(),
        },
    ]
}

impl Default for WheelContent {
    fn default() -> Self {
        Self {
            wheel: WheelSection { wedges: default_wedges() },
            settings: SpinSection::default(),
        }
    }
}

impl WheelContent {
    /// Wedges to build the wheel from. Never empty.
    pub fn wedges(&self) -> Vec<WedgeDoc> {
        if self.wheel.wedges.is_empty() {
            log::warn!("content has no wedges, using the built-in wheel");
            default_wedges()
        } else {
            self.wheel.wedges.clone()
        }
    }
}
