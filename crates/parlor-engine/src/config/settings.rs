//! `settings.json`: fonts, colors and sizes shared by both games.

use serde::Deserialize;

/// Two-tone palette used for UI elements and text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    White,
    Black,
}

impl Tone {
    fn parse(value: &str) -> Option<Tone> {
        match value.trim().to_ascii_lowercase().as_str() {
            "white" => Some(Tone::White),
            "black" => Some(Tone::Black),
            _ => None,
        }
    }

    /// 0xRRGGBB form for sprite tints.
    pub fn rgb24(self) -> u32 {
        match self {
            Tone::White => 0xFF_FFFF,
            Tone::Black => 0x00_0000,
        }
    }
}

/// How wheel labels are laid out inside a wedge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Along the wedge's centre line, from near the hub outwards.
    Radial,
    /// Horizontal-ish, centred near the rim.
    Center,
}

/// Countdown used when `timeLimit` is missing or not a positive number.
pub const DEFAULT_TIME_LIMIT: u32 = 60;

/// Resolved settings. Every field has a usable value.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Font atlas name looked up in the asset manifest.
    pub font: String,
    /// Session countdown in seconds.
    pub time_limit: u32,
    pub shuffle_questions: bool,
    pub ui_components_color: Tone,
    pub answers_text_color: Tone,
    pub questions_text_color: Tone,
    pub button_scale: f32,
    /// Wheel label size in pixels.
    pub wheel_text_size: f32,
    pub wheel_text_align: TextAlign,
    /// Result line size in pixels.
    pub result_text_size: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font: "Arial".to_string(),
            time_limit: DEFAULT_TIME_LIMIT,
            shuffle_questions: true,
            ui_components_color: Tone::White,
            answers_text_color: Tone::White,
            questions_text_color: Tone::White,
            button_scale: 0.35,
            wheel_text_size: 12.0,
            wheel_text_align: TextAlign::Radial,
            result_text_size: 24.0,
        }
    }
}

/// A size written either as a number or a CSS string like `"16px"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PixelValue {
    Number(f32),
    Text(String),
}

impl PixelValue {
    fn resolve(&self) -> Option<f32> {
        let px = match self {
            PixelValue::Number(n) => *n,
            PixelValue::Text(s) => parse_px(s)?,
        };
        (px.is_finite() && px > 0.0).then_some(px)
    }
}

/// Parse `"16px"`, `"16"` or `" 16.5 px "` into pixels.
pub fn parse_px(text: &str) -> Option<f32> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    number.parse().ok()
}

/// Wire form. Everything optional; resolved against the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
    font: Option<String>,
    time_limit: Option<f64>,
    shuffle_questions: Option<bool>,
    #[serde(rename = "UIComponentsColor", alias = "uiComponentsColor")]
    ui_components_color: Option<String>,
    answers_text_color: Option<String>,
    questions_text_color: Option<String>,
    button_scale: Option<f32>,
    wheel_text_size: Option<PixelValue>,
    wheel_text_align: Option<String>,
    result_text_size: Option<PixelValue>,
}

fn tone_or(field: &str, raw: Option<&str>, default: Tone) -> Tone {
    match raw {
        None => default,
        Some(value) => Tone::parse(value).unwrap_or_else(|| {
            log::warn!("{field}: '{value}' is not white/black, keeping {default:?}");
            default
        }),
    }
}

fn px_or(field: &str, raw: Option<&PixelValue>, default: f32) -> f32 {
    match raw {
        None => default,
        Some(value) => value.resolve().unwrap_or_else(|| {
            log::warn!("{field}: unreadable size {value:?}, keeping {default}px");
            default
        }),
    }
}

impl From<RawSettings> for Settings {
    fn from(raw: RawSettings) -> Self {
        let d = Settings::default();
        let button_scale = match raw.button_scale {
            Some(s) if s.is_finite() && s > 0.0 => s,
            Some(s) => {
                log::warn!("buttonScale: {s} is not a positive scale, keeping {}", d.button_scale);
                d.button_scale
            }
            None => d.button_scale,
        };
        let wheel_text_align = match raw.wheel_text_align.as_deref().map(str::trim) {
            None => d.wheel_text_align,
            Some(a) if a.eq_ignore_ascii_case("radial") => TextAlign::Radial,
            Some(a) if a.eq_ignore_ascii_case("center") => TextAlign::Center,
            Some(a) => {
                log::warn!("wheelTextAlign: unknown '{a}', keeping radial");
                d.wheel_text_align
            }
        };

        Settings {
            font: raw.font.filter(|f| !f.trim().is_empty()).unwrap_or(d.font),
            // Whole seconds; anything under one second means the default.
            time_limit: raw
                .time_limit
                .filter(|t| t.is_finite() && *t >= 1.0)
                .map_or(d.time_limit, |t| t.floor() as u32),
            shuffle_questions: raw.shuffle_questions.unwrap_or(d.shuffle_questions),
            ui_components_color: tone_or("UIComponentsColor", raw.ui_components_color.as_deref(), d.ui_components_color),
            answers_text_color: tone_or("answersTextColor", raw.answers_text_color.as_deref(), d.answers_text_color),
            questions_text_color: tone_or("questionsTextColor", raw.questions_text_color.as_deref(), d.questions_text_color),
            button_scale,
            wheel_text_size: px_or("wheelTextSize", raw.wheel_text_size.as_ref(), d.wheel_text_size),
            wheel_text_align,
            result_text_size: px_or("resultTextSize", raw.result_text_size.as_ref(), d.result_text_size),
        }
    }
}

impl Settings {
    /// Parse `{"settings": {...}}` or a bare settings object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let body = match value {
            serde_json::Value::Object(mut map)
                if map.get("settings").is_some_and(serde_json::Value::is_object) =>
            {
                map.remove("settings").unwrap_or_default()
            }
            other => other,
        };
        let raw: RawSettings = serde_json::from_value(body)?;
        Ok(raw.into())
    }
}
