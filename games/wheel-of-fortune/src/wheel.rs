//! Spin resolution.
//!
//! The wheel draws its stop angle up front: a whole number of turns, the
//! start of a random target wedge, and a random offset inside it. The
//! displayed wheel turns the other way (rotation = −stop), so reading the
//! wedge under the pointer back from the displayed rotation lands on the
//! target that was drawn.

use std::f64::consts::TAU;

use parlor_engine::{Easing, Rng};

use crate::content::{SpinSection, WedgeDoc};

/// Slack in wedge units so an offset of exactly 0 stays in its wedge despite
/// remainder rounding.
const BOUNDARY_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub content: String,
    /// 0xRRGGBB
    pub color: u32,
    /// 0xRRGGBB
    pub text_color: u32,
}

impl Wedge {
    pub fn new(content: impl Into<String>, color: u32, text_color: u32) -> Self {
        Self {
            content: content.into(),
            color,
            text_color,
        }
    }

    /// Build from content JSON. Bad colors fall back to grey / white.
    pub fn from_doc(doc: &WedgeDoc) -> Self {
        let color = parse_color(&doc.color, 0x80_8080);
        let text_color = parse_color(&doc.text_color, 0xFF_FFFF);
        Self::new(doc.content.clone(), color, text_color)
    }
}

fn parse_color(hex: &str, fallback: u32) -> u32 {
    let digits = hex.trim().trim_start_matches('#');
    match u32::from_str_radix(digits, 16) {
        Ok(rgb) if digits.len() == 6 => rgb,
        _ => {
            log::warn!("wedge color '{hex}' is not #rrggbb, using #{fallback:06x}");
            fallback
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinConfig {
    pub min_spin_duration: u32,
    pub max_spin_duration: u32,
    pub min_rotations: u32,
    pub max_rotations: u32,
    pub easing: Easing,
}

impl From<&SpinSection> for SpinConfig {
    fn from(s: &SpinSection) -> Self {
        Self {
            min_spin_duration: s.spin_duration.min,
            max_spin_duration: s.spin_duration.max,
            min_rotations: s.rotations.min,
            max_rotations: s.rotations.max,
            easing: s.easing,
        }
    }
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self::from(&SpinSection::default())
    }
}

/// Everything drawn for one spin. The game animates `from_rotation` →
/// `to_rotation` over `duration_ms`; the wheel always turns the same way
/// because `from_rotation` is in [0, 2π) and `to_rotation` is −stop_angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub duration_ms: u32,
    pub rotations: u32,
    pub target: usize,
    /// Radians into the target wedge, in [0, wedge_angle).
    pub offset: f64,
    /// 2π·rotations + target·wedge_angle + offset.
    pub stop_angle: f64,
    pub from_rotation: f64,
    pub to_rotation: f64,
    pub easing: Easing,
}

/// Where a spin landed.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinResult {
    pub index: usize,
    pub content: String,
}

/// Wedge under a pointer fixed at angle 0, given the displayed rotation.
pub fn landed_index(rotation: f64, wedge_count: usize) -> usize {
    let wedge_angle = TAU / wedge_count as f64;
    let local = (TAU - rotation.rem_euclid(TAU)).rem_euclid(TAU);
    (((local / wedge_angle) + BOUNDARY_EPSILON).floor() as usize) % wedge_count
}

type ResultCallback = Box<dyn FnMut(usize, &str)>;

pub struct Wheel {
    wedges: Vec<Wedge>,
    config: SpinConfig,
    /// Displayed rotation in radians, in [0, 2π) between spins.
    rotation: f64,
    spinning: Option<SpinPlan>,
    on_result: Option<ResultCallback>,
}

impl Wheel {
    /// Panics if `wedges` is empty; content loading always supplies at least
    /// the built-in wedges.
    pub fn new(wedges: Vec<Wedge>, config: SpinConfig) -> Self {
        assert!(!wedges.is_empty(), "a wheel needs at least one wedge");
        Self {
            wedges,
            config,
            rotation: 0.0,
            spinning: None,
            on_result: None,
        }
    }

    /// Register a callback run with `(index, content)` after every spin.
    pub fn on_result(&mut self, callback: impl FnMut(usize, &str) + 'static) {
        self.on_result = Some(Box::new(callback));
    }

    pub fn wedges(&self) -> &[Wedge] {
        &self.wedges
    }

    pub fn wedge_angle(&self) -> f64 {
        TAU / self.wedges.len() as f64
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning.is_some()
    }

    pub fn can_spin(&self) -> bool {
        !self.is_spinning()
    }

    /// Draw a spin. `None` while a spin is already running.
    pub fn spin(&mut self, rng: &mut Rng) -> Option<SpinPlan> {
        if self.is_spinning() {
            return None;
        }
        let c = self.config;
        let wedge_angle = self.wedge_angle();

        let duration_ms = rng.between(c.min_spin_duration, c.max_spin_duration);
        let rotations = rng.between(c.min_rotations, c.max_rotations);
        let target = rng.below(self.wedges.len() as u64) as usize;
        let offset = rng.float_between(0.0, wedge_angle);
        let stop_angle = TAU * rotations as f64 + target as f64 * wedge_angle + offset;

        let plan = SpinPlan {
            duration_ms,
            rotations,
            target,
            offset,
            stop_angle,
            from_rotation: self.rotation,
            to_rotation: -stop_angle,
            easing: c.easing,
        };
        log::debug!("spin: target {target}, {rotations} turns, {duration_ms} ms");
        self.spinning = Some(plan);
        Some(plan)
    }

    /// Finish the running spin: settle on its end rotation and report the
    /// wedge under the pointer.
    pub fn complete(&mut self) -> Option<SpinResult> {
        let plan = self.spinning.take()?;
        let index = landed_index(plan.to_rotation, self.wedges.len());
        // Same angle mod 2π; keeps the next spin's start in [0, 2π).
        self.rotation = plan.to_rotation.rem_euclid(TAU);
        let content = self.wedges[index].content.clone();
        log::info!("wheel landed on {index}: {content}");
        if let Some(callback) = self.on_result.as_mut() {
            callback(index, &content);
        }
        Some(SpinResult { index, content })
    }
}
