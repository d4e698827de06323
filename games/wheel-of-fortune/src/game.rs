//! Wheel of fortune - spin a wheel of coloured wedges past a fixed pointer.
//! The wheel face is vector geometry; labels and the result line are glyph
//! entities that follow the wheel's rotation.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec2;
use parlor_engine::api::game::{GameConfig, RenderContext};
use parlor_engine::api::types::EntityId;
use parlor_engine::components::entity::Entity;
use parlor_engine::input::drag::HitBox;
use parlor_engine::input::queue::{keys, InputEvent, InputQueue};
use parlor_engine::systems::text::{build_text_entities, text_width, FontConfig, TextStyle};
use parlor_engine::{Bootstrap, EngineContext, Game, GameEvent, Rng, Settings, SoundRole, TextAlign, Tone, Tween};
use parlor_engine::{VectorColor, VectorState};

use crate::content::WheelContent;
use crate::wheel::{SpinConfig, SpinResult, Wedge, Wheel};

// Wheel geometry, as fractions of the radius
const RADIUS_FRACTION: f32 = 0.32; // of the shorter viewport side
const HUB_RADIUS: f32 = 0.15;
const RADIAL_INNER: f32 = 0.3;
const RADIAL_OUTER: f32 = 0.75;
const CENTER_TEXT_RADIUS: f32 = 0.75;
const CENTER_TEXT_WIDTH: f32 = 0.5;
const MIN_LABEL_SIZE: f32 = 12.0;

const RING_WIDTH: f32 = 4.0;
const SEPARATOR_WIDTH: f32 = 3.0;
const POINTER_LENGTH: f32 = 30.0;
const POINTER_HALF_WIDTH: f32 = 14.0;

/// Spin button size before `buttonScale`.
const BUTTON_BASE: Vec2 = Vec2::new(480.0, 160.0);
const BUTTON_LABEL: &str = "SPIN";

const LABEL_TAG: &str = "label";
const RESULT_TAG: &str = "result";
const BUTTON_TAG: &str = "button";

/// Tween completion tag for the spin animation.
const SPIN_DONE: u32 = 1;

/// Custom event kinds from the host UI
mod events {
    pub const SPIN: u32 = 1;
}

/// Game event kinds to the host
pub mod game_events {
    /// a = duration in ms
    pub const SPIN_STARTED: f32 = 1.0;
    /// a = wedge index, b = wedge count
    pub const RESULT: f32 = 2.0;
}

/// Screen placement, recomputed on resize.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Layout {
    center: Vec2,
    radius: f32,
    button: HitBox,
    result_pos: Vec2,
}

impl Layout {
    fn new(viewport: Vec2, settings: &Settings) -> Self {
        let radius = viewport.min_element() * RADIUS_FRACTION;
        let center = Vec2::new(viewport.x * 0.5, viewport.y * 0.46);
        let button_size = BUTTON_BASE * settings.button_scale;
        let button_center = Vec2::new(center.x, center.y + radius + button_size.y * 0.5 + 24.0);
        let result_y = (center.y - radius - settings.result_text_size * 1.5).max(settings.result_text_size);
        Self {
            center,
            radius,
            button: HitBox::new(button_center, button_size),
            result_pos: Vec2::new(center.x, result_y),
        }
    }

    fn on_wheel(&self, p: Vec2) -> bool {
        p.distance(self.center) <= self.radius
    }
}

/// One glyph of a wedge label, in wheel-local coordinates.
#[derive(Debug, Clone, Copy)]
struct LabelGlyph {
    id: EntityId,
    local: Vec2,
    local_rotation: f32,
}

pub struct WheelGame {
    settings: Settings,
    wheel: Wheel,
    rng: Rng,
    font: FontConfig,
    layout: Layout,
    anchor: Option<EntityId>,
    labels: Vec<LabelGlyph>,
    /// Displayed rotation of the wheel face, read back from the anchor.
    rotation: f32,
    last_result: Option<SpinResult>,
}

impl Bootstrap for WheelGame {
    type Content = WheelContent;

    fn boot(settings: Settings, content: WheelContent, seed: u64) -> Self {
        let wedges = content.wedges().iter().map(Wedge::from_doc).collect();
        let wheel = Wheel::new(wedges, SpinConfig::from(&content.settings));
        let layout = Layout::new(Vec2::new(1920.0, 1080.0), &settings);
        Self {
            settings,
            wheel,
            rng: Rng::new(seed),
            font: FontConfig::default(),
            layout,
            anchor: None,
            labels: Vec::new(),
            rotation: 0.0,
            last_result: None,
        }
    }
}

/// Keep a baseline angle pointing rightwards so text is never upside down.
fn readable(angle: f32) -> f32 {
    let a = angle.rem_euclid(TAU);
    if a > FRAC_PI_2 && a < PI + FRAC_PI_2 {
        a + PI
    } else {
        a
    }
}

/// Largest size ≤ `size` at which `text` fits in `max_width`, but never
/// below the minimum label size.
fn fit_size(text: &str, size: f32, max_width: f32, font: &FontConfig) -> f32 {
    let width = text_width(text, size, font);
    if width > max_width && width > 0.0 {
        (size * max_width / width).max(MIN_LABEL_SIZE)
    } else {
        size
    }
}

fn contrast(tone: Tone) -> u32 {
    match tone {
        Tone::White => 0x00_0000,
        Tone::Black => 0xFF_FFFF,
    }
}

impl WheelGame {
    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn last_result(&self) -> Option<&SpinResult> {
        self.last_result.as_ref()
    }

    fn build_scene(&mut self, ctx: &mut EngineContext) {
        self.layout = Layout::new(ctx.viewport, &self.settings);

        let anchor = match self.anchor {
            Some(id) => id,
            None => {
                let id = ctx.next_id();
                ctx.scene.spawn(Entity::new(id).with_tag("wheel").with_rotation(self.rotation));
                self.anchor = Some(id);
                id
            }
        };
        if let Some(e) = ctx.scene.get_mut(anchor) {
            e.pos = self.layout.center;
        }

        self.build_labels(ctx);
        self.build_button(ctx);
        self.show_result(ctx);
    }

    fn build_labels(&mut self, ctx: &mut EngineContext) {
        ctx.despawn_tagged(LABEL_TAG);
        self.labels.clear();

        let radius = self.layout.radius;
        let wedge_angle = self.wheel.wedge_angle() as f32;
        let base_size = self.settings.wheel_text_size;
        let align = self.settings.wheel_text_align;
        let wedges = self.wheel.wedges().to_vec();

        for (i, wedge) in wedges.iter().enumerate() {
            let mid = (i as f32 + 0.5) * wedge_angle;
            let (distance, baseline, max_width) = match align {
                TextAlign::Radial => {
                    let span = (RADIAL_OUTER - RADIAL_INNER) * radius;
                    (RADIAL_INNER * radius + span * 0.7, readable(mid), span * 0.9)
                }
                TextAlign::Center => (
                    CENTER_TEXT_RADIUS * radius,
                    readable(mid + FRAC_PI_2),
                    CENTER_TEXT_WIDTH * radius,
                ),
            };
            let size = fit_size(&wedge.content, base_size, max_width, &self.font);
            let style = TextStyle::new(size)
                .with_rotation(baseline)
                .with_tint(wedge.text_color)
                .with_depth(10);
            let glyphs = build_text_entities(
                &wedge.content,
                Vec2::from_angle(mid) * distance,
                style,
                &self.font,
                LABEL_TAG,
                &mut || ctx.next_id(),
            );
            for glyph in glyphs {
                self.labels.push(LabelGlyph {
                    id: glyph.id,
                    local: glyph.pos,
                    local_rotation: glyph.rotation,
                });
                ctx.scene.spawn(glyph);
            }
        }
        self.place_labels(ctx);
    }

    /// Move label glyphs to follow the wheel.
    fn place_labels(&self, ctx: &mut EngineContext) {
        let turn = Vec2::from_angle(self.rotation);
        for label in &self.labels {
            if let Some(e) = ctx.scene.get_mut(label.id) {
                e.pos = self.layout.center + turn.rotate(label.local);
                e.rotation = label.local_rotation + self.rotation;
            }
        }
    }

    fn build_button(&mut self, ctx: &mut EngineContext) {
        ctx.despawn_tagged(BUTTON_TAG);
        let size = self.layout.button.half.y;
        let style = TextStyle::new(size)
            .with_tint(contrast(self.settings.ui_components_color))
            .with_depth(20);
        let glyphs = build_text_entities(BUTTON_LABEL, self.layout.button.center, style, &self.font, BUTTON_TAG, &mut || ctx.next_id());
        for glyph in glyphs {
            ctx.scene.spawn(glyph);
        }
    }

    fn show_result(&self, ctx: &mut EngineContext) {
        ctx.despawn_tagged(RESULT_TAG);
        let Some(result) = &self.last_result else {
            return;
        };
        let max_width = ctx.viewport.x * 0.9;
        let size = fit_size(&result.content, self.settings.result_text_size, max_width, &self.font);
        let style = TextStyle::new(size)
            .with_tint(self.settings.questions_text_color.rgb24())
            .with_depth(20);
        let glyphs = build_text_entities(&result.content, self.layout.result_pos, style, &self.font, RESULT_TAG, &mut || ctx.next_id());
        for glyph in glyphs {
            ctx.scene.spawn(glyph);
        }
    }

    fn try_spin(&mut self, ctx: &mut EngineContext) {
        let Some(anchor) = self.anchor else {
            return;
        };
        let Some(plan) = self.wheel.spin(&mut self.rng) else {
            return;
        };
        let duration = plan.duration_ms as f32 / 1000.0;
        ctx.tweens.add(
            anchor,
            Tween::rotation(plan.from_rotation as f32, plan.to_rotation as f32, duration, plan.easing)
                .with_on_complete(SPIN_DONE),
        );
        self.last_result = None;
        self.show_result(ctx);
        ctx.play(SoundRole::Spin);
        ctx.emit_event(GameEvent::new(game_events::SPIN_STARTED, plan.duration_ms as f32, 0.0, 0.0));
    }

    fn finish_spin(&mut self, ctx: &mut EngineContext) {
        let Some(result) = self.wheel.complete() else {
            return;
        };
        // Snap to the settled angle; the tween's f32 end value may differ by an ulp.
        self.rotation = self.wheel.rotation() as f32;
        if let Some(e) = self.anchor.and_then(|id| ctx.scene.get_mut(id)) {
            e.rotation = self.rotation;
        }
        ctx.play(SoundRole::Result);
        ctx.emit_event(GameEvent::new(
            game_events::RESULT,
            result.index as f32,
            self.wheel.wedges().len() as f32,
            0.0,
        ));
        self.last_result = Some(result);
        self.show_result(ctx);
    }
}

impl Game for WheelGame {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_instances: 1024,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        if let Some(font) = FontConfig::from_manifest(&ctx.manifest, &self.settings.font) {
            self.font = font;
        } else {
            log::warn!("no font atlas named '{}', using the default font", self.settings.font);
        }
        self.build_scene(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::PointerDown { x, y } => {
                    let p = Vec2::new(x, y);
                    if self.layout.on_wheel(p) || self.layout.button.contains(p) {
                        self.try_spin(ctx);
                    }
                }
                InputEvent::KeyDown { key_code } if key_code == keys::SPACE || key_code == keys::ENTER => {
                    self.try_spin(ctx);
                }
                InputEvent::Custom { kind, .. } if kind == events::SPIN => self.try_spin(ctx),
                InputEvent::Resize { .. } => self.build_scene(ctx),
                _ => {}
            }
        }

        let completed: Vec<u32> = ctx.tweens.drain_completed().collect();
        if completed.contains(&SPIN_DONE) {
            self.finish_spin(ctx);
        }

        if let Some(rotation) = self.anchor.and_then(|id| ctx.scene.get(id)).map(|e| e.rotation) {
            self.rotation = rotation;
        }
        self.place_labels(ctx);
    }

    fn render(&self, ctx: &mut RenderContext) {
        self.draw_wheel(ctx.vectors);
        self.draw_button(ctx.vectors);
    }
}

impl WheelGame {
    fn draw_wheel(&self, vectors: &mut VectorState) {
        let Layout { center, radius, .. } = self.layout;
        let wedge_angle = self.wheel.wedge_angle() as f32;
        let white = VectorColor::WHITE;

        for (i, wedge) in self.wheel.wedges().iter().enumerate() {
            let start = i as f32 * wedge_angle + self.rotation;
            vectors.fill_sector(center, radius, start, start + wedge_angle, VectorColor::from_rgb24(wedge.color));
        }
        if self.wheel.wedges().len() > 1 {
            for i in 0..self.wheel.wedges().len() {
                let edge = Vec2::from_angle(i as f32 * wedge_angle + self.rotation) * radius;
                vectors.stroke_polyline(&[center, center + edge], SEPARATOR_WIDTH, white);
            }
        }
        vectors.stroke_circle(center, radius, RING_WIDTH, white);

        vectors.fill_circle(center, radius * HUB_RADIUS, VectorColor::CHARCOAL);
        vectors.stroke_circle(center, radius * HUB_RADIUS, SEPARATOR_WIDTH, white);

        // Pointer at angle 0, tip on the rim.
        let tip = center + Vec2::new(radius - 8.0, 0.0);
        let back = tip.x + POINTER_LENGTH;
        vectors.fill_polygon(
            &[tip, Vec2::new(back, tip.y - POINTER_HALF_WIDTH), Vec2::new(back, tip.y + POINTER_HALF_WIDTH)],
            VectorColor::rgb(0.95, 0.75, 0.1),
        );
    }

    fn draw_button(&self, vectors: &mut VectorState) {
        let button = self.layout.button;
        let fill = VectorColor::from_rgb24(self.settings.ui_components_color.rgb24());
        let alpha = if self.wheel.can_spin() { 1.0 } else { 0.5 };
        vectors.fill_rect(button.center, button.half * 2.0, fill.with_alpha(alpha));
        vectors.stroke_rect(button.center, button.half * 2.0, 2.0, VectorColor::from_rgb24(contrast(self.settings.ui_components_color)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_engine::assets::manifest::{AssetManifest, AtlasDescriptor, SoundDescriptor};
    use parlor_engine::AtlasId;
    use parlor_engine::{AudioManager, SoundEvent};

    const STEP: f32 = 1.0 / 60.0;

    fn context() -> EngineContext {
        let mut ctx = EngineContext::new();
        let mut manifest = AssetManifest::default();
        manifest.atlases.push(AtlasDescriptor { name: "sprites".into(), cols: 8, rows: 8, path: "s.png".into(), glyphs: None });
        manifest.atlases.push(AtlasDescriptor { name: "Arial".into(), cols: 16, rows: 6, path: "a.png".into(), glyphs: None });
        for (key, id) in [("clickSound", 1), ("spinSound", 2), ("resultSound", 3)] {
            manifest.sounds.insert(key.into(), SoundDescriptor { path: format!("{key}.mp3"), event_id: Some(id) });
        }
        ctx.audio = AudioManager::from_manifest(&manifest);
        ctx.manifest = manifest;
        ctx
    }

    fn started(seed: u64) -> (WheelGame, EngineContext) {
        let mut game = WheelGame::boot(Settings::default(), WheelContent::default(), seed);
        let mut ctx = context();
        game.init(&mut ctx);
        (game, ctx)
    }

    fn step(game: &mut WheelGame, ctx: &mut EngineContext, input: &InputQueue) {
        ctx.clear_frame_data();
        ctx.step_timers(STEP);
        game.update(ctx, input);
        ctx.step_tweens(STEP);
    }

    fn queue(events: &[InputEvent]) -> InputQueue {
        let mut q = InputQueue::new();
        for e in events {
            q.push(*e);
        }
        q
    }

    /// Step until the result event arrives. Returns (index, wedge count).
    fn run_to_result(game: &mut WheelGame, ctx: &mut EngineContext) -> (usize, usize) {
        let idle = InputQueue::new();
        for _ in 0..(60 * 6) {
            step(game, ctx, &idle);
            if let Some(e) = ctx.events.iter().find(|e| e.kind == game_events::RESULT) {
                return (e.a as usize, e.b as usize);
            }
        }
        panic!("spin never finished");
    }

    #[test]
    fn init_uses_named_font_and_builds_labels() {
        let (game, ctx) = started(1);
        assert_eq!(game.font.atlas, AtlasId(1));
        assert!(ctx.scene.iter().any(|e| e.tag == LABEL_TAG));
        assert!(ctx.scene.iter().any(|e| e.tag == BUTTON_TAG));
        assert!(ctx.scene.iter().all(|e| e.tag != RESULT_TAG));
    }

    #[test]
    fn spin_key_plays_spin_then_result() {
        let (mut game, mut ctx) = started(3);
        step(&mut game, &mut ctx, &queue(&[InputEvent::KeyDown { key_code: keys::SPACE }]));
        assert!(game.wheel().is_spinning());
        assert_eq!(ctx.sounds, vec![SoundEvent(2)]);
        assert!(ctx.events.iter().any(|e| e.kind == game_events::SPIN_STARTED));

        let (index, count) = run_to_result(&mut game, &mut ctx);
        assert_eq!(count, 2);
        assert!(index < count);
        assert_eq!(ctx.sounds, vec![SoundEvent(3)]);
        assert!(!game.wheel().is_spinning());
        let result = game.last_result().unwrap();
        assert_eq!(result.index, index);
        assert!(ctx.scene.iter().any(|e| e.tag == RESULT_TAG));
    }

    #[test]
    fn requests_while_spinning_are_dropped() {
        let (mut game, mut ctx) = started(4);
        let spin = InputEvent::Custom { kind: events::SPIN, a: 0.0, b: 0.0, c: 0.0 };
        step(&mut game, &mut ctx, &queue(&[spin, spin]));
        assert_eq!(ctx.tweens.len(), 1);
        step(&mut game, &mut ctx, &queue(&[spin]));
        assert_eq!(ctx.tweens.len(), 1);
        assert!(ctx.sounds.is_empty());
    }

    #[test]
    fn tapping_the_wheel_spins_but_tapping_outside_does_not() {
        let (mut game, mut ctx) = started(5);
        step(&mut game, &mut ctx, &queue(&[InputEvent::PointerDown { x: 2.0, y: 2.0 }]));
        assert!(!game.wheel().is_spinning());
        let c = game.layout.center;
        step(&mut game, &mut ctx, &queue(&[InputEvent::PointerDown { x: c.x, y: c.y }]));
        assert!(game.wheel().is_spinning());
    }

    #[test]
    fn settled_wheel_shows_the_landed_wedge_under_the_pointer() {
        let (mut game, mut ctx) = started(6);
        for _ in 0..3 {
            step(&mut game, &mut ctx, &queue(&[InputEvent::KeyDown { key_code: keys::ENTER }]));
            let (index, count) = run_to_result(&mut game, &mut ctx);
            // The pointer sits at world angle 0: wedge `index` must cover local angle −rotation.
            let wedge_angle = TAU / count as f32;
            let local = (-game.rotation).rem_euclid(TAU);
            let start = index as f32 * wedge_angle;
            assert!(local >= start - 1e-3 && local <= start + wedge_angle + 1e-3);
        }
    }

    #[test]
    fn labels_follow_rotation() {
        let (mut game, mut ctx) = started(7);
        let label = game.labels[0];
        let before = ctx.scene.get(label.id).unwrap().pos;
        step(&mut game, &mut ctx, &queue(&[InputEvent::KeyDown { key_code: keys::SPACE }]));
        for _ in 0..10 {
            step(&mut game, &mut ctx, &InputQueue::new());
        }
        let after = ctx.scene.get(label.id).unwrap().pos;
        assert!(before.distance(after) > 1.0);
        // Still the same distance from the centre.
        let c = game.layout.center;
        assert!((before.distance(c) - after.distance(c)).abs() < 0.01);
    }

    #[test]
    fn resize_recenters_the_wheel() {
        let (mut game, mut ctx) = started(8);
        ctx.viewport = Vec2::new(800.0, 600.0);
        step(&mut game, &mut ctx, &queue(&[InputEvent::Resize { width: 800.0, height: 600.0 }]));
        assert_eq!(game.layout.center.x, 400.0);
        assert!((game.layout.radius - 600.0 * RADIUS_FRACTION).abs() < 1e-4);
    }

    #[test]
    fn readable_angles_never_point_left() {
        for i in 0..16 {
            let a = readable(i as f32 * TAU / 16.0 + 0.01);
            assert!(Vec2::from_angle(a).x >= -1e-4);
        }
    }

    #[test]
    fn labels_shrink_to_fit_but_not_below_minimum() {
        let font = FontConfig::default();
        assert_eq!(fit_size("ab", 16.0, 1000.0, &font), 16.0);
        let shrunk = fit_size("a long wedge label", 16.0, 100.0, &font);
        assert!(shrunk < 16.0 && shrunk >= MIN_LABEL_SIZE);
        assert_eq!(fit_size("a very very very long wedge label", 16.0, 10.0, &font), MIN_LABEL_SIZE);
    }
}
