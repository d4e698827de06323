// extensions/tween.rs
//
// Tween table: animates entity fields by EntityId.
// Decoupled from game state: games read back entity fields or completion
// tags, never the tween internals.
//
// Usage:
//   let id = ctx.tweens.add(wheel, Tween::rotation(0.0, -stop, 4.0, Easing::CubicOut).with_on_complete(SPIN_DONE));
//   ctx.tweens.tick(dt, &mut ctx.scene);
//   for tag in ctx.tweens.drain_completed() { ... }

use std::collections::BTreeMap;
use glam::Vec2;
use crate::api::types::EntityId;
use crate::core::scene::Scene;
use super::easing::{Easing, ease, ease_vec2};

/// What property a tween animates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenTarget {
    /// Animate Entity.pos
    Position { from: Vec2, to: Vec2 },
    /// Animate Entity.pos.x only
    PositionX { from: f32, to: f32 },
    /// Animate Entity.rotation
    Rotation { from: f32, to: f32 },
}

/// What happens when a tween reaches its end value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenLoop {
    /// Stop at the end value and remove the tween.
    #[default]
    Once,
    /// Play to the end value and back to the start, `repeats` extra times
    /// after the first round trip. Finishes at the start value.
    Yoyo { repeats: u32 },
}

/// A single tween animation.
#[derive(Debug, Clone)]
pub struct Tween {
    pub target: TweenTarget,
    /// Duration of one leg in seconds.
    pub duration: f32,
    pub elapsed: f32,
    pub easing: Easing,
    pub loop_mode: TweenLoop,
    /// Current leg direction (false on the way back of a yoyo).
    forward: bool,
    /// Round trips finished so far (yoyo only).
    trips: u32,
    /// Tag reported through `drain_completed` when the tween finishes.
    pub on_complete: Option<u32>,
}

impl Tween {
    fn with_target(target: TweenTarget, duration: f32, easing: Easing) -> Self {
        Self {
            target,
            duration,
            elapsed: 0.0,
            easing,
            loop_mode: TweenLoop::Once,
            forward: true,
            trips: 0,
            on_complete: None,
        }
    }

    pub fn position(from: Vec2, to: Vec2, duration: f32, easing: Easing) -> Self {
        Self::with_target(TweenTarget::Position { from, to }, duration, easing)
    }

    pub fn position_x(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::with_target(TweenTarget::PositionX { from, to }, duration, easing)
    }

    pub fn rotation(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::with_target(TweenTarget::Rotation { from, to }, duration, easing)
    }

    // -- Builder methods --

    pub fn with_loop(mut self, mode: TweenLoop) -> Self {
        self.loop_mode = mode;
        self
    }

    pub fn with_on_complete(mut self, tag: u32) -> Self {
        self.on_complete = Some(tag);
        self
    }

    /// Normalized progress of the current leg [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    fn apply(&self, scene: &mut Scene, entity: EntityId) {
        let Some(e) = scene.get_mut(entity) else {
            return;
        };
        let t = if self.forward {
            self.progress()
        } else {
            1.0 - self.progress()
        };
        match self.target {
            TweenTarget::Position { from, to } => e.pos = ease_vec2(from, to, t, self.easing),
            TweenTarget::PositionX { from, to } => e.pos.x = ease(from, to, t, self.easing),
            TweenTarget::Rotation { from, to } => e.rotation = ease(from, to, t, self.easing),
        }
    }

    /// Advance one step. Returns true once the tween has finished.
    fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed < self.duration {
            return false;
        }
        match self.loop_mode {
            TweenLoop::Once => true,
            TweenLoop::Yoyo { repeats } => {
                if self.forward {
                    self.forward = false;
                    self.elapsed = 0.0;
                    false
                } else if self.trips < repeats {
                    self.trips += 1;
                    self.forward = true;
                    self.elapsed = 0.0;
                    false
                } else {
                    // Leave the value at the start of the leg.
                    self.elapsed = self.duration;
                    true
                }
            }
        }
    }
}

/// Handle to a tween for later reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub u32);

/// Manages all active tweens. Tweens tick in creation order.
#[derive(Debug, Default)]
pub struct TweenState {
    tweens: BTreeMap<TweenId, (EntityId, Tween)>,
    next_id: u32,
    completed_events: Vec<u32>,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tween for an entity. Returns a handle for later control.
    pub fn add(&mut self, entity: EntityId, tween: Tween) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.insert(id, (entity, tween));
        id
    }

    /// Remove a tween by handle. Its completion tag is not reported.
    pub fn remove(&mut self, id: TweenId) -> bool {
        self.tweens.remove(&id).is_some()
    }

    /// Remove all tweens for an entity.
    pub fn remove_entity(&mut self, entity: EntityId) {
        self.tweens.retain(|_, (e, _)| *e != entity);
    }

    /// Whether any tween is animating `entity`.
    pub fn is_animating(&self, entity: EntityId) -> bool {
        self.tweens.values().any(|(e, _)| *e == entity)
    }

    pub fn get(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(&id).map(|(_, t)| t)
    }

    /// Advance all tweens and write their values into the scene.
    /// Returns the number of tweens that finished this tick.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) -> usize {
        let mut finished = Vec::new();

        for (&id, (entity, tween)) in self.tweens.iter_mut() {
            let done = tween.advance(dt);
            tween.apply(scene, *entity);
            if done {
                if let Some(tag) = tween.on_complete {
                    self.completed_events.push(tag);
                }
                finished.push(id);
            }
        }

        for id in &finished {
            self.tweens.remove(id);
        }
        finished.len()
    }

    /// Drain completion tags of tweens that finished since the last call.
    pub fn drain_completed(&mut self) -> impl Iterator<Item = u32> + '_ {
        self.completed_events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
        self.completed_events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;

    fn scene_with(id: EntityId) -> Scene {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(id));
        scene
    }

    #[test]
    fn position_tween_reaches_target_and_is_removed() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut tweens = TweenState::new();
        tweens.add(id, Tween::position(Vec2::ZERO, Vec2::new(100.0, 0.0), 1.0, Easing::Linear));

        tweens.tick(0.5, &mut scene);
        assert!((scene.get(id).unwrap().pos.x - 50.0).abs() < 0.01);

        assert_eq!(tweens.tick(0.5, &mut scene), 1);
        assert!((scene.get(id).unwrap().pos.x - 100.0).abs() < 0.01);
        assert!(tweens.is_empty());
    }

    #[test]
    fn rotation_tween_reports_completion_tag() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut tweens = TweenState::new();
        tweens.add(id, Tween::rotation(0.0, -10.0, 0.2, Easing::CubicOut).with_on_complete(42));

        tweens.tick(0.1, &mut scene);
        assert_eq!(tweens.drain_completed().count(), 0);
        tweens.tick(0.15, &mut scene);
        assert_eq!(tweens.drain_completed().collect::<Vec<_>>(), vec![42]);
        assert!((scene.get(id).unwrap().rotation + 10.0).abs() < 1e-4);
    }

    #[test]
    fn yoyo_returns_to_start_after_repeats() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut tweens = TweenState::new();
        tweens.add(
            id,
            Tween::position_x(100.0, 110.0, 0.05, Easing::Linear)
                .with_loop(TweenLoop::Yoyo { repeats: 5 }),
        );

        // First leg out.
        tweens.tick(0.05, &mut scene);
        assert!((scene.get(id).unwrap().pos.x - 110.0).abs() < 0.01);
        assert_eq!(tweens.len(), 1);

        // Six round trips in total = twelve legs.
        for _ in 0..11 {
            tweens.tick(0.05, &mut scene);
        }
        assert!(tweens.is_empty());
        assert!((scene.get(id).unwrap().pos.x - 100.0).abs() < 0.01);
    }

    #[test]
    fn remove_entity_tweens() {
        let id = EntityId(1);
        let mut tweens = TweenState::new();
        tweens.add(id, Tween::position(Vec2::ZERO, Vec2::ONE, 1.0, Easing::Linear));
        tweens.add(id, Tween::rotation(0.0, 1.0, 1.0, Easing::Linear));
        assert!(tweens.is_animating(id));
        tweens.remove_entity(id);
        assert!(tweens.is_empty());
    }
}
