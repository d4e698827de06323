use glam::Vec2;
use serde::de::DeserializeOwned;

use crate::api::types::{EntityId, GameEvent, SoundEvent};
use crate::assets::manifest::AssetManifest;
use crate::audio::{AudioManager, SoundRole};
use crate::config::Settings;
use crate::core::scene::Scene;
use crate::core::time::Timers;
use crate::extensions::tween::TweenState;
use crate::input::queue::InputQueue;
use crate::renderer::instance::RenderBuffer;
#[cfg(feature = "vectors")]
use crate::systems::vector::VectorState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units before the first resize.
    pub world_width: f32,
    /// World height in game units before the first resize.
    pub world_height: f32,
    /// Maximum number of render instances (default: 512).
    pub max_instances: usize,
    /// Maximum number of vector vertices (default: 16384).
    pub max_vector_vertices: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 1920.0,
            world_height: 1080.0,
            max_instances: 512,
            max_vector_vertices: 16384,
            max_sounds: 32,
            max_events: 32,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Build the first screen. Runs when the Main scene begins, after the
    /// manifest is loaded and `ctx.audio` is bound.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step. `input` holds everything the host pushed since the
    /// previous frame on the first step of a frame and is empty afterwards.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only pass for per-frame geometry.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// How a game is constructed from the loaded configuration.
pub trait Bootstrap: Game + Sized {
    /// Content document (`questions.json`). `Default` is the built-in fallback.
    type Content: DeserializeOwned + Default;

    fn boot(settings: Settings, content: Self::Content, seed: u64) -> Self;
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub tweens: TweenState,
    pub timers: Timers,
    pub audio: AudioManager,
    pub manifest: AssetManifest,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    /// Current world size in game units.
    pub viewport: Vec2,
    fired_timers: Vec<u32>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        let config = GameConfig::default();
        Self::with_viewport(Vec2::new(config.world_width, config.world_height))
    }

    pub fn with_viewport(viewport: Vec2) -> Self {
        Self {
            scene: Scene::new(),
            tweens: TweenState::new(),
            timers: Timers::new(),
            audio: AudioManager::silent(),
            manifest: AssetManifest::default(),
            sounds: Vec::new(),
            events: Vec::new(),
            viewport,
            fired_timers: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Play the sound bound to `role`, if any.
    pub fn play(&mut self, role: SoundRole) -> bool {
        self.audio.play(role, &mut self.sounds)
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Despawn an entity and drop its tweens.
    pub fn despawn(&mut self, id: EntityId) {
        self.tweens.remove_entity(id);
        self.scene.despawn(id);
    }

    /// Despawn every entity tagged `tag` and drop their tweens.
    pub fn despawn_tagged(&mut self, tag: &str) -> usize {
        let ids: Vec<EntityId> = self.scene.iter().filter(|e| e.tag == tag).map(|e| e.id).collect();
        for id in &ids {
            self.tweens.remove_entity(*id);
        }
        self.scene.despawn_tagged(tag)
    }

    /// Timer tags that fired on this step.
    pub fn fired_timers(&self) -> &[u32] {
        &self.fired_timers
    }

    /// Advance timers. Called by the runner before `Game::update()`.
    pub fn step_timers(&mut self, dt: f32) {
        self.fired_timers = self.timers.tick(dt);
    }

    /// Advance tweens and write their values into the scene.
    /// Called by the runner after `Game::update()`.
    pub fn step_tweens(&mut self, dt: f32) {
        self.tweens.tick(dt, &mut self.scene);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-frame output the game may add to in `Game::render`.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
    #[cfg(feature = "vectors")]
    pub vectors: &'a mut VectorState,
    pub viewport: Vec2,
}
