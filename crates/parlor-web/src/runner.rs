use parlor_engine::{
    custom, keys, AssetManifest, AudioManager, Bootstrap, ConfigService, EngineContext,
    FixedTimestep, Game, GameConfig, GameEvent, InputEvent, InputQueue, PrefetchedSource,
    ProtocolLayout, RenderBuffer, RenderContext, SceneFlow, Stage,
};
use parlor_engine::config::{CONTENT_URL, SETTINGS_URL};
use parlor_engine::systems::render::build_render_buffer;
#[cfg(feature = "vectors")]
use parlor_engine::VectorState;
use glam::Vec2;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
///
/// The runner owns the scene lifecycle: nothing reaches the game until the
/// manifest has loaded and the player has left the start screen.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    flow: SceneFlow,
    /// Raw events pushed by the host since the last tick.
    input: InputQueue,
    /// Events waiting for the next fixed step.
    pending: InputQueue,
    /// Handed to the extra steps of a catch-up frame.
    idle: InputQueue,
    manifest: Option<AssetManifest>,
    render_buffer: RenderBuffer,
    #[cfg(feature = "vectors")]
    vectors: VectorState,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    /// Flat buffer of sound event IDs for host reads.
    sound_buffer: Vec<u32>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);

        let render_buffer = RenderBuffer::with_capacity(config.max_instances);
        let sound_buffer = Vec::with_capacity(config.max_sounds);
        let ctx = EngineContext::with_viewport(Vec2::new(config.world_width, config.world_height));

        Self {
            game,
            ctx,
            flow: SceneFlow::new(),
            input: InputQueue::new(),
            pending: InputQueue::new(),
            idle: InputQueue::new(),
            manifest: None,
            render_buffer,
            #[cfg(feature = "vectors")]
            vectors: VectorState::new(),
            timestep,
            layout,
            config,
            sound_buffer,
        }
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Hand over the asset manifest. A broken manifest is logged and
    /// replaced with an empty one; the game still starts, silently.
    pub fn load_manifest(&mut self, json: &str) {
        self.manifest = Some(AssetManifest::from_json_or_empty(json));
    }

    pub fn stage(&self) -> Stage {
        self.flow.stage()
    }

    /// Run one frame tick: lifecycle, fixed steps, then output buffers.
    pub fn tick(&mut self, dt: f32) {
        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        if let Some(manifest) = self.manifest.take() {
            self.ctx.audio = AudioManager::from_manifest(&manifest);
            self.ctx.manifest = manifest;
            if let Some(stage) = self.flow.assets_ready() {
                self.emit_stage(stage);
            }
        }

        self.route_input();

        if self.flow.is_main() {
            let steps = self.timestep.accumulate(dt);
            for step in 0..steps {
                let step_dt = self.timestep.dt();
                self.ctx.step_timers(step_dt);
                let input = if step == 0 { &self.pending } else { &self.idle };
                self.game.update(&mut self.ctx, input);
                self.ctx.step_tweens(step_dt);
                if step == 0 {
                    self.pending.clear();
                }
            }
        }

        self.build_output();
    }

    /// Handle kernel-level events and queue the rest for the game.
    fn route_input(&mut self) {
        for event in self.input.drain() {
            match event {
                InputEvent::Visibility { visible } => {
                    self.ctx.audio.set_visible(visible, &mut self.ctx.events);
                }
                InputEvent::Resize { width, height } => {
                    self.ctx.viewport = Vec2::new(width, height);
                }
                InputEvent::Custom { kind, .. } if kind == custom::TOGGLE_SOUND => {
                    self.ctx.audio.toggle(&mut self.ctx.events);
                    continue;
                }
                _ => {}
            }

            match self.flow.stage() {
                // Nothing is interactive until the manifest arrives.
                Stage::Preload => {}
                Stage::Start => {
                    if is_start_request(&event) {
                        self.start_main();
                    }
                }
                Stage::Main => self.pending.push(event),
            }
        }
    }

    fn start_main(&mut self) {
        if let Some(stage) = self.flow.start_requested() {
            self.game.init(&mut self.ctx);
            self.emit_stage(stage);
            self.ctx.audio.start_music(&mut self.ctx.events);
        }
    }

    fn emit_stage(&mut self, stage: Stage) {
        self.ctx.emit_event(GameEvent::new(GameEvent::SCENE, stage.index(), 0.0, 0.0));
    }

    fn build_output(&mut self) {
        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer);
        #[cfg(feature = "vectors")]
        self.vectors.clear();

        if self.flow.is_main() {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
                #[cfg(feature = "vectors")]
                vectors: &mut self.vectors,
                viewport: self.ctx.viewport,
            };
            self.game.render(&mut render_ctx);
        }

        // Pack sound events into flat buffer
        self.sound_buffer.clear();
        let sounds = ProtocolLayout::clamp("sounds", self.ctx.sounds.len(), self.layout.max_sounds);
        self.sound_buffer.extend(self.ctx.sounds[..sounds].iter().map(|s| s.0));
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    // ---- Pointer accessors for host reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        ProtocolLayout::clamp("instances", self.render_buffer.instances.len(), self.layout.max_instances) as u32
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.vectors.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertex_count(&self) -> u32 {
        ProtocolLayout::clamp("vectors", self.vectors.vertex_count(), self.layout.max_vector_vertices) as u32
    }

    pub fn sound_events_ptr(&self) -> *const u32 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        ProtocolLayout::clamp("events", self.ctx.events.len(), self.layout.max_events) as u32
    }

    pub fn world_width(&self) -> f32 {
        self.ctx.viewport.x
    }

    pub fn world_height(&self) -> f32 {
        self.ctx.viewport.y
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_vector_vertices(&self) -> u32 {
        self.layout.max_vector_vertices as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn fixed_dt(&self) -> f32 {
        self.config.fixed_dt
    }
}

impl<G: Bootstrap> GameRunner<G> {
    /// Build the game from the documents the host fetched. `None` means the
    /// fetch failed; the built-in defaults are used in its place.
    pub fn from_documents(settings_json: Option<String>, content_json: Option<String>, seed: u64) -> Self {
        let source = PrefetchedSource::new()
            .with(SETTINGS_URL, settings_json)
            .with(CONTENT_URL, content_json);
        let (settings, content) = ConfigService::new(source).load_all::<G::Content>();
        Self::new(G::boot(settings, content, seed))
    }
}

/// Leaves the start screen: a tap, Enter/Space, or the host's START button.
fn is_start_request(event: &InputEvent) -> bool {
    match *event {
        InputEvent::PointerDown { .. } => true,
        InputEvent::KeyDown { key_code } => key_code == keys::ENTER || key_code == keys::SPACE,
        InputEvent::Custom { kind, .. } => kind == custom::START,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_engine::{Entity, Settings, SoundEvent, SoundRole, SpriteComponent};
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    struct Words {
        #[serde(default)]
        list: Vec<String>,
    }

    struct Recorder {
        settings: Settings,
        words: Vec<String>,
        inits: u32,
        seen: Vec<InputEvent>,
        steps: u32,
    }

    impl Game for Recorder {
        fn init(&mut self, ctx: &mut EngineContext) {
            self.inits += 1;
            let id = ctx.next_id();
            ctx.scene.spawn(Entity::new(id).with_sprite(SpriteComponent::default()));
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.steps += 1;
            for event in input.iter() {
                self.seen.push(*event);
                if matches!(event, InputEvent::PointerDown { .. }) {
                    ctx.play(SoundRole::Click);
                }
            }
        }
    }

    impl Bootstrap for Recorder {
        type Content = Words;

        fn boot(settings: Settings, content: Words, _seed: u64) -> Self {
            Recorder { settings, words: content.list, inits: 0, seen: Vec::new(), steps: 0 }
        }
    }

    const MANIFEST: &str = r#"{"sounds": {"clickSound": {"path": "c.mp3", "event_id": 9}}}"#;
    const FRAME: f32 = 1.0 / 60.0;

    fn started() -> GameRunner<Recorder> {
        let mut runner = GameRunner::<Recorder>::from_documents(None, None, 1);
        runner.load_manifest(MANIFEST);
        runner.tick(FRAME);
        runner.push_input(InputEvent::KeyDown { key_code: keys::SPACE });
        runner.tick(FRAME);
        runner
    }

    fn scene_events(runner: &GameRunner<Recorder>) -> Vec<f32> {
        runner
            .context()
            .events
            .iter()
            .filter(|e| e.kind == GameEvent::SCENE)
            .map(|e| e.a)
            .collect()
    }

    #[test]
    fn missing_documents_use_defaults() {
        let runner = GameRunner::<Recorder>::from_documents(None, Some("{ bad".into()), 1);
        assert_eq!(runner.game().settings, Settings::default());
        assert!(runner.game().words.is_empty());
        assert_eq!(runner.stage(), Stage::Preload);
    }

    #[test]
    fn lifecycle_walks_preload_start_main() {
        let mut runner = GameRunner::<Recorder>::from_documents(
            None,
            Some(r#"{"list": ["cat"]}"#.into()),
            1,
        );
        assert_eq!(runner.game().words, vec!["cat".to_string()]);

        // Input before the manifest is ignored.
        runner.push_input(InputEvent::PointerDown { x: 1.0, y: 1.0 });
        runner.tick(FRAME);
        assert_eq!(runner.stage(), Stage::Preload);

        runner.load_manifest(MANIFEST);
        runner.tick(FRAME);
        assert_eq!(runner.stage(), Stage::Start);
        assert_eq!(scene_events(&runner), vec![1.0]);

        runner.push_input(InputEvent::PointerDown { x: 1.0, y: 1.0 });
        runner.tick(FRAME);
        assert_eq!(runner.stage(), Stage::Main);
        assert_eq!(scene_events(&runner), vec![2.0]);
        assert_eq!(runner.game().inits, 1);
        // The tap that started the game is not replayed into it.
        assert!(runner.game().seen.is_empty());
        assert_eq!(runner.instance_count(), 1);
    }

    #[test]
    fn background_music_starts_with_main() {
        let mut runner = GameRunner::<Recorder>::from_documents(None, None, 1);
        runner.load_manifest(r#"{"sounds": {"backgroundMusic": {"path": "bg.mp3", "event_id": 4}}}"#);
        runner.tick(FRAME);
        assert!(runner.context().events.iter().all(|e| e.kind != GameEvent::MUSIC));

        runner.push_input(InputEvent::KeyDown { key_code: keys::ENTER });
        runner.tick(FRAME);
        let music: Vec<GameEvent> =
            runner.context().events.iter().copied().filter(|e| e.kind == GameEvent::MUSIC).collect();
        assert_eq!(music.len(), 1);
        assert_eq!(music[0].a, 4.0);
        // Nothing is queued as a one-shot sound.
        assert!(runner.context().sounds.is_empty());

        runner.push_input(InputEvent::Visibility { visible: false });
        runner.tick(FRAME);
        let kinds: Vec<f32> = runner.context().events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![GameEvent::AUDIO_PAUSE]);
    }

    #[test]
    fn broken_manifest_still_starts() {
        let mut runner = GameRunner::<Recorder>::from_documents(None, None, 1);
        runner.load_manifest("not json");
        runner.tick(FRAME);
        runner.push_input(InputEvent::Custom { kind: custom::START, a: 0.0, b: 0.0, c: 0.0 });
        runner.tick(FRAME);
        assert_eq!(runner.stage(), Stage::Main);
    }

    #[test]
    fn main_input_reaches_game_once() {
        let mut runner = started();
        runner.push_input(InputEvent::PointerDown { x: 5.0, y: 5.0 });
        // Three steps this frame; input belongs to the first only.
        runner.tick(FRAME * 3.0 + 0.001);
        assert_eq!(runner.game().seen.len(), 1);
        assert_eq!(runner.sound_events_len(), 1);
        assert_eq!(runner.context().sounds, vec![SoundEvent(9)]);
    }

    #[test]
    fn input_waits_for_a_step() {
        let mut runner = started();
        runner.push_input(InputEvent::KeyDown { key_code: keys::LEFT });
        runner.tick(0.0);
        assert!(runner.game().seen.is_empty());
        runner.tick(FRAME);
        assert_eq!(runner.game().seen.len(), 1);
    }

    #[test]
    fn kernel_events_are_handled_by_runner() {
        let mut runner = started();
        runner.push_input(InputEvent::Custom { kind: custom::TOGGLE_SOUND, a: 0.0, b: 0.0, c: 0.0 });
        runner.push_input(InputEvent::Visibility { visible: false });
        runner.push_input(InputEvent::Resize { width: 800.0, height: 600.0 });
        runner.tick(FRAME);

        let kinds: Vec<f32> = runner.context().events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![GameEvent::SOUND_ENABLED, GameEvent::AUDIO_PAUSE]);
        assert!(!runner.context().audio.is_enabled());
        assert_eq!(runner.world_width(), 800.0);
        // Toggle is consumed; visibility and resize still reach the game.
        assert_eq!(runner.game().seen.len(), 2);
    }
}
