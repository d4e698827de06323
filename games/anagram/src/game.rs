//! Anagram - drag shuffled letter tiles into slots to spell the word.
//! Zones and tile backgrounds are vector rectangles; letters, the hint and
//! the page indicator are glyph entities. Score, timer and the finish
//! dialog are drawn by the host from game events.

use glam::Vec2;
use parlor_engine::api::game::RenderContext;
use parlor_engine::api::types::EntityId;
use parlor_engine::components::entity::Entity;
use parlor_engine::components::sprite::SpriteComponent;
use parlor_engine::core::time::TimerId;
use parlor_engine::input::queue::{keys, InputEvent, InputQueue};
use parlor_engine::systems::text::{build_text_entities, glyph_cell, FontConfig, TextStyle};
use parlor_engine::{Bootstrap, DragState, EngineContext, Game, GameConfig, GameEvent, HitBox, Rng, Settings, SoundRole};
use parlor_engine::{Easing, Tween, TweenLoop, VectorColor};

use crate::board::{Board, DropOutcome, Verdict, TILE_SIZE};
use crate::content::{WordEntry, WordListDoc};
use crate::session::{Advance, Session, SessionTimer};

const TILE_TAG: &str = "tile";
const HINT_TAG: &str = "hint";
const PAGE_TAG: &str = "page";
const NAV_TAG: &str = "nav";

const LETTER_SIZE: f32 = 32.0;
const HINT_SIZE: f32 = 24.0;
const PAGE_SIZE: f32 = 24.0;
const NAV_SIZE: f32 = 32.0;
const HINT_Y: f32 = 80.0;
/// Page indicator distance from the bottom edge.
const PAGE_MARGIN: f32 = 50.0;
/// Prev/next arrows sit this far either side of the page indicator.
const NAV_OFFSET: f32 = 50.0;
const TILE_DEPTH: i32 = 10;

/// Delay before moving on after a correct word.
const ADVANCE_DELAY_MS: u32 = 1000;
/// Timer tag for the pending advance.
const ADVANCE: u32 = 1;

const SHAKE_OFFSET: f32 = 10.0;
const SHAKE_LEG: f32 = 0.05;
const SHAKE_REPEATS: u32 = 5;

/// Custom event kinds from the host UI
mod events {
    pub const NEXT: u32 = 1;
    pub const PREV: u32 = 2;
    /// Play again from the finish dialog.
    pub const RESET: u32 = 3;
}

/// Game event kinds to the host
pub mod game_events {
    /// a = score
    pub const SCORE: f32 = 1.0;
    /// a = page (1-based), b = page count
    pub const PAGE: f32 = 2.0;
    /// a = seconds shown, b = 1.0 when counting down
    pub const TIMER: f32 = 3.0;
    /// a = score, b = word count, c = seconds played
    pub const FINISHED: f32 = 4.0;
    /// a = 1.0 correct, 0.0 wrong
    pub const VERDICT: f32 = 5.0;
}

pub struct AnagramGame {
    settings: Settings,
    session: Session,
    clock: SessionTimer,
    board: Board,
    /// Glyph entity of each tile, by tile index.
    tile_ids: Vec<EntityId>,
    /// Tile positions as last drawn, including shake offsets.
    tile_view: Vec<Vec2>,
    rng: Rng,
    font: FontConfig,
    drag: DragState,
    advance: Option<TimerId>,
    shown_secs: Option<u32>,
    viewport: Vec2,
    dt: f32,
}

impl Bootstrap for AnagramGame {
    type Content = WordListDoc;

    fn boot(settings: Settings, content: WordListDoc, seed: u64) -> Self {
        let mut rng = Rng::new(seed);
        let mut words = content.words();
        if settings.shuffle_questions {
            rng.shuffle(&mut words);
        }
        let clock = SessionTimer::new(settings.time_limit);
        let viewport = Vec2::new(1920.0, 1080.0);
        let board = Board::new(&words[0].word, &mut rng, viewport.x);
        let dt = GameConfig::default().fixed_dt;
        Self {
            settings,
            session: Session::new(words),
            clock,
            board,
            tile_ids: Vec::new(),
            tile_view: Vec::new(),
            rng,
            font: FontConfig::default(),
            drag: DragState::new(),
            advance: None,
            shown_secs: None,
            viewport,
            dt,
        }
    }
}

impl AnagramGame {
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn advance_pending(&self) -> bool {
        self.advance.is_some()
    }

    fn nav_boxes(&self) -> (HitBox, HitBox) {
        let y = self.viewport.y - PAGE_MARGIN;
        let cx = self.viewport.x * 0.5;
        let size = Vec2::splat(NAV_SIZE * 1.5);
        (
            HitBox::new(Vec2::new(cx - NAV_OFFSET, y), size),
            HitBox::new(Vec2::new(cx + NAV_OFFSET, y), size),
        )
    }

    // -- Word lifecycle --

    fn load_word(&mut self, ctx: &mut EngineContext) {
        ctx.despawn_tagged(TILE_TAG);
        self.drag.end();
        self.tile_ids.clear();

        let Some(entry) = self.session.current().cloned() else {
            return;
        };
        self.board = Board::new(&entry.word, &mut self.rng, self.viewport.x);

        let tint = self.settings.answers_text_color.rgb24();
        for tile in self.board.tiles() {
            let id = ctx.next_id();
            let mut entity = Entity::new(id)
                .with_tag(TILE_TAG)
                .with_pos(tile.pos)
                .with_scale(Vec2::splat(LETTER_SIZE))
                .with_depth(TILE_DEPTH);
            if let Some((col, row)) = glyph_cell(tile.letter, &self.font) {
                entity = entity.with_sprite(SpriteComponent::cell(self.font.atlas, col, row).with_tint(tint));
            }
            ctx.scene.spawn(entity);
            self.tile_ids.push(id);
        }
        self.tile_view = self.board.tiles().iter().map(|t| t.pos).collect();

        self.show_labels(ctx, &entry);
        ctx.emit_event(GameEvent::new(
            game_events::PAGE,
            (self.session.index() + 1) as f32,
            self.session.len() as f32,
            0.0,
        ));
    }

    fn show_labels(&self, ctx: &mut EngineContext, entry: &WordEntry) {
        let tint = self.settings.questions_text_color.rgb24();
        let cx = self.viewport.x * 0.5;
        let bottom = self.viewport.y - PAGE_MARGIN;
        let page = format!("{}/{}", self.session.index() + 1, self.session.len());
        let (prev, next) = self.nav_boxes();

        let lines = [
            (HINT_TAG, entry.hint.as_deref().unwrap_or(""), Vec2::new(cx, HINT_Y), HINT_SIZE),
            (PAGE_TAG, page.as_str(), Vec2::new(cx, bottom), PAGE_SIZE),
            (NAV_TAG, "<", prev.center, NAV_SIZE),
            (NAV_TAG, ">", next.center, NAV_SIZE),
        ];
        ctx.despawn_tagged(HINT_TAG);
        ctx.despawn_tagged(PAGE_TAG);
        ctx.despawn_tagged(NAV_TAG);
        for (tag, text, center, size) in lines {
            let style = TextStyle::new(size).with_tint(tint).with_depth(TILE_DEPTH);
            let glyphs = build_text_entities(text, center, style, &self.font, tag, &mut || ctx.next_id());
            for glyph in glyphs {
                ctx.scene.spawn(glyph);
            }
        }
    }

    /// Push board positions into the tile entities.
    fn sync_tiles(&self, ctx: &mut EngineContext) {
        for (tile, id) in self.board.tiles().iter().zip(&self.tile_ids) {
            if let Some(e) = ctx.scene.get_mut(*id) {
                e.pos = tile.pos;
            }
        }
    }

    fn relayout(&mut self, ctx: &mut EngineContext, viewport: Vec2) {
        self.viewport = viewport;
        self.board.layout(viewport.x, self.drag.held());
        for id in &self.tile_ids {
            ctx.tweens.remove_entity(*id);
        }
        self.sync_tiles(ctx);
        if let Some(entry) = self.session.current().cloned() {
            self.show_labels(ctx, &entry);
        }
    }

    // -- Dragging --

    fn can_drag(&self) -> bool {
        !self.session.is_finished() && self.advance.is_none()
    }

    fn pointer_down(&mut self, ctx: &mut EngineContext, p: Vec2) {
        if self.session.is_finished() {
            return;
        }
        let (prev, next) = self.nav_boxes();
        if prev.contains(p) {
            self.go_prev(ctx);
            return;
        }
        if next.contains(p) {
            self.go_next(ctx, true);
            return;
        }
        if !self.can_drag() {
            return;
        }
        let Some(index) = self.board.tile_at(p) else {
            return;
        };
        let id = self.tile_ids[index];
        if !self.drag.begin(index, p, self.board.tiles()[index].pos) {
            return;
        }
        self.board.begin_drag(index);
        ctx.tweens.remove_entity(id);
        if let Some(e) = ctx.scene.get_mut(id) {
            e.pos = self.board.tiles()[index].pos;
        }
        ctx.scene.bring_to_top(id);
        ctx.play(SoundRole::Pickup);
    }

    fn pointer_move(&mut self, ctx: &mut EngineContext, p: Vec2) {
        let Some((index, pos)) = self.drag.follow(p) else {
            return;
        };
        self.board.move_tile(index, pos);
        if let Some(e) = ctx.scene.get_mut(self.tile_ids[index]) {
            e.pos = pos;
        }
    }

    fn pointer_up(&mut self, ctx: &mut EngineContext, p: Vec2) {
        let Some(grab) = self.drag.end() else {
            return;
        };
        let index = grab.index;
        if let Some(zone) = self.board.zone_at(p) {
            if self.board.drop_on(index, zone) == DropOutcome::Placed {
                ctx.play(SoundRole::Drop);
            }
        }
        self.board.end_drag(index);
        if let Some(e) = ctx.scene.get_mut(self.tile_ids[index]) {
            e.pos = self.board.tiles()[index].pos;
        }
        self.check_word(ctx);
    }

    fn check_word(&mut self, ctx: &mut EngineContext) {
        match self.board.check() {
            Some(Verdict::Correct) => {
                let score = self.session.add_point();
                log::info!("'{}' solved, score {}", self.board.word(), score);
                ctx.play(SoundRole::Correct);
                ctx.emit_event(GameEvent::new(game_events::SCORE, score as f32, 0.0, 0.0));
                ctx.emit_event(GameEvent::new(game_events::VERDICT, 1.0, 0.0, 0.0));
                if self.advance.is_none() {
                    self.advance = Some(ctx.timers.after_ms(ADVANCE_DELAY_MS, ADVANCE));
                }
            }
            Some(Verdict::Wrong) => {
                ctx.play(SoundRole::Wrong);
                ctx.emit_event(GameEvent::new(game_events::VERDICT, 0.0, 0.0, 0.0));
                self.shake(ctx);
            }
            None => {}
        }
    }

    fn shake(&self, ctx: &mut EngineContext) {
        for index in self.board.placed_tiles() {
            let id = self.tile_ids[index];
            let x = self.board.tiles()[index].pos.x;
            ctx.tweens.remove_entity(id);
            ctx.tweens.add(
                id,
                Tween::position_x(x, x + SHAKE_OFFSET, SHAKE_LEG, Easing::Linear)
                    .with_loop(TweenLoop::Yoyo { repeats: SHAKE_REPEATS }),
            );
        }
    }

    // -- Navigation --

    fn cancel_advance(&mut self, ctx: &mut EngineContext) {
        if let Some(id) = self.advance.take() {
            ctx.timers.cancel(id);
        }
    }

    fn go_next(&mut self, ctx: &mut EngineContext, click: bool) {
        if self.session.is_finished() {
            return;
        }
        self.cancel_advance(ctx);
        if click {
            ctx.play(SoundRole::Click);
        }
        match self.session.next() {
            Advance::Moved(_) => self.load_word(ctx),
            Advance::Finished => self.finish(ctx),
        }
    }

    fn go_prev(&mut self, ctx: &mut EngineContext) {
        if self.session.is_finished() || !self.session.prev() {
            return;
        }
        self.cancel_advance(ctx);
        ctx.play(SoundRole::Click);
        self.load_word(ctx);
    }

    fn finish(&mut self, ctx: &mut EngineContext) {
        self.session.finish();
        self.clock.pause();
        self.cancel_advance(ctx);
        if let Some(grab) = self.drag.end() {
            self.board.end_drag(grab.index);
            self.sync_tiles(ctx);
        }
        log::info!(
            "session finished: {}/{} in {}s",
            self.session.score(),
            self.session.len(),
            self.clock.elapsed_secs()
        );
        ctx.emit_event(GameEvent::new(
            game_events::FINISHED,
            self.session.score() as f32,
            self.session.len() as f32,
            self.clock.elapsed_secs() as f32,
        ));
    }

    fn reset(&mut self, ctx: &mut EngineContext) {
        ctx.play(SoundRole::Click);
        self.cancel_advance(ctx);
        self.session.reset();
        self.clock.reset();
        self.shown_secs = None;
        self.load_word(ctx);
        ctx.emit_event(GameEvent::new(game_events::SCORE, 0.0, 0.0, 0.0));
    }

    fn tick_clock(&mut self, ctx: &mut EngineContext) {
        if !self.session.is_finished() && self.clock.tick(self.dt) {
            self.finish(ctx);
        }
        let secs = self.clock.display_secs();
        if self.shown_secs != Some(secs) {
            self.shown_secs = Some(secs);
            let countdown = if self.clock.is_countdown() { 1.0 } else { 0.0 };
            ctx.emit_event(GameEvent::new(game_events::TIMER, secs as f32, countdown, 0.0));
        }
    }
}

impl Game for AnagramGame {
    fn init(&mut self, ctx: &mut EngineContext) {
        match FontConfig::from_manifest(&ctx.manifest, &self.settings.font) {
            Some(font) => self.font = font,
            None => log::warn!("no font atlas named '{}', using the default font", self.settings.font),
        }
        self.viewport = ctx.viewport;
        self.load_word(ctx);
        ctx.emit_event(GameEvent::new(game_events::SCORE, 0.0, 0.0, 0.0));
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::PointerDown { x, y } => self.pointer_down(ctx, Vec2::new(x, y)),
                InputEvent::PointerMove { x, y } => self.pointer_move(ctx, Vec2::new(x, y)),
                InputEvent::PointerUp { x, y } => self.pointer_up(ctx, Vec2::new(x, y)),
                InputEvent::KeyDown { key_code } if key_code == keys::RIGHT => self.go_next(ctx, true),
                InputEvent::KeyDown { key_code } if key_code == keys::LEFT => self.go_prev(ctx),
                InputEvent::Custom { kind, .. } => match kind {
                    events::NEXT => self.go_next(ctx, true),
                    events::PREV => self.go_prev(ctx),
                    events::RESET => self.reset(ctx),
                    _ => {}
                },
                InputEvent::Resize { width, height } => self.relayout(ctx, Vec2::new(width, height)),
                _ => {}
            }
        }

        if self.advance.is_some() && ctx.fired_timers().contains(&ADVANCE) {
            self.advance = None;
            self.go_next(ctx, false);
        }

        self.tick_clock(ctx);

        self.tile_view.clear();
        for id in &self.tile_ids {
            let pos = ctx.scene.get(*id).map_or(Vec2::ZERO, |e| e.pos);
            self.tile_view.push(pos);
        }
    }

    fn render(&self, ctx: &mut RenderContext) {
        let size = Vec2::splat(TILE_SIZE);
        for zone in self.board.zones() {
            ctx.vectors.fill_rect(zone.center, size, VectorColor::WHITE.with_alpha(0.3));
            ctx.vectors.stroke_rect(zone.center, size, 2.0, VectorColor::BLACK);
        }

        let held = self.drag.held();
        let order = (0..self.tile_view.len()).filter(|i| Some(*i) != held).chain(held);
        for i in order {
            ctx.vectors.fill_rect(self.tile_view[i], size, VectorColor::SLATE);
        }
    }
}
