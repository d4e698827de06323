//! Preload → Start → Main scene progression.
//!
//! The runner owns one [`SceneFlow`]. It only ever moves forward: the
//! manifest arriving ends Preload, the player's first interaction ends
//! Start, and Main lasts for the rest of the page's life.

/// The three stages a mini-game passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Waiting for the host to deliver the asset manifest.
    Preload,
    /// Assets ready; showing the start screen until the player interacts.
    Start,
    /// Game logic active.
    Main,
}

impl Stage {
    /// Numeric form sent to the host in `GameEvent::SCENE`.
    pub fn index(self) -> f32 {
        match self {
            Stage::Preload => 0.0,
            Stage::Start => 1.0,
            Stage::Main => 2.0,
        }
    }
}

/// Tracks the current stage and reports transitions.
#[derive(Debug)]
pub struct SceneFlow {
    stage: Stage,
}

impl SceneFlow {
    pub fn new() -> Self {
        Self { stage: Stage::Preload }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_main(&self) -> bool {
        self.stage == Stage::Main
    }

    /// Assets are loaded. Returns the new stage if this moved the flow.
    pub fn assets_ready(&mut self) -> Option<Stage> {
        self.advance_from(Stage::Preload, Stage::Start)
    }

    /// The player left the start screen. Returns the new stage if this moved the flow.
    pub fn start_requested(&mut self) -> Option<Stage> {
        self.advance_from(Stage::Start, Stage::Main)
    }

    fn advance_from(&mut self, from: Stage, to: Stage) -> Option<Stage> {
        if self.stage != from {
            return None;
        }
        log::info!("scene: {:?} -> {:?}", from, to);
        self.stage = to;
        Some(to)
    }
}

impl Default for SceneFlow {
    fn default() -> Self {
        Self::new()
    }
}
