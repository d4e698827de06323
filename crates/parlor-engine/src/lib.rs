pub mod api;
pub mod assets;
pub mod audio;
pub mod bridge;
pub mod components;
pub mod config;
pub mod core;
pub mod extensions;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{Bootstrap, Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{custom, EntityId, SoundEvent, GameEvent};
pub use assets::manifest::AssetManifest;
pub use audio::{AudioManager, SoundHandle, SoundRole};
pub use bridge::protocol::ProtocolLayout;
pub use components::entity::Entity;
pub use components::sprite::{SpriteComponent, AtlasId};
pub use config::{ConfigError, ConfigService, ConfigSource, PrefetchedSource, Settings, TextAlign, Tone};
pub use core::lifecycle::{SceneFlow, Stage};
pub use core::scene::Scene;
pub use core::time::{FixedTimestep, TimerId, Timers};
pub use input::drag::{hit_test, DragState, Grab, HitBox};
pub use input::queue::{keys, InputEvent, InputQueue};
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use systems::rng::Rng;
pub use systems::text::{build_text_entities, glyph_cell, text_width, FontConfig, TextStyle};

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorState, VectorVertex, VectorColor};

// Extensions: decoupled optional systems
pub use extensions::{
    Easing, lerp, ease, ease_vec2,
    TweenState, Tween, TweenId, TweenTarget, TweenLoop,
};
