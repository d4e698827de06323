use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// A sound event emitted by the game logic.
/// The numeric value is the `event_id` of a sound in the asset manifest;
/// the host's sound player maps it back to a decoded clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

/// A game event passed from Rust to the host each frame.
/// `kind` identifies the event, `a/b/c` carry payload.
///
/// Kinds below [`GameEvent::ENGINE_KINDS`] belong to the game; kinds at or
/// above it are emitted by the kernel itself (scene changes, audio control).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// First event kind reserved for the kernel.
    pub const ENGINE_KINDS: f32 = 100.0;
    /// Scene lifecycle changed. `a` = new stage index (0 preload, 1 start, 2 main).
    pub const SCENE: f32 = 100.0;
    /// Host should pause every playing sound.
    pub const AUDIO_PAUSE: f32 = 101.0;
    /// Host should resume sounds paused by `AUDIO_PAUSE`.
    pub const AUDIO_RESUME: f32 = 102.0;
    /// Global sound toggle changed. `a` = 1.0 enabled, 0.0 muted.
    pub const SOUND_ENABLED: f32 = 103.0;
    /// Start the looping background track. `a` = sound event id, `b` = volume.
    /// It pauses and mutes with every other sound.
    pub const MUSIC: f32 = 104.0;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }

    /// Event carrying only a kind.
    pub fn signal(kind: f32) -> Self {
        Self { kind, ..Self::default() }
    }
}

/// Custom input kinds handled by the runner before the game sees them.
pub mod custom {
    /// Leave the start screen.
    pub const START: u32 = 100;
    /// Flip the global sound toggle.
    pub const TOGGLE_SOUND: u32 = 101;
}
