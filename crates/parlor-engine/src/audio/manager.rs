//! Sound roles and their bindings.
//!
//! Games ask for a role ("pickup", "correct"), never a file. The manager
//! binds every role to a sound from the asset manifest once, falling back
//! to a related role when an asset is missing, so `play` cannot fail.
//! Background music is the exception: it has no fallback and loops, so it
//! is started once with `start_music` rather than played.

use crate::api::types::{GameEvent, SoundEvent};
use crate::assets::manifest::AssetManifest;

/// What a sound means to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundRole {
    Click,
    Drop,
    Fail,
    Pickup,
    Success,
    Correct,
    Wrong,
    Spin,
    Result,
    Music,
}

const ROLES: usize = 10;

/// Volume of the background track.
pub const MUSIC_VOLUME: f32 = 0.7;

impl SoundRole {
    /// Binding order. Every role appears after the role it falls back to.
    pub const RESOLUTION_ORDER: [SoundRole; ROLES] = [
        SoundRole::Click,
        SoundRole::Drop,
        SoundRole::Pickup,
        SoundRole::Fail,
        SoundRole::Success,
        SoundRole::Spin,
        SoundRole::Correct,
        SoundRole::Wrong,
        SoundRole::Result,
        SoundRole::Music,
    ];

    /// Manifest key of the preferred asset.
    pub fn asset_key(self) -> &'static str {
        match self {
            SoundRole::Click => "clickSound",
            SoundRole::Drop => "dropSound",
            SoundRole::Fail | SoundRole::Wrong => "failSound",
            SoundRole::Pickup => "pickupSound",
            SoundRole::Success | SoundRole::Correct => "successSound",
            SoundRole::Spin => "spinSound",
            SoundRole::Result => "resultSound",
            SoundRole::Music => "backgroundMusic",
        }
    }

    /// Role whose binding is reused when this role's asset is missing.
    pub fn fallback(self) -> Option<SoundRole> {
        match self {
            // No music is better than looping a click.
            SoundRole::Click | SoundRole::Music => None,
            SoundRole::Correct | SoundRole::Result => Some(SoundRole::Success),
            SoundRole::Wrong => Some(SoundRole::Fail),
            SoundRole::Drop
            | SoundRole::Fail
            | SoundRole::Pickup
            | SoundRole::Success
            | SoundRole::Spin => Some(SoundRole::Click),
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// What a role resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SoundHandle {
    /// Nothing to play. Only reached when even "click" has no asset.
    #[default]
    Silent,
    Event(SoundEvent),
}

/// Role → sound bindings plus the global mute and page-visibility state.
#[derive(Debug, Clone)]
pub struct AudioManager {
    bindings: [SoundHandle; ROLES],
    enabled: bool,
    suspended: bool,
    music_started: bool,
}

impl AudioManager {
    /// A manager with every role silent.
    pub fn silent() -> Self {
        Self {
            bindings: [SoundHandle::Silent; ROLES],
            enabled: true,
            suspended: false,
            music_started: false,
        }
    }

    /// Bind every role from the manifest's `sounds` table.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let mut audio = Self::silent();
        for role in SoundRole::RESOLUTION_ORDER {
            let handle = match manifest.sound_event(role.asset_key()) {
                Some(id) => SoundHandle::Event(SoundEvent(id)),
                None => match role.fallback() {
                    Some(fallback) => {
                        log::debug!("{:?}: no {}, using {:?}", role, role.asset_key(), fallback);
                        audio.bindings[fallback.slot()]
                    }
                    None => {
                        log::warn!("{:?}: no {} in manifest, role is silent", role, role.asset_key());
                        SoundHandle::Silent
                    }
                },
            };
            audio.bindings[role.slot()] = handle;
        }
        audio
    }

    pub fn binding(&self, role: SoundRole) -> SoundHandle {
        self.bindings[role.slot()]
    }

    /// Queue the sound bound to `role`. Returns whether anything was queued.
    pub fn play(&self, role: SoundRole, sounds: &mut Vec<SoundEvent>) -> bool {
        if !self.enabled || self.suspended {
            return false;
        }
        if role == SoundRole::Music {
            log::debug!("music is started with start_music, not played");
            return false;
        }
        match self.binding(role) {
            SoundHandle::Event(event) => {
                sounds.push(event);
                true
            }
            SoundHandle::Silent => false,
        }
    }

    /// Ask the host to start the looping background track, once. Sent even
    /// while muted or hidden; the host applies mute and pause to it.
    pub fn start_music(&mut self, events: &mut Vec<GameEvent>) -> bool {
        if self.music_started {
            return false;
        }
        let SoundHandle::Event(event) = self.binding(SoundRole::Music) else {
            return false;
        };
        self.music_started = true;
        events.push(GameEvent::new(GameEvent::MUSIC, event.0 as f32, MUSIC_VOLUME, 0.0));
        true
    }

    pub fn is_music_started(&self) -> bool {
        self.music_started
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn set_enabled(&mut self, enabled: bool, events: &mut Vec<GameEvent>) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        log::info!("sound {}", if enabled { "on" } else { "off" });
        events.push(GameEvent::new(GameEvent::SOUND_ENABLED, enabled as u8 as f32, 0.0, 0.0));
    }

    /// Flip the global mute. Returns the new state.
    pub fn toggle(&mut self, events: &mut Vec<GameEvent>) -> bool {
        self.set_enabled(!self.enabled, events);
        self.enabled
    }

    /// Page hidden → suspend and ask the host to pause; shown → resume.
    pub fn set_visible(&mut self, visible: bool, events: &mut Vec<GameEvent>) {
        if self.suspended != visible {
            return;
        }
        self.suspended = !visible;
        let kind = if visible { GameEvent::AUDIO_RESUME } else { GameEvent::AUDIO_PAUSE };
        events.push(GameEvent::signal(kind));
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::silent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::manifest::{AssetManifest, SoundDescriptor};

    fn manifest(sounds: &[(&str, u32)]) -> AssetManifest {
        let mut m = AssetManifest::default();
        for (key, id) in sounds {
            m.sounds.insert(
                key.to_string(),
                SoundDescriptor { path: format!("{key}.mp3"), event_id: Some(*id) },
            );
        }
        m
    }

    #[test]
    fn every_role_present() {
        let audio = AudioManager::from_manifest(&manifest(&[
            ("clickSound", 1),
            ("dropSound", 2),
            ("failSound", 3),
            ("pickupSound", 4),
            ("successSound", 5),
            ("spinSound", 6),
            ("resultSound", 7),
        ]));
        assert_eq!(audio.binding(SoundRole::Drop), SoundHandle::Event(SoundEvent(2)));
        assert_eq!(audio.binding(SoundRole::Correct), SoundHandle::Event(SoundEvent(5)));
        assert_eq!(audio.binding(SoundRole::Wrong), SoundHandle::Event(SoundEvent(3)));
        assert_eq!(audio.binding(SoundRole::Result), SoundHandle::Event(SoundEvent(7)));
    }

    #[test]
    fn missing_assets_fall_back() {
        let audio = AudioManager::from_manifest(&manifest(&[("clickSound", 1), ("failSound", 3)]));
        let click = SoundHandle::Event(SoundEvent(1));
        assert_eq!(audio.binding(SoundRole::Drop), click);
        assert_eq!(audio.binding(SoundRole::Pickup), click);
        assert_eq!(audio.binding(SoundRole::Spin), click);
        // correct → success → click
        assert_eq!(audio.binding(SoundRole::Correct), click);
        assert_eq!(audio.binding(SoundRole::Result), click);
        assert_eq!(audio.binding(SoundRole::Wrong), SoundHandle::Event(SoundEvent(3)));
    }

    #[test]
    fn play_never_fails_without_assets() {
        let audio = AudioManager::from_manifest(&AssetManifest::default());
        let mut sounds = Vec::new();
        for role in SoundRole::RESOLUTION_ORDER {
            assert_eq!(audio.binding(role), SoundHandle::Silent);
            assert!(!audio.play(role, &mut sounds));
        }
        assert!(sounds.is_empty());
    }

    #[test]
    fn muted_and_hidden_queue_nothing() {
        let mut audio = AudioManager::from_manifest(&manifest(&[("clickSound", 1)]));
        let mut sounds = Vec::new();
        let mut events = Vec::new();

        assert!(audio.play(SoundRole::Click, &mut sounds));
        assert!(!audio.toggle(&mut events));
        assert!(!audio.play(SoundRole::Click, &mut sounds));
        assert_eq!(events, vec![GameEvent::new(GameEvent::SOUND_ENABLED, 0.0, 0.0, 0.0)]);
        audio.toggle(&mut events);
        // Bindings survive the toggle.
        assert_eq!(audio.binding(SoundRole::Click), SoundHandle::Event(SoundEvent(1)));

        audio.set_visible(false, &mut events);
        assert!(audio.is_suspended());
        assert!(!audio.play(SoundRole::Click, &mut sounds));
        audio.set_visible(true, &mut events);
        assert!(audio.play(SoundRole::Click, &mut sounds));
        assert_eq!(sounds, vec![SoundEvent(1), SoundEvent(1)]);
    }

    #[test]
    fn music_never_falls_back() {
        let mut audio = AudioManager::from_manifest(&manifest(&[("clickSound", 1)]));
        assert_eq!(audio.binding(SoundRole::Music), SoundHandle::Silent);
        let mut events = Vec::new();
        assert!(!audio.start_music(&mut events));
        assert!(events.is_empty());
    }

    #[test]
    fn music_starts_once_and_is_not_a_one_shot() {
        let mut audio = AudioManager::from_manifest(&manifest(&[("clickSound", 1), ("backgroundMusic", 8)]));
        let mut sounds = Vec::new();
        let mut events = Vec::new();
        assert!(!audio.play(SoundRole::Music, &mut sounds));
        assert!(sounds.is_empty());

        assert!(audio.start_music(&mut events));
        assert!(!audio.start_music(&mut events));
        assert_eq!(events, vec![GameEvent::new(GameEvent::MUSIC, 8.0, MUSIC_VOLUME, 0.0)]);
        assert!(audio.is_music_started());
    }

    #[test]
    fn music_pauses_with_everything_else() {
        let mut audio = AudioManager::from_manifest(&manifest(&[("backgroundMusic", 8)]));
        let mut events = Vec::new();
        audio.toggle(&mut events);
        // Requested while muted; the host starts it silent.
        assert!(audio.start_music(&mut events));
        audio.set_visible(false, &mut events);
        let kinds: Vec<f32> = events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![GameEvent::SOUND_ENABLED, GameEvent::MUSIC, GameEvent::AUDIO_PAUSE]);
    }

    #[test]
    fn visibility_events_only_on_change() {
        let mut audio = AudioManager::silent();
        let mut events = Vec::new();
        audio.set_visible(true, &mut events);
        assert!(events.is_empty());
        audio.set_visible(false, &mut events);
        audio.set_visible(false, &mut events);
        audio.set_visible(true, &mut events);
        let kinds: Vec<f32> = events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![GameEvent::AUDIO_PAUSE, GameEvent::AUDIO_RESUME]);
    }
}
