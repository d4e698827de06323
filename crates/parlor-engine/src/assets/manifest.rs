use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Asset manifest describing the atlases and sounds of a game.
/// The host loads the files; Rust only needs names, grid sizes and sound ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// List of texture atlases. Index = `AtlasId`.
    #[serde(default)]
    pub atlases: Vec<AtlasDescriptor>,
    /// Audio assets keyed by role key (e.g. "clickSound").
    #[serde(default)]
    pub sounds: HashMap<String, SoundDescriptor>,
}

/// Describes a single texture atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasDescriptor {
    /// Human-readable name (e.g., "Arial" for a font atlas).
    pub name: String,
    /// Number of columns in the atlas grid.
    pub cols: u32,
    /// Number of rows in the atlas grid.
    pub rows: u32,
    /// Relative path to the PNG file.
    pub path: String,
    /// Font atlases only: characters drawn after the printable ASCII block,
    /// in cell order (e.g. "ÇĞİÖŞÜçğıöşü").
    #[serde(default)]
    pub glyphs: Option<String>,
}

/// Describes an audio asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundDescriptor {
    /// Relative path to the audio file.
    pub path: String,
    /// Numeric event ID that triggers this sound from Rust.
    #[serde(default)]
    pub event_id: Option<u32>,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse a manifest, logging and falling back to an empty one on error.
    pub fn from_json_or_empty(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|e| {
            log::error!("asset manifest parse failed, continuing without assets: {}", e);
            Self::default()
        })
    }

    /// Index of the atlas named `name` (case-insensitive).
    pub fn atlas_index(&self, name: &str) -> Option<u32> {
        self.atlases
            .iter()
            .position(|a| a.name.eq_ignore_ascii_case(name))
            .map(|i| i as u32)
    }

    /// Atlas named `name` with its index.
    pub fn atlas(&self, name: &str) -> Option<(u32, &AtlasDescriptor)> {
        let index = self.atlas_index(name)?;
        Some((index, &self.atlases[index as usize]))
    }

    /// Event id bound to the sound stored under `key`, if it has one.
    pub fn sound_event(&self, key: &str) -> Option<u32> {
        self.sounds.get(key).and_then(|s| s.event_id)
    }
}
