//! Bitmap font text.
//!
//! Each character becomes an Entity whose sprite points at a glyph cell in a
//! font atlas laid out in ASCII order (16 columns × 6 rows from space).
//! Atlases with more rows list their extra characters in the manifest's
//! `glyphs` field; those cells follow `~`.
//! Letter tiles, hints and wheel labels are all built this way.

use glam::Vec2;
use crate::api::types::EntityId;
use crate::assets::manifest::{AssetManifest, AtlasDescriptor};
use crate::components::entity::Entity;
use crate::components::sprite::{AtlasId, SpriteComponent};

/// Configuration for a bitmap font atlas.
#[derive(Debug, Clone, PartialEq)]
pub struct FontConfig {
    /// Which atlas contains the font glyphs.
    pub atlas: AtlasId,
    pub cols: u32,
    pub rows: u32,
    /// First ASCII code in the atlas (typically 32 = space).
    pub start_char: u8,
    /// Horizontal advance as a fraction of the character size.
    pub spacing: f32,
    /// Characters stored after the ASCII block, in cell order.
    pub extra: Vec<char>,
}

/// Last character of the ASCII block.
const LAST_ASCII: u32 = '~' as u32;

/// Drawn in place of characters the atlas has no cell for.
pub const PLACEHOLDER: char = '?';

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            atlas: AtlasId::FONT,
            cols: 16,
            rows: 6,
            start_char: 32,
            spacing: 0.55,
            extra: Vec::new(),
        }
    }
}

impl FontConfig {
    pub fn new(atlas: AtlasId) -> Self {
        Self {
            atlas,
            ..Default::default()
        }
    }

    /// Font using the grid and extra glyphs of a manifest atlas.
    pub fn from_atlas(atlas: AtlasId, desc: &AtlasDescriptor) -> Self {
        Self {
            atlas,
            cols: desc.cols,
            rows: desc.rows,
            extra: desc.glyphs.as_deref().map(|g| g.chars().collect()).unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Font for the atlas named `name`, if the manifest has one.
    pub fn from_manifest(manifest: &AssetManifest, name: &str) -> Option<Self> {
        let (index, desc) = manifest.atlas(name)?;
        Some(Self::from_atlas(AtlasId(index), desc))
    }
}

/// Grid coordinates (col, row) of `c` in the font atlas, or `None` if the
/// atlas has no glyph for it.
pub fn char_to_grid(c: char, font: &FontConfig) -> Option<(f32, f32)> {
    let code = c as u32;
    let start = font.start_char as u32;
    let index = if (start..=LAST_ASCII).contains(&code) {
        code - start
    } else {
        let pos = font.extra.iter().position(|&g| g == c)?;
        LAST_ASCII + 1 - start + pos as u32
    };
    if index >= font.cols * font.rows {
        return None;
    }
    Some(((index % font.cols) as f32, (index / font.cols) as f32))
}

/// Cell to draw for `c`. Characters missing from the atlas get the
/// placeholder cell; whitespace and control characters get none.
pub fn glyph_cell(c: char, font: &FontConfig) -> Option<(f32, f32)> {
    if c.is_whitespace() || c.is_control() {
        return None;
    }
    char_to_grid(c, font).or_else(|| {
        log::warn!("font atlas {} has no glyph for '{}', drawing '{}'", font.atlas.0, c, PLACEHOLDER);
        char_to_grid(PLACEHOLDER, font)
    })
}

/// Rendered width of `text` at glyph size `size`.
pub fn text_width(text: &str, size: f32, font: &FontConfig) -> f32 {
    text.chars().count() as f32 * size * font.spacing
}

/// Style for a line of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Glyph cell size in world units.
    pub size: f32,
    /// Baseline rotation in radians; glyphs are rotated with it.
    pub rotation: f32,
    /// 0xRRGGBB tint.
    pub tint: u32,
    pub depth: i32,
}

impl TextStyle {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            rotation: 0.0,
            tint: 0xFF_FFFF,
            depth: 0,
        }
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_tint(mut self, tint: u32) -> Self {
        self.tint = tint;
        self
    }

    pub fn with_depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }
}

/// Build glyph entities for `text`, centred on `center` along a baseline
/// rotated by `style.rotation`.
///
/// Whitespace is skipped but still advances the cursor so spacing stays
/// stable. Characters the atlas lacks are drawn as the placeholder.
pub fn build_text_entities<F>(
    text: &str,
    center: Vec2,
    style: TextStyle,
    font: &FontConfig,
    tag: &str,
    id_gen: &mut F,
) -> Vec<Entity>
where
    F: FnMut() -> EntityId,
{
    let advance = style.size * font.spacing;
    let count = text.chars().count();
    let dir = Vec2::from_angle(style.rotation);
    // Offset of the first glyph centre from the line centre.
    let start = -(count as f32 - 1.0) * advance * 0.5;

    text.chars()
        .enumerate()
        .filter_map(|(i, c)| {
            let (col, row) = glyph_cell(c, font)?;
            let pos = center + dir * (start + i as f32 * advance);
            Some(
                Entity::new(id_gen())
                    .with_tag(tag)
                    .with_pos(pos)
                    .with_rotation(style.rotation)
                    .with_scale(Vec2::splat(style.size))
                    .with_depth(style.depth)
                    .with_sprite(SpriteComponent::cell(font.atlas, col, row).with_tint(style.tint)),
            )
        })
        .collect()
}
