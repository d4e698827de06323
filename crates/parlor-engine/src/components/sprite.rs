/// Identifies which texture atlas a sprite belongs to.
/// Index into the AssetManifest's atlas list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AtlasId(pub u32);

impl AtlasId {
    /// Convention: atlas 0 holds game sprites, atlas 1 the bitmap font.
    pub const SPRITES: AtlasId = AtlasId(0);
    pub const FONT: AtlasId = AtlasId(1);
}

/// Sprite component: defines how an entity appears visually.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteComponent {
    /// Which atlas this sprite belongs to.
    pub atlas: AtlasId,
    /// Column in the atlas grid.
    pub col: f32,
    /// Row in the atlas grid.
    pub row: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Multiplicative tint as 0xRRGGBB. White leaves the texture unchanged.
    pub tint: u32,
}

impl SpriteComponent {
    pub fn cell(atlas: AtlasId, col: f32, row: f32) -> Self {
        Self {
            atlas,
            col,
            row,
            ..Self::default()
        }
    }

    pub fn with_tint(mut self, tint: u32) -> Self {
        self.tint = tint & 0x00FF_FFFF;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}

impl Default for SpriteComponent {
    fn default() -> Self {
        Self {
            atlas: AtlasId::SPRITES,
            col: 0.0,
            row: 0.0,
            alpha: 1.0,
            tint: 0xFF_FFFF,
        }
    }
}
