//! Lyon-based vector shapes.
//!
//! Wheel wedges, drop-zone outlines and tile backgrounds are tessellated on
//! the CPU into a flat triangle list the host uploads as-is.
//!
//! ```ignore
//! ctx.vectors.fill_sector(center, radius, start, end, VectorColor::from_hex("#1e88e5").unwrap());
//! ctx.vectors.stroke_circle(center, radius, 4.0, VectorColor::WHITE);
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

/// Per-vertex data: position + RGBA. 6 floats = 24 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    pub const FLOATS: usize = 6;
}

/// RGBA color for vector drawing operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque color from a packed 0xRRGGBB value.
    pub fn from_rgb24(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xFF) as f32 / 255.0,
            ((rgb >> 8) & 0xFF) as f32 / 255.0,
            (rgb & 0xFF) as f32 / 255.0,
        )
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        parse_rgb24(hex).map(Self::from_rgb24)
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const GRAY: Self = Self::rgb(0.5, 0.5, 0.5);
    /// 0x333333, the wheel hub.
    pub const CHARCOAL: Self = Self::rgb(0.2, 0.2, 0.2);
    /// 0x555555, letter tile background.
    pub const SLATE: Self = Self::rgb(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0);
}

impl Default for VectorColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Parse a `#rrggbb` string into 0xRRGGBB.
pub fn parse_rgb24(hex: &str) -> Option<u32> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

struct FillVertexCtor {
    color: VectorColor,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        let p = vertex.position();
        let c = self.color;
        VectorVertex { x: p.x, y: p.y, r: c.r, g: c.g, b: c.b, a: c.a }
    }
}

struct StrokeVertexCtor {
    color: VectorColor,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        let p = vertex.position();
        let c = self.color;
        VectorVertex { x: p.x, y: p.y, r: c.r, g: c.g, b: c.b, a: c.a }
    }
}

/// Tessellators plus the per-frame output buffer.
/// Cleared at the start of every frame and refilled by the game.
pub struct VectorState {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
}

impl VectorState {
    /// Arc segments per full turn when approximating sectors.
    const ARC_STEPS: f32 = 96.0;

    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(8192 * VectorVertex::FLOATS),
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    /// Raw pointer to the flat float buffer for host reads.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    fn polygon_path(points: &[Vec2], closed: bool) -> Path {
        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(closed);
        builder.build()
    }

    /// Fill a closed polygon (convex or concave).
    pub fn fill_polygon(&mut self, points: &[Vec2], color: VectorColor) {
        if points.len() < 3 {
            return;
        }
        let path = Self::polygon_path(points, true);
        self.fill_path(&path, color);
    }

    /// Fill an axis-aligned rectangle centred on `center`.
    pub fn fill_rect(&mut self, center: Vec2, size: Vec2, color: VectorColor) {
        self.fill_polygon(&rect_corners(center, size), color);
    }

    /// Outline an axis-aligned rectangle centred on `center`.
    pub fn stroke_rect(&mut self, center: Vec2, size: Vec2, line_width: f32, color: VectorColor) {
        let corners = rect_corners(center, size);
        let path = Self::polygon_path(&corners, true);
        self.stroke_path(&path, line_width, color);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: VectorColor) {
        if radius <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, lyon::path::Winding::Positive);
        self.fill_path(&builder.build(), color);
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: VectorColor) {
        if radius <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, lyon::path::Winding::Positive);
        self.stroke_path(&builder.build(), width, color);
    }

    /// Fill a pie slice from angle `start` to `end` (radians, clockwise in
    /// a y-down world).
    pub fn fill_sector(&mut self, center: Vec2, radius: f32, start: f32, end: f32, color: VectorColor) {
        if radius <= 0.0 || end <= start {
            return;
        }
        let steps = (((end - start) / std::f32::consts::TAU) * Self::ARC_STEPS).ceil().max(2.0) as usize;
        let mut points = Vec::with_capacity(steps + 2);
        points.push(center);
        for i in 0..=steps {
            let a = start + (end - start) * i as f32 / steps as f32;
            points.push(center + Vec2::from_angle(a) * radius);
        }
        self.fill_polygon(&points, color);
    }

    /// Stroke an open polyline.
    pub fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: VectorColor) {
        if points.len() < 2 {
            return;
        }
        let path = Self::polygon_path(points, false);
        self.stroke_path(&path, width, color);
    }

    pub fn fill_path(&mut self, path: &Path, color: VectorColor) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );
        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => log::warn!("fill tessellation failed: {:?}", e),
        }
    }

    pub fn stroke_path(&mut self, path: &Path, width: f32, color: VectorColor) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(0.5).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );
        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => log::warn!("stroke tessellation failed: {:?}", e),
        }
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}

fn rect_corners(center: Vec2, size: Vec2) -> [Vec2; 4] {
    let h = size * 0.5;
    [
        center + Vec2::new(-h.x, -h.y),
        center + Vec2::new(h.x, -h.y),
        center + Vec2::new(h.x, h.y),
        center + Vec2::new(-h.x, h.y),
    ]
}
