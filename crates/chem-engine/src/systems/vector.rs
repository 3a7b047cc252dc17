//! Lyon-based tessellation of a built frame.
//!
//! Turns the disc, ring and bond-line instances into a flat colored
//! triangle list, for hosts that draw through a GPU pipeline instead of a
//! 2D canvas. Labels and bond glyphs are text and stay with the host.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use crate::renderer::instance::{FrameBuffer, LineInstance};
use crate::systems::render::DISC_STROKE_WIDTH;

/// Per-vertex data for vector rendering.
/// 6 floats = 24 bytes per vertex.
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
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24
}

/// RGBA color (0.0 - 1.0).
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

    pub const fn from_rgb(rgb: [f32; 3], a: f32) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], a)
    }

    fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

fn vertex(pos: lyon::math::Point, color: VectorColor) -> VectorVertex {
    VectorVertex {
        x: pos.x,
        y: pos.y,
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

/// Vertex constructor for lyon fill tessellation.
struct FillVertexCtor {
    color: VectorColor,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, v: FillVertex) -> VectorVertex {
        vertex(v.position(), self.color)
    }
}

/// Vertex constructor for lyon stroke tessellation.
struct StrokeVertexCtor {
    color: VectorColor,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, v: StrokeVertex) -> VectorVertex {
        vertex(v.position(), self.color)
    }
}

/// Stroke constructor that blends between two colors along the path.
struct GradientStrokeCtor {
    from: VectorColor,
    to: VectorColor,
    length: f32,
}

impl StrokeVertexConstructor<VectorVertex> for GradientStrokeCtor {
    fn new_vertex(&mut self, v: StrokeVertex) -> VectorVertex {
        let t = if self.length > 0.0 {
            v.advancement() / self.length
        } else {
            0.0
        };
        vertex(v.position(), self.from.lerp(self.to, t))
    }
}

/// Holds lyon tessellators and the output vertex buffer.
/// Cleared and refilled once per frame.
pub struct VectorState {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
}

impl VectorState {
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(16384 * VectorVertex::FLOATS),
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Number of vertices currently in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    /// Raw pointer to the flat float buffer.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    /// Flush indexed geometry to the flat buffer as triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    fn circle_path(center: Vec2, radius: f32) -> Path {
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, lyon::path::Winding::Positive);
        builder.build()
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: VectorColor) {
        if radius <= 0.0 || color.a <= 0.0 {
            return;
        }
        let path = Self::circle_path(center, radius);
        let result = self.fill_tess.tessellate_path(
            &path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );
        if result.is_ok() {
            self.flush_geometry();
        } else {
            log::warn!("fill tessellation failed at ({}, {})", center.x, center.y);
        }
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: VectorColor) {
        if radius <= 0.0 || color.a <= 0.0 {
            return;
        }
        let path = Self::circle_path(center, radius);
        let result = self.stroke_tess.tessellate_path(
            &path,
            &StrokeOptions::tolerance(0.5).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );
        if result.is_ok() {
            self.flush_geometry();
        } else {
            log::warn!("stroke tessellation failed at ({}, {})", center.x, center.y);
        }
    }

    /// Stroke a straight segment whose color runs from `from` to `to`.
    pub fn stroke_gradient_line(
        &mut self,
        a: Vec2,
        b: Vec2,
        width: f32,
        from: VectorColor,
        to: VectorColor,
    ) {
        let length = a.distance(b);
        if length <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.begin(point(a.x, a.y));
        builder.line_to(point(b.x, b.y));
        builder.end(false);
        let path = builder.build();

        let result = self.stroke_tess.tessellate_path(
            &path,
            &StrokeOptions::tolerance(0.5).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, GradientStrokeCtor { from, to, length }),
        );
        if result.is_ok() {
            self.flush_geometry();
        }
    }

    /// Tessellate a whole frame, in the frame's draw order.
    pub fn tessellate_frame(&mut self, frame: &FrameBuffer) {
        self.clear();

        for ring in &frame.rings {
            let color = VectorColor::new(ring.r, ring.g, ring.b, ring.alpha);
            self.stroke_circle(Vec2::new(ring.x, ring.y), ring.radius, ring.width, color);
        }

        for disc in &frame.discs {
            let center = Vec2::new(disc.x, disc.y);
            let rgb = [disc.r, disc.g, disc.b];
            self.fill_circle(center, disc.radius, VectorColor::from_rgb(rgb, disc.fill_alpha));
            self.stroke_circle(
                center,
                disc.radius,
                DISC_STROKE_WIDTH,
                VectorColor::from_rgb(rgb, disc.stroke_alpha),
            );
        }

        for line in &frame.lines {
            self.line(line);
        }
    }

    fn line(&mut self, line: &LineInstance) {
        self.stroke_gradient_line(
            Vec2::new(line.x0, line.y0),
            Vec2::new(line.x1, line.y1),
            line.width,
            VectorColor::new(line.r0, line.g0, line.b0, line.alpha),
            VectorColor::new(line.r1, line.g1, line.b1, line.alpha),
        );
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}
