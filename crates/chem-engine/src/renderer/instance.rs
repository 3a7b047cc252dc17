use bytemuck::{Pod, Zeroable};

use crate::components::color::Rgb;

/// Label strings the host pre-renders, indexed by `DiscInstance::label`.
/// The last entry is the inert fallback for anything unrecognised.
pub const LABELS: [&str; 9] = ["C", "H", "O", "N", "Ni", "Cu", "CO₂", "H₂O", "?"];

/// Index of the fallback label.
pub const UNKNOWN_LABEL: usize = LABELS.len() - 1;

/// Map a species label to its index in [`LABELS`].
pub fn label_index(label: &str) -> usize {
    LABELS
        .iter()
        .position(|&l| l == label)
        .unwrap_or(UNKNOWN_LABEL)
}

/// Bond glyph colors are fixed regardless of the bonded species.
pub const BOND_GLYPH_COLOR: Rgb = Rgb::MINT;

/// Bond glyph codes carried in `LineInstance::glyph`.
pub mod glyph {
    pub const NONE: f32 = 0.0;
    /// Single bond dash.
    pub const SINGLE: f32 = 1.0;
    /// Double bond, drawn as `=`.
    pub const DOUBLE: f32 = 2.0;
}

/// One particle: a faint filled disc with a stronger outline and a text label.
/// 10 floats = 40 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DiscInstance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub fill_alpha: f32,
    pub stroke_alpha: f32,
    pub label_alpha: f32,
    /// Index into [`LABELS`].
    pub label: f32,
}

impl DiscInstance {
    pub const FLOATS: usize = 10;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// One explosion ring outline.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RingInstance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub alpha: f32,
    pub width: f32,
}

impl RingInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// One bond line with a two-stop color gradient and an optional midpoint glyph.
/// 16 floats = 64 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LineInstance {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub r0: f32,
    pub g0: f32,
    pub b0: f32,
    pub r1: f32,
    pub g1: f32,
    pub b1: f32,
    pub alpha: f32,
    pub width: f32,
    /// One of the [`glyph`] codes.
    pub glyph: f32,
    pub glyph_alpha: f32,
    pub _pad0: f32,
    pub _pad1: f32,
}

impl LineInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Everything the host needs to draw one frame.
///
/// Each list is capped at its configured capacity; extra items are dropped.
pub struct FrameBuffer {
    pub discs: Vec<DiscInstance>,
    pub rings: Vec<RingInstance>,
    pub lines: Vec<LineInstance>,
    max_discs: usize,
    max_rings: usize,
    max_lines: usize,
}

impl FrameBuffer {
    pub fn with_capacity(max_discs: usize, max_rings: usize, max_lines: usize) -> Self {
        Self {
            discs: Vec::with_capacity(max_discs),
            rings: Vec::with_capacity(max_rings),
            lines: Vec::with_capacity(max_lines),
            max_discs,
            max_rings,
            max_lines,
        }
    }

    pub fn clear(&mut self) {
        self.discs.clear();
        self.rings.clear();
        self.lines.clear();
    }

    pub fn push_disc(&mut self, disc: DiscInstance) {
        if self.discs.len() < self.max_discs {
            self.discs.push(disc);
        }
    }

    pub fn push_ring(&mut self, ring: RingInstance) {
        if self.rings.len() < self.max_rings {
            self.rings.push(ring);
        }
    }

    pub fn push_line(&mut self, line: LineInstance) {
        if self.lines.len() < self.max_lines {
            self.lines.push(line);
        }
    }

    pub fn disc_count(&self) -> u32 {
        self.discs.len() as u32
    }

    pub fn ring_count(&self) -> u32 {
        self.rings.len() as u32
    }

    pub fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    /// Raw pointers to instance data for host-side reads.
    pub fn discs_ptr(&self) -> *const f32 {
        self.discs.as_ptr() as *const f32
    }

    pub fn rings_ptr(&self) -> *const f32 {
        self.rings.as_ptr() as *const f32
    }

    pub fn lines_ptr(&self) -> *const f32 {
        self.lines.as_ptr() as *const f32
    }

    /// Disc data as a flat float slice.
    pub fn disc_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.discs)
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::with_capacity(512, 64, 2048)
    }
}
