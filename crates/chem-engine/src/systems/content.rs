use glam::Vec2;

/// An axis-aligned rectangle in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Snapshot of the page's readable-content rectangles, pushed by the host.
/// Particles over these areas are drawn dimmer.
#[derive(Debug, Clone, Default)]
pub struct ContentAreas {
    rects: Vec<Rect>,
}

impl ContentAreas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a flat `[x, y, width, height]*` array. A trailing partial
    /// record is ignored.
    pub fn from_flat(flat: &[f32]) -> Self {
        let rects = flat
            .chunks_exact(4)
            .map(|c| Rect::new(c[0], c[1], c[2], c[3]))
            .collect();
        Self { rects }
    }

    pub fn replace(&mut self, other: ContentAreas) {
        *self = other;
    }

    pub fn covers(&self, point: Vec2) -> bool {
        self.rects.iter().any(|r| r.contains(point))
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}
