use glam::Vec2;
use crate::api::types::ParticleId;
use crate::components::element::{ElementKind, Species};

/// A chemical particle drifting across the background.
///
/// Velocity is expressed in world units per simulation tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Unique identifier.
    pub id: ParticleId,
    /// Position in viewport space.
    pub pos: Vec2,
    /// Displacement applied each tick.
    pub vel: Vec2,
    /// Drawn radius.
    pub radius: f32,
    /// Element or synthesized molecule.
    pub species: Species,
    /// Colored when true, gray when false.
    pub active: bool,
}

impl Particle {
    pub const DEFAULT_RADIUS: f32 = 12.0;

    /// Create an inactive, motionless particle at the origin.
    pub fn new(id: ParticleId, species: impl Into<Species>) -> Self {
        Self {
            id,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: Self::DEFAULT_RADIUS,
            species: species.into(),
            active: false,
        }
    }

    // -- Builder pattern --

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_vel(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn element(&self) -> Option<ElementKind> {
        self.species.element()
    }

    pub fn is(&self, kind: ElementKind) -> bool {
        self.element() == Some(kind)
    }

    pub fn distance(&self, other: &Particle) -> f32 {
        self.pos.distance(other.pos)
    }

    pub fn distance_squared(&self, other: &Particle) -> f32 {
        self.pos.distance_squared(other.pos)
    }

    pub fn can_bond_with(&self, other: &Particle) -> bool {
        self.species.can_bond_with(&other.species)
    }

    /// Move one tick inside `bounds`, reflecting off the edges.
    /// Position always ends inside [0, bounds.x] x [0, bounds.y].
    pub fn advance(&mut self, bounds: Vec2) {
        self.pos += self.vel;

        if self.pos.x < 0.0 || self.pos.x > bounds.x {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < 0.0 || self.pos.y > bounds.y {
            self.vel.y = -self.vel.y;
        }

        self.pos = self.pos.clamp(Vec2::ZERO, bounds);
    }

    /// Move one tick without bounds and bleed off speed.
    pub fn drift(&mut self, damping: f32) {
        self.pos += self.vel;
        self.vel *= damping;
    }
}
