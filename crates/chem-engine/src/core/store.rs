use crate::api::types::ParticleId;
use crate::components::particle::Particle;

/// Ordered particle storage using a flat Vec.
/// Designed for the small counts a page background needs (dozens, not thousands).
///
/// Order is significant: hit-testing and reaction scans pick the first match.
pub struct ParticleStore {
    particles: Vec<Particle>,
    next_id: u32,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Create a store with a specific particle capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            next_id: 1,
        }
    }

    /// Reserve the next unique particle ID.
    /// IDs handed out here stay unique even if the particle joins the store later.
    pub fn next_id(&mut self) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a particle to the end of the store.
    pub fn spawn(&mut self, particle: Particle) -> ParticleId {
        let id = particle.id;
        self.particles.push(particle);
        id
    }

    /// Append several particles, keeping their order.
    pub fn extend(&mut self, particles: impl IntoIterator<Item = Particle>) {
        self.particles.extend(particles);
    }

    /// Remove every particle whose ID is in `ids` in a single pass.
    /// Returns how many were removed. Relative order of survivors is kept.
    pub fn remove_all(&mut self, ids: &[ParticleId]) -> usize {
        let before = self.particles.len();
        self.particles.retain(|p| !ids.contains(&p.id));
        before - self.particles.len()
    }

    /// Get a reference to a particle by ID.
    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id == id)
    }

    /// Get a mutable reference to a particle by ID.
    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.iter_mut().find(|p| p.id == id)
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate over all particles in store order.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Iterate over all particles mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Number of particles in the store.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Clear all particles. IDs keep counting up.
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

impl Default for ParticleStore {
    fn default() -> Self {
        Self::new()
    }
}
