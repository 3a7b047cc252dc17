//! Explosion effects: an expanding ring plus a burst of fresh particles.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::api::config::{BurstProfile, ExplosionConfig};
use crate::components::color::Rgb;
use crate::components::element::ElementKind;
use crate::components::particle::Particle;
use crate::core::rng::Rng;
use crate::core::store::ParticleStore;

/// A transient ring effect carrying outward-flying fragments.
///
/// Fragments live inside the explosion until it fades out, then join the
/// main store as ordinary inactive particles.
#[derive(Debug, Clone)]
pub struct Explosion {
    pub center: Vec2,
    pub color: Rgb,
    /// Current ring radius.
    pub radius: f32,
    /// Starts at 1.0 and decays every tick.
    pub opacity: f32,
    pub fragments: Vec<Particle>,
}

impl Explosion {
    /// Create an explosion at `center`, spawning a random number of random
    /// element fragments evenly spread around the circle.
    pub fn new(
        center: Vec2,
        color: Rgb,
        profile: &BurstProfile,
        store: &mut ParticleStore,
        rng: &mut Rng,
    ) -> Self {
        let span = profile.max_fragments.saturating_sub(profile.min_fragments) + 1;
        let count = profile.min_fragments + rng.next_int(span);

        let fragments = (0..count)
            .map(|i| {
                let angle = TAU * i as f32 / count as f32;
                let speed = rng.range(profile.min_speed, profile.max_speed);
                Particle::new(store.next_id(), ElementKind::random(rng))
                    .with_pos(center)
                    .with_vel(Vec2::from_angle(angle) * speed)
                    .with_active(true)
            })
            .collect();

        Self {
            center,
            color,
            radius: profile.initial_radius,
            opacity: 1.0,
            fragments,
        }
    }

    /// Advance one tick. Returns false once the effect has faded out;
    /// fragments do not move on that final tick.
    pub fn tick(&mut self, config: &ExplosionConfig) -> bool {
        self.radius += config.ring_growth;
        self.opacity -= config.fade;

        if self.opacity <= 0.0 {
            return false;
        }

        for fragment in &mut self.fragments {
            fragment.drift(config.fragment_damping);
        }
        true
    }

    /// Hand the fragments over as inactive, slowed-down particles.
    pub fn dissolve(self, settle_factor: f32) -> Vec<Particle> {
        self.fragments
            .into_iter()
            .map(|mut p| {
                p.vel *= settle_factor;
                p.active = false;
                p
            })
            .collect()
    }
}

/// Advance all explosions by one tick, folding faded ones into `store`.
/// Returns the number of explosions that dissolved.
pub fn update_explosions(
    explosions: &mut Vec<Explosion>,
    store: &mut ParticleStore,
    config: &ExplosionConfig,
) -> usize {
    let mut dissolved = 0;
    let mut live = Vec::with_capacity(explosions.len());

    for mut explosion in explosions.drain(..) {
        if explosion.tick(config) {
            live.push(explosion);
        } else {
            log::debug!(
                "explosion at ({:.0}, {:.0}) dissolved into {} particles",
                explosion.center.x,
                explosion.center.y,
                explosion.fragments.len()
            );
            store.extend(explosion.dissolve(config.settle_factor));
            dissolved += 1;
        }
    }

    *explosions = live;
    dissolved
}
