use crate::api::types::ParticleId;
use crate::components::particle::Particle;

/// Recompute every particle's `active` flag from pairwise proximity.
///
/// All flags are cleared first, except the one belonging to `held` (the
/// dragged particle stays lit). A pair then lights up when it is bondable
/// and closer than `distance`. A per-axis box test rejects far pairs before
/// the squared distance is computed; no square roots are taken.
pub fn update_highlights(particles: &mut [Particle], held: Option<ParticleId>, distance: f32) {
    for p in particles.iter_mut() {
        if Some(p.id) != held {
            p.active = false;
        }
    }

    let limit_sq = distance * distance;
    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            let lit = {
                let (a, b) = (&particles[i], &particles[j]);
                let delta = a.pos - b.pos;
                if delta.x.abs() > distance || delta.y.abs() > distance {
                    continue;
                }
                delta.length_squared() < limit_sq && a.can_bond_with(b)
            };
            if lit {
                particles[i].active = true;
                particles[j].active = true;
            }
        }
    }
}
