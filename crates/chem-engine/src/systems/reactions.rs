//! Reaction rules: which particle triples turn into a molecule.
//!
//! Finding a match is a pure read of the store. Applying it (removal,
//! molecule spawn, explosion) happens in `Simulation`.

use glam::Vec2;

use crate::api::types::ParticleId;
use crate::components::color::Rgb;
use crate::components::element::{ElementKind, Molecule};
use crate::components::particle::Particle;

/// A molecule the reaction rules can synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Product {
    CarbonDioxide,
    Water,
}

impl Product {
    pub fn molecule(self) -> Molecule {
        match self {
            Product::CarbonDioxide => Molecule::CARBON_DIOXIDE,
            Product::Water => Molecule::WATER,
        }
    }

    /// Explosion and molecule color.
    pub fn color(self) -> Rgb {
        self.molecule().color
    }

    /// Numeric code carried in reaction events.
    pub fn code(self) -> f32 {
        match self {
            Product::CarbonDioxide => 1.0,
            Product::Water => 2.0,
        }
    }

    /// For a reacting pair, the product it can form and the element the
    /// third reagent must be.
    fn for_pair(a: ElementKind, b: ElementKind) -> Option<(Product, ElementKind)> {
        use ElementKind::*;
        match (a, b) {
            (Carbon, Oxygen) | (Oxygen, Carbon) => Some((Product::CarbonDioxide, Oxygen)),
            (Hydrogen, Oxygen) | (Oxygen, Hydrogen) => Some((Product::Water, Hydrogen)),
            _ => None,
        }
    }
}

/// A reaction ready to be applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    pub product: Product,
    pub reagents: [ParticleId; 3],
    /// Where the molecule and explosion appear.
    pub center: Vec2,
}

/// Scan unordered pairs closer than `distance` for one that can complete a
/// molecule with a third particle within `distance * reach` of both.
///
/// Pairs are tried in store order and the scan keeps going past pairs that
/// find no partner; the first completed triple wins.
pub fn find_proximity_reaction(particles: &[Particle], distance: f32, reach: f32) -> Option<Match> {
    let limit_sq = distance * distance;
    let partner_reach = distance * reach;

    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            let (p1, p2) = (&particles[i], &particles[j]);
            if p1.distance_squared(p2) >= limit_sq || !p1.can_bond_with(p2) {
                continue;
            }
            let (Some(a), Some(b)) = (p1.element(), p2.element()) else {
                continue;
            };
            let Some((product, partner_kind)) = Product::for_pair(a, b) else {
                continue;
            };

            let partner = particles.iter().enumerate().find(|&(k, p3)| {
                k != i
                    && k != j
                    && p3.is(partner_kind)
                    && p1.distance(p3) < partner_reach
                    && p2.distance(p3) < partner_reach
            });

            if let Some((_, p3)) = partner {
                return Some(Match {
                    product,
                    reagents: [p1.id, p2.id, p3.id],
                    center: (p1.pos + p2.pos + p3.pos) / 3.0,
                });
            }
        }
    }
    None
}

/// Gather the particles within `radius` of `at` and pick reagents from them
/// in store order: one C and two O for CO₂, otherwise two H and one O for
/// H₂O. The molecule appears at `at`.
pub fn find_forced_reaction(particles: &[Particle], at: Vec2, radius: f32) -> Option<Match> {
    let nearby: Vec<&Particle> = particles
        .iter()
        .filter(|p| p.pos.distance(at) < radius)
        .collect();
    if nearby.len() < 2 {
        return None;
    }

    let first = |kind: ElementKind, n: usize| -> Vec<ParticleId> {
        nearby
            .iter()
            .filter(|p| p.is(kind))
            .take(n)
            .map(|p| p.id)
            .collect()
    };

    let carbon = first(ElementKind::Carbon, 1);
    let oxygen = first(ElementKind::Oxygen, 2);
    if carbon.len() == 1 && oxygen.len() == 2 {
        return Some(Match {
            product: Product::CarbonDioxide,
            reagents: [carbon[0], oxygen[0], oxygen[1]],
            center: at,
        });
    }

    let hydrogen = first(ElementKind::Hydrogen, 2);
    if hydrogen.len() == 2 && !oxygen.is_empty() {
        return Some(Match {
            product: Product::Water,
            reagents: [hydrogen[0], hydrogen[1], oxygen[0]],
            center: at,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(id: u32, kind: ElementKind, x: f32, y: f32) -> Particle {
        Particle::new(ParticleId(id), kind).with_pos(Vec2::new(x, y))
    }

    #[test]
    fn carbon_dioxide_forms_at_centroid() {
        let ps = vec![
            at(1, ElementKind::Carbon, 0.0, 0.0),
            at(2, ElementKind::Oxygen, 30.0, 0.0),
            at(3, ElementKind::Oxygen, 0.0, 30.0),
        ];
        let m = find_proximity_reaction(&ps, 80.0, 1.5).unwrap();
        assert_eq!(m.product, Product::CarbonDioxide);
        assert_eq!(m.reagents, [ParticleId(1), ParticleId(2), ParticleId(3)]);
        assert!((m.center - Vec2::new(10.0, 10.0)).length() < 1e-4);
    }

    #[test]
    fn water_needs_a_second_hydrogen() {
        let ps = vec![
            at(1, ElementKind::Hydrogen, 0.0, 0.0),
            at(2, ElementKind::Oxygen, 40.0, 0.0),
        ];
        assert!(find_proximity_reaction(&ps, 80.0, 1.5).is_none());

        let mut ps = ps;
        ps.push(at(3, ElementKind::Hydrogen, 80.0, 0.0));
        let m = find_proximity_reaction(&ps, 80.0, 1.5).unwrap();
        assert_eq!(m.product, Product::Water);
        assert_eq!(m.reagents[2], ParticleId(3));
    }

    #[test]
    fn partner_must_be_within_reach_of_both() {
        // Third O is 100 from C but 170 from the first O.
        let ps = vec![
            at(1, ElementKind::Oxygen, 0.0, 0.0),
            at(2, ElementKind::Carbon, 70.0, 0.0),
            at(3, ElementKind::Oxygen, 170.0, 0.0),
        ];
        assert!(find_proximity_reaction(&ps, 80.0, 1.5).is_none());
    }

    #[test]
    fn scan_continues_past_failed_pairs() {
        // The first C-O pair has no partner; the later one does.
        let ps = vec![
            at(1, ElementKind::Carbon, 0.0, 0.0),
            at(2, ElementKind::Oxygen, 50.0, 0.0),
            at(3, ElementKind::Hydrogen, 1000.0, 1000.0),
            at(4, ElementKind::Oxygen, 1040.0, 1000.0),
            at(5, ElementKind::Hydrogen, 1000.0, 1040.0),
        ];
        let m = find_proximity_reaction(&ps, 80.0, 1.5).unwrap();
        assert_eq!(m.product, Product::Water);
    }

    #[test]
    fn bondable_but_unreactive_pairs_are_skipped() {
        let ps = vec![
            at(1, ElementKind::Carbon, 0.0, 0.0),
            at(2, ElementKind::Carbon, 10.0, 0.0),
            at(3, ElementKind::Carbon, 20.0, 0.0),
        ];
        assert!(find_proximity_reaction(&ps, 80.0, 1.5).is_none());
    }

    #[test]
    fn forced_prefers_carbon_dioxide() {
        let ps = vec![
            at(1, ElementKind::Hydrogen, 0.0, 0.0),
            at(2, ElementKind::Oxygen, 5.0, 0.0),
            at(3, ElementKind::Carbon, 10.0, 0.0),
            at(4, ElementKind::Hydrogen, 15.0, 0.0),
            at(5, ElementKind::Oxygen, 20.0, 0.0),
        ];
        let m = find_forced_reaction(&ps, Vec2::ZERO, 150.0).unwrap();
        assert_eq!(m.product, Product::CarbonDioxide);
        assert_eq!(m.reagents, [ParticleId(3), ParticleId(2), ParticleId(5)]);
        assert_eq!(m.center, Vec2::ZERO);
    }

    #[test]
    fn forced_falls_back_to_water() {
        let ps = vec![
            at(1, ElementKind::Hydrogen, 0.0, 0.0),
            at(2, ElementKind::Oxygen, 5.0, 0.0),
            at(3, ElementKind::Hydrogen, 10.0, 0.0),
            at(4, ElementKind::Hydrogen, 15.0, 0.0),
        ];
        let m = find_forced_reaction(&ps, Vec2::ZERO, 150.0).unwrap();
        assert_eq!(m.product, Product::Water);
        assert_eq!(m.reagents, [ParticleId(1), ParticleId(3), ParticleId(2)]);
    }

    #[test]
    fn forced_ignores_particles_outside_radius() {
        let ps = vec![
            at(1, ElementKind::Carbon, 0.0, 0.0),
            at(2, ElementKind::Oxygen, 5.0, 0.0),
            at(3, ElementKind::Oxygen, 200.0, 0.0),
        ];
        assert!(find_forced_reaction(&ps, Vec2::ZERO, 150.0).is_none());
    }
}
