use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Shape of an explosion burst.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstProfile {
    /// Ring radius when the explosion is created.
    pub initial_radius: f32,
    /// Fewest fragments spawned (inclusive).
    pub min_fragments: u32,
    /// Most fragments spawned (inclusive).
    pub max_fragments: u32,
    /// Fragment launch speed range, units per tick.
    pub min_speed: f32,
    pub max_speed: f32,
}

impl BurstProfile {
    /// Burst produced by a proximity reaction.
    pub const SMALL: Self = Self {
        initial_radius: 5.0,
        min_fragments: 1,
        max_fragments: 5,
        min_speed: 2.0,
        max_speed: 4.0,
    };

    /// Burst produced by a click-triggered reaction.
    pub const BIG: Self = Self {
        initial_radius: 10.0,
        min_fragments: 7,
        max_fragments: 12,
        min_speed: 3.0,
        max_speed: 6.0,
    };
}

impl Default for BurstProfile {
    fn default() -> Self {
        Self::SMALL
    }
}

/// Per-tick explosion behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionConfig {
    /// Ring radius growth per tick.
    pub ring_growth: f32,
    /// Opacity lost per tick.
    pub fade: f32,
    /// Fragment velocity multiplier per tick while the ring is alive.
    pub fragment_damping: f32,
    /// Fragment velocity multiplier applied once when they join the store.
    pub settle_factor: f32,
    pub small: BurstProfile,
    pub big: BurstProfile,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            ring_growth: 0.5,
            fade: 0.01,
            fragment_damping: 0.95,
            settle_factor: 0.2,
            small: BurstProfile::SMALL,
            big: BurstProfile::BIG,
        }
    }
}

/// Configuration for the simulation, provided by the host page.
///
/// Distances are in viewport pixels, speeds in pixels per tick and
/// intervals in seconds of simulation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Viewport width.
    pub width: f32,
    /// Viewport height.
    pub height: f32,
    /// Touch devices keep pointer-down for page scrolling.
    pub mobile: bool,
    /// Particles spawned by `populate`.
    pub particle_count: usize,
    pub particle_radius: f32,
    /// Half-extent of the initial per-axis speed range.
    pub drift_speed: f32,
    /// Half-extent of the per-axis speed given to a released particle.
    pub release_speed: f32,
    /// Half-extent of the per-axis speed of a fresh molecule.
    pub molecule_speed: f32,
    /// Pairs closer than this highlight each other.
    pub highlight_distance: f32,
    /// Pairs closer than this may start a proximity reaction.
    pub reaction_distance: f32,
    /// The third reagent must lie within `reaction_distance * reaction_reach` of both.
    pub reaction_reach: f32,
    /// Radius gathered by a click-triggered reaction.
    pub force_radius: f32,
    /// Pointer-down within this distance picks a particle up.
    pub hit_radius: f32,
    /// Bond lines are drawn within this distance of the pointer.
    pub link_distance: f32,
    /// Bond lines fainter than this are culled.
    pub link_cutoff: f32,
    /// Bond glyphs appear above this line opacity.
    pub glyph_threshold: f32,
    /// Particle opacity over empty background.
    pub base_opacity: f32,
    /// Particle opacity over readable content.
    pub covered_opacity: f32,
    pub explosion: ExplosionConfig,
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Seconds between proximity reaction scans.
    pub reaction_interval: f32,
    /// Seconds between content-area refresh requests.
    pub content_interval: f32,
    pub seed: u64,
    /// Capacities of the shared render buffers.
    pub max_discs: usize,
    pub max_rings: usize,
    pub max_lines: usize,
    pub max_events: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            mobile: false,
            particle_count: 50,
            particle_radius: 12.0,
            drift_speed: 0.1,
            release_speed: 0.25,
            molecule_speed: 0.15,
            highlight_distance: 120.0,
            reaction_distance: 80.0,
            reaction_reach: 1.5,
            force_radius: 150.0,
            hit_radius: 30.0,
            link_distance: 180.0,
            link_cutoff: 0.3,
            glyph_threshold: 0.6,
            base_opacity: 0.6,
            covered_opacity: 0.15,
            explosion: ExplosionConfig::default(),
            fixed_dt: 1.0 / 60.0,
            reaction_interval: 20.0 / 60.0,
            content_interval: 1.0,
            seed: 42,
            max_discs: 512,
            max_rings: 64,
            max_lines: 2048,
            max_events: 32,
        }
    }
}

impl SimConfig {
    /// Viewports narrower than this are treated as touch devices.
    pub const MOBILE_BREAKPOINT: f32 = 768.0;
    pub const MOBILE_PARTICLE_COUNT: usize = 30;

    /// Default configuration sized for a viewport, applying the mobile rule.
    pub fn for_viewport(width: f32, height: f32) -> Self {
        let mobile = width < Self::MOBILE_BREAKPOINT;
        let defaults = Self::default();
        Self {
            width,
            height,
            mobile,
            particle_count: if mobile {
                Self::MOBILE_PARTICLE_COUNT
            } else {
                defaults.particle_count
            },
            ..defaults
        }
    }

    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Apply a partial JSON document on top of this configuration.
    /// Fields absent from `json` keep their current values, not the defaults.
    pub fn merged_json(&self, json: &str) -> Result<Self, serde_json::Error> {
        let patch: serde_json::Value = serde_json::from_str(json)?;
        let mut base = serde_json::to_value(self)?;
        merge(&mut base, patch);
        serde_json::from_value(base)
    }

    /// Viewport extent as a vector.
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width.max(0.0), self.height.max(0.0))
    }
}

fn merge(base: &mut serde_json::Value, patch: serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(base), serde_json::Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, patch) => *base = patch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merged_json_keeps_current_values() {
        let current = SimConfig::for_viewport(500.0, 900.0);
        let merged = current
            .merged_json(r#"{ "link_distance": 200, "explosion": { "big": { "max_fragments": 20 } } }"#)
            .unwrap();
        assert_eq!(merged.width, 500.0);
        assert!(merged.mobile);
        assert_eq!(merged.link_distance, 200.0);
        assert_eq!(merged.explosion.big.max_fragments, 20);
        assert_eq!(merged.explosion.big.min_fragments, 7);
    }

    #[test]
    fn narrow_viewport_is_mobile() {
        let config = SimConfig::for_viewport(375.0, 812.0);
        assert!(config.mobile);
        assert_eq!(config.particle_count, 30);
        assert_eq!(config.bounds(), Vec2::new(375.0, 812.0));
    }

    #[test]
    fn wide_viewport_is_desktop() {
        let config = SimConfig::for_viewport(1920.0, 1080.0);
        assert!(!config.mobile);
        assert_eq!(config.particle_count, 50);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "width": 640, "height": 480, "explosion": { "fade": 0.02 } }"#;
        let config = SimConfig::from_json(json).unwrap();
        assert_eq!(config.width, 640.0);
        assert_eq!(config.reaction_distance, 80.0);
        assert_eq!(config.explosion.fade, 0.02);
        assert_eq!(config.explosion.big, BurstProfile::BIG);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SimConfig::from_json("{ width: }").is_err());
    }
}
