use glam::Vec2;

use crate::api::config::SimConfig;
use crate::components::color::Rgb;
use crate::components::element::BondOrder;
use crate::components::particle::Particle;
use crate::renderer::instance::{
    glyph, label_index, DiscInstance, FrameBuffer, LineInstance, RingInstance,
};
use crate::systems::content::ContentAreas;
use crate::systems::explosion::Explosion;

/// Ring outline width in pixels.
pub const RING_WIDTH: f32 = 3.0;
/// Bond line width in pixels.
pub const LINE_WIDTH: f32 = 1.5;
/// Particle outline width in pixels.
pub const DISC_STROKE_WIDTH: f32 = 1.5;

/// The color a particle is drawn in right now.
fn display_color(p: &Particle) -> Rgb {
    if p.active {
        p.species.color()
    } else {
        Rgb::GRAY
    }
}

fn disc(p: &Particle, opacity: f32) -> DiscInstance {
    let [r, g, b] = display_color(p).to_f32();
    DiscInstance {
        x: p.pos.x,
        y: p.pos.y,
        radius: p.radius,
        r,
        g,
        b,
        fill_alpha: opacity * 20.0 / 255.0,
        stroke_alpha: opacity * 128.0 / 255.0,
        label_alpha: opacity,
        label: label_index(p.species.label()) as f32,
    }
}

/// Build the frame from the current simulation state.
///
/// Draw order: explosion rings and their fragments, then store particles,
/// then bond lines near the pointer.
pub fn build_frame(
    particles: &[Particle],
    explosions: &[Explosion],
    content: &ContentAreas,
    pointer: Option<Vec2>,
    config: &SimConfig,
    frame: &mut FrameBuffer,
) {
    frame.clear();

    for explosion in explosions {
        let [r, g, b] = explosion.color.to_f32();
        frame.push_ring(RingInstance {
            x: explosion.center.x,
            y: explosion.center.y,
            radius: explosion.radius,
            r,
            g,
            b,
            alpha: explosion.opacity * 100.0 / 255.0,
            width: RING_WIDTH,
        });
        for fragment in &explosion.fragments {
            frame.push_disc(disc(fragment, explosion.opacity));
        }
    }

    for p in particles {
        let opacity = if content.covers(p.pos) {
            config.covered_opacity
        } else {
            config.base_opacity
        };
        frame.push_disc(disc(p, opacity));
    }

    if let Some(pointer) = pointer {
        build_links(particles, pointer, config, frame);
    }
}

/// Gradient lines between bondable pairs close to the pointer.
///
/// Each unordered pair is drawn at most once, faded by both the pair's
/// separation and the nearer endpoint's distance to the pointer.
fn build_links(particles: &[Particle], pointer: Vec2, config: &SimConfig, frame: &mut FrameBuffer) {
    let reach = config.link_distance;
    if reach <= 0.0 {
        return;
    }
    let reach_sq = reach * reach;

    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            let (a, b) = (&particles[i], &particles[j]);
            if !a.can_bond_with(b) {
                continue;
            }

            let near_sq = a.pos.distance_squared(pointer).min(b.pos.distance_squared(pointer));
            if near_sq >= reach_sq {
                continue;
            }
            let pair_sq = a.distance_squared(b);
            if pair_sq >= reach_sq {
                continue;
            }

            let opacity = (1.0 - pair_sq.sqrt() / reach) * (1.0 - near_sq.sqrt() / reach);
            if opacity <= config.link_cutoff {
                continue;
            }

            let glyph = match (a.element(), b.element()) {
                (Some(ka), Some(kb)) if opacity > config.glyph_threshold => {
                    match BondOrder::between(ka, kb) {
                        BondOrder::Double => glyph::DOUBLE,
                        BondOrder::Single => glyph::SINGLE,
                    }
                }
                _ => glyph::NONE,
            };

            let [r0, g0, b0] = display_color(a).to_f32();
            let [r1, g1, b1] = display_color(b).to_f32();
            frame.push_line(LineInstance {
                x0: a.pos.x,
                y0: a.pos.y,
                x1: b.pos.x,
                y1: b.pos.y,
                r0,
                g0,
                b0,
                r1,
                g1,
                b1,
                alpha: opacity * 180.0 / 255.0,
                width: LINE_WIDTH,
                glyph,
                glyph_alpha: if glyph == glyph::NONE {
                    0.0
                } else {
                    opacity * 200.0 / 255.0
                },
                _pad0: 0.0,
                _pad1: 0.0,
            });
        }
    }
}
