//! Pointer interaction: drag a particle around, or click empty space to
//! force a reaction.

use glam::Vec2;

use crate::api::types::ParticleId;
use crate::core::rng::Rng;
use crate::core::store::ParticleStore;

/// The current interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    /// No active interaction.
    Idle,
    /// A particle is pinned to the pointer.
    Dragging { particle: ParticleId },
}

/// Result of processing a pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionResult {
    /// No action needed.
    None,
    /// A particle was picked up.
    BeganDrag { particle: ParticleId },
    /// The dragged particle was let go.
    Released { particle: ParticleId },
    /// Empty space was pressed; try a reaction here.
    ForceReaction { at: Vec2 },
}

/// Manages pointer state and the drag state machine.
pub struct InteractionSystem {
    mode: InteractionMode,
    /// Last known pointer position, cleared when the pointer leaves.
    pointer: Option<Vec2>,
    hit_radius: f32,
    /// Touch devices keep presses for scrolling.
    mobile: bool,
}

impl InteractionSystem {
    pub fn new(hit_radius: f32, mobile: bool) -> Self {
        Self {
            mode: InteractionMode::Idle,
            pointer: None,
            hit_radius,
            mobile,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// The particle currently held, if any.
    pub fn held(&self) -> Option<ParticleId> {
        match self.mode {
            InteractionMode::Dragging { particle } => Some(particle),
            InteractionMode::Idle => None,
        }
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn set_mobile(&mut self, mobile: bool) {
        self.mobile = mobile;
    }

    pub fn set_hit_radius(&mut self, hit_radius: f32) {
        self.hit_radius = hit_radius;
    }

    /// Handle pointer down. Presses on page controls and all presses on
    /// mobile are ignored.
    pub fn on_pointer_down(
        &mut self,
        pos: Vec2,
        on_control: bool,
        store: &mut ParticleStore,
    ) -> InteractionResult {
        if self.mobile || on_control {
            return InteractionResult::None;
        }

        let hit_radius = self.hit_radius;
        match store.iter_mut().find(|p| p.pos.distance(pos) < hit_radius) {
            Some(particle) => {
                particle.vel = Vec2::ZERO;
                particle.active = true;
                let id = particle.id;
                self.mode = InteractionMode::Dragging { particle: id };
                log::trace!("drag started on particle {}", id.0);
                InteractionResult::BeganDrag { particle: id }
            }
            None => InteractionResult::ForceReaction { at: pos },
        }
    }

    /// Handle pointer move. The held particle follows the pointer.
    pub fn on_pointer_move(&mut self, pos: Vec2, store: &mut ParticleStore) -> InteractionResult {
        self.pointer = Some(pos);

        if let Some(id) = self.held() {
            match store.get_mut(id) {
                Some(particle) => {
                    particle.pos = pos;
                    particle.vel = Vec2::ZERO;
                    particle.active = true;
                }
                None => self.mode = InteractionMode::Idle,
            }
        }
        InteractionResult::None
    }

    /// Handle pointer up. The held particle drifts off with a small random velocity.
    pub fn on_pointer_up(
        &mut self,
        store: &mut ParticleStore,
        rng: &mut Rng,
        release_speed: f32,
    ) -> InteractionResult {
        let Some(id) = self.held() else {
            return InteractionResult::None;
        };
        self.mode = InteractionMode::Idle;

        match store.get_mut(id) {
            Some(particle) => {
                particle.vel = Vec2::new(rng.centered(release_speed), rng.centered(release_speed));
                log::trace!("drag released on particle {}", id.0);
                InteractionResult::Released { particle: id }
            }
            None => InteractionResult::None,
        }
    }

    /// Handle the pointer leaving the window: forget it and drop any drag.
    pub fn on_pointer_leave(
        &mut self,
        store: &mut ParticleStore,
        rng: &mut Rng,
        release_speed: f32,
    ) -> InteractionResult {
        self.pointer = None;
        self.on_pointer_up(store, rng, release_speed)
    }

    /// Drop the drag if the held particle no longer exists.
    pub fn sync(&mut self, store: &ParticleStore) {
        if let Some(id) = self.held() {
            if !store.contains(id) {
                log::trace!("held particle {} was consumed", id.0);
                self.mode = InteractionMode::Idle;
            }
        }
    }

    /// Reset to idle without touching any particle.
    pub fn reset(&mut self) {
        self.mode = InteractionMode::Idle;
        self.pointer = None;
    }
}
