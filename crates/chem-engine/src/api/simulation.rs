use glam::Vec2;

use crate::api::config::{BurstProfile, SimConfig};
use crate::api::types::{event_kind, ParticleId, SimEvent};
use crate::components::element::{ElementKind, Species};
use crate::components::particle::Particle;
use crate::core::rng::Rng;
use crate::core::store::ParticleStore;
use crate::core::time::{FixedTimestep, Interval};
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::instance::FrameBuffer;
use crate::systems::bonding::update_highlights;
use crate::systems::content::ContentAreas;
use crate::systems::explosion::{update_explosions, Explosion};
use crate::systems::interaction::{InteractionResult, InteractionSystem};
use crate::systems::reactions::{find_forced_reaction, find_proximity_reaction, Match, Product};
use crate::systems::render::build_frame;

/// The whole background simulation: particles, explosions, pointer state
/// and timers, advanced in fixed ticks.
///
/// Hosts push input with [`push_input`](Self::push_input), feed frame time
/// into [`step`](Self::step) and read the result back through
/// [`build_frame`](Self::build_frame) and [`events`](Self::events).
pub struct Simulation {
    config: SimConfig,
    store: ParticleStore,
    explosions: Vec<Explosion>,
    content: ContentAreas,
    interaction: InteractionSystem,
    input: InputQueue,
    rng: Rng,
    timestep: FixedTimestep,
    reaction_timer: Interval,
    content_timer: Interval,
    /// Events emitted since the last `step`.
    events: Vec<SimEvent>,
    frame: FrameBuffer,
    ticks: u64,
}

impl Simulation {
    /// Create a simulation with an empty store.
    pub fn new(config: SimConfig) -> Self {
        Self {
            store: ParticleStore::with_capacity(config.particle_count * 2),
            explosions: Vec::new(),
            content: ContentAreas::new(),
            interaction: InteractionSystem::new(config.hit_radius, config.mobile),
            input: InputQueue::new(),
            rng: Rng::new(config.seed),
            timestep: FixedTimestep::new(config.fixed_dt),
            reaction_timer: Interval::new(config.reaction_interval),
            content_timer: Interval::new(config.content_interval),
            events: Vec::with_capacity(config.max_events),
            frame: FrameBuffer::with_capacity(config.max_discs, config.max_rings, config.max_lines),
            ticks: 0,
            config,
        }
    }

    /// Create a simulation and fill it with its initial particles.
    pub fn with_population(config: SimConfig) -> Self {
        let mut sim = Self::new(config);
        sim.populate();
        log::info!(
            "chemical background started: {} particles on {}x{}{}",
            sim.store.len(),
            sim.config.width,
            sim.config.height,
            if sim.config.mobile { " (mobile)" } else { "" }
        );
        sim
    }

    /// Spawn `particle_count` random inactive elements across the viewport.
    pub fn populate(&mut self) {
        let bounds = self.config.bounds();
        for _ in 0..self.config.particle_count {
            let pos = Vec2::new(self.rng.range(0.0, bounds.x), self.rng.range(0.0, bounds.y));
            let vel = Vec2::new(
                self.rng.centered(self.config.drift_speed),
                self.rng.centered(self.config.drift_speed),
            );
            let kind = ElementKind::random(&mut self.rng);
            self.spawn(kind, pos, vel);
        }
    }

    /// Add one inactive particle.
    pub fn spawn(&mut self, species: impl Into<Species>, pos: Vec2, vel: Vec2) -> ParticleId {
        let id = self.store.next_id();
        self.store.spawn(
            Particle::new(id, species)
                .with_pos(pos)
                .with_vel(vel)
                .with_radius(self.config.particle_radius),
        )
    }

    /// Queue an input event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Replace the content rectangles used for dimming.
    pub fn set_content_areas(&mut self, areas: ContentAreas) {
        self.content.replace(areas);
    }

    /// Swap in a new configuration, keeping the current particles.
    pub fn apply_config(&mut self, config: SimConfig) {
        self.interaction.set_hit_radius(config.hit_radius);
        self.interaction.set_mobile(config.mobile);
        self.timestep = FixedTimestep::new(config.fixed_dt);
        self.reaction_timer = Interval::new(config.reaction_interval);
        self.content_timer = Interval::new(config.content_interval);
        self.frame = FrameBuffer::with_capacity(config.max_discs, config.max_rings, config.max_lines);
        self.config = config;
    }

    /// Feed a frame delta in seconds. Runs as many fixed ticks as fit (at
    /// most 10) and returns how many ran. Events from the previous call are
    /// cleared first.
    pub fn step(&mut self, dt: f32) -> u32 {
        self.events.clear();
        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.tick();
        }
        steps
    }

    /// Run exactly one fixed tick.
    pub fn tick(&mut self) {
        let dt = self.timestep.dt();

        self.apply_input();

        if self.content_timer.tick(dt) {
            self.emit(SimEvent::content_refresh());
        }

        update_highlights(
            self.store.as_mut_slice(),
            self.interaction.held(),
            self.config.highlight_distance,
        );

        if self.reaction_timer.tick(dt) {
            self.evaluate_reactions();
        }

        update_explosions(&mut self.explosions, &mut self.store, &self.config.explosion);

        let bounds = self.config.bounds();
        for particle in self.store.iter_mut() {
            particle.advance(bounds);
        }

        self.ticks += 1;
    }

    fn apply_input(&mut self) {
        for event in self.input.drain() {
            match event {
                InputEvent::PointerDown { x, y, on_control } => {
                    let pos = Vec2::new(x, y);
                    match self.interaction.on_pointer_down(pos, on_control, &mut self.store) {
                        InteractionResult::BeganDrag { particle } => {
                            self.emit(SimEvent::new(event_kind::DRAG_STARTED, particle.0 as f32, x, y));
                        }
                        InteractionResult::ForceReaction { at } => {
                            self.force_reaction_at(at);
                        }
                        _ => {}
                    }
                }
                InputEvent::PointerMove { x, y } => {
                    self.interaction.on_pointer_move(Vec2::new(x, y), &mut self.store);
                }
                InputEvent::PointerUp { .. } => {
                    let result = self.interaction.on_pointer_up(
                        &mut self.store,
                        &mut self.rng,
                        self.config.release_speed,
                    );
                    self.emit_release(result);
                }
                InputEvent::PointerLeave => {
                    let result = self.interaction.on_pointer_leave(
                        &mut self.store,
                        &mut self.rng,
                        self.config.release_speed,
                    );
                    self.emit_release(result);
                }
                InputEvent::Resize { width, height } => {
                    self.config.width = width;
                    self.config.height = height;
                }
            }
        }
    }

    fn emit_release(&mut self, result: InteractionResult) {
        if let InteractionResult::Released { particle } = result {
            self.emit(SimEvent::new(event_kind::DRAG_RELEASED, particle.0 as f32, 0.0, 0.0));
        }
    }

    /// Events past the configured capacity are dropped.
    fn emit(&mut self, event: SimEvent) {
        if self.events.len() < self.config.max_events {
            self.events.push(event);
        }
    }

    /// Run one proximity reaction scan now. Returns the product, if any.
    pub fn evaluate_reactions(&mut self) -> Option<Product> {
        let found = find_proximity_reaction(
            self.store.as_slice(),
            self.config.reaction_distance,
            self.config.reaction_reach,
        )?;
        let profile = self.config.explosion.small;
        self.resolve(found, &profile);
        Some(found.product)
    }

    /// Try a reaction among the particles around `at`, as a click on empty
    /// space does. Returns the product, if any.
    pub fn force_reaction_at(&mut self, at: Vec2) -> Option<Product> {
        let found = find_forced_reaction(self.store.as_slice(), at, self.config.force_radius)?;
        let profile = self.config.explosion.big;
        self.resolve(found, &profile);
        Some(found.product)
    }

    /// Consume the reagents, then add the explosion and the molecule.
    fn resolve(&mut self, found: Match, profile: &BurstProfile) {
        let removed = self.store.remove_all(&found.reagents);
        debug_assert_eq!(removed, found.reagents.len());

        let molecule = found.product.molecule();
        let explosion = Explosion::new(
            found.center,
            molecule.color,
            profile,
            &mut self.store,
            &mut self.rng,
        );
        log::debug!(
            "{} formed at ({:.0}, {:.0}), {} fragments",
            molecule.label,
            found.center.x,
            found.center.y,
            explosion.fragments.len()
        );
        self.explosions.push(explosion);

        let vel = Vec2::new(
            self.rng.centered(self.config.molecule_speed),
            self.rng.centered(self.config.molecule_speed),
        );
        let id = self.store.next_id();
        self.store.spawn(
            Particle::new(id, Species::Synthesized(molecule))
                .with_pos(found.center)
                .with_vel(vel)
                .with_radius(self.config.particle_radius)
                .with_active(true),
        );

        self.emit(SimEvent::new(
            event_kind::REACTION,
            found.product.code(),
            found.center.x,
            found.center.y,
        ));
        self.interaction.sync(&self.store);
    }

    /// Render the current state into the frame buffer and return it.
    pub fn build_frame(&mut self) -> &FrameBuffer {
        build_frame(
            self.store.as_slice(),
            &self.explosions,
            &self.content,
            self.interaction.pointer(),
            &self.config,
            &mut self.frame,
        );
        &self.frame
    }

    // -- Accessors --

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        self.store.as_slice()
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.store.get(id)
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn content_areas(&self) -> &ContentAreas {
        &self.content
    }

    /// The particle being dragged, if any.
    pub fn held(&self) -> Option<ParticleId> {
        self.interaction.held()
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.interaction.pointer()
    }

    /// Fixed ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::element::Molecule;

    const DT: f32 = 1.0 / 60.0;

    fn quiet_config() -> SimConfig {
        SimConfig {
            reaction_interval: 1.0e9,
            ..SimConfig::default()
        }
    }

    fn count(sim: &Simulation, kind: ElementKind) -> usize {
        sim.particles().iter().filter(|p| p.is(kind)).count()
    }

    #[test]
    fn population_matches_config() {
        let sim = Simulation::with_population(SimConfig::for_viewport(375.0, 667.0));
        assert_eq!(sim.particles().len(), 30);
        for p in sim.particles() {
            assert!(!p.active);
            assert!(p.vel.x >= -0.1 && p.vel.x < 0.1);
            assert!(p.pos.x >= 0.0 && p.pos.x <= 375.0);
        }
    }

    #[test]
    fn particles_stay_in_bounds() {
        let mut sim = Simulation::with_population(SimConfig::default());
        for _ in 0..600 {
            sim.step(DT);
            for p in sim.particles() {
                assert!(p.pos.x >= 0.0 && p.pos.x <= 1280.0, "x out of bounds: {}", p.pos.x);
                assert!(p.pos.y >= 0.0 && p.pos.y <= 720.0, "y out of bounds: {}", p.pos.y);
            }
        }
    }

    #[test]
    fn resize_shrinks_bounds() {
        let mut sim = Simulation::with_population(SimConfig::default());
        sim.push_input(InputEvent::Resize { width: 400.0, height: 300.0 });
        sim.step(DT);
        for p in sim.particles() {
            assert!(p.pos.x <= 400.0 && p.pos.y <= 300.0);
        }
    }

    #[test]
    fn proximity_reaction_is_atomic() {
        let mut sim = Simulation::new(quiet_config());
        sim.spawn(ElementKind::Carbon, Vec2::new(100.0, 100.0), Vec2::ZERO);
        sim.spawn(ElementKind::Oxygen, Vec2::new(130.0, 100.0), Vec2::ZERO);
        sim.spawn(ElementKind::Oxygen, Vec2::new(100.0, 130.0), Vec2::ZERO);
        sim.spawn(ElementKind::Nitrogen, Vec2::new(900.0, 600.0), Vec2::ZERO);
        let before = sim.particles().len();

        assert_eq!(sim.evaluate_reactions(), Some(Product::CarbonDioxide));

        assert_eq!(sim.particles().len(), before - 3 + 1);
        assert_eq!(count(&sim, ElementKind::Carbon), 0);
        assert_eq!(count(&sim, ElementKind::Oxygen), 0);
        assert_eq!(sim.explosions().len(), 1);
        assert_eq!(sim.events()[0].kind, event_kind::REACTION);

        let molecule = sim.particles().last().unwrap();
        assert_eq!(molecule.species, Species::Synthesized(Molecule::CARBON_DIOXIDE));
        assert!(molecule.active);
        assert!((molecule.pos - Vec2::new(110.0, 110.0)).length() < 1e-3);

        let fragments = sim.explosions()[0].fragments.len();
        let mut ticks = 0;
        while !sim.explosions().is_empty() {
            sim.tick();
            ticks += 1;
            assert!(ticks <= 200, "explosion never resolved");
        }
        assert_eq!(sim.particles().len(), before - 3 + 1 + fragments);
    }

    #[test]
    fn forced_reaction_example() {
        let mut sim = Simulation::new(quiet_config());
        sim.spawn(ElementKind::Carbon, Vec2::new(10.0, 10.0), Vec2::ZERO);
        sim.spawn(ElementKind::Oxygen, Vec2::new(15.0, 10.0), Vec2::ZERO);
        sim.spawn(ElementKind::Oxygen, Vec2::new(20.0, 10.0), Vec2::ZERO);

        assert_eq!(sim.force_reaction_at(Vec2::new(15.0, 10.0)), Some(Product::CarbonDioxide));

        assert_eq!(sim.particles().len(), 1);
        assert_eq!(sim.particles()[0].species.label(), "CO₂");
        assert_eq!(sim.particles()[0].pos, Vec2::new(15.0, 10.0));
        assert_eq!(sim.explosions().len(), 1);
        let fragments = sim.explosions()[0].fragments.len();
        assert!((7..=12).contains(&fragments));
        assert_eq!(sim.explosions()[0].radius, 10.0);
    }

    #[test]
    fn forced_reaction_without_reagents_changes_nothing() {
        let mut sim = Simulation::new(quiet_config());
        sim.spawn(ElementKind::Carbon, Vec2::new(10.0, 10.0), Vec2::ZERO);
        sim.spawn(ElementKind::Oxygen, Vec2::new(15.0, 10.0), Vec2::ZERO);

        assert_eq!(sim.force_reaction_at(Vec2::new(15.0, 10.0)), None);
        assert_eq!(sim.particles().len(), 2);
        assert!(sim.explosions().is_empty());
    }

    #[test]
    fn click_on_empty_space_forces_reaction() {
        let mut sim = Simulation::new(quiet_config());
        sim.spawn(ElementKind::Hydrogen, Vec2::new(540.0, 500.0), Vec2::ZERO);
        sim.spawn(ElementKind::Oxygen, Vec2::new(500.0, 540.0), Vec2::ZERO);
        sim.spawn(ElementKind::Hydrogen, Vec2::new(460.0, 500.0), Vec2::ZERO);

        sim.push_input(InputEvent::PointerDown { x: 500.0, y: 500.0, on_control: false });
        assert_eq!(sim.step(DT), 1);

        assert_eq!(sim.particles().len(), 1);
        assert_eq!(sim.particles()[0].species.label(), "H₂O");
        let reaction = sim.events().iter().find(|e| e.kind == event_kind::REACTION).unwrap();
        assert_eq!(reaction.a, Product::Water.code());
        assert_eq!((reaction.b, reaction.c), (500.0, 500.0));
    }

    #[test]
    fn drag_pins_then_release_sets_velocity() {
        let mut sim = Simulation::new(quiet_config());
        let id = sim.spawn(ElementKind::Copper, Vec2::new(200.0, 200.0), Vec2::new(0.05, 0.05));

        sim.push_input(InputEvent::PointerDown { x: 205.0, y: 200.0, on_control: false });
        sim.push_input(InputEvent::PointerMove { x: 300.0, y: 310.0 });
        sim.step(DT);

        assert_eq!(sim.held(), Some(id));
        let p = sim.particle(id).unwrap();
        assert_eq!(p.pos, Vec2::new(300.0, 310.0));
        assert_eq!(p.vel, Vec2::ZERO);
        assert!(p.active);
        assert!(sim.events().iter().any(|e| e.kind == event_kind::DRAG_STARTED));

        sim.push_input(InputEvent::PointerUp { x: 300.0, y: 310.0 });
        sim.step(DT);

        assert_eq!(sim.held(), None);
        let v = sim.particle(id).unwrap().vel;
        assert!(v.x >= -0.25 && v.x < 0.25);
        assert!(v.y >= -0.25 && v.y < 0.25);
        assert!(sim.events().iter().any(|e| e.kind == event_kind::DRAG_RELEASED));
    }

    #[test]
    fn mobile_ignores_presses() {
        let config = SimConfig {
            mobile: true,
            ..quiet_config()
        };
        let mut sim = Simulation::new(config);
        sim.spawn(ElementKind::Carbon, Vec2::new(100.0, 100.0), Vec2::ZERO);
        sim.spawn(ElementKind::Oxygen, Vec2::new(140.0, 100.0), Vec2::ZERO);
        sim.spawn(ElementKind::Oxygen, Vec2::new(100.0, 140.0), Vec2::ZERO);

        sim.push_input(InputEvent::PointerDown { x: 100.0, y: 100.0, on_control: false });
        sim.push_input(InputEvent::PointerDown { x: 500.0, y: 500.0, on_control: false });
        sim.step(DT);

        assert_eq!(sim.held(), None);
        assert_eq!(sim.particles().len(), 3);
    }

    #[test]
    fn presses_on_page_controls_are_ignored() {
        let mut sim = Simulation::new(quiet_config());
        sim.spawn(ElementKind::Carbon, Vec2::new(100.0, 100.0), Vec2::ZERO);

        sim.push_input(InputEvent::PointerDown { x: 100.0, y: 100.0, on_control: true });
        sim.step(DT);

        assert_eq!(sim.held(), None);
    }

    #[test]
    fn consumed_particle_ends_drag() {
        let mut sim = Simulation::new(quiet_config());
        sim.spawn(ElementKind::Carbon, Vec2::new(100.0, 100.0), Vec2::ZERO);
        sim.spawn(ElementKind::Oxygen, Vec2::new(130.0, 100.0), Vec2::ZERO);
        sim.spawn(ElementKind::Oxygen, Vec2::new(100.0, 130.0), Vec2::ZERO);

        sim.push_input(InputEvent::PointerDown { x: 100.0, y: 100.0, on_control: false });
        sim.step(DT);
        assert!(sim.held().is_some());

        assert_eq!(sim.evaluate_reactions(), Some(Product::CarbonDioxide));
        assert_eq!(sim.held(), None);
    }

    #[test]
    fn content_refresh_fires_once_per_second() {
        let mut sim = Simulation::new(quiet_config());
        let mut refreshes = 0;
        for _ in 0..60 {
            sim.step(DT);
            refreshes += sim
                .events()
                .iter()
                .filter(|e| e.kind == event_kind::CONTENT_REFRESH)
                .count();
        }
        assert_eq!(refreshes, 1);
        assert_eq!(sim.tick_count(), 60);
    }

    #[test]
    fn periodic_reactions_run_on_their_interval() {
        let mut sim = Simulation::new(SimConfig::default());
        sim.spawn(ElementKind::Hydrogen, Vec2::new(100.0, 100.0), Vec2::ZERO);
        sim.spawn(ElementKind::Oxygen, Vec2::new(140.0, 100.0), Vec2::ZERO);
        sim.spawn(ElementKind::Hydrogen, Vec2::new(180.0, 100.0), Vec2::ZERO);

        for _ in 0..19 {
            sim.tick();
        }
        assert!(sim.explosions().is_empty());

        sim.tick();
        assert_eq!(sim.explosions().len(), 1);
        assert_eq!(sim.particles()[0].species.label(), "H₂O");
    }

    #[test]
    fn pointer_leave_clears_links() {
        let mut sim = Simulation::new(quiet_config());
        sim.spawn(ElementKind::Carbon, Vec2::new(100.0, 100.0), Vec2::ZERO);
        sim.spawn(ElementKind::Hydrogen, Vec2::new(120.0, 100.0), Vec2::ZERO);

        sim.push_input(InputEvent::PointerMove { x: 100.0, y: 100.0 });
        sim.step(DT);
        assert_eq!(sim.build_frame().line_count(), 1);

        sim.push_input(InputEvent::PointerLeave);
        sim.step(DT);
        assert_eq!(sim.pointer(), None);
        assert_eq!(sim.build_frame().line_count(), 0);
        assert_eq!(sim.frame().disc_count(), 2);
    }
}
