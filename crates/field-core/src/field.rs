//! The in-memory particle collection and its per-frame driver.

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::camera::FieldCamera;
use crate::config::{FieldConfig, PointerActivity, Spawn, World};
use crate::connector::{Connector, Edge};
use crate::cosmetic::hue_rotation;
use crate::error::ConfigError;
use crate::constants::MAX_STEER_STEP_SEC;
use crate::input::{pointer_ndc, PointerTracker};
use crate::network::Network;
use crate::particle::{Bounds, Particle};
use crate::stepper::{step, PointerSample, StepParams};
use crate::viewport::Viewport;

pub struct FieldState {
    config: FieldConfig,
    viewport: Viewport,
    bounds: Bounds,
    particles: Vec<Particle>,
    positions: Vec<Vec3>,
    connector: Option<Connector>,
    network: Option<Network>,
    pointer: PointerTracker,
    rng: StdRng,
    seed: u64,
    frame: u64,
    start_ms: Option<f64>,
    now_ms: f64,
    elapsed_sec: f32,
    hue: f32,
    steer: Vec2,
}

impl FieldState {
    pub fn new(config: FieldConfig, viewport: Viewport, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let connector = config
            .connections
            .map(|c| Connector::new(c.threshold, c.every_n_frames));
        let mut state = Self {
            bounds: bounds_for(&config.world, &viewport),
            config,
            viewport,
            particles: Vec::new(),
            positions: Vec::new(),
            connector,
            network: None,
            pointer: PointerTracker::default(),
            rng: StdRng::seed_from_u64(seed),
            seed,
            frame: 0,
            start_ms: None,
            now_ms: 0.0,
            elapsed_sec: 0.0,
            hue: 0.0,
            steer: Vec2::ZERO,
        };
        state.populate();
        Ok(state)
    }

    /// Discard every particle and rebuild for a new viewport.
    pub fn reset(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.bounds = bounds_for(&self.config.world, &viewport);
        self.pointer.clear();
        self.populate();
        log::debug!(
            "field reset to {}x{}: {} particles",
            viewport.width,
            viewport.height,
            self.particles.len()
        );
    }

    fn populate(&mut self) {
        let target = self
            .config
            .count
            .count(&self.viewport)
            .min(self.config.max_particles);
        self.particles.clear();
        for _ in 0..target {
            let p = self.spawn_particle();
            self.particles.push(p);
        }
        self.sync_positions();
        if let Some(c) = self.connector.as_mut() {
            c.recompute(&self.positions);
        }
        self.network = self
            .config
            .network
            .map(|n| Network::build(n, &self.positions, &mut self.rng));
    }

    fn spawn_particle(&mut self) -> Particle {
        let cfg = &self.config;
        let rng = &mut self.rng;
        let b = self.bounds;
        let mut position = match cfg.spawn {
            Spawn::Rect => uniform_in(&b, rng),
            Spawn::Cube { half } => Vec3::new(
                rng.gen_range(-1.0..=1.0) * half,
                rng.gen_range(-1.0..=1.0) * half,
                rng.gen_range(-1.0..=1.0) * half,
            ),
            Spawn::Shell {
                inner,
                outer,
                z_squash,
            } => {
                // keep the whole shell inside the volume
                let reach = b.max.min(-b.min).min_element().max(0.0);
                let outer = outer.min(reach);
                let inner = inner.min(outer);
                let theta = rng.gen::<f32>() * std::f32::consts::TAU;
                let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
                let r = inner + rng.gen::<f32>() * (outer - inner);
                Vec3::new(
                    r * phi.sin() * theta.cos(),
                    r * phi.sin() * theta.sin(),
                    r * phi.cos() * (rng.gen::<f32>() - 0.5) * z_squash,
                )
            }
        };
        position = position.clamp(b.min, b.max);

        let flat = matches!(cfg.world, World::Screen);
        let velocity = Vec3::new(
            cfg.speed.sample(rng),
            cfg.speed.sample(rng),
            if flat { 0.0 } else { cfg.speed.sample(rng) },
        );
        let x_fraction = x_fraction(&b, position.x);
        let color = cfg.palette.pick(rng, x_fraction);
        let size = cfg.size.sample(rng);
        let opacity = cfg.opacity.sample(rng);
        let randomness = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        Particle::new(position, velocity, size, color, opacity).with_randomness(randomness)
    }

    /// Input bridge entry for a pointer move in CSS pixels.
    pub fn pointer_move(&mut self, x: f32, y: f32, now_ms: f64) {
        self.pointer.record(x, y, now_ms);
        let at = Vec3::new(x, y, 0.0);
        if self.config.burst.is_some() {
            self.inject_burst(at);
        }
        if let Some(net) = self.network.as_mut() {
            if matches!(self.config.world, World::Screen) {
                net.activate_near(&self.positions, at, now_ms, &mut self.rng);
            }
        }
    }

    /// Append one burst at `at`, then evict the oldest particles until the
    /// collection fits its cap. Returns how many were evicted.
    pub fn inject_burst(&mut self, at: Vec3) -> usize {
        let Some(burst) = self.config.burst else {
            return 0;
        };
        let b = self.bounds;
        let at = at.clamp(b.min, b.max);
        let frac = x_fraction(&b, at.x);
        for _ in 0..burst.per_event {
            let velocity = Vec3::new(
                burst.speed.sample(&mut self.rng),
                burst.speed.sample(&mut self.rng),
                0.0,
            );
            let size = burst.size.sample(&mut self.rng);
            let opacity = burst.opacity.sample(&mut self.rng);
            let color = burst.palette.pick(&mut self.rng, frac);
            self.particles
                .push(Particle::new(at, velocity, size, color, opacity));
        }
        let excess = self.particles.len().saturating_sub(self.config.max_particles);
        if excess > 0 {
            self.particles.drain(..excess);
            if let Some(c) = self.connector.as_mut() {
                c.evict_front(excess);
            }
        }
        self.sync_positions();
        excess
    }

    /// Advance the simulation to `now_ms`: one stepper pass, throttled
    /// connections, network pulses, then the cosmetic clock.
    pub fn advance(&mut self, now_ms: f64) {
        let dt_sec = match self.start_ms {
            Some(_) => (((now_ms - self.now_ms).max(0.0) / 1000.0) as f32).min(MAX_STEER_STEP_SEC),
            None => 0.0,
        };
        let start = *self.start_ms.get_or_insert(now_ms);
        self.now_ms = now_ms;
        self.elapsed_sec = ((now_ms - start).max(0.0) / 1000.0) as f32;

        let active = match self.config.pointer_activity {
            PointerActivity::WhileMoving => self.pointer.is_active(now_ms),
            PointerActivity::Sticky => self.pointer.position().is_some(),
        };
        let pointer = if active { self.pointer_sample() } else { None };
        if active && self.config.motion.steer != 0.0 {
            if let Some(p) = self.pointer.position() {
                let ndc = pointer_ndc(p.x, p.y, &self.viewport);
                self.steer += Vec2::new(ndc.y, ndc.x) * self.config.motion.steer * dt_sec;
            }
        }
        let drift = match self.config.world {
            World::Screen => self.pointer.velocity() * self.config.pointer_drift,
            World::Volume { .. } => Vec2::ZERO,
        };
        let params = StepParams {
            bounds: self.bounds,
            boundary: self.config.boundary,
            drag: self.config.drag,
            pointer,
            influence: self.config.pointer,
            proximity_glow: self.config.proximity_glow,
            drift,
        };
        step(&mut self.particles, &params);
        self.pointer.decay();
        self.sync_positions();

        if let Some(c) = self.connector.as_mut() {
            c.update(self.frame, &self.positions);
        }
        if let Some(net) = self.network.as_mut() {
            net.update(now_ms, &mut self.rng);
        }
        self.hue = hue_rotation(self.elapsed_sec, self.config.style.hue_speed);
        self.frame += 1;
    }

    fn pointer_sample(&self) -> Option<PointerSample> {
        let p = self.pointer.position()?;
        Some(match self.config.world {
            World::Screen => PointerSample::Point(p.extend(0.0)),
            World::Volume { .. } => {
                let camera = FieldCamera::for_field(self, &self.viewport);
                let (origin, dir) = camera.screen_ray(p.x, p.y, &self.viewport);
                PointerSample::Ray { origin, dir }
            }
        })
    }

    fn sync_positions(&mut self) {
        self.positions.clear();
        self.positions
            .extend(self.particles.iter().map(|p| p.position));
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn edges(&self) -> &[Edge] {
        self.connector.as_ref().map_or(&[][..], |c| c.edges())
    }

    pub fn network(&self) -> Option<&Network> {
        self.network.as_ref()
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn elapsed_sec(&self) -> f32 {
        self.elapsed_sec
    }

    /// Rotation accumulated from pointer steering, radians around x and y.
    pub fn steer(&self) -> Vec2 {
        self.steer
    }

    /// Global hue offset in degrees.
    pub fn hue(&self) -> f32 {
        self.hue
    }
}

fn bounds_for(world: &World, viewport: &Viewport) -> Bounds {
    match *world {
        World::Screen => Bounds::screen(viewport.width, viewport.height),
        World::Volume { half_extent } => Bounds::cube(half_extent),
    }
}

fn uniform_in<R: Rng + ?Sized>(b: &Bounds, rng: &mut R) -> Vec3 {
    let s = b.size();
    b.min + Vec3::new(rng.gen::<f32>() * s.x, rng.gen::<f32>() * s.y, rng.gen::<f32>() * s.z)
}

#[inline]
fn x_fraction(b: &Bounds, x: f32) -> f32 {
    let w = b.size().x;
    if w > 0.0 {
        (x - b.min.x) / w
    } else {
        0.5
    }
}
