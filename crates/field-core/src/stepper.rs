//! Per-frame particle integration.

use glam::{Vec2, Vec3};

use crate::config::{PointerInfluence, PointerMode, ProximityGlow};
use crate::input::ray_sphere;
use crate::particle::{BoundaryPolicy, Bounds, Particle};

/// Pointer as the stepper sees it for one frame.
#[derive(Clone, Copy, Debug)]
pub enum PointerSample {
    /// Screen-space pointer position in field units.
    Point(Vec3),
    /// 3D pick ray (origin, normalised direction) from the camera eye.
    Ray { origin: Vec3, dir: Vec3 },
}

/// Inputs to one [`step`] call.
#[derive(Clone, Copy, Debug)]
pub struct StepParams {
    pub bounds: Bounds,
    pub boundary: BoundaryPolicy,
    pub drag: f32,
    /// Active pointer, or `None` when idle.
    pub pointer: Option<PointerSample>,
    pub influence: Option<PointerInfluence>,
    pub proximity_glow: Option<ProximityGlow>,
    /// Pointer velocity already scaled by the drift fraction.
    pub drift: Vec2,
}

/// Advance every particle by one frame.
///
/// Order per particle: integrate, enforce bounds, pointer force into
/// velocity, then drag over the combined velocity.
pub fn step(particles: &mut [Particle], params: &StepParams) {
    let drift = params.drift.extend(0.0);
    let drag = params.drag.clamp(0.0, 1.0);
    for p in particles.iter_mut() {
        p.position += p.velocity + drift;
        params
            .bounds
            .enforce(params.boundary, &mut p.position, &mut p.velocity);
        if let Some(pointer) = params.pointer {
            apply_pointer_effects(p, pointer, params);
        }
        p.velocity *= drag;
    }
}

fn apply_pointer_effects(p: &mut Particle, pointer: PointerSample, params: &StepParams) {
    let Some(influence) = &params.influence else {
        return;
    };
    apply_pointer(p, pointer, influence);
    if let (Some(glow), PointerSample::Point(at)) = (&params.proximity_glow, pointer) {
        let near = p.position.distance(at) < influence.radius;
        let o = p.opacity();
        if near {
            p.set_opacity((o + glow.rise).min(glow.max.max(o)));
        } else {
            p.set_opacity((o - glow.fall).max(glow.min.min(o)));
        }
    }
}

fn apply_pointer(p: &mut Particle, pointer: PointerSample, influence: &PointerInfluence) {
    match (pointer, influence.mode) {
        (PointerSample::Point(at), PointerMode::Repel | PointerMode::Attract) => {
            let offset = p.position - at;
            let d = offset.length();
            if d >= influence.radius || d <= f32::EPSILON {
                return;
            }
            let force = (1.0 - d / influence.radius) * influence.strength;
            let away = offset / d;
            p.velocity += match influence.mode {
                PointerMode::Attract => -away * force,
                _ => away * force,
            };
        }
        (PointerSample::Ray { origin, dir }, PointerMode::RayPush) => {
            let hit_radius = p.size.max(f32::EPSILON) * influence.radius;
            if ray_sphere(origin, dir, p.position, hit_radius).is_some() {
                let push = (p.position - origin).normalize_or_zero();
                p.velocity += push * influence.strength;
            }
        }
        _ => {}
    }
}

/// Speed of the fastest particle; handy for diagnostics and tests.
pub fn max_speed(particles: &[Particle]) -> f32 {
    particles.iter().map(Particle::speed).fold(0.0, f32::max)
}
