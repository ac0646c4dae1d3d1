// Host-side tests for the per-frame stepper and boundary policies.

use field_core::config::{PointerInfluence, PointerMode, ProximityGlow};
use field_core::stepper::{max_speed, step, PointerSample, StepParams};
use field_core::{BoundaryPolicy, Bounds, Particle, ParticleColor};
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn particle(position: Vec3, velocity: Vec3) -> Particle {
    Particle::new(position, velocity, 2.0, ParticleColor::default(), 0.5)
}

fn params(bounds: Bounds, boundary: BoundaryPolicy, drag: f32) -> StepParams {
    StepParams {
        bounds,
        boundary,
        drag,
        pointer: None,
        influence: None,
        proximity_glow: None,
        drift: Vec2::ZERO,
    }
}

fn random_particles(rng: &mut StdRng, n: usize, w: f32, h: f32, speed: f32) -> Vec<Particle> {
    (0..n)
        .map(|_| {
            particle(
                Vec3::new(rng.gen::<f32>() * w, rng.gen::<f32>() * h, 0.0),
                Vec3::new(rng.gen_range(-speed..speed), rng.gen_range(-speed..speed), 0.0),
            )
        })
        .collect()
}

#[test]
fn drag_never_increases_speed_without_pointer() {
    let mut rng = StdRng::seed_from_u64(42);
    for boundary in [BoundaryPolicy::Wrap, BoundaryPolicy::Bounce] {
        let mut ps = random_particles(&mut rng, 200, 400.0, 300.0, 25.0);
        let p = params(Bounds::screen(400.0, 300.0), boundary, 0.98);
        for _ in 0..200 {
            let before: Vec<f32> = ps.iter().map(Particle::speed).collect();
            step(&mut ps, &p);
            for (b, a) in before.iter().zip(ps.iter().map(Particle::speed)) {
                assert!(a <= *b + 1e-5, "{a} > {b}");
            }
        }
    }
}

#[test]
fn drag_of_one_preserves_speed() {
    let mut ps = vec![particle(Vec3::new(10.0, 10.0, 0.0), Vec3::new(1.0, -2.0, 0.0))];
    let p = params(Bounds::screen(100.0, 100.0), BoundaryPolicy::Bounce, 1.0);
    let s0 = max_speed(&ps);
    for _ in 0..500 {
        step(&mut ps, &p);
    }
    assert!((max_speed(&ps) - s0).abs() < 1e-4);
}

#[test]
fn boundaries_hold_for_arbitrary_inputs() {
    let bounds = Bounds::screen(640.0, 480.0);
    let wild = [
        Vec3::new(-1.0e6, 5.0, 0.0),
        Vec3::new(1.0e6, -1.0e6, 0.0),
        Vec3::new(f32::NAN, 10.0, 0.0),
        Vec3::new(f32::INFINITY, f32::NEG_INFINITY, 0.0),
        Vec3::new(640.0, 480.0, 0.0),
        Vec3::new(0.0, 0.0, 3.0),
    ];
    for boundary in [BoundaryPolicy::Wrap, BoundaryPolicy::Bounce] {
        for &start in &wild {
            for &vel in &wild {
                let mut ps = vec![particle(start, vel)];
                step(&mut ps, &params(bounds, boundary, 0.99));
                assert!(bounds.contains(ps[0].position), "{boundary:?} {start:?} {vel:?}");
            }
        }
    }
}

#[test]
fn wrap_teleports_to_opposite_edge() {
    let bounds = Bounds::screen(100.0, 100.0);
    let mut ps = vec![particle(Vec3::new(99.5, 50.0, 0.0), Vec3::new(1.0, 0.0, 0.0))];
    step(&mut ps, &params(bounds, BoundaryPolicy::Wrap, 1.0));
    assert_eq!(ps[0].position.x, 0.0);
    assert_eq!(ps[0].velocity.x, 1.0);
}

#[test]
fn bounce_reflects_velocity_inward() {
    let bounds = Bounds::screen(100.0, 100.0);
    let mut ps = vec![particle(Vec3::new(0.5, 50.0, 0.0), Vec3::new(-2.0, 0.0, 0.0))];
    step(&mut ps, &params(bounds, BoundaryPolicy::Bounce, 1.0));
    assert_eq!(ps[0].position.x, 0.0);
    assert_eq!(ps[0].velocity.x, 2.0);
}

#[test]
fn repel_pushes_away_and_attract_pulls_in() {
    let bounds = Bounds::screen(400.0, 400.0);
    for (mode, sign) in [(PointerMode::Repel, 1.0), (PointerMode::Attract, -1.0)] {
        let mut ps = vec![particle(Vec3::new(140.0, 100.0, 0.0), Vec3::ZERO)];
        let mut p = params(bounds, BoundaryPolicy::Wrap, 1.0);
        p.pointer = Some(PointerSample::Point(Vec3::new(100.0, 100.0, 0.0)));
        p.influence = Some(PointerInfluence {
            radius: 80.0,
            strength: 1.0,
            mode,
        });
        step(&mut ps, &p);
        // (1 - 40/80) * 1.0
        assert!((ps[0].velocity.x - 0.5 * sign).abs() < 1e-6);
        assert_eq!(ps[0].velocity.y, 0.0);
        // force lands in velocity, not position
        assert_eq!(ps[0].position.x, 140.0);
    }
}

#[test]
fn pointer_outside_radius_has_no_effect() {
    let mut ps = vec![particle(Vec3::new(300.0, 100.0, 0.0), Vec3::ZERO)];
    let mut p = params(Bounds::screen(400.0, 400.0), BoundaryPolicy::Wrap, 1.0);
    p.pointer = Some(PointerSample::Point(Vec3::new(100.0, 100.0, 0.0)));
    p.influence = Some(PointerInfluence {
        radius: 80.0,
        strength: 1.0,
        mode: PointerMode::Repel,
    });
    step(&mut ps, &p);
    assert_eq!(ps[0].velocity, Vec3::ZERO);
}

#[test]
fn drag_applies_to_the_pointer_force_of_the_same_frame() {
    let mut ps = vec![particle(Vec3::new(140.0, 100.0, 0.0), Vec3::ZERO)];
    let mut p = params(Bounds::screen(400.0, 400.0), BoundaryPolicy::Wrap, 0.5);
    p.pointer = Some(PointerSample::Point(Vec3::new(100.0, 100.0, 0.0)));
    p.influence = Some(PointerInfluence {
        radius: 80.0,
        strength: 1.0,
        mode: PointerMode::Repel,
    });
    step(&mut ps, &p);
    // force 0.5, then halved by drag
    assert!((ps[0].velocity.x - 0.25).abs() < 1e-6);

    // without a pointer drag still runs
    p.pointer = None;
    step(&mut ps, &p);
    assert!((ps[0].velocity.x - 0.125).abs() < 1e-6);
}

#[test]
fn proximity_glow_rises_near_and_falls_far() {
    let mut ps = vec![
        particle(Vec3::new(110.0, 100.0, 0.0), Vec3::ZERO),
        particle(Vec3::new(390.0, 390.0, 0.0), Vec3::ZERO),
    ];
    let mut p = params(Bounds::screen(400.0, 400.0), BoundaryPolicy::Wrap, 1.0);
    p.pointer = Some(PointerSample::Point(Vec3::new(100.0, 100.0, 0.0)));
    p.influence = Some(PointerInfluence {
        radius: 150.0,
        strength: 0.0001,
        mode: PointerMode::Repel,
    });
    p.proximity_glow = Some(ProximityGlow {
        rise: 0.01,
        fall: 0.005,
        min: 0.3,
        max: 0.9,
    });
    for _ in 0..200 {
        step(&mut ps, &p);
    }
    assert!((ps[0].opacity() - 0.9).abs() < 1e-5);
    assert!((ps[1].opacity() - 0.3).abs() < 1e-5);
}

#[test]
fn ray_push_moves_hit_particles_away_from_the_eye() {
    let mut ps = vec![
        particle(Vec3::ZERO, Vec3::ZERO),
        particle(Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO),
    ];
    let mut p = params(Bounds::cube(40.0), BoundaryPolicy::Wrap, 1.0);
    p.pointer = Some(PointerSample::Ray {
        origin: Vec3::new(0.0, 0.0, 30.0),
        dir: Vec3::NEG_Z,
    });
    p.influence = Some(PointerInfluence {
        radius: 1.0,
        strength: 0.01,
        mode: PointerMode::RayPush,
    });
    step(&mut ps, &p);
    assert!((ps[0].velocity - Vec3::new(0.0, 0.0, -0.01)).length() < 1e-6);
    assert_eq!(ps[1].velocity, Vec3::ZERO);
}

#[test]
fn pointer_drift_moves_positions_not_velocities() {
    let mut ps = vec![particle(Vec3::new(50.0, 50.0, 0.0), Vec3::ZERO)];
    let mut p = params(Bounds::screen(100.0, 100.0), BoundaryPolicy::Wrap, 0.99);
    p.drift = Vec2::new(2.0, -1.0);
    step(&mut ps, &p);
    assert_eq!(ps[0].position, Vec3::new(52.0, 49.0, 0.0));
    assert_eq!(ps[0].velocity, Vec3::ZERO);
}
