// Field state: initial counts, burst eviction, resets and the properties that
// must hold for every preset.

use field_core::config::{PointerActivity, Spawn, ValueRange};
use field_core::{ConfigError, CountRule, FieldState, Variant, Viewport};
use glam::Vec3;

fn hd() -> Viewport {
    Viewport::new(1920.0, 1080.0, 1.0)
}

#[test]
fn density_count_is_capped() {
    // min(floor(1920 / 8), 200) = 200
    let field = FieldState::new(Variant::Aurora.config(), hd(), 1).unwrap();
    assert_eq!(field.len(), 200);
}

#[test]
fn burst_eviction_keeps_exactly_the_cap() {
    let config = Variant::Aurora.config();
    assert_eq!(config.max_particles, 300);
    assert_eq!(config.burst.unwrap().per_event, 3);

    let mut field = FieldState::new(config, hd(), 7).unwrap();
    for i in 0..150 {
        field.pointer_move(i as f32 + 0.5, 10.5, i as f64);
        assert!(field.len() <= 300);
    }
    assert_eq!(field.len(), 300);

    // 200 initial + 450 burst particles, the oldest 350 evicted: the
    // survivors start at the 51st move and end at the last one.
    let first = field.particles().first().unwrap().position;
    let last = field.particles().last().unwrap().position;
    assert_eq!(first.x, 50.5);
    assert_eq!(last.x, 149.5);
    assert!(field.particles().iter().all(|p| p.position.y == 10.5));
}

#[test]
fn inject_burst_reports_evictions() {
    let mut config = Variant::Ambient.config();
    config.count = CountRule::Fixed(10);
    config.max_particles = 11;
    let mut field = FieldState::new(config, hd(), 3).unwrap();
    assert_eq!(field.len(), 10);
    assert_eq!(field.inject_burst(glam::Vec3::new(5.0, 5.0, 0.0)), 1);
    assert_eq!(field.len(), 11);
}

#[test]
fn count_never_exceeds_cap_for_any_variant() {
    for variant in Variant::ALL {
        let mut field = FieldState::new(variant.config(), hd(), 11).unwrap();
        let cap = field.config().max_particles;
        for frame in 0..60 {
            let t = frame as f64 * 16.0;
            field.pointer_move(300.0 + frame as f32 * 7.0, 200.0, t);
            field.advance(t);
            assert!(field.len() <= cap, "{variant}: {} > {cap}", field.len());
        }
        field.reset(Viewport::new(640.0, 480.0, 2.0));
        assert!(field.len() <= cap);
    }
}

#[test]
fn positions_stay_in_bounds_for_any_variant() {
    for variant in Variant::ALL {
        let mut field = FieldState::new(variant.config(), hd(), 5).unwrap();
        for frame in 0..120 {
            let t = frame as f64 * 16.0;
            if frame % 3 == 0 {
                field.pointer_move(960.0 + frame as f32, 540.0, t);
            }
            field.advance(t);
            let bounds = *field.bounds();
            for p in field.particles() {
                assert!(bounds.contains(p.position), "{variant}: {:?}", p.position);
                assert!((0.0..=1.0).contains(&p.opacity()));
            }
        }
    }
}

#[test]
fn reset_rederives_count_from_viewport() {
    let mut field = FieldState::new(Variant::Ambient.config(), hd(), 2).unwrap();
    assert_eq!(field.len(), 192);
    field.reset(Viewport::new(800.0, 600.0, 1.0));
    assert_eq!(field.len(), 80);
    assert!(field
        .particles()
        .iter()
        .all(|p| p.position.x <= 800.0 && p.position.y <= 600.0));
}

#[test]
fn zero_sized_viewport_is_harmless() {
    let mut field = FieldState::new(Variant::Ambient.config(), Viewport::new(0.0, 0.0, 1.0), 2).unwrap();
    assert!(field.is_empty());
    field.advance(0.0);
    field.pointer_move(10.0, 10.0, 1.0);
    field.advance(16.0);
    assert!(field.len() <= 2);
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = Variant::Sparse.config();
    config.drag = 1.5;
    assert_eq!(
        FieldState::new(config, hd(), 0).err(),
        Some(ConfigError::InvalidDrag(1.5))
    );
}

#[test]
fn same_seed_same_field() {
    let a = FieldState::new(Variant::Interactive.config(), hd(), 99).unwrap();
    let b = FieldState::new(Variant::Interactive.config(), hd(), 99).unwrap();
    let pa: Vec<_> = a.particles().iter().map(|p| p.position).collect();
    let pb: Vec<_> = b.particles().iter().map(|p| p.position).collect();
    assert_eq!(pa, pb);
}

#[test]
fn two_particles_fifty_apart_share_one_half_strength_edge() {
    let mut config = Variant::Sparse.config();
    config.count = CountRule::Fixed(2);
    config.speed = ValueRange::fixed(0.0);
    config.pointer = None;
    config.connections = Some(field_core::config::Connections {
        threshold: 100.0,
        every_n_frames: 1,
    });
    let mut field = FieldState::new(config, hd(), 4).unwrap();
    field.particles_mut()[0].position = glam::Vec3::new(100.0, 100.0, 0.0);
    field.particles_mut()[1].position = glam::Vec3::new(150.0, 100.0, 0.0);
    field.advance(0.0);

    let edges = field.edges();
    assert_eq!(edges.len(), 1);
    assert_eq!((edges[0].a, edges[0].b), (0, 1));
    assert!((edges[0].strength - 0.5).abs() < 1e-6);
}

#[test]
fn elapsed_time_and_hue_follow_the_clock() {
    let mut field = FieldState::new(Variant::Aurora.config(), hd(), 1).unwrap();
    field.advance(1000.0);
    assert_eq!(field.elapsed_sec(), 0.0);
    field.advance(3000.0);
    assert!((field.elapsed_sec() - 2.0).abs() < 1e-6);
    assert!((field.hue() - 12.0).abs() < 1e-4);
    assert_eq!(field.frame(), 2);
}

#[test]
fn sticky_pointer_keeps_pushing_while_the_cursor_hovers() {
    assert_eq!(
        Variant::Constellation.config().pointer_activity,
        PointerActivity::Sticky
    );
    let vp = Viewport::new(1280.0, 720.0, 1.0);
    // speed of one particle after frames 6 and 19 of a single move at the centre
    let speeds = |activity| {
        let mut config = Variant::Constellation.config();
        config.pointer_activity = activity;
        let mut field = FieldState::new(config, vp, 1).unwrap();
        for p in field.particles_mut() {
            p.position = Vec3::ZERO;
            p.velocity = Vec3::ZERO;
        }
        field.pointer_move(640.0, 360.0, 0.0);
        let mut seen = Vec::new();
        for frame in 0..20 {
            field.advance(frame as f64 * 16.0);
            seen.push(field.particles()[0].velocity.length());
        }
        (seen[6], seen[19])
    };

    let (early, late) = speeds(PointerActivity::Sticky);
    assert!(early > 0.05, "{early}");
    assert!(late > early * 2.0, "{early} -> {late}");

    // the idle window drops the push after 100 ms and drag takes over
    let (early, late) = speeds(PointerActivity::WhileMoving);
    assert!(late < early, "{early} -> {late}");
}

#[test]
fn shell_spawns_stay_off_the_volume_faces() {
    for variant in [Variant::Constellation, Variant::ParticleNetwork] {
        let field = FieldState::new(variant.config(), hd(), 8).unwrap();
        let limit = field.bounds().max.x - 1e-3;
        for p in field.particles() {
            assert!(
                p.position.abs().max_element() < limit,
                "{variant}: {:?}",
                p.position
            );
        }
    }

    // a shell wider than the volume is shrunk, not squashed into the corners
    let mut config = Variant::Constellation.config();
    config.spawn = Spawn::Shell {
        inner: 60.0,
        outer: 90.0,
        z_squash: 1.0,
    };
    let field = FieldState::new(config, hd(), 8).unwrap();
    assert!(field.particles().iter().all(|p| p.position.length() <= 40.0 + 1e-3));
}

#[test]
fn particle_network_is_a_static_shell_connected_once() {
    let mut field = FieldState::new(Variant::ParticleNetwork.config(), hd(), 3).unwrap();
    assert_eq!(field.len(), 200);
    for p in field.particles() {
        assert!(p.position.length() <= 40.0 + 1e-3);
        // z = r cos(phi) (rand - 0.5) keeps the shell flattened
        assert!(p.position.z.abs() <= 20.0 + 1e-3);
        assert_eq!(p.velocity, Vec3::ZERO);
        assert!((0.5..=2.5).contains(&p.size));
        assert!((p.opacity() - 0.8).abs() < 1e-6);
    }

    let edges = field.edges().to_vec();
    assert!(!edges.is_empty());
    for e in &edges {
        let d = field.positions()[e.a].distance(field.positions()[e.b]);
        assert!(d < 10.0, "{d}");
    }

    let before = field.positions().to_vec();
    for frame in 0..120 {
        field.pointer_move(100.0, 100.0, frame as f64 * 16.0);
        field.advance(frame as f64 * 16.0);
    }
    assert_eq!(field.positions(), &before[..]);
    assert_eq!(field.edges(), &edges[..]);
}
