use std::str::FromStr;

use field_core::config::{parse_hex_color, ColorMode, PointerActivity, RendererKind};
use field_core::{BoundaryPolicy, ConfigError, CountRule, FieldConfig, Variant, Viewport};

#[test]
fn every_preset_validates() {
    for v in Variant::ALL {
        v.config().validate().unwrap_or_else(|e| panic!("{v}: {e}"));
    }
    FieldConfig::default().validate().unwrap();
}

#[test]
fn variant_names_round_trip_through_from_str() {
    for v in Variant::ALL {
        assert_eq!(Variant::from_str(v.name()), Ok(v));
        assert_eq!(v.to_string(), v.name());
    }
    assert_eq!("Point_Cloud".parse::<Variant>(), Ok(Variant::PointCloud));
    assert_eq!(" neuron ".parse::<Variant>(), Ok(Variant::Neuron));
    assert_eq!(
        "particle-network".parse::<Variant>(),
        Ok(Variant::ParticleNetwork)
    );
    assert_eq!(
        "plasma".parse::<Variant>(),
        Err(ConfigError::UnknownVariant("plasma".into()))
    );
}

#[test]
fn count_rules() {
    let hd = Viewport::new(1920.0, 1080.0, 1.0);
    let density = CountRule::Density {
        px_per_particle: 8.0,
        max: 200,
    };
    assert_eq!(density.count(&hd), 200);
    assert_eq!(density.count(&Viewport::new(800.0, 600.0, 1.0)), 100);
    assert_eq!(density.count(&Viewport::new(0.0, 0.0, 1.0)), 0);

    // floor(1920 / 100) * 5 = 95, capped at 50
    assert_eq!(Variant::Synapse.config().count.count(&hd), 50);
    assert_eq!(
        Variant::Synapse
            .config()
            .count
            .count(&Viewport::new(640.0, 480.0, 1.0)),
        30
    );
    assert_eq!(CountRule::Fixed(7).count(&hd), 7);
}

#[test]
fn overrides_apply_and_validate() {
    let config = Variant::Sparse
        .config()
        .with_overrides([
            ("particleCount", "40"),
            ("connectionDistance", "120"),
            ("drag", "0.95"),
            ("boundary", "bounce"),
            ("renderer", "webgpu"),
            ("palette", "#ff0000, #00ff00"),
            ("pointerActivity", "sticky"),
        ])
        .unwrap();
    assert_eq!(config.count, CountRule::Fixed(40));
    assert_eq!(config.connections.unwrap().threshold, 120.0);
    assert_eq!(config.drag, 0.95);
    assert_eq!(config.boundary, BoundaryPolicy::Bounce);
    assert_eq!(config.style.renderer, RendererKind::Gpu);
    assert_eq!(config.pointer_activity, PointerActivity::Sticky);
    match config.palette {
        ColorMode::Palette(colors) => {
            assert_eq!(colors, &[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]][..])
        }
        other => panic!("unexpected palette {other:?}"),
    }
}

#[test]
fn overrides_reject_bad_input() {
    let config = Variant::Ambient.config();
    assert_eq!(
        config.clone().with_overrides([("sparkle", "1")]).err(),
        Some(ConfigError::UnknownOption("sparkle".into()))
    );
    assert!(matches!(
        config.clone().with_overrides([("drag", "fast")]),
        Err(ConfigError::InvalidValue { .. })
    ));
    assert_eq!(
        config.clone().with_overrides([("drag", "2")]).err(),
        Some(ConfigError::InvalidDrag(2.0))
    );
    assert_eq!(
        config.clone().with_overrides([("maxParticles", "0")]).err(),
        Some(ConfigError::ZeroCapacity)
    );
    assert!(matches!(
        config.with_overrides([("maxParticles", "1000000")]),
        Err(ConfigError::CapacityTooLarge(..))
    ));
}

#[test]
fn bloom_override_can_disable() {
    let config = Variant::Constellation
        .config()
        .with_overrides([("bloom", "0")])
        .unwrap();
    assert!(config.style.bloom.is_none());
    let config = Variant::PointCloud
        .config()
        .with_overrides([("bloom", "2.5")])
        .unwrap();
    assert_eq!(config.style.bloom.unwrap().strength, 2.5);
}

#[test]
fn burst_and_network_are_exclusive() {
    let mut config = Variant::Neuron.config();
    config.burst = Variant::Aurora.config().burst;
    assert_eq!(config.validate(), Err(ConfigError::BurstWithNetwork));
}

#[test]
fn connection_interval_must_be_positive() {
    let mut config = Variant::Sparse.config();
    config.connections.as_mut().unwrap().every_n_frames = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NonPositive { .. })
    ));
}

#[test]
fn hex_colors() {
    assert_eq!(parse_hex_color("#ffffff"), Ok([1.0, 1.0, 1.0]));
    assert_eq!(parse_hex_color("000000"), Ok([0.0, 0.0, 0.0]));
    let c = parse_hex_color("#0ff0a0").unwrap();
    assert!((c[1] - 240.0 / 255.0).abs() < 1e-6);
    assert!(parse_hex_color("#fff").is_err());
    assert!(parse_hex_color("#gg0000").is_err());
    assert!(parse_hex_color("#ffé000").is_err());
}
