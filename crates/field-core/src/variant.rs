//! Named presets, one per decorative background.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;

use crate::config::{
    Bloom, Burst, ClearMode, ColorMode, Connections, EdgeColor, EdgeStyle, EdgeWidth,
    FieldConfig, GlowStyle, LinkColor, Motion, NetworkConfig, Orbit, PointerActivity,
    PointerInfluence, PointerMode, ProximityGlow, PulseMode, RenderStyle, RendererKind, Spawn, Topology, ValueRange,
    World,
};
use crate::constants::{
    CYAN_BAND, CYAN_PURPLE_BANDS, HUE_DEG_PER_SEC, HUE_LIGHTNESS, MAX_PULSES, NEON_PALETTE,
    NETWORK_PALETTE, NEURON_PALETTE, PULSE_PALETTE, VOLUME_SPRITE_SCALE,
};
use crate::error::ConfigError;
use crate::particle::BoundaryPolicy;
use crate::viewport::CountRule;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    Ambient,
    Sparse,
    Aurora,
    Interactive,
    Neuron,
    Synapse,
    PointCloud,
    Constellation,
    ParticleNetwork,
}

impl Variant {
    pub const ALL: [Variant; 9] = [
        Variant::Ambient,
        Variant::Sparse,
        Variant::Aurora,
        Variant::Interactive,
        Variant::Neuron,
        Variant::Synapse,
        Variant::PointCloud,
        Variant::Constellation,
        Variant::ParticleNetwork,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Ambient => "ambient",
            Variant::Sparse => "sparse",
            Variant::Aurora => "aurora",
            Variant::Interactive => "interactive",
            Variant::Neuron => "neuron",
            Variant::Synapse => "synapse",
            Variant::PointCloud => "point-cloud",
            Variant::Constellation => "constellation",
            Variant::ParticleNetwork => "particle-network",
        }
    }

    pub fn config(self) -> FieldConfig {
        match self {
            Variant::Ambient => ambient(),
            Variant::Sparse => sparse(),
            Variant::Aurora => aurora(),
            Variant::Interactive => interactive(),
            Variant::Neuron => neuron(),
            Variant::Synapse => synapse(),
            Variant::PointCloud => point_cloud(),
            Variant::Constellation => constellation(),
            Variant::ParticleNetwork => particle_network(),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace('_', "-");
        Variant::ALL
            .into_iter()
            .find(|v| v.name() == needle)
            .ok_or_else(|| ConfigError::UnknownVariant(s.to_string()))
    }
}

fn base() -> FieldConfig {
    FieldConfig {
        count: CountRule::Density {
            px_per_particle: 10.0,
            max: 200,
        },
        max_particles: 300,
        palette: ColorMode::Palette(&NEON_PALETTE),
        spawn: Spawn::Rect,
        world: World::Screen,
        speed: ValueRange::symmetric(0.25),
        size: ValueRange::new(1.0, 3.0),
        opacity: ValueRange::new(0.3, 0.8),
        drag: 0.99,
        boundary: BoundaryPolicy::Wrap,
        pointer: None,
        pointer_activity: PointerActivity::WhileMoving,
        pointer_drift: 0.0,
        proximity_glow: None,
        burst: None,
        connections: None,
        network: None,
        motion: Motion::default(),
        style: RenderStyle::default(),
    }
}

fn ambient() -> FieldConfig {
    FieldConfig {
        pointer_drift: 0.05,
        burst: Some(Burst {
            per_event: 2,
            speed: ValueRange::symmetric(1.0),
            size: ValueRange::new(1.0, 3.0),
            opacity: ValueRange::fixed(0.7),
            palette: ColorMode::Palette(&NEON_PALETTE),
        }),
        connections: Some(Connections {
            threshold: 100.0,
            every_n_frames: 1,
        }),
        style: RenderStyle {
            clear: ClearMode::Fade(0.05),
            edge: EdgeStyle {
                color: EdgeColor::Fixed([1.0, 1.0, 1.0]),
                alpha: 0.05,
                width: EdgeWidth::Fixed(0.5),
                fade: true,
            },
            ..RenderStyle::default()
        },
        ..base()
    }
}

fn sparse() -> FieldConfig {
    FieldConfig {
        count: CountRule::Density {
            px_per_particle: 20.0,
            max: 80,
        },
        max_particles: 80,
        speed: ValueRange::symmetric(0.15),
        size: ValueRange::new(0.5, 2.0),
        opacity: ValueRange::fixed(1.0),
        drag: 0.98,
        pointer: Some(PointerInfluence {
            radius: 80.0,
            strength: 80.0 / 1500.0,
            mode: PointerMode::Repel,
        }),
        connections: Some(Connections {
            threshold: 70.0,
            every_n_frames: 1,
        }),
        style: RenderStyle {
            clear: ClearMode::Fade(0.05),
            edge: EdgeStyle {
                color: EdgeColor::Fixed([1.0, 1.0, 1.0]),
                alpha: 0.03,
                width: EdgeWidth::Fixed(0.5),
                fade: true,
            },
            ..RenderStyle::default()
        },
        ..base()
    }
}

fn aurora() -> FieldConfig {
    FieldConfig {
        count: CountRule::Density {
            px_per_particle: 8.0,
            max: 200,
        },
        palette: ColorMode::HueBands {
            bands: &CYAN_PURPLE_BANDS,
            lightness: HUE_LIGHTNESS,
        },
        size: ValueRange::new(0.5, 2.5),
        pointer: Some(PointerInfluence {
            radius: 150.0,
            strength: 0.1,
            mode: PointerMode::Repel,
        }),
        proximity_glow: Some(ProximityGlow {
            rise: 0.01,
            fall: 0.005,
            min: 0.3,
            max: 0.9,
        }),
        burst: Some(Burst {
            per_event: 3,
            speed: ValueRange::symmetric(1.0),
            size: ValueRange::new(1.0, 3.0),
            opacity: ValueRange::fixed(0.8),
            palette: ColorMode::HueBands {
                bands: &CYAN_BAND,
                lightness: HUE_LIGHTNESS,
            },
        }),
        connections: Some(Connections {
            threshold: 100.0,
            every_n_frames: 1,
        }),
        style: RenderStyle {
            clear: ClearMode::Clear,
            glow: GlowStyle::ShadowBlur(15.0),
            edge: EdgeStyle {
                color: EdgeColor::Gradient,
                alpha: 0.5,
                width: EdgeWidth::MinSize(0.5),
                fade: true,
            },
            hue_speed: HUE_DEG_PER_SEC,
            ..RenderStyle::default()
        },
        ..base()
    }
}

fn interactive() -> FieldConfig {
    FieldConfig {
        count: CountRule::Fixed(100),
        max_particles: 100,
        palette: ColorMode::HorizontalHue {
            start: 180.0,
            span: 60.0,
            lightness: 0.5,
        },
        size: ValueRange::new(1.0, 6.0),
        opacity: ValueRange::fixed(1.0),
        drag: 0.98,
        boundary: BoundaryPolicy::Bounce,
        pointer: Some(PointerInfluence {
            radius: 200.0,
            strength: 0.5,
            mode: PointerMode::Repel,
        }),
        connections: Some(Connections {
            threshold: 100.0,
            every_n_frames: 1,
        }),
        style: RenderStyle {
            clear: ClearMode::Fade(0.05),
            glow: GlowStyle::Radial(3.0),
            edge: EdgeStyle {
                color: EdgeColor::Fixed([0.0, 1.0, 1.0]),
                alpha: 0.2,
                width: EdgeWidth::Strength(2.0),
                fade: true,
            },
            ..RenderStyle::default()
        },
        ..base()
    }
}

fn neuron() -> FieldConfig {
    FieldConfig {
        count: CountRule::Fixed(20),
        max_particles: 20,
        palette: ColorMode::Palette(&NEURON_PALETTE),
        speed: ValueRange::symmetric(0.1),
        size: ValueRange::new(2.0, 6.0),
        opacity: ValueRange::fixed(1.0),
        drag: 1.0,
        boundary: BoundaryPolicy::Bounce,
        network: Some(NetworkConfig {
            topology: Topology::RandomK { min: 2, max: 4 },
            pulse_mode: PulseMode::Looping,
            initial_pulse_probability: 0.3,
            pulse_speed: ValueRange::new(0.002, 0.007),
            pulse_size: ValueRange::fixed(2.0),
            pulse_palette: ColorMode::Palette(&PULSE_PALETTE),
            pulse_glow: 4.0,
            auto_activate_ms: None,
            active_ms: 2000.0,
            pointer_radius: None,
            node_pulse_speed: ValueRange::fixed(0.0),
            link_color: LinkColor::Fixed([1.0, 1.0, 1.0]),
            link_alpha: 0.2,
            link_alpha_active: 0.2,
            max_pulses: MAX_PULSES,
        }),
        style: RenderStyle {
            clear: ClearMode::Clear,
            glow: GlowStyle::Radial(3.0),
            ..RenderStyle::default()
        },
        ..base()
    }
}

fn synapse() -> FieldConfig {
    FieldConfig {
        count: CountRule::Stepped {
            step_px: 100.0,
            per_step: 5,
            max: 50,
        },
        max_particles: 50,
        palette: ColorMode::HueBands {
            bands: &CYAN_PURPLE_BANDS,
            lightness: HUE_LIGHTNESS,
        },
        speed: ValueRange::fixed(0.0),
        size: ValueRange::new(2.0, 5.0),
        opacity: ValueRange::fixed(0.5),
        drag: 1.0,
        network: Some(NetworkConfig {
            topology: Topology::NearestK { min: 2, max: 5 },
            pulse_mode: PulseMode::Cascade,
            initial_pulse_probability: 0.0,
            pulse_speed: ValueRange::new(0.01, 0.03),
            pulse_size: ValueRange::new(1.0, 3.0),
            pulse_palette: ColorMode::HueBands {
                bands: &CYAN_PURPLE_BANDS,
                lightness: HUE_LIGHTNESS,
            },
            pulse_glow: 0.0,
            auto_activate_ms: Some(2000.0),
            active_ms: 2000.0,
            pointer_radius: Some(100.0),
            node_pulse_speed: ValueRange::new(0.03, 0.06),
            link_color: LinkColor::NodeGradient,
            link_alpha: 0.1,
            link_alpha_active: 0.3,
            max_pulses: MAX_PULSES,
        }),
        style: RenderStyle {
            clear: ClearMode::Clear,
            glow: GlowStyle::ShadowBlur(10.0),
            hue_speed: HUE_DEG_PER_SEC,
            ..RenderStyle::default()
        },
        ..base()
    }
}

fn point_cloud() -> FieldConfig {
    FieldConfig {
        count: CountRule::Density {
            px_per_particle: 5.0,
            max: 2000,
        },
        max_particles: 2000,
        spawn: Spawn::Cube { half: 25.0 },
        world: World::Volume { half_extent: 25.0 },
        speed: ValueRange::fixed(0.0),
        size: ValueRange::new(0.5, 2.5),
        opacity: ValueRange::fixed(0.8),
        drag: 1.0,
        motion: Motion {
            drift_amount: 0.5,
            spin: Vec2::new(0.05, 0.03),
            steer: 0.0,
            orbit: None,
        },
        style: RenderStyle {
            renderer: RendererKind::Gpu,
            bloom: Some(Bloom::default()),
            sprite_scale: VOLUME_SPRITE_SCALE,
            ..RenderStyle::default()
        },
        ..base()
    }
}

fn constellation() -> FieldConfig {
    FieldConfig {
        count: CountRule::Fixed(150),
        max_particles: 150,
        palette: ColorMode::Palette(&NETWORK_PALETTE),
        spawn: Spawn::Shell {
            inner: 20.0,
            outer: 40.0,
            z_squash: 1.0,
        },
        world: World::Volume { half_extent: 40.0 },
        speed: ValueRange::symmetric(0.025),
        size: ValueRange::new(0.1, 0.4),
        opacity: ValueRange::fixed(0.8),
        drag: 0.99,
        pointer: Some(PointerInfluence {
            radius: 1.0,
            strength: 0.01,
            mode: PointerMode::RayPush,
        }),
        pointer_activity: PointerActivity::Sticky,
        connections: Some(Connections {
            threshold: 15.0,
            every_n_frames: 10,
        }),
        motion: Motion {
            drift_amount: 0.0,
            spin: Vec2::ZERO,
            steer: 0.0,
            orbit: Some(Orbit {
                radius: 5.0,
                speed: 0.1,
            }),
        },
        style: RenderStyle {
            renderer: RendererKind::Gpu,
            bloom: Some(Bloom {
                strength: 1.5,
                threshold: 0.85,
            }),
            edge: EdgeStyle {
                color: EdgeColor::Blend,
                alpha: 0.2,
                width: EdgeWidth::Fixed(1.0),
                fade: true,
            },
            ..RenderStyle::default()
        },
        ..base()
    }
}

fn particle_network() -> FieldConfig {
    FieldConfig {
        count: CountRule::Fixed(200),
        max_particles: 200,
        palette: ColorMode::Palette(&NETWORK_PALETTE),
        spawn: Spawn::Shell {
            inner: 25.0,
            outer: 40.0,
            z_squash: 1.0,
        },
        world: World::Volume { half_extent: 40.0 },
        speed: ValueRange::fixed(0.0),
        size: ValueRange::new(0.5, 2.5),
        opacity: ValueRange::fixed(0.8),
        drag: 1.0,
        pointer_activity: PointerActivity::Sticky,
        // Points never move in model space, so one pass is enough.
        connections: Some(Connections {
            threshold: 10.0,
            every_n_frames: u32::MAX,
        }),
        motion: Motion {
            drift_amount: 0.0,
            // 0.0005 and 0.001 rad per frame at 60 fps
            spin: Vec2::new(0.03, 0.06),
            steer: 0.03,
            orbit: None,
        },
        style: RenderStyle {
            renderer: RendererKind::Gpu,
            sprite_scale: VOLUME_SPRITE_SCALE,
            edge: EdgeStyle {
                color: EdgeColor::Blend,
                alpha: 0.3,
                width: EdgeWidth::Fixed(1.0),
                fade: false,
            },
            ..RenderStyle::default()
        },
        ..base()
    }
}
