//! Typed configuration surface for one particle field.
//!
//! A [`FieldConfig`] is plain data: presets in [`crate::variant`] build one,
//! hosts may tweak it through [`FieldConfig::apply_override`], and
//! [`FieldConfig::validate`] runs before any field is created.

use glam::Vec2;
use rand::Rng;

use crate::constants::{ABSOLUTE_MAX_PARTICLES, BLOOM_STRENGTH, BLOOM_THRESHOLD};
use crate::error::ConfigError;
use crate::particle::{BoundaryPolicy, ParticleColor};
use crate::viewport::CountRule;

/// Closed interval sampled uniformly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(v: f32) -> Self {
        Self { min: v, max: v }
    }

    /// Symmetric range `[-half, half]`.
    pub const fn symmetric(half: f32) -> Self {
        Self {
            min: -half,
            max: half,
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max <= self.min {
            return self.min;
        }
        self.min + rng.gen::<f32>() * (self.max - self.min)
    }

    #[inline]
    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }

    fn check(&self, field: &'static str) -> Result<(), ConfigError> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min > self.max {
            return Err(ConfigError::EmptyRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// How particle colours are chosen at spawn time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorMode {
    Palette(&'static [[f32; 3]]),
    /// Pick a band, then a hue uniformly inside it.
    HueBands {
        bands: &'static [(f32, f32)],
        lightness: f32,
    },
    /// Hue follows the horizontal spawn position.
    HorizontalHue {
        start: f32,
        span: f32,
        lightness: f32,
    },
}

impl ColorMode {
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R, x_fraction: f32) -> ParticleColor {
        match *self {
            ColorMode::Palette(colors) => {
                if colors.is_empty() {
                    return ParticleColor::default();
                }
                ParticleColor::Rgb(colors[rng.gen_range(0..colors.len())])
            }
            ColorMode::HueBands { bands, lightness } => {
                if bands.is_empty() {
                    return ParticleColor::default();
                }
                let (start, span) = bands[rng.gen_range(0..bands.len())];
                ParticleColor::Hue {
                    degrees: start + rng.gen::<f32>() * span,
                    lightness,
                }
            }
            ColorMode::HorizontalHue {
                start,
                span,
                lightness,
            } => ParticleColor::Hue {
                degrees: start + x_fraction.clamp(0.0, 1.0) * span,
                lightness,
            },
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            ColorMode::Palette(c) => c.is_empty(),
            ColorMode::HueBands { bands, .. } => bands.is_empty(),
            ColorMode::HorizontalHue { .. } => false,
        }
    }
}

/// Where particles are placed on (re)initialisation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Spawn {
    /// Uniform over the simulation bounds.
    Rect,
    /// Uniform inside `[-half, half]^3`.
    Cube { half: f32 },
    /// Spherical shell; z is multiplied by `(rand - 0.5) * z_squash`.
    Shell { inner: f32, outer: f32, z_squash: f32 },
}

/// Coordinate space of a field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum World {
    /// CSS pixels, `[0, width] x [0, height]`.
    Screen,
    /// World units, `[-half_extent, half_extent]^3`, viewed by a perspective camera.
    Volume { half_extent: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerMode {
    Repel,
    Attract,
    /// 3D: push particles hit by the pointer ray away from the camera.
    RayPush,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInfluence {
    pub radius: f32,
    pub strength: f32,
    pub mode: PointerMode,
}

/// How long the last pointer sample keeps acting on the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PointerActivity {
    /// Only inside the idle window after the latest move.
    #[default]
    WhileMoving,
    /// Every frame from the first move until the field resets.
    Sticky,
}

/// Opacity response to pointer proximity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProximityGlow {
    pub rise: f32,
    pub fall: f32,
    pub min: f32,
    pub max: f32,
}

/// Transient particles injected on every pointer move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Burst {
    pub per_event: usize,
    pub speed: ValueRange,
    pub size: ValueRange,
    pub opacity: ValueRange,
    pub palette: ColorMode,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connections {
    pub threshold: f32,
    pub every_n_frames: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    /// Distinct random targets per node.
    RandomK { min: usize, max: usize },
    /// Closest nodes by distance.
    NearestK { min: usize, max: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PulseMode {
    /// Restart at the source on arrival.
    Looping,
    /// Disappear on arrival and activate the target node.
    Cascade,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LinkColor {
    Fixed([f32; 3]),
    /// Gradient between the two node colours.
    NodeGradient,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NetworkConfig {
    pub topology: Topology,
    pub pulse_mode: PulseMode,
    /// Probability that a link starts with a pulse already travelling on it.
    pub initial_pulse_probability: f32,
    pub pulse_speed: ValueRange,
    pub pulse_size: ValueRange,
    pub pulse_palette: ColorMode,
    /// Glow radius of a pulse relative to its size.
    pub pulse_glow: f32,
    pub auto_activate_ms: Option<f64>,
    pub active_ms: f64,
    pub pointer_radius: Option<f32>,
    pub node_pulse_speed: ValueRange,
    pub link_color: LinkColor,
    pub link_alpha: f32,
    pub link_alpha_active: f32,
    pub max_pulses: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    pub radius: f32,
    /// Radians per second.
    pub speed: f32,
}

/// Motion applied outside the stepper: GPU drift, scene spin, camera orbit.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Motion {
    pub drift_amount: f32,
    /// Scene rotation in radians per second around x and y.
    pub spin: Vec2,
    /// Extra rotation in radians per second per unit of pointer NDC:
    /// pointer y steers the x axis, pointer x steers the y axis.
    pub steer: f32,
    pub orbit: Option<Orbit>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClearMode {
    Clear,
    /// Paint translucent black over the previous frame, leaving trails.
    Fade(f32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GlowStyle {
    None,
    /// Canvas shadow blur in CSS px.
    ShadowBlur(f32),
    /// Radial gradient out to `size * scale`.
    Radial(f32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeColor {
    Fixed([f32; 3]),
    /// Midpoint blend of both endpoint colours.
    Blend,
    /// Gradient from one endpoint colour to the other.
    Gradient,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeWidth {
    Fixed(f32),
    /// `strength * scale`
    Strength(f32),
    /// `min(size_a, size_b) * scale`
    MinSize(f32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
    pub color: EdgeColor,
    /// Alpha at zero distance; scaled by edge strength when `fade` is set.
    pub alpha: f32,
    pub width: EdgeWidth,
    pub fade: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bloom {
    pub strength: f32,
    pub threshold: f32,
}

impl Default for Bloom {
    fn default() -> Self {
        Self {
            strength: BLOOM_STRENGTH,
            threshold: BLOOM_THRESHOLD,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RendererKind {
    Raster,
    Gpu,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderStyle {
    pub clear: ClearMode,
    pub glow: GlowStyle,
    pub edge: EdgeStyle,
    /// Hue rotation speed in degrees per second; zero disables cycling.
    pub hue_speed: f32,
    pub bloom: Option<Bloom>,
    pub renderer: RendererKind,
    /// Multiplier from particle size to drawn radius.
    pub sprite_scale: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            clear: ClearMode::Clear,
            glow: GlowStyle::None,
            edge: EdgeStyle {
                color: EdgeColor::Fixed([1.0, 1.0, 1.0]),
                alpha: 0.2,
                width: EdgeWidth::Fixed(0.5),
                fade: true,
            },
            hue_speed: 0.0,
            bloom: None,
            renderer: RendererKind::Raster,
            sprite_scale: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub count: CountRule,
    pub max_particles: usize,
    pub palette: ColorMode,
    pub spawn: Spawn,
    pub world: World,
    pub speed: ValueRange,
    pub size: ValueRange,
    pub opacity: ValueRange,
    pub drag: f32,
    pub boundary: BoundaryPolicy,
    pub pointer: Option<PointerInfluence>,
    pub pointer_activity: PointerActivity,
    pub pointer_drift: f32,
    pub proximity_glow: Option<ProximityGlow>,
    pub burst: Option<Burst>,
    pub connections: Option<Connections>,
    pub network: Option<NetworkConfig>,
    pub motion: Motion,
    pub style: RenderStyle,
}

impl Default for FieldConfig {
    fn default() -> Self {
        crate::variant::Variant::Ambient.config()
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_particles == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.max_particles > ABSOLUTE_MAX_PARTICLES {
            return Err(ConfigError::CapacityTooLarge(
                self.max_particles,
                ABSOLUTE_MAX_PARTICLES,
            ));
        }
        if !(self.drag > 0.0 && self.drag <= 1.0) {
            return Err(ConfigError::InvalidDrag(self.drag));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        self.speed.check("speed")?;
        self.size.check("size")?;
        self.opacity.check("opacity")?;
        positive("size.min", self.size.min.max(f32::MIN_POSITIVE))?;
        positive("sprite_scale", self.style.sprite_scale)?;
        if let CountRule::Density { px_per_particle, .. } = self.count {
            positive("density", px_per_particle)?;
        }
        if let CountRule::Stepped { step_px, .. } = self.count {
            positive("density step", step_px)?;
        }
        if let World::Volume { half_extent } = self.world {
            positive("half_extent", half_extent)?;
        }
        if let Some(p) = &self.pointer {
            positive("pointer radius", p.radius)?;
            positive("pointer strength", p.strength)?;
        }
        if let Some(c) = &self.connections {
            positive("connection threshold", c.threshold)?;
            if c.every_n_frames == 0 {
                return Err(ConfigError::NonPositive {
                    field: "connection interval",
                    value: 0.0,
                });
            }
        }
        if let Some(b) = &self.burst {
            if self.network.is_some() {
                return Err(ConfigError::BurstWithNetwork);
            }
            if b.palette.is_empty() {
                return Err(ConfigError::EmptyPalette);
            }
            b.speed.check("burst speed")?;
            b.size.check("burst size")?;
            b.opacity.check("burst opacity")?;
        }
        if let Some(n) = &self.network {
            n.pulse_speed.check("pulse speed")?;
            n.pulse_size.check("pulse size")?;
            n.node_pulse_speed.check("node pulse speed")?;
            positive("active_ms", n.active_ms as f32)?;
            if let Some(r) = n.pointer_radius {
                positive("network pointer radius", r)?;
            }
        }
        Ok(())
    }

    /// Apply one string-keyed override, as supplied by a host page.
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let bad = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        let parse_f32 = || value.parse::<f32>().ok().filter(|v| v.is_finite()).ok_or_else(bad);
        let parse_usize = || value.parse::<usize>().map_err(|_| bad());
        match key {
            "particleCount" => self.count = CountRule::Fixed(parse_usize()?),
            "densityPx" => {
                let px = parse_f32()?;
                let max = match self.count {
                    CountRule::Density { max, .. } | CountRule::Stepped { max, .. } => max,
                    CountRule::Fixed(n) => n.max(self.max_particles),
                };
                self.count = CountRule::Density {
                    px_per_particle: px,
                    max,
                };
            }
            "maxParticles" => self.max_particles = parse_usize()?,
            "connectionDistance" => {
                let threshold = parse_f32()?;
                let every = self.connections.map(|c| c.every_n_frames).unwrap_or(1);
                self.connections = Some(Connections {
                    threshold,
                    every_n_frames: every,
                });
            }
            "connectEvery" => {
                let n = value.parse::<u32>().map_err(|_| bad())?;
                match self.connections.as_mut() {
                    Some(c) => c.every_n_frames = n,
                    None => return Err(bad()),
                }
            }
            "drag" => self.drag = parse_f32()?,
            "pointerRadius" => {
                let radius = parse_f32()?;
                match self.pointer.as_mut() {
                    Some(p) => p.radius = radius,
                    None => {
                        self.pointer = Some(PointerInfluence {
                            radius,
                            strength: 0.1,
                            mode: PointerMode::Repel,
                        })
                    }
                }
            }
            "pointerStrength" => {
                let strength = parse_f32()?;
                match self.pointer.as_mut() {
                    Some(p) => p.strength = strength,
                    None => return Err(bad()),
                }
            }
            "pointerActivity" => {
                self.pointer_activity = match value {
                    "moving" => PointerActivity::WhileMoving,
                    "sticky" => PointerActivity::Sticky,
                    _ => return Err(bad()),
                }
            }
            "boundary" => {
                self.boundary = match value {
                    "wrap" => BoundaryPolicy::Wrap,
                    "bounce" => BoundaryPolicy::Bounce,
                    _ => return Err(bad()),
                }
            }
            "palette" => {
                let colors = value
                    .split(',')
                    .map(|s| parse_hex_color(s.trim()))
                    .collect::<Result<Vec<_>, _>>()?;
                if colors.is_empty() {
                    return Err(ConfigError::EmptyPalette);
                }
                // Configuration is built once per mount; the palette lives for the page.
                let leaked: &'static [[f32; 3]] = Box::leak(colors.into_boxed_slice());
                self.palette = ColorMode::Palette(leaked);
            }
            "renderer" => {
                self.style.renderer = match value {
                    "raster" | "canvas" => RendererKind::Raster,
                    "gpu" | "webgpu" => RendererKind::Gpu,
                    _ => return Err(bad()),
                }
            }
            "bloom" => {
                let strength = parse_f32()?;
                if strength <= 0.0 {
                    self.style.bloom = None;
                } else {
                    let threshold = self.style.bloom.unwrap_or_default().threshold;
                    self.style.bloom = Some(Bloom {
                        strength,
                        threshold,
                    });
                }
            }
            _ => return Err(ConfigError::UnknownOption(key.to_string())),
        }
        Ok(())
    }

    /// Apply several overrides, then validate the result.
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (k, v) in overrides {
            self.apply_override(k, v)?;
        }
        self.validate()?;
        Ok(self)
    }
}

#[inline]
fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

/// Parse `#rrggbb` (or `rrggbb`) into linear 0..1 components.
pub fn parse_hex_color(s: &str) -> Result<[f32; 3], ConfigError> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(ConfigError::InvalidColor(s.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| ConfigError::InvalidColor(s.to_string()))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}
