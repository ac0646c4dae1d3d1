//! Flat draw lists shared by the raster and GPU renderers.
//!
//! [`DrawList::rebuild`] resolves everything that depends on the frame
//! clock (hue rotation, node breathing, activation) so renderers only deal
//! with positions, RGBA and widths.

use glam::Vec3;

use crate::config::{ClearMode, EdgeColor, EdgeWidth, GlowStyle, LinkColor};
use crate::constants::HUE_SATURATION;
use crate::cosmetic::{breathing, hsl_to_rgb};
use crate::field::FieldState;
use crate::particle::ParticleColor;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub position: Vec3,
    /// Radius in field units.
    pub size: f32,
    pub color: [f32; 3],
    pub alpha: f32,
    pub glow: GlowStyle,
    /// Per-point drift offset for the GPU program.
    pub randomness: Vec3,
}

impl Sprite {
    #[inline]
    pub fn rgba(&self) -> [f32; 4] {
        [self.color[0], self.color[1], self.color[2], self.alpha]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Vec3,
    pub to: Vec3,
    pub from_color: [f32; 4],
    pub to_color: [f32; 4],
    pub width: f32,
}

impl Segment {
    /// True when both ends share one colour, so no gradient is needed.
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.from_color == self.to_color
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ring {
    pub center: Vec3,
    pub radius: f32,
    pub color: [f32; 4],
    pub width: f32,
}

#[derive(Clone, Debug)]
pub struct DrawList {
    pub clear: ClearMode,
    pub volume: bool,
    pub elapsed_sec: f32,
    pub drift_amount: f32,
    pub sprites: Vec<Sprite>,
    pub segments: Vec<Segment>,
    pub rings: Vec<Ring>,
}

impl Default for DrawList {
    fn default() -> Self {
        Self {
            clear: ClearMode::Clear,
            volume: false,
            elapsed_sec: 0.0,
            drift_amount: 0.0,
            sprites: Vec::new(),
            segments: Vec::new(),
            rings: Vec::new(),
        }
    }
}

/// Resolve a particle colour under the current global hue offset.
pub fn resolve_color(color: ParticleColor, hue_offset: f32) -> [f32; 3] {
    match color {
        ParticleColor::Rgb(rgb) => rgb,
        ParticleColor::Hue { degrees, lightness } => {
            hsl_to_rgb(degrees + hue_offset, HUE_SATURATION, lightness)
        }
    }
}

#[inline]
fn with_alpha(c: [f32; 3], a: f32) -> [f32; 4] {
    [c[0], c[1], c[2], a.clamp(0.0, 1.0)]
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_lists(&mut self) {
        self.sprites.clear();
        self.segments.clear();
        self.rings.clear();
    }

    /// Rebuild every list from the field's current state. Allocations are reused.
    pub fn rebuild(&mut self, field: &FieldState) {
        self.clear_lists();
        let config = field.config();
        let style = &config.style;
        let hue = field.hue();
        let now = field.now_ms();
        let particles = field.particles();

        self.clear = style.clear;
        self.volume = matches!(config.world, crate::config::World::Volume { .. });
        self.elapsed_sec = field.elapsed_sec();
        self.drift_amount = config.motion.drift_amount;

        let colors: Vec<[f32; 3]> = particles
            .iter()
            .map(|p| resolve_color(p.color, hue))
            .collect();

        for e in field.edges() {
            let (Some(pa), Some(pb)) = (particles.get(e.a), particles.get(e.b)) else {
                continue;
            };
            let alpha = if style.edge.fade {
                style.edge.alpha * e.strength
            } else {
                style.edge.alpha
            };
            let (ca, cb) = match style.edge.color {
                EdgeColor::Fixed(c) => (c, c),
                EdgeColor::Blend => {
                    let m = mix(colors[e.a], colors[e.b]);
                    (m, m)
                }
                EdgeColor::Gradient => (colors[e.a], colors[e.b]),
            };
            let width = match style.edge.width {
                EdgeWidth::Fixed(w) => w,
                EdgeWidth::Strength(s) => e.strength * s,
                EdgeWidth::MinSize(s) => pa.size.min(pb.size) * s,
            };
            self.segments.push(Segment {
                from: pa.position,
                to: pb.position,
                from_color: with_alpha(ca, alpha),
                to_color: with_alpha(cb, alpha),
                width,
            });
        }

        let network = field.network();

        if let Some(net) = network {
            let cfg = net.config();
            for (a, b) in net.links() {
                let (Some(pa), Some(pb)) = (particles.get(a), particles.get(b)) else {
                    continue;
                };
                let alpha_of = |i: usize| {
                    if net.nodes().get(i).map_or(false, |n| n.is_active(now)) {
                        cfg.link_alpha_active
                    } else {
                        cfg.link_alpha
                    }
                };
                let (ca, cb) = match cfg.link_color {
                    LinkColor::Fixed(c) => (c, c),
                    LinkColor::NodeGradient => (colors[a], colors[b]),
                };
                self.segments.push(Segment {
                    from: pa.position,
                    to: pb.position,
                    from_color: with_alpha(ca, alpha_of(a)),
                    to_color: with_alpha(cb, alpha_of(b)),
                    width: 0.5,
                });
            }
        }

        for (i, p) in particles.iter().enumerate() {
            let mut size = p.size * style.sprite_scale;
            let mut alpha = p.opacity();
            let mut glow = style.glow;
            if let Some(node) = network.and_then(|n| n.nodes().get(i)) {
                let effect = if node.phase_speed > 0.0 {
                    breathing(node.phase)
                } else {
                    1.0
                };
                size *= effect;
                if node.is_active(now) {
                    size *= 1.5;
                    alpha = alpha.max(0.9);
                    if let GlowStyle::ShadowBlur(px) = glow {
                        glow = GlowStyle::ShadowBlur(px * 2.0);
                    }
                    // breathing in [0.7, 1] mapped back onto [0, 1]
                    let pulse = ((effect - 0.7) / 0.3).clamp(0.0, 1.0);
                    let ring_color = match p.color {
                        ParticleColor::Hue { degrees, .. } => {
                            hsl_to_rgb(degrees + hue, HUE_SATURATION, 0.9)
                        }
                        ParticleColor::Rgb(c) => c,
                    };
                    self.rings.push(Ring {
                        center: p.position,
                        radius: size + 5.0 * pulse,
                        color: with_alpha(ring_color, 0.5 * pulse),
                        width: 1.0,
                    });
                }
            }
            self.sprites.push(Sprite {
                position: p.position,
                size,
                color: colors[i],
                alpha,
                glow,
                randomness: p.randomness,
            });
        }

        if let Some(net) = network {
            let cfg = net.config();
            let positions = field.positions();
            for pulse in net.pulses() {
                let Some(at) = pulse.position(positions) else {
                    continue;
                };
                let glow = if cfg.pulse_glow > 0.0 {
                    GlowStyle::Radial(cfg.pulse_glow)
                } else {
                    style.glow
                };
                self.sprites.push(Sprite {
                    position: at,
                    size: pulse.size,
                    color: resolve_color(pulse.color, hue),
                    alpha: 0.8,
                    glow,
                    randomness: Vec3::ZERO,
                });
            }
        }
    }
}

#[inline]
fn mix(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [(a[0] + b[0]) * 0.5, (a[1] + b[1]) * 0.5, (a[2] + b[2]) * 0.5]
}
