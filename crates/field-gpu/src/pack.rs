//! CPU-side packing of draw lists into GPU buffer layouts.

use field_core::config::{Bloom, ClearMode, GlowStyle};
use field_core::{DrawList, FieldCamera, Ring, Segment, Sprite, Viewport};

/// Uniforms shared by the point and line programs.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Globals {
    pub mvp: [[f32; 4]; 4],
    /// Clip-space offset per world unit of sprite radius.
    pub scale: [f32; 2],
    pub time: f32,
    pub drift: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
    pub randomness: [f32; 3],
    /// Quad half-size as a multiple of `size`; anything above 1 is halo.
    pub extent: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PostUniforms {
    pub resolution: [f32; 2],
    pub blur_dir: [f32; 2],
    pub bloom_strength: f32,
    pub threshold: f32,
    pub bloom_enabled: f32,
    pub _pad: f32,
}

impl PostUniforms {
    pub fn new(bloom_size: (u32, u32), bloom: Option<Bloom>) -> Self {
        let (strength, threshold, enabled) = match bloom {
            Some(b) => (b.strength, b.threshold, 1.0),
            None => (0.0, 1.0, 0.0),
        };
        Self {
            resolution: [bloom_size.0 as f32, bloom_size.1 as f32],
            blur_dir: [0.0, 0.0],
            bloom_strength: strength,
            threshold,
            bloom_enabled: enabled,
            _pad: 0.0,
        }
    }
}

pub const RING_SEGMENTS: usize = 32;
const MAX_EXTENT: f32 = 6.0;
pub const MIN_BUFFER_BYTES: u64 = 4096;

pub fn globals(draw: &DrawList, camera: &FieldCamera, viewport: &Viewport) -> Globals {
    let scale = if draw.volume {
        [camera.focal / viewport.aspect(), camera.focal]
    } else {
        [2.0 / viewport.width.max(1.0), 2.0 / viewport.height.max(1.0)]
    };
    Globals {
        mvp: camera.mvp().to_cols_array_2d(),
        scale,
        time: draw.elapsed_sec,
        drift: draw.drift_amount,
    }
}

/// How far past the solid disc a sprite's quad must reach to fit its glow.
pub fn glow_extent(glow: GlowStyle, size: f32) -> f32 {
    let extent = match glow {
        GlowStyle::None => 1.0,
        GlowStyle::Radial(r) => r,
        GlowStyle::ShadowBlur(px) => 1.0 + px / size.max(0.5),
    };
    if extent.is_finite() {
        extent.clamp(1.0, MAX_EXTENT)
    } else {
        1.0
    }
}

pub fn pack_points(sprites: &[Sprite], out: &mut Vec<PointInstance>) {
    out.clear();
    out.extend(sprites.iter().map(|s| PointInstance {
        position: s.position.to_array(),
        size: s.size,
        color: s.rgba(),
        randomness: s.randomness.to_array(),
        extent: glow_extent(s.glow, s.size),
    }));
}

/// Segments become line-list pairs; rings become closed polylines.
pub fn pack_lines(segments: &[Segment], rings: &[Ring], out: &mut Vec<LineVertex>) {
    out.clear();
    out.reserve(segments.len() * 2 + rings.len() * RING_SEGMENTS * 2);
    for s in segments {
        out.push(LineVertex {
            position: s.from.to_array(),
            color: s.from_color,
        });
        out.push(LineVertex {
            position: s.to.to_array(),
            color: s.to_color,
        });
    }
    for r in rings {
        let point = |k: usize| {
            let a = k as f32 / RING_SEGMENTS as f32 * std::f32::consts::TAU;
            [
                r.center.x + a.cos() * r.radius,
                r.center.y + a.sin() * r.radius,
                r.center.z,
            ]
        };
        for k in 0..RING_SEGMENTS {
            out.push(LineVertex {
                position: point(k),
                color: r.color,
            });
            out.push(LineVertex {
                position: point(k + 1),
                color: r.color,
            });
        }
    }
}

/// Blend constant for the trail-fade pass, if this frame fades rather than clears.
pub fn fade_factor(clear: ClearMode) -> Option<f64> {
    match clear {
        ClearMode::Clear => None,
        ClearMode::Fade(f) => Some(f.clamp(0.0, 1.0) as f64),
    }
}

/// Buffer size to allocate when `needed` bytes no longer fit in `current`.
pub fn grow_capacity(current: u64, needed: u64) -> u64 {
    if needed <= current {
        return current;
    }
    needed.next_power_of_two().max(MIN_BUFFER_BYTES)
}
