//! Per-frame cosmetic effects as pure functions of elapsed time and a seed.
//!
//! Nothing in here touches field state; renderers and the draw list call
//! these with the clock they already have, so the same inputs always give
//! the same picture.

use glam::Vec3;

/// Global hue offset in degrees, wrapped into `[0, 360)`.
pub fn hue_rotation(elapsed_sec: f32, deg_per_sec: f32) -> f32 {
    if !(elapsed_sec.is_finite() && deg_per_sec.is_finite()) {
        return 0.0;
    }
    let r = (elapsed_sec * deg_per_sec).rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negatives
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// HSL (degrees, 0..1, 0..1) to linear 0..1 RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    if s == 0.0 {
        return [l, l, l];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let h = h.rem_euclid(360.0) / 360.0;
    [
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Stable hash of `(seed, i)` mapped into `[0, 1)`.
pub fn hash01(seed: u64, i: u64) -> f32 {
    // splitmix64 finaliser
    let mut z = seed ^ i.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^= z >> 31;
    (z >> 40) as f32 / (1u64 << 24) as f32
}

pub const SCRAMBLE_CHARSET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+";

/// Text decode effect. The first `floor(progress * len)` characters are
/// revealed; the rest are drawn from `charset`, changing with `step`.
/// Whitespace always shows through.
pub fn scramble_text(text: &str, progress: f32, seed: u64, step: u64, charset: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let pool: Vec<char> = charset.chars().collect();
    let p = if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let revealed = (p * chars.len() as f32).floor() as usize;
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            if i < revealed || c.is_whitespace() || pool.is_empty() {
                c
            } else {
                let h = hash01(seed ^ step.rotate_left(32), i as u64);
                pool[((h * pool.len() as f32) as usize).min(pool.len() - 1)]
            }
        })
        .collect()
}

/// Breathing factor in `[0.7, 1.0]` for a node pulse phase.
#[inline]
pub fn breathing(phase: f32) -> f32 {
    0.7 + 0.3 * (phase.sin() * 0.5 + 0.5)
}

/// Camera eye offset on a circle in the xy plane.
#[inline]
pub fn camera_orbit(elapsed_sec: f32, radius: f32, speed: f32) -> Vec3 {
    let a = elapsed_sec * speed;
    Vec3::new(a.sin() * radius, a.cos() * radius, 0.0)
}

/// CPU mirror of the point drift in `points.wgsl`.
pub fn drift_offset(position: Vec3, randomness: Vec3, elapsed_sec: f32, amount: f32) -> Vec3 {
    let t = elapsed_sec;
    Vec3::new(
        (t * 0.3 + position.x * 0.2).sin() * randomness.x,
        (t * 0.2 + position.y * 0.3).cos() * randomness.y,
        (t * 0.1 + position.z * 0.4).sin() * randomness.z,
    ) * amount
}
