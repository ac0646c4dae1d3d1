use glam::{Vec2, Vec3};

use crate::constants::{POINTER_IDLE_MS, POINTER_VELOCITY_DECAY};
use crate::viewport::Viewport;

/// Pointer state as seen by the stepper.
///
/// Positions are in CSS pixels. The velocity is the delta between the two
/// most recent samples and decays every frame once the pointer stops.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerTracker {
    position: Option<Vec2>,
    velocity: Vec2,
    last_move_ms: Option<f64>,
}

impl PointerTracker {
    pub fn record(&mut self, x: f32, y: f32, now_ms: f64) {
        let p = Vec2::new(x, y);
        if !p.is_finite() {
            return;
        }
        if let Some(prev) = self.position {
            self.velocity = p - prev;
        }
        self.position = Some(p);
        self.last_move_ms = Some(now_ms);
    }

    #[inline]
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// True for a short window after the most recent move.
    pub fn is_active(&self, now_ms: f64) -> bool {
        match self.last_move_ms {
            Some(t) => now_ms - t <= POINTER_IDLE_MS,
            None => false,
        }
    }

    pub fn decay(&mut self) {
        self.velocity *= POINTER_VELOCITY_DECAY;
        if self.velocity.length_squared() < 1e-8 {
            self.velocity = Vec2::ZERO;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// CSS pixel position to normalised device coordinates (y up).
#[inline]
pub fn pointer_ndc(x: f32, y: f32, viewport: &Viewport) -> Vec2 {
    let w = viewport.width.max(1.0);
    let h = viewport.height.max(1.0);
    Vec2::new((x / w) * 2.0 - 1.0, 1.0 - (y / h) * 2.0)
}

/// Distance along a normalised ray to the first hit on a sphere, if any.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Index of the point closest to `target`, with its distance.
pub fn nearest_point<I>(points: I, target: Vec3) -> Option<(usize, f32)>
where
    I: IntoIterator<Item = Vec3>,
{
    let mut best: Option<(usize, f32)> = None;
    for (i, p) in points.into_iter().enumerate() {
        let d = p.distance(target);
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best
}
