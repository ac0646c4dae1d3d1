/// Host viewport in CSS pixels plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        let sanitize = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        Self {
            width: sanitize(width),
            height: sanitize(height),
            device_pixel_ratio: dpr,
        }
    }

    /// Backing-store size of a canvas covering this viewport.
    pub fn backing_size(&self) -> (u32, u32) {
        let w = (self.width * self.device_pixel_ratio).ceil() as u32;
        let h = (self.height * self.device_pixel_ratio).ceil() as u32;
        (w.max(1), h.max(1))
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width.max(1.0) / self.height.max(1.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0, 1.0)
    }
}

/// How many particles a field starts with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CountRule {
    Fixed(usize),
    /// `min(floor(width / px_per_particle), max)`
    Density { px_per_particle: f32, max: usize },
    /// `min(floor(width / step_px) * per_step, max)`
    Stepped { step_px: f32, per_step: usize, max: usize },
}

impl CountRule {
    pub fn count(&self, viewport: &Viewport) -> usize {
        match *self {
            CountRule::Fixed(n) => n,
            CountRule::Density { px_per_particle, max } => {
                if px_per_particle <= 0.0 {
                    return max;
                }
                ((viewport.width / px_per_particle).floor() as usize).min(max)
            }
            CountRule::Stepped {
                step_px,
                per_step,
                max,
            } => {
                if step_px <= 0.0 {
                    return max;
                }
                let steps = (viewport.width / step_px).floor() as usize;
                steps.saturating_mul(per_step).min(max)
            }
        }
    }
}
