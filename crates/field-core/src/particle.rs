use glam::Vec3;

/// Colour of a single particle.
///
/// Palette colours are fixed RGB triples. Hue colours are resolved at draw
/// time so the global hue rotation can cycle them without touching the
/// particle records.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParticleColor {
    Rgb([f32; 3]),
    Hue { degrees: f32, lightness: f32 },
}

impl Default for ParticleColor {
    fn default() -> Self {
        ParticleColor::Rgb([1.0, 1.0, 1.0])
    }
}

#[derive(Clone, Debug, Default)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub size: f32,
    pub color: ParticleColor,
    opacity: f32,
    /// Per-point offset in [-1, 1]^3 used by the GPU drift program.
    pub randomness: Vec3,
}

impl Particle {
    pub fn new(position: Vec3, velocity: Vec3, size: f32, color: ParticleColor, opacity: f32) -> Self {
        Self {
            position,
            velocity,
            size,
            color,
            opacity: clamp_opacity(opacity),
            randomness: Vec3::ZERO,
        }
    }

    pub fn with_randomness(mut self, randomness: Vec3) -> Self {
        self.randomness = randomness.clamp(Vec3::splat(-1.0), Vec3::ONE);
        self
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    #[inline]
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = clamp_opacity(opacity);
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

#[inline]
fn clamp_opacity(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// What happens when a particle leaves its bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Teleport to the opposite edge (ambient drift).
    Wrap,
    /// Clamp and reflect the velocity component (bounded neuron fields).
    Bounce,
}

/// Axis-aligned simulation bounds. Screen fields use a flat box with
/// `min.z == max.z == 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn screen(width: f32, height: f32) -> Self {
        Self {
            min: Vec3::ZERO,
            max: Vec3::new(width.max(0.0), height.max(0.0), 0.0),
        }
    }

    pub fn cube(half_extent: f32) -> Self {
        let h = half_extent.abs();
        Self {
            min: Vec3::splat(-h),
            max: Vec3::splat(h),
        }
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Apply `policy` to one particle. Afterwards every component of the
    /// position lies inside the bounds.
    pub fn enforce(&self, policy: BoundaryPolicy, position: &mut Vec3, velocity: &mut Vec3) {
        for axis in 0..3 {
            let lo = self.min[axis];
            let hi = self.max[axis];
            let p = position[axis];
            if !p.is_finite() {
                position[axis] = lo;
                velocity[axis] = 0.0;
                continue;
            }
            match policy {
                BoundaryPolicy::Wrap => {
                    if p > hi {
                        position[axis] = lo;
                    } else if p < lo {
                        position[axis] = hi;
                    }
                }
                BoundaryPolicy::Bounce => {
                    if p < lo {
                        position[axis] = lo;
                        velocity[axis] = velocity[axis].abs();
                    } else if p > hi {
                        position[axis] = hi;
                        velocity[axis] = -velocity[axis].abs();
                    }
                }
            }
        }
    }
}
