//! Cameras for screen-space and volume fields.

use glam::{Mat4, Vec2, Vec3};

use crate::config::World;
use crate::constants::{CAMERA_FOVY_DEG, CAMERA_Z, CAMERA_ZFAR, CAMERA_ZNEAR};
use crate::cosmetic::camera_orbit;
use crate::field::FieldState;
use crate::input::pointer_ndc;
use crate::viewport::Viewport;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Resolved matrices for one frame of one field.
#[derive(Clone, Debug)]
pub struct FieldCamera {
    /// Perspective camera for volume fields, `None` for screen fields.
    pub camera: Option<Camera>,
    pub model: Mat4,
    pub view_proj: Mat4,
    /// Clip-space y scale of the projection (`proj[1][1]`).
    pub focal: f32,
}

impl FieldCamera {
    pub fn for_field(field: &FieldState, viewport: &Viewport) -> Self {
        let config = field.config();
        match config.world {
            World::Screen => Self::screen(viewport),
            World::Volume { .. } => {
                let t = field.elapsed_sec();
                let orbit = config
                    .motion
                    .orbit
                    .map_or(Vec3::ZERO, |o| camera_orbit(t, o.radius, o.speed));
                let camera = Camera {
                    eye: Vec3::new(0.0, 0.0, CAMERA_Z) + orbit,
                    target: Vec3::ZERO,
                    up: Vec3::Y,
                    aspect: viewport.aspect(),
                    fovy_radians: CAMERA_FOVY_DEG.to_radians(),
                    znear: CAMERA_ZNEAR,
                    zfar: CAMERA_ZFAR,
                };
                let spin = config.motion.spin * t + field.steer();
                let model = Mat4::from_rotation_x(spin.x) * Mat4::from_rotation_y(spin.y);
                let projection = camera.projection_matrix();
                let view_proj = projection * camera.view_matrix();
                Self {
                    focal: projection.y_axis.y,
                    camera: Some(camera),
                    model,
                    view_proj,
                }
            }
        }
    }

    /// Orthographic mapping of CSS pixels (origin top-left, y down) to clip space.
    pub fn screen(viewport: &Viewport) -> Self {
        let w = viewport.width.max(1.0);
        let h = viewport.height.max(1.0);
        Self {
            camera: None,
            model: Mat4::IDENTITY,
            view_proj: Mat4::orthographic_rh(0.0, w, h, 0.0, -1.0, 1.0),
            focal: 2.0 / h,
        }
    }

    #[inline]
    pub fn mvp(&self) -> Mat4 {
        self.view_proj * self.model
    }

    pub fn eye(&self) -> Vec3 {
        self.camera.as_ref().map_or(Vec3::ZERO, |c| c.eye)
    }

    pub fn project(&self, world: Vec3, viewport: &Viewport) -> Option<Projected> {
        project_to_screen(&self.mvp(), self.focal, world, viewport)
    }

    /// Pick ray through a CSS pixel, in model space.
    pub fn screen_ray(&self, x: f32, y: f32, viewport: &Viewport) -> (Vec3, Vec3) {
        screen_ray(&self.mvp(), x, y, viewport)
    }
}

/// A point projected to CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub screen: Vec2,
    /// NDC depth in `[0, 1]` for perspective, `[-1, 1]`-ish for ortho.
    pub depth: f32,
    /// CSS pixels per world unit at this depth.
    pub scale: f32,
}

/// Project `world` through `mvp`; `None` when behind the camera.
pub fn project_to_screen(
    mvp: &Mat4,
    focal: f32,
    world: Vec3,
    viewport: &Viewport,
) -> Option<Projected> {
    let clip = *mvp * world.extend(1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    let h = viewport.height.max(1.0);
    Some(Projected {
        screen: Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.width,
            (1.0 - ndc.y) * 0.5 * viewport.height,
        ),
        depth: ndc.z,
        scale: focal.abs() * h * 0.5 / clip.w,
    })
}

/// Unproject a CSS pixel into a ray `(origin, normalised dir)`.
pub fn screen_ray(mvp: &Mat4, x: f32, y: f32, viewport: &Viewport) -> (Vec3, Vec3) {
    let ndc = pointer_ndc(x, y, viewport);
    let inv = mvp.inverse();
    let near = inv.project_point3(ndc.extend(0.0));
    let far = inv.project_point3(ndc.extend(1.0));
    (near, (far - near).normalize_or_zero())
}
