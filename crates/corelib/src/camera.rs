use crate::{Mat4, Vec3, vec3};

/// Perspective camera (right-handed).
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_rad: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub aspect: f32,
}

impl Camera {
    #[allow(clippy::too_many_arguments)]
    pub fn new_perspective(
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        fov_y_rad: f32,
        z_near: f32,
        z_far: f32,
        aspect: f32,
    ) -> Self {
        Self {
            eye,
            target,
            up,
            fov_y_rad,
            z_near,
            z_far,
            aspect,
        }
    }

    /// Fixed scene camera: behind and above the origin, looking at it, +Y up.
    pub fn scene_default(aspect: f32) -> Self {
        Self::new_perspective(
            vec3(0.0, 8.0, -16.0),
            Vec3::ZERO,
            Vec3::Y,
            45f32.to_radians(),
            0.01,
            100.0,
            aspect,
        )
    }

    /// Aspect ratio for a viewport; degenerate sizes are clamped to 1 pixel.
    #[inline]
    pub fn aspect_for(width: u32, height: u32) -> f32 {
        width.max(1) as f32 / height.max(1) as f32
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// OpenGL-style projection (z in [-1, 1]).
    #[inline]
    pub fn proj(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_y_rad,
            self.aspect.max(1e-6),
            self.z_near,
            self.z_far,
        )
    }

    #[inline]
    pub fn proj_view(&self) -> Mat4 {
        self.proj() * self.view()
    }

    #[inline]
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }
}
