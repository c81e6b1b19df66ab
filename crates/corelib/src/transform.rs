use crate::{EulerRot, Mat4, Quat, Vec3, vec3};

/// Rigid transform with non-uniform scale (Euler XYZ).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    /// Euler angles in radians (XYZ order).
    pub rotation_euler: Vec3,
    pub scale: Vec3,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_euler: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    #[inline]
    pub fn from_trs(translation: Vec3, rotation_euler: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            rotation_euler,
            scale,
        }
    }

    /// Translation followed by a spin of `yaw` radians about +Y.
    #[inline]
    pub fn from_translation_yaw(translation: Vec3, yaw: f32) -> Self {
        Self::from_trs(translation, vec3(0.0, yaw, 0.0), Vec3::ONE)
    }

    /// Build matrix = T * R * S (column-major Mat4 per glam).
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        let q = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation_euler.x,
            self.rotation_euler.y,
            self.rotation_euler.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, q, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Point on a circle in the XZ plane: `(r sin a, 0, r cos a)`.
#[inline]
pub fn orbit_offset(radius: f32, angle: f32) -> Vec3 {
    vec3(radius * angle.sin(), 0.0, radius * angle.cos())
}
