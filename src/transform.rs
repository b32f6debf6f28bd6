use glam::{Mat4, Vec3};

/// Per-object placement: uniform scale, XYZ Euler rotation, world position.
/// The model matrix applies scale first, then the rotations, then the
/// translation.
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    pub scale: f32,
    pub rotation: Vec3,
    pub position: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation: Vec3::ZERO,
            position: Vec3::ZERO,
        }
    }
}

impl Transform {
    pub fn new(scale: f32, rotation: Vec3, position: Vec3) -> Self {
        Self {
            scale,
            rotation,
            position,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_z(self.rotation.z)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_identity() {
        assert!(Transform::default().matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn scale_applies_before_translation() {
        let tr = Transform::new(0.5, Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0));
        let p = tr.matrix().transform_point3(Vec3::new(2.0, 0.0, 0.0));
        assert!(p.abs_diff_eq(Vec3::new(1.0, 0.0, -3.0), 1e-6));
    }

    #[test]
    fn yaw_rotation_turns_x_toward_negative_z() {
        let tr = Transform::new(
            1.0,
            Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
            Vec3::ZERO,
        );
        let p = tr.matrix().transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-5));
    }
}
