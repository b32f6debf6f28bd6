use glam::{Mat4, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Margin keeping pitch away from straight up/down so the look vector never
/// becomes collinear with world-up.
const PITCH_LIMIT_MARGIN: f32 = 0.1;

/// Free-look camera with yaw/pitch orientation.
///
/// Movement is expressed in the camera's yaw-only basis: `forward` and
/// `right` stay in the horizontal plane regardless of pitch, and vertical
/// motion is along world-up. Rotation wraps yaw and clamps pitch strictly
/// inside (-90°, 90°).
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub move_speed: f32,
    pub sensitivity: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            move_speed: 0.2,
            sensitivity: 0.01,
        }
    }
}

impl Camera {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            yaw,
            ..Self::default()
        }
    }

    /// Horizontal forward direction, from yaw alone.
    fn forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }

    /// Translate along the yaw-only right/forward basis; `dz` moves along
    /// world-up. The offset is scaled by `move_speed`.
    pub fn move_by(&mut self, dx: f32, dy: f32, dz: f32) {
        let forward = self.forward();
        let right = Vec3::new(-forward.z, 0.0, forward.x);

        let offset = dx * right + dy * forward + dz * Vec3::Y;
        self.position += offset * self.move_speed;
    }

    /// Accumulate yaw (wrapping at a full turn) and pitch (clamped inside
    /// the open interval (-90°, 90°)), both scaled by `sensitivity`.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw = (self.yaw + dx * self.sensitivity) % TAU;
        self.pitch = (self.pitch + dy * self.sensitivity).clamp(
            -FRAC_PI_2 + PITCH_LIMIT_MARGIN,
            FRAC_PI_2 - PITCH_LIMIT_MARGIN,
        );
    }

    /// Unit look direction from yaw and pitch.
    pub fn look_vector(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        )
    }

    /// Right-handed look-at toward `position + look_vector` with world-up.
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.look_vector(), Vec3::Y)
    }
}
