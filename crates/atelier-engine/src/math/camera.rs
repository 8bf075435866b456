use glam::{Mat4, Vec3};

use super::{look_at, perspective};

/// Perspective camera described the way the scenes configure theirs.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fovy_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 2.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy_deg: 50.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        look_at(self.eye, self.target, self.up)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        perspective(self.fovy_deg, aspect, self.near, self.far)
    }

    /// Places the eye on a horizontal circle of `radius` around the Y axis at
    /// height `height`. Angle zero is on +Z.
    pub fn orbit_y(&mut self, angle: f32, radius: f32, height: f32) {
        self.eye = Vec3::new(radius * angle.sin(), height, radius * angle.cos());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_looks_down_negative_z() {
        let cam = Camera::default();
        let p = cam.view().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn orbit_zero_angle_is_on_positive_z() {
        let mut cam = Camera::default();
        cam.orbit_y(0.0, 1.8, 0.6);
        assert!((cam.eye - Vec3::new(0.0, 0.6, 1.8)).length() < 1e-6);
    }

    #[test]
    fn orbit_quarter_turn_is_on_positive_x() {
        let mut cam = Camera::default();
        cam.orbit_y(std::f32::consts::FRAC_PI_2, 2.0, 0.0);
        assert!((cam.eye - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
    }
}
