use atelier_engine::color::Color;
use atelier_engine::math::{deg_to_rad, Mat4, Vec3};

use crate::Hierarchy;

/// Height of the floor; everything sits on it.
pub const FLOOR_Y: f32 = -1.2;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Solid {
    Cube,
    Sphere,
    Teapot,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShadowDraw {
    pub solid: Solid,
    pub color: Color,
    pub model: Mat4,
}

/// Floor, teapot and ball. The same list feeds the light pass and the
/// camera pass.
pub fn compose() -> Vec<ShadowDraw> {
    let mut h: Hierarchy<ShadowDraw> = Hierarchy::new();

    h.push().translate(0.0, FLOOR_Y - 0.01, 0.0).scale(2.4, 0.01, 2.4);
    h.emit(|model| ShadowDraw { solid: Solid::Cube, color: Color::gray(0.7), model });
    h.pop();

    h.push()
        .translate(-0.3, FLOOR_Y, -0.2)
        .translate(0.0, 0.3, 0.0)
        .scale(0.04, 0.04, 0.04)
        .rotate(deg_to_rad(-90.0), Vec3::Y);
    h.emit(|model| ShadowDraw { solid: Solid::Teapot, color: Color::rgb(0.2, 0.8, 0.4), model });
    h.pop();

    h.push()
        .translate(0.3, FLOOR_Y, 0.7)
        .scale(0.2, 0.2, 0.2)
        .translate(0.0, 1.0, 0.0);
    h.emit(|model| ShadowDraw { solid: Solid::Sphere, color: Color::rgb(0.1, 0.4, 0.8), model });
    h.pop();

    h.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_teapot_and_ball() {
        let solids: Vec<Solid> = compose().iter().map(|d| d.solid).collect();
        assert_eq!(solids, vec![Solid::Cube, Solid::Teapot, Solid::Sphere]);
    }

    #[test]
    fn ball_rests_on_the_floor() {
        let draws = compose();
        let bottom = draws[2].model.transform_point3(Vec3::new(0.0, -1.0, 0.0));
        let floor_top = draws[0].model.transform_point3(Vec3::new(0.0, 0.5, 0.0));
        assert!((bottom.y - FLOOR_Y).abs() < 1e-5);
        assert!((floor_top.y - (FLOOR_Y - 0.005)).abs() < 1e-5);
    }

    #[test]
    fn teapot_faces_sideways() {
        let draws = compose();
        let forward = draws[1].model.transform_vector3(Vec3::X).normalize();
        assert!((forward - Vec3::Z).length() < 1e-5);
    }
}
