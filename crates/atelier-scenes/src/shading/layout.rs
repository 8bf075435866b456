use atelier_engine::color::Color;
use atelier_engine::controls::DragRotation;
use atelier_engine::math::{deg_to_rad, Mat4, Vec3};

use crate::Hierarchy;

/// Lighting model used by one of the three views.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Technique {
    Flat,
    Gouraud,
    Phong,
}

impl Technique {
    /// Left to right.
    pub const ALL: [Technique; 3] = [Technique::Flat, Technique::Gouraud, Technique::Phong];

    pub fn label(self) -> &'static str {
        match self {
            Technique::Flat => "flat",
            Technique::Gouraud => "gouraud",
            Technique::Phong => "phong",
        }
    }

    pub fn background(self) -> Color {
        match self {
            Technique::Flat => Color::rgb(0.8, 0.8, 0.9),
            Technique::Gouraud => Color::rgb(1.0, 0.9, 0.9),
            Technique::Phong => Color::rgb(0.9, 1.0, 0.9),
        }
    }

    pub fn ambient_strength(self) -> f32 {
        match self {
            Technique::Flat => 0.10,
            Technique::Gouraud | Technique::Phong => 0.15,
        }
    }

    pub fn shininess(self) -> f32 {
        match self {
            Technique::Flat => 35.0,
            Technique::Gouraud | Technique::Phong => 30.0,
        }
    }

    /// The objects this view shows, rotated by its drag state.
    pub fn arrangement(self, rotation: DragRotation) -> Vec<SolidDraw> {
        match self {
            Technique::Flat => flat_arrangement(rotation),
            Technique::Gouraud => gouraud_arrangement(rotation),
            Technique::Phong => phong_arrangement(rotation),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Solid {
    Cube,
    Sphere,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SolidDraw {
    pub solid: Solid,
    pub diffuse: Color,
    pub model: Mat4,
}

fn solid(h: &mut Hierarchy<SolidDraw>, solid: Solid, diffuse: Color) {
    h.emit(|model| SolidDraw { solid, diffuse, model });
}

fn uniform(h: &mut Hierarchy<SolidDraw>, s: f32) -> &mut Hierarchy<SolidDraw> {
    h.scale(s, s, s)
}

fn rot_x(h: &mut Hierarchy<SolidDraw>, degrees: f32) -> &mut Hierarchy<SolidDraw> {
    h.rotate(deg_to_rad(degrees), Vec3::X)
}

fn rot_y(h: &mut Hierarchy<SolidDraw>, degrees: f32) -> &mut Hierarchy<SolidDraw> {
    h.rotate(deg_to_rad(degrees), Vec3::Y)
}

fn rot_z(h: &mut Hierarchy<SolidDraw>, degrees: f32) -> &mut Hierarchy<SolidDraw> {
    h.rotate(deg_to_rad(degrees), Vec3::Z)
}

/// User drag first, so the whole arrangement turns about the view's origin.
fn apply_drag(h: &mut Hierarchy<SolidDraw>, rotation: DragRotation) {
    rot_y(h, rotation.yaw_deg);
    rot_x(h, rotation.pitch_deg);
}

/// A squat box with a ball resting on top.
pub fn flat_arrangement(rotation: DragRotation) -> Vec<SolidDraw> {
    let mut h = Hierarchy::new();
    apply_drag(&mut h, rotation);
    rot_x(&mut h, 10.0);
    rot_y(&mut h, 25.0);
    h.translate(0.0, -0.3, 0.0);

    h.push().scale(0.5, 0.8, 0.5);
    solid(&mut h, Solid::Cube, Color::rgb(0.9, 0.85, 0.6));
    h.pop();

    h.push().translate(0.0, 0.7, 0.0);
    uniform(&mut h, 0.3);
    solid(&mut h, Solid::Sphere, Color::rgb(0.0, 0.6, 0.8));
    h.pop();

    h.finish()
}

/// A large ball with two cube-and-ball stacks balanced off its side.
pub fn gouraud_arrangement(rotation: DragRotation) -> Vec<SolidDraw> {
    let white = Color::rgb(0.9, 0.9, 0.9);
    let green = Color::rgb(0.0, 0.8, 0.0);

    let mut h = Hierarchy::new();
    apply_drag(&mut h, rotation);
    h.translate(0.0, -0.3, 0.0);
    rot_x(&mut h, 20.0);
    rot_z(&mut h, -25.0);
    rot_y(&mut h, -15.0);
    uniform(&mut h, 0.8);

    h.push();
    uniform(&mut h, 0.5);
    solid(&mut h, Solid::Sphere, white);

    // The stacks hang off the big ball's frame, scale included.
    h.translate(-1.5, 1.2, 0.0);
    h.push().translate(0.0, -1.0, 0.0);
    solid(&mut h, Solid::Cube, green);
    h.translate(0.0, 1.0, 0.0);
    uniform(&mut h, 0.5);
    solid(&mut h, Solid::Sphere, white);
    h.pop();

    h.push();
    rot_y(&mut h, 30.0);
    rot_z(&mut h, 45.0);
    h.translate(0.75, 0.5, 0.0);
    uniform(&mut h, 0.5);
    h.translate(0.0, -1.0, 0.0);
    solid(&mut h, Solid::Cube, green);
    h.translate(0.0, 1.0, 0.0);
    uniform(&mut h, 0.5);
    solid(&mut h, Solid::Sphere, white);
    h.pop();

    h.pop();
    h.finish()
}

/// Two slabs each flanked by a pair of balls, held apart by two rails.
pub fn phong_arrangement(rotation: DragRotation) -> Vec<SolidDraw> {
    let rail = Color::rgb(0.8, 0.3, 0.0);

    let mut h = Hierarchy::new();
    apply_drag(&mut h, rotation);
    rot_y(&mut h, 30.0);
    rot_x(&mut h, 5.0);

    h.push();
    uniform(&mut h, 0.4);
    slab_with_balls(
        &mut h,
        1.0,
        [Color::rgb(0.0, 0.9, 0.8), Color::rgb(0.8, 0.6, 0.2), Color::rgb(0.0, 0.7, 0.7)],
    );
    slab_with_balls(
        &mut h,
        -1.0,
        [Color::rgb(0.9, 0.9, 0.0), Color::rgb(1.0, 0.0, 1.0), Color::rgb(0.4, 0.2, 0.6)],
    );
    h.pop();

    for (y, ball_y, ball) in [(0.352, 0.568, Color::rgb(0.7, 0.7, 0.9)), (-0.352, -0.568, Color::rgb(0.0, 1.0, 0.0))] {
        h.push().translate(0.0, y, 0.0).scale(1.2, 0.032, 0.3);
        solid(&mut h, Solid::Cube, rail);
        h.pop();

        h.push().translate(0.0, ball_y, 0.0);
        uniform(&mut h, 0.2);
        solid(&mut h, Solid::Sphere, ball);
        h.pop();
    }

    h.finish()
}

/// `colors` are the slab, the upper ball and the lower ball.
fn slab_with_balls(h: &mut Hierarchy<SolidDraw>, x: f32, colors: [Color; 3]) {
    h.push().translate(x, 0.0, 0.0);

    h.push().scale(0.8, 0.08, 1.7);
    solid(h, Solid::Cube, colors[0]);
    h.pop();

    for (y, color) in [(0.44, colors[1]), (-0.44, colors[2])] {
        h.push().translate(0.0, y, 0.0);
        uniform(h, 0.4);
        solid(h, Solid::Sphere, color);
        h.pop();
    }

    h.pop();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(draws: &[SolidDraw], s: Solid) -> usize {
        draws.iter().filter(|d| d.solid == s).count()
    }

    fn origin(d: &SolidDraw) -> Vec3 {
        d.model.transform_point3(Vec3::ZERO)
    }

    // ── object counts ─────────────────────────────────────────────────────

    #[test]
    fn flat_view_has_box_and_ball() {
        let draws = flat_arrangement(DragRotation::default());
        assert_eq!(count(&draws, Solid::Cube), 1);
        assert_eq!(count(&draws, Solid::Sphere), 1);
    }

    #[test]
    fn gouraud_view_has_two_stacks_on_a_ball() {
        let draws = gouraud_arrangement(DragRotation::default());
        assert_eq!(count(&draws, Solid::Cube), 2);
        assert_eq!(count(&draws, Solid::Sphere), 3);
    }

    #[test]
    fn phong_view_has_slabs_rails_and_balls() {
        let draws = phong_arrangement(DragRotation::default());
        assert_eq!(count(&draws, Solid::Cube), 4);
        assert_eq!(count(&draws, Solid::Sphere), 6);
    }

    // ── placement ─────────────────────────────────────────────────────────

    #[test]
    fn flat_ball_sits_above_box() {
        let draws = flat_arrangement(DragRotation::default());
        let cube = draws.iter().find(|d| d.solid == Solid::Cube).map(origin);
        let ball = draws.iter().find(|d| d.solid == Solid::Sphere).map(origin);
        let (Some(cube), Some(ball)) = (cube, ball) else { panic!("missing draws") };
        assert!(ball.y > cube.y + 0.5);
    }

    #[test]
    fn phong_slabs_are_mirrored_about_the_axis() {
        let draws = phong_arrangement(DragRotation::default());
        let slabs: Vec<Vec3> = draws
            .iter()
            .filter(|d| d.solid == Solid::Cube && d.diffuse != Color::rgb(0.8, 0.3, 0.0))
            .map(origin)
            .collect();
        assert_eq!(slabs.len(), 2);
        assert!((slabs[0] + slabs[1]).length() < 1e-5);
    }

    #[test]
    fn everything_fits_the_default_camera() {
        for t in Technique::ALL {
            for d in t.arrangement(DragRotation::default()) {
                assert!(origin(&d).length() < 1.2, "{} draw at {:?}", t.label(), origin(&d));
            }
        }
    }

    // ── drag ──────────────────────────────────────────────────────────────

    #[test]
    fn yaw_turns_the_whole_view_about_y() {
        let still = phong_arrangement(DragRotation::default());
        let turned = phong_arrangement(DragRotation::new(90.0, 0.0));
        let expected = Mat4::from_rotation_y(deg_to_rad(90.0));
        for (a, b) in still.iter().zip(&turned) {
            let want = expected.transform_point3(origin(a));
            assert!((origin(b) - want).length() < 1e-4);
        }
    }

    #[test]
    fn drag_does_not_change_colours() {
        let a = gouraud_arrangement(DragRotation::default());
        let b = gouraud_arrangement(DragRotation::new(40.0, -20.0));
        assert!(a.iter().zip(&b).all(|(x, y)| x.diffuse == y.diffuse && x.solid == y.solid));
    }
}
