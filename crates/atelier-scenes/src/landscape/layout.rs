//! The night landscape as a list of 2D shape draws.
//!
//! Coordinates are clip space of a square canvas: x and y in [-1, 1].

use atelier_engine::color::Color;
use atelier_engine::math::Mat4;

use crate::Hierarchy;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Shape {
    Square,
    Triangle,
    Circle,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShapeDraw {
    pub shape: Shape,
    pub color: Color,
    pub model: Mat4,
}

/// Animated quantities for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pose {
    pub moon_deg: f32,
    pub star_scale: f32,
    pub boat1_x: f32,
    pub boat2_x: f32,
    pub blade_deg: f32,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            moon_deg: 0.0,
            star_scale: 1.0,
            boat1_x: 0.0,
            boat2_x: 0.4,
            blade_deg: 0.0,
        }
    }
}

type Canvas = Hierarchy<ShapeDraw>;

fn put(h: &mut Canvas, shape: Shape, color: Color) {
    h.emit(|model| ShapeDraw { shape, color, model });
}

const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
const CLOUD: Color = Color::rgb(0.8, 0.8, 0.8);

/// Builds the whole picture back to front.
pub fn compose(pose: &Pose) -> Vec<ShapeDraw> {
    let mut h = Canvas::new();
    sky(&mut h);
    clouds(&mut h);
    moon(&mut h, pose.moon_deg);
    stars(&mut h, pose.star_scale);
    mountains(&mut h);
    ground(&mut h);
    trees(&mut h);
    river(&mut h);
    boats(&mut h, pose.boat1_x, pose.boat2_x);
    house(&mut h);
    car(&mut h);
    windmills(&mut h, pose.blade_deg);
    h.finish()
}

fn sky(h: &mut Canvas) {
    h.identity().push();
    h.translate(0.0, 0.5, 0.0).scale(2.0, 1.0, 1.0);
    put(h, Shape::Square, BLACK);
    h.pop();
}

fn clouds(h: &mut Canvas) {
    h.identity();
    for (x, y, sx, sy, color) in [
        (-0.84, 0.52, 0.2, 0.1, CLOUD),
        (-0.6, 0.49, 0.18, 0.09, WHITE),
        (-0.39, 0.49, 0.12, 0.07, CLOUD),
    ] {
        h.push();
        h.translate(x, y, 0.0).scale(sx, sy, 1.0);
        put(h, Shape::Circle, color);
        h.pop();
    }
}

fn moon(h: &mut Canvas, angle_deg: f32) {
    h.identity().push();
    h.translate(-0.7, 0.8, 0.0).scale(0.12, 0.12, 1.0).rotate_z_deg(angle_deg);

    // Four thin bars through the centre make eight rays.
    for i in 0..4 {
        h.push();
        h.rotate_z_deg(45.0 * i as f32).scale(0.05, 2.5, 1.0);
        put(h, Shape::Square, WHITE);
        h.pop();
    }
    put(h, Shape::Circle, WHITE);
    h.pop();
}

fn stars(h: &mut Canvas, twinkle: f32) {
    h.identity();
    for (x, y, size) in [
        (-0.15, 0.5, 0.006),
        (-0.1, 0.6, 0.01),
        (-0.25, 0.7, 0.01),
        (0.3, 0.75, 0.015),
        (0.55, 0.9, 0.006),
    ] {
        let s = size * twinkle;
        h.push();
        h.translate(x, y, 0.0).scale(s, s, 1.0);
        put(h, Shape::Square, WHITE);
        for arm in 0..4 {
            h.push();
            h.rotate_z_deg(90.0 * arm as f32)
                .translate(0.0, 0.5, 0.0)
                .scale(1.0, 3.0, 1.0)
                .translate(0.0, 0.5, 0.0);
            put(h, Shape::Triangle, WHITE);
            h.pop();
        }
        h.pop();
    }
}

fn mountains(h: &mut Canvas) {
    let dark = Color::rgb(0.55, 0.43, 0.33);
    let light = Color::rgb(0.65, 0.55, 0.41);

    // (x, size, shaded side tilted 10° on top)
    let peaks = [(-0.8, 0.6, true), (-0.05, 1.0, true), (0.8, 0.5, false)];

    h.identity();
    for (x, size, two_tone) in peaks {
        if two_tone {
            h.push();
            h.translate(x, 0.0, 0.0).scale(size, size, 1.0).scale(1.8, 0.5, 1.0);
            put(h, Shape::Triangle, dark);
            h.pop();

            h.push();
            h.translate(x, 0.0, 0.0)
                .scale(size, size, 1.0)
                .translate(0.0, 0.25, 0.0)
                .rotate_z_deg(10.0)
                .translate(0.0, -0.25, 0.0)
                .scale(1.8, 0.5, 1.0);
            put(h, Shape::Triangle, light);
            h.pop();
        } else {
            h.push();
            h.translate(x, 0.0, 0.0).scale(size, size, 1.0).scale(1.8, 0.5, 1.0);
            put(h, Shape::Triangle, light);
            h.pop();
        }
    }
}

fn ground(h: &mut Canvas) {
    h.identity().push();
    h.scale(2.0, 1.0, 1.0).translate(0.0, -0.5, 0.0);
    put(h, Shape::Square, Color::rgb(0.33, 0.93, 0.62));
    h.pop();

    h.push();
    h.translate(-0.5, -0.1, 0.0)
        .scale(2.0, 2.0, 1.0)
        .rotate_z_deg(55.0)
        .translate(0.0, -0.5, 0.0)
        .scale(0.8, 1.0, 1.0);
    put(h, Shape::Triangle, Color::rgb(0.27, 0.69, 0.13));
    h.pop();

    let left = Color::rgb(0.12, 0.6, 0.05);
    let middle = Color::rgb(0.25, 0.55, 0.10);
    let right = Color::rgb(0.21, 0.45, 0.13);

    for (x, y, size) in [
        (-0.9, -0.6, 0.2),
        (-0.32, -0.59, 0.25),
        (-0.05, -1.03, 0.4),
        (1.0, -0.42, 0.3),
    ] {
        h.push();
        h.translate(x, y, 0.0).scale(size, size, 1.0);
        for (dx, color) in [(-0.5, left), (0.5, right)] {
            h.push();
            h.translate(dx, -0.05, 0.0).scale(0.7, 0.7, 1.0).scale(0.4, 0.3, 1.0);
            put(h, Shape::Circle, color);
            h.pop();
        }
        h.push();
        h.scale(0.4, 0.3, 1.0);
        put(h, Shape::Circle, middle);
        h.pop();
        h.pop();
    }
}

fn trees(h: &mut Canvas) {
    let trunk = Color::rgb(0.47, 0.24, 0.26);
    let leaves = [
        (0.3, 1.1, Color::rgb(0.30, 0.50, 0.25)),
        (0.4, 1.2, Color::rgb(0.40, 0.75, 0.37)),
        (0.5, 1.3, Color::rgb(0.58, 0.80, 0.38)),
    ];

    h.identity();
    for (x, size) in [(0.8, 0.3), (0.52, 0.333), (0.25, 0.25)] {
        h.push();
        h.translate(x, 0.0, 0.0).scale(size, size, 1.0).translate(0.0, 1.1, 0.0);

        h.push();
        h.translate(0.0, -0.65, 0.0).scale(0.2, 1.0, 1.0);
        put(h, Shape::Square, trunk);
        h.pop();

        for (y, width, color) in leaves {
            h.push();
            h.translate(0.0, y, 0.0).scale(width, 1.0, 1.0);
            put(h, Shape::Triangle, color);
            h.pop();
        }
        h.pop();
    }
}

fn river(h: &mut Canvas) {
    h.identity().push();
    h.translate(0.0, -0.17, 0.0).scale(2.0, 0.25, 1.0);
    put(h, Shape::Square, Color::rgb(0.14, 0.43, 0.95));
    h.pop();

    for (x, y) in [(0.0, -0.13), (-0.7, -0.17), (0.7, -0.24)] {
        h.push();
        h.translate(x, y, 0.0).scale(0.3, 0.003, 1.0);
        put(h, Shape::Square, CLOUD);
        h.pop();
    }
}

fn boats(h: &mut Canvas, x1: f32, x2: f32) {
    let purple = Color::rgb(0.4, 0.0, 0.5);
    let red = Color::rgb(1.0, 0.0, 0.0);

    h.identity();
    boat(h, x1, -0.09, 0.2, purple);
    boat(h, x2, -0.15, 0.3, red);
}

fn boat(h: &mut Canvas, x: f32, y: f32, size: f32, sail: Color) {
    h.push();
    h.translate(x, y, 0.0).scale(size, size, 1.0);

    h.push();
    h.translate(0.0, 0.35, 0.0)
        .scale(0.45, 0.55, 1.0)
        .translate(0.5, 0.0, 0.0)
        .rotate_z_deg(-90.0);
    put(h, Shape::Triangle, sail);
    h.pop();

    // Mast, then the stay running down from its top.
    h.push();
    h.translate(0.0, 0.3, 0.0).scale(0.02, 0.8, 1.0);
    put(h, Shape::Square, BLACK);
    h.pop();

    h.push();
    h.translate(0.0, 0.6, 0.0)
        .rotate_z_deg(-35.0)
        .scale(0.007, 0.8, 1.0)
        .translate(0.0, -0.5, 0.0);
    put(h, Shape::Square, BLACK);
    h.pop();

    h.push();
    h.scale(1.0, 0.2, 1.0).translate(0.0, -0.5, 0.0);
    put(h, Shape::Square, CLOUD);
    h.pop();

    for end in [0.5, -0.5] {
        h.push();
        h.translate(end, 0.0, 0.0)
            .scale(0.2, 0.2, 1.0)
            .translate(0.0, -0.5, 0.0)
            .rotate_z_deg(180.0);
        put(h, Shape::Triangle, CLOUD);
        h.pop();
    }

    h.pop();
}

fn house(h: &mut Canvas) {
    let roof = Color::rgb(0.96, 0.35, 0.13);
    let wall = Color::rgb(0.9, 0.9, 0.9);
    let window = Color::rgb(0.93, 0.69, 0.13);

    h.identity().push();
    h.translate(-0.65, -0.45, 0.0).scale(0.28, 0.22, 1.0);

    h.push();
    h.scale(1.0, 0.9, 1.0).translate(0.0, 0.5, 0.0);
    put(h, Shape::Square, roof);
    for side in [0.5, -0.5] {
        h.push();
        h.translate(side, 0.0, 0.0).scale(0.8, 1.0, 1.0);
        put(h, Shape::Triangle, roof);
        h.pop();
    }
    h.pop();

    h.push();
    h.scale(1.5, 1.0, 1.0).translate(0.0, -0.5, 0.0);
    put(h, Shape::Square, wall);
    h.pop();

    h.push();
    h.translate(0.0, -0.4, 0.0).scale(0.25, 0.6, 1.0).translate(0.0, -0.5, 0.0);
    put(h, Shape::Square, window);
    h.pop();

    for x in [-0.5, 0.5] {
        h.push();
        h.translate(x, -0.2, 0.0).scale(0.25, 0.25, 1.0).translate(0.0, -0.5, 0.0);
        put(h, Shape::Square, window);
        h.pop();
    }

    h.pop();
}

fn car(h: &mut Canvas) {
    let body = Color::rgb(0.27, 0.58, 0.85);
    let roof = Color::rgb(0.14, 0.33, 0.75);
    let glass = Color::rgb(0.9, 0.9, 0.9);
    let hub = Color::rgb(0.5, 0.5, 0.5);

    h.identity().push();
    h.translate(-0.55, -0.75, 0.0).scale(0.2, 0.2, 1.0);

    for x in [-0.6, 0.6] {
        h.push();
        h.translate(x, -0.55, 0.0).scale(0.25, 0.25, 1.0);
        put(h, Shape::Circle, BLACK);
        h.scale(0.8, 0.8, 1.0);
        put(h, Shape::Circle, hub);
        h.pop();
    }

    h.push();
    h.scale(0.7, 0.5, 1.0);
    put(h, Shape::Circle, roof);
    h.pop();

    h.push();
    h.scale(0.7, 0.5, 1.0);
    put(h, Shape::Square, glass);
    h.pop();

    h.push();
    h.scale(1.8, 0.5, 1.0).translate(0.0, -0.5, 0.0);
    put(h, Shape::Square, body);
    h.pop();

    for x in [-0.9, 0.9] {
        h.push();
        h.translate(x, 0.0, 0.0).scale(0.6, 0.5, 1.0).translate(0.0, -0.5, 0.0);
        put(h, Shape::Triangle, body);
        h.pop();
    }

    h.pop();
}

fn windmills(h: &mut Canvas, blade_deg: f32) {
    h.identity();
    windmill(h, 0.47, 0.04, 0.35, blade_deg);
    windmill(h, 0.7, 0.05, 0.5, blade_deg);
}

fn windmill(h: &mut Canvas, x: f32, y: f32, size: f32, blade_deg: f32) {
    let blade = Color::rgb(0.82, 0.78, 0.2);
    let pole = Color::rgb(0.2, 0.2, 0.2);

    h.push();
    h.translate(x, y, 0.0).scale(size, size, 1.0);

    h.push();
    h.scale(0.07, 1.0, 1.0).translate(0.0, -0.5, 0.0);
    put(h, Shape::Square, pole);
    h.pop();

    for i in 0..4 {
        h.push();
        h.rotate_z_deg(90.0 * i as f32 + blade_deg)
            .scale(0.18, 0.5, 1.0)
            .translate(0.0, -0.5, 0.0);
        put(h, Shape::Triangle, blade);
        h.pop();
    }

    h.push();
    h.scale(0.07, 0.07, 1.0);
    put(h, Shape::Circle, BLACK);
    h.pop();

    h.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_engine::math::Vec3;

    fn origin_of(d: &ShapeDraw) -> Vec3 {
        d.model.transform_point3(Vec3::ZERO)
    }

    fn count(draws: &[ShapeDraw], shape: Shape) -> usize {
        draws.iter().filter(|d| d.shape == shape).count()
    }

    // ── composition ───────────────────────────────────────────────────────

    #[test]
    fn draw_count_is_stable() {
        let draws = compose(&Pose::default());
        // sky 1, clouds 3, moon 5, stars 25, mountains 5, ground 2 + 12,
        // trees 12, river 4, boats 2 x 6, house 7, car 9, windmills 2 x 6
        assert_eq!(draws.len(), 109);
    }

    #[test]
    fn shape_mix() {
        let draws = compose(&Pose::default());
        assert_eq!(count(&draws, Shape::Circle), 3 + 1 + 12 + 5 + 2);
        assert_eq!(count(&draws, Shape::Square), 1 + 4 + 5 + 1 + 3 + 4 + 6 + 5 + 2 + 2);
        assert_eq!(count(&draws, Shape::Triangle), 53);
    }

    #[test]
    fn sky_comes_first_and_covers_top_half() {
        let draws = compose(&Pose::default());
        let sky = &draws[0];
        assert_eq!(sky.shape, Shape::Square);
        assert_eq!(sky.color, BLACK);
        let top_right = sky.model.transform_point3(Vec3::new(0.5, 0.5, 0.0));
        let bottom_left = sky.model.transform_point3(Vec3::new(-0.5, -0.5, 0.0));
        assert!((top_right - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-6);
        assert!((bottom_left - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-6);
    }

    // ── animation inputs ──────────────────────────────────────────────────

    #[test]
    fn boats_follow_pose() {
        let pose = Pose { boat1_x: -0.5, boat2_x: 0.25, ..Pose::default() };
        let draws = compose(&pose);
        let purple = Color::rgb(0.4, 0.0, 0.5);
        let red = Color::rgb(1.0, 0.0, 0.0);

        // Each sail sits 0.5 * size * 0.45 right of its boat's origin.
        let sail1 = origin_of(draws.iter().find(|d| d.color == purple).expect("purple sail"));
        let sail2 = origin_of(draws.iter().find(|d| d.color == red).expect("red sail"));
        assert!((sail1.x - (-0.5 + 0.2 * 0.45 * 0.5)).abs() < 1e-5);
        assert!((sail2.x - (0.25 + 0.3 * 0.45 * 0.5)).abs() < 1e-5);
    }

    #[test]
    fn star_scale_shrinks_stars() {
        let small = compose(&Pose { star_scale: 0.7, ..Pose::default() });
        let large = compose(&Pose { star_scale: 1.3, ..Pose::default() });
        // First star body follows sky, clouds and moon.
        let idx = 1 + 3 + 5;
        assert!(small[idx].model.x_axis.x < large[idx].model.x_axis.x);
        assert!((large[idx].model.x_axis.x - 0.006 * 1.3).abs() < 1e-7);
    }

    #[test]
    fn blades_turn_with_angle() {
        let still = compose(&Pose::default());
        let turned = compose(&Pose { blade_deg: 90.0, ..Pose::default() });
        let blade = Color::rgb(0.82, 0.78, 0.2);
        let a: Vec<Mat4> = still.iter().filter(|d| d.color == blade).map(|d| d.model).collect();
        let b: Vec<Mat4> = turned.iter().filter(|d| d.color == blade).map(|d| d.model).collect();
        assert_eq!(a.len(), 8);
        // A quarter turn maps blade i onto blade i + 1.
        assert!(a[1].abs_diff_eq(b[0], 1e-5));
    }

    #[test]
    fn everything_stays_near_the_canvas() {
        for d in compose(&Pose::default()) {
            let o = origin_of(&d);
            assert!(o.x.abs() <= 1.2 && o.y.abs() <= 1.2, "{:?} at {o}", d.shape);
        }
    }
}
