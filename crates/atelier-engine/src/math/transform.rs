use glam::{Mat3, Mat4, Vec3};

#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * std::f32::consts::PI / 180.0
}

/// `m * T(v)`
#[inline]
pub fn translate(m: Mat4, v: Vec3) -> Mat4 {
    m * Mat4::from_translation(v)
}

/// `m * S(v)`
#[inline]
pub fn scale(m: Mat4, v: Vec3) -> Mat4 {
    m * Mat4::from_scale(v)
}

/// `m * R(axis, radians)`. The axis need not be normalized; a zero axis
/// leaves `m` unchanged.
#[inline]
pub fn rotate(m: Mat4, radians: f32, axis: Vec3) -> Mat4 {
    match axis.try_normalize() {
        Some(axis) => m * Mat4::from_axis_angle(axis, radians),
        None => m,
    }
}

#[inline]
pub fn rotate_x(m: Mat4, radians: f32) -> Mat4 {
    m * Mat4::from_rotation_x(radians)
}

#[inline]
pub fn rotate_y(m: Mat4, radians: f32) -> Mat4 {
    m * Mat4::from_rotation_y(radians)
}

#[inline]
pub fn rotate_z(m: Mat4, radians: f32) -> Mat4 {
    m * Mat4::from_rotation_z(radians)
}

/// Perspective projection with vertical field of view in degrees.
pub fn perspective(fovy_deg: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
    Mat4::perspective_rh(deg_to_rad(fovy_deg), aspect, near, far)
}

pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_rh(eye, center, up)
}

/// Inverse-transpose of the upper 3x3, widened back to a 4x4 so it can sit
/// in a uniform block next to the other matrices. Singular input (a zero
/// scale axis) yields the plain upper 3x3 instead.
pub fn normal_matrix(m: Mat4) -> Mat4 {
    let upper = Mat3::from_mat4(m);
    let n = if upper.determinant().abs() > f32::EPSILON {
        upper.inverse().transpose()
    } else {
        upper
    };
    Mat4::from_mat3(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    // ── post-multiplication order ─────────────────────────────────────────

    #[test]
    fn translate_then_scale_scales_first() {
        // m = T * S, so a vertex is scaled and then moved.
        let m = scale(translate(Mat4::IDENTITY, Vec3::new(1.0, 0.0, 0.0)), Vec3::splat(2.0));
        let p = m.transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!(approx(p, Vec3::new(3.0, 0.0, 0.0)));
    }

    #[test]
    fn rotate_z_quarter_turn() {
        let m = rotate_z(Mat4::IDENTITY, deg_to_rad(90.0));
        let p = m.transform_point3(Vec3::X);
        assert!(approx(p, Vec3::Y));
    }

    #[test]
    fn rotate_about_unnormalized_axis() {
        let a = rotate(Mat4::IDENTITY, 0.7, Vec3::new(0.0, 5.0, 0.0));
        let b = rotate_y(Mat4::IDENTITY, 0.7);
        assert!(a.abs_diff_eq(b, 1e-6));
    }

    #[test]
    fn rotate_about_zero_axis_is_noop() {
        let m = translate(Mat4::IDENTITY, Vec3::ONE);
        assert_eq!(rotate(m, 1.0, Vec3::ZERO), m);
    }

    #[test]
    fn deg_to_rad_half_turn() {
        assert!((deg_to_rad(180.0) - std::f32::consts::PI).abs() < 1e-6);
    }

    // ── projection ────────────────────────────────────────────────────────

    #[test]
    fn perspective_maps_near_and_far_to_unit_depth() {
        let p = perspective(50.0, 1.0, 0.1, 1000.0);
        let near = p.project_point3(Vec3::new(0.0, 0.0, -0.1));
        let far = p.project_point3(Vec3::new(0.0, 0.0, -1000.0));
        assert!(near.z.abs() < 1e-4);
        assert!((far.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn perspective_rejects_bad_aspect() {
        assert_eq!(perspective(60.0, 0.0, 0.1, 10.0), perspective(60.0, 1.0, 0.1, 10.0));
    }

    #[test]
    fn look_at_puts_target_on_negative_z() {
        let v = look_at(Vec3::new(0.0, 0.0, 2.0), Vec3::ZERO, Vec3::Y);
        let p = v.transform_point3(Vec3::ZERO);
        assert!(approx(p, Vec3::new(0.0, 0.0, -2.0)));
    }

    // ── normal matrix ─────────────────────────────────────────────────────

    #[test]
    fn normal_matrix_keeps_normals_perpendicular_under_nonuniform_scale() {
        let m = scale(Mat4::IDENTITY, Vec3::new(2.0, 0.5, 1.0));
        // Surface tangent along (1, 1, 0) with normal (1, -1, 0).
        let tangent = m.transform_vector3(Vec3::new(1.0, 1.0, 0.0));
        let normal = normal_matrix(m).transform_vector3(Vec3::new(1.0, -1.0, 0.0));
        assert!(tangent.dot(normal).abs() < 1e-5);
    }

    #[test]
    fn normal_matrix_ignores_translation() {
        let m = translate(Mat4::IDENTITY, Vec3::new(5.0, 6.0, 7.0));
        assert!(normal_matrix(m).abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn normal_matrix_of_singular_falls_back() {
        let m = scale(Mat4::IDENTITY, Vec3::new(1.0, 0.0, 1.0));
        let n = normal_matrix(m);
        assert!(n.is_finite());
    }
}
