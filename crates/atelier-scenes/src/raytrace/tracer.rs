//! CPU twin of `shaders/raytrace.wgsl`.
//!
//! Same sphere table, same intersection and shading rules, one primary ray
//! per pixel. Used for offline snapshots and to test the shading rules
//! without a GPU.

use glam::Vec3;
use image::{Rgba, RgbaImage};

/// Offset along the normal or shadow ray that keeps a secondary ray from
/// hitting the surface it starts on.
pub const SURFACE_BIAS: f32 = 0.001;
pub const AMBIENT: f32 = 0.3;
/// Ambient term for a sphere seen in a reflection.
pub const REFLECTED_AMBIENT: f32 = 0.2;

pub const CAMERA: Vec3 = Vec3::new(0.0, 0.0, 2.0);
pub const DEFAULT_LIGHT: Vec3 = Vec3::new(-2.0, 1.5, 2.0);

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub color: Vec3,
    pub reflectivity: f32,
    pub specular: f32,
}

impl Sphere {
    const fn new(center: Vec3, radius: f32, color: Vec3, specular: f32) -> Self {
        Self {
            center,
            radius,
            color,
            reflectivity: 0.3,
            specular,
        }
    }

    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize()
    }
}

pub const SPHERES: [Sphere; 7] = [
    Sphere::new(Vec3::new(-0.4, -1.0, 0.0), 0.5, Vec3::new(0.2, 0.8, 0.2), 5.0),
    Sphere::new(Vec3::new(0.5, -0.9, -0.15), 0.5, Vec3::new(0.4, 0.8, 0.4), 7.0),
    Sphere::new(Vec3::new(0.9, 0.0, -0.25), 0.5, Vec3::new(0.0, 0.8, 0.8), 9.0),
    Sphere::new(Vec3::new(0.6, 0.8, -0.43), 0.5, Vec3::new(0.0, 0.5, 0.8), 11.0),
    Sphere::new(Vec3::new(-0.3, 1.2, -0.45), 0.5, Vec3::new(0.0, 0.2, 0.8), 13.0),
    Sphere::new(Vec3::new(-1.0, 0.6, -0.6), 0.5, Vec3::new(0.5, 0.1, 0.8), 15.0),
    Sphere::new(Vec3::new(-0.7, 0.0, -1.15), 0.6, Vec3::new(0.8, 0.2, 0.8), 17.0),
];

/// Light position and the two feature switches.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TraceSettings {
    pub light: Vec3,
    pub reflections: bool,
    pub shadows: bool,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            light: DEFAULT_LIGHT,
            reflections: true,
            shadows: true,
        }
    }
}

/// Nearer root of the ray/sphere quadratic, or 0 when the ray misses.
///
/// Only a positive result is a hit; a ray starting inside the sphere gets a
/// negative near root and so does not hit it.
pub fn intersect_sphere(ray: &Ray, sphere: &Sphere) -> f32 {
    let oc = ray.origin - sphere.center;
    let a = ray.direction.dot(ray.direction);
    let b = 2.0 * oc.dot(ray.direction);
    let c = oc.dot(oc) - sphere.radius * sphere.radius;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return 0.0;
    }
    let root = discriminant.sqrt();
    let p1 = (-b - root) / (2.0 * a);
    let p2 = (-b + root) / (2.0 * a);
    p1.min(p2)
}

/// Index and distance of the nearest sphere in front of the ray.
pub fn closest_hit(ray: &Ray, spheres: &[Sphere]) -> Option<(usize, f32)> {
    spheres
        .iter()
        .enumerate()
        .map(|(i, s)| (i, intersect_sphere(ray, s)))
        .filter(|(_, t)| *t > 0.0)
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

pub fn in_shadow(point: Vec3, light: Vec3, sphere: &Sphere) -> bool {
    let direction = (light - point).normalize();
    let ray = Ray {
        origin: point + SURFACE_BIAS * direction,
        direction,
    };
    intersect_sphere(&ray, sphere) > 0.0
}

pub fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    d - 2.0 * d.dot(n) * n
}

fn specular(light_dir: Vec3, reflected: Vec3, exponent: f32) -> f32 {
    let base = light_dir.dot(reflected).max(0.0);
    if base == 0.0 { 0.0 } else { base.powf(exponent) }
}

/// Ray through the pixel-centre fraction `(sx, sy)` of the canvas, y up.
pub fn primary_ray(sx: f32, sy: f32, aspect: f32) -> Ray {
    Ray {
        origin: CAMERA,
        direction: Vec3::new((sx * 2.0 - 1.0) * aspect, sy * 2.0 - 1.0, -1.0).normalize(),
    }
}

/// Colour seen along `ray`. Black on a miss; channels may exceed 1.
pub fn trace(ray: &Ray, spheres: &[Sphere], settings: &TraceSettings) -> Vec3 {
    let Some((index, t)) = closest_hit(ray, spheres) else { return Vec3::ZERO };
    let sphere = &spheres[index];

    let hit = ray.origin + t * ray.direction;
    let normal = sphere.normal_at(hit);
    let bounce = Ray {
        origin: hit + SURFACE_BIAS * normal,
        direction: reflect(ray.direction, normal),
    };

    let base = match closest_hit(&bounce, spheres) {
        Some((other, t2)) if settings.reflections => {
            let seen = &spheres[other];
            let point = bounce.origin + t2 * bounce.direction;
            let n2 = seen.normal_at(point);
            let onward = reflect(bounce.direction, n2);
            let l2 = (settings.light - point).normalize();
            let lit = seen.color * REFLECTED_AMBIENT
                + n2.dot(l2).max(0.0) * seen.color
                + Vec3::splat(specular(l2, onward, seen.specular));
            sphere.color.lerp(lit, sphere.reflectivity)
        }
        _ => sphere.color,
    };

    let shadowed = spheres
        .iter()
        .enumerate()
        .any(|(i, other)| i != index && in_shadow(hit, settings.light, other));

    let ambient = base * AMBIENT;
    if settings.shadows && shadowed {
        return ambient;
    }
    let l = (settings.light - hit).normalize();
    ambient + normal.dot(l).max(0.0) * base + Vec3::splat(specular(l, bounce.direction, sphere.specular))
}

/// Traces one ray per pixel. Row 0 is the top of the image.
pub fn render_image(width: u32, height: u32, settings: &TraceSettings) -> RgbaImage {
    let (w, h) = (width.max(1), height.max(1));
    let aspect = w as f32 / h as f32;
    log::debug!("tracing {w}x{h} ({} spheres)", SPHERES.len());

    RgbaImage::from_fn(w, h, |x, y| {
        let sx = (x as f32 + 0.5) / w as f32;
        let sy = 1.0 - (y as f32 + 0.5) / h as f32;
        let c = trace(&primary_ray(sx, sy, aspect), &SPHERES, settings);
        Rgba([to_u8(c.x), to_u8(c.y), to_u8(c.z), 255])
    })
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere_at_origin() -> Sphere {
        Sphere::new(Vec3::ZERO, 0.5, Vec3::ONE, 5.0)
    }

    fn ray_to(target: Vec3) -> Ray {
        Ray {
            origin: CAMERA,
            direction: (target - CAMERA).normalize(),
        }
    }

    // ── intersection ──────────────────────────────────────────────────────

    #[test]
    fn head_on_hit_returns_near_root() {
        let t = intersect_sphere(&ray_to(Vec3::ZERO), &unit_sphere_at_origin());
        assert!((t - 1.5).abs() < 1e-5);
    }

    #[test]
    fn miss_returns_zero() {
        let ray = Ray {
            origin: CAMERA,
            direction: Vec3::Y,
        };
        assert_eq!(intersect_sphere(&ray, &unit_sphere_at_origin()), 0.0);
    }

    #[test]
    fn ray_from_inside_is_not_a_hit() {
        let ray = Ray {
            origin: Vec3::ZERO,
            direction: Vec3::X,
        };
        assert!(intersect_sphere(&ray, &unit_sphere_at_origin()) < 0.0);
    }

    #[test]
    fn closest_hit_picks_the_nearer_sphere() {
        let near = Sphere::new(Vec3::new(0.0, 0.0, 0.5), 0.2, Vec3::X, 5.0);
        let far = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.2, Vec3::Y, 5.0);
        let hit = closest_hit(&ray_to(Vec3::ZERO), &[far, near]);
        assert_eq!(hit.map(|(i, _)| i), Some(1));
    }

    // ── shading ───────────────────────────────────────────────────────────

    #[test]
    fn miss_is_black() {
        let ray = Ray {
            origin: CAMERA,
            direction: Vec3::Z,
        };
        assert_eq!(trace(&ray, &SPHERES, &TraceSettings::default()), Vec3::ZERO);
    }

    #[test]
    fn canvas_centre_looks_between_the_spheres() {
        let c = trace(&primary_ray(0.5, 0.5, 1.0), &SPHERES, &TraceSettings::default());
        assert_eq!(c, Vec3::ZERO);
    }

    #[test]
    fn every_sphere_is_visible_from_the_camera() {
        for (i, s) in SPHERES.iter().enumerate() {
            let hit = closest_hit(&ray_to(s.center), &SPHERES);
            assert!(hit.is_some(), "sphere {i} not hit");
        }
    }

    #[test]
    fn lone_sphere_without_reflection_gets_full_phong() {
        let sphere = unit_sphere_at_origin();
        let settings = TraceSettings {
            light: Vec3::new(0.0, 0.0, 5.0),
            reflections: false,
            shadows: true,
        };
        // Light behind the camera: diffuse 1, specular 1.
        let c = trace(&ray_to(Vec3::ZERO), &[sphere], &settings);
        assert!((c - Vec3::splat(0.3 + 1.0 + 1.0)).length() < 1e-4);
    }

    #[test]
    fn shadowed_point_keeps_only_ambient() {
        let lit = unit_sphere_at_origin();
        let blocker = Sphere::new(Vec3::new(0.0, 0.0, 3.0), 0.3, Vec3::ONE, 5.0);
        let settings = TraceSettings {
            light: Vec3::new(0.0, 0.0, 5.0),
            reflections: false,
            shadows: true,
        };
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 1.0),
            direction: -Vec3::Z,
        };
        let c = trace(&ray, &[lit, blocker], &settings);
        assert!((c - Vec3::splat(0.3)).length() < 1e-5);

        let c = trace(&ray, &[lit, blocker], &TraceSettings { shadows: false, ..settings });
        assert!(c.x > 2.0);
    }

    #[test]
    fn shadows_never_brighten() {
        let on = TraceSettings::default();
        let off = TraceSettings { shadows: false, ..on };
        for s in &SPHERES {
            let ray = ray_to(s.center);
            let a = trace(&ray, &SPHERES, &on);
            let b = trace(&ray, &SPHERES, &off);
            assert!(a.cmple(b + Vec3::splat(1e-6)).all());
        }
    }

    #[test]
    fn reflection_mixes_in_the_neighbour() {
        let mirror = unit_sphere_at_origin();
        let neighbour = Sphere::new(Vec3::new(0.0, 0.0, 1.2), 0.1, Vec3::new(1.0, 0.0, 0.0), 5.0);
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 0.9),
            direction: -Vec3::Z,
        };
        let settings = TraceSettings {
            light: Vec3::new(0.0, 5.0, 0.0),
            reflections: true,
            shadows: false,
        };
        let with = trace(&ray, &[mirror, neighbour], &settings);
        let without = trace(&ray, &[mirror, neighbour], &TraceSettings { reflections: false, ..settings });
        assert!(with.y < without.y);
    }

    // ── image ─────────────────────────────────────────────────────────────

    #[test]
    fn image_has_requested_size_and_black_centre() {
        let img = render_image(33, 21, &TraceSettings::default());
        assert_eq!(img.dimensions(), (33, 21));
        assert_eq!(img.get_pixel(16, 10).0, [0, 0, 0, 255]);
    }

    #[test]
    fn upper_spheres_reach_the_top_quarter() {
        // Sphere 4 sits at y = 1.2, above the canvas centre.
        let img = render_image(64, 64, &TraceSettings::default());
        assert!((0..16).any(|y| (0..64).any(|x| img.get_pixel(x, y).0[2] > 0)));
    }
}
