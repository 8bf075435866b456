use atelier_engine::color::Color;
use atelier_engine::math::{deg_to_rad, Mat4, Vec3};
use atelier_engine::texture::CubeFace;

use crate::Hierarchy;

/// Distance of each sky panel from the origin, and its scale.
pub const SKY_DISTANCE: f32 = 200.0;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Solid {
    Cube,
    Sphere,
    Teapot,
}

/// 2D image bound alongside the cube map.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Skin {
    Face(CubeFace),
    Wood,
    Earth,
    Cage,
    /// Opaque white; used where the image is mixed out entirely.
    Blank,
}

impl Skin {
    pub fn all() -> Vec<Skin> {
        let mut skins: Vec<Skin> = CubeFace::ALL.iter().map(|f| Skin::Face(*f)).collect();
        skins.extend([Skin::Wood, Skin::Earth, Skin::Cage, Skin::Blank]);
        skins
    }
}

/// How a surface combines its image with lit, environment-mapped colour.
///
/// The fragment colour is `mix(image, phong + env_factor * env, texture_mix)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    /// Ambient and diffuse base colour.
    pub color: Color,
    pub skin: Skin,
    pub texture_mix: f32,
    pub env_factor: f32,
    /// Sample the environment along the refracted ray instead of the reflected one.
    pub refract: bool,
}

impl Material {
    /// Image only.
    pub fn textured(skin: Skin) -> Self {
        Self {
            color: Color::BLACK,
            skin,
            texture_mix: 0.0,
            env_factor: 1.0,
            refract: false,
        }
    }

    /// Half image, half lit reflection.
    pub fn blended(color: Color, skin: Skin) -> Self {
        Self {
            color,
            skin,
            texture_mix: 0.5,
            env_factor: 1.0,
            refract: false,
        }
    }

    /// Lit reflection with no image.
    pub fn reflective(color: Color) -> Self {
        Self {
            color,
            skin: Skin::Blank,
            texture_mix: 1.0,
            env_factor: 1.0,
            refract: false,
        }
    }

    pub fn refractive(mut self) -> Self {
        self.refract = true;
        self
    }

    pub fn env_factor(mut self, f: f32) -> Self {
        self.env_factor = f;
        self
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EnvDraw {
    pub solid: Solid,
    pub material: Material,
    pub model: Mat4,
}

fn draw(h: &mut Hierarchy<EnvDraw>, solid: Solid, material: Material) {
    h.emit(|model| EnvDraw { solid, material, model });
}

fn uniform(h: &mut Hierarchy<EnvDraw>, s: f32) -> &mut Hierarchy<EnvDraw> {
    h.scale(s, s, s)
}

/// Sky panels, table, teapot, slab, earth and the caged ball, in draw order.
pub fn compose() -> Vec<EnvDraw> {
    let mut h = Hierarchy::new();
    skybox(&mut h);
    table(&mut h);
    teapot(&mut h);
    slab(&mut h);
    earth(&mut h);
    caged_sphere(&mut h);
    h.finish()
}

fn skybox(h: &mut Hierarchy<EnvDraw>) {
    let d = SKY_DISTANCE;
    let panels = [
        (CubeFace::NegZ, Vec3::new(0.0, 0.0, -d), Vec3::Y, 180.0),
        (CubeFace::PosZ, Vec3::new(0.0, 0.0, d), Vec3::Y, 0.0),
        (CubeFace::PosX, Vec3::new(d, 0.0, 0.0), Vec3::Y, 90.0),
        (CubeFace::NegX, Vec3::new(-d, 0.0, 0.0), Vec3::Y, -90.0),
        (CubeFace::PosY, Vec3::new(0.0, d, 0.0), Vec3::X, -90.0),
        (CubeFace::NegY, Vec3::new(0.0, -d, 0.0), Vec3::X, 90.0),
    ];
    for (face, at, axis, degrees) in panels {
        h.push().translate(at.x, at.y, at.z);
        uniform(h, d).rotate(deg_to_rad(degrees), axis);
        draw(h, Solid::Cube, Material::textured(Skin::Face(face)));
        h.pop();
    }
}

fn table(h: &mut Hierarchy<EnvDraw>) {
    h.push().scale(1.5, 0.01, 1.0);
    draw(h, Solid::Sphere, Material::textured(Skin::Wood));
    h.pop();

    for (x, z) in [(1.0, -0.5), (-1.0, -0.5), (1.0, 0.5), (-1.0, 0.5)] {
        h.push().translate(x, 0.0, z).translate(0.0, -1.0, 0.0).scale(0.1, 2.0, 0.1);
        draw(h, Solid::Cube, Material::textured(Skin::Wood));
        h.pop();
    }
}

fn teapot(h: &mut Hierarchy<EnvDraw>) {
    h.push().translate(0.0, 0.4, -0.2);
    uniform(h, 0.05);
    draw(h, Solid::Teapot, Material::reflective(Color::BLACK));
    h.pop();
}

fn slab(h: &mut Hierarchy<EnvDraw>) {
    h.push().translate(-0.5, 0.25, 0.5).scale(0.3, 0.5, 0.05);
    draw(h, Solid::Cube, Material::reflective(Color::BLACK).refractive());
    h.pop();
}

fn earth(h: &mut Hierarchy<EnvDraw>) {
    h.push().translate(0.0, 0.0, 0.77);
    uniform(h, 0.25).translate(0.0, 1.0, 0.0);
    draw(h, Solid::Sphere, Material::blended(Color::gray(0.3), Skin::Earth).env_factor(0.0));
    h.pop();
}

fn caged_sphere(h: &mut Hierarchy<EnvDraw>) {
    h.push().translate(0.6, 0.0, 0.4);
    uniform(h, 0.12).translate(0.0, 1.32, 0.0);
    draw(h, Solid::Sphere, Material::reflective(Color::rgb(0.0, 0.0, 0.8)));
    h.pop();

    h.push().translate(0.6, 0.0, 0.4);
    uniform(h, 0.12).translate(0.0, 1.35, 0.0).rotate(deg_to_rad(-10.0), Vec3::Y);
    uniform(h, 2.5);
    draw(h, Solid::Cube, Material::blended(Color::BLACK, Skin::Cage).env_factor(0.4));
    h.pop();
}
