//! Exercise 3: reflection and refraction from a cube-map environment.
//!
//! A table set with a teapot, a glass slab, a half-textured earth and a ball
//! in a fence cage, all inside a six-panel sky. The camera circles the table
//! while the light circles the other way.

mod layout;
mod renderer;

pub use layout::{compose, EnvDraw, Material, Skin, Solid, SKY_DISTANCE};
pub use renderer::{EnvFrame, EnvironmentRenderer};

use std::f32::consts::TAU;
use std::path::PathBuf;

use atelier_engine::anim::Orbit;
use atelier_engine::color::Color;
use atelier_engine::controls::Toggle;
use atelier_engine::coords::Viewport;
use atelier_engine::input::{InputFrame, InputState, Key};
use atelier_engine::math::{Camera, Vec3};
use atelier_engine::render::{RenderCtx, RenderTarget};
use atelier_engine::time::FrameTime;

use crate::Scene;

#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentSettings {
    pub camera_radius: f32,
    pub camera_height: f32,
    /// Radians per 60 Hz frame; negative turns clockwise seen from above.
    pub camera_speed: f32,
    pub light_radius: f32,
    pub light_height: f32,
    pub light_speed: f32,
    /// How close to a full turn an orbit gets before it wraps.
    pub wrap_margin: f32,
    pub background: Color,
}

impl Default for EnvironmentSettings {
    fn default() -> Self {
        Self {
            camera_radius: 1.8,
            camera_height: 0.6,
            camera_speed: -0.003,
            light_radius: 3.0,
            light_height: 5.0,
            light_speed: 0.003,
            wrap_margin: 0.006,
            background: Color::gray(0.9),
        }
    }
}

pub struct Environment {
    settings: EnvironmentSettings,
    camera: Camera,
    camera_orbit: Orbit,
    light_orbit: Orbit,
    paused: Toggle,
    renderer: EnvironmentRenderer,
}

impl Environment {
    pub fn new(assets: impl Into<PathBuf>) -> Self {
        Self::with_settings(assets, EnvironmentSettings::default())
    }

    pub fn with_settings(assets: impl Into<PathBuf>, settings: EnvironmentSettings) -> Self {
        let camera = Camera {
            fovy_deg: 60.0,
            near: 0.01,
            far: 1000.0,
            ..Camera::default()
        };
        let mut scene = Self {
            camera_orbit: Orbit::new(TAU, settings.camera_speed, settings.wrap_margin),
            light_orbit: Orbit::new(0.0, settings.light_speed, settings.wrap_margin),
            camera,
            paused: Toggle::new("paused").bind(Key::Space),
            renderer: EnvironmentRenderer::new(assets),
            settings,
        };
        scene.place_camera();
        scene
    }

    pub fn eye(&self) -> Vec3 {
        self.camera.eye
    }

    /// Light position in eye space.
    pub fn light(&self) -> Vec3 {
        let a = self.light_orbit.angle;
        Vec3::new(
            self.settings.light_radius * a.sin(),
            self.settings.light_height,
            self.settings.light_radius * a.cos(),
        )
    }

    pub fn is_paused(&self) -> bool {
        self.paused.on
    }

    fn place_camera(&mut self) {
        self.camera
            .orbit_y(self.camera_orbit.angle, self.settings.camera_radius, self.settings.camera_height);
    }
}

impl Scene for Environment {
    fn name(&self) -> &'static str {
        "environment"
    }

    fn input(&mut self, _input: &InputState, frame: &InputFrame, _viewport: Viewport) {
        self.paused.apply(frame);
    }

    fn update(&mut self, time: FrameTime) {
        if self.paused.on {
            return;
        }
        let steps = time.steps();
        self.camera_orbit.advance(steps);
        self.light_orbit.advance(steps);
        self.place_camera();
    }

    fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) -> anyhow::Result<()> {
        let frame = EnvFrame {
            view: self.camera.view(),
            proj: self.camera.projection(ctx.viewport.aspect()),
            eye_world: self.camera.eye,
            light_eye: self.light(),
        };
        self.renderer.render(ctx, target, &frame, &compose())
    }

    fn clear_color(&self) -> Color {
        self.settings.background
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_frame() -> FrameTime {
        FrameTime::fixed(1.0 / 60.0, 1)
    }

    #[test]
    fn camera_starts_on_positive_z() {
        let scene = Environment::new("assets");
        assert!((scene.eye() - Vec3::new(0.0, 0.6, 1.8)).length() < 1e-4);
    }

    #[test]
    fn camera_and_light_circle_in_opposite_directions() {
        let mut scene = Environment::new("assets");
        for _ in 0..100 {
            scene.update(one_frame());
        }
        // 100 steps of 0.003 rad: camera at 2π - 0.3, light at +0.3.
        assert!(scene.eye().x < 0.0);
        assert!(scene.light().x > 0.0);
        assert!((scene.eye().length() - Vec3::new(0.0, 0.6, 1.8).length()).abs() < 1e-4);
        assert!((scene.light().y - 5.0).abs() < 1e-6);
    }

    #[test]
    fn space_pauses_the_orbits() {
        let mut scene = Environment::new("assets");
        let mut frame = InputFrame::default();
        frame.keys_pressed.insert(Key::Space);
        scene.input(&InputState::default(), &frame, Viewport::new(800.0, 800.0));
        assert!(scene.is_paused());

        let before = scene.eye();
        scene.update(one_frame());
        assert_eq!(scene.eye(), before);
    }

    #[test]
    fn light_orbit_wraps_to_zero() {
        let mut scene = Environment::new("assets");
        // Just past a full turn at 0.003 rad per step.
        for _ in 0..2_100 {
            scene.update(one_frame());
        }
        assert!(scene.light_orbit.angle < TAU - 0.006);
        assert!(scene.light_orbit.angle >= 0.0);
    }
}
