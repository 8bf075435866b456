//! Exercise 4: shadow mapping.
//!
//! A teapot and a ball on a floor slab, lit by a point light whose depth
//! view is rendered first and then consulted by the camera pass.

mod layout;
mod renderer;

pub use layout::{compose, ShadowDraw, Solid, FLOOR_Y};
pub use renderer::{is_lit, shadow_coord, ShadowFrame, ShadowsRenderer};

use std::path::PathBuf;

use atelier_engine::anim::Spin;
use atelier_engine::color::Color;
use atelier_engine::controls::{Slider, Toggle};
use atelier_engine::coords::Viewport;
use atelier_engine::input::{InputFrame, InputState, Key};
use atelier_engine::math::{look_at, perspective, Camera, Vec3};
use atelier_engine::render::{RenderCtx, RenderTarget};
use atelier_engine::time::FrameTime;

use crate::Scene;

#[derive(Debug, Clone, PartialEq)]
pub struct ShadowsSettings {
    pub camera_radius: f32,
    /// Radians per 60 Hz frame while animating.
    pub camera_speed: f32,
    /// Light x and y; z comes from the slider.
    pub light_xy: (f32, f32),
    pub light_fovy_deg: f32,
}

impl Default for ShadowsSettings {
    fn default() -> Self {
        Self {
            camera_radius: 2.0,
            camera_speed: -0.01,
            light_xy: (2.0, 2.0),
            light_fovy_deg: 50.0,
        }
    }
}

pub struct Shadows {
    settings: ShadowsSettings,
    camera: Camera,
    orbit: Spin,
    animate: Toggle,
    light_z: Slider,
    renderer: ShadowsRenderer,
}

impl Shadows {
    pub fn new(assets: impl Into<PathBuf>, shadow_map_size: u32) -> Self {
        Self::with_settings(assets, shadow_map_size, ShadowsSettings::default())
    }

    pub fn with_settings(assets: impl Into<PathBuf>, shadow_map_size: u32, settings: ShadowsSettings) -> Self {
        let mut scene = Self {
            camera: Camera {
                target: Vec3::new(0.0, FLOOR_Y, 0.0),
                ..Camera::default()
            },
            orbit: Spin::new(0.0, settings.camera_speed),
            animate: Toggle::new("animate").bind(Key::A),
            light_z: Slider::new("light z")
                .range(-5.0, 5.0)
                .step(0.1)
                .value(-2.0)
                .bind(Key::ArrowLeft, Key::ArrowRight),
            renderer: ShadowsRenderer::new(assets, shadow_map_size),
            settings,
        };
        scene.place_camera();
        scene
    }

    pub fn eye(&self) -> Vec3 {
        self.camera.eye
    }

    pub fn light(&self) -> Vec3 {
        let (x, y) = self.settings.light_xy;
        Vec3::new(x, y, self.light_z.value)
    }

    pub fn is_animating(&self) -> bool {
        self.animate.on
    }

    pub fn frame(&self, aspect: f32) -> ShadowFrame {
        let light = self.light();
        ShadowFrame {
            view: self.camera.view(),
            proj: self.camera.projection(aspect),
            light_view: look_at(light, self.camera.target, Vec3::Y),
            light_proj: perspective(self.settings.light_fovy_deg, 1.0, self.camera.near, self.camera.far),
            light_pos: light,
        }
    }

    fn place_camera(&mut self) {
        self.camera.orbit_y(self.orbit.angle, self.settings.camera_radius, 0.0);
    }
}

impl Scene for Shadows {
    fn name(&self) -> &'static str {
        "shadows"
    }

    fn input(&mut self, input: &InputState, frame: &InputFrame, _viewport: Viewport) {
        self.animate.apply(frame);
        self.light_z.apply(input, frame);
    }

    fn update(&mut self, time: FrameTime) {
        if !self.animate.on {
            return;
        }
        self.orbit.advance(time.steps());
        self.place_camera();
    }

    fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) -> anyhow::Result<()> {
        let frame = self.frame(ctx.viewport.aspect());
        self.renderer.render(ctx, target, &frame, &compose())
    }

    fn clear_color(&self) -> Color {
        Color::BLACK
    }
}
