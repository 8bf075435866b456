//! Exercise 5: ray tracing seven spheres in a fragment shader.
//!
//! Every pixel casts one ray from the camera, takes one reflection bounce and
//! tests the light for occluders. `R` and `S` switch reflections and shadows;
//! the arrow keys slide the light along X. [`tracer`] is the CPU version of
//! the same shader.

mod renderer;
pub mod tracer;

pub use renderer::RaytraceRenderer;
pub use tracer::{render_image, TraceSettings};

use atelier_engine::color::Color;
use atelier_engine::controls::{Slider, Toggle};
use atelier_engine::coords::Viewport;
use atelier_engine::input::{InputFrame, InputState, Key};
use atelier_engine::render::{RenderCtx, RenderTarget};
use atelier_engine::time::FrameTime;

use crate::Scene;

pub struct Raytrace {
    light_x: Slider,
    reflections: Toggle,
    shadows: Toggle,
    renderer: RaytraceRenderer,
}

impl Default for Raytrace {
    fn default() -> Self {
        Self::new()
    }
}

impl Raytrace {
    pub fn new() -> Self {
        let defaults = TraceSettings::default();
        Self {
            light_x: Slider::new("light x")
                .range(-5.0, 5.0)
                .step(0.05)
                .value(defaults.light.x)
                .bind(Key::ArrowLeft, Key::ArrowRight),
            reflections: Toggle::new("reflections").checked(defaults.reflections).bind(Key::R),
            shadows: Toggle::new("shadows").checked(defaults.shadows).bind(Key::S),
            renderer: RaytraceRenderer::new(),
        }
    }

    pub fn settings(&self) -> TraceSettings {
        let mut light = TraceSettings::default().light;
        light.x = self.light_x.value;
        TraceSettings {
            light,
            reflections: self.reflections.on,
            shadows: self.shadows.on,
        }
    }
}

impl Scene for Raytrace {
    fn name(&self) -> &'static str {
        "raytrace"
    }

    fn input(&mut self, input: &InputState, frame: &InputFrame, _viewport: Viewport) {
        self.light_x.apply(input, frame);
        self.reflections.apply(frame);
        self.shadows.apply(frame);
    }

    fn update(&mut self, _time: FrameTime) {}

    fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) -> anyhow::Result<()> {
        self.renderer.render(ctx, target, &self.settings())
    }

    fn clear_color(&self) -> Color {
        Color::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 800.0)
    }

    #[test]
    fn starts_with_everything_on() {
        let s = Raytrace::new().settings();
        assert!(s.reflections && s.shadows);
        assert_eq!(s.light.to_array(), [-2.0, 1.5, 2.0]);
    }

    #[test]
    fn r_and_s_flip_the_features() {
        let mut scene = Raytrace::new();
        let mut frame = InputFrame::default();
        frame.keys_pressed.insert(Key::R);
        scene.input(&InputState::default(), &frame, viewport());
        assert!(!scene.settings().reflections);
        assert!(scene.settings().shadows);

        let mut frame = InputFrame::default();
        frame.keys_pressed.insert(Key::S);
        scene.input(&InputState::default(), &frame, viewport());
        assert!(!scene.settings().shadows);
    }

    #[test]
    fn light_slider_stops_at_its_range() {
        let mut scene = Raytrace::new();
        let mut input = InputState::default();
        input.keys_down.insert(Key::ArrowLeft);
        for _ in 0..200 {
            scene.input(&input, &InputFrame::default(), viewport());
        }
        assert_eq!(scene.settings().light.x, -5.0);
        assert_eq!(scene.settings().light.y, 1.5);
    }
}
