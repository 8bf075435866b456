//! Exercise 2: the same kind of lit solids under three lighting models.
//!
//! The window is split into three equal columns: flat shading on the left,
//! per-vertex (Gouraud) in the middle and per-fragment (Phong) on the right.
//! Each column has its own arrangement and its own drag rotation; a drag
//! that starts in a column turns only that column. Two sliders move the
//! camera along Z and the light along X for all three at once.

mod layout;
mod renderer;

pub use layout::{flat_arrangement, gouraud_arrangement, phong_arrangement, Solid, SolidDraw, Technique};
pub use renderer::{ShadingFrame, ShadingRenderer, ShadingView};

use atelier_engine::color::Color;
use atelier_engine::controls::{DragRotation, Slider};
use atelier_engine::coords::{Vec2, Viewport};
use atelier_engine::input::{InputFrame, InputState, Key, MouseButton};
use atelier_engine::math::{look_at, Vec3};
use atelier_engine::render::{RenderCtx, RenderTarget};
use atelier_engine::time::FrameTime;

use crate::Scene;

/// Light height and depth in eye space; the slider moves X.
const LIGHT_Y: f32 = 5.0;
const LIGHT_Z: f32 = 3.0;
/// Zoom slider steps per wheel line; wheel up moves the camera in.
const WHEEL_STEPS: f32 = 5.0;

pub struct Shading {
    rotations: [DragRotation; 3],
    /// Column a drag started in, while the button stays down.
    dragging: Option<usize>,
    zoom: Slider,
    light_x: Slider,
    renderer: ShadingRenderer,
}

impl Default for Shading {
    fn default() -> Self {
        Self::new()
    }
}

impl Shading {
    pub fn new() -> Self {
        Self {
            rotations: [DragRotation::default(); 3],
            dragging: None,
            zoom: Slider::new("camera distance")
                .range(1.0, 5.0)
                .step(0.02)
                .value(2.0)
                .bind(Key::ArrowDown, Key::ArrowUp),
            light_x: Slider::new("light x")
                .range(-10.0, 10.0)
                .step(0.1)
                .value(5.0)
                .bind(Key::ArrowLeft, Key::ArrowRight),
            renderer: ShadingRenderer::new(),
        }
    }

    /// Drag rotation of the column showing `technique`.
    pub fn rotation(&self, technique: Technique) -> DragRotation {
        let i = Technique::ALL.iter().position(|t| *t == technique).unwrap_or(0);
        self.rotations[i]
    }

    pub fn zoom(&self) -> f32 {
        self.zoom.value
    }

    pub fn light_eye(&self) -> Vec3 {
        Vec3::new(self.light_x.value, LIGHT_Y, LIGHT_Z)
    }

    pub fn frame(&self) -> ShadingFrame {
        ShadingFrame {
            view: look_at(Vec3::new(0.0, 0.0, self.zoom.value), Vec3::ZERO, Vec3::Y),
            light_eye: self.light_eye(),
            fovy_deg: 50.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Scene for Shading {
    fn name(&self) -> &'static str {
        "shading"
    }

    fn input(&mut self, input: &InputState, frame: &InputFrame, viewport: Viewport) {
        self.zoom.apply(input, frame);
        if frame.wheel_lines != 0.0 {
            self.zoom.nudge(-frame.wheel_lines * WHEEL_STEPS);
        }
        self.light_x.apply(input, frame);

        if frame.button_pressed(MouseButton::Left) {
            self.dragging = input
                .pointer_pos
                .and_then(|(x, y)| viewport.bounds().column_at(3, Vec2::new(x, y)));
            if let Some(i) = self.dragging {
                log::debug!("shading: dragging the {} view", Technique::ALL[i].label());
            }
        }
        if !input.button_down(MouseButton::Left) || input.pointer_pos.is_none() {
            self.dragging = None;
        }
        if let Some(i) = self.dragging {
            self.rotations[i].apply(input, frame);
        }
    }

    fn update(&mut self, _time: FrameTime) {}

    fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) -> anyhow::Result<()> {
        let columns = ctx.viewport.bounds().split_columns(Technique::ALL.len());
        let draws: Vec<Vec<SolidDraw>> = Technique::ALL
            .iter()
            .zip(self.rotations)
            .map(|(t, r)| t.arrangement(r))
            .collect();

        let views: Vec<ShadingView<'_>> = Technique::ALL
            .iter()
            .zip(&columns)
            .zip(&draws)
            .filter_map(|((technique, column), draws)| {
                ctx.to_physical(*column).map(|region| ShadingView {
                    technique: *technique,
                    region,
                    draws,
                })
            })
            .collect();

        let frame = self.frame();
        self.renderer.render(ctx, target, &frame, &views)
    }

    fn clear_color(&self) -> Color {
        Color::WHITE
    }
}
