//! Exercise 1: a night landscape built from three 2D primitives.
//!
//! Squares, triangles and circles are placed with a matrix stack and drawn
//! with a single flat colour each. The moon turns, the stars twinkle, two
//! boats drift along the river and the windmill blades spin. Keys switch the
//! rasterization mode for every primitive at once.

mod layout;
mod renderer;

pub use layout::{compose, Pose, Shape, ShapeDraw};
pub use renderer::LandscapeRenderer;

use atelier_engine::anim::{PingPong, Spin};
use atelier_engine::color::Color;
use atelier_engine::controls::Choice;
use atelier_engine::coords::Viewport;
use atelier_engine::input::{InputFrame, InputState, Key};
use atelier_engine::render::{DrawMode, RenderCtx, RenderTarget};
use atelier_engine::time::FrameTime;

use crate::Scene;

/// Per-frame speeds and bounds, in units per 60 Hz frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LandscapeSettings {
    pub moon_speed_deg: f32,
    pub star_scale_speed: f32,
    pub star_scale_min: f32,
    pub star_scale_max: f32,
    pub boat_speed: f32,
    pub boat1_start: f32,
    pub boat1_limit: f32,
    pub boat2_start: f32,
    pub boat2_limit: f32,
    pub blade_speed_deg: f32,
}

impl Default for LandscapeSettings {
    fn default() -> Self {
        Self {
            moon_speed_deg: 0.3,
            star_scale_speed: 0.02,
            star_scale_min: 0.7,
            star_scale_max: 1.3,
            boat_speed: 0.003,
            boat1_start: 0.0,
            boat1_limit: 0.8,
            boat2_start: 0.4,
            boat2_limit: 0.7,
            blade_speed_deg: -1.0,
        }
    }
}

#[derive(Debug, Clone)]
struct Motion {
    moon: Spin,
    stars: PingPong,
    boat1: PingPong,
    boat2: PingPong,
    blades: Spin,
}

impl Motion {
    fn new(s: &LandscapeSettings) -> Self {
        Self {
            moon: Spin::new(0.0, s.moon_speed_deg),
            stars: PingPong::new(1.0, s.star_scale_speed, s.star_scale_min, s.star_scale_max),
            boat1: PingPong::new(s.boat1_start, s.boat_speed, -s.boat1_limit, s.boat1_limit),
            boat2: PingPong::new(s.boat2_start, s.boat_speed, -s.boat2_limit, s.boat2_limit),
            blades: Spin::new(0.0, s.blade_speed_deg),
        }
    }

    fn advance(&mut self, steps: f32) {
        self.moon.advance(steps);
        self.stars.advance(steps);
        self.boat1.advance(steps);
        self.boat2.advance(steps);
        self.blades.advance(steps);
    }

    fn pose(&self) -> Pose {
        Pose {
            moon_deg: self.moon.angle,
            star_scale: self.stars.value,
            boat1_x: self.boat1.value,
            boat2_x: self.boat2.value,
            blade_deg: self.blades.angle,
        }
    }
}

pub struct Landscape {
    motion: Motion,
    mode: Choice<DrawMode>,
    renderer: LandscapeRenderer,
}

impl Default for Landscape {
    fn default() -> Self {
        Self::new()
    }
}

impl Landscape {
    pub fn new() -> Self {
        Self::with_settings(&LandscapeSettings::default())
    }

    pub fn with_settings(settings: &LandscapeSettings) -> Self {
        let mode = Choice::new("draw mode", DrawMode::Triangles, &DrawMode::ALL)
            .bind(Key::Digit1, DrawMode::Triangles)
            .bind(Key::T, DrawMode::Triangles)
            .bind(Key::Digit2, DrawMode::LineLoop)
            .bind(Key::L, DrawMode::LineLoop)
            .bind(Key::Digit3, DrawMode::Points)
            .bind(Key::P, DrawMode::Points)
            .cycle_on(Key::Tab);

        Self {
            motion: Motion::new(settings),
            mode,
            renderer: LandscapeRenderer::new(),
        }
    }

    pub fn pose(&self) -> Pose {
        self.motion.pose()
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.mode.current()
    }
}

impl Scene for Landscape {
    fn name(&self) -> &'static str {
        "landscape"
    }

    fn input(&mut self, _input: &InputState, frame: &InputFrame, _viewport: Viewport) {
        self.mode.apply(frame);
    }

    fn update(&mut self, time: FrameTime) {
        self.motion.advance(time.steps());
    }

    fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) -> anyhow::Result<()> {
        let canvas = ctx.viewport.bounds().centered_square();
        let Some(region) = ctx.to_physical(canvas) else { return Ok(()) };
        let draws = compose(&self.motion.pose());
        self.renderer.render(ctx, target, region, &draws, self.mode.current())
    }

    fn clear_color(&self) -> Color {
        Color::WHITE
    }
}
