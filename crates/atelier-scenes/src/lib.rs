//! The five atelier exercises.
//!
//! Each exercise is a [`Scene`]: it reads input into its controls, steps its
//! animation, and records its own render passes. GPU resources are created
//! lazily on the first `render` call, so constructing a scene is cheap and
//! does not need a device.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use atelier_engine::color::Color;
use atelier_engine::coords::Viewport;
use atelier_engine::input::{InputFrame, InputState};
use atelier_engine::render::{RenderCtx, RenderTarget};
use atelier_engine::time::FrameTime;

mod hierarchy;

pub mod environment;
pub mod landscape;
pub mod raytrace;
pub mod shading;
pub mod shadows;

pub use hierarchy::Hierarchy;

/// One exercise hosted by the studio.
///
/// The host calls `input`, `update` and `render` once per frame, in that order.
pub trait Scene {
    fn name(&self) -> &'static str;

    /// `viewport` is the window size in logical pixels.
    fn input(&mut self, input: &InputState, frame: &InputFrame, viewport: Viewport);

    fn update(&mut self, time: FrameTime);

    fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) -> anyhow::Result<()>;

    /// Colour the whole window is cleared to before `render`.
    fn clear_color(&self) -> Color;
}

/// Settings shared by every scene constructor.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Root directory for textures, cube-map faces and `teapot.json`.
    pub assets: PathBuf,
    /// Edge length of the square shadow map, in texels.
    pub shadow_map_size: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            assets: PathBuf::from("assets"),
            shadow_map_size: 4096,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SceneKind {
    Landscape,
    Shading,
    Environment,
    Shadows,
    Raytrace,
}

impl SceneKind {
    pub const ALL: [SceneKind; 5] = [
        SceneKind::Landscape,
        SceneKind::Shading,
        SceneKind::Environment,
        SceneKind::Shadows,
        SceneKind::Raytrace,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SceneKind::Landscape => "landscape",
            SceneKind::Shading => "shading",
            SceneKind::Environment => "environment",
            SceneKind::Shadows => "shadows",
            SceneKind::Raytrace => "raytrace",
        }
    }

    /// Position in `ALL`.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn build(self, config: &SceneConfig) -> Box<dyn Scene> {
        match self {
            SceneKind::Landscape => Box::new(landscape::Landscape::new()),
            SceneKind::Shading => Box::new(shading::Shading::new()),
            SceneKind::Environment => Box::new(environment::Environment::new(config.assets.clone())),
            SceneKind::Shadows => Box::new(shadows::Shadows::new(config.assets.clone(), config.shadow_map_size)),
            SceneKind::Raytrace => Box::new(raytrace::Raytrace::new()),
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SceneKind::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = SceneKind::ALL.iter().map(|k| k.name()).collect();
                format!("unknown scene \"{s}\" (expected one of: {})", names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for kind in SceneKind::ALL {
            assert_eq!(kind.name().parse::<SceneKind>(), Ok(kind));
        }
    }

    #[test]
    fn parsing_ignores_case() {
        assert_eq!("Shadows".parse::<SceneKind>(), Ok(SceneKind::Shadows));
    }

    #[test]
    fn unknown_name_lists_choices() {
        let err = "teapot".parse::<SceneKind>().unwrap_err();
        assert!(err.contains("landscape"));
        assert!(err.contains("raytrace"));
    }

    #[test]
    fn index_matches_order() {
        for (i, kind) in SceneKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
