//! Screen-space geometry in logical pixels.
//!
//! - Origin top-left
//! - +X right, +Y down
//!
//! Scenes carve the window into regions (letterboxed square, side-by-side
//! columns) and hand those to the GPU as viewport + scissor rectangles.

mod rect;
mod vec2;
mod viewport;

pub use rect::{PixelRect, Rect};
pub use vec2::Vec2;
pub use viewport::Viewport;
