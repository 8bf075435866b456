//! Keyboard and mouse controls the scenes expose.
//!
//! Each control owns its value and its key bindings, and reads the per-frame
//! input itself. Scenes only ask "did this change?" and use the value.

mod choice;
mod drag;
mod slider;
mod toggle;

pub use choice::Choice;
pub use drag::{DragRotation, DEGREES_PER_PIXEL};
pub use slider::Slider;
pub use toggle::Toggle;
