use crate::input::{InputFrame, InputState, MouseButton};

/// Rotation per logical pixel of drag, in degrees.
pub const DEGREES_PER_PIXEL: f32 = 0.2;

/// Accumulates pointer drags into a yaw/pitch pair in degrees.
///
/// Horizontal motion to the right increases yaw. Upward motion decreases
/// pitch. Pointer deltas arrive with +Y down, so a downward drag increases it.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct DragRotation {
    pub yaw_deg: f32,
    pub pitch_deg: f32,
}

impl DragRotation {
    pub fn new(yaw_deg: f32, pitch_deg: f32) -> Self {
        Self { yaw_deg, pitch_deg }
    }

    /// Applies one pointer delta in logical pixels (+Y down).
    pub fn drag(&mut self, dx: f32, dy: f32) {
        let dy_up = -dy;
        self.yaw_deg += dx * DEGREES_PER_PIXEL;
        self.pitch_deg -= dy_up * DEGREES_PER_PIXEL;
    }

    /// Applies this frame's pointer motion while the left button is held.
    /// Returns whether anything moved.
    pub fn apply(&mut self, input: &InputState, frame: &InputFrame) -> bool {
        let (dx, dy) = frame.pointer_delta;
        if !input.button_down(MouseButton::Left) || (dx == 0.0 && dy == 0.0) {
            return false;
        }
        self.drag(dx, dy);
        true
    }
}
