use crate::input::{InputFrame, InputState, Key};

/// A bounded value moved in fixed steps by a pair of keys.
///
/// # Example
/// ```rust,ignore
/// Slider::new("zoom")
///     .range(1.0, 5.0)
///     .step(0.02)
///     .value(2.0)
///     .bind(Key::ArrowDown, Key::ArrowUp)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    pub label: &'static str,
    pub value: f32,
    pub min: f32,
    pub max: f32,
    /// Distance covered per nudge; held keys nudge once per frame.
    pub step: f32,
    keys: Option<(Key, Key)>,
}

impl Slider {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: 0.0,
            min: 0.0,
            max: 1.0,
            step: 0.01,
            keys: None,
        }
    }

    pub fn range(mut self, min: f32, max: f32) -> Self {
        self.min = min.min(max);
        self.max = max.max(min);
        self.value = self.value.clamp(self.min, self.max);
        self
    }

    pub fn step(mut self, v: f32) -> Self { self.step = v.abs(); self }

    pub fn value(mut self, v: f32) -> Self {
        self.value = v.clamp(self.min, self.max);
        self
    }

    /// `dec` lowers the value, `inc` raises it.
    pub fn bind(mut self, dec: Key, inc: Key) -> Self {
        self.keys = Some((dec, inc));
        self
    }

    pub fn keys(&self) -> Option<(Key, Key)> {
        self.keys
    }

    /// Sets the value, clamped. Returns whether it changed.
    pub fn set(&mut self, v: f32) -> bool {
        let v = v.clamp(self.min, self.max);
        if v == self.value {
            return false;
        }
        self.value = v;
        true
    }

    /// Moves by `dir` steps (usually ±1). Returns whether the value changed.
    pub fn nudge(&mut self, dir: f32) -> bool {
        self.set(self.value + dir * self.step)
    }

    /// Applies the bound keys for this frame: one nudge per frame while a key
    /// is held. The settled value is logged when the key is let go.
    pub fn apply(&mut self, input: &InputState, frame: &InputFrame) -> bool {
        let Some((dec, inc)) = self.keys else { return false };

        let mut dir = 0.0;
        if input.key_down(dec) {
            dir -= 1.0;
        }
        if input.key_down(inc) {
            dir += 1.0;
        }
        let changed = dir != 0.0 && self.nudge(dir);

        if frame.keys_released.contains(&dec) || frame.keys_released.contains(&inc) {
            log::info!("{} = {:.2}", self.label, self.value);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, KeyState, Modifiers};

    fn key(input: &mut InputState, frame: &mut InputFrame, key: Key, state: KeyState) {
        input.apply_event(
            frame,
            InputEvent::Key {
                key,
                state,
                modifiers: Modifiers::default(),
                repeat: false,
            },
        );
    }

    fn zoom() -> Slider {
        Slider::new("zoom")
            .range(1.0, 5.0)
            .step(0.5)
            .value(2.0)
            .bind(Key::ArrowDown, Key::ArrowUp)
    }

    // ── builder ───────────────────────────────────────────────────────────

    #[test]
    fn initial_value_is_clamped() {
        let s = Slider::new("x").range(-1.0, 1.0).value(4.0);
        assert_eq!(s.value, 1.0);
    }

    #[test]
    fn reversed_range_is_normalized() {
        let s = Slider::new("x").range(3.0, -3.0);
        assert_eq!((s.min, s.max), (-3.0, 3.0));
    }

    // ── nudge ─────────────────────────────────────────────────────────────

    #[test]
    fn nudge_moves_by_step() {
        let mut s = zoom();
        assert!(s.nudge(1.0));
        assert_eq!(s.value, 2.5);
        assert!(s.nudge(-1.0));
        assert_eq!(s.value, 2.0);
    }

    #[test]
    fn nudge_stops_at_bounds() {
        let mut s = zoom().value(4.8);
        assert!(s.nudge(1.0));
        assert_eq!(s.value, 5.0);
        assert!(!s.nudge(1.0));
        assert_eq!(s.value, 5.0);
    }

    // ── keys ──────────────────────────────────────────────────────────────

    #[test]
    fn held_key_nudges_every_frame() {
        let mut s = zoom();
        let mut input = InputState::default();
        let mut frame = InputFrame::default();

        key(&mut input, &mut frame, Key::ArrowUp, KeyState::Pressed);
        assert!(s.apply(&input, &frame));
        frame.clear();
        assert!(s.apply(&input, &frame));
        assert_eq!(s.value, 3.0);

        key(&mut input, &mut frame, Key::ArrowUp, KeyState::Released);
        assert!(!s.apply(&input, &frame));
        assert_eq!(s.value, 3.0);
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut s = zoom();
        let mut input = InputState::default();
        let mut frame = InputFrame::default();

        key(&mut input, &mut frame, Key::ArrowUp, KeyState::Pressed);
        key(&mut input, &mut frame, Key::ArrowDown, KeyState::Pressed);
        assert!(!s.apply(&input, &frame));
        assert_eq!(s.value, 2.0);
    }

    #[test]
    fn unbound_slider_ignores_input() {
        let mut s = Slider::new("x").range(0.0, 1.0).step(0.1);
        let mut input = InputState::default();
        let mut frame = InputFrame::default();
        key(&mut input, &mut frame, Key::ArrowUp, KeyState::Pressed);
        assert!(!s.apply(&input, &frame));
    }
}
