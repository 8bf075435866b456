use std::fmt::Debug;

use crate::input::{InputFrame, Key};

/// One value out of a fixed set, picked by key.
#[derive(Debug, Clone)]
pub struct Choice<T> {
    pub label: &'static str,
    current: T,
    options: Vec<T>,
    bindings: Vec<(Key, T)>,
    cycle_key: Option<Key>,
}

impl<T: Copy + PartialEq + Debug> Choice<T> {
    /// `current` is added to the options if missing.
    pub fn new(label: &'static str, current: T, options: &[T]) -> Self {
        let mut options = options.to_vec();
        if !options.contains(&current) {
            options.insert(0, current);
        }
        Self {
            label,
            current,
            options,
            bindings: Vec::new(),
            cycle_key: None,
        }
    }

    pub fn bind(mut self, key: Key, value: T) -> Self {
        self.bindings.push((key, value));
        self
    }

    /// Key that steps to the next option.
    pub fn cycle_on(mut self, key: Key) -> Self {
        self.cycle_key = Some(key);
        self
    }

    #[inline]
    pub fn current(&self) -> T {
        self.current
    }

    /// Selects `value` if it is one of the options. Returns whether the
    /// selection changed.
    pub fn select(&mut self, value: T) -> bool {
        if value == self.current || !self.options.contains(&value) {
            return false;
        }
        self.current = value;
        log::info!("{}: {:?}", self.label, value);
        true
    }

    /// Advances to the next option, wrapping.
    pub fn cycle(&mut self) -> T {
        let at = self.options.iter().position(|o| *o == self.current).unwrap_or(0);
        let next = self.options[(at + 1) % self.options.len()];
        self.select(next);
        self.current
    }

    /// Applies the first bound key pressed this frame, then the cycle key.
    pub fn apply(&mut self, frame: &InputFrame) -> bool {
        if self.cycle_key.is_some_and(|k| frame.key_pressed(k)) {
            let before = self.current;
            return self.cycle() != before;
        }
        let picked = self
            .bindings
            .iter()
            .find(|(key, _)| frame.key_pressed(*key))
            .map(|(_, v)| *v);
        picked.is_some_and(|v| self.select(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Copy, Clone, PartialEq)]
    enum Mode {
        Fill,
        Wire,
        Dots,
    }

    fn modes() -> Choice<Mode> {
        Choice::new("mode", Mode::Fill, &[Mode::Fill, Mode::Wire, Mode::Dots])
            .bind(Key::Digit1, Mode::Fill)
            .bind(Key::Digit2, Mode::Wire)
            .bind(Key::L, Mode::Wire)
            .bind(Key::Digit3, Mode::Dots)
    }

    #[test]
    fn cycle_wraps() {
        let mut c = modes();
        assert_eq!(c.cycle(), Mode::Wire);
        assert_eq!(c.cycle(), Mode::Dots);
        assert_eq!(c.cycle(), Mode::Fill);
    }

    #[test]
    fn cycle_key_steps_through_options() {
        let mut c = modes().cycle_on(Key::Tab);
        let mut frame = InputFrame::default();
        frame.keys_pressed.insert(Key::Tab);
        assert!(c.apply(&frame));
        assert!(c.apply(&frame));
        assert_eq!(c.current(), Mode::Dots);
    }

    #[test]
    fn select_reports_change() {
        let mut c = modes();
        assert!(!c.select(Mode::Fill));
        assert!(c.select(Mode::Dots));
        assert_eq!(c.current(), Mode::Dots);
    }

    #[test]
    fn any_bound_key_selects() {
        let mut c = modes();
        let mut frame = InputFrame::default();
        frame.keys_pressed.insert(Key::L);
        assert!(c.apply(&frame));
        assert_eq!(c.current(), Mode::Wire);

        // Pressing the key of the current value again is not a change.
        assert!(!c.apply(&frame));
    }

    #[test]
    fn missing_current_becomes_an_option() {
        let mut c = Choice::new("mode", Mode::Dots, &[Mode::Fill]);
        assert_eq!(c.cycle(), Mode::Fill);
        assert_eq!(c.cycle(), Mode::Dots);
    }
}
