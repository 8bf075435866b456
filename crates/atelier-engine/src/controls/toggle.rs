use crate::input::{InputFrame, Key};

/// An on/off switch flipped by a key press.
#[derive(Debug, Clone, PartialEq)]
pub struct Toggle {
    pub label: &'static str,
    pub on: bool,
    key: Option<Key>,
}

impl Toggle {
    pub fn new(label: &'static str) -> Self {
        Self { label, on: false, key: None }
    }

    pub fn checked(mut self, v: bool) -> Self { self.on = v; self }
    pub fn bind(mut self, key: Key) -> Self { self.key = Some(key); self }

    pub fn flip(&mut self) -> bool {
        self.on = !self.on;
        log::info!("{}: {}", self.label, if self.on { "on" } else { "off" });
        self.on
    }

    /// Flips when the bound key went down this frame.
    pub fn apply(&mut self, frame: &InputFrame) -> bool {
        match self.key {
            Some(key) if frame.key_pressed(key) => {
                self.flip();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_inverts() {
        let mut t = Toggle::new("reflect").checked(true);
        assert!(!t.flip());
        assert!(t.flip());
    }

    #[test]
    fn apply_flips_on_press_only() {
        let mut t = Toggle::new("shadow").bind(Key::S);
        let mut frame = InputFrame::default();
        assert!(!t.apply(&frame));

        frame.keys_pressed.insert(Key::S);
        assert!(t.apply(&frame));
        assert!(t.on);

        frame.clear();
        frame.keys_released.insert(Key::S);
        assert!(!t.apply(&frame));
        assert!(t.on);
    }
}
