use glam::Mat4;

/// Explicit stack of saved model matrices for building transform hierarchies.
///
/// A scene keeps its "current" matrix in a local and brackets each child with
/// `push(&m)` / `m = stack.pop()`. Pushing stores a copy, so mutating the
/// current matrix afterwards never alters a saved entry.
#[derive(Debug, Default, Clone)]
pub struct MatrixStack {
    saved: Vec<Mat4>,
}

impl MatrixStack {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, m: &Mat4) {
        self.saved.push(*m);
    }

    /// Returns the most recently saved matrix. Popping an empty stack is a
    /// hierarchy bug in the caller; it is logged and yields `None`.
    pub fn pop(&mut self) -> Option<Mat4> {
        let m = self.saved.pop();
        if m.is_none() {
            log::warn!("matrix stack has no matrix to pop");
        }
        m
    }

    /// Pops into `current`, leaving it untouched on underflow.
    pub fn restore(&mut self, current: &mut Mat4) {
        if let Some(m) = self.pop() {
            *current = m;
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    pub fn clear(&mut self) {
        self.saved.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{scale, translate};
    use glam::Vec3;

    #[test]
    fn pop_returns_last_pushed() {
        let mut stack = MatrixStack::new();
        let a = translate(Mat4::IDENTITY, Vec3::X);
        let b = translate(Mat4::IDENTITY, Vec3::Y);
        stack.push(&a);
        stack.push(&b);

        assert_eq!(stack.pop(), Some(b));
        assert_eq!(stack.pop(), Some(a));
        assert!(stack.is_empty());
    }

    #[test]
    fn push_stores_a_copy() {
        let mut stack = MatrixStack::new();
        let mut m = Mat4::IDENTITY;
        stack.push(&m);
        m = scale(m, Vec3::splat(3.0));

        assert_eq!(stack.pop(), Some(Mat4::IDENTITY));
        assert_ne!(m, Mat4::IDENTITY);
    }

    #[test]
    fn pop_on_empty_is_none() {
        let mut stack = MatrixStack::new();
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn restore_on_underflow_keeps_current() {
        let mut stack = MatrixStack::new();
        let mut m = translate(Mat4::IDENTITY, Vec3::Z);
        stack.restore(&mut m);
        assert_eq!(m, translate(Mat4::IDENTITY, Vec3::Z));
    }

    #[test]
    fn bracketed_children_restore_parent() {
        let mut stack = MatrixStack::new();
        let parent = translate(Mat4::IDENTITY, Vec3::new(0.5, 0.0, 0.0));
        let mut m = parent;

        stack.push(&m);
        m = scale(m, Vec3::splat(0.1));
        stack.push(&m);
        m = translate(m, Vec3::Y);
        stack.restore(&mut m);
        stack.restore(&mut m);

        assert_eq!(m, parent);
        assert_eq!(stack.depth(), 0);
    }
}
