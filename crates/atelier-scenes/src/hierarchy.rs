use atelier_engine::math::{deg_to_rad, rotate, scale, translate, Mat4, MatrixStack, Vec3};

/// Records draws while walking a transform hierarchy.
///
/// Holds the current model matrix and a [`MatrixStack`]. Transform calls
/// post-multiply the current matrix; `emit` captures it together with the
/// caller's draw description.
#[derive(Debug)]
pub struct Hierarchy<D> {
    current: Mat4,
    stack: MatrixStack,
    draws: Vec<D>,
}

impl<D> Default for Hierarchy<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Hierarchy<D> {
    pub fn new() -> Self {
        Self {
            current: Mat4::IDENTITY,
            stack: MatrixStack::new(),
            draws: Vec::new(),
        }
    }

    pub fn identity(&mut self) -> &mut Self {
        self.current = Mat4::IDENTITY;
        self
    }

    /// Replaces the current matrix.
    pub fn load(&mut self, m: Mat4) -> &mut Self {
        self.current = m;
        self
    }

    pub fn push(&mut self) -> &mut Self {
        self.stack.push(&self.current);
        self
    }

    pub fn pop(&mut self) -> &mut Self {
        self.stack.restore(&mut self.current);
        self
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.current = translate(self.current, Vec3::new(x, y, z));
        self
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.current = scale(self.current, Vec3::new(x, y, z));
        self
    }

    pub fn rotate(&mut self, radians: f32, axis: Vec3) -> &mut Self {
        self.current = rotate(self.current, radians, axis);
        self
    }

    /// Rotation about +Z in degrees, the only rotation the 2D scene uses.
    pub fn rotate_z_deg(&mut self, degrees: f32) -> &mut Self {
        self.rotate(deg_to_rad(degrees), Vec3::Z)
    }

    #[inline]
    pub fn current(&self) -> Mat4 {
        self.current
    }

    /// Saved matrices still on the stack.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Records a draw built from the current matrix.
    pub fn emit(&mut self, draw: impl FnOnce(Mat4) -> D) -> &mut Self {
        let d = draw(self.current);
        self.draws.push(d);
        self
    }

    pub fn draws(&self) -> &[D] {
        &self.draws
    }

    pub fn finish(self) -> Vec<D> {
        if !self.stack.is_empty() {
            log::warn!("transform hierarchy finished with {} unpopped matrices", self.stack.depth());
        }
        self.draws
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_restores_saved_matrix() {
        let mut h: Hierarchy<Mat4> = Hierarchy::new();
        h.translate(1.0, 0.0, 0.0).push().scale(2.0, 2.0, 1.0).pop();
        let p = h.current().transform_point3(Vec3::new(1.0, 1.0, 0.0));
        assert!((p - Vec3::new(2.0, 1.0, 0.0)).length() < 1e-6);
        assert_eq!(h.depth(), 0);
    }

    #[test]
    fn emit_captures_current_matrix() {
        let mut h = Hierarchy::new();
        h.translate(0.0, 0.5, 0.0).emit(|m| m).identity().emit(|m| m);
        let draws = h.finish();
        assert_eq!(draws.len(), 2);
        assert!((draws[0].w_axis.y - 0.5).abs() < 1e-6);
        assert_eq!(draws[1], Mat4::IDENTITY);
    }

    #[test]
    fn unbalanced_pop_keeps_current() {
        let mut h: Hierarchy<()> = Hierarchy::new();
        h.translate(3.0, 0.0, 0.0).pop();
        assert!((h.current().w_axis.x - 3.0).abs() < 1e-6);
    }
}
