use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

/// Rectangle in physical pixels, ready for `set_viewport` / `set_scissor_rect`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.height == 0 { 1.0 } else { self.width as f32 / self.height as f32 }
    }
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < max.x && p.y < max.y
    }

    /// Largest square centred in this rectangle.
    pub fn centered_square(self) -> Rect {
        let side = self.size.x.min(self.size.y).max(0.0);
        Rect::new(
            self.origin.x + (self.size.x - side) * 0.5,
            self.origin.y + (self.size.y - side) * 0.5,
            side,
            side,
        )
    }

    /// Splits into `n` equal-width columns, left to right.
    pub fn split_columns(self, n: usize) -> Vec<Rect> {
        if n == 0 {
            return Vec::new();
        }
        let w = self.size.x / n as f32;
        (0..n)
            .map(|i| Rect::new(self.origin.x + w * i as f32, self.origin.y, w, self.size.y))
            .collect()
    }

    /// Index of the column (as produced by `split_columns(n)`) containing `p`.
    pub fn column_at(self, n: usize, p: Vec2) -> Option<usize> {
        if n == 0 || !self.contains(p) {
            return None;
        }
        let w = self.size.x / n as f32;
        let i = ((p.x - self.origin.x) / w) as usize;
        Some(i.min(n - 1))
    }

    /// Converts to physical pixels, clipped to a `target_w × target_h` surface.
    /// Returns `None` when nothing of the rectangle remains visible.
    pub fn to_physical(self, scale_factor: f32, target_w: u32, target_h: u32) -> Option<PixelRect> {
        let s = scale_factor.max(0.0);
        let x0 = (self.origin.x * s).round().max(0.0) as u32;
        let y0 = (self.origin.y * s).round().max(0.0) as u32;
        let x1 = ((self.max().x * s).round().max(0.0) as u32).min(target_w);
        let y1 = ((self.max().y * s).round().max(0.0) as u32).min(target_h);

        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(PixelRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_top_left_inclusive() {
        assert!(r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn contains_bottom_right_exclusive() {
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(10.0, 10.0)));
    }

    // ── centered_square ───────────────────────────────────────────────────

    #[test]
    fn square_in_wide_window_is_centred_horizontally() {
        assert_eq!(r(0.0, 0.0, 800.0, 600.0).centered_square(), r(100.0, 0.0, 600.0, 600.0));
    }

    #[test]
    fn square_in_tall_window_is_centred_vertically() {
        assert_eq!(r(0.0, 0.0, 300.0, 500.0).centered_square(), r(0.0, 100.0, 300.0, 300.0));
    }

    // ── columns ───────────────────────────────────────────────────────────

    #[test]
    fn split_into_three_columns() {
        let cols = r(0.0, 0.0, 900.0, 300.0).split_columns(3);
        assert_eq!(cols, vec![
            r(0.0, 0.0, 300.0, 300.0),
            r(300.0, 0.0, 300.0, 300.0),
            r(600.0, 0.0, 300.0, 300.0),
        ]);
    }

    #[test]
    fn column_at_picks_by_x() {
        let area = r(0.0, 0.0, 900.0, 300.0);
        assert_eq!(area.column_at(3, Vec2::new(10.0, 10.0)), Some(0));
        assert_eq!(area.column_at(3, Vec2::new(450.0, 10.0)), Some(1));
        assert_eq!(area.column_at(3, Vec2::new(899.0, 299.0)), Some(2));
        assert_eq!(area.column_at(3, Vec2::new(950.0, 10.0)), None);
    }

    // ── to_physical ───────────────────────────────────────────────────────

    #[test]
    fn physical_applies_scale_factor() {
        let p = r(10.0, 20.0, 100.0, 50.0).to_physical(2.0, 1000, 1000);
        assert_eq!(p, Some(PixelRect { x: 20, y: 40, width: 200, height: 100 }));
    }

    #[test]
    fn physical_clips_to_target() {
        let p = r(50.0, 0.0, 100.0, 100.0).to_physical(1.0, 120, 80);
        assert_eq!(p, Some(PixelRect { x: 50, y: 0, width: 70, height: 80 }));
    }

    #[test]
    fn physical_outside_target_is_none() {
        assert_eq!(r(200.0, 0.0, 10.0, 10.0).to_physical(1.0, 100, 100), None);
    }
}
