//! Per-frame animation steppers.
//!
//! All speeds are "per reference frame" (60 Hz). Callers pass
//! `FrameTime::steps()` so motion stays the same on faster displays.

use std::f32::consts::TAU;

/// Value bouncing between `min` and `max`.
///
/// The bound check happens before the move: a value at or past a bound that
/// is still heading outward turns around, and the step is then applied. A
/// value can overshoot a bound by at most one frame's movement, and a long
/// frame never leaves it stuck outside.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PingPong {
    pub value: f32,
    pub speed: f32,
    pub min: f32,
    pub max: f32,
}

impl PingPong {
    pub const fn new(value: f32, speed: f32, min: f32, max: f32) -> Self {
        Self { value, speed, min, max }
    }

    pub fn advance(&mut self, steps: f32) -> f32 {
        let outward = (self.value >= self.max && self.speed > 0.0) || (self.value <= self.min && self.speed < 0.0);
        if outward {
            self.speed = -self.speed;
        }
        self.value += self.speed * steps;
        self.value
    }
}

/// Unbounded accumulating angle (degrees or radians, caller's choice).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Spin {
    pub angle: f32,
    pub speed: f32,
}

impl Spin {
    pub const fn new(angle: f32, speed: f32) -> Self {
        Self { angle, speed }
    }

    pub fn advance(&mut self, steps: f32) -> f32 {
        self.angle += self.speed * steps;
        self.angle
    }
}

/// Angle in radians circling once per `2π`, with a wrap a little before the
/// end of the turn.
///
/// Decreasing orbits snap back to `2π` once the angle falls to `margin`;
/// increasing ones snap to 0 once they reach `2π - margin`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Orbit {
    pub angle: f32,
    pub speed: f32,
    pub margin: f32,
}

impl Orbit {
    pub const fn new(angle: f32, speed: f32, margin: f32) -> Self {
        Self { angle, speed, margin }
    }

    pub fn advance(&mut self, steps: f32) -> f32 {
        self.angle += self.speed * steps;
        if self.speed < 0.0 && self.angle <= self.margin {
            self.angle = TAU;
        } else if self.speed > 0.0 && self.angle >= TAU - self.margin {
            self.angle = 0.0;
        }
        self.angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── ping-pong ─────────────────────────────────────────────────────────

    #[test]
    fn ping_pong_moves_by_speed() {
        let mut p = PingPong::new(0.0, 0.003, -0.8, 0.8);
        // 0.0 is strictly inside the range, so no reversal on the first step.
        assert!((p.advance(1.0) - 0.003).abs() < 1e-7);
    }

    #[test]
    fn ping_pong_reverses_at_max() {
        let mut p = PingPong::new(1.3, 0.02, 0.7, 1.3);
        let v = p.advance(1.0);
        assert!((v - 1.28).abs() < 1e-6);
        assert!(p.speed < 0.0);
    }

    #[test]
    fn ping_pong_reverses_at_min() {
        let mut p = PingPong::new(0.7, -0.02, 0.7, 1.3);
        let v = p.advance(1.0);
        assert!((v - 0.72).abs() < 1e-6);
        assert!(p.speed > 0.0);
    }

    #[test]
    fn ping_pong_stays_near_range() {
        let mut p = PingPong::new(0.4, 0.003, -0.7, 0.7);
        for _ in 0..5_000 {
            let v = p.advance(1.0);
            assert!(v >= -0.7 - 0.0031 && v <= 0.7 + 0.0031, "escaped: {v}");
        }
    }

    #[test]
    fn ping_pong_recovers_from_a_long_frame_past_max() {
        let mut p = PingPong::new(0.799, 0.003, -0.8, 0.8);
        assert!(p.advance(2.0) > 0.8);
        let trail: Vec<f32> = (0..6).map(|_| p.advance(1.0)).collect();
        assert!(p.speed < 0.0);
        assert!(trail.windows(2).all(|w| w[1] < w[0]), "not heading back: {trail:?}");
        assert!(p.value < 0.8);
    }

    #[test]
    fn ping_pong_recovers_from_a_long_frame_past_min() {
        let mut p = PingPong::new(0.71, -0.02, 0.7, 1.3);
        assert!(p.advance(15.0) < 0.7);
        // The turn happens before the next move, so a second long frame
        // carries it straight back in.
        assert!(p.advance(15.0) > 0.7);
        assert!(p.speed > 0.0);
    }

    #[test]
    fn ping_pong_mixed_steps_keep_bouncing_inside_range() {
        let mut p = PingPong::new(0.0, 0.003, -0.8, 0.8);
        let slack = 15.0 * 0.003 + 1e-5;
        let (mut lo, mut hi) = (0.0f32, 0.0f32);
        let mut outside_run = 0;
        for i in 0..20_000 {
            let steps = if i % 7 == 0 { 15.0 } else { 1.0 };
            let v = p.advance(steps);
            assert!(v >= -0.8 - slack && v <= 0.8 + slack, "escaped: {v}");
            lo = lo.min(v);
            hi = hi.max(v);

            outside_run = if v > 0.8 || v < -0.8 { outside_run + 1 } else { 0 };
            // One long frame out takes at most 15 short ones back.
            assert!(outside_run <= 16, "stuck outside at {v}");
        }
        assert!(lo < -0.75 && hi > 0.75);
    }

    #[test]
    fn ping_pong_scales_with_steps() {
        let mut p = PingPong::new(1.0, 0.02, 0.7, 1.3);
        assert!((p.advance(0.5) - 1.01).abs() < 1e-6);
    }

    // ── spin ──────────────────────────────────────────────────────────────

    #[test]
    fn spin_accumulates_without_wrap() {
        let mut s = Spin::new(0.0, -1.0);
        for _ in 0..400 {
            s.advance(1.0);
        }
        assert!((s.angle + 400.0).abs() < 1e-3);
    }

    // ── orbit ─────────────────────────────────────────────────────────────

    #[test]
    fn decreasing_orbit_wraps_to_full_turn() {
        let mut o = Orbit::new(0.008, -0.003, 0.006);
        assert_eq!(o.advance(1.0), TAU);
    }

    #[test]
    fn increasing_orbit_wraps_to_zero() {
        let mut o = Orbit::new(TAU - 0.008, 0.003, 0.006);
        assert_eq!(o.advance(1.0), 0.0);
    }

    #[test]
    fn decreasing_orbit_wraps_under_mixed_steps() {
        let mut o = Orbit::new(TAU, -0.003, 0.006);
        let mut wraps = 0;
        for i in 0..10_000 {
            let steps = if i % 5 == 0 { 15.0 } else { 1.0 };
            let before = o.angle;
            let a = o.advance(steps);
            assert!(a > 0.006 - 15.0 * 0.003 - 1e-5 && a <= TAU, "out of turn: {a}");
            if a > before {
                assert_eq!(a, TAU);
                wraps += 1;
            }
        }
        assert!(wraps >= 5);
    }

    #[test]
    fn increasing_orbit_wraps_under_mixed_steps() {
        let mut o = Orbit::new(0.0, 0.003, 0.006);
        let mut wraps = 0;
        for i in 0..10_000 {
            let steps = if i % 5 == 0 { 15.0 } else { 1.0 };
            let before = o.angle;
            let a = o.advance(steps);
            assert!(a >= 0.0 && a < TAU - 0.006, "out of turn: {a}");
            if a < before {
                assert_eq!(a, 0.0);
                wraps += 1;
            }
        }
        assert!(wraps >= 5);
    }

    #[test]
    fn orbit_moves_between_wraps() {
        let mut o = Orbit::new(1.0, 0.003, 0.006);
        assert!((o.advance(1.0) - 1.003).abs() < 1e-6);
    }
}
