use std::time::{Duration, Instant};

/// Reference rate the exercises' per-frame increments were tuned at.
pub const REFERENCE_HZ: f32 = 60.0;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Seconds since the clock was created or reset.
    pub elapsed: f32,

    pub now: Instant,
    pub frame_index: u64,
}

impl FrameTime {
    /// A synthetic snapshot for driving animation outside the runtime.
    pub fn fixed(dt: f32, frame_index: u64) -> Self {
        Self {
            dt,
            elapsed: dt * frame_index as f32,
            now: Instant::now(),
            frame_index,
        }
    }

    /// `dt` expressed in reference frames: an animation that moves `k` per
    /// frame at 60 Hz moves `k * steps()` this frame.
    #[inline]
    pub fn steps(&self) -> f32 {
        self.dt * REFERENCE_HZ
    }
}

/// Produces one `FrameTime` per presented frame.
///
/// Delta time is clamped so a debugger pause or a minimized window does not
/// make animations jump.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Restarts the delta baseline, e.g. after the window was hidden.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
