use std::time::{Duration, Instant};

/// Timing for one frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Sum of all clamped `dt` values so far.
    pub elapsed: f32,

    pub now: Instant,

    /// Index of this frame, starting at 0.
    pub frame_index: u64,
}

/// Per-window frame clock.
///
/// Delta time is clamped, so a stall (debugger, minimize, slow present) shows up as
/// one long-ish frame instead of a jump in animations driven by `dt`.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    elapsed: f32,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub const DEFAULT_MIN_DT: Duration = Duration::from_micros(100);
    pub const DEFAULT_MAX_DT: Duration = Duration::from_millis(250);

    pub fn new() -> Self {
        Self::with_clamps(Self::DEFAULT_MIN_DT, Self::DEFAULT_MAX_DT)
    }

    /// Clock clamping `dt` to `[dt_min, dt_max]`. Inverted bounds are swapped.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        let (dt_min, dt_max) = if dt_min <= dt_max {
            (dt_min, dt_max)
        } else {
            (dt_max, dt_min)
        };
        Self {
            last: Instant::now(),
            elapsed: 0.0,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Moves the baseline to now without producing a frame.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max)
            .as_secs_f32();

        self.last = now;
        self.elapsed += dt;

        let ft = FrameTime {
            dt,
            elapsed: self.elapsed,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_are_numbered_from_zero() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        assert_eq!(clock.tick_at(start).frame_index, 0);
        assert_eq!(clock.tick_at(start + Duration::from_millis(16)).frame_index, 1);
    }

    #[test]
    fn stall_is_clamped() {
        let start = Instant::now();
        let mut clock = FrameClock::with_clamps(Duration::from_millis(1), Duration::from_millis(50));
        clock.last = start;

        let ft = clock.tick_at(start + Duration::from_secs(5));
        assert!((ft.dt - 0.05).abs() < 1e-6);
    }

    #[test]
    fn zero_gap_uses_minimum() {
        let start = Instant::now();
        let mut clock = FrameClock::with_clamps(Duration::from_millis(1), Duration::from_millis(50));
        clock.last = start;

        let ft = clock.tick_at(start);
        assert!((ft.dt - 0.001).abs() < 1e-6);
    }

    #[test]
    fn elapsed_accumulates_clamped_steps() {
        let start = Instant::now();
        let mut clock = FrameClock::with_clamps(Duration::from_millis(1), Duration::from_millis(50));
        clock.last = start;

        clock.tick_at(start + Duration::from_millis(20));
        let ft = clock.tick_at(start + Duration::from_secs(1));
        assert!((ft.elapsed - 0.07).abs() < 1e-5);
    }

    #[test]
    fn inverted_clamps_are_swapped() {
        let start = Instant::now();
        let mut clock = FrameClock::with_clamps(Duration::from_millis(50), Duration::from_millis(1));
        clock.last = start;

        let long = clock.tick_at(start + Duration::from_secs(2));
        assert!((long.dt - 0.05).abs() < 1e-6);
        let short = clock.tick_at(long.now);
        assert!((short.dt - 0.001).abs() < 1e-6);
    }
}
