//! Frame clock with a fixed refresh interval

use std::time::{Duration, Instant};

/// Paces repaints to a display refresh rate
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last tick in seconds
    pub delta_time: f64,
    /// Refresh interval (default: 1/60 second)
    pub frame_interval: f64,
    /// Accumulated time not yet consumed by presented frames
    accumulator: f64,
    last_instant: Instant,
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            frame_interval: 1.0 / 60.0,
            accumulator: 0.0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    /// Create a clock with the default 60Hz refresh rate
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock for a custom refresh rate
    pub fn with_refresh_rate(hz: f64) -> Self {
        Self {
            frame_interval: 1.0 / hz,
            ..Self::default()
        }
    }

    /// Advance the clock. Call once per loop iteration.
    pub fn tick(&mut self) {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            // present immediately on the first iteration
            self.accumulator = self.frame_interval;
            return;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;

        // Clamp so a stalled host does not queue a burst of catch-up frames
        self.delta_time = elapsed.min(0.25);
        self.total_time += self.delta_time;
        self.accumulator += self.delta_time;
    }

    /// Returns true once a full refresh interval has accumulated
    pub fn should_present(&self) -> bool {
        self.accumulator >= self.frame_interval
    }

    /// Consume the interval for one presented frame; late frames are dropped, not replayed
    pub fn consume_frame(&mut self) {
        self.accumulator = (self.accumulator - self.frame_interval).min(self.frame_interval);
        if self.accumulator < 0.0 {
            self.accumulator = 0.0;
        }
    }

    /// Time left until the next frame is due
    pub fn until_next_frame(&self) -> Duration {
        Duration::from_secs_f64((self.frame_interval - self.accumulator).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_defaults() {
        let clock = FrameClock::new();
        assert!((clock.frame_interval - 1.0 / 60.0).abs() < 1e-10);
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.delta_time, 0.0);
    }

    #[test]
    fn test_custom_refresh_rate() {
        let clock = FrameClock::with_refresh_rate(30.0);
        assert!((clock.frame_interval - 1.0 / 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_first_tick_presents() {
        let mut clock = FrameClock::new();
        clock.tick();
        assert_eq!(clock.delta_time, 0.0);
        assert!(clock.should_present());
        clock.consume_frame();
        assert!(!clock.should_present());
    }

    #[test]
    fn test_late_frames_are_dropped() {
        let mut clock = FrameClock::new();
        clock.frame_interval = 1.0 / 60.0;
        clock.accumulator = 5.0 / 60.0;

        assert!(clock.should_present());
        clock.consume_frame();
        // at most one more frame is owed
        assert!(clock.should_present());
        clock.consume_frame();
        assert!(!clock.should_present());
    }

    #[test]
    fn test_until_next_frame() {
        let mut clock = FrameClock::new();
        clock.frame_interval = 0.02;
        clock.accumulator = 0.015;
        let wait = clock.until_next_frame().as_secs_f64();
        assert!((wait - 0.005).abs() < 1e-9);
    }
}
