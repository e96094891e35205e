//! Time management utilities

/// Delta time used when no previous timestamp exists
pub const DEFAULT_FALLBACK_DELTA: f32 = 1.0 / 60.0;

/// Frame delta timer driven by an external monotonic clock
///
/// The clock is owned by the windowing library, so the timer is fed
/// timestamps in seconds rather than reading the system clock itself.
#[derive(Debug, Clone)]
pub struct DeltaTimer {
    last_time: Option<f64>,
    fallback_delta: f32,
    frame_count: u64,
}

impl Default for DeltaTimer {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_DELTA)
    }
}

impl DeltaTimer {
    /// Create a new timer with the given fallback delta in seconds
    pub fn new(fallback_delta: f32) -> Self {
        Self {
            last_time: None,
            fallback_delta,
            frame_count: 0,
        }
    }

    /// Advance the timer to `now` and return the elapsed time in seconds
    ///
    /// The first tick has nothing to measure against and returns the fallback.
    /// A clock that did not advance also yields the fallback, since the GUI
    /// library requires a strictly positive delta.
    pub fn tick(&mut self, now: f64) -> f32 {
        let delta = match self.last_time {
            Some(last) if now > last => (now - last) as f32,
            _ => self.fallback_delta,
        };
        self.last_time = Some(now);
        self.frame_count += 1;
        delta
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Forget the previous timestamp so the next tick uses the fallback
    pub fn reset(&mut self) {
        self.last_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_tick_uses_fallback() {
        let mut timer = DeltaTimer::default();
        assert_relative_eq!(timer.tick(12.5), 1.0 / 60.0);
        assert_eq!(timer.frame_count(), 1);
    }

    #[test]
    fn test_tick_measures_wall_clock() {
        let mut timer = DeltaTimer::default();
        timer.tick(1.0);
        assert_relative_eq!(timer.tick(1.25), 0.25);
        assert_relative_eq!(timer.tick(1.5), 0.25);
    }

    #[test]
    fn test_stalled_clock_uses_fallback() {
        let mut timer = DeltaTimer::new(0.1);
        timer.tick(3.0);
        assert_relative_eq!(timer.tick(3.0), 0.1);
    }

    #[test]
    fn test_reset() {
        let mut timer = DeltaTimer::new(0.5);
        timer.tick(1.0);
        timer.reset();
        assert_relative_eq!(timer.tick(4.0), 0.5);
    }
}
