//! Frame timing.
//!
//! One `Time` instance is updated exactly once per scheduled frame and is
//! the single source of elapsed/delta values for every animation. A fixed
//! delta can be injected so tests can advance simulated time precisely.

use std::time::Instant;

/// Wall-clock frame timer with an optional fixed step for tests.
#[derive(Debug)]
pub struct Time {
    start: Instant,
    last_frame: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    /// When set, `update` advances by this amount instead of wall time.
    fixed_delta: Option<f32>,
}

impl Time {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fixed_delta: None,
        }
    }

    /// Advance the timer. Call once per frame.
    ///
    /// Returns `(elapsed, delta)` in seconds.
    pub fn update(&mut self) -> (f32, f32) {
        match self.fixed_delta {
            Some(step) => {
                self.delta_secs = step;
                self.elapsed_secs += step;
            }
            None => {
                let now = Instant::now();
                self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
                self.elapsed_secs = now.duration_since(self.start).as_secs_f32();
                self.last_frame = now;
            }
        }
        self.frame_count += 1;
        (self.elapsed_secs, self.delta_secs)
    }

    /// Total elapsed time in seconds.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Time since the previous frame in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Use a fixed per-frame delta instead of wall time.
    ///
    /// Pass `None` to return to real timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_new_starts_at_zero() {
        let time = Time::new();
        assert_eq!(time.frame(), 0);
        assert_eq!(time.elapsed(), 0.0);
    }

    #[test]
    fn test_real_update_advances() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(10));
        let (elapsed, delta) = time.update();
        assert!(elapsed > 0.0);
        assert!(delta > 0.0);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_fixed_delta_is_exact() {
        let mut time = Time::new();
        time.set_fixed_delta(Some(0.5));
        thread::sleep(Duration::from_millis(5));
        time.update();
        time.update();
        assert_eq!(time.delta(), 0.5);
        assert_eq!(time.elapsed(), 1.0);
        assert_eq!(time.frame(), 2);
    }
}
