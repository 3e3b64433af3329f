//! Periodic driver.
//!
//! The timer is polled at frame granularity - [`Timer::tick`] runs on every
//! pump turn - but only reports a fired interval once the accumulated
//! elapsed time since the last firing reaches the configured interval. Time
//! is always passed in explicitly, so tests drive the timer with synthetic
//! instants instead of sleeping.

use std::time::{Duration, Instant};

use tracing::debug;

/// Frame-polled interval timer.
#[derive(Debug, Clone)]
pub struct Timer {
    /// The configured firing cadence.
    interval: Duration,
    /// Number of fired intervals since the last start.
    count: u64,
    /// When the timer was started.
    started: Option<Instant>,
    /// When the interval last fired (or the start, before the first firing).
    last_loop: Option<Instant>,
    running: bool,
}

impl Timer {
    /// Create a stopped timer with the given interval.
    pub fn new(interval: Duration) -> Self {
        Timer {
            interval,
            count: 0,
            started: None,
            last_loop: None,
            running: false,
        }
    }

    /// The configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of fired intervals since the last start.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Time between start and the most recent firing. Zero before the
    /// first firing or before start.
    pub fn elapsed(&self) -> Duration {
        match (self.started, self.last_loop) {
            (Some(started), Some(last_loop)) => last_loop.duration_since(started),
            _ => Duration::ZERO,
        }
    }

    /// The instant the interval last fired, if the timer has started.
    pub fn last_loop(&self) -> Option<Instant> {
        self.last_loop
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_stopped(&self) -> bool {
        !self.running
    }

    /// Start the timer. The first interval fires once `interval` has
    /// elapsed from here.
    pub fn start(&mut self, now: Instant) {
        self.started = Some(now);
        self.last_loop = Some(now);
        self.running = true;
        debug!(interval_ms = self.interval.as_millis() as u64, "timer started");
    }

    /// Stop the timer. Future polls fire nothing; pending render steps are
    /// unaffected.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            debug!(count = self.count, "timer stopped");
        }
    }

    /// Stop, zero the counter, and start again from `now`.
    pub fn reset(&mut self, now: Instant) {
        self.stop();
        self.count = 0;
        self.start(now);
    }

    /// Poll the timer. Returns true when a full interval has elapsed since
    /// the last firing; the firing instant becomes the new reference point.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        let Some(last_loop) = self.last_loop else {
            return false;
        };
        if now.duration_since(last_loop) >= self.interval {
            self.last_loop = Some(now);
            self.count += 1;
            return true;
        }
        false
    }
}

impl Default for Timer {
    fn default() -> Self {
        Timer::new(Duration::from_millis(1000))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_after_interval_elapses() {
        let mut timer = Timer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        timer.start(t0);

        assert!(!timer.tick(t0 + Duration::from_millis(50)));
        assert!(timer.tick(t0 + Duration::from_millis(100)));
        assert_eq!(timer.count(), 1);

        // Reference point moved to the firing instant.
        assert!(!timer.tick(t0 + Duration::from_millis(150)));
        assert!(timer.tick(t0 + Duration::from_millis(200)));
        assert_eq!(timer.count(), 2);
    }

    #[test]
    fn stopped_timer_never_fires() {
        let mut timer = Timer::new(Duration::from_millis(10));
        let t0 = Instant::now();
        assert!(!timer.tick(t0 + Duration::from_secs(1)));

        timer.start(t0);
        timer.stop();
        assert!(timer.is_stopped());
        assert!(!timer.tick(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn reset_zeroes_the_count() {
        let mut timer = Timer::new(Duration::from_millis(10));
        let t0 = Instant::now();
        timer.start(t0);
        timer.tick(t0 + Duration::from_millis(10));
        assert_eq!(timer.count(), 1);

        timer.reset(t0 + Duration::from_millis(20));
        assert_eq!(timer.count(), 0);
        assert!(timer.is_running());
    }

    #[test]
    fn elapsed_tracks_start_to_last_firing() {
        let mut timer = Timer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        timer.start(t0);
        assert_eq!(timer.elapsed(), Duration::ZERO);

        timer.tick(t0 + Duration::from_millis(130));
        assert_eq!(timer.elapsed(), Duration::from_millis(130));
    }
}
