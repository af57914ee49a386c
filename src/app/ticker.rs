//! Frame pacing for the render loop.
//!
//! The ticker is a plain value owned by the event loop: awaiting
//! [`FrameTicker::tick`] yields once per frame with the measured elapsed
//! time.  There is no background task, so dropping the ticker at teardown is
//! the whole unsubscribe story.

use std::time::Duration;

use tokio::time::{interval, Instant, Interval, MissedTickBehavior};

/// Fixed-cadence frame clock.
#[derive(Debug)]
pub struct FrameTicker {
    interval: Interval,
    last: Instant,
    period: Duration,
}

impl FrameTicker {
    /// Ticker firing `fps` times per second (at least once).
    pub fn new(fps: u32) -> Self {
        let period = frame_period(fps);
        let mut interval = interval(period);
        // A stalled frame should not be followed by a burst of catch-up ticks.
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            interval,
            last: Instant::now(),
            period,
        }
    }

    /// Wait for the next frame; returns seconds since the previous one.
    pub async fn tick(&mut self) -> f64 {
        let now = self.interval.tick().await;
        let dt = now.saturating_duration_since(self.last);
        self.last = now;
        dt.as_secs_f64()
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

/// Duration of one frame at `fps`.
pub fn frame_period(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / fps.max(1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_from_fps() {
        assert_eq!(frame_period(50), Duration::from_millis(20));
        assert_eq!(frame_period(0), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_report_elapsed_time() {
        let mut ticker = FrameTicker::new(50);
        assert_eq!(ticker.period(), Duration::from_millis(20));
        // First tick completes immediately.
        let first = ticker.tick().await;
        assert!(first < 0.02);
        let second = ticker.tick().await;
        assert!((second - 0.02).abs() < 1e-3, "dt = {second}");
    }
}
