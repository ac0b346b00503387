//! Frame rate cap

use std::thread;
use std::time::{Duration, Instant};

/// Minimum time between two presented frames
pub const MIN_FRAME_DELAY: Duration = Duration::from_millis(16);

/// Sleeps after each frame so frames are at least `min_frame_delay` apart
#[derive(Debug, Clone)]
pub struct FramePacer {
    min_frame_delay: Duration,
    last_tick: Instant,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(MIN_FRAME_DELAY)
    }
}

impl FramePacer {
    /// Create a pacer whose first tick starts now
    pub fn new(min_frame_delay: Duration) -> Self {
        Self {
            min_frame_delay,
            last_tick: Instant::now(),
        }
    }

    /// The configured minimum frame period
    pub const fn min_frame_delay(&self) -> Duration {
        self.min_frame_delay
    }

    /// How long to sleep after a frame that took `elapsed`
    ///
    /// `None` when the frame already used up the whole period.
    pub fn delay_for(&self, elapsed: Duration) -> Option<Duration> {
        self.min_frame_delay
            .checked_sub(elapsed)
            .filter(|delay| !delay.is_zero())
    }

    /// End the current frame, sleeping for the rest of its period
    ///
    /// Returns the time slept.
    pub fn pace(&mut self) -> Option<Duration> {
        let elapsed = self.last_tick.elapsed();
        let delay = self.delay_for(elapsed);
        if let Some(delay) = delay {
            thread::sleep(delay);
        }
        self.last_tick = Instant::now();
        delay
    }

    /// Restart the period from now
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}
