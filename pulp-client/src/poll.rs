//! Task polling policy
//!
//! Governs how often a remote task is re-polled and for how long.

use std::time::Duration;

/// Backoff and bound for waiting on a remote task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay before the second poll
    pub initial_interval: Duration,

    /// Upper bound on the delay between polls
    pub max_interval: Duration,

    /// Factor applied to the delay after every poll (1 = fixed interval)
    pub multiplier: u32,

    /// Give up after this much time; `None` waits forever
    pub max_wait: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(500),
            max_interval: Duration::from_secs(5),
            multiplier: 2,
            max_wait: Some(Duration::from_secs(3600)),
        }
    }
}

impl PollPolicy {
    /// Poll every `interval` with no backoff
    pub fn fixed(interval: Duration) -> Self {
        Self {
            initial_interval: interval,
            max_interval: interval,
            multiplier: 1,
            ..Self::default()
        }
    }

    pub fn with_max_wait(mut self, max_wait: Option<Duration>) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Delay to sleep after the `poll`-th non-terminal reply (0-based)
    pub fn delay_for(&self, poll: u32) -> Duration {
        let shift = poll.min(16);
        let factor = self.multiplier.max(1).saturating_pow(shift);
        self.initial_interval
            .saturating_mul(factor)
            .min(self.max_interval.max(self.initial_interval))
    }
}
