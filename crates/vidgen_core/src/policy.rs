//! Job polling policy.

use derive_getters::Getters;
use std::time::Duration;

/// How often a running job is re-queried, and when to give up.
///
/// With both caps unset the pipeline polls until the job finishes.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use vidgen_core::PollPolicy;
///
/// let policy = PollPolicy::default().with_max_attempts(3);
/// assert_eq!(*policy.interval(), Duration::from_secs(10));
/// assert!(!policy.exhausted(3, Duration::ZERO));
/// assert!(policy.exhausted(4, Duration::ZERO));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct PollPolicy {
    /// Sleep between polls
    interval: Duration,
    /// Maximum number of polls
    max_attempts: Option<u32>,
    /// Maximum time spent polling
    max_wait: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::unbounded(Duration::from_secs(crate::DEFAULT_POLL_INTERVAL_SECS))
    }
}

impl PollPolicy {
    /// Poll at `interval` until the job completes.
    pub fn unbounded(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
            max_wait: None,
        }
    }

    /// Cap the number of polls.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Cap the total polling time.
    pub fn with_max_wait(mut self, wait: Duration) -> Self {
        self.max_wait = Some(wait);
        self
    }

    /// True once a poll numbered `attempt` (1-based) may not be issued
    /// after `elapsed` time spent polling.
    pub fn exhausted(&self, attempt: u32, elapsed: Duration) -> bool {
        self.max_attempts.is_some_and(|max| attempt > max)
            || self.max_wait.is_some_and(|max| elapsed > max)
    }
}
