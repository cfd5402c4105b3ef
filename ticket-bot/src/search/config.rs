//! Retry policy for provider searches.

use std::time::Duration;

/// How hard a search tries before giving up.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first.
    pub max_attempts: u32,

    /// Backoff step (seconds). The wait after attempt `n` is `n` steps.
    pub backoff_step_secs: u64,

    /// Deadline for a whole search, retries and waits included (seconds).
    pub deadline_secs: u64,
}

impl RetryConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_attempts: u32, backoff_step_secs: u64, deadline_secs: u64) -> Self {
        Self {
            max_attempts,
            backoff_step_secs,
            deadline_secs,
        }
    }

    /// Wait before the attempt following `attempt` (1-based).
    ///
    /// Linear: 1 step after the first failure, 2 after the second.
    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_secs(self.backoff_step_secs.saturating_mul(u64::from(attempt)))
    }

    /// Returns the search deadline as a Duration.
    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }

    /// Attempts to make, never fewer than one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_step_secs: 1,
            deadline_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_backoff() {
        let config = RetryConfig::default();
        assert_eq!(config.backoff(1), Duration::from_secs(1));
        assert_eq!(config.backoff(2), Duration::from_secs(2));
        assert_eq!(config.deadline(), Duration::from_secs(30));
    }

    #[test]
    fn at_least_one_attempt() {
        assert_eq!(RetryConfig::new(0, 1, 30).attempts(), 1);
        assert_eq!(RetryConfig::default().attempts(), 3);
    }
}
