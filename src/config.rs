use std::time::Duration;

use crate::protocol::DEFAULT_ADDRESS;

// The sensor needs at most 85ms for a 14-bit temperature conversion, so 10 polls spaced 10ms apart
// cover the slowest measurement.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(15);

/// Driver settings. `Config::default()` matches the SHT20 datasheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub address: u16,
    /// Number of read attempts after a no-hold trigger before giving up.
    pub max_attempts: u32,
    /// Delay before each read attempt.
    pub poll_interval: Duration,
    pub reset_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            poll_interval: DEFAULT_POLL_INTERVAL,
            reset_delay: DEFAULT_RESET_DELAY,
        }
    }
}

impl Config {
    pub fn with_address(mut self, address: u16) -> Self {
        self.address = address;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_reset_delay(mut self, reset_delay: Duration) -> Self {
        self.reset_delay = reset_delay;
        self
    }

    /// Upper bound on the time spent waiting for a single no-hold measurement. Saturates at
    /// `Duration::MAX`.
    pub fn poll_budget(&self) -> Duration {
        self.poll_interval
            .checked_mul(self.max_attempts)
            .unwrap_or(Duration::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.address, 0x40);
        assert_eq!(config.max_attempts, 10);
        assert_eq!(config.poll_budget(), Duration::from_millis(100));
    }

    #[test]
    fn test_builder() {
        let config = Config::default()
            .with_address(0x41)
            .with_max_attempts(3)
            .with_poll_interval(Duration::from_millis(5))
            .with_reset_delay(Duration::ZERO);
        assert_eq!(config.address, 0x41);
        assert_eq!(config.poll_budget(), Duration::from_millis(15));
        assert_eq!(config.reset_delay, Duration::ZERO);
    }

    #[test]
    fn test_poll_budget_saturates() {
        let config = Config::default()
            .with_max_attempts(u32::MAX)
            .with_poll_interval(Duration::MAX);
        assert_eq!(config.poll_budget(), Duration::MAX);
    }
}
