use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl ExponentialBackoff {
    pub fn new(base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            attempts: 0,
            base_delay,
            max_delay,
        }
    }

    /// Zero before the first retry, then `base_delay * 2^attempts` up to `max_delay`.
    pub fn next_delay(&self) -> Duration {
        if self.attempts == 0 {
            return Duration::ZERO;
        }

        let multiplier = 2u32.saturating_pow(self.attempts.min(31));
        self.base_delay.saturating_mul(multiplier).min(self.max_delay)
    }

    pub fn bump(&mut self) {
        self.attempts = self.attempts.saturating_add(1);
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    backoff_factor: Duration,
    max_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff_factor: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            backoff_factor,
            max_delay,
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff::new(self.backoff_factor, self.max_delay)
    }
}
