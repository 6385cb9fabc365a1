//! Simulated network conditions for the mock backend.

use std::time::Duration;

use super::StoreError;

/// Delay and failure injection applied to every data call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Latency {
    delay: Duration,
    failure_rate: f64,
}

impl Latency {
    /// Create a simulator. `failure_rate` is clamped to `0.0..=1.0`.
    #[must_use]
    pub fn new(delay: Duration, failure_rate: f64) -> Self {
        Self {
            delay,
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }

    /// No delay and no failures (tests, CLI).
    #[must_use]
    pub fn none() -> Self {
        Self::new(Duration::ZERO, 0.0)
    }

    /// Configured delay.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the simulated round trip, then maybe fail.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` when the failure draw hits.
    pub async fn simulate(&self, operation: &str, kind: &str) -> Result<(), StoreError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.failure_rate > 0.0 && rand::random::<f64>() < self.failure_rate {
            tracing::warn!(operation, kind, "Simulated backend failure");
            return Err(StoreError::Unavailable(format!("{operation} {kind}")));
        }

        tracing::debug!(
            operation,
            kind,
            delay_ms = u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX),
            "Mock call completed"
        );
        Ok(())
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_failures_at_zero_rate() {
        let latency = Latency::none();
        for _ in 0..50 {
            assert!(latency.simulate("list", "product").await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_always_fails_at_full_rate() {
        let latency = Latency::new(Duration::ZERO, 1.0);
        let err = latency.simulate("delete", "tag").await.unwrap_err();
        assert_eq!(err.to_string(), "service unavailable: delete tag");
    }

    #[test]
    fn test_rate_is_clamped() {
        assert_eq!(Latency::new(Duration::ZERO, 7.0), Latency::new(Duration::ZERO, 1.0));
    }
}
