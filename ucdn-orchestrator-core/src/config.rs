//! Reconciliation configuration
//!
//! Retry policies are plain values handed to every operation, so tests can swap
//! in their own numbers and drive them with a paused tokio clock.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// 变更类 RPC 的重试预算
pub const MUTATION_MAX_ELAPSED: Duration = Duration::from_secs(30);

/// 证书列表分页大小
pub const DEFAULT_CERT_PAGE_SIZE: u32 = 10;

/// Exponential backoff parameters.
///
/// Every delay is `interval * (1 ± randomization_factor)`; `interval` starts at
/// `initial_interval`, grows by `multiplier` after each retry and is capped at
/// `max_interval`. Retrying stops once the next sleep would cross `max_elapsed`
/// (`None` = never).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    #[serde(with = "duration_ms")]
    pub initial_interval: Duration,
    pub multiplier: f64,
    #[serde(with = "duration_ms")]
    pub max_interval: Duration,
    pub randomization_factor: f64,
    #[serde(with = "option_duration_ms")]
    pub max_elapsed: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(500),
            multiplier: 1.5,
            max_interval: Duration::from_secs(60),
            randomization_factor: 0.5,
            max_elapsed: None,
        }
    }
}

impl RetryPolicy {
    /// Policy for mutating RPCs (30 s budget).
    #[must_use]
    pub fn mutation() -> Self {
        Self {
            max_elapsed: Some(MUTATION_MAX_ELAPSED),
            ..Self::default()
        }
    }

    /// Policy with no elapsed-time cap.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_elapsed(mut self, max_elapsed: Option<Duration>) -> Self {
        self.max_elapsed = max_elapsed;
        self
    }

    /// Interval used after `current`, capped at `max_interval`.
    pub(crate) fn next_interval(&self, current: Duration) -> Duration {
        let next = current.as_secs_f64() * self.multiplier;
        if next >= self.max_interval.as_secs_f64() {
            self.max_interval
        } else {
            Duration::from_secs_f64(next)
        }
    }

    /// Random delay in `[interval - delta, interval + delta]`, `delta = interval * factor`.
    pub(crate) fn randomize(&self, interval: Duration) -> Duration {
        let factor = self.randomization_factor.clamp(0.0, 1.0);
        if factor <= 0.0 || interval.is_zero() {
            return interval;
        }
        let secs = interval.as_secs_f64();
        let delta = secs * factor;
        Duration::from_secs_f64(rand::rng().random_range((secs - delta)..=(secs + delta)))
    }
}

/// Policies used by the services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Mutating RPCs and the per-attempt snapshot fetch while polling.
    pub mutation: RetryPolicy,
    /// Outer status-poll loop.
    ///
    /// Unbounded by default: a domain stuck in a transient status keeps the poll alive.
    pub status_poll: RetryPolicy,
    /// `GetCertificateV2` page size.
    pub cert_page_size: u32,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            mutation: RetryPolicy::mutation(),
            status_poll: RetryPolicy::unbounded(),
            cert_page_size: DEFAULT_CERT_PAGE_SIZE,
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

mod option_duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::cast_possible_truncation, clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        value: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => serializer.serialize_some(&(d.as_millis() as u64)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_budgets() {
        let config = ReconcileConfig::default();
        assert_eq!(config.mutation.max_elapsed, Some(Duration::from_secs(30)));
        assert_eq!(config.status_poll.max_elapsed, None);
        assert_eq!(config.cert_page_size, 10);
    }

    #[test]
    fn interval_grows_and_caps() {
        let policy = RetryPolicy {
            initial_interval: Duration::from_secs(1),
            multiplier: 2.0,
            max_interval: Duration::from_secs(5),
            randomization_factor: 0.0,
            max_elapsed: None,
        };
        let mut interval = policy.initial_interval;
        let mut seen = Vec::new();
        for _ in 0..4 {
            interval = policy.next_interval(interval);
            seen.push(interval.as_secs());
        }
        assert_eq!(seen, vec![2, 4, 5, 5]);
    }

    #[test]
    fn randomize_stays_in_range() {
        let policy = RetryPolicy::default();
        let base = Duration::from_secs(2);
        for _ in 0..100 {
            let d = policy.randomize(base);
            assert!(d >= Duration::from_secs(1) && d <= Duration::from_secs(3), "{d:?}");
        }
    }

    #[test]
    fn zero_factor_is_deterministic() {
        let policy = RetryPolicy {
            randomization_factor: 0.0,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.randomize(Duration::from_millis(700)), Duration::from_millis(700));
    }

    #[test]
    fn config_deserializes_partial() {
        let config: ReconcileConfig = serde_json::from_str(
            r#"{"mutation": {"max_elapsed": 5000}, "cert_page_size": 50}"#,
        )
        .unwrap();
        assert_eq!(config.mutation.max_elapsed, Some(Duration::from_secs(5)));
        assert_eq!(config.mutation.initial_interval, Duration::from_millis(500));
        assert_eq!(config.status_poll.max_elapsed, None);
        assert_eq!(config.cert_page_size, 50);
    }
}
