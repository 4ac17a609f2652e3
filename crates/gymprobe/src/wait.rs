//! Wait mechanisms.
//!
//! Every expectation in the suite is a poll: re-query the page until a
//! condition holds or the deadline passes. Polling sleeps on the tokio timer
//! so a session never blocks its runtime thread.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::result::{GymError, GymResult};

/// Default timeout for actions and assertions (5 seconds)
pub const DEFAULT_ACTION_TIMEOUT_MS: u64 = 5_000;

/// Default timeout for page navigation (30 seconds)
pub const DEFAULT_NAVIGATION_TIMEOUT_MS: u64 = 30_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_ACTION_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Outcome of a single probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check<T> {
    /// Condition holds
    Ready(T),
    /// Not yet; `observed` describes what the probe saw
    Pending {
        /// Last observed state
        observed: String,
    },
}

impl<T> Check<T> {
    /// Pending with a description of the observed state
    #[must_use]
    pub fn pending(observed: impl Into<String>) -> Self {
        Self::Pending {
            observed: observed.into(),
        }
    }
}

/// Poll `probe` until it reports [`Check::Ready`] or the timeout elapses.
///
/// The probe always runs at least once, so a zero timeout still checks the
/// current state. Errors from the probe abort the wait immediately.
///
/// # Errors
///
/// Returns [`GymError::Timeout`] carrying the last observed state, or the
/// probe's own error.
pub async fn poll_until<T, F, Fut>(options: &WaitOptions, what: &str, mut probe: F) -> GymResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = GymResult<Check<T>>>,
{
    let deadline = Instant::now() + options.timeout();
    loop {
        let observed = match probe().await? {
            Check::Ready(value) => return Ok(value),
            Check::Pending { observed } => observed,
        };
        if Instant::now() >= deadline {
            tracing::debug!(what, %observed, timeout_ms = options.timeout_ms, "wait timed out");
            return Err(GymError::Timeout {
                what: what.to_string(),
                ms: options.timeout_ms,
                observed,
            });
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    mod wait_options_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let opts = WaitOptions::default();
            assert_eq!(opts.timeout_ms, 5_000);
            assert_eq!(opts.poll_interval_ms, 50);
        }

        #[test]
        fn test_builders() {
            let opts = WaitOptions::new().with_timeout(250).with_poll_interval(5);
            assert_eq!(opts.timeout(), Duration::from_millis(250));
            assert_eq!(opts.poll_interval(), Duration::from_millis(5));
        }
    }

    mod poll_tests {
        use super::*;

        #[tokio::test]
        async fn test_ready_after_a_few_polls() {
            let counter = AtomicUsize::new(0);
            let calls = &counter;
            let opts = WaitOptions::new().with_timeout(1_000).with_poll_interval(1);
            let value = poll_until(&opts, "third call", move || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n >= 3 {
                    Ok(Check::Ready(n))
                } else {
                    Ok(Check::pending(format!("call {n}")))
                }
            })
            .await
            .unwrap();
            assert_eq!(value, 3);
        }

        #[tokio::test]
        async fn test_timeout_carries_last_observation() {
            let opts = WaitOptions::new().with_timeout(20).with_poll_interval(5);
            let err = poll_until::<(), _, _>(&opts, "never", || async {
                Ok(Check::pending("still nothing"))
            })
            .await
            .unwrap_err();
            match err {
                GymError::Timeout { what, ms, observed } => {
                    assert_eq!(what, "never");
                    assert_eq!(ms, 20);
                    assert_eq!(observed, "still nothing");
                }
                other => panic!("unexpected error {other}"),
            }
        }

        #[tokio::test]
        async fn test_zero_timeout_still_probes_once() {
            let opts = WaitOptions::new().with_timeout(0);
            let value = poll_until(&opts, "now", || async { Ok(Check::Ready(7)) })
                .await
                .unwrap();
            assert_eq!(value, 7);
        }

        #[tokio::test]
        async fn test_probe_error_aborts() {
            let counter = AtomicUsize::new(0);
            let calls = &counter;
            let opts = WaitOptions::new().with_timeout(1_000).with_poll_interval(1);
            let err = poll_until::<(), _, _>(&opts, "abort", move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(GymError::StrictModeViolation {
                    locator: "text=x".into(),
                    count: 2,
                })
            })
            .await
            .unwrap_err();
            assert!(matches!(err, GymError::StrictModeViolation { count: 2, .. }));
            assert_eq!(counter.load(Ordering::SeqCst), 1);
        }
    }
}
