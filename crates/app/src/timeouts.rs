//! Timeout settings.
//!
//! Every I/O boundary (store query, cache call, proxy call) takes its deadline
//! from a named option. A value of `0` is the "no timeout" sentinel.

use std::time::Duration;

/// Deadline applied where a finite duration is mandatory but the configured
/// value is the "no timeout" sentinel.
pub const UNBOUNDED_CEILING: Duration = Duration::from_secs(24 * 60 * 60);

/// Convert a configured number of seconds into an optional deadline.
#[must_use]
pub fn from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Convert a configured number of milliseconds into an optional deadline.
#[must_use]
pub fn from_millis(millis: u64) -> Option<Duration> {
    (millis > 0).then(|| Duration::from_millis(millis))
}

/// Resolve an optional deadline for APIs that cannot wait forever.
#[must_use]
pub fn or_ceiling(timeout: Option<Duration>) -> Duration {
    timeout.unwrap_or(UNBOUNDED_CEILING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_means_no_timeout() {
        assert_eq!(from_secs(0), None);
        assert_eq!(from_millis(0), None);
    }

    #[test]
    fn positive_values_become_deadlines() {
        assert_eq!(from_secs(5), Some(Duration::from_secs(5)));
        assert_eq!(from_millis(250), Some(Duration::from_millis(250)));
    }

    #[test]
    fn unbounded_resolves_to_ceiling() {
        assert_eq!(or_ceiling(None), UNBOUNDED_CEILING);
        assert_eq!(
            or_ceiling(Some(Duration::from_secs(1))),
            Duration::from_secs(1)
        );
    }
}
