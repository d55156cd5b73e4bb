//! Points in time as signed nanosecond counts.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// A point in time, stored as nanoseconds since the Unix epoch.
///
/// Every `i64` is a valid timestamp, so the mapping to and from the
/// nanosecond count is a bijection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// 1970-01-01T00:00:00Z.
    pub const UNIX_EPOCH: Self = Self(0);

    /// Create a timestamp from nanoseconds since the Unix epoch.
    #[must_use]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    /// Get the nanoseconds since the Unix epoch.
    #[must_use]
    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    /// The current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        Self::from(SystemTime::now())
    }

    /// Converts to a [`SystemTime`], or `None` if the platform cannot
    /// represent it.
    #[must_use]
    pub fn to_system_time(self) -> Option<SystemTime> {
        let offset = Duration::from_nanos(self.0.unsigned_abs());
        if self.0 >= 0 {
            UNIX_EPOCH.checked_add(offset)
        } else {
            UNIX_EPOCH.checked_sub(offset)
        }
    }
}

/// Saturates at `i64::MIN` / `i64::MAX` nanoseconds (roughly 292 years
/// either side of the epoch).
impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        let nanos = match time.duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_nanos()).unwrap_or(i64::MAX),
            Err(before) => {
                i64::try_from(before.duration().as_nanos()).map(|n| -n).unwrap_or(i64::MIN)
            }
        };
        Self(nanos)
    }
}

impl From<i64> for Timestamp {
    fn from(nanos: i64) -> Self {
        Self::from_nanos(nanos)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn nanos_roundtrip() {
        for nanos in [i64::MIN, -1, 0, 1, 1_700_000_000_123_456_789, i64::MAX] {
            assert_eq!(Timestamp::from_nanos(nanos).as_nanos(), nanos);
        }
    }

    #[test]
    fn system_time_roundtrip() {
        let ts = Timestamp::from_nanos(1_700_000_000_123_456_789);
        let time = ts.to_system_time().unwrap();
        assert_eq!(Timestamp::from(time), ts);
    }

    #[test]
    fn before_epoch_is_negative() {
        let time = UNIX_EPOCH - Duration::from_secs(1);
        assert_eq!(Timestamp::from(time).as_nanos(), -1_000_000_000);
        assert_eq!(Timestamp::from_nanos(-1_000_000_000).to_system_time().unwrap(), time);
    }

    #[test]
    fn timestamps_are_ordered() {
        assert!(Timestamp::from_nanos(-5) < Timestamp::UNIX_EPOCH);
        assert!(Timestamp::UNIX_EPOCH < Timestamp::now());
    }
}
