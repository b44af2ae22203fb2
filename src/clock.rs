//! The time source for ids, date stamps and month detection.

use crate::model::Month;
use chrono::{DateTime, Local, Utc};
use std::fmt::Debug;

/// Provides the current time. The store reads time only through this trait so that tests can pin
/// it.
pub trait Clock: Debug {
    fn now(&self) -> DateTime<Utc>;

    /// The month records are currently being accumulated for. Derived from UTC.
    fn month(&self) -> Month {
        Month::of(&self.now())
    }

    /// Milliseconds since the epoch, used as record ids.
    fn timestamp_millis(&self) -> u64 {
        u64::try_from(self.now().timestamp_millis()).unwrap_or_default()
    }

    /// The local calendar date shown next to a record, e.g. `3/14/2024`.
    fn date_stamp(&self) -> String {
        self.now()
            .with_timezone(&Local)
            .format("%-m/%-d/%Y")
            .to_string()
    }
}

/// Reads the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap());
        assert_eq!(clock.month().to_string(), "2024-01");
        assert_eq!(clock.timestamp_millis(), 1706702400000);
        assert!(clock.date_stamp().ends_with("/2024"));
    }
}
