//! Timestamp display utilities.
//!
//! Stored timestamps are UTC; these wrappers render them in the system
//! timezone.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Formats a `Timestamp` as `YYYY-MM-DD HH:MM:SS TZ` in the system timezone.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Formats a `Timestamp` as `YYYY-MM-DD` in the system timezone, for
/// compact list rows.
pub struct LocalDate<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0.to_zoned(TimeZone::system()).strftime("%Y-%m-%d")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2022-01-01 12:00:00 UTC stays on Jan 1st or 2nd in every timezone
    const NOON: i64 = 1_641_038_400;

    #[test]
    fn test_local_date_time_shape() {
        let ts = Timestamp::from_second(NOON).unwrap();
        let output = LocalDateTime(&ts).to_string();
        assert!(output.starts_with("2022-01-0"));
        assert_eq!(output.matches(':').count(), 2);
    }

    #[test]
    fn test_local_date_has_no_time() {
        let ts = Timestamp::from_second(NOON).unwrap();
        let output = LocalDate(&ts).to_string();
        assert_eq!(output.len(), 10);
        assert!(output.starts_with("2022-01-0"));
    }
}
