//! Timestamp formatting in the system timezone.

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

/// Formats unix seconds from the backend, falling back to the raw number.
pub struct UnixTime(pub i64);

impl fmt::Display for UnixTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Timestamp::from_second(self.0) {
            Ok(ts) => write!(f, "{}", LocalDateTime(&ts)),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}
