//! Date/time display utilities.
//!
//! Audit timestamps are UTC instants and render in the system timezone;
//! schedule times are civil (timezone-free) and render as written.

use std::fmt;

use jiff::civil::DateTime;
use jiff::{tz::TimeZone, Timestamp};

/// A wrapper around `Timestamp` that provides system timezone formatting
/// via the `Display` trait.
///
/// # Format
///
/// The display format follows the pattern: `YYYY-MM-DD HH:MM:SS TZ`
/// - Year, month, and day are zero-padded
/// - Time is in 24-hour format with zero-padded components
/// - Timezone abbreviation is included (e.g., UTC, EST, JST)
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

/// A wrapper around a civil `DateTime` formatting as `YYYY-MM-DD HH:MM`.
///
/// Schedule times are civil on purpose: a 08:30 pickup is a 08:30 pickup
/// whatever the operator's timezone, so no zone conversion is applied.
pub struct CivilClock<'a>(pub &'a DateTime);

impl fmt::Display for CivilClock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%Y-%m-%d %H:%M"))
    }
}
