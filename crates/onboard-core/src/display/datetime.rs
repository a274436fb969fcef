//! Date and time formatting helpers.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Formats a stored `Timestamp` in the system time zone as
/// `YYYY-MM-DD HH:MM:SS TZ`.
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

/// Signed day distance rendered relative to the reference day.
///
/// ```rust
/// use onboard_core::display::RelativeDays;
///
/// assert_eq!(RelativeDays(0).to_string(), "today");
/// assert_eq!(RelativeDays(1).to_string(), "in 1 day");
/// assert_eq!(RelativeDays(14).to_string(), "in 14 days");
/// assert_eq!(RelativeDays(-3).to_string(), "3 days ago");
/// ```
pub struct RelativeDays(pub i32);

impl fmt::Display for RelativeDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = |n: i32| if n.abs() == 1 { "day" } else { "days" };
        match self.0 {
            0 => write!(f, "today"),
            n if n > 0 => write!(f, "in {n} {}", unit(n)),
            n => write!(f, "{} {} ago", -n, unit(n)),
        }
    }
}
