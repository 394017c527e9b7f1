//! Time-of-day values used by the travel simulation.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// A time of day with one-second resolution, stored as seconds since midnight.
///
/// # Examples
///
/// ```
/// use u_quickroute::models::TimeOfDay;
///
/// let t = TimeOfDay::parse("08:30").unwrap();
/// assert_eq!(t.seconds(), 8 * 3600 + 30 * 60);
/// assert_eq!(t.to_string(), "08:30");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    /// Midnight.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Parses an `HH:MM` string.
    ///
    /// Returns `None` if the text is not a valid 24-hour time.
    pub fn parse(text: &str) -> Option<Self> {
        NaiveTime::parse_from_str(text.trim(), "%H:%M")
            .ok()
            .map(|t| TimeOfDay(t.num_seconds_from_midnight()))
    }

    /// Creates a time from hours and minutes.
    pub fn from_hm(hours: u32, minutes: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hours, minutes, 0).map(|t| TimeOfDay(t.num_seconds_from_midnight()))
    }

    /// Seconds since midnight.
    pub fn seconds(&self) -> u64 {
        u64::from(self.0)
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_hhmm(self.seconds()))
    }
}

/// Formats a second count as `HH:MM`, wrapping at 24 hours.
///
/// ```
/// use u_quickroute::models::format_hhmm;
///
/// assert_eq!(format_hhmm(1440), "00:24");
/// assert_eq!(format_hhmm(25 * 3600), "01:00");
/// ```
pub fn format_hhmm(seconds: u64) -> String {
    // `% SECONDS_PER_DAY` keeps the value below 86_400, which always fits.
    let secs = (seconds % SECONDS_PER_DAY) as u32;
    match NaiveTime::from_num_seconds_from_midnight_opt(secs, 0) {
        Some(t) => t.format("%H:%M").to_string(),
        None => String::from("00:00"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let t = TimeOfDay::parse("08:00").expect("valid");
        assert_eq!(t.seconds(), 28_800);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(TimeOfDay::parse("25:00").is_none());
        assert!(TimeOfDay::parse("8am").is_none());
        assert!(TimeOfDay::parse("").is_none());
    }

    #[test]
    fn test_from_hm() {
        assert_eq!(TimeOfDay::from_hm(23, 59), TimeOfDay::parse("23:59"));
        assert!(TimeOfDay::from_hm(24, 0).is_none());
    }

    #[test]
    fn test_ordering() {
        let a = TimeOfDay::parse("07:59").expect("valid");
        let b = TimeOfDay::parse("08:00").expect("valid");
        assert!(a < b);
        assert!(TimeOfDay::MIDNIGHT < a);
    }

    #[test]
    fn test_format_wraps_day() {
        assert_eq!(format_hhmm(0), "00:00");
        assert_eq!(format_hhmm(28_800 + 1440), "08:24");
        assert_eq!(format_hhmm(SECONDS_PER_DAY + 60), "00:01");
    }
}
