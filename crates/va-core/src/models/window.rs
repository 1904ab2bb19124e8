use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::AllocatorError;

/// Format of one timestamp inside a window literal.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One volunteering slot, written as `YYYY-MM-DD HH:MM YYYY-MM-DD HH:MM`.
///
/// Ordering is by start, then end, which matches the lexicographic order of
/// the literal form since every component is zero-padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, AllocatorError> {
        if end < start {
            return Err(AllocatorError::MalformedWindow(format!(
                "{} {}",
                start.format(TIMESTAMP_FORMAT),
                end.format(TIMESTAMP_FORMAT)
            )));
        }
        Ok(Self { start, end })
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.start.format(TIMESTAMP_FORMAT),
            self.end.format(TIMESTAMP_FORMAT)
        )
    }
}

impl FromStr for TimeWindow {
    type Err = AllocatorError;

    /// Strict parse: exactly two `YYYY-MM-DD HH:MM` timestamps separated by a
    /// single space, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let malformed = || AllocatorError::MalformedWindow(trimmed.to_string());

        // "YYYY-MM-DD HH:MM" is 16 bytes; the literal is 16 + 1 + 16.
        if trimmed.len() != 33 || !trimmed.is_ascii() || trimmed.as_bytes()[16] != b' ' {
            return Err(malformed());
        }
        let (start, end) = (&trimmed[..16], &trimmed[17..]);
        let start = NaiveDateTime::parse_from_str(start, TIMESTAMP_FORMAT).map_err(|_| malformed())?;
        let end = NaiveDateTime::parse_from_str(end, TIMESTAMP_FORMAT).map_err(|_| malformed())?;
        Self::new(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_roundtrip_literal() {
        let literal = "2024-05-01 09:00 2024-05-01 10:00";
        let window: TimeWindow = literal.parse().unwrap();
        assert_eq!(window.to_string(), literal);
        assert_eq!((window.end - window.start).num_minutes(), 60);
    }

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let window: TimeWindow = "  2024-05-01 09:00 2024-05-01 10:00\n".parse().unwrap();
        assert_eq!(window.to_string(), "2024-05-01 09:00 2024-05-01 10:00");
    }

    #[test]
    fn rejects_impossible_calendar_values() {
        assert!(matches!(
            "2024-13-01 09:00 2024-13-01 10:00".parse::<TimeWindow>(),
            Err(AllocatorError::MalformedWindow(_))
        ));
        assert!("2024-05-01 25:00 2024-05-01 26:00"
            .parse::<TimeWindow>()
            .is_err());
    }

    #[test]
    fn rejects_end_before_start() {
        let err = "2024-05-01 10:00 2024-05-01 09:00"
            .parse::<TimeWindow>()
            .unwrap_err();
        assert!(err.to_string().contains("2024-05-01 10:00 2024-05-01 09:00"));
    }

    #[test]
    fn rejects_other_separators() {
        assert!("2024-05-01 09:00-2024-05-01 10:00".parse::<TimeWindow>().is_err());
        assert!("2024-05-01 09:00  2024-05-01 10:00".parse::<TimeWindow>().is_err());
        assert!("2024-05-01 09:00".parse::<TimeWindow>().is_err());
    }

    #[test]
    fn ordering_follows_start_then_end() {
        let a: TimeWindow = "2024-05-01 09:00 2024-05-01 10:00".parse().unwrap();
        let b: TimeWindow = "2024-05-01 09:00 2024-05-01 11:00".parse().unwrap();
        let c: TimeWindow = "2024-04-30 18:00 2024-04-30 19:00".parse().unwrap();
        let mut windows = vec![a, b, c];
        windows.sort();
        assert_eq!(windows, vec![c, a, b]);
    }
}
