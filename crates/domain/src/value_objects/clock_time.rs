//! Wall-clock time of day for lecture start and end

use std::{fmt, str::FromStr};

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::DomainError;

/// A wall-clock time with minute precision
///
/// Accepts `H:MM` and `HH:MM` with hours `0-23` and minutes `00-59`.
/// Always rendered zero-padded (`09:05`), so the textual and the
/// chronological order agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Create a clock time from hour and minute
    ///
    /// # Errors
    ///
    /// Returns an error if the hour or minute is out of range.
    pub fn new(hour: u32, minute: u32) -> Result<Self, DomainError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| DomainError::InvalidTime(format!("{hour}:{minute:02}")))
    }

    /// Parse an `H:MM` / `HH:MM` string
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match the format.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidTime(s.to_string());

        let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
        if hour.is_empty()
            || hour.len() > 2
            || minute.len() != 2
            || !hour.bytes().all(|b| b.is_ascii_digit())
            || !minute.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        if hour > 23 || minute > 59 {
            return Err(invalid());
        }

        Self::new(hour, minute)
    }

    /// Hour of day (0-23)
    #[must_use]
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Minute of hour (0-59)
    #[must_use]
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_padded_time() {
        let t = ClockTime::parse("09:30").unwrap();
        assert_eq!(t.hour(), 9);
        assert_eq!(t.minute(), 30);
    }

    #[test]
    fn parses_single_digit_hour_and_pads_on_display() {
        let t = ClockTime::parse("9:05").unwrap();
        assert_eq!(t.to_string(), "09:05");
    }

    #[test]
    fn accepts_boundaries() {
        assert!(ClockTime::parse("00:00").is_ok());
        assert!(ClockTime::parse("23:59").is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(ClockTime::parse("24:00").is_err());
        assert!(ClockTime::parse("12:60").is_err());
    }

    #[test]
    fn rejects_malformed() {
        for input in ["", "9", "9:5", "09:5", "123:00", "ab:cd", "09-30", "09:30:00", " 9:30"] {
            assert!(ClockTime::parse(input).is_err(), "{input} should be rejected");
        }
    }

    #[test]
    fn ordering_is_chronological() {
        let early = ClockTime::parse("9:00").unwrap();
        let late = ClockTime::parse("10:00").unwrap();
        assert!(early < late);
        assert!(early.to_string() < late.to_string());
    }

    #[test]
    fn serde_uses_hh_mm() {
        let t = ClockTime::parse("7:45").unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"07:45\"");
        let back: ClockTime = serde_json::from_str("\"07:45\"").unwrap();
        assert_eq!(back, t);
        assert!(serde_json::from_str::<ClockTime>("\"7.45\"").is_err());
    }

    #[test]
    fn invalid_time_error_message() {
        let err = ClockTime::parse("25:00").unwrap_err();
        assert_eq!(err.to_string(), "Invalid time: 25:00");
    }
}
