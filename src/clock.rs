use crate::error::Error;
use chrono::NaiveTime;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref TWELVE_HOUR: Regex = Regex::new(r"^(\d{1,2}) (AM|PM)$").unwrap();
}

/// An hour-of-day, compared on the 24-hour scale and displayed in
/// 12-hour clock-face form ("8 AM", "12 PM").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u8);

impl TimeOfDay {
    pub fn new(hour: u8) -> Option<Self> {
        (hour <= 23).then_some(Self(hour))
    }

    pub fn hour(self) -> u8 {
        self.0
    }

    /// The following hour, wrapping 23 -> 0. The meridiem flips at 0 and 12.
    pub fn next(self) -> Self {
        Self((self.0 + 1) % 24)
    }

    pub fn as_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.0), 0, 0).unwrap()
    }
}

impl FromStr for TimeOfDay {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let captures = TWELVE_HOUR
            .captures(s)
            .ok_or_else(|| Error::InvalidTimeFormat(s.to_string()))?;
        let clock_hour: u8 = captures[1]
            .parse()
            .map_err(|_| Error::InvalidTimeFormat(s.to_string()))?;
        if !(1..=12).contains(&clock_hour) {
            return Err(Error::InvalidTimeFormat(s.to_string()));
        }
        let hour = match (&captures[2], clock_hour) {
            ("AM", 12) => 0,
            ("AM", h) => h,
            ("PM", 12) => 12,
            ("PM", h) => h + 12,
            _ => unreachable!("meridiem constrained by the pattern"),
        };
        Ok(Self(hour))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clock_hour = match self.0 % 12 {
            0 => 12,
            h => h,
        };
        let meridiem = if self.0 < 12 { "AM" } else { "PM" };
        write!(f, "{clock_hour} {meridiem}")
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
