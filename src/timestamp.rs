// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Precision-aware timestamps as used by ID3v2.4.
//!
//! The timestamp fields of ID3v2.4 are based on a subset of ISO 8601. At full precision, a
//! timestamp looks like `yyyy-MM-ddTHH:mm:ss`, but the precision may be reduced by removing as
//! many trailing time indicators as wanted, so `yyyy`, `yyyy-MM`, `yyyy-MM-dd`, `yyyy-MM-ddTHH`
//! and `yyyy-MM-ddTHH:mm` are valid timestamps, too.

use chrono::{
    format::{parse, ParseError as ChronoParseError, Parsed, StrftimeItems},
    Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc,
};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use std::str::FromStr;
use thiserror::Error;

/// Encountered when a timestamp cannot be parsed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The input does not match the format.
    #[error("Malformed timestamp ({0})")]
    Malformed(#[from] ChronoParseError),
    /// The input matches the format, but does not describe a valid point in time.
    #[error("Timestamp component out of range")]
    OutOfRange,
}

/// Format directives that yield a year.
const YEAR_DIRECTIVES: [&str; 2] = ["%Y", "%y"];
/// Format directives that yield a month.
const MONTH_DIRECTIVES: [&str; 3] = ["%m", "%b", "%B"];
/// Format directives that yield a day.
const DAY_DIRECTIVES: [&str; 1] = ["%d"];
/// Format directives that yield an hour.
const HOUR_DIRECTIVES: [&str; 2] = ["%H", "%I"];
/// Format directives that yield a minute.
const MINUTE_DIRECTIVES: [&str; 1] = ["%M"];
/// Format directives that yield a second.
const SECOND_DIRECTIVES: [&str; 1] = ["%S"];

/// The ID3 serializations, from the most to the least precise one.
const ID3_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H",
    "%Y-%m-%d",
    "%Y-%m",
    "%Y",
];

/// Returns `true` if any of the directives occurs in the format string.
fn has_directive(format: &str, directives: &[&str]) -> bool {
    directives.iter().any(|directive| format.contains(directive))
}

/// A partial point in time where each component may be absent.
///
/// Only the longest present prefix of `(year, month, day, hour, minute, second)` is serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp {
    /// Year.
    year: Option<i32>,
    /// Month (1-12).
    month: Option<u32>,
    /// Day of the month (1-31).
    day: Option<u32>,
    /// Hour (0-23).
    hour: Option<u32>,
    /// Minute (0-59).
    minute: Option<u32>,
    /// Second (0-59).
    second: Option<u32>,
}

impl Timestamp {
    /// Create an empty timestamp without any components.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a timestamp from explicit components.
    #[must_use]
    pub fn from_components(
        year: Option<i32>,
        month: Option<u32>,
        day: Option<u32>,
        hour: Option<u32>,
        minute: Option<u32>,
        second: Option<u32>,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Set the year.
    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Set the month.
    #[must_use]
    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    /// Set the day.
    #[must_use]
    pub fn with_day(mut self, day: u32) -> Self {
        self.day = Some(day);
        self
    }

    /// Set the hour.
    #[must_use]
    pub fn with_hour(mut self, hour: u32) -> Self {
        self.hour = Some(hour);
        self
    }

    /// Set the minute.
    #[must_use]
    pub fn with_minute(mut self, minute: u32) -> Self {
        self.minute = Some(minute);
        self
    }

    /// Set the second.
    #[must_use]
    pub fn with_second(mut self, second: u32) -> Self {
        self.second = Some(second);
        self
    }

    /// The current point in time (UTC) with all components present.
    #[must_use]
    pub fn now() -> Self {
        Self::from(Utc::now().naive_utc())
    }

    /// Parse a timestamp from a string using a `strftime`-style format.
    ///
    /// Only the components whose directives occur in `format` are present in the result, e.g.
    /// parsing with `%Y-%m` yields a timestamp with year and month, but without day.
    ///
    /// # Errors
    ///
    /// Returns an error if the input does not match the format or if the parsed components do not
    /// describe a valid date and time.
    pub fn strptime(value: &str, format: &str) -> Result<Self, ParseError> {
        let mut parsed = Parsed::new();
        parse(&mut parsed, value, StrftimeItems::new(format))?;

        let year = has_directive(format, &YEAR_DIRECTIVES)
            .then(|| {
                parsed.year().or_else(|| {
                    parsed.year_mod_100().map(|year| {
                        if year < 69 {
                            2000 + year
                        } else {
                            1900 + year
                        }
                    })
                })
            })
            .flatten();
        let month = has_directive(format, &MONTH_DIRECTIVES)
            .then(|| parsed.month())
            .flatten();
        let day = has_directive(format, &DAY_DIRECTIVES)
            .then(|| parsed.day())
            .flatten();
        let hour = has_directive(format, &HOUR_DIRECTIVES)
            .then(|| {
                parsed
                    .hour_mod_12()
                    .map(|hour| parsed.hour_div_12().unwrap_or(0) * 12 + hour % 12)
            })
            .flatten();
        let minute = has_directive(format, &MINUTE_DIRECTIVES)
            .then(|| parsed.minute())
            .flatten();
        let second = has_directive(format, &SECOND_DIRECTIVES)
            .then(|| parsed.second())
            .flatten();

        let timestamp = Self::from_components(year, month, day, hour, minute, second);
        if timestamp.to_naive_datetime().is_none() {
            return Err(ParseError::OutOfRange);
        }
        Ok(timestamp)
    }

    /// Year, if present.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// Month, if present.
    #[must_use]
    pub fn month(&self) -> Option<u32> {
        self.month
    }

    /// Day, if present.
    #[must_use]
    pub fn day(&self) -> Option<u32> {
        self.day
    }

    /// Hour, if present.
    #[must_use]
    pub fn hour(&self) -> Option<u32> {
        self.hour
    }

    /// Minute, if present.
    #[must_use]
    pub fn minute(&self) -> Option<u32> {
        self.minute
    }

    /// Second, if present.
    #[must_use]
    pub fn second(&self) -> Option<u32> {
        self.second
    }

    /// Returns `true` if no component is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Number of components that will be serialized.
    fn precision(&self) -> usize {
        [
            self.year.is_some(),
            self.month.is_some(),
            self.day.is_some(),
            self.hour.is_some(),
            self.minute.is_some(),
            self.second.is_some(),
        ]
        .into_iter()
        .take_while(|present| *present)
        .count()
    }

    /// Convert to a date and time, filling absent components with the lowest valid value.
    fn to_naive_datetime(self) -> Option<NaiveDateTime> {
        let date = NaiveDate::from_ymd_opt(
            self.year.unwrap_or(1900),
            self.month.unwrap_or(1),
            self.day.unwrap_or(1),
        )?;
        let time = NaiveTime::from_hms_opt(
            self.hour.unwrap_or(0),
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
        )?;
        Some(date.and_time(time))
    }

    /// Serialize to the ID3 timestamp format, truncated to the precision of this timestamp.
    ///
    /// Components after the first absent one are ignored. Returns an empty string if the year is
    /// absent.
    #[must_use]
    pub fn serialize(&self) -> String {
        let Some(year) = self.year else {
            return String::new();
        };

        let mut serialized = format!("{year:04}");
        let components = [
            ('-', self.month),
            ('-', self.day),
            ('T', self.hour),
            (':', self.minute),
            (':', self.second),
        ];
        for (separator, value) in components.into_iter().take(self.precision() - 1) {
            if let Some(value) = value {
                let _ = write!(serialized, "{separator}{value:02}");
            }
        }
        serialized
    }

    /// Format the timestamp with a `strftime`-style format string.
    ///
    /// Absent date components are treated as `1` and absent time components as `0`.
    #[must_use]
    pub fn strftime(&self, format: &str) -> String {
        self.to_naive_datetime()
            .map(|datetime| datetime.format(format).to_string())
            .unwrap_or_default()
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::from_components(
            Some(datetime.year()),
            Some(datetime.month()),
            Some(datetime.day()),
            Some(datetime.hour()),
            Some(datetime.minute()),
            Some(datetime.second()),
        )
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(date: NaiveDate) -> Self {
        Self::new()
            .with_year(date.year())
            .with_month(date.month())
            .with_day(date.day())
    }
}

impl FromStr for Timestamp {
    type Err = ParseError;

    /// Parse an ID3 timestamp of any precision.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty() {
            return Ok(Self::new());
        }

        let mut last_error = None;
        for format in ID3_FORMATS {
            match Self::strptime(value, format) {
                Ok(timestamp) => return Ok(timestamp),
                Err(err) => last_error = Some(err),
            }
        }

        Err(last_error.unwrap_or(ParseError::OutOfRange))
    }
}

impl TryFrom<String> for Timestamp {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timestamp> for String {
    fn from(timestamp: Timestamp) -> Self {
        timestamp.serialize()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_precision() {
        let timestamp = Timestamp::new();
        assert_eq!(timestamp.serialize(), "");

        let timestamp = timestamp.with_year(1962);
        assert_eq!(timestamp.serialize(), "1962");

        let timestamp = timestamp.with_month(1);
        assert_eq!(timestamp.serialize(), "1962-01");

        let timestamp = timestamp.with_day(17);
        assert_eq!(timestamp.serialize(), "1962-01-17");

        let timestamp = timestamp.with_hour(9);
        assert_eq!(timestamp.serialize(), "1962-01-17T09");

        let timestamp = timestamp.with_minute(5);
        assert_eq!(timestamp.serialize(), "1962-01-17T09:05");

        let timestamp = timestamp.with_second(42);
        assert_eq!(timestamp.serialize(), "1962-01-17T09:05:42");
    }

    #[test]
    fn test_serialize_stops_at_first_gap() {
        let timestamp = Timestamp::new().with_year(1986).with_day(4);
        assert_eq!(timestamp.serialize(), "1986");

        let timestamp = Timestamp::new().with_month(4).with_day(4);
        assert_eq!(timestamp.serialize(), "");

        let timestamp = Timestamp::new()
            .with_year(1986)
            .with_month(4)
            .with_minute(30);
        assert_eq!(timestamp.serialize(), "1986-04");
    }

    #[test]
    fn test_serialize_ignores_components_after_gap() {
        let timestamp = Timestamp::new().with_year(2021).with_day(40);
        assert_eq!(timestamp.serialize(), "2021");

        let timestamp = Timestamp::new().with_year(2021).with_hour(24);
        assert_eq!(timestamp.serialize(), "2021");

        let timestamp = Timestamp::new()
            .with_year(2021)
            .with_month(2)
            .with_minute(75);
        assert_eq!(timestamp.to_string(), "2021-02");
    }

    #[test]
    fn test_strptime_infers_components() {
        let timestamp = Timestamp::strptime("17.01.1962", "%d.%m.%Y").unwrap();
        assert_eq!(timestamp.year(), Some(1962));
        assert_eq!(timestamp.month(), Some(1));
        assert_eq!(timestamp.day(), Some(17));
        assert_eq!(timestamp.hour(), None);
        assert_eq!(timestamp.serialize(), "1962-01-17");

        let timestamp = Timestamp::strptime("April 1986", "%B %Y").unwrap();
        assert_eq!(timestamp.serialize(), "1986-04");

        let timestamp = Timestamp::strptime("1986", "%Y").unwrap();
        assert_eq!(timestamp.month(), None);
        assert_eq!(timestamp.serialize(), "1986");
    }

    #[test]
    fn test_strptime_roundtrip_matches_format_precision() {
        for (value, format) in [
            ("2021", "%Y"),
            ("2021-05", "%Y-%m"),
            ("2021-05-21", "%Y-%m-%d"),
            ("2021-05-21T13", "%Y-%m-%dT%H"),
            ("2021-05-21T13:37", "%Y-%m-%dT%H:%M"),
            ("2021-05-21T13:37:08", "%Y-%m-%dT%H:%M:%S"),
        ] {
            let timestamp = Timestamp::strptime(value, format).unwrap();
            assert_eq!(timestamp.serialize(), value);
        }
    }

    #[test]
    fn test_strptime_day_without_month() {
        let timestamp = Timestamp::strptime("2021 21", "%Y %d").unwrap();
        assert_eq!(timestamp.day(), Some(21));
        assert_eq!(timestamp.month(), None);
        assert_eq!(timestamp.serialize(), "2021");
    }

    #[test]
    fn test_strptime_two_digit_year() {
        assert_eq!(Timestamp::strptime("99", "%y").unwrap().year(), Some(1999));
        assert_eq!(Timestamp::strptime("07", "%y").unwrap().year(), Some(2007));
        assert_eq!(Timestamp::strptime("69", "%y").unwrap().year(), Some(1969));
        assert_eq!(Timestamp::strptime("68", "%y").unwrap().year(), Some(2068));
    }

    #[test]
    fn test_strptime_twelve_hour_clock() {
        let timestamp = Timestamp::strptime("2021-05-21 01:15 PM", "%Y-%m-%d %I:%M %p").unwrap();
        assert_eq!(timestamp.hour(), Some(13));
        assert_eq!(timestamp.serialize(), "2021-05-21T13:15");
    }

    #[test]
    fn test_strptime_malformed() {
        assert!(matches!(
            Timestamp::strptime("yesterday", "%Y-%m-%d"),
            Err(ParseError::Malformed(_))
        ));
        assert!(matches!(
            Timestamp::strptime("2021-05-21 trailing", "%Y-%m-%d"),
            Err(ParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_strptime_out_of_range() {
        assert!(Timestamp::strptime("2021-02-30", "%Y-%m-%d").is_err());
    }

    #[test]
    fn test_now_is_fully_precise() {
        let now = Timestamp::now();
        assert_eq!(now.precision(), 6);
        assert_eq!(now.serialize().len(), "yyyy-MM-ddTHH:mm:ss".len());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("".parse::<Timestamp>().unwrap(), Timestamp::new());
        assert_eq!(
            "1962-01".parse::<Timestamp>().unwrap(),
            Timestamp::new().with_year(1962).with_month(1)
        );
        assert_eq!(
            "1962-01-17T09:05".parse::<Timestamp>().unwrap().serialize(),
            "1962-01-17T09:05"
        );
        assert!("not a date".parse::<Timestamp>().is_err());
    }

    #[test]
    fn test_strftime_defaults_absent_components() {
        let timestamp = Timestamp::new().with_year(1962);
        assert_eq!(timestamp.strftime("%d.%m.%Y"), "01.01.1962");
    }

    #[test]
    fn test_serde() {
        let timestamp: Timestamp = serde_json::from_str(r#""1986-04""#).unwrap();
        assert_eq!(timestamp, Timestamp::new().with_year(1986).with_month(4));
        assert_eq!(serde_json::to_string(&timestamp).unwrap(), r#""1986-04""#);
    }
}
