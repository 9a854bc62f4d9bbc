// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Local date-times paired with their UTC offset.

use crate::date_time::DateTime;
use crate::error::{Error, ParseError, ParseErrorKind};
use crate::time_span::TimeSpan;
use chrono::{TimeDelta, Utc};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A local [`DateTime`] and the [`TimeSpan`] by which it leads UTC.
///
/// The pair is never normalised: `date_time` is exactly what the service
/// printed and `time_span` is its offset.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct DateTimeOffset {
    pub date_time: DateTime,
    pub time_span: TimeSpan,
}

impl DateTimeOffset {
    #[inline]
    pub const fn new(date_time: DateTime, time_span: TimeSpan) -> Self {
        Self {
            date_time,
            time_span,
        }
    }

    /// Parse `YYYY-MM-DDTHH:MM:SS[±HH:MM]`.
    ///
    /// A `Z` suffix or a missing offset both yield a zero offset.  Errors
    /// raised by the inner [`DateTime`] grammar are returned unchanged.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let err = || ParseError::new(ParseErrorKind::DateTimeOffset, text);

        let mut halves = text.split('T');
        let (Some(date), Some(time), None) = (halves.next(), halves.next(), halves.next()) else {
            return Err(err().into());
        };

        let sign = if time.contains('-') {
            Some(('-', -1))
        } else if time.contains('+') {
            Some(('+', 1))
        } else {
            None
        };

        let Some((sep, factor)) = sign else {
            return Ok(Self::new(DateTime::parse(text)?, TimeSpan::ZERO));
        };

        let mut pieces = time.split(sep);
        let (Some(clock), Some(offset), None) = (pieces.next(), pieces.next(), pieces.next())
        else {
            return Err(err().into());
        };

        let date_time = DateTime::parse(&format!("{date}T{clock}"))?;

        let mut hm = offset.split(':');
        let (Some(hours), Some(minutes), None) = (hm.next(), hm.next(), hm.next()) else {
            return Err(err().into());
        };
        let hours = parse_offset_part(hours).ok_or_else(err)?;
        let minutes = parse_offset_part(minutes).ok_or_else(err)?;

        let time_span =
            TimeSpan::checked_new(0, factor * hours, factor * minutes, 0, 0).ok_or_else(err)?;
        Ok(Self::new(date_time, time_span))
    }

    /// The UTC instant this local time denotes.
    ///
    /// `None` when the local fields are not a real calendar instant (see
    /// [`DateTime::to_naive`]).
    pub fn to_utc(&self) -> Option<chrono::DateTime<Utc>> {
        let local = self.date_time.to_naive()?;
        let offset = TimeDelta::try_seconds(self.time_span.in_seconds())?;
        Some(local.checked_sub_signed(offset)?.and_utc())
    }
}

fn parse_offset_part(part: &str) -> Option<i64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl From<DateTime> for DateTimeOffset {
    fn from(date_time: DateTime) -> Self {
        Self::new(date_time, TimeSpan::ZERO)
    }
}

impl fmt::Display for DateTimeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let offset = self.time_span.in_seconds();
        let sign = if offset < 0 { '-' } else { '+' };
        let minutes = offset.unsigned_abs() / 60;
        write!(
            f,
            "{}{sign}{:02}:{:02}",
            self.date_time,
            minutes / 60,
            minutes % 60
        )
    }
}

impl FromStr for DateTimeOffset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl Serialize for DateTimeOffset {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for DateTimeOffset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Field;

    #[test]
    fn positive_offset() {
        let value = DateTimeOffset::parse("2020-05-21T00:00:00+09:30").unwrap();
        assert_eq!(value.date_time, DateTime::from_ymd(2020, 5, 21).unwrap());
        assert_eq!(value.time_span.in_minutes(), 570);
    }

    #[test]
    fn negative_offset_applies_to_both_parts() {
        let value = DateTimeOffset::parse("2021-01-10T06:15:00-03:30").unwrap();
        assert_eq!(value.time_span.in_seconds(), -(3 * 3_600 + 30 * 60));
        assert_eq!(value.date_time.hour(), 6);
        assert_eq!(value.to_string(), "2021-01-10T06:15:00-03:30");
    }

    #[test]
    fn zulu_and_bare_have_zero_offset() {
        let zulu = DateTimeOffset::parse("2020-03-05T09:24:58Z").unwrap();
        assert_eq!(zulu.time_span, TimeSpan::ZERO);
        assert_eq!(zulu.date_time.second(), 58);
        let bare = DateTimeOffset::parse("2020-03-05T09:24:58").unwrap();
        assert_eq!(bare, zulu);
        assert_eq!(bare.to_string(), "2020-03-05T09:24:58+00:00");
    }

    #[test]
    fn malformed_segments() {
        for bad in [
            "2020-03-05",
            "2020-03-05T09:24:58+09",
            "2020-03-05T09:24:58+09:30:00",
            "2020-03-05T09:24:58+09:3x",
            "2020-03-05T09:24:58-01:00-02:00",
            "2020-01-01T00:00:00+9223372036854775807:00",
            "2020-01-01T00:00:00-00:9223372036854775807",
        ] {
            assert!(
                matches!(DateTimeOffset::parse(bad), Err(Error::Parse(e)) if e.kind() == ParseErrorKind::DateTimeOffset),
                "input {bad:?}"
            );
        }
    }

    #[test]
    fn inner_errors_propagate() {
        let err = DateTimeOffset::parse("2020-13-05T09:24:58+01:00").unwrap_err();
        assert!(matches!(err, Error::FieldRange(e) if e.field() == Field::Month));
        let err = DateTimeOffset::parse("2020/03/05T09:24:58+01:00").unwrap_err();
        assert!(matches!(err, Error::Parse(e) if e.kind() == ParseErrorKind::DateTime));
    }

    #[test]
    fn converts_to_utc() {
        let value = DateTimeOffset::parse("2020-05-21T01:00:00+09:30").unwrap();
        let utc = value.to_utc().unwrap();
        assert_eq!(utc.to_rfc3339(), "2020-05-20T15:30:00+00:00");
    }
}
