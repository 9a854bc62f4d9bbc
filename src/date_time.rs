// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar date-times with field-level validation.
//!
//! [`DateTime`] is a plain record of seven calendar fields.  Each field is
//! checked against a fixed bound on construction and on every setter, but
//! fields are never checked against each other: `2021-02-31` is a valid
//! `DateTime`.  The bounds are wide enough to carry a leap second (`60`) and
//! an end-of-day hour (`24`), both of which the service emits.
//!
//! The wire grammar is ISO-8601 without fractional seconds:
//!
//! ```text
//! YYYY-MM-DD
//! YYYY-MM-DDTHH:MM:SS[Z|±HH:MM]
//! ```
//!
//! Any trailing offset is discarded here; see
//! [`DateTimeOffset`](crate::DateTimeOffset) to keep it.
//!
//! Conversion to and from [`chrono::NaiveDateTime`] is provided for callers
//! that need calendar arithmetic.

use crate::error::{Error, Field, FieldRangeError, ParseError, ParseErrorKind};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Nanoseconds per sub-second unit (one unit is 10 µs).
const NANOS_PER_UNIT: u32 = 10_000;

// ═══════════════════════════════════════════════════════════════════════════
// DateTime
// ═══════════════════════════════════════════════════════════════════════════

/// A calendar date and wall-clock time without zone information.
///
/// Ordering is lexicographic over `(year, month, day, hour, minute, second,
/// microsecond)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    microsecond: u32,
}

impl Default for DateTime {
    fn default() -> Self {
        Self {
            year: 0,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            microsecond: 0,
        }
    }
}

#[inline]
fn check(field: Field, value: u32) -> Result<u32, FieldRangeError> {
    let (min, max) = field.bounds();
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(FieldRangeError::new(field, value))
    }
}

impl DateTime {
    // ── constructors ──────────────────────────────────────────────────

    /// Build a date-time, checking each field in declaration order.
    ///
    /// The first out-of-range field is reported.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        microsecond: u32,
    ) -> Result<Self, FieldRangeError> {
        Ok(Self {
            year,
            month: check(Field::Month, month)? as u8,
            day: check(Field::Day, day)? as u8,
            hour: check(Field::Hour, hour)? as u8,
            minute: check(Field::Minute, minute)? as u8,
            second: check(Field::Second, second)? as u8,
            microsecond: check(Field::Microsecond, microsecond)?,
        })
    }

    /// Midnight on the given date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, FieldRangeError> {
        Self::new(year, month, day, 0, 0, 0, 0)
    }

    /// Same date, different wall-clock time.
    pub fn with_time(self, hour: u32, minute: u32, second: u32) -> Result<Self, FieldRangeError> {
        Self::new(
            self.year,
            self.month.into(),
            self.day.into(),
            hour,
            minute,
            second,
            self.microsecond,
        )
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u32 {
        self.month as u32
    }

    #[inline]
    pub const fn day(&self) -> u32 {
        self.day as u32
    }

    #[inline]
    pub const fn hour(&self) -> u32 {
        self.hour as u32
    }

    #[inline]
    pub const fn minute(&self) -> u32 {
        self.minute as u32
    }

    #[inline]
    pub const fn second(&self) -> u32 {
        self.second as u32
    }

    /// Sub-second units, `0..=99_999`.
    #[inline]
    pub const fn microsecond(&self) -> u32 {
        self.microsecond
    }

    // ── validated setters ─────────────────────────────────────────────

    pub fn set_year(&mut self, year: i32) {
        self.year = year;
    }

    pub fn set_month(&mut self, month: u32) -> Result<(), FieldRangeError> {
        self.month = check(Field::Month, month)? as u8;
        Ok(())
    }

    pub fn set_day(&mut self, day: u32) -> Result<(), FieldRangeError> {
        self.day = check(Field::Day, day)? as u8;
        Ok(())
    }

    pub fn set_hour(&mut self, hour: u32) -> Result<(), FieldRangeError> {
        self.hour = check(Field::Hour, hour)? as u8;
        Ok(())
    }

    pub fn set_minute(&mut self, minute: u32) -> Result<(), FieldRangeError> {
        self.minute = check(Field::Minute, minute)? as u8;
        Ok(())
    }

    pub fn set_second(&mut self, second: u32) -> Result<(), FieldRangeError> {
        self.second = check(Field::Second, second)? as u8;
        Ok(())
    }

    pub fn set_microsecond(&mut self, microsecond: u32) -> Result<(), FieldRangeError> {
        self.microsecond = check(Field::Microsecond, microsecond)?;
        Ok(())
    }

    // ── formatting ────────────────────────────────────────────────────

    /// `YYYY-MM-DD`.
    pub fn to_day_precision_string(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// `YYYY-MM-DDTHH:MM:SS`, the form the services accept as input.
    pub fn to_second_precision_string(&self) -> String {
        self.to_string()
    }

    // ── parsing ───────────────────────────────────────────────────────

    /// Parse `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`, discarding any offset.
    ///
    /// Grammar violations are [`Error::Parse`]; well-formed text whose
    /// fields are out of bounds is [`Error::FieldRange`].
    pub fn parse(text: &str) -> Result<Self, Error> {
        let err = || ParseError::new(ParseErrorKind::DateTime, text);

        let (date, time) = if text.contains('T') {
            let mut halves = text.split('T');
            let (Some(date), Some(time), None) = (halves.next(), halves.next(), halves.next())
            else {
                return Err(err().into());
            };
            // `split` always yields at least one item
            let bare = time.split(['+', '-', 'Z']).next().unwrap_or_default();
            (date, bare)
        } else {
            (text, "00:00:00")
        };

        let (era, date) = match date.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, date),
        };
        let [year, month, day] = split3(date, '-').ok_or_else(err)?;
        let [hour, minute, second] = split3(time, ':').ok_or_else(err)?;

        let year = era * parse_int::<i64>(year).ok_or_else(err)?;
        let year = i32::try_from(year).map_err(|_| err())?;
        let month = parse_int(month).ok_or_else(err)?;
        let day = parse_int(day).ok_or_else(err)?;
        let hour = parse_int(hour).ok_or_else(err)?;
        let minute = parse_int(minute).ok_or_else(err)?;
        let second = parse_int(second).ok_or_else(err)?;

        Ok(Self::new(year, month, day, hour, minute, second, 0)?)
    }

    // ── chrono interop ────────────────────────────────────────────────

    /// The equivalent [`NaiveDateTime`], when the fields name a real instant.
    ///
    /// Returns `None` for impossible days (`02-31`), hour `24`, second `60`,
    /// or a year outside chrono's range.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month(), self.day())?.and_hms_nano_opt(
            self.hour(),
            self.minute(),
            self.second(),
            self.microsecond * NANOS_PER_UNIT,
        )
    }

    /// Copy the fields of a [`NaiveDateTime`].
    ///
    /// Sub-second precision is truncated to 10 µs.  A chrono leap second is
    /// folded into second `59`.
    pub fn from_naive(naive: &NaiveDateTime) -> Self {
        let nanos = naive.nanosecond() % 1_000_000_000;
        Self {
            year: naive.year(),
            month: naive.month() as u8,
            day: naive.day() as u8,
            hour: naive.hour() as u8,
            minute: naive.minute() as u8,
            second: naive.second() as u8,
            microsecond: nanos / NANOS_PER_UNIT,
        }
    }
}

fn split3(text: &str, sep: char) -> Option<[&str; 3]> {
    let mut parts = text.split(sep);
    let out = [parts.next()?, parts.next()?, parts.next()?];
    parts.next().is_none().then_some(out)
}

fn parse_int<T: FromStr>(part: &str) -> Option<T> {
    let digits = part.strip_prefix('-').unwrap_or(part);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl From<NaiveDateTime> for DateTime {
    fn from(naive: NaiveDateTime) -> Self {
        Self::from_naive(&naive)
    }
}

// ── Text ──────────────────────────────────────────────────────────────────

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl FromStr for DateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for DateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for DateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
