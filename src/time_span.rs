// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Signed durations as carried on the wire.
//!
//! [`TimeSpan`] stores whole seconds and a separate sub-second count.  The
//! service reports fractional seconds with five digits, so one second is
//! `100 000` sub-second units; the two fields are never normalised against
//! each other.
//!
//! Offsets and day lengths arrive as `±H:MM` or `±H:MM:SS` strings, which
//! [`TimeSpan::parse`] understands.

use crate::error::{ParseError, ParseErrorKind};
use qtty::{Day, Days, Seconds};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// Sub-second units per second.
pub const MICROS_PER_SECOND: i64 = 100_000;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;

// ═══════════════════════════════════════════════════════════════════════════
// TimeSpan
// ═══════════════════════════════════════════════════════════════════════════

/// A signed span of time: whole seconds plus sub-second units.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSpan {
    seconds: i64,
    microseconds: i64,
}

impl TimeSpan {
    /// The empty span.
    pub const ZERO: Self = Self {
        seconds: 0,
        microseconds: 0,
    };

    // ── constructors ──────────────────────────────────────────────────

    /// Build a span from its components.  Any component may be negative.
    pub const fn new(days: i64, hours: i64, minutes: i64, seconds: i64, microseconds: i64) -> Self {
        Self {
            seconds: seconds
                + minutes * SECONDS_PER_MINUTE
                + hours * SECONDS_PER_HOUR
                + days * SECONDS_PER_DAY,
            microseconds,
        }
    }

    /// Like [`new`](Self::new), but `None` when the total seconds overflow.
    pub(crate) fn checked_new(
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
        microseconds: i64,
    ) -> Option<Self> {
        let seconds = seconds
            .checked_add(minutes.checked_mul(SECONDS_PER_MINUTE)?)?
            .checked_add(hours.checked_mul(SECONDS_PER_HOUR)?)?
            .checked_add(days.checked_mul(SECONDS_PER_DAY)?)?;
        Some(Self {
            seconds,
            microseconds,
        })
    }

    #[inline]
    pub const fn from_days(days: i64) -> Self {
        Self::new(days, 0, 0, 0, 0)
    }

    #[inline]
    pub const fn from_hours(hours: i64) -> Self {
        Self::new(0, hours, 0, 0, 0)
    }

    #[inline]
    pub const fn from_minutes(minutes: i64) -> Self {
        Self::new(0, 0, minutes, 0, 0)
    }

    #[inline]
    pub const fn from_seconds(seconds: i64) -> Self {
        Self::new(0, 0, 0, seconds, 0)
    }

    /// Parse `[+|-]H:MM[:SS]` into a fresh span.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut span = Self::ZERO;
        span.parse_and_add(text)?;
        Ok(span)
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Total sub-second units, `microseconds + seconds * 100 000`.
    #[inline]
    pub const fn in_microseconds(&self) -> i64 {
        self.microseconds + self.seconds * MICROS_PER_SECOND
    }

    /// Whole seconds, ignoring the sub-second part.
    #[inline]
    pub const fn in_seconds(&self) -> i64 {
        self.seconds
    }

    /// Whole minutes, rounded towards negative infinity.
    #[inline]
    pub const fn in_minutes(&self) -> i64 {
        self.seconds.div_euclid(SECONDS_PER_MINUTE)
    }

    /// Whole hours, rounded towards negative infinity.
    #[inline]
    pub const fn in_hours(&self) -> i64 {
        self.seconds.div_euclid(SECONDS_PER_HOUR)
    }

    /// Whole days, rounded towards negative infinity.
    #[inline]
    pub const fn in_days(&self) -> i64 {
        self.seconds.div_euclid(SECONDS_PER_DAY)
    }

    /// The sub-second component as stored.
    #[inline]
    pub const fn subsec_micros(&self) -> i64 {
        self.microseconds
    }

    /// `true` when the span is below zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.in_microseconds() < 0
    }

    // ── quantity views ────────────────────────────────────────────────

    /// The span as a [`Seconds`] quantity, sub-second part included.
    pub fn to_seconds_quantity(&self) -> Seconds {
        Seconds::new(self.seconds as f64 + self.microseconds as f64 / MICROS_PER_SECOND as f64)
    }

    /// The span as a [`Days`] quantity.
    pub fn to_days_quantity(&self) -> Days {
        self.to_seconds_quantity().to::<Day>()
    }

    // ── mutation ──────────────────────────────────────────────────────

    /// Accumulate components onto this span in place.
    pub fn add_components(
        &mut self,
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
        microseconds: i64,
    ) {
        *self += Self::new(days, hours, minutes, seconds, microseconds);
    }

    /// Parse `[+|-]H:MM[:SS]` and add it onto this span.
    ///
    /// The sign applies to every component.  On error the span is unchanged.
    pub fn parse_and_add(&mut self, text: &str) -> Result<(), ParseError> {
        let err = || ParseError::new(ParseErrorKind::TimeSpan, text);

        let (sign, body) = match text.as_bytes().first() {
            None => return Err(err()),
            Some(b'-') => (-1, &text[1..]),
            Some(b'+') => (1, &text[1..]),
            Some(_) => (1, text),
        };

        let mut parts = body.split(':');
        let hours = parse_component(parts.next()).ok_or_else(err)?;
        let minutes = parse_component(parts.next()).ok_or_else(err)?;
        let seconds = match parts.next() {
            None => 0,
            some => parse_component(some).ok_or_else(err)?,
        };
        if parts.next().is_some() {
            return Err(err());
        }

        let parsed =
            Self::checked_new(0, sign * hours, sign * minutes, sign * seconds, 0).ok_or_else(err)?;
        let seconds = self.seconds.checked_add(parsed.seconds).ok_or_else(err)?;
        self.seconds = seconds;
        Ok(())
    }
}

fn parse_component(part: Option<&str>) -> Option<i64> {
    let part = part?;
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add for TimeSpan {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            seconds: self.seconds + rhs.seconds,
            microseconds: self.microseconds + rhs.microseconds,
        }
    }
}

impl AddAssign for TimeSpan {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.seconds += rhs.seconds;
        self.microseconds += rhs.microseconds;
    }
}

// ── Text ──────────────────────────────────────────────────────────────────

impl FromStr for TimeSpan {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Renders `±H:MM:SS`, dropping the sub-second part.
impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.seconds < 0 { '-' } else { '+' };
        let total = self.seconds.unsigned_abs();
        write!(
            f,
            "{sign}{}:{:02}:{:02}",
            total / 3_600,
            (total / 60) % 60,
            total % 60
        )
    }
}
