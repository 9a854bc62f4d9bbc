// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types.
//!
//! The value model ([`TimeSpan`](crate::TimeSpan), [`DateTime`](crate::DateTime),
//! [`DateTimeOffset`](crate::DateTimeOffset)) reports two narrow errors,
//! [`FieldRangeError`] and [`ParseError`].  Service calls report the
//! crate-wide [`Error`], which wraps both of them.

use std::fmt;
use std::io;

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error returned by service calls and by the value-model parsers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A caller-supplied argument is missing or ill-formed.
    ///
    /// Always raised before any network traffic.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A calendar field was assigned a value outside its bounds.
    #[error(transparent)]
    FieldRange(#[from] FieldRangeError),
    /// A datetime, offset or timespan string does not follow the wire grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The service answered with an `<error>` element.
    #[error("an error occurred on server-side: {0}")]
    Server(String),
    /// The response document does not have the expected structure.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// The HTTP round trip failed.
    #[error(transparent)]
    Transport(#[from] io::Error),
}

impl Error {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// `true` for errors detected locally from the caller's arguments.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::FieldRange(_))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Value-model errors
// ═══════════════════════════════════════════════════════════════════════════

/// A calendar field of [`DateTime`](crate::DateTime).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Microsecond,
}

impl Field {
    /// Inclusive `(min, max)` accepted for the field.
    pub const fn bounds(self) -> (u32, u32) {
        match self {
            Self::Month => (1, 12),
            Self::Day => (1, 31),
            Self::Hour => (0, 24),
            Self::Minute => (0, 59),
            Self::Second => (0, 60),
            Self::Microsecond => (0, 99_999),
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Month => "Month",
            Self::Day => "Day",
            Self::Hour => "Hour",
            Self::Minute => "Minute",
            Self::Second => "Second",
            Self::Microsecond => "Microsecond",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A field value fell outside the bounds of its [`Field`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} must be an integer between {} and {}, got {value}", field.bounds().0, field.bounds().1)]
pub struct FieldRangeError {
    field: Field,
    value: u32,
}

impl FieldRangeError {
    pub(crate) const fn new(field: Field, value: u32) -> Self {
        Self { field, value }
    }

    /// The offending field.
    pub const fn field(&self) -> Field {
        self.field
    }

    /// The rejected value.
    pub const fn value(&self) -> u32 {
        self.value
    }
}

/// Which grammar a [`ParseError`] was raised by.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    DateTime,
    DateTimeOffset,
    TimeSpan,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DateTime => "DateTime",
            Self::DateTimeOffset => "DateTimeOffset",
            Self::TimeSpan => "TimeSpan",
        })
    }
}

/// A wire string did not match the expected grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse {kind} string '{input}'")]
pub struct ParseError {
    kind: ParseErrorKind,
    input: String,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, input: &str) -> Self {
        Self {
            kind,
            input: input.to_owned(),
        }
    }

    pub const fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// The text that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_error_names_field_and_bounds() {
        let err = FieldRangeError::new(Field::Month, 13);
        assert_eq!(
            err.to_string(),
            "Month must be an integer between 1 and 12, got 13"
        );
        assert_eq!(err.field(), Field::Month);
        assert_eq!(err.value(), 13);
    }

    #[test]
    fn parse_error_keeps_input() {
        let err = ParseError::new(ParseErrorKind::TimeSpan, "5x");
        assert_eq!(err.kind(), ParseErrorKind::TimeSpan);
        assert_eq!(err.input(), "5x");
        assert_eq!(err.to_string(), "cannot parse TimeSpan string '5x'");
    }

    #[test]
    fn validation_classification() {
        assert!(Error::invalid_argument("x").is_validation());
        assert!(Error::from(FieldRangeError::new(Field::Hour, 25)).is_validation());
        assert!(!Error::Server("boom".into()).is_validation());
        assert!(!Error::malformed("x").is_validation());
    }
}
