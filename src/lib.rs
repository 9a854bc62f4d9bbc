// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time and Date API client
//!
//! A blocking client for the Time and Date XML web services, built on a
//! small calendar value model.
//!
//! # Value model
//!
//! - [`TimeSpan`]: a signed duration with 10 µs resolution, parsed from and
//!   rendered as `±H:MM[:SS]`.
//! - [`DateTime`]: a bounds-checked calendar date and wall-clock time
//!   without zone, ordered field by field.
//! - [`DateTimeOffset`]: a [`DateTime`] paired with its UTC offset.
//!
//! # Services
//!
//! | Client | Endpoint | Returns |
//! |--------|----------|---------|
//! | [`HolidaysService`] | `holidays` | [`Holiday`] list |
//! | [`AstronomyService`] | `astronomy` | [`AstronomyLocation`] list |
//! | [`AstrodataService`] | `astrodata` | [`AstronomyLocation`] list |
//! | [`DstService`] | `dstlist` | [`Dst`] list |
//! | [`ConvertTimeService`] | `converttime` | [`ConvertedTimes`] |
//! | [`PlacesService`] | `places` | [`Place`] list |
//! | [`TimeService`] | `timeservice` | [`Location`] list |
//! | [`BusinessDateService`] | `businessdate` | [`BusinessDates`] |
//! | [`BusinessDurationService`] | `businessduration` | [`BusinessDates`] |
//!
//! Every client validates its arguments before any network traffic, signs
//! the request with the account's [`Credentials`], and maps the XML payload
//! into typed records.  Failures surface as a single [`Error`].
//!
//! ```no_run
//! use tad_api::{Credentials, HolidaysService, HolidayType, ServiceConfig};
//!
//! let credentials = Credentials::from_env()?;
//! let mut service = HolidaysService::new(credentials, ServiceConfig::default())?;
//! service.options_mut().types = HolidayType::FEDERAL;
//! for holiday in service.holidays_for_country("no", Some(2021))? {
//!     println!("{:?}", holiday.name.get("en"));
//! }
//! # Ok::<(), tad_api::Error>(())
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for the value types.

mod auth;
pub mod config;
mod date_time;
mod error;
pub mod model;
mod offset;
mod query;
pub mod services;
mod time_span;
mod transport;
pub mod xml;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use auth::{Credentials, Signature, ACCESS_KEY_VAR, SECRET_KEY_VAR};
pub use config::ServiceConfig;
pub use date_time::DateTime;
pub use error::{Error, Field, FieldRangeError, ParseError, ParseErrorKind, Result};
pub use model::*;
pub use offset::DateTimeOffset;
pub use query::Query;
pub use services::*;
pub use time_span::{TimeSpan, MICROS_PER_SECOND};
pub use transport::{HttpTransport, Transport};
