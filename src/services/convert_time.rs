// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The `converttime` service.

use super::ServiceCore;
use crate::date_time::DateTime;
use crate::error::{Error, Result};
use crate::model::{ConvertedTimes, LocationId};
use crate::query::Query;
use crate::xml::FromElement;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertTimeOptions {
    /// Search radius in km when resolving coordinates to places.
    pub radius: Option<u32>,
    pub include_time_changes: bool,
    pub include_timezone_information: bool,
}

impl Default for ConvertTimeOptions {
    fn default() -> Self {
        Self {
            radius: None,
            include_time_changes: true,
            include_timezone_information: true,
        }
    }
}

/// The time to convert: typed fields or caller-formatted ISO text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeInput {
    DateTime(DateTime),
    Iso(String),
}

impl fmt::Display for TimeInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DateTime(date_time) => fmt::Display::fmt(date_time, f),
            Self::Iso(iso) => f.write_str(iso),
        }
    }
}

impl From<DateTime> for TimeInput {
    fn from(value: DateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<&str> for TimeInput {
    fn from(value: &str) -> Self {
        Self::Iso(value.to_owned())
    }
}

impl From<String> for TimeInput {
    fn from(value: String) -> Self {
        Self::Iso(value)
    }
}

/// Converts a local time at one place to UTC and to other places.
#[derive(Debug, Clone)]
pub struct ConvertTimeService {
    core: ServiceCore,
    options: ConvertTimeOptions,
}

service_client!(ConvertTimeService, ConvertTimeOptions, "converttime");

impl ConvertTimeService {
    /// Convert `time`, local to `from`, into UTC and the local time of every
    /// place in `to`.
    pub fn convert_time(
        &self,
        from: impl Into<LocationId>,
        time: impl Into<TimeInput>,
        to: &[LocationId],
    ) -> Result<ConvertedTimes> {
        let query = self.build_query(&from.into(), &time.into(), to)?;
        let root = self.core.fetch(&query)?;
        ConvertedTimes::from_element(&root)
    }

    pub(crate) fn build_query(
        &self,
        from: &LocationId,
        time: &TimeInput,
        to: &[LocationId],
    ) -> Result<Query> {
        let iso = time.to_string();
        if from.is_empty() || iso.is_empty() {
            return Err(Error::invalid_argument(
                "a source place and a time are required",
            ));
        }

        let options = &self.options;
        let mut query = self.core.base_query()?;
        query.set("fromid", from).set("iso", iso);
        if !to.is_empty() {
            query.set(
                "toid",
                to.iter().map(ToString::to_string).collect::<Vec<_>>().join(","),
            );
        }
        query
            .set_bool("timechanges", options.include_time_changes)
            .set_bool("tz", options.include_timezone_information)
            .set_opt("radius", options.radius);
        Ok(query)
    }
}
