// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The `astrodata` service: object positions at given instants.

use super::ServiceCore;
use crate::date_time::DateTime;
use crate::error::{Error, Result};
use crate::model::{AstronomyLocation, AstronomyObjectType, LocationId};
use crate::query::Query;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AstrodataOptions {
    /// Interpret the intervals as local time at the place instead of UTC.
    pub local_time: bool,
    pub include_iso_time: bool,
    pub include_utc_time: bool,
    pub radius: Option<u32>,
}

/// Positions of one object at a list of instants.
#[derive(Debug, Clone)]
pub struct AstrodataService {
    core: ServiceCore,
    options: AstrodataOptions,
}

service_client!(AstrodataService, AstrodataOptions, "astrodata");

impl AstrodataService {
    /// Position of `object` seen from `place` at each of `intervals`.
    pub fn astrodata(
        &self,
        object: AstronomyObjectType,
        place: impl Into<LocationId>,
        intervals: &[DateTime],
    ) -> Result<Vec<AstronomyLocation>> {
        let query = self.build_query(object, &place.into(), intervals)?;
        self.core.fetch(&query)?.map_children("location")
    }

    pub(crate) fn build_query(
        &self,
        object: AstronomyObjectType,
        place: &LocationId,
        intervals: &[DateTime],
    ) -> Result<Query> {
        if place.is_empty() {
            return Err(Error::invalid_argument("a place id is required"));
        }
        if intervals.is_empty() {
            return Err(Error::invalid_argument("at least one interval is required"));
        }

        let interval = intervals
            .iter()
            .map(DateTime::to_second_precision_string)
            .collect::<Vec<_>>()
            .join(",");
        let options = &self.options;
        let mut query = self.core.base_query()?;
        query
            .set("placeid", place)
            .set("object", object)
            .set("interval", interval)
            .set_bool("localtime", options.local_time)
            .set_bool("isotime", options.include_iso_time)
            .set_bool("utctime", options.include_utc_time)
            .set_opt("radius", options.radius);
        Ok(query)
    }
}
