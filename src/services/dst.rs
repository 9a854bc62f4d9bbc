// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The `dstlist` service.

use super::{container, ServiceCore};
use crate::error::{Error, Result};
use crate::model::Dst;
use crate::query::Query;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DstOptions {
    /// Add the year's time changes to every entry.
    pub include_time_changes: bool,
    /// Suppress countries without DST in the queried year.  Ignored when a
    /// year is given, which always lists every country.
    pub include_only_dst_countries: bool,
    /// List the places belonging to every entry.
    pub include_places_for_every_country: bool,
}

impl Default for DstOptions {
    fn default() -> Self {
        Self {
            include_time_changes: false,
            include_only_dst_countries: true,
            include_places_for_every_country: true,
        }
    }
}

/// Daylight saving time rules per country and zone.
#[derive(Debug, Clone)]
pub struct DstService {
    core: ServiceCore,
    options: DstOptions,
}

service_client!(DstService, DstOptions, "dstlist");

impl DstService {
    /// DST entries for `country`, or every country, in `year`, or the
    /// current year.
    pub fn daylight_saving_time(
        &self,
        country: Option<&str>,
        year: Option<i32>,
    ) -> Result<Vec<Dst>> {
        let query = self.build_query(country, year)?;
        let root = self.core.fetch(&query)?;
        container(&root, "dstlist")?.map_children("dstentry")
    }

    pub(crate) fn build_query(&self, country: Option<&str>, year: Option<i32>) -> Result<Query> {
        if let Some(year) = year {
            if year <= 0 {
                return Err(Error::invalid_argument(format!(
                    "year must be positive, got {year}"
                )));
            }
        }

        let options = &self.options;
        let only_dst = options.include_only_dst_countries && year.is_none();
        let mut query = self.core.base_query()?;
        query
            .set_opt("country", country.filter(|country| !country.is_empty()))
            .set_opt("year", year)
            .set_bool("timechanges", options.include_time_changes)
            .set_bool("onlydst", only_dst)
            .set_bool("listplaces", options.include_places_for_every_country);
        Ok(query)
    }
}
