// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The `businessduration` service: business days between two dates.

use super::business_date::CalendarRegion;
use super::ServiceCore;
use crate::date_time::DateTime;
use crate::error::{Error, Result};
use crate::model::{join_codes, BusinessDates, BusinessDaysFilterType, LocationId};
use crate::query::Query;
use crate::xml::FromElement;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessDurationOptions {
    /// Count the filtered days instead of skipping them.
    pub include: bool,
    pub filter: Vec<BusinessDaysFilterType>,
    /// Count the end date itself.
    pub include_last_date: bool,
}

impl Default for BusinessDurationOptions {
    fn default() -> Self {
        Self {
            include: false,
            filter: vec![BusinessDaysFilterType::WeekendHolidays],
            include_last_date: false,
        }
    }
}

/// Number of business days between a start and an end date.
#[derive(Debug, Clone)]
pub struct BusinessDurationService {
    core: ServiceCore,
    options: BusinessDurationOptions,
}

service_client!(
    BusinessDurationService,
    BusinessDurationOptions,
    "businessduration"
);

impl BusinessDurationService {
    pub fn business_duration_for_place(
        &self,
        place: impl Into<LocationId>,
        start: DateTime,
        end: DateTime,
    ) -> Result<BusinessDates> {
        self.business_duration(&CalendarRegion::Place(place.into()), start, end)
    }

    pub fn business_duration_for_country(
        &self,
        country: &str,
        start: DateTime,
        end: DateTime,
        state: Option<&str>,
    ) -> Result<BusinessDates> {
        self.business_duration(&CalendarRegion::Country { country, state }, start, end)
    }

    fn business_duration(
        &self,
        region: &CalendarRegion<'_>,
        start: DateTime,
        end: DateTime,
    ) -> Result<BusinessDates> {
        let query = self.build_query(region, start, end)?;
        let root = self.core.fetch(&query)?;
        BusinessDates::from_element(&root)
    }

    pub(crate) fn build_query(
        &self,
        region: &CalendarRegion<'_>,
        start: DateTime,
        end: DateTime,
    ) -> Result<Query> {
        region.validate()?;
        if end < start {
            return Err(Error::invalid_argument(
                "end date cannot be before start date",
            ));
        }

        let options = &self.options;
        let mut query = self.core.base_query()?;
        region.apply(&mut query);
        query
            .set("startdt", start.to_second_precision_string())
            .set("enddt", end.to_second_precision_string())
            .set_bool("include", options.include)
            .set_bool("includelastdate", options.include_last_date);
        if !options.filter.is_empty() {
            query.set("filter", join_codes(&options.filter));
        }
        Ok(query)
    }
}
