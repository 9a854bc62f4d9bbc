// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The `businessdate` service: add or subtract business days.

use super::{require_id, ServiceCore};
use crate::date_time::DateTime;
use crate::error::{Error, Result};
use crate::model::{
    join_codes, BusinessDates, BusinessDaysFilterType, BusinessDaysOperatorType, LocationId,
};
use crate::query::Query;
use crate::xml::FromElement;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessDateOptions {
    /// Count the filtered days instead of skipping them.
    pub include: bool,
    /// Days to skip (or count, with `include`).
    pub filter: Vec<BusinessDaysFilterType>,
    pub operator: BusinessDaysOperatorType,
    /// Repeat a single day count this many times.
    pub repeat: u32,
}

impl Default for BusinessDateOptions {
    fn default() -> Self {
        Self {
            include: false,
            filter: vec![BusinessDaysFilterType::WeekendHolidays],
            operator: BusinessDaysOperatorType::Add,
            repeat: 1,
        }
    }
}

/// Number of business days to count from the start date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Days {
    Single(i32),
    /// One result period per entry, all counted from the start date.
    Many(Vec<i32>),
}

impl Days {
    fn to_wire(&self) -> Result<String> {
        match self {
            Self::Single(days) => Ok(days.to_string()),
            Self::Many(days) if days.is_empty() => {
                Err(Error::invalid_argument("at least one day count is required"))
            }
            Self::Many(days) => Ok(join_codes(days)),
        }
    }

    fn is_single(&self) -> bool {
        match self {
            Self::Single(_) => true,
            Self::Many(days) => days.len() == 1,
        }
    }
}

impl From<i32> for Days {
    fn from(value: i32) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<i32>> for Days {
    fn from(value: Vec<i32>) -> Self {
        Self::Many(value)
    }
}

impl From<&[i32]> for Days {
    fn from(value: &[i32]) -> Self {
        Self::Many(value.to_vec())
    }
}

/// Where business days are counted.
#[derive(Debug, Clone)]
pub(crate) enum CalendarRegion<'a> {
    Place(LocationId),
    Country {
        country: &'a str,
        state: Option<&'a str>,
    },
}

impl CalendarRegion<'_> {
    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            Self::Place(place) if place.is_empty() => {
                Err(Error::invalid_argument("a place id is required"))
            }
            Self::Place(_) => Ok(()),
            Self::Country { country, .. } => require_id(country, "country"),
        }
    }

    pub(crate) fn apply(&self, query: &mut Query) {
        match self {
            Self::Place(place) => {
                query.set("placeid", place);
            }
            Self::Country { country, state } => {
                query
                    .set("country", country)
                    .set_opt("state", state.filter(|state| !state.is_empty()));
            }
        }
    }
}

/// The business date a number of business days away from a start date.
#[derive(Debug, Clone)]
pub struct BusinessDateService {
    core: ServiceCore,
    options: BusinessDateOptions,
}

service_client!(BusinessDateService, BusinessDateOptions, "businessdate");

impl BusinessDateService {
    /// Count `days` business days from `start` using the calendar of `place`.
    pub fn business_date_for_place(
        &self,
        place: impl Into<LocationId>,
        start: DateTime,
        days: impl Into<Days>,
    ) -> Result<BusinessDates> {
        self.business_date(&CalendarRegion::Place(place.into()), start, &days.into())
    }

    /// Count `days` business days from `start` using the calendar of
    /// `country`, optionally narrowed to `state`.
    pub fn business_date_for_country(
        &self,
        country: &str,
        start: DateTime,
        days: impl Into<Days>,
        state: Option<&str>,
    ) -> Result<BusinessDates> {
        self.business_date(&CalendarRegion::Country { country, state }, start, &days.into())
    }

    fn business_date(
        &self,
        region: &CalendarRegion<'_>,
        start: DateTime,
        days: &Days,
    ) -> Result<BusinessDates> {
        let query = self.build_query(region, start, days)?;
        let root = self.core.fetch(&query)?;
        BusinessDates::from_element(&root)
    }

    pub(crate) fn build_query(
        &self,
        region: &CalendarRegion<'_>,
        start: DateTime,
        days: &Days,
    ) -> Result<Query> {
        region.validate()?;
        let days_wire = days.to_wire()?;

        let options = &self.options;
        let mut query = self.core.base_query()?;
        region.apply(&mut query);
        query
            .set("startdt", start.to_second_precision_string())
            .set("days", days_wire);
        if days.is_single() {
            query.set("repeat", options.repeat);
        }
        query.set_bool("include", options.include);
        if !options.filter.is_empty() {
            query.set("filter", join_codes(&options.filter));
        }
        query.set("op", options.operator);
        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BusinessFilterMethod;
    use crate::services::testing::*;

    const BODY: &str = r#"<data version="3">
        <geo><name>Oslo</name><country id="no">Norway</country></geo>
        <period includeddays="10" calendardays="14" skippeddays="4">
            <startdate><iso>2021-03-04</iso></startdate>
            <enddate><iso>2021-03-18</iso></enddate>
            <weekdays type="excluded" count="4"><sat>2</sat><sun>2</sun></weekdays>
            <holidays type="excluded" count="0"/>
        </period>
    </data>"#;

    fn start() -> DateTime {
        DateTime::from_ymd(2021, 3, 4).unwrap()
    }

    #[test]
    fn single_day_count_for_place() {
        let transport = FakeTransport::new(BODY);
        let service =
            BusinessDateService::with_transport(credentials(), config(), transport.clone());
        let dates = service.business_date_for_place(187_i64, start(), 10_i32).unwrap();

        let (path, params) = transport.last();
        assert_eq!(path, "http://fake/businessdate");
        assert_eq!(params["placeid"], "187");
        assert_eq!(params["startdt"], "2021-03-04T00:00:00");
        assert_eq!(params["days"], "10");
        assert_eq!(params["repeat"], "1");
        assert_eq!(params["include"], "0");
        assert_eq!(params["filter"], "weekendholidays");
        assert_eq!(params["op"], "add");

        assert_eq!(dates.geo.unwrap().name.as_deref(), Some("Oslo"));
        let period = &dates.periods[0];
        assert_eq!(period.included_days, Some(10));
        assert_eq!(period.skipped_days, Some(4));
        let weekdays = period.weekdays.as_ref().unwrap();
        assert_eq!(weekdays.method, Some(BusinessFilterMethod::Excluded));
        assert_eq!(weekdays.sat, Some(2));
    }

    #[test]
    fn many_day_counts_for_country() {
        let transport = FakeTransport::new(BODY);
        let service =
            BusinessDateService::with_transport(credentials(), config(), transport.clone())
                .with_options(BusinessDateOptions {
                    filter: vec![BusinessDaysFilterType::Sat, BusinessDaysFilterType::Nothing],
                    operator: BusinessDaysOperatorType::Subtract,
                    repeat: 3,
                    ..BusinessDateOptions::default()
                });
        service
            .business_date_for_country("us", start(), vec![5, 10], Some("us-ny"))
            .unwrap();

        let (_, params) = transport.last();
        assert_eq!(params["country"], "us");
        assert_eq!(params["state"], "us-ny");
        assert!(!params.contains_key("placeid"));
        assert_eq!(params["days"], "5,10");
        assert!(!params.contains_key("repeat"));
        assert_eq!(params["filter"], "sat,none");
        assert_eq!(params["op"], "subtract");
    }

    #[test]
    fn one_element_list_repeats() {
        let transport = FakeTransport::new(BODY);
        let service =
            BusinessDateService::with_transport(credentials(), config(), transport.clone());
        service
            .business_date_for_country("no", start(), vec![7], None)
            .unwrap();

        let (_, params) = transport.last();
        assert_eq!(params["repeat"], "1");
        assert!(!params.contains_key("state"));
    }

    #[test]
    fn rejects_invalid_arguments_before_sending() {
        let transport = FakeTransport::new(BODY);
        let service =
            BusinessDateService::with_transport(credentials(), config(), transport.clone());
        assert!(service
            .business_date_for_place("", start(), 1_i32)
            .unwrap_err()
            .is_validation());
        assert!(service
            .business_date_for_country("", start(), 1_i32, None)
            .unwrap_err()
            .is_validation());
        assert!(service
            .business_date_for_country("no", start(), Vec::new(), None)
            .unwrap_err()
            .is_validation());
        assert_eq!(transport.calls(), 0);
    }
}
