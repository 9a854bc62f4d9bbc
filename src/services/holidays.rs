// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The `holidays` service.

use super::{container, require_id, ServiceCore};
use crate::error::{Error, Result};
use crate::model::{Holiday, HolidayType};
use crate::query::Query;
use chrono::{Datelike, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidaysOptions {
    /// Categories to return.  Empty lets the service pick its default set.
    pub types: HolidayType,
}

impl Default for HolidaysOptions {
    fn default() -> Self {
        Self {
            types: HolidayType::empty(),
        }
    }
}

/// Holidays for a country and year.
#[derive(Debug, Clone)]
pub struct HolidaysService {
    core: ServiceCore,
    options: HolidaysOptions,
}

service_client!(HolidaysService, HolidaysOptions, "holidays");

impl HolidaysService {
    /// Holidays in `country` during `year`, or the current UTC year.
    pub fn holidays_for_country(&self, country: &str, year: Option<i32>) -> Result<Vec<Holiday>> {
        let query = self.build_query(country, year)?;
        let root = self.core.fetch(&query)?;
        container(&root, "holidays")?.map_children("holiday")
    }

    pub(crate) fn build_query(&self, country: &str, year: Option<i32>) -> Result<Query> {
        require_id(country, "country")?;
        let year = year.unwrap_or_else(|| Utc::now().year());
        if year <= 0 {
            return Err(Error::invalid_argument(format!(
                "year must be positive, got {year}"
            )));
        }

        let mut query = self.core.base_query()?;
        query.set("country", country).set("year", year);
        if !self.options.types.is_empty() {
            query.set("types", self.options.types.to_wire());
        }
        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::*;

    const BODY: &str = r#"<data version="3">
        <holidays>
            <holiday id="1687" urlid="norway/new-year-day">
                <name lang="en">New Year's Day</name>
                <country id="no">Norway</country>
                <date><iso>2021-01-01</iso></date>
                <types><type>federal</type></types>
            </holiday>
            <holiday id="1688" urlid="norway/maundy-thursday">
                <name lang="en">Maundy Thursday</name>
                <date><iso>2021-04-01</iso></date>
            </holiday>
        </holidays>
    </data>"#;

    #[test]
    fn sends_country_year_and_types() {
        let transport = FakeTransport::new(BODY);
        let service = HolidaysService::with_transport(credentials(), config(), transport.clone())
            .with_options(HolidaysOptions {
                types: HolidayType::FEDERAL | HolidayType::FLAGDAYS,
            });
        let holidays = service.holidays_for_country("no", Some(2021)).unwrap();

        let (path, params) = transport.last();
        assert_eq!(path, "http://fake/holidays");
        assert_eq!(params["country"], "no");
        assert_eq!(params["year"], "2021");
        assert_eq!(params["types"], "federal,flagday");
        assert_eq!(holidays.len(), 2);
        assert_eq!(holidays[0].id, Some(1687));
        assert_eq!(holidays[0].types, ["federal"]);
    }

    #[test]
    fn empty_types_are_omitted_and_year_defaults() {
        let transport = FakeTransport::new(BODY);
        let service = HolidaysService::with_transport(credentials(), config(), transport.clone());
        service.holidays_for_country("no", None).unwrap();

        let (_, params) = transport.last();
        assert!(!params.contains_key("types"));
        assert_eq!(params["year"], Utc::now().year().to_string());
    }

    #[test]
    fn rejects_invalid_arguments_before_sending() {
        let transport = FakeTransport::new(BODY);
        let service = HolidaysService::with_transport(credentials(), config(), transport.clone());
        assert!(service
            .holidays_for_country("", Some(2021))
            .unwrap_err()
            .is_validation());
        assert!(service
            .holidays_for_country("no", Some(0))
            .unwrap_err()
            .is_validation());
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn missing_container_is_malformed() {
        let transport = FakeTransport::new(r#"<data version="3"/>"#);
        let service = HolidaysService::with_transport(credentials(), config(), transport);
        assert!(matches!(
            service.holidays_for_country("no", Some(2021)),
            Err(Error::MalformedResponse(_))
        ));
    }
}
