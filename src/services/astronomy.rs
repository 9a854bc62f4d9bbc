// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The `astronomy` service: rise, set, twilight and phase events per day.

use super::ServiceCore;
use crate::date_time::DateTime;
use crate::error::{Error, Result};
use crate::model::{AstronomyEventClass, AstronomyLocation, AstronomyObjectType, LocationId};
use crate::query::Query;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstronomyOptions {
    /// Event classes to return.  Empty lets the service pick.
    pub types: AstronomyEventClass,
    pub include_coordinates: bool,
    /// Add ISO local times to each event.
    pub include_iso_time: bool,
    /// Add UTC times to each event.
    pub include_utc_time: bool,
    /// Search radius in km when looking up the nearest place.
    pub radius: Option<u32>,
}

impl Default for AstronomyOptions {
    fn default() -> Self {
        Self {
            types: AstronomyEventClass::empty(),
            include_coordinates: true,
            include_iso_time: false,
            include_utc_time: false,
            radius: None,
        }
    }
}

/// Daily astronomical events for one object at one place.
#[derive(Debug, Clone)]
pub struct AstronomyService {
    core: ServiceCore,
    options: AstronomyOptions,
}

service_client!(AstronomyService, AstronomyOptions, "astronomy");

impl AstronomyService {
    /// Events for `object` at `place` from `start` to `end`, or for the day
    /// of `start` when `end` is `None`.
    pub fn astronomical_info(
        &self,
        object: AstronomyObjectType,
        place: impl Into<LocationId>,
        start: DateTime,
        end: Option<DateTime>,
    ) -> Result<Vec<AstronomyLocation>> {
        let query = self.build_query(object, &place.into(), start, end)?;
        self.core.fetch(&query)?.map_children("location")
    }

    pub(crate) fn build_query(
        &self,
        object: AstronomyObjectType,
        place: &LocationId,
        start: DateTime,
        end: Option<DateTime>,
    ) -> Result<Query> {
        if place.is_empty() {
            return Err(Error::invalid_argument("a place id is required"));
        }
        if start.year() == 0 {
            return Err(Error::invalid_argument("a start date is required"));
        }
        if let Some(end) = end {
            if end < start {
                return Err(Error::invalid_argument(format!(
                    "end date {end} is before start date {start}"
                )));
            }
        }

        let options = &self.options;
        let mut query = self.core.base_query()?;
        query
            .set("placeid", place)
            .set("object", object)
            .set("startdt", start.to_second_precision_string())
            .set_opt("enddt", end.map(|end| end.to_second_precision_string()))
            .set_bool("geo", options.include_coordinates)
            .set_bool("isotime", options.include_iso_time)
            .set_bool("utctime", options.include_utc_time)
            .set_opt("radius", options.radius);
        if !options.types.is_empty() {
            query.set("types", options.types.to_wire());
        }
        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AstronomyEventCode;
    use crate::services::testing::*;

    const BODY: &str = r#"<data version="3">
        <location id="187" matchparam="norway/oslo">
            <geo><name>Oslo</name><country id="no">Norway</country></geo>
            <astronomy>
                <object name="sun">
                    <day date="2021-03-04">
                        <event type="rise" hour="7" min="7"/>
                        <event type="set" hour="17" min="46"/>
                    </day>
                </object>
            </astronomy>
        </location>
    </data>"#;

    fn start() -> DateTime {
        DateTime::from_ymd(2021, 3, 4).unwrap()
    }

    #[test]
    fn sends_the_request_parameters() {
        let transport = FakeTransport::new(BODY);
        let mut service =
            AstronomyService::with_transport(credentials(), config(), transport.clone());
        service.options_mut().types = AstronomyEventClass::SET_RISE | AstronomyEventClass::PHASE;
        service.options_mut().radius = Some(50);

        let end = DateTime::from_ymd(2021, 3, 6).unwrap();
        service
            .astronomical_info(AstronomyObjectType::Sun, "norway/oslo", start(), Some(end))
            .unwrap();

        let (path, params) = transport.last();
        assert_eq!(path, "http://fake/astronomy");
        assert_eq!(params["placeid"], "norway/oslo");
        assert_eq!(params["object"], "sun");
        assert_eq!(params["startdt"], "2021-03-04T00:00:00");
        assert_eq!(params["enddt"], "2021-03-06T00:00:00");
        assert_eq!(params["geo"], "1");
        assert_eq!(params["isotime"], "0");
        assert_eq!(params["utctime"], "0");
        assert_eq!(params["radius"], "50");
        assert_eq!(params["types"], "phase,setrise");
    }

    #[test]
    fn optional_parameters_are_omitted() {
        let transport = FakeTransport::new(BODY);
        let service = AstronomyService::with_transport(credentials(), config(), transport.clone());
        service
            .astronomical_info(AstronomyObjectType::Moon, 187_i64, start(), None)
            .unwrap();

        let (_, params) = transport.last();
        assert_eq!(params["placeid"], "187");
        assert!(!params.contains_key("enddt"));
        assert!(!params.contains_key("radius"));
        assert!(!params.contains_key("types"));
    }

    #[test]
    fn maps_locations() {
        let transport = FakeTransport::new(BODY);
        let service = AstronomyService::with_transport(credentials(), config(), transport);
        let locations = service
            .astronomical_info(AstronomyObjectType::Sun, "norway/oslo", start(), None)
            .unwrap();

        assert_eq!(locations.len(), 1);
        let sun = &locations[0].objects[0];
        assert_eq!(sun.name, AstronomyObjectType::Sun);
        let events = &sun.days[0].events;
        assert_eq!(events[0].kind, Some(AstronomyEventCode::Rise));
        assert_eq!(events[1].kind, Some(AstronomyEventCode::Set));
    }

    #[test]
    fn rejects_invalid_arguments_before_sending() {
        let transport = FakeTransport::new(BODY);
        let service = AstronomyService::with_transport(credentials(), config(), transport.clone());
        let sun = AstronomyObjectType::Sun;

        assert!(service
            .astronomical_info(sun, "", start(), None)
            .unwrap_err()
            .is_validation());
        assert!(service
            .astronomical_info(sun, "oslo", DateTime::default(), None)
            .unwrap_err()
            .is_validation());
        let before = DateTime::from_ymd(2021, 3, 3).unwrap();
        assert!(service
            .astronomical_info(sun, "oslo", start(), Some(before))
            .unwrap_err()
            .is_validation());
        assert_eq!(transport.calls(), 0);
    }
}
