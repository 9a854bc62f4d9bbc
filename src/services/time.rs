// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The `timeservice` service: current time at one or more places.

use super::ServiceCore;
use crate::error::{Error, Result};
use crate::model::{Location, LocationId};
use crate::query::Query;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeOptions {
    pub radius: Option<u32>,
    pub include_coordinates: bool,
    pub include_sunrise_and_sunset: bool,
    pub include_current_time: bool,
    pub include_time_changes: bool,
    pub include_timezone_information: bool,
}

impl Default for TimeOptions {
    fn default() -> Self {
        Self {
            radius: None,
            include_coordinates: true,
            include_sunrise_and_sunset: true,
            include_current_time: true,
            include_time_changes: true,
            include_timezone_information: true,
        }
    }
}

/// Current local time, zone and sun data for places.
#[derive(Debug, Clone)]
pub struct TimeService {
    core: ServiceCore,
    options: TimeOptions,
}

service_client!(TimeService, TimeOptions, "timeservice");

impl TimeService {
    /// Current time at every place in `ids`, in request order.
    pub fn current_time_for_place(&self, ids: &[LocationId]) -> Result<Vec<Location>> {
        let query = self.build_query(ids)?;
        self.core.fetch(&query)?.map_children("location")
    }

    pub(crate) fn build_query(&self, ids: &[LocationId]) -> Result<Query> {
        if ids.is_empty() || ids.iter().any(LocationId::is_empty) {
            return Err(Error::invalid_argument("at least one place id is required"));
        }
        let place_ids = ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");

        let options = &self.options;
        let mut query = self.core.base_query()?;
        query
            .set("placeid", place_ids)
            .set_bool("geo", options.include_coordinates)
            .set_bool("sun", options.include_sunrise_and_sunset)
            .set_bool("time", options.include_current_time)
            .set_bool("timechanges", options.include_time_changes)
            .set_bool("tz", options.include_timezone_information)
            .set_opt("radius", options.radius);
        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AstronomyEventType;
    use crate::services::testing::*;

    const BODY: &str = r#"<data version="3">
        <location id="187">
            <geo><name>Oslo</name><country id="no">Norway</country></geo>
            <time iso="2021-03-04T10:00:00+01:00">
                <timezone offset="+1:00"><zoneabb>CET</zoneabb><zonename>Central European Time</zonename></timezone>
            </time>
            <timechanges>
                <change newdst="3600" newoffset="7200" utctime="2021-03-28T01:00:00"
                        oldlocaltime="2021-03-28T02:00:00" newlocaltime="2021-03-28T03:00:00"/>
            </timechanges>
            <astronomy>
                <object name="sun">
                    <event type="rise" hour="7" minute="7"/>
                    <event type="set" hour="17" minute="46"/>
                </object>
            </astronomy>
        </location>
    </data>"#;

    #[test]
    fn sends_every_flag() {
        let transport = FakeTransport::new(BODY);
        let service = TimeService::with_transport(credentials(), config(), transport.clone())
            .with_options(TimeOptions {
                radius: Some(30),
                include_sunrise_and_sunset: false,
                ..TimeOptions::default()
            });
        service
            .current_time_for_place(&["norway/oslo".into(), 179_i64.into()])
            .unwrap();

        let (path, params) = transport.last();
        assert_eq!(path, "http://fake/timeservice");
        assert_eq!(params["placeid"], "norway/oslo,179");
        assert_eq!(params["geo"], "1");
        assert_eq!(params["sun"], "0");
        assert_eq!(params["time"], "1");
        assert_eq!(params["timechanges"], "1");
        assert_eq!(params["tz"], "1");
        assert_eq!(params["radius"], "30");
    }

    #[test]
    fn maps_time_changes_and_sun() {
        let transport = FakeTransport::new(BODY);
        let service = TimeService::with_transport(credentials(), config(), transport);
        let locations = service.current_time_for_place(&[187_i64.into()]).unwrap();

        let oslo = &locations[0];
        assert_eq!(oslo.id.as_deref(), Some("187"));
        let timezone = oslo.time.as_ref().unwrap().timezone.as_ref().unwrap();
        assert_eq!(timezone.abbreviation, "CET");
        assert_eq!(oslo.time_changes[0].new_offset, Some(7_200));

        let sunrise = oslo.astronomy[0].sunrise().unwrap();
        assert_eq!(sunrise.kind, AstronomyEventType::Rise);
        assert_eq!((sunrise.hour, sunrise.minute), (Some(7), Some(7)));
    }

    #[test]
    fn requires_a_place() {
        let transport = FakeTransport::new(BODY);
        let service = TimeService::with_transport(credentials(), config(), transport.clone());
        assert!(service.current_time_for_place(&[]).unwrap_err().is_validation());
        assert!(service
            .current_time_for_place(&["".into()])
            .unwrap_err()
            .is_validation());
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn oversized_offset_is_malformed() {
        let body = r#"<data version="3"><location id="187"><time iso="2021-03-04T08:00:00">
            <timezone offset="+9999999999999999:00"><zoneabb>CET</zoneabb></timezone>
        </time></location></data>"#;
        let service = TimeService::with_transport(credentials(), config(), FakeTransport::new(body));
        let err = service.current_time_for_place(&[187_i64.into()]).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)), "got {err:?}");
    }
}
