// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The `places` service.

use super::{container, ServiceCore};
use crate::error::Result;
use crate::model::Place;
use crate::query::Query;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacesOptions {
    pub include_coordinates: bool,
}

impl Default for PlacesOptions {
    fn default() -> Self {
        Self {
            include_coordinates: true,
        }
    }
}

/// Every place known to the service.
#[derive(Debug, Clone)]
pub struct PlacesService {
    core: ServiceCore,
    options: PlacesOptions,
}

service_client!(PlacesService, PlacesOptions, "places");

impl PlacesService {
    pub fn places(&self) -> Result<Vec<Place>> {
        let query = self.build_query()?;
        let root = self.core.fetch(&query)?;
        let places = container(&root, "places")?.map_children("place")?;
        tracing::debug!(count = places.len(), "retrieved places");
        Ok(places)
    }

    pub(crate) fn build_query(&self) -> Result<Query> {
        let mut query = self.core.base_query()?;
        query.set_bool("geo", self.options.include_coordinates);
        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::LocationId;
    use crate::services::testing::*;

    const BODY: &str = r#"<data version="3">
        <places>
            <place id="187" urlid="norway/oslo">
                <geo>
                    <name>Oslo</name>
                    <country id="no">Norway</country>
                    <latitude>59.913</latitude>
                    <longitude>10.740</longitude>
                </geo>
            </place>
            <place id="not-a-number" urlid="norway/bergen"/>
        </places>
    </data>"#;

    #[test]
    fn lists_places() {
        let transport = FakeTransport::new(BODY);
        let service = PlacesService::with_transport(credentials(), config(), transport.clone());
        let places = service.places().unwrap();

        let (path, params) = transport.last();
        assert_eq!(path, "http://fake/places");
        assert_eq!(params["geo"], "1");

        assert_eq!(places.len(), 2);
        let oslo = places[0].geography.as_ref().unwrap();
        assert_eq!(oslo.name.as_deref(), Some("Oslo"));
        assert_eq!(oslo.coordinates.unwrap().latitude, 59.913);
        assert_eq!(LocationId::from(&places[0]), LocationId::Numeric(187));
        assert_eq!(
            LocationId::from(&places[1]),
            LocationId::Textual("norway/bergen".into())
        );
    }

    #[test]
    fn coordinates_can_be_skipped() {
        let transport = FakeTransport::new(BODY);
        let service = PlacesService::with_transport(credentials(), config(), transport.clone())
            .with_options(PlacesOptions {
                include_coordinates: false,
            });
        service.places().unwrap();
        assert_eq!(transport.last().1["geo"], "0");
    }

    #[test]
    fn missing_places_element_is_malformed() {
        let transport = FakeTransport::new(r#"<data version="3"><place id="1"/></data>"#);
        let service = PlacesService::with_transport(credentials(), config(), transport);
        assert!(matches!(service.places(), Err(Error::MalformedResponse(_))));
    }
}
