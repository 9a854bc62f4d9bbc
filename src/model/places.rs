// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Places, geography and location identifiers.

use super::astro::Astronomy;
use super::time::{Time, TimeChange};
use crate::error::Result;
use crate::xml::{Element, FromElement};
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════════
// Geography
// ═══════════════════════════════════════════════════════════════════════════

/// A country: ISO 3166-1 alpha-2 code and full name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Country {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl FromElement for Country {
    fn from_element(element: &Element) -> Result<Self> {
        // The id is only meaningful alongside a name.
        let Some(name) = element.text() else {
            return Ok(Self::default());
        };
        Ok(Self {
            id: element.attr("id").map(str::to_owned),
            name: Some(name.to_owned()),
        })
    }
}

/// Latitude and longitude in decimal degrees.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Renders `±lat±lon`, the form accepted as a place id.
impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.latitude >= 0.0 {
            f.write_str("+")?;
        }
        write!(f, "{}", self.latitude)?;
        if self.longitude >= 0.0 {
            f.write_str("+")?;
        }
        write!(f, "{}", self.longitude)
    }
}

/// Geographical information about a location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geo {
    pub name: Option<String>,
    pub state: Option<String>,
    pub country: Option<Country>,
    pub coordinates: Option<Coordinates>,
}

impl FromElement for Geo {
    fn from_element(element: &Element) -> Result<Self> {
        let latitude = element.child_parsed::<f64>("latitude")?;
        let longitude = element.child_parsed::<f64>("longitude")?;
        Ok(Self {
            name: element.child_text("name").map(str::to_owned),
            state: element.child_text("state").map(str::to_owned),
            country: element.child("country").map(Country::from_element).transpose()?,
            coordinates: latitude.zip(longitude).map(|(lat, lon)| Coordinates::new(lat, lon)),
        })
    }
}

/// A place known to the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Place {
    pub id: Option<i64>,
    pub url_id: String,
    pub geography: Option<Geo>,
}

impl FromElement for Place {
    fn from_element(element: &Element) -> Result<Self> {
        Ok(Self {
            id: element.attr_lenient("id"),
            url_id: element.attr("urlid").unwrap_or_default().to_owned(),
            geography: element.child("geo").map(Geo::from_element).transpose()?,
        })
    }
}

/// A location referenced by a [`Region`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationRef {
    pub id: Option<String>,
    pub name: Option<String>,
    pub state: Option<String>,
}

impl FromElement for LocationRef {
    fn from_element(element: &Element) -> Result<Self> {
        Ok(Self {
            id: element.attr("id").map(str::to_owned),
            name: element.attr("name").map(str::to_owned),
            state: element.attr("state").map(str::to_owned),
        })
    }
}

/// A geographical region: its country, a description and its biggest place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    pub country: Option<Country>,
    pub description: String,
    pub biggest_place: String,
    /// Only filled when places were requested.
    pub locations: Vec<LocationRef>,
}

impl FromElement for Region {
    fn from_element(element: &Element) -> Result<Self> {
        Ok(Self {
            country: element.child("country").map(Country::from_element).transpose()?,
            description: element.child_text("desc").unwrap_or_default().to_owned(),
            biggest_place: element.child_text("biggestplace").unwrap_or_default().to_owned(),
            locations: match element.child("locations") {
                Some(list) => list.map_children("location")?,
                None => Vec::new(),
            },
        })
    }
}

/// A location with its time, time changes and sun data, as requested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    pub id: Option<String>,
    pub geography: Option<Geo>,
    pub time: Option<Time>,
    pub time_changes: Vec<TimeChange>,
    pub astronomy: Vec<Astronomy>,
}

impl FromElement for Location {
    fn from_element(element: &Element) -> Result<Self> {
        Ok(Self {
            id: element.attr("id").map(str::to_owned),
            geography: element.child("geo").map(Geo::from_element).transpose()?,
            time: element.child("time").map(Time::from_element).transpose()?,
            time_changes: match element.child("timechanges") {
                Some(list) => list.map_children("change")?,
                None => Vec::new(),
            },
            astronomy: match element.child("astronomy") {
                Some(list) => list.map_children("object")?,
                None => Vec::new(),
            },
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// LocationId
// ═══════════════════════════════════════════════════════════════════════════

/// Any of the identifiers the service accepts for a place.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationId {
    /// Country code, country name, city name, `country/city` path, ...
    Textual(String),
    /// A numeric place id returned by an earlier call.
    Numeric(i64),
    Coordinates(Coordinates),
}

impl LocationId {
    /// `true` when the rendered id is empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Textual(text) if text.is_empty())
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Textual(text) => f.write_str(text),
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Coordinates(coordinates) => fmt::Display::fmt(coordinates, f),
        }
    }
}

impl From<&str> for LocationId {
    fn from(value: &str) -> Self {
        Self::Textual(value.to_owned())
    }
}

impl From<String> for LocationId {
    fn from(value: String) -> Self {
        Self::Textual(value)
    }
}

impl From<i64> for LocationId {
    fn from(value: i64) -> Self {
        Self::Numeric(value)
    }
}

impl From<Coordinates> for LocationId {
    fn from(value: Coordinates) -> Self {
        Self::Coordinates(value)
    }
}

/// Uses the numeric id, falling back to the textual url id.
impl From<&Place> for LocationId {
    fn from(place: &Place) -> Self {
        match place.id {
            Some(id) => Self::Numeric(id),
            None => Self::Textual(place.url_id.clone()),
        }
    }
}
