// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Holidays and observances.

use super::places::Country;
use super::time::Time;
use crate::error::Result;
use crate::xml::{Element, FromElement};
use std::collections::BTreeMap;

bitflags::bitflags! {
    /// Holiday categories to request.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct HolidayType: u32 {
        /// Every holiday, observance and special day.
        const ALL = 1;
        /// The default set: federal and local holidays, flag days, common
        /// observances.
        const DEFAULT = 1 << 1;
        /// The default set for the queried country.
        const DEFAULT_FOR_COUNTRY = 1 << 2;
        const OBSERVANCES = 1 << 3;
        const FEDERAL = 1 << 4;
        const FEDERAL_LOCAL = 1 << 5;
        const LOCAL = 1 << 6;
        const FLAGDAYS = 1 << 7;
        const LOCAL_OBSERVANCES = 1 << 8;
        const IMPORTANT_OBSERVANCES = 1 << 9;
        const COMMON_OBSERVANCES = 1 << 10;
        const OTHER_OBSERVANCES = 1 << 11;
        /// Weekdays of the year, e.g. Mondays.
        const WEEKDAYS = 1 << 12;
        const BUDDHISM = 1 << 13;
        const HEBREW = 1 << 14;
        const HINDUISM = 1 << 15;
        const MUSLIM = 1 << 16;
        const ORTHODOX = 1 << 17;
        /// Equinoxes and solstices.
        const SEASONS = 1 << 18;
        /// DST starts and ends.
        const TIMEZONE_EVENTS = 1 << 19;
        const UNITED_NATIONS = 1 << 20;
        const WORLDWIDE_OBSERVANCES = 1 << 21;
        const CHRISTIAN = 1 << 22;
        const DEFACTO = 1 << 23;
        const RELIGIOUS = 1 << 24;
        const HALFDAY = 1 << 25;
        const OPTIONAL = 1 << 26;
        const OTHER_RELIGION = 1 << 27;
        const SPORT = 1 << 28;
        const FUN = 1 << 29;
    }
}

impl HolidayType {
    const WIRE: &'static [(Self, &'static str)] = &[
        (Self::ALL, "all"),
        (Self::DEFAULT, "default"),
        (Self::DEFAULT_FOR_COUNTRY, "countrydefault"),
        (Self::OBSERVANCES, "obs"),
        (Self::FEDERAL, "federal"),
        (Self::FEDERAL_LOCAL, "federallocal"),
        (Self::LOCAL, "local"),
        (Self::FLAGDAYS, "flagday"),
        (Self::LOCAL_OBSERVANCES, "local2"),
        (Self::IMPORTANT_OBSERVANCES, "obs1"),
        (Self::COMMON_OBSERVANCES, "obs2"),
        (Self::OTHER_OBSERVANCES, "obs3"),
        (Self::WEEKDAYS, "weekday"),
        (Self::BUDDHISM, "buddhism"),
        (Self::HEBREW, "hebrew"),
        (Self::HINDUISM, "hinduism"),
        (Self::MUSLIM, "muslim"),
        (Self::ORTHODOX, "orthodox"),
        (Self::SEASONS, "seasons"),
        (Self::TIMEZONE_EVENTS, "tz"),
        (Self::UNITED_NATIONS, "un"),
        (Self::WORLDWIDE_OBSERVANCES, "world"),
        (Self::CHRISTIAN, "christian"),
        (Self::DEFACTO, "defacto"),
        (Self::RELIGIOUS, "religious"),
        (Self::HALFDAY, "halfday"),
        (Self::OPTIONAL, "optional"),
        (Self::OTHER_RELIGION, "otherreligion"),
        (Self::SPORT, "sport"),
        (Self::FUN, "fun"),
    ];

    /// Comma-separated wire codes of the included categories.
    pub fn to_wire(self) -> String {
        super::join_flags(self, Self::WIRE)
    }

    /// Resolve one wire code.
    pub fn from_wire(code: &str) -> Option<Self> {
        Self::WIRE
            .iter()
            .find(|(_, wire)| *wire == code)
            .map(|(flag, _)| *flag)
    }
}

impl Default for HolidayType {
    fn default() -> Self {
        Self::empty()
    }
}

/// A holiday or observance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Holiday {
    pub id: Option<i64>,
    /// Textual id, usable in timeanddate.com URLs.
    pub url_id: Option<String>,
    /// Article about the holiday on timeanddate.com.
    pub url: Option<String>,
    pub country: Option<Country>,
    /// Name, keyed by language code.
    pub name: BTreeMap<String, String>,
    /// Short description, keyed by language code.
    pub oneliner: BTreeMap<String, String>,
    /// Category labels, e.g. `Federal Holiday`.
    pub types: Vec<String>,
    pub date: Option<Time>,
    /// Stable identifier of this holiday instance.
    pub uid: Option<String>,
    /// States where the holiday applies; empty when it applies nationwide.
    pub states: Vec<HolidayState>,
}

fn by_language(element: &Element, name: &str) -> BTreeMap<String, String> {
    element
        .children(name)
        .filter_map(|child| {
            let lang = child.attr("lang")?;
            Some((lang.to_owned(), child.text().unwrap_or_default().to_owned()))
        })
        .collect()
}

impl FromElement for Holiday {
    fn from_element(element: &Element) -> Result<Self> {
        Ok(Self {
            id: element.attr_lenient("id"),
            url_id: element.attr("urlid").map(str::to_owned),
            url: element.attr("url").map(str::to_owned),
            country: element.child("country").map(Country::from_element).transpose()?,
            name: by_language(element, "name"),
            oneliner: by_language(element, "oneliner"),
            types: element
                .child("types")
                .map(|types| {
                    types
                        .children("type")
                        .filter_map(Element::text)
                        .map(str::to_owned)
                        .collect()
                })
                .unwrap_or_default(),
            date: element.child("date").map(Time::from_element).transpose()?,
            uid: element.child_text("uid").map(str::to_owned),
            states: match element.child("states") {
                Some(list) => list.map_children("state")?,
                None => Vec::new(),
            },
        })
    }
}

/// A state or region affected by a [`Holiday`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayState {
    pub id: Option<i32>,
    /// ISO 3166-2 code, e.g. `us-dc`.
    pub iso: Option<String>,
    pub abbreviation: Option<String>,
    pub name: Option<String>,
    /// Parts of the state the holiday does not affect.
    pub exception: Option<String>,
}

impl FromElement for HolidayState {
    fn from_element(element: &Element) -> Result<Self> {
        Ok(Self {
            id: element.child_parsed("id")?,
            iso: element.attr("iso").map(str::to_owned),
            abbreviation: element.child_text("abbrev").map(str::to_owned),
            name: element.child_text("name").map(str::to_owned),
            exception: element.child_text("exception").map(str::to_owned),
        })
    }
}
