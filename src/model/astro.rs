// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Astronomical objects, events and positions.

use super::places::Geo;
use crate::date_time::DateTime;
use crate::error::{Error, Result};
use crate::offset::DateTimeOffset;
use crate::time_span::TimeSpan;
use crate::xml::{Element, FromElement};

// ═══════════════════════════════════════════════════════════════════════════
// Codes
// ═══════════════════════════════════════════════════════════════════════════

wire_codes! {
    /// A body the astronomy services can report on.
    pub enum AstronomyObjectType {
        Sun => "sun",
        Moon => "moon",
        Mercury => "mercury",
        Venus => "venus",
        Mars => "mars",
        Jupiter => "jupiter",
        Saturn => "saturn",
        Uranus => "uranus",
        Neptune => "neptune",
        Pluto => "pluto",
    }
}

bitflags::bitflags! {
    /// Event classes to request from the astronomy service.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct AstronomyEventClass: u32 {
        /// Every class except `CURRENT`.
        const ALL = 1;
        const DAY_LENGTH = 1 << 1;
        /// Meridian and anti-meridian crossings.
        const MERIDIAN = 1 << 2;
        /// Moon phase events; also adds a moon phase to every reported day.
        const PHASE = 1 << 3;
        const SET_RISE = 1 << 4;
        const ALL_TWILIGHTS = 1 << 5;
        const CIVIL_TWILIGHT = 1 << 6;
        const NAUTICAL_TWILIGHT = 1 << 7;
        const ASTRONOMICAL_TWILIGHT = 1 << 8;
        /// The object's position at the time of the request.
        const CURRENT = 1 << 9;
    }
}

impl AstronomyEventClass {
    const WIRE: &'static [(Self, &'static str)] = &[
        (Self::ALL, "all"),
        (Self::DAY_LENGTH, "daylength"),
        (Self::MERIDIAN, "meridian"),
        (Self::PHASE, "phase"),
        (Self::SET_RISE, "setrise"),
        (Self::ALL_TWILIGHTS, "twilight"),
        (Self::CIVIL_TWILIGHT, "twilight6"),
        (Self::NAUTICAL_TWILIGHT, "twilight12"),
        (Self::ASTRONOMICAL_TWILIGHT, "twilight18"),
        (Self::CURRENT, "current"),
    ];

    /// Comma-separated wire codes of the included classes.
    pub fn to_wire(self) -> String {
        super::join_flags(self, Self::WIRE)
    }
}

impl Default for AstronomyEventClass {
    fn default() -> Self {
        Self::empty()
    }
}

wire_codes! {
    /// What happened at an [`AstronomyDayEvent`].
    pub enum AstronomyEventCode {
        AstronomicalTwilightStarts => "twi18_start",
        NauticalTwilightStarts => "twi12_start",
        CivilTwilightStarts => "twi6_start",
        Rise => "rise",
        Meridian => "meridian",
        AntiMeridian => "antimeridian",
        Set => "set",
        CivilTwilightEnds => "twi6_end",
        NauticalTwilightEnds => "twi12_end",
        AstronomicalTwilightEnds => "twi18_end",
        NewMoon => "newmoon",
        FirstQuarter => "firstquarter",
        FullMoon => "fullmoon",
        ThirdQuarter => "thirdquarter",
    }
}

wire_codes! {
    pub enum AstronomyEventType {
        Rise => "rise",
        Set => "set",
    }
}

wire_codes! {
    /// Whether the sun stays up or down for a whole day.
    pub enum AstronomySpecialType {
        Up => "up",
        Down => "down",
    }
}

wire_codes! {
    #[derive(Default)]
    pub enum MoonPhase {
        #[default]
        NotRequested => "notrequested",
        NewMoon => "newmoon",
        WaxingCrescent => "waxingcrescent",
        FirstQuarter => "firstquarter",
        WaxingGibbous => "waxinggibbous",
        FullMoon => "fullmoon",
        WaningGibbous => "waninggibbous",
        ThirdQuarter => "thirdquarter",
        WaningCrescent => "waningcrescent",
    }
}

fn object_name(element: &Element) -> Result<AstronomyObjectType> {
    let name = element.attr("name").unwrap_or_default();
    AstronomyObjectType::from_wire(name).ok_or_else(|| {
        Error::malformed(format!("unknown astronomy object name '{name}'"))
    })
}

fn moon_phase(code: Option<&str>) -> MoonPhase {
    code.and_then(MoonPhase::from_wire).unwrap_or_default()
}

// ═══════════════════════════════════════════════════════════════════════════
// Time service: sunrise and sunset
// ═══════════════════════════════════════════════════════════════════════════

/// Sunrise and sunset for a location, as reported by the time service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Astronomy {
    pub name: AstronomyObjectType,
    pub events: Vec<AstronomyEvent>,
    /// Only present on days without rise or set events.
    pub special: Option<AstronomySpecial>,
}

impl Astronomy {
    fn latest(&self, kind: AstronomyEventType) -> Option<&AstronomyEvent> {
        self.events
            .iter()
            .filter(|event| event.kind == kind)
            .max_by_key(|event| (event.hour, event.minute))
    }

    /// The latest rise event of the day, if any.
    pub fn sunrise(&self) -> Option<&AstronomyEvent> {
        self.latest(AstronomyEventType::Rise)
    }

    /// The latest set event of the day, if any.
    pub fn sunset(&self) -> Option<&AstronomyEvent> {
        self.latest(AstronomyEventType::Set)
    }
}

impl FromElement for Astronomy {
    fn from_element(element: &Element) -> Result<Self> {
        Ok(Self {
            name: object_name(element)?,
            events: element.map_children("event")?,
            special: element
                .child("special")
                .map(AstronomySpecial::from_element)
                .transpose()?,
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AstronomyEvent {
    pub kind: AstronomyEventType,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
}

impl FromElement for AstronomyEvent {
    fn from_element(element: &Element) -> Result<Self> {
        let code = element.attr("type").unwrap_or_default();
        let kind = AstronomyEventType::from_wire(code)
            .ok_or_else(|| Error::malformed(format!("unknown astronomy event type '{code}'")))?;
        Ok(Self {
            kind,
            hour: element.attr_lenient("hour"),
            minute: element.attr_lenient("minute"),
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AstronomySpecial {
    pub kind: AstronomySpecialType,
}

impl FromElement for AstronomySpecial {
    fn from_element(element: &Element) -> Result<Self> {
        let code = element.attr("type").unwrap_or_default();
        let kind = AstronomySpecialType::from_wire(code)
            .ok_or_else(|| Error::malformed(format!("unknown astronomy special type '{code}'")))?;
        Ok(Self { kind })
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Astronomy and astrodata services
// ═══════════════════════════════════════════════════════════════════════════

/// One requested location and the objects reported for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AstronomyLocation {
    pub id: String,
    /// The place id as given in the request.
    pub match_param: String,
    pub geography: Option<Geo>,
    pub objects: Vec<AstronomyObjectDetails>,
}

impl FromElement for AstronomyLocation {
    fn from_element(element: &Element) -> Result<Self> {
        let objects = match element.child("astronomy") {
            Some(list) => list
                .elements()
                .iter()
                .map(AstronomyObjectDetails::from_element)
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };
        Ok(Self {
            id: element.attr("id").unwrap_or_default().to_owned(),
            match_param: element.attr("matchparam").unwrap_or_default().to_owned(),
            geography: element.child("geo").map(Geo::from_element).transpose()?,
            objects,
        })
    }
}

/// Data for one astronomical object.
#[derive(Debug, Clone, PartialEq)]
pub struct AstronomyObjectDetails {
    pub name: AstronomyObjectType,
    /// Astronomy service: one entry per requested day.
    pub days: Vec<AstronomyDay>,
    /// Astronomy service: position at request time, if requested.
    pub current: Option<AstronomyCurrent>,
    /// Astrodata service: one entry per requested instant.
    pub results: Vec<AstronomyCurrent>,
}

impl FromElement for AstronomyObjectDetails {
    fn from_element(element: &Element) -> Result<Self> {
        Ok(Self {
            name: object_name(element)?,
            days: element.map_children("day")?,
            current: element
                .child("current")
                .map(AstronomyCurrent::from_element)
                .transpose()?,
            results: element.map_children("result")?,
        })
    }
}

/// Events of one object on one day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AstronomyDay {
    pub date: Option<DateTime>,
    /// Time between rise and set: `00:00` if the object never rises,
    /// `24:00` if it never sets.
    pub day_length: Option<TimeSpan>,
    pub moon_phase: MoonPhase,
    pub events: Vec<AstronomyDayEvent>,
}

impl FromElement for AstronomyDay {
    fn from_element(element: &Element) -> Result<Self> {
        Ok(Self {
            date: element.attr_with("date", DateTime::parse)?,
            day_length: element.attr_with("daylength", TimeSpan::parse)?,
            moon_phase: moon_phase(element.attr("moonphase")),
            events: element.map_children("event")?,
        })
    }
}

/// One event on an [`AstronomyDay`].  Times have minute precision.
#[derive(Debug, Clone, PartialEq)]
pub struct AstronomyDayEvent {
    pub kind: Option<AstronomyEventCode>,
    pub iso_time: Option<DateTimeOffset>,
    pub utc_time: Option<DateTimeOffset>,
    /// Meridian events only.
    pub altitude: Option<f64>,
    /// Rise and set events only; degrees from true north.
    pub azimuth: Option<f64>,
    /// Meridian events only; kilometres from the earth's center.
    pub distance: Option<f64>,
    /// Moon meridian events only.
    pub illuminated: Option<f64>,
    /// Moon meridian events only.
    pub pos_angle: Option<f64>,
}

impl FromElement for AstronomyDayEvent {
    fn from_element(element: &Element) -> Result<Self> {
        let kind = element
            .attr("type")
            .map(|code| {
                AstronomyEventCode::from_wire(code).ok_or_else(|| {
                    Error::malformed(format!("unknown astronomy event code '{code}'"))
                })
            })
            .transpose()?;
        Ok(Self {
            kind,
            iso_time: element.attr_with("isotime", DateTimeOffset::parse)?,
            utc_time: element.attr_with("utctime", DateTimeOffset::parse)?,
            altitude: element.attr_parsed("altitude")?,
            azimuth: element.attr_parsed("azimuth")?,
            distance: element.attr_parsed("distance")?,
            illuminated: element.attr_parsed("illuminated")?,
            pos_angle: element.attr_parsed("posangle")?,
        })
    }
}

/// Position of an object at one instant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AstronomyCurrent {
    pub utc_time: Option<DateTimeOffset>,
    pub iso_time: Option<DateTimeOffset>,
    pub azimuth: Option<f64>,
    pub altitude: Option<f64>,
    pub distance: Option<f64>,
    /// Moon only.
    pub illuminated: Option<f64>,
    /// Moon only.
    pub pos_angle: Option<f64>,
    /// Moon only.
    pub moon_phase: MoonPhase,
}

impl FromElement for AstronomyCurrent {
    fn from_element(element: &Element) -> Result<Self> {
        Ok(Self {
            utc_time: element.attr_with("utctime", DateTimeOffset::parse)?,
            iso_time: element.attr_with("isotime", DateTimeOffset::parse)?,
            azimuth: element.child_parsed("azimuth")?,
            altitude: element.child_parsed("altitude")?,
            distance: element.child_parsed("distance")?,
            illuminated: element.child_parsed("illuminated")?,
            pos_angle: element.child_parsed("posangle")?,
            moon_phase: moon_phase(element.child_text("moonphase")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(xml: &str) -> Element {
        Element::parse(xml).unwrap()
    }

    #[test]
    fn event_class_wire_codes() {
        let classes = AstronomyEventClass::SET_RISE
            | AstronomyEventClass::CIVIL_TWILIGHT
            | AstronomyEventClass::CURRENT;
        assert_eq!(classes.to_wire(), "setrise,twilight6,current");
        assert_eq!(AstronomyEventClass::default().to_wire(), "");
    }

    #[test]
    fn codes_resolve_case_insensitively() {
        assert_eq!(AstronomyObjectType::from_wire("Moon"), Some(AstronomyObjectType::Moon));
        assert_eq!(MoonPhase::from_wire("WaxingGibbous"), Some(MoonPhase::WaxingGibbous));
        assert_eq!(
            AstronomyEventCode::from_wire("twi12_end"),
            Some(AstronomyEventCode::NauticalTwilightEnds)
        );
        assert_eq!(AstronomyObjectType::Jupiter.as_str(), "jupiter");
    }

    #[test]
    fn latest_rise_and_set() {
        let astronomy = Astronomy::from_element(&element(
            "<object name=\"sun\"><event type=\"rise\" hour=\"0\" minute=\"12\"/>\
             <event type=\"set\" hour=\"1\" minute=\"5\"/>\
             <event type=\"rise\" hour=\"23\" minute=\"58\"/></object>",
        ))
        .unwrap();
        assert_eq!(astronomy.name, AstronomyObjectType::Sun);
        let rise = astronomy.sunrise().unwrap();
        assert_eq!((rise.hour, rise.minute), (Some(23), Some(58)));
        assert_eq!(astronomy.sunset().unwrap().hour, Some(1));
        assert!(astronomy.special.is_none());
    }

    #[test]
    fn polar_day_has_special() {
        let astronomy = Astronomy::from_element(&element(
            "<object name=\"sun\"><special type=\"up\"/></object>",
        ))
        .unwrap();
        assert!(astronomy.sunrise().is_none());
        assert_eq!(astronomy.special.unwrap().kind, AstronomySpecialType::Up);
    }

    #[test]
    fn unknown_codes_are_malformed() {
        for xml in [
            "<object name=\"comet\"/>",
            "<object name=\"sun\"><event type=\"noon\"/></object>",
            "<object name=\"sun\"><special type=\"sideways\"/></object>",
        ] {
            assert!(
                matches!(Astronomy::from_element(&element(xml)), Err(Error::MalformedResponse(_))),
                "input {xml}"
            );
        }
        let err = AstronomyDayEvent::from_element(&element("<event type=\"eclipse\"/>"));
        assert!(matches!(err, Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn day_with_events() {
        let day = AstronomyDay::from_element(&element(
            "<day date=\"2021-06-21\" daylength=\"18:49:03\" moonphase=\"waxinggibbous\">\
             <event type=\"rise\" isotime=\"2021-06-21T03:53:00+02:00\" \
             utctime=\"2021-06-21T01:53:00\" azimuth=\"32.1\"/>\
             <event type=\"meridian\" isotime=\"2021-06-21T13:18:00+02:00\" \
             altitude=\"53.5\" distance=\"152031234.1\"/></day>",
        ))
        .unwrap();
        assert_eq!(day.date.unwrap().to_day_precision_string(), "2021-06-21");
        assert_eq!(day.day_length.unwrap().in_minutes(), 18 * 60 + 49);
        assert_eq!(day.moon_phase, MoonPhase::WaxingGibbous);
        assert_eq!(day.events.len(), 2);
        let rise = &day.events[0];
        assert_eq!(rise.kind, Some(AstronomyEventCode::Rise));
        assert_eq!(rise.iso_time.unwrap().time_span.in_hours(), 2);
        assert_eq!(rise.utc_time.unwrap().date_time.hour(), 1);
        assert_eq!(rise.azimuth, Some(32.1));
        assert_eq!(day.events[1].altitude, Some(53.5));
    }

    #[test]
    fn unknown_moon_phase_is_left_unset() {
        let day = AstronomyDay::from_element(&element("<day moonphase=\"bluemoon\"/>")).unwrap();
        assert_eq!(day.moon_phase, MoonPhase::NotRequested);
    }

    #[test]
    fn location_collects_every_object() {
        let location = AstronomyLocation::from_element(&element(
            "<location id=\"187\" matchparam=\"norway/oslo\"><astronomy>\
             <object name=\"sun\"><current isotime=\"2021-06-21T12:00:00+02:00\">\
             <altitude>53.1</altitude><azimuth>180.2</azimuth></current></object>\
             <object name=\"moon\"><result utctime=\"2021-06-21T10:00:00\">\
             <illuminated>86.2</illuminated><moonphase>waxinggibbous</moonphase></result>\
             </object></astronomy></location>",
        ))
        .unwrap();
        assert_eq!(location.match_param, "norway/oslo");
        assert_eq!(location.objects.len(), 2);
        let sun = &location.objects[0];
        assert_eq!(sun.current.as_ref().unwrap().altitude, Some(53.1));
        let moon = &location.objects[1];
        assert_eq!(moon.name, AstronomyObjectType::Moon);
        assert_eq!(moon.results[0].moon_phase, MoonPhase::WaxingGibbous);
        assert_eq!(moon.results[0].illuminated, Some(86.2));
    }
}
