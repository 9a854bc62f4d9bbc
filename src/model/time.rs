// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time stamps, time zones and time changes.

use super::places::Location;
use crate::date_time::DateTime;
use crate::error::{Error, Result};
use crate::time_span::TimeSpan;
use crate::xml::{Element, FromElement};

/// A time stamp: its ISO text, its fields, and optionally its zone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Time {
    /// `2011-06-08T09:18:16+02:00`, `2011-06-08T07:18:16` (UTC) or
    /// `2011-06-08` when no time applies.
    pub iso: String,
    pub date_time: Option<DateTime>,
    /// Only present when zone details were requested and differ from UTC.
    pub timezone: Option<Timezone>,
}

impl FromElement for Time {
    fn from_element(element: &Element) -> Result<Self> {
        let iso = element
            .attr("iso")
            .or_else(|| element.child_text("iso"))
            .unwrap_or_default()
            .to_owned();

        let date_time = match element.child("datetime") {
            Some(fields) => Some(verbose_date_time(fields)?),
            None if !iso.is_empty() => Some(
                DateTime::parse(&iso)
                    .map_err(|e| Error::malformed(format!("<{}> iso: {e}", element.name())))?,
            ),
            None => None,
        };

        Ok(Self {
            iso,
            date_time,
            timezone: element.child("timezone").map(Timezone::from_element).transpose()?,
        })
    }
}

/// Build a [`DateTime`] from `<year>`, `<month>`, ... children, either
/// directly under `<datetime>` or grouped in `<date>` and `<time>`.
fn verbose_date_time(fields: &Element) -> Result<DateTime> {
    let date = fields.child("date").unwrap_or(fields);
    let time = fields.child("time").unwrap_or(fields);
    let year = date.child_parsed::<i32>("year")?.unwrap_or(0);
    let month = date.child_parsed::<u32>("month")?.unwrap_or(1);
    let day = date.child_parsed::<u32>("day")?.unwrap_or(1);
    let hour = time.child_parsed::<u32>("hour")?.unwrap_or(0);
    let minute = time.child_parsed::<u32>("minute")?.unwrap_or(0);
    let second = time.child_parsed::<u32>("second")?.unwrap_or(0);
    DateTime::new(year, month, day, hour, minute, second, 0)
        .map_err(|e| Error::malformed(format!("<datetime>: {e}")))
}

/// A time zone and its offsets from UTC.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timezone {
    /// Abbreviated name, e.g. `LHDT`.
    pub abbreviation: String,
    /// Full name, e.g. `Lord Howe Daylight Time`.
    pub name: String,
    pub offset: Option<TimeSpan>,
    /// Offset without DST, in seconds.
    pub basic_offset: Option<i32>,
    /// DST component of the offset, in seconds.
    pub dst_offset: Option<i32>,
    /// Total offset from UTC, in seconds.
    pub total_offset: Option<i32>,
}

impl FromElement for Timezone {
    fn from_element(element: &Element) -> Result<Self> {
        Ok(Self {
            abbreviation: element.child_text("zoneabb").unwrap_or_default().to_owned(),
            name: element.child_text("zonename").unwrap_or_default().to_owned(),
            offset: element.attr_with("offset", TimeSpan::parse)?,
            basic_offset: element.child_parsed("zoneoffset")?,
            dst_offset: element.child_parsed("zonedst")?,
            total_offset: element.child_parsed("zonetotaloffset")?,
        })
    }
}

/// A DST or zone transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeChange {
    /// New DST offset in seconds; `None` when the place has no DST.
    pub new_dst: Option<i32>,
    /// New zone offset in seconds; only set on the rare zone changes.
    pub new_zone: Option<i32>,
    /// New total offset from UTC in seconds.
    pub new_offset: Option<i32>,
    pub utc_time: Option<DateTime>,
    pub old_local_time: Option<DateTime>,
    pub new_local_time: Option<DateTime>,
}

impl FromElement for TimeChange {
    fn from_element(element: &Element) -> Result<Self> {
        Ok(Self {
            new_dst: element.attr_lenient("newdst"),
            new_zone: element.attr_lenient("newzone"),
            new_offset: element.attr_lenient("newoffset"),
            utc_time: element.attr_with("utctime", DateTime::parse)?,
            old_local_time: element.attr_with("oldlocaltime", DateTime::parse)?,
            new_local_time: element.attr_with("newlocaltime", DateTime::parse)?,
        })
    }
}

/// Result of a time conversion: the UTC instant and every requested location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertedTimes {
    pub utc: Option<Time>,
    pub locations: Vec<Location>,
}

impl FromElement for ConvertedTimes {
    fn from_element(root: &Element) -> Result<Self> {
        Ok(Self {
            utc: root
                .child("utc")
                .and_then(|utc| utc.child("time"))
                .map(Time::from_element)
                .transpose()?,
            locations: root.map_children("location")?,
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
    fn verbose_fields_win_over_iso() {
        let time = Time::from_element(&element(
            "<time iso=\"2021-03-04T10:11:12+01:00\"><datetime><year>2021</year>\
             <month>3</month><day>4</day><hour>10</hour><minute>11</minute>\
             <second>12</second></datetime></time>",
        ))
        .unwrap();
        assert_eq!(time.iso, "2021-03-04T10:11:12+01:00");
        assert_eq!(time.date_time.unwrap().to_string(), "2021-03-04T10:11:12");
    }

    #[test]
    fn grouped_verbose_fields() {
        let time = Time::from_element(&element(
            "<time iso=\"2021-03-04T10:11:12\"><datetime>\
             <date><year>2021</year><month>3</month><day>4</day></date>\
             <time><hour>10</hour><minute>11</minute><second>12</second></time>\
             </datetime></time>",
        ))
        .unwrap();
        assert_eq!(time.date_time.unwrap().to_string(), "2021-03-04T10:11:12");
    }

    #[test]
    fn iso_child_and_fallback_parse() {
        let time = Time::from_element(&element("<date><iso>2014-01-01</iso></date>")).unwrap();
        assert_eq!(time.iso, "2014-01-01");
        assert_eq!(time.date_time, Some(DateTime::from_ymd(2014, 1, 1).unwrap()));

        let err = Time::from_element(&element("<time iso=\"01/01/2014\"/>")).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn timezone_offsets() {
        let tz = Timezone::from_element(&element(
            "<timezone offset=\"+10:30\"><zoneabb>LHST</zoneabb>\
             <zonename>Lord Howe Standard Time</zonename><zoneoffset>37800</zoneoffset>\
             <zonedst>0</zonedst><zonetotaloffset>37800</zonetotaloffset></timezone>",
        ))
        .unwrap();
        assert_eq!(tz.abbreviation, "LHST");
        assert_eq!(tz.offset.unwrap().in_minutes(), 630);
        assert_eq!(tz.basic_offset, Some(37_800));
        assert_eq!(tz.dst_offset, Some(0));
    }

    #[test]
    fn time_change_numbers_are_lenient() {
        let change = TimeChange::from_element(&element(
            "<change newdst=\"\" newzone=\"n/a\" newoffset=\"7200\" \
             utctime=\"2021-03-28T01:00:00\" oldlocaltime=\"2021-03-28T02:00:00\" \
             newlocaltime=\"2021-03-28T03:00:00\"/>",
        ))
        .unwrap();
        assert_eq!(change.new_dst, None);
        assert_eq!(change.new_zone, None);
        assert_eq!(change.new_offset, Some(7_200));
        assert_eq!(change.new_local_time.unwrap().hour(), 3);
    }
}
