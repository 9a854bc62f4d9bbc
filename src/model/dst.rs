// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Daylight saving time entries.

use super::places::Region;
use super::time::{TimeChange, Timezone};
use crate::date_time::DateTime;
use crate::error::{Error, Result};
use crate::xml::{Element, FromElement};

wire_codes! {
    /// Regions that never observe DST, or observe it all year.
    pub enum DstSpecialType {
        NoDaylightSavingTime => "nodst",
        DaylightSavingTimeAllYear => "allyear",
    }
}

/// DST rules of one region for the queried year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dst {
    pub region: Option<Region>,
    pub standard_timezone: Option<Timezone>,
    /// Absent when the region has no DST changes that year.  Regions on DST
    /// all year report it as their standard zone instead.
    pub dst_timezone: Option<Timezone>,
    pub special: Option<DstSpecialType>,
    pub dst_start: Option<DateTime>,
    pub dst_end: Option<DateTime>,
    /// Only filled when time changes were requested.
    pub time_changes: Vec<TimeChange>,
}

impl FromElement for Dst {
    fn from_element(element: &Element) -> Result<Self> {
        let special = element
            .child("special")
            .and_then(|special| special.attr("type"))
            .map(|code| {
                DstSpecialType::from_wire(code)
                    .ok_or_else(|| Error::malformed(format!("unknown DST special type '{code}'")))
            })
            .transpose()?;

        Ok(Self {
            region: element.child("region").map(Region::from_element).transpose()?,
            standard_timezone: element
                .child("stdtimezone")
                .map(Timezone::from_element)
                .transpose()?,
            dst_timezone: element
                .child("dsttimezone")
                .map(Timezone::from_element)
                .transpose()?,
            special,
            dst_start: element.child_with("dststart", DateTime::parse)?,
            dst_end: element.child_with("dstend", DateTime::parse)?,
            time_changes: match element.child("timechanges") {
                Some(list) => list.map_children("change")?,
                None => Vec::new(),
            },
        })
    }
}
