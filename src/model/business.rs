// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Business-day arithmetic results.

use super::holidays::Holiday;
use super::places::Geo;
use super::time::Time;
use crate::error::Result;
use crate::xml::{Element, FromElement};

wire_codes! {
    /// Days to filter out (or, with `include`, to count exclusively).
    pub enum BusinessDaysFilterType {
        Mon => "mon",
        Tue => "tue",
        Wed => "wed",
        Thu => "thu",
        Fri => "fri",
        Sat => "sat",
        Sun => "sun",
        /// Every day of the week.
        All => "all",
        Weekend => "weekend",
        Holidays => "holidays",
        WeekendHolidays => "weekendholidays",
        /// No filter at all.
        Nothing => "none",
    }
}

wire_codes! {
    pub enum BusinessDaysOperatorType {
        Add => "add",
        Subtract => "subtract",
    }
}

wire_codes! {
    /// Whether the counted days were included or excluded by the filter.
    pub enum BusinessFilterMethod {
        Included => "included",
        Excluded => "excluded",
    }
}

/// Result of a business date or business duration query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BusinessDates {
    pub geo: Option<Geo>,
    pub periods: Vec<Period>,
}

impl FromElement for BusinessDates {
    fn from_element(root: &Element) -> Result<Self> {
        Ok(Self {
            geo: root.child("geo").map(Geo::from_element).transpose()?,
            periods: root.map_children("period")?,
        })
    }
}

/// One calculated period.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Period {
    /// Days counted after filtering.
    pub included_days: Option<i32>,
    /// Calendar days in the period.
    pub calendar_days: Option<i32>,
    /// Days removed by the filter.
    pub skipped_days: Option<i32>,
    pub start_date: Option<Time>,
    pub end_date: Option<Time>,
    pub weekdays: Option<WeekdaysType>,
    pub holidays: Option<BusinessHolidayType>,
}

impl FromElement for Period {
    fn from_element(element: &Element) -> Result<Self> {
        Ok(Self {
            included_days: element.attr_lenient("includeddays"),
            calendar_days: element.attr_lenient("calendardays"),
            skipped_days: element.attr_lenient("skippeddays"),
            start_date: element.child("startdate").map(Time::from_element).transpose()?,
            end_date: element.child("enddate").map(Time::from_element).transpose()?,
            weekdays: element
                .child("weekdays")
                .map(WeekdaysType::from_element)
                .transpose()?,
            holidays: element
                .child("holidays")
                .map(BusinessHolidayType::from_element)
                .transpose()?,
        })
    }
}

/// Per-weekday counts of the days matched by the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekdaysType {
    pub method: Option<BusinessFilterMethod>,
    pub count: Option<i32>,
    pub mon: Option<i32>,
    pub tue: Option<i32>,
    pub wed: Option<i32>,
    pub thu: Option<i32>,
    pub fri: Option<i32>,
    pub sat: Option<i32>,
    pub sun: Option<i32>,
}

impl FromElement for WeekdaysType {
    fn from_element(element: &Element) -> Result<Self> {
        Ok(Self {
            method: element.attr("type").and_then(BusinessFilterMethod::from_wire),
            count: element.attr_lenient("count"),
            mon: element.child_parsed("mon")?,
            tue: element.child_parsed("tue")?,
            wed: element.child_parsed("wed")?,
            thu: element.child_parsed("thu")?,
            fri: element.child_parsed("fri")?,
            sat: element.child_parsed("sat")?,
            sun: element.child_parsed("sun")?,
        })
    }
}

/// Holidays falling inside a [`Period`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessHolidayType {
    pub method: Option<BusinessFilterMethod>,
    pub count: Option<i32>,
    pub list: Vec<Holiday>,
}

impl FromElement for BusinessHolidayType {
    fn from_element(element: &Element) -> Result<Self> {
        Ok(Self {
            method: element.attr("type").and_then(BusinessFilterMethod::from_wire),
            count: element.attr_lenient("count"),
            list: match element.child("list") {
                Some(list) => list.map_children("holiday")?,
                None => Vec::new(),
            },
        })
    }
}
