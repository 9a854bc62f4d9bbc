// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Typed records mapped from service responses, and the code tables used in
//! requests.
//!
//! Codes that can be combined in one request ([`HolidayType`],
//! [`AstronomyEventClass`]) are `bitflags` sets; the rest are plain enums
//! with a fixed wire spelling.

use std::fmt;

/// Generate a plain enum with a fixed wire spelling per variant.
///
/// `from_wire` matches case-insensitively.
macro_rules! wire_codes {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $code:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            /// The wire spelling.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $code),+
                }
            }

            /// Resolve a wire spelling, ignoring ASCII case.
            pub fn from_wire(code: &str) -> Option<Self> {
                Self::VARIANTS
                    .iter()
                    .copied()
                    .find(|variant| variant.as_str().eq_ignore_ascii_case(code))
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub mod astro;
pub mod business;
pub mod dst;
pub mod holidays;
pub mod places;
pub mod time;

pub use astro::{
    Astronomy, AstronomyCurrent, AstronomyDay, AstronomyDayEvent, AstronomyEvent,
    AstronomyEventClass, AstronomyEventCode, AstronomyEventType, AstronomyLocation,
    AstronomyObjectDetails, AstronomyObjectType, AstronomySpecial, AstronomySpecialType,
    MoonPhase,
};
pub use business::{
    BusinessDates, BusinessDaysFilterType, BusinessDaysOperatorType, BusinessFilterMethod,
    BusinessHolidayType, Period, WeekdaysType,
};
pub use dst::{Dst, DstSpecialType};
pub use holidays::{Holiday, HolidayState, HolidayType};
pub use places::{Coordinates, Country, Geo, Location, LocationId, LocationRef, Place, Region};
pub use time::{ConvertedTimes, Time, TimeChange, Timezone};

/// Join the wire codes of every flag set in `value`, in table order.
pub(crate) fn join_flags<F>(value: F, table: &[(F, &'static str)]) -> String
where
    F: bitflags::Flags + Copy,
{
    table
        .iter()
        .filter(|(flag, _)| value.contains(*flag))
        .map(|(_, code)| *code)
        .collect::<Vec<_>>()
        .join(",")
}

/// Join the wire codes of a list of plain codes.
pub(crate) fn join_codes<T: fmt::Display>(codes: &[T]) -> String {
    codes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
