// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Locating lunar month boundaries on the civil day grid.
//!
//! The series in [`ephemeris`](crate::new_moon) yield instants; the
//! calendar needs whole local days.  Everything here rounds astronomical
//! events into a fixed civil time-zone offset and answers the three
//! questions month arithmetic is built from:
//!
//! 1. which local day contains the k-th new moon,
//! 2. which 30° solar-longitude segment the Sun is in when a local day
//!    starts,
//! 3. where lunar month 11 — the month holding the winter solstice —
//!    begins for a given solar year.

use crate::date::SolarDate;
use crate::ephemeris::{self, days_ratio, JulianDay, NEW_MOON_EPOCH, SYNODIC_MONTH};
use qtty::Days;
use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Civil offset
// ---------------------------------------------------------------------------

/// A fixed civil UTC offset, in hours.
///
/// Lunisolar calendars are civil-day calendars: the same new moon can fall
/// on different local days in different countries, which is how the
/// Vietnamese and Chinese New Year occasionally diverge.  The offset is
/// therefore an explicit parameter of every boundary computation, never
/// global state.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeZoneOffset {
    hours: f64,
}

impl TimeZoneOffset {
    /// UTC+7, the offset the Vietnamese civil calendar has been computed
    /// in since the 1967 calendar decree.
    pub const VIETNAM: Self = Self::from_hours(7.0);

    /// An offset of `hours` east of Greenwich (negative west).
    #[inline]
    pub const fn from_hours(hours: f64) -> Self {
        Self { hours }
    }

    /// The offset in hours.
    #[inline]
    pub const fn hours(&self) -> f64 {
        self.hours
    }

    /// The offset as a fraction of a day.
    #[inline]
    pub fn to_days(&self) -> Days {
        Days::new(self.hours / 24.0)
    }
}

impl Default for TimeZoneOffset {
    fn default() -> Self {
        Self::VIETNAM
    }
}

/// Index of the new moon nearest local day `jdn`.
#[inline]
pub(crate) fn nearest_new_moon_index(jdn: i64) -> i64 {
    (days_ratio(Days::new(jdn as f64) - NEW_MOON_EPOCH.quantity(), SYNODIC_MONTH) + 0.5).floor()
        as i64
}

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

/// Lunisolar calendar anchored to one civil time-zone offset.
///
/// A `Calendar` is a plain immutable value; build one per offset of
/// interest.  [`Calendar::VIETNAM`] (UTC+7) is what the crate-level
/// conversion functions use.
///
/// The offset decides real dates.  The new moon of January 1968 fell at
/// 16:29 UT on the 29th — before midnight in Hanoi, after midnight in
/// Beijing — so the two calendars started the year a day apart:
///
/// ```
/// use lunisol::{Calendar, SolarDate, TimeZoneOffset};
///
/// let hanoi = Calendar::VIETNAM;
/// let beijing = Calendar::new(TimeZoneOffset::from_hours(8.0));
/// let solar = SolarDate::new(1968, 1, 29).unwrap();
///
/// let new_year = hanoi.solar_to_lunar(solar);
/// assert_eq!((1, 1), (new_year.month, new_year.day));
/// let eve = beijing.solar_to_lunar(solar);
/// assert_eq!((12, 30), (eve.month, eve.day));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Calendar {
    offset: TimeZoneOffset,
}

impl Calendar {
    /// The Vietnamese civil calendar, UTC+7.
    pub const VIETNAM: Self = Self::new(TimeZoneOffset::VIETNAM);

    /// A calendar computed in the given civil offset.
    #[inline]
    pub const fn new(offset: TimeZoneOffset) -> Self {
        Self { offset }
    }

    /// The calendar's civil offset.
    #[inline]
    pub const fn offset(&self) -> TimeZoneOffset {
        self.offset
    }

    /// Local calendar day (as a JDN) containing the k-th new moon.
    pub fn new_moon_day(&self, k: i64) -> i64 {
        let local = ephemeris::new_moon(k).quantity() + self.offset.to_days();
        (local.value() + 0.5).floor() as i64
    }

    /// Index (0–11) of the 30° solar-longitude segment the Sun occupies at
    /// the local midnight opening day `jdn`.
    ///
    /// Segment boundaries are the principal solar terms; segment 9 opens
    /// at the winter-solstice longitude of 270°.
    pub fn sun_longitude_segment(&self, jdn: i64) -> u32 {
        let midnight = JulianDay::new(jdn as f64 - 0.5) - self.offset.to_days();
        (ephemeris::sun_longitude(midnight) / PI * 6.0).floor() as u32
    }

    /// Local day on which lunar month 11 of solar year `year` begins.
    ///
    /// Month 11 is the month containing the winter solstice.  The new-moon
    /// index is estimated from the year-end JDN; when the Sun has already
    /// passed 270° at that candidate's start, the solstice belongs to the
    /// previous month, so step one month back.
    pub fn month11_start(&self, year: i32) -> i64 {
        let year_end = SolarDate { year, month: 12, day: 31 }.jdn();
        let k = days_ratio(
            Days::new(year_end as f64) - NEW_MOON_EPOCH.quantity(),
            SYNODIC_MONTH,
        )
        .floor() as i64;
        let candidate = self.new_moon_day(k);
        if self.sun_longitude_segment(candidate) >= 9 {
            self.new_moon_day(k - 1)
        } else {
            candidate
        }
    }

    /// Offset, in months (1–13), of the leap month within the lunisolar
    /// year opening at `month11` — the [`Calendar::month11_start`] of the
    /// *previous* solar year.  Only meaningful for years that contain one
    /// (the 13-month years).
    ///
    /// A month is the leap month when no principal solar term falls inside
    /// it, i.e. when the Sun's segment at its start repeats the previous
    /// month's.  The scan is a fixed sweep over the at most 13 candidate
    /// months of one lunisolar year; the first repeated segment wins, and
    /// the bound itself is returned if none repeats.
    pub fn leap_month_offset(&self, month11: i64) -> u32 {
        let k = nearest_new_moon_index(month11);
        let segment: [u32; 14] = std::array::from_fn(|i| {
            self.sun_longitude_segment(self.new_moon_day(k + i as i64 + 1))
        });
        match segment.windows(2).position(|pair| pair[0] == pair[1]) {
            Some(i) => i as u32 + 1,
            None => 13,
        }
    }
}
