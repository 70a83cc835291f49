// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Solar ↔ lunar conversion and anniversary projection.
//!
//! The converters are thin searches over [`LunarYearTable`]s: pick the
//! anchor year whose table spans the requested day or month, then read the
//! entry off.  Everything is a pure function of its inputs; results are
//! rebuilt on every call and safe to memoize caller-side.
//!
//! [`LunarYearTable`]: crate::LunarYearTable

use crate::boundary::Calendar;
use crate::date::SolarDate;
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A date on the lunisolar calendar.
///
/// `year` is the conventional lunar year: it changes at the month-1 new
/// moon (Tết), not at the month-11 anchor, and is labelled by the solar
/// year the lunar year begins in.  `leap` marks a day inside the inserted
/// leap month, which repeats the `month` number of the month before it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub leap: bool,
}

impl LunarDate {
    /// A day of a regular (non-leap) lunar month.
    #[inline]
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day, leap: false }
    }

    /// A day of the leap month with the given number.
    #[inline]
    pub const fn new_leap(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day, leap: true }
    }
}

impl Ord for LunarDate {
    /// Chronological order for dates of one civil calendar: within a lunar
    /// year the months run 1–12, and the leap month sorts directly after
    /// the common month whose number it repeats.
    fn cmp(&self, other: &Self) -> Ordering {
        let key = |d: &Self| (d.year, 2 * d.month + u32::from(d.leap), d.day);
        key(self).cmp(&key(other))
    }
}

impl PartialOrd for LunarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for LunarDate {
    /// `YYYY-MM-DD` with an `L` marking the leap month: `2023-02L-01`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}{}-{:02}",
            self.year,
            self.month,
            if self.leap { "L" } else { "" },
            self.day
        )
    }
}

impl Calendar {
    /// Lunar date of a civil solar date.
    ///
    /// # Example
    ///
    /// ```
    /// use lunisol::{Calendar, LunarDate, SolarDate};
    ///
    /// let lunar = Calendar::VIETNAM.solar_to_lunar(SolarDate::new(2000, 1, 1).unwrap());
    /// assert_eq!(LunarDate::new(1999, 11, 25), lunar);
    /// ```
    pub fn solar_to_lunar(&self, date: SolarDate) -> LunarDate {
        let jdn = date.jdn();
        // Days from the month-11 boundary onwards belong to the lunisolar
        // year that closes at the *next* solar year's month 11.
        let anchor = if jdn >= self.month11_start(date.year) {
            date.year + 1
        } else {
            date.year
        };
        let table = self.year_table(anchor);
        let (month, day) = table
            .month_containing(jdn)
            .expect("anchor table spans every day of its solar year");
        LunarDate {
            year: if month.number >= 11 { anchor - 1 } else { anchor },
            month: month.number,
            day,
            leap: month.leap,
        }
    }

    /// Solar date of a lunar date, or `None` when that day does not exist
    /// in the given lunar year — the requested leap month is not inserted
    /// that year, or the day number runs past the month's 29 or 30 days.
    ///
    /// `None` also covers malformed requests (month 0, day 0, day 31 …);
    /// callers that need to tell "no such leap month this year" apart from
    /// a malformed request must validate the request shape themselves.
    pub fn lunar_to_solar(&self, lunar: LunarDate) -> Option<SolarDate> {
        if lunar.day == 0 || !(1..=12).contains(&lunar.month) {
            return None;
        }
        // Months 11 and 12 sit at the head of the table anchored one solar
        // year later.
        let anchor = if lunar.month >= 11 { lunar.year + 1 } else { lunar.year };
        let table = self.year_table(anchor);
        let (start, len) = table.month_numbered(lunar.month, lunar.leap)?;
        (lunar.day <= len).then(|| SolarDate::from_jdn(start.new_moon + i64::from(lunar.day) - 1))
    }

    /// Solar date of the lunar anniversary `day`/`month` (regular months
    /// only) that falls in solar year `target_year`.
    ///
    /// Months 11 and 12 of a lunar year spill into the next solar year, so
    /// the lookup is tried against both candidate lunar years and the one
    /// landing inside `target_year` wins.  When neither lands there, the
    /// answer for lunar year `target_year` is returned as-is — `None` when
    /// the day does not exist (e.g. day 30 of a 29-day month), or the
    /// spill date in the following January for a 30-day month 12.  Callers
    /// projecting a recurring event over several years should skip `None`s.
    ///
    /// # Example
    ///
    /// ```
    /// use lunisol::{Calendar, SolarDate};
    ///
    /// let tet = Calendar::VIETNAM.lunar_anniversary(1, 1, 2025);
    /// assert_eq!(SolarDate::new(2025, 1, 29), tet);
    /// ```
    pub fn lunar_anniversary(&self, day: u32, month: u32, target_year: i32) -> Option<SolarDate> {
        let direct = self.lunar_to_solar(LunarDate::new(target_year, month, day));
        if direct.map(|d| d.year) == Some(target_year) {
            return direct;
        }
        let previous = self.lunar_to_solar(LunarDate::new(target_year - 1, month, day));
        if previous.map(|d| d.year) == Some(target_year) {
            previous
        } else {
            direct
        }
    }
}

// ---------------------------------------------------------------------------
// Crate-level surface, bound to the Vietnamese calendar
// ---------------------------------------------------------------------------

/// [`Calendar::solar_to_lunar`] on [`Calendar::VIETNAM`].
pub fn solar_to_lunar(date: SolarDate) -> LunarDate {
    Calendar::VIETNAM.solar_to_lunar(date)
}

/// [`Calendar::lunar_to_solar`] on [`Calendar::VIETNAM`].
pub fn lunar_to_solar(lunar: LunarDate) -> Option<SolarDate> {
    Calendar::VIETNAM.lunar_to_solar(lunar)
}

/// [`Calendar::lunar_anniversary`] on [`Calendar::VIETNAM`].
pub fn lunar_anniversary(day: u32, month: u32, target_year: i32) -> Option<SolarDate> {
    Calendar::VIETNAM.lunar_anniversary(day, month, target_year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solar(year: i32, month: u32, day: u32) -> SolarDate {
        SolarDate::new(year, month, day).unwrap()
    }

    #[test]
    fn tet_2024_both_directions() {
        assert_eq!(LunarDate::new(2024, 1, 1), solar_to_lunar(solar(2024, 2, 10)));
        assert_eq!(
            Some(solar(2024, 2, 10)),
            lunar_to_solar(LunarDate::new(2024, 1, 1))
        );
    }

    #[test]
    fn tet_2023_both_directions() {
        assert_eq!(LunarDate::new(2023, 1, 1), solar_to_lunar(solar(2023, 1, 22)));
        assert_eq!(
            Some(solar(2023, 1, 22)),
            lunar_to_solar(LunarDate::new(2023, 1, 1))
        );
    }

    #[test]
    fn months_eleven_and_twelve_belong_to_the_closing_year() {
        assert_eq!(LunarDate::new(1999, 11, 25), solar_to_lunar(solar(2000, 1, 1)));
        // New Year's Eve 2024 is still a month-11 day of lunar 2024.
        assert_eq!(LunarDate::new(2024, 11, 30), solar_to_lunar(solar(2024, 12, 30)));
        assert_eq!(LunarDate::new(2024, 12, 1), solar_to_lunar(solar(2024, 12, 31)));
    }

    #[test]
    fn leap_month_days_carry_the_flag() {
        // 2017 inserted a leap month 6 starting July 23.
        assert_eq!(LunarDate::new(2017, 6, 29), solar_to_lunar(solar(2017, 7, 22)));
        assert_eq!(LunarDate::new_leap(2017, 6, 1), solar_to_lunar(solar(2017, 7, 23)));
        // 2023 inserted a leap month 2 starting March 22.
        assert_eq!(LunarDate::new_leap(2023, 2, 1), solar_to_lunar(solar(2023, 3, 22)));
        assert_eq!(
            Some(solar(2023, 3, 22)),
            lunar_to_solar(LunarDate::new_leap(2023, 2, 1))
        );
    }

    #[test]
    fn absent_leap_month_is_none() {
        // Lunar 2023's leap month is month 2, not month 4.
        assert_eq!(None, lunar_to_solar(LunarDate::new_leap(2023, 4, 1)));
        // Lunar 2024 has no leap month at all.
        assert_eq!(None, lunar_to_solar(LunarDate::new_leap(2024, 1, 1)));
    }

    #[test]
    fn days_past_the_month_length_are_none() {
        // Month 12 of lunar 2024 has 29 days; Tết 2025 follows on Jan 29.
        assert_eq!(
            Some(solar(2025, 1, 28)),
            lunar_to_solar(LunarDate::new(2024, 12, 29))
        );
        assert_eq!(None, lunar_to_solar(LunarDate::new(2024, 12, 30)));
    }

    #[test]
    fn malformed_requests_are_none() {
        assert_eq!(None, lunar_to_solar(LunarDate::new(2024, 0, 1)));
        assert_eq!(None, lunar_to_solar(LunarDate::new(2024, 13, 1)));
        assert_eq!(None, lunar_to_solar(LunarDate::new(2024, 1, 0)));
        assert_eq!(None, lunar_to_solar(LunarDate::new(2024, 1, 31)));
    }

    #[test]
    fn mid_autumn_2024() {
        assert_eq!(LunarDate::new(2024, 8, 15), solar_to_lunar(solar(2024, 9, 17)));
    }

    #[test]
    fn anniversary_lands_in_the_requested_solar_year() {
        assert_eq!(Some(solar(2025, 1, 29)), lunar_anniversary(1, 1, 2025));
        // 23rd of month 12 ("ông Táo") for 2025 resolves through lunar
        // year 2024.
        assert_eq!(Some(solar(2025, 1, 22)), lunar_anniversary(23, 12, 2025));
    }

    #[test]
    fn anniversary_skips_years_without_the_day() {
        // Month 12 of lunar 2024 and of lunar 2025 both have 29 days.
        assert_eq!(None, lunar_anniversary(30, 12, 2025));
        // Month 12 of lunar 2022 has 30, so the 2023 occurrence exists.
        assert_eq!(Some(solar(2023, 1, 21)), lunar_anniversary(30, 12, 2023));
    }

    #[test]
    fn ordering_interleaves_the_leap_month() {
        let mut dates = [
            LunarDate::new(2023, 3, 1),
            LunarDate::new_leap(2023, 2, 1),
            LunarDate::new(2023, 2, 29),
            LunarDate::new(2023, 2, 1),
        ];
        dates.sort();
        assert_eq!(
            [
                LunarDate::new(2023, 2, 1),
                LunarDate::new(2023, 2, 29),
                LunarDate::new_leap(2023, 2, 1),
                LunarDate::new(2023, 3, 1),
            ],
            dates
        );
    }

    #[test]
    fn display_marks_leap_months() {
        assert_eq!("2024-01-01", LunarDate::new(2024, 1, 1).to_string());
        assert_eq!("2023-02L-15", LunarDate::new_leap(2023, 2, 15).to_string());
    }
}
