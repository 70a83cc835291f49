// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Month tables for one lunisolar year.
//!
//! A lunisolar year runs from lunar month 11 to the next lunar month 11,
//! because month 11 — the winter-solstice month — is the one boundary that
//! can be located without already knowing the year's layout.  The table
//! for *anchor* year `Y` therefore spans month 11 of `Y − 1` up to month
//! 11 of `Y`: 13 boundaries for a common year, 14 when a leap month is
//! inserted.  The final entry is the anchor's own month-11 boundary and
//! only closes the last month's day range.

use crate::boundary::{nearest_new_moon_index, Calendar};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One month boundary: the local day its new moon falls on, the
/// conventional month number (1–12) and whether it is the inserted leap
/// month.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LunarMonth {
    pub new_moon: i64,
    pub number: u32,
    pub leap: bool,
}

/// Ordered month boundaries spanning one lunisolar year.
///
/// Invariants: `new_moon` values are strictly increasing, consecutive
/// boundaries are 29 or 30 days apart, and at most one entry is a leap
/// month.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LunarYearTable {
    anchor: i32,
    months: Vec<LunarMonth>,
}

impl Calendar {
    /// Builds the month table for the lunisolar year ending at month 11 of
    /// solar year `anchor`.
    pub fn year_table(&self, anchor: i32) -> LunarYearTable {
        let a = self.month11_start(anchor - 1);
        let b = self.month11_start(anchor);
        // Twelve regular months span ~354 days; anything longer holds a
        // thirteenth.
        let leap_at = (b - a > 365).then(|| self.leap_month_offset(a));
        let k = nearest_new_moon_index(a);
        let count = if leap_at.is_some() { 14 } else { 13 };
        let months: Vec<LunarMonth> = (0..count)
            .map(|i| LunarMonth {
                new_moon: self.new_moon_day(k + i64::from(i)),
                number: month_number(i, leap_at),
                leap: leap_at == Some(i),
            })
            .collect();
        debug_assert_eq!(a, months[0].new_moon);
        debug_assert_eq!(b, months[count as usize - 1].new_moon);
        LunarYearTable { anchor, months }
    }
}

/// Conventional number of the i-th month counted from the opening month
/// 11; the leap month repeats its predecessor's number.
fn month_number(i: u32, leap_at: Option<u32>) -> u32 {
    match leap_at {
        Some(leap) if i >= leap => (i + 9) % 12 + 1,
        _ => (i + 10) % 12 + 1,
    }
}

impl LunarYearTable {
    /// The solar year whose month 11 closes this table.
    #[inline]
    pub fn anchor(&self) -> i32 {
        self.anchor
    }

    /// All month boundaries, oldest first.
    #[inline]
    pub fn months(&self) -> &[LunarMonth] {
        &self.months
    }

    /// Whether this lunisolar year contains a leap month.
    #[inline]
    pub fn is_leap_year(&self) -> bool {
        self.months.len() == 14
    }

    /// The inserted leap month, if any.
    pub fn leap_month(&self) -> Option<&LunarMonth> {
        self.months.iter().find(|m| m.leap)
    }

    /// Month containing local day `jdn` together with the 1-based lunar
    /// day of month, or `None` when the day falls outside the table's
    /// span.
    pub fn month_containing(&self, jdn: i64) -> Option<(&LunarMonth, u32)> {
        let first = self.months.first()?.new_moon;
        let last = self.months.last()?.new_moon;
        if !(first..last).contains(&jdn) {
            return None;
        }
        let idx = self.months.partition_point(|m| m.new_moon <= jdn) - 1;
        Some((&self.months[idx], (jdn - self.months[idx].new_moon + 1) as u32))
    }

    /// Start boundary and day count of the month with the given number and
    /// leap flag, or `None` when that month does not occur this year.
    pub fn month_numbered(&self, number: u32, leap: bool) -> Option<(&LunarMonth, u32)> {
        let idx = self
            .months
            .iter()
            .position(|m| m.number == number && m.leap == leap)?;
        let next = self.months.get(idx + 1)?;
        Some((&self.months[idx], (next.new_moon - self.months[idx].new_moon) as u32))
    }
}
