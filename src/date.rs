// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil (solar) calendar dates and their Julian Day Numbers.
//!
//! [`SolarDate`] is a plain `{year, month, day}` value on the historical
//! civil calendar: Gregorian from 1582-10-15 onwards, Julian before.  The
//! integer JDN is the interchange value the rest of the crate works in —
//! day `N` is the civil day whose local noon falls on Julian Day `N.0`,
//! and consecutive days differ by exactly 1.

use chrono::{Datelike, NaiveDate};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// First day of the Gregorian calendar (1582-10-15) as a JDN.
pub const GREGORIAN_REFORM_JDN: i64 = 2_299_161;

/// JDN of the day before 0001-01-01 proleptic Gregorian; the offset
/// between chrono's `num_days_from_ce` count and JDNs.
const JDN_BEFORE_CE: i64 = 1_721_425;

/// A date on the civil solar calendar.
///
/// The derived ordering is chronological (`year`, then `month`, then
/// `day`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl SolarDate {
    /// Creates a date, checking that it exists on the civil calendar.
    ///
    /// Rejects out-of-range components, day numbers past the end of the
    /// month, and the ten days removed by the Gregorian reform
    /// (1582-10-05 … 1582-10-14).
    ///
    /// # Example
    ///
    /// ```
    /// use lunisol::SolarDate;
    ///
    /// assert!(SolarDate::new(2024, 2, 29).is_some());
    /// assert!(SolarDate::new(2023, 2, 29).is_none());
    /// assert!(SolarDate::new(1582, 10, 10).is_none());
    /// ```
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        let date = Self { year, month, day };
        // `jdn` is total even for nonsense like February 30; a date is
        // real exactly when the mapping round-trips.
        (Self::from_jdn(date.jdn()) == date).then_some(date)
    }

    /// Julian Day Number of this date.
    ///
    /// Gregorian rules apply whenever they place the date on or after the
    /// 1582 reform, Julian rules otherwise.  Total over any `i32` year;
    /// day-level accuracy guarantees elsewhere in the crate only cover
    /// 1900–2100.
    pub fn jdn(&self) -> i64 {
        let (d, m0, y0) = (self.day as i64, self.month as i64, self.year as i64);
        let a = (14 - m0).div_euclid(12);
        let y = y0 + 4800 - a;
        let m = m0 + 12 * a - 3;
        let jd = d + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4)
            - y.div_euclid(100)
            + y.div_euclid(400)
            - 32_045;
        if jd < GREGORIAN_REFORM_JDN {
            d + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - 32_083
        } else {
            jd
        }
    }

    /// Date of a Julian Day Number; inverse of [`SolarDate::jdn`].
    pub fn from_jdn(jdn: i64) -> Self {
        let (b, c) = if jdn >= GREGORIAN_REFORM_JDN {
            let a = jdn + 32_044;
            let b = (4 * a + 3).div_euclid(146_097);
            (b, a - (b * 146_097).div_euclid(4))
        } else {
            (0, jdn + 32_082)
        };
        let d = (4 * c + 3).div_euclid(1461);
        let e = c - (1461 * d).div_euclid(4);
        let m = (5 * e + 2).div_euclid(153);
        SolarDate {
            year: (b * 100 + d - 4800 + m.div_euclid(10)) as i32,
            month: (m + 3 - 12 * m.div_euclid(10)) as u32,
            day: (e - (153 * m + 2).div_euclid(5) + 1) as u32,
        }
    }

    /// The same instant as a chrono [`NaiveDate`] (proleptic Gregorian).
    ///
    /// The bridge goes through the JDN, so pre-reform dates are relabelled
    /// onto the proleptic Gregorian calendar rather than copied digit by
    /// digit.  `None` outside chrono's representable range.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        i32::try_from(self.jdn() - JDN_BEFORE_CE)
            .ok()
            .and_then(NaiveDate::from_num_days_from_ce_opt)
    }
}

impl From<NaiveDate> for SolarDate {
    fn from(date: NaiveDate) -> Self {
        Self::from_jdn(i64::from(date.num_days_from_ce()) + JDN_BEFORE_CE)
    }
}

impl fmt::Display for SolarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}
