// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Vietnamese sexagenary (Can Chi) year names.

use crate::convert::LunarDate;

/// The ten heavenly stems (thiên can).
pub const CAN: [&str; 10] = [
    "Giáp", "Ất", "Bính", "Đinh", "Mậu", "Kỷ", "Canh", "Tân", "Nhâm", "Quý",
];

/// The twelve earthly branches (địa chi).
pub const CHI: [&str; 12] = [
    "Tý", "Sửu", "Dần", "Mão", "Thìn", "Tỵ", "Ngọ", "Mùi", "Thân", "Dậu", "Tuất", "Hợi",
];

/// Sexagenary name of a lunar year, e.g. `"Giáp Thìn"` for 2024.
///
/// The 60-year cycle is the combination of the 10 stems and 12 branches;
/// year 4 CE opened a cycle, hence the offset.
pub fn year_name(year: i32) -> String {
    let can = CAN[(year - 4).rem_euclid(10) as usize];
    let chi = CHI[(year - 4).rem_euclid(12) as usize];
    format!("{can} {chi}")
}

impl LunarDate {
    /// Sexagenary (Can Chi) name of this date's lunar year.
    pub fn year_name(&self) -> String {
        year_name(self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_year_names() {
        for (year, name) in [
            (1968, "Mậu Thân"),
            (2023, "Quý Mão"),
            (2024, "Giáp Thìn"),
            (2025, "Ất Tỵ"),
            (2026, "Bính Ngọ"),
        ] {
            assert_eq!(name, year_name(year), "{year}");
        }
    }

    #[test]
    fn cycle_repeats_every_sixty_years() {
        for year in 1900..1960 {
            assert_eq!(year_name(year), year_name(year + 60));
        }
    }

    #[test]
    fn lunar_date_exposes_its_year_name() {
        assert_eq!("Giáp Thìn", LunarDate::new(2024, 1, 1).year_name());
    }
}
