//! Calendar system policies.
//!
//! A [`Chronology`] is the single source of truth for a calendar system's leap
//! rule, month lengths and supported year span. Implementations are immutable
//! `'static` singletons shared freely between threads.

use crate::consts::{
    CENTURY_CYCLE, DAYS_0001_TO_1970, DAYS_IN_COMMON_YEAR, DAYS_IN_LEAP_YEAR, DAYS_PER_GREGORIAN_CYCLE,
    FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, IFC_CLOSING_MONTH_DAYS, IFC_CLOSING_MONTH_DAYS_LEAP,
    IFC_DAYS_IN_STANDARD_MONTH, IFC_MONTHS_PER_YEAR, ISO_DAYS_IN_MONTH, ISO_MONTHS_PER_YEAR, LEAP_YEAR_CYCLE,
    MAX_YEAR, MIN_DAY, MIN_MONTH, MIN_YEAR,
};
use crate::error::InvalidFieldError;
use crate::types::{FieldKind, FieldTable, ValueRange};
use std::fmt;

/// Mean year length expressed as whole days over whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeapCycle {
    pub days: i64,
    pub years: i64,
}

impl LeapCycle {
    /// 146 097 days every 400 years
    pub const GREGORIAN: Self = Self {
        days: DAYS_PER_GREGORIAN_CYCLE,
        years: GREGORIAN_CYCLE as i64,
    };
}

/// A calendar system policy.
pub trait Chronology: fmt::Debug + Send + Sync {
    /// Stable identifier, also the identity used for equality between dates.
    fn id(&self) -> &'static str;

    /// Context-free field ranges, built once when the chronology is defined.
    fn field_table(&self) -> &FieldTable;

    fn months_per_year(&self) -> u8;

    /// Must be total over `i32`: far-past and far-future years never panic.
    fn is_leap_year(&self, year: i32) -> bool;

    /// Length of `month` in `year`. Months outside `1..=months_per_year` yield 0.
    fn month_length(&self, year: i32, month: u8) -> u8;

    /// Epoch day of the first day of `year`, in closed form.
    fn year_start(&self, year: i64) -> i64;

    fn leap_cycle(&self) -> LeapCycle {
        LeapCycle::GREGORIAN
    }

    /// Number of days in `month` of `year`.
    ///
    /// # Errors
    /// Returns `InvalidFieldError` if `month` is outside `1..=months_per_year`.
    fn days_in_month(&self, year: i32, month: u8) -> Result<u8, InvalidFieldError> {
        self.range_of_field(FieldKind::Month)
            .check(FieldKind::Month, i64::from(month))?;
        Ok(self.month_length(year, month))
    }

    fn days_in_year(&self, year: i32) -> u16 {
        (MIN_MONTH..=self.months_per_year())
            .map(|month| u16::from(self.month_length(year, month)))
            .sum()
    }

    /// Context-free range of `field`. For [`FieldKind::Day`] this is the
    /// largest day of any month in any year.
    fn range_of_field(&self, field: FieldKind) -> ValueRange {
        self.field_table().range(field)
    }

    fn year_range(&self) -> ValueRange {
        self.range_of_field(FieldKind::Year)
    }
}

/// Whether two chronology references denote the same calendar system.
pub fn same_chronology(a: &dyn Chronology, b: &dyn Chronology) -> bool {
    a.id() == b.id()
}

/// Looks up one of the bundled chronologies by its id (case-insensitive).
pub fn by_id(id: &str) -> Option<&'static dyn Chronology> {
    available().into_iter().find(|chronology| chronology.id().eq_ignore_ascii_case(id))
}

/// Every chronology bundled with this crate
pub fn available() -> [&'static dyn Chronology; 2] {
    [&INTERNATIONAL_FIXED, &ISO]
}

// Gregorian helpers shared by both bundled chronologies

pub(crate) const fn is_gregorian_leap_year(year: i32) -> bool {
    (year.rem_euclid(LEAP_YEAR_CYCLE) == 0 && year.rem_euclid(CENTURY_CYCLE) != 0)
        || year.rem_euclid(GREGORIAN_CYCLE) == 0
}

pub(crate) const fn gregorian_year_start(year: i64) -> i64 {
    let prior = year.saturating_sub(1);
    let leap_days = prior.div_euclid(LEAP_YEAR_CYCLE as i64) - prior.div_euclid(CENTURY_CYCLE as i64)
        + prior.div_euclid(GREGORIAN_CYCLE as i64);
    (DAYS_IN_COMMON_YEAR as i64)
        .saturating_mul(prior)
        .saturating_add(leap_days)
        .saturating_sub(DAYS_0001_TO_1970)
}

/// The International Fixed calendar: thirteen months of 28 days, the last
/// month stretched to 29 days (30 in leap years). Years begin on the same day
/// as the Gregorian year and share its leap cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InternationalFixed;

/// The International Fixed chronology singleton
pub static INTERNATIONAL_FIXED: InternationalFixed = InternationalFixed;

const IFC_FIELDS: FieldTable = FieldTable {
    year: ValueRange::new(MIN_YEAR as i64, MAX_YEAR as i64),
    month: ValueRange::new(MIN_MONTH as i64, IFC_MONTHS_PER_YEAR as i64),
    day: ValueRange::new(MIN_DAY as i64, IFC_CLOSING_MONTH_DAYS_LEAP as i64),
    day_of_year: ValueRange::new(1, DAYS_IN_LEAP_YEAR as i64),
};

impl Chronology for InternationalFixed {
    fn id(&self) -> &'static str {
        "Ifc"
    }

    fn field_table(&self) -> &FieldTable {
        &IFC_FIELDS
    }

    fn months_per_year(&self) -> u8 {
        IFC_MONTHS_PER_YEAR
    }

    fn is_leap_year(&self, year: i32) -> bool {
        is_gregorian_leap_year(year)
    }

    fn month_length(&self, year: i32, month: u8) -> u8 {
        match month {
            1..IFC_MONTHS_PER_YEAR => IFC_DAYS_IN_STANDARD_MONTH,
            IFC_MONTHS_PER_YEAR if self.is_leap_year(year) => IFC_CLOSING_MONTH_DAYS_LEAP,
            IFC_MONTHS_PER_YEAR => IFC_CLOSING_MONTH_DAYS,
            _ => 0,
        }
    }

    fn year_start(&self, year: i64) -> i64 {
        gregorian_year_start(year)
    }

    fn days_in_year(&self, year: i32) -> u16 {
        if self.is_leap_year(year) {
            DAYS_IN_LEAP_YEAR
        } else {
            DAYS_IN_COMMON_YEAR
        }
    }
}

/// The proleptic ISO-8601 (Gregorian) calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Iso;

/// The ISO chronology singleton
pub static ISO: Iso = Iso;

const ISO_FIELDS: FieldTable = FieldTable {
    year: ValueRange::new(MIN_YEAR as i64, MAX_YEAR as i64),
    month: ValueRange::new(MIN_MONTH as i64, ISO_MONTHS_PER_YEAR as i64),
    day: ValueRange::new(MIN_DAY as i64, 31),
    day_of_year: ValueRange::new(1, DAYS_IN_LEAP_YEAR as i64),
};

impl Chronology for Iso {
    fn id(&self) -> &'static str {
        "ISO"
    }

    fn field_table(&self) -> &FieldTable {
        &ISO_FIELDS
    }

    fn months_per_year(&self) -> u8 {
        ISO_MONTHS_PER_YEAR
    }

    fn is_leap_year(&self, year: i32) -> bool {
        is_gregorian_leap_year(year)
    }

    fn month_length(&self, year: i32, month: u8) -> u8 {
        match month {
            FEBRUARY if self.is_leap_year(year) => FEBRUARY_DAYS_LEAP,
            1..=ISO_MONTHS_PER_YEAR => ISO_DAYS_IN_MONTH[month as usize],
            _ => 0,
        }
    }

    fn year_start(&self, year: i64) -> i64 {
        gregorian_year_start(year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year: i32,
            is_leap: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year: 2024,
                is_leap: true,
                description: "divisible by 4",
            },
            TestCase {
                year: 2023,
                is_leap: false,
                description: "not divisible by 4",
            },
            TestCase {
                year: 1900,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2000,
                is_leap: true,
                description: "divisible by 400",
            },
            TestCase {
                year: 0,
                is_leap: true,
                description: "proleptic year zero",
            },
            TestCase {
                year: -4,
                is_leap: true,
                description: "negative divisible by 4",
            },
            TestCase {
                year: -1,
                is_leap: false,
                description: "negative not divisible by 4",
            },
            TestCase {
                year: -100,
                is_leap: false,
                description: "negative century",
            },
            TestCase {
                year: -400,
                is_leap: true,
                description: "negative divisible by 400",
            },
        ];

        for case in &cases {
            assert_eq!(
                INTERNATIONAL_FIXED.is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
            assert_eq!(ISO.is_leap_year(case.year), case.is_leap, "ISO year {}", case.year);
        }
    }

    #[test]
    fn test_is_leap_year_total_over_i32() {
        // i32::MIN is divisible by 4 but not by 100, i32::MAX is odd
        assert!(INTERNATIONAL_FIXED.is_leap_year(i32::MIN));
        assert!(!INTERNATIONAL_FIXED.is_leap_year(i32::MAX));
    }

    #[test]
    fn test_ifc_days_in_month() {
        for month in 1..=12 {
            assert_eq!(INTERNATIONAL_FIXED.days_in_month(2023, month), Ok(28), "month {month}");
            assert_eq!(INTERNATIONAL_FIXED.days_in_month(2024, month), Ok(28), "month {month}");
        }
        assert_eq!(INTERNATIONAL_FIXED.days_in_month(2023, 13), Ok(29));
        assert_eq!(INTERNATIONAL_FIXED.days_in_month(2024, 13), Ok(30));
    }

    #[test]
    fn test_days_in_month_rejects_bad_month() {
        let err = INTERNATIONAL_FIXED.days_in_month(2024, 14).unwrap_err();
        assert_eq!(
            err,
            InvalidFieldError {
                field: FieldKind::Month,
                value: 14,
                min: 1,
                max: 13
            }
        );
        assert!(INTERNATIONAL_FIXED.days_in_month(2024, 0).is_err());
        assert!(ISO.days_in_month(2024, 13).is_err());
        assert_eq!(INTERNATIONAL_FIXED.month_length(2024, 14), 0);
    }

    #[test]
    fn test_iso_days_in_month() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12 {
            assert_eq!(
                ISO.days_in_month(2023, month),
                Ok(expected[month as usize]),
                "Month {month} has incorrect day count"
            );
        }
        assert_eq!(ISO.days_in_month(2024, 2), Ok(29));
        assert_eq!(ISO.days_in_month(1900, 2), Ok(28), "Century year not divisible by 400");
    }

    #[test]
    fn test_days_in_year_matches_leap_rule() {
        for year in [-400, -101, -1, 0, 1, 1900, 1969, 1970, 2000, 2024, MAX_YEAR, MIN_YEAR] {
            for chronology in available() {
                let expected = if chronology.is_leap_year(year) { 366 } else { 365 };
                assert_eq!(chronology.days_in_year(year), expected, "{} {year}", chronology.id());
            }
        }
    }

    #[test]
    fn test_ifc_closed_form_days_in_year_matches_sum() {
        for year in 1990..2030 {
            let summed: u16 = (1..=13)
                .map(|month| u16::from(INTERNATIONAL_FIXED.month_length(year, month)))
                .sum();
            assert_eq!(INTERNATIONAL_FIXED.days_in_year(year), summed);
        }
    }

    #[test]
    fn test_range_of_field() {
        assert_eq!(
            INTERNATIONAL_FIXED.range_of_field(FieldKind::Year),
            ValueRange::new(-999_998, 999_999)
        );
        assert_eq!(INTERNATIONAL_FIXED.range_of_field(FieldKind::Month), ValueRange::new(1, 13));
        assert_eq!(INTERNATIONAL_FIXED.range_of_field(FieldKind::Day), ValueRange::new(1, 30));
        assert_eq!(
            INTERNATIONAL_FIXED.range_of_field(FieldKind::DayOfYear),
            ValueRange::new(1, 366)
        );
        assert_eq!(ISO.range_of_field(FieldKind::Month), ValueRange::new(1, 12));
        assert_eq!(ISO.range_of_field(FieldKind::Day), ValueRange::new(1, 31));
    }

    #[test]
    fn test_year_start_known_values() {
        assert_eq!(gregorian_year_start(1970), 0);
        assert_eq!(gregorian_year_start(1969), -365);
        assert_eq!(gregorian_year_start(1971), 365);
        assert_eq!(gregorian_year_start(2000), 10_957);
        assert_eq!(gregorian_year_start(1), -719_162);
        assert_eq!(gregorian_year_start(0), -719_528);
    }

    #[test]
    fn test_year_start_steps_by_days_in_year() {
        for year in -1000..1000 {
            let step = gregorian_year_start(i64::from(year) + 1) - gregorian_year_start(i64::from(year));
            assert_eq!(step, i64::from(INTERNATIONAL_FIXED.days_in_year(year)), "year {year}");
        }
    }

    #[test]
    fn test_by_id() {
        assert_eq!(by_id("Ifc").map(Chronology::id), Some("Ifc"));
        assert_eq!(by_id("ifc").map(Chronology::id), Some("Ifc"));
        assert_eq!(by_id("ISO").map(Chronology::id), Some("ISO"));
        assert!(by_id("Julian").is_none());
    }

    #[test]
    fn test_same_chronology() {
        assert!(same_chronology(&INTERNATIONAL_FIXED, &InternationalFixed));
        assert!(!same_chronology(&INTERNATIONAL_FIXED, &ISO));
    }
}
