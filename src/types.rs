use crate::error::InvalidFieldError;
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The calendar fields a chronology knows how to validate.
///
/// Variants are declared in canonical (coarsest first) order, which is the order
/// partial dates apply their fields in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum FieldKind {
    #[display(fmt = "Year")]
    Year,
    #[display(fmt = "MonthOfYear")]
    Month,
    #[display(fmt = "DayOfMonth")]
    Day,
    #[display(fmt = "DayOfYear")]
    DayOfYear,
}

impl FieldKind {
    /// All fields in canonical order
    pub const ALL: [Self; 4] = [Self::Year, Self::Month, Self::Day, Self::DayOfYear];
}

/// An inclusive `[min, max]` range of legal values for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueRange {
    min: i64,
    max: i64,
}

impl ValueRange {
    /// Creates a new range. `min` must not exceed `max`.
    pub const fn new(min: i64, max: i64) -> Self {
        debug_assert!(min <= max);
        Self { min, max }
    }

    #[inline]
    pub const fn min(self) -> i64 {
        self.min
    }

    #[inline]
    pub const fn max(self) -> i64 {
        self.max
    }

    #[inline]
    pub const fn contains(self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Checks `value` against the range, reporting `field` on failure.
    ///
    /// # Errors
    /// Returns `InvalidFieldError` if `value` lies outside the range.
    pub const fn check(self, field: FieldKind, value: i64) -> Result<i64, InvalidFieldError> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(InvalidFieldError {
                field,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}

/// Days since 1970-01-01 in the proleptic Gregorian calendar.
///
/// This is the interchange value between chronologies and between this crate and
/// any other date library.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Deref, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EpochDay(i64);

impl EpochDay {
    /// 1970-01-01
    pub const UNIX_EPOCH: Self = Self(0);

    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw day count
    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Adds `days`, stopping at the `i64` bounds
    pub const fn saturating_add(self, days: i64) -> Self {
        Self(self.0.saturating_add(days))
    }
}

/// Context-free ranges for every field of a chronology, built once as a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTable {
    pub year: ValueRange,
    pub month: ValueRange,
    pub day: ValueRange,
    pub day_of_year: ValueRange,
}

impl FieldTable {
    pub const fn range(&self, field: FieldKind) -> ValueRange {
        match field {
            FieldKind::Year => self.year,
            FieldKind::Month => self.month,
            FieldKind::Day => self.day,
            FieldKind::DayOfYear => self.day_of_year,
        }
    }
}
