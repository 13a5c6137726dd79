use std::{cmp::Ordering, fmt, iter::FusedIterator, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, ChronologyMismatchError, ParseError, RANGE_SEPARATOR};

/// An inclusive range of dates of one chronology.
/// The start date must be less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: CalendarDate,
    end: CalendarDate,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: CalendarDate, end: CalendarDate },

    /// Start and end belong to different chronologies.
    #[error(transparent)]
    Mismatch(#[from] ChronologyMismatchError),
}

impl DateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::Mismatch` if the dates belong to different chronologies
    /// and `RangeError::InvalidRange` if start > end.
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, RangeError> {
        if start.try_cmp(&end)? == Ordering::Greater {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the start date of the range
    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    /// Returns the end date of the range
    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    /// Number of days in the range, counting both ends
    pub fn length_in_days(&self) -> i64 {
        self.end.to_epoch_day().get() - self.start.to_epoch_day().get() + 1
    }

    /// Checks if the range contains a given date.
    ///
    /// # Errors
    /// Returns `ChronologyMismatchError` if `date` belongs to another chronology.
    pub fn contains(&self, date: &CalendarDate) -> Result<bool, ChronologyMismatchError> {
        Ok(not_after(&self.start, date)? && not_after(date, &self.end)?)
    }

    /// Checks if this range shares at least one day with another range.
    ///
    /// # Errors
    /// Returns `ChronologyMismatchError` if the ranges belong to different chronologies.
    pub fn overlaps(&self, other: &Self) -> Result<bool, ChronologyMismatchError> {
        Ok(not_after(&self.start, &other.end)? && not_after(&other.start, &self.end)?)
    }

    /// Checks if this range is completely contained within another range.
    ///
    /// # Errors
    /// Returns `ChronologyMismatchError` if the ranges belong to different chronologies.
    pub fn is_within(&self, other: &Self) -> Result<bool, ChronologyMismatchError> {
        Ok(not_after(&other.start, &self.start)? && not_after(&self.end, &other.end)?)
    }

    /// Iterates over every day of the range in order
    pub fn iter(&self) -> Days {
        Days {
            next: Some(self.start),
            end: self.end,
        }
    }
}

fn not_after(a: &CalendarDate, b: &CalendarDate) -> Result<bool, ChronologyMismatchError> {
    Ok(a.try_cmp(b)? != Ordering::Greater)
}

impl IntoIterator for DateRange {
    type Item = CalendarDate;
    type IntoIter = Days;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the days of a [`DateRange`].
#[derive(Debug, Clone)]
pub struct Days {
    next: Option<CalendarDate>,
    end: CalendarDate,
}

impl Iterator for Days {
    type Item = CalendarDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current == self.end {
            None
        } else {
            current.plus_days(1).ok()
        };
        Some(current)
    }
}

impl FusedIterator for Days {}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{RANGE_SEPARATOR}{}", self.start, self.end)
    }
}

impl FromStr for DateRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(ParseError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    ParseError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;

                let start = start_str.parse::<CalendarDate>()?;
                let end = end_str.parse::<CalendarDate>()?;

                Self::new(start, end).map_err(|err| match err {
                    RangeError::InvalidRange { start, end } => ParseError::InvertedRange {
                        start: start.to_string(),
                        end: end.to_string(),
                    },
                    RangeError::Mismatch(mismatch) => ParseError::Range(mismatch),
                })
            },
            _ => Err(ParseError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
