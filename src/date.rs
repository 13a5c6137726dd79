use crate::chronology::{self, Chronology, same_chronology};
use crate::clock::ClockSource;
use crate::consts::{CHRONOLOGY_SEPARATOR, DATE_SEPARATOR, MIN_MONTH};
use crate::converter;
use crate::error::{CalendarError, ChronologyMismatchError, DateRangeError, InvalidFieldError, ParseError};
use crate::types::{EpochDay, FieldKind};
use crate::validator;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use tracing::debug;

/// An immutable, always-valid date of one chronology.
///
/// Dates are equal when they share a chronology and the same year, month and day.
/// There is no `PartialOrd`: ordering goes through [`CalendarDate::try_cmp`], which
/// reports a chronology mismatch instead of answering `false`.
#[derive(Debug, Clone, Copy)]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
    chronology: &'static dyn Chronology,
}

impl CalendarDate {
    /// Creates a date, validating year, then month, then day.
    ///
    /// # Errors
    /// Returns `InvalidFieldError` for the first field out of range. Values are
    /// never clamped.
    pub fn of(year: i32, month: u8, day: u8, chronology: &'static dyn Chronology) -> Result<Self, InvalidFieldError> {
        Self::from_fields(i64::from(year), i64::from(month), i64::from(day), chronology)
    }

    pub(crate) fn from_fields(
        year: i64,
        month: i64,
        day: i64,
        chronology: &'static dyn Chronology,
    ) -> Result<Self, InvalidFieldError> {
        let (year, month, day) = validator::validate_date(year, month, day, chronology)?;
        Ok(Self {
            year,
            month,
            day,
            chronology,
        })
    }

    /// Creates the date falling on `epoch_day`.
    ///
    /// # Errors
    /// Returns `DateRangeError` if the day lies outside the supported year span.
    pub fn of_epoch_day(epoch_day: EpochDay, chronology: &'static dyn Chronology) -> Result<Self, DateRangeError> {
        let (year, month, day) = converter::to_calendar_date(epoch_day, chronology)?;
        Ok(Self {
            year,
            month,
            day,
            chronology,
        })
    }

    /// Today's date according to `clock`, in the clock's zone offset.
    ///
    /// # Errors
    /// Returns `DateRangeError` if the clock reads a year outside the supported span.
    pub fn now<C: ClockSource + ?Sized>(clock: &C, chronology: &'static dyn Chronology) -> Result<Self, DateRangeError> {
        let (instant, offset) = clock.now();
        let epoch_day = instant.local_epoch_day(offset);
        debug!(
            chronology = chronology.id(),
            seconds = instant.epoch_seconds(),
            %offset,
            epoch_day = epoch_day.get(),
            "resolving current date"
        );
        Self::of_epoch_day(epoch_day, chronology)
    }

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    pub const fn chronology(&self) -> &'static dyn Chronology {
        self.chronology
    }

    /// One-based position of this day within its year
    pub fn day_of_year(&self) -> u16 {
        let before: u16 = (MIN_MONTH..self.month)
            .map(|month| u16::from(self.chronology.month_length(self.year, month)))
            .sum();
        before + u16::from(self.day)
    }

    /// Value of any field of this date
    pub fn get(&self, field: FieldKind) -> i64 {
        match field {
            FieldKind::Year => i64::from(self.year),
            FieldKind::Month => i64::from(self.month),
            FieldKind::Day => i64::from(self.day),
            FieldKind::DayOfYear => i64::from(self.day_of_year()),
        }
    }

    pub fn is_leap_year(&self) -> bool {
        self.chronology.is_leap_year(self.year)
    }

    pub fn length_of_month(&self) -> u8 {
        self.chronology.month_length(self.year, self.month)
    }

    pub fn length_of_year(&self) -> u16 {
        self.chronology.days_in_year(self.year)
    }

    pub fn to_epoch_day(&self) -> EpochDay {
        converter::epoch_day_of(self.year, self.month, self.day, self.chronology)
    }

    /// Moves `days` forward (or backward when negative).
    ///
    /// # Errors
    /// Returns `DateRangeError` if the result leaves the supported year span.
    pub fn plus_days(&self, days: i64) -> Result<Self, DateRangeError> {
        if days == 0 {
            return Ok(*self);
        }
        Self::of_epoch_day(self.to_epoch_day().saturating_add(days), self.chronology)
    }

    /// Moves `months` proleptic months forward, keeping the day of month.
    ///
    /// # Errors
    /// Returns `CalendarError::DateRange` if the year leaves the supported span and
    /// `CalendarError::InvalidField` if the day does not exist in the target month.
    pub fn plus_months(&self, months: i64) -> Result<Self, CalendarError> {
        if months == 0 {
            return Ok(*self);
        }
        let per_year = i64::from(self.chronology.months_per_year());
        let total = (i64::from(self.year) * per_year + i64::from(self.month - MIN_MONTH)).saturating_add(months);
        let year = total.div_euclid(per_year);
        let month = total.rem_euclid(per_year) + i64::from(MIN_MONTH);
        self.resolve(year, month, i64::from(self.day))
    }

    /// Moves `years` forward, keeping month and day.
    ///
    /// # Errors
    /// Returns `CalendarError::DateRange` if the year leaves the supported span and
    /// `CalendarError::InvalidField` if the day does not exist in the target year.
    pub fn plus_years(&self, years: i64) -> Result<Self, CalendarError> {
        if years == 0 {
            return Ok(*self);
        }
        let year = i64::from(self.year).saturating_add(years);
        self.resolve(year, i64::from(self.month), i64::from(self.day))
    }

    fn resolve(&self, year: i64, month: i64, day: i64) -> Result<Self, CalendarError> {
        if !self.chronology.year_range().contains(year) {
            return Err(converter::range_error(year, self.chronology).into());
        }
        Ok(Self::from_fields(year, month, day, self.chronology)?)
    }

    /// Replaces one field and re-validates the whole date.
    ///
    /// Changing the month or year never clamps the day: day 29 moved to a 28 day
    /// month is an error.
    ///
    /// # Errors
    /// Returns `InvalidFieldError` if the new value, or the resulting date, is invalid.
    pub fn with_field(&self, field: FieldKind, value: i64) -> Result<Self, InvalidFieldError> {
        let (year, month, day) = (i64::from(self.year), i64::from(self.month), i64::from(self.day));
        match field {
            FieldKind::Year => Self::from_fields(value, month, day, self.chronology),
            FieldKind::Month => Self::from_fields(year, value, day, self.chronology),
            FieldKind::Day => Self::from_fields(year, month, value, self.chronology),
            FieldKind::DayOfYear => {
                validator::validate(field, value, Some((self.year, self.month)), self.chronology)?;
                let (month, day) = converter::month_day_of(self.year, value - 1, self.chronology);
                Ok(Self { month, day, ..*self })
            }
        }
    }

    /// # Errors
    /// Returns `InvalidFieldError` if the date does not exist in `year`.
    pub fn with_year(&self, year: i32) -> Result<Self, InvalidFieldError> {
        self.with_field(FieldKind::Year, i64::from(year))
    }

    /// # Errors
    /// Returns `InvalidFieldError` if `month` or the day within it is invalid.
    pub fn with_month(&self, month: u8) -> Result<Self, InvalidFieldError> {
        self.with_field(FieldKind::Month, i64::from(month))
    }

    /// # Errors
    /// Returns `InvalidFieldError` if `day` is not a day of the current month.
    pub fn with_day(&self, day: u8) -> Result<Self, InvalidFieldError> {
        self.with_field(FieldKind::Day, i64::from(day))
    }

    /// # Errors
    /// Returns `InvalidFieldError` if `day_of_year` exceeds the year's length.
    pub fn with_day_of_year(&self, day_of_year: u16) -> Result<Self, InvalidFieldError> {
        self.with_field(FieldKind::DayOfYear, i64::from(day_of_year))
    }

    /// The same day expressed in another chronology.
    ///
    /// # Errors
    /// Returns `DateRangeError` if the day is outside the target's supported span.
    pub fn with_chronology(&self, chronology: &'static dyn Chronology) -> Result<Self, DateRangeError> {
        Self::of_epoch_day(self.to_epoch_day(), chronology)
    }

    /// Signed number of days from `self` to `other`.
    ///
    /// # Errors
    /// Returns `ChronologyMismatchError` if the dates belong to different chronologies.
    pub fn days_until(&self, other: &Self) -> Result<i64, ChronologyMismatchError> {
        self.ensure_same_chronology(other)?;
        Ok(other.to_epoch_day().get() - self.to_epoch_day().get())
    }

    /// Orders two dates of the same chronology.
    ///
    /// # Errors
    /// Returns `ChronologyMismatchError` if the dates belong to different chronologies.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, ChronologyMismatchError> {
        self.ensure_same_chronology(other)?;
        Ok(self.key().cmp(&other.key()))
    }

    pub(crate) fn ensure_same_chronology(&self, other: &Self) -> Result<(), ChronologyMismatchError> {
        if same_chronology(self.chronology, other.chronology) {
            Ok(())
        } else {
            Err(ChronologyMismatchError {
                expected: self.chronology.id(),
                found: other.chronology.id(),
            })
        }
    }

    #[inline]
    const fn key(&self) -> (i32, u8, u8) {
        (self.year, self.month, self.day)
    }
}

impl PartialEq for CalendarDate {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key() && same_chronology(self.chronology, other.chronology)
    }
}

impl Eq for CalendarDate {}

impl Hash for CalendarDate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chronology.id().hash(state);
        self.key().hash(state);
    }
}

impl From<CalendarDate> for EpochDay {
    fn from(date: CalendarDate) -> Self {
        date.to_epoch_day()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{CHRONOLOGY_SEPARATOR}", self.chronology.id())?;
        if self.year < 0 {
            write!(f, "{DATE_SEPARATOR}{:04}", self.year.unsigned_abs())?;
        } else {
            write!(f, "{:04}", self.year)?;
        }
        write!(f, "{DATE_SEPARATOR}{:02}{DATE_SEPARATOR}{:02}", self.month, self.day)
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let (id, date) = trimmed
            .split_once(CHRONOLOGY_SEPARATOR)
            .ok_or_else(|| ParseError::InvalidFormat(format!("Missing chronology id: {s}")))?;
        let chronology = chronology::by_id(id).ok_or_else(|| ParseError::UnknownChronology(id.to_owned()))?;

        let date = date.trim();
        let (negative, body) = match date.strip_prefix(DATE_SEPARATOR) {
            Some(rest) => (true, rest),
            None => (false, date),
        };
        let parts: Vec<&str> = body.split(DATE_SEPARATOR).collect();
        if parts.len() != 3 {
            return Err(ParseError::InvalidFormat(format!(
                "Expected year{DATE_SEPARATOR}month{DATE_SEPARATOR}day, found {} {DATE_SEPARATOR} separators",
                parts.len() - 1
            )));
        }

        let year = parse_number(parts[0])?;
        let year = if negative { -year } else { year };
        let month = parse_number(parts[1])?;
        let day = parse_number(parts[2])?;
        Ok(Self::from_fields(year, month, day, chronology)?)
    }
}

/// Parses an unsigned run of ASCII digits
fn parse_number(s: &str) -> Result<i64, ParseError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidFormat(s.to_owned()));
    }
    s.parse::<i64>()
        .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
