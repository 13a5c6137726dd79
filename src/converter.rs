//! Conversion between epoch days and `(year, month, day)` triples.

use crate::chronology::Chronology;
use crate::consts::{EPOCH_YEAR, MIN_DAY, MIN_MONTH};
use crate::error::{CalendarError, DateRangeError};
use crate::types::EpochDay;
use crate::validator;
use tracing::{debug, trace};

/// How far a year estimate may stray outside the supported span before the
/// epoch day is rejected without stepping.
const ESTIMATE_SLACK: i64 = 2;

/// Resolves `epoch_day` to a `(year, month, day)` triple of `chronology`.
///
/// # Errors
/// Returns `DateRangeError` if the day falls in a year outside the chronology's
/// supported span.
pub fn to_calendar_date(epoch_day: EpochDay, chronology: &dyn Chronology) -> Result<(i32, u8, u8), DateRangeError> {
    let epoch_day = epoch_day.get();
    let span = chronology.year_range();
    let estimate = estimate_year(epoch_day, chronology);
    if estimate < span.min() - ESTIMATE_SLACK || estimate > span.max() + ESTIMATE_SLACK {
        return Err(out_of_range(estimate, epoch_day, chronology));
    }

    let mut year = estimate;
    while chronology.year_start(year) > epoch_day {
        year -= 1;
    }
    while chronology.year_start(year + 1) <= epoch_day {
        year += 1;
    }
    let year = match i32::try_from(year) {
        Ok(year) if span.contains(i64::from(year)) => year,
        _ => return Err(out_of_range(year, epoch_day, chronology)),
    };

    let (month, day) = month_day_of(year, epoch_day - chronology.year_start(i64::from(year)), chronology);
    trace!(chronology = chronology.id(), epoch_day, year, month, day, "resolved epoch day");
    Ok((year, month, day))
}

/// Converts a `(year, month, day)` triple of `chronology` to its epoch day.
///
/// # Errors
/// Returns `CalendarError::DateRange` for a year outside the supported span and
/// `CalendarError::InvalidField` for an out of range month or day.
pub fn to_epoch_day(year: i64, month: i64, day: i64, chronology: &dyn Chronology) -> Result<EpochDay, CalendarError> {
    let span = chronology.year_range();
    if !span.contains(year) {
        debug!(chronology = chronology.id(), year, "year outside supported span");
        return Err(range_error(year, chronology).into());
    }
    let (year, month, day) = validator::validate_date(year, month, day, chronology)?;
    Ok(epoch_day_of(year, month, day, chronology))
}

/// Epoch day of a triple already known to be valid for `chronology`.
pub(crate) fn epoch_day_of(year: i32, month: u8, day: u8, chronology: &dyn Chronology) -> EpochDay {
    let months_before: i64 = (MIN_MONTH..month)
        .map(|m| i64::from(chronology.month_length(year, m)))
        .sum();
    EpochDay::new(chronology.year_start(i64::from(year)) + months_before + i64::from(day - MIN_DAY))
}

/// Splits a zero-based day of `year` into `(month, day)`.
///
/// Days past the end of the year land in the closing month.
pub(crate) fn month_day_of(year: i32, day_index: i64, chronology: &dyn Chronology) -> (u8, u8) {
    let mut remaining = day_index.max(0);
    let mut month = MIN_MONTH;
    loop {
        let length = i64::from(chronology.month_length(year, month));
        if remaining < length || month >= chronology.months_per_year() {
            break;
        }
        remaining -= length;
        month += 1;
    }
    // remaining < month length <= u8::MAX
    let day = MIN_DAY + u8::try_from(remaining).unwrap_or(u8::MAX - MIN_DAY);
    (month, day)
}

/// First guess at the year containing `epoch_day`, from the mean year length.
fn estimate_year(epoch_day: i64, chronology: &dyn Chronology) -> i64 {
    let cycle = chronology.leap_cycle();
    let offset_years = (i128::from(epoch_day) * i128::from(cycle.years)).div_euclid(i128::from(cycle.days));
    let estimate = i128::from(EPOCH_YEAR) + offset_years;
    i64::try_from(estimate).unwrap_or(if estimate.is_negative() { i64::MIN } else { i64::MAX })
}

pub(crate) fn range_error(year: i64, chronology: &dyn Chronology) -> DateRangeError {
    let span = chronology.year_range();
    DateRangeError {
        requested_year: year,
        supported_min: i32::try_from(span.min()).unwrap_or(i32::MIN),
        supported_max: i32::try_from(span.max()).unwrap_or(i32::MAX),
    }
}

fn out_of_range(year: i64, epoch_day: i64, chronology: &dyn Chronology) -> DateRangeError {
    debug!(chronology = chronology.id(), epoch_day, year, "epoch day outside supported span");
    range_error(year, chronology)
}
