//! Field range validation.
//!
//! Every legality check for a field value goes through [`validate`], both when
//! dates are built and when a single field is replaced.

use crate::chronology::Chronology;
use crate::error::InvalidFieldError;
use crate::types::{FieldKind, ValueRange};
use tracing::trace;

/// Checks that `value` is legal for `field`.
///
/// `context` is the `(year, month)` the value belongs to. Day-of-month needs it for
/// the precise `1..=days_in_month` check and day-of-year needs its year. Without
/// context a day is only pre-validated against the chronology's coarse
/// `range_of_field`, so a pass says nothing about any particular month. Every path
/// that builds a [`CalendarDate`](crate::CalendarDate) supplies the context.
///
/// # Errors
/// Returns `InvalidFieldError` carrying the field, the offending value and the
/// valid range. A context with an out of range month fails on the month.
pub fn validate(
    field: FieldKind,
    value: i64,
    context: Option<(i32, u8)>,
    chronology: &dyn Chronology,
) -> Result<(), InvalidFieldError> {
    let range = valid_range(field, context, chronology)?;
    range.check(field, value).map(|_| ()).inspect_err(|err| {
        trace!(chronology = chronology.id(), %err, "field rejected");
    })
}

/// The precise range of `field` under `context`.
///
/// # Errors
/// Returns `InvalidFieldError` if the context month is not a month of `chronology`.
pub fn valid_range(
    field: FieldKind,
    context: Option<(i32, u8)>,
    chronology: &dyn Chronology,
) -> Result<ValueRange, InvalidFieldError> {
    let range = match (field, context) {
        (FieldKind::Day, Some((year, month))) => {
            ValueRange::new(1, i64::from(chronology.days_in_month(year, month)?))
        }
        (FieldKind::DayOfYear, Some((year, _))) => ValueRange::new(1, i64::from(chronology.days_in_year(year))),
        _ => chronology.range_of_field(field),
    };
    Ok(range)
}

/// Validates year, then month, then day, stopping at the first failure.
///
/// # Errors
/// Returns the `InvalidFieldError` of the first field out of range.
pub fn validate_date(
    year: i64,
    month: i64,
    day: i64,
    chronology: &dyn Chronology,
) -> Result<(i32, u8, u8), InvalidFieldError> {
    let year = narrow::<i32>(FieldKind::Year, year, None, chronology)?;
    let month = narrow::<u8>(FieldKind::Month, month, None, chronology)?;
    let day = narrow::<u8>(FieldKind::Day, day, Some((year, month)), chronology)?;
    Ok((year, month, day))
}

/// Validates `value` and converts it to the storage width of the field.
fn narrow<T: TryFrom<i64>>(
    field: FieldKind,
    value: i64,
    context: Option<(i32, u8)>,
    chronology: &dyn Chronology,
) -> Result<T, InvalidFieldError> {
    let range = valid_range(field, context, chronology)?;
    let value = range.check(field, value)?;
    T::try_from(value).map_err(|_| InvalidFieldError {
        field,
        value,
        min: range.min(),
        max: range.max(),
    })
}
