//! Dates where only some fields are known.

use crate::chronology::{Chronology, same_chronology};
use crate::date::CalendarDate;
use crate::error::{CalendarError, ChronologyMismatchError, InvalidFieldError};
use crate::types::FieldKind;
use crate::validator;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A date that fixes only some fields, without fabricating the others.
///
/// Fields are kept in canonical order (Year, Month, Day, DayOfYear) and each
/// kind appears at most once.
#[derive(Debug, Clone)]
pub struct PartialDate {
    chronology: &'static dyn Chronology,
    fields: Vec<(FieldKind, i64)>,
}

impl PartialDate {
    /// Creates a partial date from any set of distinct fields.
    ///
    /// Values are range checked as precisely as the other fields allow: a day is
    /// checked against its month when year and month are both present, and
    /// against the chronology's largest month otherwise.
    ///
    /// # Errors
    /// Returns `CalendarError::DuplicateField` when a field repeats and
    /// `CalendarError::InvalidField` when a value is out of range.
    pub fn new(
        chronology: &'static dyn Chronology,
        fields: impl IntoIterator<Item = (FieldKind, i64)>,
    ) -> Result<Self, CalendarError> {
        let mut fields: Vec<(FieldKind, i64)> = fields.into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);
        if let Some(pair) = fields.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(CalendarError::DuplicateField(pair[0].0));
        }
        let partial = Self { chronology, fields };
        partial.validate()?;
        Ok(partial)
    }

    /// A partial date with no fields
    pub const fn empty(chronology: &'static dyn Chronology) -> Self {
        Self {
            chronology,
            fields: Vec::new(),
        }
    }

    fn validate(&self) -> Result<(), CalendarError> {
        let year = self.get(FieldKind::Year);
        let month = self.get(FieldKind::Month);
        for &(field, value) in &self.fields {
            let context = match (field, year, month) {
                (FieldKind::Day, Some(year), Some(month)) => narrow_context(year, month),
                (FieldKind::DayOfYear, Some(year), _) => narrow_context(year, 1),
                _ => None,
            };
            validator::validate(field, value, context, self.chronology)?;
        }
        if let (Some(year), Some(day_of_year)) = (year, self.get(FieldKind::DayOfYear)) {
            self.resolve_day_of_year(year, day_of_year)?;
        }
        Ok(())
    }

    /// The date a day-of-year names in `year`.
    ///
    /// A month or day given alongside must agree with it; the only value accepted
    /// for each is the one the day-of-year implies.
    fn resolve_day_of_year(&self, year: i64, day_of_year: i64) -> Result<CalendarDate, InvalidFieldError> {
        let resolved =
            CalendarDate::from_fields(year, 1, 1, self.chronology)?.with_field(FieldKind::DayOfYear, day_of_year)?;
        for field in [FieldKind::Month, FieldKind::Day] {
            let implied = resolved.get(field);
            match self.get(field) {
                Some(value) if value != implied => {
                    return Err(InvalidFieldError {
                        field,
                        value,
                        min: implied,
                        max: implied,
                    });
                }
                _ => {}
            }
        }
        Ok(resolved)
    }

    pub const fn chronology(&self) -> &'static dyn Chronology {
        self.chronology
    }

    /// The fields in canonical order
    pub fn fields(&self) -> &[(FieldKind, i64)] {
        &self.fields
    }

    pub fn get(&self, field: FieldKind) -> Option<i64> {
        self.fields
            .iter()
            .find_map(|&(kind, value)| (kind == field).then_some(value))
    }

    pub fn is_supported(&self, field: FieldKind) -> bool {
        self.get(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns a copy with `field` set to `value`, replacing any existing value.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidField` if the value is out of range.
    pub fn with(&self, field: FieldKind, value: i64) -> Result<Self, CalendarError> {
        let mut fields = self.fields.clone();
        match fields.binary_search_by_key(&field, |(kind, _)| *kind) {
            Ok(index) => fields[index].1 = value,
            Err(index) => fields.insert(index, (field, value)),
        }
        let partial = Self {
            chronology: self.chronology,
            fields,
        };
        partial.validate()?;
        Ok(partial)
    }

    /// Returns a copy without `field`
    pub fn without(&self, field: FieldKind) -> Self {
        Self {
            chronology: self.chronology,
            fields: self.fields.iter().copied().filter(|(kind, _)| *kind != field).collect(),
        }
    }

    /// Overlays these fields onto `base` and validates the result once.
    ///
    /// Year, month and day replace the base values. A day-of-year is resolved in
    /// the final year and determines month and day; a month or day given with it
    /// must name the same date.
    ///
    /// # Errors
    /// Returns `CalendarError::ChronologyMismatch` if `base` is of another
    /// chronology and `CalendarError::InvalidField` if the overlaid date does not
    /// exist or the day-of-year disagrees with the given month or day.
    pub fn to_full_date(&self, base: &CalendarDate) -> Result<CalendarDate, CalendarError> {
        if !same_chronology(self.chronology, base.chronology()) {
            return Err(ChronologyMismatchError {
                expected: self.chronology.id(),
                found: base.chronology().id(),
            }
            .into());
        }

        let mut year = i64::from(base.year());
        let mut month = i64::from(base.month());
        let mut day = i64::from(base.day());
        let mut day_of_year = None;
        for &(field, value) in &self.fields {
            match field {
                FieldKind::Year => year = value,
                FieldKind::Month => month = value,
                FieldKind::Day => day = value,
                FieldKind::DayOfYear => day_of_year = Some(value),
            }
        }

        if let Some(day_of_year) = day_of_year {
            return Ok(self.resolve_day_of_year(year, day_of_year)?);
        }
        Ok(CalendarDate::from_fields(year, month, day, self.chronology)?)
    }

    /// Earliest and latest full dates this partial can stand for.
    ///
    /// Only defined when the year is known and a day is not given without its
    /// month.
    pub fn bounds(&self) -> Option<(CalendarDate, CalendarDate)> {
        let year = i32::try_from(self.get(FieldKind::Year)?).ok()?;
        if let Some(day_of_year) = self.get(FieldKind::DayOfYear) {
            let exact = self.resolve_day_of_year(i64::from(year), day_of_year).ok()?;
            return Some((exact, exact));
        }

        let month = self.get(FieldKind::Month).map(u8::try_from);
        let day = self.get(FieldKind::Day).map(u8::try_from);
        let (first_month, last_month) = match month {
            Some(month) => {
                let month = month.ok()?;
                (month, month)
            }
            None if day.is_some() => return None,
            None => (1, self.chronology.months_per_year()),
        };
        let (first_day, last_day) = match day {
            Some(day) => {
                let day = day.ok()?;
                (day, day)
            }
            None => (1, self.chronology.month_length(year, last_month)),
        };

        let lower = CalendarDate::of(year, first_month, first_day, self.chronology).ok()?;
        let upper = CalendarDate::of(year, last_month, last_day, self.chronology).ok()?;
        Some((lower, upper))
    }
}

/// `(year, month)` context when both fit their storage width
fn narrow_context(year: i64, month: i64) -> Option<(i32, u8)> {
    Some((i32::try_from(year).ok()?, u8::try_from(month).ok()?))
}

impl From<CalendarDate> for PartialDate {
    fn from(date: CalendarDate) -> Self {
        Self {
            chronology: date.chronology(),
            fields: vec![
                (FieldKind::Year, i64::from(date.year())),
                (FieldKind::Month, i64::from(date.month())),
                (FieldKind::Day, i64::from(date.day())),
            ],
        }
    }
}

impl PartialEq for PartialDate {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields && same_chronology(self.chronology, other.chronology)
    }
}

impl Eq for PartialDate {}

impl Hash for PartialDate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chronology.id().hash(state);
        self.fields.hash(state);
    }
}

impl fmt::Display for PartialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.chronology.id())?;
        for (index, (field, value)) in self.fields.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}={value}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chronology::{INTERNATIONAL_FIXED, ISO};

    fn ifc(year: i32, month: u8, day: u8) -> CalendarDate {
        CalendarDate::of(year, month, day, &INTERNATIONAL_FIXED).unwrap()
    }

    #[test]
    fn test_new_sorts_fields() {
        let partial = PartialDate::new(
            &INTERNATIONAL_FIXED,
            [(FieldKind::Day, 29), (FieldKind::Month, 13)],
        )
        .unwrap();
        assert_eq!(partial.fields(), &[(FieldKind::Month, 13), (FieldKind::Day, 29)]);
        assert_eq!(partial.len(), 2);
        assert!(partial.is_supported(FieldKind::Month));
        assert!(!partial.is_supported(FieldKind::Year));
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let err = PartialDate::new(&INTERNATIONAL_FIXED, [(FieldKind::Month, 1), (FieldKind::Month, 2)]).unwrap_err();
        assert_eq!(err, CalendarError::DuplicateField(FieldKind::Month));
    }

    #[test]
    fn test_new_validation_cases() {
        struct TestCase {
            fields: Vec<(FieldKind, i64)>,
            should_succeed: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                fields: vec![(FieldKind::Month, 13), (FieldKind::Day, 30)],
                should_succeed: true,
                description: "leap day without year passes coarse check",
            },
            TestCase {
                fields: vec![(FieldKind::Year, 1970), (FieldKind::Month, 13), (FieldKind::Day, 30)],
                should_succeed: false,
                description: "leap day with common year",
            },
            TestCase {
                fields: vec![(FieldKind::Day, 31)],
                should_succeed: false,
                description: "day beyond any month",
            },
            TestCase {
                fields: vec![(FieldKind::Month, 14)],
                should_succeed: false,
                description: "month beyond closing month",
            },
            TestCase {
                fields: vec![(FieldKind::Year, 2023), (FieldKind::DayOfYear, 366)],
                should_succeed: false,
                description: "day 366 of common year",
            },
            TestCase {
                fields: vec![],
                should_succeed: true,
                description: "no fields",
            },
        ];

        for case in cases {
            let result = PartialDate::new(&INTERNATIONAL_FIXED, case.fields);
            assert_eq!(result.is_ok(), case.should_succeed, "{}", case.description);
        }
    }

    #[test]
    fn test_to_full_date_overlays_fields() {
        let partial = PartialDate::new(&INTERNATIONAL_FIXED, [(FieldKind::Month, 13), (FieldKind::Day, 29)]).unwrap();
        assert_eq!(partial.to_full_date(&ifc(1969, 1, 1)), Ok(ifc(1969, 13, 29)));
    }

    #[test]
    fn test_to_full_date_does_not_clamp() {
        let partial = PartialDate::new(&INTERNATIONAL_FIXED, [(FieldKind::Month, 2)]).unwrap();
        let err = partial.to_full_date(&ifc(2023, 13, 29)).unwrap_err();
        assert_eq!(
            err,
            CalendarError::InvalidField(InvalidFieldError {
                field: FieldKind::Day,
                value: 29,
                min: 1,
                max: 28
            })
        );
    }

    #[test]
    fn test_to_full_date_day_of_year() {
        let partial = PartialDate::new(&INTERNATIONAL_FIXED, [(FieldKind::Year, 2024), (FieldKind::DayOfYear, 366)]).unwrap();
        assert_eq!(partial.to_full_date(&ifc(1970, 5, 5)), Ok(ifc(2024, 13, 30)));
    }

    #[test]
    fn test_day_of_year_must_agree_with_month_and_day() {
        // day 1 of the year is 01-01, not 02-05
        assert_eq!(
            PartialDate::new(
                &INTERNATIONAL_FIXED,
                [(FieldKind::Year, 2024), (FieldKind::Month, 2), (FieldKind::Day, 5), (FieldKind::DayOfYear, 1)],
            ),
            Err(CalendarError::InvalidField(InvalidFieldError {
                field: FieldKind::Month,
                value: 2,
                min: 1,
                max: 1
            }))
        );

        // without a year the conflict surfaces once the base supplies one
        let partial = PartialDate::new(
            &INTERNATIONAL_FIXED,
            [(FieldKind::Month, 2), (FieldKind::Day, 5), (FieldKind::DayOfYear, 1)],
        )
        .unwrap();
        assert!(matches!(
            partial.to_full_date(&ifc(2024, 7, 7)),
            Err(CalendarError::InvalidField(InvalidFieldError {
                field: FieldKind::Month,
                ..
            }))
        ));

        // day 34 is 02-06
        let partial = PartialDate::new(&INTERNATIONAL_FIXED, [(FieldKind::Day, 5), (FieldKind::DayOfYear, 34)]).unwrap();
        assert_eq!(
            partial.to_full_date(&ifc(2024, 7, 7)),
            Err(CalendarError::InvalidField(InvalidFieldError {
                field: FieldKind::Day,
                value: 5,
                min: 6,
                max: 6
            }))
        );
        assert!(matches!(
            partial.with(FieldKind::Year, 2024),
            Err(CalendarError::InvalidField(InvalidFieldError {
                field: FieldKind::Day,
                ..
            }))
        ));

        // agreeing fields are accepted: day 33 is 02-05
        let partial = PartialDate::new(
            &INTERNATIONAL_FIXED,
            [(FieldKind::Month, 2), (FieldKind::Day, 5), (FieldKind::DayOfYear, 33)],
        )
        .unwrap();
        assert_eq!(partial.to_full_date(&ifc(2024, 7, 7)), Ok(ifc(2024, 2, 5)));
    }

    #[test]
    fn test_to_full_date_chronology_mismatch() {
        let partial = PartialDate::new(&INTERNATIONAL_FIXED, [(FieldKind::Day, 1)]).unwrap();
        let base = CalendarDate::of(2024, 1, 1, &ISO).unwrap();
        assert!(matches!(
            partial.to_full_date(&base),
            Err(CalendarError::ChronologyMismatch(_))
        ));
    }

    #[test]
    fn test_empty_overlay_is_identity() {
        let base = ifc(2024, 7, 7);
        assert_eq!(PartialDate::empty(&INTERNATIONAL_FIXED).to_full_date(&base), Ok(base));
    }

    #[test]
    fn test_with_and_without() {
        let partial = PartialDate::new(&INTERNATIONAL_FIXED, [(FieldKind::Day, 5)]).unwrap();
        let partial = partial.with(FieldKind::Year, 2024).unwrap();
        let partial = partial.with(FieldKind::Day, 6).unwrap();
        assert_eq!(partial.fields(), &[(FieldKind::Year, 2024), (FieldKind::Day, 6)]);
        assert!(partial.with(FieldKind::Month, 0).is_err());

        let partial = partial.without(FieldKind::Year);
        assert_eq!(partial.fields(), &[(FieldKind::Day, 6)]);
    }

    #[test]
    fn test_from_calendar_date() {
        let partial = PartialDate::from(ifc(1969, 13, 29));
        assert_eq!(partial.get(FieldKind::Year), Some(1969));
        assert_eq!(partial.get(FieldKind::Month), Some(13));
        assert_eq!(partial.get(FieldKind::Day), Some(29));
        assert_eq!(partial.to_full_date(&ifc(2000, 1, 1)), Ok(ifc(1969, 13, 29)));
    }

    #[test]
    fn test_bounds_year() {
        let partial = PartialDate::new(&INTERNATIONAL_FIXED, [(FieldKind::Year, 2024)]).unwrap();
        assert_eq!(partial.bounds(), Some((ifc(2024, 1, 1), ifc(2024, 13, 30))));

        let partial = PartialDate::new(&INTERNATIONAL_FIXED, [(FieldKind::Year, 2023)]).unwrap();
        assert_eq!(partial.bounds(), Some((ifc(2023, 1, 1), ifc(2023, 13, 29))));
    }

    #[test]
    fn test_bounds_month() {
        let partial = PartialDate::new(&INTERNATIONAL_FIXED, [(FieldKind::Year, 1991), (FieldKind::Month, 8)]).unwrap();
        assert_eq!(partial.bounds(), Some((ifc(1991, 8, 1), ifc(1991, 8, 28))));
    }

    #[test]
    fn test_bounds_undefined() {
        let partial = PartialDate::new(&INTERNATIONAL_FIXED, [(FieldKind::Month, 8)]).unwrap();
        assert_eq!(partial.bounds(), None);

        let partial = PartialDate::new(&INTERNATIONAL_FIXED, [(FieldKind::Year, 1991), (FieldKind::Day, 8)]).unwrap();
        assert_eq!(partial.bounds(), None);
    }

    #[test]
    fn test_display() {
        let partial = PartialDate::new(&INTERNATIONAL_FIXED, [(FieldKind::Year, 1969), (FieldKind::Month, 13)]).unwrap();
        assert_eq!(partial.to_string(), "Ifc [Year=1969, MonthOfYear=13]");
        assert_eq!(PartialDate::empty(&ISO).to_string(), "ISO []");
    }
}
