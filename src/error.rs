use crate::prelude::*;
use crate::types::FieldKind;

/// A field value lies outside its legal range for the given context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Invalid value for {field} (valid values {min} - {max}): {value}")]
pub struct InvalidFieldError {
    pub field: FieldKind,
    pub value: i64,
    pub min: i64,
    pub max: i64,
}

/// A whole date falls outside the chronology's supported year span.
///
/// Arithmetic that overflows `i64` reports the year its saturated result lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Year {requested_year} is outside the supported range {supported_min} - {supported_max}")]
pub struct DateRangeError {
    pub requested_year: i64,
    pub supported_min: i32,
    pub supported_max: i32,
}

/// Two dates from different chronologies were combined.
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Chronology mismatch: expected {expected}, found {found}")]
pub struct ChronologyMismatchError {
    pub expected: &'static str,
    pub found: &'static str,
}

/// A zone offset beyond +/-18:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Zone offset {seconds}s is outside -64800 - 64800")]
pub struct InvalidOffsetError {
    pub seconds: i32,
}

/// Any failure produced by date construction or arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error(transparent)]
    InvalidField(#[from] InvalidFieldError),

    #[error(transparent)]
    DateRange(#[from] DateRangeError),

    #[error(transparent)]
    ChronologyMismatch(#[from] ChronologyMismatchError),

    #[error("Field {0} given more than once")]
    DuplicateField(FieldKind),
}

/// Failure to read a date or range from text.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Unknown chronology: {_0}")]
    UnknownChronology(String),
    #[display(fmt = "{_0}")]
    Field(InvalidFieldError),
    #[display(fmt = "{_0}")]
    Range(ChronologyMismatchError),
    #[display(fmt = "Invalid date range: start ({start}) is after end ({end})")]
    InvertedRange { start: String, end: String },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl From<InvalidFieldError> for ParseError {
    fn from(err: InvalidFieldError) -> Self {
        Self::Field(err)
    }
}

/// Configuration values that cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown chronology: {0}")]
    UnknownChronology(String),

    #[error(transparent)]
    Offset(#[from] InvalidOffsetError),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}
