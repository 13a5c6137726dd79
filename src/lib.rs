//! Calendrical arithmetic over epoch days.
//!
//! A [`Chronology`] describes a calendar system. [`CalendarDate`] is an
//! immutable, always-valid date of one chronology, convertible to and from the
//! [`EpochDay`] interchange value (days since 1970-01-01). The reference
//! chronology is [`InternationalFixed`]: thirteen months of 28 days, the last one
//! stretched to 29 days (30 in leap years).
//!
//! ```
//! use fixed_calendar::{CalendarDate, FieldKind, FixedClock, Instant, INTERNATIONAL_FIXED};
//!
//! let clock = FixedClock::utc(Instant::from_epoch_seconds(-43_200));
//! let today = CalendarDate::now(&clock, &INTERNATIONAL_FIXED)?;
//! assert_eq!(today.to_string(), "Ifc 1969-13-29");
//! assert_eq!(today.length_of_year(), 365);
//!
//! // day 29 does not exist in a standard month
//! assert!(today.with_field(FieldKind::Month, 2).is_err());
//! # Ok::<(), fixed_calendar::CalendarError>(())
//! ```

mod chronology;
mod clock;
mod config;
mod consts;
mod converter;
mod date;
mod error;
mod partial;
mod prelude;
mod range;
mod types;
mod validator;

pub use chronology::{
    Chronology, INTERNATIONAL_FIXED, ISO, InternationalFixed, Iso, LeapCycle, available, by_id, same_chronology,
};
pub use clock::{ClockSource, FixedClock, Instant, SystemClock, ZoneOffset};
pub use config::{CHRONOLOGY_ENV, CalendarConfig, UTC_OFFSET_ENV};
pub use consts::*;
pub use converter::{to_calendar_date, to_epoch_day};
pub use date::CalendarDate;
pub use error::{
    CalendarError, ChronologyMismatchError, ConfigError, DateRangeError, InvalidFieldError, InvalidOffsetError,
    ParseError,
};
pub use partial::PartialDate;
pub use range::{DateRange, Days, RangeError};
pub use types::{EpochDay, FieldKind, FieldTable, ValueRange};
pub use validator::{valid_range, validate, validate_date};
