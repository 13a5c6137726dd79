//! Sources of "now".
//!
//! The system clock is the only time-varying input of this crate. It is always
//! injected through [`ClockSource`], so tests substitute a [`FixedClock`].

use crate::consts::{MAX_OFFSET_SECONDS, SECONDS_PER_DAY};
use crate::error::InvalidOffsetError;
use crate::types::EpochDay;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::trace;

const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// Supplies the current instant and the zone offset used to find the local date.
pub trait ClockSource {
    fn now(&self) -> (Instant, ZoneOffset);
}

/// A point on the UTC time-line: seconds since 1970-01-01T00:00:00Z plus a
/// non-negative nanosecond adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Instant {
    seconds: i64,
    nanos: u32,
}

impl Instant {
    pub const EPOCH: Self = Self { seconds: 0, nanos: 0 };

    pub const fn from_epoch_seconds(seconds: i64) -> Self {
        Self { seconds, nanos: 0 }
    }

    /// Returns `None` if the second count does not fit in an `i64`.
    pub fn from_epoch_nanos(nanos: i128) -> Option<Self> {
        let seconds = i64::try_from(nanos.div_euclid(NANOS_PER_SECOND)).ok()?;
        let nanos = u32::try_from(nanos.rem_euclid(NANOS_PER_SECOND)).ok()?;
        Some(Self { seconds, nanos })
    }

    #[inline]
    pub const fn epoch_seconds(self) -> i64 {
        self.seconds
    }

    #[inline]
    pub const fn nanos(self) -> u32 {
        self.nanos
    }

    /// The local date of this instant at `offset`, as an epoch day.
    ///
    /// Time of day is floored toward the start of the local day, so any instant
    /// before local midnight belongs to the previous day.
    pub const fn local_epoch_day(self, offset: ZoneOffset) -> EpochDay {
        let local = self.seconds.saturating_add(offset.total_seconds() as i64);
        EpochDay::new(local.div_euclid(SECONDS_PER_DAY))
    }
}

/// A fixed offset from UTC, in seconds east of Greenwich.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct ZoneOffset(i32);

impl ZoneOffset {
    pub const UTC: Self = Self(0);
    pub const MIN: Self = Self(-MAX_OFFSET_SECONDS);
    pub const MAX: Self = Self(MAX_OFFSET_SECONDS);

    /// Creates an offset, validating that it lies within +/-18:00
    ///
    /// # Errors
    /// Returns `InvalidOffsetError` if `seconds` is beyond +/-18 hours.
    pub const fn from_seconds(seconds: i32) -> Result<Self, InvalidOffsetError> {
        if seconds < -MAX_OFFSET_SECONDS || seconds > MAX_OFFSET_SECONDS {
            return Err(InvalidOffsetError { seconds });
        }
        Ok(Self(seconds))
    }

    #[inline]
    pub const fn total_seconds(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for ZoneOffset {
    type Error = InvalidOffsetError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_seconds(value)
    }
}

impl From<ZoneOffset> for i32 {
    fn from(offset: ZoneOffset) -> Self {
        offset.0
    }
}

impl fmt::Display for ZoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("Z");
        }
        let sign = if self.0 < 0 { '-' } else { '+' };
        let total = self.0.unsigned_abs();
        let (hours, minutes, seconds) = (total / 3_600, total / 60 % 60, total % 60);
        if seconds == 0 {
            write!(f, "{sign}{hours:02}:{minutes:02}")
        } else {
            write!(f, "{sign}{hours:02}:{minutes:02}:{seconds:02}")
        }
    }
}

/// The operating system clock, reported at a configured offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemClock {
    offset: ZoneOffset,
}

impl SystemClock {
    pub const fn new(offset: ZoneOffset) -> Self {
        Self { offset }
    }

    pub const fn utc() -> Self {
        Self::new(ZoneOffset::UTC)
    }

    pub const fn offset(&self) -> ZoneOffset {
        self.offset
    }
}

impl ClockSource for SystemClock {
    fn now(&self) -> (Instant, ZoneOffset) {
        let nanos = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i128::try_from(elapsed.as_nanos()).unwrap_or(i128::MAX),
            Err(before) => -i128::try_from(before.duration().as_nanos()).unwrap_or(i128::MAX),
        };
        let instant = Instant::from_epoch_nanos(nanos).unwrap_or(if nanos < 0 {
            Instant::from_epoch_seconds(i64::MIN)
        } else {
            Instant::from_epoch_seconds(i64::MAX)
        });
        trace!(seconds = instant.seconds, offset = %self.offset, "read system clock");
        (instant, self.offset)
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: Instant,
    offset: ZoneOffset,
}

impl FixedClock {
    pub const fn new(instant: Instant, offset: ZoneOffset) -> Self {
        Self { instant, offset }
    }

    pub const fn utc(instant: Instant) -> Self {
        Self::new(instant, ZoneOffset::UTC)
    }
}

impl ClockSource for FixedClock {
    fn now(&self) -> (Instant, ZoneOffset) {
        (self.instant, self.offset)
    }
}
