//! Caller-supplied defaults for the chronology and zone offset.
//!
//! Nothing here is global: a resolved [`CalendarConfig`] is passed explicitly to
//! whatever needs a chronology or a clock.

use crate::chronology::{self, Chronology};
use crate::clock::{SystemClock, ZoneOffset};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable naming the default chronology
pub const CHRONOLOGY_ENV: &str = "FIXED_CALENDAR_CHRONOLOGY";
/// Environment variable holding the default UTC offset in seconds
pub const UTC_OFFSET_ENV: &str = "FIXED_CALENDAR_UTC_OFFSET";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarConfig {
    /// Id of the chronology used when none is given explicitly
    pub chronology: String,
    /// Offset from UTC used to decide which local day "now" is
    pub utc_offset_seconds: i32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            chronology: "Ifc".to_owned(),
            utc_offset_seconds: 0,
        }
    }
}

impl CalendarConfig {
    /// Reads overrides from the process environment on top of the defaults.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` if an override is not parseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup` on top of the defaults.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` if an override is not parseable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(chronology) = lookup(CHRONOLOGY_ENV) {
            config.chronology = chronology.trim().to_owned();
        }
        if let Some(offset) = lookup(UTC_OFFSET_ENV) {
            config.utc_offset_seconds = offset.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: UTC_OFFSET_ENV,
                value: offset.clone(),
            })?;
        }
        debug!(chronology = %config.chronology, utc_offset_seconds = config.utc_offset_seconds, "loaded calendar config");
        Ok(config)
    }

    /// # Errors
    /// Returns `ConfigError::UnknownChronology` if no bundled chronology has this id.
    pub fn chronology(&self) -> Result<&'static dyn Chronology, ConfigError> {
        chronology::by_id(&self.chronology).ok_or_else(|| ConfigError::UnknownChronology(self.chronology.clone()))
    }

    /// # Errors
    /// Returns `ConfigError::Offset` if the offset is beyond +/-18:00.
    pub fn offset(&self) -> Result<ZoneOffset, ConfigError> {
        Ok(ZoneOffset::from_seconds(self.utc_offset_seconds)?)
    }

    /// A system clock reporting at the configured offset.
    ///
    /// # Errors
    /// Returns `ConfigError::Offset` if the offset is beyond +/-18:00.
    pub fn system_clock(&self) -> Result<SystemClock, ConfigError> {
        Ok(SystemClock::new(self.offset()?))
    }
}
