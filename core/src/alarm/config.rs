use serde::{Deserialize, Serialize};

use crate::geo::MeasurementSystem;
use crate::prelude::{AlarmCoreResult, AlarmError};

pub const KEY_ALARM_ENABLED: &str = "alarm_enabled";
pub const KEY_MEASUREMENT_UNIT: &str = "measurement_unit";
pub const KEY_SECTOR_COUNT: &str = "alarm_sector_count";
pub const KEY_RANGE_STEPS: &str = "alarm_range_steps";
pub const KEY_INTERVAL_MINUTES: &str = "alarm_interval_minutes";

/// Typed configuration change consumed by the coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ConfigUpdate {
    AlarmEnabled(bool),
    MeasurementUnit(MeasurementSystem),
    SectorCount(usize),
    RangeSteps(Vec<f64>),
    IntervalMs(i64),
}

impl ConfigUpdate {
    /// Translates a key/value preference entry.
    ///
    /// Returns `Ok(None)` for keys the alarm does not care about.
    pub fn from_preference(key: &str, value: &str) -> AlarmCoreResult<Option<Self>> {
        let invalid = || AlarmError::InvalidPreference {
            key: key.to_string(),
            value: value.to_string(),
        };

        let update = match key {
            KEY_ALARM_ENABLED => {
                ConfigUpdate::AlarmEnabled(value.trim().parse().map_err(|_| invalid())?)
            }
            KEY_MEASUREMENT_UNIT => ConfigUpdate::MeasurementUnit(value.parse()?),
            KEY_SECTOR_COUNT => {
                ConfigUpdate::SectorCount(value.trim().parse().map_err(|_| invalid())?)
            }
            KEY_RANGE_STEPS => ConfigUpdate::RangeSteps(
                value
                    .split(',')
                    .map(|step| step.trim().parse::<f64>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|_| invalid())?,
            ),
            KEY_INTERVAL_MINUTES => {
                let minutes: i64 = value.trim().parse().map_err(|_| invalid())?;
                ConfigUpdate::IntervalMs(minutes.saturating_mul(60_000))
            }
            _ => return Ok(None),
        };
        Ok(Some(update))
    }
}
