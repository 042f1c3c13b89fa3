use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::prelude::AlarmError;

/// Unit system used for alarm ranges and rendered distances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    #[default]
    Metric,
    Imperial,
}

impl MeasurementSystem {
    pub fn unit_name(&self) -> &'static str {
        match self {
            MeasurementSystem::Metric => "km",
            MeasurementSystem::Imperial => "mi",
        }
    }

    pub fn meters_per_unit(&self) -> f64 {
        match self {
            MeasurementSystem::Metric => 1000.0,
            MeasurementSystem::Imperial => 1609.344,
        }
    }

    pub fn from_meters(&self, meters: f64) -> f64 {
        meters / self.meters_per_unit()
    }

    pub fn to_meters(&self, value: f64) -> f64 {
        value * self.meters_per_unit()
    }
}

impl FromStr for MeasurementSystem {
    type Err = AlarmError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "metric" => Ok(MeasurementSystem::Metric),
            "imperial" => Ok(MeasurementSystem::Imperial),
            _ => Err(AlarmError::UnknownMeasurementSystem(value.to_string())),
        }
    }
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasurementSystem::Metric => f.write_str("metric"),
            MeasurementSystem::Imperial => f.write_str("imperial"),
        }
    }
}
