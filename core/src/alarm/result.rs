use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::{CompassDirection, MeasurementSystem};

/// Snapshot of the nearest strike handed to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlarmResult {
    /// Meters from the reference location.
    pub distance: f64,
    pub bearing: f64,
    pub timestamp: i64,
    pub sector: usize,
    /// Severity tier, 0 being the innermost range.
    pub range_index: usize,
    pub measurement_system: MeasurementSystem,
}

impl AlarmResult {
    /// Distance converted into the configured unit system.
    pub fn display_distance(&self) -> f64 {
        self.measurement_system.from_meters(self.distance)
    }

    pub fn direction(&self) -> CompassDirection {
        CompassDirection::from_bearing(self.bearing)
    }
}

impl fmt::Display for AlarmResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.0}{}",
            self.direction(),
            self.display_distance(),
            self.measurement_system.unit_name()
        )
    }
}
