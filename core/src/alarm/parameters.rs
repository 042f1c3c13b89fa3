use serde::{Deserialize, Serialize};

use crate::geo::MeasurementSystem;
use crate::prelude::{AlarmCoreResult, AlarmError};

pub const DEFAULT_SECTOR_COUNT: usize = 8;
pub const DEFAULT_RANGE_STEPS: [f64; 6] = [10.0, 25.0, 50.0, 100.0, 250.0, 500.0];
pub const DEFAULT_INTERVAL_MS: i64 = 10 * 60 * 1000;

/// Alarm configuration shared by the status, evaluator and coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlarmParameters {
    pub sector_count: usize,
    /// Upper bounds of the severity tiers, in `measurement_system` units.
    pub range_steps: Vec<f64>,
    pub measurement_system: MeasurementSystem,
    /// Strikes older than this (relative to the batch time) are ignored.
    pub interval_ms: i64,
}

impl Default for AlarmParameters {
    fn default() -> Self {
        Self {
            sector_count: DEFAULT_SECTOR_COUNT,
            range_steps: DEFAULT_RANGE_STEPS.to_vec(),
            measurement_system: MeasurementSystem::Metric,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

impl AlarmParameters {
    pub fn validate(&self) -> AlarmCoreResult<()> {
        if self.sector_count == 0 {
            return Err(AlarmError::InvalidSectorCount(self.sector_count));
        }
        validate_range_steps(&self.range_steps)?;
        if self.interval_ms <= 0 {
            return Err(AlarmError::InvalidInterval(self.interval_ms));
        }
        Ok(())
    }

    pub fn sector_width(&self) -> f64 {
        360.0 / self.sector_count as f64
    }

    /// Outermost alarm range in meters.
    pub fn max_range_m(&self) -> f64 {
        self.range_steps
            .last()
            .map(|step| self.measurement_system.to_meters(*step))
            .unwrap_or(0.0)
    }

    /// Tier index for a distance in meters, `None` beyond the outermost step.
    pub fn range_index(&self, distance_m: f64) -> Option<usize> {
        let distance = self.measurement_system.from_meters(distance_m);
        self.range_steps.iter().position(|step| distance <= *step)
    }
}

pub(crate) fn validate_range_steps(steps: &[f64]) -> AlarmCoreResult<()> {
    if steps.is_empty() {
        return Err(AlarmError::InvalidRangeSteps("no range steps".into()));
    }
    if steps.iter().any(|step| !step.is_finite() || *step <= 0.0) {
        return Err(AlarmError::InvalidRangeSteps(format!(
            "steps must be positive: {:?}",
            steps
        )));
    }
    if steps.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(AlarmError::InvalidRangeSteps(format!(
            "steps must be strictly increasing: {:?}",
            steps
        )));
    }
    Ok(())
}
