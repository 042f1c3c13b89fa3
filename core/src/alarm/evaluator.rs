use crate::alarm::parameters::AlarmParameters;
use crate::alarm::result::AlarmResult;
use crate::alarm::status::AlarmStatus;
use crate::geo::{CompassDirection, GeoLocation, MeasurementSystem};
use crate::prelude::StrikeEvent;
use crate::telemetry::log::LogManager;

/// Bookkeeping of a single `check_strikes` pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationSummary {
    /// Strikes that landed in a sector.
    pub considered: usize,
    /// Strikes dropped for malformed coordinates.
    pub skipped: usize,
    pub expired: usize,
    pub out_of_range: usize,
}

/// Buckets strike batches into sectors and derives the alarm signal.
pub struct AlarmEvaluator {
    parameters: AlarmParameters,
    logger: LogManager,
}

impl AlarmEvaluator {
    pub fn new(parameters: AlarmParameters) -> Self {
        Self {
            parameters,
            logger: LogManager::new("evaluator"),
        }
    }

    pub fn parameters(&self) -> &AlarmParameters {
        &self.parameters
    }

    pub(crate) fn parameters_mut(&mut self) -> &mut AlarmParameters {
        &mut self.parameters
    }

    pub fn set_measurement_system(&mut self, system: MeasurementSystem) {
        self.parameters.measurement_system = system;
    }

    /// Recomputes every sector of `status` from `strikes` as seen from `location`.
    ///
    /// Strikes older than `now - interval_ms` or beyond the outermost range
    /// step do not contribute. Strikes with malformed coordinates are
    /// skipped without aborting the pass.
    pub fn check_strikes(
        &self,
        status: &mut AlarmStatus,
        strikes: &[StrikeEvent],
        location: &GeoLocation,
        now: i64,
    ) -> EvaluationSummary {
        status.clear_results();

        let mut summary = EvaluationSummary::default();
        let threshold = now.saturating_sub(self.parameters.interval_ms);

        for strike in strikes {
            if !strike.is_valid() {
                summary.skipped += 1;
                continue;
            }
            if strike.timestamp < threshold {
                summary.expired += 1;
                continue;
            }

            let target = strike.location();
            let distance = location.distance_to(&target);
            let bearing = location.bearing_to(&target);
            if !distance.is_finite() || !bearing.is_finite() {
                summary.skipped += 1;
                continue;
            }

            let Some(range_index) = self.parameters.range_index(distance) else {
                summary.out_of_range += 1;
                continue;
            };

            let sector = status.sector_for_bearing_mut(bearing);
            sector.offer(distance, bearing, strike.timestamp);
            sector.record_strike(range_index, strike.timestamp);
            summary.considered += 1;
        }

        if summary.skipped > 0 {
            self.logger
                .warn(&format!("skipped {} malformed strikes", summary.skipped));
        }
        self.logger.detail(&format!(
            "pass over {} strikes: considered {}, expired {}, out of range {}",
            strikes.len(),
            summary.considered,
            summary.expired,
            summary.out_of_range
        ));

        summary
    }

    pub fn current_activity(&self, status: &AlarmStatus) -> Option<AlarmResult> {
        let sector = status.current_activity()?;
        let hit = sector.nearest()?;
        Some(AlarmResult {
            distance: hit.distance,
            bearing: hit.bearing,
            timestamp: hit.timestamp,
            sector: sector.index(),
            range_index: self
                .parameters
                .range_index(hit.distance)
                .unwrap_or(self.parameters.range_steps.len().saturating_sub(1)),
            measurement_system: self.parameters.measurement_system,
        })
    }

    /// Renders every sector within `distance_limit` (in configured units),
    /// nearest first, e.g. `"NE 12km, S 40km"`. Empty when nothing is near.
    pub fn text_message(&self, status: &AlarmStatus, distance_limit: f64) -> String {
        let system = self.parameters.measurement_system;

        let mut hits: Vec<_> = status
            .sectors()
            .iter()
            .filter_map(|sector| sector.nearest())
            .filter(|hit| system.from_meters(hit.distance) <= distance_limit)
            .collect();
        // stable sort keeps sector order for equal distances
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        hits.iter()
            .map(|hit| {
                format!(
                    "{} {:.0}{}",
                    CompassDirection::from_bearing(hit.bearing),
                    system.from_meters(hit.distance),
                    system.unit_name()
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
