use crate::alarm::config::ConfigUpdate;
use crate::alarm::evaluator::AlarmEvaluator;
use crate::alarm::listener::{AlarmListener, ListenerId, ListenerRegistry};
use crate::alarm::parameters::{validate_range_steps, AlarmParameters};
use crate::alarm::result::AlarmResult;
use crate::alarm::sector::AlarmSector;
use crate::alarm::status::AlarmStatus;
use crate::geo::GeoLocation;
use crate::prelude::{AlarmCoreResult, AlarmError, LocationSource, StrikeBatch};
use crate::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};

/// Arming state of the coordinator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlarmState {
    Disabled,
    /// Enabled and subscribed, waiting for a location fix.
    ArmedNoFix,
    ArmedFix { location: GeoLocation },
}

/// Reactive controller deciding when to evaluate and whom to notify.
///
/// The alarm is valid while the coordinator is armed with a fix and the
/// last delivered batch was realtime. Every valid evaluation is broadcast
/// as a result; a valid-to-invalid edge is broadcast as a clear exactly once.
pub struct AlarmCoordinator {
    evaluator: AlarmEvaluator,
    status: AlarmStatus,
    state: AlarmState,
    last_batch: Option<StrikeBatch>,
    listeners: ListenerRegistry,
    location_source: Box<dyn LocationSource>,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl AlarmCoordinator {
    pub fn new(
        parameters: AlarmParameters,
        enabled: bool,
        location_source: Box<dyn LocationSource>,
    ) -> AlarmCoreResult<Self> {
        parameters.validate()?;
        let status = AlarmStatus::new(parameters.sector_count, parameters.range_steps.len())?;

        let mut coordinator = Self {
            evaluator: AlarmEvaluator::new(parameters),
            status,
            state: AlarmState::Disabled,
            last_batch: None,
            listeners: ListenerRegistry::new(),
            location_source,
            logger: LogManager::new("coordinator"),
            metrics: MetricsRecorder::new(),
        };
        coordinator.set_enabled(enabled);
        Ok(coordinator)
    }

    pub fn apply_config(&mut self, update: ConfigUpdate) -> AlarmCoreResult<()> {
        match update {
            ConfigUpdate::AlarmEnabled(enabled) => {
                self.set_enabled(enabled);
                return Ok(());
            }
            ConfigUpdate::MeasurementUnit(system) => {
                self.evaluator.set_measurement_system(system);
            }
            ConfigUpdate::SectorCount(count) => {
                let range_count = self.evaluator.parameters().range_steps.len();
                self.status = AlarmStatus::new(count, range_count)?;
                self.evaluator.parameters_mut().sector_count = count;
            }
            ConfigUpdate::RangeSteps(steps) => {
                validate_range_steps(&steps)?;
                let sector_count = self.evaluator.parameters().sector_count;
                self.status = AlarmStatus::new(sector_count, steps.len())?;
                self.evaluator.parameters_mut().range_steps = steps;
            }
            ConfigUpdate::IntervalMs(interval_ms) => {
                if interval_ms <= 0 {
                    return Err(AlarmError::InvalidInterval(interval_ms));
                }
                self.evaluator.parameters_mut().interval_ms = interval_ms;
            }
        }

        self.logger
            .detail(&format!("parameters now {:?}", self.evaluator.parameters()));
        if self.is_alarm_valid() {
            self.evaluate();
        }
        Ok(())
    }

    fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            if self.state == AlarmState::Disabled {
                self.state = AlarmState::ArmedNoFix;
                self.location_source.request_updates();
                self.logger.record("alarm enabled, awaiting location");
            }
        } else if self.state != AlarmState::Disabled {
            let was_valid = self.is_alarm_valid();
            self.location_source.remove_updates();
            self.state = AlarmState::Disabled;
            self.logger.record("alarm disabled");
            self.invalidate(was_valid);
        }
    }

    pub fn on_location_changed(&mut self, location: Option<GeoLocation>) {
        if self.state == AlarmState::Disabled {
            self.logger.detail("ignoring location update while disabled");
            return;
        }

        match location.filter(GeoLocation::is_valid) {
            Some(location) => {
                self.state = AlarmState::ArmedFix { location };
                if self.last_batch.is_some() {
                    self.evaluate();
                }
            }
            None => {
                if location.is_some() {
                    self.logger.warn("malformed location treated as lost fix");
                }
                let was_valid = self.is_alarm_valid();
                self.state = AlarmState::ArmedNoFix;
                self.invalidate(was_valid);
            }
        }
    }

    /// Consumes a delivery from the data provider.
    ///
    /// Only realtime batches are retained; historical data never alarms
    /// and clears any alarm derived from earlier batches.
    pub fn on_strikes(&mut self, batch: StrikeBatch) {
        let was_valid = self.is_alarm_valid();
        let realtime = batch.realtime;
        self.last_batch = realtime.then_some(batch);

        if self.is_alarm_valid() {
            self.evaluate();
        } else {
            self.invalidate(was_valid);
        }
    }

    fn evaluate(&mut self) {
        let AlarmState::ArmedFix { location } = self.state else {
            return;
        };
        let Some(batch) = self.last_batch.as_ref() else {
            return;
        };

        let summary =
            self.evaluator
                .check_strikes(&mut self.status, &batch.strikes, &location, batch.received_at);
        self.metrics
            .record_evaluation(summary.skipped, summary.expired);

        let result = self.evaluator.current_activity(&self.status);
        match &result {
            Some(result) => self.logger.record(&format!("alarm {}", result)),
            None => self.logger.detail("no strikes within alarm range"),
        }
        self.listeners.broadcast_result(result.as_ref());
        self.metrics.record_result();
    }

    fn invalidate(&mut self, was_valid: bool) {
        if !was_valid {
            return;
        }
        self.status.clear_results();
        self.logger.record("alarm cleared");
        self.listeners.broadcast_clear();
        self.metrics.record_clear();
    }

    pub fn is_alarm_enabled(&self) -> bool {
        self.state != AlarmState::Disabled
    }

    pub fn is_alarm_valid(&self) -> bool {
        matches!(self.state, AlarmState::ArmedFix { .. }) && self.last_batch.is_some()
    }

    pub fn state(&self) -> AlarmState {
        self.state
    }

    pub fn parameters(&self) -> &AlarmParameters {
        self.evaluator.parameters()
    }

    pub fn alarm_sectors(&self) -> &[AlarmSector] {
        self.status.sectors()
    }

    pub fn alarm_status(&self) -> Option<&AlarmStatus> {
        self.is_alarm_valid().then_some(&self.status)
    }

    pub fn alarm_result(&self) -> Option<AlarmResult> {
        if self.is_alarm_valid() {
            self.evaluator.current_activity(&self.status)
        } else {
            None
        }
    }

    /// Sectors within `distance_limit` (configured units), nearest first.
    pub fn text_message(&self, distance_limit: f64) -> String {
        self.evaluator.text_message(&self.status, distance_limit)
    }

    pub fn add_listener(&mut self, listener: Box<dyn AlarmListener>) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id).is_some()
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
