use crate::generator::profile::build_strike_batch_from_config;
use crate::gui_bridge::model::AlarmViewModel;
use crate::workflow::config::{ScenarioConfig, ScenarioStep};
use anyhow::Context;
use log::{debug, info};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use strikealarm::alarm::{AlarmCoordinator, AlarmListener, AlarmResult, ConfigUpdate};
use strikealarm::geo::GeoLocation;
use strikealarm::prelude::{LocationSource, StrikeBatch};
use strikealarm::telemetry::MetricsSnapshot;

/// Listener notification captured during a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AlarmEvent {
    Result { result: Option<AlarmResult> },
    Clear,
}

struct RecordingListener {
    events: Rc<RefCell<Vec<AlarmEvent>>>,
}

impl AlarmListener for RecordingListener {
    fn on_alarm_result(&mut self, result: Option<&AlarmResult>) {
        self.events.borrow_mut().push(AlarmEvent::Result {
            result: result.copied(),
        });
    }

    fn on_alarm_clear(&mut self) {
        self.events.borrow_mut().push(AlarmEvent::Clear);
    }
}

/// Scenario replays supply fixes themselves; subscriptions are only logged.
struct ReplayLocationSource;

impl LocationSource for ReplayLocationSource {
    fn request_updates(&mut self) {
        debug!("replay: location updates requested");
    }

    fn remove_updates(&mut self) {
        debug!("replay: location updates removed");
    }
}

pub struct ReplayResult {
    pub events: Vec<AlarmEvent>,
    pub text_message: String,
    pub view: AlarmViewModel,
    pub metrics: MetricsSnapshot,
}

impl ReplayResult {
    pub fn result_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, AlarmEvent::Result { .. }))
            .count()
    }

    pub fn clear_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, AlarmEvent::Clear))
            .count()
    }
}

#[derive(Clone)]
pub struct Runner {
    config: ScenarioConfig,
}

impl Runner {
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> anyhow::Result<ReplayResult> {
        let mut coordinator = AlarmCoordinator::new(
            self.config.parameters.clone(),
            self.config.enabled,
            Box::new(ReplayLocationSource),
        )
        .context("creating alarm coordinator")?;

        let events = Rc::new(RefCell::new(Vec::new()));
        coordinator.add_listener(Box::new(RecordingListener {
            events: events.clone(),
        }));

        for (index, step) in self.config.steps.iter().enumerate() {
            self.apply_step(&mut coordinator, step)
                .with_context(|| format!("applying scenario step {}", index))?;
        }

        let text_message = coordinator.text_message(self.config.notification_limit);
        let view = AlarmViewModel::from_coordinator(&coordinator, self.config.notification_limit);
        let metrics = coordinator.metrics();
        info!(
            "replayed {} steps: {} evaluations, {} clears",
            self.config.steps.len(),
            metrics.evaluations,
            metrics.clears_broadcast
        );

        let events = events.borrow().clone();
        Ok(ReplayResult {
            events,
            text_message,
            view,
            metrics,
        })
    }

    fn apply_step(
        &self,
        coordinator: &mut AlarmCoordinator,
        step: &ScenarioStep,
    ) -> anyhow::Result<()> {
        match step {
            ScenarioStep::Enable { enabled } => {
                coordinator.apply_config(ConfigUpdate::AlarmEnabled(*enabled))?
            }
            ScenarioStep::Units { system } => {
                coordinator.apply_config(ConfigUpdate::MeasurementUnit(*system))?
            }
            ScenarioStep::Sectors { count } => {
                coordinator.apply_config(ConfigUpdate::SectorCount(*count))?
            }
            ScenarioStep::Location {
                latitude,
                longitude,
            } => coordinator.on_location_changed(Some(GeoLocation::new(*latitude, *longitude))),
            ScenarioStep::LostFix => coordinator.on_location_changed(None),
            ScenarioStep::Strikes {
                realtime,
                received_at,
                strikes,
            } => coordinator.on_strikes(StrikeBatch {
                strikes: strikes.clone(),
                realtime: *realtime,
                received_at: *received_at,
            }),
            ScenarioStep::Generate {
                received_at,
                generator,
            } => {
                let batch = build_strike_batch_from_config(generator, *received_at)
                    .context("generating strike batch")?;
                coordinator.on_strikes(batch);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strikealarm::geo::MeasurementSystem;
    use strikealarm::prelude::StrikeEvent;

    fn strike_step(realtime: bool, strikes: Vec<StrikeEvent>) -> ScenarioStep {
        ScenarioStep::Strikes {
            realtime,
            received_at: 10_000,
            strikes,
        }
    }

    #[test]
    fn runner_replays_demo_scenario() {
        let cfg = ScenarioConfig::demo(8, 10, MeasurementSystem::Metric);
        let runner = Runner::new(cfg.clone());
        let result = runner.execute().unwrap();

        // four realtime cells evaluate, the historical replay and the lost fix clear
        assert_eq!(result.result_count(), 4);
        assert_eq!(result.clear_count(), 2);
        assert_eq!(result.metrics.evaluations, 4);
        assert!(!result.view.valid);
        assert_eq!(result.text_message, "");
    }

    #[test]
    fn runner_reports_nearest_strike() {
        let origin = GeoLocation::new(0.0, 0.0);
        let near = origin.destination(100.0, 8_000.0);
        let far = origin.destination(300.0, 30_000.0);
        let cfg = ScenarioConfig {
            parameters: Default::default(),
            enabled: true,
            notification_limit: 50.0,
            steps: vec![
                ScenarioStep::Location {
                    latitude: 0.0,
                    longitude: 0.0,
                },
                strike_step(
                    true,
                    vec![
                        StrikeEvent::new(9_000, far.latitude, far.longitude),
                        StrikeEvent::new(9_500, near.latitude, near.longitude),
                    ],
                ),
            ],
        };

        let result = Runner::new(cfg).execute().unwrap();
        assert_eq!(result.text_message, "E 8km, NW 30km");
        match &result.events[..] {
            [AlarmEvent::Result {
                result: Some(nearest),
            }] => {
                assert_eq!(nearest.sector, 2);
                assert_eq!(nearest.timestamp, 9_500);
            }
            other => panic!("unexpected events {:?}", other),
        }
        assert!(result.view.valid);
    }

    #[test]
    fn disabled_scenario_produces_no_events() {
        let cfg = ScenarioConfig {
            parameters: Default::default(),
            enabled: false,
            notification_limit: 50.0,
            steps: vec![
                ScenarioStep::Location {
                    latitude: 0.0,
                    longitude: 0.0,
                },
                strike_step(true, vec![StrikeEvent::new(9_000, 0.01, 0.01)]),
            ],
        };
        let result = Runner::new(cfg).execute().unwrap();
        assert!(result.events.is_empty());
        assert!(!result.view.enabled);
    }

    #[test]
    fn invalid_step_reports_context() {
        let cfg = ScenarioConfig {
            parameters: Default::default(),
            enabled: true,
            notification_limit: 50.0,
            steps: vec![ScenarioStep::Sectors { count: 0 }],
        };
        let err = Runner::new(cfg).execute().err().unwrap();
        assert!(format!("{:#}", err).contains("applying scenario step 0"));
    }
}
