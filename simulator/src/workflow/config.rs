use crate::generator::profile::GeneratorConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strikealarm::alarm::AlarmParameters;
use strikealarm::geo::MeasurementSystem;
use strikealarm::prelude::StrikeEvent;

/// One event delivered to the coordinator during a replay.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    Enable {
        enabled: bool,
    },
    Units {
        system: MeasurementSystem,
    },
    Sectors {
        count: usize,
    },
    Location {
        latitude: f64,
        longitude: f64,
    },
    LostFix,
    Strikes {
        #[serde(default = "default_realtime")]
        realtime: bool,
        received_at: i64,
        #[serde(default)]
        strikes: Vec<StrikeEvent>,
    },
    Generate {
        received_at: i64,
        #[serde(default)]
        generator: GeneratorConfig,
    },
}

fn default_realtime() -> bool {
    true
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub parameters: AlarmParameters,
    #[serde(default = "default_realtime")]
    pub enabled: bool,
    /// Distance limit (configured units) for the rendered text message.
    #[serde(default = "default_notification_limit")]
    pub notification_limit: f64,
    #[serde(default)]
    pub steps: Vec<ScenarioStep>,
}

fn default_notification_limit() -> f64 {
    50.0
}

impl ScenarioConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading scenario {}", path_ref.display()))?;
        let config: ScenarioConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing scenario {}", path_ref.display()))?;
        config
            .parameters
            .validate()
            .with_context(|| format!("validating alarm parameters in {}", path_ref.display()))?;
        Ok(config)
    }

    /// Built-in scenario: a storm cell approaching a fixed observer,
    /// followed by a historical replay and a lost fix.
    pub fn demo(sector_count: usize, interval_minutes: i64, system: MeasurementSystem) -> Self {
        let parameters = AlarmParameters {
            sector_count,
            measurement_system: system,
            interval_ms: interval_minutes.saturating_mul(60_000),
            ..Default::default()
        };
        let start = 1_700_000_000_000;
        let observer = GeneratorConfig::default();
        let cell = |offset_min: i64, min_km: f64, max_km: f64, seed: u64| ScenarioStep::Generate {
            received_at: start + offset_min * 60_000,
            generator: GeneratorConfig {
                count: 48,
                min_distance_km: min_km,
                max_distance_km: max_km,
                seed,
                ..GeneratorConfig::default()
            },
        };

        Self {
            parameters,
            enabled: true,
            notification_limit: default_notification_limit(),
            steps: vec![
                ScenarioStep::Location {
                    latitude: observer.latitude,
                    longitude: observer.longitude,
                },
                cell(0, 120.0, 300.0, 1),
                cell(5, 40.0, 120.0, 2),
                cell(10, 5.0, 40.0, 3),
                ScenarioStep::Generate {
                    received_at: start + 11 * 60_000,
                    generator: GeneratorConfig {
                        realtime: false,
                        seed: 4,
                        ..GeneratorConfig::default()
                    },
                },
                cell(12, 2.0, 30.0, 5),
                ScenarioStep::LostFix,
            ],
        }
    }
}
