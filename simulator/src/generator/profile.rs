use anyhow::ensure;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use strikealarm::geo::GeoLocation;
use strikealarm::prelude::{StrikeBatch, StrikeEvent};

/// Configuration for generating a synthetic strike cell around a point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub count: usize,
    pub min_distance_km: f64,
    pub max_distance_km: f64,
    /// Strikes are spread over this many milliseconds before the batch time.
    pub max_age_ms: i64,
    pub seed: u64,
    pub realtime: bool,
    pub description: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            latitude: 48.1,
            longitude: 11.6,
            count: 64,
            min_distance_km: 2.0,
            max_distance_km: 300.0,
            max_age_ms: 5 * 60 * 1000,
            seed: 0,
            realtime: true,
            description: None,
        }
    }
}

impl GeneratorConfig {
    fn center(&self) -> GeoLocation {
        GeoLocation::new(self.latitude, self.longitude)
    }
}

fn build_strikes(config: &GeneratorConfig, now: i64) -> anyhow::Result<Vec<StrikeEvent>> {
    ensure!(config.center().is_valid(), "generator center is not a valid coordinate");
    ensure!(
        config.min_distance_km >= 0.0 && config.min_distance_km < config.max_distance_km,
        "generator distance band [{}, {}) is empty",
        config.min_distance_km,
        config.max_distance_km
    );
    let max_age = config.max_age_ms.max(1);
    ensure!(
        now.checked_sub(max_age).is_some(),
        "batch time too small for generator age spread"
    );

    let center = config.center();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut strikes = Vec::with_capacity(config.count);

    for _ in 0..config.count {
        let bearing = rng.gen_range(0.0..360.0);
        let distance_km = rng.gen_range(config.min_distance_km..config.max_distance_km);
        let age = rng.gen_range(0..max_age);
        let location = center.destination(bearing, distance_km * 1000.0);
        let mut strike = StrikeEvent::new(now - age, location.latitude, location.longitude);
        strike.amplitude = Some(rng.gen_range(-60.0..60.0));
        strikes.push(strike);
    }

    Ok(strikes)
}

pub fn build_strike_batch_from_config(
    config: &GeneratorConfig,
    now: i64,
) -> anyhow::Result<StrikeBatch> {
    let strikes = build_strikes(config, now)?;
    Ok(StrikeBatch {
        strikes,
        realtime: config.realtime,
        received_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn generator_builds_expected_strike_count() {
        let config = GeneratorConfig {
            count: 32,
            ..Default::default()
        };
        let batch = build_strike_batch_from_config(&config, NOW).unwrap();
        assert_eq!(batch.len(), 32);
        assert!(batch.realtime);
        assert_eq!(batch.received_at, NOW);
    }

    #[test]
    fn generated_strikes_stay_inside_band_and_window() {
        let config = GeneratorConfig {
            count: 200,
            min_distance_km: 20.0,
            max_distance_km: 40.0,
            seed: 13,
            ..Default::default()
        };
        let center = config.center();
        let batch = build_strike_batch_from_config(&config, NOW).unwrap();

        for strike in &batch.strikes {
            let distance_km = center.distance_to(&strike.location()) / 1000.0;
            assert!((19.999..40.001).contains(&distance_km), "{}", distance_km);
            assert!(strike.timestamp <= NOW && strike.timestamp > NOW - config.max_age_ms);
        }
    }

    #[test]
    fn same_seed_repeats_batch() {
        let config = GeneratorConfig {
            seed: 7,
            ..Default::default()
        };
        let first = build_strike_batch_from_config(&config, NOW).unwrap();
        let second = build_strike_batch_from_config(&config, NOW).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_distance_band_is_rejected() {
        let config = GeneratorConfig {
            min_distance_km: 50.0,
            max_distance_km: 50.0,
            ..Default::default()
        };
        assert!(build_strike_batch_from_config(&config, NOW).is_err());
    }

    #[test]
    fn batch_time_before_age_spread_is_rejected() {
        let config = GeneratorConfig::default();
        assert!(build_strike_batch_from_config(&config, i64::MIN).is_err());
        assert!(build_strike_batch_from_config(&config, config.max_age_ms).is_ok());
    }
}
