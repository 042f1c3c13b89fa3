use serde::{Deserialize, Serialize};
use strikealarm::alarm::{AlarmCoordinator, AlarmResult, AlarmSector};

/// Per-sector view for a radar-style strength indicator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectorView {
    pub index: usize,
    pub min_bearing: f64,
    pub max_bearing: f64,
    /// Nearest strike in configured units.
    pub nearest_distance: Option<f64>,
    pub range_counts: Vec<usize>,
    pub latest_time: Option<i64>,
}

impl SectorView {
    fn from_sector(sector: &AlarmSector, meters_per_unit: f64) -> Self {
        Self {
            index: sector.index(),
            min_bearing: sector.min_bearing(),
            max_bearing: sector.max_bearing(),
            nearest_distance: sector.nearest().map(|hit| hit.distance / meters_per_unit),
            range_counts: sector.range_counts().to_vec(),
            latest_time: sector.latest_time(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AlarmViewModel {
    pub enabled: bool,
    pub valid: bool,
    pub unit: String,
    pub result: Option<AlarmResult>,
    pub text_message: String,
    pub sectors: Vec<SectorView>,
}

impl AlarmViewModel {
    pub fn from_coordinator(coordinator: &AlarmCoordinator, notification_limit: f64) -> Self {
        let system = coordinator.parameters().measurement_system;
        Self {
            enabled: coordinator.is_alarm_enabled(),
            valid: coordinator.is_alarm_valid(),
            unit: system.unit_name().to_string(),
            result: coordinator.alarm_result(),
            text_message: coordinator.text_message(notification_limit),
            sectors: coordinator
                .alarm_sectors()
                .iter()
                .map(|sector| SectorView::from_sector(sector, system.meters_per_unit()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strikealarm::alarm::AlarmParameters;
    use strikealarm::geo::GeoLocation;
    use strikealarm::prelude::{LocationSource, StrikeBatch, StrikeEvent};

    struct NoopSource;

    impl LocationSource for NoopSource {
        fn request_updates(&mut self) {}
        fn remove_updates(&mut self) {}
    }

    #[test]
    fn view_model_mirrors_coordinator() {
        let mut coordinator =
            AlarmCoordinator::new(AlarmParameters::default(), true, Box::new(NoopSource)).unwrap();
        let origin = GeoLocation::new(0.0, 0.0);
        let target = origin.destination(200.0, 20_000.0);
        coordinator.on_location_changed(Some(origin));
        coordinator.on_strikes(StrikeBatch::realtime(
            vec![StrikeEvent::new(1_000, target.latitude, target.longitude)],
            1_000,
        ));

        let view = AlarmViewModel::from_coordinator(&coordinator, 50.0);
        assert!(view.enabled && view.valid);
        assert_eq!(view.unit, "km");
        assert_eq!(view.sectors.len(), 8);
        assert_eq!(view.sectors[4].range_counts, vec![0, 1, 0, 0, 0, 0]);
        assert!((view.sectors[4].nearest_distance.unwrap() - 20.0).abs() < 1e-6);
        assert_eq!(view.text_message, "S 20km");

        let json = serde_json::to_string(&view).unwrap();
        let back: AlarmViewModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, view);
    }
}
