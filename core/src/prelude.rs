use serde::{Deserialize, Serialize};

use crate::geo::GeoLocation;

/// A single detected lightning discharge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrikeEvent {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amplitude: Option<f32>,
}

impl StrikeEvent {
    pub fn new(timestamp: i64, latitude: f64, longitude: f64) -> Self {
        Self {
            timestamp,
            latitude,
            longitude,
            amplitude: None,
        }
    }

    pub fn location(&self) -> GeoLocation {
        GeoLocation::new(self.latitude, self.longitude)
    }

    pub fn is_valid(&self) -> bool {
        self.location().is_valid()
    }
}

/// A delivery of strikes from the data provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrikeBatch {
    pub strikes: Vec<StrikeEvent>,
    /// `false` for historical or initial backfill data.
    pub realtime: bool,
    /// Reference time of the delivery; anchors the alarm time window.
    pub received_at: i64,
}

impl StrikeBatch {
    pub fn realtime(strikes: Vec<StrikeEvent>, received_at: i64) -> Self {
        Self {
            strikes,
            realtime: true,
            received_at,
        }
    }

    pub fn historical(strikes: Vec<StrikeEvent>, received_at: i64) -> Self {
        Self {
            strikes,
            realtime: false,
            received_at,
        }
    }

    pub fn len(&self) -> usize {
        self.strikes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strikes.is_empty()
    }
}

/// Common error type for the alarm core.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AlarmError {
    #[error("invalid sector count: {0}")]
    InvalidSectorCount(usize),
    #[error("invalid range steps: {0}")]
    InvalidRangeSteps(String),
    #[error("invalid alarm interval: {0} ms")]
    InvalidInterval(i64),
    #[error("unknown measurement system: {0}")]
    UnknownMeasurementSystem(String),
    #[error("invalid preference {key}: {value}")]
    InvalidPreference { key: String, value: String },
}

pub type AlarmCoreResult<T> = Result<T, AlarmError>;

/// Host capability that delivers location fixes to the coordinator.
///
/// The coordinator only toggles the subscription; fixes arrive through
/// [`AlarmCoordinator::on_location_changed`](crate::alarm::AlarmCoordinator::on_location_changed).
pub trait LocationSource {
    fn request_updates(&mut self);
    fn remove_updates(&mut self);
}
