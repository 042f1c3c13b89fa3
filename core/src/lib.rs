//! Sector-based lightning proximity alarm.
//!
//! Incoming strike batches are bucketed into compass sectors around the
//! device location; the nearest strike per sector drives a single
//! worst-case alarm signal that is fanned out to registered listeners.

pub mod alarm;
pub mod geo;
pub mod prelude;
pub mod telemetry;

pub use alarm::{AlarmCoordinator, AlarmListener, AlarmParameters, AlarmResult, ConfigUpdate};
pub use prelude::{AlarmError, LocationSource, StrikeBatch, StrikeEvent};
