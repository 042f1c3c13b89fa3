pub mod config;
pub mod coordinator;
pub mod evaluator;
pub mod listener;
pub mod parameters;
pub mod result;
pub mod sector;
pub mod status;

pub use config::ConfigUpdate;
pub use coordinator::{AlarmCoordinator, AlarmState};
pub use evaluator::{AlarmEvaluator, EvaluationSummary};
pub use listener::{AlarmListener, ListenerId, ListenerRegistry};
pub use parameters::AlarmParameters;
pub use result::AlarmResult;
pub use sector::{AlarmSector, SectorHit};
pub use status::AlarmStatus;
