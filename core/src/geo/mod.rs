pub mod compass;
pub mod location;
pub mod units;

pub use compass::CompassDirection;
pub use location::GeoLocation;
pub use units::MeasurementSystem;
