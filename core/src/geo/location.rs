use serde::{Deserialize, Serialize};

/// Mean earth radius in meters (IUGG).
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= 90.0
            && self.longitude.abs() <= 180.0
    }

    /// Great-circle distance in meters (haversine).
    pub fn distance_to(&self, other: &GeoLocation) -> f64 {
        let phi1 = self.latitude.to_radians();
        let phi2 = other.latitude.to_radians();
        let d_phi = phi2 - phi1;
        let d_lambda = (other.longitude - self.longitude).to_radians();

        let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().min(1.0).asin()
    }

    /// Initial bearing towards `other` in degrees, normalized to `[0, 360)`.
    pub fn bearing_to(&self, other: &GeoLocation) -> f64 {
        let phi1 = self.latitude.to_radians();
        let phi2 = other.latitude.to_radians();
        let d_lambda = (other.longitude - self.longitude).to_radians();

        let y = d_lambda.sin() * phi2.cos();
        let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
        normalize_bearing(y.atan2(x).to_degrees())
    }

    /// Point reached by travelling `distance` meters along `bearing` degrees.
    pub fn destination(&self, bearing: f64, distance: f64) -> GeoLocation {
        let delta = distance / EARTH_RADIUS_M;
        let theta = bearing.to_radians();
        let phi1 = self.latitude.to_radians();
        let lambda1 = self.longitude.to_radians();

        let phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos()).asin();
        let lambda2 = lambda1
            + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * phi2.sin());

        let longitude = (lambda2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
        GeoLocation::new(phi2.to_degrees(), longitude)
    }
}

/// Normalize a bearing in degrees to `[0, 360)`.
pub fn normalize_bearing(bearing: f64) -> f64 {
    let normalized = bearing.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let origin = GeoLocation::new(0.0, 0.0);
        let north = GeoLocation::new(1.0, 0.0);
        let distance = origin.distance_to(&north);
        assert!((distance - 111_195.0).abs() < 10.0, "distance {}", distance);
        assert_eq!(origin.bearing_to(&north), 0.0);
    }

    #[test]
    fn bearing_covers_cardinal_directions() {
        let origin = GeoLocation::new(0.0, 0.0);
        assert!((origin.bearing_to(&GeoLocation::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((origin.bearing_to(&GeoLocation::new(-1.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((origin.bearing_to(&GeoLocation::new(0.0, -1.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn destination_inverts_distance_and_bearing() {
        let origin = GeoLocation::new(48.1, 11.6);
        let target = origin.destination(10.0, 5000.0);
        assert!((origin.distance_to(&target) - 5000.0).abs() < 1e-3);
        assert!((origin.bearing_to(&target) - 10.0).abs() < 1e-6);
    }

    #[test]
    fn invalid_coordinates_are_rejected() {
        assert!(!GeoLocation::new(f64::NAN, 0.0).is_valid());
        assert!(!GeoLocation::new(0.0, f64::INFINITY).is_valid());
        assert!(!GeoLocation::new(91.0, 0.0).is_valid());
        assert!(GeoLocation::new(-90.0, 180.0).is_valid());
    }

    #[test]
    fn normalize_bearing_wraps_into_range() {
        assert_eq!(normalize_bearing(360.0), 0.0);
        assert_eq!(normalize_bearing(-90.0), 270.0);
        assert_eq!(normalize_bearing(725.0), 5.0);
        assert_eq!(normalize_bearing(-1e-20), 0.0);
    }
}
