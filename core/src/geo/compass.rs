use std::fmt;

use serde::{Deserialize, Serialize};

use super::location::normalize_bearing;

/// 8-point compass direction used when rendering alarm messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompassDirection {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassDirection {
    const ALL: [CompassDirection; 8] = [
        CompassDirection::N,
        CompassDirection::NE,
        CompassDirection::E,
        CompassDirection::SE,
        CompassDirection::S,
        CompassDirection::SW,
        CompassDirection::W,
        CompassDirection::NW,
    ];

    /// Nearest compass point for a bearing; each point covers ±22.5°.
    pub fn from_bearing(bearing: f64) -> Self {
        let shifted = normalize_bearing(bearing + 22.5);
        let index = (shifted / 45.0).floor() as usize % Self::ALL.len();
        Self::ALL[index]
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompassDirection::N => "N",
            CompassDirection::NE => "NE",
            CompassDirection::E => "E",
            CompassDirection::SE => "SE",
            CompassDirection::S => "S",
            CompassDirection::SW => "SW",
            CompassDirection::W => "W",
            CompassDirection::NW => "NW",
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_bearings_to_compass_points() {
        assert_eq!(CompassDirection::from_bearing(0.0), CompassDirection::N);
        assert_eq!(CompassDirection::from_bearing(10.0), CompassDirection::N);
        assert_eq!(CompassDirection::from_bearing(22.5), CompassDirection::NE);
        assert_eq!(CompassDirection::from_bearing(180.0), CompassDirection::S);
        assert_eq!(CompassDirection::from_bearing(225.0), CompassDirection::SW);
        assert_eq!(CompassDirection::from_bearing(350.0), CompassDirection::N);
        assert_eq!(CompassDirection::from_bearing(-45.0), CompassDirection::NW);
    }
}
