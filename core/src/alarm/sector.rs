use serde::{Deserialize, Serialize};

/// Closest strike observed in a sector during one evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorHit {
    /// Meters from the reference location.
    pub distance: f64,
    pub bearing: f64,
    pub timestamp: i64,
}

/// One angular wedge of the compass, `[min_bearing, max_bearing)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmSector {
    index: usize,
    min_bearing: f64,
    max_bearing: f64,
    nearest: Option<SectorHit>,
    range_counts: Vec<usize>,
    latest_time: Option<i64>,
}

impl AlarmSector {
    pub fn new(index: usize, min_bearing: f64, max_bearing: f64, range_count: usize) -> Self {
        Self {
            index,
            min_bearing,
            max_bearing,
            nearest: None,
            range_counts: vec![0; range_count],
            latest_time: None,
        }
    }

    /// Forgets everything recorded during the previous pass.
    pub fn reset(&mut self) {
        self.nearest = None;
        self.range_counts.iter_mut().for_each(|count| *count = 0);
        self.latest_time = None;
    }

    /// Keeps the strike if it is strictly closer than the current minimum.
    pub fn offer(&mut self, distance: f64, bearing: f64, timestamp: i64) -> bool {
        let closer = match self.nearest {
            Some(current) => distance < current.distance,
            None => true,
        };
        if closer {
            self.nearest = Some(SectorHit {
                distance,
                bearing,
                timestamp,
            });
        }
        closer
    }

    /// Counts a strike in its range tier; out-of-bounds tiers are ignored.
    pub fn record_strike(&mut self, range_index: usize, timestamp: i64) {
        if let Some(count) = self.range_counts.get_mut(range_index) {
            *count += 1;
            self.latest_time = Some(self.latest_time.map_or(timestamp, |t| t.max(timestamp)));
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn min_bearing(&self) -> f64 {
        self.min_bearing
    }

    pub fn max_bearing(&self) -> f64 {
        self.max_bearing
    }

    pub fn contains(&self, bearing: f64) -> bool {
        bearing >= self.min_bearing && bearing < self.max_bearing
    }

    pub fn nearest(&self) -> Option<&SectorHit> {
        self.nearest.as_ref()
    }

    pub fn range_counts(&self) -> &[usize] {
        &self.range_counts
    }

    pub fn strike_count(&self) -> usize {
        self.range_counts.iter().sum()
    }

    pub fn latest_time(&self) -> Option<i64> {
        self.latest_time
    }

    /// Innermost tier holding at least one strike.
    pub fn closest_range(&self) -> Option<usize> {
        self.range_counts.iter().position(|count| *count > 0)
    }

    pub fn is_empty(&self) -> bool {
        self.nearest.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offer_keeps_strictly_smaller_distance() {
        let mut sector = AlarmSector::new(0, 0.0, 45.0, 3);
        assert!(sector.offer(5000.0, 10.0, 1));
        assert!(!sector.offer(5000.0, 20.0, 2));
        assert!(!sector.offer(7000.0, 30.0, 3));
        assert_eq!(sector.nearest().map(|hit| hit.bearing), Some(10.0));

        assert!(sector.offer(1000.0, 40.0, 4));
        let hit = sector.nearest().unwrap();
        assert_eq!((hit.distance, hit.bearing, hit.timestamp), (1000.0, 40.0, 4));
    }

    #[test]
    fn reset_empties_sector() {
        let mut sector = AlarmSector::new(2, 90.0, 135.0, 2);
        sector.offer(100.0, 100.0, 7);
        sector.record_strike(1, 7);
        sector.record_strike(1, 9);
        assert_eq!(sector.strike_count(), 2);
        assert_eq!(sector.latest_time(), Some(9));
        assert_eq!(sector.closest_range(), Some(1));

        sector.reset();
        assert!(sector.is_empty());
        assert_eq!(sector.strike_count(), 0);
        assert_eq!(sector.latest_time(), None);
        assert_eq!(sector.closest_range(), None);
    }

    #[test]
    fn range_is_lower_inclusive() {
        let sector = AlarmSector::new(1, 45.0, 90.0, 1);
        assert!(sector.contains(45.0));
        assert!(!sector.contains(90.0));
    }
}
