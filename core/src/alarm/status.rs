use crate::alarm::sector::AlarmSector;
use crate::geo::location::normalize_bearing;
use crate::prelude::{AlarmCoreResult, AlarmError};

/// Ordered set of sectors partitioning `[0, 360)`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmStatus {
    sectors: Vec<AlarmSector>,
    sector_width: f64,
}

impl AlarmStatus {
    pub fn new(sector_count: usize, range_count: usize) -> AlarmCoreResult<Self> {
        if sector_count == 0 {
            return Err(AlarmError::InvalidSectorCount(sector_count));
        }

        let sector_width = 360.0 / sector_count as f64;
        let sectors = (0..sector_count)
            .map(|index| {
                let min_bearing = index as f64 * sector_width;
                // the last sector closes exactly at 360 regardless of rounding
                let max_bearing = if index + 1 == sector_count {
                    360.0
                } else {
                    (index + 1) as f64 * sector_width
                };
                AlarmSector::new(index, min_bearing, max_bearing, range_count)
            })
            .collect();

        Ok(Self {
            sectors,
            sector_width,
        })
    }

    pub fn clear_results(&mut self) {
        self.sectors.iter_mut().for_each(AlarmSector::reset);
    }

    pub fn sectors(&self) -> &[AlarmSector] {
        &self.sectors
    }

    pub fn sector_width(&self) -> f64 {
        self.sector_width
    }

    /// Index of the sector whose `[min_bearing, max_bearing)` holds `bearing`.
    pub fn sector_index(&self, bearing: f64) -> usize {
        let normalized = normalize_bearing(bearing);
        let last = self.sectors.len() - 1;
        let mut index = ((normalized / self.sector_width).floor() as usize).min(last);
        // the division can land one off the stored bounds when the width is inexact
        while index > 0 && normalized < self.sectors[index].min_bearing() {
            index -= 1;
        }
        while index < last && normalized >= self.sectors[index].max_bearing() {
            index += 1;
        }
        index
    }

    pub fn sector_for_bearing_mut(&mut self, bearing: f64) -> &mut AlarmSector {
        let index = self.sector_index(bearing);
        &mut self.sectors[index]
    }

    /// Sector holding the globally nearest strike; first in order on ties.
    pub fn current_activity(&self) -> Option<&AlarmSector> {
        let mut best: Option<&AlarmSector> = None;
        for sector in &self.sectors {
            let Some(hit) = sector.nearest() else {
                continue;
            };
            let closer = match best.and_then(AlarmSector::nearest) {
                Some(current) => hit.distance < current.distance,
                None => true,
            };
            if closer {
                best = Some(sector);
            }
        }
        best
    }

    pub fn is_clear(&self) -> bool {
        self.sectors.iter().all(AlarmSector::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_sectors() {
        assert_eq!(
            AlarmStatus::new(0, 6),
            Err(AlarmError::InvalidSectorCount(0))
        );
    }

    #[test]
    fn sectors_partition_the_compass() {
        let status = AlarmStatus::new(7, 1).unwrap();
        let sectors = status.sectors();
        assert_eq!(sectors[0].min_bearing(), 0.0);
        assert_eq!(sectors[6].max_bearing(), 360.0);
        for pair in sectors.windows(2) {
            assert_eq!(pair[0].max_bearing(), pair[1].min_bearing());
        }
    }

    #[test]
    fn sector_index_is_stable_across_turns() {
        let status = AlarmStatus::new(8, 1).unwrap();
        for step in 0..720 {
            let bearing = step as f64 * 0.5;
            let index = status.sector_index(bearing);
            assert_eq!(index, status.sector_index(bearing + 360.0));
            assert!(status.sectors()[index].contains(bearing));
        }
        assert_eq!(status.sector_index(45.0), 1);
        assert_eq!(status.sector_index(-10.0), 7);
    }

    #[test]
    fn sector_boundaries_map_to_their_own_sector() {
        for count in 1..=360 {
            let status = AlarmStatus::new(count, 1).unwrap();
            for sector in status.sectors() {
                let at_min = status.sector_index(sector.min_bearing());
                assert_eq!(at_min, sector.index(), "{} sectors at {}", count, sector.min_bearing());
                let below_max = status.sector_index(sector.max_bearing() - 1e-9);
                assert_eq!(below_max, sector.index(), "{} sectors below {}", count, sector.max_bearing());
            }
        }

        let status = AlarmStatus::new(7, 1).unwrap();
        let boundary = status.sectors()[3].min_bearing();
        assert_eq!(status.sector_index(boundary), 3);
        assert!(status.sectors()[3].contains(boundary));

        let status = AlarmStatus::new(13, 1).unwrap();
        let boundary = status.sectors()[5].min_bearing();
        assert_eq!(status.sector_index(boundary), 5);
        assert_eq!(status.sector_index(boundary + 360.0), 5);
    }

    #[test]
    fn current_activity_prefers_first_sector_on_ties() {
        let mut status = AlarmStatus::new(8, 1).unwrap();
        assert!(status.current_activity().is_none());

        status.sector_for_bearing_mut(200.0).offer(3000.0, 200.0, 1);
        status.sector_for_bearing_mut(100.0).offer(3000.0, 100.0, 2);
        status.sector_for_bearing_mut(300.0).offer(8000.0, 300.0, 3);

        let sector = status.current_activity().unwrap();
        assert_eq!(sector.index(), 2);
        assert_eq!(sector.nearest().unwrap().bearing, 100.0);
    }

    #[test]
    fn clear_results_empties_every_sector() {
        let mut status = AlarmStatus::new(4, 2).unwrap();
        status.sector_for_bearing_mut(10.0).offer(100.0, 10.0, 1);
        status.sector_for_bearing_mut(190.0).offer(200.0, 190.0, 1);
        assert!(!status.is_clear());

        status.clear_results();
        assert!(status.is_clear());
        assert!(status.current_activity().is_none());
    }
}
