use crate::config::MapSize;
use crate::map::{MapCoordinates, OverlandMap};
use tracing::instrument;

/// One flag per map cell: whether a new city is too close to an existing one there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityRadiusMap {
    size: MapSize,
    cells: Vec<bool>,
}

impl CityRadiusMap {
    fn index(&self, coords: &MapCoordinates) -> Option<usize> {
        if !self.size.contains(coords) {
            return None;
        }
        let plane_size = (self.size.width * self.size.height) as usize;
        Some(coords.plane as usize * plane_size + (coords.y * self.size.width + coords.x) as usize)
    }

    pub fn get(&self, coords: &MapCoordinates) -> bool {
        self.index(coords).is_some_and(|i| self.cells[i])
    }

    /// Number of flagged cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }
}

/// Flag every cell within `city_separation` (square distance, same plane) of an existing city.
#[instrument(skip_all, name = "city_radius")]
pub fn mark_within_existing_city_radius(map: &OverlandMap) -> CityRadiusMap {
    let size = map.size.clone();
    let count = (size.width.max(0) * size.height.max(0)) as usize * size.depth as usize;
    let mut result = CityRadiusMap {
        size,
        cells: vec![false; count],
    };

    let separation = map.size.city_separation;
    for (location, _) in map.cities() {
        for dy in -separation..=separation {
            for dx in -separation..=separation {
                if let Some(coords) = map.size.offset(&location, dx, dy) {
                    if let Some(i) = result.index(&coords) {
                        result.cells[i] = true;
                    }
                }
            }
        }
    }
    log::debug!("{} cells are too close to an existing city", result.count());
    result
}
