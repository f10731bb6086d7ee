//! Scan of the cells a city collects from.
//!
//! The catchment is the `(2r + 1)²` square around the city minus its four corner
//! cells, so radius 2 covers 21 cells. Cells off a non-wrapping edge and
//! corrupted cells are skipped.

use crate::map::{MapCoordinates, OverlandMap};
use citycalc_data::{MapFeatureId, TileTypeId};
use rustc_hash::FxHashMap;

/// Insertion-ordered tally.
#[derive(Debug, Clone)]
pub struct OrderedCounts<K> {
    index: FxHashMap<K, usize>,
    counts: Vec<(K, i32)>,
}

impl<K> Default for OrderedCounts<K> {
    fn default() -> Self {
        Self {
            index: FxHashMap::default(),
            counts: Vec::new(),
        }
    }
}

impl<K: Clone + Eq + std::hash::Hash> OrderedCounts<K> {
    pub fn add(&mut self, key: &K) {
        match self.index.get(key) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(key.clone(), self.counts.len());
                self.counts.push((key.clone(), 1));
            }
        }
    }

    pub fn get(&self, key: &K) -> i32 {
        self.index.get(key).map_or(0, |&i| self.counts[i].1)
    }

    /// `(key, count)` in order of first sighting.
    pub fn iter(&self) -> impl Iterator<Item = (&K, i32)> {
        self.counts.iter().map(|(k, c)| (k, *c))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CitySurvey {
    pub cells: Vec<MapCoordinates>,
    pub tile_types: OrderedCounts<TileTypeId>,
    pub map_features: OrderedCounts<MapFeatureId>,
}

/// Whether `(dx, dy)` lies inside the catchment of the given radius.
pub fn within_city_radius(dx: i32, dy: i32, radius: i32) -> bool {
    dx.abs() <= radius && dy.abs() <= radius && !(dx.abs() == radius && dy.abs() == radius)
}

/// Tally the tile types and map features around `centre`.
pub fn survey_city_area(map: &OverlandMap, centre: &MapCoordinates, radius: i32) -> CitySurvey {
    let mut survey = CitySurvey::default();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if !within_city_radius(dx, dy, radius) {
                continue;
            }
            let Some(coords) = map.size.offset(centre, dx, dy) else {
                continue;
            };
            let Some(cell) = map.cell(&coords) else {
                continue;
            };
            if cell.corrupted {
                continue;
            }
            if let Some(tile_type) = &cell.tile_type {
                survey.tile_types.add(tile_type);
            }
            if let Some(feature) = &cell.map_feature {
                survey.map_features.add(feature);
            }
            survey.cells.push(coords);
        }
    }
    log::trace!(
        "Surveyed {} cells around {}",
        survey.cells.len(),
        centre
    );
    survey
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MapBuilder;

    #[test]
    fn test_radius_two_covers_21_cells() {
        let map = MapBuilder::new(20, 20).fill("grassland").build();
        let survey = survey_city_area(&map, &MapCoordinates::new(10, 10, 0), 2);
        assert_eq!(survey.cells.len(), 21);
        assert_eq!(survey.tile_types.get(&TileTypeId::from("grassland")), 21);
    }

    #[test]
    fn test_corners_excluded() {
        assert!(within_city_radius(2, 1, 2));
        assert!(within_city_radius(0, 0, 2));
        assert!(!within_city_radius(2, 2, 2));
        assert!(!within_city_radius(-2, 2, 2));
        assert!(!within_city_radius(3, 0, 2));
    }

    #[test]
    fn test_survey_wraps_left_edge() {
        let map = MapBuilder::new(20, 20)
            .fill("grassland")
            .tile(19, 10, "hills")
            .build();
        let survey = survey_city_area(&map, &MapCoordinates::new(0, 10, 0), 2);
        assert_eq!(survey.cells.len(), 21);
        assert_eq!(survey.tile_types.get(&TileTypeId::from("hills")), 1);
    }

    #[test]
    fn test_survey_clips_top_edge() {
        let map = MapBuilder::new(20, 20).fill("grassland").build();
        // Rows y = -2 and y = -1 are off the map: 21 - (3 + 5) cells remain
        let survey = survey_city_area(&map, &MapCoordinates::new(10, 0, 0), 2);
        assert_eq!(survey.cells.len(), 13);
    }

    #[test]
    fn test_corrupted_cells_skipped() {
        let map = MapBuilder::new(20, 20)
            .fill("grassland")
            .feature(11, 10, "gold_ore")
            .corrupt(11, 10)
            .build();
        let survey = survey_city_area(&map, &MapCoordinates::new(10, 10, 0), 2);
        assert_eq!(survey.cells.len(), 20);
        assert!(survey.map_features.is_empty());
    }

    #[test]
    fn test_ordered_counts_keep_first_sighting_order() {
        let mut counts = OrderedCounts::default();
        for id in ["hills", "mountains", "hills", "forest", "mountains", "hills"] {
            counts.add(&TileTypeId::from(id));
        }
        let order: Vec<(&str, i32)> = counts.iter().map(|(k, c)| (k.as_str(), c)).collect();
        assert_eq!(order, vec![("hills", 3), ("mountains", 2), ("forest", 1)]);
    }
}
