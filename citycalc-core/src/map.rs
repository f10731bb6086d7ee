//! Overland map snapshot: terrain cells and the cities on them.
//!
//! The map is a `width × height × depth` grid addressed by `(x, y, plane)`. Either
//! axis may wrap around, so all neighbour arithmetic goes through
//! [`MapSize::offset`].

use crate::config::MapSize;
use citycalc_data::{MapFeatureId, PlaneNumber, PlayerId, RaceId, TileTypeId};
use serde::{Deserialize, Serialize};

/// A cell address on the overland map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MapCoordinates {
    pub x: i32,
    pub y: i32,
    pub plane: PlaneNumber,
}

impl MapCoordinates {
    pub const fn new(x: i32, y: i32, plane: PlaneNumber) -> Self {
        Self { x, y, plane }
    }
}

impl std::fmt::Display for MapCoordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.plane)
    }
}

/// The four orthogonal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

impl MapSize {
    /// Whether the coordinates lie on the map (without wrapping).
    pub fn contains(&self, coords: &MapCoordinates) -> bool {
        coords.x >= 0
            && coords.x < self.width
            && coords.y >= 0
            && coords.y < self.height
            && coords.plane < self.depth
    }

    /// Move by `(dx, dy)`, wrapping on axes that wrap.
    ///
    /// Returns `None` when the move leaves the map on a non-wrapping axis.
    pub fn offset(&self, from: &MapCoordinates, dx: i32, dy: i32) -> Option<MapCoordinates> {
        let x = wrap_axis(from.x + dx, self.width, self.wraps_left_to_right)?;
        let y = wrap_axis(from.y + dy, self.height, self.wraps_top_to_bottom)?;
        Some(MapCoordinates::new(x, y, from.plane))
    }

    pub fn step(&self, from: &MapCoordinates, direction: Direction) -> Option<MapCoordinates> {
        let (dx, dy) = direction.delta();
        self.offset(from, dx, dy)
    }

    fn index(&self, coords: &MapCoordinates) -> Option<usize> {
        if !self.contains(coords) {
            return None;
        }
        let plane_size = (self.width * self.height) as usize;
        Some(
            coords.plane as usize * plane_size
                + (coords.y * self.width) as usize
                + coords.x as usize,
        )
    }
}

fn wrap_axis(value: i32, size: i32, wraps: bool) -> Option<i32> {
    if (0..size).contains(&value) {
        Some(value)
    } else if wraps && size > 0 {
        Some(value.rem_euclid(size))
    } else {
        None
    }
}

/// City data stored on the cell of the city centre.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityData {
    #[serde(default)]
    pub name: String,
    pub owner: PlayerId,
    pub race: RaceId,
    /// Citizens (not persons); 12,000 is a size 12 city.
    pub population: i32,
    /// Farmers needed to stop the city starving.
    #[serde(default)]
    pub minimum_farmers: i32,
    /// Extra farmers the owner assigned on top of the minimum.
    #[serde(default)]
    pub optional_farmers: i32,
    #[serde(default)]
    pub rebels: i32,
}

impl CityData {
    /// Population in whole persons.
    pub fn persons(&self) -> i32 {
        self.population / citycalc_data::defines::city::POPULATION_PER_PERSON
    }

    pub fn farmers(&self) -> i32 {
        self.minimum_farmers + self.optional_farmers
    }

    /// Persons who are neither farmers nor rebels.
    pub fn workers(&self) -> i32 {
        (self.persons() - self.farmers() - self.rebels).max(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainCell {
    #[serde(default)]
    pub tile_type: Option<TileTypeId>,
    #[serde(default)]
    pub map_feature: Option<MapFeatureId>,
    /// Corrupted tiles yield nothing to nearby cities.
    #[serde(default)]
    pub corrupted: bool,
    #[serde(default)]
    pub city: Option<CityData>,
}

/// Read-only terrain snapshot the calculations run over.
#[derive(Debug, Clone)]
pub struct OverlandMap {
    pub size: MapSize,
    cells: Vec<TerrainCell>,
}

impl OverlandMap {
    /// Create a map with every cell empty.
    pub fn new(size: MapSize) -> Self {
        let count = (size.width.max(0) * size.height.max(0)) as usize * size.depth as usize;
        Self {
            size,
            cells: vec![TerrainCell::default(); count],
        }
    }

    pub fn cell(&self, coords: &MapCoordinates) -> Option<&TerrainCell> {
        self.size.index(coords).and_then(|i| self.cells.get(i))
    }

    pub fn cell_mut(&mut self, coords: &MapCoordinates) -> Option<&mut TerrainCell> {
        self.size.index(coords).and_then(|i| self.cells.get_mut(i))
    }

    pub fn city(&self, coords: &MapCoordinates) -> Option<&CityData> {
        self.cell(coords).and_then(|c| c.city.as_ref())
    }

    /// Every city on the map, in plane / row / column order.
    pub fn cities(&self) -> impl Iterator<Item = (MapCoordinates, &CityData)> + '_ {
        let width = self.size.width.max(1);
        let plane_size = (self.size.width * self.size.height).max(1) as usize;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.city.as_ref().map(|city| {
                let plane = (i / plane_size) as PlaneNumber;
                let within = (i % plane_size) as i32;
                (
                    MapCoordinates::new(within % width, within / width, plane),
                    city,
                )
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_size(wrap_x: bool, wrap_y: bool) -> MapSize {
        MapSize {
            width: 10,
            height: 8,
            depth: 2,
            wraps_left_to_right: wrap_x,
            wraps_top_to_bottom: wrap_y,
            ..Default::default()
        }
    }

    #[test]
    fn test_offset_wraps_horizontally() {
        let size = small_size(true, false);
        let from = MapCoordinates::new(0, 3, 1);
        assert_eq!(size.offset(&from, -1, 0), Some(MapCoordinates::new(9, 3, 1)));
        assert_eq!(size.offset(&from, 0, -4), None);
    }

    #[test]
    fn test_offset_wraps_vertically() {
        let size = small_size(false, true);
        let from = MapCoordinates::new(5, 7, 0);
        assert_eq!(size.offset(&from, 0, 2), Some(MapCoordinates::new(5, 1, 0)));
        assert_eq!(size.offset(&MapCoordinates::new(9, 0, 0), 1, 0), None);
    }

    #[test]
    fn test_cells_are_per_plane() {
        let mut map = OverlandMap::new(small_size(true, false));
        let arcanus = MapCoordinates::new(4, 4, 0);
        let myrror = MapCoordinates::new(4, 4, 1);
        map.cell_mut(&arcanus).unwrap().tile_type = Some(TileTypeId::from("hills"));

        assert_eq!(
            map.cell(&arcanus).unwrap().tile_type,
            Some(TileTypeId::from("hills"))
        );
        assert!(map.cell(&myrror).unwrap().tile_type.is_none());
        assert!(map.cell(&MapCoordinates::new(4, 4, 2)).is_none());
    }

    #[test]
    fn test_cities_iterates_with_coordinates() {
        let mut map = OverlandMap::new(small_size(true, false));
        let location = MapCoordinates::new(7, 2, 1);
        map.cell_mut(&location).unwrap().city = Some(CityData {
            owner: 1,
            race: RaceId::from("high_men"),
            population: 4000,
            ..Default::default()
        });

        let cities: Vec<_> = map.cities().collect();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].0, location);
        assert_eq!(cities[0].1.persons(), 4);
    }

    #[test]
    fn test_city_workers() {
        let city = CityData {
            population: 9500,
            minimum_farmers: 3,
            optional_farmers: 1,
            rebels: 2,
            ..Default::default()
        };
        assert_eq!(city.persons(), 9);
        assert_eq!(city.farmers(), 4);
        assert_eq!(city.workers(), 3);
    }
}
