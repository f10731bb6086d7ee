//! Read-only inputs shared by every calculation of a turn.

use crate::config::DifficultyLevel;
use crate::map::{CityData, MapCoordinates, OverlandMap};
use crate::memory::FogOfWarMemory;
use crate::players::PlayerDirectory;
use citycalc_data::{defines, BuildingId, LookupError, PlayerId, RaceId, RecordKind, RuleLookup};

/// Borrowed snapshots a city calculation reads.
///
/// Nothing here is mutated, so one context can be shared by every worker of a
/// parallel batch.
#[derive(Clone, Copy)]
pub struct CityContext<'a> {
    pub rules: &'a (dyn RuleLookup + Sync),
    pub map: &'a OverlandMap,
    pub memory: &'a FogOfWarMemory,
    pub players: &'a (dyn PlayerDirectory + Sync),
    pub difficulty: &'a DifficultyLevel,
}

impl<'a> CityContext<'a> {
    pub fn new(
        rules: &'a (dyn RuleLookup + Sync),
        map: &'a OverlandMap,
        memory: &'a FogOfWarMemory,
        players: &'a (dyn PlayerDirectory + Sync),
        difficulty: &'a DifficultyLevel,
    ) -> Self {
        Self {
            rules,
            map,
            memory,
            players,
            difficulty,
        }
    }

    /// The city at `location`, or a lookup error naming the caller.
    pub fn city_at(
        &self,
        location: &MapCoordinates,
        caller: &'static str,
    ) -> Result<&'a CityData, LookupError> {
        self.map
            .city(location)
            .ok_or_else(|| LookupError::new(RecordKind::City, location, caller))
    }

    /// Race of the city holding `player`'s fortress, if they still have one.
    pub fn find_capital_race(&self, player: PlayerId) -> Option<&'a RaceId> {
        let fortress = BuildingId::from(defines::city::FORTRESS_BUILDING);
        self.memory
            .buildings
            .iter()
            .filter(|b| b.building == fortress)
            .filter_map(|b| self.map.city(&b.location))
            .find(|c| c.owner == player)
            .map(|c| &c.race)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBuilding;
    use crate::players::PlayerDetails;
    use crate::testing::{city, fixture_rules, MapBuilder};

    #[test]
    fn test_find_capital_race() {
        let rules = fixture_rules();
        let map = MapBuilder::new(20, 20)
            .fill("grassland")
            .city(3, 3, city(1, "klackons", 5000))
            .city(9, 3, city(1, "high_men", 8000))
            .city(15, 3, city(2, "dwarves", 8000))
            .build();
        let memory = FogOfWarMemory {
            buildings: vec![
                MemoryBuilding {
                    building: "fortress".into(),
                    location: MapCoordinates::new(9, 3, 0),
                },
                MemoryBuilding {
                    building: "fortress".into(),
                    location: MapCoordinates::new(15, 3, 0),
                },
            ],
            ..Default::default()
        };
        let players = vec![PlayerDetails::human(1), PlayerDetails::human(2), PlayerDetails::human(3)];
        let difficulty = DifficultyLevel::default();
        let ctx = CityContext::new(&rules, &map, &memory, &players, &difficulty);

        assert_eq!(ctx.find_capital_race(1), Some(&RaceId::from("high_men")));
        assert_eq!(ctx.find_capital_race(2), Some(&RaceId::from("dwarves")));
        assert_eq!(ctx.find_capital_race(3), None);
    }
}
