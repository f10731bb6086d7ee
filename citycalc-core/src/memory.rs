//! What the calculating player knows about buildings, units and spells.
//!
//! Flat lists, filtered by location and owner. The calculations never mutate them.

use crate::map::MapCoordinates;
use citycalc_data::{BuildingId, CitySpellEffectId, PlayerId, SpellId, UnitId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBuilding {
    pub building: BuildingId,
    pub location: MapCoordinates,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    #[default]
    Alive,
    Dead,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryUnit {
    /// Unique per unit instance, not per unit definition.
    pub id: u32,
    pub unit: UnitId,
    pub owner: PlayerId,
    pub location: MapCoordinates,
    #[serde(default)]
    pub status: UnitStatus,
}

/// A spell some wizard keeps cast, either overland or on a specific city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryMaintainedSpell {
    pub spell: SpellId,
    pub caster: PlayerId,
    /// Set for spells targeted at one city.
    #[serde(default)]
    pub city_location: Option<MapCoordinates>,
    #[serde(default)]
    pub city_spell_effect: Option<CitySpellEffectId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogOfWarMemory {
    pub buildings: Vec<MemoryBuilding>,
    pub units: Vec<MemoryUnit>,
    pub maintained_spells: Vec<MemoryMaintainedSpell>,
}

impl FogOfWarMemory {
    pub fn buildings_at<'a>(
        &'a self,
        location: &'a MapCoordinates,
    ) -> impl Iterator<Item = &'a MemoryBuilding> + 'a {
        self.buildings.iter().filter(move |b| &b.location == location)
    }

    pub fn has_building(&self, location: &MapCoordinates, building: &BuildingId) -> bool {
        self.buildings_at(location).any(|b| &b.building == building)
    }

    /// Living units of `owner` standing at `location`.
    pub fn alive_units_at<'a>(
        &'a self,
        location: &'a MapCoordinates,
        owner: PlayerId,
    ) -> impl Iterator<Item = &'a MemoryUnit> + 'a {
        self.units.iter().filter(move |u| {
            u.status == UnitStatus::Alive && u.owner == owner && &u.location == location
        })
    }

    /// Overland enchantments plus spells cast on the city at `location`.
    pub fn spells_affecting<'a>(
        &'a self,
        location: &'a MapCoordinates,
    ) -> impl Iterator<Item = &'a MemoryMaintainedSpell> + 'a {
        self.maintained_spells
            .iter()
            .filter(move |s| s.city_location.as_ref().is_none_or(|l| l == location))
    }
}
