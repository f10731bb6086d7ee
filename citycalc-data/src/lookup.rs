//! Read-only access to static rule records.

use crate::buildings::BuildingDef;
use crate::economy::{ProductionTypeDef, TaxRateDef};
use crate::ids::{
    BuildingId, CitySpellEffectId, MapFeatureId, PickId, PlaneNumber,
    ProductionTypeId, RaceId, SpellId, TaxRateId, TileTypeId, UnitId,
};
use crate::magic::{CitySpellEffectDef, PickDef, PickTypeDef, PlaneDef, SpellDef};
use crate::races::RaceDef;
use crate::terrain::{MapFeatureDef, TileTypeDef};
use crate::units::UnitDef;
use std::fmt;
use thiserror::Error;

/// Kind of record a lookup was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    TileType,
    MapFeature,
    Race,
    Building,
    TaxRate,
    ProductionType,
    Pick,
    PickType,
    Plane,
    Spell,
    CitySpellEffect,
    Unit,
    Player,
    City,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::TileType => "Tile type",
            RecordKind::MapFeature => "Map feature",
            RecordKind::Race => "Race",
            RecordKind::Building => "Building",
            RecordKind::TaxRate => "Tax rate",
            RecordKind::ProductionType => "Production type",
            RecordKind::Pick => "Pick",
            RecordKind::PickType => "Pick type",
            RecordKind::Plane => "Plane",
            RecordKind::Spell => "Spell",
            RecordKind::CitySpellEffect => "City spell effect",
            RecordKind::Unit => "Unit",
            RecordKind::Player => "Player",
            RecordKind::City => "City",
        };
        f.write_str(name)
    }
}

/// A record ID had no matching definition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} \"{id}\" not found (looked up by {caller})")]
pub struct LookupError {
    pub kind: RecordKind,
    pub id: String,
    /// Name of the operation that needed the record.
    pub caller: &'static str,
}

impl LookupError {
    pub fn new(kind: RecordKind, id: impl fmt::Display, caller: &'static str) -> Self {
        Self {
            kind,
            id: id.to_string(),
            caller,
        }
    }
}

/// Find-by-ID access to every kind of static rule record.
///
/// The calculations only ever read through this trait, so any key/record
/// store (in-memory fixture, database cache) can back them.
pub trait RuleLookup {
    fn find_tile_type(&self, id: &TileTypeId, caller: &'static str) -> Result<&TileTypeDef, LookupError>;
    fn find_map_feature(&self, id: &MapFeatureId, caller: &'static str) -> Result<&MapFeatureDef, LookupError>;
    fn find_race(&self, id: &RaceId, caller: &'static str) -> Result<&RaceDef, LookupError>;
    fn find_building(&self, id: &BuildingId, caller: &'static str) -> Result<&BuildingDef, LookupError>;
    fn find_tax_rate(&self, id: &TaxRateId, caller: &'static str) -> Result<&TaxRateDef, LookupError>;
    fn find_production_type(&self, id: &ProductionTypeId, caller: &'static str) -> Result<&ProductionTypeDef, LookupError>;
    fn find_pick(&self, id: &PickId, caller: &'static str) -> Result<&PickDef, LookupError>;
    fn find_plane(&self, plane: PlaneNumber, caller: &'static str) -> Result<&PlaneDef, LookupError>;
    fn find_spell(&self, id: &SpellId, caller: &'static str) -> Result<&SpellDef, LookupError>;
    fn find_city_spell_effect(&self, id: &CitySpellEffectId, caller: &'static str) -> Result<&CitySpellEffectDef, LookupError>;
    fn find_unit(&self, id: &UnitId, caller: &'static str) -> Result<&UnitDef, LookupError>;

    /// All pick types, in definition order.
    fn pick_types(&self) -> Vec<&PickTypeDef>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_message_names_key_and_caller() {
        let err = LookupError::new(RecordKind::Building, "granary", "calculate_city_growth_rate");
        let msg = err.to_string();
        assert!(msg.contains("Building"));
        assert!(msg.contains("granary"));
        assert!(msg.contains("calculate_city_growth_rate"));
    }
}
