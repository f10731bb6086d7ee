//! # City Calculation Rule Data
//!
//! Static game-rule records consumed by the city calculations: tile types,
//! map features, races, buildings, tax rates, production types, wizard picks,
//! planes, spells and units.
//!
//! Records are read through the [`RuleLookup`] trait. [`RuleDatabase`] is the
//! in-memory implementation, built in code or loaded from a JSON rule file.

pub mod buildings;
pub mod database;
pub mod defines;
pub mod economy;
pub mod ids;
pub mod lookup;
pub mod magic;
pub mod races;
pub mod terrain;
pub mod units;

pub use buildings::{BuildingDef, BuildingEffect};
pub use database::{DataError, RuleDatabase, RuleFile};
pub use economy::{ProductionTypeDef, RoundingDirection, TaxRateDef};
pub use ids::{
    BuildingId, CitySpellEffectId, MapFeatureId, PickId, PickTypeId, PlaneNumber, PlayerId,
    PopulationTaskId, ProductionTypeId, RaceId, SpellId, TaxRateId, TileTypeId, UnitId,
};
pub use lookup::{LookupError, RecordKind, RuleLookup};
pub use magic::{
    CitySpellEffectDef, CitySpellEffectProduction, FortressProduction, PickDef, PickTypeDef,
    PlaneDef, SpellDef,
};
pub use races::{RaceDef, RacePopulationTask, RaceUnrest, TaskProduction};
pub use terrain::{MapFeatureDef, MapFeatureProduction, TileTypeDef};
pub use units::{MagicRealm, UnitDef};
