//! Wizard picks, planes and spells.

use crate::ids::{CitySpellEffectId, PickId, PickTypeId, PlaneNumber, ProductionTypeId, SpellId};
use serde::{Deserialize, Serialize};

/// A spell book or retort a wizard can hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickDef {
    pub id: PickId,
    pub pick_type: PickTypeId,

    /// Percentage boost to the unrest reduction and production of religious
    /// buildings (divine power, infernal power).
    #[serde(default)]
    pub religious_building_bonus_percentage: i32,
}

/// Doubled resource yielded by a wizard's fortress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortressProduction {
    pub production_type: ProductionTypeId,
    pub doubled_amount: i32,
}

/// Category of pick (books, retorts). Fortresses yield per pick of the type held.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickTypeDef {
    pub id: PickTypeId,
    #[serde(default)]
    pub fortress_productions: Vec<FortressProduction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaneDef {
    pub plane_number: PlaneNumber,
    /// Flat yield of a fortress standing on this plane.
    #[serde(default)]
    pub fortress_productions: Vec<FortressProduction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellDef {
    pub id: SpellId,

    /// Rebels calmed in every affected city. Negative values stir up unrest.
    #[serde(default)]
    pub unrest_reduction: Option<i32>,

    /// Curses target other wizards' cities; everything else helps the caster's own.
    #[serde(default)]
    pub detrimental: bool,
}

/// Effect a spell cast on a specific city has on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySpellEffectDef {
    pub id: CitySpellEffectId,

    #[serde(default)]
    pub unrest_reduction: Option<i32>,

    /// Added to the unrest percentage of the city.
    #[serde(default)]
    pub unrest_percentage: Option<i32>,

    #[serde(default)]
    pub productions: Vec<CitySpellEffectProduction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySpellEffectProduction {
    pub production_type: ProductionTypeId,
    #[serde(default)]
    pub doubled_amount: i32,
    #[serde(default)]
    pub percentage_bonus: i32,
    #[serde(default)]
    pub percentage_penalty: i32,
    /// Whole amount added after all percentages are applied.
    #[serde(default)]
    pub amount_after_percentages: i32,
}
