//! Per-resource production breakdowns.
//!
//! A [`ProductionBreakdown`] records every contribution to one resource line and,
//! once finalized, every intermediate value of the halve / bonus / penalty / cap
//! sequence. Nothing is thrown away: the UI and the turn log both read the audit
//! trail, not just the final figure.

use crate::doubled::Doubled;
use crate::map::MapCoordinates;
use citycalc_data::{
    BuildingId, MapFeatureId, PickTypeId, PlaneNumber, PopulationTaskId, ProductionTypeId,
    RoundingDirection, SpellId, TaxRateId, TileTypeId,
};
use serde::Serialize;
use std::cmp::Reverse;

/// Contributions of one tile type within the city radius.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TileTypeProduction {
    pub tile_type: TileTypeId,
    pub count: i32,
    pub doubled_amount_each: Doubled,
    pub doubled_amount: Doubled,
    pub percentage_bonus_each: i32,
    pub percentage_bonus: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PopulationTaskProduction {
    pub task: PopulationTaskId,
    pub count: i32,
    /// Race yield per person plus any building per-person bonus.
    pub doubled_amount_each: Doubled,
    pub doubled_amount: Doubled,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildingProduction {
    pub building: BuildingId,
    pub doubled_production_amount: Doubled,
    pub consumption_amount: i32,
    pub percentage_bonus: i32,
    /// Retort boost applied to the production; 0 when it did not apply.
    pub religious_retort_percentage: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MapFeatureProduction {
    pub map_feature: MapFeatureId,
    pub count: i32,
    pub doubled_amount_each: Doubled,
    pub race_mineral_multiplier: i32,
    pub doubled_amount_after_race: Doubled,
    pub building_mineral_percentage: i32,
    pub doubled_amount: Doubled,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PickTypeProduction {
    pub pick_type: PickTypeId,
    pub count: i32,
    pub doubled_amount_each: Doubled,
    pub doubled_amount: Doubled,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaneProduction {
    pub plane: PlaneNumber,
    pub doubled_amount: Doubled,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpellProduction {
    pub spell: SpellId,
    pub doubled_amount: Doubled,
    pub percentage_bonus: i32,
    pub percentage_penalty: i32,
    pub amount_after_percentages: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaxProduction {
    pub tax_rate: TaxRateId,
    /// Persons paying tax (everyone but rebels).
    pub persons: i32,
    pub doubled_gold_per_person: Doubled,
    pub doubled_amount: Doubled,
}

/// Gold trade bonus, as a percentage of gold income.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TradeBonusBreakdown {
    pub from_tile_type: i32,
    pub from_roads: i32,
    pub from_race: i32,
    pub uncapped: i32,
    /// Persons used to work out the cap.
    pub population: i32,
    pub capped: i32,
}

/// Everything known about one resource line of one city.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductionBreakdown {
    pub production_type: ProductionTypeId,

    // Accumulated inputs
    pub doubled_production_amount: Doubled,
    pub percentage_bonus: i32,
    pub percentage_penalty: i32,
    pub amount_after_percentages: i32,
    pub consumption_amount: i32,

    // Sources
    pub tile_type_productions: Vec<TileTypeProduction>,
    pub population_task_productions: Vec<PopulationTaskProduction>,
    pub building_productions: Vec<BuildingProduction>,
    pub map_feature_productions: Vec<MapFeatureProduction>,
    pub pick_type_productions: Vec<PickTypeProduction>,
    pub plane_productions: Vec<PlaneProduction>,
    pub spell_productions: Vec<SpellProduction>,
    pub tax_production: Option<TaxProduction>,
    pub trade_bonus: Option<TradeBonusBreakdown>,

    // Filled in by finalization
    pub rounding_direction: RoundingDirection,
    pub difficulty_level_multiplier_applies: bool,
    pub amount_before_percentages: i32,
    pub amount_plus_percentage: i32,
    pub amount_minus_percentage: i32,
    /// Food the surrounding terrain supports; only set on rations.
    pub food_production_from_terrain_tiles: Option<i32>,
    pub amount_after_overfarming: i32,
    pub base_amount: i32,
    pub difficulty_level_multiplier: i32,
    pub total_adjusted_for_difficulty_level: i32,
    pub capped_production_amount: i32,

    // Trade goods
    pub convert_from_production_type: Option<ProductionTypeId>,
    pub convert_from_production_amount: i32,
    pub convert_to_production_amount: i32,
}

/// Sort by descending quantity, keeping insertion order among equals.
fn sort_descending<T>(list: &mut [T], quantity: impl Fn(&T) -> i32) {
    list.sort_by_key(|c| Reverse(quantity(c)));
}

impl ProductionBreakdown {
    pub fn new(production_type: ProductionTypeId) -> Self {
        Self {
            production_type,
            difficulty_level_multiplier: 100,
            ..Default::default()
        }
    }

    /// Production after finalization, less upkeep, plus trade goods conversion.
    pub fn net_total(&self) -> i32 {
        self.capped_production_amount - self.consumption_amount + self.convert_to_production_amount
    }

    /// Add the contribution of every tile of one type.
    pub fn add_tile_type(&mut self, entry: TileTypeProduction) {
        self.doubled_production_amount += entry.doubled_amount;
        self.percentage_bonus += entry.percentage_bonus;
        self.tile_type_productions.push(entry);
    }

    /// Put every contribution list in display order.
    pub fn sort_contributions(&mut self) {
        sort_descending(&mut self.tile_type_productions, |c| {
            c.doubled_amount.raw() + c.percentage_bonus
        });
        sort_descending(&mut self.population_task_productions, |c| c.doubled_amount.raw());
        sort_descending(&mut self.building_productions, |c| {
            c.doubled_production_amount.raw() + c.consumption_amount * 2 + c.percentage_bonus
        });
        sort_descending(&mut self.map_feature_productions, |c| c.doubled_amount.raw());
        sort_descending(&mut self.pick_type_productions, |c| c.doubled_amount.raw());
        sort_descending(&mut self.plane_productions, |c| c.doubled_amount.raw());
        sort_descending(&mut self.spell_productions, |c| {
            c.doubled_amount.raw() + c.percentage_bonus + c.amount_after_percentages * 2
        });
    }
}

/// Every resource line of one city, in order of first contribution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductionBreakdownSet {
    /// City the set was calculated for.
    pub location: Option<MapCoordinates>,
    breakdowns: Vec<ProductionBreakdown>,
}

impl ProductionBreakdownSet {
    pub fn new(location: MapCoordinates) -> Self {
        Self {
            location: Some(location),
            breakdowns: Vec::new(),
        }
    }

    pub fn get(&self, production_type: &str) -> Option<&ProductionBreakdown> {
        self.breakdowns
            .iter()
            .find(|b| b.production_type.as_str() == production_type)
    }

    pub fn get_mut(&mut self, production_type: &str) -> Option<&mut ProductionBreakdown> {
        self.breakdowns
            .iter_mut()
            .find(|b| b.production_type.as_str() == production_type)
    }

    /// The breakdown for a resource, created empty on first use.
    pub fn entry(&mut self, production_type: &ProductionTypeId) -> &mut ProductionBreakdown {
        let index = match self
            .breakdowns
            .iter()
            .position(|b| &b.production_type == production_type)
        {
            Some(index) => index,
            None => {
                self.breakdowns
                    .push(ProductionBreakdown::new(production_type.clone()));
                self.breakdowns.len() - 1
            }
        };
        &mut self.breakdowns[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductionBreakdown> {
        self.breakdowns.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ProductionBreakdown> {
        self.breakdowns.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.breakdowns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breakdowns.is_empty()
    }

    /// Net total of one resource; 0 when the city has no such line.
    pub fn net_total(&self, production_type: &str) -> i32 {
        self.get(production_type).map_or(0, ProductionBreakdown::net_total)
    }
}
