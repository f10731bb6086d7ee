//! Population growth and decline.

use crate::context::CityContext;
use crate::doubled::percent_of;
use crate::error::CalcResult;
use crate::map::MapCoordinates;
use citycalc_data::defines::{city, growth};
use citycalc_data::BuildingId;
use serde::Serialize;
use tracing::instrument;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildingGrowthBonus {
    pub building: BuildingId,
    pub growth_rate_bonus: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GrowingBreakdown {
    pub current_population: i32,
    pub maximum_population: i32,
    pub base_growth_rate: i32,
    pub racial_growth_modifier: i32,
    pub building_modifiers: Vec<BuildingGrowthBonus>,
    pub total_growth_rate: i32,
    pub difficulty_level_multiplier: i32,
    pub total_growth_rate_adjusted_for_difficulty_level: i32,
    /// Never more than the room left below the maximum.
    pub capped_total: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DyingBreakdown {
    pub current_population: i32,
    pub maximum_population: i32,
    pub base_death_rate: i32,
    pub city_death_rate: i32,
    /// Negative; never takes the city below the minimum population.
    pub capped_total: i32,
}

/// Whether a city is growing, shrinking or neither this turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GrowthRateBreakdown {
    Stable {
        current_population: i32,
        maximum_population: i32,
    },
    Growing(GrowingBreakdown),
    Dying(DyingBreakdown),
}

impl GrowthRateBreakdown {
    /// Population change this turn.
    pub fn final_total(&self) -> i32 {
        match self {
            GrowthRateBreakdown::Stable { .. } => 0,
            GrowthRateBreakdown::Growing(g) => g.capped_total,
            GrowthRateBreakdown::Dying(d) => d.capped_total,
        }
    }
}

/// Base growth for a city of `current_k` persons below a maximum of `maximum_k`.
pub fn base_growth_rate(current_k: i32, maximum_k: i32) -> i32 {
    ((maximum_k - current_k + 1) / 2) * growth::GROWTH_PER_STEP
}

/// Work out how the population of the city at `location` changes this turn.
///
/// `max_city_size` is in persons (thousands of citizens) and treated as at least 1.
/// A city over its maximum by less than one whole person is `Stable`, not `Dying`.
#[instrument(skip_all, name = "city_growth_rate")]
pub fn calculate_city_growth_rate(
    ctx: &CityContext<'_>,
    location: &MapCoordinates,
    max_city_size: i32,
) -> CalcResult<GrowthRateBreakdown> {
    let caller = "calculate_city_growth_rate";
    let city_data = ctx.city_at(location, caller)?;

    let current_population = city_data.population;
    let maximum_k = max_city_size.max(1);
    let maximum_population = maximum_k * city::POPULATION_PER_PERSON;
    let current_k = current_population / city::POPULATION_PER_PERSON;

    let breakdown = if current_population < maximum_population {
        let base_growth_rate = base_growth_rate(current_k, maximum_k);
        let racial_growth_modifier = ctx.rules.find_race(&city_data.race, caller)?.growth_rate_modifier;

        let mut building_modifiers = Vec::new();
        for memory_building in ctx.memory.buildings_at(location) {
            let def = ctx.rules.find_building(&memory_building.building, caller)?;
            if def.growth_rate_bonus != 0 {
                building_modifiers.push(BuildingGrowthBonus {
                    building: def.id.clone(),
                    growth_rate_bonus: def.growth_rate_bonus,
                });
            }
        }

        let total_growth_rate = base_growth_rate
            + racial_growth_modifier
            + building_modifiers.iter().map(|b| b.growth_rate_bonus).sum::<i32>();

        let owner = ctx.players.find_player(city_data.owner, caller)?;
        let difficulty_level_multiplier = ctx.difficulty.growth_multiplier(owner);
        let adjusted = percent_of(total_growth_rate, difficulty_level_multiplier);
        let room_to_shrink = (current_population - city::MINIMUM_POPULATION).max(0);
        let capped_total = adjusted
            .min(maximum_population - current_population)
            .max(-room_to_shrink);

        GrowthRateBreakdown::Growing(GrowingBreakdown {
            current_population,
            maximum_population,
            base_growth_rate,
            racial_growth_modifier,
            building_modifiers,
            total_growth_rate,
            difficulty_level_multiplier,
            total_growth_rate_adjusted_for_difficulty_level: adjusted,
            capped_total,
        })
    } else if current_k > maximum_k {
        let base_death_rate = current_k - maximum_k;
        let city_death_rate = base_death_rate * growth::DEATH_PER_TIER;
        let room_to_shrink = (current_population - city::MINIMUM_POPULATION).max(0);

        GrowthRateBreakdown::Dying(DyingBreakdown {
            current_population,
            maximum_population,
            base_death_rate,
            city_death_rate,
            capped_total: -city_death_rate.min(room_to_shrink),
        })
    } else {
        GrowthRateBreakdown::Stable {
            current_population,
            maximum_population,
        }
    };

    log::debug!(
        "City at {} ({}/{}): growth {}",
        location,
        current_population,
        maximum_population,
        breakdown.final_total()
    );
    Ok(breakdown)
}
