//! Rebels: how many citizens refuse to work.
//!
//! Unrest is a percentage of the population (tax rate, racial tension with the
//! capital, curses) converted to persons, then reduced by buildings, religious
//! retorts, spells and the garrison, and finally clamped to `0..=population`.

use crate::context::CityContext;
use crate::error::CalcResult;
use crate::garrison::{count_garrison, UnitStack};
use crate::map::MapCoordinates;
use crate::systems::buildings::ReligiousRetort;
use crate::systems::spells::{create_unrest_reduction_from_spell, SpellUnrestReduction};
use citycalc_data::defines::{city, unrest};
use citycalc_data::{BuildingId, PickId, TaxRateId};
use serde::Serialize;
use tracing::instrument;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildingUnrestReduction {
    pub building: BuildingId,
    pub unrest_reduction: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnrestBreakdown {
    /// City population in persons.
    pub population: i32,
    pub tax_percentage: i32,
    pub racial_percentage: i32,
    pub racial_literal: i32,
    pub spell_percentage: i32,
    pub total_percentage: i32,
    pub base_value: i32,

    /// Non-religious buildings.
    pub building_reductions: Vec<BuildingUnrestReduction>,

    pub religious_building_retort_percentage: i32,
    pub religious_building_retort_picks: Vec<PickId>,
    /// Negated sum of what religious buildings calm.
    pub religious_building_reduction: i32,
    /// Extra (negative) reduction from retorts, once enough religious buildings stand.
    pub religious_building_retort_value: i32,

    pub spell_reductions: Vec<SpellUnrestReduction>,

    pub unit_count: i32,
    pub unit_reduction: i32,

    pub base_total: i32,
    pub force_positive: bool,
    pub force_all: bool,

    /// Set only when the minimum farmers requirement takes rebels back.
    pub minimum_farmers: i32,
    pub total_after_farmers: i32,

    pub final_total: i32,
}

/// Persons out of `population` for a percentage, rounded half up.
pub fn unrest_persons(population: i32, percentage: i32) -> i32 {
    (population * percentage + 50).div_euclid(100)
}

/// Retort value: nothing below the religious building threshold.
pub fn religious_retort_value(
    religious_building_count: i32,
    religious_reduction_sum: i32,
    retort_percentage: i32,
) -> i32 {
    if religious_building_count < unrest::RELIGIOUS_BUILDINGS_FOR_RETORT {
        0
    } else {
        -crate::doubled::percent_of(religious_reduction_sum, retort_percentage)
    }
}

/// Clamp `base_total` into `0..=population`, then hand back rebels the city
/// needs as farmers.
pub fn apply_rebel_limits(breakdown: &mut UnrestBreakdown, minimum_farmers: i32, other_workers: i32) {
    let population = breakdown.population;
    let clamped = if breakdown.base_total < 0 {
        breakdown.force_positive = true;
        0
    } else if breakdown.base_total > population {
        breakdown.force_all = true;
        population
    } else {
        breakdown.base_total
    };

    let available_for_farming = population - clamped - other_workers;
    let farmers_short = minimum_farmers - available_for_farming;
    if farmers_short > 0 {
        breakdown.minimum_farmers = minimum_farmers;
        breakdown.total_after_farmers = (clamped - farmers_short).max(0);
        breakdown.final_total = breakdown.total_after_farmers;
    } else {
        breakdown.final_total = clamped;
    }
}

/// Work out the rebels of the city at `location` under `tax_rate`.
///
/// `extra_units` is a selection being considered as additional garrison.
#[instrument(skip_all, name = "city_rebels")]
pub fn calculate_city_rebels(
    ctx: &CityContext<'_>,
    location: &MapCoordinates,
    tax_rate: &TaxRateId,
    extra_units: Option<&UnitStack>,
) -> CalcResult<UnrestBreakdown> {
    let caller = "calculate_city_rebels";
    let city_data = ctx.city_at(location, caller)?;
    let owner = ctx.players.find_player(city_data.owner, caller)?;

    let mut breakdown = UnrestBreakdown {
        population: city_data.population / city::POPULATION_PER_PERSON,
        tax_percentage: ctx.rules.find_tax_rate(tax_rate, caller)?.unrest_percentage,
        ..Default::default()
    };

    if let Some(capital_race) = ctx.find_capital_race(city_data.owner) {
        let race = ctx.rules.find_race(&city_data.race, caller)?;
        if let Some(rule) = race.unrest_against(capital_race) {
            breakdown.racial_percentage = rule.unrest_percentage;
            breakdown.racial_literal = rule.unrest_literal;
        }
    }

    for spell in ctx.memory.spells_affecting(location) {
        if let Some(reduction) = create_unrest_reduction_from_spell(spell, city_data.owner, ctx.rules)? {
            breakdown.spell_percentage += reduction.unrest_percentage;
            breakdown.spell_reductions.push(reduction);
        }
    }

    breakdown.total_percentage =
        breakdown.tax_percentage + breakdown.racial_percentage + breakdown.spell_percentage;
    breakdown.base_value = unrest_persons(breakdown.population, breakdown.total_percentage);

    let mut religious_count = 0;
    let mut religious_sum = 0;
    for memory_building in ctx.memory.buildings_at(location) {
        let def = ctx.rules.find_building(&memory_building.building, caller)?;
        if def.unrest_reduction == 0 {
            continue;
        }
        if def.religious {
            religious_count += 1;
            religious_sum += def.unrest_reduction;
        } else {
            breakdown.building_reductions.push(BuildingUnrestReduction {
                building: def.id.clone(),
                unrest_reduction: def.unrest_reduction,
            });
        }
    }

    let retort = ReligiousRetort::for_player(owner, ctx.rules)?;
    breakdown.religious_building_retort_percentage = retort.percentage;
    breakdown.religious_building_retort_picks = retort.picks;
    breakdown.religious_building_reduction = -religious_sum;
    breakdown.religious_building_retort_value =
        religious_retort_value(religious_count, religious_sum, retort.percentage);

    breakdown.unit_count = count_garrison(ctx, location, city_data.owner, extra_units)?;
    breakdown.unit_reduction = -(breakdown.unit_count / unrest::UNITS_PER_UNREST_REDUCTION);

    breakdown.base_total = breakdown.base_value + breakdown.racial_literal
        - breakdown
            .building_reductions
            .iter()
            .map(|b| b.unrest_reduction)
            .sum::<i32>()
        + breakdown.religious_building_reduction
        + breakdown.religious_building_retort_value
        - breakdown
            .spell_reductions
            .iter()
            .map(|s| s.unrest_reduction)
            .sum::<i32>()
        + breakdown.unit_reduction;

    apply_rebel_limits(&mut breakdown, city_data.minimum_farmers, 0);

    log::debug!(
        "City at {}: {} persons, {}% unrest -> base {} -> total {} -> {} rebels",
        location,
        breakdown.population,
        breakdown.total_percentage,
        breakdown.base_value,
        breakdown.base_total,
        breakdown.final_total
    );
    Ok(breakdown)
}
