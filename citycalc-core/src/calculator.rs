//! Whole-city calculations: every resource line of a city, its growth and its
//! rebels, for one city or every city on the map.

use crate::breakdown::{ProductionBreakdownSet, TaxProduction};
use crate::context::CityContext;
use crate::doubled::Doubled;
use crate::error::CalcResult;
use crate::map::MapCoordinates;
use crate::survey::survey_city_area;
use crate::systems::{
    add_fortress_productions, add_production_and_consumption_from_building,
    add_production_from_map_features, add_production_from_population_task,
    add_production_from_spell_effects, calculate_city_growth_rate, calculate_city_rebels,
    calculate_food_from_terrain, calculate_gold_trade_bonus, calculate_production_bonus,
    halve_add_percentage_bonus_and_cap_production, GrowthRateBreakdown, ReligiousRetort,
    UnrestBreakdown,
};
use citycalc_data::defines::{city, economy, production as resource, tasks};
use citycalc_data::{BuildingDef, BuildingId, PlayerId, PopulationTaskId, ProductionTypeId, TaxRateId};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Choices the city owner makes that change what a city yields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionOptions {
    /// Overrides the owner's tax rate.
    pub tax_rate: Option<TaxRateId>,
    /// The city is building trade goods, turning production into gold.
    pub trade_goods: bool,
}

/// Work out every resource line of the city at `location`.
#[instrument(skip_all, name = "city_productions", fields(location = %location))]
pub fn calculate_all_city_productions(
    ctx: &CityContext<'_>,
    location: &MapCoordinates,
    options: &ProductionOptions,
) -> CalcResult<ProductionBreakdownSet> {
    let caller = "calculate_all_city_productions";
    let city_data = ctx.city_at(location, caller)?;
    let owner = ctx.players.find_player(city_data.owner, caller)?;
    let race = ctx.rules.find_race(&city_data.race, caller)?;

    let mut set = ProductionBreakdownSet::new(*location);

    // PHASE 1: Terrain
    let survey = survey_city_area(ctx.map, location, ctx.map.size.city_radius);
    calculate_food_from_terrain(&survey, ctx.rules, &mut set)?;
    calculate_production_bonus(&survey, ctx.rules, &mut set)?;

    let buildings = ctx
        .memory
        .buildings_at(location)
        .map(|b| ctx.rules.find_building(&b.building, caller))
        .collect::<Result<Vec<&BuildingDef>, _>>()?;

    // PHASE 2: Citizens
    for (task, count) in [
        (tasks::FARMER, city_data.farmers()),
        (tasks::WORKER, city_data.workers()),
        (tasks::REBEL, city_data.rebels),
    ] {
        add_production_from_population_task(
            race,
            &PopulationTaskId::from(task),
            count,
            &buildings,
            &mut set,
        );
    }

    // PHASE 3: Buildings, fortress, map features, spells
    let retort = ReligiousRetort::for_player(owner, ctx.rules)?;
    for building in &buildings {
        add_production_and_consumption_from_building(building, retort.percentage, &mut set)?;
    }

    if ctx
        .memory
        .has_building(location, &BuildingId::from(city::FORTRESS_BUILDING))
    {
        add_fortress_productions(owner, location.plane, ctx.rules, &mut set)?;
    }

    let mineral_percentage: i32 = buildings.iter().map(|b| b.mineral_percentage_bonus).sum();
    add_production_from_map_features(&survey, ctx.rules, race, mineral_percentage, &mut set)?;
    add_production_from_spell_effects(location, ctx.memory, ctx.rules, &mut set)?;

    // PHASE 4: Taxes, rations, trade
    let gold = ProductionTypeId::from(resource::GOLD);
    if let Some(tax_rate) = options.tax_rate.as_ref().or(owner.tax_rate.as_ref()) {
        let def = ctx.rules.find_tax_rate(tax_rate, caller)?;
        let persons = (city_data.persons() - city_data.rebels).max(0);
        let each = Doubled::from_raw(def.doubled_gold_per_person);
        let line = set.entry(&gold);
        line.doubled_production_amount += each * persons;
        line.tax_production = Some(TaxProduction {
            tax_rate: tax_rate.clone(),
            persons,
            doubled_gold_per_person: each,
            doubled_amount: each * persons,
        });
    }

    set.entry(&ProductionTypeId::from(resource::RATIONS))
        .consumption_amount += city_data.persons() * city::RATIONS_PER_PERSON;

    calculate_gold_trade_bonus(set.entry(&gold), ctx.map, location, Some(city_data), ctx.rules)?;

    for breakdown in set.iter_mut() {
        breakdown.sort_contributions();
    }

    // PHASE 5: Finalize food, then rations against it, then the rest
    if let Some(food) = set.get_mut(resource::FOOD) {
        halve_add_percentage_bonus_and_cap_production(owner, food, None, ctx.difficulty, ctx.rules)?;
    }
    let food_from_terrain = set
        .get(resource::FOOD)
        .map_or(0, |f| f.capped_production_amount);
    if let Some(rations) = set.get_mut(resource::RATIONS) {
        halve_add_percentage_bonus_and_cap_production(
            owner,
            rations,
            Some(food_from_terrain),
            ctx.difficulty,
            ctx.rules,
        )?;
    }
    for breakdown in set.iter_mut() {
        let id = breakdown.production_type.as_str();
        if id != resource::FOOD && id != resource::RATIONS {
            halve_add_percentage_bonus_and_cap_production(
                owner,
                breakdown,
                None,
                ctx.difficulty,
                ctx.rules,
            )?;
        }
    }

    if options.trade_goods {
        let converted = set.net_total(resource::PRODUCTION).max(0);
        let line = set.entry(&gold);
        line.convert_from_production_type = Some(ProductionTypeId::from(resource::PRODUCTION));
        line.convert_from_production_amount = converted;
        line.convert_to_production_amount = converted / economy::TRADE_GOODS_CONVERSION_RATE;
    }

    log::debug!(
        "City at {}: {} resource lines, food {}, gold {}",
        location,
        set.len(),
        set.net_total(resource::FOOD),
        set.net_total(resource::GOLD)
    );
    Ok(set)
}

/// Net total of one resource of the city at `location`; 0 if the city has none.
pub fn calculate_single_city_production(
    ctx: &CityContext<'_>,
    location: &MapCoordinates,
    options: &ProductionOptions,
    production_type: &str,
) -> CalcResult<i32> {
    Ok(calculate_all_city_productions(ctx, location, options)?.net_total(production_type))
}

/// Maximum size of the city at `location`, in persons: the food it can grow.
pub fn calculate_max_city_size(ctx: &CityContext<'_>, location: &MapCoordinates) -> CalcResult<i32> {
    let productions = calculate_all_city_productions(ctx, location, &ProductionOptions::default())?;
    Ok(productions
        .get(resource::FOOD)
        .map_or(0, |f| f.capped_production_amount))
}

/// Everything calculated for one city this turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityReport {
    pub location: MapCoordinates,
    pub name: String,
    pub owner: PlayerId,
    pub productions: ProductionBreakdownSet,
    pub max_city_size: i32,
    pub growth: GrowthRateBreakdown,
    /// Absent when neither the options nor the owner give a tax rate.
    pub unrest: Option<UnrestBreakdown>,
}

impl CityReport {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Productions, growth and rebels of the city at `location`.
pub fn calculate_city_report(
    ctx: &CityContext<'_>,
    location: &MapCoordinates,
    options: &ProductionOptions,
) -> CalcResult<CityReport> {
    let caller = "calculate_city_report";
    let city_data = ctx.city_at(location, caller)?;
    let owner = ctx.players.find_player(city_data.owner, caller)?;

    let tax_rate = options.tax_rate.clone().or_else(|| owner.tax_rate.clone());
    let options = ProductionOptions {
        tax_rate: tax_rate.clone(),
        ..options.clone()
    };

    let productions = calculate_all_city_productions(ctx, location, &options)?;
    let max_city_size = productions
        .get(resource::FOOD)
        .map_or(0, |f| f.capped_production_amount);
    let growth = calculate_city_growth_rate(ctx, location, max_city_size)?;
    let unrest = tax_rate
        .map(|tax_rate| calculate_city_rebels(ctx, location, &tax_rate, None))
        .transpose()?;

    Ok(CityReport {
        location: *location,
        name: city_data.name.clone(),
        owner: city_data.owner,
        productions,
        max_city_size,
        growth,
        unrest,
    })
}

/// Calculate every city on the map in parallel.
///
/// Each city gets its own breakdowns; the context is only read. Reports come back
/// in map order.
#[instrument(skip_all, name = "all_cities")]
pub fn calculate_all_cities(
    ctx: &CityContext<'_>,
    options: &ProductionOptions,
) -> CalcResult<Vec<CityReport>> {
    let locations: Vec<MapCoordinates> = ctx.map.cities().map(|(location, _)| location).collect();
    log::debug!("Calculating {} cities", locations.len());

    locations
        .par_iter()
        .map(|location| calculate_city_report(ctx, location, options))
        .collect()
}
