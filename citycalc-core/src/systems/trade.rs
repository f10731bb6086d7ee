use crate::breakdown::{ProductionBreakdown, TradeBonusBreakdown};
use crate::error::CalcResult;
use crate::map::{CityData, Direction, MapCoordinates, OverlandMap};
use citycalc_data::defines::{city, economy};
use citycalc_data::RuleLookup;
use tracing::instrument;

/// Gold trade bonus percentage a city of `population` may receive.
pub fn trade_bonus_cap(population: i32) -> i32 {
    (population / city::POPULATION_PER_PERSON) * economy::TRADE_BONUS_CAP_PER_PERSON
}

/// Work out the gold trade bonus of the city at `location` and add it to the gold line.
///
/// The best of the centre tile's bonus and any neighbouring tile that projects its
/// bonus (shore), plus the racial trade bonus, capped at 3% per 1,000 population.
#[instrument(skip_all, name = "gold_trade_bonus")]
pub fn calculate_gold_trade_bonus(
    gold: &mut ProductionBreakdown,
    map: &OverlandMap,
    location: &MapCoordinates,
    city_data: Option<&CityData>,
    rules: &dyn RuleLookup,
) -> CalcResult<()> {
    let caller = "calculate_gold_trade_bonus";

    let mut from_tile_type = 0;
    if let Some(tile_type) = map.cell(location).and_then(|c| c.tile_type.as_ref()) {
        from_tile_type = rules.find_tile_type(tile_type, caller)?.gold_bonus.unwrap_or(0);
    }

    for direction in Direction::ALL {
        let Some(adjacent) = map.size.step(location, direction) else {
            continue;
        };
        let Some(tile_type) = map.cell(&adjacent).and_then(|c| c.tile_type.as_ref()) else {
            continue;
        };
        let def = rules.find_tile_type(tile_type, caller)?;
        if def.gold_bonus_surrounding_tiles {
            from_tile_type = from_tile_type.max(def.gold_bonus.unwrap_or(0));
        }
    }

    // Roads will contribute once they exist
    let from_roads = 0;

    let (from_race, population) = match city_data {
        Some(city_data) => (
            rules.find_race(&city_data.race, caller)?.gold_trade_bonus,
            city_data.population,
        ),
        None => (0, 0),
    };

    let uncapped = from_tile_type + from_roads + from_race;
    let capped = uncapped.min(trade_bonus_cap(population));

    log::debug!(
        "Trade bonus at {}: tile {} + roads {} + race {} = {}, capped {}",
        location,
        from_tile_type,
        from_roads,
        from_race,
        uncapped,
        capped
    );

    gold.percentage_bonus += capped;
    gold.trade_bonus = Some(TradeBonusBreakdown {
        from_tile_type,
        from_roads,
        from_race,
        uncapped,
        population: population / city::POPULATION_PER_PERSON,
        capped,
    });
    Ok(())
}
