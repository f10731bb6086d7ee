//! Terrain yields: food and production bonus from tile types, resources from
//! map features.

use crate::breakdown::{MapFeatureProduction, ProductionBreakdownSet, TileTypeProduction};
use crate::doubled::Doubled;
use crate::error::CalcResult;
use crate::survey::CitySurvey;
use citycalc_data::defines::production as resource;
use citycalc_data::{ProductionTypeId, RaceDef, RuleLookup};
use tracing::instrument;

/// Add the food every surveyed tile type supports to the food line.
///
/// This is the food the terrain can sustain, i.e. the basis of the maximum city size.
#[instrument(skip_all, name = "terrain_food")]
pub fn calculate_food_from_terrain(
    survey: &CitySurvey,
    rules: &dyn RuleLookup,
    breakdowns: &mut ProductionBreakdownSet,
) -> CalcResult<()> {
    let food = ProductionTypeId::from(resource::FOOD);
    for (tile_type, count) in survey.tile_types.iter() {
        let def = rules.find_tile_type(tile_type, "calculate_food_from_terrain")?;
        if def.doubled_food <= 0 {
            continue;
        }
        let each = Doubled::from_raw(def.doubled_food);
        breakdowns.entry(&food).add_tile_type(TileTypeProduction {
            tile_type: tile_type.clone(),
            count,
            doubled_amount_each: each,
            doubled_amount: each * count,
            ..Default::default()
        });
    }
    Ok(())
}

/// Add the production percentage bonus of surveyed tile types (forest, hills, mountains).
#[instrument(skip_all, name = "terrain_production_bonus")]
pub fn calculate_production_bonus(
    survey: &CitySurvey,
    rules: &dyn RuleLookup,
    breakdowns: &mut ProductionBreakdownSet,
) -> CalcResult<()> {
    let production = ProductionTypeId::from(resource::PRODUCTION);
    for (tile_type, count) in survey.tile_types.iter() {
        let def = rules.find_tile_type(tile_type, "calculate_production_bonus")?;
        let Some(bonus) = def.production_bonus.filter(|b| *b != 0) else {
            continue;
        };
        breakdowns.entry(&production).add_tile_type(TileTypeProduction {
            tile_type: tile_type.clone(),
            count,
            percentage_bonus_each: bonus,
            percentage_bonus: bonus * count,
            ..Default::default()
        });
    }
    Ok(())
}

/// Add resources from map features (ores, crystals, wild game).
///
/// Mineral productions are multiplied by the race's mineral multiplier and then
/// increased by `building_mineral_percentage`, the added part floored.
#[instrument(skip_all, name = "map_features")]
pub fn add_production_from_map_features(
    survey: &CitySurvey,
    rules: &dyn RuleLookup,
    race: &RaceDef,
    building_mineral_percentage: i32,
    breakdowns: &mut ProductionBreakdownSet,
) -> CalcResult<()> {
    for (feature, count) in survey.map_features.iter() {
        let def = rules.find_map_feature(feature, "add_production_from_map_features")?;
        for production in &def.productions {
            let each = Doubled::from_raw(production.doubled_amount);
            let (race_multiplier, mineral_percentage) = if production.race_mineral_bonus_applies {
                (race.mineral_bonus_multiplier, building_mineral_percentage)
            } else {
                (1, 0)
            };
            let after_race = each * count * race_multiplier;
            let amount = after_race.plus_percent(mineral_percentage);

            log::trace!(
                "{} x{} gives {} {} (race x{}, +{}%)",
                feature,
                count,
                amount,
                production.production_type,
                race_multiplier,
                mineral_percentage
            );

            let breakdown = breakdowns.entry(&production.production_type);
            breakdown.doubled_production_amount += amount;
            breakdown.map_feature_productions.push(MapFeatureProduction {
                map_feature: feature.clone(),
                count,
                doubled_amount_each: each,
                race_mineral_multiplier: race_multiplier,
                doubled_amount_after_race: after_race,
                building_mineral_percentage: mineral_percentage,
                doubled_amount: amount,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use crate::map::MapCoordinates;
    use crate::survey::survey_city_area;
    use crate::testing::{fixture_rules, MapBuilder};
    use citycalc_data::RuleLookup;

    const CENTRE: MapCoordinates = MapCoordinates::new(10, 10, 0);

    #[test]
    fn test_food_counts_every_surveyed_tile() {
        let map = MapBuilder::new(20, 20)
            .fill("grassland")
            .tiles_around(10, 10, "mountains", 4)
            .build();
        let survey = survey_city_area(&map, &CENTRE, 2);
        let mut set = ProductionBreakdownSet::default();
        calculate_food_from_terrain(&survey, &fixture_rules(), &mut set).unwrap();

        // 17 grassland at 1.5 food, mountains give none
        let food = set.get("food").unwrap();
        assert_eq!(food.doubled_production_amount, Doubled(51));
        assert_eq!(food.tile_type_productions.len(), 1);
        assert_eq!(food.tile_type_productions[0].count, 17);
    }

    #[test]
    fn test_production_bonus_skips_tiles_without_bonus() {
        let map = MapBuilder::new(20, 20)
            .fill("grassland")
            .tiles_around(10, 10, "forest", 2)
            .build();
        let survey = survey_city_area(&map, &CENTRE, 2);
        let mut set = ProductionBreakdownSet::default();
        calculate_production_bonus(&survey, &fixture_rules(), &mut set).unwrap();

        let production = set.get("production").unwrap();
        assert_eq!(production.percentage_bonus, 6);
        assert_eq!(production.tile_type_productions.len(), 1);
        assert_eq!(production.doubled_production_amount, Doubled::ZERO);
    }

    #[test]
    fn test_unknown_tile_type_is_not_found() {
        let map = MapBuilder::new(20, 20).fill("lava").build();
        let survey = survey_city_area(&map, &CENTRE, 2);
        let mut set = ProductionBreakdownSet::default();
        let err = calculate_food_from_terrain(&survey, &fixture_rules(), &mut set).unwrap_err();
        match err {
            CalcError::NotFound(e) => {
                assert_eq!(e.id, "lava");
                assert_eq!(e.caller, "calculate_food_from_terrain");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_map_feature_race_and_building_bonus() {
        let map = MapBuilder::new(20, 20)
            .fill("hills")
            .feature(11, 10, "gold_ore")
            .feature(9, 11, "wild_game")
            .build();
        let survey = survey_city_area(&map, &CENTRE, 2);
        let rules = fixture_rules();
        let dwarves = rules.find_race(&"dwarves".into(), "test").unwrap().clone();
        let mut set = ProductionBreakdownSet::default();
        add_production_from_map_features(&survey, &rules, &dwarves, 50, &mut set).unwrap();

        // Gold ore: 3 gold, doubled 6, x2 for dwarves = 12, +50% = 18
        let gold = set.get("gold").unwrap();
        assert_eq!(gold.doubled_production_amount, Doubled(18));
        assert_eq!(gold.map_feature_productions[0].doubled_amount_after_race, Doubled(12));

        // Wild game is not a mineral
        let food = set.get("food").unwrap();
        assert_eq!(food.doubled_production_amount, Doubled(4));
        assert_eq!(food.map_feature_productions[0].race_mineral_multiplier, 1);
        assert_eq!(food.map_feature_productions[0].building_mineral_percentage, 0);
    }

    #[test]
    fn test_mineral_percentage_floors_added_part() {
        let map = MapBuilder::new(20, 20)
            .fill("hills")
            .feature(11, 10, "gold_ore")
            .build();
        let survey = survey_city_area(&map, &CENTRE, 2);
        let rules = fixture_rules();
        let high_men = rules.find_race(&"high_men".into(), "test").unwrap().clone();
        let mut set = ProductionBreakdownSet::default();
        add_production_from_map_features(&survey, &rules, &high_men, 25, &mut set).unwrap();

        // 6 + floor(1.5) = 7
        assert_eq!(set.get("gold").unwrap().doubled_production_amount, Doubled(7));
    }
}
