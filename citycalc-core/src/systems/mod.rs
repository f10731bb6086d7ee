//! City calculation systems.

pub mod buildings;
pub mod city_radius;
pub mod finalize;
pub mod fortress;
pub mod growth;
pub mod population;
pub mod rush_buy;
pub mod spells;
pub mod terrain;
pub mod trade;
pub mod unrest;

pub use buildings::{add_production_and_consumption_from_building, ReligiousRetort};
pub use city_radius::{mark_within_existing_city_radius, CityRadiusMap};
pub use finalize::halve_add_percentage_bonus_and_cap_production;
pub use fortress::add_fortress_productions;
pub use growth::{calculate_city_growth_rate, GrowthRateBreakdown};
pub use population::add_production_from_population_task;
pub use rush_buy::{can_afford_rush_buy, gold_to_rush_buy, gold_to_rush_buy_building};
pub use spells::{add_production_from_spell_effects, create_unrest_reduction_from_spell};
pub use terrain::{
    add_production_from_map_features, calculate_food_from_terrain, calculate_production_bonus,
};
pub use trade::calculate_gold_trade_bonus;
pub use unrest::{calculate_city_rebels, UnrestBreakdown};
