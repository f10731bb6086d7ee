use citycalc_data::defines::economy;
use citycalc_data::BuildingDef;

/// Gold needed to finish a construction immediately.
///
/// Nothing built yet costs 4 gold per remaining production; otherwise
/// `2 × remaining + remaining² / 20`.
pub fn gold_to_rush_buy(total_cost: i32, built_so_far: i32) -> i32 {
    let remaining = total_cost - built_so_far.max(0);
    if remaining <= 0 {
        0
    } else if built_so_far <= 0 {
        remaining * economy::RUSH_BUY_MULTIPLIER_NOTHING_BUILT
    } else {
        remaining * economy::RUSH_BUY_MULTIPLIER
            + (remaining * remaining) / economy::RUSH_BUY_QUADRATIC_DIVISOR
    }
}

/// Whether `gold_stored` covers rush buying the rest of a construction.
pub fn can_afford_rush_buy(total_cost: i32, built_so_far: i32, gold_stored: i32) -> bool {
    gold_to_rush_buy(total_cost, built_so_far) <= gold_stored
}

/// Gold needed to finish `building` with `built_so_far` production already in it.
///
/// `None` for buildings that have no production cost.
pub fn gold_to_rush_buy_building(building: &BuildingDef, built_so_far: i32) -> Option<i32> {
    building
        .production_cost
        .map(|cost| gold_to_rush_buy(cost, built_so_far))
}
