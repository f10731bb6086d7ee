//! Game mechanic constants (defines).
//!
//! Fixed values of the city rules that are not part of the per-ruleset data.

/// Well-known production type IDs the calculations treat specially.
pub mod production {
    /// Maximum city size, derived from terrain food.
    pub const FOOD: &str = "food";
    /// Food eaten by the population and by units.
    pub const RATIONS: &str = "rations";
    pub const PRODUCTION: &str = "production";
    pub const GOLD: &str = "gold";
    pub const MAGIC_POWER: &str = "magic_power";
    pub const RESEARCH: &str = "research";
}

/// Well-known population task IDs.
pub mod tasks {
    pub const FARMER: &str = "farmer";
    pub const WORKER: &str = "worker";
    pub const REBEL: &str = "rebel";
}

/// City constants
pub mod city {
    /// Building every wizard's capital city has.
    pub const FORTRESS_BUILDING: &str = "fortress";

    /// Cities are never allowed to shrink below this many citizens.
    pub const MINIMUM_POPULATION: i32 = 1000;

    /// Citizens per unit of population (one "person" on the city screen).
    pub const POPULATION_PER_PERSON: i32 = 1000;

    /// Radius of the area a city collects terrain from.
    pub const CITY_RADIUS: i32 = 2;

    /// Rations eaten per person living in the city.
    pub const RATIONS_PER_PERSON: i32 = 1;
}

/// Growth constants
pub mod growth {
    /// Growth rate per full pair of missing persons (and one more for the odd one).
    pub const GROWTH_PER_STEP: i32 = 10;

    /// Death rate per whole person the city is over its maximum size.
    pub const DEATH_PER_TIER: i32 = 50;
}

/// Economy constants
pub mod economy {
    /// Gold trade bonus cap in percentage points per person.
    pub const TRADE_BONUS_CAP_PER_PERSON: i32 = 3;

    /// Trade goods conversion: this many production make one gold.
    pub const TRADE_GOODS_CONVERSION_RATE: i32 = 2;

    /// Rush buy multiplier when nothing has been built yet.
    pub const RUSH_BUY_MULTIPLIER_NOTHING_BUILT: i32 = 4;

    /// Rush buy linear multiplier once construction has started.
    pub const RUSH_BUY_MULTIPLIER: i32 = 2;

    /// Rush buy quadratic divisor once construction has started.
    pub const RUSH_BUY_QUADRATIC_DIVISOR: i32 = 20;
}

/// Unrest constants
pub mod unrest {
    /// Garrison units reduce unrest by one per this many units.
    pub const UNITS_PER_UNREST_REDUCTION: i32 = 2;

    /// Religious building retorts only kick in once the city has this many
    /// qualifying buildings.
    pub const RELIGIOUS_BUILDINGS_FOR_RETORT: i32 = 2;
}
