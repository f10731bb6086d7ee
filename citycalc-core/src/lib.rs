//! # City Calculation Core
//!
//! Deterministic per-turn city economy for a fantasy 4X overland map: what each
//! city produces and consumes, whether its population grows or dies off, and
//! how many of its citizens rebel.
//!
//! Every calculation is a pure function of read-only snapshots. Nothing in the
//! map, memory or rules is ever mutated, so any number of cities can be worked
//! out at the same time.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────────────┐
//! │ RuleLookup  │────▶│              │────▶│ ProductionBreakdown  │
//! │ OverlandMap │────▶│ CityContext  │────▶│ GrowthRateBreakdown  │
//! │ FogOfWar    │────▶│  (borrowed)  │────▶│ UnrestBreakdown      │
//! │ Players     │────▶│              │     └──────────────────────┘
//! └─────────────┘     └──────────────┘
//! ```
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Doubled`] | Fixed point holding exact halves |
//! | [`CityContext`] | Borrowed inputs of one turn |
//! | [`ProductionBreakdownSet`] | Every resource line of a city with its audit trail |
//! | [`GrowthRateBreakdown`] | Stable, growing or dying |
//! | [`UnrestBreakdown`] | Rebels and every reduction that went into them |
//! | [`calculate_all_cities`] | Parallel batch over the whole map |

pub mod breakdown;
pub mod calculator;
pub mod config;
pub mod context;
pub mod doubled;
pub mod error;
pub mod garrison;
pub mod map;
pub mod memory;
pub mod players;
pub mod survey;
pub mod systems;
pub mod testing;


pub use breakdown::{ProductionBreakdown, ProductionBreakdownSet};
pub use calculator::{
    calculate_all_cities, calculate_all_city_productions, calculate_city_report,
    calculate_max_city_size, calculate_single_city_production, CityReport, ProductionOptions,
};
pub use config::{DifficultyLevel, MapSize};
pub use context::CityContext;
pub use doubled::{percent_of, Doubled};
pub use error::{CalcError, CalcResult};
pub use garrison::UnitStack;
pub use map::{CityData, MapCoordinates, OverlandMap, TerrainCell};
pub use memory::{FogOfWarMemory, MemoryBuilding, MemoryMaintainedSpell, MemoryUnit, UnitStatus};
pub use players::{PlayerDetails, PlayerDirectory, PlayerPick, WizardIdentity};
pub use systems::{
    calculate_city_growth_rate, calculate_city_rebels, gold_to_rush_buy, gold_to_rush_buy_building,
    mark_within_existing_city_radius, CityRadiusMap, GrowthRateBreakdown, UnrestBreakdown,
};
