//! City building definitions.

use crate::ids::{BuildingId, PopulationTaskId, ProductionTypeId};
use serde::{Deserialize, Serialize};

/// One effect a constructed building has on its city's production.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildingEffect {
    /// Fixed production, doubled.
    Production {
        production_type: ProductionTypeId,
        doubled_amount: i32,
    },
    /// Upkeep, doubled. Must be a whole number, so the doubled value must be even.
    Consumption {
        production_type: ProductionTypeId,
        doubled_amount: i32,
    },
    /// Percentage bonus to the whole resource line (library +50% research).
    PercentageBonus {
        production_type: ProductionTypeId,
        percentage: i32,
    },
    /// Extra doubled output of every citizen assigned to a task (animists' guild).
    PerPerson {
        task: PopulationTaskId,
        production_type: ProductionTypeId,
        doubled_amount: i32,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingDef {
    pub id: BuildingId,

    #[serde(default)]
    pub effects: Vec<BuildingEffect>,

    /// Added to the city growth rate while the city is growing.
    #[serde(default)]
    pub growth_rate_bonus: i32,

    /// Number of rebels this building calms.
    #[serde(default)]
    pub unrest_reduction: i32,

    /// Religious buildings have their unrest reduction and their production
    /// boosted by religious retorts.
    #[serde(default)]
    pub religious: bool,

    /// Percentage bonus to map feature output (miners' guild).
    #[serde(default)]
    pub mineral_percentage_bonus: i32,

    /// Production cost to construct; buildings without one cannot be rush bought.
    #[serde(default)]
    pub production_cost: Option<i32>,
}

impl BuildingDef {
    /// Total extra doubled output per person on `task` for `production_type`.
    pub fn per_person_bonus(
        &self,
        task: &PopulationTaskId,
        production_type: &ProductionTypeId,
    ) -> i32 {
        self.effects
            .iter()
            .filter_map(|effect| match effect {
                BuildingEffect::PerPerson {
                    task: t,
                    production_type: p,
                    doubled_amount,
                } if t == task && p == production_type => Some(*doubled_amount),
                _ => None,
            })
            .sum()
    }
}
