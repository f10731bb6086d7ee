//! Race definitions.

use crate::ids::{PopulationTaskId, ProductionTypeId, RaceId};
use serde::{Deserialize, Serialize};

fn default_mineral_multiplier() -> i32 {
    1
}

/// A race that can inhabit cities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceDef {
    pub id: RaceId,

    /// What one citizen produces on each task.
    #[serde(default)]
    pub population_tasks: Vec<RacePopulationTask>,

    /// Signed modifier added to the city growth rate.
    #[serde(default)]
    pub growth_rate_modifier: i32,

    /// Multiplier applied to race-sensitive map feature output.
    #[serde(default = "default_mineral_multiplier")]
    pub mineral_bonus_multiplier: i32,

    /// Percentage gold trade bonus (nomads).
    #[serde(default)]
    pub gold_trade_bonus: i32,

    /// Unrest this race feels when ruled from a capital of another race.
    #[serde(default)]
    pub unrest: Vec<RaceUnrest>,
}

impl Default for RaceDef {
    fn default() -> Self {
        Self {
            id: RaceId::default(),
            population_tasks: Vec::new(),
            growth_rate_modifier: 0,
            mineral_bonus_multiplier: default_mineral_multiplier(),
            gold_trade_bonus: 0,
            unrest: Vec::new(),
        }
    }
}

impl RaceDef {
    /// Per-person productions for a task, empty if the race defines none.
    pub fn task_productions(&self, task: &PopulationTaskId) -> &[TaskProduction] {
        self.population_tasks
            .iter()
            .find(|t| &t.task == task)
            .map(|t| t.productions.as_slice())
            .unwrap_or(&[])
    }

    /// Unrest rule against the given capital race, if any.
    pub fn unrest_against(&self, capital_race: &RaceId) -> Option<&RaceUnrest> {
        self.unrest.iter().find(|u| &u.capital_race == capital_race)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RacePopulationTask {
    pub task: PopulationTaskId,
    #[serde(default)]
    pub productions: Vec<TaskProduction>,
}

/// Doubled amount of a resource produced by one person on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskProduction {
    pub production_type: ProductionTypeId,
    pub doubled_amount: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceUnrest {
    pub capital_race: RaceId,
    #[serde(default)]
    pub unrest_percentage: i32,
    #[serde(default)]
    pub unrest_literal: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn halflings() -> RaceDef {
        RaceDef {
            id: RaceId::from("halflings"),
            population_tasks: vec![RacePopulationTask {
                task: PopulationTaskId::from("farmer"),
                productions: vec![TaskProduction {
                    production_type: ProductionTypeId::from("rations"),
                    doubled_amount: 6,
                }],
            }],
            unrest: vec![RaceUnrest {
                capital_race: RaceId::from("dark_elves"),
                unrest_percentage: 30,
                unrest_literal: 0,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_task_productions() {
        let race = halflings();
        assert_eq!(race.task_productions(&"farmer".into()).len(), 1);
        assert!(race.task_productions(&"worker".into()).is_empty());
    }

    #[test]
    fn test_unrest_against() {
        let race = halflings();
        assert_eq!(
            race.unrest_against(&"dark_elves".into())
                .map(|u| u.unrest_percentage),
            Some(30)
        );
        assert!(race.unrest_against(&"halflings".into()).is_none());
    }

    #[test]
    fn test_mineral_multiplier_defaults_to_one() {
        let race: RaceDef = serde_json::from_str(r#"{ "id": "orcs" }"#).unwrap();
        assert_eq!(race.mineral_bonus_multiplier, 1);
    }
}
