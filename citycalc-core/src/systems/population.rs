use crate::breakdown::{PopulationTaskProduction, ProductionBreakdownSet};
use crate::doubled::Doubled;
use citycalc_data::{BuildingDef, BuildingEffect, PopulationTaskId, ProductionTypeId, RaceDef};
use tracing::instrument;

/// Add what `count` persons on `task` produce.
///
/// Each person yields the race's per-person amount plus every per-person bonus
/// the city's buildings grant for that task, including bonuses for resources
/// the race itself does not produce on that task.
#[instrument(skip_all, name = "population_task")]
pub fn add_production_from_population_task(
    race: &RaceDef,
    task: &PopulationTaskId,
    count: i32,
    buildings: &[&BuildingDef],
    breakdowns: &mut ProductionBreakdownSet,
) {
    if count <= 0 {
        return;
    }

    let mut production_types: Vec<(&ProductionTypeId, i32)> = race
        .task_productions(task)
        .iter()
        .map(|p| (&p.production_type, p.doubled_amount))
        .collect();

    for building in buildings {
        for effect in &building.effects {
            if let BuildingEffect::PerPerson {
                task: t,
                production_type,
                ..
            } = effect
            {
                if t == task && !production_types.iter().any(|(p, _)| *p == production_type) {
                    production_types.push((production_type, 0));
                }
            }
        }
    }

    for (production_type, race_amount) in production_types {
        let building_bonus: i32 = buildings
            .iter()
            .map(|b| b.per_person_bonus(task, production_type))
            .sum();
        let each = Doubled::from_raw(race_amount + building_bonus);
        if each == Doubled::ZERO {
            continue;
        }

        let breakdown = breakdowns.entry(production_type);
        breakdown.doubled_production_amount += each * count;
        breakdown
            .population_task_productions
            .push(PopulationTaskProduction {
                task: task.clone(),
                count,
                doubled_amount_each: each,
                doubled_amount: each * count,
            });
    }
}
