//! Building output, upkeep and percentage modifiers.

use crate::breakdown::{BuildingProduction, ProductionBreakdown, ProductionBreakdownSet};
use crate::doubled::Doubled;
use crate::error::{CalcError, CalcResult};
use crate::players::PlayerDetails;
use citycalc_data::{BuildingDef, BuildingEffect, PickId, RuleLookup};
use serde::Serialize;
use tracing::instrument;

/// Religious building boost from the retorts a wizard holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReligiousRetort {
    pub percentage: i32,
    /// Picks that contributed to the percentage.
    pub picks: Vec<PickId>,
}

impl ReligiousRetort {
    /// Sum the religious building bonus of every pick `owner` holds.
    pub fn for_player(owner: &PlayerDetails, rules: &dyn RuleLookup) -> CalcResult<Self> {
        let mut retort = ReligiousRetort::default();
        for held in &owner.picks {
            let pick = rules.find_pick(&held.pick, "ReligiousRetort::for_player")?;
            if pick.religious_building_bonus_percentage != 0 {
                retort.percentage += pick.religious_building_bonus_percentage;
                retort.picks.push(held.pick.clone());
            }
        }
        Ok(retort)
    }
}

fn building_entry<'a>(
    breakdown: &'a mut ProductionBreakdown,
    building: &BuildingDef,
) -> &'a mut BuildingProduction {
    let index = match breakdown
        .building_productions
        .iter()
        .position(|b| b.building == building.id)
    {
        Some(index) => index,
        None => {
            breakdown.building_productions.push(BuildingProduction {
                building: building.id.clone(),
                ..Default::default()
            });
            breakdown.building_productions.len() - 1
        }
    };
    &mut breakdown.building_productions[index]
}

/// Add one building's production, upkeep and percentage bonuses.
///
/// Production of a religious building is raised by `religious_retort_percentage`
/// (added part floored). Returns how many resource lines the building touched.
#[instrument(skip_all, name = "building_production")]
pub fn add_production_and_consumption_from_building(
    building: &BuildingDef,
    religious_retort_percentage: i32,
    breakdowns: &mut ProductionBreakdownSet,
) -> CalcResult<usize> {
    let mut touched = Vec::new();

    for effect in &building.effects {
        let production_type = match effect {
            BuildingEffect::Production {
                production_type,
                doubled_amount,
            } => {
                let retort = if building.religious {
                    religious_retort_percentage
                } else {
                    0
                };
                let amount = Doubled::from_raw(*doubled_amount).plus_percent(retort);
                let breakdown = breakdowns.entry(production_type);
                breakdown.doubled_production_amount += amount;
                let entry = building_entry(breakdown, building);
                entry.doubled_production_amount += amount;
                entry.religious_retort_percentage = retort;
                production_type
            }
            BuildingEffect::Consumption {
                production_type,
                doubled_amount,
            } => {
                let consumption = Doubled::from_raw(*doubled_amount)
                    .halve(citycalc_data::RoundingDirection::MustBeExactMultiple)
                    .ok_or_else(|| CalcError::ArithmeticConsistency {
                        caller: "add_production_and_consumption_from_building",
                        what: format!(
                            "Consumption of {} by building {}",
                            production_type, building.id
                        ),
                        value: *doubled_amount,
                    })?;
                let breakdown = breakdowns.entry(production_type);
                breakdown.consumption_amount += consumption;
                building_entry(breakdown, building).consumption_amount += consumption;
                production_type
            }
            BuildingEffect::PercentageBonus {
                production_type,
                percentage,
            } => {
                let breakdown = breakdowns.entry(production_type);
                breakdown.percentage_bonus += percentage;
                building_entry(breakdown, building).percentage_bonus += percentage;
                production_type
            }
            // Applied per person by the population task accumulator
            BuildingEffect::PerPerson { .. } => continue,
        };

        if !touched.contains(&production_type) {
            touched.push(production_type);
        }
    }

    log::trace!(
        "Building {} touched {} resource lines",
        building.id,
        touched.len()
    );
    Ok(touched.len())
}
