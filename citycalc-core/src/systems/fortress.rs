//! Wizard's fortress output: per pick held and per plane.

use crate::breakdown::{PickTypeProduction, PlaneProduction, ProductionBreakdownSet};
use crate::doubled::Doubled;
use crate::error::CalcResult;
use crate::players::PlayerDetails;
use citycalc_data::{PickTypeDef, PlaneDef, PlaneNumber, RuleLookup};
use tracing::instrument;

pub fn add_production_from_fortress_pick_type(
    pick_type: &PickTypeDef,
    count: i32,
    breakdowns: &mut ProductionBreakdownSet,
) {
    if count <= 0 {
        return;
    }
    for production in &pick_type.fortress_productions {
        let each = Doubled::from_raw(production.doubled_amount);
        let breakdown = breakdowns.entry(&production.production_type);
        breakdown.doubled_production_amount += each * count;
        breakdown.pick_type_productions.push(PickTypeProduction {
            pick_type: pick_type.id.clone(),
            count,
            doubled_amount_each: each,
            doubled_amount: each * count,
        });
    }
}

pub fn add_production_from_fortress_plane(plane: &PlaneDef, breakdowns: &mut ProductionBreakdownSet) {
    for production in &plane.fortress_productions {
        let amount = Doubled::from_raw(production.doubled_amount);
        let breakdown = breakdowns.entry(&production.production_type);
        breakdown.doubled_production_amount += amount;
        breakdown.plane_productions.push(PlaneProduction {
            plane: plane.plane_number,
            doubled_amount: amount,
        });
    }
}

/// Add everything a fortress on `plane` yields to `owner`.
#[instrument(skip_all, name = "fortress")]
pub fn add_fortress_productions(
    owner: &PlayerDetails,
    plane: PlaneNumber,
    rules: &dyn RuleLookup,
    breakdowns: &mut ProductionBreakdownSet,
) -> CalcResult<()> {
    for pick_type in rules.pick_types() {
        let mut count = 0;
        for held in &owner.picks {
            let pick = rules.find_pick(&held.pick, "add_fortress_productions")?;
            if pick.pick_type == pick_type.id {
                count += held.quantity;
            }
        }
        log::trace!("Player {} holds {} picks of type {}", owner.player_id, count, pick_type.id);
        add_production_from_fortress_pick_type(pick_type, count, breakdowns);
    }

    let plane = rules.find_plane(plane, "add_fortress_productions")?;
    add_production_from_fortress_plane(plane, breakdowns);
    Ok(())
}
