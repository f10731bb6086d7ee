//! City garrisons and validated unit selections.

use crate::context::CityContext;
use crate::error::{CalcError, CalcResult};
use crate::map::MapCoordinates;
use crate::memory::MemoryUnit;
use citycalc_data::{PlayerId, RuleLookup};

/// A non-empty group of units sharing one location and one owner.
#[derive(Debug, Clone)]
pub struct UnitStack {
    units: Vec<MemoryUnit>,
}

impl UnitStack {
    pub fn new(units: Vec<MemoryUnit>) -> CalcResult<Self> {
        let Some(first) = units.first() else {
            return Err(CalcError::InvalidUnitStack("No units selected".to_string()));
        };
        for unit in &units[1..] {
            if unit.location != first.location {
                return Err(CalcError::InvalidUnitStack(format!(
                    "Unit {} is at {} but unit {} is at {}",
                    unit.id, unit.location, first.id, first.location
                )));
            }
            if unit.owner != first.owner {
                return Err(CalcError::InvalidUnitStack(format!(
                    "Unit {} is owned by player {} but unit {} is owned by player {}",
                    unit.id, unit.owner, first.id, first.owner
                )));
            }
        }
        Ok(Self { units })
    }

    pub fn location(&self) -> MapCoordinates {
        self.units[0].location
    }

    pub fn owner(&self) -> PlayerId {
        self.units[0].owner
    }

    pub fn units(&self) -> &[MemoryUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

fn counts_as_garrison(unit: &MemoryUnit, rules: &dyn RuleLookup) -> CalcResult<bool> {
    Ok(rules
        .find_unit(&unit.unit, "count_garrison")?
        .magic_realm
        .is_garrison())
}

/// Living normal units and heroes of `owner` at `location`.
///
/// Units in `extra` are counted too unless they are already there; the stack must
/// stand at `location` and belong to `owner`.
pub fn count_garrison(
    ctx: &CityContext<'_>,
    location: &MapCoordinates,
    owner: PlayerId,
    extra: Option<&UnitStack>,
) -> CalcResult<i32> {
    let mut count = 0;
    let mut seen = Vec::new();
    for unit in ctx.memory.alive_units_at(location, owner) {
        seen.push(unit.id);
        if counts_as_garrison(unit, ctx.rules)? {
            count += 1;
        }
    }

    if let Some(stack) = extra {
        if &stack.location() != location {
            return Err(CalcError::InvalidUnitStack(format!(
                "Units at {} cannot garrison the city at {}",
                stack.location(),
                location
            )));
        }
        if stack.owner() != owner {
            return Err(CalcError::InvalidUnitStack(format!(
                "Units of player {} cannot garrison a city of player {}",
                stack.owner(),
                owner
            )));
        }
        for unit in stack.units() {
            if !seen.contains(&unit.id) && counts_as_garrison(unit, ctx.rules)? {
                count += 1;
            }
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DifficultyLevel;
    use crate::memory::{FogOfWarMemory, UnitStatus};
    use crate::players::PlayerDetails;
    use crate::testing::{fixture_rules, MapBuilder};

    const HERE: MapCoordinates = MapCoordinates::new(3, 3, 0);

    fn unit(id: u32, kind: &str, owner: PlayerId, location: MapCoordinates) -> MemoryUnit {
        MemoryUnit {
            id,
            unit: kind.into(),
            owner,
            location,
            status: UnitStatus::Alive,
        }
    }

    #[test]
    fn test_stack_validation() {
        let err = UnitStack::new(Vec::new()).unwrap_err();
        assert_eq!(err, CalcError::InvalidUnitStack("No units selected".to_string()));

        let elsewhere = MapCoordinates::new(4, 3, 0);
        let err = UnitStack::new(vec![unit(1, "spearmen", 1, HERE), unit(2, "spearmen", 1, elsewhere)])
            .unwrap_err();
        assert!(err.to_string().contains("Unit 2 is at (4, 3, 0)"));

        let err = UnitStack::new(vec![unit(1, "spearmen", 1, HERE), unit(2, "spearmen", 2, HERE)])
            .unwrap_err();
        assert!(err.to_string().contains("owned by player 2"));

        let stack = UnitStack::new(vec![unit(1, "spearmen", 1, HERE), unit(2, "brax", 1, HERE)]).unwrap();
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.owner(), 1);
        assert_eq!(stack.location(), HERE);
    }

    #[test]
    fn test_garrison_counts_normal_and_heroes_only() {
        let rules = fixture_rules();
        let map = MapBuilder::new(10, 10).build();
        let mut dead = unit(4, "spearmen", 1, HERE);
        dead.status = UnitStatus::Dead;
        let memory = FogOfWarMemory {
            units: vec![
                unit(1, "spearmen", 1, HERE),
                unit(2, "brax", 1, HERE),
                unit(3, "fire_elemental", 1, HERE),
                dead,
                unit(5, "spearmen", 2, HERE),
            ],
            ..Default::default()
        };
        let players = vec![PlayerDetails::human(1)];
        let difficulty = DifficultyLevel::default();
        let ctx = CityContext::new(&rules, &map, &memory, &players, &difficulty);

        assert_eq!(count_garrison(&ctx, &HERE, 1, None).unwrap(), 2);

        // Unit 1 is already counted; unit 6 is new
        let stack = UnitStack::new(vec![unit(1, "spearmen", 1, HERE), unit(6, "swordsmen", 1, HERE)]).unwrap();
        assert_eq!(count_garrison(&ctx, &HERE, 1, Some(&stack)).unwrap(), 3);

        let foreign = UnitStack::new(vec![unit(7, "spearmen", 2, HERE)]).unwrap();
        assert!(matches!(
            count_garrison(&ctx, &HERE, 1, Some(&foreign)),
            Err(CalcError::InvalidUnitStack(_))
        ));
    }
}
