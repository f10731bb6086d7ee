//! Maintained spells: city enchantments and curses, overland unrest effects.

use crate::breakdown::{ProductionBreakdownSet, SpellProduction};
use crate::doubled::Doubled;
use crate::error::CalcResult;
use crate::map::MapCoordinates;
use crate::memory::{FogOfWarMemory, MemoryMaintainedSpell};
use citycalc_data::{PlayerId, RuleLookup, SpellId};
use serde::Serialize;
use tracing::instrument;

/// Unrest effect of one maintained spell on one city.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpellUnrestReduction {
    pub spell: SpellId,
    pub unrest_reduction: i32,
    pub unrest_percentage: i32,
}

/// How a maintained spell changes unrest in a city owned by `city_owner`.
///
/// Spells with a city effect take their values from it regardless of who cast
/// them. Other spells only count when a beneficial spell was cast by the owner
/// or a detrimental one by someone else.
pub fn create_unrest_reduction_from_spell(
    spell: &MemoryMaintainedSpell,
    city_owner: PlayerId,
    rules: &dyn RuleLookup,
) -> CalcResult<Option<SpellUnrestReduction>> {
    let (unrest_reduction, unrest_percentage) = match &spell.city_spell_effect {
        Some(effect_id) => {
            let effect =
                rules.find_city_spell_effect(effect_id, "create_unrest_reduction_from_spell")?;
            (
                effect.unrest_reduction.unwrap_or(0),
                effect.unrest_percentage.unwrap_or(0),
            )
        }
        None => {
            let def = rules.find_spell(&spell.spell, "create_unrest_reduction_from_spell")?;
            let applies = if def.detrimental {
                spell.caster != city_owner
            } else {
                spell.caster == city_owner
            };
            match def.unrest_reduction {
                Some(reduction) if applies => (reduction, 0),
                _ => (0, 0),
            }
        }
    };

    if unrest_reduction == 0 && unrest_percentage == 0 {
        return Ok(None);
    }
    Ok(Some(SpellUnrestReduction {
        spell: spell.spell.clone(),
        unrest_reduction,
        unrest_percentage,
    }))
}

/// Add the production effects of spells cast on the city at `location`.
#[instrument(skip_all, name = "spell_effects")]
pub fn add_production_from_spell_effects(
    location: &MapCoordinates,
    memory: &FogOfWarMemory,
    rules: &dyn RuleLookup,
    breakdowns: &mut ProductionBreakdownSet,
) -> CalcResult<()> {
    for spell in memory.spells_affecting(location) {
        let Some(effect_id) = &spell.city_spell_effect else {
            continue;
        };
        let effect = rules.find_city_spell_effect(effect_id, "add_production_from_spell_effects")?;
        for production in &effect.productions {
            let amount = Doubled::from_raw(production.doubled_amount);
            let breakdown = breakdowns.entry(&production.production_type);
            breakdown.doubled_production_amount += amount;
            breakdown.percentage_bonus += production.percentage_bonus;
            breakdown.percentage_penalty += production.percentage_penalty;
            breakdown.amount_after_percentages += production.amount_after_percentages;
            breakdown.spell_productions.push(SpellProduction {
                spell: spell.spell.clone(),
                doubled_amount: amount,
                percentage_bonus: production.percentage_bonus,
                percentage_penalty: production.percentage_penalty,
                amount_after_percentages: production.amount_after_percentages,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_rules;
    use citycalc_data::CitySpellEffectId;

    fn overland(spell: &str, caster: PlayerId) -> MemoryMaintainedSpell {
        MemoryMaintainedSpell {
            spell: SpellId::from(spell),
            caster,
            city_location: None,
            city_spell_effect: None,
        }
    }

    fn on_city(spell: &str, caster: PlayerId, location: MapCoordinates) -> MemoryMaintainedSpell {
        MemoryMaintainedSpell {
            spell: SpellId::from(spell),
            caster,
            city_location: Some(location),
            city_spell_effect: Some(CitySpellEffectId::from(spell)),
        }
    }

    #[test]
    fn test_beneficial_spell_only_helps_caster() {
        let rules = fixture_rules();
        let own = create_unrest_reduction_from_spell(&overland("just_cause", 1), 1, &rules).unwrap();
        assert_eq!(own.unwrap().unrest_reduction, 1);

        let other = create_unrest_reduction_from_spell(&overland("just_cause", 2), 1, &rules).unwrap();
        assert!(other.is_none());
    }

    #[test]
    fn test_detrimental_spell_only_hurts_others() {
        let rules = fixture_rules();
        let enemy =
            create_unrest_reduction_from_spell(&overland("great_wasting", 2), 1, &rules).unwrap();
        assert_eq!(enemy.unwrap().unrest_reduction, -1);

        let own = create_unrest_reduction_from_spell(&overland("great_wasting", 1), 1, &rules).unwrap();
        assert!(own.is_none());
    }

    #[test]
    fn test_city_effect_ignores_ownership() {
        let rules = fixture_rules();
        let here = MapCoordinates::new(4, 4, 0);
        let famine = create_unrest_reduction_from_spell(&on_city("famine", 1, here), 1, &rules)
            .unwrap()
            .unwrap();
        assert_eq!(famine.unrest_percentage, 25);
        assert_eq!(famine.unrest_reduction, 0);
    }

    #[test]
    fn test_spell_productions_only_for_targeted_city() {
        let rules = fixture_rules();
        let here = MapCoordinates::new(4, 4, 0);
        let there = MapCoordinates::new(8, 4, 0);
        let memory = FogOfWarMemory {
            maintained_spells: vec![
                on_city("famine", 2, here),
                on_city("prosperity", 1, there),
                overland("just_cause", 1),
            ],
            ..Default::default()
        };
        let mut set = ProductionBreakdownSet::default();
        add_production_from_spell_effects(&here, &memory, &rules, &mut set).unwrap();

        let rations = set.get("rations").unwrap();
        assert_eq!(rations.percentage_penalty, 50);
        assert_eq!(rations.spell_productions[0].spell, SpellId::from("famine"));
        assert!(set.get("gold").is_none());
    }
}
