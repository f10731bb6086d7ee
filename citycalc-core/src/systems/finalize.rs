//! Turn an accumulated resource line into whole numbers.
//!
//! Order matters and every step floors:
//!
//! 1. halve the doubled amount using the production type's rounding
//! 2. add the percentage bonus
//! 3. subtract the percentage penalty
//! 4. halve any excess over the terrain food cap (rations only)
//! 5. add the flat after-percentage amount
//! 6. apply the AI difficulty multiplier
//! 7. cap food at the maximum city size

use crate::breakdown::ProductionBreakdown;
use crate::config::DifficultyLevel;
use crate::doubled::percent_of;
use crate::error::{CalcError, CalcResult};
use crate::players::PlayerDetails;
use citycalc_data::defines::production as resource;
use citycalc_data::RuleLookup;
use tracing::instrument;

/// Finalize one resource line in place.
///
/// `food_production_from_terrain_tiles` is the overfarming cap; pass it only for
/// the line that can be overfarmed.
#[instrument(skip_all, name = "finalize", fields(production_type = %breakdown.production_type))]
pub fn halve_add_percentage_bonus_and_cap_production(
    owner: &PlayerDetails,
    breakdown: &mut ProductionBreakdown,
    food_production_from_terrain_tiles: Option<i32>,
    difficulty: &DifficultyLevel,
    rules: &dyn RuleLookup,
) -> CalcResult<()> {
    let def = rules.find_production_type(
        &breakdown.production_type,
        "halve_add_percentage_bonus_and_cap_production",
    )?;
    breakdown.rounding_direction = def.rounding;
    breakdown.difficulty_level_multiplier_applies = def.difficulty_level_multiplier_applies;

    breakdown.amount_before_percentages = breakdown
        .doubled_production_amount
        .halve(def.rounding)
        .ok_or_else(|| CalcError::ArithmeticConsistency {
            caller: "halve_add_percentage_bonus_and_cap_production",
            what: format!("Production of {}", breakdown.production_type),
            value: breakdown.doubled_production_amount.raw(),
        })?;

    let before = breakdown.amount_before_percentages;
    breakdown.amount_plus_percentage = before + percent_of(before, breakdown.percentage_bonus);

    let plus = breakdown.amount_plus_percentage;
    breakdown.amount_minus_percentage = plus - percent_of(plus, breakdown.percentage_penalty);

    let minus = breakdown.amount_minus_percentage;
    breakdown.food_production_from_terrain_tiles = food_production_from_terrain_tiles;
    breakdown.amount_after_overfarming = match food_production_from_terrain_tiles {
        Some(cap) if minus > cap => cap + (minus - cap) / 2,
        _ => minus,
    };

    breakdown.base_amount = breakdown.amount_after_overfarming + breakdown.amount_after_percentages;

    breakdown.difficulty_level_multiplier = if def.difficulty_level_multiplier_applies {
        difficulty.production_multiplier(owner)
    } else {
        100
    };
    breakdown.total_adjusted_for_difficulty_level =
        percent_of(breakdown.base_amount, breakdown.difficulty_level_multiplier);

    breakdown.capped_production_amount = if breakdown.production_type.as_str() == resource::FOOD {
        breakdown
            .total_adjusted_for_difficulty_level
            .min(difficulty.city_max_size)
    } else {
        breakdown.total_adjusted_for_difficulty_level
    };

    log::debug!(
        "{}: {} before % -> +{}% {} -> -{}% {} -> base {} -> x{}% {} -> capped {}",
        breakdown.production_type,
        breakdown.amount_before_percentages,
        breakdown.percentage_bonus,
        breakdown.amount_plus_percentage,
        breakdown.percentage_penalty,
        breakdown.amount_minus_percentage,
        breakdown.base_amount,
        breakdown.difficulty_level_multiplier,
        breakdown.total_adjusted_for_difficulty_level,
        breakdown.capped_production_amount
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doubled::Doubled;
    use crate::players::WizardIdentity;
    use crate::testing::fixture_rules;
    use citycalc_data::{ProductionTypeId, RoundingDirection};

    fn line(production_type: &str, doubled: i32) -> ProductionBreakdown {
        let mut breakdown = ProductionBreakdown::new(ProductionTypeId::from(production_type));
        breakdown.doubled_production_amount = Doubled(doubled);
        breakdown
    }

    fn finalize(breakdown: &mut ProductionBreakdown, owner: &PlayerDetails, cap: Option<i32>) -> CalcResult<()> {
        halve_add_percentage_bonus_and_cap_production(
            owner,
            breakdown,
            cap,
            &DifficultyLevel {
                ai_wizards_production_rate_multiplier: 150,
                ai_raiders_production_rate_multiplier: 50,
                ..Default::default()
            },
            &fixture_rules(),
        )
    }

    #[test]
    fn test_round_down_and_round_up() {
        let human = PlayerDetails::human(1);

        let mut gold = line("gold", 7);
        finalize(&mut gold, &human, None).unwrap();
        assert_eq!(gold.amount_before_percentages, 3);
        assert_eq!(gold.rounding_direction, RoundingDirection::RoundDown);

        let mut power = line("magic_power", 7);
        finalize(&mut power, &human, None).unwrap();
        assert_eq!(power.amount_before_percentages, 4);
    }

    #[test]
    fn test_exact_multiple_violation() {
        let mut upkeep = line("upkeep", 5);
        let err = finalize(&mut upkeep, &PlayerDetails::human(1), None).unwrap_err();
        assert!(matches!(err, CalcError::ArithmeticConsistency { value: 5, .. }));
    }

    #[test]
    fn test_penalty_is_floored_not_rounded() {
        // 33 with a 50% penalty loses floor(16.5) = 16, leaving 17
        let mut production = line("production", 66);
        production.percentage_penalty = 50;
        finalize(&mut production, &PlayerDetails::human(1), None).unwrap();
        assert_eq!(production.amount_minus_percentage, 17);
        assert_eq!(production.capped_production_amount, 17);
    }

    #[test]
    fn test_bonus_then_penalty_then_flat_addition() {
        let mut gold = line("gold", 20);
        gold.percentage_bonus = 55;
        gold.percentage_penalty = 25;
        gold.amount_after_percentages = 3;
        finalize(&mut gold, &PlayerDetails::human(1), None).unwrap();

        assert_eq!(gold.amount_before_percentages, 10);
        assert_eq!(gold.amount_plus_percentage, 15);
        assert_eq!(gold.amount_minus_percentage, 12);
        assert_eq!(gold.base_amount, 15);
        assert_eq!(gold.capped_production_amount, 15);
    }

    #[test]
    fn test_overfarming_halves_excess() {
        let mut rations = line("rations", 40);
        finalize(&mut rations, &PlayerDetails::human(1), Some(12)).unwrap();
        // 20 against a cap of 12: 12 + floor(8 / 2)
        assert_eq!(rations.amount_after_overfarming, 16);
        assert_eq!(rations.food_production_from_terrain_tiles, Some(12));

        let mut under = line("rations", 20);
        finalize(&mut under, &PlayerDetails::human(1), Some(12)).unwrap();
        assert_eq!(under.amount_after_overfarming, 10);
    }

    #[test]
    fn test_difficulty_multiplier_by_identity() {
        let mut wizard_gold = line("gold", 22);
        finalize(&mut wizard_gold, &PlayerDetails::ai(2, WizardIdentity::Wizard), None).unwrap();
        assert_eq!(wizard_gold.difficulty_level_multiplier, 150);
        assert_eq!(wizard_gold.capped_production_amount, 16);

        let mut raider_gold = line("gold", 22);
        finalize(&mut raider_gold, &PlayerDetails::ai(3, WizardIdentity::Raiders), None).unwrap();
        assert_eq!(raider_gold.capped_production_amount, 5);

        // Food is not difficulty sensitive
        let mut food = line("food", 22);
        finalize(&mut food, &PlayerDetails::ai(2, WizardIdentity::Wizard), None).unwrap();
        assert_eq!(food.difficulty_level_multiplier, 100);
        assert_eq!(food.capped_production_amount, 11);
    }

    #[test]
    fn test_food_capped_at_city_max_size() {
        let mut food = line("food", 70);
        finalize(&mut food, &PlayerDetails::human(1), None).unwrap();
        assert_eq!(food.total_adjusted_for_difficulty_level, 35);
        assert_eq!(food.capped_production_amount, 25);

        let mut gold = line("gold", 70);
        finalize(&mut gold, &PlayerDetails::human(1), None).unwrap();
        assert_eq!(gold.capped_production_amount, 35);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the penalty removes exactly floor(amount * penalty / 100)
            #[test]
            fn penalty_removes_floored_share(doubled in 0..10_000i32, penalty in 0..=100i32) {
                let mut production = line("production", doubled);
                production.percentage_penalty = penalty;
                finalize(&mut production, &PlayerDetails::human(1), None).unwrap();
                let before = doubled / 2;
                prop_assert_eq!(production.amount_minus_percentage, before - before * penalty / 100);
            }

            /// Property: overfarming never takes rations below the cap or above the uncapped amount
            #[test]
            fn overfarming_bounded(doubled in 0..2_000i32, cap in 0..50i32) {
                let mut rations = line("rations", doubled);
                finalize(&mut rations, &PlayerDetails::human(1), Some(cap)).unwrap();
                let uncapped = rations.amount_minus_percentage;
                prop_assert!(rations.amount_after_overfarming <= uncapped);
                prop_assert!(rations.amount_after_overfarming >= uncapped.min(cap));
            }
        }
    }
}
