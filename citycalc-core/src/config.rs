use crate::players::{PlayerDetails, WizardIdentity};
use serde::{Deserialize, Serialize};

/// Difficulty level settings that affect city calculations.
///
/// Multipliers are percentages: 100 = ×1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyLevel {
    pub ai_wizards_production_rate_multiplier: i32,
    pub ai_raiders_production_rate_multiplier: i32,
    pub ai_wizards_population_growth_rate_multiplier: i32,
    pub ai_raiders_population_growth_rate_multiplier: i32,

    /// Hard cap on maximum city size, in persons (thousands of citizens).
    pub city_max_size: i32,
}

impl Default for DifficultyLevel {
    fn default() -> Self {
        Self {
            ai_wizards_production_rate_multiplier: 100,
            ai_raiders_production_rate_multiplier: 100,
            ai_wizards_population_growth_rate_multiplier: 100,
            ai_raiders_population_growth_rate_multiplier: 100,
            city_max_size: 25,
        }
    }
}

impl DifficultyLevel {
    /// Production multiplier for a city owner; human players always get 100.
    pub fn production_multiplier(&self, owner: &PlayerDetails) -> i32 {
        if owner.human {
            100
        } else if owner.identity == WizardIdentity::Raiders {
            self.ai_raiders_production_rate_multiplier
        } else {
            self.ai_wizards_production_rate_multiplier
        }
    }

    /// Population growth multiplier for a city owner; human players always get 100.
    pub fn growth_multiplier(&self, owner: &PlayerDetails) -> i32 {
        if owner.human {
            100
        } else if owner.identity == WizardIdentity::Raiders {
            self.ai_raiders_population_growth_rate_multiplier
        } else {
            self.ai_wizards_population_growth_rate_multiplier
        }
    }
}

/// Overland map dimensions and city spacing rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSize {
    pub width: i32,
    pub height: i32,
    /// Number of planes.
    pub depth: u32,
    pub wraps_left_to_right: bool,
    pub wraps_top_to_bottom: bool,

    /// New cities may not be founded within this many cells of an existing one.
    pub city_separation: i32,

    /// Radius of the area a city collects from.
    pub city_radius: i32,
}

impl Default for MapSize {
    fn default() -> Self {
        Self {
            width: 60,
            height: 40,
            depth: 2,
            wraps_left_to_right: true,
            wraps_top_to_bottom: false,
            city_separation: 3,
            city_radius: citycalc_data::defines::city::CITY_RADIUS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let difficulty = DifficultyLevel::default();
        assert_eq!(difficulty.city_max_size, 25);
        assert_eq!(difficulty.ai_wizards_production_rate_multiplier, 100);

        let size = MapSize::default();
        assert_eq!(size.city_radius, 2);
        assert!(size.wraps_left_to_right);
    }

    #[test]
    fn test_multipliers_by_identity() {
        let difficulty = DifficultyLevel {
            ai_wizards_production_rate_multiplier: 150,
            ai_raiders_production_rate_multiplier: 75,
            ai_wizards_population_growth_rate_multiplier: 200,
            ai_raiders_population_growth_rate_multiplier: 50,
            ..Default::default()
        };

        let human = PlayerDetails::human(1);
        let wizard = PlayerDetails::ai(2, WizardIdentity::Wizard);
        let raiders = PlayerDetails::ai(-1, WizardIdentity::Raiders);

        assert_eq!(difficulty.production_multiplier(&human), 100);
        assert_eq!(difficulty.production_multiplier(&wizard), 150);
        assert_eq!(difficulty.production_multiplier(&raiders), 75);
        assert_eq!(difficulty.growth_multiplier(&human), 100);
        assert_eq!(difficulty.growth_multiplier(&wizard), 200);
        assert_eq!(difficulty.growth_multiplier(&raiders), 50);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let difficulty: DifficultyLevel =
            serde_json::from_str(r#"{ "city_max_size": 20 }"#).unwrap();
        assert_eq!(difficulty.city_max_size, 20);
        assert_eq!(difficulty.ai_raiders_production_rate_multiplier, 100);
    }
}
