//! Plain-text rendering of city reports.

use citycalc_core::{CityReport, GrowthRateBreakdown};
use std::fmt;

/// Displays a [`CityReport`] as a short block of text.
pub struct TextReport<'a>(pub &'a CityReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(
            f,
            "{} at {} (player {})",
            report.name, report.location, report.owner
        )?;

        writeln!(
            f,
            "  {:<14} {:>8} {:>8} {:>8}",
            "resource", "produced", "consumed", "net"
        )?;
        for line in report.productions.iter() {
            writeln!(
                f,
                "  {:<14} {:>8} {:>8} {:>8}",
                line.production_type.as_str(),
                line.capped_production_amount + line.convert_to_production_amount,
                line.consumption_amount,
                line.net_total()
            )?;
        }

        let growth = match &report.growth {
            GrowthRateBreakdown::Stable { .. } => "stable".to_string(),
            GrowthRateBreakdown::Growing(g) => format!("growing {:+}", g.capped_total),
            GrowthRateBreakdown::Dying(d) => format!("dying {:+}", d.capped_total),
        };
        writeln!(f, "  max size {}, {}", report.max_city_size, growth)?;

        match &report.unrest {
            Some(unrest) => writeln!(
                f,
                "  rebels {} of {} ({}% unrest)",
                unrest.final_total, unrest.population, unrest.total_percentage
            ),
            None => writeln!(f, "  rebels unknown (no tax rate)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citycalc_core::testing::{city, fixture_rules, MapBuilder};
    use citycalc_core::{
        calculate_city_report, CityContext, CityData, DifficultyLevel, FogOfWarMemory,
        MapCoordinates, PlayerDetails, ProductionOptions,
    };

    #[test]
    fn test_text_report() {
        let rules = fixture_rules();
        let map = MapBuilder::new(20, 20)
            .fill("grassland")
            .city(
                5,
                5,
                CityData {
                    name: "Ashford".into(),
                    ..city(1, "high_men", 8000)
                },
            )
            .build();
        let memory = FogOfWarMemory::default();
        let mut owner = PlayerDetails::human(1);
        owner.tax_rate = Some("tax_1".into());
        let players = vec![owner];
        let difficulty = DifficultyLevel::default();
        let ctx = CityContext::new(&rules, &map, &memory, &players, &difficulty);

        let report = calculate_city_report(
            &ctx,
            &MapCoordinates::new(5, 5, 0),
            &ProductionOptions::default(),
        )
        .unwrap();
        let text = TextReport(&report).to_string();

        assert!(text.starts_with("Ashford at (5, 5, 0) (player 1)"));
        assert!(text.contains("food"));
        assert!(text.contains("max size 25, growing"));
        assert!(text.contains("rebels 1 of 8 (10% unrest)"));
    }
}
