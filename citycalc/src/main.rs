use anyhow::Result;
use citycalc::{Scenario, TextReport};
use citycalc_core::{
    calculate_all_cities, calculate_city_report, mark_within_existing_city_radius,
    MapCoordinates,
};
use citycalc_data::{PlaneNumber, TaxRateId};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file (JSON)
    #[arg(long)]
    scenario: PathBuf,

    /// Only report the city at this column
    #[arg(long, requires = "y")]
    x: Option<i32>,

    /// Only report the city at this row
    #[arg(long, requires = "x")]
    y: Option<i32>,

    /// Plane of the city given by --x/--y
    #[arg(long, default_value_t = 0)]
    plane: PlaneNumber,

    /// Tax rate for every city, overriding the owners' rates
    #[arg(long)]
    tax_rate: Option<String>,

    /// Cities build trade goods
    #[arg(long)]
    trade_goods: bool,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = std::str::FromStr::from_str(&args.log_level).unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    log::info!("Loading scenario {}", args.scenario.display());
    let scenario = Scenario::load(&args.scenario)?;

    let mut options = scenario.options.clone();
    if let Some(tax_rate) = &args.tax_rate {
        options.tax_rate = Some(TaxRateId::from(tax_rate.as_str()));
    }
    options.trade_goods |= args.trade_goods;

    let ctx = scenario.context();
    let reports = match (args.x, args.y) {
        (Some(x), Some(y)) => {
            let location = MapCoordinates::new(x, y, args.plane);
            vec![calculate_city_report(&ctx, &location, &options)?]
        }
        _ => calculate_all_cities(&ctx, &options)?,
    };

    for report in &reports {
        if args.json {
            println!("{}", report.to_json_pretty()?);
        } else {
            print!("{}", TextReport(report));
        }
    }

    let blocked = mark_within_existing_city_radius(&scenario.map);
    log::info!(
        "{} cities calculated, {} cells too close to a city to found another",
        reports.len(),
        blocked.count()
    );

    Ok(())
}
