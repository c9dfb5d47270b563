//! Forecast a few sectors three years ahead.
//!
//! Run with `RUST_LOG=debug cargo run --example sector_forecast` to see
//! per-column transform details.

use sectorcast::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let table = ObservationTable::builder()
        .years((2012..=2024).collect())
        .target(
            "manufacturing",
            vec![
                10.0, 12.0, 11.0, 15.0, 18.0, 20.0, 19.0, 22.0, 25.0, 28.0, 30.0, 33.0, 35.0,
            ],
        )
        .target("agriculture", vec![4.0; 13])
        .raw_target(
            "net_exports",
            &[
                "-5", "-4", "-3.5", "-3", "-2", "-2.5", "-1", "-0.5", "0.5", "2", "3", "4.5", "6",
            ],
        )
        .build()?;

    let mut model = PolynomialForecaster::new(ForecasterConfig::default());
    model.fit(&table, 2012, 2)?;

    if let Some(transforms) = model.transforms() {
        for (name, transform) in transforms.iter() {
            match transform {
                ColumnTransform::PowerTransform { lambda } => {
                    println!("{:<14} lambda = {:.3}", name, lambda)
                }
                ColumnTransform::DegenerateConstant { value } => {
                    println!("{:<14} constant = {}", name, value)
                }
            }
        }
    }

    let forecast = model.forecast(3)?;
    println!("\n{:>6} {}", "year", forecast.target_names().join("  "));
    for i in 0..forecast.horizon() {
        if let Some((year, values)) = forecast.row(i) {
            let cells: Vec<String> = values.iter().map(|v| format!("{:.3}", v)).collect();
            println!("{:>6} {}", year, cells.join("  "));
        }
    }

    Ok(())
}
