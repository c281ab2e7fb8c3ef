//! Demo: rater-agreement library in action
use anyhow::Result;
use rater_agreement::{
    bootstrap_alpha, rater_response, AlphaConfig, AlphaError, Label, MetricKind,
    ReliabilityCalculator, ReliabilityReport, ValueCounts,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Rater Agreement Demo ===\n");

    // 1. Four annotators grade twelve essays on a 1-5 scale, some skipped
    let ratings = vec![
        rater_response([(1, 1), (2, 2), (3, 3), (4, 3), (5, 2), (6, 1), (7, 4), (8, 1), (9, 2)]),
        rater_response([
            (1, 1), (2, 2), (3, 3), (4, 3), (5, 2), (6, 2), (7, 4), (8, 1), (9, 2), (10, 5),
        ]),
        rater_response([
            (2, 3), (3, 3), (4, 3), (5, 2), (6, 3), (7, 4), (8, 2), (9, 2), (10, 5), (11, 1),
            (12, 3),
        ]),
        rater_response([
            (1, 1), (2, 2), (3, 3), (4, 3), (5, 2), (6, 4), (7, 4), (8, 1), (9, 2), (10, 5),
            (11, 1),
        ]),
    ];

    let calculator = ReliabilityCalculator::new(&ratings)?;
    println!(
        "Dataset: {} raters, {} items ({} rated at least twice)\n",
        calculator.rater_count(),
        calculator.item_count(),
        calculator.pairable_item_count()
    );

    // 2. Value counts behind the ordinal metric
    println!("Value counts:");
    for (label, count) in calculator.value_counts().iter() {
        println!("  {label}: {count}");
    }
    println!();

    // 3. Alpha under every level of measurement
    let config = AlphaConfig {
        bootstrap_n: 2000,
        ..AlphaConfig::default()
    };
    let report = ReliabilityReport::build(&calculator, &MetricKind::ALL, &config)?;
    println!("{}\n", report.to_table());

    // 4. A caller-supplied metric: absolute instead of squared distance
    let absolute = |c: &Label, k: &Label, _: &ValueCounts| -> Result<f64, AlphaError> {
        let a = c.as_f64().unwrap_or_default();
        let b = k.as_f64().unwrap_or_default();
        Ok((a - b).abs())
    };
    let interval = bootstrap_alpha(&calculator, &absolute, &config)?;
    println!(
        "Absolute-difference alpha: {:.3} ({:.0}% interval [{:.3}, {:.3}])",
        interval.alpha,
        interval.confidence * 100.0,
        interval.lower,
        interval.upper
    );

    Ok(())
}
