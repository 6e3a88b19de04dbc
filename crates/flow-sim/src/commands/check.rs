use std::error::Error;
use std::f64::consts::TAU;
use std::str::FromStr;

use clap::Args;
use flow_core::{CorrelatorSpec, RngHandle};
use flow_qvec::{
    evaluate, nested_loops, recursion, required_bounds, EvaluationPath, QVectorTable,
    NESTED_ORDERS,
};
use log::debug;
use rand::Rng;
use serde::Serialize;

/// Comma separated harmonic list such as `2,-2`.
#[derive(Debug, Clone)]
pub struct HarmonicList(CorrelatorSpec);

impl FromStr for HarmonicList {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let harmonics = s
            .split(',')
            .map(|part| part.trim().parse::<i32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| format!("invalid harmonic list `{s}`: {err}"))?;
        CorrelatorSpec::new(harmonics)
            .map(HarmonicList)
            .map_err(|err| err.to_string())
    }
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Number of particles in the random event.
    #[arg(long, default_value_t = 24)]
    pub particles: usize,
    /// Seed of the random event.
    #[arg(long, default_value_t = 1)]
    pub seed: u64,
    /// Harmonic list to check, repeatable (e.g. `--harmonics 2,-2`).
    #[arg(long, required = true, allow_hyphen_values = true)]
    pub harmonics: Vec<HarmonicList>,
    /// Draw particle weights in `[0.5, 1.5)` instead of unit weights.
    #[arg(long)]
    pub weighted: bool,
    /// Largest accepted deviation between evaluators.
    #[arg(long, default_value_t = 1e-9)]
    pub tolerance: f64,
    /// Print rows as JSON lines instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct CheckRow {
    label: String,
    path: EvaluationPath,
    recursion: f64,
    dispatched: f64,
    nested: Option<f64>,
    deviation: f64,
}

pub fn run(args: &CheckArgs) -> Result<(), Box<dyn Error>> {
    let mut rng = RngHandle::from_seed(args.seed);
    let angles: Vec<f64> = (0..args.particles).map(|_| rng.gen_range(0.0..TAU)).collect();
    let weights: Option<Vec<f64>> = args
        .weighted
        .then(|| (0..args.particles).map(|_| rng.gen_range(0.5..1.5)).collect());

    let specs: Vec<CorrelatorSpec> = args.harmonics.iter().map(|h| h.0.clone()).collect();
    let (max_harmonic, max_power) = required_bounds(&specs);
    let table = QVectorTable::build(max_harmonic, max_power, &angles, weights.as_deref())?;
    debug!(
        "table bounds h<={max_harmonic} p<={max_power}, {} particles",
        args.particles
    );

    let mut failures = Vec::new();
    if !args.json {
        println!(
            "{:<24} {:>12} {:>20} {:>20} {:>20} {:>10}",
            "correlator", "path", "recursion", "dispatched", "nested", "deviation"
        );
    }
    for spec in &specs {
        let row = check_one(spec, &table, &angles, weights.as_deref())?;
        if args.json {
            println!("{}", serde_json::to_string(&row)?);
        } else {
            println!(
                "{:<24} {:>12} {:>20.12e} {:>20.12e} {:>20} {:>10.2e}",
                row.label,
                format!("{:?}", row.path),
                row.recursion,
                row.dispatched,
                row.nested
                    .map(|v| format!("{v:.12e}"))
                    .unwrap_or_else(|| "-".to_string()),
                row.deviation
            );
        }
        if row.deviation.is_nan() || row.deviation > args.tolerance {
            failures.push(row.label);
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "evaluators disagree beyond {:e} for {}",
            args.tolerance,
            failures.join(", ")
        )
        .into())
    }
}

fn check_one(
    spec: &CorrelatorSpec,
    table: &QVectorTable,
    angles: &[f64],
    weights: Option<&[f64]>,
) -> Result<CheckRow, Box<dyn Error>> {
    let correlation = evaluate(table, spec)?;
    let Some(dispatched) = correlation.mean() else {
        return Err(format!("{spec}: event too small for this correlator").into());
    };
    let recursive = recursion(table, spec.harmonics())?.re
        / recursion(table, spec.zeros().harmonics())?.re;
    let nested = if NESTED_ORDERS.contains(&spec.order()) {
        Some(nested_loops(angles, weights, spec.harmonics())?.re)
    } else {
        None
    };
    let deviation = nested
        .iter()
        .map(|n| (n - recursive).abs())
        .fold((dispatched - recursive).abs(), f64::max);
    Ok(CheckRow {
        label: spec.label(),
        path: EvaluationPath::for_order(spec.order()),
        recursion: recursive,
        dispatched,
        nested,
        deviation,
    })
}
