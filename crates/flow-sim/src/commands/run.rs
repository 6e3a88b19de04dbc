use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use flow_ana::serde::to_canonical_json_bytes;
use flow_ana::{load_config, run_monte_carlo, ResultSet, RunReport};
use log::info;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// YAML analysis configuration with a `monte_carlo` section.
    #[arg(long)]
    pub config: PathBuf,
    /// Output directory for `report.json` and the config copy.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(&args.config)?;
    fs::create_dir_all(&args.out)?;

    let output = run_monte_carlo(&config)?;
    let report = RunReport::new(&config, &output)?;
    fs::write(args.out.join("report.json"), to_canonical_json_bytes(&report)?)?;
    fs::copy(&args.config, args.out.join("config.yaml"))?;

    for summary in report.result_set(ResultSet::Data) {
        match summary.mean {
            Some(mean) => info!(
                "{}: {mean:.6e} +/- {:.2e} (weight {:.3e})",
                summary.label,
                summary.error.unwrap_or(0.0),
                summary.sum_weights
            ),
            None => info!("{}: no entries", summary.label),
        }
    }
    info!(
        "report written to {} (config hash {})",
        args.out.join("report.json").display(),
        report.provenance.config_hash
    );
    Ok(())
}
