use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use flow_ana::load_config;

#[derive(Args, Debug)]
pub struct LabelsArgs {
    /// YAML analysis configuration.
    #[arg(long)]
    pub config: PathBuf,
}

pub fn run(args: &LabelsArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(&args.config)?;
    for (index, spec) in config.correlators.iter().enumerate() {
        println!("{index}\t{spec}");
    }
    Ok(())
}
