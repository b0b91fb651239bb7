use clap::Parser;
use itertools::Itertools;

use crate::{
    cli::profile::ProfileArgs,
    prelude::*,
    tables::{build_breakdown_table, build_summary_table},
};

#[derive(Parser)]
pub struct EstimateArgs {
    #[clap(flatten)]
    pub profile: ProfileArgs,

    #[clap(long, env = "DORMOUSE_FORMAT", default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables.
    Table,

    /// The full calculation result.
    Json,
}

#[instrument(skip_all)]
pub fn estimate(args: &EstimateArgs) -> Result {
    let result = args.profile.load()?.estimate();

    for warning in &result.warnings {
        warn!(%warning);
    }
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Table if result.is_valid() => {
            println!("{}", build_summary_table(&result));
            println!("{}", build_breakdown_table(&result));
        }
        OutputFormat::Table => {}
    }

    ensure!(result.is_valid(), "invalid profile: {}", result.errors.iter().join("; "));
    Ok(())
}
