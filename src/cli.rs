mod battery;
mod estimate;
mod export;
mod profile;

use clap::{Parser, Subcommand};

pub use self::{estimate::estimate, export::export};
use crate::cli::{estimate::EstimateArgs, export::ExportArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: estimate the daily consumption and the battery runtime.
    #[clap(name = "estimate")]
    Estimate(Box<EstimateArgs>),

    /// Export the estimation or the profile.
    #[clap(name = "export")]
    Export(Box<ExportArgs>),

    /// Print the built-in ESP32 profile as TOML, a starting point for a custom profile.
    #[clap(name = "preset")]
    Preset,
}
