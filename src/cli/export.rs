use std::{fs, path::PathBuf};

use clap::{Parser, Subcommand};

use crate::{cli::profile::ProfileArgs, export::to_csv, prelude::*};

#[derive(Parser)]
pub struct ExportArgs {
    #[command(subcommand)]
    pub command: ExportCommand,
}

#[derive(Subcommand)]
pub enum ExportCommand {
    /// Export the KPIs and the phase breakdown as CSV.
    Csv(ExportTargetArgs),

    /// Export the effective profile as a JSON snapshot.
    Profile(ExportTargetArgs),
}

#[derive(Parser)]
pub struct ExportTargetArgs {
    #[clap(flatten)]
    pub profile: ProfileArgs,

    /// Output file, standard output when omitted.
    #[clap(long, short)]
    pub output: Option<PathBuf>,
}

impl ExportTargetArgs {
    fn write(&self, contents: &str) -> Result {
        match &self.output {
            Some(path) => {
                fs::write(path, contents)
                    .with_context(|| format!("failed to write `{}`", path.display()))?;
                info!(path = %path.display(), "exported");
            }
            None => println!("{contents}"),
        }
        Ok(())
    }
}

#[instrument(skip_all)]
pub fn export(args: &ExportArgs) -> Result {
    match &args.command {
        ExportCommand::Csv(args) => args.write(&to_csv(&args.profile.load()?.estimate())?),
        ExportCommand::Profile(args) => args.write(&args.profile.load()?.to_json()?),
    }
}
