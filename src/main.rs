#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod cli;
mod core;
mod export;
mod prelude;
mod profile;
mod quantity;
mod tables;

use std::io;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command, estimate, export},
    prelude::*,
    profile::Profile,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(io::stderr).init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Estimate(args) => estimate(&args)?,
        Command::Export(args) => export(&args)?,
        Command::Preset => print!("{}", Profile::esp32().to_toml()?),
    }

    info!("done!");
    Ok(())
}
