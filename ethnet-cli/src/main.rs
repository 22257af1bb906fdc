mod args;
mod commands;

use crate::{
    args::Opts,
    commands::{load_registry, run, Outcome},
};
use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit status of a checkpoint that failed its quorum, distinct from usage and runtime errors.
const EXIT_REJECTED: u8 = 2;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // stdout carries command output only
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let opts = Opts::parse();
    match try_main(&opts) {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::Rejected(rejection)) => {
            tracing::warn!(%rejection, "falling back to full sync");
            ExitCode::from(EXIT_REJECTED)
        },
        Err(error) => {
            eprintln!("Error: {error:?}");
            ExitCode::FAILURE
        },
    }
}

fn try_main(opts: &Opts) -> Result<Outcome> {
    let registry = load_registry(opts)?;
    let mut stdout = std::io::stdout().lock();
    run(opts, &registry, &mut stdout)
}
