// censor/src/main.rs
//! Censor entry point.

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use censor::cli::{Cli, Commands};
use censor::commands::{check, redact};
use censor::logger;

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.quiet {
        logger::init_logger(Some(LevelFilter::Off));
    } else if args.debug {
        logger::init_logger(Some(LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }

    match args.command {
        Commands::Redact(cmd) => redact::run_redact(&cmd),
        Commands::Check(cmd) => check::run_check(&cmd),
    }
}
