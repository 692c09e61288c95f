//! Check command: validates a censor rule file.

use anyhow::Result;
use std::io::{self, Write};

use censor_core::CensorConfig;

use crate::cli::CheckCommand;

/// Runs the `check` command. Loading performs full validation.
pub fn run_check(cmd: &CheckCommand) -> Result<()> {
    let config = CensorConfig::load_from_file(&cmd.rules)?;
    let global = config.global_rules().count();
    let regexp = config.rules.iter().filter(|r| r.regexp).count();

    let mut stdout = io::stdout().lock();
    writeln!(
        stdout,
        "{} rule(s) valid: {} global, {} scoped, {} regexp",
        config.rules.len(),
        global,
        config.rules.len() - global,
        regexp
    )?;
    Ok(())
}
