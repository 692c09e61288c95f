//! Redact command: applies the censor rules in scope to one document.

use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::fs;
use std::io::{self, Read, Write};

use censor_core::{ApplierOptions, CensorApplier, CensorConfig, CensorSummaryItem, TargetIdentity};

use crate::cli::{RedactCommand, TargetArgs};

impl TargetArgs {
    pub fn to_target(&self) -> TargetIdentity {
        TargetIdentity {
            requester_id: self.requester,
            request_id: self.request,
            organization_id: self.organization,
        }
    }
}

/// Runs the `redact` command.
pub fn run_redact(cmd: &RedactCommand) -> Result<()> {
    info!("Starting censor redaction.");
    let config = CensorConfig::load_from_file(&cmd.rules)?;
    let rules = config.compile().context("Failed to compile censor rules")?;

    if !cmd.placeholder.is_ascii() {
        bail!("Placeholder '{}' is not an ASCII character", cmd.placeholder);
    }
    let applier = CensorApplier::new(ApplierOptions {
        placeholder: cmd.placeholder as u8,
    })?;
    let target = cmd.target.to_target();

    let input = read_input(cmd)?;
    let input_len = input.len();

    let (output, summary) = if cmd.binary {
        applier.redact_binary_with_summary(input, &rules, &target)
    } else {
        let text = String::from_utf8(input)
            .context("Input is not valid UTF-8; use --binary for binary payloads")?;
        let (out, summary) = applier.redact_with_summary(text, &rules, &target);
        (out.into_bytes(), summary)
    };

    debug!(
        "Content redacted. Original length: {}, Redacted length: {}",
        input_len,
        output.len()
    );

    write_output(cmd, &output)?;
    if cmd.summary {
        print_summary(&mut io::stderr(), &summary)?;
    }
    Ok(())
}

fn read_input(cmd: &RedactCommand) -> Result<Vec<u8>> {
    match &cmd.input_file {
        Some(path) => {
            fs::read(path).with_context(|| format!("Failed to read input file {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(cmd: &RedactCommand, output: &[u8]) -> Result<()> {
    match &cmd.output {
        Some(path) => {
            fs::write(path, output)
                .with_context(|| format!("Failed to write output file {}", path.display()))?;
            info!("Redacted output written to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output).context("Failed to write to stdout")?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Writes one `rule: count` line per applied rule.
pub fn print_summary<W: Write>(writer: &mut W, summary: &[CensorSummaryItem]) -> Result<()> {
    writeln!(writer, "Censor summary:")?;
    if summary.is_empty() {
        writeln!(writer, "  no rules applied")?;
    }
    for item in summary {
        writeln!(writer, "  {}: {} occurrence(s)", item.rule_name, item.occurrences)?;
    }
    Ok(())
}
