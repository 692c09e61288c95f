//! This file defines the command-line interface (CLI) for the censor application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "censor",
    version = env!("CARGO_PKG_VERSION"),
    about = "Apply censor rules to a document",
    long_about = "Censor applies an ordered list of censor rules (literal or regex, text or binary mode) to a document, using only the rules that are global or bound to the given requester, request or organization.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `censor` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Redacts an input file or stdin with the rules in scope.
    #[command(about = "Redacts an input file or stdin with the censor rules in scope.")]
    Redact(RedactCommand),

    /// Validates a rule file without redacting anything.
    #[command(about = "Validates a censor rule file and reports what it contains.")]
    Check(CheckCommand),
}

/// The identity the input belongs to. Rules bound to other identities are skipped.
#[derive(Args, Debug, Default, Clone)]
pub struct TargetArgs {
    #[arg(long = "requester", value_name = "ID", help = "Id of the requester the input belongs to.")]
    pub requester: Option<u64>,

    #[arg(long = "request", value_name = "ID", help = "Id of the request the input belongs to.")]
    pub request: Option<u64>,

    #[arg(long = "organization", value_name = "ID", help = "Id of the organization the input belongs to.")]
    pub organization: Option<u64>,
}

/// Arguments for the `redact` command.
#[derive(Parser, Debug)]
pub struct RedactCommand {
    /// Censor rule file (YAML).
    #[arg(long = "rules", short = 'r', value_name = "FILE", env = "CENSOR_RULES", help = "Path to the censor rule file (YAML).")]
    pub rules: PathBuf,

    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write redacted output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Treat the input as a binary payload and keep its length.
    #[arg(long, short = 'b', help = "Apply every rule in binary mode; the output has exactly the input's length.")]
    pub binary: bool,

    /// Placeholder written over matches in binary mode.
    #[arg(long, value_name = "CHAR", default_value_t = 'x', help = "ASCII character written over matches in binary mode.")]
    pub placeholder: char,

    /// Print how many spans each rule replaced.
    #[arg(long, short = 's', help = "Print a per-rule redaction summary to stderr.")]
    pub summary: bool,

    #[command(flatten)]
    pub target: TargetArgs,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Censor rule file (YAML).
    #[arg(value_name = "FILE", help = "Path to the censor rule file (YAML).")]
    pub rules: PathBuf,
}
