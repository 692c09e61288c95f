//! Implementations of the `censor` subcommands.

pub mod check;
pub mod redact;
