// File: censor-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for one-shot redaction straight from a loaded rule set.
//! Each call validates and compiles the rules, then runs them once.

use anyhow::{Context, Result};

use crate::config::CensorConfig;
use crate::engines::applier::{ApplierOptions, CensorApplier};
use crate::scope::TargetIdentity;

/// Redacts a text body with every rule in `config` that applies to `target`.
///
/// # Arguments
///
/// * `config` - The rule records, in the order they should be applied.
/// * `options` - Applier settings (binary placeholder).
/// * `content` - The text to be redacted.
/// * `target` - The requester, request and organization the text belongs to.
pub fn headless_redact_string(
    config: &CensorConfig,
    options: ApplierOptions,
    content: &str,
    target: &TargetIdentity,
) -> Result<String> {
    let applier = CensorApplier::new(options)?;
    let rules = config.compile().context("Failed to compile censor rules")?;
    Ok(applier.redact(content.to_string(), &rules, target))
}

/// Redacts an attachment payload. Every applicable rule runs in binary mode so
/// the payload keeps its exact length.
pub fn headless_redact_attachment(
    config: &CensorConfig,
    options: ApplierOptions,
    content: &[u8],
    target: &TargetIdentity,
) -> Result<Vec<u8>> {
    let applier = CensorApplier::new(options)?;
    let rules = config.compile().context("Failed to compile censor rules")?;
    Ok(applier.redact_binary(content.to_vec(), &rules, target))
}
