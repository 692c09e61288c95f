//! errors.rs - Custom error types for the censor-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `censor-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CensorError {
    /// The rule's pattern is empty or otherwise unusable.
    #[error("Censor rule '{rule}' has an invalid pattern: {reason}")]
    InvalidPattern { rule: String, reason: String },

    /// A regular expression pattern failed to compile.
    #[error("Failed to compile censor rule '{rule}': {source}")]
    PatternCompile {
        rule: String,
        #[source]
        source: regex::Error,
    },

    /// The rule has no binding and was not explicitly allowed to be global.
    #[error("Censor rule '{rule}': Censor must apply to an info request, a user or a body; request_id, requester_id and organization_id are all unset")]
    Scope { rule: String },

    /// The applier was handed a rule record that does not validate.
    #[error("Refusing to redact with invalid censor rule '{rule}' at position {position}: {source}")]
    InvalidRule {
        rule: String,
        position: usize,
        #[source]
        source: Box<CensorError>,
    },

    /// Binary-mode placeholders must be a single ASCII byte.
    #[error("Binary placeholder byte 0x{0:02x} is not ASCII")]
    InvalidPlaceholder(u8),

    #[error("Censor rule configuration is invalid: {0}")]
    Config(String),

    #[error("An unexpected I/O error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),
}
