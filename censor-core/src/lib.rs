// censor-core/src/lib.rs
//! # Censor Core Library
//!
//! `censor-core` redacts sensitive content from documents and message bodies by
//! applying censor rules. Each rule is a literal text match or a regular expression
//! with a replacement, and is either global or bound to a requester, a request or
//! an organization.
//!
//! Two substitution modes exist:
//!
//! * **Text**: the replacement is inserted verbatim and the content length may change.
//! * **Binary**: every matched byte is overwritten with a placeholder byte, so the
//!   content keeps its exact length. Use it for attachment payloads and other
//!   fixed-layout data.
//!
//! The library is stateless. It does not load rules from a database or decide who
//! may edit them; it takes rule records as plain data.
//!
//! ## Modules
//!
//! * `config`: The `CensorRule` record, its scope and mode, and `CensorConfig` loading.
//! * `scope`: `TargetIdentity` and the `applies_to` predicate.
//! * `sanitizers`: Validation and compilation of records into `ValidCensorRule`s.
//! * `engine`: The `Redactable` trait for content buffers.
//! * `engines`: The `CensorApplier` that runs an ordered rule set.
//! * `redaction_match`: Match spans, per-rule summaries and PII-safe debug logging.
//! * `headless`: One-shot convenience wrappers.
//! * `errors`: The `CensorError` enum.
//!
//! ## Usage Example
//!
//! ```rust
//! use censor_core::{CensorApplier, CensorRule, CensorScope, TargetIdentity};
//!
//! fn main() -> Result<(), censor_core::CensorError> {
//!     let rules = vec![
//!         CensorRule::literal("goodbye", "hello").allowing_global().validate()?,
//!         CensorRule::literal("Alice", "[name]")
//!             .with_scope(CensorScope::requester(1))
//!             .validate()?,
//!     ];
//!
//!     let applier = CensorApplier::default();
//!     let target = TargetIdentity::default().with_requester(1);
//!     let out = applier.redact("Alice says goodbye".to_string(), &rules, &target);
//!     assert_eq!(out, "[name] says hello");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Engine operations return `CensorError`. Rule file loading returns `anyhow::Error`
//! with context attached.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod redaction_match;
pub mod sanitizers;
pub mod scope;

/// Re-exports the rule record types and configuration loading.
pub use config::{validate_rules, CensorConfig, CensorMode, CensorRule, CensorScope};

pub use errors::CensorError;

pub use engine::Redactable;

pub use engines::applier::{ApplierOptions, CensorApplier};

pub use redaction_match::{redact_sensitive, CensorMatch, CensorSummaryItem};

pub use scope::{applies_to, TargetIdentity};

pub use headless::{headless_redact_attachment, headless_redact_string};

pub use sanitizers::compiler::{compile_rule, compile_rules, Placeholder, ValidCensorRule};
