// censor-core/src/engine.rs
//! Defines the `Redactable` trait: the content buffers a censor rule can rewrite.
//!
//! The applier is generic over this trait so the same ordered rule pass works on
//! message bodies held as `String` and on attachment payloads held as `Vec<u8>`.
//!
//! License: MIT OR APACHE 2.0

use crate::redaction_match::CensorMatch;
use crate::sanitizers::compiler::{Placeholder, ValidCensorRule};

/// A content buffer that censor rules can be applied to.
///
/// Implementations consume the buffer and return the rewritten one, so the
/// output of one rule is the input of the next.
pub trait Redactable: Sized {
    /// All spans `rule` matches in this buffer.
    fn find_matches(&self, rule: &ValidCensorRule) -> Vec<CensorMatch>;

    /// Replaces every match with the rule's replacement. Length may change.
    fn apply_text(self, rule: &ValidCensorRule) -> Self;

    /// Overwrites every match with `placeholder`. Length never changes.
    fn apply_binary(self, rule: &ValidCensorRule, placeholder: Placeholder) -> Self;

    /// The buffer viewed as bytes, for logging matched spans.
    fn as_bytes(&self) -> &[u8];
}

impl Redactable for String {
    fn find_matches(&self, rule: &ValidCensorRule) -> Vec<CensorMatch> {
        rule.matches_str(self)
    }

    fn apply_text(self, rule: &ValidCensorRule) -> Self {
        rule.apply_text(&self)
    }

    fn apply_binary(self, rule: &ValidCensorRule, placeholder: Placeholder) -> Self {
        rule.apply_binary(&self, placeholder)
    }

    fn as_bytes(&self) -> &[u8] {
        str::as_bytes(self)
    }
}

impl Redactable for Vec<u8> {
    fn find_matches(&self, rule: &ValidCensorRule) -> Vec<CensorMatch> {
        rule.matches(self)
    }

    fn apply_text(self, rule: &ValidCensorRule) -> Self {
        rule.apply_text_bytes(&self)
    }

    fn apply_binary(self, rule: &ValidCensorRule, placeholder: Placeholder) -> Self {
        rule.apply_binary_bytes(&self, placeholder)
    }

    fn as_bytes(&self) -> &[u8] {
        self
    }
}
