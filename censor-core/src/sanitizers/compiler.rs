//! compiler.rs - Validates censor rule records and compiles them for matching.
//!
//! A [`ValidCensorRule`] can only be built from a record that passed
//! [`CensorRule::is_valid`] and whose pattern compiled, so everything downstream of
//! this module works with rules already known to be safe to apply.
//!
//! Literal rules are escaped and run through the same regex engine as regex rules,
//! which gives exact, leftmost, non-overlapping substring search.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{bytes, Regex, RegexBuilder};

use crate::config::{CensorMode, CensorRule, CensorScope};
use crate::errors::CensorError;
use crate::redaction_match::CensorMatch;

/// Upper bound on the compiled size of a single rule's regex.
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// The byte written over every matched byte in binary mode. Always ASCII.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(u8);

impl Placeholder {
    pub fn new(byte: u8) -> Result<Self, CensorError> {
        if byte.is_ascii() {
            Ok(Self(byte))
        } else {
            Err(CensorError::InvalidPlaceholder(byte))
        }
    }

    pub fn byte(self) -> u8 {
        self.0
    }
}

impl Default for Placeholder {
    fn default() -> Self {
        Self(b'x')
    }
}

/// A validated, compiled censor rule. Immutable and safe to share across threads.
#[derive(Debug, Clone)]
pub struct ValidCensorRule {
    label: String,
    text_regex: Regex,
    byte_regex: bytes::Regex,
    replacement: String,
    mode: CensorMode,
    scope: CensorScope,
}

/// Validates a record and compiles its pattern.
///
/// Patterns that match the empty string are rejected: applied as text they would
/// insert the replacement between every character.
pub fn compile_rule(rule: &CensorRule) -> Result<ValidCensorRule, CensorError> {
    rule.is_valid()?;
    let label = rule.label();

    let pattern = if rule.regexp {
        rule.text.clone()
    } else {
        regex::escape(&rule.text)
    };
    debug!("Compiling censor rule '{}' (regexp: {}).", label, rule.regexp);

    let compile_err = |source: regex::Error| CensorError::PatternCompile {
        rule: label.clone(),
        source,
    };
    let text_regex = RegexBuilder::new(&pattern)
        .dot_matches_new_line(true)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(compile_err)?;
    let byte_regex = build_byte_regex(&label, &pattern).map_err(compile_err)?;

    if text_regex.is_match("") || byte_regex.is_match(b"") {
        return Err(CensorError::InvalidPattern {
            rule: label,
            reason: "pattern matches the empty string".to_string(),
        });
    }

    Ok(ValidCensorRule {
        label,
        text_regex,
        byte_regex,
        replacement: rule.replacement.clone(),
        mode: rule.mode,
        scope: rule.scope,
    })
}

/// Builds the regex used on raw byte buffers.
///
/// Unicode mode is off so `.` matches any byte, including bytes that are not
/// valid UTF-8. Patterns that need Unicode classes (`\p{..}`) fall back to a
/// Unicode-aware byte regex.
fn build_byte_regex(label: &str, pattern: &str) -> Result<bytes::Regex, regex::Error> {
    let ascii = bytes::RegexBuilder::new(pattern)
        .unicode(false)
        .dot_matches_new_line(true)
        .size_limit(REGEX_SIZE_LIMIT)
        .build();
    match ascii {
        Ok(regex) => Ok(regex),
        Err(e) => {
            debug!(
                "Censor rule '{}' needs Unicode mode for byte matching ({}); compiling Unicode-aware.",
                label, e
            );
            bytes::RegexBuilder::new(pattern)
                .dot_matches_new_line(true)
                .size_limit(REGEX_SIZE_LIMIT)
                .build()
        }
    }
}

/// Compiles every record in order, stopping at the first invalid one.
pub fn compile_rules(rules: &[CensorRule]) -> Result<Vec<ValidCensorRule>, CensorError> {
    debug!("Starting compilation of {} censor rules.", rules.len());
    let compiled = rules
        .iter()
        .map(compile_rule)
        .collect::<Result<Vec<_>, _>>()?;
    debug!("Finished compiling censor rules. Total compiled: {}.", compiled.len());
    Ok(compiled)
}

impl ValidCensorRule {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn mode(&self) -> CensorMode {
        self.mode
    }

    pub fn scope(&self) -> &CensorScope {
        &self.scope
    }

    pub fn is_global(&self) -> bool {
        self.scope.is_global()
    }

    fn byte_spans<'c>(&'c self, content: &'c [u8]) -> impl Iterator<Item = bytes::Match<'c>> + 'c {
        self.byte_regex.find_iter(content).filter(|m| m.start() != m.end())
    }

    fn text_spans<'c>(&'c self, content: &'c str) -> impl Iterator<Item = regex::Match<'c>> + 'c {
        self.text_regex.find_iter(content).filter(|m| m.start() != m.end())
    }

    /// Every non-overlapping, non-empty match in `content`, left to right.
    pub fn matches(&self, content: &[u8]) -> Vec<CensorMatch> {
        self.byte_spans(content)
            .map(|m| CensorMatch::new(&self.label, m.start(), m.end()))
            .collect()
    }

    /// As [`matches`](Self::matches), with spans on `str` character boundaries.
    pub fn matches_str(&self, content: &str) -> Vec<CensorMatch> {
        self.text_spans(content)
            .map(|m| CensorMatch::new(&self.label, m.start(), m.end()))
            .collect()
    }

    /// Replaces every match with the replacement, verbatim. `$` groups are not expanded.
    pub fn apply_text(&self, content: &str) -> String {
        let mut out = String::with_capacity(content.len());
        let mut last_end = 0;
        for m in self.text_spans(content) {
            out.push_str(&content[last_end..m.start()]);
            out.push_str(&self.replacement);
            last_end = m.end();
        }
        out.push_str(&content[last_end..]);
        out
    }

    pub fn apply_text_bytes(&self, content: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(content.len());
        let mut last_end = 0;
        for m in self.byte_spans(content) {
            out.extend_from_slice(&content[last_end..m.start()]);
            out.extend_from_slice(self.replacement.as_bytes());
            last_end = m.end();
        }
        out.extend_from_slice(&content[last_end..]);
        out
    }

    /// Overwrites every matched byte with `placeholder`. Output length equals input length.
    pub fn apply_binary(&self, content: &str, placeholder: Placeholder) -> String {
        let fill = char::from(placeholder.byte());
        let mut out = String::with_capacity(content.len());
        let mut last_end = 0;
        for m in self.text_spans(content) {
            out.push_str(&content[last_end..m.start()]);
            out.extend(std::iter::repeat(fill).take(m.end() - m.start()));
            last_end = m.end();
        }
        out.push_str(&content[last_end..]);
        out
    }

    pub fn apply_binary_bytes(&self, content: &[u8], placeholder: Placeholder) -> Vec<u8> {
        let mut out = content.to_vec();
        for m in self.byte_spans(content) {
            out[m.start()..m.end()].fill(placeholder.byte());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goodbye() -> ValidCensorRule {
        CensorRule::literal("goodbye", "hello")
            .allowing_global()
            .validate()
            .unwrap()
    }

    #[test]
    fn test_text_substitution() {
        let out = goodbye().apply_text("I don't know why you say goodbye");
        assert_eq!(out, "I don't know why you say hello");
    }

    #[test]
    fn test_binary_substitution_keeps_size() {
        let body = "I don't know why you say goodbye";
        let out = goodbye().apply_binary(body, Placeholder::default());
        assert_eq!(out.len(), body.len());
        assert_eq!(out, "I don't know why you say xxxxxxx");
        assert_ne!(out, body);
    }

    #[test]
    fn test_literal_metacharacters_are_not_regex() {
        let rule = CensorRule::literal("a.b", "[x]").allowing_global().validate().unwrap();
        assert_eq!(rule.apply_text("acb a.b"), "acb [x]");
    }

    #[test]
    fn test_replacement_is_verbatim() {
        let rule = CensorRule::regex("(\\d+)", "$1 ${1}").allowing_global().validate().unwrap();
        assert_eq!(rule.apply_text("pin 1234"), "pin $1 ${1}");
    }

    #[test]
    fn test_replacement_is_not_rematched() {
        let rule = CensorRule::literal("a", "aa").allowing_global().validate().unwrap();
        assert_eq!(rule.apply_text("aba"), "aabaa");
    }

    #[test]
    fn test_matches_are_non_overlapping_left_to_right() {
        let rule = CensorRule::literal("aa", "b").allowing_global().validate().unwrap();
        let spans: Vec<(usize, usize)> = rule.matches(b"aaaaa").iter().map(|m| (m.start, m.end)).collect();
        assert_eq!(spans, vec![(0, 2), (2, 4)]);
    }

    #[test]
    fn test_malformed_regex_fails_at_construction() {
        let err = CensorRule::regex("[unclosed", "x").allowing_global().validate().unwrap_err();
        assert!(matches!(err, CensorError::PatternCompile { .. }));
    }

    #[test]
    fn test_binary_bytes_on_non_utf8_content() {
        let rule = CensorRule::literal("key", "KEY").allowing_global().validate().unwrap();
        let content = [0xffu8, b'k', b'e', b'y', 0x00, 0xfe];
        let out = rule.apply_binary_bytes(&content, Placeholder::new(b'*').unwrap());
        assert_eq!(out, vec![0xff, b'*', b'*', b'*', 0x00, 0xfe]);
    }

    #[test]
    fn test_binary_ignores_replacement_length() {
        let rule = CensorRule::literal("ab", "a much longer replacement").allowing_global().validate().unwrap();
        assert_eq!(rule.apply_binary("xabx", Placeholder::new(b'#').unwrap()), "x##x");
    }

    #[test]
    fn test_non_ascii_placeholder_rejected() {
        assert!(matches!(Placeholder::new(0xe9), Err(CensorError::InvalidPlaceholder(0xe9))));
    }

    #[test]
    fn test_text_bytes_on_non_utf8_buffer_is_verbatim() {
        let rule = CensorRule::regex("pin=(\\d+)", "$1 ${1}").allowing_global().validate().unwrap();
        let content = [0xffu8, b' ', b'p', b'i', b'n', b'=', b'4', b'2', b' ', 0xfe];
        let out = rule.apply_text_bytes(&content);
        let mut expected = vec![0xffu8, b' '];
        expected.extend_from_slice(b"$1 ${1}");
        expected.extend_from_slice(&[b' ', 0xfe]);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_dot_spans_arbitrary_bytes_in_binary_payload() {
        let rule = CensorRule::regex("--PRIVATE.*--PRIVATE", "x").allowing_global().validate().unwrap();
        let content = b"public --PRIVATE secret\xffmore --PRIVATE tail";
        let out = rule.apply_binary_bytes(content, Placeholder::default());
        assert_eq!(out.len(), content.len());
        assert_eq!(out, b"public xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx tail".to_vec());
    }

    #[test]
    fn test_unicode_class_pattern_still_compiles() {
        let rule = CensorRule::regex("\\p{Greek}+", "[greek]").allowing_global().validate().unwrap();
        assert_eq!(rule.apply_text("alpha \u{3b1}\u{3b2} end"), "alpha [greek] end");
    }

    #[test]
    fn test_pattern_matching_empty_string_is_rejected() {
        for pattern in ["z*", "a?", "(?m)^", "x|"] {
            let err = CensorRule::regex(pattern, "[X]").allowing_global().validate().unwrap_err();
            assert!(matches!(err, CensorError::InvalidPattern { .. }), "{pattern} was accepted");
        }
    }

    #[test]
    fn test_zero_length_matches_are_never_replaced() {
        let rule = CensorRule::regex("\\b", "[X]").allowing_global().validate().unwrap();
        assert_eq!(rule.apply_text("ab cd"), "ab cd");
        assert!(rule.matches(b"ab cd").is_empty());
        assert_eq!(rule.apply_binary_bytes(b"ab cd", Placeholder::default()), b"ab cd".to_vec());
    }
}
