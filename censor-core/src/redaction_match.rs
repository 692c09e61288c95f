// censor-core/src/redaction_match.rs
//! Data structures for reporting censor matches, and logging helpers that keep
//! matched content out of debug logs.

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Whether matched content may appear verbatim in debug logs. Read once.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("CENSOR_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// A single matched span, as byte offsets into the content the rule was run against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CensorMatch {
    pub rule_name: String,
    pub start: usize,
    pub end: usize,
}

impl CensorMatch {
    pub fn new(rule_name: &str, start: usize, end: usize) -> Self {
        Self {
            rule_name: rule_name.to_string(),
            start,
            end,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// How many spans one rule replaced during a redaction, in application order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CensorSummaryItem {
    pub rule_name: String,
    pub occurrences: usize,
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

/// Logs the spans a rule matched without exposing the matched bytes by default.
pub fn log_censor_matches_debug(module_path: &str, content: &[u8], matches: &[CensorMatch]) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    for m in matches {
        let original = String::from_utf8_lossy(&content[m.start..m.end]);
        debug!(
            "{} Censor match: Rule='{}', Span={}..{}, Original='{}'",
            module_path,
            m.rule_name,
            m.start,
            m.end,
            get_loggable_content(&original)
        );
    }
}
