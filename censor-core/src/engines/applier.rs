// censor-core/src/engines/applier.rs
//! The rule set applier: filters censor rules to those in scope for a target and
//! runs them over a content buffer in the caller's order.
//! License: MIT OR APACHE 2.0

use log::{debug, log_enabled, Level};

use crate::config::{CensorMode, CensorRule};
use crate::engine::Redactable;
use crate::errors::CensorError;
use crate::redaction_match::{log_censor_matches_debug, CensorSummaryItem};
use crate::sanitizers::compiler::{Placeholder, ValidCensorRule};
use crate::scope::{applies_to, TargetIdentity};

/// Settings for a [`CensorApplier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplierOptions {
    /// Byte written over matched spans in binary mode. Must be ASCII.
    pub placeholder: u8,
}

impl Default for ApplierOptions {
    fn default() -> Self {
        Self { placeholder: b'x' }
    }
}

/// Applies ordered censor rules to content. Holds no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct CensorApplier {
    placeholder: Placeholder,
}

impl CensorApplier {
    pub fn new(options: ApplierOptions) -> Result<Self, CensorError> {
        Ok(Self {
            placeholder: Placeholder::new(options.placeholder)?,
        })
    }

    pub fn placeholder(&self) -> Placeholder {
        self.placeholder
    }

    /// The rules that may touch content of `target`, in the order given.
    pub fn applicable_rules<'a>(
        &self,
        rules: &'a [ValidCensorRule],
        target: &'a TargetIdentity,
    ) -> impl Iterator<Item = &'a ValidCensorRule> + 'a {
        rules.iter().filter(move |rule| applies_to(rule.scope(), target))
    }

    /// Applies every applicable rule in order, each in its own mode.
    pub fn redact<C: Redactable>(&self, content: C, rules: &[ValidCensorRule], target: &TargetIdentity) -> C {
        self.run(content, rules, target, None, None)
    }

    /// Applies every applicable rule in binary mode, whatever the rule's own mode.
    ///
    /// For attachment payloads and other content whose byte offsets must not move.
    pub fn redact_binary<C: Redactable>(&self, content: C, rules: &[ValidCensorRule], target: &TargetIdentity) -> C {
        self.run(content, rules, target, Some(CensorMode::Binary), None)
    }

    /// As [`redact`](Self::redact), also reporting how many spans each applied rule replaced.
    pub fn redact_with_summary<C: Redactable>(
        &self,
        content: C,
        rules: &[ValidCensorRule],
        target: &TargetIdentity,
    ) -> (C, Vec<CensorSummaryItem>) {
        let mut summary = Vec::new();
        let out = self.run(content, rules, target, None, Some(&mut summary));
        (out, summary)
    }

    /// As [`redact_binary`](Self::redact_binary), with a per-rule summary.
    pub fn redact_binary_with_summary<C: Redactable>(
        &self,
        content: C,
        rules: &[ValidCensorRule],
        target: &TargetIdentity,
    ) -> (C, Vec<CensorSummaryItem>) {
        let mut summary = Vec::new();
        let out = self.run(content, rules, target, Some(CensorMode::Binary), Some(&mut summary));
        (out, summary)
    }

    /// Validates raw records, then redacts with them.
    ///
    /// Every record is validated before any content is touched, in scope for
    /// `target` or not. The first failure aborts the call.
    pub fn redact_records<C: Redactable>(
        &self,
        content: C,
        records: &[CensorRule],
        target: &TargetIdentity,
    ) -> Result<C, CensorError> {
        let rules = records
            .iter()
            .enumerate()
            .map(|(position, record)| {
                record.validate().map_err(|e| CensorError::InvalidRule {
                    rule: record.label(),
                    position,
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.redact(content, &rules, target))
    }

    fn run<C: Redactable>(
        &self,
        mut content: C,
        rules: &[ValidCensorRule],
        target: &TargetIdentity,
        forced_mode: Option<CensorMode>,
        mut summary: Option<&mut Vec<CensorSummaryItem>>,
    ) -> C {
        let detail = summary.is_some() || log_enabled!(Level::Debug);
        let mut applied = 0usize;

        for rule in self.applicable_rules(rules, target) {
            applied += 1;
            let mode = forced_mode.unwrap_or(rule.mode());

            if detail {
                let matches = content.find_matches(rule);
                log_censor_matches_debug(module_path!(), content.as_bytes(), &matches);
                if let Some(items) = summary.as_mut() {
                    items.push(CensorSummaryItem {
                        rule_name: rule.label().to_string(),
                        occurrences: matches.len(),
                    });
                }
                if matches.is_empty() {
                    continue;
                }
            }

            content = match mode {
                CensorMode::Text => content.apply_text(rule),
                CensorMode::Binary => content.apply_binary(rule, self.placeholder),
            };
        }

        debug!("Applied {} of {} censor rules.", applied, rules.len());
        content
    }
}
