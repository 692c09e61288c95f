//! Configuration management for `censor-core`.
//!
//! This module defines the censor rule record as it arrives from an external store,
//! and the `CensorConfig` container that loads an ordered list of those records from
//! YAML or JSON. Records are plain data here; they become usable for redaction only
//! after [`CensorRule::validate`] turns them into a [`ValidCensorRule`].
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::errors::CensorError;
use crate::sanitizers::compiler::{compile_rule, ValidCensorRule};

/// How a rule substitutes the spans it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CensorMode {
    /// Insert the replacement verbatim. Length may change.
    #[default]
    Text,
    /// Overwrite each match with placeholder bytes of the same length.
    Binary,
}

/// The identifiers a rule is bound to. A rule with none of them set is global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CensorScope {
    pub requester_id: Option<u64>,
    pub request_id: Option<u64>,
    pub organization_id: Option<u64>,
}

impl CensorScope {
    /// A scope with no bindings.
    pub fn global() -> Self {
        Self::default()
    }

    pub fn requester(id: u64) -> Self {
        Self { requester_id: Some(id), ..Self::default() }
    }

    pub fn request(id: u64) -> Self {
        Self { request_id: Some(id), ..Self::default() }
    }

    pub fn organization(id: u64) -> Self {
        Self { organization_id: Some(id), ..Self::default() }
    }

    pub fn is_global(&self) -> bool {
        self.requester_id.is_none() && self.request_id.is_none() && self.organization_id.is_none()
    }
}

/// A single censor rule record, as loaded from an external store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CensorRule {
    /// Record id in the external store, if any.
    pub id: Option<u64>,
    /// Human-readable label used in logs and summaries.
    pub name: Option<String>,
    /// The literal text to find, or the regex source when `regexp` is set.
    pub text: String,
    /// What matched spans are replaced with in text mode.
    pub replacement: String,
    /// If true, `text` is a regular expression.
    pub regexp: bool,
    pub mode: CensorMode,
    #[serde(flatten)]
    pub scope: CensorScope,
    /// Must be set for a rule without any binding to validate.
    pub allow_global: bool,
    /// Editor name or numeric user id; stored as text.
    #[serde(deserialize_with = "editor_from_name_or_id")]
    pub last_edit_editor: Option<String>,
    pub last_edit_comment: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EditorRef {
    Name(String),
    Id(u64),
}

fn editor_from_name_or_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<EditorRef>::deserialize(deserializer)?.map(|editor| match editor {
        EditorRef::Name(name) => name,
        EditorRef::Id(id) => id.to_string(),
    }))
}

impl CensorRule {
    /// A literal text rule with no bindings.
    pub fn literal(text: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            replacement: replacement.into(),
            ..Self::default()
        }
    }

    /// A regular expression rule with no bindings.
    pub fn regex(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            regexp: true,
            ..Self::literal(pattern, replacement)
        }
    }

    pub fn with_scope(mut self, scope: CensorScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_mode(mut self, mode: CensorMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn allowing_global(mut self) -> Self {
        self.allow_global = true;
        self
    }

    /// The label used for this rule in errors and logs.
    pub fn label(&self) -> String {
        match (&self.name, self.id) {
            (Some(name), _) if !name.is_empty() => name.clone(),
            (_, Some(id)) => format!("#{}", id),
            _ => "<unnamed>".to_string(),
        }
    }

    /// True iff no requester, request or organization is bound. `allow_global` is not consulted.
    pub fn is_global(&self) -> bool {
        self.scope.is_global()
    }

    /// Checks the record without compiling it.
    ///
    /// Scope is checked before the pattern, so a blank record reports the missing
    /// binding first.
    pub fn is_valid(&self) -> Result<(), CensorError> {
        if self.is_global() && !self.allow_global {
            return Err(CensorError::Scope { rule: self.label() });
        }
        if self.text.is_empty() {
            return Err(CensorError::InvalidPattern {
                rule: self.label(),
                reason: "pattern is empty".to_string(),
            });
        }
        Ok(())
    }

    /// Validates the record and compiles its pattern into a rule the applier accepts.
    pub fn validate(&self) -> Result<ValidCensorRule, CensorError> {
        self.is_valid()?;
        compile_rule(self)
    }
}

/// An ordered list of censor rule records.
///
/// Order is store order and is preserved; it is the order the applier uses.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct CensorConfig {
    #[serde(default)]
    pub rules: Vec<CensorRule>,
}

impl CensorConfig {
    /// Loads censor rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading censor rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read censor rule file {}", path.display()))?;
        let config = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to load censor rule file {}", path.display()))?;
        info!("Loaded {} censor rules from file {}.", config.rules.len(), path.display());
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: CensorConfig = serde_yml::from_str(yaml).context("Failed to parse censor rules YAML")?;
        validate_rules(&config.rules)?;
        Ok(config)
    }

    /// Parses records exported as JSON, either `{"rules": [...]}` or a bare array.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json).context("Failed to parse censor rules JSON")?;
        let config = if value.is_array() {
            CensorConfig { rules: serde_json::from_value(value).context("Invalid censor rule records")? }
        } else {
            serde_json::from_value(value).context("Invalid censor rule configuration")?
        };
        validate_rules(&config.rules)?;
        debug!("Parsed {} censor rules from JSON.", config.rules.len());
        Ok(config)
    }

    /// The rules bound to no requester, request or organization.
    pub fn global_rules(&self) -> impl Iterator<Item = &CensorRule> {
        self.rules.iter().filter(|rule| rule.is_global())
    }

    /// Validates and compiles every rule, keeping store order.
    pub fn compile(&self) -> Result<Vec<ValidCensorRule>, CensorError> {
        crate::sanitizers::compiler::compile_rules(&self.rules)
    }
}

/// Validates every record, collecting all failures into one message.
pub fn validate_rules(rules: &[CensorRule]) -> Result<()> {
    let mut ids = HashSet::new();
    let mut errors = Vec::new();

    for rule in rules {
        if let Some(id) = rule.id {
            if !ids.insert(id) {
                errors.push(format!("Duplicate censor rule id found: {}.", id));
            }
        }
        if let Err(e) = rule.validate() {
            errors.push(e.to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(anyhow!(CensorError::Config(format!(
            "{} rule(s) failed validation:\n{}",
            errors.len(),
            errors.join("\n")
        ))))
    }
}
