// censor-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use censor_core::config::{CensorConfig, CensorMode, CensorScope};
use censor_core::{headless_redact_string, ApplierOptions, CensorApplier, CensorError, TargetIdentity};

#[test_log::test]
fn test_load_from_file() -> Result<()> {
    let yaml_content = r#"
rules:
  - id: 1
    name: "global greeting"
    text: "goodbye"
    replacement: "hello"
    allow_global: true
    last_edit_editor: "admin"
    last_edit_comment: "comment"
    updated_at: "2024-03-01T12:00:00Z"
  - id: 2
    text: "--PRIVATE.*--PRIVATE"
    regexp: true
    replacement: "--REMOVED"
    request_id: 7
  - id: 3
    text: "Acme"
    replacement: "AAAA"
    organization_id: 9
    mode: binary
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let config = CensorConfig::load_from_file(file.path())?;

    assert_eq!(config.rules.len(), 3);
    assert_eq!(config.rules[0].label(), "global greeting");
    assert_eq!(config.rules[0].last_edit_editor.as_deref(), Some("admin"));
    assert!(config.rules[0].updated_at.is_some());
    assert!(config.rules[1].regexp);
    assert_eq!(config.rules[1].scope, CensorScope::request(7));
    assert_eq!(config.rules[2].mode, CensorMode::Binary);
    assert_eq!(config.global_rules().count(), 1);
    Ok(())
}

#[test_log::test]
fn test_load_from_file_rejects_unscoped_rule() -> Result<()> {
    let yaml_content = r#"
rules:
  - text: "hide me"
    replacement: "nothing to see here"
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let err = CensorConfig::load_from_file(file.path()).unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("must apply to an info request, a user or a body"), "{}", msg);
    Ok(())
}

#[test_log::test]
fn test_load_from_missing_file() {
    let result = CensorConfig::load_from_file("/definitely/not/here/censor_rules.yaml");
    assert!(result.is_err());
}

#[test_log::test]
fn test_from_json_bare_array_keeps_order() -> Result<()> {
    let json = r#"[
        {"id": 10, "text": "cat", "replacement": "dog", "allow_global": true},
        {"id": 11, "text": "dog", "replacement": "bird", "requester_id": 5}
    ]"#;
    let config = CensorConfig::from_json_str(json)?;
    assert_eq!(config.rules.iter().map(|r| r.id).collect::<Vec<_>>(), vec![Some(10), Some(11)]);

    let rules = config.compile()?;
    let applier = CensorApplier::default();
    assert_eq!(
        applier.redact("cat".to_string(), &rules, &TargetIdentity::default().with_requester(5)),
        "bird"
    );
    assert_eq!(
        applier.redact("cat".to_string(), &rules, &TargetIdentity::default().with_requester(6)),
        "dog"
    );
    Ok(())
}

#[test_log::test]
fn test_from_json_object_and_duplicate_ids() {
    let json = r#"{"rules": [
        {"id": 1, "text": "a", "replacement": "b", "allow_global": true},
        {"id": 1, "text": "c", "replacement": "d", "allow_global": true}
    ]}"#;
    let err = CensorConfig::from_json_str(json).unwrap_err();
    assert!(err.to_string().contains("Duplicate censor rule id found: 1."));
}

#[test_log::test]
fn test_headless_with_custom_placeholder() -> Result<()> {
    let config = CensorConfig::from_yaml_str(
        r#"
rules:
  - text: "4111 1111 1111 1111"
    replacement: "[card]"
    requester_id: 3
    mode: binary
"#,
    )?;
    let out = headless_redact_string(
        &config,
        ApplierOptions { placeholder: b'-' },
        "card 4111 1111 1111 1111 ok",
        &TargetIdentity::default().with_requester(3),
    )?;
    assert_eq!(out, "card ------------------- ok");
    Ok(())
}

#[test_log::test]
fn test_records_with_bad_regex_fail_the_redaction() {
    let mut config = CensorConfig::default();
    config.rules.push(censor_core::CensorRule::regex("(open", "x").allowing_global());
    let err = CensorApplier::default()
        .redact_records("(open".to_string(), &config.rules, &TargetIdentity::default())
        .unwrap_err();
    match err {
        CensorError::InvalidRule { source, .. } => {
            assert!(matches!(*source, CensorError::PatternCompile { .. }))
        }
        other => panic!("unexpected error: {other}"),
    }
}
