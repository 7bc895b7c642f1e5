//! Loading controller configuration from disk

use anyhow::Result;
use std::fs;
use tempfile::TempDir;
use treelink_core::{DuplicateKeyPolicy, FieldNames, TreeLinkConfig, TreeLinkController, TreeLinkError};
use treelink_test_utils::{key, titled_forest_json};

#[test]
fn loads_toml_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("treelink.toml");
    fs::write(
        &path,
        r#"
isBlockConductionWhenDisabled = false
duplicateKeys = "reject"

[fieldNames]
label = "title"
value = "key"
children = "children"
"#,
    )?;

    let config = TreeLinkConfig::from_file(&path)?;
    assert!(!config.is_block_conduction_when_disabled);
    assert_eq!(config.duplicate_keys, DuplicateKeyPolicy::Reject);
    assert_eq!(config.field_names, FieldNames::new("title", "key", "children"));

    let mut ctl = TreeLinkController::new(config);
    ctl.set_tree_json(&titled_forest_json())?;
    ctl.toggle(&key("0-1"), true)?;
    assert!(ctl.state().is_checked(&key("0-1")));
    Ok(())
}

#[test]
fn loads_json_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("treelink.json");
    fs::write(&path, r#"{ "fieldNames": { "label": "name" } }"#)?;

    let config = TreeLinkConfig::from_file(&path)?;
    assert!(config.is_block_conduction_when_disabled);
    assert_eq!(config.field_names.label, "name");
    assert_eq!(config.field_names.value, "value");
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = TreeLinkConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, TreeLinkError::Io(_)));
}

#[test]
fn config_round_trips_through_json() -> Result<()> {
    let config = TreeLinkConfig::new()
        .with_blocking(false)
        .with_field_names(FieldNames::new("title", "key", "items"));
    let text = serde_json::to_string(&config)?;
    assert!(text.contains("isBlockConductionWhenDisabled"));
    assert_eq!(TreeLinkConfig::from_json_str(&text)?, config);
    Ok(())
}
