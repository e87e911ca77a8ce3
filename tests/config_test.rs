//! Settings loading from layered sources
//!
//! These tests load from temp directories only, so they exercise the
//! file-over-defaults layer without touching the user's global config.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use kintree::config::Settings;
use kintree::domain::Side;

#[test]
fn given_no_config_file_when_loading_then_compiled_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load(Some(dir.path())).expect("load settings");
    assert_eq!(settings.data_dir, None);
    assert_eq!(settings.default_side, Side::Fatherside);
}

#[test]
fn given_config_file_when_loading_then_values_override_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("kintree.toml"),
        r#"
data_dir = "/tmp/kintree-snapshots"
default_side = "motherside"
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");
    assert_eq!(
        settings.data_dir,
        Some(PathBuf::from("/tmp/kintree-snapshots"))
    );
    assert_eq!(settings.default_side, Side::Motherside);
}

#[test]
fn given_unknown_side_in_config_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("kintree.toml"), r#"default_side = "upside""#).unwrap();

    let result = Settings::load(Some(dir.path()));
    assert!(result.is_err());
}

#[test]
fn given_settings_when_rendering_toml_then_fields_present() {
    let settings = Settings::default();
    let rendered = settings.to_toml().unwrap();
    assert!(rendered.contains("default_side"));
}
