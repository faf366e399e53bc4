//! Tests for manifest loading and validation.

use super::*;
use rstest::{fixture, rstest};
use tempfile::TempDir;

/// Manifest JSON for a well-formed counter plugin, including keys the
/// model does not know about.
const COUNTER_MANIFEST: &str = r#"{
    "UUID": "com.example.counter",
    "Name": "Counter",
    "Version": "1.0.0",
    "Author": "Example Author",
    "Description": "Counts things.",
    "Icon": "assets/icon",
    "CodePath": "main.py",
    "Actions": [
        {
            "UUID": "com.example.counter.increment",
            "Name": "Increment",
            "Icon": "assets/increment",
            "SupportedInMultiActions": true
        }
    ],
    "SDKVersion": 2,
    "Software": { "MinimumVersion": "6.4" }
}"#;

#[fixture]
fn plugin_dir() -> TempDir {
    TempDir::new().expect("temp dir")
}

fn dir_path(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("UTF-8 temp path")
}

/// Write the asset and code files the counter manifest references.
fn write_counter_assets(dir: &Utf8Path) {
    fs::create_dir_all(dir.join("assets")).expect("create assets dir");
    fs::write(dir.join("assets").join("icon.png"), "png").expect("write icon");
    fs::write(dir.join("assets").join("increment.svg"), "svg").expect("write action icon");
    fs::write(dir.join("main.py"), "print('hi')").expect("write code path");
}

fn counter_manifest() -> Manifest {
    serde_json::from_str(COUNTER_MANIFEST).expect("fixture manifest parses")
}

#[rstest]
fn loads_manifest_from_json_file(plugin_dir: TempDir) {
    let dir = dir_path(&plugin_dir);
    fs::write(dir.join(MANIFEST_FILE_NAME), COUNTER_MANIFEST).expect("write manifest");

    let manifest =
        Manifest::from_json_file(&dir.join(MANIFEST_FILE_NAME)).expect("manifest should load");
    assert_eq!(manifest.uuid, "com.example.counter");
    assert_eq!(manifest.name, "Counter");
    assert_eq!(manifest.version, "1.0.0");
}

#[rstest]
fn missing_manifest_file_is_not_found(plugin_dir: TempDir) {
    let dir = dir_path(&plugin_dir);

    let err = Manifest::from_json_file(&dir.join(MANIFEST_FILE_NAME))
        .expect_err("load should fail");
    assert!(matches!(err, PackError::ManifestNotFound { .. }));
}

#[rstest]
fn malformed_json_is_a_parse_error(plugin_dir: TempDir) {
    let dir = dir_path(&plugin_dir);
    fs::write(dir.join(MANIFEST_FILE_NAME), "{ not json").expect("write manifest");

    let err = Manifest::from_json_file(&dir.join(MANIFEST_FILE_NAME))
        .expect_err("load should fail");
    assert!(matches!(err, PackError::ManifestParse { .. }));
}

#[test]
fn unknown_keys_are_preserved_on_round_trip() {
    let manifest = counter_manifest();
    assert!(manifest.extra.contains_key("SDKVersion"));
    assert!(manifest.extra.contains_key("Software"));

    let json = serde_json::to_value(&manifest).expect("manifest serializes");
    assert_eq!(json.get("SDKVersion"), Some(&serde_json::json!(2)));
    assert_eq!(
        json.get("Software"),
        Some(&serde_json::json!({ "MinimumVersion": "6.4" }))
    );

    let action = manifest.actions.first().expect("one action");
    assert!(action.extra.contains_key("SupportedInMultiActions"));
}

#[rstest]
fn valid_manifest_yields_plugin_identity(plugin_dir: TempDir) {
    let dir = dir_path(&plugin_dir);
    write_counter_assets(&dir);

    let identity = counter_manifest()
        .validate(&dir)
        .expect("validation should succeed");
    assert_eq!(identity.uuid.as_str(), "com.example.counter");
    assert_eq!(identity.version.as_str(), "1.0.0");
}

#[rstest]
fn invalid_uuid_is_reported_by_field(plugin_dir: TempDir) {
    let dir = dir_path(&plugin_dir);
    write_counter_assets(&dir);
    let mut manifest = counter_manifest();
    manifest.uuid = "Com.Example".to_owned();

    let err = manifest.validate(&dir).expect_err("validation should fail");
    let PackError::ManifestInvalid { issues } = err else {
        panic!("expected ManifestInvalid, got {err:?}");
    };
    assert!(issues.iter().any(|issue| issue.field == "UUID"));
}

#[rstest]
fn invalid_version_is_reported_by_field(plugin_dir: TempDir) {
    let dir = dir_path(&plugin_dir);
    write_counter_assets(&dir);
    let mut manifest = counter_manifest();
    manifest.version = "1.0".to_owned();

    let err = manifest.validate(&dir).expect_err("validation should fail");
    let PackError::ManifestInvalid { issues } = err else {
        panic!("expected ManifestInvalid, got {err:?}");
    };
    assert!(issues.iter().any(|issue| issue.field == "Version"));
}

#[rstest]
fn foreign_action_uuid_is_reported(plugin_dir: TempDir) {
    let dir = dir_path(&plugin_dir);
    write_counter_assets(&dir);
    let mut manifest = counter_manifest();
    if let Some(action) = manifest.actions.first_mut() {
        action.uuid = "com.other.plugin.increment".to_owned();
    }

    let err = manifest.validate(&dir).expect_err("validation should fail");
    let PackError::ManifestInvalid { issues } = err else {
        panic!("expected ManifestInvalid, got {err:?}");
    };
    assert!(
        issues
            .iter()
            .any(|issue| issue.field == "Actions['Increment'].UUID")
    );
}

#[rstest]
fn missing_image_asset_is_reported(plugin_dir: TempDir) {
    let dir = dir_path(&plugin_dir);
    write_counter_assets(&dir);
    fs::remove_file(dir.join("assets").join("icon.png")).expect("remove icon");

    let err = counter_manifest()
        .validate(&dir)
        .expect_err("validation should fail");
    let PackError::ManifestInvalid { issues } = err else {
        panic!("expected ManifestInvalid, got {err:?}");
    };
    assert!(issues.iter().any(|issue| issue.field == "Icon"));
}

#[rstest]
fn icon_with_file_suffix_is_reported(plugin_dir: TempDir) {
    let dir = dir_path(&plugin_dir);
    write_counter_assets(&dir);
    let mut manifest = counter_manifest();
    manifest.icon = Utf8PathBuf::from("assets/icon.png");

    let err = manifest.validate(&dir).expect_err("validation should fail");
    let PackError::ManifestInvalid { issues } = err else {
        panic!("expected ManifestInvalid, got {err:?}");
    };
    assert!(
        issues
            .iter()
            .any(|issue| issue.field == "Icon" && issue.message.contains("suffix"))
    );
}

#[rstest]
fn missing_code_path_is_reported(plugin_dir: TempDir) {
    let dir = dir_path(&plugin_dir);
    write_counter_assets(&dir);
    fs::remove_file(dir.join("main.py")).expect("remove code path");

    let err = counter_manifest()
        .validate(&dir)
        .expect_err("validation should fail");
    let PackError::ManifestInvalid { issues } = err else {
        panic!("expected ManifestInvalid, got {err:?}");
    };
    assert!(issues.iter().any(|issue| issue.field == "CodePath"));
}

#[rstest]
fn all_problems_are_aggregated(plugin_dir: TempDir) {
    let dir = dir_path(&plugin_dir);
    let mut manifest = counter_manifest();
    manifest.uuid = "bad".to_owned();
    manifest.version = "also.bad".to_owned();

    let err = manifest.validate(&dir).expect_err("validation should fail");
    let PackError::ManifestInvalid { issues } = err else {
        panic!("expected ManifestInvalid, got {err:?}");
    };

    let fields: Vec<&str> = issues.iter().map(|issue| issue.field.as_str()).collect();
    assert!(fields.contains(&"UUID"));
    assert!(fields.contains(&"Version"));
    assert!(fields.contains(&"Icon"));
    assert!(fields.contains(&"CodePath"));
}
