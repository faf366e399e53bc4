//! Plugin manifest model and validation.
//!
//! The `manifest.json` at a plugin root describes the plugin to the
//! Stream Deck software. Known fields are modelled explicitly; any
//! unrecognised keys are preserved in a side map so a manifest
//! round-trips through serialization without loss.
//!
//! Validation aggregates every problem into field-level issues rather
//! than failing on the first, so a user sees the full list in one run.

use crate::error::{FieldIssue, PackError, Result};
use crate::plugin_uuid::{InvalidPluginUuid, PluginUuid};
use crate::plugin_version::{InvalidPluginVersion, PluginVersion};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;

/// Well-known manifest file name at the plugin root.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Image asset extensions accepted for icon fields.
const IMAGE_EXTENSIONS: [&str; 3] = ["svg", "png", "gif"];

/// The identity fields the packaging flow consumes from a validated
/// manifest.
#[derive(Debug, Clone)]
pub struct PluginIdentity {
    /// Validated plugin UUID.
    pub uuid: PluginUuid,
    /// Validated plugin version.
    pub version: PluginVersion,
}

/// A plugin `manifest.json`.
///
/// Field names follow the manifest format's PascalCase keys. Keys not
/// modelled here land in [`Manifest::extra`] and are written back out
/// on serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Three-segment plugin identifier.
    #[serde(rename = "UUID")]
    pub uuid: String,
    /// Display name of the plugin.
    #[serde(rename = "Name")]
    pub name: String,
    /// Dot-delimited numeric version.
    #[serde(rename = "Version")]
    pub version: String,
    /// Plugin author.
    #[serde(rename = "Author")]
    pub author: String,
    /// Short plugin description.
    #[serde(rename = "Description")]
    pub description: String,
    /// Optional store category.
    #[serde(rename = "Category", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Optional category icon, given without a file-type suffix.
    #[serde(
        rename = "CategoryIcon",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub category_icon: Option<Utf8PathBuf>,
    /// Actions the plugin provides.
    #[serde(rename = "Actions")]
    pub actions: Vec<Action>,
    /// Plugin icon, given without a file-type suffix.
    #[serde(rename = "Icon")]
    pub icon: Utf8PathBuf,
    /// Entry point executable or script.
    #[serde(rename = "CodePath")]
    pub code_path: Utf8PathBuf,
    /// macOS-specific entry point.
    #[serde(
        rename = "CodePathMac",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub code_path_mac: Option<Utf8PathBuf>,
    /// Windows-specific entry point.
    #[serde(
        rename = "CodePathWin",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub code_path_win: Option<Utf8PathBuf>,
    /// Unrecognised manifest keys, preserved for round-trip
    /// serialization.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A single action declared in the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Four-segment action identifier, prefixed by the plugin UUID.
    #[serde(rename = "UUID")]
    pub uuid: String,
    /// Display name of the action.
    #[serde(rename = "Name")]
    pub name: String,
    /// Action icon, given without a file-type suffix.
    #[serde(rename = "Icon")]
    pub icon: Utf8PathBuf,
    /// Property inspector page; optional when the plugin declares one
    /// globally.
    #[serde(
        rename = "PropertyInspectorPath",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub property_inspector_path: Option<Utf8PathBuf>,
    /// Unrecognised action keys, preserved for round-trip
    /// serialization.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Manifest {
    /// Load a manifest from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::ManifestNotFound`] when the file is absent
    /// and [`PackError::ManifestParse`] when it is not valid manifest
    /// JSON.
    pub fn from_json_file(path: &Utf8Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(PackError::ManifestNotFound {
                    path: path.to_owned(),
                });
            }
            Err(err) => return Err(PackError::Io(err)),
        };
        serde_json::from_str(&contents).map_err(|err| PackError::ManifestParse {
            reason: err.to_string(),
        })
    }

    /// Validate the manifest against `plugin_dir` and return the
    /// identity fields the packaging flow consumes.
    ///
    /// Checks are aggregated: the UUID and version formats, the action
    /// UUID prefixes, and the existence of every referenced asset and
    /// code path are all tested, and every problem found is reported.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::ManifestInvalid`] carrying one
    /// [`FieldIssue`] per problem.
    pub fn validate(&self, plugin_dir: &Utf8Path) -> Result<PluginIdentity> {
        let mut issues = Vec::new();

        let uuid = PluginUuid::try_from(self.uuid.as_str())
            .map_err(|InvalidPluginUuid { .. }| {
                issues.push(FieldIssue::new(
                    "UUID",
                    "must have exactly 3 dot-delimited segments of lowercase \
                     alphanumeric or hyphen characters",
                ));
            })
            .ok();
        let version = PluginVersion::try_from(self.version.as_str())
            .map_err(|InvalidPluginVersion { .. }| {
                issues.push(FieldIssue::new(
                    "Version",
                    "must be `{major}.{minor}.{patch}` or `{major}.{minor}.{patch}.{build}`",
                ));
            })
            .ok();

        if let Some(plugin_uuid) = &uuid {
            self.check_action_uuids(plugin_uuid, &mut issues);
        }
        self.check_assets(plugin_dir, &mut issues);

        match (uuid, version) {
            (Some(uuid), Some(version)) if issues.is_empty() => {
                Ok(PluginIdentity { uuid, version })
            }
            _ => Err(PackError::ManifestInvalid { issues }),
        }
    }

    /// Require each action UUID to extend the plugin UUID by one
    /// segment.
    fn check_action_uuids(&self, uuid: &PluginUuid, issues: &mut Vec<FieldIssue>) {
        for action in &self.actions {
            if !uuid.owns_action(&action.uuid) {
                issues.push(FieldIssue::new(
                    format!("Actions['{}'].UUID", action.name),
                    format!(
                        "must start with the plugin UUID `{uuid}` and add exactly \
                         one dot-delimited segment (got `{}`)",
                        action.uuid
                    ),
                ));
            }
        }
    }

    /// Check that every referenced image asset and code path exists.
    fn check_assets(&self, plugin_dir: &Utf8Path, issues: &mut Vec<FieldIssue>) {
        check_image_asset(plugin_dir, "Icon", &self.icon, issues);
        if let Some(category_icon) = &self.category_icon {
            check_image_asset(plugin_dir, "CategoryIcon", category_icon, issues);
        }
        check_path_exists(plugin_dir, "CodePath", &self.code_path, issues);
        if let Some(code_path_mac) = &self.code_path_mac {
            check_path_exists(plugin_dir, "CodePathMac", code_path_mac, issues);
        }
        if let Some(code_path_win) = &self.code_path_win {
            check_path_exists(plugin_dir, "CodePathWin", code_path_win, issues);
        }

        for action in &self.actions {
            check_image_asset(
                plugin_dir,
                &format!("Actions['{}'].Icon", action.name),
                &action.icon,
                issues,
            );
            if let Some(inspector) = &action.property_inspector_path {
                check_path_exists(
                    plugin_dir,
                    &format!("Actions['{}'].PropertyInspectorPath", action.name),
                    inspector,
                    issues,
                );
            }
        }
    }
}

/// Check an image asset reference: given without a suffix, and present
/// as one of the accepted image file types under the plugin directory.
fn check_image_asset(
    plugin_dir: &Utf8Path,
    field: &str,
    value: &Utf8Path,
    issues: &mut Vec<FieldIssue>,
) {
    if value.extension().is_some() {
        issues.push(FieldIssue::new(
            field,
            format!("image asset `{value}` must be given without a file-type suffix"),
        ));
        return;
    }

    let base = plugin_dir.join(value);
    let found = IMAGE_EXTENSIONS
        .iter()
        .any(|ext| base.with_extension(ext).exists());
    if !found {
        issues.push(FieldIssue::new(
            field,
            format!("no .svg, .png, or .gif image found for `{value}`"),
        ));
    }
}

/// Check that a referenced path exists under the plugin directory.
fn check_path_exists(
    plugin_dir: &Utf8Path,
    field: &str,
    value: &Utf8Path,
    issues: &mut Vec<FieldIssue>,
) {
    if !plugin_dir.join(value).exists() {
        issues.push(FieldIssue::new(field, format!("`{value}` not found")));
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
