//! Validated plugin version newtype.
//!
//! Versions are dot-delimited numeric identifiers in the form
//! `major.minor.patch` or `major.minor.patch.build`. Segments are decimal
//! numbers without leading zeroes.

use std::fmt;
use thiserror::Error;

/// Error returned when a version string fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "version \"{value}\" must be in the format `{{major}}.{{minor}}.{{patch}}` \
     or `{{major}}.{{minor}}.{{patch}}.{{build}}`"
)]
pub struct InvalidPluginVersion {
    /// The rejected version string.
    pub value: String,
}

/// A validated dot-delimited numeric plugin version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginVersion(String);

impl PluginVersion {
    /// Get the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// True when `segment` is a decimal number without a leading zero.
fn is_numeric_segment(segment: &str) -> bool {
    let all_digits = !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit());
    all_digits && (segment == "0" || !segment.starts_with('0'))
}

impl TryFrom<&str> for PluginVersion {
    type Error = InvalidPluginVersion;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let segments: Vec<&str> = value.split('.').collect();
        let segment_count_ok = segments.len() == 3 || segments.len() == 4;
        if segment_count_ok && segments.iter().all(|s| is_numeric_segment(s)) {
            Ok(Self(value.to_owned()))
        } else {
            Err(InvalidPluginVersion {
                value: value.to_owned(),
            })
        }
    }
}

impl TryFrom<String> for PluginVersion {
    type Error = InvalidPluginVersion;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl fmt::Display for PluginVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
