//! Validated plugin identifier newtype.
//!
//! A plugin UUID is a reverse-domain style identifier with exactly three
//! dot-delimited segments of lowercase alphanumeric or hyphen characters,
//! for example `com.example.counter`. The UUID also determines the archive
//! root directory (`{uuid}.sdPlugin`) and the package file name
//! (`{uuid}.streamDeckPlugin`).

use std::fmt;
use thiserror::Error;

/// Suffix of the single top-level directory inside a packaged archive.
pub const ARCHIVE_ROOT_SUFFIX: &str = "sdPlugin";

/// File extension of the distributable package file.
pub const PACKAGE_FILE_SUFFIX: &str = "streamDeckPlugin";

/// Error returned when a plugin UUID fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "plugin UUID \"{value}\" must have exactly 3 dot-delimited segments of \
     lowercase alphanumeric or hyphen characters"
)]
pub struct InvalidPluginUuid {
    /// The rejected identifier string.
    pub value: String,
}

/// A validated three-segment plugin identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginUuid(String);

impl PluginUuid {
    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the single top-level directory inside the archive.
    ///
    /// # Examples
    ///
    /// ```
    /// use deckpack::plugin_uuid::PluginUuid;
    ///
    /// let uuid = PluginUuid::try_from("com.example.counter").expect("valid UUID");
    /// assert_eq!(uuid.archive_root(), "com.example.counter.sdPlugin");
    /// ```
    #[must_use]
    pub fn archive_root(&self) -> String {
        format!("{}.{ARCHIVE_ROOT_SUFFIX}", self.0)
    }

    /// File name of the distributable package.
    #[must_use]
    pub fn package_file_name(&self) -> String {
        format!("{}.{PACKAGE_FILE_SUFFIX}", self.0)
    }

    /// Test whether `action_uuid` belongs to this plugin.
    ///
    /// An action UUID must be the plugin UUID followed by exactly one
    /// further dot-delimited segment of `[a-z0-9-_]` characters.
    #[must_use]
    pub fn owns_action(&self, action_uuid: &str) -> bool {
        let Some(rest) = action_uuid.strip_prefix(self.0.as_str()) else {
            return false;
        };
        let Some(segment) = rest.strip_prefix('.') else {
            return false;
        };
        !segment.is_empty()
            && !segment.contains('.')
            && segment
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    }
}

/// True when `segment` is a non-empty run of lowercase alphanumeric or
/// hyphen characters.
fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

impl TryFrom<&str> for PluginUuid {
    type Error = InvalidPluginUuid;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let segments: Vec<&str> = value.split('.').collect();
        if segments.len() == 3 && segments.iter().all(|s| is_valid_segment(s)) {
            Ok(Self(value.to_owned()))
        } else {
            Err(InvalidPluginUuid {
                value: value.to_owned(),
            })
        }
    }
}

impl TryFrom<String> for PluginUuid {
    type Error = InvalidPluginUuid;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl fmt::Display for PluginUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::reverse_domain("com.example.counter")]
    #[case::hyphenated("io.my-org.tally-counter")]
    #[case::numeric("com.0studio.deck2")]
    fn accepts_valid_uuids(#[case] value: &str) {
        let uuid = PluginUuid::try_from(value).expect("uuid should validate");
        assert_eq!(uuid.as_str(), value);
    }

    #[rstest]
    #[case::two_segments("com.example")]
    #[case::four_segments("com.example.counter.extra")]
    #[case::uppercase("Com.Example.Counter")]
    #[case::underscore("com.example._counter")]
    #[case::empty_segment("com..counter")]
    #[case::empty("")]
    fn rejects_invalid_uuids(#[case] value: &str) {
        let err = PluginUuid::try_from(value).expect_err("uuid should be rejected");
        assert_eq!(err.value, value);
    }

    #[test]
    fn derives_archive_root_and_package_file_name() {
        let uuid = PluginUuid::try_from("com.example.counter").expect("valid uuid");
        assert_eq!(uuid.archive_root(), "com.example.counter.sdPlugin");
        assert_eq!(
            uuid.package_file_name(),
            "com.example.counter.streamDeckPlugin"
        );
    }

    #[rstest]
    #[case::simple("com.example.counter.increment", true)]
    #[case::underscored("com.example.counter.press_down", true)]
    #[case::wrong_plugin("com.other.counter.increment", false)]
    #[case::missing_segment("com.example.counter", false)]
    #[case::two_extra_segments("com.example.counter.a.b", false)]
    #[case::empty_segment("com.example.counter.", false)]
    fn owns_action_requires_one_extra_segment(#[case] action: &str, #[case] expected: bool) {
        let uuid = PluginUuid::try_from("com.example.counter").expect("valid uuid");
        assert_eq!(uuid.owns_action(action), expected);
    }
}
