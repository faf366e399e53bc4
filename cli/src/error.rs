//! Error types for the deckpack CLI.
//!
//! This module defines semantic error variants for the packaging pipeline.
//! Each variant carries the context needed for an actionable message, and
//! [`PackError::exit_code`] maps failures to the process exit codes the CLI
//! contract promises (a missing `.packignore` file exits with code 9).

use camino::Utf8PathBuf;
use std::fmt;
use thiserror::Error;

/// Exit code signalling that the `.packignore` file is missing.
pub const EXIT_IGNORE_FILE_MISSING: i32 = 9;

/// Exit code for all other failures.
pub const EXIT_FAILURE: i32 = 1;

/// Errors that can occur while scaffolding, validating, or packing a plugin.
#[derive(Debug, Error)]
pub enum PackError {
    /// The `.packignore` file was not found at the plugin root.
    #[error("'.packignore' file is missing from plugin directory: {path}")]
    IgnoreFileMissing {
        /// Path where the file was expected.
        path: Utf8PathBuf,
    },

    /// A `.packignore` pattern line could not be compiled.
    #[error("invalid .packignore pattern: {reason}")]
    IgnoreSyntax {
        /// Description of the pattern error.
        reason: String,
    },

    /// The plugin source directory does not exist or is not a directory.
    #[error("plugin directory does not exist: {path}")]
    SourceDirMissing {
        /// The missing directory path.
        path: Utf8PathBuf,
    },

    /// The `manifest.json` file was not found at the expected location.
    #[error("manifest.json not found at {path}")]
    ManifestNotFound {
        /// Path where the manifest was expected.
        path: Utf8PathBuf,
    },

    /// The manifest file could not be parsed as JSON.
    #[error("invalid manifest.json: {reason}")]
    ManifestParse {
        /// Description of the parse error.
        reason: String,
    },

    /// One or more manifest fields failed validation.
    #[error("manifest validation failed:{}", format_issues(.issues))]
    ManifestInvalid {
        /// The individual field-level problems, in discovery order.
        issues: Vec<FieldIssue>,
    },

    /// Project scaffolding from the template repository failed.
    #[error("template scaffolding failed: {message}")]
    Scaffold {
        /// Output captured from the failed clone, or a timeout notice.
        message: String,
    },

    /// A filesystem path was not valid UTF-8.
    #[error("path is not valid UTF-8: {reason}")]
    InvalidPath {
        /// Description of the offending path.
        reason: String,
    },

    /// An error raised by the zip archive writer.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// An I/O error from the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PackError {
    /// Map this error to the CLI process exit code.
    ///
    /// A missing `.packignore` exits with [`EXIT_IGNORE_FILE_MISSING`];
    /// every other failure exits with [`EXIT_FAILURE`].
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::IgnoreFileMissing { .. } => EXIT_IGNORE_FILE_MISSING,
            _ => EXIT_FAILURE,
        }
    }
}

/// A single manifest validation problem tied to a named field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// The manifest field (JSON name) the problem refers to.
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl FieldIssue {
    /// Create an issue for the named field.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': {}", self.field, self.message)
    }
}

/// Render aggregated issues as indented lines for the error message.
fn format_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("\n  - {issue}"))
        .collect()
}

/// Result type alias using [`PackError`].
pub type Result<T> = std::result::Result<T, PackError>;
