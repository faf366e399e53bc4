//! `.packignore` loading and path match testing.
//!
//! A plugin lists the paths to exclude from packaging in a `.packignore`
//! file at its root, one gitignore-style pattern per line. The file is
//! required: packaging without one is a configuration error rather than a
//! silent include-everything default.
//!
//! Consumers depend on the [`IgnoreMatcher`] trait rather than a concrete
//! pattern engine, so the walker and archive builder only ever ask "is
//! this path ignored?". [`PackIgnore`] is the gitignore-grammar
//! implementation backed by the `ignore` crate.

use crate::error::{PackError, Result};
use camino::Utf8Path;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::io::ErrorKind;

/// Well-known ignore file name at the plugin root.
pub const PACKIGNORE_FILE_NAME: &str = ".packignore";

/// Match-test capability for excluding paths from packaging.
///
/// Paths are given relative to the plugin root. `is_dir` distinguishes
/// directory matches (which prune whole subtrees) from file matches.
pub trait IgnoreMatcher {
    /// True when the path should be excluded from the package.
    fn is_ignored(&self, relative_path: &Utf8Path, is_dir: bool) -> bool;
}

/// Compiled `.packignore` specification with gitignore semantics.
///
/// Supports the standard gitignore grammar: `*` and `**` wildcards,
/// directory anchors, comments, and `!` negation with later patterns
/// overriding earlier ones.
#[derive(Debug)]
pub struct PackIgnore {
    matcher: Gitignore,
}

impl PackIgnore {
    /// Load and compile the `.packignore` file from `plugin_dir`.
    ///
    /// Only the plugin root is consulted; nested ignore files are not
    /// part of the format.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::IgnoreFileMissing`] when the file is absent
    /// (a fatal configuration error, surfaced to the user with exit code
    /// 9) and [`PackError::IgnoreSyntax`] when a pattern fails to
    /// compile.
    pub fn load(plugin_dir: &Utf8Path) -> Result<Self> {
        let path = plugin_dir.join(PACKIGNORE_FILE_NAME);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(PackError::IgnoreFileMissing { path });
            }
            Err(err) => return Err(PackError::Io(err)),
        };
        Self::from_lines(contents.lines())
    }

    /// Compile a specification from individual pattern lines.
    ///
    /// Blank lines and `#` comments are skipped, matching gitignore
    /// file semantics.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::IgnoreSyntax`] when a pattern fails to
    /// compile.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut builder = GitignoreBuilder::new("");
        for line in lines {
            builder
                .add_line(None, line)
                .map_err(|err| PackError::IgnoreSyntax {
                    reason: err.to_string(),
                })?;
        }
        let matcher = builder.build().map_err(|err| PackError::IgnoreSyntax {
            reason: err.to_string(),
        })?;
        Ok(Self { matcher })
    }
}

impl IgnoreMatcher for PackIgnore {
    fn is_ignored(&self, relative_path: &Utf8Path, is_dir: bool) -> bool {
        self.matcher
            .matched(relative_path.as_std_path(), is_dir)
            .is_ignore()
    }
}
