//! Versioned output directory resolution.
//!
//! Repackaging the same plugin version must not clobber an earlier release,
//! so each repackage lands in a fresh directory named `{version}-{N}` where
//! `N` is the subversion. The first release of a version is unsuffixed; the
//! second takes `-1`, the third `-2`, and so on, discovered from whatever
//! directories already exist under the output root.
//!
//! Resolution is a pure function of the directory snapshot: it creates
//! nothing, and repeated calls without creating the returned directory
//! yield the same path. Two processes resolving against the same output
//! root concurrently can race between listing and directory creation; the
//! resolver makes no atomicity guarantee.

use crate::error::{PackError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::ErrorKind;

/// The subversion suffix of a release directory name.
///
/// A directory named `1.0.0` carries no suffix; `1.0.0-3` carries
/// subversion 3. Only the final `-<digits>` group counts, so `1.0-2-3`
/// parses as subversion 3.
///
/// A version string that itself ends in `-<digits>` is indistinguishable
/// from a subversion suffix. That ambiguity is inherent to the naming
/// scheme and is preserved rather than resolved here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subversion {
    /// No trailing `-<digits>` suffix; the original release of a version.
    Unsuffixed,
    /// A trailing `-<digits>` suffix with the given value.
    Numbered(u32),
}

impl Subversion {
    /// Parse the subversion from a release directory name.
    ///
    /// # Examples
    ///
    /// ```
    /// use deckpack::autoversion::Subversion;
    ///
    /// assert_eq!(Subversion::parse("1.0.0"), Subversion::Unsuffixed);
    /// assert_eq!(Subversion::parse("1.0.0-3"), Subversion::Numbered(3));
    /// ```
    #[must_use]
    pub fn parse(dir_name: &str) -> Self {
        let Some((_, suffix)) = dir_name.rsplit_once('-') else {
            return Self::Unsuffixed;
        };
        if suffix.is_empty() || !suffix.chars().all(|c| c.is_ascii_digit()) {
            return Self::Unsuffixed;
        }
        suffix.parse().map_or(Self::Unsuffixed, Self::Numbered)
    }

    /// The numeric value used for ordering; unsuffixed counts as 0.
    #[must_use]
    pub const fn ordinal(self) -> u32 {
        match self {
            Self::Unsuffixed => 0,
            Self::Numbered(n) => n,
        }
    }
}

/// Compute the next available versioned output directory.
///
/// Entries under `output_root` whose name starts with `version` form the
/// release history. Note this is a plain prefix match: with releases of
/// both `1.0` and `1.0.1` present, resolving `1.0` also counts the `1.0.1`
/// directories. The original naming scheme leaves the intent ambiguous, so
/// the behaviour is kept as-is.
///
/// - no prior releases: `output_root/{version}`
/// - one prior release: `output_root/{version}-1`
/// - several: the highest existing subversion plus one, applied to the
///   highest entry's name with its suffix stripped at the first `-`.
///
/// A missing `output_root` counts as an empty history. The returned
/// directory is not created.
///
/// # Errors
///
/// Returns [`PackError::Io`] if the output root exists but cannot be read.
pub fn resolve_versioned_dir(output_root: &Utf8Path, version: &str) -> Result<Utf8PathBuf> {
    let mut releases = prior_releases(output_root, version)?;
    releases.sort_by_key(|name| (Subversion::parse(name).ordinal(), name.clone()));

    let dir_name = match releases.as_slice() {
        [] => version.to_owned(),
        [_single] => format!("{version}-1"),
        [.., highest] => {
            let pure_version = highest.split('-').next().unwrap_or(highest);
            let next = Subversion::parse(highest).ordinal() + 1;
            format!("{pure_version}-{next}")
        }
    };

    Ok(output_root.join(dir_name))
}

/// List the names of entries under `output_root` starting with `version`.
fn prior_releases(output_root: &Utf8Path, version: &str) -> Result<Vec<String>> {
    let entries = match fs::read_dir(output_root.as_std_path()) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(PackError::Io(err)),
    };

    let mut names = Vec::new();
    for entry_result in entries {
        let entry = entry_result?;
        if let Ok(name) = entry.file_name().into_string()
            && name.starts_with(version)
        {
            names.push(name);
        }
    }
    Ok(names)
}
