//! Ignore-filtered plugin directory traversal.
//!
//! Produces the set of files that belong in a package: every file under
//! the plugin root whose relative path is not matched by the ignore
//! specification. Matched directories are pruned whole, so their
//! descendants are never visited.

use crate::error::{PackError, Result};
use crate::ignorefile::IgnoreMatcher;
use camino::{Utf8Path, Utf8PathBuf};

/// Walk `source_dir` and collect the relative paths of files not matched
/// by `matcher`.
///
/// Directories are visited parent-first with entries in name order, so
/// the result is deterministic for a given tree. Only files appear in
/// the output; directories exist solely as traversal structure.
///
/// # Errors
///
/// Returns [`PackError::SourceDirMissing`] if `source_dir` does not
/// exist or is not a directory, and [`PackError::Io`] if any directory
/// cannot be read.
pub fn filtered_files(
    source_dir: &Utf8Path,
    matcher: &dyn IgnoreMatcher,
) -> Result<Vec<Utf8PathBuf>> {
    if !source_dir.is_dir() {
        return Err(PackError::SourceDirMissing {
            path: source_dir.to_owned(),
        });
    }

    let mut files = Vec::new();
    visit(source_dir, Utf8Path::new(""), matcher, &mut files)?;
    Ok(files)
}

/// Recurse into `source_dir/relative`, appending surviving files.
fn visit(
    source_dir: &Utf8Path,
    relative: &Utf8Path,
    matcher: &dyn IgnoreMatcher,
    files: &mut Vec<Utf8PathBuf>,
) -> Result<()> {
    let mut entries: Vec<camino::Utf8DirEntry> = source_dir
        .join(relative)
        .read_dir_utf8()?
        .collect::<std::io::Result<_>>()?;
    entries.sort_by(|a, b| a.file_name().cmp(b.file_name()));

    for entry in entries {
        let entry_relative = relative.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            // Pruning a matched directory skips its entire subtree.
            if !matcher.is_ignored(&entry_relative, true) {
                visit(source_dir, &entry_relative, matcher, files)?;
            }
        } else if !matcher.is_ignored(&entry_relative, false) {
            files.push(entry_relative);
        }
    }
    Ok(())
}
