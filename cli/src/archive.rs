//! Plugin archive construction.
//!
//! A packaged plugin is a deflate-compressed zip file whose entries all
//! live under a single top-level directory named after the plugin UUID
//! (`{uuid}.sdPlugin/`). The Stream Deck software unzips the archive into
//! its plugin directory, so the entry set must be exactly the non-ignored
//! plugin files, with an optional `.debug` marker appended when a debug
//! port was requested.

use crate::error::Result;
use crate::ignorefile::IgnoreMatcher;
use crate::walk::filtered_files;
use camino::Utf8Path;
use log::debug;
use std::fs;
use std::io::Write;
use std::num::NonZeroU16;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Name of the debug marker entry written under the archive root.
pub const DEBUG_MARKER_NAME: &str = ".debug";

/// Input parameters for [`build_archive`].
///
/// Groups all required inputs so the function signature stays within
/// Clippy's parameter limit.
pub struct ArchiveParams<'a> {
    /// Plugin directory to package; must exist.
    pub source_dir: &'a Utf8Path,
    /// Destination file; overwritten if present. The parent directory
    /// must already exist.
    pub archive_path: &'a Utf8Path,
    /// Single top-level directory name inside the archive, with no path
    /// separators.
    pub root_prefix: &'a str,
    /// Match-test used to exclude paths from the package.
    pub matcher: &'a dyn IgnoreMatcher,
    /// When set, a `.debug` entry carrying this port number is appended.
    pub debug_port: Option<NonZeroU16>,
}

/// Build the plugin archive described by `params`.
///
/// Walks the source tree (pruning ignored paths), then writes one
/// deflate-compressed entry per surviving file at
/// `{root_prefix}/{relative_path}`, forward-slash normalized. Directory
/// entries are never written. Entry order follows the walk but is not
/// part of the contract; the entry set is.
///
/// # Errors
///
/// Returns [`crate::error::PackError::SourceDirMissing`] if the source
/// directory does not exist, and I/O or archive errors if any file
/// cannot be read or written.
pub fn build_archive(params: &ArchiveParams<'_>) -> Result<()> {
    let files = filtered_files(params.source_dir, params.matcher)?;

    let output = fs::File::create(params.archive_path.as_std_path())?;
    let mut archive = ZipWriter::new(output);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for relative in &files {
        let entry_name = entry_name(params.root_prefix, relative);
        debug!("adding {} as {entry_name}", params.source_dir.join(relative));

        archive.start_file(entry_name, options)?;
        let mut source = fs::File::open(params.source_dir.join(relative).as_std_path())?;
        std::io::copy(&mut source, &mut archive)?;
    }

    if let Some(port) = params.debug_port {
        archive.start_file(format!("{}/{DEBUG_MARKER_NAME}", params.root_prefix), options)?;
        archive.write_all(port.to_string().as_bytes())?;
    }

    archive.finish()?;
    Ok(())
}

/// Archive-relative entry name for a source file.
///
/// Always forward-slash separated, regardless of the host path
/// separator convention.
fn entry_name(root_prefix: &str, relative: &Utf8Path) -> String {
    format!("{root_prefix}/{}", relative.as_str().replace('\\', "/"))
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
