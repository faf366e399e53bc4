//! Pack pipeline orchestration.
//!
//! Coordinates the full packaging flow: load and validate the manifest,
//! resolve the versioned output directory, compile the `.packignore`
//! specification, and build the archive. Progress is reported to the
//! injected stderr sink; failures surface as [`crate::error::PackError`]
//! values for the CLI layer to present.

use crate::archive::{ArchiveParams, build_archive};
use crate::autoversion::resolve_versioned_dir;
use crate::error::Result;
use crate::ignorefile::PackIgnore;
use crate::manifest::{MANIFEST_FILE_NAME, Manifest};
use crate::output::write_stderr_line;
use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use std::fs;
use std::io::Write;
use std::num::NonZeroU16;

/// Inputs for a pack run.
pub struct PackRequest<'a> {
    /// Plugin directory to package.
    pub plugin_dir: &'a Utf8Path,
    /// Base output directory holding versioned release directories.
    pub output_dir: &'a Utf8Path,
    /// Package under this version instead of the manifest version.
    pub version_override: Option<&'a str>,
    /// Embed a `.debug` marker listening on this port.
    pub debug_port: Option<NonZeroU16>,
    /// Suppress progress output.
    pub quiet: bool,
}

/// Run the pack pipeline and return the path of the created archive.
///
/// The versioned output directory is created on demand; the archive
/// lands at `{output_dir}/{version[-N]}/{uuid}.streamDeckPlugin`.
///
/// # Errors
///
/// Propagates manifest, ignore-file, traversal, and archive errors
/// unchanged; no step is retried.
pub fn pack_plugin(request: &PackRequest<'_>, stderr: &mut dyn Write) -> Result<Utf8PathBuf> {
    let manifest = Manifest::from_json_file(&request.plugin_dir.join(MANIFEST_FILE_NAME))?;
    let identity = manifest.validate(request.plugin_dir)?;

    let version = request
        .version_override
        .unwrap_or_else(|| identity.version.as_str());
    let versioned_dir = resolve_versioned_dir(request.output_dir, version)?;
    let archive_path = versioned_dir.join(identity.uuid.package_file_name());
    info!("output plugin file will be created at: {archive_path}");

    if !request.quiet {
        write_stderr_line(
            stderr,
            format!("Output plugin file will be created at: {archive_path}"),
        );
    }

    // Load the ignore file before creating the release directory; a
    // missing .packignore must leave the output root untouched.
    let matcher = PackIgnore::load(request.plugin_dir)?;

    fs::create_dir_all(versioned_dir.as_std_path())?;
    build_archive(&ArchiveParams {
        source_dir: request.plugin_dir,
        archive_path: &archive_path,
        root_prefix: &identity.uuid.archive_root(),
        matcher: &matcher,
        debug_port: request.debug_port,
    })?;

    Ok(archive_path)
}
