//! User-facing message formatting for the CLI.
//!
//! Core components return structured errors and never talk to the user;
//! all presentation funnels through here and through the injected stderr
//! sink so output is testable.

use camino::Utf8Path;
use std::io::Write;

/// Write a message line to the stderr sink, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort output; a broken pipe is not worth failing over.
    }
}

/// Format the success message after packing a plugin.
#[must_use]
pub fn pack_success_message(archive_path: &Utf8Path) -> String {
    format!("Packed plugin to {archive_path}")
}

/// Format the success message after validating a manifest.
#[must_use]
pub fn validation_success_message(plugin_name: &str) -> String {
    format!("Manifest validation completed successfully for plugin '{plugin_name}'.")
}

/// Format the success message after scaffolding a project.
#[must_use]
pub fn scaffold_success_message(destination: &Utf8Path) -> String {
    format!("Created new plugin project at {destination}")
}
