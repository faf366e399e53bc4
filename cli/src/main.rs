//! deckpack CLI entrypoint.
//!
//! Dispatches the create, pack, and validate subcommands and maps
//! failures to process exit codes: 9 when the `.packignore` file is
//! missing, 1 for any other error.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use deckpack::cli::{Cli, Command, CreateArgs, PackArgs, ValidateArgs};
use deckpack::error::{PackError, Result};
use deckpack::manifest::{MANIFEST_FILE_NAME, Manifest};
use deckpack::output::{
    pack_success_message, scaffold_success_message, validation_success_message,
    write_stderr_line,
};
use deckpack::pipeline::{PackRequest, pack_plugin};
use deckpack::scaffold::scaffold_project;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Command::Create(args) => run_create(args, stderr),
        Command::Pack(args) => run_pack(args, stderr),
        Command::Validate(args) => run_validate(args, stderr),
    }
}

/// Scaffold a new plugin project from the template.
fn run_create(args: &CreateArgs, stderr: &mut dyn Write) -> Result<()> {
    write_stderr_line(stderr, format!("Cloning template from {}...", args.src_path));
    let destination = scaffold_project(&args.src_path, args.dest.as_deref())?;
    write_stderr_line(stderr, scaffold_success_message(&destination));
    Ok(())
}

/// Pack a plugin directory into a versioned release archive.
fn run_pack(args: &PackArgs, stderr: &mut dyn Write) -> Result<()> {
    let plugin_dir = resolve_plugin_dir(args.plugin_dir.as_deref())?;
    let request = PackRequest {
        plugin_dir: &plugin_dir,
        output_dir: &args.output,
        version_override: args.version.as_deref(),
        debug_port: args.debug_port,
        quiet: args.quiet,
    };

    let archive_path = pack_plugin(&request, stderr)?;
    if !args.quiet {
        write_stderr_line(stderr, pack_success_message(&archive_path));
    }
    Ok(())
}

/// Load and validate a plugin manifest, reporting the result.
fn run_validate(args: &ValidateArgs, stderr: &mut dyn Write) -> Result<()> {
    let plugin_dir = resolve_plugin_dir(args.plugin_dir.as_deref())?;
    if !plugin_dir.exists() {
        return Err(PackError::SourceDirMissing { path: plugin_dir });
    }

    let manifest = Manifest::from_json_file(&plugin_dir.join(MANIFEST_FILE_NAME))?;
    let _identity = manifest.validate(&plugin_dir)?;

    write_stderr_line(stderr, validation_success_message(&manifest.name));
    Ok(())
}

/// Use the given plugin directory, or fall back to the current directory.
fn resolve_plugin_dir(arg: Option<&Utf8Path>) -> Result<Utf8PathBuf> {
    match arg {
        Some(dir) => Ok(dir.to_owned()),
        None => {
            let cwd = std::env::current_dir()?;
            Utf8PathBuf::from_path_buf(cwd).map_err(|path| PackError::InvalidPath {
                reason: format!("current directory {}", path.display()),
            })
        }
    }
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            let exit_code = err.exit_code();
            write_stderr_line(stderr, format!("ERROR: {err}"));
            exit_code
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use deckpack::error::{EXIT_FAILURE, EXIT_IGNORE_FILE_MISSING};

    #[test]
    fn exit_code_for_run_result_returns_zero_on_success() {
        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Ok(()), &mut stderr);
        assert_eq!(exit_code, 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn exit_code_for_run_result_prints_error_and_returns_one() {
        let err = PackError::ManifestNotFound {
            path: Utf8PathBuf::from("/plugin/manifest.json"),
        };

        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Err(err), &mut stderr);
        assert_eq!(exit_code, EXIT_FAILURE);

        let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(stderr_text.contains("manifest.json not found"));
    }

    #[test]
    fn missing_packignore_exits_with_code_nine() {
        let err = PackError::IgnoreFileMissing {
            path: Utf8PathBuf::from("/plugin/.packignore"),
        };

        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Err(err), &mut stderr);
        assert_eq!(exit_code, EXIT_IGNORE_FILE_MISSING);

        let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(stderr_text.contains(".packignore"));
    }

    #[test]
    fn resolve_plugin_dir_prefers_the_argument() {
        let dir = Utf8PathBuf::from("/plugins/counter");
        let resolved = resolve_plugin_dir(Some(&dir)).expect("resolution should succeed");
        assert_eq!(resolved, dir);
    }

    #[test]
    fn resolve_plugin_dir_falls_back_to_cwd() {
        let resolved = resolve_plugin_dir(None).expect("resolution should succeed");
        assert!(resolved.is_absolute());
    }
}
