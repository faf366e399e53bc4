//! Project scaffolding from the plugin template repository.
//!
//! The `create` command clones the template repository into a new
//! directory. Cloning has a configurable timeout to prevent hangs on
//! network issues.

use crate::error::{PackError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

/// Default plugin project template repository.
pub const TEMPLATE_REPO_URL: &str =
    "https://github.com/strohganoff/python-streamdeck-plugin-template.git";

/// Timeout for the clone operation (5 minutes).
const CLONE_TIMEOUT: Duration = Duration::from_secs(300);

/// Clone the template at `source` into `destination`.
///
/// `source` may be a git URL or a local path. When `destination` is
/// `None`, git derives the directory name from the source, and the
/// derived name is returned.
///
/// # Errors
///
/// Returns [`PackError::Scaffold`] if the clone fails, times out, or
/// git cannot be started.
pub fn scaffold_project(source: &str, destination: Option<&Utf8Path>) -> Result<Utf8PathBuf> {
    let target = match destination {
        Some(dir) => dir.to_owned(),
        None => derived_clone_dir(source),
    };

    let output = run_git_clone_with_timeout(source, &target)?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PackError::Scaffold {
            message: stderr.trim().to_owned(),
        });
    }

    Ok(target)
}

/// Directory name git would derive for `source`: the final path segment
/// with any `.git` suffix removed.
fn derived_clone_dir(source: &str) -> Utf8PathBuf {
    let tail = source
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(source);
    Utf8PathBuf::from(tail.trim_end_matches(".git"))
}

/// Run `git clone` with a timeout, killing the child on expiry.
fn run_git_clone_with_timeout(source: &str, target: &Utf8Path) -> Result<Output> {
    let mut child = Command::new("git")
        .args(["clone", source, target.as_str()])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| PackError::Scaffold {
            message: format!("failed to start git: {err}"),
        })?;

    match child.wait_timeout(CLONE_TIMEOUT) {
        Ok(Some(_status)) => {
            child
                .wait_with_output()
                .map_err(|err| PackError::Scaffold {
                    message: format!("failed to collect git output: {err}"),
                })
        }
        Ok(None) => {
            let _ = child.kill();
            let _ = child.wait();
            Err(PackError::Scaffold {
                message: format!("clone timed out after {} seconds", CLONE_TIMEOUT.as_secs()),
            })
        }
        Err(err) => {
            let _ = child.kill();
            Err(PackError::Scaffold {
                message: format!("failed to wait for git: {err}"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case::git_url(
        "https://github.com/strohganoff/python-streamdeck-plugin-template.git",
        "python-streamdeck-plugin-template"
    )]
    #[case::trailing_slash("https://example.com/repos/template/", "template")]
    #[case::local_path("/home/user/templates/plugin-starter", "plugin-starter")]
    #[case::bare_name("starter", "starter")]
    fn derives_clone_dir_from_source(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(derived_clone_dir(source), Utf8PathBuf::from(expected));
    }

    /// Cloning a local template directory exercises the real git path
    /// without touching the network.
    #[test]
    fn clones_local_template_repository() {
        let workspace = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(workspace.path().to_path_buf())
            .expect("UTF-8 temp path");

        let template = root.join("template");
        std::fs::create_dir_all(&template).expect("create template dir");
        std::fs::write(template.join("manifest.json"), "{}").expect("write template file");
        let git = |args: &[&str], cwd: &Utf8Path| {
            Command::new("git")
                .args(args)
                .current_dir(cwd)
                .env("GIT_AUTHOR_NAME", "test")
                .env("GIT_AUTHOR_EMAIL", "test@example.com")
                .env("GIT_COMMITTER_NAME", "test")
                .env("GIT_COMMITTER_EMAIL", "test@example.com")
                .output()
                .expect("run git")
        };
        assert!(git(&["init", "--quiet"], &template).status.success());
        assert!(git(&["add", "."], &template).status.success());
        assert!(
            git(&["commit", "--quiet", "-m", "template"], &template)
                .status
                .success()
        );

        let destination = root.join("new-plugin");
        let created = scaffold_project(template.as_str(), Some(&destination))
            .expect("scaffold should succeed");

        assert_eq!(created, destination);
        assert!(destination.join("manifest.json").exists());
    }

    #[test]
    fn missing_source_reports_scaffold_error() {
        let workspace = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(workspace.path().to_path_buf())
            .expect("UTF-8 temp path");

        let destination = root.join("dest");
        let err = scaffold_project(root.join("does-not-exist").as_str(), Some(&destination))
            .map(|_| ())
            .expect_err("scaffold should fail");
        assert!(matches!(err, PackError::Scaffold { .. }));
    }
}
