//! Git subprocess execution.
//!
//! All repository access goes through read-only git subcommands; this module
//! runs them with a bounded timeout so a wedged subprocess cannot hang a
//! tool call indefinitely.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::process::Command;
use tokio::time;

use crate::error::{Error, Result};

/// Default ceiling for a single git invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs git subcommands in a fixed working directory.
#[derive(Debug, Clone)]
pub struct GitRunner {
    cwd: PathBuf,
    timeout: Duration,
}

impl GitRunner {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(cwd: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            cwd: cwd.into(),
            timeout,
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Run a git subcommand and capture its stdout.
    ///
    /// Fails with [`Error::GitCommand`] when git cannot be spawned, exits
    /// non-zero, or exceeds the timeout. stderr is captured verbatim.
    pub async fn run(&self, args: &[&str]) -> Result<String> {
        let command = format!("git {}", args.join(" "));

        let output_fut = Command::new("git")
            .args(args)
            .current_dir(&self.cwd)
            .kill_on_drop(true)
            .output();

        let output = match time::timeout(self.timeout, output_fut).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(Error::GitCommand {
                    command,
                    stderr: e.to_string(),
                    exit_code: None,
                    timed_out: false,
                })
            }
            Err(_) => {
                return Err(Error::GitCommand {
                    command,
                    stderr: String::new(),
                    exit_code: None,
                    timed_out: true,
                })
            }
        };

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            // stderr is passed through verbatim so multi-line git
            // diagnostics survive; only the trailing newline is dropped.
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.strip_suffix('\n').unwrap_or(&stderr).to_string();
            Err(Error::GitCommand {
                command,
                stderr,
                exit_code: output.status.code(),
                timed_out: false,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::process::Command as StdCommand;

    #[cfg(unix)]
    use std::os::unix::fs::PermissionsExt;

    use tempfile::TempDir;

    /// Minimal throwaway repo for tests that need real git plumbing.
    fn create_test_repo() -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for args in [
            &["init"][..],
            &["config", "user.email", "test@test.com"],
            &["config", "user.name", "Test User"],
        ] {
            let output = StdCommand::new("git")
                .args(args)
                .current_dir(temp_dir.path())
                .output()
                .expect("Failed to run git");
            assert!(output.status.success());
        }
        temp_dir
    }

    #[tokio::test]
    async fn test_run_captures_stdout() {
        let runner = GitRunner::new(".");
        let output = runner.run(&["--version"]).await.unwrap();
        assert!(output.starts_with("git version"));
    }

    #[tokio::test]
    async fn test_run_unknown_subcommand_fails() {
        let runner = GitRunner::new(".");
        let err = runner
            .run(&["definitely-not-a-git-subcommand"])
            .await
            .unwrap_err();
        match err {
            Error::GitCommand {
                command,
                stderr,
                exit_code,
                timed_out,
            } => {
                assert!(command.contains("definitely-not-a-git-subcommand"));
                assert!(!stderr.is_empty());
                assert!(exit_code.is_some());
                assert!(!timed_out);
            }
        }
    }

    #[test]
    fn test_with_timeout_overrides_default() {
        let runner = GitRunner::with_timeout("/tmp", Duration::from_secs(5));
        assert_eq!(runner.timeout, Duration::from_secs(5));
        assert_eq!(runner.cwd(), Path::new("/tmp"));
    }

    #[tokio::test]
    async fn test_stderr_preserved_verbatim_minus_trailing_newline() {
        let temp_dir = create_test_repo();
        let runner = GitRunner::new(temp_dir.path());

        // An ambiguous revision makes git print a multi-line diagnostic.
        let err = runner
            .run(&["diff", "--name-status", "no-such-branch...HEAD"])
            .await
            .unwrap_err();
        let Error::GitCommand { stderr, .. } = err;

        assert!(stderr.starts_with("fatal:"));
        assert!(stderr.lines().count() > 1);
        assert!(!stderr.ends_with('\n'));
    }

    // A pre-commit hook that sleeps blocks git for far longer than the
    // configured timeout, without depending on stdin or the network.
    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_yields_timed_out_error() {
        let temp_dir = create_test_repo();
        let hook = temp_dir.path().join(".git/hooks/pre-commit");
        fs::write(&hook, "#!/bin/sh\nsleep 60\n").unwrap();
        let mut perms = fs::metadata(&hook).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&hook, perms).unwrap();

        let runner = GitRunner::with_timeout(temp_dir.path(), Duration::from_millis(100));
        let err = runner
            .run(&["commit", "--allow-empty", "-m", "blocked by hook"])
            .await
            .unwrap_err();

        let Error::GitCommand {
            command,
            stderr,
            exit_code,
            timed_out,
        } = err;
        assert!(timed_out);
        assert!(exit_code.is_none());
        assert!(stderr.is_empty());
        assert!(command.contains("commit"));
    }
}
