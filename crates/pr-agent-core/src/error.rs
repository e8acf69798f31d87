//! Error types for pr-agent

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A git subprocess could not be spawned, exited non-zero, or timed out.
    ///
    /// `stderr` is captured verbatim so callers can relay git's own
    /// explanation (unknown revision, not a repository, ...).
    #[error("git command '{command}' {}", if *timed_out { "timed out".to_string() } else { format!("failed: {stderr}") })]
    GitCommand {
        command: String,
        stderr: String,
        exit_code: Option<i32>,
        timed_out: bool,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_command_error_display() {
        let err = Error::GitCommand {
            command: "git diff --stat main...HEAD".to_string(),
            stderr: "fatal: bad revision 'main...HEAD'".to_string(),
            exit_code: Some(128),
            timed_out: false,
        };
        assert_eq!(
            err.to_string(),
            "git command 'git diff --stat main...HEAD' failed: fatal: bad revision 'main...HEAD'"
        );
    }

    #[test]
    fn test_git_timeout_error_display() {
        let err = Error::GitCommand {
            command: "git log --oneline main..HEAD".to_string(),
            stderr: String::new(),
            exit_code: None,
            timed_out: true,
        };
        assert_eq!(
            err.to_string(),
            "git command 'git log --oneline main..HEAD' timed out"
        );
    }
}
