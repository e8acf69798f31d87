//! Change analysis against a base branch.
//!
//! Shells out to git for the name-status listing, diff stat, commit log,
//! and (optionally) the diff body, and folds the text output into a single
//! structured [`ChangeReport`].

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::git::GitRunner;
use crate::workspace::{resolve_working_dir, ResolvedDir, WorkspaceContext};

/// Default cap on returned diff lines.
pub const DEFAULT_MAX_DIFF_LINES: usize = 500;

/// Commit history is bounded regardless of how long the branch is.
pub const MAX_COMMITS: usize = 20;

/// Change category from a git name-status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
    TypeChanged,
    Unmerged,
    Unknown,
}

impl FileStatus {
    fn from_code(code: char) -> Self {
        match code {
            'A' => FileStatus::Added,
            'M' => FileStatus::Modified,
            'D' => FileStatus::Deleted,
            'R' => FileStatus::Renamed,
            'C' => FileStatus::Copied,
            'T' => FileStatus::TypeChanged,
            'U' => FileStatus::Unmerged,
            _ => FileStatus::Unknown,
        }
    }
}

/// A single changed file.
#[derive(Debug, Clone, Serialize)]
pub struct FileChange {
    pub status: FileStatus,
    pub path: String,
}

/// One commit from the branch history, most-recent-first.
#[derive(Debug, Clone, Serialize)]
pub struct CommitInfo {
    pub hash: String,
    pub message: String,
}

/// Diagnostic trail of how the working directory was chosen.
///
/// Not used by any downstream logic; surfaced so callers can see which
/// directory was actually analyzed when results look surprising.
#[derive(Debug, Clone, Serialize)]
pub struct DebugInfo {
    pub working_directory: String,
    pub resolved_root: String,
    pub context_available: bool,
    pub fallback_used: bool,
}

/// Everything known about the pending changes relative to a base branch.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeReport {
    pub base_branch: String,
    pub files: Vec<FileChange>,
    pub diff_stat: String,
    pub commits: Vec<CommitInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
    pub truncated: bool,
    pub debug: DebugInfo,
}

/// Analyze pending changes between `base_branch` and HEAD.
///
/// The working directory is the explicit argument if given, otherwise the
/// first host-supplied workspace root, otherwise the process cwd. Any git
/// failure (unknown branch, not a repository, missing binary, timeout)
/// aborts the whole analysis; there is no partial report.
pub async fn analyze(
    base_branch: &str,
    include_diff: bool,
    max_diff_lines: usize,
    working_directory: Option<&Path>,
    ctx: &dyn WorkspaceContext,
) -> Result<ChangeReport> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let resolved = resolve_working_dir(working_directory, &ctx.workspace_roots(), &cwd);
    let debug = build_debug_info(&resolved);
    let git = GitRunner::new(&resolved.dir);

    let diff_range = format!("{base_branch}...HEAD");
    let log_range = format!("{base_branch}..HEAD");

    let name_status = git.run(&["diff", "--name-status", &diff_range]).await?;
    let files = parse_name_status(&name_status);

    let diff_stat = git.run(&["diff", "--stat", &diff_range]).await?;

    let log = git.run(&["log", "--oneline", &log_range]).await?;
    let commits = parse_oneline_log(&log, MAX_COMMITS);

    let (diff, truncated) = if include_diff {
        let body = git.run(&["diff", &diff_range]).await?;
        let (body, truncated) = truncate_lines(&body, max_diff_lines);
        (Some(body), truncated)
    } else {
        (None, false)
    };

    Ok(ChangeReport {
        base_branch: base_branch.to_string(),
        files,
        diff_stat,
        commits,
        diff,
        truncated,
        debug,
    })
}

fn build_debug_info(resolved: &ResolvedDir) -> DebugInfo {
    // Discovery failure is not an error here: the analysis itself will
    // surface a proper GitCommand error if the directory is not a repo.
    let resolved_root = git2::Repository::discover(&resolved.dir)
        .ok()
        .and_then(|repo| repo.workdir().map(Path::to_path_buf))
        .unwrap_or_else(|| resolved.dir.clone());

    DebugInfo {
        working_directory: resolved.dir.display().to_string(),
        resolved_root: resolved_root.display().to_string(),
        context_available: resolved.context_available,
        fallback_used: resolved.fallback_used,
    }
}

/// Parse `git diff --name-status` output into file changes.
///
/// Each line is `<code>\t<path>`; rename/copy codes carry a similarity
/// score and a source path, so the destination is always the last field.
/// Empty or malformed lines are skipped rather than failing.
fn parse_name_status(output: &str) -> Vec<FileChange> {
    output
        .lines()
        .filter_map(|line| {
            let line = line.trim_end();
            if line.is_empty() {
                return None;
            }
            let mut fields = line.split('\t');
            let code = fields.next()?;
            let path = fields.last()?;
            let status = code
                .chars()
                .next()
                .map(FileStatus::from_code)
                .unwrap_or(FileStatus::Unknown);
            Some(FileChange {
                status,
                path: path.to_string(),
            })
        })
        .collect()
}

/// Parse `git log --oneline` output, splitting each line on the first
/// whitespace run and capping the result at `max` entries.
fn parse_oneline_log(output: &str, max: usize) -> Vec<CommitInfo> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(max)
        .map(|line| match line.split_once(char::is_whitespace) {
            Some((hash, rest)) => CommitInfo {
                hash: hash.to_string(),
                message: rest.trim_start().to_string(),
            },
            None => CommitInfo {
                hash: line.to_string(),
                message: String::new(),
            },
        })
        .collect()
}

/// Keep at most `max_lines` lines, reporting whether anything was dropped.
fn truncate_lines(text: &str, max_lines: usize) -> (String, bool) {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() > max_lines {
        (lines[..max_lines].join("\n"), true)
    } else {
        (text.to_string(), false)
    }
}
