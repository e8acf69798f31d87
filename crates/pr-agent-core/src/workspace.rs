//! Working-directory resolution.
//!
//! MCP hosts may hand the server a list of workspace roots. The lookup is
//! abstracted behind a trait so the core stays independent of any particular
//! host runtime, the same way command IO is abstracted for CLI vs MCP use.

use std::path::{Path, PathBuf};

/// Source of candidate workspace roots supplied by the host.
pub trait WorkspaceContext: Send + Sync {
    /// Zero or more candidate roots, in preference order.
    fn workspace_roots(&self) -> Vec<PathBuf>;
}

/// Context backed by a fixed list of roots (e.g. server launch flags).
#[derive(Debug, Clone, Default)]
pub struct StaticRoots(pub Vec<PathBuf>);

impl WorkspaceContext for StaticRoots {
    fn workspace_roots(&self) -> Vec<PathBuf> {
        self.0.clone()
    }
}

/// Context with no root information; resolution falls back to the cwd.
#[derive(Debug, Clone, Default)]
pub struct NoContext;

impl WorkspaceContext for NoContext {
    fn workspace_roots(&self) -> Vec<PathBuf> {
        Vec::new()
    }
}

/// Outcome of working-directory resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDir {
    pub dir: PathBuf,
    /// Whether the host supplied any root hints at all.
    pub context_available: bool,
    /// Whether the process cwd was used because nothing better was available.
    pub fallback_used: bool,
}

/// Pick the directory git should run in.
///
/// Precedence: explicit caller argument, then the first host-supplied root,
/// then the process working directory.
pub fn resolve_working_dir(
    explicit: Option<&Path>,
    hints: &[PathBuf],
    cwd: &Path,
) -> ResolvedDir {
    let context_available = !hints.is_empty();

    if let Some(dir) = explicit {
        return ResolvedDir {
            dir: dir.to_path_buf(),
            context_available,
            fallback_used: false,
        };
    }

    if let Some(root) = hints.first() {
        return ResolvedDir {
            dir: root.clone(),
            context_available,
            fallback_used: false,
        };
    }

    ResolvedDir {
        dir: cwd.to_path_buf(),
        context_available,
        fallback_used: true,
    }
}
