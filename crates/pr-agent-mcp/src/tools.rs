//! MCP tool definitions for pr-agent.
//!
//! Read-only tools that inspect pending git changes and pick PR templates.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router, ServerHandler,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use pr_agent_core::analyzer::{self, DEFAULT_MAX_DIFF_LINES};
use pr_agent_core::catalog;
use pr_agent_core::suggest;
use pr_agent_core::workspace::StaticRoots;

// --- Tool parameters ---

fn default_base_branch() -> String {
    "main".to_string()
}

fn default_include_diff() -> bool {
    true
}

fn default_max_diff_lines() -> usize {
    DEFAULT_MAX_DIFF_LINES
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeFileChangesParams {
    /// Base branch to compare against (default: main)
    #[serde(default = "default_base_branch")]
    pub base_branch: String,
    /// Include the full diff body in the response
    #[serde(default = "default_include_diff")]
    pub include_diff: bool,
    /// Maximum number of diff lines before truncation (default: 500)
    #[serde(default = "default_max_diff_lines")]
    pub max_diff_lines: usize,
    /// Repository directory to analyze (default: workspace root, then cwd)
    #[serde(default)]
    pub working_directory: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SuggestTemplatesParams {
    /// Short description of what changed
    pub changes_summary: String,
    /// Free-text change type (e.g. "bugfix", "feature", "docs")
    pub change_type: String,
}

// --- Helper functions ---

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

// --- MCP Server ---

#[derive(Debug, Clone)]
pub struct PrAgentServer {
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
    templates_dir: PathBuf,
    roots: Vec<PathBuf>,
}

impl PrAgentServer {
    pub fn new(templates_dir: PathBuf, roots: Vec<PathBuf>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            templates_dir,
            roots,
        }
    }
}

#[tool_router(router = tool_router)]
impl PrAgentServer {
    /// Analyze pending changes relative to a base branch.
    /// Returns changed files with statuses, a diff stat, recent commits,
    /// and (optionally) the diff body, truncated to a line cap.
    #[tool(
        description = "Analyze file changes relative to a base branch: changed files, diff stat, recent commits, and optionally the (truncated) diff body"
    )]
    async fn analyze_file_changes(
        &self,
        Parameters(params): Parameters<AnalyzeFileChangesParams>,
    ) -> Result<String, String> {
        let ctx = StaticRoots(self.roots.clone());
        let working_directory = params.working_directory.as_ref().map(PathBuf::from);

        let report = analyzer::analyze(
            &params.base_branch,
            params.include_diff,
            params.max_diff_lines,
            working_directory.as_deref(),
            &ctx,
        )
        .await
        .map_err(|e| e.to_string())?;

        Ok(to_json(&report))
    }

    /// List every known PR template with its content.
    #[tool(
        description = "List available PR description templates with their content; entries that cannot be read carry an error field instead"
    )]
    fn get_pr_template(&self) -> Result<String, String> {
        let records = catalog::list_templates(&self.templates_dir);
        Ok(to_json(&records))
    }

    /// Suggest the best-fitting PR template for a described change.
    #[tool(
        description = "Suggest the best-fitting PR template for a change, with ranked alternatives, reasoning, and a confidence level"
    )]
    fn suggest_templates(
        &self,
        Parameters(params): Parameters<SuggestTemplatesParams>,
    ) -> Result<String, String> {
        let suggestion = suggest::suggest(&params.changes_summary, &params.change_type);
        Ok(to_json(&suggestion))
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for PrAgentServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_instructions(
                "pr-agent MCP server. Provides tools to analyze pending git changes \
                 and suggest pull-request description templates.",
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pr_agent_core::catalog::TEMPLATES;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_analyze_params_defaults() {
        let params: AnalyzeFileChangesParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.base_branch, "main");
        assert!(params.include_diff);
        assert_eq!(params.max_diff_lines, 500);
        assert!(params.working_directory.is_none());
    }

    #[test]
    fn test_analyze_params_overrides() {
        let params: AnalyzeFileChangesParams = serde_json::from_str(
            r#"{"base_branch": "develop", "include_diff": false, "max_diff_lines": 50, "working_directory": "/repos/x"}"#,
        )
        .unwrap();
        assert_eq!(params.base_branch, "develop");
        assert!(!params.include_diff);
        assert_eq!(params.max_diff_lines, 50);
        assert_eq!(params.working_directory.as_deref(), Some("/repos/x"));
    }

    #[test]
    fn test_suggest_params_require_both_fields() {
        assert!(serde_json::from_str::<SuggestTemplatesParams>("{}").is_err());
        let params: SuggestTemplatesParams = serde_json::from_str(
            r#"{"changes_summary": "fixed crash", "change_type": "bug"}"#,
        )
        .unwrap();
        assert_eq!(params.change_type, "bug");
    }

    #[test]
    fn test_to_json_serializes_suggestion() {
        let suggestion = suggest::suggest("fixed a crash on login", "bugfix");
        let json = to_json(&suggestion);
        assert!(json.contains("\"recommended\": \"bug\""));
        assert!(json.contains("\"confidence\": \"high\""));
    }

    #[test]
    fn test_server_creation() {
        let server = PrAgentServer::new(PathBuf::from("templates"), Vec::new());
        let info = server.get_info();
        assert!(info.instructions.is_some());
        assert!(info.instructions.unwrap().contains("pr-agent"));
    }

    #[test]
    fn test_catalog_listing_through_server_dir() {
        let temp_dir = TempDir::new().unwrap();
        for spec in TEMPLATES {
            fs::write(temp_dir.path().join(spec.filename), "## Template\n").unwrap();
        }
        let server = PrAgentServer::new(temp_dir.path().to_path_buf(), Vec::new());
        let json = server.get_pr_template().unwrap();
        let records: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(records.as_array().unwrap().len(), TEMPLATES.len());
        assert_eq!(records[0]["id"], "bug");
    }
}
