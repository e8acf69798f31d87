//! pr-agent-mcp: MCP server for PR preparation.
//!
//! Exposes git change analysis and PR template tools for AI assistants.

mod tools;

use std::path::PathBuf;

use clap::Parser;
use rmcp::{transport::stdio, ServiceExt};

#[derive(Parser, Debug)]
#[command(name = "pr-agent-mcp", version, about = "MCP server for PR change analysis and template suggestion")]
struct Args {
    /// Directory containing the PR template markdown files
    #[arg(long, default_value = "templates")]
    templates_dir: PathBuf,

    /// Workspace root hint from the host; may be repeated, first one wins
    #[arg(long = "root")]
    roots: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let server = tools::PrAgentServer::new(args.templates_dir, args.roots);
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}
