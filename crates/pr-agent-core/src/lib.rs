//! pr-agent-core: Core library for the pr-agent MCP server.
//!
//! This crate contains all the business logic for change analysis and
//! PR template handling, separated from the MCP server entry point.

pub mod analyzer;
pub mod catalog;
pub mod error;
pub mod git;
pub mod suggest;
pub mod workspace;
