//! MCP Server for Obsidian vault context
//!
//! Exposes frontmatter filtering to AI clients over stdio.

mod server;

pub use server::run_mcp_server;
