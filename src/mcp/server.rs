//! Construe MCP server implementation

use anyhow::Result;
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::config::{ensure_vault, Config};
use crate::core::{concatenate, resolve_context, scan_vault, PropertyValue, Query, TagMatch};

/// Parameters for fetch_context tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct FetchContextParams {
    /// Named context type (e.g. "personal", "work")
    #[schemars(description = "Named context type to load (e.g. personal, work)")]
    pub context_type: String,
}

/// Parameters for fetch_matching_files tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct FetchMatchingFilesParams {
    /// Frontmatter properties that must match exactly
    #[schemars(description = "Frontmatter properties that must match exactly (key to value)")]
    #[serde(default)]
    pub properties: BTreeMap<String, serde_json::Value>,
    /// Tags to filter by
    #[schemars(description = "Tags to filter by")]
    #[serde(default)]
    pub tags: Vec<String>,
    /// Require every listed tag instead of at least one
    #[schemars(description = "Require all listed tags instead of any (default: false)")]
    #[serde(default)]
    pub match_all_tags: bool,
}

/// Construe MCP Service
#[derive(Clone)]
pub struct ContextService {
    config: Config,
    tool_router: ToolRouter<Self>,
}

impl ContextService {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            tool_router: Self::tool_router(),
        }
    }

    fn scan_rendered(&self, query: &Query) -> Result<String, McpError> {
        let outcome = scan_vault(&self.config.vault_path, query)
            .map_err(|e| McpError::internal_error(format!("Scan failed: {}", e), None))?;
        Ok(concatenate(&outcome.matches))
    }
}

#[tool_router]
impl ContextService {
    /// Load notes for a named context type
    #[tool(description = "Fetch personal context notes from the Obsidian vault by named context type. An unrecognized context type returns every note.")]
    async fn fetch_context(
        &self,
        params: Parameters<FetchContextParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = resolve_context(&params.0.context_type, &self.config.contexts);
        let output = self.scan_rendered(&query)?;

        Ok(CallToolResult::success(vec![Content::text(output)]))
    }

    /// Load notes matching explicit property/tag filters
    #[tool(description = "Fetch vault notes whose frontmatter matches the given properties and tags. All filters are optional; no filters returns every note.")]
    async fn fetch_matching_files(
        &self,
        params: Parameters<FetchMatchingFilesParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = build_query(&params.0)?;
        let output = self.scan_rendered(&query)?;

        Ok(CallToolResult::success(vec![Content::text(output)]))
    }

    /// Get vault statistics
    #[tool(description = "Get vault statistics: path, existence, Markdown note count, and configured context types.")]
    async fn vault_info(&self) -> Result<CallToolResult, McpError> {
        let info = crate::core::vault_info(&self.config.vault_path);
        let output = serde_json::json!({
            "vault_path": info.path.display().to_string(),
            "exists": info.exists,
            "is_directory": info.is_directory,
            "note_count": info.note_count,
            "context_types": self.config.contexts.keys().collect::<Vec<_>>(),
        });

        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&output).unwrap_or_default(),
        )]))
    }
}

/// Convert tool arguments into a Query. A property value outside the
/// supported shapes (null, nested object) is the caller's error.
fn build_query(params: &FetchMatchingFilesParams) -> Result<Query, McpError> {
    let mut query = Query::default();
    for (key, value) in &params.properties {
        let converted = PropertyValue::from_json(value).map_err(|e| {
            McpError::invalid_params(format!("Invalid value for property '{}': {}", key, e), None)
        })?;
        query.properties.insert(key.clone(), converted);
    }
    query.tags = params.tags.iter().cloned().collect();
    query.tag_match = if params.match_all_tags {
        TagMatch::All
    } else {
        TagMatch::Any
    };

    Ok(query)
}

#[tool_handler]
impl ServerHandler for ContextService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Construe MCP Server. Loads personal context from an Obsidian vault by filtering notes on frontmatter properties and tags.".to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Run the MCP server
pub async fn run_mcp_server(config: Config) -> Result<()> {
    use tokio::io::{stdin, stdout};

    ensure_vault(&config.vault_path)?;

    let service = ContextService::new(config);
    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
