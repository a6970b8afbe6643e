//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to domain-specific services.
//!
//! Tools are routed through an rmcp `ToolRouter` built from the
//! [`ToolRegistry`]; the HTTP transport calls the same registry through the
//! JSON helpers below, so both transports share one catalogue and one
//! dispatch path.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error;
use crate::domains::{
    prompts::{PromptError, PromptService},
    resources::{ResourceError, ResourceService},
    tools::{ToolRegistry, build_tool_router},
};
use crate::fmp::FmpClient;

const INSTRUCTIONS: &str = "Financial data from Financial Modeling Prep: company profiles, \
statements, quotes, prices, ratios and technical indicators, plus derived analysis \
(DCF, Altman Z-Score, Piotroski F-Score). Tools that take a symbol expect a ticker such as AAPL.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Every financial tool, keyed by name.
    registry: Arc<ToolRegistry>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Service for handling prompt-related requests.
    prompt_service: Arc<PromptService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a server talking to the real upstream API.
    ///
    /// Fails when the API key is missing or a definition cannot be loaded.
    pub fn new(config: Config) -> error::Result<Self> {
        let client = Arc::new(config.fmp.client()?);
        Self::with_client(config, client)
    }

    /// Create a server over an already-built gateway client.
    pub fn with_client(config: Config, client: Arc<FmpClient>) -> error::Result<Self> {
        let schemas = config.schema.source();

        let registry = Arc::new(ToolRegistry::new(client.clone(), &schemas)?);
        let resource_service = Arc::new(ResourceService::from_schema(&schemas, client)?);
        let prompt_service = Arc::new(PromptService::from_schema(&schemas)?);

        info!(
            "Registered {} tools, {} resources, {} prompts",
            registry.len(),
            resource_service.list_resources().len(),
            prompt_service.list_prompts().len()
        );

        Ok(Self {
            tool_router: build_tool_router::<Self>(registry.clone()),
            config: Arc::new(config),
            registry,
            resource_service,
            prompt_service,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<Value> {
        self.registry
            .catalogue()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Only malformed requests are errors; tool failures are part of the
    /// returned result.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<Value, String> {
        let arguments = match arguments {
            Value::Object(map) => map,
            Value::Null => JsonObject::new(),
            _ => return Err("Tool arguments must be an object".to_string()),
        };

        let result = self.registry.dispatch(name, arguments).await;
        serde_json::to_value(result).map_err(|e| e.to_string())
    }

    /// List all available resources (for HTTP transport).
    pub fn list_resources(&self) -> Vec<Value> {
        self.resource_service
            .list_resources()
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.raw.uri,
                    "name": r.raw.name,
                    "description": r.raw.description,
                    "mimeType": r.raw.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI (for HTTP transport).
    pub async fn read_resource(&self, uri: &str) -> Result<Value, String> {
        match self.resource_service.read_resource(uri).await {
            Ok(result) => Ok(serde_json::json!({
                "contents": result.contents
            })),
            Err(e) => Err(e.to_string()),
        }
    }

    /// List all available prompts (for HTTP transport).
    pub fn list_prompts(&self) -> Vec<Value> {
        self.prompt_service
            .list_prompts()
            .into_iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.name,
                    "description": p.description,
                    "arguments": p.arguments
                })
            })
            .collect()
    }

    /// Get a prompt by name (for HTTP transport).
    pub fn get_prompt(
        &self,
        name: &str,
        arguments: Option<Value>,
    ) -> Result<Value, String> {
        let arguments = arguments.and_then(|v| v.as_object().map(string_arguments));

        match self.prompt_service.get_prompt(name, arguments) {
            Ok(result) => Ok(serde_json::json!({
                "description": result.description,
                "messages": result.messages
            })),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Prompt arguments as strings; non-string values are dropped.
fn string_arguments(map: &JsonObject) -> HashMap<String, String> {
    map.iter()
        .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
        .collect()
}

fn resource_error(e: ResourceError) -> McpError {
    match e {
        ResourceError::NotFound(_) => McpError::resource_not_found(e.to_string(), None),
        _ => McpError::internal_error(e.to_string(), None),
    }
}

fn prompt_error(e: PromptError) -> McpError {
    match e {
        PromptError::NotFound(_) | PromptError::MissingArgument(_) => {
            McpError::invalid_params(e.to_string(), None)
        }
        _ => McpError::internal_error(e.to_string(), None),
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                title: Some("Financial Modeling Prep".to_string()),
                website_url: None,
                icons: None,
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        Ok(ListResourcesResult {
            resources: self.resource_service.list_resources(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(resource_error)
    }

    #[instrument(skip(self, _context))]
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        info!("Listing prompts");
        Ok(ListPromptsResult {
            prompts: self.prompt_service.list_prompts(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        info!("Getting prompt: {}", request.name);
        let arguments = request.arguments.as_ref().map(string_arguments);
        self.prompt_service
            .get_prompt(&request.name, arguments)
            .map_err(prompt_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;
    use crate::fmp::testing::{StubTransport, stub_client};
    use serde_json::json;

    fn server(stub: &Arc<StubTransport>) -> McpServer {
        McpServer::with_client(Config::default(), stub_client(stub)).unwrap()
    }

    #[test]
    fn test_missing_api_key_fails_startup() {
        let err = McpServer::new(Config::default()).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_server_info() {
        let server = server(&Arc::new(StubTransport::new()));
        let info = server.get_info();

        assert_eq!(info.server_info.name, "financial-modeling-prep");
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.capabilities.prompts.is_some());
    }

    #[test]
    fn test_tool_listing_matches_router() {
        let server = server(&Arc::new(StubTransport::new()));
        let listed = server.list_tools();
        let routed = server.tool_router.list_all();

        assert_eq!(listed.len(), 13);
        assert_eq!(listed.len(), routed.len());
        assert_eq!(listed[0]["name"], "get_company_profile");
        assert_eq!(listed[0]["inputSchema"]["type"], "object");
    }

    #[tokio::test]
    async fn test_call_tool_returns_result_json() {
        let stub = Arc::new(StubTransport::new().route(
            "/quote/",
            json!([{"symbol": "AAPL", "name": "Apple Inc.", "price": 150.25}]),
        ));
        let server = server(&stub);

        let result = server
            .call_tool("get_stock_quote", json!({"symbol": "AAPL"}))
            .await
            .unwrap();

        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("$150.25"));
    }

    #[tokio::test]
    async fn test_call_tool_rejects_non_object_arguments() {
        let server = server(&Arc::new(StubTransport::new()));
        let err = server
            .call_tool("get_stock_quote", json!(["AAPL"]))
            .await
            .unwrap_err();
        assert_eq!(err, "Tool arguments must be an object");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_a_result_not_a_protocol_error() {
        let server = server(&Arc::new(StubTransport::new()));
        let result = server.call_tool("get_weather", Value::Null).await.unwrap();
        assert_eq!(result["content"][0]["text"], "Unknown tool: get_weather");
        assert_eq!(result["isError"], true);
    }

    #[test]
    fn test_resource_and_prompt_listings() {
        let server = server(&Arc::new(StubTransport::new()));

        let resources = server.list_resources();
        assert_eq!(resources.len(), 3);
        assert_eq!(resources[0]["uri"], "financial://market/indices");

        let prompts = server.list_prompts();
        assert_eq!(prompts.len(), 3);
        assert_eq!(prompts[0]["name"], "analyze_company");
    }

    #[test]
    fn test_get_prompt_ignores_non_string_arguments() {
        let server = server(&Arc::new(StubTransport::new()));

        let err = server
            .get_prompt("analyze_company", Some(json!({"symbol": 42})))
            .unwrap_err();
        assert_eq!(err, "Missing required argument: symbol");

        let ok = server
            .get_prompt("analyze_company", Some(json!({"symbol": "NVDA"})))
            .unwrap();
        assert!(ok["messages"][0]["content"]["text"]
            .as_str()
            .unwrap()
            .contains("Analyze NVDA"));
    }

    #[test]
    fn test_error_mapping() {
        let not_found = resource_error(ResourceError::not_found("financial://x"));
        assert_eq!(not_found.code, ErrorCode::RESOURCE_NOT_FOUND);

        let missing = prompt_error(PromptError::missing_argument("symbol"));
        assert_eq!(missing.code, ErrorCode::INVALID_PARAMS);

        let template = prompt_error(PromptError::template("Missing {{/if}} tag"));
        assert_eq!(template.code, ErrorCode::INTERNAL_ERROR);
    }
}
