//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools, built once and immutable afterwards
//! - Dispatch by name, used by every transport
//! - Tool metadata for listing
//!
//! Dispatch never fails: unknown names, tool errors and panics all come back
//! as text results.

use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use tracing::{error, info, warn};

use crate::domains::schema::SchemaSource;
use crate::fmp::FmpClient;

use super::definitions::all_tools;
use super::error::ToolError;
use super::handlers::FinancialTool;

struct RegisteredTool {
    tool: Arc<dyn FinancialTool>,
    input_schema: Arc<JsonObject>,
}

/// Tool registry - owns every tool and its input schema.
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Register the full financial catalogue against `client`.
    pub fn new(client: Arc<FmpClient>, schemas: &SchemaSource) -> Result<Self, ToolError> {
        Self::from_tools(all_tools(client), schemas)
    }

    /// Register an explicit list of tools.
    ///
    /// Fails on a repeated name, on a tool without a schema definition, or
    /// when a definition cannot be read.
    pub fn from_tools(
        tools: Vec<Arc<dyn FinancialTool>>,
        schemas: &SchemaSource,
    ) -> Result<Self, ToolError> {
        let mut registry = Self {
            tools: Vec::with_capacity(tools.len()),
            index: HashMap::with_capacity(tools.len()),
        };

        for tool in tools {
            let name = tool.name();
            if registry.index.contains_key(name) {
                return Err(ToolError::DuplicateTool(name.to_string()));
            }

            let input_schema = schemas
                .service_schema(name)?
                .ok_or_else(|| ToolError::MissingSchema(name.to_string()))?;

            registry.index.insert(name, registry.tools.len());
            registry.tools.push(RegisteredTool {
                tool,
                input_schema: Arc::new(input_schema),
            });
            info!("Registered tool: {}", name);
        }

        Ok(registry)
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.tool.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for tool listings on every
    /// transport.
    pub fn catalogue(&self) -> Vec<Tool> {
        self.tools.iter().map(Self::to_tool).collect()
    }

    /// Metadata for a single tool.
    pub fn tool(&self, name: &str) -> Option<Tool> {
        self.index.get(name).map(|&i| Self::to_tool(&self.tools[i]))
    }

    fn to_tool(entry: &RegisteredTool) -> Tool {
        Tool {
            name: entry.tool.name().into(),
            description: Some(entry.tool.description().into()),
            input_schema: entry.input_schema.clone(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Run the named tool.
    ///
    /// Tool errors become `Error: {message}`; a panicking tool is contained
    /// and reported the same way.
    pub async fn dispatch(&self, name: &str, arguments: JsonObject) -> CallToolResult {
        let Some(&i) = self.index.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return CallToolResult::error(vec![Content::text(format!("Unknown tool: {name}"))]);
        };

        info!("Calling tool: {}", name);
        let tool = &self.tools[i].tool;
        match AssertUnwindSafe(tool.execute(arguments)).catch_unwind().await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                warn!("Tool {} failed: {}", name, e);
                CallToolResult::error(vec![Content::text(format!("Error: {e}"))])
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!("Tool {} panicked: {}", name, message);
                CallToolResult::error(vec![Content::text(format!("Error: {message}"))])
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "tool panicked".to_string()
    }
}
