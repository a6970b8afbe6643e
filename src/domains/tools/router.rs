//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Every route delegates to [`ToolRegistry::dispatch`], so the stdio
//! transport and the HTTP transport share one dispatch path.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter};

use super::registry::ToolRegistry;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: Arc<ToolRegistry>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .catalogue()
        .into_iter()
        .fold(ToolRouter::new(), |router, tool| {
            let name = tool.name.to_string();
            let registry = registry.clone();
            router.with_route(ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
                let args = ctx.arguments.clone().unwrap_or_default();
                let registry = registry.clone();
                let name = name.clone();
                async move { Ok(registry.dispatch(&name, args).await) }.boxed()
            }))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::schema::SchemaSource;
    use crate::fmp::testing::{StubTransport, stub_client};

    struct TestServer {}

    fn test_registry() -> Arc<ToolRegistry> {
        let stub = Arc::new(StubTransport::new());
        Arc::new(ToolRegistry::new(stub_client(&stub), &SchemaSource::default()).unwrap())
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_registry());
        let tools = router.list_all();
        assert_eq!(tools.len(), 13);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"get_company_profile"));
        assert!(names.contains(&"get_historical_prices"));
        assert!(names.contains(&"get_market_indices"));
        assert!(names.contains(&"get_enhanced_dcf_analysis"));
    }

    #[test]
    fn test_registry_matches_router() {
        // Ensure registry and router have the same tools
        let registry = test_registry();
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(registry);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
