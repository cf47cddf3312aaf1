//! MCP server implementation for Hypergraph code generation.
//!
//! The `HypergraphService` publishes one tool per generator plus
//! `search_knowledge`. Every tool returns its artifact as a single text
//! content item; engine errors come back as error results with the text
//! `Error: {message}` so the host process never fails on a bad request.
//!
//! Incoming `tools/call` requests are dispatched by name through
//! [`Router::handle`], so malformed arguments also come back as error text
//! rather than a protocol error. The typed tool methods only describe the
//! catalog and its input schemas.

use crate::router::{Router, ToolRequest};
use crate::types::SearchKnowledgeParams;
use hypergraph_core::{
    AuthenticationRequest, MappingRequest, ProvidersRequest, PublishingRequest, QueryRequest,
    QuickstartRequest, Result, SchemaRequest, SpaceRequest,
};
use rmcp::handler::server::ServerHandler;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, tool, tool_router};
use serde_json::Value;
use std::future::{Future, ready};
use std::sync::Arc;

/// MCP server for Hypergraph code generation.
///
/// Cloning is cheap; clones share the router.
///
/// # Examples
///
/// ```no_run
/// use hypergraph_server::{HypergraphService, KnowledgeBase, Router};
/// use rmcp::ServiceExt;
/// use rmcp::transport::stdio;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let router = Router::new(Arc::new(KnowledgeBase::empty()))?;
/// let service = HypergraphService::new(Arc::new(router)).serve(stdio()).await?;
/// service.waiting().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HypergraphService {
    /// Dispatch to generators and the knowledge base
    router: Arc<Router>,

    /// Tool router for MCP protocol
    tool_router: ToolRouter<Self>,
}

impl HypergraphService {
    /// Creates a service over `router`.
    #[must_use]
    pub fn new(router: Arc<Router>) -> Self {
        Self {
            router,
            tool_router: Self::tool_router(),
        }
    }

    /// Runs a tool by name with raw JSON arguments.
    ///
    /// Unknown tools and malformed arguments produce error results, the
    /// same as generator failures.
    #[must_use]
    pub fn call(&self, tool: &str, args: Value) -> CallToolResult {
        into_call_result(tool, self.router.handle(tool, args))
    }

    /// Answers a `tools/call` request.
    fn call_request(&self, request: CallToolRequestParam) -> CallToolResult {
        let args = request.arguments.map_or(Value::Null, Value::Object);
        self.call(&request.name, args)
    }

    fn respond(&self, request: ToolRequest) -> CallToolResult {
        let tool = request.tool_name();
        into_call_result(tool, self.router.dispatch(request))
    }
}

#[tool_router]
impl HypergraphService {
    /// Code for creating and managing a space.
    #[tool(
        description = "Generate code for creating and managing Hypergraph spaces (public/private)"
    )]
    fn create_space(&self, Parameters(params): Parameters<SpaceRequest>) -> CallToolResult {
        self.respond(ToolRequest::Space(params))
    }

    /// Entity class with optional validation and example usage.
    #[tool(
        description = "Generate Hypergraph schema definitions with entities, types, and relations"
    )]
    fn create_schema(&self, Parameters(params): Parameters<SchemaRequest>) -> CallToolResult {
        self.respond(ToolRequest::Schema(params))
    }

    #[tool(description = "Generate Hypergraph query code for public and private data")]
    fn generate_query(&self, Parameters(params): Parameters<QueryRequest>) -> CallToolResult {
        self.respond(ToolRequest::Query(params))
    }

    #[tool(description = "Generate Hypergraph authentication setup with Geo Connect")]
    fn setup_authentication(
        &self,
        Parameters(params): Parameters<AuthenticationRequest>,
    ) -> CallToolResult {
        self.respond(ToolRequest::Authentication(params))
    }

    #[tool(
        description = "Generate Hypergraph mapping configuration for connecting to the public Knowledge Graph"
    )]
    fn create_mapping(&self, Parameters(params): Parameters<MappingRequest>) -> CallToolResult {
        self.respond(ToolRequest::Mapping(params))
    }

    #[tool(description = "Generate Hypergraph provider components and hooks setup")]
    fn setup_providers(&self, Parameters(params): Parameters<ProvidersRequest>) -> CallToolResult {
        self.respond(ToolRequest::Providers(params))
    }

    /// Publishing workflow for one of four strategies.
    #[tool(description = "Generate Hypergraph publishing workflow for public data sharing")]
    fn create_publishing_flow(
        &self,
        Parameters(params): Parameters<PublishingRequest>,
    ) -> CallToolResult {
        self.respond(ToolRequest::Publishing(params))
    }

    /// Markdown document describing every file of a starter project.
    #[tool(description = "Generate complete quickstart project template for Hypergraph")]
    fn generate_quickstart(
        &self,
        Parameters(params): Parameters<QuickstartRequest>,
    ) -> CallToolResult {
        self.respond(ToolRequest::Quickstart(params))
    }

    #[tool(description = "Search the Hypergraph knowledge base for specific information")]
    fn search_knowledge(
        &self,
        Parameters(params): Parameters<SearchKnowledgeParams>,
    ) -> CallToolResult {
        self.respond(ToolRequest::SearchKnowledge(params))
    }
}

impl ServerHandler for HypergraphService {
    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = std::result::Result<CallToolResult, McpError>> + Send + '_ {
        ready(Ok(self.call_request(request)))
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = std::result::Result<ListToolsResult, McpError>> + Send + '_ {
        ready(Ok(ListToolsResult::with_all_items(self.tool_router.list_all())))
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "Generate Hypergraph application code. Use create_schema and create_mapping \
                 for the data model, generate_query and create_publishing_flow for data \
                 access, setup_providers, setup_authentication and create_space for app \
                 wiring, generate_quickstart for a starter project, and search_knowledge \
                 to look up documentation."
                    .to_string(),
            )
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Wraps an artifact in a text result, or an error in an error-text result.
fn into_call_result(tool: &str, result: Result<String>) -> CallToolResult {
    match result {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => {
            tracing::warn!(tool, error = %e, "tool call failed");
            CallToolResult::error(vec![Content::text(format!("Error: {e}"))])
        }
    }
}
