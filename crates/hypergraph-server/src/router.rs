//! Tool-name dispatch.
//!
//! [`Router::handle`] takes a tool name and a JSON argument object, reads
//! the arguments into the tool's request type (serde applies the declared
//! defaults), and runs the matching generator.

use crate::knowledge::KnowledgeBase;
use crate::types::SearchKnowledgeParams;
use hypergraph_codegen::Generator;
use hypergraph_core::{
    AuthenticationRequest, Error, MappingRequest, ProvidersRequest, PublishingRequest,
    QueryRequest, QuickstartRequest, Result, SchemaRequest, SpaceRequest,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Names of every tool the router serves, in catalog order.
pub const TOOL_NAMES: [&str; 9] = [
    "create_space",
    "create_schema",
    "generate_query",
    "setup_authentication",
    "create_mapping",
    "setup_providers",
    "create_publishing_flow",
    "generate_quickstart",
    "search_knowledge",
];

/// A parsed tool invocation.
#[derive(Debug, Clone)]
pub enum ToolRequest {
    /// `create_space`
    Space(SpaceRequest),
    /// `create_schema`
    Schema(SchemaRequest),
    /// `generate_query`
    Query(QueryRequest),
    /// `setup_authentication`
    Authentication(AuthenticationRequest),
    /// `create_mapping`
    Mapping(MappingRequest),
    /// `setup_providers`
    Providers(ProvidersRequest),
    /// `create_publishing_flow`
    Publishing(PublishingRequest),
    /// `generate_quickstart`
    Quickstart(QuickstartRequest),
    /// `search_knowledge`
    SearchKnowledge(SearchKnowledgeParams),
}

impl ToolRequest {
    /// Reads `args` into the request type of `tool`.
    ///
    /// A `null` argument value is treated as an empty object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTool`] for a name outside [`TOOL_NAMES`] and
    /// [`Error::InvalidArgument`] when `args` does not fit the tool.
    pub fn parse(tool: &str, args: Value) -> Result<Self> {
        let args = if args.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            args
        };

        Ok(match tool {
            "create_space" => Self::Space(read(tool, args)?),
            "create_schema" => Self::Schema(read(tool, args)?),
            "generate_query" => Self::Query(read(tool, args)?),
            "setup_authentication" => Self::Authentication(read(tool, args)?),
            "create_mapping" => Self::Mapping(read(tool, args)?),
            "setup_providers" => Self::Providers(read(tool, args)?),
            "create_publishing_flow" => Self::Publishing(read(tool, args)?),
            "generate_quickstart" => Self::Quickstart(read(tool, args)?),
            "search_knowledge" => Self::SearchKnowledge(read(tool, args)?),
            _ => {
                return Err(Error::UnknownTool {
                    name: tool.to_string(),
                });
            }
        })
    }

    /// Tool name of this request.
    #[must_use]
    pub const fn tool_name(&self) -> &'static str {
        match self {
            Self::Space(_) => "create_space",
            Self::Schema(_) => "create_schema",
            Self::Query(_) => "generate_query",
            Self::Authentication(_) => "setup_authentication",
            Self::Mapping(_) => "create_mapping",
            Self::Providers(_) => "setup_providers",
            Self::Publishing(_) => "create_publishing_flow",
            Self::Quickstart(_) => "generate_quickstart",
            Self::SearchKnowledge(_) => "search_knowledge",
        }
    }
}

fn read<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T> {
    serde_json::from_value(args).map_err(|e| Error::InvalidArgument(format!("{tool}: {e}")))
}

/// Dispatches tool requests to the generators and the knowledge base.
///
/// # Examples
///
/// ```
/// use hypergraph_server::{KnowledgeBase, Router};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let router = Router::new(Arc::new(KnowledgeBase::empty())).unwrap();
///
/// let code = router.handle("create_schema", json!({ "entityName": "Event" })).unwrap();
/// assert!(code.contains("export class Event"));
///
/// let err = router.handle("does_not_exist", json!({})).unwrap_err();
/// assert_eq!(err.to_string(), "Unknown tool: does_not_exist");
/// ```
#[derive(Debug)]
pub struct Router {
    generator: Generator,
    knowledge: Arc<KnowledgeBase>,
}

impl Router {
    /// Creates a router over a loaded (or empty) knowledge base.
    ///
    /// # Errors
    ///
    /// Returns an error if the generator templates fail to register.
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Result<Self> {
        Ok(Self {
            generator: Generator::new()?,
            knowledge,
        })
    }

    /// Knowledge base searched by `search_knowledge`.
    #[must_use]
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Parses and runs a tool call by name.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown tool, arguments that do not fit the
    /// tool, or a request the generator rejects.
    pub fn handle(&self, tool: &str, args: Value) -> Result<String> {
        self.dispatch(ToolRequest::parse(tool, args)?)
    }

    /// Runs an already parsed tool request.
    ///
    /// # Errors
    ///
    /// Returns the generator's error when the request violates a domain
    /// invariant.
    pub fn dispatch(&self, request: ToolRequest) -> Result<String> {
        let tool = request.tool_name();
        tracing::debug!(tool, "dispatching tool call");

        let result = match request {
            ToolRequest::Space(r) => self.generator.space(&r),
            ToolRequest::Schema(r) => self.generator.schema(&r),
            ToolRequest::Query(r) => self.generator.query(&r),
            ToolRequest::Authentication(r) => self.generator.authentication(&r),
            ToolRequest::Mapping(r) => self.generator.mapping(&r),
            ToolRequest::Providers(r) => self.generator.providers(&r),
            ToolRequest::Publishing(r) => self.generator.publishing(&r),
            ToolRequest::Quickstart(r) => self.generator.quickstart(&r),
            ToolRequest::SearchKnowledge(p) => Ok(self.knowledge.search(&p.query, p.category)),
        };

        if let Err(e) = &result {
            tracing::debug!(tool, error = %e, "tool call rejected");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn router() -> Router {
        Router::new(Arc::new(KnowledgeBase::from_markdown("Spaces are shared.\n"))).unwrap()
    }

    // ========================================================================
    // Parsing
    // ========================================================================

    #[test]
    fn test_parse_every_tool_name() {
        let minimal = |tool: &str| match tool {
            "create_space" => json!({ "spaceName": "Club" }),
            "create_schema" | "generate_query" => json!({ "entityName": "Event" }),
            "create_mapping" => json!({ "entities": [] }),
            "create_publishing_flow" => json!({ "entityType": "Post" }),
            "search_knowledge" => json!({ "query": "spaces" }),
            _ => json!({}),
        };
        for tool in TOOL_NAMES {
            let request = ToolRequest::parse(tool, minimal(tool)).unwrap();
            assert_eq!(request.tool_name(), tool);
        }
    }

    #[test]
    fn test_parse_unknown_tool() {
        let err = ToolRequest::parse("get_documentation", json!({})).unwrap_err();
        assert!(err.is_unknown_tool());
    }

    #[test]
    fn test_parse_missing_required_field() {
        let err = ToolRequest::parse("create_schema", json!({})).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("create_schema"));
        assert!(err.to_string().contains("entityName"));
    }

    #[test]
    fn test_null_arguments_use_defaults() {
        let request = ToolRequest::parse("generate_quickstart", Value::Null).unwrap();
        let ToolRequest::Quickstart(quickstart) = request else {
            panic!("expected quickstart request");
        };
        assert_eq!(quickstart.project_name, "my-hypergraph-app");
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    #[test]
    fn test_handle_unknown_tool() {
        let err = router().handle("does_not_exist", json!({})).unwrap_err();
        assert_eq!(err.to_string(), "Unknown tool: does_not_exist");
    }

    #[test]
    fn test_handle_search() {
        let reply = router()
            .handle("search_knowledge", json!({ "query": "spaces" }))
            .unwrap();
        assert_eq!(reply, "Found 1 relevant entries:\n\nSpaces are shared.");
    }

    #[test]
    fn test_handle_validation_error() {
        let err = router()
            .handle("create_publishing_flow", json!({ "entityType": "Post", "batchSize": 0 }))
            .unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_handle_matches_dispatch() {
        let router = router();
        let args = json!({ "entityName": "Event", "queryType": "both" });
        let by_name = router.handle("generate_query", args.clone()).unwrap();
        let parsed = ToolRequest::parse("generate_query", args).unwrap();
        assert_eq!(by_name, router.dispatch(parsed).unwrap());
    }
}
