//! Parameter types owned by the server.
//!
//! Generator parameters are the request structs of `hypergraph_core`; this
//! module adds the ones that only exist at the MCP surface.

use hypergraph_core::KnowledgeCategory;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for `search_knowledge`.
///
/// # Examples
///
/// ```
/// use hypergraph_core::KnowledgeCategory;
/// use hypergraph_server::types::SearchKnowledgeParams;
///
/// let params: SearchKnowledgeParams =
///     serde_json::from_value(serde_json::json!({ "query": "spaces" })).unwrap();
/// assert_eq!(params.category, KnowledgeCategory::All);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchKnowledgeParams {
    /// Search query for the knowledge base
    pub query: String,

    /// Category to search within
    #[serde(default)]
    pub category: KnowledgeCategory,
}
