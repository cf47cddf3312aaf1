//! MCP server library for Hypergraph code generation.
//!
//! Exposes the generators of `hypergraph-codegen` as MCP tools over stdio,
//! together with a substring search over a markdown knowledge corpus.
//!
//! # Architecture
//!
//! - [`KnowledgeBase`] holds the corpus, loaded once at startup and shared
//!   read-only.
//! - [`Router`] maps a tool name and JSON arguments to a generator call.
//! - [`HypergraphService`] publishes the tool catalog through `rmcp` and
//!   turns every failure into an `Error: {message}` text result.
//!
//! # Tools
//!
//! | Tool | Output |
//! |------|--------|
//! | `create_space` | Space component or manager class |
//! | `create_schema` | Entity class, validation, examples |
//! | `generate_query` | Query component, hooks or manager |
//! | `setup_authentication` | Geo Connect or custom auth flow |
//! | `create_mapping` | Knowledge graph mapping configuration |
//! | `setup_providers` | Provider components and hooks |
//! | `create_publishing_flow` | Publishing workflow per strategy |
//! | `generate_quickstart` | Starter project as a markdown document |
//! | `search_knowledge` | Matching corpus lines |
//!
//! # Examples
//!
//! ```
//! use hypergraph_server::{HypergraphService, KnowledgeBase, Router};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let router = Router::new(Arc::new(KnowledgeBase::empty())).unwrap();
//! let service = HypergraphService::new(Arc::new(router));
//!
//! let result = service.call("search_knowledge", json!({ "query": "spaces" }));
//! assert_eq!(
//!     result.content[0].as_text().unwrap().text,
//!     "Knowledge base not loaded"
//! );
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod knowledge;
pub mod router;
pub mod service;
pub mod types;

pub use knowledge::KnowledgeBase;
pub use router::{Router, TOOL_NAMES, ToolRequest};
pub use service::HypergraphService;
pub use types::SearchKnowledgeParams;
