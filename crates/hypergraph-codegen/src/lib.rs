//! Code generation for Hypergraph applications.
//!
//! Turns typed tool requests from `hypergraph-core` into TypeScript, React
//! and JavaScript source text. Every generator is a pure function of its
//! request: identical requests produce byte-identical output.
//!
//! Small varying fragments are built in Rust; long fixed scaffolding lives in
//! Handlebars templates embedded in the binary.
//!
//! # Examples
//!
//! ```
//! use hypergraph_codegen::Generator;
//! use hypergraph_core::QueryRequest;
//!
//! let generator = Generator::new().unwrap();
//! let request: QueryRequest =
//!     serde_json::from_value(serde_json::json!({ "entityName": "Event" })).unwrap();
//! let code = generator.query(&request).unwrap();
//! assert!(code.contains("useQuery(Event"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod auth;
pub mod common;
pub mod mapping;
pub mod providers;
pub mod publishing;
pub mod query;
pub mod quickstart;
pub mod schema;
pub mod space;

mod generator;
mod template_engine;

pub use generator::Generator;
pub use template_engine::TemplateEngine;
