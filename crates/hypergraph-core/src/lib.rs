//! Core types, request shapes, and errors for Hypergraph code generation.
//!
//! This crate holds everything the generator and the MCP server share:
//!
//! - Tag enums with total parsing ([`PropertyKind`], [`Flavor`], [`Strategy`], ...)
//! - Entity, relation, filter, and mapping descriptions
//! - One typed argument struct per tool, carrying the tool's defaults
//! - The [`Error`] hierarchy and [`Result`] alias
//! - Server configuration

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod kinds;
mod request;
mod spec;

pub use config::{
    DEFAULT_KNOWLEDGE_PATH, DEFAULT_LOG_FILTER, LogFormat, ServerConfig, ServerConfigBuilder,
    default_config_path,
};
pub use error::{Error, Result};
pub use kinds::{
    AuthMethod, Cardinality, FilterOperator, Flavor, KnowledgeCategory, ProjectFramework,
    PropertyKind, ProviderType, QueryMode, SpaceType, Strategy,
};
pub use request::{
    AuthenticationRequest, MappingRequest, ProvidersRequest, PublishingRequest, QueryRequest,
    QuickstartRequest, SchemaRequest, SpaceRequest,
};
pub use spec::{
    EntitySpec, FilterSpec, MappingEntity, PropertyMapping, PropertySpec, RelationMapping, RelationSpec,
    capitalize, check_identifier, is_identifier,
};
