//! One entry point per generation tool.

use crate::TemplateEngine;
use crate::{auth, mapping, providers, publishing, query, quickstart, schema, space};
use hypergraph_core::{
    AuthenticationRequest, MappingRequest, ProvidersRequest, PublishingRequest, QueryRequest,
    QuickstartRequest, Result, SchemaRequest, SpaceRequest,
};

/// Facade over every generator, owning the template engine they share.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`; one instance can serve concurrent
/// requests.
///
/// # Examples
///
/// ```
/// use hypergraph_codegen::Generator;
/// use hypergraph_core::SpaceRequest;
///
/// let generator = Generator::new().unwrap();
/// let request: SpaceRequest =
///     serde_json::from_value(serde_json::json!({ "spaceName": "Team Notes" })).unwrap();
/// let code = generator.space(&request).unwrap();
/// assert!(code.contains("TeamNotesSpace"));
/// ```
#[derive(Debug)]
pub struct Generator {
    engine: TemplateEngine<'static>,
}

impl Generator {
    /// Creates a generator with all built-in templates registered.
    ///
    /// # Errors
    ///
    /// Returns a template error if a built-in template fails to parse.
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
        })
    }

    /// `create_schema`: entity class, optional validation and example usage.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed entity.
    #[allow(clippy::unused_self)]
    pub fn schema(&self, request: &SchemaRequest) -> Result<String> {
        schema::generate(request)
    }

    /// `create_mapping`: knowledge graph mapping configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty or malformed entity list.
    #[allow(clippy::unused_self)]
    pub fn mapping(&self, request: &MappingRequest) -> Result<String> {
        mapping::generate(request)
    }

    /// `generate_query`: query components, hooks or manager classes.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-identifier entity or filter
    /// property.
    #[allow(clippy::unused_self)]
    pub fn query(&self, request: &QueryRequest) -> Result<String> {
        query::generate(request)
    }

    /// `setup_providers`: provider wrappers or a manager class.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad application name, or a template
    /// error.
    pub fn providers(&self, request: &ProvidersRequest) -> Result<String> {
        providers::generate(&self.engine, request)
    }

    /// `create_publishing_flow`: a publishing component or manager.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad arguments, or a template error.
    pub fn publishing(&self, request: &PublishingRequest) -> Result<String> {
        publishing::generate(&self.engine, request)
    }

    /// `setup_authentication`: Geo Connect or custom authentication.
    ///
    /// # Errors
    ///
    /// Returns a template error if a built-in template fails to render.
    pub fn authentication(&self, request: &AuthenticationRequest) -> Result<String> {
        auth::generate(&self.engine, request)
    }

    /// `generate_quickstart`: a complete starter project as markdown.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad arguments, or a template error.
    pub fn quickstart(&self, request: &QuickstartRequest) -> Result<String> {
        quickstart::generate(&self.engine, request)
    }

    /// `create_space`: space creation component or manager.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad space name, or a template error.
    pub fn space(&self, request: &SpaceRequest) -> Result<String> {
        space::generate(&self.engine, request)
    }
}
