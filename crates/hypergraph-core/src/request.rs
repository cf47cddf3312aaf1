//! Typed argument objects for each generation tool.
//!
//! Each struct is the declarative argument shape a tool publishes: required
//! fields have no `#[serde(default)]`, optional ones carry their documented
//! default. Deserializing an argument object therefore applies every default
//! in one step.

use crate::kinds::{
    AuthMethod, Flavor, ProjectFramework, ProviderType, QueryMode, SpaceType, Strategy,
};
use crate::spec::{
    EntitySpec, FilterSpec, MappingEntity, PropertySpec, RelationSpec, capitalize,
    check_identifier,
};
use crate::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

const fn default_batch_size() -> usize {
    10
}

fn default_app_name() -> String {
    "MyHypergraphApp".to_string()
}

fn default_project_name() -> String {
    "my-hypergraph-app".to_string()
}

fn default_entity_types() -> Vec<String> {
    vec!["Event".to_string(), "User".to_string()]
}

// ============================================================================
// create_schema
// ============================================================================

/// Arguments for `create_schema`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchemaRequest {
    /// Name of the entity (e.g. Event, User, Product)
    pub entity_name: String,

    /// Properties of the entity
    #[serde(default)]
    pub properties: Vec<PropertySpec>,

    /// Relations to other entities
    #[serde(default)]
    pub relations: Vec<RelationSpec>,

    /// Include validation helpers
    #[serde(default = "default_true")]
    pub include_validation: bool,

    /// Generate example usage code
    #[serde(default = "default_true")]
    pub generate_example: bool,
}

impl SchemaRequest {
    /// Builds the validated entity, with its name capitalized.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the entity violates its invariants.
    pub fn entity(&self) -> Result<EntitySpec> {
        EntitySpec::new(
            capitalize(self.entity_name.trim()),
            self.properties.clone(),
            self.relations.clone(),
        )
    }
}

// ============================================================================
// create_mapping
// ============================================================================

/// Arguments for `create_mapping`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MappingRequest {
    /// Entities to map onto the public knowledge graph
    pub entities: Vec<MappingEntity>,

    /// Generate example usage code
    #[serde(default = "default_true")]
    pub generate_example: bool,

    /// Include mapping validation helpers
    #[serde(default = "default_true")]
    pub include_validation: bool,
}

impl MappingRequest {
    /// Checks every entity.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the list is empty or an entity is
    /// malformed.
    pub fn validate(&self) -> Result<()> {
        if self.entities.is_empty() {
            return Err(Error::validation("entities", "at least one entity is required"));
        }
        self.entities.iter().try_for_each(MappingEntity::validate)
    }
}

// ============================================================================
// generate_query
// ============================================================================

/// Arguments for `generate_query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    /// Entity type to query
    pub entity_name: String,

    /// Query private data, public data, or both
    #[serde(default)]
    pub query_type: QueryMode,

    /// Include related entities in the query
    #[serde(default)]
    pub include_relations: bool,

    /// Query filters
    #[serde(default)]
    pub filters: Vec<FilterSpec>,

    /// Specific space ID to query
    #[serde(default)]
    pub space_id: Option<String>,

    /// Output flavor
    #[serde(default)]
    pub framework: Flavor,

    /// Include usage examples
    #[serde(default = "default_true")]
    pub include_examples: bool,
}

impl QueryRequest {
    /// Returns the validated entity name.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name or a filter property is not an
    /// identifier.
    pub fn entity_name(&self) -> Result<String> {
        let name = self.entity_name.trim();
        check_identifier("entityName", name)?;
        for filter in &self.filters {
            check_identifier("filters.property", &filter.property)?;
        }
        Ok(name.to_string())
    }
}

// ============================================================================
// setup_providers
// ============================================================================

/// Arguments for `setup_providers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProvidersRequest {
    /// Provider layers to generate
    #[serde(default)]
    pub provider_type: ProviderType,

    /// Include authentication handling
    #[serde(default = "default_true")]
    pub include_auth: bool,

    /// Include custom hooks
    #[serde(default = "default_true")]
    pub include_custom_hooks: bool,

    /// Application name used for generated identifiers
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Output flavor (react or typescript)
    #[serde(default)]
    pub framework: Flavor,
}

impl Default for ProvidersRequest {
    fn default() -> Self {
        Self {
            provider_type: ProviderType::default(),
            include_auth: true,
            include_custom_hooks: true,
            app_name: default_app_name(),
            framework: Flavor::default(),
        }
    }
}

impl ProvidersRequest {
    /// Returns the application name as an identifier.
    ///
    /// Whitespace is removed so "My App" becomes `MyApp`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the result is not an identifier.
    pub fn app_identifier(&self) -> Result<String> {
        let ident: String = self.app_name.split_whitespace().collect();
        check_identifier("appName", &ident)?;
        Ok(ident)
    }
}

// ============================================================================
// create_publishing_flow
// ============================================================================

/// Arguments for `create_publishing_flow`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishingRequest {
    /// Entity type being published
    pub entity_type: String,

    /// Publishing strategy
    #[serde(default)]
    pub publishing_strategy: Strategy,

    /// Validate data before publishing
    #[serde(default = "default_true")]
    pub include_validation: bool,

    /// Preview data before publishing
    #[serde(default = "default_true")]
    pub include_preview: bool,

    /// Output flavor
    #[serde(default)]
    pub framework: Flavor,

    /// Items per chunk for batch publishing
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Expected queue length; adds a chunk plan to batch output
    #[serde(default)]
    pub queue_length: Option<usize>,
}

impl PublishingRequest {
    /// Returns the validated entity type name.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-identifier entity type or a
    /// zero batch size.
    pub fn entity_type(&self) -> Result<String> {
        let name = self.entity_type.trim();
        check_identifier("entityType", name)?;
        if self.batch_size == 0 {
            return Err(Error::validation("batchSize", "must be at least 1"));
        }
        Ok(name.to_string())
    }
}

// ============================================================================
// setup_authentication
// ============================================================================

/// Arguments for `setup_authentication`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationRequest {
    /// Authentication method
    #[serde(default)]
    pub auth_method: AuthMethod,

    /// Output flavor
    #[serde(default)]
    pub framework: Flavor,

    /// Include redirect handling
    #[serde(default = "default_true")]
    pub include_redirect: bool,

    /// Include comprehensive error handling
    #[serde(default = "default_true")]
    pub include_error_handling: bool,

    /// Custom domain for the redirect URL
    #[serde(default)]
    pub custom_domain: Option<String>,
}

// ============================================================================
// generate_quickstart
// ============================================================================

/// Arguments for `generate_quickstart`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuickstartRequest {
    /// Name of the project
    #[serde(default = "default_project_name")]
    pub project_name: String,

    /// Framework template to generate
    #[serde(default)]
    pub framework: ProjectFramework,

    /// Entity types to include
    #[serde(default = "default_entity_types")]
    pub entity_types: Vec<String>,

    /// Include authentication setup
    #[serde(default = "default_true")]
    pub include_auth: bool,

    /// Include example components and data
    #[serde(default = "default_true")]
    pub include_examples: bool,

    /// Use TypeScript
    #[serde(default = "default_true")]
    pub use_type_script: bool,
}

impl Default for QuickstartRequest {
    fn default() -> Self {
        Self {
            project_name: default_project_name(),
            framework: ProjectFramework::default(),
            entity_types: default_entity_types(),
            include_auth: true,
            include_examples: true,
            use_type_script: true,
        }
    }
}

impl QuickstartRequest {
    /// Returns the capitalized entity type names, first occurrence wins.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty project name, an empty entity
    /// list or a non-identifier entity type.
    pub fn entity_types(&self) -> Result<Vec<String>> {
        if self.project_name.trim().is_empty() {
            return Err(Error::validation("projectName", "must not be empty"));
        }
        if self.entity_types.is_empty() {
            return Err(Error::validation("entityTypes", "must name at least one entity type"));
        }

        let mut names: Vec<String> = Vec::with_capacity(self.entity_types.len());
        for name in &self.entity_types {
            let name = capitalize(name.trim());
            check_identifier("entityTypes", &name)?;
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Ok(names)
    }
}

// ============================================================================
// create_space
// ============================================================================

/// Arguments for `create_space`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpaceRequest {
    /// Visibility of the space
    #[serde(default)]
    pub space_type: SpaceType,

    /// Name for the space
    pub space_name: String,

    /// Description of the space purpose
    #[serde(default)]
    pub description: String,

    /// Include space invitation functionality
    #[serde(default)]
    pub include_invitations: bool,

    /// Output flavor
    #[serde(default)]
    pub framework: Flavor,
}

impl SpaceRequest {
    /// Returns the space name with whitespace removed.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the result is not an identifier.
    pub fn space_identifier(&self) -> Result<String> {
        let ident: String = self.space_name.split_whitespace().collect();
        check_identifier("spaceName", &ident)?;
        Ok(ident)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_request_defaults() {
        let request: SchemaRequest = serde_json::from_value(json!({ "entityName": "event" })).unwrap();
        assert!(request.include_validation);
        assert!(request.generate_example);
        assert!(request.properties.is_empty());
        assert_eq!(request.entity().unwrap().name, "Event");
    }

    #[test]
    fn test_schema_request_missing_required() {
        let result: std::result::Result<SchemaRequest, _> = serde_json::from_value(json!({}));
        assert!(result.is_err());
    }

    #[test]
    fn test_publishing_request_defaults() {
        let request: PublishingRequest =
            serde_json::from_value(json!({ "entityType": "Post" })).unwrap();
        assert_eq!(request.publishing_strategy, Strategy::Immediate);
        assert_eq!(request.framework, Flavor::React);
        assert_eq!(request.batch_size, 10);
        assert!(request.queue_length.is_none());
    }

    #[test]
    fn test_publishing_request_rejects_zero_batch() {
        let request: PublishingRequest =
            serde_json::from_value(json!({ "entityType": "Post", "batchSize": 0 })).unwrap();
        assert!(request.entity_type().unwrap_err().is_validation_error());
    }

    #[test]
    fn test_unknown_strategy_falls_back() {
        let request: PublishingRequest = serde_json::from_value(json!({
            "entityType": "Post",
            "publishingStrategy": "eventual"
        }))
        .unwrap();
        assert_eq!(request.publishing_strategy, Strategy::Immediate);
    }

    #[test]
    fn test_providers_app_identifier() {
        let request = ProvidersRequest {
            app_name: "Event Planner".to_string(),
            ..ProvidersRequest::default()
        };
        assert_eq!(request.app_identifier().unwrap(), "EventPlanner");
    }

    #[test]
    fn test_quickstart_defaults() {
        let request: QuickstartRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request, QuickstartRequest::default());
        assert_eq!(request.entity_types().unwrap(), vec!["Event", "User"]);
    }

    #[test]
    fn test_quickstart_entity_types_capitalized_and_deduplicated() {
        let request: QuickstartRequest =
            serde_json::from_value(json!({ "entityTypes": ["post", " Post ", "product"] })).unwrap();
        assert_eq!(request.entity_types().unwrap(), vec!["Post", "Product"]);

        let empty: QuickstartRequest =
            serde_json::from_value(json!({ "entityTypes": [] })).unwrap();
        assert!(empty.entity_types().unwrap_err().is_validation_error());
    }

    #[test]
    fn test_query_request_rejects_bad_filter_property() {
        let request: QueryRequest = serde_json::from_value(json!({
            "entityName": "Event",
            "filters": [{ "property": "start date", "operator": "gt", "value": "1" }]
        }))
        .unwrap();
        assert!(request.entity_name().is_err());
    }

    #[test]
    fn test_space_identifier() {
        let request: SpaceRequest =
            serde_json::from_value(json!({ "spaceName": "Team Notes" })).unwrap();
        assert_eq!(request.space_identifier().unwrap(), "TeamNotes");
        assert_eq!(request.space_type, SpaceType::Private);
        assert!(!request.include_invitations);
    }

    #[test]
    fn test_mapping_request_requires_entities() {
        let request = MappingRequest {
            entities: vec![],
            generate_example: true,
            include_validation: true,
        };
        assert!(request.validate().is_err());
    }
}
