//! Structured descriptions of the data shapes callers ask code for.
//!
//! These types are built fresh from each request's arguments and consumed
//! read-only by every generator.

use crate::kinds::{Cardinality, FilterOperator, PropertyKind};
use crate::{Error, Result};
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap_or_else(|_| unreachable!())
});

/// Returns `true` if `name` is usable as a JavaScript identifier.
///
/// # Examples
///
/// ```
/// use hypergraph_core::is_identifier;
///
/// assert!(is_identifier("Event"));
/// assert!(is_identifier("_private$"));
/// assert!(!is_identifier("2fast"));
/// assert!(!is_identifier("has space"));
/// assert!(!is_identifier(""));
/// ```
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Upper-cases the first character of `name`.
///
/// # Examples
///
/// ```
/// use hypergraph_core::capitalize;
///
/// assert_eq!(capitalize("event"), "Event");
/// assert_eq!(capitalize("Event"), "Event");
/// assert_eq!(capitalize(""), "");
/// ```
#[must_use]
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// One field of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PropertySpec {
    /// Property name
    pub name: String,

    /// Property kind (Text, Number, Checkbox, Date, Email, URL, JSON)
    #[serde(rename = "type", alias = "kind", default)]
    pub kind: PropertyKind,

    /// Whether the property must be present
    #[serde(default)]
    pub required: bool,
}

impl PropertySpec {
    /// Creates an optional property.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
        }
    }

    /// Marks the property as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A relation from one entity to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RelationSpec {
    /// Relation name
    pub name: String,

    /// Target entity name
    pub target: String,

    /// Relation cardinality (one-to-one, one-to-many, many-to-many)
    #[serde(rename = "type", alias = "cardinality", default)]
    pub cardinality: Cardinality,
}

impl RelationSpec {
    /// Creates a relation.
    #[must_use]
    pub fn new(name: impl Into<String>, target: impl Into<String>, cardinality: Cardinality) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            cardinality,
        }
    }
}

/// A query filter on a single property.
///
/// The value is always carried as a string and re-typed when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FilterSpec {
    /// Property to filter on
    pub property: String,

    /// Comparison operator
    pub operator: FilterOperator,

    /// Literal value, re-typed as number, boolean, or quoted string
    pub value: String,
}

/// An entity with its ordered properties and relations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpec {
    /// Entity name, a non-empty identifier
    pub name: String,
    /// Properties in declaration order
    pub properties: Vec<PropertySpec>,
    /// Relations in declaration order
    pub relations: Vec<RelationSpec>,
}

impl EntitySpec {
    /// Builds an entity spec and checks its invariants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if the name is not an identifier,
    /// a property or relation name is not an identifier, or two properties
    /// share a name.
    ///
    /// # Examples
    ///
    /// ```
    /// use hypergraph_core::{EntitySpec, PropertyKind, PropertySpec};
    ///
    /// let entity = EntitySpec::new(
    ///     "Event",
    ///     vec![PropertySpec::new("title", PropertyKind::Text).required()],
    ///     vec![],
    /// )
    /// .unwrap();
    /// assert_eq!(entity.required_properties().count(), 1);
    ///
    /// let duplicate = EntitySpec::new(
    ///     "Event",
    ///     vec![
    ///         PropertySpec::new("title", PropertyKind::Text),
    ///         PropertySpec::new("title", PropertyKind::Number),
    ///     ],
    ///     vec![],
    /// );
    /// assert!(duplicate.is_err());
    /// ```
    pub fn new(
        name: impl Into<String>,
        properties: Vec<PropertySpec>,
        relations: Vec<RelationSpec>,
    ) -> Result<Self> {
        let spec = Self {
            name: name.into(),
            properties,
            relations,
        };
        spec.validate()?;
        Ok(spec)
    }

    fn validate(&self) -> Result<()> {
        check_identifier("entityName", &self.name)?;

        let mut seen = HashSet::with_capacity(self.properties.len());
        for property in &self.properties {
            check_identifier("properties", &property.name)?;
            if !seen.insert(property.name.as_str()) {
                return Err(Error::validation(
                    "properties",
                    format!("duplicate property '{}' on {}", property.name, self.name),
                ));
            }
        }

        for relation in &self.relations {
            check_identifier("relations", &relation.name)?;
            check_identifier("relations", &relation.target)?;
        }

        Ok(())
    }

    /// Properties flagged as required, in declaration order.
    pub fn required_properties(&self) -> impl Iterator<Item = &PropertySpec> {
        self.properties.iter().filter(|p| p.required)
    }

    /// First property of the given kind, if any.
    #[must_use]
    pub fn first_of_kind(&self, kind: PropertyKind) -> Option<&PropertySpec> {
        self.properties.iter().find(|p| p.kind == kind)
    }

    /// Returns `true` if any property has the given kind.
    #[must_use]
    pub fn has_kind(&self, kind: PropertyKind) -> bool {
        self.first_of_kind(kind).is_some()
    }
}

/// Property-to-URI entry of an entity mapping.
///
/// A property listed without a `propertyId` is declared on the entity but
/// not mapped; the generated validation reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMapping {
    /// Property name on the entity
    pub name: String,

    /// External property URI
    #[serde(default)]
    pub property_id: Option<String>,
}

/// Relation-to-URI entry of an entity mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationMapping {
    /// Relation name on the entity
    pub name: String,

    /// External relation URI
    #[serde(default)]
    pub relation_id: Option<String>,
}

/// Mapping of one entity onto the public knowledge graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntity {
    /// Entity name
    pub name: String,

    /// External type URI
    pub type_id: String,

    /// Declared properties with their mapping entries
    #[serde(default)]
    pub properties: Vec<PropertyMapping>,

    /// Declared relations with their mapping entries
    #[serde(default)]
    pub relations: Vec<RelationMapping>,
}

impl MappingEntity {
    /// Property entries that carry an identifier.
    pub fn mapped_properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().filter_map(|p| {
            non_blank(p.property_id.as_deref()).map(|id| (p.name.as_str(), id))
        })
    }

    /// Relation entries that carry an identifier.
    pub fn mapped_relations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.relations.iter().filter_map(|r| {
            non_blank(r.relation_id.as_deref()).map(|id| (r.name.as_str(), id))
        })
    }

    /// Declared properties without a mapping entry.
    pub fn unmapped_properties(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .filter(|p| non_blank(p.property_id.as_deref()).is_none())
            .map(|p| p.name.as_str())
    }

    /// Declared relations without a mapping entry.
    pub fn unmapped_relations(&self) -> impl Iterator<Item = &str> {
        self.relations
            .iter()
            .filter(|r| non_blank(r.relation_id.as_deref()).is_none())
            .map(|r| r.name.as_str())
    }

    /// Checks the entity and property names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] for a non-identifier name or a
    /// duplicated property name.
    pub fn validate(&self) -> Result<()> {
        check_identifier("entities.name", &self.name)?;
        let mut seen = HashSet::with_capacity(self.properties.len());
        for property in &self.properties {
            check_identifier("entities.properties", &property.name)?;
            if !seen.insert(property.name.as_str()) {
                return Err(Error::validation(
                    "entities.properties",
                    format!("duplicate property '{}' on {}", property.name, self.name),
                ));
            }
        }
        for relation in &self.relations {
            check_identifier("entities.relations", &relation.name)?;
        }
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Fails with a validation error unless `value` is an identifier.
///
/// # Errors
///
/// Returns [`Error::ValidationError`] naming `field`.
pub fn check_identifier(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    if !is_identifier(value) {
        return Err(Error::validation(
            field,
            format!("'{value}' is not a valid identifier"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping_entity() -> MappingEntity {
        MappingEntity {
            name: "Event".to_string(),
            type_id: "https://schema.org/Event".to_string(),
            properties: vec![
                PropertyMapping {
                    name: "title".to_string(),
                    property_id: Some("https://schema.org/name".to_string()),
                },
                PropertyMapping {
                    name: "location".to_string(),
                    property_id: None,
                },
                PropertyMapping {
                    name: "venue".to_string(),
                    property_id: Some("   ".to_string()),
                },
            ],
            relations: vec![RelationMapping {
                name: "attendees".to_string(),
                relation_id: Some("https://schema.org/attendee".to_string()),
            }],
        }
    }

    #[test]
    fn test_capitalize_unicode() {
        assert_eq!(capitalize("évènement"), "Évènement");
    }

    #[test]
    fn test_entity_rejects_empty_name() {
        let err = EntitySpec::new("", vec![], vec![]).unwrap_err();
        assert!(err.is_validation_error());
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_entity_rejects_bad_relation_target() {
        let relation = RelationSpec::new("owner", "not valid", Cardinality::OneToOne);
        assert!(EntitySpec::new("Event", vec![], vec![relation]).is_err());
    }

    #[test]
    fn test_entity_kind_lookup() {
        let entity = EntitySpec::new(
            "User",
            vec![
                PropertySpec::new("name", PropertyKind::Text),
                PropertySpec::new("email", PropertyKind::Email),
            ],
            vec![],
        )
        .unwrap();
        assert!(entity.has_kind(PropertyKind::Email));
        assert!(!entity.has_kind(PropertyKind::Url));
        assert_eq!(entity.first_of_kind(PropertyKind::Text).unwrap().name, "name");
    }

    #[test]
    fn test_property_spec_deserialize_defaults() {
        let property: PropertySpec = serde_json::from_str(r#"{"name":"age","type":"Number"}"#).unwrap();
        assert_eq!(property.kind, PropertyKind::Number);
        assert!(!property.required);

        let fallback: PropertySpec = serde_json::from_str(r#"{"name":"shape","type":"Polygon"}"#).unwrap();
        assert_eq!(fallback.kind, PropertyKind::Text);
    }

    #[test]
    fn test_mapping_entity_split() {
        let entity = mapping_entity();
        assert_eq!(entity.mapped_properties().count(), 1);
        let unmapped: Vec<_> = entity.unmapped_properties().collect();
        assert_eq!(unmapped, vec!["location", "venue"]);
        assert_eq!(entity.unmapped_relations().count(), 0);
    }

    #[test]
    fn test_mapping_entity_rejects_duplicates() {
        let mut entity = mapping_entity();
        entity.properties.push(PropertyMapping {
            name: "title".to_string(),
            property_id: None,
        });
        assert!(entity.validate().is_err());
    }
}
