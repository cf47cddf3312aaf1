//! Lookup tables from property kinds to generated code.
//!
//! Every function here is total over [`PropertyKind`]. Kinds the caller
//! spelled in a way we do not recognize were already parsed to
//! [`PropertyKind::Text`], so they get the text behavior.

use hypergraph_core::{Cardinality, Flavor, PropertyKind};

/// Schema constructor for an entity field.
///
/// With `validated` set, email and URL fields use the refined text
/// constructors.
///
/// # Examples
///
/// ```
/// use hypergraph_codegen::common::types::schema_constructor;
/// use hypergraph_core::PropertyKind;
///
/// assert_eq!(schema_constructor(PropertyKind::Email, true), "Type.Text.email()");
/// assert_eq!(schema_constructor(PropertyKind::Email, false), "Type.Text");
/// assert_eq!(schema_constructor(PropertyKind::Checkbox, true), "Type.Checkbox");
/// ```
#[must_use]
pub const fn schema_constructor(kind: PropertyKind, validated: bool) -> &'static str {
    match kind {
        PropertyKind::Email if validated => "Type.Text.email()",
        PropertyKind::Url if validated => "Type.Text.url()",
        PropertyKind::Number => "Type.Number",
        PropertyKind::Checkbox => "Type.Checkbox",
        PropertyKind::Date => "Type.Date",
        PropertyKind::Json => "Type.JSON",
        PropertyKind::Text | PropertyKind::Email | PropertyKind::Url => "Type.Text",
    }
}

/// Trailing comment explaining a refined schema constructor, if any.
#[must_use]
pub const fn schema_comment(kind: PropertyKind, validated: bool) -> Option<&'static str> {
    match kind {
        PropertyKind::Email if validated => Some("Email validation"),
        PropertyKind::Url if validated => Some("URL validation"),
        _ => None,
    }
}

/// Type expression for a property in the given flavor.
///
/// React and TypeScript output use TypeScript types; vanilla JavaScript
/// output uses JSDoc type names.
///
/// # Examples
///
/// ```
/// use hypergraph_codegen::common::types::type_expression;
/// use hypergraph_core::{Flavor, PropertyKind};
///
/// assert_eq!(type_expression(PropertyKind::Checkbox, Flavor::TypeScript), "boolean");
/// assert_eq!(type_expression(PropertyKind::Json, Flavor::React), "any");
/// assert_eq!(type_expression(PropertyKind::Json, Flavor::VanillaJs), "Object");
/// ```
#[must_use]
pub const fn type_expression(kind: PropertyKind, flavor: Flavor) -> &'static str {
    match flavor {
        Flavor::React | Flavor::TypeScript => match kind {
            PropertyKind::Number => "number",
            PropertyKind::Checkbox => "boolean",
            PropertyKind::Date => "Date",
            PropertyKind::Json => "any",
            PropertyKind::Text | PropertyKind::Email | PropertyKind::Url => "string",
        },
        Flavor::VanillaJs => match kind {
            PropertyKind::Number => "number",
            PropertyKind::Checkbox => "boolean",
            PropertyKind::Date => "Date",
            PropertyKind::Json => "Object",
            PropertyKind::Text | PropertyKind::Email | PropertyKind::Url => "string",
        },
    }
}

/// Relation field type, e.g. `Type.Relation.List(Attendee)`.
#[must_use]
pub fn relation_constructor(cardinality: Cardinality, target: &str) -> String {
    if cardinality.is_list() {
        format!("Type.Relation.List({target})")
    } else {
        format!("Type.Relation({target})")
    }
}

/// Relation type in a plain data interface, e.g. `Attendee[]`.
#[must_use]
pub fn relation_type(cardinality: Cardinality, target: &str) -> String {
    if cardinality.is_list() {
        format!("{target}[]")
    } else {
        target.to_string()
    }
}

/// Trailing comment describing a relation's cardinality.
#[must_use]
pub const fn relation_comment(cardinality: Cardinality) -> &'static str {
    match cardinality {
        Cardinality::OneToOne => "One-to-one relation",
        Cardinality::OneToMany => "One-to-many relation",
        Cardinality::ManyToMany => "Many-to-many relation",
    }
}

/// Example literal for a property of `entity`.
///
/// Non-text kinds map to a fixed literal. Text properties go through
/// [`text_example`].
///
/// # Examples
///
/// ```
/// use hypergraph_codegen::common::types::example_literal;
/// use hypergraph_core::PropertyKind;
///
/// assert_eq!(example_literal(PropertyKind::Number, "Event", "age"), "42");
/// assert_eq!(example_literal(PropertyKind::Text, "Event", "title"), "'example title'");
/// assert_eq!(
///     example_literal(PropertyKind::Text, "Event", "contactEmail"),
///     "'user@example.com'"
/// );
/// ```
#[must_use]
pub fn example_literal(kind: PropertyKind, entity: &str, property: &str) -> String {
    match kind {
        PropertyKind::Number => "42".to_string(),
        PropertyKind::Checkbox => "true".to_string(),
        PropertyKind::Date => "new Date()".to_string(),
        PropertyKind::Email => "'user@example.com'".to_string(),
        PropertyKind::Url => "'https://example.com'".to_string(),
        PropertyKind::Json => "{ key: \"value\" }".to_string(),
        PropertyKind::Text => text_example(entity, property),
    }
}

/// Best-effort example value for a text property, guessed from its name.
///
/// Checked case-insensitively in this order: `email`, `name`, `url`, `date`.
/// The first hit wins, so `homepageNameUrl` yields `'Example <Entity>'`.
/// Anything else becomes `'example <property>'`. The exact strings are not a
/// stable contract.
#[must_use]
pub fn text_example(entity: &str, property: &str) -> String {
    let lower = property.to_ascii_lowercase();
    if lower.contains("email") {
        "'user@example.com'".to_string()
    } else if lower.contains("name") {
        format!("'Example {entity}'")
    } else if lower.contains("url") {
        "'https://example.com'".to_string()
    } else if lower.contains("date") {
        "new Date().toISOString()".to_string()
    } else {
        format!("'example {property}'")
    }
}

/// Placeholder id(s) for a relation in example data.
#[must_use]
pub fn example_relation_ids(cardinality: Cardinality, target: &str) -> String {
    let target = target.to_lowercase();
    if cardinality.is_list() {
        format!("['related-{target}-id-1', 'related-{target}-id-2']")
    } else {
        format!("'related-{target}-id'")
    }
}
