//! Starter entity profiles for quickstart projects.
//!
//! Well-known entity names (`Event`, `User`, `Post`, `Product`) get a
//! schema.org-backed field set; any other name gets a generic `Thing`
//! profile. Schema classes, mapping entries, React forms and cards, and
//! example data are all derived from the same field list.

use crate::common::types::schema_constructor;
use crate::common::typescript::{to_camel_case, to_kebab_case};
use hypergraph_core::PropertyKind;
use serde::Serialize;

const SCHEMA_ORG: &str = "https://schema.org/";

/// Field names rendered as a `<textarea>` in forms.
const LONG_TEXT: &[&str] = &["description", "content", "bio", "summary"];

/// Example value for a field.
#[derive(Debug, Clone, Copy)]
enum Sample {
    Text(&'static str),
    Number(u32),
    Flag(bool),
    /// `"Example {Entity}"`
    ExampleName,
    /// `"This is an example {entity} entity"`
    ExampleDescription,
}

#[derive(Debug)]
struct Field {
    name: &'static str,
    kind: PropertyKind,
    /// schema.org property, relative to [`SCHEMA_ORG`]
    term: &'static str,
    sample: Sample,
}

impl Field {
    const fn new(name: &'static str, kind: PropertyKind, term: &'static str, sample: Sample) -> Self {
        Self {
            name,
            kind,
            term,
            sample,
        }
    }

    /// Date fields named `...At` are stamped on submit, never typed in.
    fn is_timestamp(&self) -> bool {
        self.kind == PropertyKind::Date && self.name.ends_with("At")
    }
}

#[derive(Debug)]
struct Profile {
    type_term: &'static str,
    fields: &'static [Field],
}

use PropertyKind::{Checkbox, Date, Email, Number, Text, Url};
use Sample::{ExampleDescription, ExampleName, Flag};

const EVENT: Profile = Profile {
    type_term: "Event",
    fields: &[
        Field::new("name", Text, "name", Sample::Text("Tech Conference 2024")),
        Field::new(
            "description",
            Text,
            "description",
            Sample::Text("Annual technology conference featuring the latest innovations"),
        ),
        Field::new("date", Date, "startDate", Sample::Text("2024-09-15T09:00:00Z")),
        Field::new(
            "location",
            Text,
            "location",
            Sample::Text("Convention Center, San Francisco"),
        ),
        Field::new("organizer", Text, "organizer", Sample::Text("Tech Events Inc.")),
        Field::new("capacity", Number, "maximumAttendeeCapacity", Sample::Number(500)),
        Field::new("isPublic", Checkbox, "isAccessibleForFree", Flag(true)),
        Field::new(
            "tags",
            Text,
            "keywords",
            Sample::Text("technology, conference, networking"),
        ),
    ],
};

const USER: Profile = Profile {
    type_term: "Person",
    fields: &[
        Field::new("name", Text, "name", Sample::Text("Jane Doe")),
        Field::new("email", Email, "email", Sample::Text("jane@example.com")),
        Field::new(
            "bio",
            Text,
            "description",
            Sample::Text("Full-stack developer passionate about Web3 and decentralized applications"),
        ),
        Field::new("website", Url, "url", Sample::Text("https://janedoe.dev")),
        Field::new("location", Text, "address", Sample::Text("San Francisco, CA")),
        Field::new("joinedAt", Date, "dateCreated", Sample::Text("2024-01-15T10:30:00Z")),
        Field::new("isActive", Checkbox, "isActive", Flag(true)),
    ],
};

const POST: Profile = Profile {
    type_term: "BlogPosting",
    fields: &[
        Field::new("title", Text, "headline", Sample::Text("Getting Started with Hypergraph")),
        Field::new(
            "content",
            Text,
            "articleBody",
            Sample::Text("Hypergraph is a framework for building local-first applications..."),
        ),
        Field::new(
            "summary",
            Text,
            "abstract",
            Sample::Text("Learn the basics of Hypergraph development"),
        ),
        Field::new(
            "publishedAt",
            Date,
            "datePublished",
            Sample::Text("2024-06-01T14:00:00Z"),
        ),
        Field::new("isPublished", Checkbox, "isAccessibleForFree", Flag(true)),
        Field::new("viewCount", Number, "interactionCount", Sample::Number(1250)),
        Field::new("tags", Text, "keywords", Sample::Text("hypergraph, tutorial, web3")),
    ],
};

const PRODUCT: Profile = Profile {
    type_term: "Product",
    fields: &[
        Field::new("name", Text, "name", Sample::Text("Wireless Headphones")),
        Field::new(
            "description",
            Text,
            "description",
            Sample::Text("Noise-cancelling over-ear headphones"),
        ),
        Field::new("price", Number, "price", Sample::Number(199)),
        Field::new("category", Text, "category", Sample::Text("Audio")),
        Field::new("inStock", Checkbox, "availability", Flag(true)),
        Field::new("sku", Text, "sku", Sample::Text("WH-1000")),
        Field::new("createdAt", Date, "dateCreated", Sample::Text("2024-06-01T12:00:00Z")),
    ],
};

const THING: Profile = Profile {
    type_term: "Thing",
    fields: &[
        Field::new("name", Text, "name", ExampleName),
        Field::new("description", Text, "description", ExampleDescription),
        Field::new("createdAt", Date, "dateCreated", Sample::Text("2024-06-01T12:00:00Z")),
        Field::new("isActive", Checkbox, "isActive", Flag(true)),
    ],
};

fn profile(entity: &str) -> &'static Profile {
    match entity {
        "Event" => &EVENT,
        "User" => &USER,
        "Post" => &POST,
        "Product" => &PRODUCT,
        _ => &THING,
    }
}

/// `isPublic` becomes `Is public`.
fn label(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if i == 0 {
            out.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            out.push(' ');
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

// ============================================================================
// Schema and mapping
// ============================================================================

/// The `Entity.Class` declaration for one entity.
pub(super) fn schema_class(entity: &str, typed: bool) -> String {
    let fields = profile(entity)
        .fields
        .iter()
        .map(|f| format!("  {}: {}", f.name, schema_constructor(f.kind, true)))
        .collect::<Vec<_>>()
        .join(",\n");
    let generic = if typed { format!("<{entity}>") } else { String::new() };
    format!(
        "// {entity} Entity\nexport class {entity} extends Entity.Class{generic}('{entity}')({{\n{fields}\n}}) {{}}\n"
    )
}

/// The entry for one entity inside the `mapping` object, without a
/// trailing comma.
pub(super) fn mapping_entry(entity: &str) -> String {
    let profile = profile(entity);
    let properties = profile
        .fields
        .iter()
        .map(|f| format!("      {}: '{SCHEMA_ORG}{}'", f.name, f.term))
        .collect::<Vec<_>>()
        .join(",\n");
    format!(
        "  {entity}: {{\n    typeId: '{SCHEMA_ORG}{}',\n    properties: {{\n{properties}\n    }}\n  }}",
        profile.type_term
    )
}

/// Example record for one entity as pretty JSON.
pub(super) fn example_json(entity: &str) -> String {
    let lines = profile(entity)
        .fields
        .iter()
        .map(|f| {
            let value = match f.sample {
                Sample::Text(text) => serde_json::Value::from(text),
                Sample::Number(n) => serde_json::Value::from(n),
                Sample::Flag(flag) => serde_json::Value::from(flag),
                ExampleName => serde_json::Value::from(format!("Example {entity}")),
                ExampleDescription => serde_json::Value::from(format!(
                    "This is an example {} entity",
                    entity.to_lowercase()
                )),
            };
            format!("  \"{}\": {value}", f.name)
        })
        .collect::<Vec<_>>()
        .join(",\n");
    format!("{{\n{lines}\n}}")
}

// ============================================================================
// React views
// ============================================================================

/// Per-entity values for the list, form and card components.
#[derive(Debug, Clone, Serialize)]
pub(super) struct EntityView {
    /// Class name
    pub name: String,
    /// Variable holding one record
    pub var: String,
    /// URL path segment and CSS prefix
    pub slug: String,
    /// Primary field, shown as the card title
    pub title_field: &'static str,
    /// JSX expression for the card title
    pub title: String,
    pub form_state: String,
    pub submit_data: String,
    pub form_inputs: String,
    pub card_details: String,
}

impl EntityView {
    pub(super) fn new(entity: &str) -> Self {
        let fields = profile(entity).fields;
        let var = to_camel_case(entity);
        let title_field = fields.first().map_or("name", |f| f.name);
        Self {
            name: entity.to_string(),
            slug: format!("{}s", to_kebab_case(entity)),
            title_field,
            title: format!("{{{var}.{title_field}}}"),
            form_state: form_state(fields),
            submit_data: submit_data(fields),
            form_inputs: form_inputs(fields),
            card_details: card_details(fields, &var),
            var,
        }
    }
}

fn editable(fields: &[Field]) -> impl Iterator<Item = &Field> {
    fields.iter().filter(|f| !f.is_timestamp())
}

fn form_state(fields: &[Field]) -> String {
    editable(fields)
        .map(|f| {
            let initial = match f.kind {
                Number => "0",
                Checkbox if f.name == "isActive" => "true",
                Checkbox => "false",
                _ => "''",
            };
            format!("    {}: {initial}", f.name)
        })
        .collect::<Vec<_>>()
        .join(",\n")
}

fn submit_data(fields: &[Field]) -> String {
    let overrides: Vec<String> = fields
        .iter()
        .filter_map(|f| match f.kind {
            Date if f.is_timestamp() => Some(format!("      {}: new Date()", f.name)),
            Date => Some(format!("      {0}: new Date(formData.{0})", f.name)),
            Number => Some(format!("      {0}: Number(formData.{0})", f.name)),
            _ => None,
        })
        .collect();

    if overrides.is_empty() {
        "    const submitData = { ...formData };\n".to_string()
    } else {
        format!(
            "    const submitData = {{\n      ...formData,\n{}\n    }};\n",
            overrides.join(",\n")
        )
    }
}

fn form_inputs(fields: &[Field]) -> String {
    editable(fields)
        .enumerate()
        .map(|(i, f)| {
            let name = f.name;
            let label = label(name);
            if f.kind == Checkbox {
                return format!(
                    "      <label>\n        <input\n          type=\"checkbox\"\n          checked={{formData.{name}}}\n          onChange={{(e) => setFormData(prev => ({{ ...prev, {name}: e.target.checked }}))}}\n        />\n        {label}\n      </label>\n"
                );
            }

            let on_change = format!(
                "onChange={{(e) => setFormData(prev => ({{ ...prev, {name}: e.target.value }}))}}"
            );
            let required = if i == 0 { "        required\n" } else { "" };
            if LONG_TEXT.contains(&name) {
                return format!(
                    "      <textarea\n        placeholder=\"{label}\"\n        value={{formData.{name}}}\n        {on_change}\n{required}      />\n"
                );
            }

            let input_type = match f.kind {
                Email => "email",
                Url => "url",
                Number => "number",
                Date => "datetime-local",
                _ => "text",
            };
            format!(
                "      <input\n        type=\"{input_type}\"\n        placeholder=\"{label}\"\n        value={{formData.{name}}}\n        {on_change}\n{required}      />\n"
            )
        })
        .collect()
}

fn card_details(fields: &[Field], var: &str) -> String {
    fields
        .iter()
        .skip(1)
        .map(|f| {
            let name = f.name;
            let value = match f.kind {
                Date => format!("{{new Date({var}.{name}).toLocaleDateString()}}"),
                Checkbox => format!("{{{var}.{name} ? 'Yes' : 'No'}}"),
                Url => format!(
                    "<a href={{{var}.{name}}} target=\"_blank\" rel=\"noopener noreferrer\">{{{var}.{name}}}</a>"
                ),
                _ => format!("{{{var}.{name}}}"),
            };
            format!("        <p><strong>{}:</strong> {value}</p>\n", label(name))
        })
        .collect()
}
