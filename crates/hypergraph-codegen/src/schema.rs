//! Entity schema generation (`create_schema`).
//!
//! Emission order: imports → entity class → plain-data interface →
//! example usage (if enabled) → validation helpers (if enabled).

use crate::common::assemble;
use crate::common::types::{
    example_literal, example_relation_ids, relation_constructor, relation_comment, relation_type,
    schema_comment, schema_constructor, type_expression,
};
use crate::common::typescript::to_camel_case;
use hypergraph_core::{EntitySpec, Flavor, PropertyKind, PropertySpec, Result, SchemaRequest};

/// Generates the schema artifact for a request.
///
/// # Errors
///
/// Returns a validation error if the entity name or a property name is not
/// an identifier, or if property names repeat.
///
/// # Examples
///
/// ```
/// use hypergraph_codegen::schema::generate;
/// use hypergraph_core::SchemaRequest;
///
/// let request: SchemaRequest = serde_json::from_value(serde_json::json!({
///     "entityName": "event",
///     "properties": [{ "name": "title", "type": "Text", "required": true }]
/// }))
/// .unwrap();
///
/// let code = generate(&request).unwrap();
/// assert!(code.contains("export class Event extends Entity.Class<Event>('Event')"));
/// assert!(code.contains("errors.push('title is required')"));
/// ```
pub fn generate(request: &SchemaRequest) -> Result<String> {
    let entity = request.entity()?;
    let validated = request.include_validation;
    let example = request.generate_example;

    tracing::debug!(
        entity = %entity.name,
        properties = entity.properties.len(),
        relations = entity.relations.len(),
        validated,
        example,
        "composing schema"
    );

    Ok(assemble([
        imports(&entity, validated, example),
        class_declaration(&entity, validated),
        data_interface(&entity),
        example_usage(&entity, example),
        validation(&entity, validated),
    ]))
}

/// Header comment and import list.
#[must_use]
pub fn imports(entity: &EntitySpec, validated: bool, example: bool) -> String {
    let mut lines = vec![
        format!("// Hypergraph Schema: {}", entity.name),
        "import { Entity, Type } from '@graphprotocol/hypergraph';".to_string(),
    ];
    if example {
        lines.push(
            "import { useCreateEntity, useQuery } from '@graphprotocol/hypergraph-react';"
                .to_string(),
        );
    }
    if validated {
        lines.push("import { useState } from 'react';".to_string());
    }
    format!("{}\n\n", lines.join("\n"))
}

/// The `Entity.Class` declaration with one line per property and relation.
#[must_use]
pub fn class_declaration(entity: &EntitySpec, validated: bool) -> String {
    let name = &entity.name;
    let mut fields: Vec<(String, Option<&str>)> = entity
        .properties
        .iter()
        .map(|p| {
            (
                format!("  {}: {}", p.name, schema_constructor(p.kind, validated)),
                schema_comment(p.kind, validated),
            )
        })
        .collect();
    fields.extend(entity.relations.iter().map(|r| {
        (
            format!("  {}: {}", r.name, relation_constructor(r.cardinality, &r.target)),
            Some(relation_comment(r.cardinality)),
        )
    }));

    let last = fields.len().saturating_sub(1);
    let body: String = fields
        .into_iter()
        .enumerate()
        .map(|(i, (field, comment))| {
            let comma = if i < last { "," } else { "" };
            comment.map_or_else(
                || format!("{field}{comma}\n"),
                |c| format!("{field}{comma} // {c}\n"),
            )
        })
        .collect();

    format!("export class {name} extends Entity.Class<{name}>('{name}')({{\n{body}}}) {{}}\n\n")
}

/// Plain TypeScript interface `I<Entity>` mirroring the class fields.
#[must_use]
pub fn data_interface(entity: &EntitySpec) -> String {
    let name = &entity.name;
    let properties = entity.properties.iter().map(|p| {
        let optional = if p.required { "" } else { "?" };
        format!(
            "  {}{optional}: {};\n",
            p.name,
            type_expression(p.kind, Flavor::TypeScript)
        )
    });
    let relations = entity
        .relations
        .iter()
        .map(|r| format!("  {}?: {};\n", r.name, relation_type(r.cardinality, &r.target)));
    let body: String = properties.chain(relations).collect();

    format!("// TypeScript interface for {name}\nexport interface I{name} {{\n{body}}}\n\n")
}

/// Sample data object plus a React component creating and listing entities.
#[must_use]
pub fn example_usage(entity: &EntitySpec, enabled: bool) -> String {
    if !enabled {
        return String::new();
    }
    let name = &entity.name;
    let var = to_camel_case(name);

    let values: String = entity
        .properties
        .iter()
        .map(|p| format!("  {}: {},\n", p.name, example_literal(p.kind, name, &p.name)))
        .chain(entity.relations.iter().map(|r| {
            format!(
                "  {}: {},\n",
                r.name,
                example_relation_ids(r.cardinality, &r.target)
            )
        }))
        .collect();

    let title = entity
        .first_of_kind(PropertyKind::Text)
        .map(|p| format!("            <h4>{{{var}.{}}}</h4>\n", p.name))
        .unwrap_or_default();

    format!(
        r"// Example usage of {name} schema

// Creating a new {name}
const new{name} = {{
{values}}};

// Using with React hooks
function {name}Component() {{
  const create{name} = useCreateEntity({name});
  const {{ data: {var}s }} = useQuery({name}, {{ mode: 'private' }});

  const handleCreate = async () => {{
    try {{
      await create{name}(new{name});
      console.log('{name} created successfully!');
    }} catch (error) {{
      console.error('Error creating {name}:', error);
    }}
  }};

  return (
    <div>
      <h2>{name} Management</h2>
      <button onClick={{handleCreate}}>Create {name}</button>

      <div>
        <h3>Existing {name}s:</h3>
        {{{var}s?.map(({var}) => (
          <div key={{{var}.id}}>
{title}            {{/* Add more {var} details here */}}
          </div>
        ))}}
      </div>
    </div>
  );
}}

"
    )
}

/// `validate<Entity>` function and `use<Entity>Validation` hook.
#[must_use]
pub fn validation(entity: &EntitySpec, enabled: bool) -> String {
    if !enabled {
        return String::new();
    }
    let name = &entity.name;
    let checks: String = entity.properties.iter().map(property_checks).collect();

    format!(
        r"// Validation helpers for {name}

export function validate{name}(data: Partial<I{name}>): {{ isValid: boolean; errors: string[] }} {{
  const errors: string[] = [];

{checks}  return {{
    isValid: errors.length === 0,
    errors
  }};
}}

// React hook for form validation
export function use{name}Validation() {{
  const [errors, setErrors] = useState<string[]>([]);

  const validate = (data: Partial<I{name}>) => {{
    const result = validate{name}(data);
    setErrors(result.errors);
    return result.isValid;
  }};

  return {{ validate, errors, hasErrors: errors.length > 0 }};
}}
"
    )
}

fn property_checks(property: &PropertySpec) -> String {
    let p = &property.name;
    let mut checks = String::new();

    if property.required {
        // Falsy checks would reject `false` and `0`.
        let missing = match property.kind {
            PropertyKind::Checkbox | PropertyKind::Number => {
                format!("data.{p} === undefined || data.{p} === null")
            }
            _ => format!("!data.{p}"),
        };
        checks.push_str(&format!(
            "  if ({missing}) {{\n    errors.push('{p} is required');\n  }}\n\n"
        ));
    }

    match property.kind {
        PropertyKind::Email => checks.push_str(&format!(
            "  if (data.{p} && !/^[^\\s@]+@[^\\s@]+\\.[^\\s@]+$/.test(data.{p})) {{\n    errors.push('{p} must be a valid email');\n  }}\n\n"
        )),
        PropertyKind::Url => checks.push_str(&format!(
            "  if (data.{p}) {{\n    try {{\n      new URL(data.{p});\n    }} catch {{\n      errors.push('{p} must be a valid URL');\n    }}\n  }}\n\n"
        )),
        _ => {}
    }

    checks
}
