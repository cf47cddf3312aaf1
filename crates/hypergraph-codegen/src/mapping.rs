//! Knowledge Graph mapping generation (`create_mapping`).
//!
//! Emission order: header/imports → mapping object → config interface →
//! validation (if enabled) → example usage (if enabled).

use crate::common::assemble;
use crate::common::types::text_example;
use crate::common::typescript::{quote, to_camel_case};
use hypergraph_core::{MappingEntity, MappingRequest, Result};

/// Generates the mapping artifact for a request.
///
/// # Errors
///
/// Returns a validation error if no entities are given or an entity name
/// or property name is not an identifier.
pub fn generate(request: &MappingRequest) -> Result<String> {
    request.validate()?;
    let entities = &request.entities;

    tracing::debug!(
        entities = entities.len(),
        validated = request.include_validation,
        example = request.generate_example,
        "composing mapping"
    );

    Ok(assemble([
        imports(entities),
        mapping_object(entities),
        config_interface(entities),
        validation(entities, request.include_validation),
        example_usage(entities, request.generate_example),
    ]))
}

/// Header comment and imports of the mapped entity classes.
#[must_use]
pub fn imports(entities: &[MappingEntity]) -> String {
    let names: Vec<&str> = entities.iter().map(|e| e.name.as_str()).collect();
    format!(
        "// Hypergraph Mapping Configuration\n\
         // Maps your schema to the public Knowledge Graph\n\n\
         import {{ Mapping }} from '@graphprotocol/hypergraph';\n\
         import {{ {} }} from './schema';\n\n",
        names.join(", ")
    )
}

fn entry_lines<'a>(entries: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    let entries: Vec<_> = entries.collect();
    let last = entries.len().saturating_sub(1);
    entries
        .iter()
        .enumerate()
        .map(|(i, (name, id))| {
            let comma = if i < last { "," } else { "" };
            format!("      {name}: {}{comma}\n", quote(id))
        })
        .collect()
}

fn entity_block(entity: &MappingEntity) -> String {
    let name = &entity.name;
    let mut block = format!(
        "  {name}: {{\n    typeId: {},\n    properties: {{\n{}",
        quote(&entity.type_id),
        entry_lines(entity.mapped_properties())
    );
    for unmapped in entity.unmapped_properties() {
        block.push_str(&format!("      // {unmapped}: not mapped\n"));
    }
    block.push_str("    }");

    if entity.relations.is_empty() {
        block.push('\n');
    } else {
        block.push_str(&format!(
            ",\n    relations: {{\n{}",
            entry_lines(entity.mapped_relations())
        ));
        for unmapped in entity.unmapped_relations() {
            block.push_str(&format!("      // {unmapped}: not mapped\n"));
        }
        block.push_str("    }\n");
    }
    block.push_str("  }");
    block
}

/// The exported `mapping` object.
///
/// Entries without an identifier are left out of the object and marked
/// with a comment in their place.
#[must_use]
pub fn mapping_object(entities: &[MappingEntity]) -> String {
    let blocks: Vec<String> = entities.iter().map(entity_block).collect();
    format!(
        "export const mapping: Mapping = {{\n{}\n}};\n\n",
        blocks.join(",\n")
    )
}

/// `MappingConfig` interface describing the mapping object.
#[must_use]
pub fn config_interface(entities: &[MappingEntity]) -> String {
    let body: String = entities
        .iter()
        .map(|entity| {
            let properties: String = entity
                .mapped_properties()
                .map(|(name, _)| format!("      {name}: string;\n"))
                .collect();
            let relations = if entity.relations.is_empty() {
                String::new()
            } else {
                let fields: String = entity
                    .mapped_relations()
                    .map(|(name, _)| format!("      {name}: string;\n"))
                    .collect();
                format!("    relations: {{\n{fields}    }};\n")
            };
            format!(
                "  {}: {{\n    typeId: string;\n    properties: {{\n{properties}    }};\n{relations}  }};\n",
                entity.name
            )
        })
        .collect();

    format!("// Type definitions for the mapping\nexport interface MappingConfig {{\n{body}}}\n\n")
}

fn missing_entries(entity: &MappingEntity) -> Vec<String> {
    let name = &entity.name;
    entity
        .unmapped_properties()
        .map(|p| format!("Missing property mapping for {name}.{p}"))
        .chain(
            entity
                .unmapped_relations()
                .map(|r| format!("Missing relation mapping for {name}.{r}")),
        )
        .collect()
}

fn entity_checks(entity: &MappingEntity) -> String {
    let name = &entity.name;
    let mut checks = format!(
        "  // Validate {name} mapping\n  if (!mapping.{name}) {{\n    errors.push('Missing mapping for {name}');\n  }} else {{\n    if (!mapping.{name}.typeId) {{\n      errors.push('Missing typeId for {name}');\n    }}\n"
    );

    for (property, _) in entity.mapped_properties() {
        checks.push_str(&format!(
            "    if (!mapping.{name}.properties?.{property}) {{\n      errors.push('Empty property ID for {name}.{property}');\n    }}\n"
        ));
    }
    for (relation, _) in entity.mapped_relations() {
        checks.push_str(&format!(
            "    if (!mapping.{name}.relations?.{relation}) {{\n      errors.push('Empty relation ID for {name}.{relation}');\n    }}\n"
        ));
    }
    checks.push_str("  }\n\n");
    checks
}

/// `validateMapping` and `validatePropertyIds` helpers.
///
/// Declared properties and relations that have no mapping entry are listed
/// once each in `unmappedFields`; the runtime checks only cover entries
/// present in the mapping object, so a gap is never reported twice.
#[must_use]
pub fn validation(entities: &[MappingEntity], enabled: bool) -> String {
    if !enabled {
        return String::new();
    }

    let unmapped: String = entities
        .iter()
        .flat_map(missing_entries)
        .map(|message| format!("    {},\n", quote(&message)))
        .collect();
    let checks: String = entities.iter().map(entity_checks).collect();

    let uri_checks: String = entities
        .iter()
        .flat_map(|entity| {
            entity.mapped_properties().map(move |(property, _)| {
                let name = &entity.name;
                format!(
                    "  // Validate {name}.{property} property ID format\n  if (mapping.{name}?.properties?.{property}) {{\n    const propertyId = mapping.{name}.properties.{property};\n    if (!propertyId.startsWith('http://') && !propertyId.startsWith('https://')) {{\n      warnings.push('Property ID for {name}.{property} should be a valid URI: ' + propertyId);\n    }}\n  }}\n\n"
                )
            })
        })
        .collect();

    format!(
        r"// Mapping validation functions

// Declared fields without a mapping entry
const unmappedFields: string[] = [
{unmapped}];

export function validateMapping(mapping: Mapping): {{ isValid: boolean; errors: string[] }} {{
  const errors: string[] = [...unmappedFields];

{checks}  return {{
    isValid: errors.length === 0,
    errors
  }};
}}

export function validatePropertyIds(mapping: Mapping): {{ isValid: boolean; warnings: string[] }} {{
  const warnings: string[] = [];

{uri_checks}  return {{
    isValid: warnings.length === 0,
    warnings
  }};
}}

// Testing your mapping
export function testMapping(): boolean {{
  const validationResult = validateMapping(mapping);

  if (!validationResult.isValid) {{
    console.error('Mapping validation failed:');
    validationResult.errors.forEach(error => console.error('- ' + error));
    return false;
  }}

  const propertyValidation = validatePropertyIds(mapping);

  if (!propertyValidation.isValid) {{
    console.warn('Property ID warnings:');
    propertyValidation.warnings.forEach(warning => console.warn('- ' + warning));
  }}

  console.log('Mapping validation passed!');
  return true;
}}

"
    )
}

fn publish_example(entity: &MappingEntity) -> String {
    let name = &entity.name;
    let var = to_camel_case(name);
    let fields: Vec<String> = entity
        .properties
        .iter()
        .map(|p| format!("    {}: {}", p.name, text_example(&entity.name, &p.name)))
        .collect();
    let fields = if fields.is_empty() {
        String::new()
    } else {
        format!("{}\n", fields.join(",\n"))
    };

    format!(
        r"// Publishing data to the Knowledge Graph
import {{ preparePublish, publishOps }} from '@graphprotocol/hypergraph';

async function publishExample() {{
  // Create your entity data
  const {var}Data = {{
{fields}  }};

  // Prepare operations for publishing
  const ops = preparePublish({name}, {var}Data, mapping);

  // Publish to the Knowledge Graph
  await publishOps(ops);

  console.log('{name} published to Knowledge Graph!');
}}

"
    )
}

fn list_component(entity: &MappingEntity) -> String {
    let name = &entity.name;
    let var = to_camel_case(name);
    let shown: String = entity
        .properties
        .iter()
        .take(3)
        .map(|p| {
            format!(
                "          <p><strong>{0}:</strong> {{{var}.{0}}}</p>\n",
                p.name
            )
        })
        .collect();

    format!(
        r"function {name}List() {{
  const {{ data: {var}s, loading, error }} = useQuery({name}, {{
    mode: 'public' // Query from the public Knowledge Graph
  }});

  if (loading) return <div>Loading {var}s...</div>;
  if (error) return <div>Error: {{error.message}}</div>;

  return (
    <div>
      <h2>Public {name}s</h2>
      {{{var}s?.map(({var}) => (
        <div key={{{var}.id}}>
{shown}        </div>
      ))}}
    </div>
  );
}}

"
    )
}

/// Provider wiring, a publish example, and one public list per entity.
#[must_use]
pub fn example_usage(entities: &[MappingEntity], enabled: bool) -> String {
    if !enabled {
        return String::new();
    }

    let publish = entities.first().map(publish_example).unwrap_or_default();
    let lists: String = entities.iter().map(list_component).collect();

    format!(
        r"// Usage Example

// Using the mapping with HypergraphAppProvider
import {{ HypergraphAppProvider }} from '@graphprotocol/hypergraph-react';

function App() {{
  return (
    <HypergraphAppProvider mapping={{mapping}}>
      <YourAppComponents />
    </HypergraphAppProvider>
  );
}}

{publish}// Querying data from the Knowledge Graph
import {{ useQuery }} from '@graphprotocol/hypergraph-react';

{lists}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hypergraph_core::{PropertyMapping, RelationMapping};

    fn event(location_id: Option<&str>) -> MappingEntity {
        MappingEntity {
            name: "Event".to_string(),
            type_id: "https://schema.org/Event".to_string(),
            properties: vec![
                PropertyMapping {
                    name: "name".to_string(),
                    property_id: Some("https://schema.org/name".to_string()),
                },
                PropertyMapping {
                    name: "location".to_string(),
                    property_id: location_id.map(str::to_string),
                },
            ],
            relations: vec![RelationMapping {
                name: "attendees".to_string(),
                relation_id: Some("https://schema.org/attendee".to_string()),
            }],
        }
    }

    // ========================================================================
    // Mapping object
    // ========================================================================

    #[test]
    fn test_mapping_object_lists_mapped_entries() {
        let code = mapping_object(&[event(Some("https://schema.org/location"))]);
        assert!(code.contains("    typeId: 'https://schema.org/Event',\n"));
        assert!(code.contains("      name: 'https://schema.org/name',\n"));
        assert!(code.contains("      location: 'https://schema.org/location'\n"));
        assert!(code.contains("      attendees: 'https://schema.org/attendee'\n"));
    }

    #[test]
    fn test_mapping_object_marks_unmapped() {
        let code = mapping_object(&[event(None)]);
        assert!(code.contains("      name: 'https://schema.org/name'\n"));
        assert!(code.contains("      // location: not mapped\n"));
        assert!(!code.contains("location: '"));
    }

    #[test]
    fn test_mapping_object_joins_entities() {
        let mut user = event(None);
        user.name = "User".to_string();
        let code = mapping_object(&[event(None), user]);
        assert!(code.contains("  },\n  User: {"));
        assert!(code.ends_with("  }\n};\n\n"));
    }

    // ========================================================================
    // Validation
    // ========================================================================

    #[test]
    fn test_missing_mapping_reported_once() {
        let code = validation(&[event(None)], true);
        assert_eq!(
            code.matches("Missing property mapping for Event.location").count(),
            1
        );
        assert_eq!(code.matches("Missing property mapping for Event.name").count(), 0);
    }

    #[test]
    fn test_fully_mapped_has_no_gaps() {
        let code = validation(&[event(Some("https://schema.org/location"))], true);
        assert!(!code.contains("Missing property mapping"));
        assert!(code.contains("const unmappedFields: string[] = [\n];"));
        assert!(code.contains("export function testMapping(): boolean"));
    }

    #[test]
    fn test_validation_disabled() {
        assert!(validation(&[event(None)], false).is_empty());
    }

    // ========================================================================
    // Examples
    // ========================================================================

    #[test]
    fn test_example_usage_uses_first_entity() {
        let code = example_usage(&[event(None)], true);
        assert!(code.contains("const eventData = {"));
        assert!(code.contains("    name: 'Example Event',\n"));
        assert!(code.contains("    location: 'example location'\n"));
        assert!(code.contains("function EventList()"));
        assert!(code.contains("<p><strong>name:</strong> {event.name}</p>"));
    }

    #[test]
    fn test_imports_name_all_entities() {
        let mut user = event(None);
        user.name = "User".to_string();
        let code = imports(&[event(None), user]);
        assert!(code.contains("import { Event, User } from './schema';"));
    }
}
