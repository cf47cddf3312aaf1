//! Query code generation (`generate_query`).
//!
//! The React flavor emits one component reading every selected mode; the
//! TypeScript and vanilla flavors emit a `<Entity>QueryManager` class with
//! one method per mode. All flavors share [`options_fields`], so a filter
//! renders identically everywhere.

use crate::common::assemble;
use crate::common::typescript::{format_literal, quote, to_camel_case, to_kebab_case};
use hypergraph_core::{Flavor, QueryMode, QueryRequest, Result, capitalize};

/// Generates the query artifact for a request.
///
/// # Errors
///
/// Returns a validation error if the entity name or a filter property is
/// not an identifier.
///
/// # Examples
///
/// ```
/// use hypergraph_codegen::query::generate;
/// use hypergraph_core::QueryRequest;
///
/// let request: QueryRequest = serde_json::from_value(serde_json::json!({
///     "entityName": "Person",
///     "filters": [{ "property": "age", "operator": "gt", "value": "21" }]
/// }))
/// .unwrap();
///
/// let code = generate(&request).unwrap();
/// assert!(code.contains("age: { gt: 21 }"));
/// ```
pub fn generate(request: &QueryRequest) -> Result<String> {
    let name = capitalize(&request.entity_name()?);

    tracing::debug!(
        entity = %name,
        flavor = %request.framework,
        mode = %request.query_type,
        filters = request.filters.len(),
        "composing query"
    );

    let fragments = match request.framework {
        Flavor::React => [
            react_imports(&name, request.include_examples),
            react_component(&name, request),
            react_examples(&name, request, request.include_examples),
        ],
        Flavor::TypeScript => [
            typescript_preamble(&name),
            manager_class(&name, request, true),
            typescript_examples(&name, request.query_type, request.include_examples),
        ],
        Flavor::VanillaJs => [
            format!("// Hypergraph Query for {name}\n\n// Vanilla JavaScript Query Manager for {name}\n\n"),
            manager_class(&name, request, false),
            vanilla_examples(&name, request.query_type, request.include_examples),
        ],
    };

    Ok(assemble(fragments))
}

/// Fields of a query options object, one per line at `indent`.
///
/// Always carries the mode; relations, space, and filters follow when set.
///
/// # Examples
///
/// ```
/// use hypergraph_codegen::query::options_fields;
/// use hypergraph_core::QueryRequest;
///
/// let request: QueryRequest = serde_json::from_value(serde_json::json!({
///     "entityName": "Person",
///     "includeRelations": true,
///     "filters": [{ "property": "name", "operator": "is", "value": "Ann" }]
/// }))
/// .unwrap();
///
/// let fields = options_fields("public", &request, "  ");
/// assert_eq!(
///     fields,
///     "  mode: 'public',\n  include: { relations: true },\n  filter: {\n    name: { is: 'Ann' }\n  }"
/// );
/// ```
#[must_use]
pub fn options_fields(mode: &str, request: &QueryRequest, indent: &str) -> String {
    let mut fields = vec![format!("{indent}mode: '{mode}'")];

    if request.include_relations {
        fields.push(format!("{indent}include: {{ relations: true }}"));
    }

    if let Some(space) = request.space_id.as_deref().filter(|s| !s.trim().is_empty()) {
        fields.push(format!("{indent}space: {}", quote(space)));
    }

    if !request.filters.is_empty() {
        let filters: Vec<String> = request
            .filters
            .iter()
            .map(|f| {
                format!(
                    "{indent}  {}: {{ {}: {} }}",
                    f.property,
                    f.operator,
                    format_literal(&f.value)
                )
            })
            .collect();
        fields.push(format!(
            "{indent}filter: {{\n{}\n{indent}}}",
            filters.join(",\n")
        ));
    }

    fields.join(",\n")
}

// ============================================================================
// React
// ============================================================================

fn react_imports(name: &str, examples: bool) -> String {
    let state = if examples {
        "import { useState } from 'react';\n"
    } else {
        ""
    };
    format!(
        "// Hypergraph Query for {name}\n\n{state}import {{ useQuery }} from '@graphprotocol/hypergraph-react';\nimport {{ {name} }} from './schema';\n\n"
    )
}

fn react_hook_call(name: &str, mode: &str, prefix: &str, request: &QueryRequest) -> String {
    let bindings = if prefix.is_empty() {
        "data, loading, error".to_string()
    } else {
        format!("data: {prefix}Data, loading: {prefix}Loading, error: {prefix}Error")
    };
    format!(
        "  const {{ {bindings} }} = useQuery({name}, {{\n{}\n  }});\n",
        options_fields(mode, request, "    ")
    )
}

fn react_section(name: &str, mode: &str, prefix: &str, indent: &str) -> String {
    let title = capitalize(mode);
    let lower = to_camel_case(name);
    let (data, loading, error) = if prefix.is_empty() {
        ("data".to_string(), "loading".to_string(), "error".to_string())
    } else {
        (
            format!("{prefix}Data"),
            format!("{prefix}Loading"),
            format!("{prefix}Error"),
        )
    };
    format!(
        "{indent}<h3>{title} {name}s</h3>\n\
         {indent}{{{loading} && <p>Loading {mode} data...</p>}}\n\
         {indent}{{{error} && <p>Error loading {mode} data: {{{error}.message}}</p>}}\n\
         {indent}{{{data}?.map((item) => (\n\
         {indent}  <div key={{item.id}} className=\"{mode}-item\">\n\
         {indent}    {{/* Render {mode} {lower} */}}\n\
         {indent}    <pre>{{JSON.stringify(item, null, 2)}}</pre>\n\
         {indent}  </div>\n\
         {indent}))}}\n"
    )
}

/// Query component reading every mode of the request.
#[must_use]
pub fn react_component(name: &str, request: &QueryRequest) -> String {
    let css = to_kebab_case(name);
    match request.query_type {
        QueryMode::Both => {
            let hooks: String = QueryMode::Both
                .modes()
                .iter()
                .map(|mode| react_hook_call(name, mode, mode, request))
                .collect();
            let sections: Vec<String> = QueryMode::Both
                .modes()
                .iter()
                .map(|mode| {
                    format!(
                        "      <div className=\"{mode}-data\">\n{}      </div>\n",
                        react_section(name, mode, mode, "        ")
                    )
                })
                .collect();
            format!(
                "// Component for querying both private and public {name} data\nexport function {name}QueryComponent() {{\n{hooks}\n  return (\n    <div className=\"{css}-queries\">\n{}    </div>\n  );\n}}\n\n",
                sections.join("\n")
            )
        }
        QueryMode::Private | QueryMode::Public => {
            let mode = request.query_type.as_str();
            let title = capitalize(mode);
            format!(
                "// Component for querying {mode} {name} data\nexport function {name}{title}QueryComponent() {{\n{}\n  return (\n    <div className=\"{css}-{mode}-query\">\n{}    </div>\n  );\n}}\n\n",
                react_hook_call(name, mode, "", request),
                react_section(name, mode, "", "      ")
            )
        }
    }
}

fn react_examples(name: &str, request: &QueryRequest, enabled: bool) -> String {
    if !enabled {
        return String::new();
    }
    let default_mode = request.query_type.modes().first().copied().unwrap_or("private");
    let lower = to_camel_case(name);
    format!(
        r#"// Advanced Query Examples

// Custom hook for {name} queries
export function use{name}Query(options = {{}}) {{
  const defaultOptions = {{
    mode: '{default_mode}',
    include: {{ relations: {relations} }},
    ...options
  }};

  return useQuery({name}, defaultOptions);
}}

// Filtered query example
export function Filtered{name}Component() {{
  const [searchTerm, setSearchTerm] = useState('');

  const {{ data, loading, error }} = useQuery({name}, {{
    mode: '{default_mode}',
    filter: searchTerm ? {{
      name: {{ contains: searchTerm }}
    }} : undefined
  }});

  return (
    <div>
      <input
        type="text"
        placeholder="Search {lower}s..."
        value={{searchTerm}}
        onChange={{(e) => setSearchTerm(e.target.value)}}
      />

      {{loading && <p>Loading...</p>}}
      {{error && <p>Error: {{error.message}}</p>}}
      {{data?.map((item) => (
        <div key={{item.id}}>
          {{/* Render filtered {lower} */}}
        </div>
      ))}}
    </div>
  );
}}
"#,
        relations = request.include_relations,
    )
}

// ============================================================================
// TypeScript and vanilla JavaScript
// ============================================================================

fn typescript_preamble(name: &str) -> String {
    format!(
        r"// Hypergraph Query for {name}

import {{ HypergraphApp }} from '@graphprotocol/hypergraph';
import {{ {name} }} from './schema';

interface QueryOptions {{
  mode: 'private' | 'public';
  include?: {{ relations?: boolean }};
  space?: string;
  filter?: Record<string, any>;
}}

"
    )
}

fn manager_method(name: &str, mode: &str, request: &QueryRequest, typed: bool) -> String {
    let title = capitalize(mode);
    let (signature, declaration) = if typed {
        (
            format!("  async query{title}(): Promise<any[]> {{"),
            "      const options: QueryOptions = {",
        )
    } else {
        (format!("  async query{title}() {{"), "      const options = {")
    };
    format!(
        "{signature}\n    try {{\n{declaration}\n{}\n      }};\n\n      const result = await this.hypergraphApp.query({name}, options);\n      return result;\n    }} catch (error) {{\n      console.error('Error querying {mode} {name}:', error);\n      throw error;\n    }}\n  }}\n\n",
        options_fields(mode, request, "        ")
    )
}

fn query_both_method(typed: bool) -> String {
    let signature = if typed {
        "  async queryBoth(): Promise<{ private: any[]; public: any[] }> {"
    } else {
        "  async queryBoth() {"
    };
    format!(
        "{signature}\n    try {{\n      const [privateData, publicData] = await Promise.all([\n        this.queryPrivate(),\n        this.queryPublic()\n      ]);\n\n      return {{ private: privateData, public: publicData }};\n    }} catch (error) {{\n      console.error('Error querying both:', error);\n      throw error;\n    }}\n  }}\n"
    )
}

/// `<Entity>QueryManager` class with one method per mode.
///
/// With `typed` set the class is TypeScript (exported, annotated);
/// otherwise it is plain JavaScript.
#[must_use]
pub fn manager_class(name: &str, request: &QueryRequest, typed: bool) -> String {
    let header = if typed {
        format!(
            "export class {name}QueryManager {{\n  private hypergraphApp: HypergraphApp;\n\n  constructor(hypergraphApp: HypergraphApp) {{\n    this.hypergraphApp = hypergraphApp;\n  }}\n\n"
        )
    } else {
        format!(
            "class {name}QueryManager {{\n  constructor(hypergraphApp) {{\n    this.hypergraphApp = hypergraphApp;\n  }}\n\n"
        )
    };
    let methods: String = request
        .query_type
        .modes()
        .iter()
        .map(|mode| manager_method(name, mode, request, typed))
        .collect();
    let both = if request.query_type == QueryMode::Both {
        query_both_method(typed)
    } else {
        String::new()
    };

    format!("{header}{methods}{both}}}\n\n")
}

fn typescript_examples(name: &str, mode: QueryMode, enabled: bool) -> String {
    if !enabled {
        return String::new();
    }
    let body = match mode {
        QueryMode::Both => format!(
            "  // Query both private and public data\n  const {{ private: privateData, public: publicData }} = await queryManager.queryBoth();\n  console.log('Private {name}s:', privateData);\n  console.log('Public {name}s:', publicData);\n"
        ),
        QueryMode::Private | QueryMode::Public => {
            let title = capitalize(mode.as_str());
            format!(
                "  // Query {mode} data\n  const data = await queryManager.query{title}();\n  console.log('{title} {name}s:', data);\n"
            )
        }
    };
    format!(
        "// Usage Examples\n\nasync function example(config: ConstructorParameters<typeof HypergraphApp>[0]) {{\n  const hypergraphApp = new HypergraphApp(config);\n  const queryManager = new {name}QueryManager(hypergraphApp);\n\n{body}}}\n"
    )
}

fn vanilla_examples(name: &str, mode: QueryMode, enabled: bool) -> String {
    if !enabled {
        return String::new();
    }
    let body = match mode {
        QueryMode::Both => format!(
            "// Query both private and public data\nqueryManager.queryBoth()\n  .then(({{ private: privateData, public: publicData }}) => {{\n    console.log('Private {name}s:', privateData);\n    console.log('Public {name}s:', publicData);\n  }})\n  .catch(error => console.error('Query error:', error));\n"
        ),
        QueryMode::Private | QueryMode::Public => {
            let title = capitalize(mode.as_str());
            format!(
                "// Query {mode} data\nqueryManager.query{title}()\n  .then(data => {{\n    console.log('{title} {name}s:', data);\n    // Process data here\n  }})\n  .catch(error => console.error('Query error:', error));\n"
            )
        }
    };
    format!(
        "// Usage Examples\n\n// Initialize and use\nconst hypergraphApp = new HypergraphApp(config);\nconst queryManager = new {name}QueryManager(hypergraphApp);\n\n{body}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: serde_json::Value) -> QueryRequest {
        serde_json::from_value(value).unwrap()
    }

    // ========================================================================
    // Options
    // ========================================================================

    #[test]
    fn test_filter_literals() {
        let request = request(json!({
            "entityName": "Person",
            "filters": [
                { "property": "age", "operator": "gt", "value": "21" },
                { "property": "name", "operator": "is", "value": "Ann" },
                { "property": "active", "operator": "is", "value": "true" }
            ]
        }));
        let fields = options_fields("private", &request, "");
        assert!(fields.contains("  age: { gt: 21 },\n"));
        assert!(fields.contains("  name: { is: 'Ann' },\n"));
        assert!(fields.contains("  active: { is: true }\n"));
    }

    #[test]
    fn test_space_id_is_quoted() {
        let request = request(json!({ "entityName": "Event", "spaceId": "space-1" }));
        assert_eq!(
            options_fields("private", &request, ""),
            "mode: 'private',\nspace: 'space-1'"
        );
    }

    #[test]
    fn test_blank_space_id_ignored() {
        let request = request(json!({ "entityName": "Event", "spaceId": "  " }));
        assert_eq!(options_fields("public", &request, ""), "mode: 'public'");
    }

    // ========================================================================
    // Flavors
    // ========================================================================

    #[test]
    fn test_react_single_mode() {
        let code = generate(&request(json!({ "entityName": "event" }))).unwrap();
        assert!(code.contains("export function EventPrivateQueryComponent()"));
        assert!(code.contains("const { data, loading, error } = useQuery(Event, {\n    mode: 'private'\n  });"));
        assert!(code.contains("export function useEventQuery("));
        assert!(code.contains("import { useState } from 'react';"));
    }

    #[test]
    fn test_react_both_modes() {
        let code = generate(&request(json!({ "entityName": "Event", "queryType": "both" }))).unwrap();
        assert!(code.contains("export function EventQueryComponent()"));
        assert!(code.contains("data: privateData"));
        assert!(code.contains("data: publicData"));
        assert!(code.contains("<div className=\"public-data\">"));
    }

    #[test]
    fn test_react_without_examples() {
        let code = generate(&request(json!({ "entityName": "Event", "includeExamples": false })))
            .unwrap();
        assert!(!code.contains("useEventQuery"));
        assert!(!code.contains("useState"));
    }

    #[test]
    fn test_typescript_manager() {
        let code = generate(&request(json!({
            "entityName": "Event",
            "framework": "typescript",
            "queryType": "both",
            "includeRelations": true
        })))
        .unwrap();
        assert!(code.contains("export class EventQueryManager {"));
        assert!(code.contains("async queryPrivate(): Promise<any[]> {"));
        assert!(code.contains("async queryPublic(): Promise<any[]> {"));
        assert!(code.contains("async queryBoth(): Promise<{ private: any[]; public: any[] }> {"));
        assert!(code.contains("        include: { relations: true }"));
    }

    #[test]
    fn test_vanilla_manager() {
        let code = generate(&request(json!({
            "entityName": "Event",
            "framework": "vanilla-js",
            "queryType": "public"
        })))
        .unwrap();
        assert!(code.contains("class EventQueryManager {"));
        assert!(!code.contains("export class"));
        assert!(code.contains("queryManager.queryPublic()"));
        assert!(!code.contains("queryPrivate"));
    }

    #[test]
    fn test_invalid_entity_name() {
        assert!(generate(&request(json!({ "entityName": "1nvalid" }))).is_err());
    }
}
