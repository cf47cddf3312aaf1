//! Quickstart project generation (`generate_quickstart`).
//!
//! The artifact is one markdown document describing a starter project: the
//! file tree, then a fenced code block per file, then setup instructions.
//! Section order:
//!
//! 1. title and project structure
//! 2. `package.json` and configuration files
//! 3. schema and mapping modules for the requested entity types
//! 4. the framework application (React, Next.js, vanilla TypeScript or an
//!    Express API)
//! 5. example records, when enabled
//! 6. setup instructions
//!
//! Vanilla TypeScript projects are always typed, whatever `useTypeScript`
//! says.

mod entities;
mod manifest;
mod tree;

use crate::TemplateEngine;
use crate::common::{assemble, gated};
use entities::EntityView;
use hypergraph_core::{ProjectFramework, QuickstartRequest, Result};
use manifest::{Entry, Script};
use serde::Serialize;

/// Context shared by every quickstart template.
#[derive(Debug, Serialize)]
#[allow(clippy::struct_excessive_bools)]
struct ProjectContext {
    project_name: String,
    /// Directory the project lives in
    project_dir: String,
    /// npm package name
    package_name: String,
    #[serde(skip)]
    framework: ProjectFramework,
    framework_name: &'static str,
    react: bool,
    nextjs: bool,
    vanilla_ts: bool,
    express: bool,
    typed: bool,
    include_auth: bool,
    /// Express protects its entity routes with a bearer token
    api_token: bool,
    ext: &'static str,
    extx: &'static str,
    /// Fence language for script files
    lang: &'static str,
    jsx: bool,
    jsx_mode: &'static str,
    vite: bool,
    tsconfig_include: &'static str,
    /// Prefix of client-visible environment variables
    env_prefix: &'static str,
    /// Expression reading the client id at runtime
    client_id_expr: String,
    components_dir: &'static str,
    /// Attribute carrying the target of a `Link`
    link_attr: &'static str,
    /// Function redirecting after the auth callback
    navigate: &'static str,
    /// Effect dependency for [`ProjectContext::navigate`]
    navigate_dep: &'static str,
    schema_file: String,
    mapping_file: String,
    /// `Events, Users and Posts`
    summary: String,
    entities: Vec<EntityView>,
    dependencies: Vec<Entry>,
    dev_dependencies: Vec<Entry>,
    scripts: Vec<Script>,
}

impl ProjectContext {
    fn new(request: &QuickstartRequest, entity_names: &[String]) -> Self {
        let framework = request.framework;
        let typed = request.use_type_script || framework == ProjectFramework::VanillaTs;
        let (ext, extx) = if typed { ("ts", "tsx") } else { ("js", "jsx") };
        let react = framework == ProjectFramework::React;
        let nextjs = framework == ProjectFramework::NextJs;
        let vanilla_ts = framework == ProjectFramework::VanillaTs;
        let express = framework == ProjectFramework::ExpressApi;

        let env_prefix = match framework {
            ProjectFramework::React | ProjectFramework::VanillaTs => "VITE_",
            ProjectFramework::NextJs => "NEXT_PUBLIC_",
            ProjectFramework::ExpressApi => "",
        };
        let client_id_expr = if react || vanilla_ts {
            format!("import.meta.env.{env_prefix}HYPERGRAPH_CLIENT_ID")
        } else {
            format!("process.env.{env_prefix}HYPERGRAPH_CLIENT_ID")
        };

        let (schema_file, mapping_file) = match framework {
            ProjectFramework::React => (
                format!("src/schema/index.{ext}"),
                format!("src/mapping/index.{ext}"),
            ),
            ProjectFramework::NextJs => (format!("lib/schema.{ext}"), format!("lib/mapping.{ext}")),
            ProjectFramework::VanillaTs => ("src/lib/schema.ts".to_string(), "src/lib/mapping.ts".to_string()),
            ProjectFramework::ExpressApi => (
                format!("src/models/schema.{ext}"),
                format!("src/models/mapping.{ext}"),
            ),
        };

        let project_dir = request.project_name.trim().to_string();

        Self {
            package_name: package_name(&project_dir),
            project_name: project_dir.clone(),
            project_dir,
            framework,
            framework_name: framework.as_str(),
            react,
            nextjs,
            vanilla_ts,
            express,
            typed,
            include_auth: request.include_auth,
            api_token: express && request.include_auth,
            ext,
            extx,
            lang: if typed { "typescript" } else { "javascript" },
            jsx: react || nextjs,
            jsx_mode: if nextjs { "preserve" } else { "react-jsx" },
            vite: react || vanilla_ts,
            tsconfig_include: if nextjs {
                r#"["next-env.d.ts", "**/*.ts", "**/*.tsx"]"#
            } else {
                r#"["src"]"#
            },
            env_prefix,
            client_id_expr,
            components_dir: if nextjs { "components" } else { "src/components" },
            link_attr: if nextjs { "href" } else { "to" },
            navigate: if nextjs { "router.replace" } else { "navigate" },
            navigate_dep: if nextjs { "router" } else { "navigate" },
            schema_file,
            mapping_file,
            summary: summary(entity_names),
            entities: entity_names.iter().map(|n| EntityView::new(n)).collect(),
            dependencies: manifest::dependencies(framework),
            dev_dependencies: manifest::dev_dependencies(framework, typed),
            scripts: manifest::scripts(framework, typed),
        }
    }
}

#[derive(Serialize)]
struct EntityListContext<'a> {
    #[serde(flatten)]
    entity: &'a EntityView,
    typed: bool,
    extx: &'static str,
    lang: &'static str,
    dir: String,
    schema_import: &'static str,
}

/// Generates the quickstart artifact for a request.
///
/// # Errors
///
/// Returns a validation error for an empty project name, an empty entity
/// list or a non-identifier entity type, or a template error if a built-in
/// template fails to render.
pub fn generate(engine: &TemplateEngine<'_>, request: &QuickstartRequest) -> Result<String> {
    let entity_names = request.entity_types()?;
    let ctx = ProjectContext::new(request, &entity_names);

    tracing::debug!(
        project = %ctx.project_name,
        framework = %ctx.framework,
        entities = entity_names.len(),
        typed = ctx.typed,
        auth = ctx.include_auth,
        "composing quickstart project"
    );

    let app = match ctx.framework {
        ProjectFramework::React => assemble([
            engine.render("quickstart/react_app", &ctx)?,
            components(engine, &ctx, "../../schema")?,
        ]),
        ProjectFramework::NextJs => assemble([
            engine.render("quickstart/nextjs_app", &ctx)?,
            components(engine, &ctx, "../../lib/schema")?,
        ]),
        ProjectFramework::VanillaTs => engine.render("quickstart/vanilla_app", &ctx)?,
        ProjectFramework::ExpressApi => engine.render("quickstart/express_api", &ctx)?,
    };

    Ok(assemble([
        format!(
            "# {} - Hypergraph Quickstart\n\nGenerated Hypergraph project with {} framework.\n\n",
            ctx.project_name, ctx.framework_name
        ),
        tree::project_structure(&ctx),
        engine.render("quickstart/package_json", &ctx)?,
        engine.render("quickstart/config_files", &ctx)?,
        schema_file(&ctx, &entity_names),
        mapping_file(&ctx, &entity_names),
        app,
        gated(request.include_examples, || example_data(&entity_names)),
        engine.render("quickstart/instructions", &ctx)?,
    ]))
}

/// React components shared by the React and Next.js projects.
fn components(
    engine: &TemplateEngine<'_>,
    ctx: &ProjectContext,
    schema_import: &'static str,
) -> Result<String> {
    let mut fragments = vec![engine.render("quickstart/layout", ctx)?];
    for entity in &ctx.entities {
        let list = EntityListContext {
            entity,
            typed: ctx.typed,
            extx: ctx.extx,
            lang: ctx.lang,
            dir: format!("{}/Entities", ctx.components_dir),
            schema_import,
        };
        fragments.push(engine.render("quickstart/entity_list", &list)?);
    }
    fragments.push(engine.render_if(ctx.include_auth, "quickstart/auth_components", ctx)?);
    Ok(assemble(fragments))
}

fn schema_file(ctx: &ProjectContext, entity_names: &[String]) -> String {
    let classes = entity_names
        .iter()
        .map(|name| entities::schema_class(name, ctx.typed))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "## {}\n\n```{}\nimport {{ Entity, Type }} from '@graphprotocol/hypergraph';\n\n{classes}```\n\n",
        ctx.schema_file, ctx.lang
    )
}

fn mapping_file(ctx: &ProjectContext, entity_names: &[String]) -> String {
    let mut out = format!("## {}\n\n```{}\n", ctx.mapping_file, ctx.lang);
    if ctx.typed {
        out.push_str("import type { Mapping } from '@graphprotocol/hypergraph';\n\n");
    }

    let entries = entity_names
        .iter()
        .map(|name| entities::mapping_entry(name))
        .collect::<Vec<_>>()
        .join(",\n");
    let annotation = if ctx.typed { ": Mapping" } else { "" };
    out.push_str(&format!(
        "// Knowledge Graph mapping configuration\nexport const mapping{annotation} = {{\n{entries}\n}};\n\n"
    ));

    let errors = if ctx.typed { "errors: string[]" } else { "errors" };
    out.push_str(&format!(
        "// Validate mapping configuration\nexport function validateMapping() {{\n  const {errors} = [];\n\n"
    ));
    for name in entity_names {
        out.push_str(&format!(
            "  if (!mapping.{name}) {{\n    errors.push('Missing mapping for {name}');\n  }}\n\n"
        ));
    }
    out.push_str("  return {\n    isValid: errors.length === 0,\n    errors\n  };\n}\n```\n\n");
    out
}

fn example_data(entity_names: &[String]) -> String {
    let mut out = "## Example Data\n\n".to_string();
    for name in entity_names {
        out.push_str(&format!(
            "### Example {name} Data\n\n```json\n{}\n```\n\n",
            entities::example_json(name)
        ));
    }
    out
}

/// `Events`, `Events and Users`, `Events, Users and Posts`.
fn summary(entity_names: &[String]) -> String {
    let plurals: Vec<String> = entity_names.iter().map(|n| format!("{n}s")).collect();
    match plurals.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {last}", rest.join(", ")),
    }
}

/// Lower-case, with runs of other characters collapsed to `-`.
fn package_name(project: &str) -> String {
    let mut name = String::with_capacity(project.len());
    for ch in project.chars() {
        if ch.is_ascii_alphanumeric() || ch == '.' || ch == '_' {
            name.push(ch.to_ascii_lowercase());
        } else if !name.is_empty() && !name.ends_with('-') {
            name.push('-');
        }
    }
    let trimmed = name.trim_end_matches('-');
    if trimmed.is_empty() {
        "hypergraph-app".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: serde_json::Value) -> String {
        let engine = TemplateEngine::new().unwrap();
        let request: QuickstartRequest = serde_json::from_value(value).unwrap();
        generate(&engine, &request).unwrap()
    }

    fn section<'a>(doc: &'a str, heading: &str) -> &'a str {
        let start = doc.find(heading).unwrap_or_else(|| panic!("missing {heading}"));
        let rest = &doc[start + heading.len()..];
        rest.find("\n## ").map_or(rest, |end| &rest[..end])
    }

    // ========================================================================
    // Document layout
    // ========================================================================

    #[test]
    fn test_section_order() {
        let doc = render(json!({}));
        let headings = [
            "# my-hypergraph-app - Hypergraph Quickstart",
            "## Project Structure",
            "## package.json",
            "## tsconfig.json",
            "## vite.config.ts",
            "## .env.example",
            "## src/schema/index.ts",
            "## src/mapping/index.ts",
            "## src/App.tsx",
            "## src/components/Layout.tsx",
            "## src/components/Entities/EventList.tsx",
            "## src/components/Auth/AuthButton.tsx",
            "## Example Data",
            "## Setup Instructions",
        ];
        let positions: Vec<usize> = headings
            .iter()
            .map(|h| doc.find(h).unwrap_or_else(|| panic!("missing {h}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[test]
    fn test_package_json_is_valid_json() {
        for framework in ["react", "nextjs", "vanilla-ts", "express-api"] {
            for typed in [true, false] {
                let doc = render(json!({ "framework": framework, "useTypeScript": typed }));
                let body = section(&doc, "## package.json\n\n```json\n");
                let json_text = &body[..body.find("```").unwrap()];
                let parsed: serde_json::Value = serde_json::from_str(json_text)
                    .unwrap_or_else(|e| panic!("{framework}/{typed}: {e}\n{json_text}"));
                assert_eq!(parsed["name"], "my-hypergraph-app");
            }
        }
    }

    #[test]
    fn test_schema_and_mapping_files() {
        let doc = render(json!({ "entityTypes": ["event", "Recipe"] }));
        let schema = section(&doc, "## src/schema/index.ts");
        assert!(schema.contains("export class Event extends Entity.Class<Event>('Event')({"));
        assert!(schema.contains("export class Recipe extends Entity.Class<Recipe>('Recipe')({"));
        assert!(!schema.contains("export {"));

        let mapping = section(&doc, "## src/mapping/index.ts");
        assert!(mapping.contains("export const mapping: Mapping = {\n  Event: {"));
        assert!(mapping.contains("typeId: 'https://schema.org/Thing'"));
        assert!(mapping.contains("errors.push('Missing mapping for Recipe');"));
    }

    #[test]
    fn test_javascript_project() {
        let doc = render(json!({ "useTypeScript": false, "includeAuth": false }));
        assert!(doc.contains("## src/App.jsx"));
        assert!(doc.contains("export const mapping = {"));
        assert!(doc.contains("Entity.Class('Event')"));
        assert!(!doc.contains("## tsconfig.json"));
        assert!(!doc.contains("interface "));
        assert!(!doc.contains("AuthButton"));
    }

    #[test]
    fn test_examples_toggle() {
        let with = render(json!({}));
        let without = render(json!({ "includeExamples": false }));
        assert!(with.contains("### Example Event Data"));
        assert!(!without.contains("## Example Data"));
    }

    #[test]
    fn test_invalid_requests() {
        let engine = TemplateEngine::new().unwrap();
        for value in [
            json!({ "projectName": "  " }),
            json!({ "entityTypes": [] }),
            json!({ "entityTypes": ["my entity"] }),
        ] {
            let request: QuickstartRequest = serde_json::from_value(value).unwrap();
            assert!(generate(&engine, &request).unwrap_err().is_validation_error());
        }
    }

    // ========================================================================
    // Frameworks
    // ========================================================================

    #[test]
    fn test_react_app_routes() {
        let doc = render(json!({ "entityTypes": ["Event", "Post"] }));
        let app = section(&doc, "## src/App.tsx");
        assert!(app.contains("<Route path=\"/events\" element={<EventList />} />"));
        assert!(app.contains("<Route path=\"/posts\" element={<PostList />} />"));
        assert!(app.contains("<Route path=\"/auth/callback\" element={<AuthCallback />} />"));
        assert!(app.contains("managing Events and Posts."));
    }

    #[test]
    fn test_entity_list_component() {
        let doc = render(json!({ "entityTypes": ["Event"] }));
        let list = section(&doc, "## src/components/Entities/EventList.tsx");
        assert!(list.contains("import { Event } from '../../schema';"));
        assert!(list.contains("const { data: events, loading, error } = useQuery(Event, { mode: 'private' });"));
        assert!(list.contains("function EventForm({ onSubmit, onCancel }: EventFormProps) {"));
        assert!(list.contains("<h3>{event.name}</h3>"));
        assert!(list.contains("export default EventList;"));
    }

    #[test]
    fn test_nextjs_project() {
        let doc = render(json!({ "framework": "nextjs" }));
        assert!(doc.contains("## pages/_app.tsx"));
        assert!(doc.contains("## pages/events.tsx"));
        assert!(doc.contains("## pages/auth/callback.tsx"));
        assert!(doc.contains("## components/Entities/UserList.tsx"));
        assert!(doc.contains("import { User } from '../../lib/schema';"));
        assert!(doc.contains("<Link href=\"/users\">Users</Link>"));
        assert!(doc.contains("NEXT_PUBLIC_HYPERGRAPH_CLIENT_ID=your-client-id"));
        assert!(!doc.contains("react-router-dom"));
    }

    #[test]
    fn test_vanilla_project_is_typed() {
        let doc = render(json!({ "framework": "vanilla-ts", "useTypeScript": false }));
        assert!(doc.contains("## src/lib/hypergraph.ts"));
        assert!(doc.contains("## src/components/auth.ts"));
        assert!(doc.contains("## tsconfig.json"));
        assert!(doc.contains("clientId: import.meta.env.VITE_HYPERGRAPH_CLIENT_ID"));
    }

    #[test]
    fn test_express_project() {
        let doc = render(json!({ "framework": "express-api", "includeAuth": false }));
        assert!(doc.contains("## src/index.ts"));
        assert!(doc.contains("app.use('/api/entities', entityRouter);"));
        assert!(doc.contains("'events': Event,"));
        assert!(!doc.contains("requireAuth"));
        assert!(!doc.contains("API_TOKEN"));

        let secured = render(json!({ "framework": "express-api" }));
        assert!(secured.contains("app.use('/api/entities', requireAuth, entityRouter);"));
        assert!(secured.contains("API_TOKEN=change-me"));
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    #[test]
    fn test_summary() {
        let names = |v: &[&str]| v.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(summary(&names(&["Event"])), "Events");
        assert_eq!(summary(&names(&["Event", "User"])), "Events and Users");
        assert_eq!(summary(&names(&["Event", "User", "Post"])), "Events, Users and Posts");
    }

    #[test]
    fn test_package_name() {
        assert_eq!(package_name("My Cool App"), "my-cool-app");
        assert_eq!(package_name("my-hypergraph-app"), "my-hypergraph-app");
        assert_eq!(package_name("!!!"), "hypergraph-app");
    }
}
