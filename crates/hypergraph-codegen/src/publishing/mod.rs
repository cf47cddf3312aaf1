//! Publishing flow generation (`create_publishing_flow`).
//!
//! A flow is one flavor crossed with one strategy. The flavor decides the
//! shell: a React component, or a manager class in TypeScript or plain
//! JavaScript. The strategy ([`FlowStrategy`]) fills the shell with its own
//! state and control flow. Validation and preview helpers are shared by all
//! strategies and rendered from templates.

mod strategy;

pub use strategy::{ChunkPlan, FlowStrategy, for_strategy};

use crate::TemplateEngine;
use crate::common::assemble;
use crate::common::typescript::{to_camel_case, to_kebab_case};
use hypergraph_core::{Flavor, PublishingRequest, Result, capitalize};
use serde::Serialize;

/// Everything a strategy and the publishing templates need to know about
/// one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowContext {
    /// Entity type name, capitalized
    pub entity: String,
    /// Entity name as a variable (`eventData`, ...)
    pub var: String,
    /// Root CSS class of the React component
    pub css_class: String,
    /// Manager output carries TypeScript annotations
    pub typed: bool,
    /// Validation helpers are generated
    pub validated: bool,
    /// Preview helpers are generated
    pub preview: bool,
    /// Items per chunk for batch publishing
    pub batch_size: usize,
    /// Expected queue length for a chunk plan
    pub queue_length: Option<usize>,
}

impl FlowContext {
    /// Builds the context for a request.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-identifier entity type or a zero
    /// batch size.
    pub fn from_request(request: &PublishingRequest) -> Result<Self> {
        let entity = capitalize(&request.entity_type()?);
        Ok(Self {
            var: to_camel_case(&entity),
            css_class: format!("{}-publishing", to_kebab_case(&entity)),
            typed: request.framework == Flavor::TypeScript,
            validated: request.include_validation,
            preview: request.include_preview,
            batch_size: request.batch_size,
            queue_length: request.queue_length,
            entity,
        })
    }

    /// Expression extracting a message from a caught `error`.
    #[must_use]
    pub const fn error_message(&self) -> &'static str {
        if self.typed {
            "error instanceof Error ? error.message : 'Unknown error'"
        } else {
            "error.message"
        }
    }

    /// Picks the annotated or the plain form of a piece of source.
    #[must_use]
    pub const fn pick<'a>(&self, typed: &'a str, plain: &'a str) -> &'a str {
        if self.typed { typed } else { plain }
    }
}

#[derive(Serialize)]
struct ShellContext<'a> {
    #[serde(flatten)]
    flow: &'a FlowContext,
    strategy_fields: String,
}

/// Generates the publishing flow artifact for a request.
///
/// # Errors
///
/// Returns a validation error for bad arguments, or a template error if a
/// built-in template fails to render.
pub fn generate(engine: &TemplateEngine<'_>, request: &PublishingRequest) -> Result<String> {
    let ctx = FlowContext::from_request(request)?;
    let strategy = for_strategy(request.publishing_strategy);

    tracing::debug!(
        entity = %ctx.entity,
        flavor = %request.framework,
        strategy = %strategy.kind(),
        validated = ctx.validated,
        preview = ctx.preview,
        "composing publishing flow"
    );

    match request.framework {
        Flavor::React => react_flow(engine, &ctx, strategy),
        Flavor::TypeScript | Flavor::VanillaJs => manager_flow(engine, &ctx, strategy),
    }
}

// ============================================================================
// React component
// ============================================================================

fn react_imports(ctx: &FlowContext, strategy: &dyn FlowStrategy) -> String {
    let entity = &ctx.entity;
    let mut components = strategy.react_components(ctx);
    if ctx.preview {
        components.push("PreviewModal".to_string());
    }
    let component_imports: String = components
        .iter()
        .map(|c| format!("import {{ {c} }} from './components/{c}';\n"))
        .collect();

    format!(
        "// Hypergraph Publishing Flow for {entity}\n\n\
         import React, {{ {} }} from 'react';\n\
         import {{ preparePublish, publishOps }} from '@graphprotocol/hypergraph';\n\
         import {{ {entity} }} from './schema';\n\
         import {{ mapping }} from './mapping';\n\
         {component_imports}\n",
        strategy.react_hooks()
    )
}

fn react_component_open(ctx: &FlowContext) -> String {
    let validation_state = if ctx.validated {
        "  const [validationResults, setValidationResults] = useState(null);\n"
    } else {
        ""
    };
    let preview_state = if ctx.preview {
        "  const [previewData, setPreviewData] = useState(null);\n  const [showPreview, setShowPreview] = useState(false);\n"
    } else {
        ""
    };
    format!(
        "export function {}PublishingComponent() {{\n  const [publishingState, setPublishingState] = useState({{\n    status: 'idle', // 'idle' | 'preparing' | 'publishing' | 'success' | 'error'\n    progress: 0,\n    error: null,\n    publishedCount: 0\n  }});\n{validation_state}{preview_state}\n",
        ctx.entity
    )
}

fn react_flow(
    engine: &TemplateEngine<'_>,
    ctx: &FlowContext,
    strategy: &dyn FlowStrategy,
) -> Result<String> {
    Ok(assemble([
        react_imports(ctx, strategy),
        react_component_open(ctx),
        strategy.react_state(ctx),
        engine.render_if(ctx.validated, "publishing/react/validation", ctx)?,
        engine.render_if(ctx.preview, "publishing/react/preview", ctx)?,
        strategy.react_logic(ctx),
        format!(
            "  return (\n    <div className=\"{}\">\n      <h2>{} Publishing</h2>\n\n",
            ctx.css_class, ctx.entity
        ),
        engine.render("publishing/react/status", ctx)?,
        strategy.react_ui(ctx),
        engine.render_if(ctx.preview, "publishing/react/preview_modal", ctx)?,
        "    </div>\n  );\n}\n\n".to_string(),
        engine.render("publishing/styles", ctx)?,
        strategy.notes(ctx),
    ]))
}

// ============================================================================
// Manager class (TypeScript and vanilla JavaScript)
// ============================================================================

fn manager_imports(ctx: &FlowContext) -> String {
    let entity = &ctx.entity;
    let banner = if ctx.typed {
        String::new()
    } else {
        format!("// Vanilla JavaScript Publishing Manager for {entity}\n\n")
    };
    format!(
        "// Hypergraph Publishing Flow for {entity}\n\n{banner}\
         import {{ HypergraphApp, preparePublish, publishOps }} from '@graphprotocol/hypergraph';\n\
         import {{ {entity} }} from './schema';\n\
         import {{ mapping }} from './mapping';\n\n"
    )
}

fn manager_usage(ctx: &FlowContext, strategy: &dyn FlowStrategy) -> String {
    let setup = format!(
        "const hypergraphApp = new HypergraphApp({{ mapping }});\nconst publishingManager = new {}PublishingManager(hypergraphApp);\n\n// Listen to state changes\nconst unsubscribe = publishingManager.onStateChange((state) => {{\n  console.log('Publishing state:', state);\n}});\n\n",
        ctx.entity
    );
    let calls = strategy.usage(ctx);
    if ctx.typed {
        format!("// Usage Example\n/*\n{setup}{calls}\n// Cleanup\nunsubscribe();\n*/\n")
    } else {
        format!("// Usage Example\n{setup}{calls}")
    }
}

fn manager_flow(
    engine: &TemplateEngine<'_>,
    ctx: &FlowContext,
    strategy: &dyn FlowStrategy,
) -> Result<String> {
    let shell = ShellContext {
        flow: ctx,
        strategy_fields: strategy.manager_fields(ctx),
    };
    let get_state = ctx.pick("  getState(): PublishingState {", "  getState() {");

    Ok(assemble([
        manager_imports(ctx),
        engine.render("publishing/manager/shell", &shell)?,
        strategy.manager_methods(ctx),
        engine.render_if(ctx.validated, "publishing/manager/validation", ctx)?,
        engine.render_if(ctx.preview, "publishing/manager/preview", ctx)?,
        format!("{get_state}\n    return {{ ...this.state }};\n  }}\n}}\n\n"),
        manager_usage(ctx, strategy),
        strategy.notes(ctx),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hypergraph_core::Strategy;
    use serde_json::json;

    fn request(value: serde_json::Value) -> PublishingRequest {
        serde_json::from_value(value).unwrap()
    }

    fn render(value: serde_json::Value) -> String {
        let engine = TemplateEngine::new().unwrap();
        generate(&engine, &request(value)).unwrap()
    }

    // ========================================================================
    // Context
    // ========================================================================

    #[test]
    fn test_context_from_request() {
        let ctx = FlowContext::from_request(&request(json!({
            "entityType": "blogPost",
            "framework": "typescript"
        })))
        .unwrap();
        assert_eq!(ctx.entity, "BlogPost");
        assert_eq!(ctx.var, "blogPost");
        assert_eq!(ctx.css_class, "blog-post-publishing");
        assert!(ctx.typed);
        assert_eq!(ctx.batch_size, 10);
    }

    #[test]
    fn test_context_rejects_zero_batch() {
        let result = FlowContext::from_request(&request(json!({
            "entityType": "Post",
            "batchSize": 0
        })));
        assert!(result.is_err());
    }

    // ========================================================================
    // Flavors x strategies
    // ========================================================================

    #[test]
    fn test_every_flavor_and_strategy_renders() {
        let engine = TemplateEngine::new().unwrap();
        for flavor in Flavor::ALL {
            for strategy in Strategy::ALL {
                let request = request(json!({
                    "entityType": "Event",
                    "framework": flavor.as_str(),
                    "publishingStrategy": strategy.as_str(),
                    "queueLength": 25
                }));
                let code = generate(&engine, &request);
                assert!(code.is_ok(), "{flavor}/{strategy}: {:?}", code.err());
                let code = code.unwrap();
                assert!(code.contains("Event"), "{flavor}/{strategy}");
            }
        }
    }

    #[test]
    fn test_react_shell() {
        let code = render(json!({ "entityType": "Event" }));
        assert!(code.starts_with("// Hypergraph Publishing Flow for Event\n"));
        assert!(code.contains("export function EventPublishingComponent() {"));
        assert!(code.contains("const validateData = useCallback("));
        assert!(code.contains("const generatePreview = useCallback("));
        assert!(code.contains("<div className=\"event-publishing\">"));
        assert!(code.contains("style={{ width: `${publishingState.progress}%` }}"));
        assert!(code.contains(".event-publishing {"));
        assert!(code.contains("import { PreviewModal } from './components/PreviewModal';"));
    }

    #[test]
    fn test_react_without_toggles() {
        let code = render(json!({
            "entityType": "Event",
            "includeValidation": false,
            "includePreview": false
        }));
        assert!(!code.contains("validateData"));
        assert!(!code.contains("generatePreview"));
        assert!(!code.contains("PreviewModal"));
        assert!(!code.contains("validationResults"));
    }

    #[test]
    fn test_typescript_manager_shell() {
        let code = render(json!({ "entityType": "Event", "framework": "typescript" }));
        assert!(code.contains("interface PublishingState {"));
        assert!(code.contains("interface ValidationResult {"));
        assert!(code.contains("export class EventPublishingManager {"));
        assert!(code.contains("private async validateData(data: any): Promise<ValidationResult> {"));
        assert!(code.contains("getState(): PublishingState {"));
        assert!(code.contains("// Usage Example\n/*\n"));
    }

    #[test]
    fn test_vanilla_manager_shell() {
        let code = render(json!({ "entityType": "Event", "framework": "vanilla-js" }));
        assert!(code.contains("// Vanilla JavaScript Publishing Manager for Event"));
        assert!(code.contains("class EventPublishingManager {"));
        assert!(!code.contains("export class"));
        assert!(!code.contains("interface PublishingState"));
        assert!(code.contains("  async validateData(data) {"));
        assert!(code.contains("  getState() {"));
    }
}
