//! Template engine for code generation using Handlebars.
//!
//! Wraps Handlebars with every built-in Hypergraph template registered up
//! front. Templates are embedded at compile time and rendered in strict
//! mode, so a missing context field is an error rather than silent output.
//!
//! Output is source code, not HTML: escaping is disabled.
//!
//! # Examples
//!
//! ```
//! use hypergraph_codegen::TemplateEngine;
//! use serde_json::json;
//!
//! let engine = TemplateEngine::new().unwrap();
//! let css = engine
//!     .render("space/styles", &json!({ "include_invitations": false }))
//!     .unwrap();
//! assert!(css.contains(".space-container"));
//! ```

use handlebars::Handlebars;
use hypergraph_core::{Error, Result};
use serde::Serialize;

/// A named template embedded in the binary.
type Embedded = (&'static str, &'static str);

const PUBLISHING_TEMPLATES: &[Embedded] = &[
    (
        "publishing/react/validation",
        include_str!("../templates/publishing/react/validation.hbs"),
    ),
    (
        "publishing/react/preview",
        include_str!("../templates/publishing/react/preview.hbs"),
    ),
    (
        "publishing/react/status",
        include_str!("../templates/publishing/react/status.hbs"),
    ),
    (
        "publishing/react/preview_modal",
        include_str!("../templates/publishing/react/preview_modal.hbs"),
    ),
    (
        "publishing/manager/shell",
        include_str!("../templates/publishing/manager/shell.hbs"),
    ),
    (
        "publishing/manager/validation",
        include_str!("../templates/publishing/manager/validation.hbs"),
    ),
    (
        "publishing/manager/preview",
        include_str!("../templates/publishing/manager/preview.hbs"),
    ),
    (
        "publishing/styles",
        include_str!("../templates/publishing/styles.css.hbs"),
    ),
];

const PROVIDER_TEMPLATES: &[Embedded] = &[
    (
        "providers/auth_wrapper",
        include_str!("../templates/providers/auth_wrapper.tsx.hbs"),
    ),
    (
        "providers/space_provider",
        include_str!("../templates/providers/space_provider.tsx.hbs"),
    ),
    (
        "providers/space_manager",
        include_str!("../templates/providers/space_manager.tsx.hbs"),
    ),
    (
        "providers/hooks",
        include_str!("../templates/providers/hooks.ts.hbs"),
    ),
    (
        "providers/manager",
        include_str!("../templates/providers/manager.ts.hbs"),
    ),
    (
        "providers/styles",
        include_str!("../templates/providers/styles.css.hbs"),
    ),
];

const AUTH_TEMPLATES: &[Embedded] = &[
    (
        "auth/react",
        include_str!("../templates/auth/react.tsx.hbs"),
    ),
    (
        "auth/manager",
        include_str!("../templates/auth/manager.ts.hbs"),
    ),
    (
        "auth/custom",
        include_str!("../templates/auth/custom.ts.hbs"),
    ),
    (
        "auth/vanilla_ui",
        include_str!("../templates/auth/vanilla_ui.js.hbs"),
    ),
    (
        "auth/styles",
        include_str!("../templates/auth/styles.css.hbs"),
    ),
];

const SPACE_TEMPLATES: &[Embedded] = &[
    (
        "space/react",
        include_str!("../templates/space/react.tsx.hbs"),
    ),
    (
        "space/manager",
        include_str!("../templates/space/manager.ts.hbs"),
    ),
    (
        "space/vanilla_ui",
        include_str!("../templates/space/vanilla_ui.js.hbs"),
    ),
    (
        "space/styles",
        include_str!("../templates/space/styles.css.hbs"),
    ),
];

const QUICKSTART_TEMPLATES: &[Embedded] = &[
    (
        "quickstart/package_json",
        include_str!("../templates/quickstart/package.json.hbs"),
    ),
    (
        "quickstart/config_files",
        include_str!("../templates/quickstart/config_files.md.hbs"),
    ),
    (
        "quickstart/react_app",
        include_str!("../templates/quickstart/react_app.md.hbs"),
    ),
    (
        "quickstart/nextjs_app",
        include_str!("../templates/quickstart/nextjs_app.md.hbs"),
    ),
    (
        "quickstart/vanilla_app",
        include_str!("../templates/quickstart/vanilla_app.md.hbs"),
    ),
    (
        "quickstart/express_api",
        include_str!("../templates/quickstart/express_api.md.hbs"),
    ),
    (
        "quickstart/layout",
        include_str!("../templates/quickstart/layout.md.hbs"),
    ),
    (
        "quickstart/entity_list",
        include_str!("../templates/quickstart/entity_list.md.hbs"),
    ),
    (
        "quickstart/auth_components",
        include_str!("../templates/quickstart/auth_components.md.hbs"),
    ),
    (
        "quickstart/instructions",
        include_str!("../templates/quickstart/instructions.md.hbs"),
    ),
];

/// Template engine for code generation.
///
/// Holds a Handlebars registry with all built-in templates. Construction
/// parses every template once; rendering is then read-only, so one engine
/// can serve any number of requests.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl TemplateEngine<'_> {
    /// Creates a new template engine with registered templates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if a built-in template fails to parse.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        for family in [
            PUBLISHING_TEMPLATES,
            PROVIDER_TEMPLATES,
            AUTH_TEMPLATES,
            SPACE_TEMPLATES,
            QUICKSTART_TEMPLATES,
        ] {
            Self::register_family(&mut handlebars, family)?;
        }

        tracing::debug!(
            templates = handlebars.get_templates().len(),
            "template engine ready"
        );

        Ok(Self { handlebars })
    }

    fn register_family(handlebars: &mut Handlebars<'_>, family: &[Embedded]) -> Result<()> {
        for (name, source) in family {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| Error::TemplateError {
                    message: format!("Failed to register template '{name}': {e}"),
                    source: Some(Box::new(e)),
                })?;
        }
        Ok(())
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the template is not registered or
    /// the context lacks a field the template uses.
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::TemplateError {
                message: format!("Rendering '{template_name}' failed: {e}"),
                source: Some(Box::new(e)),
            })
    }

    /// Renders a template only when `enabled` is set.
    ///
    /// Returns an empty string otherwise, which is how toggled-off fragments
    /// disappear from an artifact.
    ///
    /// # Errors
    ///
    /// Same as [`TemplateEngine::render`].
    pub fn render_if<T: Serialize>(
        &self,
        enabled: bool,
        template_name: &str,
        context: &T,
    ) -> Result<String> {
        if enabled {
            self.render(template_name, context)
        } else {
            Ok(String::new())
        }
    }

    /// Returns `true` if a template with this name is registered.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}
