//! Space setup generation (`create_space`).

use crate::TemplateEngine;
use crate::common::assemble;
use crate::common::typescript::quote;
use hypergraph_core::{Flavor, Result, SpaceRequest, SpaceType};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct SpaceContext {
    ident: String,
    html_id: String,
    name_literal: String,
    description_literal: String,
    space_type: &'static str,
    public: bool,
    include_invitations: bool,
    typed: bool,
}

/// Generates the space artifact for a request.
///
/// # Errors
///
/// Returns a validation error if the space name does not form an identifier
/// once whitespace is removed, or a template error if a built-in template
/// fails to render.
pub fn generate(engine: &TemplateEngine<'_>, request: &SpaceRequest) -> Result<String> {
    let ident = request.space_identifier()?;
    let ctx = SpaceContext {
        html_id: ident.to_lowercase(),
        name_literal: quote(request.space_name.trim()),
        description_literal: quote(&request.description),
        space_type: request.space_type.as_str(),
        public: request.space_type == SpaceType::Public,
        include_invitations: request.include_invitations,
        typed: request.framework != Flavor::VanillaJs,
        ident,
    };

    tracing::debug!(
        space = %ctx.ident,
        flavor = %request.framework,
        space_type = ctx.space_type,
        invitations = ctx.include_invitations,
        "composing space setup"
    );

    let header = header(request);
    Ok(match request.framework {
        Flavor::React => assemble([
            header,
            engine.render("space/react", &ctx)?,
            engine.render("space/styles", &ctx)?,
        ]),
        Flavor::TypeScript => assemble([header, engine.render("space/manager", &ctx)?]),
        Flavor::VanillaJs => assemble([
            header,
            engine.render("space/manager", &ctx)?,
            engine.render("space/vanilla_ui", &ctx)?,
        ]),
    })
}

fn header(request: &SpaceRequest) -> String {
    let description = one_line(&request.description);
    let comment = if description.is_empty() {
        String::new()
    } else {
        format!("// {description}\n")
    };
    format!(
        "// Hypergraph {} Space: {}\n{comment}\n",
        request.space_type,
        one_line(&request.space_name)
    )
}

/// Collapses whitespace runs so free text stays inside a `//` comment.
fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
