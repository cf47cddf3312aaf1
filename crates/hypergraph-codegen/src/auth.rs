//! Authentication setup generation (`setup_authentication`).
//!
//! Geo Connect output is a React component plus `useAuth` hook, or a
//! `HypergraphAuthManager` class (typed, or plain with an HTML template).
//! The custom method emits a pluggable `AuthProvider` contract and a
//! `CustomAuthManager` in the selected flavor.

use crate::TemplateEngine;
use crate::common::assemble;
use crate::common::typescript::quote;
use hypergraph_core::{AuthMethod, AuthenticationRequest, Flavor, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[allow(clippy::struct_excessive_bools)]
struct AuthContext {
    typed: bool,
    react: bool,
    redirect: bool,
    errors: bool,
    /// Argument passed to `redirectToConnect` from React
    connect_arg: String,
    /// Argument passed to `redirectToConnect` from a manager class
    manager_domain: String,
    /// `customDomain` value shown in usage examples
    usage_domain: String,
    login_url: String,
    callback_url: String,
}

impl AuthContext {
    fn new(request: &AuthenticationRequest) -> Self {
        let domain = request
            .custom_domain
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());

        Self {
            typed: request.framework != Flavor::VanillaJs,
            react: request.framework == Flavor::React,
            redirect: request.include_redirect,
            errors: request.include_error_handling,
            connect_arg: domain.map(quote).unwrap_or_default(),
            manager_domain: domain.map_or_else(|| "this.config.customDomain".to_string(), quote),
            usage_domain: quote(domain.unwrap_or("your-app-domain.com")),
            login_url: domain.map_or_else(
                || quote("/login"),
                |d| quote(&format!("https://{d}/login")),
            ),
            callback_url: domain.map_or_else(
                || quote("/auth/callback"),
                |d| quote(&format!("https://{d}/auth/callback")),
            ),
        }
    }
}

/// Generates the authentication artifact for a request.
///
/// # Errors
///
/// Returns a template error if a built-in template fails to render.
pub fn generate(engine: &TemplateEngine<'_>, request: &AuthenticationRequest) -> Result<String> {
    let ctx = AuthContext::new(request);

    tracing::debug!(
        method = %request.auth_method,
        flavor = %request.framework,
        redirect = ctx.redirect,
        errors = ctx.errors,
        "composing authentication setup"
    );

    let header = "// Hypergraph Authentication Setup\n\n".to_string();

    Ok(match (request.auth_method, request.framework) {
        (AuthMethod::GeoConnect, Flavor::React) => assemble([
            header,
            "import { useHypergraphAuth } from '@graphprotocol/hypergraph-react';\nimport { useState, useEffect } from 'react';\n\n".to_string(),
            engine.render("auth/react", &ctx)?,
            engine.render("auth/styles", &ctx)?,
        ]),
        (AuthMethod::GeoConnect, Flavor::TypeScript) => assemble([
            header,
            "import { HypergraphApp } from '@graphprotocol/hypergraph';\n\n".to_string(),
            engine.render("auth/manager", &ctx)?,
        ]),
        (AuthMethod::GeoConnect, Flavor::VanillaJs) => assemble([
            header,
            "// Vanilla JavaScript Hypergraph Authentication\n\n".to_string(),
            engine.render("auth/manager", &ctx)?,
            engine.render("auth/vanilla_ui", &ctx)?,
        ]),
        (AuthMethod::Custom, flavor) => assemble([
            header,
            custom_imports(flavor),
            engine.render("auth/custom", &ctx)?,
        ]),
    })
}

fn custom_imports(flavor: Flavor) -> String {
    match flavor {
        Flavor::React => "import { useState, useEffect } from 'react';\n\n".to_string(),
        Flavor::TypeScript => String::new(),
        Flavor::VanillaJs => "// Vanilla JavaScript Custom Authentication\n\n".to_string(),
    }
}
