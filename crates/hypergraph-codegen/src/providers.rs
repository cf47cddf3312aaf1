//! Provider setup generation (`setup_providers`).
//!
//! React output wires `HypergraphAppProvider` and `HypergraphSpaceProvider`
//! into one `{App}Providers` wrapper; TypeScript output is a `{App}Manager`
//! class around `HypergraphApp`. Vanilla JavaScript has no provider model
//! and falls back to React.

use crate::TemplateEngine;
use crate::common::{assemble, gated};
use hypergraph_core::{Flavor, ProviderType, ProvidersRequest, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ProviderContext {
    app: String,
    include_auth: bool,
    include_space: bool,
}

/// Generates the provider setup artifact for a request.
///
/// # Errors
///
/// Returns a validation error if the application name is not an identifier,
/// or a template error if a built-in template fails to render.
pub fn generate(engine: &TemplateEngine<'_>, request: &ProvidersRequest) -> Result<String> {
    let ctx = ProviderContext {
        app: request.app_identifier()?,
        include_auth: request.include_auth,
        include_space: request.provider_type.includes_space(),
    };

    tracing::debug!(
        app = %ctx.app,
        flavor = %request.framework,
        provider_type = %request.provider_type,
        "composing provider setup"
    );

    match request.framework {
        Flavor::TypeScript => Ok(assemble([
            "// Hypergraph Provider Setup\n\n".to_string(),
            engine.render("providers/manager", &ctx)?,
        ])),
        Flavor::React | Flavor::VanillaJs => react_setup(engine, &ctx, request),
    }
}

fn react_setup(
    engine: &TemplateEngine<'_>,
    ctx: &ProviderContext,
    request: &ProvidersRequest,
) -> Result<String> {
    let with_app = request.provider_type.includes_app();

    Ok(assemble([
        react_imports(),
        gated(with_app, || app_provider(ctx)),
        engine.render_if(with_app && ctx.include_auth, "providers/auth_wrapper", ctx)?,
        engine.render_if(ctx.include_space, "providers/space_provider", ctx)?,
        engine.render_if(ctx.include_space, "providers/space_manager", ctx)?,
        main_wrapper(&ctx.app, request.provider_type),
        engine.render_if(request.include_custom_hooks, "providers/hooks", ctx)?,
        usage_example(ctx, request.include_custom_hooks),
        engine.render("providers/styles", ctx)?,
    ]))
}

fn react_imports() -> String {
    "// Hypergraph Provider Setup\n\n\
     import React, { createContext, useContext, useState, useEffect } from 'react';\n\
     import {\n  HypergraphAppProvider,\n  HypergraphSpaceProvider,\n  useHypergraphApp,\n  useHypergraphAuth\n} from '@graphprotocol/hypergraph-react';\n\
     import { mapping } from './mapping';\n\n"
        .to_string()
}

fn app_provider(ctx: &ProviderContext) -> String {
    let app = &ctx.app;
    if !ctx.include_auth {
        return format!(
            "// Main App Provider Configuration\nexport function {app}Provider({{ children }}: {{ children: React.ReactNode }}) {{\n  return (\n    <HypergraphAppProvider mapping={{mapping}}>\n      {{children}}\n    </HypergraphAppProvider>\n  );\n}}\n\n"
        );
    }

    format!(
        r#"// Main App Provider Configuration
export function {app}Provider({{ children }}: {{ children: React.ReactNode }}) {{
  const [isInitialized, setIsInitialized] = useState(false);
  const [authConfig, setAuthConfig] = useState(null);

  useEffect(() => {{
    const initAuth = async () => {{
      try {{
        const config = {{
          redirectUri: window.location.origin + '/auth/callback',
          clientId: process.env.REACT_APP_HYPERGRAPH_CLIENT_ID
        }};
        setAuthConfig(config);
        setIsInitialized(true);
      }} catch (error) {{
        console.error('Failed to initialize auth:', error);
      }}
    }};

    initAuth();
  }}, []);

  if (!isInitialized) {{
    return (
      <div className="app-loading">
        <p>Initializing {app}...</p>
      </div>
    );
  }}

  return (
    <HypergraphAppProvider
      mapping={{mapping}}
      authConfig={{authConfig}}
    >
      <AuthenticationWrapper>
        {{children}}
      </AuthenticationWrapper>
    </HypergraphAppProvider>
  );
}}

"#
    )
}

/// The `{App}Providers` wrapper combining the selected layers.
fn main_wrapper(app: &str, provider_type: ProviderType) -> String {
    let body = match provider_type {
        ProviderType::App => format!(
            "  return (\n    <{app}Provider>\n      {{children}}\n    </{app}Provider>\n  );\n"
        ),
        ProviderType::Space => "  const [spaceId, setSpaceId] = useState<string | null>(null);\n\n  return (\n    <HypergraphAppProvider mapping={mapping}>\n      <SpaceManager onSpaceChange={setSpaceId}>\n        {spaceId ? (\n          <SpaceProviderWrapper spaceId={spaceId}>\n            {children}\n          </SpaceProviderWrapper>\n        ) : (\n          <SpaceSelector onSpaceSelect={setSpaceId} />\n        )}\n      </SpaceManager>\n    </HypergraphAppProvider>\n  );\n".to_string(),
        ProviderType::Both => format!(
            "  const [currentSpaceId, setCurrentSpaceId] = useState<string | null>(null);\n\n  return (\n    <{app}Provider>\n      <SpaceManager onSpaceChange={{setCurrentSpaceId}}>\n        {{currentSpaceId ? (\n          <SpaceProviderWrapper spaceId={{currentSpaceId}}>\n            {{children}}\n          </SpaceProviderWrapper>\n        ) : (\n          <SpaceSelector onSpaceSelect={{setCurrentSpaceId}} />\n        )}}\n      </SpaceManager>\n    </{app}Provider>\n  );\n"
        ),
    };
    format!(
        "// Main Provider Wrapper\nexport function {app}Providers({{ children }}: {{ children: React.ReactNode }}) {{\n{body}}}\n\n"
    )
}

fn usage_example(ctx: &ProviderContext, hooks: bool) -> String {
    let app = &ctx.app;
    let auth_hook = if ctx.include_auth {
        "  const { isAuthenticated, user } = useHypergraphAuth();\n"
    } else {
        ""
    };
    let app_hook = if hooks {
        "  const app = useEnhancedApp();\n\n  if (!app.appState.initialized) {\n    return <div>Initializing...</div>;\n  }\n\n  if (app.appState.error) {\n    return <div>Error: {app.appState.error}</div>;\n  }\n\n"
    } else {
        "  const app = useHypergraphApp();\n\n"
    };
    let welcome = if ctx.include_auth {
        "        {isAuthenticated && <p>Welcome, {user?.name}!</p>}\n"
    } else {
        ""
    };

    format!(
        "// Usage Examples\n\n// Main App Setup\nfunction App() {{\n  return (\n    <{app}Providers>\n      <AppContent />\n    </{app}Providers>\n  );\n}}\n\n// Example Component Using Providers\nfunction AppContent() {{\n{auth_hook}{app_hook}  return (\n    <div className=\"app-content\">\n      <header>\n        <h1>{app}</h1>\n{welcome}      </header>\n\n      <main>\n        {{/* Your app content here */}}\n      </main>\n    </div>\n  );\n}}\n\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: serde_json::Value) -> String {
        let engine = TemplateEngine::new().unwrap();
        let request: ProvidersRequest = serde_json::from_value(value).unwrap();
        generate(&engine, &request).unwrap()
    }

    // ========================================================================
    // React
    // ========================================================================

    #[test]
    fn test_react_both_with_auth() {
        let code = render(json!({ "appName": "Atlas" }));
        assert!(code.starts_with("// Hypergraph Provider Setup\n"));
        assert!(code.contains("export function AtlasProvider({ children }"));
        assert!(code.contains("<AuthenticationWrapper>"));
        assert!(code.contains("function AuthenticationWrapper("));
        assert!(code.contains("export function SpaceProviderWrapper({"));
        assert!(code.contains("<SpaceManagerContext.Provider value={{"));
        assert!(code.contains("export function AtlasProviders({ children }"));
        assert!(code.contains("const [currentSpaceId, setCurrentSpaceId]"));
        assert!(code.contains("export function useEnhancedApp() {"));
        assert!(code.contains("export function useSpaceOperations() {"));
        assert!(code.contains("<div className=\"app-loading\">"));
        assert!(code.contains("const providerStyles = `"));
    }

    #[test]
    fn test_react_app_only_without_auth() {
        let code = render(json!({
            "providerType": "app",
            "includeAuth": false,
            "includeCustomHooks": false
        }));
        assert!(code.contains("export function MyHypergraphAppProvider("));
        assert!(!code.contains("AuthenticationWrapper"));
        assert!(!code.contains("SpaceProviderWrapper"));
        assert!(!code.contains("useEnhancedApp"));
        assert!(!code.contains("useHypergraphAuth();"));
        assert!(!code.contains(".modal-overlay"));
    }

    #[test]
    fn test_react_space_only() {
        let code = render(json!({ "providerType": "space" }));
        assert!(!code.contains("export function MyHypergraphAppProvider("));
        assert!(code.contains("<HypergraphAppProvider mapping={mapping}>"));
        assert!(code.contains("<SpaceSelector onSpaceSelect={setSpaceId} />"));
        assert!(code.contains("function SpaceManager({"));
    }

    #[test]
    fn test_app_name_whitespace_removed() {
        let code = render(json!({ "appName": "My Cool App" }));
        assert!(code.contains("export function MyCoolAppProviders("));
    }

    #[test]
    fn test_vanilla_falls_back_to_react() {
        let vanilla = render(json!({ "framework": "vanilla-js" }));
        let react = render(json!({ "framework": "react" }));
        assert_eq!(vanilla, react);
    }

    // ========================================================================
    // TypeScript
    // ========================================================================

    #[test]
    fn test_typescript_manager() {
        let code = render(json!({ "framework": "typescript", "appName": "Atlas" }));
        assert!(code.contains("export class AtlasManager {"));
        assert!(code.contains("auth: config.authConfig"));
        assert!(code.contains("async listSpaces(): Promise<any[]> {"));
        assert!(!code.contains("React"));
    }

    #[test]
    fn test_typescript_manager_app_only_without_auth() {
        let code = render(json!({
            "framework": "typescript",
            "providerType": "app",
            "includeAuth": false
        }));
        assert!(!code.contains("authConfig"));
        assert!(!code.contains("createSpace"));
        assert!(code.contains("      mapping: config.mapping\n    });"));
    }

    #[test]
    fn test_invalid_app_name() {
        let engine = TemplateEngine::new().unwrap();
        let request: ProvidersRequest =
            serde_json::from_value(json!({ "appName": "1st-app" })).unwrap();
        assert!(generate(&engine, &request).unwrap_err().is_validation_error());
    }
}
