//! `package.json` contents per framework.

use hypergraph_core::ProjectFramework;
use serde::Serialize;

/// One `"key": value` pair; `value` is already a JSON literal.
#[derive(Debug, Clone, Serialize)]
pub(super) struct Entry {
    pub name: &'static str,
    pub value: String,
}

impl Entry {
    fn new(name: &'static str, value: &str) -> Self {
        Self {
            name,
            value: serde_json::Value::from(value).to_string(),
        }
    }
}

/// An npm script with the line describing it in the setup instructions.
#[derive(Debug, Clone, Serialize)]
pub(super) struct Script {
    #[serde(flatten)]
    pub entry: Entry,
    pub description: &'static str,
}

const HYPERGRAPH: (&str, &str) = ("@graphprotocol/hypergraph", "^1.0.0");
const HYPERGRAPH_REACT: (&str, &str) = ("@graphprotocol/hypergraph-react", "^1.0.0");
const REACT: [(&str, &str); 2] = [("react", "^18.2.0"), ("react-dom", "^18.2.0")];
const REACT_TYPES: [(&str, &str); 2] = [("@types/react", "^18.0.0"), ("@types/react-dom", "^18.0.0")];
const VITE: (&str, &str) = ("vite", "^4.0.0");

fn entries(pairs: impl IntoIterator<Item = (&'static str, &'static str)>) -> Vec<Entry> {
    pairs
        .into_iter()
        .map(|(name, version)| Entry::new(name, version))
        .collect()
}

/// Runtime dependencies.
pub(super) fn dependencies(framework: ProjectFramework) -> Vec<Entry> {
    let mut pairs = vec![HYPERGRAPH];
    match framework {
        ProjectFramework::React => {
            pairs.push(HYPERGRAPH_REACT);
            pairs.extend(REACT);
            pairs.push(("react-router-dom", "^6.8.0"));
        }
        ProjectFramework::NextJs => {
            pairs.push(HYPERGRAPH_REACT);
            pairs.push(("next", "^14.0.0"));
            pairs.extend(REACT);
        }
        ProjectFramework::VanillaTs => {}
        ProjectFramework::ExpressApi => pairs.extend([
            ("express", "^4.18.0"),
            ("cors", "^2.8.5"),
            ("helmet", "^6.0.0"),
            ("dotenv", "^16.0.0"),
        ]),
    }
    entries(pairs)
}

/// Development dependencies.
pub(super) fn dev_dependencies(framework: ProjectFramework, typed: bool) -> Vec<Entry> {
    let mut pairs = Vec::new();
    if typed {
        pairs.extend([("typescript", "^5.0.0"), ("@types/node", "^20.0.0")]);
    }
    match framework {
        ProjectFramework::React => {
            if typed {
                pairs.extend(REACT_TYPES);
            }
            pairs.extend([("@vitejs/plugin-react", "^4.0.0"), VITE]);
        }
        ProjectFramework::NextJs => {
            if typed {
                pairs.extend(REACT_TYPES);
            }
            pairs.push(("eslint-config-next", "^14.0.0"));
        }
        ProjectFramework::VanillaTs => pairs.push(VITE),
        ProjectFramework::ExpressApi if typed => pairs.extend([
            ("@types/express", "^4.17.0"),
            ("@types/cors", "^2.8.0"),
            ("tsx", "^4.0.0"),
        ]),
        ProjectFramework::ExpressApi => pairs.push(("nodemon", "^3.0.0")),
    }
    pairs.push(("eslint", "^8.0.0"));
    entries(pairs)
}

/// npm scripts, in `package.json` order.
pub(super) fn scripts(framework: ProjectFramework, typed: bool) -> Vec<Script> {
    let mut scripts: Vec<(&'static str, &'static str)> = match framework {
        ProjectFramework::React => vec![
            ("dev", "vite"),
            ("build", "vite build"),
            ("preview", "vite preview"),
        ],
        ProjectFramework::NextJs => vec![
            ("dev", "next dev"),
            ("build", "next build"),
            ("start", "next start"),
        ],
        ProjectFramework::VanillaTs => vec![
            ("dev", "vite"),
            ("build", "tsc && vite build"),
            ("preview", "vite preview"),
        ],
        ProjectFramework::ExpressApi if typed => vec![
            ("dev", "tsx watch src/index.ts"),
            ("build", "tsc"),
            ("start", "node dist/index.js"),
        ],
        ProjectFramework::ExpressApi => vec![
            ("dev", "nodemon src/index.js"),
            ("start", "node src/index.js"),
        ],
    };
    if typed {
        scripts.push(("type-check", "tsc --noEmit"));
    }
    scripts.push(match framework {
        ProjectFramework::NextJs => ("lint", "next lint"),
        _ => ("lint", "eslint src/"),
    });
    scripts.push(("test", "echo \"No tests specified\" && exit 0"));

    scripts
        .into_iter()
        .map(|(name, command)| Script {
            entry: Entry::new(name, command),
            description: describe(name),
        })
        .collect()
}

fn describe(script: &str) -> &'static str {
    match script {
        "dev" => "Start the development server",
        "build" => "Build for production",
        "preview" => "Preview the production build",
        "start" => "Start the production server",
        "type-check" => "Run TypeScript type checking",
        "lint" => "Run ESLint",
        _ => "Run the test suite",
    }
}
