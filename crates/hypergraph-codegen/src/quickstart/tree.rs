//! The "Project Structure" section.

use super::ProjectContext;
use hypergraph_core::ProjectFramework;

#[derive(Debug)]
struct Node {
    name: String,
    children: Vec<Node>,
}

impl Node {
    fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    fn dir(name: &str, children: Vec<Self>) -> Self {
        Self {
            name: name.to_string(),
            children,
        }
    }
}

/// Renders the file tree of the generated project.
pub(super) fn project_structure(ctx: &ProjectContext) -> String {
    let mut out = format!("## Project Structure\n\n```\n{}/\n", ctx.project_dir);
    walk(&mut out, &nodes(ctx), "");
    out.push_str("```\n\n");
    out
}

fn walk(out: &mut String, nodes: &[Node], prefix: &str) {
    for (i, node) in nodes.iter().enumerate() {
        let last = i + 1 == nodes.len();
        let branch = if last { "└── " } else { "├── " };
        if node.children.is_empty() {
            out.push_str(&format!("{prefix}{branch}{}\n", node.name));
        } else {
            out.push_str(&format!("{prefix}{branch}{}/\n", node.name));
            let nested = format!("{prefix}{}", if last { "    " } else { "│   " });
            walk(out, &node.children, &nested);
        }
    }
}

fn nodes(ctx: &ProjectContext) -> Vec<Node> {
    let (ext, extx) = (ctx.ext, ctx.extx);
    let entity_lists = || {
        ctx.entities
            .iter()
            .map(|e| Node::file(format!("{}List.{extx}", e.name)))
            .collect::<Vec<_>>()
    };

    let mut tree = match ctx.framework {
        ProjectFramework::React => {
            let mut components = vec![Node::file(format!("Layout.{extx}"))];
            if ctx.include_auth {
                components.push(Node::dir(
                    "Auth",
                    vec![
                        Node::file(format!("AuthButton.{extx}")),
                        Node::file(format!("AuthCallback.{extx}")),
                    ],
                ));
            }
            components.push(Node::dir("Entities", entity_lists()));

            vec![
                Node::dir(
                    "src",
                    vec![
                        Node::dir("components", components),
                        Node::dir("schema", vec![Node::file(format!("index.{ext}"))]),
                        Node::dir("mapping", vec![Node::file(format!("index.{ext}"))]),
                        Node::file(format!("App.{extx}")),
                        Node::file(format!("index.{extx}")),
                    ],
                ),
                Node::file("index.html"),
            ]
        }
        ProjectFramework::NextJs => {
            let mut pages = vec![
                Node::file(format!("_app.{extx}")),
                Node::file(format!("index.{extx}")),
            ];
            pages.extend(ctx.entities.iter().map(|e| Node::file(format!("{}.{extx}", e.slug))));
            if ctx.include_auth {
                pages.push(Node::dir("auth", vec![Node::file(format!("callback.{extx}"))]));
            }
            pages.push(Node::dir("api", vec![Node::file(format!("health.{ext}"))]));

            let mut components = vec![Node::file(format!("Layout.{extx}"))];
            if ctx.include_auth {
                components.push(Node::dir("Auth", vec![Node::file(format!("AuthButton.{extx}"))]));
            }
            components.push(Node::dir("Entities", entity_lists()));

            vec![
                Node::dir("pages", pages),
                Node::dir("components", components),
                Node::dir(
                    "lib",
                    vec![
                        Node::file(format!("schema.{ext}")),
                        Node::file(format!("mapping.{ext}")),
                    ],
                ),
            ]
        }
        ProjectFramework::VanillaTs => {
            let mut components = vec![Node::file("app.ts")];
            if ctx.include_auth {
                components.push(Node::file("auth.ts"));
            }
            vec![
                Node::dir(
                    "src",
                    vec![
                        Node::dir(
                            "lib",
                            vec![
                                Node::file("hypergraph.ts"),
                                Node::file("schema.ts"),
                                Node::file("mapping.ts"),
                            ],
                        ),
                        Node::dir("components", components),
                        Node::dir("styles", vec![Node::file("main.css")]),
                        Node::file("index.ts"),
                    ],
                ),
                Node::file("index.html"),
            ]
        }
        ProjectFramework::ExpressApi => {
            let mut src = vec![Node::dir("routes", vec![Node::file(format!("entities.{ext}"))])];
            if ctx.include_auth {
                src.push(Node::dir("middleware", vec![Node::file(format!("auth.{ext}"))]));
            }
            src.extend([
                Node::dir(
                    "models",
                    vec![
                        Node::file(format!("schema.{ext}")),
                        Node::file(format!("mapping.{ext}")),
                    ],
                ),
                Node::dir("services", vec![Node::file(format!("hypergraph.{ext}"))]),
                Node::file(format!("index.{ext}")),
            ]);
            vec![Node::dir("src", src)]
        }
    };

    tree.push(Node::file("package.json"));
    if ctx.typed {
        tree.push(Node::file("tsconfig.json"));
    }
    if ctx.vite {
        tree.push(Node::file(format!("vite.config.{ext}")));
    }
    tree.extend([Node::file(".env.example"), Node::file(".gitignore")]);
    tree
}
