//! Read-only knowledge corpus and line search.
//!
//! The corpus is a markdown document loaded once at startup. A missing or
//! unreadable file leaves the base unloaded; searches then answer with
//! [`NOT_LOADED`] instead of failing.

use hypergraph_core::KnowledgeCategory;
use std::path::Path;

/// Maximum number of matching lines returned by a search.
pub const MAX_RESULTS: usize = 10;

/// Reply when no corpus is available.
pub const NOT_LOADED: &str = "Knowledge base not loaded";

/// Markdown knowledge corpus.
///
/// # Examples
///
/// ```
/// use hypergraph_core::KnowledgeCategory;
/// use hypergraph_server::KnowledgeBase;
///
/// let kb = KnowledgeBase::from_markdown("# Spaces\nPrivate spaces are local-first.\n");
/// let reply = kb.search("PRIVATE", KnowledgeCategory::All);
/// assert!(reply.starts_with("Found 1 relevant entries:"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    markdown: Option<String>,
}

impl KnowledgeBase {
    /// Creates an unloaded knowledge base.
    #[must_use]
    pub const fn empty() -> Self {
        Self { markdown: None }
    }

    /// Wraps an in-memory markdown document.
    #[must_use]
    pub fn from_markdown(markdown: impl Into<String>) -> Self {
        Self {
            markdown: Some(markdown.into()),
        }
    }

    /// Reads the corpus from `path`.
    ///
    /// Never fails: a read error is logged and yields an unloaded base.
    pub async fn load(path: &Path) -> Self {
        match tokio::fs::read_to_string(path).await {
            Ok(markdown) => {
                tracing::info!(
                    path = %path.display(),
                    lines = markdown.lines().count(),
                    "knowledge base loaded"
                );
                Self::from_markdown(markdown)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not load knowledge base");
                Self::empty()
            }
        }
    }

    /// Returns `true` if a corpus is available.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.markdown.is_some()
    }

    /// Lines matching `query` case-insensitively.
    ///
    /// Unless the category is [`KnowledgeCategory::All`], lines mentioning
    /// the category tag match as well.
    #[must_use]
    pub fn matches(&self, query: &str, category: KnowledgeCategory) -> Vec<&str> {
        let Some(markdown) = &self.markdown else {
            return Vec::new();
        };
        let query = query.to_lowercase();
        let tag = (category != KnowledgeCategory::All).then_some(category.as_str());

        markdown
            .split('\n')
            .filter(|line| {
                let line = line.to_lowercase();
                line.contains(&query) || tag.is_some_and(|tag| line.contains(tag))
            })
            .collect()
    }

    /// Runs a search and formats the reply text.
    #[must_use]
    pub fn search(&self, query: &str, category: KnowledgeCategory) -> String {
        if !self.is_loaded() {
            return NOT_LOADED.to_string();
        }

        let lines = self.matches(query, category);
        if lines.is_empty() {
            return format!("No results found for \"{query}\" in category \"{category}\"");
        }

        let mut reply = format!("Found {} relevant entries:\n\n", lines.len());
        reply.push_str(&lines[..lines.len().min(MAX_RESULTS)].join("\n"));
        if lines.len() > MAX_RESULTS {
            reply.push_str(&format!("\n\n... (showing first {MAX_RESULTS} results)"));
        }
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &str = "# Hypergraph\n\
                          Spaces hold entities.\n\
                          Use useQuery for private data.\n\
                          Publishing moves data to public spaces.\n\
                          Schema classes extend Entity.Class.";

    #[test]
    fn test_unloaded_reply() {
        let kb = KnowledgeBase::empty();
        assert!(!kb.is_loaded());
        assert_eq!(kb.search("spaces", KnowledgeCategory::All), NOT_LOADED);
    }

    #[test]
    fn test_case_insensitive_match() {
        let kb = KnowledgeBase::from_markdown(CORPUS);
        assert_eq!(
            kb.matches("SPACES", KnowledgeCategory::All),
            ["Spaces hold entities.", "Publishing moves data to public spaces."]
        );
    }

    #[test]
    fn test_category_lines_also_match() {
        let kb = KnowledgeBase::from_markdown(CORPUS);
        let lines = kb.matches("useQuery", KnowledgeCategory::Schema);
        assert_eq!(
            lines,
            ["Use useQuery for private data.", "Schema classes extend Entity.Class."]
        );
    }

    #[test]
    fn test_no_results_message() {
        let kb = KnowledgeBase::from_markdown(CORPUS);
        assert_eq!(
            kb.search("wasm", KnowledgeCategory::Advanced),
            "No results found for \"wasm\" in category \"advanced\""
        );
    }

    #[test]
    fn test_results_capped() {
        let corpus: Vec<String> = (0..12).map(|i| format!("space line {i}")).collect();
        let kb = KnowledgeBase::from_markdown(corpus.join("\n"));
        let reply = kb.search("space", KnowledgeCategory::All);

        assert!(reply.starts_with("Found 12 relevant entries:\n\nspace line 0\n"));
        assert!(reply.contains("space line 9\n\n... (showing first 10 results)"));
        assert!(!reply.contains("space line 10"));
    }

    #[test]
    fn test_exactly_ten_has_no_suffix() {
        let corpus: Vec<String> = (0..10).map(|i| format!("space line {i}")).collect();
        let kb = KnowledgeBase::from_markdown(corpus.join("\n"));
        let reply = kb.search("space", KnowledgeCategory::All);
        assert!(reply.ends_with("space line 9"));
    }
}
