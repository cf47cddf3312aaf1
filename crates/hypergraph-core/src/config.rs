//! Server configuration.
//!
//! Settings come from built-in defaults, then an optional TOML file, then
//! command-line flags and environment variables applied by the binary.
//!
//! # Examples
//!
//! ```
//! use hypergraph_core::{LogFormat, ServerConfig};
//!
//! let config = ServerConfig::from_toml_str(
//!     r#"
//!     knowledge_path = "/srv/hypergraph/knowledge.md"
//!     log_format = "json"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.log_format, LogFormat::Json);
//! assert_eq!(config.log_filter, "info,hypergraph_server=debug");
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default knowledge corpus location, relative to the working directory.
pub const DEFAULT_KNOWLEDGE_PATH: &str = "knowledge/hypergraph_knowledge_base.md";

/// Default tracing filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info,hypergraph_server=debug";

/// Output format of the log layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Runtime configuration of the MCP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Path to the markdown knowledge corpus.
    ///
    /// A missing file is not an error; search then reports that the
    /// knowledge base is not loaded.
    pub knowledge_path: PathBuf,

    /// `tracing` filter directive, used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            knowledge_path: PathBuf::from(DEFAULT_KNOWLEDGE_PATH),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl ServerConfig {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use hypergraph_core::ServerConfig;
    ///
    /// let config = ServerConfig::builder()
    ///     .knowledge_path("docs/kb.md")
    ///     .log_filter("warn")
    ///     .build();
    ///
    /// assert_eq!(config.log_filter, "warn");
    /// ```
    #[must_use]
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::new()
    }

    /// Parses a configuration from TOML text.
    ///
    /// Keys that are absent keep their default value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the text is not valid TOML or has
    /// fields of the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::ConfigError {
            message: format!("Failed to parse configuration: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceNotFound`] if the file does not exist and
    /// [`Error::ConfigError`] if it cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ResourceNotFound {
                resource: path.display().to_string(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|e| Error::ConfigError {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
        Self::from_toml_str(&text)
    }

    /// Loads the file at the default location if one exists.
    ///
    /// Falls back to [`ServerConfig::default`] when no file is present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if a file exists but is invalid.
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the knowledge path or the log
    /// filter is empty.
    pub fn validate(&self) -> Result<()> {
        if self.knowledge_path.as_os_str().is_empty() {
            return Err(Error::ConfigError {
                message: "knowledge_path cannot be empty".to_string(),
            });
        }
        if self.log_filter.trim().is_empty() {
            return Err(Error::ConfigError {
                message: "log_filter cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Default configuration file path: `<config dir>/hypergraph-mcp/config.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hypergraph-mcp").join("config.toml"))
}

/// Builder for [`ServerConfig`].
#[derive(Debug, Clone, Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    /// Creates a builder seeded with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration.
    #[must_use]
    pub const fn from_config(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Sets the knowledge corpus path.
    #[must_use]
    pub fn knowledge_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.knowledge_path = path.into();
        self
    }

    /// Sets the log filter directive.
    #[must_use]
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.log_filter = filter.into();
        self
    }

    /// Sets the log format.
    #[must_use]
    pub const fn log_format(mut self, format: LogFormat) -> Self {
        self.config.log_format = format;
        self
    }

    /// Finishes the builder.
    #[must_use]
    pub fn build(self) -> ServerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.knowledge_path, PathBuf::from(DEFAULT_KNOWLEDGE_PATH));
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = ServerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let err = ServerConfig::from_toml_str("log_format = 3").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_empty_filter_rejected() {
        let err = ServerConfig::from_toml_str("log_filter = \"  \"").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ServerConfig::load(Path::new("/nonexistent/hypergraph.toml")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "knowledge_path = \"kb.md\"").unwrap();

        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.knowledge_path, PathBuf::from("kb.md"));
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_builder_overrides() {
        let base = ServerConfig::builder().log_filter("warn").build();
        let config = ServerConfigBuilder::from_config(base)
            .log_format(LogFormat::Json)
            .build();
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
