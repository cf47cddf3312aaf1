//! Error types for Hypergraph code generation.
//!
//! Every failure in the engine is represented by [`Error`]. None of them is
//! fatal to the host process: the server turns each one into an error-text
//! response.
//!
//! # Examples
//!
//! ```
//! use hypergraph_core::{Error, Result};
//!
//! fn require_entity(name: &str) -> Result<()> {
//!     if name.is_empty() {
//!         return Err(Error::ValidationError {
//!             field: "entityName".to_string(),
//!             reason: "must not be empty".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = require_entity("").unwrap_err();
//! assert!(err.is_validation_error());
//! ```

use thiserror::Error;

/// Main error type for Hypergraph code generation.
#[derive(Error, Debug)]
pub enum Error {
    /// Argument object could not be read into the tool's request shape.
    ///
    /// Raised when a required field is missing or a field has the wrong
    /// JSON type.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Validation error for request data.
    ///
    /// Raised when a request is well-formed JSON but violates a domain
    /// invariant, such as an empty entity name or duplicate property names.
    #[error("Validation error in {field}: {reason}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Detailed reason for the validation failure
        reason: String,
    },

    /// The requested tool does not exist.
    #[error("Unknown tool: {name}")]
    UnknownTool {
        /// Name the caller asked for
        name: String,
    },

    /// Template registration or rendering failed.
    #[error("Template error: {message}")]
    TemplateError {
        /// Description of the template failure
        message: String,
        /// Underlying handlebars error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error.
    ///
    /// Raised when a configuration file cannot be parsed or contains
    /// unusable values.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Resource not found error.
    ///
    /// Occurs when a file the server depends on (configuration, knowledge
    /// corpus) does not exist.
    #[error("Resource not found: {resource}")]
    ResourceNotFound {
        /// Identifier of the missing resource
        resource: String,
    },
}

impl Error {
    /// Returns `true` if this is an invalid argument error.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Returns `true` if this is a validation error.
    ///
    /// # Examples
    ///
    /// ```
    /// use hypergraph_core::Error;
    ///
    /// let err = Error::ValidationError {
    ///     field: "properties".to_string(),
    ///     reason: "duplicate property 'title'".to_string(),
    /// };
    /// assert!(err.is_validation_error());
    /// ```
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }

    /// Returns `true` if this is an unknown tool error.
    ///
    /// # Examples
    ///
    /// ```
    /// use hypergraph_core::Error;
    ///
    /// let err = Error::UnknownTool {
    ///     name: "does_not_exist".to_string(),
    /// };
    /// assert!(err.is_unknown_tool());
    /// assert_eq!(err.to_string(), "Unknown tool: does_not_exist");
    /// ```
    #[must_use]
    pub const fn is_unknown_tool(&self) -> bool {
        matches!(self, Self::UnknownTool { .. })
    }

    /// Returns `true` if this is a template error.
    #[must_use]
    pub const fn is_template_error(&self) -> bool {
        matches!(self, Self::TemplateError { .. })
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this is a resource not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }

    /// Convenience constructor for [`Error::ValidationError`].
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_detection() {
        let err = Error::validation("entityName", "must not be empty");
        assert!(err.is_validation_error());
        assert!(!err.is_unknown_tool());
    }

    #[test]
    fn test_unknown_tool_display() {
        let err = Error::UnknownTool {
            name: "nope".to_string(),
        };
        assert_eq!(format!("{err}"), "Unknown tool: nope");
        assert!(!err.is_validation_error());
    }

    #[test]
    fn test_validation_display() {
        let err = Error::validation("batchSize", "must be at least 1");
        let display = err.to_string();
        assert!(display.contains("batchSize"));
        assert!(display.contains("must be at least 1"));
    }

    #[test]
    fn test_config_and_not_found_detection() {
        let config = Error::ConfigError {
            message: "bad toml".to_string(),
        };
        let missing = Error::ResourceNotFound {
            resource: "knowledge.md".to_string(),
        };
        assert!(config.is_config_error());
        assert!(missing.is_not_found());
        assert!(!missing.is_config_error());
    }

    #[test]
    fn test_result_alias() {
        fn returns_err() -> Result<i32> {
            Err(Error::InvalidArgument("missing field".to_string()))
        }

        let err = returns_err().unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
