//! Error handling for the schedgen code generation library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. Generation either produces a
//! complete artifact or fails with exactly one of these errors; nothing is
//! retried and no partial output is returned.
//!
//! # Examples
//!
//! ```
//! use schedgen_core::error::{Error, Result};
//!
//! fn pick_framework(name: &str) -> Result<()> {
//!     if name != "express" {
//!         return Err(Error::invalid_argument(format!("unsupported framework '{name}'")));
//!     }
//!     Ok(())
//! }
//!
//! assert!(pick_framework("graphql").is_err());
//! ```

use thiserror::Error;

/// Result type for schedgen generation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for schedgen generation operations
#[derive(Debug, Error)]
pub enum Error {
    /// Unknown framework, environment or command, or a missing required option
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Catalog lookup miss
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// The endpoint catalog violates one of its load-time invariants
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Template error
    #[error("Template error: {0}")]
    Template(String),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a new invalid argument error
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a new unknown operation error
    pub fn unknown_operation<S: Into<String>>(name: S) -> Self {
        Self::UnknownOperation(name.into())
    }

    /// Create a new catalog error
    pub fn catalog<S: Into<String>>(msg: S) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create a new template error
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Self::Template(msg.into())
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::InvalidArgument(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::InvalidArgument(s)
    }
}
