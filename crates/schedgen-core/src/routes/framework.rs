//! Supported route-handler frameworks.
//!
//! # Examples
//!
//! ```
//! use schedgen_core::routes::Framework;
//! use std::str::FromStr;
//!
//! let framework = Framework::from_str("nestjs").unwrap();
//! assert_eq!(framework, Framework::NestJs);
//! assert_eq!(framework.to_string(), "nestjs");
//! assert!(Framework::from_str("graphql").is_err());
//! ```

// Internal imports (std, crate)
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Frameworks route handlers can be generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Framework {
    /// Next.js app-router route modules, one file per path
    NextJs,
    /// A single Express router module
    Express,
    /// A single Fastify plugin module
    Fastify,
    /// NestJS controller, service and module files
    NestJs,
}

impl FromStr for Framework {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "nextjs" => Ok(Framework::NextJs),
            "express" => Ok(Framework::Express),
            "fastify" => Ok(Framework::Fastify),
            "nestjs" => Ok(Framework::NestJs),
            _ => Err(Error::invalid_argument(format!(
                "Unknown framework '{}'; expected one of: {}",
                s,
                Self::allowed()
            ))),
        }
    }
}

impl Framework {
    /// Returns the framework identifier as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NextJs => "nextjs",
            Self::Express => "express",
            Self::Fastify => "fastify",
            Self::NestJs => "nestjs",
        }
    }

    /// Returns an iterator over all supported frameworks
    pub fn all() -> impl Iterator<Item = Self> {
        use Framework::*;
        [NextJs, Express, Fastify, NestJs].iter().copied()
    }

    /// Comma-separated list of accepted names, for error messages
    pub fn allowed() -> String {
        Self::all()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Where generated handlers import the client from unless configured
    pub fn default_client_import_path(&self) -> &'static str {
        match self {
            Self::NextJs => "@/lib/scheduling-client",
            Self::Express | Self::Fastify | Self::NestJs => "./scheduling-client",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
