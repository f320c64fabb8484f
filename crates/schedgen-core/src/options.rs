//! Per-request options for the generation commands.
//!
//! Options arrive as loosely typed values (from a dispatch request, CLI flags
//! or a config file) and are only interpreted by the command that needs them,
//! so an unknown framework name fails route generation but not client
//! generation.
//!
//! # Example
//!
//! ```rust
//! use schedgen_core::options::GenerateOptions;
//!
//! let options: GenerateOptions =
//!     serde_json::from_str(r#"{"environment": "staging", "typesImportPath": "@/types"}"#).unwrap();
//! assert_eq!(options.types_import_path(), "@/types");
//! ```

use serde::{Deserialize, Serialize};

use crate::config::Environment;
use crate::error::{Error, Result};
use crate::routes::Framework;

/// Module path generated clients import domain types from, unless overridden
pub const DEFAULT_TYPES_IMPORT_PATH: &str = "./types";

/// Options accepted by every generation command
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOptions {
    /// Target environment; production when absent
    #[serde(default)]
    pub environment: Option<String>,

    /// Module path the generated code imports domain types from
    #[serde(default)]
    pub types_import_path: Option<String>,

    /// Module path route handlers import the generated client from
    #[serde(default)]
    pub client_import_path: Option<String>,

    /// Route framework, required for route generation
    #[serde(default)]
    pub framework: Option<String>,

    /// Where the front end writes the artifact; not used by the generators
    #[serde(default)]
    pub output_dir: Option<String>,
}

impl GenerateOptions {
    /// Parsed environment, defaulting to production
    pub fn environment(&self) -> Result<Environment> {
        match self.environment.as_deref() {
            Some(name) => name.parse(),
            None => Ok(Environment::default()),
        }
    }

    /// Parsed framework; absence is an error
    pub fn framework(&self) -> Result<Framework> {
        let name = self.framework.as_deref().ok_or_else(|| {
            Error::invalid_argument(format!(
                "a framework is required for route generation; expected one of: {}",
                Framework::allowed()
            ))
        })?;
        name.parse()
    }

    pub fn types_import_path(&self) -> &str {
        self.types_import_path
            .as_deref()
            .unwrap_or(DEFAULT_TYPES_IMPORT_PATH)
    }

    /// Fill unset fields from `defaults`
    pub fn with_defaults(self, defaults: &GenerateOptions) -> Self {
        Self {
            environment: self.environment.or_else(|| defaults.environment.clone()),
            types_import_path: self
                .types_import_path
                .or_else(|| defaults.types_import_path.clone()),
            client_import_path: self
                .client_import_path
                .or_else(|| defaults.client_import_path.clone()),
            framework: self.framework.or_else(|| defaults.framework.clone()),
            output_dir: self.output_dir.or_else(|| defaults.output_dir.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() -> Result<()> {
        let options = GenerateOptions::default();
        assert_eq!(options.environment()?, Environment::Production);
        assert_eq!(options.types_import_path(), "./types");
        Ok(())
    }

    #[test]
    fn test_missing_framework() {
        let err = GenerateOptions::default().framework().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(err.to_string().contains("nextjs, express, fastify, nestjs"));
    }

    #[test]
    fn test_camel_case_wire_format() -> Result<()> {
        let options: GenerateOptions = serde_json::from_str(
            r#"{"environment":"development","framework":"nestjs","outputDir":"out"}"#,
        )?;
        assert_eq!(options.environment()?, Environment::Development);
        assert_eq!(options.framework()?, Framework::NestJs);
        assert_eq!(options.output_dir.as_deref(), Some("out"));
        Ok(())
    }

    #[test]
    fn test_with_defaults_prefers_explicit_values() {
        let defaults = GenerateOptions {
            environment: Some("staging".into()),
            framework: Some("express".into()),
            ..Default::default()
        };
        let options = GenerateOptions {
            framework: Some("fastify".into()),
            ..Default::default()
        }
        .with_defaults(&defaults);
        assert_eq!(options.environment.as_deref(), Some("staging"));
        assert_eq!(options.framework.as_deref(), Some("fastify"));
    }
}
