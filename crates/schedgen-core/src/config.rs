//! Configuration management for schedgen code generation.
//!
//! This module defines the target [`Environment`] with its base URL defaults,
//! and the `Config` struct that can be loaded from a YAML or TOML file. Values
//! from a config file act as defaults for the options passed on each request.
//!
//! # Examples
//!
//! ```no_run
//! use schedgen_core::config::{Config, Environment};
//!
//! # #[tokio::main]
//! # async fn main() -> schedgen_core::Result<()> {
//! let config = Config::from_file("schedgen.yaml").await?;
//! let options = config.to_options();
//! assert_eq!(options.environment()?, Environment::Production);
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::options::GenerateOptions;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;
use url::Url;

/// Runtime variable read by generated clients to override their base URL
pub const BASE_URL_ENV: &str = "SCHEDULING_API_URL";
/// Runtime variable holding the API key used by generated route handlers
pub const API_KEY_ENV: &str = "SCHEDULING_API_KEY";
/// Generation-time variable overriding the development base URL
pub const DEV_BASE_URL_ENV: &str = "SCHEDULING_API_DEV_URL";

/// Target environments of the scheduling API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Environment {
    #[default]
    Production,
    Staging,
    Development,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Staging => "staging",
            Self::Development => "development",
        }
    }

    /// Returns an iterator over all environments
    pub fn all() -> impl Iterator<Item = Self> {
        use Environment::*;
        [Production, Staging, Development].iter().copied()
    }

    /// Fixed base URL of the environment
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::Production => "https://api.schedulingapi.com/v1",
            Self::Staging => "https://staging-api.schedulingapi.com/v1",
            Self::Development => "https://sandbox.schedulingapi.com/v1",
        }
    }

    /// Base URL with an explicit development override.
    ///
    /// Only the development environment honors the override, which must be an
    /// absolute URL.
    pub fn resolve_base_url(&self, dev_override: Option<&str>) -> Result<String> {
        match (self, dev_override.map(str::trim).filter(|s| !s.is_empty())) {
            (Self::Development, Some(raw)) => {
                let url = Url::parse(raw).map_err(|e| {
                    Error::invalid_argument(format!(
                        "{} is not a valid URL ('{}'): {}",
                        DEV_BASE_URL_ENV, raw, e
                    ))
                })?;
                Ok(url.as_str().trim_end_matches('/').to_string())
            }
            _ => Ok(self.default_base_url().to_string()),
        }
    }

    fn allowed() -> String {
        Self::all().map(|e| e.as_str()).collect::<Vec<_>>().join(", ")
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            _ => Err(Error::invalid_argument(format!(
                "Unknown environment '{}'; expected one of: {}",
                s,
                Self::allowed()
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration file for schedgen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Target environment (production, staging or development)
    #[serde(default)]
    pub environment: Option<String>,

    /// Module path the generated clients import domain types from
    #[serde(default)]
    pub types_import_path: Option<String>,

    /// Module path the generated route handlers import the client from
    #[serde(default)]
    pub client_import_path: Option<String>,

    /// Route framework (nextjs, express, fastify or nestjs)
    #[serde(default)]
    pub framework: Option<String>,

    /// Output directory for generated files
    #[serde(default)]
    pub output_dir: Option<String>,

    /// Optional catalog file replacing the built-in catalog
    #[serde(default)]
    pub catalog_path: Option<String>,
}

impl Config {
    /// Load configuration from a YAML or TOML file, chosen by extension
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let config = if is_toml(path) {
            toml::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a YAML or TOML file, chosen by extension
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = if is_toml(path) {
            toml::to_string(self).map_err(|e| Error::invalid_argument(e.to_string()))?
        } else {
            serde_yaml::to_string(self)?
        };
        fs::write(path, content).await?;
        Ok(())
    }

    /// Generation options carrying this file's values
    pub fn to_options(&self) -> GenerateOptions {
        GenerateOptions {
            environment: self.environment.clone(),
            types_import_path: self.types_import_path.clone(),
            client_import_path: self.client_import_path.clone(),
            framework: self.framework.clone(),
            output_dir: self.output_dir.clone(),
        }
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_environment_from_str() -> Result<()> {
        assert_eq!("production".parse::<Environment>()?, Environment::Production);
        assert_eq!("Staging".parse::<Environment>()?, Environment::Staging);
        assert_eq!("development".parse::<Environment>()?, Environment::Development);

        let err = "qa".parse::<Environment>().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(err.to_string().contains("production, staging, development"));
        Ok(())
    }

    #[test]
    fn test_default_environment() {
        assert_eq!(Environment::default(), Environment::Production);
    }

    #[test]
    fn test_resolve_base_url() -> Result<()> {
        assert_eq!(
            Environment::Development.resolve_base_url(None)?,
            "https://sandbox.schedulingapi.com/v1"
        );
        assert_eq!(
            Environment::Development.resolve_base_url(Some("http://localhost:4000/v1/"))?,
            "http://localhost:4000/v1"
        );
        // production ignores the development override
        assert_eq!(
            Environment::Production.resolve_base_url(Some("http://localhost:4000"))?,
            "https://api.schedulingapi.com/v1"
        );
        assert!(Environment::Development
            .resolve_base_url(Some("not a url"))
            .is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_config_roundtrip() -> Result<()> {
        let dir = tempdir()?;
        let config = Config {
            environment: Some("staging".to_string()),
            framework: Some("express".to_string()),
            ..Default::default()
        };

        let yaml_path = dir.path().join("schedgen.yaml");
        config.save(&yaml_path).await?;
        assert_eq!(Config::from_file(&yaml_path).await?, config);

        let toml_path = dir.path().join("schedgen.toml");
        config.save(&toml_path).await?;
        let loaded = Config::from_file(&toml_path).await?;
        assert_eq!(loaded, config);

        let options = loaded.to_options();
        assert_eq!(options.environment()?, Environment::Staging);
        assert_eq!(options.framework.as_deref(), Some("express"));
        Ok(())
    }
}
