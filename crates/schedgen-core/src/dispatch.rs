//! Command dispatch: a command name and options in, an artifact or listing out.
//!
//! # Examples
//!
//! ```
//! use schedgen_core::dispatch::{dispatch, Output};
//! use schedgen_core::{GenerateOptions, Generator};
//!
//! let generator = Generator::new().unwrap();
//! let output = dispatch(&generator, "generate_types", &GenerateOptions::default()).unwrap();
//! assert!(matches!(output, Output::Artifact(_)));
//! assert!(dispatch(&generator, "generate_docs", &GenerateOptions::default()).is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::artifact::Artifact;
use crate::catalog::EndpointSummary;
use crate::error::{Error, Result};
use crate::generate::Generator;
use crate::options::GenerateOptions;

/// Commands understood by [`dispatch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    GenerateClient,
    GenerateProxyClient,
    GenerateRoutes,
    GenerateTypes,
    ListEndpoints,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GenerateClient => "generate_client",
            Self::GenerateProxyClient => "generate_proxy_client",
            Self::GenerateRoutes => "generate_routes",
            Self::GenerateTypes => "generate_types",
            Self::ListEndpoints => "list_endpoints",
        }
    }

    /// One-line description for tool listings
    pub fn description(&self) -> &'static str {
        match self {
            Self::GenerateClient => {
                "Generate a TypeScript client that calls the scheduling API directly"
            }
            Self::GenerateProxyClient => {
                "Generate a browser client that calls the generated route handlers"
            }
            Self::GenerateRoutes => {
                "Generate route handlers for nextjs, express, fastify or nestjs"
            }
            Self::GenerateTypes => "Generate the domain types module imported by the clients",
            Self::ListEndpoints => "List every endpoint in the catalog",
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        use Command::*;
        [
            GenerateClient,
            GenerateProxyClient,
            GenerateRoutes,
            GenerateTypes,
            ListEndpoints,
        ]
        .iter()
        .copied()
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all().find(|c| c.as_str() == s).ok_or_else(|| {
            Error::invalid_argument(format!(
                "Unknown command '{}'; expected one of: {}",
                s,
                Self::all().map(|c| c.as_str()).collect::<Vec<_>>().join(", ")
            ))
        })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Name and description of a command, as advertised to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// Every command with its description
pub fn commands() -> Vec<CommandInfo> {
    Command::all()
        .map(|c| CommandInfo {
            name: c.as_str(),
            description: c.description(),
        })
        .collect()
}

/// Successful result of a command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Artifact(Artifact),
    Endpoints(Vec<EndpointSummary>),
}

/// Run the command called `name`
pub fn dispatch(generator: &Generator, name: &str, options: &GenerateOptions) -> Result<Output> {
    let command: Command = name.parse()?;
    log::debug!("Dispatching {}", command);
    run(generator, command, options)
}

/// Run a command whose options arrive as a JSON object (or null)
pub fn dispatch_json(generator: &Generator, name: &str, options: JsonValue) -> Result<Output> {
    let options: GenerateOptions = if options.is_null() {
        GenerateOptions::default()
    } else {
        serde_json::from_value(options)
            .map_err(|e| Error::invalid_argument(format!("Invalid options: {}", e)))?
    };
    dispatch(generator, name, &options)
}

pub fn run(generator: &Generator, command: Command, options: &GenerateOptions) -> Result<Output> {
    let output = match command {
        Command::GenerateClient => Output::Artifact(generator.generate_client(options)?),
        Command::GenerateProxyClient => Output::Artifact(generator.generate_proxy_client(options)?),
        Command::GenerateRoutes => Output::Artifact(generator.generate_routes(options)?),
        Command::GenerateTypes => Output::Artifact(generator.generate_types(options)?),
        Command::ListEndpoints => Output::Endpoints(generator.list_endpoints()),
    };
    Ok(output)
}
