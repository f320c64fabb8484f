//! Schedgen Core Library
//!
//! This library turns the scheduling API endpoint catalog into TypeScript
//! source: a direct HTTP client, a same-origin proxy client, route handlers
//! for Next.js, Express, Fastify and NestJS, and the shared domain types.
//!
//! ```
//! use schedgen_core::{Generator, GenerateOptions};
//!
//! let generator = Generator::new().unwrap();
//! let client = generator.generate_client(&GenerateOptions::default()).unwrap();
//! assert_eq!(client.file_names(), vec!["scheduling-client.ts"]);
//! ```

pub mod artifact;
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod generate;
pub mod options;
pub mod projector;
pub mod render;
pub mod routes;
pub mod templates;
pub mod utils;

pub use crate::{
    artifact::Artifact,
    catalog::{Catalog, EndpointDescriptor, EndpointSummary},
    config::{Config, Environment},
    dispatch::{dispatch, dispatch_json, Command, Output},
    error::{Error, Result},
    generate::Generator,
    options::GenerateOptions,
    routes::Framework,
    templates::TemplateSet,
};
