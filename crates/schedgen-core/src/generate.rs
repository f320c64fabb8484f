//! Code generation entry points for schedgen

use std::path::Path;

use crate::{
    artifact::Artifact,
    catalog::{Catalog, EndpointSummary},
    config::{Environment, DEV_BASE_URL_ENV},
    error::Result,
    options::GenerateOptions,
    render::{render_direct_client, render_proxy_client, render_types},
    routes::render_routes,
    templates::TemplateSet,
};

/// File name of the generated direct client
pub const CLIENT_FILE: &str = "scheduling-client.ts";
/// File name of the generated proxy client
pub const PROXY_CLIENT_FILE: &str = "scheduling-proxy.ts";
/// File name of the generated domain types module
pub const TYPES_FILE: &str = "types.ts";

/// Catalog plus compiled templates; every operation is a pure function of its options
#[derive(Debug, Clone)]
pub struct Generator {
    catalog: Catalog,
    templates: TemplateSet,
    dev_base_url: Option<String>,
}

impl Generator {
    /// Generator over the built-in catalog.
    ///
    /// `SCHEDULING_API_DEV_URL` is read once here; see [`Generator::with_dev_base_url`].
    pub fn new() -> Result<Self> {
        Self::with_catalog(Catalog::builtin()?)
    }

    pub fn with_catalog(catalog: Catalog) -> Result<Self> {
        let templates = TemplateSet::new()?;
        log::debug!(
            "Generator ready with {} endpoints and {} templates",
            catalog.len(),
            templates.list_templates().len()
        );
        Ok(Self {
            catalog,
            templates,
            dev_base_url: std::env::var(DEV_BASE_URL_ENV).ok(),
        })
    }

    /// Generator over a catalog file replacing the built-in one
    pub async fn from_catalog_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_catalog(Catalog::from_file(path).await?)
    }

    /// Replace the development base URL override taken from the environment
    pub fn with_dev_base_url(mut self, dev_base_url: Option<String>) -> Self {
        self.dev_base_url = dev_base_url;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Base URL baked into the direct client for `environment`
    pub fn base_url(&self, environment: Environment) -> Result<String> {
        environment.resolve_base_url(self.dev_base_url.as_deref())
    }

    /// Direct HTTP client with one method per operation
    pub fn generate_client(&self, options: &GenerateOptions) -> Result<Artifact> {
        let environment = options.environment()?;
        let base_url = self.base_url(environment)?;
        log::debug!("Generating client for {} ({})", environment, base_url);

        let content = render_direct_client(
            &self.templates,
            &self.catalog,
            environment,
            &base_url,
            options.types_import_path(),
        )?;
        Ok(Artifact::single(CLIENT_FILE, content))
    }

    /// Browser-side client calling the generated route handlers
    pub fn generate_proxy_client(&self, options: &GenerateOptions) -> Result<Artifact> {
        let content =
            render_proxy_client(&self.templates, &self.catalog, options.types_import_path())?;
        Ok(Artifact::single(PROXY_CLIENT_FILE, content))
    }

    /// Route handlers for the framework named in `options`
    pub fn generate_routes(&self, options: &GenerateOptions) -> Result<Artifact> {
        let framework = options.framework()?;
        let client_import_path = options
            .client_import_path
            .as_deref()
            .unwrap_or_else(|| framework.default_client_import_path());
        render_routes(&self.templates, &self.catalog, framework, client_import_path)
    }

    /// Domain types module imported by both clients
    pub fn generate_types(&self, _options: &GenerateOptions) -> Result<Artifact> {
        let content = render_types(&self.templates, &self.catalog)?;
        Ok(Artifact::single(TYPES_FILE, content))
    }

    /// Every operation with its method, path, parameters and response description
    pub fn list_endpoints(&self) -> Vec<EndpointSummary> {
        self.catalog.summaries()
    }
}
