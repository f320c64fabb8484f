//! Direct client assembly: request wrapper preamble plus one method per operation.

use serde::Serialize;

use super::method::render_method;
use super::GENERATED_HEADER;
use crate::catalog::{Catalog, API_KEY_HEADER};
use crate::config::{Environment, BASE_URL_ENV};
use crate::error::Result;
use crate::templates::{TemplateSet, DIRECT_CLIENT};
use crate::utils::ts_string;

#[derive(Debug, Serialize)]
struct DirectClientContext<'a> {
    header: &'a str,
    types_import_path: String,
    environment: &'a str,
    default_base_url: String,
    base_url_env: &'a str,
    api_key_header: &'a str,
    methods: String,
}

/// Assemble the direct client for `catalog`.
///
/// `base_url` is the already resolved default for `environment`; the
/// generated module still lets `SCHEDULING_API_URL` override it at runtime.
pub fn render_direct_client(
    templates: &TemplateSet,
    catalog: &Catalog,
    environment: Environment,
    base_url: &str,
    types_import_path: &str,
) -> Result<String> {
    let methods: Vec<String> = catalog
        .iter()
        .map(|(name, descriptor)| render_method(name, descriptor))
        .collect();

    let context = DirectClientContext {
        header: GENERATED_HEADER,
        types_import_path: ts_string(types_import_path),
        environment: environment.as_str(),
        default_base_url: ts_string(base_url),
        base_url_env: BASE_URL_ENV,
        api_key_header: API_KEY_HEADER,
        methods: methods.join("\n").trim_end().to_string(),
    };

    templates.render(DIRECT_CLIENT, &context)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(environment: Environment) -> Result<String> {
        let catalog = Catalog::builtin()?;
        let templates = TemplateSet::new()?;
        render_direct_client(
            &templates,
            &catalog,
            environment,
            environment.default_base_url(),
            "./types",
        )
    }

    #[test]
    fn test_preamble() -> Result<()> {
        let out = render(Environment::Development)?;
        assert!(out.starts_with(GENERATED_HEADER));
        assert!(out.contains("import * as Types from './types';"));
        assert!(out.contains("const DEFAULT_BASE_URL = 'https://sandbox.schedulingapi.com/v1';"));
        assert!(out.contains("process.env.SCHEDULING_API_URL || DEFAULT_BASE_URL"));
        Ok(())
    }

    #[test]
    fn test_constructor_requires_api_key() -> Result<()> {
        let out = render(Environment::Production)?;
        let constructor = out.find("constructor(apiKey").unwrap();
        let guard = out.find("if (!apiKey || apiKey.trim() === '')").unwrap();
        let fetch = out.find("await fetch(").unwrap();
        assert!(constructor < guard && guard < fetch);
        assert!(out.contains("An API key is required"));
        Ok(())
    }

    #[test]
    fn test_error_classification() -> Result<()> {
        let out = render(Environment::Production)?;
        assert!(out.contains("'x-api-key': this.apiKey"));
        assert!(out.contains("'Content-Type': 'application/json'"));
        assert!(out.contains("Cannot connect to the scheduling API at ${this.baseUrl}"));
        assert!(out.contains("message = body.message || body.error;"));
        assert!(out.contains("`HTTP ${response.status}: ${response.statusText}`"));
        assert!(out.contains("response.status === 401"));
        assert!(out.contains("authentication failed"));
        assert!(out.contains("response.status === 403"));
        assert!(out.contains("permission denied"));
        Ok(())
    }

    #[test]
    fn test_methods_follow_catalog_order() -> Result<()> {
        let out = render(Environment::Production)?;
        let catalog = Catalog::builtin()?;
        let mut last = 0;
        for name in catalog.names() {
            let position = out
                .find(&format!("  async {}(", name))
                .unwrap_or_else(|| panic!("method {} missing", name));
            assert!(position > last, "{} out of order", name);
            last = position;
        }
        assert!(out.trim_end().ends_with("}\n}"));
        Ok(())
    }
}
