//! Embedded tera templates for the generated TypeScript artifacts

// Internal imports (std, crate)
use std::sync::Arc;

use crate::error::{Error, Result};

// External imports (alphabetized)
use serde::Serialize;
use serde_json::Value as JsonValue;
use tera::{Context, Tera};

pub const DIRECT_CLIENT: &str = "direct_client.ts";
pub const PROXY_CLIENT: &str = "proxy_client.ts";
pub const TYPES_MODULE: &str = "types.ts";
pub const NEXTJS_ROUTE: &str = "routes/nextjs_route.ts";
pub const EXPRESS_ROUTER: &str = "routes/express_router.ts";
pub const FASTIFY_PLUGIN: &str = "routes/fastify_plugin.ts";
pub const NESTJS_CONTROLLER: &str = "routes/nestjs_controller.ts";
pub const NESTJS_SERVICE: &str = "routes/nestjs_service.ts";
pub const NESTJS_MODULE: &str = "routes/nestjs_module.ts";

const EMBEDDED: &[(&str, &str)] = &[
    (DIRECT_CLIENT, include_str!("../templates/direct_client.ts.tera")),
    (PROXY_CLIENT, include_str!("../templates/proxy_client.ts.tera")),
    (TYPES_MODULE, include_str!("../templates/types.ts.tera")),
    (NEXTJS_ROUTE, include_str!("../templates/routes/nextjs_route.ts.tera")),
    (EXPRESS_ROUTER, include_str!("../templates/routes/express_router.ts.tera")),
    (FASTIFY_PLUGIN, include_str!("../templates/routes/fastify_plugin.ts.tera")),
    (NESTJS_CONTROLLER, include_str!("../templates/routes/nestjs_controller.ts.tera")),
    (NESTJS_SERVICE, include_str!("../templates/routes/nestjs_service.ts.tera")),
    (NESTJS_MODULE, include_str!("../templates/routes/nestjs_module.ts.tera")),
];

/// Compiled set of the templates shipped with the library
#[derive(Debug, Clone)]
pub struct TemplateSet {
    /// Cached Tera template engine instance
    tera: Arc<Tera>,
}

impl TemplateSet {
    /// Compile every embedded template
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        // generated TypeScript must never be HTML-escaped
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(EMBEDDED.iter().copied())
            .map_err(|e| Error::template(format!("Failed to parse embedded templates: {}", e)))?;
        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// Check if a template exists
    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template(name).is_ok()
    }

    /// List all available templates
    pub fn list_templates(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }

    /// Render a template with a serializable context
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        let context_value = serde_json::to_value(context)
            .map_err(|e| Error::template(format!("Failed to serialize context: {}", e)))?;

        let context_map = match &context_value {
            JsonValue::Object(map) => map,
            _ => return Err(Error::template("Context must be a JSON object")),
        };

        if !self.has_template(template_name) {
            return Err(Error::template(format!("Template not found: {}", template_name)));
        }

        // Build Tera Context from the already parsed context_map
        let mut tera_context = Context::new();
        for (k, v) in context_map {
            tera_context.insert(k, v);
        }

        log::debug!("Rendering template: {}", template_name);
        match self.tera.render(template_name, &tera_context) {
            Ok(content) => {
                log::debug!("Rendered {} ({} bytes)", template_name, content.len());
                Ok(content)
            }
            Err(e) => {
                log::error!("Template rendering failed for '{}': {}", template_name, e);
                log::error!(
                    "Available context keys: {:?}",
                    context_map.keys().collect::<Vec<_>>()
                );
                Err(Error::template(format!(
                    "Failed to render template '{}': {:?}",
                    template_name, e
                )))
            }
        }
    }
}
