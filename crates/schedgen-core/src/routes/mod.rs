//! Route-handler generation for the supported server frameworks.
//!
//! Every framework gets the same [`RouteBinding`] list; the templates only
//! differ in how a handler is declared and how the request is read.

pub mod binding;
pub mod framework;

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Serialize;

pub use binding::{InputKind, RouteBinding, FAILURE_STATUS};
pub use framework::Framework;

use crate::artifact::Artifact;
use crate::catalog::Catalog;
use crate::config::API_KEY_ENV;
use crate::error::Result;
use crate::render::GENERATED_HEADER;
use crate::templates::{
    TemplateSet, EXPRESS_ROUTER, FASTIFY_PLUGIN, NESTJS_CONTROLLER, NESTJS_MODULE, NESTJS_SERVICE,
    NEXTJS_ROUTE,
};
use crate::utils::{relative_path, ts_string};

/// URL prefix the handlers are served under, and the proxy client calls
pub const ROUTE_PREFIX: &str = "/api/scheduling";

pub const EXPRESS_FILE: &str = "scheduling.routes.ts";
pub const FASTIFY_FILE: &str = "scheduling.plugin.ts";
pub const NESTJS_CONTROLLER_FILE: &str = "scheduling.controller.ts";
pub const NESTJS_SERVICE_FILE: &str = "scheduling.service.ts";
pub const NESTJS_MODULE_FILE: &str = "scheduling.module.ts";

#[derive(Debug, Serialize)]
struct RoutesContext<'a> {
    header: &'a str,
    client_import_path: String,
    api_key_env: &'a str,
    route_prefix: &'a str,
    controller_path: String,
    nest_imports: String,
    failure_status: u16,
    bindings: &'a [RouteBinding],
}

impl<'a> RoutesContext<'a> {
    fn new(client_import_path: &str, bindings: &'a [RouteBinding]) -> Self {
        Self {
            header: GENERATED_HEADER,
            client_import_path: ts_string(client_import_path),
            api_key_env: API_KEY_ENV,
            route_prefix: ROUTE_PREFIX,
            controller_path: ts_string(relative_path(ROUTE_PREFIX)),
            nest_imports: nest_imports(bindings),
            failure_status: FAILURE_STATUS,
            bindings,
        }
    }
}

/// Names the NestJS controller imports from `@nestjs/common`, sorted
fn nest_imports(bindings: &[RouteBinding]) -> String {
    let mut names: BTreeSet<&str> = ["Controller", "HttpException"].into_iter().collect();
    for binding in bindings {
        names.insert(binding.decorator);
        match binding.input {
            InputKind::Query => {
                names.insert("Query");
            }
            InputKind::Body => {
                names.insert("Body");
            }
            InputKind::None => {}
        }
    }
    names.into_iter().collect::<Vec<_>>().join(", ")
}

/// Render route handlers for every catalog entry
pub fn render_routes(
    templates: &TemplateSet,
    catalog: &Catalog,
    framework: Framework,
    client_import_path: &str,
) -> Result<Artifact> {
    let bindings: Vec<RouteBinding> = catalog
        .iter()
        .map(|(name, descriptor)| RouteBinding::new(name, descriptor))
        .collect();
    log::debug!("Rendering {} route bindings for {}", bindings.len(), framework);

    match framework {
        Framework::NextJs => {
            // one route module per path, one exported handler per verb
            let mut by_path: IndexMap<String, Vec<RouteBinding>> = IndexMap::new();
            for binding in bindings {
                by_path
                    .entry(binding.relative_path.clone())
                    .or_default()
                    .push(binding);
            }

            let mut files = IndexMap::new();
            for (path, group) in &by_path {
                let content =
                    templates.render(NEXTJS_ROUTE, &RoutesContext::new(client_import_path, group))?;
                files.insert(nextjs_route_file(path), content);
            }
            Ok(Artifact::Files { files })
        }
        Framework::Express => {
            let context = RoutesContext::new(client_import_path, &bindings);
            Ok(Artifact::single(
                EXPRESS_FILE,
                templates.render(EXPRESS_ROUTER, &context)?,
            ))
        }
        Framework::Fastify => {
            let context = RoutesContext::new(client_import_path, &bindings);
            Ok(Artifact::single(
                FASTIFY_FILE,
                templates.render(FASTIFY_PLUGIN, &context)?,
            ))
        }
        Framework::NestJs => {
            let context = RoutesContext::new(client_import_path, &bindings);
            let mut files = IndexMap::new();
            files.insert(
                NESTJS_CONTROLLER_FILE.to_string(),
                templates.render(NESTJS_CONTROLLER, &context)?,
            );
            files.insert(
                NESTJS_SERVICE_FILE.to_string(),
                templates.render(NESTJS_SERVICE, &context)?,
            );
            files.insert(
                NESTJS_MODULE_FILE.to_string(),
                templates.render(NESTJS_MODULE, &context)?,
            );
            Ok(Artifact::Files { files })
        }
    }
}

/// App-router file serving `relative_path` below the route prefix
fn nextjs_route_file(relative_path: &str) -> String {
    format!("app{}/{}/route.ts", ROUTE_PREFIX, relative_path)
}
