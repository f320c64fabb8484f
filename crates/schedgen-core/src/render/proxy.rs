//! Same-origin proxy client: exported functions calling the generated route handlers.

use serde::Serialize;

use super::method::{method_signature, MethodShape};
use super::GENERATED_HEADER;
use crate::catalog::{Catalog, EndpointDescriptor};
use crate::error::Result;
use crate::projector::project_type;
use crate::routes::ROUTE_PREFIX;
use crate::templates::{TemplateSet, PROXY_CLIENT};
use crate::utils::{comment_text, ts_string};

/// One exported proxy function
#[derive(Debug, Serialize)]
struct ProxyFunction {
    name: String,
    description: String,
    signature: String,
    return_type: String,
    shape: &'static str,
    method: &'static str,
    path: String,
    path_literal: String,
    localize_times: bool,
}

impl ProxyFunction {
    fn new(name: &str, descriptor: &EndpointDescriptor) -> Self {
        Self {
            name: name.to_string(),
            description: comment_text(&descriptor.description),
            signature: method_signature(descriptor),
            return_type: project_type(&descriptor.response.ty, true),
            shape: MethodShape::of(descriptor).name(),
            method: descriptor.method.as_str(),
            path: descriptor.path.clone(),
            path_literal: ts_string(&descriptor.path),
            localize_times: descriptor.localize_times,
        }
    }
}

#[derive(Debug, Serialize)]
struct ProxyClientContext<'a> {
    header: &'a str,
    types_import_path: String,
    route_prefix: String,
    functions: Vec<ProxyFunction>,
}

/// Assemble the proxy client for `catalog`.
///
/// Functions keep the direct client's signatures but call
/// `/api/scheduling<path>` on the page's own origin, so the API key stays on
/// the server.
pub fn render_proxy_client(
    templates: &TemplateSet,
    catalog: &Catalog,
    types_import_path: &str,
) -> Result<String> {
    let context = ProxyClientContext {
        header: GENERATED_HEADER,
        types_import_path: ts_string(types_import_path),
        route_prefix: ts_string(ROUTE_PREFIX),
        functions: catalog
            .iter()
            .map(|(name, descriptor)| ProxyFunction::new(name, descriptor))
            .collect(),
    };
    templates.render(PROXY_CLIENT, &context)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render() -> Result<String> {
        render_proxy_client(&TemplateSet::new()?, &Catalog::builtin()?, "@/types")
    }

    /// Text of the exported function `name`, up to the next blank line
    fn function<'a>(out: &'a str, name: &str) -> &'a str {
        let start = out
            .find(&format!("export async function {}(", name))
            .unwrap_or_else(|| panic!("function {} missing", name));
        let rest = &out[start..];
        &rest[..rest.find("\n}\n").map(|end| end + 2).unwrap_or(rest.len())]
    }

    #[test]
    fn test_preamble() -> Result<()> {
        let out = render()?;
        assert!(out.starts_with(GENERATED_HEADER));
        assert!(out.contains("import * as Types from '@/types';"));
        assert!(out.contains("const PROXY_PREFIX = '/api/scheduling';"));
        assert!(out.contains("fetch(`${PROXY_PREFIX}${path}`"));
        assert!(out.contains("message = body.error;"));
        assert!(out.contains("export function localizeTimes<T>(value: T): T {"));
        assert!(!out.contains("x-api-key"));
        Ok(())
    }

    #[test]
    fn test_localization_follows_flag() -> Result<()> {
        let out = render()?;
        let bookings = function(&out, "listBookings");
        assert!(bookings.contains("Promise<Types.Booking[]>"));
        assert!(bookings.contains("return localizeTimes(result);"));

        let users = function(&out, "listUsers");
        assert!(users.contains("return result;"));
        assert!(!users.contains("localizeTimes"));
        Ok(())
    }

    #[test]
    fn test_shapes_match_client_methods() -> Result<()> {
        let out = render()?;
        let cancel = function(&out, "cancelBooking");
        assert!(cancel.contains("(params: { bookingId: string;"));
        assert!(cancel.contains("`/bookings/cancel?${query.toString()}`, { method: 'DELETE' }"));

        let create = function(&out, "createBooking");
        assert!(create.contains("method: 'POST',"));
        assert!(create.contains("body: JSON.stringify(data),"));

        let account = function(&out, "getAccount");
        assert!(account.contains("export async function getAccount(): Promise<Types.Account> {"));
        assert!(account.contains("await proxyRequest<Types.Account>('/account');"));
        Ok(())
    }

    #[test]
    fn test_functions_follow_catalog_order() -> Result<()> {
        let out = render()?;
        let catalog = Catalog::builtin()?;
        let positions: Vec<_> = catalog
            .names()
            .map(|name| out.find(&format!("export async function {}(", name)))
            .collect();
        assert!(positions.iter().all(Option::is_some));
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        Ok(())
    }
}
