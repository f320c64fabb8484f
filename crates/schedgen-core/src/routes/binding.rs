//! Framework-neutral description of one route handler.
//!
//! Every framework template performs the same sequence: extract the query or
//! body, call the client method with [`RouteBinding::call_args`], return the
//! result, and turn any thrown error into `{ error: message }` with
//! [`FAILURE_STATUS`]. Only the surface syntax differs between templates, so
//! everything that affects behavior is computed here once.

use serde::Serialize;

use crate::catalog::{EndpointDescriptor, ParamKind, ParamSpec, Payload};
use crate::utils::{comment_text, relative_path, ts_string};

/// Status code of every failed handler
pub const FAILURE_STATUS: u16 = 500;

/// What a handler extracts from the incoming request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    None,
    Query,
    Body,
}

/// Handler description shared by all framework templates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteBinding {
    /// Client method the handler forwards to
    pub operation: String,
    /// Single-line description, safe inside a block comment
    pub description: String,
    /// Upper-case verb (`GET`), also the Next.js export name
    pub method: &'static str,
    /// Lower-case verb (`get`) for router registration
    pub verb: &'static str,
    /// Decorator name for NestJS (`Get`)
    pub decorator: &'static str,
    /// API path with its leading slash
    pub path: String,
    /// API path without its leading slash
    pub relative_path: String,
    /// `path` as a quoted string literal
    pub path_literal: String,
    /// `relative_path` as a quoted string literal
    pub relative_path_literal: String,
    pub input: InputKind,
    /// Argument expression passed to the client method, reading from
    /// `query` or `body`; empty when the method takes no arguments
    pub call_args: String,
}

impl RouteBinding {
    pub fn new(operation: &str, descriptor: &EndpointDescriptor) -> Self {
        let (input, call_args) = match &descriptor.payload {
            Payload::None => (InputKind::None, String::new()),
            Payload::Query(params) => {
                let members: Vec<_> = params
                    .iter()
                    .map(|(name, param)| query_member(name, param))
                    .collect();
                (InputKind::Query, format!("{{ {} }}", members.join(", ")))
            }
            Payload::Body(_) => (
                InputKind::Body,
                format!("body as Parameters<SchedulingClient['{}']>[0]", operation),
            ),
        };

        let decorator = match descriptor.method.as_str() {
            "GET" => "Get",
            "POST" => "Post",
            "PUT" => "Put",
            _ => "Delete",
        };

        Self {
            operation: operation.to_string(),
            description: comment_text(&descriptor.description),
            method: descriptor.method.as_str(),
            verb: descriptor.method.as_lower(),
            decorator,
            path: descriptor.path.clone(),
            relative_path: relative_path(&descriptor.path).to_string(),
            path_literal: ts_string(&descriptor.path),
            relative_path_literal: ts_string(relative_path(&descriptor.path)),
            input,
            call_args,
        }
    }
}

/// Object member passing query value `name` to the client.
///
/// Optional values are spread in only when present, so an absent parameter
/// never reaches the client's query serializer as the string `undefined`.
fn query_member(name: &str, param: &ParamSpec) -> String {
    let raw = format!("query.{}", name);
    let value = match param.kind {
        ParamKind::String if param.required => format!("{} as string", raw),
        ParamKind::String => raw.clone(),
        ParamKind::Number => format!("Number({})", raw),
        ParamKind::Boolean => format!("{} === 'true'", raw),
    };
    if param.required {
        format!("{}: {}", name, value)
    } else {
        format!("...({} !== undefined ? {{ {}: {} }} : {{}})", raw, name, value)
    }
}
