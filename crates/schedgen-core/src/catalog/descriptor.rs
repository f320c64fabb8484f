//! Endpoint descriptors: one immutable entry per named catalog operation.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::type_expr::TypeExpr;
use crate::error::{Error, Result};

/// Header carrying the API credential on every request
pub const API_KEY_HEADER: &str = "x-api-key";
/// Header required whenever a JSON body is sent
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

/// HTTP verbs used by the scheduling API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Lowercase form used by router method names (`router.get`)
    pub fn as_lower(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
        }
    }

    /// Whether the verb carries query parameters rather than a body
    pub fn uses_query(&self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(format!("Unknown HTTP method: {}", s)),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar kinds allowed for query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Number,
    Boolean,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

/// A query parameter of a GET or DELETE operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    #[serde(rename = "type")]
    pub kind: ParamKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

/// A body field, or a field of a domain type definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

/// The declared response of an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSpec {
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    #[serde(default)]
    pub description: String,
}

/// What a call sends besides its path: query parameters, a JSON body, or nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    None,
    Query(IndexMap<String, ParamSpec>),
    Body(IndexMap<String, FieldSpec>),
}

impl Payload {
    /// Names of the parameters or body fields, in declaration order
    pub fn field_names(&self) -> Vec<String> {
        match self {
            Self::None => Vec::new(),
            Self::Query(params) => params.keys().cloned().collect(),
            Self::Body(fields) => fields.keys().cloned().collect(),
        }
    }
}

/// Catalog entry as written in the catalog file.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawDescriptor {
    pub path: String,
    pub method: HttpMethod,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub params: Option<IndexMap<String, ParamSpec>>,
    #[serde(default)]
    pub body: Option<IndexMap<String, FieldSpec>>,
    pub response: ResponseSpec,
    #[serde(default)]
    pub required_headers: Vec<String>,
    #[serde(default)]
    pub localize_times: bool,
}

/// A validated catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointDescriptor {
    pub path: String,
    pub method: HttpMethod,
    pub description: String,
    pub payload: Payload,
    pub response: ResponseSpec,
    pub required_headers: Vec<String>,
    /// Whether proxy responses pass through the timezone localization hook
    pub localize_times: bool,
}

impl EndpointDescriptor {
    /// Resolve the payload of a raw entry, enforcing the one-of rule and verb compatibility.
    pub(crate) fn from_raw(name: &str, raw: RawDescriptor) -> Result<Self> {
        let params = raw.params.filter(|p| !p.is_empty());
        let body = raw.body.filter(|b| !b.is_empty());

        let payload = match (raw.method.uses_query(), params, body) {
            (_, Some(_), Some(_)) => {
                return Err(Error::catalog(format!(
                    "operation '{}' declares both params and body",
                    name
                )));
            }
            (true, Some(params), None) => Payload::Query(params),
            (false, None, Some(body)) => Payload::Body(body),
            (true, None, Some(_)) => {
                return Err(Error::catalog(format!(
                    "operation '{}' is a {} and cannot carry a body",
                    name, raw.method
                )));
            }
            (false, Some(_), None) => {
                return Err(Error::catalog(format!(
                    "operation '{}' is a {} and cannot carry query params",
                    name, raw.method
                )));
            }
            (_, None, None) => Payload::None,
        };

        Ok(Self {
            path: raw.path,
            method: raw.method,
            description: raw.description,
            payload,
            response: raw.response,
            required_headers: raw.required_headers,
            localize_times: raw.localize_times,
        })
    }

    pub fn has_header(&self, header: &str) -> bool {
        self.required_headers
            .iter()
            .any(|h| h.eq_ignore_ascii_case(header))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(method: &str, extra: &str) -> RawDescriptor {
        let yaml = format!(
            "path: /things\nmethod: {}\nresponse:\n  type: Booking\n{}",
            method, extra
        );
        serde_yaml::from_str(&yaml).unwrap()
    }

    #[test]
    fn test_query_payload_for_get() -> Result<()> {
        let descriptor = EndpointDescriptor::from_raw(
            "getThing",
            raw("GET", "params:\n  id:\n    type: string\n    required: true\n"),
        )?;
        assert_eq!(descriptor.payload.field_names(), vec!["id".to_string()]);
        assert!(matches!(descriptor.payload, Payload::Query(_)));
        Ok(())
    }

    #[test]
    fn test_both_params_and_body_rejected() {
        let err = EndpointDescriptor::from_raw(
            "getThing",
            raw(
                "GET",
                "params:\n  id:\n    type: string\nbody:\n  name:\n    type: string\n",
            ),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Catalog(_)));
        assert!(err.to_string().contains("both params and body"));
    }

    #[test]
    fn test_verb_incompatible_payloads_rejected() {
        let get_with_body =
            EndpointDescriptor::from_raw("getThing", raw("GET", "body:\n  name:\n    type: string\n"));
        assert!(get_with_body.is_err());

        let post_with_params = EndpointDescriptor::from_raw(
            "addThing",
            raw("POST", "params:\n  id:\n    type: string\n"),
        );
        assert!(post_with_params.is_err());
    }

    #[test]
    fn test_empty_tables_mean_no_payload() -> Result<()> {
        let descriptor = EndpointDescriptor::from_raw("getThing", raw("GET", "params: {}\n"))?;
        assert_eq!(descriptor.payload, Payload::None);
        Ok(())
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("delete".parse::<HttpMethod>(), Ok(HttpMethod::Delete));
        assert!("PATCH".parse::<HttpMethod>().is_err());
        assert!(HttpMethod::Get.uses_query());
        assert!(!HttpMethod::Put.uses_query());
    }
}
