//! The endpoint catalog: every operation the generators know about.
//!
//! The catalog is plain configuration. It is loaded once (from the embedded
//! `catalog.yaml`, or from an override file), validated, and then only read.
//! Iteration order is the order of the source file and drives the order of
//! every generated artifact.
//!
//! # Examples
//!
//! ```
//! use schedgen_core::catalog::Catalog;
//!
//! let catalog = Catalog::builtin().unwrap();
//! let account = catalog.get("getAccount").unwrap();
//! assert_eq!(account.path, "/account");
//! assert!(catalog.get("getWeather").is_err());
//! ```

pub mod descriptor;
pub mod type_expr;

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tokio::fs;

pub use descriptor::{
    EndpointDescriptor, FieldSpec, HttpMethod, ParamKind, ParamSpec, Payload, ResponseSpec,
    API_KEY_HEADER, CONTENT_TYPE_HEADER,
};
pub use type_expr::{ArrayStyle, DomainType, EnumType, Scalar, TypeExpr};

use crate::error::{Error, Result};
use crate::utils::is_valid_identifier;
use descriptor::RawDescriptor;

const BUILTIN_CATALOG: &str = include_str!("catalog.yaml");

/// Names the generated modules already define next to the operations: client
/// class members, proxy module helpers and NestJS service/controller members
const GENERATED_MEMBERS: &[&str] = &[
    "constructor",
    "request",
    "apiKey",
    "baseUrl",
    "proxyRequest",
    "localizeTimes",
    "toLocalIsoString",
    "pad",
    "PROXY_PREFIX",
    "ISO_UTC_TIMESTAMP",
    "SchedulingProxyError",
    "Types",
    "client",
    "schedulingService",
];

/// Field table of one domain type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition {
    pub name: DomainType,
    pub description: String,
    pub fields: IndexMap<String, FieldSpec>,
}

#[derive(Debug, Deserialize)]
struct RawTypeDefinition {
    #[serde(default)]
    description: String,
    fields: IndexMap<String, FieldSpec>,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    types: IndexMap<String, RawTypeDefinition>,
    endpoints: IndexMap<String, RawDescriptor>,
}

/// One row of the endpoint listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointSummary {
    pub name: String,
    pub method: HttpMethod,
    pub path: String,
    pub description: String,
    pub parameters: Vec<String>,
    pub response: String,
}

/// Validated, insertion-ordered endpoint catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    endpoints: IndexMap<String, EndpointDescriptor>,
    types: Vec<TypeDefinition>,
}

impl Catalog {
    /// Load the catalog shipped with the library
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_CATALOG)
    }

    /// Load a catalog from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            Error::Yaml(inner) => Error::catalog(format!(
                "Failed to parse catalog at {}: {}",
                path.display(),
                inner
            )),
            other => other,
        })
    }

    /// Parse and validate a catalog from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let raw: RawCatalog = serde_yaml::from_str(content)?;

        let mut endpoints = IndexMap::with_capacity(raw.endpoints.len());
        for (name, entry) in raw.endpoints {
            let descriptor = EndpointDescriptor::from_raw(&name, entry)?;
            endpoints.insert(name, descriptor);
        }

        let mut types = Vec::with_capacity(raw.types.len());
        for (name, definition) in raw.types {
            let domain = name.parse::<DomainType>().map_err(Error::catalog)?;
            types.push(TypeDefinition {
                name: domain,
                description: definition.description,
                fields: definition.fields,
            });
        }

        let catalog = Self { endpoints, types };
        catalog.validate()?;
        log::debug!(
            "Loaded catalog with {} endpoints and {} domain types",
            catalog.endpoints.len(),
            catalog.types.len()
        );
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        let mut paths = HashSet::new();
        for (name, descriptor) in &self.endpoints {
            if !is_valid_identifier(name) {
                return Err(Error::catalog(format!(
                    "operation name '{}' is not a valid identifier",
                    name
                )));
            }
            if GENERATED_MEMBERS.contains(&name.as_str()) {
                return Err(Error::catalog(format!(
                    "operation name '{}' clashes with a member of the generated code",
                    name
                )));
            }
            if !descriptor.path.starts_with('/') {
                return Err(Error::catalog(format!(
                    "operation '{}' has path '{}' without a leading '/'",
                    name, descriptor.path
                )));
            }
            if !paths.insert(descriptor.path.as_str()) {
                return Err(Error::catalog(format!(
                    "path '{}' of operation '{}' is already used by another operation",
                    descriptor.path, name
                )));
            }
            if !descriptor.has_header(API_KEY_HEADER) {
                return Err(Error::catalog(format!(
                    "operation '{}' must require the {} header",
                    name, API_KEY_HEADER
                )));
            }
            let has_body = matches!(descriptor.payload, Payload::Body(_));
            if has_body != descriptor.has_header(CONTENT_TYPE_HEADER) {
                return Err(Error::catalog(format!(
                    "operation '{}' must require {} exactly when it sends a body",
                    name, CONTENT_TYPE_HEADER
                )));
            }
            for field in descriptor.payload.field_names() {
                if !is_valid_identifier(&field) {
                    return Err(Error::catalog(format!(
                        "field '{}' of operation '{}' is not a valid identifier",
                        field, name
                    )));
                }
            }
        }

        let defined: HashSet<DomainType> = self.types.iter().map(|t| t.name).collect();
        if defined.len() != self.types.len() {
            return Err(Error::catalog("a domain type is defined more than once"));
        }
        if let Some(missing) = DomainType::all().find(|d| !defined.contains(d)) {
            return Err(Error::catalog(format!(
                "domain type '{}' has no definition",
                missing
            )));
        }

        Ok(())
    }

    /// Look up one operation by name
    pub fn get(&self, name: &str) -> Result<&EndpointDescriptor> {
        self.endpoints
            .get(name)
            .ok_or_else(|| Error::unknown_operation(name))
    }

    /// Iterate over operations in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EndpointDescriptor)> {
        self.endpoints.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.endpoints.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Domain type definitions in catalog order
    pub fn type_definitions(&self) -> &[TypeDefinition] {
        &self.types
    }

    /// Listing of every operation, in catalog order
    pub fn summaries(&self) -> Vec<EndpointSummary> {
        self.iter()
            .map(|(name, descriptor)| EndpointSummary {
                name: name.to_string(),
                method: descriptor.method,
                path: descriptor.path.clone(),
                description: descriptor.description.clone(),
                parameters: descriptor.payload.field_names(),
                response: descriptor.response.description.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Domain type definitions shared by the small catalogs built in tests
    pub(crate) const TEST_TYPES: &str = r#"
types:
  User: { fields: { id: { type: string, required: true } } }
  Availability: { fields: { start: { type: string, required: true } } }
  RecurringAvailability: { fields: { days: { type: "DayOfWeek[]", required: true } } }
  AvailabilityException: { fields: { id: { type: string, required: true } } }
  Booking: { fields: { id: { type: string, required: true } } }
  Account: { fields: { id: { type: string, required: true } } }
"#;

    pub(crate) fn catalog_with(endpoints: &str) -> Result<Catalog> {
        Catalog::from_yaml_str(&format!("{}\nendpoints:\n{}", TEST_TYPES, endpoints))
    }

    #[test]
    fn test_builtin_catalog_loads() -> Result<()> {
        let catalog = Catalog::builtin()?;
        assert_eq!(catalog.len(), 18);
        assert_eq!(catalog.type_definitions().len(), 6);
        assert_eq!(catalog.names().next(), Some("getAccount"));
        Ok(())
    }

    #[test]
    fn test_builtin_localization_flags_follow_domain_names() -> Result<()> {
        let catalog = Catalog::builtin()?;
        for (name, descriptor) in catalog.iter() {
            let lower = name.to_lowercase();
            let expected = lower.contains("availability") || lower.contains("booking");
            assert_eq!(descriptor.localize_times, expected, "flag mismatch on {}", name);
        }
        Ok(())
    }

    #[test]
    fn test_add_user_id_stays_optional() -> Result<()> {
        let catalog = Catalog::builtin()?;
        match &catalog.get("addUser")?.payload {
            Payload::Body(fields) => assert!(!fields["id"].required),
            other => panic!("unexpected payload {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_unknown_operation() -> Result<()> {
        let catalog = Catalog::builtin()?;
        let err = catalog.get("getWeather").unwrap_err();
        assert!(matches!(err, Error::UnknownOperation(ref name) if name == "getWeather"));
        Ok(())
    }

    #[test]
    fn test_rejects_get_with_params_and_body() {
        let err = catalog_with(
            r#"
  getThing:
    path: /thing
    method: GET
    params: { id: { type: string, required: true } }
    body: { name: { type: string, required: true } }
    response: { type: User }
    required_headers: [x-api-key]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Catalog(_)));
    }

    #[test]
    fn test_rejects_names_of_generated_members() {
        for name in ["request", "localizeTimes", "constructor", "client"] {
            let err = catalog_with(&format!(
                r#"
  {}:
    path: /thing
    method: GET
    response: {{ type: User }}
    required_headers: [x-api-key]
"#,
                name
            ))
            .unwrap_err();
            assert!(matches!(err, Error::Catalog(_)), "{} accepted", name);
            assert!(err.to_string().contains("clashes"));
        }
    }

    #[test]
    fn test_rejects_duplicate_paths() {
        let err = catalog_with(
            r#"
  getThing:
    path: /thing
    method: GET
    response: { type: User }
    required_headers: [x-api-key]
  getOtherThing:
    path: /thing
    method: GET
    response: { type: User }
    required_headers: [x-api-key]
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("already used"));
    }

    #[test]
    fn test_rejects_invalid_names_and_headers() {
        let bad_name = catalog_with(
            r#"
  get-thing:
    path: /thing
    method: GET
    response: { type: User }
    required_headers: [x-api-key]
"#,
        );
        assert!(bad_name.is_err());

        let missing_content_type = catalog_with(
            r#"
  addThing:
    path: /thing
    method: POST
    body: { name: { type: string, required: true } }
    response: { type: User }
    required_headers: [x-api-key]
"#,
        );
        assert!(missing_content_type.is_err());

        let missing_key = catalog_with(
            r#"
  getThing:
    path: /thing
    method: GET
    response: { type: User }
"#,
        );
        assert!(missing_key.is_err());
    }

    #[test]
    fn test_rejects_missing_domain_definition() {
        let err = Catalog::from_yaml_str(
            r#"
types:
  User: { fields: { id: { type: string } } }
endpoints: {}
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("has no definition"));
    }

    #[test]
    fn test_summaries_follow_catalog_order() -> Result<()> {
        let catalog = Catalog::builtin()?;
        let summaries = catalog.summaries();
        let names: Vec<_> = summaries.iter().map(|s| s.name.as_str()).collect();
        let expected: Vec<_> = catalog.names().collect();
        assert_eq!(names, expected);

        let get_user = summaries.iter().find(|s| s.name == "getUser").unwrap();
        assert_eq!(get_user.method, HttpMethod::Get);
        assert_eq!(get_user.parameters, vec!["userId".to_string()]);
        assert_eq!(get_user.response, "The requested user");
        Ok(())
    }

    #[tokio::test]
    async fn test_from_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("catalog.yaml");
        tokio::fs::write(&path, BUILTIN_CATALOG).await?;
        let catalog = Catalog::from_file(&path).await?;
        assert_eq!(catalog.len(), 18);
        Ok(())
    }
}
