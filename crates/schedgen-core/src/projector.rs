//! Projection of catalog types into TypeScript type expressions.
//!
//! Domain types are referenced through the `Types` namespace that generated
//! modules import from the configured types path. Inline structural types are
//! emitted verbatim; domain names nested inside them are not rewritten.

use indexmap::IndexMap;

use crate::catalog::{FieldSpec, ParamSpec, TypeExpr};

/// Namespace under which generated code imports the domain types
pub const TYPES_NAMESPACE: &str = "Types";

fn qualify(name: &str, use_namespace: bool) -> String {
    if use_namespace {
        format!("{}.{}", TYPES_NAMESPACE, name)
    } else {
        name.to_string()
    }
}

/// Project a type expression into TypeScript.
///
/// Domain types, and arrays of them in either spelling, become namespaced
/// (`Types.Booking`, `Types.Booking[]`). Every other expression keeps its
/// catalog spelling.
pub fn project_type(expr: &TypeExpr, use_namespace: bool) -> String {
    match expr {
        TypeExpr::Domain(domain) => qualify(domain.as_str(), use_namespace),
        TypeExpr::Array { element, .. } => match element.as_ref() {
            TypeExpr::Domain(domain) => format!("{}[]", qualify(domain.as_str(), use_namespace)),
            _ => expr.to_string(),
        },
        other => other.to_string(),
    }
}

fn field_type(expr: &TypeExpr, required: bool, use_namespace: bool) -> String {
    let projected = match expr {
        TypeExpr::Array { element, .. } => match element.as_ref() {
            TypeExpr::Enum(enum_type) => {
                format!("{}[]", qualify(enum_type.as_str(), use_namespace))
            }
            _ => project_type(expr, use_namespace),
        },
        _ => project_type(expr, use_namespace),
    };
    optional(projected, required)
}

fn optional(ty: String, required: bool) -> String {
    if required {
        ty
    } else {
        format!("{} | undefined", ty)
    }
}

/// Type of a query parameter, widened with `undefined` when optional
pub fn param_type(param: &ParamSpec) -> String {
    optional(param.kind.as_str().to_string(), param.required)
}

/// Type of a body field, widened with `undefined` when optional
pub fn body_type(field: &FieldSpec, use_namespace: bool) -> String {
    field_type(&field.ty, field.required, use_namespace)
}

fn member(name: &str, required: bool, ty: &str) -> String {
    format!("{}{}: {}", name, if required { "" } else { "?" }, ty)
}

/// Inline object type for a parameter table: `{ userId: string; limit?: number | undefined }`
pub fn params_object_type(params: &IndexMap<String, ParamSpec>) -> String {
    let members: Vec<_> = params
        .iter()
        .map(|(name, param)| member(name, param.required, &param_type(param)))
        .collect();
    format!("{{ {} }}", members.join("; "))
}

/// Inline object type for a body table
pub fn body_object_type(fields: &IndexMap<String, FieldSpec>) -> String {
    let members: Vec<_> = fields
        .iter()
        .map(|(name, field)| member(name, field.required, &body_type(field, true)))
        .collect();
    format!("{{ {} }}", members.join("; "))
}

/// Property line of a generated interface, without the namespace prefix
pub fn interface_member(name: &str, field: &FieldSpec) -> String {
    let ty = field_type(&field.ty, true, false);
    format!("{};", member(name, field.required, &ty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DomainType, ParamKind};

    fn ty(raw: &str) -> TypeExpr {
        TypeExpr::parse(raw).unwrap()
    }

    fn field(raw: &str, required: bool) -> FieldSpec {
        FieldSpec {
            ty: ty(raw),
            required,
            description: String::new(),
        }
    }

    #[test]
    fn test_domain_types_are_namespaced() {
        for domain in DomainType::all() {
            let name = domain.as_str();
            assert_eq!(project_type(&ty(name), true), format!("Types.{}", name));
            assert_eq!(
                project_type(&ty(&format!("{}[]", name)), true),
                format!("Types.{}[]", name)
            );
            assert_eq!(
                project_type(&ty(&format!("Array<{}>", name)), true),
                format!("Types.{}[]", name)
            );
        }
    }

    #[test]
    fn test_other_names_pass_through() {
        assert_eq!(project_type(&ty("Calendar"), true), "Calendar");
        assert_eq!(project_type(&ty("Calendar[]"), true), "Calendar[]");
        assert_eq!(project_type(&ty("string[]"), true), "string[]");
        assert_eq!(project_type(&ty("Array<string>"), true), "Array<string>");
        assert_eq!(project_type(&ty("'a' | 'b'"), true), "'a' | 'b'");
    }

    #[test]
    fn test_inline_structs_are_verbatim() {
        let raw = "{ booking: Booking; ok: boolean }";
        assert_eq!(project_type(&ty(raw), true), raw);
        assert_eq!(
            project_type(&ty("Array<{ name: string }>"), true),
            "Array<{ name: string }>"
        );
    }

    #[test]
    fn test_without_namespace() {
        assert_eq!(project_type(&ty("Booking"), false), "Booking");
        assert_eq!(project_type(&ty("Array<User>"), false), "User[]");
    }

    #[test]
    fn test_optional_fields_widen_with_undefined() {
        assert_eq!(body_type(&field("string", true), true), "string");
        assert_eq!(body_type(&field("string", false), true), "string | undefined");
        assert_eq!(body_type(&field("User", false), true), "Types.User | undefined");

        let param = ParamSpec {
            kind: ParamKind::Number,
            required: false,
            description: String::new(),
        };
        assert_eq!(param_type(&param), "number | undefined");
    }

    #[test]
    fn test_day_of_week_arrays_use_enum_namespace() {
        assert_eq!(body_type(&field("DayOfWeek[]", true), true), "Types.DayOfWeek[]");
        assert_eq!(body_type(&field("Array<DayOfWeek>", true), true), "Types.DayOfWeek[]");
        // the generic projection leaves the enum alone
        assert_eq!(project_type(&ty("DayOfWeek[]"), true), "DayOfWeek[]");
    }

    #[test]
    fn test_object_types() {
        let mut params = IndexMap::new();
        params.insert(
            "userId".to_string(),
            ParamSpec {
                kind: ParamKind::String,
                required: true,
                description: String::new(),
            },
        );
        params.insert(
            "limit".to_string(),
            ParamSpec {
                kind: ParamKind::Number,
                required: false,
                description: String::new(),
            },
        );
        assert_eq!(
            params_object_type(&params),
            "{ userId: string; limit?: number | undefined }"
        );

        let mut body = IndexMap::new();
        body.insert("days".to_string(), field("DayOfWeek[]", true));
        body.insert("note".to_string(), field("string", false));
        assert_eq!(
            body_object_type(&body),
            "{ days: Types.DayOfWeek[]; note?: string | undefined }"
        );
    }

    #[test]
    fn test_interface_member() {
        assert_eq!(interface_member("days", &field("DayOfWeek[]", true)), "days: DayOfWeek[];");
        assert_eq!(interface_member("reason", &field("string", false)), "reason?: string;");
    }
}
