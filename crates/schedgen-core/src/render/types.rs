//! The shared domain-type module the clients import as `Types`.

use serde::Serialize;

use super::GENERATED_HEADER;
use crate::catalog::{Catalog, EnumType};
use crate::error::Result;
use crate::projector::interface_member;
use crate::templates::{TemplateSet, TYPES_MODULE};
use crate::utils::{comment_text, ts_string};

#[derive(Debug, Serialize)]
struct EnumAlias {
    name: &'static str,
    union: String,
}

#[derive(Debug, Serialize)]
struct Member {
    description: String,
    line: String,
}

#[derive(Debug, Serialize)]
struct Interface {
    name: &'static str,
    description: String,
    members: Vec<Member>,
}

#[derive(Debug, Serialize)]
struct TypesContext<'a> {
    header: &'a str,
    enums: Vec<EnumAlias>,
    interfaces: Vec<Interface>,
}

/// Assemble `types.ts`: enum unions first, then one interface per domain type in catalog order
pub fn render_types(templates: &TemplateSet, catalog: &Catalog) -> Result<String> {
    let enums = EnumType::all()
        .map(|e| EnumAlias {
            name: e.as_str(),
            union: e
                .values()
                .iter()
                .map(|v| ts_string(v))
                .collect::<Vec<_>>()
                .join(" | "),
        })
        .collect();

    let interfaces = catalog
        .type_definitions()
        .iter()
        .map(|definition| Interface {
            name: definition.name.as_str(),
            description: comment_text(&definition.description),
            members: definition
                .fields
                .iter()
                .map(|(name, field)| Member {
                    description: comment_text(&field.description),
                    line: interface_member(name, field),
                })
                .collect(),
        })
        .collect();

    let context = TypesContext {
        header: GENERATED_HEADER,
        enums,
        interfaces,
    };
    templates.render(TYPES_MODULE, &context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_module() -> Result<()> {
        let out = render_types(&TemplateSet::new()?, &Catalog::builtin()?)?;
        assert!(out.starts_with(GENERATED_HEADER));
        assert!(out.contains(
            "export type DayOfWeek = 'monday' | 'tuesday' | 'wednesday' | 'thursday' | 'friday' | 'saturday' | 'sunday';"
        ));
        assert!(out.contains("export interface User {\n  /** Unique user identifier */\n  id: string;\n"));
        assert!(out.contains("  days: DayOfWeek[];\n"));
        assert!(out.contains("  reason?: string;\n"));
        assert!(!out.contains("Types."));
        Ok(())
    }

    #[test]
    fn test_interfaces_follow_catalog_order() -> Result<()> {
        let catalog = Catalog::builtin()?;
        let out = render_types(&TemplateSet::new()?, &catalog)?;
        let positions: Vec<_> = catalog
            .type_definitions()
            .iter()
            .map(|d| out.find(&format!("export interface {} {{", d.name.as_str())))
            .collect();
        assert!(positions.iter().all(Option::is_some));
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        Ok(())
    }
}
