//! Client method rendering: one TypeScript method per catalog operation.

use indexmap::IndexMap;

use crate::catalog::{EndpointDescriptor, FieldSpec, HttpMethod, ParamSpec, Payload};
use crate::projector::{body_object_type, params_object_type, project_type};
use crate::utils::{doc_comment, ts_string};

/// The four call shapes a client method can take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MethodShape<'a> {
    /// GET with query parameters; undefined entries are skipped
    QueryGet(&'a IndexMap<String, ParamSpec>),
    /// DELETE with query parameters; every entry is sent
    QueryDelete(&'a IndexMap<String, ParamSpec>),
    /// POST or PUT with a JSON body
    Body(&'a IndexMap<String, FieldSpec>),
    /// No parameters and no body
    NoArgs,
}

impl<'a> MethodShape<'a> {
    /// Select the shape of a validated descriptor.
    ///
    /// Catalog loading guarantees query params only on GET/DELETE and bodies
    /// only on POST/PUT, so the payload alone decides the shape.
    pub fn of(descriptor: &'a EndpointDescriptor) -> Self {
        match &descriptor.payload {
            Payload::Query(params) if descriptor.method == HttpMethod::Delete => {
                Self::QueryDelete(params)
            }
            Payload::Query(params) => Self::QueryGet(params),
            Payload::Body(fields) => Self::Body(fields),
            Payload::None => Self::NoArgs,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::QueryGet(_) => "query-get",
            Self::QueryDelete(_) => "query-delete",
            Self::Body(_) => "body",
            Self::NoArgs => "no-args",
        }
    }
}

/// TypeScript parameter list of the generated method (without parentheses)
pub fn method_signature(descriptor: &EndpointDescriptor) -> String {
    match MethodShape::of(descriptor) {
        MethodShape::QueryGet(params) => {
            let all_optional = params.values().all(|p| !p.required);
            let default = if all_optional { " = {}" } else { "" };
            format!("params: {}{}", params_object_type(params), default)
        }
        MethodShape::QueryDelete(params) => format!("params: {}", params_object_type(params)),
        MethodShape::Body(fields) => format!("data: {}", body_object_type(fields)),
        MethodShape::NoArgs => String::new(),
    }
}

/// Render one client method for `name`
pub fn render_method(name: &str, descriptor: &EndpointDescriptor) -> String {
    let return_type = project_type(&descriptor.response.ty, true);
    let path = ts_string(&descriptor.path);
    let mut out = doc_comment(&descriptor.description, 2);

    out.push_str(&format!(
        "  async {}({}): Promise<{}> {{\n",
        name,
        method_signature(descriptor),
        return_type
    ));

    match MethodShape::of(descriptor) {
        MethodShape::QueryGet(_) => {
            out.push_str("    const query = new URLSearchParams();\n");
            out.push_str("    for (const [key, value] of Object.entries(params)) {\n");
            out.push_str("      if (value !== undefined) {\n");
            out.push_str("        query.append(key, String(value));\n");
            out.push_str("      }\n");
            out.push_str("    }\n");
            out.push_str("    const queryString = query.toString();\n");
            out.push_str(&format!(
                "    return this.request<{}>(queryString ? `{}?${{queryString}}` : {});\n",
                return_type, descriptor.path, path
            ));
        }
        MethodShape::QueryDelete(_) => {
            out.push_str("    const query = new URLSearchParams();\n");
            out.push_str("    for (const [key, value] of Object.entries(params)) {\n");
            out.push_str("      query.append(key, String(value));\n");
            out.push_str("    }\n");
            out.push_str(&format!(
                "    return this.request<{}>(`{}?${{query.toString()}}`, {{ method: 'DELETE' }});\n",
                return_type, descriptor.path
            ));
        }
        MethodShape::Body(_) => {
            out.push_str(&format!("    return this.request<{}>({}, {{\n", return_type, path));
            out.push_str(&format!("      method: '{}',\n", descriptor.method));
            out.push_str("      body: JSON.stringify(data),\n");
            out.push_str("    });\n");
        }
        MethodShape::NoArgs if descriptor.method == HttpMethod::Get => {
            out.push_str(&format!("    return this.request<{}>({});\n", return_type, path));
        }
        MethodShape::NoArgs => {
            out.push_str(&format!(
                "    return this.request<{}>({}, {{ method: '{}' }});\n",
                return_type, path, descriptor.method
            ));
        }
    }

    out.push_str("  }\n");
    out
}
