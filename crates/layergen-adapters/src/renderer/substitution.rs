//! Variable substitution renderer with a fixed filter table.
//!
//! Expression syntax: `{{ path.to.value }}` or
//! `{{ path.to.value | filter | filter }}`. Paths are dotted lookups into
//! the merged context; filters apply left to right. The filter table is
//! fixed at construction:
//!
//! | filter         | input                | output                          |
//! |----------------|----------------------|---------------------------------|
//! | `snake_case`   | any name             | `order_item`                    |
//! | `pascal_case`  | any name             | `OrderItem`                     |
//! | `camel_case`   | any name             | `orderItem`                     |
//! | `pluralize`    | snake/lower word     | `order_items`                   |
//! | `singularize`  | snake/lower word     | `order_item`                    |
//! | `storage_type` | semantic field type  | storage column type             |
//! | `python_type`  | semantic field type  | interface type hint             |
//!
//! A single-quoted head is a literal instead of a path: `{{ '{' }}` emits
//! `{`, which is how templates produce text that would otherwise read as
//! an expression.
//!
//! An undefined variable, unknown filter, or filter failure aborts the
//! render of that template; no partial output is returned.

use serde_json::Value;
use tracing::instrument;

use layergen_core::{
    application::ports::TemplateRenderer,
    domain::{FieldType, MergedContext, declarations, error::DomainError, naming},
    error::EngineResult,
};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Renderer implementing `{{ path | filter }}` substitution.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstitutionRenderer;

impl SubstitutionRenderer {
    /// Create a new substitution renderer.
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for SubstitutionRenderer {
    #[instrument(skip_all, fields(template = template_id))]
    fn render(
        &self,
        template_id: &str,
        body: &str,
        context: &MergedContext,
    ) -> EngineResult<String> {
        let mut output = String::with_capacity(body.len());
        let mut rest = body;

        while let Some(start) = rest.find(OPEN) {
            output.push_str(&rest[..start]);
            let after_open = &rest[start + OPEN.len()..];
            let end = after_open.find(CLOSE).ok_or_else(|| {
                DomainError::InvalidConfiguration(format!(
                    "template '{template_id}': unterminated '{{{{' expression"
                ))
            })?;

            let expression = &after_open[..end];
            output.push_str(&evaluate(template_id, expression, context)?);

            rest = &after_open[end + CLOSE.len()..];
        }

        output.push_str(rest);
        Ok(output)
    }
}

/// Evaluate one `path | filter | ...` expression.
fn evaluate(template_id: &str, expression: &str, context: &MergedContext) -> EngineResult<String> {
    let mut parts = expression.split('|').map(str::trim);

    let path = parts.next().unwrap_or_default();
    if path.is_empty() {
        return Err(DomainError::InvalidConfiguration(format!(
            "template '{template_id}': empty expression"
        ))
        .into());
    }

    let mut text = if path.len() >= 2 && path.starts_with('\'') && path.ends_with('\'') {
        path[1..path.len() - 1].to_string()
    } else {
        let value = context
            .get_path(path)
            .ok_or_else(|| DomainError::UndefinedVariable {
                template: template_id.to_string(),
                variable: path.to_string(),
            })?;
        scalar_to_string(template_id, path, value)?
    };
    for filter in parts {
        text = apply_filter(template_id, filter, &text)?;
    }
    Ok(text)
}

fn scalar_to_string(template_id: &str, path: &str, value: &Value) -> EngineResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(DomainError::UndefinedVariable {
            template: template_id.to_string(),
            variable: format!("{path} (not a scalar value)"),
        }
        .into()),
    }
}

fn apply_filter(template_id: &str, filter: &str, input: &str) -> EngineResult<String> {
    match filter {
        "snake_case" => Ok(naming::to_snake_case(input)),
        "pascal_case" => Ok(naming::to_pascal_case(input)),
        "camel_case" => Ok(naming::to_camel_case(input)),
        "pluralize" => Ok(naming::pluralize(input)),
        "singularize" => Ok(naming::singularize(input)),
        "storage_type" => semantic_type(template_id, filter, input).map(declarations::storage_type),
        "python_type" => semantic_type(template_id, filter, input).map(declarations::python_type),
        other => Err(DomainError::UnknownFilter {
            template: template_id.to_string(),
            filter: other.to_string(),
        }
        .into()),
    }
}

fn semantic_type(template_id: &str, filter: &str, input: &str) -> EngineResult<FieldType> {
    FieldType::parse(input).ok_or_else(|| {
        DomainError::FilterFailed {
            template: template_id.to_string(),
            filter: filter.to_string(),
            reason: format!("'{input}' is not a semantic field type"),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context(value: Value) -> MergedContext {
        MergedContext::from_value(value).unwrap()
    }

    fn render(body: &str, value: Value) -> EngineResult<String> {
        SubstitutionRenderer::new().render("test", body, &context(value))
    }

    #[test]
    fn plain_text_passes_through() {
        let out = render("no placeholders here", json!({})).unwrap();
        assert_eq!(out, "no placeholders here");
    }

    #[test]
    fn dotted_paths_resolve() {
        let out = render(
            "class {{ entity.name }}(Base):",
            json!({"entity": {"name": "User"}}),
        )
        .unwrap();
        assert_eq!(out, "class User(Base):");
    }

    #[test]
    fn filters_chain_left_to_right() {
        let out = render(
            "{{ entity.name | snake_case | pluralize }}",
            json!({"entity": {"name": "OrderItem"}}),
        )
        .unwrap();
        assert_eq!(out, "order_items");
    }

    #[test]
    fn case_filters() {
        let ctx = json!({"name": "order_item"});
        assert_eq!(
            render("{{ name | pascal_case }}", ctx.clone()).unwrap(),
            "OrderItem"
        );
        assert_eq!(
            render("{{ name | camel_case }}", ctx).unwrap(),
            "orderItem"
        );
    }

    #[test]
    fn type_filters_map_semantic_types() {
        let ctx = json!({"ty": "optional[email]"});
        assert_eq!(
            render("{{ ty | storage_type }}", ctx.clone()).unwrap(),
            "String(320)"
        );
        assert_eq!(
            render("{{ ty | python_type }}", ctx).unwrap(),
            "Optional[EmailStr]"
        );
    }

    #[test]
    fn undefined_variable_fails_with_no_partial_output() {
        let err = render("before {{ missing.path }} after", json!({})).unwrap_err();
        assert!(err.to_string().contains("missing.path"));
    }

    #[test]
    fn unknown_filter_is_an_error() {
        let err = render("{{ name | shout }}", json!({"name": "x"})).unwrap_err();
        assert!(err.to_string().contains("shout"));
    }

    #[test]
    fn filter_failure_names_the_template() {
        let err = SubstitutionRenderer::new()
            .render(
                "entity/model",
                "{{ ty | storage_type }}",
                &context(json!({"ty": "varchar"})),
            )
            .unwrap_err();
        assert!(err.to_string().contains("entity/model"));
    }

    #[test]
    fn numbers_and_booleans_render() {
        let out = render(
            "ttl={{ cache_ttl }} on={{ enabled }}",
            json!({"cache_ttl": 300, "enabled": true}),
        )
        .unwrap();
        assert_eq!(out, "ttl=300 on=true");
    }

    #[test]
    fn quoted_literals_escape_braces() {
        let out = render("/items/{{ '{' }}item_id{{ '}' }}", json!({})).unwrap();
        assert_eq!(out, "/items/{item_id}");
    }

    #[test]
    fn unterminated_expression_is_an_error() {
        assert!(render("{{ name", json!({"name": "x"})).is_err());
    }
}
