//! Composed declaration blocks.
//!
//! Pure functions that turn field and relationship configuration into the
//! code lines the built-in templates splice in as single context
//! variables. Keeping the composition here (rather than teaching the
//! renderer loops) keeps the renderer a plain substitution engine.
//!
//! The target idiom is a SQLAlchemy/FastAPI-style layered application;
//! the semantic-type tables below are the single source of truth for the
//! `storage_type` and `python_type` renderer filters as well.

use crate::domain::config::{
    EntityConfiguration, FieldConfiguration, FieldType, RelationshipConfiguration,
    RelationshipKind, ScalarType,
};
use crate::domain::error::DomainError;
use crate::domain::naming;

const INDENT: &str = "    ";

/// Map a semantic type to its storage (column) type expression.
pub fn storage_type(ty: FieldType) -> String {
    let scalar = scalar_storage_type(ty.scalar());
    match ty {
        FieldType::Scalar(_) | FieldType::Optional(_) => scalar.to_string(),
        FieldType::List(_) => format!("ARRAY({scalar})"),
    }
}

fn scalar_storage_type(scalar: ScalarType) -> &'static str {
    match scalar {
        ScalarType::String => "String(255)",
        ScalarType::Text => "Text",
        ScalarType::Integer => "Integer",
        ScalarType::Float => "Float",
        ScalarType::Boolean => "Boolean",
        ScalarType::DateTime => "DateTime(timezone=True)",
        ScalarType::Uuid => "UUID(as_uuid=True)",
        ScalarType::Email => "String(320)",
    }
}

/// Map a semantic type to the interface-layer type hint.
pub fn python_type(ty: FieldType) -> String {
    let scalar = scalar_python_type(ty.scalar());
    match ty {
        FieldType::Scalar(_) => scalar.to_string(),
        FieldType::Optional(_) => format!("Optional[{scalar}]"),
        FieldType::List(_) => format!("List[{scalar}]"),
    }
}

fn scalar_python_type(scalar: ScalarType) -> &'static str {
    match scalar {
        ScalarType::String | ScalarType::Text => "str",
        ScalarType::Integer => "int",
        ScalarType::Float => "float",
        ScalarType::Boolean => "bool",
        ScalarType::DateTime => "datetime",
        ScalarType::Uuid => "UUID",
        ScalarType::Email => "EmailStr",
    }
}

/// One storage column declaration line for a field.
///
/// `raw_override` wins outright; otherwise the line is assembled from the
/// semantic type and the required/unique/index/default flags.
pub fn field_declaration(field: &FieldConfiguration) -> Result<String, DomainError> {
    if let Some(raw) = &field.raw_override {
        return Ok(format!("{INDENT}{}", raw.trim_end()));
    }

    let ty = field
        .semantic_type()
        .ok_or_else(|| DomainError::UnknownFieldType {
            field: field.name.clone(),
            type_name: field.field_type.clone(),
        })?;

    let mut args = vec![storage_type(ty)];
    if field.unique {
        args.push("unique=True".into());
    }
    if field.index {
        args.push("index=True".into());
    }
    if field.required && !ty.is_optional() {
        args.push("nullable=False".into());
    }
    if let Some(default) = &field.default {
        args.push(format!("default={default}"));
    }

    Ok(format!("{INDENT}{} = Column({})", field.name, args.join(", ")))
}

/// All column declarations for an entity, one line per field.
pub fn field_declarations(entity: &EntityConfiguration) -> Result<String, DomainError> {
    let lines: Result<Vec<_>, _> = entity.fields.iter().map(field_declaration).collect();
    Ok(lines?.join("\n"))
}

/// Typed interface-schema fields, one line per field.
pub fn schema_field_declarations(entity: &EntityConfiguration) -> Result<String, DomainError> {
    let mut lines = Vec::with_capacity(entity.fields.len());
    for field in &entity.fields {
        let ty = field
            .semantic_type()
            .ok_or_else(|| DomainError::UnknownFieldType {
                field: field.name.clone(),
                type_name: field.field_type.clone(),
            })?;
        let hint = python_type(ty);
        let line = if ty.is_optional() || !field.required {
            format!("{INDENT}{}: {hint} = None", field.name)
        } else {
            format!("{INDENT}{}: {hint}", field.name)
        };
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

/// Relationship attribute declarations for an entity.
///
/// Emits the foreign-key column first where one is declared, then the
/// relationship attribute itself.
pub fn relationship_declarations(entity: &EntityConfiguration) -> String {
    let mut lines = Vec::new();
    for rel in &entity.relationships {
        lines.extend(relationship_declaration(rel));
    }
    lines.join("\n")
}

fn relationship_declaration(rel: &RelationshipConfiguration) -> Vec<String> {
    let target_snake = naming::to_snake_case(&rel.entity);
    let attr = if rel.kind.is_collection() {
        naming::pluralize(&target_snake)
    } else {
        target_snake.clone()
    };

    let mut lines = Vec::new();

    // The owning side of to-one relationships carries the FK column.
    if matches!(
        rel.kind,
        RelationshipKind::ManyToOne | RelationshipKind::OneToOne
    ) {
        if let Some(fk) = &rel.foreign_key {
            lines.push(format!(
                "{INDENT}{target_snake}_id = Column(ForeignKey(\"{fk}\"))"
            ));
        }
    }

    let mut args = vec![format!("\"{}\"", rel.entity)];
    if let Some(bp) = &rel.back_populates {
        args.push(format!("back_populates=\"{bp}\""));
    }
    lines.push(format!(
        "{INDENT}{attr} = relationship({})",
        args.join(", ")
    ));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, ty: &str) -> FieldConfiguration {
        FieldConfiguration {
            name: name.into(),
            field_type: ty.into(),
            required: false,
            unique: false,
            index: false,
            default: None,
            description: String::new(),
            raw_override: None,
        }
    }

    #[test]
    fn email_field_maps_to_email_storage_type() {
        let mut f = field("email", "email");
        f.unique = true;
        let line = field_declaration(&f).unwrap();
        assert_eq!(line, "    email = Column(String(320), unique=True)");
    }

    #[test]
    fn required_field_is_not_nullable() {
        let mut f = field("name", "string");
        f.required = true;
        let line = field_declaration(&f).unwrap();
        assert!(line.contains("nullable=False"));
    }

    #[test]
    fn optional_wrapper_suppresses_nullable() {
        let mut f = field("bio", "optional[text]");
        f.required = true;
        let line = field_declaration(&f).unwrap();
        assert_eq!(line, "    bio = Column(Text)");
    }

    #[test]
    fn default_expression_is_verbatim() {
        let mut f = field("active", "boolean");
        f.default = Some("True".into());
        assert!(field_declaration(&f).unwrap().ends_with("default=True)"));
    }

    #[test]
    fn raw_override_replaces_generated_line() {
        let mut f = field("legacy", "string");
        f.raw_override = Some("legacy = Column(String(10), server_default='x')".into());
        assert_eq!(
            field_declaration(&f).unwrap(),
            "    legacy = Column(String(10), server_default='x')"
        );
    }

    #[test]
    fn unknown_type_is_an_error_not_a_fallback() {
        let f = field("odd", "varchar");
        assert!(matches!(
            field_declaration(&f),
            Err(DomainError::UnknownFieldType { .. })
        ));
    }

    #[test]
    fn list_type_maps_to_array_storage() {
        assert_eq!(
            storage_type(FieldType::parse("list[uuid]").unwrap()),
            "ARRAY(UUID(as_uuid=True))"
        );
    }

    #[test]
    fn python_types_wrap_optional_and_list() {
        assert_eq!(python_type(FieldType::parse("email").unwrap()), "EmailStr");
        assert_eq!(
            python_type(FieldType::parse("optional[datetime]").unwrap()),
            "Optional[datetime]"
        );
        assert_eq!(
            python_type(FieldType::parse("list[integer]").unwrap()),
            "List[int]"
        );
    }

    #[test]
    fn many_to_one_emits_fk_column_and_relationship() {
        let rel = RelationshipConfiguration {
            entity: "User".into(),
            kind: RelationshipKind::ManyToOne,
            back_populates: Some("orders".into()),
            foreign_key: Some("users.id".into()),
        };
        let lines = relationship_declaration(&rel);
        assert_eq!(
            lines,
            vec![
                "    user_id = Column(ForeignKey(\"users.id\"))".to_string(),
                "    user = relationship(\"User\", back_populates=\"orders\")".to_string(),
            ]
        );
    }

    #[test]
    fn collection_relationship_pluralizes_attribute() {
        let rel = RelationshipConfiguration {
            entity: "OrderItem".into(),
            kind: RelationshipKind::OneToMany,
            back_populates: Some("order".into()),
            foreign_key: None,
        };
        let lines = relationship_declaration(&rel);
        assert_eq!(
            lines,
            vec![
                "    order_items = relationship(\"OrderItem\", back_populates=\"order\")"
                    .to_string()
            ]
        );
    }

    #[test]
    fn schema_fields_mark_optionals_with_none_default() {
        let entity = EntityConfiguration {
            name: "User".into(),
            description: String::new(),
            table_name: None,
            fields: vec![
                {
                    let mut f = field("email", "email");
                    f.required = true;
                    f
                },
                field("nickname", "optional[string]"),
            ],
            relationships: Vec::new(),
        };
        let block = schema_field_declarations(&entity).unwrap();
        assert_eq!(
            block,
            "    email: EmailStr\n    nickname: Optional[str] = None"
        );
    }
}
