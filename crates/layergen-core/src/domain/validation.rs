//! Semantic validation of a loaded domain configuration.
//!
//! Shape problems (missing keys, unparseable TOML) fail fatally at load
//! time; everything here is collected into a [`ValidationReport`] instead
//! so the user can fix every finding in one pass.

use std::collections::BTreeSet;

use crate::domain::config::{DomainConfiguration, EntityConfiguration};
use crate::domain::naming;
use crate::domain::report::{IssueCode, ValidationReport};

/// Stateless validator over the typed configuration model.
pub struct DomainValidator;

impl DomainValidator {
    /// Run every semantic check; never fast-fails.
    pub fn validate(config: &DomainConfiguration) -> ValidationReport {
        let mut report = ValidationReport::default();

        Self::check_domain(config, &mut report);

        let defined: BTreeSet<&str> = config.entities.iter().map(|e| e.name.as_str()).collect();

        let mut seen_entities = BTreeSet::new();
        for entity in &config.entities {
            if !seen_entities.insert(entity.name.as_str()) {
                report.push_error(
                    IssueCode::DuplicateEntityName,
                    format!("entity '{}' is defined more than once", entity.name),
                );
            }
            Self::check_entity(entity, &defined, &mut report);
        }

        report
    }

    fn check_domain(config: &DomainConfiguration, report: &mut ValidationReport) {
        if config.domain.name.is_empty() {
            report.push_error(IssueCode::MissingDomainName, "domain name is required");
        } else if !naming::is_pascal_case(&config.domain.name) {
            report.push_error(
                IssueCode::InvalidDomainName,
                format!(
                    "domain name '{}' must be PascalCase",
                    config.domain.name
                ),
            );
        }

        if config.entities.is_empty() {
            report.push_error(
                IssueCode::NoEntities,
                "a domain must define at least one entity",
            );
        }
    }

    fn check_entity(
        entity: &EntityConfiguration,
        defined: &BTreeSet<&str>,
        report: &mut ValidationReport,
    ) {
        if !naming::is_pascal_case(&entity.name) {
            report.push_error(
                IssueCode::InvalidEntityName,
                format!("entity name '{}' must be PascalCase", entity.name),
            );
        }

        if entity.fields.is_empty() {
            report.push_error(
                IssueCode::EntityWithoutFields,
                format!("entity '{}' must define at least one field", entity.name),
            );
        }

        let mut seen_fields = BTreeSet::new();
        for field in &entity.fields {
            if !seen_fields.insert(field.name.as_str()) {
                report.push_error(
                    IssueCode::DuplicateFieldName,
                    format!(
                        "field '{}' on entity '{}' is defined more than once",
                        field.name, entity.name
                    ),
                );
            }

            if !naming::is_snake_case(&field.name) {
                report.push_error(
                    IssueCode::InvalidFieldName,
                    format!(
                        "field name '{}' on entity '{}' must be snake_case",
                        field.name, entity.name
                    ),
                );
            }

            if field.semantic_type().is_none() {
                report.push_error(
                    IssueCode::UnknownFieldType,
                    format!(
                        "field '{}' on entity '{}' has unknown type '{}'",
                        field.name, entity.name, field.field_type
                    ),
                );
            }
        }

        for rel in &entity.relationships {
            if !defined.contains(rel.entity.as_str()) {
                report.push_error(
                    IssueCode::UndefinedRelationshipTarget,
                    format!(
                        "entity '{}' declares a relationship to undefined entity '{}'",
                        entity.name, rel.entity
                    ),
                );
            }
            if rel.back_populates.is_none() {
                report.push_warning(
                    IssueCode::MissingBackPopulates,
                    format!(
                        "relationship '{}' -> '{}' has no back_populates; the reverse side will not be linked",
                        entity.name, rel.entity
                    ),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{
        DomainSection, FieldConfiguration, GenerationOptions, RelationshipConfiguration,
        RelationshipKind,
    };

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

    fn entity(name: &str, fields: Vec<FieldConfiguration>) -> EntityConfiguration {
        EntityConfiguration {
            name: name.into(),
            description: String::new(),
            table_name: None,
            fields,
            relationships: Vec::new(),
        }
    }

    fn config(entities: Vec<EntityConfiguration>) -> DomainConfiguration {
        DomainConfiguration {
            domain: DomainSection {
                name: "Shop".into(),
                description: String::new(),
                package: "app.shop".into(),
            },
            entities,
            generation: GenerationOptions::default(),
        }
    }

    #[test]
    fn valid_config_passes() {
        let report = DomainValidator::validate(&config(vec![entity(
            "User",
            vec![field("email", "email")],
        )]));
        assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
    }

    #[test]
    fn empty_domain_is_invalid() {
        let report = DomainValidator::validate(&config(vec![]));
        assert!(
            report
                .errors
                .iter()
                .any(|i| i.code == IssueCode::NoEntities)
        );
    }

    #[test]
    fn entity_without_fields_is_invalid() {
        let report = DomainValidator::validate(&config(vec![entity("User", vec![])]));
        assert!(
            report
                .errors
                .iter()
                .any(|i| i.code == IssueCode::EntityWithoutFields)
        );
    }

    #[test]
    fn casing_violations_are_reported() {
        let report = DomainValidator::validate(&config(vec![entity(
            "user_account",
            vec![field("CreatedAt", "datetime")],
        )]));
        assert!(
            report
                .errors
                .iter()
                .any(|i| i.code == IssueCode::InvalidEntityName)
        );
        assert!(
            report
                .errors
                .iter()
                .any(|i| i.code == IssueCode::InvalidFieldName)
        );
    }

    #[test]
    fn two_independent_errors_come_back_together() {
        // Unknown field type AND undefined relationship target, one call.
        let mut user = entity("User", vec![field("email", "electronic_mail")]);
        user.relationships.push(RelationshipConfiguration {
            entity: "Profile".into(),
            kind: RelationshipKind::OneToOne,
            back_populates: Some("user".into()),
            foreign_key: None,
        });
        let report = DomainValidator::validate(&config(vec![user]));

        assert_eq!(report.errors.len(), 2);
        assert!(
            report
                .errors
                .iter()
                .any(|i| i.code == IssueCode::UnknownFieldType)
        );
        assert!(
            report.errors.iter().any(|i| {
                i.code == IssueCode::UndefinedRelationshipTarget && i.message.contains("Profile")
            })
        );
    }

    #[test]
    fn duplicate_names_are_reported() {
        let report = DomainValidator::validate(&config(vec![
            entity(
                "User",
                vec![field("email", "email"), field("email", "string")],
            ),
            entity("User", vec![field("name", "string")]),
        ]));
        assert!(
            report
                .errors
                .iter()
                .any(|i| i.code == IssueCode::DuplicateFieldName)
        );
        assert!(
            report
                .errors
                .iter()
                .any(|i| i.code == IssueCode::DuplicateEntityName)
        );
    }

    #[test]
    fn missing_back_populates_is_a_warning_not_error() {
        let mut user = entity("User", vec![field("email", "email")]);
        user.relationships.push(RelationshipConfiguration {
            entity: "User".into(),
            kind: RelationshipKind::OneToMany,
            back_populates: None,
            foreign_key: None,
        });
        let report = DomainValidator::validate(&config(vec![user]));
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
    }
}
