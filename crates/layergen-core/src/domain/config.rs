//! Typed configuration model.
//!
//! # Design
//!
//! The on-disk TOML fragments are deserialized into these strong record
//! types exactly once, at load time. `deny_unknown_fields` is set on every
//! struct so a misspelled key fails loudly instead of being silently
//! ignored. Values are immutable after loading — the merger copies, it
//! never mutates a fragment in place.
//!
//! One deliberate exception to strong typing: [`FieldConfiguration::field_type`]
//! is kept as the raw string and resolved through [`FieldType::parse`] by the
//! validator. An unknown type must surface as one entry in the validation
//! report alongside every other finding, not abort deserialization of the
//! whole file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

// ── DomainConfiguration ───────────────────────────────────────────────────────

/// A complete domain: the unit of generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainConfiguration {
    pub domain: DomainSection,
    #[serde(default)]
    pub entities: Vec<EntityConfiguration>,
    #[serde(default)]
    pub generation: GenerationOptions,
}

/// `[domain]` section — identity of the domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainSection {
    /// PascalCase business-area name, e.g. `"User"` or `"OrderItem"`.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Package identifier the generated code lives under, e.g. `"app.user"`.
    #[serde(default)]
    pub package: String,
}

/// One `[[entities]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityConfiguration {
    /// PascalCase entity name.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Storage table identifier. Defaults to the pluralized snake_case
    /// entity name when omitted.
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldConfiguration>,
    #[serde(default)]
    pub relationships: Vec<RelationshipConfiguration>,
}

impl EntityConfiguration {
    /// Effective table name: explicit `table_name`, or plural snake_case.
    pub fn table_name(&self) -> String {
        self.table_name.clone().unwrap_or_else(|| {
            crate::domain::naming::pluralize(&crate::domain::naming::to_snake_case(&self.name))
        })
    }
}

/// One `[[entities.fields]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfiguration {
    /// snake_case field name.
    pub name: String,
    /// Semantic type, validated against [`FieldType`].
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub index: bool,
    /// Default-value expression, emitted verbatim into the declaration.
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Full hand-written declaration; when present it replaces the
    /// generated one entirely.
    #[serde(default)]
    pub raw_override: Option<String>,
}

impl FieldConfiguration {
    /// The parsed semantic type, if `field_type` names a known one.
    pub fn semantic_type(&self) -> Option<FieldType> {
        FieldType::parse(&self.field_type)
    }
}

/// One `[[entities.relationships]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelationshipConfiguration {
    /// Target entity name (must be defined in the same domain).
    pub entity: String,
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
    /// Attribute name on the target entity that points back here.
    #[serde(default)]
    pub back_populates: Option<String>,
    /// Foreign-key column reference, e.g. `"users.id"`.
    #[serde(default)]
    pub foreign_key: Option<String>,
}

/// `[generation]` section — per-domain generation switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct GenerationOptions {
    /// Re-inject marker-delimited blocks from existing output files.
    pub preserve_custom_code: bool,
    /// Report that an external formatter should run; the core never formats.
    pub format_code: bool,
    /// Remove the domain's previous output tree before generating.
    pub clean_before_generate: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            preserve_custom_code: true,
            format_code: false,
            clean_before_generate: false,
        }
    }
}

// ── FieldType ─────────────────────────────────────────────────────────────────

/// Closed enumeration of portable semantic field types.
///
/// Backend-specific type strings are rejected at validation time; the
/// renderer's `storage_type` filter owns the mapping to concrete storage
/// types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Scalar(ScalarType),
    /// Nullable wrapper: `optional[<scalar>]`.
    Optional(ScalarType),
    /// Collection wrapper: `list[<scalar>]`.
    List(ScalarType),
}

/// The scalar types a field (or wrapper) may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    String,
    Text,
    Integer,
    Float,
    Boolean,
    DateTime,
    Uuid,
    Email,
}

impl ScalarType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::DateTime => "datetime",
            Self::Uuid => "uuid",
            Self::Email => "email",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "string" => Some(Self::String),
            "text" => Some(Self::Text),
            "integer" => Some(Self::Integer),
            "float" => Some(Self::Float),
            "boolean" => Some(Self::Boolean),
            "datetime" => Some(Self::DateTime),
            "uuid" => Some(Self::Uuid),
            "email" => Some(Self::Email),
            _ => None,
        }
    }
}

impl FieldType {
    /// Parse a type expression: a bare scalar, `optional[..]`, or `list[..]`.
    ///
    /// Returns `None` for anything outside the closed enumeration — callers
    /// turn that into a validation finding, never into a fallback type.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(inner) = s.strip_prefix("optional[").and_then(|r| r.strip_suffix(']')) {
            return ScalarType::parse(inner.trim()).map(Self::Optional);
        }
        if let Some(inner) = s.strip_prefix("list[").and_then(|r| r.strip_suffix(']')) {
            return ScalarType::parse(inner.trim()).map(Self::List);
        }
        ScalarType::parse(s).map(Self::Scalar)
    }

    /// The scalar carried by this type, unwrapping `optional`/`list`.
    pub const fn scalar(&self) -> ScalarType {
        match self {
            Self::Scalar(s) | Self::Optional(s) | Self::List(s) => *s,
        }
    }

    /// Whether the generated declaration should allow NULL.
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(s) => f.write_str(s.as_str()),
            Self::Optional(s) => write!(f, "optional[{}]", s.as_str()),
            Self::List(s) => write!(f, "list[{}]", s.as_str()),
        }
    }
}

impl FromStr for FieldType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DomainError::UnknownFieldType {
            field: String::new(),
            type_name: s.to_string(),
        })
    }
}

// ── RelationshipKind ──────────────────────────────────────────────────────────

/// The four supported relationship shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl RelationshipKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneToOne => "one_to_one",
            Self::OneToMany => "one_to_many",
            Self::ManyToOne => "many_to_one",
            Self::ManyToMany => "many_to_many",
        }
    }

    /// Whether the generated attribute holds a collection of the target.
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Layer ─────────────────────────────────────────────────────────────────────

/// One of the four generation layers, in dependency order.
///
/// The order is a generation-sequencing contract: the entity layer depends
/// on nothing, data-access on entity, business-logic on data-access, and
/// interface on business-logic. [`Layer::ALL`] iterates leaves-first, and
/// `Ord` follows the same order so layer-keyed maps do too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Entity,
    DataAccess,
    BusinessLogic,
    Interface,
}

impl Layer {
    /// All layers in generation (dependency) order.
    pub const ALL: [Layer; 4] = [
        Layer::Entity,
        Layer::DataAccess,
        Layer::BusinessLogic,
        Layer::Interface,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::DataAccess => "data_access",
            Self::BusinessLogic => "business_logic",
            Self::Interface => "interface",
        }
    }

    /// Directory name used for this layer's co-located fragment.
    pub const fn dir_name(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layer {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "entity" => Ok(Self::Entity),
            "data_access" => Ok(Self::DataAccess),
            "business_logic" => Ok(Self::BusinessLogic),
            "interface" => Ok(Self::Interface),
            other => Err(DomainError::InvalidConfiguration(format!(
                "unknown layer: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_parses_scalars() {
        assert_eq!(
            FieldType::parse("string"),
            Some(FieldType::Scalar(ScalarType::String))
        );
        assert_eq!(
            FieldType::parse("email"),
            Some(FieldType::Scalar(ScalarType::Email))
        );
    }

    #[test]
    fn field_type_parses_wrappers() {
        assert_eq!(
            FieldType::parse("optional[datetime]"),
            Some(FieldType::Optional(ScalarType::DateTime))
        );
        assert_eq!(
            FieldType::parse("list[uuid]"),
            Some(FieldType::List(ScalarType::Uuid))
        );
    }

    #[test]
    fn field_type_rejects_open_ended_strings() {
        assert_eq!(FieldType::parse("varchar(255)"), None);
        assert_eq!(FieldType::parse("optional[varchar]"), None);
        assert_eq!(FieldType::parse(""), None);
    }

    #[test]
    fn field_type_display_round_trips() {
        for expr in ["string", "optional[integer]", "list[email]"] {
            assert_eq!(FieldType::parse(expr).unwrap().to_string(), expr);
        }
    }

    #[test]
    fn layer_order_is_dependency_order() {
        assert_eq!(
            Layer::ALL,
            [
                Layer::Entity,
                Layer::DataAccess,
                Layer::BusinessLogic,
                Layer::Interface
            ]
        );
    }

    #[test]
    fn layer_sorts_and_keys_maps_in_dependency_order() {
        let mut shuffled = [Layer::Interface, Layer::Entity, Layer::BusinessLogic];
        shuffled.sort();
        assert_eq!(
            shuffled,
            [Layer::Entity, Layer::BusinessLogic, Layer::Interface]
        );

        let map: std::collections::BTreeMap<Layer, u8> =
            Layer::ALL.into_iter().rev().zip(0..).collect();
        let keys: Vec<Layer> = map.keys().copied().collect();
        assert_eq!(keys, Layer::ALL);
    }

    #[test]
    fn layer_from_str_accepts_hyphenated() {
        assert_eq!("data-access".parse::<Layer>().unwrap(), Layer::DataAccess);
        assert_eq!(
            "business_logic".parse::<Layer>().unwrap(),
            Layer::BusinessLogic
        );
        assert!("presentation".parse::<Layer>().is_err());
    }

    #[test]
    fn table_name_defaults_to_plural_snake() {
        let entity = EntityConfiguration {
            name: "OrderItem".into(),
            description: String::new(),
            table_name: None,
            fields: Vec::new(),
            relationships: Vec::new(),
        };
        assert_eq!(entity.table_name(), "order_items");
    }

    #[test]
    fn generation_options_defaults() {
        let opts = GenerationOptions::default();
        assert!(opts.preserve_custom_code);
        assert!(!opts.format_code);
        assert!(!opts.clean_before_generate);
    }

    #[test]
    fn relationship_kind_collection_shapes() {
        assert!(RelationshipKind::OneToMany.is_collection());
        assert!(RelationshipKind::ManyToMany.is_collection());
        assert!(!RelationshipKind::ManyToOne.is_collection());
        assert!(!RelationshipKind::OneToOne.is_collection());
    }
}
