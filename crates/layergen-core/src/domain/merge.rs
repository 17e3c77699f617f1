//! Configuration merger.
//!
//! Combines the domain-level fragment with one layer-level fragment into a
//! single immutable [`MergedContext`], and computes the derived name
//! variants templates rely on.
//!
//! # Merge policy
//!
//! Explicit, not incidental:
//! - mapping values merge recursively, key by key;
//! - list values are replaced wholesale by the higher-priority fragment,
//!   never merged element-by-element;
//! - scalars are replaced.
//!
//! The merge is copy-on-write: inputs are never mutated, and merging the
//! same fragments twice yields a byte-identical context (`serde_json`'s
//! default BTreeMap-backed object keeps serialization deterministic).

use serde_json::{Map, Value, json};

use crate::domain::config::{DomainConfiguration, EntityConfiguration};
use crate::domain::declarations;
use crate::domain::error::DomainError;
use crate::domain::naming;

/// Deep-merge `overlay` on top of `base`, returning a new value.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let mut merged = base_map.clone();
            for (key, overlay_val) in overlay_map {
                let entry = match merged.get(key) {
                    Some(base_val) => deep_merge(base_val, overlay_val),
                    None => overlay_val.clone(),
                };
                merged.insert(key.clone(), entry);
            }
            Value::Object(merged)
        }
        // Lists (and scalars) are replaced wholesale; element-wise list
        // merging is not supported.
        _ => overlay.clone(),
    }
}

/// The immutable mapping a template is rendered against.
///
/// Produced fresh per (entity, layer) pair; consumed read-only by the
/// renderer and discarded after the run.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedContext {
    root: Map<String, Value>,
}

impl MergedContext {
    /// Wrap an already-merged object. Non-object values are rejected.
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(DomainError::InvalidConfiguration(format!(
                "merged context must be a mapping, got {other}"
            ))),
        }
    }

    /// Resolve a dotted path (`entity.name_snake`) to a value.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.root.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// The whole context as a JSON value (cloned).
    pub fn to_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    /// Canonical serialized form; equal contexts serialize identically.
    pub fn canonical_string(&self) -> String {
        // BTreeMap-backed objects serialize with sorted keys, so this is
        // stable across runs and call order.
        Value::Object(self.root.clone()).to_string()
    }
}

/// Derived casing variants for one identifier.
fn name_variants(name: &str) -> Map<String, Value> {
    let snake = naming::to_snake_case(name);
    let mut map = Map::new();
    map.insert("name".into(), json!(naming::to_pascal_case(name)));
    map.insert("name_snake".into(), json!(snake));
    map.insert("name_camel".into(), json!(naming::to_camel_case(name)));
    map.insert("name_plural".into(), json!(naming::pluralize(&snake)));
    map
}

/// Build the merged context for one entity within one layer.
///
/// Base = domain fragment (domain identity, entity data, generation
/// options, derived variants, composed declaration blocks); overlay = the
/// layer's co-located fragment, which may add or override keys for that
/// layer's templates but follows the list-replacement policy above.
pub fn build_entity_context(
    config: &DomainConfiguration,
    entity: &EntityConfiguration,
    layer_fragment: Option<&Value>,
) -> Result<MergedContext, DomainError> {
    let mut domain = name_variants(&config.domain.name);
    domain.insert("description".into(), json!(config.domain.description));
    domain.insert("package".into(), json!(config.domain.package));

    let mut entity_value = name_variants(&entity.name);
    entity_value.insert("description".into(), json!(entity.description));
    entity_value.insert("table_name".into(), json!(entity.table_name()));
    entity_value.insert(
        "field_declarations".into(),
        json!(declarations::field_declarations(entity)?),
    );
    entity_value.insert(
        "schema_field_declarations".into(),
        json!(declarations::schema_field_declarations(entity)?),
    );
    entity_value.insert(
        "relationship_declarations".into(),
        json!(declarations::relationship_declarations(entity)),
    );

    let generation = serde_json::to_value(&config.generation)
        .map_err(|e| DomainError::InvalidConfiguration(e.to_string()))?;

    let base = json!({
        "domain": domain,
        "entity": entity_value,
        "generation": generation,
    });

    let merged = match layer_fragment {
        Some(fragment) => deep_merge(&base, fragment),
        None => base,
    };

    MergedContext::from_value(merged)
}
