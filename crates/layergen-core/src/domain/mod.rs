//! Core domain layer for Layergen.
//!
//! This module contains pure business logic with ZERO I/O.
//! Loading, rendering, and writing concerns are handled via ports (traits)
//! defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Deterministic**: Same configuration in, same strings out
//! - **Immutable entities**: All domain objects are Clone + PartialEq

pub mod config;
pub mod declarations;
pub mod error;
pub mod merge;
pub mod naming;
pub mod preserve;
pub mod report;

mod validation;

pub use config::{
    DomainConfiguration, DomainSection, EntityConfiguration, FieldConfiguration, FieldType,
    GenerationOptions, Layer, RelationshipConfiguration, RelationshipKind, ScalarType,
};

pub use error::{DomainError, ErrorCategory};

pub use merge::{MergedContext, deep_merge};

pub use preserve::{Extraction, PreservationWarning};

pub use report::{
    FileOutcome, FileStatus, GenerationIssue, GenerationResult, IssueCode, ValidationIssue,
    ValidationReport,
};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merged_context_is_order_insensitive() {
        let a = MergedContext::from_value(serde_json::json!({"b": 1, "a": 2})).unwrap();
        let b = MergedContext::from_value(serde_json::json!({"a": 2, "b": 1})).unwrap();
        assert_eq!(a.canonical_string(), b.canonical_string());
    }
}
