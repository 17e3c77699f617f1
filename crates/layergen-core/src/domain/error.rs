// ============================================================================
// domain/error.rs - COMPREHENSIVE ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for aggregation into reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
///
/// These are the *fatal* configuration errors: if one is raised while
/// loading a domain, generation aborts before any file is written.
/// Non-fatal semantic findings are collected as
/// [`ValidationIssue`](crate::domain::report::ValidationIssue) instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Configuration shape errors (fatal before generation)
    // ========================================================================
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Configuration not found at '{path}'")]
    ConfigurationNotFound { path: String },

    // ========================================================================
    // Identifier / type errors
    // ========================================================================
    #[error("unknown field type '{type_name}' on field '{field}'")]
    UnknownFieldType { field: String, type_name: String },

    // ========================================================================
    // Template / rendering constraint violations
    // ========================================================================
    #[error("template '{template}' references undefined variable '{variable}'")]
    UndefinedVariable { template: String, variable: String },

    #[error("filter '{filter}' failed in template '{template}': {reason}")]
    FilterFailed {
        template: String,
        filter: String,
        reason: String,
    },

    #[error("unknown filter '{filter}' in template '{template}'")]
    UnknownFilter { template: String, filter: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidConfiguration(msg) => vec![
                "Check your domain configuration file".into(),
                format!("Details: {}", msg),
            ],
            Self::ConfigurationNotFound { path } => vec![
                format!("No configuration found at: {}", path),
                "Pass the path to a domain config file or co-located directory".into(),
            ],
            Self::UnknownFieldType { type_name, .. } => vec![
                format!("'{}' is not a known field type", type_name),
                "Known types: string, text, integer, float, boolean, datetime, uuid, email".into(),
                "Wrappers: optional[<type>], list[<type>]".into(),
            ],
            Self::UndefinedVariable { variable, .. } => vec![
                format!("The template expects a '{}' value", variable),
                "Add it to the domain or layer configuration fragment".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfiguration(_) => ErrorCategory::Configuration,
            Self::ConfigurationNotFound { .. } => ErrorCategory::NotFound,
            Self::UnknownFieldType { .. } => ErrorCategory::Validation,
            Self::UndefinedVariable { .. }
            | Self::FilterFailed { .. }
            | Self::UnknownFilter { .. } => ErrorCategory::Render,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Render,
    NotFound,
    Internal,
}
