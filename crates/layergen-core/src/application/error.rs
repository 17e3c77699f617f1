//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// One template failed to render (undefined variable, filter error).
    /// Per-file: recorded in the generation result, the rest of the
    /// domain continues.
    #[error("rendering '{template}' failed: {reason}")]
    RenderFailed { template: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The configuration source could not produce a domain.
    #[error("Configuration load failed: {reason}")]
    ConfigLoadFailed { reason: String },

    /// Store/adapter internal state error (lock poisoned, etc.).
    #[error("Adapter state error")]
    AdapterStateError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RenderFailed { template, reason } => vec![
                format!("Template '{}' could not be rendered: {}", template, reason),
                "Check the layer fragment provides every variable the template uses".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ConfigLoadFailed { reason } => vec![
                format!("Load failed: {}", reason),
                "Run: layergen validate <config> for a full report".into(),
            ],
            Self::AdapterStateError => vec![
                "An adapter's internal state is inconsistent".into(),
                "Try again; report if it persists".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RenderFailed { .. } => ErrorCategory::Render,
            Self::FilesystemError { .. } | Self::AdapterStateError => ErrorCategory::Internal,
            Self::ConfigLoadFailed { .. } => ErrorCategory::Configuration,
        }
    }
}
