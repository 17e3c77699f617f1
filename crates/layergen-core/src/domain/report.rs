//! Result and report types returned by `validate()` and `generate()`.
//!
//! Every error and warning produced during a run is attached to one of
//! these values. Nothing is swallowed: a caller can enumerate every issue
//! from a single call.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

// ── Validation ────────────────────────────────────────────────────────────────

/// Machine-readable code for one validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    MissingDomainName,
    NoEntities,
    EntityWithoutFields,
    DuplicateEntityName,
    DuplicateFieldName,
    InvalidDomainName,
    InvalidEntityName,
    InvalidFieldName,
    UnknownFieldType,
    UndefinedRelationshipTarget,
    MissingBackPopulates,
}

/// One semantic finding from [`DomainValidator`](crate::domain::DomainValidator).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub code: IssueCode,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Everything `validate()` found, errors and warnings together.
///
/// Validation is never fast-fail: all findings are collected so every
/// issue can be fixed in one pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push_error(&mut self, code: IssueCode, message: impl Into<String>) {
        self.errors.push(ValidationIssue::new(code, message));
    }

    pub fn push_warning(&mut self, code: IssueCode, message: impl Into<String>) {
        self.warnings.push(ValidationIssue::new(code, message));
    }
}

// ── Generation ────────────────────────────────────────────────────────────────

/// What happened to one output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// The file did not exist before this run.
    Created,
    /// The file existed and its content changed.
    Updated,
    /// The file existed and the regenerated content is byte-identical.
    Skipped,
    /// Rendering or writing this file failed; see `errors`.
    Failed,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Per-file entry in a [`GenerationResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub status: FileStatus,
}

/// One error or warning recorded during generation, tied to the file it
/// affected when there is one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationIssue {
    pub path: Option<PathBuf>,
    pub message: String,
}

impl GenerationIssue {
    pub fn for_file(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            message: message.into(),
        }
    }

    pub fn domain_wide(message: impl Into<String>) -> Self {
        Self {
            path: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for GenerationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(p) => write!(f, "{}: {}", p.display(), self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Aggregate report for one domain's generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationResult {
    /// Every file touched, in generation order.
    pub files: Vec<FileOutcome>,
    /// Per-file and domain-wide errors, in the order they occurred.
    pub errors: Vec<GenerationIssue>,
    /// Non-fatal findings (preservation warnings, skipped blocks).
    pub warnings: Vec<GenerationIssue>,
    /// Whether `generation.format_code` asked for an external formatter run.
    pub formatting_requested: bool,
    /// Whether this was a dry run (nothing was written).
    pub dry_run: bool,
}

impl GenerationResult {
    /// `false` if any file failed or a domain-wide error was recorded.
    pub fn success(&self) -> bool {
        self.errors.is_empty()
            && self
                .files
                .iter()
                .all(|f| !matches!(f.status, FileStatus::Failed))
    }

    /// Total number of files considered.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Number of files actually written (created or updated).
    pub fn written_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::Created | FileStatus::Updated))
            .count()
    }

    pub fn record(&mut self, path: impl Into<PathBuf>, status: FileStatus) {
        self.files.push(FileOutcome {
            path: path.into(),
            status,
        });
    }
}
