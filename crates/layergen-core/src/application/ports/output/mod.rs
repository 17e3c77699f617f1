//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `layergen-adapters` crate provides implementations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::{DomainConfiguration, Layer, MergedContext};
use crate::error::EngineResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `layergen_adapters::filesystem::LocalFilesystem` (production)
/// - `layergen_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> EngineResult<()>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &str) -> EngineResult<()>;

    /// Read a file, `None` if it does not exist.
    fn read_file(&self, path: &Path) -> EngineResult<Option<String>>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> EngineResult<()>;

    /// All regular files under `root`, recursively. Empty when `root`
    /// does not exist.
    fn list_files(&self, root: &Path) -> EngineResult<Vec<PathBuf>>;
}

/// Whether a load is allowed to persist the one-time breakdown of an
/// external configuration into co-located fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Never write anything (used by `validate`).
    ReadOnly,
    /// Perform the breakdown if this is the first encounter of an
    /// external configuration.
    Persist,
}

/// A fully loaded domain: typed configuration plus the raw per-layer
/// fragments that overlay it during merging.
#[derive(Debug, Clone)]
pub struct LoadedDomain {
    pub config: DomainConfiguration,
    /// Layer → free-form fragment from the co-located tree. Layers with
    /// no fragment are simply absent.
    pub layer_fragments: BTreeMap<Layer, Value>,
}

/// Port for configuration loading and breakdown.
///
/// Implemented by:
/// - `layergen_adapters::config_loader::TomlConfigSource`
pub trait ConfigSource: Send + Sync {
    /// Load the domain at `path` (external file or co-located directory).
    fn load(&self, path: &Path, mode: LoadMode) -> EngineResult<LoadedDomain>;
}

/// One renderable template belonging to a layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerTemplate {
    /// Stable identifier, e.g. `"entity/model"`; carried in render errors.
    pub id: String,
    /// Template body with `{{ ... }}` placeholders and default marker blocks.
    pub body: String,
    /// Output path expression relative to the output root, itself rendered
    /// through the same substitution engine.
    pub output_path: String,
}

/// Port for template lookup per layer.
///
/// Implemented by:
/// - `layergen_adapters::layer_templates::BuiltinTemplateSet`
pub trait TemplateSet: Send + Sync {
    /// Templates to render for `layer`, in a stable order.
    fn templates_for(&self, layer: Layer) -> EngineResult<Vec<LayerTemplate>>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `layergen_adapters::renderer::SubstitutionRenderer` (fixed filter table)
pub trait TemplateRenderer: Send + Sync {
    /// Render `body` against `context`.
    ///
    /// `template_id` is only used to attribute errors. A failure renders
    /// nothing: implementations must not return partial output.
    fn render(&self, template_id: &str, body: &str, context: &MergedContext)
    -> EngineResult<String>;
}
