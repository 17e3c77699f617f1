//! Infrastructure adapters for Layergen.
//!
//! This crate implements the ports defined in
//! `layergen-core::application::ports`. It contains all external
//! dependencies and I/O operations.

pub mod config_loader;
pub mod filesystem;
pub mod layer_templates;
pub mod renderer;

// Re-export commonly used adapters
pub use config_loader::TomlConfigSource;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use layer_templates::BuiltinTemplateSet;
pub use renderer::SubstitutionRenderer;
