//! Layergen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Layergen
//! layered code generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          layergen-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │          (GenerationService)            │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (ConfigSource, TemplateSet, Renderer,  │
//! │              Filesystem)                │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    layergen-adapters (Infrastructure)   │
//! │ (TomlConfigSource, SubstitutionRenderer,│
//! │      BuiltinTemplateSet, LocalFs)       │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Domain Layer (Pure Logic)         │
//! │ (Configuration, Merging, Declarations,  │
//! │     Preservation, Validation)           │
//! │          No I/O Dependencies            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use layergen_core::{
//!     application::{GenerateOptions, GenerationService},
//! };
//!
//! // Wire the service with injected adapters, then drive one domain.
//! let service = GenerationService::new(source, templates, renderer, filesystem);
//! let result = service.generate("domains/shop.toml", "./src", GenerateOptions::default())?;
//! assert!(result.success());
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateOptions, GenerationService,
        ports::{
            ConfigSource, Filesystem, LayerTemplate, LoadMode, LoadedDomain, TemplateRenderer,
            TemplateSet,
        },
    };
    pub use crate::domain::{
        DomainConfiguration, DomainValidator, EntityConfiguration, FieldConfiguration,
        GenerationResult, Layer, MergedContext, RelationshipConfiguration, ValidationReport,
    };
    pub use crate::error::{EngineError, EngineResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
