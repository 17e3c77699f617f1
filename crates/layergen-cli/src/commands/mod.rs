//! Command handlers.
//!
//! Each submodule implements one subcommand: translate CLI arguments, call
//! the core service, display results. No business logic lives here.

use std::path::Path;

use layergen_adapters::{
    BuiltinTemplateSet, LocalFilesystem, SubstitutionRenderer, TomlConfigSource, config_loader,
};
use layergen_core::application::GenerationService;

pub mod completions;
pub mod generate;
pub mod validate;

/// Wire a [`GenerationService`] with the production adapters, looking up
/// template overrides in the domain's co-located tree.
pub(crate) fn build_service(config_path: &Path) -> GenerationService {
    GenerationService::new(
        Box::new(TomlConfigSource::new()),
        Box::new(BuiltinTemplateSet::with_domain_dir(config_loader::domain_dir(config_path))),
        Box::new(SubstitutionRenderer::new()),
        Box::new(LocalFilesystem::new()),
    )
}
