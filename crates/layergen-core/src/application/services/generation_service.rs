//! Generation Service - main application orchestrator.
//!
//! This service coordinates the per-domain generation workflow:
//! 1. Load configuration (external or co-located)
//! 2. Validate
//! 3. For each layer, in dependency order, for each entity:
//!    snapshot existing file → render → inject preserved blocks → write
//! 4. Aggregate everything into a [`GenerationResult`]
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).
//!
//! Failure policy is best-effort: a file that fails to render or write is
//! recorded and the rest of the domain continues. Only configuration
//! shape errors abort before anything is written.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        error::ApplicationError,
        ports::{
            ConfigSource, Filesystem, LayerTemplate, LoadMode, LoadedDomain, TemplateRenderer,
            TemplateSet,
        },
    },
    domain::{
        DomainValidator, Layer, MergedContext, ValidationReport,
        merge::build_entity_context,
        naming,
        preserve,
        report::{FileStatus, GenerationIssue, GenerationResult},
    },
    error::EngineResult,
};

/// Options for one `generate()` call, from the caller's flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Remove the domain's previous output tree first (preserved-block
    /// extraction still reads the pre-clean snapshot).
    pub clean: bool,
    /// Render and report everything, write nothing.
    pub dry_run: bool,
}

/// Main generation service.
///
/// Orchestrates loading, merging, rendering, preservation, and writing.
pub struct GenerationService {
    source: Box<dyn ConfigSource>,
    templates: Box<dyn TemplateSet>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl GenerationService {
    /// Create a new generation service with the given adapters.
    pub fn new(
        source: Box<dyn ConfigSource>,
        templates: Box<dyn TemplateSet>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            source,
            templates,
            renderer,
            filesystem,
        }
    }

    /// Validate the configuration at `config_path`. Never writes files.
    #[instrument(skip_all, fields(config = %config_path.as_ref().display()))]
    pub fn validate(&self, config_path: impl AsRef<Path>) -> EngineResult<ValidationReport> {
        let loaded = self.source.load(config_path.as_ref(), LoadMode::ReadOnly)?;
        let report = DomainValidator::validate(&loaded.config);
        info!(
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "validation finished"
        );
        Ok(report)
    }

    /// Generate one domain into `output_dir`.
    ///
    /// Returns `Err` only for fatal configuration problems (nothing
    /// written); every per-file failure is recorded in the result instead.
    #[instrument(
        skip_all,
        fields(
            config = %config_path.as_ref().display(),
            output = %output_dir.as_ref().display(),
            clean = options.clean,
            dry_run = options.dry_run
        )
    )]
    pub fn generate(
        &self,
        config_path: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
        options: GenerateOptions,
    ) -> EngineResult<GenerationResult> {
        let output_dir = output_dir.as_ref();
        let loaded = self.source.load(config_path.as_ref(), LoadMode::Persist)?;

        let mut result = GenerationResult {
            formatting_requested: loaded.config.generation.format_code,
            dry_run: options.dry_run,
            ..GenerationResult::default()
        };

        // Semantic errors abort the domain before any file is written,
        // but are reported through the result so nothing is swallowed.
        let report = DomainValidator::validate(&loaded.config);
        for warning in &report.warnings {
            result
                .warnings
                .push(GenerationIssue::domain_wide(warning.to_string()));
        }
        if !report.is_valid() {
            for error in &report.errors {
                result
                    .errors
                    .push(GenerationIssue::domain_wide(error.to_string()));
            }
            warn!(errors = report.errors.len(), "generation aborted: invalid configuration");
            return Ok(result);
        }

        info!(
            domain = %loaded.config.domain.name,
            entities = loaded.config.entities.len(),
            "generating domain"
        );

        let domain_root = output_dir.join(naming::to_snake_case(&loaded.config.domain.name));

        // Snapshot before anything is removed or overwritten; clean mode
        // extracts preserved blocks from this snapshot, never from the
        // emptied tree.
        let snapshot = self.snapshot_tree(&domain_root, &mut result)?;

        let clean = options.clean || loaded.config.generation.clean_before_generate;
        if clean && !options.dry_run && self.filesystem.exists(&domain_root) {
            info!(path = %domain_root.display(), "cleaning previous output tree");
            self.filesystem.remove_dir_all(&domain_root)?;
        }

        for layer in Layer::ALL {
            self.render_layer(layer, &loaded, output_dir, &snapshot, options, &mut result);
        }

        info!(
            files = result.file_count(),
            written = result.written_count(),
            errors = result.errors.len(),
            success = result.success(),
            "generation finished"
        );
        Ok(result)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Read every existing file under the domain's output tree.
    fn snapshot_tree(
        &self,
        domain_root: &Path,
        result: &mut GenerationResult,
    ) -> EngineResult<BTreeMap<PathBuf, String>> {
        let mut snapshot = BTreeMap::new();
        for path in self.filesystem.list_files(domain_root)? {
            match self.filesystem.read_file(&path) {
                Ok(Some(content)) => {
                    snapshot.insert(path, content);
                }
                Ok(None) => {}
                Err(e) => {
                    // A file we cannot snapshot loses its preserved
                    // blocks; surface that instead of failing the run.
                    result.warnings.push(GenerationIssue::for_file(
                        path,
                        format!("could not snapshot existing file: {e}"),
                    ));
                }
            }
        }
        debug!(files = snapshot.len(), "snapshot taken");
        Ok(snapshot)
    }

    /// Render every (template, entity) pair belonging to one layer.
    fn render_layer(
        &self,
        layer: Layer,
        loaded: &LoadedDomain,
        output_dir: &Path,
        snapshot: &BTreeMap<PathBuf, String>,
        options: GenerateOptions,
        result: &mut GenerationResult,
    ) {
        let templates = match self.templates.templates_for(layer) {
            Ok(templates) => templates,
            Err(e) => {
                result
                    .errors
                    .push(GenerationIssue::domain_wide(format!("layer {layer}: {e}")));
                return;
            }
        };

        let fragment = loaded.layer_fragments.get(&layer);

        for entity in &loaded.config.entities {
            let context = match build_entity_context(&loaded.config, entity, fragment) {
                Ok(context) => context,
                Err(e) => {
                    result.errors.push(GenerationIssue::domain_wide(format!(
                        "entity '{}', layer {layer}: {e}",
                        entity.name
                    )));
                    continue;
                }
            };

            for template in &templates {
                self.render_one(template, &context, loaded, output_dir, snapshot, options, result);
            }
        }
    }

    /// Snapshot → render → inject → write, for one output file.
    #[allow(clippy::too_many_arguments)]
    fn render_one(
        &self,
        template: &LayerTemplate,
        context: &MergedContext,
        loaded: &LoadedDomain,
        output_dir: &Path,
        snapshot: &BTreeMap<PathBuf, String>,
        options: GenerateOptions,
        result: &mut GenerationResult,
    ) {
        // The output path is itself a template expression.
        let path_id = format!("{}#path", template.id);
        let relative = match self.renderer.render(&path_id, &template.output_path, context) {
            Ok(path) => path,
            Err(e) => {
                let failure = ApplicationError::RenderFailed {
                    template: template.id.clone(),
                    reason: e.to_string(),
                };
                result
                    .errors
                    .push(GenerationIssue::domain_wide(failure.to_string()));
                return;
            }
        };
        let path = output_dir.join(&relative);

        // Two views of the previous content: the pre-clean snapshot feeds
        // block extraction, while the Created/Updated/Skipped decision is
        // made against whatever is on disk right now. After a clean the
        // disk is empty, so every file is written again even when its
        // rendered content matches the snapshot.
        let on_disk = self.filesystem.read_file(&path).ok().flatten();
        let existing = snapshot.get(&path).cloned().or_else(|| on_disk.clone());

        // Extraction happens on the pre-overwrite content; warnings are
        // recorded and the affected blocks are simply not preserved.
        let preserved = match (&existing, loaded.config.generation.preserve_custom_code) {
            (Some(text), true) => {
                let extraction = preserve::extract(text);
                for warning in extraction.warnings {
                    result
                        .warnings
                        .push(GenerationIssue::for_file(&path, warning.to_string()));
                }
                Some(extraction.blocks)
            }
            _ => None,
        };

        let rendered = match self.renderer.render(&template.id, &template.body, context) {
            Ok(text) => text,
            Err(e) => {
                // No partial output: the file keeps whatever was there.
                let failure = ApplicationError::RenderFailed {
                    template: template.id.clone(),
                    reason: e.to_string(),
                };
                result
                    .errors
                    .push(GenerationIssue::for_file(&path, failure.to_string()));
                result.record(path, FileStatus::Failed);
                return;
            }
        };

        let output = match &preserved {
            Some(blocks) => preserve::inject(&rendered, blocks),
            None => rendered,
        };

        let status = match &on_disk {
            None => FileStatus::Created,
            Some(current) if *current == output => FileStatus::Skipped,
            Some(_) => FileStatus::Updated,
        };

        if options.dry_run || status == FileStatus::Skipped {
            result.record(path, status);
            return;
        }

        if let Err(e) = self.write_output(&path, &output) {
            result
                .errors
                .push(GenerationIssue::for_file(&path, e.to_string()));
            result.record(path, FileStatus::Failed);
            return;
        }

        debug!(path = %path.display(), %status, "wrote file");
        result.record(path, status);
    }

    fn write_output(&self, path: &Path, content: &str) -> EngineResult<()> {
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(path, content)
    }
}
