//! Implementation of the `layergen generate` command.
//!
//! Responsibility: translate CLI arguments into [`GenerateOptions`], call
//! the core generation service, and display the aggregated result. No
//! business logic lives here.

use std::path::PathBuf;

use tracing::{info, instrument};

use layergen_core::{
    application::GenerateOptions,
    domain::{FileStatus, GenerationResult},
};

use crate::{
    cli::{GenerateArgs, GlobalArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `layergen generate` command.
///
/// Dispatch sequence:
/// 1. Resolve the output directory (flag, then app config, then `.`)
/// 2. Build the service with production adapters
/// 3. Run generation (the service handles validation, preservation, writes)
/// 4. Display per-file outcomes, warnings, and errors
/// 5. Map an unsuccessful result to a non-zero exit
#[instrument(skip_all, fields(config = %args.config.display()))]
pub fn execute(
    args: GenerateArgs,
    global: GlobalArgs,
    config: &AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let output_dir = args
        .output
        .clone()
        .or_else(|| config.defaults.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let service = super::build_service(&args.config);
    let options = GenerateOptions {
        clean: args.clean,
        dry_run: args.dry_run,
    };

    if args.dry_run {
        output.info("Dry run: nothing will be written")?;
    }

    output.header(&format!("Generating from {}...", args.config.display()))?;
    info!(output = %output_dir.display(), "generation started");

    let result = service.generate(&args.config, &output_dir, options)?;

    if output.format() == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).map_err(|e| CliError::InvalidInput {
                message: format!("could not serialize result: {e}"),
                source: None,
            })?
        );
    } else {
        print_result(&result, &global, &output)?;
    }

    if result.success() {
        Ok(())
    } else {
        Err(CliError::GenerationFailed {
            errors: result.errors.len(),
        })
    }
}

fn print_result(
    result: &GenerationResult,
    global: &GlobalArgs,
    output: &OutputManager,
) -> CliResult<()> {
    for file in &result.files {
        let line = format!("{:>8}  {}", file.status.to_string(), file.path.display());
        match file.status {
            FileStatus::Failed => output.error(&line)?,
            FileStatus::Skipped if global.verbose == 0 => {} // noise unless -v
            _ => output.print(&line)?,
        }
    }

    for warning in &result.warnings {
        output.warning(&warning.to_string())?;
    }
    for error in &result.errors {
        output.error(&error.to_string())?;
    }

    if result.success() {
        let action = if result.dry_run {
            "would be written"
        } else {
            "written"
        };
        output.success(&format!(
            "{} file(s) {action}, {} unchanged",
            result.written_count(),
            result.file_count() - result.written_count(),
        ))?;

        if result.formatting_requested && !result.dry_run {
            output.info("format_code is enabled; run your formatter over the output")?;
        }
    }

    Ok(())
}
