//! Implementation of the `layergen validate` command.
//!
//! Loads the domain read-only, runs every semantic check, and prints the
//! full report. Never writes a file — not even the one-time breakdown of
//! an external configuration.

use tracing::{info, instrument};

use layergen_core::domain::ValidationReport;

use crate::{
    cli::{GlobalArgs, OutputFormat, ValidateArgs},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `layergen validate` command.
#[instrument(skip_all, fields(config = %args.config.display()))]
pub fn execute(args: ValidateArgs, _global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let service = super::build_service(&args.config);
    let report = service.validate(&args.config)?;

    info!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validation report ready"
    );

    if output.format() == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).map_err(|e| CliError::InvalidInput {
                message: format!("could not serialize report: {e}"),
                source: None,
            })?
        );
    } else {
        print_report(&report, &output)?;
    }

    if report.is_valid() {
        Ok(())
    } else {
        Err(CliError::ValidationFailed {
            errors: report.errors.len(),
            config: args.config,
        })
    }
}

fn print_report(report: &ValidationReport, output: &OutputManager) -> CliResult<()> {
    for issue in &report.errors {
        output.error(&issue.message)?;
    }
    for issue in &report.warnings {
        output.warning(&issue.message)?;
    }

    if report.is_valid() {
        let suffix = match report.warnings.len() {
            0 => String::new(),
            n => format!(" ({n} warning(s))"),
        };
        output.success(&format!("Configuration is valid{suffix}"))?;
    }

    Ok(())
}
