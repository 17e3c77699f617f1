//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "layergen",
    bin_name = "layergen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Layered code generation from domain configuration",
    long_about = "Layergen renders a layered application skeleton (models, \
                  repositories, services, API routers) from a TOML domain \
                  configuration, preserving hand-edited marker blocks across \
                  regenerations.",
    after_help = "EXAMPLES:\n\
        \x20 layergen validate domains/shop.toml\n\
        \x20 layergen generate domains/shop.toml --output src\n\
        \x20 layergen generate domains/shop --output src --dry-run\n\
        \x20 layergen completions bash > /usr/share/bash-completion/completions/layergen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check a domain configuration without writing anything.
    #[command(
        visible_alias = "check",
        about = "Validate a domain configuration",
        after_help = "EXAMPLES:\n\
            \x20 layergen validate domains/shop.toml\n\
            \x20 layergen validate domains/shop           # co-located tree\n\
            \x20 layergen validate domains/shop.toml --output-format json"
    )]
    Validate(ValidateArgs),

    /// Generate all layers for one domain.
    #[command(
        visible_alias = "gen",
        about = "Generate code for a domain",
        after_help = "EXAMPLES:\n\
            \x20 layergen generate domains/shop.toml --output src\n\
            \x20 layergen generate domains/shop --output src --clean\n\
            \x20 layergen generate domains/shop.toml --dry-run"
    )]
    Generate(GenerateArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 layergen completions bash > ~/.local/share/bash-completion/completions/layergen\n\
            \x20 layergen completions zsh  > ~/.zfunc/_layergen\n\
            \x20 layergen completions fish > ~/.config/fish/completions/layergen.fish"
    )]
    Completions(CompletionsArgs),
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `layergen validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Domain configuration: an external TOML file or a co-located
    /// directory.
    #[arg(value_name = "CONFIG", help = "Domain configuration file or directory")]
    pub config: PathBuf,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `layergen generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Domain configuration: an external TOML file or a co-located
    /// directory. An external file is broken down into a co-located tree
    /// on first use.
    #[arg(value_name = "CONFIG", help = "Domain configuration file or directory")]
    pub config: PathBuf,

    /// Directory the generated tree is written under. Falls back to
    /// `defaults.output_dir` from the application config, then to the
    /// current directory.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Remove the domain's previous output tree before generating.
    /// Preserved blocks are still carried over from the old files.
    #[arg(long = "clean", help = "Remove previous output before generating")]
    pub clean: bool,

    /// Render and report everything without writing any files.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `layergen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: clap_complete::Shell,
}

// ── tests ─────────────────────────────────────────────────────────────────────
