//! CLI argument definitions and parsing.
//!
//! Defines the command-line interface structure using clap:
//! - `Cli` - Main CLI entry point
//! - `Commands` - Available subcommands

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::commands::common::ConvertArgs;

/// MAPI - Convert API specifications to Skill bundles.
///
/// Reads a single-file MAPI document or an OpenAPI specification and
/// writes a Skill folder: an index `Skill.md`, shared documents under
/// `common/` and one document per capability under `capabilities/`.
#[derive(Parser, Debug)]
#[command(name = "mapi")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    pub format: String,

    /// Intent keyword configuration file (TOML)
    #[arg(long, global = true, env = "MAPI_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a single-file MAPI document to a Skill folder.
    ///
    /// # Examples
    ///
    /// ```bash
    /// mapi split billing.mapi.md -o ./billing-skill
    /// ```
    Split(ConvertArgs),

    /// Convert an OpenAPI specification (JSON or YAML) to a Skill folder.
    ///
    /// # Examples
    ///
    /// ```bash
    /// mapi convert openapi.yaml --name "Petstore" --generate-intents
    /// ```
    Convert(ConvertArgs),

    /// Detect the input format, then convert it to a Skill folder.
    Auto(ConvertArgs),

    /// Generate shell completions.
    ///
    /// Generates completion scripts for various shells that can be
    /// sourced or saved to enable tab completion for this CLI.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}
