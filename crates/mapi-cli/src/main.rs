//! MAPI CLI.
//!
//! Converts single-file MAPI documents and OpenAPI specifications into
//! Skill folders.
//!
//! # Examples
//!
//! ```bash
//! # Split a MAPI document
//! mapi split billing.mapi.md -o ./billing-skill
//!
//! # Convert OpenAPI with LLM intent keywords
//! ANTHROPIC_API_KEY=... mapi convert openapi.yaml --generate-intents
//!
//! # Detect the format
//! mapi auto spec.json --format json
//! ```

use anyhow::Result;
use clap::Parser;
use mapi_cli::Cli;
use mapi_cli::runner::{execute_command, init_logging};
use mapi_core::cli::OutputFormat;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let output_format = cli.format.parse::<OutputFormat>()?;

    let exit_code = execute_command(cli.command, cli.config.as_deref(), output_format).await?;

    std::process::exit(exit_code.as_i32());
}
