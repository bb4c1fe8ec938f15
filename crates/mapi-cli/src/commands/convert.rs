//! `convert`: OpenAPI specification to Skill folder.

use anyhow::{Context, Result};
use mapi_codegen::convert_openapi_to_skill;
use mapi_core::SpecFormat;
use mapi_core::cli::{ExitCode, OutputFormat};
use std::path::Path;

use super::common::{self, ConvertArgs};

/// Runs the convert command.
pub async fn run(
    args: ConvertArgs,
    config: Option<&Path>,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    common::announce("OpenAPI", &args);
    let content = common::read_input(&args.input)?;
    let options = common::build_options(&args, config)?;

    let output = convert_openapi_to_skill(&content, &options)
        .await
        .with_context(|| format!("failed to convert {}", args.input.display()))?;
    let report = common::write_bundle(&output, &args.input, SpecFormat::OpenApi, &args.output)?;
    common::print_report(&report, output_format)
}
