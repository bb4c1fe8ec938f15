//! `split`: single-file MAPI document to Skill folder.

use anyhow::Result;
use mapi_codegen::convert_mapi_to_skill;
use mapi_core::SpecFormat;
use mapi_core::cli::{ExitCode, OutputFormat};
use std::path::Path;

use super::common::{self, ConvertArgs};

/// Runs the split command.
pub async fn run(
    args: ConvertArgs,
    config: Option<&Path>,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    common::announce("MAPI", &args);
    let content = common::read_input(&args.input)?;
    let options = common::build_options(&args, config)?;

    let output = convert_mapi_to_skill(&content, &options).await?;
    let report = common::write_bundle(&output, &args.input, SpecFormat::Mapi, &args.output)?;
    common::print_report(&report, output_format)
}
