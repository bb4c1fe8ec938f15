//! `auto`: detect the input format, then convert.

use anyhow::Result;
use mapi_codegen::{convert_mapi_to_skill, convert_openapi_to_skill};
use mapi_core::{Error, SpecFormat};
use mapi_core::cli::{ExitCode, OutputFormat};
use std::path::Path;
use tracing::info;

use super::common::{self, ConvertArgs};

/// Detects the format from the content and the file name.
#[must_use]
pub fn detect(content: &str, input: &Path) -> SpecFormat {
    let file_name = input
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    SpecFormat::detect_with_name(content, file_name)
}

/// Runs the auto command.
///
/// An undetectable format is an error.
pub async fn run(
    args: ConvertArgs,
    config: Option<&Path>,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    common::announce("input", &args);
    let content = common::read_input(&args.input)?;

    let format = detect(&content, &args.input);
    info!(%format, "detected format");

    let options = common::build_options(&args, config)?;
    let output = match format {
        SpecFormat::Mapi => convert_mapi_to_skill(&content, &options).await?,
        SpecFormat::OpenApi => convert_openapi_to_skill(&content, &options).await?,
        SpecFormat::Unknown => return Err(Error::UnknownFormat.into()),
    };

    let report = common::write_bundle(&output, &args.input, format, &args.output)?;
    common::print_report(&report, output_format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_hint() {
        assert_eq!(detect("# Notes\n", Path::new("docs/billing.mapi.md")), SpecFormat::Mapi);
        assert_eq!(detect("# Notes\n", Path::new("docs/notes.md")), SpecFormat::Unknown);
    }

    #[test]
    fn test_content_detection() {
        assert_eq!(
            detect("{\"openapi\": \"3.1.0\"}", Path::new("spec.json")),
            SpecFormat::OpenApi
        );
        assert_eq!(detect("swagger: '2.0'\n", Path::new("spec.yaml")), SpecFormat::OpenApi);
    }
}
