//! Pipeline shared by the conversion commands.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use mapi_codegen::ConvertOptions;
use mapi_core::cli::{ExitCode, OutputFormat};
use mapi_core::{SkillOutput, SpecFormat};
use mapi_files::FilesBuilder;
use mapi_intent::{IntentConfig, select_generator};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::formatters::{PrettyPrint, format_output};

/// Arguments shared by `split`, `convert` and `auto`.
#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Input file
    pub input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "./skill-output")]
    pub output: PathBuf,

    /// API name override for the index heading
    #[arg(short, long)]
    pub name: Option<String>,

    /// Use an LLM to generate intent keywords
    #[arg(short, long)]
    pub generate_intents: bool,
}

/// Result of a conversion command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReport {
    /// Input file as given
    pub input: PathBuf,
    /// Source format
    pub format: SpecFormat,
    /// Absolute output directory
    pub output_dir: PathBuf,
    /// Written files relative to the output directory
    pub files: Vec<String>,
    /// Number of shared documents
    pub common_files: usize,
    /// Number of capability documents
    pub capability_files: usize,
}

impl PrettyPrint for ConversionReport {
    fn pretty(&self) -> String {
        let mut out = String::new();
        for file in &self.files {
            out.push_str(&format!("  {} {file}\n", "Created:".green()));
        }
        out.push_str(&format!("\n{}\n", "Summary:".bold()));
        out.push_str("  - 1 Skill.md index file\n");
        out.push_str(&format!("  - {} common files\n", self.common_files));
        out.push_str(&format!("  - {} capability files\n", self.capability_files));
        out.push_str(&format!(
            "\nSkill structure written to: {}",
            self.output_dir.display().to_string().bold()
        ));
        out
    }
}

/// Reads the input file.
///
/// # Errors
///
/// Returns an error if the file does not exist or cannot be read.
pub fn read_input(path: &Path) -> Result<String> {
    if !path.is_file() {
        bail!("File not found: {}", path.display());
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Builds conversion options from command arguments.
///
/// With `--generate-intents`, the intent configuration is loaded from
/// `config` (or the default location) and the LLM collaborator is used
/// when its API key is set.
pub fn build_options(args: &ConvertArgs, config: Option<&Path>) -> Result<ConvertOptions> {
    let mut options = ConvertOptions::default();
    if let Some(name) = &args.name {
        options = options.with_api_name(name);
    }

    if args.generate_intents {
        let intent_config =
            IntentConfig::load_or_default(config).context("failed to load intent configuration")?;
        let generator =
            select_generator(&intent_config).context("failed to set up intent keyword generation")?;
        options = options.with_intent_generator(generator);
    }

    Ok(options)
}

/// Writes a bundle under `dir` and summarizes what was written.
pub fn write_bundle(
    output: &SkillOutput,
    input: &Path,
    format: SpecFormat,
    dir: &Path,
) -> Result<ConversionReport> {
    FilesBuilder::from_skill_output(output)
        .build_and_export(dir)
        .with_context(|| format!("failed to write Skill bundle to {}", dir.display()))?;

    let output_dir = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());
    let files: Vec<String> = output.files().map(|(path, _)| path).collect();
    debug!(files = files.len(), dir = %output_dir.display(), "bundle written");

    Ok(ConversionReport {
        input: input.to_path_buf(),
        format,
        output_dir,
        files,
        common_files: output.common.len(),
        capability_files: output.capabilities.len(),
    })
}

/// Prints a report in the requested format.
pub fn print_report(report: &ConversionReport, output_format: OutputFormat) -> Result<ExitCode> {
    println!("{}", format_output(report, output_format)?);
    Ok(ExitCode::SUCCESS)
}

/// Logs the start of a conversion.
pub fn announce(kind: &str, args: &ConvertArgs) {
    info!(input = %args.input.display(), "reading {kind} file");
    if args.generate_intents {
        info!("generating intent keywords with LLM");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(input: &str) -> ConvertArgs {
        ConvertArgs {
            input: PathBuf::from(input),
            output: PathBuf::from("./skill-output"),
            name: None,
            generate_intents: false,
        }
    }

    #[test]
    fn test_read_input_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = read_input(&temp.path().join("absent.md")).unwrap_err();
        assert!(err.to_string().starts_with("File not found: "));
    }

    #[test]
    fn test_read_input_directory_is_not_a_file() {
        let temp = TempDir::new().unwrap();
        assert!(read_input(temp.path()).is_err());
    }

    #[test]
    fn test_build_options_without_intents() {
        let mut args = args("a.md");
        args.name = Some("Billing".to_string());

        let options = build_options(&args, None).unwrap();
        assert_eq!(options.api_name.as_deref(), Some("Billing"));
        assert!(options.intent_generator.is_none());
    }

    #[test]
    fn test_build_options_with_intents_uses_config() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("intent.toml");
        fs::write(&config, "api_key_env = \"MAPI_CLI_TEST_ABSENT_KEY\"\n").unwrap();

        let mut args = args("a.md");
        args.generate_intents = true;
        let options = build_options(&args, Some(&config)).unwrap();
        assert!(options.intent_generator.is_some());
    }

    #[test]
    fn test_build_options_invalid_config() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("intent.toml");
        fs::write(&config, "max_tokens = 0\n").unwrap();

        let mut args = args("a.md");
        args.generate_intents = true;
        assert!(build_options(&args, Some(&config)).is_err());
    }

    #[test]
    fn test_write_bundle_report() {
        let temp = TempDir::new().unwrap();
        let mut output = SkillOutput::new("# A\n".to_string());
        output.common.insert("auth.md".to_string(), String::new());
        output.capabilities.insert("a.get.md".to_string(), String::new());

        let report = write_bundle(&output, Path::new("a.md"), SpecFormat::Mapi, temp.path()).unwrap();
        assert_eq!(report.files, vec!["Skill.md", "common/auth.md", "capabilities/a.get.md"]);
        assert_eq!(report.common_files, 1);
        assert_eq!(report.capability_files, 1);
        assert!(temp.path().join("capabilities/a.get.md").exists());
    }

    #[test]
    fn test_report_pretty_summary() {
        let report = ConversionReport {
            input: PathBuf::from("a.md"),
            format: SpecFormat::OpenApi,
            output_dir: PathBuf::from("/out"),
            files: vec!["Skill.md".to_string()],
            common_files: 0,
            capability_files: 0,
        };
        colored::control::set_override(false);
        let text = report.pretty();
        assert!(text.contains("  Created: Skill.md\n"));
        assert!(text.contains("  - 0 capability files\n"));
        assert!(text.ends_with("Skill structure written to: /out"));
    }

    #[test]
    fn test_report_json_field_names() {
        let report = ConversionReport {
            input: PathBuf::from("a.json"),
            format: SpecFormat::OpenApi,
            output_dir: PathBuf::from("/out"),
            files: Vec::new(),
            common_files: 2,
            capability_files: 3,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["format"], "openapi");
        assert_eq!(value["outputDir"], "/out");
        assert_eq!(value["capabilityFiles"], 3);
    }
}
