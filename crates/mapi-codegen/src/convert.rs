//! One-call conversion entry points.
//!
//! Each function parses the source text, runs the [`SkillGenerator`] and
//! returns the in-memory bundle. Nothing is written to disk.

use crate::skill::{ConvertOptions, SkillGenerator};
use mapi_core::{Error, Result, SkillOutput, SpecFormat};
use mapi_parser::{parse_mapi_document, parse_openapi_document};
use tracing::info;

/// Converts MAPI markdown to a Skill bundle.
///
/// Malformed input never fails: capabilities without `id` or `transport`
/// are dropped and missing sections are omitted.
///
/// # Errors
///
/// Returns error only if a built-in template fails to render.
///
/// # Examples
///
/// ```
/// use mapi_codegen::{ConvertOptions, convert_mapi_to_skill};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let output = convert_mapi_to_skill("# Empty API\n", &ConvertOptions::default())
///     .await
///     .unwrap();
/// assert!(output.skill_md.starts_with("# Empty API\n"));
/// assert!(output.capabilities.is_empty());
/// # });
/// ```
pub async fn convert_mapi_to_skill(content: &str, options: &ConvertOptions) -> Result<SkillOutput> {
    let document = parse_mapi_document(content);
    let output = SkillGenerator::new(options.clone())?
        .generate_from_mapi(&document)
        .await?;

    info!(
        title = %document.title,
        capabilities = output.capabilities.len(),
        common = output.common.len(),
        "converted MAPI document"
    );
    Ok(output)
}

/// Converts an OpenAPI or Swagger document (JSON or YAML) to a Skill bundle.
///
/// # Errors
///
/// Returns [`Error::InvalidDocument`] when neither `openapi` nor
/// `swagger` is present, or [`Error::ParseError`] when the text is
/// neither JSON nor YAML.
pub async fn convert_openapi_to_skill(
    content: &str,
    options: &ConvertOptions,
) -> Result<SkillOutput> {
    let document = parse_openapi_document(content)?;
    let output = SkillGenerator::new(options.clone())?
        .generate_from_openapi(&document)
        .await?;

    info!(
        title = %document.title,
        capabilities = output.capabilities.len(),
        common = output.common.len(),
        "converted OpenAPI document"
    );
    Ok(output)
}

/// Detects the source format and converts it.
///
/// # Errors
///
/// Returns [`Error::UnknownFormat`] when the format cannot be detected,
/// otherwise any error of the matching converter.
///
/// # Examples
///
/// ```
/// use mapi_codegen::{ConvertOptions, convert_to_skill};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let err = convert_to_skill("just some prose", &ConvertOptions::default())
///     .await
///     .unwrap_err();
/// assert!(err.is_unknown_format());
/// # });
/// ```
pub async fn convert_to_skill(content: &str, options: &ConvertOptions) -> Result<SkillOutput> {
    match SpecFormat::detect(content) {
        SpecFormat::Mapi => convert_mapi_to_skill(content, options).await,
        SpecFormat::OpenApi => convert_openapi_to_skill(content, options).await,
        SpecFormat::Unknown => Err(Error::UnknownFormat),
    }
}
