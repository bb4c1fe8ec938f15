//! JSON request handling for the `mapi-handler` executable.
//!
//! The handler reads one request from stdin:
//!
//! ```json
//! { "content": "...", "apiName": "optional", "generateIntents": false }
//! ```
//!
//! and answers with either `{ "success": true, "result": { "skillMd", "common", "capabilities" } }`
//! or `{ "success": false, "error": "..." }`.

use mapi_codegen::{ConvertOptions, convert_mapi_to_skill, convert_openapi_to_skill};
use mapi_core::cli::HandlerCapability;
use mapi_core::{Error, SkillOutput};
use mapi_intent::{IntentConfig, select_generator};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Usage text returned when no capability is given.
pub const USAGE: &str =
    "Usage: mapi-handler <capability>\nCapabilities: convert.from-openapi, convert.from-mapi";

/// Request read from stdin.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerInput {
    /// Source document text
    #[serde(default)]
    pub content: String,
    /// API name override
    #[serde(default)]
    pub api_name: Option<String>,
    /// Use the LLM keyword collaborator
    #[serde(default)]
    pub generate_intents: bool,
}

/// Response written to stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerOutput {
    /// Whether the conversion succeeded
    pub success: bool,
    /// Generated bundle on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<SkillOutput>,
    /// Error message on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HandlerOutput {
    /// Successful response.
    #[must_use]
    pub const fn success(result: SkillOutput) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    /// Failed response.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.into()),
        }
    }

    /// Serializes the response; successes are pretty-printed.
    #[must_use]
    pub fn to_json(&self) -> String {
        let rendered = if self.success {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        rendered.unwrap_or_else(|e| format!(r#"{{"success":false,"error":"{e}"}}"#))
    }
}

/// Handles one request.
///
/// `capability` is the first command-line argument and `input` the raw
/// stdin text. Every failure is reported in the returned value.
///
/// # Examples
///
/// ```
/// use mapi_cli::handler::handle;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let input = r##"{"content": "# Ping API\n"}"##;
/// let output = handle(Some("convert.from-mapi"), input).await;
/// assert!(output.success);
/// assert!(output.result.unwrap().skill_md.starts_with("# Ping API"));
/// # });
/// ```
pub async fn handle(capability: Option<&str>, input: &str) -> HandlerOutput {
    let Some(capability) = capability else {
        return HandlerOutput::failure(USAGE);
    };

    match run(capability, input).await {
        Ok(result) => HandlerOutput::success(result),
        Err(e) => {
            warn!(%capability, error = %e, "handler request failed");
            HandlerOutput::failure(message(&e))
        }
    }
}

async fn run(capability: &str, input: &str) -> Result<SkillOutput, Error> {
    let request: HandlerInput = serde_json::from_str(input).map_err(|e| Error::SerializationError {
        message: format!("invalid request JSON: {e}"),
        source: Some(e),
    })?;
    if request.content.is_empty() {
        return Err(Error::InvalidArgument(
            "Missing required field: content".to_string(),
        ));
    }

    let capability: HandlerCapability = capability.parse()?;
    debug!(%capability, bytes = request.content.len(), "handling request");

    let mut options = ConvertOptions::default();
    if let Some(name) = request.api_name {
        options = options.with_api_name(name);
    }
    if request.generate_intents {
        let config = IntentConfig::load_or_default(None)?;
        options = options.with_intent_generator(select_generator(&config)?);
    }

    match capability {
        HandlerCapability::FromOpenApi => convert_openapi_to_skill(&request.content, &options).await,
        HandlerCapability::FromMapi => convert_mapi_to_skill(&request.content, &options).await,
    }
}

fn message(error: &Error) -> String {
    match error {
        Error::InvalidArgument(message) => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_capability() {
        let output = handle(None, "{}").await;
        assert!(!output.success);
        assert_eq!(output.error.as_deref(), Some(USAGE));
    }

    #[tokio::test]
    async fn test_unknown_capability() {
        let output = handle(Some("convert.to-raml"), r#"{"content": "x"}"#).await;
        assert_eq!(output.error.as_deref(), Some("Unknown capability: convert.to-raml"));
    }

    #[tokio::test]
    async fn test_missing_content() {
        let output = handle(Some("convert.from-mapi"), r#"{"apiName": "X"}"#).await;
        assert_eq!(output.error.as_deref(), Some("Missing required field: content"));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let output = handle(Some("convert.from-mapi"), "not json").await;
        assert!(!output.success);
        assert!(output.error.unwrap().contains("invalid request JSON"));
    }

    #[tokio::test]
    async fn test_api_name_applied() {
        let input = r##"{"content": "# Ping API\n", "apiName": "Renamed"}"##;
        let output = handle(Some("convert.from-mapi"), input).await;
        assert!(output.result.unwrap().skill_md.starts_with("# Renamed\n"));
    }

    #[tokio::test]
    async fn test_invalid_openapi_reported() {
        let input = r#"{"content": "{\"info\": {}}"}"#;
        let output = handle(Some("convert.from-openapi"), input).await;
        assert!(!output.success);
        assert!(output.error.unwrap().starts_with("Not a valid OpenAPI document"));
    }

    #[test]
    fn test_output_shapes() {
        let failure = HandlerOutput::failure("boom").to_json();
        assert_eq!(failure, r#"{"success":false,"error":"boom"}"#);

        let success = HandlerOutput::success(SkillOutput::new("# A\n".to_string())).to_json();
        let value: serde_json::Value = serde_json::from_str(&success).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["result"]["skillMd"], "# A\n");
        assert!(value["result"]["common"].as_object().unwrap().is_empty());
        assert!(value.get("error").is_none());
    }
}
