//! LLM-backed intent keyword generation.
//!
//! Sends the capability id and description to the Anthropic Messages API
//! and reads back a comma-separated keyword list. Failures are returned
//! as [`Error::IntentGeneration`]; the Skill generator falls back to the
//! local heuristic for that capability.
//!
//! # Examples
//!
//! ```no_run
//! use mapi_core::IntentGenerator;
//! use mapi_intent::{IntentConfig, LlmIntentGenerator};
//!
//! # async fn example() -> Result<(), mapi_core::Error> {
//! let generator = LlmIntentGenerator::new(
//!     IntentConfig::default(),
//!     std::env::var("ANTHROPIC_API_KEY").unwrap(),
//! )?;
//!
//! let keywords = generator.generate("users.create", "Creates a user account.").await?;
//! println!("{keywords:?}");
//! # Ok(())
//! # }
//! ```

use crate::config::IntentConfig;
use async_trait::async_trait;
use mapi_core::{Error, IntentGenerator, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const ANTHROPIC_VERSION: &str = "2023-06-01";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Messages API request.
#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message>,
}

/// Message in Messages API format.
#[derive(Debug, Serialize)]
struct Message {
    /// Role: "user" or "assistant"
    role: &'static str,
    content: String,
}

/// Messages API response wrapper.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

/// Content block in a Messages API response.
#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

/// Keyword collaborator backed by the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct LlmIntentGenerator {
    config: IntentConfig,
    api_key: String,
    client: reqwest::Client,
}

impl LlmIntentGenerator {
    /// Creates a generator with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the configuration is invalid or
    /// the HTTP client cannot be built.
    pub fn new(config: IntentConfig, api_key: String) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::ConfigError {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Returns the configuration in use.
    #[must_use]
    pub const fn config(&self) -> &IntentConfig {
        &self.config
    }

    async fn call_api(&self, capability_id: &str, prompt: String) -> Result<String> {
        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let failure = |message: String, source: Option<BoxError>| {
            Error::IntentGeneration {
                capability: capability_id.to_string(),
                message,
                source,
            }
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| failure(format!("request failed: {e}"), Some(Box::new(e))))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(failure(format!("API returned {status}: {error_text}"), None));
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| failure(format!("failed to read API response: {e}"), Some(Box::new(e))))?;

        body.content
            .into_iter()
            .find(|block| block.content_type == "text")
            .map(|block| block.text)
            .ok_or_else(|| failure("no text content in API response".to_string(), None))
    }
}

#[async_trait]
impl IntentGenerator for LlmIntentGenerator {
    async fn generate(&self, capability_id: &str, description: &str) -> Result<Vec<String>> {
        let text = self
            .call_api(capability_id, build_prompt(capability_id, description))
            .await?;
        let keywords = parse_keywords(&text);
        if keywords.is_empty() {
            return Err(Error::IntentGeneration {
                capability: capability_id.to_string(),
                message: "model returned no keywords".to_string(),
                source: None,
            });
        }

        debug!(capability = capability_id, count = keywords.len(), "generated intent keywords");
        Ok(keywords)
    }
}

/// Builds the keyword prompt for one capability.
#[must_use]
pub fn build_prompt(capability_id: &str, description: &str) -> String {
    format!(
        "Given this API capability:
- ID: {capability_id}
- Description: {description}

Generate 5-8 intent keywords or short phrases a user might say when they want to use this capability. Include synonyms and task descriptions. Focus on action words and common variations.

Output ONLY a comma-separated list, nothing else. Example format:
create user, add user, register account, new user, sign up"
    )
}

/// Splits a model reply into keywords.
///
/// # Examples
///
/// ```
/// use mapi_intent::parse_keywords;
///
/// assert_eq!(parse_keywords(" pay invoice,, settle bill ,\n"), vec!["pay invoice", "settle bill"]);
/// ```
#[must_use]
pub fn parse_keywords(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .collect()
}
