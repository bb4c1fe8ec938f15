//! Intent keyword collaborators for MAPI Skill conversion.
//!
//! Provides two [`IntentGenerator`] implementations:
//! - [`LlmIntentGenerator`]: asks a language model for keywords
//! - [`SimpleIntentGenerator`]: runs the local heuristic
//!
//! [`select_generator`] picks the LLM collaborator when an API key is
//! available and falls back to the heuristic otherwise.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod llm;
mod simple;

pub use config::{IntentConfig, default_path};
pub use llm::{LlmIntentGenerator, build_prompt, parse_keywords};
pub use simple::SimpleIntentGenerator;

use mapi_core::{IntentGenerator, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Chooses the keyword collaborator for a conversion run.
///
/// # Errors
///
/// Returns error if an API key is present but the LLM client cannot be
/// configured.
///
/// # Examples
///
/// ```
/// use mapi_intent::{IntentConfig, select_generator};
///
/// let config = IntentConfig {
///     api_key_env: "MAPI_DOCTEST_NO_SUCH_KEY".to_string(),
///     ..IntentConfig::default()
/// };
/// // Falls back to the heuristic collaborator.
/// let generator = select_generator(&config).unwrap();
/// # let _ = generator;
/// ```
pub fn select_generator(config: &IntentConfig) -> Result<Arc<dyn IntentGenerator>> {
    match config.api_key() {
        Some(api_key) => {
            info!(model = %config.model, "using LLM for intent keyword generation");
            Ok(Arc::new(LlmIntentGenerator::new(config.clone(), api_key)?))
        }
        None => {
            warn!(
                variable = %config.api_key_env,
                "API key not set, using simple intent extraction"
            );
            Ok(Arc::new(SimpleIntentGenerator))
        }
    }
}
