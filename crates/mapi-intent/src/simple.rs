//! Heuristic intent keyword generation.

use async_trait::async_trait;
use mapi_core::{IntentGenerator, Result};
use mapi_parser::extract_intent_keywords;

/// Keyword collaborator that runs the local heuristic.
///
/// Used when LLM enrichment is requested but no API key is available.
/// Never fails.
///
/// # Examples
///
/// ```
/// use mapi_core::IntentGenerator;
/// use mapi_intent::SimpleIntentGenerator;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let keywords = SimpleIntentGenerator.generate("files.upload", "Upload a file").await.unwrap();
/// assert_eq!(keywords, vec!["files", "upload"]);
/// # });
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleIntentGenerator;

#[async_trait]
impl IntentGenerator for SimpleIntentGenerator {
    async fn generate(&self, capability_id: &str, description: &str) -> Result<Vec<String>> {
        Ok(extract_intent_keywords(description, capability_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_includes_id_segments_and_verbs() {
        let keywords = SimpleIntentGenerator
            .generate("reports.export", "Downloads the monthly report.")
            .await
            .unwrap();
        assert_eq!(keywords, vec!["reports", "export", "download"]);
    }
}
