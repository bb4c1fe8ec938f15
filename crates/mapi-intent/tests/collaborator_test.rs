//! Collaborators plugged into the Skill generator.

use mapi_codegen::{ConvertOptions, convert_openapi_to_skill};
use mapi_intent::{IntentConfig, LlmIntentGenerator, SimpleIntentGenerator, select_generator};
use std::sync::Arc;

const OPENAPI: &str = r#"{
  "openapi": "3.0.0",
  "info": {"title": "Files", "version": "1"},
  "paths": {
    "/files": {
      "post": {"operationId": "uploadFile", "summary": "Upload a file"}
    }
  }
}"#;

#[tokio::test]
async fn test_simple_generator_in_conversion() {
    let options = ConvertOptions::default().with_intent_generator(Arc::new(SimpleIntentGenerator));
    let output = convert_openapi_to_skill(OPENAPI, &options).await.unwrap();
    assert!(output.skill_md.contains("| upload.file | upload, file |"));
}

#[tokio::test]
async fn test_failing_llm_falls_back_to_heuristic() {
    // reqwest rejects the scheme before any connection is attempted
    let config = IntentConfig {
        api_url: "mapi-test://offline/v1/messages".to_string(),
        timeout_secs: 2,
        ..IntentConfig::default()
    };
    let generator = LlmIntentGenerator::new(config, "test-key".to_string()).unwrap();
    let options = ConvertOptions::default().with_intent_generator(Arc::new(generator));

    let output = convert_openapi_to_skill(OPENAPI, &options).await.unwrap();
    assert!(output.skill_md.contains("| upload.file | upload, file, post |"));
}

#[test]
fn test_missing_key_selects_heuristic() {
    let config = IntentConfig {
        api_key_env: "MAPI_INTENT_TEST_MISSING_KEY".to_string(),
        ..IntentConfig::default()
    };
    assert!(select_generator(&config).is_ok());
}
