//! Skill bundle generator.
//!
//! Turns either parsed IR into a [`SkillOutput`]. Capabilities are
//! emitted in source order and keyword enrichment is awaited one
//! capability at a time, so output is byte-stable for a deterministic
//! keyword collaborator.
//!
//! # Examples
//!
//! ```
//! use mapi_codegen::{ConvertOptions, SkillGenerator};
//! use mapi_parser::parse_mapi_document;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let doc = parse_mapi_document(
//!     "# Foo API\n\n## Capability: Ping\n~~~meta\nid: health.ping\ntransport: HTTP GET /ping\n~~~\n",
//! );
//! let generator = SkillGenerator::new(ConvertOptions::default()).unwrap();
//! let output = generator.generate_from_mapi(&doc).await.unwrap();
//!
//! assert!(output.capabilities.contains_key("health.ping.md"));
//! assert!(output.common.is_empty());
//! # });
//! ```

use super::context::{CapabilityRow, CommonRow, IndexContext, TypesContext};
use super::{auth, dependencies, mapi, openapi};
use crate::template_engine::TemplateEngine;
use mapi_core::{
    AuthDescriptor, CapabilityIndexEntry, IntentGenerator, ParsedCapability, ParsedMapiDocument,
    ParsedOpenApiDocument, ParsedOpenApiOperation, Result, SkillOutput,
};
use mapi_parser::{extract_intent_keywords, extract_openapi_intent_keywords, normalize_operation_id};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

const AUTH_FILE: &str = "auth.md";
const TYPES_FILE: &str = "schemas/types.md";

/// Options shared by every conversion entry point.
///
/// # Examples
///
/// ```
/// use mapi_codegen::ConvertOptions;
///
/// let options = ConvertOptions::default().with_api_name("Billing");
/// assert_eq!(options.api_name.as_deref(), Some("Billing"));
/// assert!(options.intent_generator.is_none());
/// ```
#[derive(Clone, Default)]
pub struct ConvertOptions {
    /// Replaces the parsed title in the index heading
    pub api_name: Option<String>,
    /// Keyword collaborator; the local heuristic is used when absent
    pub intent_generator: Option<Arc<dyn IntentGenerator>>,
}

impl ConvertOptions {
    /// Sets the API name override.
    #[must_use]
    pub fn with_api_name(mut self, api_name: impl Into<String>) -> Self {
        self.api_name = Some(api_name.into());
        self
    }

    /// Sets the keyword collaborator.
    #[must_use]
    pub fn with_intent_generator(mut self, generator: Arc<dyn IntentGenerator>) -> Self {
        self.intent_generator = Some(generator);
        self
    }
}

impl fmt::Debug for ConvertOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertOptions")
            .field("api_name", &self.api_name)
            .field("intent_generator", &self.intent_generator.is_some())
            .finish()
    }
}

/// Generates Skill bundles from parsed documents.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`, allowing safe use across threads.
#[derive(Debug)]
pub struct SkillGenerator {
    engine: TemplateEngine,
    options: ConvertOptions,
}

impl SkillGenerator {
    /// Creates a generator with the given options.
    ///
    /// # Errors
    ///
    /// Returns error if template registration fails.
    pub fn new(options: ConvertOptions) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            options,
        })
    }

    /// Generates a bundle from a MAPI document.
    ///
    /// # Errors
    ///
    /// Returns error if a template fails to render.
    pub async fn generate_from_mapi(&self, document: &ParsedMapiDocument) -> Result<SkillOutput> {
        let mut common = Vec::new();
        if let Some(context) = auth::from_mapi(&document.meta) {
            common.push((AUTH_FILE, self.engine.render("skill/auth", &context)?));
        }
        if let Some(source) = document.global_types.as_deref().filter(|s| !s.trim().is_empty()) {
            common.push((TYPES_FILE, self.render_types(source)?));
        }

        let mut entries = Vec::with_capacity(document.capabilities.len());
        let mut documents = Vec::with_capacity(document.capabilities.len());
        for capability in &document.capabilities {
            let id = capability.meta.id.clone();
            let keywords = self.mapi_keywords(capability).await;
            let dependencies = dependencies::for_mapi(capability, document);
            let rendered = self
                .engine
                .render("skill/capability", &mapi::capability_context(capability))?;

            debug!(capability = %id, ?dependencies, "generated capability document");
            documents.push((format!("{id}.md"), rendered));
            entries.push(CapabilityIndexEntry::new(id, keywords, dependencies));
        }

        let meta = [
            document.meta.version.as_ref().map(|v| format!("version: {v}")),
            document.meta.base_url.as_ref().map(|u| format!("base_url: {u}")),
            document.meta.auth.as_ref().map(|a| format!("auth: {a}")),
        ]
        .into_iter()
        .flatten()
        .collect();

        self.assemble(
            &document.title,
            document.description.clone(),
            meta,
            common,
            &entries,
            documents,
        )
    }

    /// Generates a bundle from an OpenAPI document.
    ///
    /// # Errors
    ///
    /// Returns error if a template fails to render.
    pub async fn generate_from_openapi(&self, document: &ParsedOpenApiDocument) -> Result<SkillOutput> {
        let mut common = Vec::new();
        if let Some(descriptor) = &document.auth {
            let context = auth::from_openapi(descriptor);
            common.push((AUTH_FILE, self.engine.render("skill/auth", &context)?));
        }
        if !document.schemas.is_empty() {
            let source = openapi::types_source(&document.schemas);
            common.push((TYPES_FILE, self.render_types(&source)?));
        }

        let mut entries = Vec::with_capacity(document.operations.len());
        let mut documents = Vec::with_capacity(document.operations.len());
        for operation in &document.operations {
            let id = normalize_operation_id(&operation.operation_id);
            let keywords = self.openapi_keywords(operation, &id).await;
            let dependencies = dependencies::for_openapi(operation, document);
            let rendered = self
                .engine
                .render("skill/capability", &openapi::operation_context(operation, &id))?;

            debug!(capability = %id, ?dependencies, "generated capability document");
            documents.push((format!("{id}.md"), rendered));
            entries.push(CapabilityIndexEntry::new(id, keywords, dependencies));
        }

        let meta = vec![
            format!("version: {}", document.version),
            format!("base_url: {}", document.base_url),
            format!(
                "auth: {}",
                document.auth.as_ref().map_or("none", AuthDescriptor::kind)
            ),
        ];

        self.assemble(
            &document.title,
            document.description.clone(),
            meta,
            common,
            &entries,
            documents,
        )
    }

    fn render_types(&self, source: &str) -> Result<String> {
        self.engine.render(
            "skill/types",
            &TypesContext {
                source: source.to_string(),
            },
        )
    }

    fn assemble(
        &self,
        title: &str,
        description: Option<String>,
        meta: Vec<String>,
        common: Vec<(&str, String)>,
        entries: &[CapabilityIndexEntry],
        documents: Vec<(String, String)>,
    ) -> Result<SkillOutput> {
        let index = IndexContext {
            api_name: self.options.api_name.clone().unwrap_or_else(|| title.to_string()),
            description,
            meta,
            common: common.iter().map(|(file, _)| CommonRow::new(file)).collect(),
            capabilities: entries.iter().map(CapabilityRow::from).collect(),
        };

        let mut output = SkillOutput::new(self.engine.render("skill/index", &index)?);
        output.common.extend(
            common
                .into_iter()
                .map(|(file, content)| (file.to_string(), content)),
        );
        output.capabilities.extend(documents);
        Ok(output)
    }

    async fn mapi_keywords(&self, capability: &ParsedCapability) -> Vec<String> {
        let id = &capability.meta.id;
        if let (Some(generator), Some(intention)) =
            (&self.options.intent_generator, capability.intention.as_deref())
        {
            match generator.generate(id, intention).await {
                Ok(keywords) => return keywords,
                Err(e) => {
                    warn!(capability = %id, error = %e, "intent generation failed, using heuristic");
                }
            }
        }
        extract_intent_keywords(
            capability.intention.as_deref().unwrap_or(&capability.name),
            id,
        )
    }

    async fn openapi_keywords(&self, operation: &ParsedOpenApiOperation, id: &str) -> Vec<String> {
        if let Some(generator) = &self.options.intent_generator {
            let description = operation
                .description
                .as_deref()
                .or(operation.summary.as_deref())
                .unwrap_or(&operation.operation_id);
            match generator.generate(id, description).await {
                Ok(keywords) => return keywords,
                Err(e) => {
                    warn!(capability = %id, error = %e, "intent generation failed, using heuristic");
                }
            }
        }
        extract_openapi_intent_keywords(operation, id)
    }
}
