//! Template engine for Skill documents using Handlebars.
//!
//! Wraps Handlebars with the built-in Skill templates registered. HTML
//! escaping is disabled because every template produces markdown that
//! embeds TypeScript source.
//!
//! # Examples
//!
//! ```
//! use mapi_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let engine = TemplateEngine::new().unwrap();
//! let rendered = engine
//!     .render("skill/types", &json!({"source": "type Id = string;"}))
//!     .unwrap();
//! assert!(rendered.contains("```typescript\ntype Id = string;\n```"));
//! ```

use handlebars::Handlebars;
use mapi_core::{Error, Result};
use serde::Serialize;

const SKILL_TEMPLATES: [(&str, &str); 4] = [
    ("skill/index", include_str!("../templates/skill/index.md.hbs")),
    ("skill/auth", include_str!("../templates/skill/auth.md.hbs")),
    ("skill/types", include_str!("../templates/skill/types.md.hbs")),
    (
        "skill/capability",
        include_str!("../templates/skill/capability.md.hbs"),
    ),
];

/// Template engine for Skill generation.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`, allowing it to be used across
/// thread boundaries safely.
#[derive(Debug)]
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    /// Creates a new template engine with the Skill templates registered.
    ///
    /// # Errors
    ///
    /// Returns error if template registration fails (should not happen
    /// with valid built-in templates).
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        for (name, source) in SKILL_TEMPLATES {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| Error::SerializationError {
                    message: format!("Failed to register template '{name}': {e}"),
                    source: None,
                })?;
        }

        Ok(Self { handlebars })
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Template name is not registered
    /// - Context cannot be serialized
    /// - A field referenced by the template is missing
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::SerializationError {
                message: format!("Template rendering failed: {e}"),
                source: None,
            })
    }
}
