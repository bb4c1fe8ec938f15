//! Capability documents for MAPI capabilities.

use super::context::{CapabilityContext, Section};
use mapi_core::ParsedCapability;

/// Builds the document context for one MAPI capability.
#[must_use]
pub fn capability_context(capability: &ParsedCapability) -> CapabilityContext {
    let meta = &capability.meta;
    let mut lines = vec![
        format!("id: {}", meta.id),
        format!("transport: {}", meta.transport),
    ];
    if let Some(auth) = &meta.auth {
        lines.push(format!("auth: {auth}"));
    }
    if let Some(idempotent) = meta.idempotent {
        lines.push(format!("idempotent: {idempotent}"));
    }
    if meta.deprecated == Some(true) {
        lines.push("deprecated: true".to_string());
    }

    let sections = [
        Section::prose("Intention", capability.intention.as_deref()),
        Section::prose("Auth Intention", capability.auth_intention.as_deref()),
        Section::typescript("Input", capability.input.as_deref()),
        Section::typescript("Output", capability.output.as_deref()),
        Section::prose("Logic Constraints", capability.logic_constraints.as_deref()),
        Section::prose("Errors", capability.errors.as_deref()),
        Section::prose("Example", capability.example.as_deref()),
    ]
    .into_iter()
    .flatten()
    .collect();

    CapabilityContext {
        heading: format!("{}: {}", capability.kind, capability.name),
        meta: lines,
        sections,
    }
}
