//! `~~~meta` block reader.
//!
//! A metadata block is a list of `key: value` lines. Blank lines and lines
//! starting with `#` are skipped, as are lines without a colon. The value
//! is everything after the first colon, coerced by [`MetaValue::parse`].
//! A repeated key overrides the earlier one.

use mapi_core::{AuthMode, AuthRequirement, MapiCapabilityMeta, MapiDocumentMeta, MetaValue};

/// Reads the `key: value` pairs of a metadata block body.
///
/// # Examples
///
/// ```
/// use mapi_core::MetaValue;
/// use mapi_parser::read_meta_fields;
///
/// let fields = read_meta_fields("# comment\nid: users.get\n\nidempotent: true\nnot a field");
/// assert_eq!(fields, vec![
///     ("id".to_string(), MetaValue::Text("users.get".to_string())),
///     ("idempotent".to_string(), MetaValue::Bool(true)),
/// ]);
/// ```
#[must_use]
pub fn read_meta_fields(body: &str) -> Vec<(String, MetaValue)> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), MetaValue::parse(value)))
        .collect()
}

/// Builds document-level metadata from a block body.
///
/// Unrecognized keys are kept in [`MapiDocumentMeta::extensions`].
#[must_use]
pub fn document_meta(body: &str) -> MapiDocumentMeta {
    let mut meta = MapiDocumentMeta::default();

    for (key, value) in read_meta_fields(body) {
        match key.as_str() {
            "version" => meta.version = non_empty(&value),
            "base_url" => meta.base_url = non_empty(&value),
            "auth" => meta.auth = is_present(&value).then(|| AuthMode::from_value(&value)),
            "auth_header" => meta.auth_header = non_empty(&value),
            "auth_flow" => meta.auth_flow = non_empty(&value),
            "auth_scopes" => meta.auth_scopes = Some(value.to_list()),
            "auth_docs_url" => meta.auth_docs_url = non_empty(&value),
            "content_type" => meta.content_type = non_empty(&value),
            "errors" => meta.errors = non_empty(&value),
            _ => {
                meta.extensions.insert(key, value);
            }
        }
    }

    meta
}

/// Builds capability metadata from a block body.
///
/// Returns `None` when the block lacks a non-empty `id` or `transport`.
#[must_use]
pub fn capability_meta(body: &str) -> Option<MapiCapabilityMeta> {
    let mut id = None;
    let mut transport = None;
    let mut meta = MapiCapabilityMeta::default();

    for (key, value) in read_meta_fields(body) {
        match key.as_str() {
            "id" => id = non_empty(&value),
            "transport" => transport = non_empty(&value),
            "auth" => {
                meta.auth = is_present(&value).then(|| AuthRequirement::from_value(&value));
            }
            "auth_flow" => meta.auth_flow = non_empty(&value),
            "auth_scopes" => meta.auth_scopes = Some(value.to_list()),
            "content_type" => meta.content_type = non_empty(&value),
            "idempotent" | "deprecated" => match value.as_bool() {
                Some(flag) if key == "idempotent" => meta.idempotent = Some(flag),
                Some(flag) => meta.deprecated = Some(flag),
                None => {
                    meta.extensions.insert(key, value);
                }
            },
            _ => {
                meta.extensions.insert(key, value);
            }
        }
    }

    meta.id = id?;
    meta.transport = transport?;
    Some(meta)
}

fn is_present(value: &MetaValue) -> bool {
    !matches!(value, MetaValue::Text(text) if text.is_empty())
}

/// Renders a value as text, treating empty text and `false` as absent.
fn non_empty(value: &MetaValue) -> Option<String> {
    match value {
        MetaValue::Bool(false) => None,
        other => Some(other.to_string()).filter(|text| !text.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_keeps_colons_after_first() {
        let fields = read_meta_fields("base_url: https://api.example.com:8443/v1");
        assert_eq!(
            fields[0].1,
            MetaValue::Text("https://api.example.com:8443/v1".to_string())
        );
    }

    #[test]
    fn test_later_key_wins() {
        let meta = document_meta("version: 1\nversion: 2");
        assert_eq!(meta.version.as_deref(), Some("2"));
    }

    #[test]
    fn test_document_meta_known_and_extension_keys() {
        let meta = document_meta(
            "version: 2.1.0\nbase_url: https://api.test\nauth: oauth2\nauth_flow: authorization_code\nauth_scopes: [read, \"write\"]\nrate_limit: 100",
        );

        assert_eq!(meta.version.as_deref(), Some("2.1.0"));
        assert_eq!(meta.base_url.as_deref(), Some("https://api.test"));
        assert_eq!(meta.auth, Some(AuthMode::OAuth2));
        assert_eq!(meta.auth_flow.as_deref(), Some("authorization_code"));
        assert_eq!(
            meta.auth_scopes,
            Some(vec!["read".to_string(), "write".to_string()])
        );
        assert_eq!(
            meta.extensions.get("rate_limit"),
            Some(&MetaValue::Integer(100))
        );
    }

    #[test]
    fn test_single_scope_becomes_list() {
        let meta = document_meta("auth: oauth2\nauth_scopes: admin");
        assert_eq!(meta.auth_scopes, Some(vec!["admin".to_string()]));
    }

    #[test]
    fn test_capability_meta_requires_id_and_transport() {
        assert!(capability_meta("id: users.get").is_none());
        assert!(capability_meta("transport: HTTP GET /users").is_none());
        assert!(capability_meta("id:\ntransport: HTTP GET /users").is_none());

        let meta = capability_meta("id: users.get\ntransport: HTTP GET /users/{id}").unwrap();
        assert_eq!(meta.id, "users.get");
        assert_eq!(meta.transport, "HTTP GET /users/{id}");
        assert!(meta.auth.is_none());
    }

    #[test]
    fn test_capability_flags() {
        let meta = capability_meta(
            "id: a.b\ntransport: WS /a\nauth: none\nidempotent: false\ndeprecated: true\nowner: team-x",
        )
        .unwrap();

        assert_eq!(meta.auth, Some(AuthRequirement::None));
        assert_eq!(meta.idempotent, Some(false));
        assert_eq!(meta.deprecated, Some(true));
        assert_eq!(
            meta.extensions.get("owner"),
            Some(&MetaValue::Text("team-x".to_string()))
        );
    }

    #[test]
    fn test_capability_auth_boolean_marker() {
        let meta = capability_meta("id: a.b\ntransport: x\nauth: true").unwrap();
        assert_eq!(meta.auth, Some(AuthRequirement::Other("true".to_string())));
        assert_eq!(meta.auth.unwrap().as_str(), "true");

        let meta = capability_meta("id: a.b\ntransport: x\nauth: required").unwrap();
        assert_eq!(meta.auth, Some(AuthRequirement::Required));
    }

    #[test]
    fn test_document_auth_false_is_none() {
        assert_eq!(document_meta("auth: false").auth, Some(AuthMode::None));
        assert_eq!(document_meta("auth:").auth, None);
    }

    #[test]
    fn test_non_boolean_flag_goes_to_extensions() {
        let meta = capability_meta("id: a.b\ntransport: x\nidempotent: maybe").unwrap();
        assert!(meta.idempotent.is_none());
        assert!(meta.extensions.contains_key("idempotent"));
    }
}
