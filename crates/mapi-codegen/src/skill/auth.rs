//! `common/auth.md` contexts.

use super::context::AuthContext;
use mapi_core::{ApiKeyLocation, AuthDescriptor, AuthMode, MapiDocumentMeta};

const DEFAULT_API_KEY_HEADER: &str = "X-API-Key";

fn bearer() -> AuthContext {
    AuthContext {
        summary: "This API uses Bearer token authentication.".to_string(),
        usage: Some(
            "Include the token in the Authorization header:\n```\nAuthorization: Bearer {token}\n```"
                .to_string(),
        ),
        ..AuthContext::default()
    }
}

fn api_key(usage: String) -> AuthContext {
    AuthContext {
        summary: "This API uses API key authentication.".to_string(),
        usage: Some(usage),
        ..AuthContext::default()
    }
}

fn oauth2() -> AuthContext {
    AuthContext {
        summary: "This API uses OAuth 2.0 authentication.".to_string(),
        ..AuthContext::default()
    }
}

/// Builds the auth document context for a MAPI document.
///
/// Returns `None` when the document declares no auth or `auth: none`.
#[must_use]
pub fn from_mapi(meta: &MapiDocumentMeta) -> Option<AuthContext> {
    let mode = meta.auth.as_ref().filter(|mode| mode.is_enabled())?;

    let mut context = match mode {
        AuthMode::Bearer => bearer(),
        AuthMode::ApiKey => {
            let header = meta.auth_header.as_deref().unwrap_or(DEFAULT_API_KEY_HEADER);
            api_key(format!("Include the API key in the `{header}` header."))
        }
        AuthMode::OAuth2 => AuthContext {
            flow: meta.auth_flow.clone(),
            scopes: meta.auth_scopes.clone().unwrap_or_default(),
            ..oauth2()
        },
        AuthMode::Other(other) => AuthContext {
            summary: format!("Authentication type: {other}"),
            ..AuthContext::default()
        },
        AuthMode::None => return None,
    };
    context.docs_url.clone_from(&meta.auth_docs_url);
    Some(context)
}

/// Builds the auth document context for an OpenAPI auth descriptor.
#[must_use]
pub fn from_openapi(descriptor: &AuthDescriptor) -> AuthContext {
    match descriptor {
        AuthDescriptor::Bearer { bearer_format } => {
            let mut context = bearer();
            if let Some(format) = bearer_format {
                context.summary = format!("{} Tokens use the `{format}` format.", context.summary);
            }
            context
        }
        AuthDescriptor::ApiKey { name, location } => {
            let name = name.as_deref().unwrap_or(DEFAULT_API_KEY_HEADER);
            let usage = match location {
                Some(ApiKeyLocation::Query) => {
                    format!("Include the API key in the `{name}` query parameter.")
                }
                Some(ApiKeyLocation::Cookie) => {
                    format!("Include the API key in the `{name}` cookie.")
                }
                Some(ApiKeyLocation::Header) | None => {
                    format!("Include the API key in the `{name}` header.")
                }
            };
            api_key(usage)
        }
        AuthDescriptor::OAuth2 { flows } => AuthContext {
            flows: flows.keys().cloned().collect(),
            ..oauth2()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mapi_none_and_absent_produce_nothing() {
        assert!(from_mapi(&MapiDocumentMeta::default()).is_none());

        let meta = MapiDocumentMeta {
            auth: Some(AuthMode::None),
            ..MapiDocumentMeta::default()
        };
        assert!(from_mapi(&meta).is_none());
    }

    #[test]
    fn test_mapi_api_key_header() {
        let meta = MapiDocumentMeta {
            auth: Some(AuthMode::ApiKey),
            auth_header: Some("X-Shop-Key".to_string()),
            auth_docs_url: Some("https://docs.test/auth".to_string()),
            ..MapiDocumentMeta::default()
        };
        let context = from_mapi(&meta).unwrap();

        assert_eq!(
            context.usage.as_deref(),
            Some("Include the API key in the `X-Shop-Key` header.")
        );
        assert_eq!(context.docs_url.as_deref(), Some("https://docs.test/auth"));
    }

    #[test]
    fn test_mapi_oauth2_flow_and_scopes() {
        let meta = MapiDocumentMeta {
            auth: Some(AuthMode::OAuth2),
            auth_flow: Some("authorization_code".to_string()),
            auth_scopes: Some(vec!["read".to_string(), "write".to_string()]),
            ..MapiDocumentMeta::default()
        };
        let context = from_mapi(&meta).unwrap();

        assert_eq!(context.flow.as_deref(), Some("authorization_code"));
        assert_eq!(context.scopes, vec!["read", "write"]);
        assert!(context.usage.is_none());
    }

    #[test]
    fn test_mapi_other_mode() {
        let meta = MapiDocumentMeta {
            auth: Some(AuthMode::Other("basic".to_string())),
            ..MapiDocumentMeta::default()
        };
        assert_eq!(from_mapi(&meta).unwrap().summary, "Authentication type: basic");
    }

    #[test]
    fn test_openapi_api_key_in_query() {
        let context = from_openapi(&AuthDescriptor::ApiKey {
            name: Some("key".to_string()),
            location: Some(ApiKeyLocation::Query),
        });
        assert_eq!(
            context.usage.as_deref(),
            Some("Include the API key in the `key` query parameter.")
        );
    }

    #[test]
    fn test_openapi_oauth2_lists_flows() {
        let flows = json!({"implicit": {}, "clientCredentials": {}});
        let context = from_openapi(&AuthDescriptor::OAuth2 {
            flows: flows.as_object().cloned().unwrap(),
        });
        assert_eq!(context.flows, vec!["implicit", "clientCredentials"]);
    }
}
