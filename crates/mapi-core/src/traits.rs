//! Ports implemented outside the core crate.
//!
//! The generator depends only on the [`IntentGenerator`] trait, so the
//! HTTP-backed collaborator and test doubles plug in the same way.

use crate::Result;
use async_trait::async_trait;

/// Produces intent keywords for one capability.
///
/// Implementations may be remote and slow. The generator awaits them one
/// capability at a time and treats any error as a signal to fall back to
/// the local keyword heuristic, so implementations should not retry
/// internally.
///
/// # Type Safety
///
/// All implementations must be `Send + Sync` to work with Tokio's async runtime.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use mapi_core::traits::IntentGenerator;
/// use mapi_core::Result;
///
/// struct FixedKeywords;
///
/// #[async_trait]
/// impl IntentGenerator for FixedKeywords {
///     async fn generate(&self, _capability_id: &str, _description: &str) -> Result<Vec<String>> {
///         Ok(vec!["widget".to_string(), "create".to_string()])
///     }
/// }
///
/// # tokio_test_block_on(async {
/// let keywords = FixedKeywords.generate("widgets.create", "Creates a widget").await.unwrap();
/// assert_eq!(keywords, vec!["widget", "create"]);
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[async_trait]
pub trait IntentGenerator: Send + Sync {
    /// Returns keywords describing the capability.
    ///
    /// # Errors
    ///
    /// Returns an error if keywords cannot be produced. Callers recover
    /// by using the heuristic extractor.
    async fn generate(&self, capability_id: &str, description: &str) -> Result<Vec<String>>;
}
