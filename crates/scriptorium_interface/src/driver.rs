//! The language-model driver trait.

use async_trait::async_trait;
use scriptorium_core::TextRequest;
use scriptorium_error::ScriptoriumResult;

/// Core trait every language-model backend must implement.
///
/// This is the minimal interface for synchronous (from the request's
/// perspective) text generation: one prompt in, one text out. There is no
/// retry or deadline wrapping here; a driver call either completes,
/// returns a model error, or blocks until the provider's own timeout
/// fires.
#[async_trait]
pub trait LanguageDriver: Send + Sync {
    /// Generate text for a fully-assembled request.
    async fn generate(&self, req: &TextRequest) -> ScriptoriumResult<String>;

    /// Provider name (e.g., "openai", "anthropic").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4o-mini").
    fn model_name(&self) -> &str;
}
