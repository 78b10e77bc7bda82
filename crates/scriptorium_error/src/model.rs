//! Language-model capability error types.

/// Specific error conditions for language-model calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ModelErrorKind {
    /// No credentials or configuration for the provider
    #[display("provider unavailable: {}", _0)]
    Unavailable(String),
    /// Transport-level failure (connection, TLS, timeout)
    #[display("HTTP error: {}", _0)]
    Http(String),
    /// The provider returned a non-success status
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or provider message
        message: String,
    },
    /// The provider responded but the payload could not be interpreted
    #[display("malformed response: {}", _0)]
    MalformedResponse(String),
}

/// Error type for language-model provider calls.
///
/// Inside the generation/evaluation loop these are absorbed locally and
/// degrade to fallback output; direct callers see them surfaced.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Model Error: {} at line {} in {}", kind, line, file)]
pub struct ModelError {
    /// The specific error condition
    pub kind: ModelErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ModelError {
    /// Create a new ModelError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ModelErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a [`ModelErrorKind::Unavailable`] error.
    #[track_caller]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ModelErrorKind::Unavailable(message.into()))
    }
}
