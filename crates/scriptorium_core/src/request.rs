//! Request type for language-model generation.

use serde::{Deserialize, Serialize};

/// A fully-assembled generation request.
///
/// The prompt is complete by the time it reaches a driver; drivers add
/// nothing but their own fixed system framing.
///
/// # Examples
///
/// ```
/// use scriptorium_core::TextRequest;
///
/// let req = TextRequest::new("Write an opening scene.")
///     .with_temperature(0.75)
///     .with_max_tokens(2000);
///
/// assert_eq!(req.temperature, 0.75);
/// assert_eq!(req.max_tokens, 2000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRequest {
    /// The assembled prompt
    pub prompt: String,
    /// Sampling temperature (0.0 to 1.0)
    pub temperature: f32,
    /// Maximum number of tokens to generate
    pub max_tokens: u32,
}

impl TextRequest {
    /// Create a request with default sampling (temperature 0.7, 2000 tokens).
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: 0.7,
            max_tokens: 2000,
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the token budget.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}
