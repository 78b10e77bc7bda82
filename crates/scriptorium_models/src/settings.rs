//! Model settings loaded from file and environment.

use derive_getters::Getters;
use scriptorium_error::{ConfigError, ScriptoriumResult};
use serde::{Deserialize, Serialize};

/// Sampling parameters for one class of task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Getters)]
pub struct SamplingProfile {
    /// Sampling temperature
    temperature: f32,
    /// Token budget per call
    max_tokens: u32,
}

impl SamplingProfile {
    /// Build a profile.
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-5-sonnet-latest".to_string()
}

fn default_creative() -> SamplingProfile {
    SamplingProfile::new(0.75, 2500)
}

fn default_structured() -> SamplingProfile {
    SamplingProfile::new(0.3, 1500)
}

/// Provider and sampling configuration.
///
/// Creative tasks (scene generation) run hot; structured tasks (judgment
/// with a JSON contract) run cold for repeatable output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ModelSettings {
    /// Model id used for the OpenAI provider
    #[serde(default = "default_openai_model")]
    openai_model: String,
    /// Model id used for the Anthropic provider
    #[serde(default = "default_anthropic_model")]
    anthropic_model: String,
    /// Sampling for generation
    #[serde(default = "default_creative")]
    creative: SamplingProfile,
    /// Sampling for judgment/evaluation
    #[serde(default = "default_structured")]
    structured: SamplingProfile,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            openai_model: default_openai_model(),
            anthropic_model: default_anthropic_model(),
            creative: default_creative(),
            structured: default_structured(),
        }
    }
}

impl ModelSettings {
    /// Load settings from `scriptorium.toml` (optional) with
    /// `SCRIPTORIUM_*` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns a config error when a source exists but cannot be parsed.
    pub fn load() -> ScriptoriumResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("scriptorium").required(false))
            .add_source(config::Environment::with_prefix("SCRIPTORIUM").separator("__"))
            .build()
            .map_err(|e| ConfigError::new(format!("failed to read settings: {}", e)))?;
        settings
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("invalid settings: {}", e)).into())
    }
}
