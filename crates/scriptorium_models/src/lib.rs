//! Language-model provider integrations for Scriptorium.
//!
//! Each provider implements [`scriptorium_interface::LanguageDriver`]
//! behind its own feature flag. The [`ProviderRegistry`] is the only way
//! drivers reach the engine: it is constructed once at startup from
//! [`ModelSettings`] plus the environment and passed by reference into the
//! generator/evaluator constructors, so there is no hidden process-wide
//! provider state and tests can substitute fakes freely.
//!
//! # Example
//!
//! ```no_run
//! use scriptorium_models::{ModelSettings, ProviderRegistry};
//!
//! let settings = ModelSettings::load().unwrap_or_default();
//! let registry = ProviderRegistry::from_env(&settings);
//! if registry.is_empty() {
//!     // No credentials configured: generation degrades to templates.
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod registry;
mod settings;

#[cfg(feature = "openai")]
mod openai;

#[cfg(feature = "anthropic")]
mod anthropic;

pub use registry::ProviderRegistry;
pub use settings::{ModelSettings, SamplingProfile};

#[cfg(feature = "openai")]
pub use openai::OpenAiClient;

#[cfg(feature = "anthropic")]
pub use anthropic::AnthropicClient;
