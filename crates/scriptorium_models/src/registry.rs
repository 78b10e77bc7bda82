//! Dependency-injected provider registry.

use crate::ModelSettings;
use scriptorium_interface::LanguageDriver;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Registry of configured language-model drivers.
///
/// Built once at startup and passed into the generator/evaluator
/// constructors. An empty registry is a valid state: the engine degrades
/// to its deterministic fallback paths.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    drivers: HashMap<String, Arc<dyn LanguageDriver>>,
    default_provider: Option<String>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from settings plus whatever credentials the
    /// environment provides. Missing credentials are not an error; the
    /// provider is simply not registered.
    pub fn from_env(settings: &ModelSettings) -> Self {
        // Pick up a .env file if present, matching how deployments ship
        // credentials alongside the binary.
        let _ = dotenvy::dotenv();

        let mut registry = Self::new();

        #[cfg(feature = "openai")]
        if let Ok(client) = crate::OpenAiClient::from_env(settings.openai_model().clone()) {
            registry.register("openai", Arc::new(client));
        }

        #[cfg(feature = "anthropic")]
        if let Ok(client) = crate::AnthropicClient::from_env(settings.anthropic_model().clone()) {
            registry.register("anthropic", Arc::new(client));
        }

        #[cfg(not(any(feature = "openai", feature = "anthropic")))]
        let _ = settings;

        info!(
            providers = registry.drivers.len(),
            default = ?registry.default_provider,
            "Provider registry constructed"
        );
        registry
    }

    /// Register a driver under a name. The first registration becomes the
    /// default provider.
    pub fn register(&mut self, name: impl Into<String>, driver: Arc<dyn LanguageDriver>) {
        let name = name.into();
        if self.default_provider.is_none() {
            self.default_provider = Some(name.clone());
        }
        self.drivers.insert(name, driver);
    }

    /// Fetch a driver by provider name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn LanguageDriver>> {
        self.drivers.get(name).cloned()
    }

    /// The default driver, if any provider is configured.
    pub fn default_driver(&self) -> Option<Arc<dyn LanguageDriver>> {
        self.default_provider
            .as_deref()
            .and_then(|name| self.get(name))
    }

    /// Whether no provider is configured.
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Names of all registered providers.
    pub fn provider_names(&self) -> Vec<&str> {
        self.drivers.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.provider_names())
            .field("default", &self.default_provider)
            .finish()
    }
}
