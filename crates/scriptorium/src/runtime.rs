//! Runtime wiring: store + provider registry → engine components.

use scriptorium_engine::{
    ContextBuilder, EvaluatorConfig, GeneratorConfig, SceneEvaluator, SceneGenerator,
};
use scriptorium_interface::NarrativeStore;
use scriptorium_models::{ModelSettings, ProviderRegistry};
use scriptorium_store::MemoryStore;
use std::sync::Arc;

/// A wired Scriptorium instance.
///
/// Holds the store, the provider registry and the model settings built at
/// startup, and hands out engine components constructed against them.
/// Components are cheap to construct, so each call returns a fresh one;
/// all of them share the same store.
pub struct Scriptorium {
    store: Arc<dyn NarrativeStore>,
    registry: ProviderRegistry,
    settings: ModelSettings,
}

impl Scriptorium {
    /// Wire a runtime over any store implementation, with default model
    /// settings.
    pub fn new(store: Arc<dyn NarrativeStore>, registry: ProviderRegistry) -> Self {
        Self {
            store,
            registry,
            settings: ModelSettings::default(),
        }
    }

    /// Wire a runtime over a fresh in-memory store.
    pub fn in_memory(registry: ProviderRegistry) -> Self {
        Self::new(Arc::new(MemoryStore::new()), registry)
    }

    /// Replace the model settings (sampling profiles, model ids).
    pub fn with_settings(mut self, settings: ModelSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The shared store.
    pub fn store(&self) -> Arc<dyn NarrativeStore> {
        self.store.clone()
    }

    /// The provider registry.
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// A scene generator using the registry's default driver and the
    /// creative sampling profile.
    pub fn generator(&self) -> SceneGenerator {
        let creative = self.settings.creative();
        let config = GeneratorConfig {
            creative_temperature: *creative.temperature(),
            ..GeneratorConfig::default()
        };
        SceneGenerator::new(self.store.clone(), self.registry.default_driver())
            .with_evaluator(self.evaluator())
            .with_config(config)
    }

    /// A scene evaluator using the registry's default driver and the
    /// structured sampling profile.
    pub fn evaluator(&self) -> SceneEvaluator {
        let structured = self.settings.structured();
        SceneEvaluator::new(self.registry.default_driver()).with_config(
            EvaluatorConfig::default()
                .with_judgment_sampling(*structured.temperature(), *structured.max_tokens()),
        )
    }

    /// A context builder over the shared store.
    pub fn context_builder(&self) -> ContextBuilder {
        ContextBuilder::new(self.store.clone())
    }
}
