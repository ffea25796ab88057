//! Language identification engine

use crate::classifier;
use crate::config::{CorpusSpec, EngineConfig};
use crate::loader::{load_locator, BatchLoader};
use crate::providers::DirectoryProvider;
use crate::registry::FrequencyRegistry;
use std::sync::Arc;
use std::time::Duration;
use yali_core::{CorpusProvider, Identification, LanguageScore, LoadReport, LoadStatus, Result};

/// Identifies the language of text against models served by a provider
pub struct Engine {
    provider: Arc<dyn CorpusProvider>,
    registry: Arc<FrequencyRegistry>,
    loader: BatchLoader,
}

impl Engine {
    /// Create an engine over `provider` with an empty registry
    pub fn new(provider: Arc<dyn CorpusProvider>) -> Self {
        Self {
            provider,
            registry: Arc::new(FrequencyRegistry::new()),
            loader: BatchLoader::default(),
        }
    }

    /// Create an engine from configuration; nothing is loaded yet
    pub fn from_config(config: &EngineConfig) -> Self {
        let provider: Arc<dyn CorpusProvider> = match &config.corpus {
            CorpusSpec::Directory { path } => Arc::new(DirectoryProvider::new(path.clone())),
        };

        Self::new(provider).with_loader(
            BatchLoader::new()
                .with_max_concurrent(config.max_concurrent_loads)
                .with_timeout(config.load_timeout()),
        )
    }

    /// Replace the batch loader settings
    pub fn with_loader(mut self, loader: BatchLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Load every model the provider offers
    pub async fn load_all(&self) -> Result<LoadReport> {
        self.loader
            .load_all(Arc::clone(&self.provider), Arc::clone(&self.registry))
            .await
    }

    /// Load a single model under an explicit class id
    pub async fn load_one(&self, class: &str, locator: &str) -> Result<LoadStatus> {
        load_locator(
            self.provider.as_ref(),
            &self.registry,
            class,
            locator,
            self.loader.timeout(),
        )
        .await
    }

    /// Unload a class; returns false if it was not loaded
    pub fn unload_one(&self, class: &str) -> bool {
        self.registry.unload(class)
    }

    /// Rank every loaded class for `text`, best first
    pub fn classify(&self, text: &str) -> Vec<LanguageScore> {
        self.identify(text).scores
    }

    /// Rank every loaded class for `text` with match statistics
    pub fn identify(&self, text: &str) -> Identification {
        classifier::identify(&self.registry.snapshot(), text)
    }

    /// Loaded classes in ascending order
    pub fn loaded_classes(&self) -> Vec<String> {
        self.registry.classes()
    }

    /// N-gram length shared by the loaded models
    pub fn ngram_length(&self) -> Option<usize> {
        self.registry.ngram()
    }

    pub fn registry(&self) -> &Arc<FrequencyRegistry> {
        &self.registry
    }

    pub fn provider(&self) -> &Arc<dyn CorpusProvider> {
        &self.provider
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("provider", &self.provider.describe())
            .field("classes", &self.registry.snapshot().class_count())
            .field("loader", &self.loader)
            .finish()
    }
}

/// Builder for an [`Engine`] with convenience methods
pub struct EngineBuilder {
    config: EngineConfig,
    provider: Option<Arc<dyn CorpusProvider>>,
    preload: bool,
}

impl EngineBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            provider: None,
            preload: true,
        }
    }

    /// Start from an existing configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Serve models from a custom provider instead of the configured corpus
    pub fn with_provider(mut self, provider: Arc<dyn CorpusProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the models directory
    pub fn with_models_dir(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.config = self.config.with_models_dir(path);
        self
    }

    pub fn max_concurrent_loads(mut self, n: usize) -> Self {
        self.config.max_concurrent_loads = n;
        self
    }

    pub fn load_timeout(mut self, timeout: Duration) -> Self {
        self.config.load_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Whether `build` loads the whole corpus (default: true)
    pub fn preload(mut self, preload: bool) -> Self {
        self.preload = preload;
        self
    }

    /// Build the engine, returning the load report when preloading
    pub async fn build(self) -> Result<(Engine, Option<LoadReport>)> {
        let engine = match self.provider {
            Some(provider) => Engine::new(provider).with_loader(
                BatchLoader::new()
                    .with_max_concurrent(self.config.max_concurrent_loads)
                    .with_timeout(self.config.load_timeout()),
            ),
            None => Engine::from_config(&self.config),
        };

        let report = if self.preload {
            Some(engine.load_all().await?)
        } else {
            None
        };

        Ok((engine, report))
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
