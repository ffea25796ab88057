//! Concurrent batch loading of a model corpus
//!
//! One task per locator, bounded by a semaphore, joined before the report is
//! built. A failing locator only affects its own outcome.

use crate::decode::gunzip;
use crate::parser::{parse_model, FrequencyModel};
use crate::registry::FrequencyRegistry;
use futures::future::join_all;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};
use yali_core::{CorpusProvider, Error, LoadOutcome, LoadReport, LoadStatus, Result};

/// Middle segment of a model name
pub const MODEL_TAG: &str = "yali";

/// Final segment of a model name (gzip)
pub const MODEL_EXTENSION: &str = "gz";

/// Derive the class id from a locator named `<class>.yali.gz`.
///
/// Only the final path component is inspected, so `models/eng.yali.gz` and
/// `eng.yali.gz` both yield `eng`.
pub fn class_from_locator(locator: &str) -> Result<String> {
    let name = Path::new(locator)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(locator);

    let segments: Vec<&str> = name.split('.').collect();
    match segments.as_slice() {
        [class, MODEL_TAG, MODEL_EXTENSION] if !class.is_empty() => Ok(class.to_string()),
        _ => Err(Error::name_format(locator)),
    }
}

/// Drives concurrent loads against a shared registry
#[derive(Debug, Clone)]
pub struct BatchLoader {
    max_concurrent: usize,
    timeout: Option<Duration>,
}

impl Default for BatchLoader {
    fn default() -> Self {
        Self {
            max_concurrent: num_cpus::get(),
            timeout: None,
        }
    }
}

impl BatchLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of loads in flight (at least one)
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Give up on a single load after `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Load every locator the provider lists.
    ///
    /// Fails only when the provider cannot list its locators; per-locator
    /// problems are recorded in the report.
    pub async fn load_all(
        &self,
        provider: Arc<dyn CorpusProvider>,
        registry: Arc<FrequencyRegistry>,
    ) -> Result<LoadReport> {
        let locators = provider.list_locators().await?;
        info!(
            source = %provider.describe(),
            candidates = locators.len(),
            "loading language models"
        );

        let permits = Arc::new(Semaphore::new(self.max_concurrent));
        let mut outcomes = Vec::with_capacity(locators.len());
        let mut pending = Vec::new();

        for locator in locators {
            let class = match class_from_locator(&locator) {
                Ok(class) => class,
                Err(error) => {
                    warn!(locator = %locator, error = %error, "skipped model source");
                    outcomes.push(LoadOutcome::Skipped { locator, error });
                    continue;
                }
            };

            let provider = Arc::clone(&provider);
            let registry = Arc::clone(&registry);
            let permits = Arc::clone(&permits);
            let timeout = self.timeout;
            let task_class = class.clone();
            let task_locator = locator.clone();

            let handle = tokio::spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|e| Error::internal(format!("load semaphore closed: {}", e)))?;
                load_locator(
                    provider.as_ref(),
                    &registry,
                    &task_class,
                    &task_locator,
                    timeout,
                )
                .await
            });
            pending.push((class, locator, handle));
        }

        let (meta, handles): (Vec<_>, Vec<_>) = pending
            .into_iter()
            .map(|(class, locator, handle)| ((class, locator), handle))
            .unzip();

        for ((class, locator), joined) in meta.into_iter().zip(join_all(handles).await) {
            let result = joined
                .unwrap_or_else(|e| Err(Error::internal(format!("load task failed: {}", e))));
            let outcome = match result {
                Ok(LoadStatus::Loaded) => {
                    info!(class = %class, locator = %locator, "loaded class");
                    LoadOutcome::Loaded { class, locator }
                }
                Ok(LoadStatus::AlreadyLoaded) => {
                    debug!(class = %class, "class already loaded");
                    LoadOutcome::AlreadyLoaded { class, locator }
                }
                Err(error) => {
                    warn!(
                        class = %class,
                        locator = %locator,
                        error = %error,
                        "failed to load class"
                    );
                    LoadOutcome::Failed {
                        class,
                        locator,
                        error,
                    }
                }
            };
            outcomes.push(outcome);
        }

        outcomes.sort_by(|a, b| a.locator().cmp(b.locator()));
        let classes = registry.classes();
        info!(
            loaded = classes.len(),
            failed = outcomes.iter().filter(|o| !o.is_success()).count(),
            "model loading finished"
        );

        Ok(LoadReport { outcomes, classes })
    }
}

/// Fetch, decode, parse and merge one model.
///
/// The registry is only touched by the final merge, so a load that errors or
/// times out before it leaves no trace. The merge copies the whole table and
/// runs on the blocking pool.
pub async fn load_locator(
    provider: &dyn CorpusProvider,
    registry: &Arc<FrequencyRegistry>,
    class: &str,
    locator: &str,
    timeout: Option<Duration>,
) -> Result<LoadStatus> {
    if registry.contains(class) {
        return Ok(LoadStatus::AlreadyLoaded);
    }

    let fetch = fetch_model(provider, locator);
    let model = match timeout {
        Some(limit) => tokio::time::timeout(limit, fetch)
            .await
            .map_err(|_| Error::Timeout)??,
        None => fetch.await?,
    };

    let registry = Arc::clone(registry);
    let class = class.to_string();
    let locator = locator.to_string();
    tokio::task::spawn_blocking(move || registry.insert(&class, &locator, model))
        .await
        .map_err(|e| Error::internal(format!("registry merge panicked: {}", e)))?
}

async fn fetch_model(provider: &dyn CorpusProvider, locator: &str) -> Result<FrequencyModel> {
    let raw = provider.read_locator(locator).await?;
    let source = locator.to_string();

    tokio::task::spawn_blocking(move || {
        let data = gunzip(&raw)?;
        parse_model(&source, &data)
    })
    .await
    .map_err(|e| Error::internal(format!("model decoding panicked: {}", e)))?
}
