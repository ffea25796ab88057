//! In-memory model corpus

use std::collections::BTreeMap;
use yali_core::{CorpusProvider, Error, Result};

/// Serves models held in memory, keyed by locator
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    sources: BTreeMap<String, Vec<u8>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw (compressed) source
    pub fn with_source(mut self, locator: impl Into<String>, raw: impl Into<Vec<u8>>) -> Self {
        self.insert(locator, raw);
        self
    }

    pub fn insert(&mut self, locator: impl Into<String>, raw: impl Into<Vec<u8>>) {
        self.sources.insert(locator.into(), raw.into());
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[async_trait::async_trait]
impl CorpusProvider for MemoryProvider {
    async fn list_locators(&self) -> Result<Vec<String>> {
        Ok(self.sources.keys().cloned().collect())
    }

    async fn read_locator(&self, locator: &str) -> Result<Vec<u8>> {
        self.sources.get(locator).cloned().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no source named {}", locator),
            ))
        })
    }

    fn describe(&self) -> String {
        format!("{} in-memory sources", self.sources.len())
    }
}
