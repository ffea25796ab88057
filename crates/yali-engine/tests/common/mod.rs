//! Shared fixtures for engine integration tests
//!
//! Builds gzip models on the fly and provides mock corpus providers for
//! exercising timeouts and load concurrency.

#![allow(dead_code)]

use async_trait::async_trait;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use yali_engine::{CorpusProvider, MemoryProvider, Result};

/// Gzip a model body
pub fn gz(body: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(body.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

/// Gzipped model with the given n-gram length and raw counts
pub fn model(ngram: usize, entries: &[(&str, u64)]) -> Vec<u8> {
    let total: u64 = entries.iter().map(|(_, c)| c).sum();
    let mut body = format!("{}\n{}\n", ngram, total);
    for (token, count) in entries {
        body.push_str(&format!("{}\t{}\n", token, count));
    }
    gz(&body)
}

/// The two-class corpus used throughout the tests
pub fn eng_fra() -> MemoryProvider {
    MemoryProvider::new()
        .with_source("eng.yali.gz", model(3, &[("abc", 10), ("abd", 5)]))
        .with_source("fra.yali.gz", model(3, &[("abc", 1), ("xyz", 9)]))
}

/// Provider that delays every read
pub struct SlowProvider {
    inner: MemoryProvider,
    delay: Duration,
}

impl SlowProvider {
    pub fn new(inner: MemoryProvider, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl CorpusProvider for SlowProvider {
    async fn list_locators(&self) -> Result<Vec<String>> {
        self.inner.list_locators().await
    }

    async fn read_locator(&self, locator: &str) -> Result<Vec<u8>> {
        tokio::time::sleep(self.delay).await;
        self.inner.read_locator(locator).await
    }
}

/// Provider that records how many reads run at the same time
pub struct CountingProvider {
    inner: MemoryProvider,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    reads: AtomicUsize,
}

impl CountingProvider {
    pub fn new(inner: MemoryProvider) -> Arc<Self> {
        Arc::new(Self {
            inner,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            reads: AtomicUsize::new(0),
        })
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CorpusProvider for CountingProvider {
    async fn list_locators(&self) -> Result<Vec<String>> {
        self.inner.list_locators().await
    }

    async fn read_locator(&self, locator: &str) -> Result<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(20)).await;
        let result = self.inner.read_locator(locator).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
