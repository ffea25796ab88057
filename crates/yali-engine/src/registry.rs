//! Frequency registry: the merged n-gram table of every loaded class
//!
//! Writers (`load`, `unload`) serialize on a single mutex, build a fresh
//! [`Snapshot`] from the current one and publish it with one `Arc` swap.
//! Readers load the current `Arc` without locking and never wait for a load,
//! so a classification sees the registry either before or after a load, never
//! a half-merged table.

use crate::parser::{parse_model, FrequencyModel};
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use yali_core::{Error, LoadStatus, Result};

/// Per-class weights of one n-gram
pub type ClassWeights = Arc<[(Arc<str>, f64)]>;

/// Immutable view of the registry at one point in time
#[derive(Debug, Default)]
pub struct Snapshot {
    ngram: Option<usize>,
    table: HashMap<Arc<[u8]>, ClassWeights>,
    classes: BTreeMap<Arc<str>, String>,
}

impl Snapshot {
    /// Global n-gram length, unset while the registry is empty
    pub fn ngram(&self) -> Option<usize> {
        self.ngram
    }

    /// Loaded classes in ascending order
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(|c| c.as_ref())
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    /// Locator a class was loaded from
    pub fn locator(&self, class: &str) -> Option<&str> {
        self.classes.get(class).map(String::as_str)
    }

    /// Class weights recorded for an n-gram
    pub fn lookup(&self, ngram: &[u8]) -> Option<&[(Arc<str>, f64)]> {
        self.table.get(ngram).map(|w| w.as_ref())
    }

    /// Number of distinct n-grams across all classes
    pub fn table_len(&self) -> usize {
        self.table.len()
    }

    fn with_class(&self, class: &str, locator: &str, model: FrequencyModel) -> Self {
        let class: Arc<str> = Arc::from(class);
        let ngram = model.ngram();
        let mut table = self.table.clone();

        for (token, weight) in model.into_weights() {
            match table.get_mut(&token[..]) {
                Some(existing) => {
                    let mut merged = existing.to_vec();
                    merged.push((Arc::clone(&class), weight));
                    *existing = merged.into();
                }
                None => {
                    let entry: ClassWeights = Arc::new([(Arc::clone(&class), weight)]);
                    table.insert(Arc::from(token), entry);
                }
            }
        }

        let mut classes = self.classes.clone();
        classes.insert(class, locator.to_string());

        Self {
            ngram: Some(ngram),
            table,
            classes,
        }
    }

    fn without_class(&self, class: &str) -> Self {
        let table = self
            .table
            .iter()
            .filter_map(|(token, weights)| {
                if !weights.iter().any(|(c, _)| c.as_ref() == class) {
                    return Some((Arc::clone(token), Arc::clone(weights)));
                }
                let kept: Vec<_> = weights
                    .iter()
                    .filter(|(c, _)| c.as_ref() != class)
                    .cloned()
                    .collect();
                (!kept.is_empty()).then(|| (Arc::clone(token), kept.into()))
            })
            .collect();

        let mut classes = self.classes.clone();
        classes.remove(class);
        let ngram = if classes.is_empty() { None } else { self.ngram };

        Self {
            ngram,
            table,
            classes,
        }
    }
}

/// Shared, concurrency-safe store of loaded frequency models
#[derive(Debug)]
pub struct FrequencyRegistry {
    current: ArcSwap<Snapshot>,
    write_lock: Mutex<()>,
}

impl FrequencyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(Snapshot::default()),
            write_lock: Mutex::new(()),
        }
    }

    /// Current snapshot; cheap to take and safe to hold across loads
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// Loaded classes in ascending order
    pub fn classes(&self) -> Vec<String> {
        self.snapshot().classes().map(str::to_string).collect()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.snapshot().contains(class)
    }

    pub fn ngram(&self) -> Option<usize> {
        self.snapshot().ngram()
    }

    /// Parse a decompressed model and merge it under `class`.
    pub fn load(&self, class: &str, locator: &str, data: &[u8]) -> Result<LoadStatus> {
        if self.contains(class) {
            return Ok(LoadStatus::AlreadyLoaded);
        }
        let model = parse_model(locator, data)?;
        self.insert(class, locator, model)
    }

    /// Merge an already parsed model under `class`.
    ///
    /// The already-loaded check, the n-gram length check and the merge form
    /// one critical section; a rejected model leaves the registry untouched.
    pub fn insert(&self, class: &str, locator: &str, model: FrequencyModel) -> Result<LoadStatus> {
        if model.ngram() == 0 {
            return Err(Error::header(format!("{}: n-gram length must be positive", locator)));
        }

        let _guard = self.write_lock.lock();
        let current = self.snapshot();

        if current.contains(class) {
            return Ok(LoadStatus::AlreadyLoaded);
        }
        if let Some(expected) = current.ngram() {
            if expected != model.ngram() {
                return Err(Error::NgramMismatch {
                    class: class.to_string(),
                    expected,
                    found: model.ngram(),
                });
            }
        }

        let entries = model.len();
        let next = current.with_class(class, locator, model);
        self.current.store(Arc::new(next));

        tracing::debug!(class, locator, entries, "merged class into registry");
        Ok(LoadStatus::Loaded)
    }

    /// Remove a class. Returns false if it was not loaded.
    ///
    /// Unloading the last class resets the n-gram length.
    pub fn unload(&self, class: &str) -> bool {
        let _guard = self.write_lock.lock();
        let current = self.snapshot();

        if !current.contains(class) {
            return false;
        }

        let next = current.without_class(class);
        self.current.store(Arc::new(next));

        tracing::debug!(class, "removed class from registry");
        true
    }
}

impl Default for FrequencyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
