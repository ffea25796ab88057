//! Core types for yali

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Score assigned to one language class for a piece of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageScore {
    /// Class identifier, usually an ISO 639-3 code
    pub class: String,

    /// Normalized score (0.0-1.0); scores of one ranking sum to 1.0 or are all zero
    pub score: f64,
}

impl LanguageScore {
    /// Create a new language score
    pub fn new(class: impl Into<String>, score: f64) -> Self {
        Self {
            class: class.into(),
            score,
        }
    }

    /// Ranking order: descending score, then ascending class id.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.class.cmp(&other.class))
    }
}

/// Result of identifying a text
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Identification {
    /// Every loaded class, best first
    pub scores: Vec<LanguageScore>,

    /// Number of n-grams extracted from the text
    pub ngrams_extracted: usize,

    /// Number of extracted n-grams found in at least one model
    pub ngrams_matched: usize,

    /// Latency in microseconds
    pub latency_us: u64,
}

impl Identification {
    /// Best scoring class, if anything matched at all
    pub fn best(&self) -> Option<&LanguageScore> {
        self.scores.first().filter(|s| s.score > 0.0)
    }

    /// The `n` best classes
    pub fn top(&self, n: usize) -> &[LanguageScore] {
        &self.scores[..n.min(self.scores.len())]
    }

    /// Check if the best score exceeds threshold
    pub fn exceeds_threshold(&self, threshold: f64) -> bool {
        self.best().is_some_and(|s| s.score >= threshold)
    }
}

/// Successful outcome of loading a single class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// The class was merged into the registry
    Loaded,
    /// The class was already present; nothing changed
    AlreadyLoaded,
}

/// Outcome of one locator in a batch load
#[derive(Debug)]
pub enum LoadOutcome {
    /// Class loaded from the locator
    Loaded { class: String, locator: String },

    /// Class was already loaded
    AlreadyLoaded { class: String, locator: String },

    /// Locator name did not yield a class id
    Skipped { locator: String, error: Error },

    /// Fetch, decode, parse or registry rejection
    Failed {
        class: String,
        locator: String,
        error: Error,
    },
}

impl LoadOutcome {
    /// Locator this outcome belongs to
    pub fn locator(&self) -> &str {
        match self {
            Self::Loaded { locator, .. }
            | Self::AlreadyLoaded { locator, .. }
            | Self::Skipped { locator, .. }
            | Self::Failed { locator, .. } => locator,
        }
    }

    /// Error carried by this outcome, if any
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Skipped { error, .. } | Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Whether the class is available after this outcome
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Loaded { .. } | Self::AlreadyLoaded { .. })
    }
}

/// Structured summary of a batch load
#[derive(Debug, Default)]
pub struct LoadReport {
    /// One entry per locator, sorted by locator
    pub outcomes: Vec<LoadOutcome>,

    /// Loaded classes once every task has joined, sorted
    pub classes: Vec<String>,
}

impl LoadReport {
    /// Classes newly loaded by this batch
    pub fn loaded(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                LoadOutcome::Loaded { class, .. } => Some(class.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Skipped and failed locators with their errors
    pub fn failures(&self) -> Vec<(&str, &Error)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.error().map(|e| (o.locator(), e)))
            .collect()
    }

    /// True when no locator was skipped or failed
    pub fn is_clean(&self) -> bool {
        self.outcomes.iter().all(LoadOutcome::is_success)
    }
}
