//! yali Core
//!
//! Core types, traits, and utilities shared across yali components.
//!
//! This crate provides:
//! - Error types and result handling
//! - Ranking and load-report value types
//! - The [`CorpusProvider`] trait through which models are fetched

pub mod error;
pub mod provider;
pub mod types;

pub use error::{Error, Result};
pub use provider::CorpusProvider;
pub use types::{Identification, LanguageScore, LoadOutcome, LoadReport, LoadStatus};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::provider::CorpusProvider;
    pub use crate::types::{Identification, LanguageScore, LoadOutcome, LoadReport, LoadStatus};
}
