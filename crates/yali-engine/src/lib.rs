//! yali Engine
//!
//! Language identification by character n-gram statistics.
//!
//! Each language ("class") ships as a gzip-compressed frequency model. The
//! engine loads models concurrently from a [`CorpusProvider`] into a shared
//! [`FrequencyRegistry`], then scores text by summing the weights of its
//! n-grams per class and normalizing the totals.
//!
//! ```no_run
//! # async fn run() -> yali_core::Result<()> {
//! use yali_engine::EngineBuilder;
//!
//! let (engine, _report) = EngineBuilder::new()
//!     .with_models_dir("./models")
//!     .build()
//!     .await?;
//!
//! if let Some(best) = engine.identify("Der schnelle braune Fuchs").best() {
//!     println!("{} ({:.3})", best.class, best.score);
//! }
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod config;
pub mod decode;
pub mod engine;
pub mod loader;
pub mod parser;
pub mod providers;
pub mod registry;

pub use config::{CorpusSpec, EngineConfig};
pub use engine::{Engine, EngineBuilder};
pub use loader::{class_from_locator, BatchLoader};
pub use parser::{parse_model, FrequencyModel};
pub use providers::{DirectoryProvider, EmbeddedProvider, MemoryProvider};
pub use registry::{FrequencyRegistry, Snapshot};
pub use yali_core::{
    CorpusProvider, Error, Identification, LanguageScore, LoadOutcome, LoadReport, LoadStatus,
    Result,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::engine::{Engine, EngineBuilder};
    pub use crate::providers::{DirectoryProvider, EmbeddedProvider, MemoryProvider};
    pub use yali_core::prelude::*;
}
