//! Extension point for model corpus access.

use crate::error::Result;

/// Source of compressed language models.
///
/// Implement this trait to serve models from any storage (a directory tree,
/// assets compiled into the binary, an object store) without coupling the
/// engine to a concrete mechanism.
#[async_trait::async_trait]
pub trait CorpusProvider: Send + Sync {
    /// List every locator this provider can serve.
    async fn list_locators(&self) -> Result<Vec<String>>;

    /// Read the raw, still compressed bytes behind a locator.
    ///
    /// Fails with [`Error::Io`](crate::Error::Io) when the source is missing
    /// or unreadable.
    async fn read_locator(&self, locator: &str) -> Result<Vec<u8>>;

    /// Short human-readable description used in diagnostics
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}
