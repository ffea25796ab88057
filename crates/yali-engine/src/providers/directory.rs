//! Models stored in a directory tree

use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use yali_core::{CorpusProvider, Error, Result};

/// Serves every file below a root directory, recursively.
///
/// Locators are file paths as produced by the walk.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
}

impl DirectoryProvider {
    /// Create a provider rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn walk(root: &Path) -> Result<Vec<String>> {
        if !root.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("model directory {} does not exist", root.display()),
            )));
        }

        let mut locators = Vec::new();
        for entry in WalkDir::new(root).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(root = %root.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if entry.file_type().is_file() {
                locators.push(entry.path().to_string_lossy().into_owned());
            }
        }

        locators.sort();
        Ok(locators)
    }
}

#[async_trait::async_trait]
impl CorpusProvider for DirectoryProvider {
    async fn list_locators(&self) -> Result<Vec<String>> {
        let root = self.root.clone();
        tokio::task::spawn_blocking(move || Self::walk(&root))
            .await
            .map_err(|e| Error::internal(format!("directory walk panicked: {}", e)))?
    }

    async fn read_locator(&self, locator: &str) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(locator).await?)
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}
