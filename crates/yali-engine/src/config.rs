//! Configuration for the identification engine

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for an [`Engine`](crate::Engine)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Where the language models come from
    #[serde(default)]
    pub corpus: CorpusSpec,

    /// Maximum number of models loaded at the same time
    #[serde(default = "default_max_concurrent_loads")]
    pub max_concurrent_loads: usize,

    /// Per-model load timeout in milliseconds
    #[serde(default)]
    pub load_timeout_ms: Option<u64>,
}

/// Corpus specification (for config files)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CorpusSpec {
    /// Directory tree of `<class>.yali.gz` files
    Directory {
        #[serde(default = "default_models_dir")]
        path: PathBuf,
    },
}

impl Default for CorpusSpec {
    fn default() -> Self {
        Self::Directory {
            path: default_models_dir(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            corpus: CorpusSpec::default(),
            max_concurrent_loads: default_max_concurrent_loads(),
            load_timeout_ms: None,
        }
    }
}

impl EngineConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> yali_core::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).map_err(|e| {
            yali_core::Error::config(format!("{}: {}", path.display(), e))
        })
    }

    /// Point the corpus at a different model directory
    pub fn with_models_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.corpus = CorpusSpec::Directory { path: path.into() };
        self
    }

    /// Per-model load timeout
    pub fn load_timeout(&self) -> Option<Duration> {
        self.load_timeout_ms.map(Duration::from_millis)
    }
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("./models")
}

fn default_max_concurrent_loads() -> usize {
    num_cpus::get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_yaml() {
        let yaml = r#"
corpus:
  type: directory
  path: /usr/share/yali/models
max_concurrent_loads: 4
load_timeout_ms: 2500
"#;

        let config = EngineConfig::from_yaml(yaml).unwrap();

        let CorpusSpec::Directory { path } = &config.corpus;
        assert_eq!(path, &PathBuf::from("/usr/share/yali/models"));
        assert_eq!(config.max_concurrent_loads, 4);
        assert_eq!(config.load_timeout(), Some(Duration::from_millis(2500)));
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::from_yaml("{}").unwrap();

        let CorpusSpec::Directory { path } = &config.corpus;
        assert_eq!(path, &PathBuf::from("./models"));
        assert_eq!(config.max_concurrent_loads, num_cpus::get());
        assert_eq!(config.load_timeout(), None);

        let config = EngineConfig::from_yaml("corpus:\n  type: directory\n").unwrap();
        let CorpusSpec::Directory { path } = &config.corpus;
        assert_eq!(path, &PathBuf::from("./models"));
    }

    #[test]
    fn test_unknown_corpus_type() {
        let yaml = "corpus:\n  type: ftp\n";
        assert!(EngineConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("yali.yaml");
        std::fs::write(&file, "max_concurrent_loads: 2\n").unwrap();

        let config = EngineConfig::from_file(&file).unwrap();
        assert_eq!(config.max_concurrent_loads, 2);

        std::fs::write(&file, "max_concurrent_loads: [oops]\n").unwrap();
        let err = EngineConfig::from_file(&file).unwrap_err();
        assert!(matches!(err, yali_core::Error::Config(_)));
    }
}
