use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use yali_engine::EngineConfig;

#[derive(Parser, Debug)]
#[command(name = "yali")]
#[command(author, version, about = "Identify the natural language of text")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "yali.yaml", env = "YALI_CONFIG")]
    pub config: PathBuf,

    /// Model directory, overrides the configured corpus
    #[arg(short, long, env = "YALI_MODELS")]
    pub models: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank languages for the given text (stdin when no text is given)
    Identify {
        /// Number of languages to print
        #[arg(short = 'n', long, default_value = "3")]
        top: usize,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Text to identify
        text: Vec<String>,
    },

    /// List the languages loaded from the corpus
    Classes {
        /// Print JSON instead of one class per line
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Engine configuration from the config file (if present) and CLI overrides
    pub fn engine_config(&self) -> anyhow::Result<EngineConfig> {
        let config = load_config(&self.config)?;
        Ok(match &self.models {
            Some(dir) => config.with_models_dir(dir.clone()),
            None => config,
        })
    }
}

fn load_config(path: &Path) -> anyhow::Result<EngineConfig> {
    if path.exists() {
        Ok(EngineConfig::from_file(path)?)
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        Ok(EngineConfig::default())
    }
}
