//! Error types for yali

/// Result type alias using yali's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for yali operations
///
/// Every variant is scoped to a single model: a failure while loading one
/// class never invalidates the classes that are already loaded.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Locator name does not follow `<class>.yali.gz`
    #[error("invalid model name {locator:?}: expected <class>.yali.gz")]
    NameFormat { locator: String },

    /// Decompression failure
    #[error("decode error: {0}")]
    Decode(String),

    /// Missing or malformed n-gram length header
    #[error("header error: {0}")]
    Header(String),

    /// Model n-gram length disagrees with the registry
    #[error("incompatible model for class {class}: expected {expected}-grams, found {found}-grams")]
    NgramMismatch {
        class: String,
        expected: usize,
        found: usize,
    },

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Missing or unreadable model source
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Timeout errors
    #[error("operation timed out")]
    Timeout,

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new name format error
    pub fn name_format(locator: impl Into<String>) -> Self {
        Self::NameFormat {
            locator: locator.into(),
        }
    }

    /// Create a new decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a new header error
    pub fn header(msg: impl Into<String>) -> Self {
        Self::Header(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
