//! Error types for mydashboard-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from registry manifest and configuration store
/// operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failure, annotated with the path being touched.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML serialization error (write/save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.mydashboard/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// The user name cannot be used as a storage key.
    #[error("invalid user name '{0}': must be non-empty and contain no path separators")]
    InvalidUserName(String),

    /// Two manifest entries share the same component id.
    #[error("component '{0}' is registered more than once")]
    DuplicateComponent(String),

    /// A manifest edit referenced a component id that is not registered.
    #[error("component '{0}' is not registered")]
    UnknownComponent(String),

    /// An in-memory store lock was poisoned by a panicking writer.
    #[error("configuration store lock poisoned")]
    Poisoned,
}

/// Convenience constructor for [`StoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.into(),
        source,
    }
}
