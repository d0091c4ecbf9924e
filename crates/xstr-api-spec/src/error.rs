use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading or reading the API specification.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The specification file does not exist.
    #[error("API specification not found at: {}", path.display())]
    NotFound { path: PathBuf },

    /// The specification file exists but could not be read.
    #[error("failed to read API specification from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not a valid YAML/JSON mapping.
    #[error("failed to parse API specification YAML: {0}")]
    Parse(String),

    /// The crate was built without a parser for the specification format.
    #[error("{0} is required to parse the API specification (enable the `yaml` feature)")]
    MissingDependency(&'static str),

    /// The parsed document could not be written back out as JSON.
    #[error("failed to serialize API specification to JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A required field is absent from an otherwise valid document.
    #[error("{0} not found in API specification")]
    FieldNotFound(String),
}

impl SpecError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}
