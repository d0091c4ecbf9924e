//! Where the specification text comes from.

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Location of the specification shipped with this crate.
pub const BUNDLED_SPEC_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/api-spec.yml");

/// Environment variable that redirects the process-wide accessor to another file.
pub const SPEC_PATH_ENV: &str = "XSTR_API_SPEC_PATH";

/// Source of the raw specification text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    /// A YAML (or JSON) file on disk, read on every cache miss.
    File(PathBuf),
    /// Text held in memory.
    Inline(Arc<str>),
}

impl Default for SpecSource {
    fn default() -> Self {
        Self::bundled()
    }
}

impl SpecSource {
    /// The `api-spec.yml` packaged alongside this crate.
    pub fn bundled() -> Self {
        Self::File(PathBuf::from(BUNDLED_SPEC_PATH))
    }

    /// The bundled file, unless [`SPEC_PATH_ENV`] names another one.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var_os(SPEC_PATH_ENV))
    }

    fn from_env_value(value: Option<std::ffi::OsString>) -> Self {
        match value {
            Some(path) if !path.is_empty() => Self::File(PathBuf::from(path)),
            _ => Self::bundled(),
        }
    }

    /// A file at `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// In-memory text.
    pub fn inline(text: impl Into<Arc<str>>) -> Self {
        Self::Inline(text.into())
    }

    /// The file path, if this source is backed by one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path.as_path()),
            Self::Inline(_) => None,
        }
    }

    /// Short human-readable label used in logs.
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Inline(_) => "<inline>".to_string(),
        }
    }
}
