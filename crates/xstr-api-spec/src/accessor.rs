//! Cached accessor over a single specification source.
//!
//! The raw text and the parsed document live in two cache slots behind one
//! lock. The document is always parsed from the text held in the raw slot,
//! so both slots describe the same read until [`SpecAccessor::reset_cache`].

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::config::SpecSource;
use crate::error::SpecError;
use crate::model::{Document, OperationRef, SpecSummary};
use crate::parser;

#[derive(Default)]
struct Cache {
    raw: Option<Arc<str>>,
    document: Option<Arc<Document>>,
}

/// Typed, cached access to an OpenAPI specification.
pub struct SpecAccessor {
    source: SpecSource,
    cache: Mutex<Cache>,
}

impl std::fmt::Debug for SpecAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cache = self.cache.lock();
        f.debug_struct("SpecAccessor")
            .field("source", &self.source.describe())
            .field("raw_cached", &cache.raw.is_some())
            .field("document_cached", &cache.document.is_some())
            .finish()
    }
}

impl Default for SpecAccessor {
    fn default() -> Self {
        Self::bundled()
    }
}

impl SpecAccessor {
    /// Create an accessor over `source` with empty caches.
    pub fn new(source: SpecSource) -> Self {
        Self {
            source,
            cache: Mutex::new(Cache::default()),
        }
    }

    /// Accessor over the `api-spec.yml` shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(SpecSource::bundled())
    }

    /// Accessor over a specification file at `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(SpecSource::file(path))
    }

    /// Accessor over in-memory YAML/JSON text.
    pub fn from_text(text: impl Into<Arc<str>>) -> Self {
        Self::new(SpecSource::inline(text))
    }

    /// Where this accessor reads from.
    pub fn source(&self) -> &SpecSource {
        &self.source
    }

    /// Get the full parsed specification.
    ///
    /// Returns an owned copy; mutating it never affects later calls.
    pub fn document(&self) -> Result<Document, SpecError> {
        Ok(self.shared_document()?.as_ref().clone())
    }

    /// Get the raw specification text, verbatim.
    ///
    /// Within one cache epoch every call returns the same allocation.
    pub fn raw_text(&self) -> Result<Arc<str>, SpecError> {
        let mut cache = self.cache.lock();
        self.raw_locked(&mut cache)
    }

    /// Get the specification re-serialized as JSON.
    ///
    /// `None` gives the compact form, `Some(n)` indents nested values by `n` spaces.
    pub fn document_as_json(&self, indent: Option<usize>) -> Result<String, SpecError> {
        let document = self.shared_document()?;
        parser::to_json(&document, indent)
    }

    /// `info.version`.
    pub fn version(&self) -> Result<String, SpecError> {
        let document = self.shared_document()?;
        parser::string_field(&document, &["info", "version"])
    }

    /// `info.title`.
    pub fn title(&self) -> Result<String, SpecError> {
        let document = self.shared_document()?;
        parser::string_field(&document, &["info", "title"])
    }

    /// `info.description`.
    pub fn description(&self) -> Result<String, SpecError> {
        let document = self.shared_document()?;
        parser::string_field(&document, &["info", "description"])
    }

    /// The root `openapi` version string (e.g. "3.0.3").
    pub fn openapi_version(&self) -> Result<String, SpecError> {
        let document = self.shared_document()?;
        parser::string_field(&document, &["openapi"])
    }

    /// Server entries that are mappings; empty when the document defines none.
    pub fn servers(&self) -> Result<Vec<Document>, SpecError> {
        let document = self.shared_document()?;
        Ok(parser::servers(&document))
    }

    /// The `paths` mapping; empty when the document defines none.
    pub fn paths(&self) -> Result<Document, SpecError> {
        let document = self.shared_document()?;
        Ok(parser::object_field(&document, &["paths"])
            .cloned()
            .unwrap_or_default())
    }

    /// Path templates under `paths`, in document order.
    pub fn path_names(&self) -> Result<Vec<String>, SpecError> {
        let document = self.shared_document()?;
        Ok(parser::object_field(&document, &["paths"])
            .map(|paths| paths.keys().cloned().collect())
            .unwrap_or_default())
    }

    /// A single path item, e.g. `/health`.
    pub fn path_definition(&self, path: &str) -> Result<Option<Value>, SpecError> {
        let document = self.shared_document()?;
        Ok(parser::object_field(&document, &["paths"]).and_then(|paths| paths.get(path).cloned()))
    }

    /// Every operation declared under `paths`.
    pub fn operations(&self) -> Result<Vec<OperationRef>, SpecError> {
        let document = self.shared_document()?;
        Ok(parser::operations(&document))
    }

    /// `components.schemas`; empty when absent.
    pub fn schemas(&self) -> Result<Document, SpecError> {
        let document = self.shared_document()?;
        Ok(parser::object_field(&document, &["components", "schemas"])
            .cloned()
            .unwrap_or_default())
    }

    /// A single schema under `components.schemas`.
    pub fn schema(&self, name: &str) -> Result<Option<Value>, SpecError> {
        let document = self.shared_document()?;
        Ok(parser::object_field(&document, &["components", "schemas"])
            .and_then(|schemas| schemas.get(name).cloned()))
    }

    /// Overview of the document; requires `info.title`, `info.version` and `openapi`.
    pub fn summary(&self) -> Result<SpecSummary, SpecError> {
        let document = self.shared_document()?;

        let servers = parser::servers(&document)
            .iter()
            .map(|server| {
                let field = |key: &str| {
                    server
                        .get(key)
                        .and_then(|v| v.as_str())
                        .unwrap_or_default()
                        .to_string()
                };
                (field("url"), field("description"))
            })
            .collect();

        Ok(SpecSummary {
            title: parser::string_field(&document, &["info", "title"])?,
            api_version: parser::string_field(&document, &["info", "version"])?,
            openapi_version: parser::string_field(&document, &["openapi"])?,
            operations: parser::operations(&document),
            path_count: parser::object_field(&document, &["paths"]).map_or(0, |p| p.len()),
            servers,
            schema_names: parser::object_field(&document, &["components", "schemas"])
                .map(|schemas| schemas.keys().cloned().collect())
                .unwrap_or_default(),
        })
    }

    /// Whether the source can be read. Never touches the cache.
    pub fn is_available(&self) -> bool {
        match &self.source {
            SpecSource::File(path) => std::fs::File::open(path)
                .and_then(|file| file.metadata())
                .map(|meta| meta.is_file())
                .unwrap_or(false),
            SpecSource::Inline(_) => true,
        }
    }

    /// Empty both cache slots; the next access reads the source again.
    pub fn reset_cache(&self) {
        let mut cache = self.cache.lock();
        let had_entries = cache.raw.is_some() || cache.document.is_some();
        *cache = Cache::default();
        tracing::debug!(
            source = %self.source.describe(),
            had_entries,
            "API specification cache cleared"
        );
    }

    /// The cached document, parsing it on a cold cache.
    fn shared_document(&self) -> Result<Arc<Document>, SpecError> {
        let mut cache = self.cache.lock();
        if let Some(document) = &cache.document {
            return Ok(Arc::clone(document));
        }

        parser::ensure_parser()?;
        let raw = self.raw_locked(&mut cache)?;
        let document = parser::parse_document(&raw).map_err(|e| {
            tracing::warn!(
                source = %self.source.describe(),
                error = %e,
                "Failed to parse API specification"
            );
            e
        })?;

        tracing::debug!(
            source = %self.source.describe(),
            top_level_keys = document.len(),
            "API specification parsed"
        );

        let document = Arc::new(document);
        cache.document = Some(Arc::clone(&document));
        Ok(document)
    }

    /// The cached raw text, reading the source on a cold cache.
    fn raw_locked(&self, cache: &mut Cache) -> Result<Arc<str>, SpecError> {
        if let Some(raw) = &cache.raw {
            return Ok(Arc::clone(raw));
        }

        let raw: Arc<str> = match &self.source {
            SpecSource::File(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    let err = SpecError::io(path, e);
                    tracing::warn!(path = %path.display(), error = %err, "Failed to read API specification");
                    err
                })?;
                Arc::from(content)
            }
            // A fresh allocation per epoch, like a file read.
            SpecSource::Inline(text) => Arc::from(&**text),
        };

        tracing::debug!(
            source = %self.source.describe(),
            bytes = raw.len(),
            "API specification loaded"
        );

        cache.raw = Some(Arc::clone(&raw));
        Ok(raw)
    }
}
