//! Process-wide access to the bundled specification.

use std::sync::{Arc, OnceLock};

use serde_json::Value;

use crate::accessor::SpecAccessor;
use crate::config::SpecSource;
use crate::error::SpecError;
use crate::model::{Document, OperationRef, SpecSummary};

static ACCESSOR: OnceLock<SpecAccessor> = OnceLock::new();

/// Static accessors for the XStr.me API specification bundled with this crate.
///
/// `ApiSpec` has no values; every function is an associated function over one
/// shared, lazily populated cache. The source is [`SpecSource::from_env`], so
/// `XSTR_API_SPEC_PATH` (read once, on first use) can point it elsewhere.
///
/// ```
/// use xstr_api_spec::ApiSpec;
///
/// assert!(ApiSpec::raw_text()?.contains("title: XStr.me API"));
/// # #[cfg(feature = "yaml")]
/// assert_eq!(ApiSpec::title()?, "XStr.me API");
/// # Ok::<(), xstr_api_spec::SpecError>(())
/// ```
///
/// It cannot be constructed:
///
/// ```compile_fail
/// let spec = xstr_api_spec::ApiSpec {};
/// ```
#[derive(Debug)]
pub enum ApiSpec {}

impl ApiSpec {
    /// The shared accessor behind these functions.
    pub fn accessor() -> &'static SpecAccessor {
        ACCESSOR.get_or_init(|| {
            let source = SpecSource::from_env();
            tracing::debug!(source = ?source, "Initializing bundled API specification accessor");
            SpecAccessor::new(source)
        })
    }

    /// Get the API specification as a mapping (an owned copy).
    pub fn document() -> Result<Document, SpecError> {
        Self::accessor().document()
    }

    /// Get the API specification YAML exactly as bundled.
    pub fn raw_text() -> Result<Arc<str>, SpecError> {
        Self::accessor().raw_text()
    }

    /// Get the API specification as JSON; `None` for the compact form.
    pub fn document_as_json(indent: Option<usize>) -> Result<String, SpecError> {
        Self::accessor().document_as_json(indent)
    }

    /// Get the API version from `info.version`.
    pub fn version() -> Result<String, SpecError> {
        Self::accessor().version()
    }

    /// Get the API title from `info.title`.
    pub fn title() -> Result<String, SpecError> {
        Self::accessor().title()
    }

    /// Get the API description from `info.description`.
    pub fn description() -> Result<String, SpecError> {
        Self::accessor().description()
    }

    /// Get the OpenAPI version from the root `openapi` field.
    pub fn openapi_version() -> Result<String, SpecError> {
        Self::accessor().openapi_version()
    }

    /// Get the server configurations; empty when none are declared.
    pub fn servers() -> Result<Vec<Document>, SpecError> {
        Self::accessor().servers()
    }

    /// Get the API paths; empty when none are declared.
    pub fn paths() -> Result<Document, SpecError> {
        Self::accessor().paths()
    }

    /// Get the path templates, in document order.
    pub fn path_names() -> Result<Vec<String>, SpecError> {
        Self::accessor().path_names()
    }

    /// Get a single path item, e.g. `/health`.
    pub fn path_definition(path: &str) -> Result<Option<Value>, SpecError> {
        Self::accessor().path_definition(path)
    }

    /// Get every operation declared under `paths`.
    pub fn operations() -> Result<Vec<OperationRef>, SpecError> {
        Self::accessor().operations()
    }

    /// Get `components.schemas`; empty when none are declared.
    pub fn schemas() -> Result<Document, SpecError> {
        Self::accessor().schemas()
    }

    /// Get a single schema definition by name.
    pub fn schema(name: &str) -> Result<Option<Value>, SpecError> {
        Self::accessor().schema(name)
    }

    /// Get an overview of the specification for reports.
    pub fn summary() -> Result<SpecSummary, SpecError> {
        Self::accessor().summary()
    }

    /// Check if the API specification file is available.
    pub fn is_available() -> bool {
        Self::accessor().is_available()
    }

    /// Clear the internal cache.
    ///
    /// Useful in tests, or when the file may have changed while the process runs.
    pub fn reset_cache() {
        Self::accessor().reset_cache()
    }
}
