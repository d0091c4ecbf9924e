//! The XStr.me API OpenAPI specification, bundled as a crate.
//!
//! Loads `api-spec.yml` once, caches the raw YAML and the parsed document,
//! and exposes typed getters for the fields applications usually need.
//! [`ApiSpec`] works over the bundled file; [`SpecAccessor`] over any source.

pub mod accessor;
pub mod bundled;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;

pub use accessor::SpecAccessor;
pub use bundled::ApiSpec;
pub use config::{SpecSource, BUNDLED_SPEC_PATH, SPEC_PATH_ENV};
pub use error::SpecError;
pub use model::{Document, OperationRef, SpecSummary};
pub use parser::{parse_document, parser_available, to_json};
