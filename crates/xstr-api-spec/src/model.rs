use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The parsed specification: a JSON-like mapping in document key order.
pub type Document = Map<String, Value>;

/// A single API operation (path + method).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRef {
    /// The path template (e.g. "/health").
    pub path: String,
    /// The HTTP method (uppercase).
    pub method: String,
    /// The OpenAPI operationId, if present.
    pub operation_id: Option<String>,
    /// The operation summary, if present.
    pub summary: Option<String>,
}

/// Overview of the bundled specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecSummary {
    /// The `info.title` field.
    pub title: String,
    /// The `info.version` field.
    pub api_version: String,
    /// The root `openapi` field (e.g. "3.0.3").
    pub openapi_version: String,
    /// Every operation, in document order.
    pub operations: Vec<OperationRef>,
    /// Number of entries under `paths`.
    pub path_count: usize,
    /// Server `(url, description)` pairs.
    pub servers: Vec<(String, String)>,
    /// Names under `components.schemas`.
    pub schema_names: Vec<String>,
}

impl fmt::Display for SpecSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Version: {}", self.api_version)?;
        writeln!(f, "OpenAPI Version: {}", self.openapi_version)?;
        writeln!(f, "Paths: {} endpoint(s)", self.path_count)?;
        writeln!(f, "Servers: {} server(s)", self.servers.len())?;
        writeln!(f, "Schemas: {} schema(s)", self.schema_names.len())?;

        writeln!(f)?;
        writeln!(f, "Endpoints:")?;
        for op in &self.operations {
            writeln!(f, "  {} {}", op.method, op.path)?;
        }

        writeln!(f)?;
        writeln!(f, "Servers:")?;
        for (url, description) in &self.servers {
            writeln!(f, "  {url} - {description}")?;
        }

        writeln!(f)?;
        writeln!(f, "Schemas:")?;
        for name in &self.schema_names {
            writeln!(f, "  {name}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_renders_every_section() {
        let summary = SpecSummary {
            title: "Test API".into(),
            api_version: "2.0.0".into(),
            openapi_version: "3.0.3".into(),
            operations: vec![OperationRef {
                path: "/health".into(),
                method: "GET".into(),
                operation_id: Some("getHealth".into()),
                summary: None,
            }],
            path_count: 1,
            servers: vec![("https://api.example.com".into(), "Production".into())],
            schema_names: vec!["HealthResponse".into()],
        };

        let out = summary.to_string();
        assert!(out.contains("Title: Test API"));
        assert!(out.contains("Paths: 1 endpoint(s)"));
        assert!(out.contains("  GET /health"));
        assert!(out.contains("  https://api.example.com - Production"));
        assert!(out.contains("  HealthResponse"));
    }
}
