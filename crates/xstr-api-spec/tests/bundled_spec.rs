//! Checks against the `api-spec.yml` shipped with the crate, through the
//! process-wide `ApiSpec` functions.
#![cfg(feature = "yaml")]

use std::sync::Arc;

use serde_json::Value;
use xstr_api_spec::{ApiSpec, Document, SpecAccessor};

#[test]
fn document_is_openapi_3_0_3() {
    let spec = ApiSpec::document().unwrap();
    assert!(!spec.is_empty());
    assert!(spec.contains_key("info"));
    assert!(spec.contains_key("paths"));
    assert_eq!(spec["openapi"], "3.0.3");
}

#[test]
fn document_mutation_does_not_leak() {
    let mut spec = ApiSpec::document().unwrap();
    spec.insert("test_key".into(), Value::from("test_value"));
    spec["info"]["title"] = Value::from("Changed");
    spec.remove("paths");

    let again = ApiSpec::document().unwrap();
    assert!(!again.contains_key("test_key"));
    assert_eq!(again["info"]["title"], "XStr.me API");
    assert!(again.contains_key("paths"));
}

#[test]
fn raw_text_is_the_yaml_file() {
    let yaml = ApiSpec::raw_text().unwrap();
    assert!(yaml.contains("openapi: 3.0.3"));
    assert!(yaml.contains("title: XStr.me API"));

    let on_disk = std::fs::read_to_string(xstr_api_spec::BUNDLED_SPEC_PATH).unwrap();
    assert_eq!(&*yaml, on_disk.as_str());
}

#[test]
fn json_forms_parse_back_to_the_document() {
    let document = ApiSpec::document().unwrap();

    let compact = ApiSpec::document_as_json(None).unwrap();
    let pretty = ApiSpec::document_as_json(Some(2)).unwrap();

    let from_compact: Document = serde_json::from_str(&compact).unwrap();
    let from_pretty: Document = serde_json::from_str(&pretty).unwrap();
    assert_eq!(from_compact, document);
    assert_eq!(from_pretty, document);

    assert!(pretty.len() > compact.len());
    assert!(pretty.contains("\n  \""));
    assert!(!compact.contains('\n'));
}

#[test]
fn json_keeps_document_key_order() {
    let compact = ApiSpec::document_as_json(None).unwrap();
    assert!(compact.starts_with(r#"{"openapi":"3.0.3","info":{"title":"XStr.me API""#));
}

#[test]
fn info_fields() {
    assert_eq!(ApiSpec::version().unwrap(), "1.0.0");
    assert_eq!(ApiSpec::title().unwrap(), "XStr.me API");
    assert_eq!(ApiSpec::openapi_version().unwrap(), "3.0.3");

    let description = ApiSpec::description().unwrap();
    assert!(!description.is_empty());
    assert!(description.contains("XStr.me"));
}

#[test]
fn servers_have_url_and_description() {
    let servers = ApiSpec::servers().unwrap();
    assert!(!servers.is_empty());
    for server in &servers {
        assert!(server.contains_key("url"));
        assert!(server.contains_key("description"));
    }
}

#[test]
fn paths_include_health_and_version() {
    let paths = ApiSpec::paths().unwrap();
    assert!(!paths.is_empty());
    assert!(paths.contains_key("/health"));

    assert_eq!(ApiSpec::path_names().unwrap(), ["/health", "/version"]);

    let health = ApiSpec::path_definition("/health").unwrap().unwrap();
    assert!(health.get("get").is_some());
    assert_eq!(ApiSpec::path_definition("/missing").unwrap(), None);
}

#[test]
fn operations_are_listed() {
    let ops = ApiSpec::operations().unwrap();
    let health = ops.iter().find(|op| op.path == "/health").unwrap();
    assert_eq!(health.method, "GET");
    assert_eq!(health.operation_id.as_deref(), Some("getHealth"));
    assert!(ops
        .iter()
        .any(|op| op.operation_id.as_deref() == Some("getVersion")));
}

#[test]
fn schemas_are_listed() {
    let schemas = ApiSpec::schemas().unwrap();
    for name in ["HealthResponse", "VersionResponse", "ErrorResponse"] {
        assert!(schemas.contains_key(name), "missing schema {name}");
    }

    let health = ApiSpec::schema("HealthResponse").unwrap().unwrap();
    assert_eq!(health["type"], "object");
    assert_eq!(ApiSpec::schema("Nope").unwrap(), None);
}

#[test]
fn summary_describes_the_bundle() {
    let summary = ApiSpec::summary().unwrap();
    assert_eq!(summary.title, "XStr.me API");
    assert_eq!(summary.api_version, "1.0.0");
    assert_eq!(summary.path_count, 2);
    assert_eq!(summary.schema_names.len(), 3);

    let report = summary.to_string();
    assert!(report.contains("OpenAPI Version: 3.0.3"));
    assert!(report.contains("GET /health"));
}

#[test]
fn bundled_file_is_available() {
    assert!(ApiSpec::is_available());
}

#[test]
fn reset_rereads_raw_text() {
    // A private accessor over the same file, so other tests sharing the
    // global cache cannot refill it between the reset and the next read.
    let accessor = SpecAccessor::bundled();

    let first = accessor.raw_text().unwrap();
    let cached = accessor.raw_text().unwrap();
    assert!(Arc::ptr_eq(&first, &cached));

    accessor.reset_cache();
    let reread = accessor.raw_text().unwrap();
    assert_eq!(first, reread);
    assert!(!Arc::ptr_eq(&first, &reread));
}

#[test]
fn global_reset_keeps_values_stable() {
    let before = ApiSpec::document().unwrap();
    ApiSpec::reset_cache();
    ApiSpec::reset_cache();
    assert_eq!(ApiSpec::document().unwrap(), before);
}
