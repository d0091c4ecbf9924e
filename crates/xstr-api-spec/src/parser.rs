use serde::Serialize;
use serde_json::Value;

use crate::error::SpecError;
use crate::model::{Document, OperationRef};

/// HTTP methods we recognize in OpenAPI paths.
const HTTP_METHODS: &[&str] = &[
    "get", "post", "put", "delete", "patch", "head", "options", "trace",
];

/// Name of the library that parses the specification format.
pub(crate) const PARSER_NAME: &str = "serde_yaml";

/// Whether this build can parse YAML at all.
pub const fn parser_available() -> bool {
    cfg!(feature = "yaml")
}

/// Fail early when the crate was built without a YAML parser.
pub(crate) fn ensure_parser() -> Result<(), SpecError> {
    if parser_available() {
        Ok(())
    } else {
        Err(SpecError::MissingDependency(PARSER_NAME))
    }
}

/// Parse a specification from a YAML/JSON string.
///
/// Merge keys (`<<`) are resolved. Values JSON cannot hold, such as `.inf`
/// or `.nan`, are rejected with [`SpecError::Serialization`].
#[cfg(feature = "yaml")]
pub fn parse_document(input: &str) -> Result<Document, SpecError> {
    // Parse YAML (also handles JSON since JSON is valid YAML)
    let mut yaml: serde_yaml::Value =
        serde_yaml::from_str(input).map_err(|e| SpecError::Parse(e.to_string()))?;
    yaml.apply_merge().map_err(|e| SpecError::Parse(e.to_string()))?;

    if let Some(at) = find_non_finite(&yaml, "") {
        return Err(SpecError::Serialization(serde::ser::Error::custom(format!(
            "non-finite number at `{at}` cannot be represented in JSON"
        ))));
    }

    match serde_json::to_value(&yaml)? {
        Value::Object(map) => Ok(map),
        _ => Err(SpecError::Parse("spec root must be an object".into())),
    }
}

/// Dotted location of the first `.inf`/`.nan` in `value`, if any.
#[cfg(feature = "yaml")]
fn find_non_finite(value: &serde_yaml::Value, at: &str) -> Option<String> {
    use serde_yaml::Value as Yaml;

    match value {
        Yaml::Number(n) if n.as_f64().is_some_and(|f| !f.is_finite()) => Some(at.to_string()),
        Yaml::Sequence(items) => items
            .iter()
            .enumerate()
            .find_map(|(i, item)| find_non_finite(item, &format!("{at}[{i}]"))),
        Yaml::Mapping(map) => map.iter().find_map(|(key, item)| {
            let key = match key.as_str() {
                Some(k) => k.to_string(),
                None => format!("{key:?}"),
            };
            let child = if at.is_empty() { key } else { format!("{at}.{key}") };
            find_non_finite(item, &child)
        }),
        Yaml::Tagged(tagged) => find_non_finite(&tagged.value, at),
        _ => None,
    }
}

/// Parse a specification from a YAML/JSON string.
#[cfg(not(feature = "yaml"))]
pub fn parse_document(_input: &str) -> Result<Document, SpecError> {
    Err(SpecError::MissingDependency(PARSER_NAME))
}

/// Serialize a document as JSON; `None` is compact, `Some(n)` indents by `n` spaces.
pub fn to_json(document: &Document, indent: Option<usize>) -> Result<String, SpecError> {
    let Some(width) = indent else {
        return Ok(serde_json::to_string(document)?);
    };

    let indent = vec![b' '; width];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    document.serialize(&mut serializer)?;

    Ok(String::from_utf8(out).expect("serde_json writes UTF-8"))
}

/// Look up a nested string field, e.g. `["info", "version"]`.
pub(crate) fn string_field(document: &Document, path: &[&str]) -> Result<String, SpecError> {
    let missing = || SpecError::FieldNotFound(path.join("."));

    let (first, rest) = path.split_first().ok_or_else(missing)?;
    let mut current = document.get(*first).ok_or_else(missing)?;
    for key in rest {
        current = current.get(*key).ok_or_else(missing)?;
    }

    current.as_str().map(str::to_string).ok_or_else(missing)
}

/// Look up a nested mapping; absent or non-mapping values yield `None`.
pub(crate) fn object_field<'a>(document: &'a Document, path: &[&str]) -> Option<&'a Document> {
    let (first, rest) = path.split_first()?;
    let mut current = document.get(*first)?;
    for key in rest {
        current = current.get(*key)?;
    }
    current.as_object()
}

/// Extract the `servers` mappings; absent or malformed entries are skipped.
pub(crate) fn servers(document: &Document) -> Vec<Document> {
    document
        .get("servers")
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_object().cloned())
                .collect()
        })
        .unwrap_or_default()
}

/// Collect every operation under `paths`, in document order.
pub(crate) fn operations(document: &Document) -> Vec<OperationRef> {
    let Some(paths) = object_field(document, &["paths"]) else {
        return Vec::new(); // No paths is valid (empty API)
    };

    let mut operations = Vec::new();
    for (path, path_item) in paths {
        let Some(path_obj) = path_item.as_object() else {
            continue;
        };

        for (method, op_value) in path_obj {
            if !HTTP_METHODS.contains(&method.as_str()) {
                continue;
            }
            let op_obj = op_value.as_object();
            let text = |key: &str| {
                op_obj
                    .and_then(|o| o.get(key))
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string())
            };

            operations.push(OperationRef {
                path: path.clone(),
                method: method.to_uppercase(),
                operation_id: text("operationId"),
                summary: text("summary"),
            });
        }
    }

    operations
}
