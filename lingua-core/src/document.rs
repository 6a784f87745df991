//! Document model — nested YAML string trees addressed by dotted paths.
//!
//! A document is a `serde_yaml::Value` tree whose internal nodes are mappings
//! and whose translatable leaves are strings. [`flatten`] projects the string
//! leaves into a [`FlatMap`] keyed by dot-joined paths; [`unflatten`] is its
//! inverse for string-and-mapping-only trees. Non-string leaves (numbers,
//! booleans, arrays, null) are opaque: never traversed, never flattened.

use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::error::DocumentError;

/// Flat view of a document: dot-joined leaf path → string value.
pub type FlatMap = BTreeMap<String, String>;

/// Parse a document from YAML text.
///
/// Empty or whitespace-only input yields an empty mapping rather than
/// `null`, so callers can treat "no file yet" and "empty file" alike.
pub fn parse_document(contents: &str, path: &Path) -> Result<Value, DocumentError> {
    if contents.trim().is_empty() {
        return Ok(Value::Mapping(Mapping::new()));
    }
    serde_yaml::from_str(contents).map_err(|e| DocumentError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// An empty document.
pub fn empty_document() -> Value {
    Value::Mapping(Mapping::new())
}

/// Flatten every string leaf of `doc` into a dotted-path map.
pub fn flatten(doc: &Value) -> FlatMap {
    let mut out = FlatMap::new();
    if let Value::Mapping(map) = doc {
        flatten_into("", map, &mut out);
    }
    out
}

fn flatten_into(prefix: &str, map: &Mapping, out: &mut FlatMap) {
    for (key, value) in map {
        let Some(key) = key.as_str() else { continue };
        let path = join_path(prefix, key);
        match value {
            Value::String(s) => {
                out.insert(path, s.clone());
            }
            Value::Mapping(child) => flatten_into(&path, child, out),
            // Numbers, booleans, sequences, null: opaque leaves.
            _ => {}
        }
    }
}

/// Collect opaque (non-string, non-mapping) leaves with their dotted paths.
///
/// Used to mirror passthrough values into a target document that lacks them.
pub fn opaque_leaves(doc: &Value) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    if let Value::Mapping(map) = doc {
        opaque_into("", map, &mut out);
    }
    out
}

fn opaque_into(prefix: &str, map: &Mapping, out: &mut Vec<(String, Value)>) {
    for (key, value) in map {
        let Some(key) = key.as_str() else { continue };
        let path = join_path(prefix, key);
        match value {
            Value::String(_) => {}
            Value::Mapping(child) => opaque_into(&path, child, out),
            other => out.push((path, other.clone())),
        }
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Rebuild a nested document from a flat map.
///
/// Splits each path on `.` and materializes intermediate mappings. Last write
/// wins: a scalar found at an intermediate segment is coerced into a mapping.
pub fn unflatten(flat: &FlatMap) -> Value {
    let mut doc = empty_document();
    for (path, value) in flat {
        set_path(&mut doc, path, Value::String(value.clone()));
    }
    doc
}

/// Look up the value at a dotted path, if any.
pub fn get_path<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = doc;
    for segment in path.split('.') {
        if !current.is_mapping() {
            return None;
        }
        current = current.get(segment)?;
    }
    Some(current)
}

/// Set the value at a dotted path, creating intermediate mappings.
///
/// Any non-mapping value found at an intermediate segment is replaced by a
/// mapping (structural conflicts resolve by coercion, last write wins).
pub fn set_path(doc: &mut Value, path: &str, value: Value) {
    if !matches!(doc, Value::Mapping(_)) {
        *doc = empty_document();
    }
    if let Value::Mapping(map) = doc {
        match path.split_once('.') {
            None => {
                map.insert(Value::String(path.to_string()), value);
            }
            Some((head, rest)) => {
                let child = map
                    .entry(Value::String(head.to_string()))
                    .or_insert_with(empty_document);
                set_path(child, rest, value);
            }
        }
    }
}
