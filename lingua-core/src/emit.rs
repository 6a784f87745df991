//! Stable YAML emitter for locale documents.
//!
//! serde_yaml quotes string scalars only when it has to, so a translation
//! changing from `Hello` to `Hello: world` would flip the quoting style and
//! pollute review diffs. This emitter always double-quotes string scalars,
//! never wraps long lines, and preserves mapping insertion order. Parsing
//! stays on serde_yaml; only output goes through here.

use serde_yaml::{Mapping, Value};

const INDENT: &str = "  ";

/// Serialize a document with forced double-quoted string scalars.
///
/// The output round-trips through `serde_yaml::from_str` to a structurally
/// equal tree.
pub fn to_yaml_string(doc: &Value) -> String {
    let mut out = String::new();
    match doc {
        Value::Mapping(map) if map.is_empty() => out.push_str("{}\n"),
        Value::Mapping(map) => emit_mapping(map, 0, &mut out),
        other => {
            out.push_str(&emit_scalar(other));
            out.push('\n');
        }
    }
    out
}

fn emit_mapping(map: &Mapping, depth: usize, out: &mut String) {
    for (key, value) in map {
        push_indent(depth, out);
        match key {
            Value::String(s) => out.push_str(&emit_key(s)),
            other => out.push_str(&emit_scalar(other)),
        }
        match value {
            Value::Mapping(child) if child.is_empty() => out.push_str(": {}\n"),
            Value::Mapping(child) => {
                out.push_str(":\n");
                emit_mapping(child, depth + 1, out);
            }
            Value::Sequence(items) if items.is_empty() => out.push_str(": []\n"),
            Value::Sequence(items) => {
                out.push_str(":\n");
                emit_sequence(items, depth + 1, out);
            }
            scalar => {
                out.push_str(": ");
                out.push_str(&emit_scalar(scalar));
                out.push('\n');
            }
        }
    }
}

fn emit_sequence(items: &[Value], depth: usize, out: &mut String) {
    for item in items {
        push_indent(depth, out);
        match item {
            Value::Mapping(map) if map.is_empty() => out.push_str("- {}\n"),
            Value::Mapping(map) => {
                out.push_str("-\n");
                emit_mapping(map, depth + 1, out);
            }
            Value::Sequence(nested) if nested.is_empty() => out.push_str("- []\n"),
            Value::Sequence(nested) => {
                out.push_str("-\n");
                emit_sequence(nested, depth + 1, out);
            }
            scalar => {
                out.push_str("- ");
                out.push_str(&emit_scalar(scalar));
                out.push('\n');
            }
        }
    }
}

fn emit_scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        // Tagged values and aggregates never reach here through the mapping
        // and sequence arms above; fall back to serde_yaml's own rendering.
        other => serde_yaml::to_string(other)
            .unwrap_or_default()
            .trim_end()
            .to_string(),
    }
}

/// A mapping key is emitted bare when it cannot be misread as another scalar
/// type; anything else gets the same double-quoted treatment as values.
fn emit_key(key: &str) -> String {
    let bare_safe = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !key.chars().next().is_some_and(|c| c.is_ascii_digit())
        && !matches!(
            key.to_ascii_lowercase().as_str(),
            "true" | "false" | "null" | "yes" | "no" | "on" | "off"
        );
    if bare_safe {
        key.to_string()
    } else {
        quote(key)
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn push_indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
