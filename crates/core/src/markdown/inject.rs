//! `!{path}` placeholder substitution from front matter values.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::{Mapping, Value};

use crate::frontmatter::Frontmatter;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\{([^{}\n]+)\}").unwrap());

/// Flatten nested mappings into `parent:child` keys.
///
/// Sequences and scalars are leaves and are never descended into.
pub fn flatten(metadata: &Mapping) -> HashMap<String, Value> {
    let mut plane = HashMap::new();
    flatten_into(metadata, "", &mut plane);
    plane
}

fn flatten_into(mapping: &Mapping, prefix: &str, plane: &mut HashMap<String, Value>) {
    for (key, value) in mapping {
        let Some(key) = key_string(key) else {
            continue;
        };
        let path = if prefix.is_empty() { key } else { format!("{prefix}:{key}") };
        match value {
            Value::Mapping(nested) => flatten_into(nested, &path, plane),
            other => {
                plane.insert(path, other.clone());
            }
        }
    }
}

fn key_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Replace `!{path}` tokens in `body` with front matter values.
///
/// `path` uses `:` between nesting levels (`!{date:published}`); a dotted
/// path (`!{date.published}`) resolves the same way. Tokens whose value is
/// missing, empty, `false`, `null`, a sequence or a mapping are left as
/// written.
pub fn inject(body: &str, metadata: &Frontmatter) -> String {
    if !body.contains("!{") {
        return body.to_string();
    }

    let plane = flatten(&metadata.fields);
    PLACEHOLDER_RE
        .replace_all(body, |caps: &regex::Captures<'_>| {
            let path = caps[1].trim();
            plane
                .get(path)
                .or_else(|| plane.get(&path.replace('.', ":")))
                .and_then(render_value)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
