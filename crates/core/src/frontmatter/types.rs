//! Frontmatter types and data structures.

use std::time::SystemTime;

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// Parsed front matter of a content file.
///
/// Keys keep the order in which they first appeared in the header. Values are
/// restricted to null, booleans, strings, sequences and nested mappings by the
/// parser; derived fields such as `read_time` may add numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Frontmatter {
    /// Fields as key-value pairs.
    #[serde(flatten)]
    pub fields: Mapping,
}

/// Result of splitting front matter from markdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    /// Parsed frontmatter (if a complete header was present).
    pub frontmatter: Option<Frontmatter>,
    /// The markdown body (everything after frontmatter).
    pub body: String,
}

/// Borrowed view of a document's `date` field, used for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRef<'a> {
    /// `date: 2024-01-15` style canonical date string.
    Canonical(&'a str),
    /// `date:` mapping with optional `updated` / `published` stamps.
    Stamps { updated: Option<&'a str>, published: Option<&'a str> },
}

impl Frontmatter {
    pub fn new(fields: Mapping) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.fields.get_mut(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Insert or replace a top-level field.
    pub fn insert(&mut self, key: &str, value: Value) -> Option<Value> {
        self.fields.insert(Value::from(key), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Deep-merge `other` into `self`.
    ///
    /// Mappings present on both sides are merged key by key; any other value
    /// from `other` replaces the existing one.
    pub fn merge(&mut self, other: Frontmatter) {
        super::construct::deep_merge(&mut self.fields, other.fields);
    }

    /// The `date` field, if it is a string or a mapping.
    pub fn date_ref(&self) -> Option<DateRef<'_>> {
        match self.get("date")? {
            Value::String(date) => Some(DateRef::Canonical(date)),
            Value::Mapping(stamps) => Some(DateRef::Stamps {
                updated: stamp(stamps, "updated"),
                published: stamp(stamps, "published"),
            }),
            _ => None,
        }
    }

    /// Default `date.updated` to `date.published` when it is unset.
    pub fn backfill_updated(&mut self) {
        let Some(Value::Mapping(date)) = self.get_mut("date") else {
            return;
        };
        if date.get("updated").is_some_and(is_truthy) {
            return;
        }
        if let Some(published) = date.get("published").filter(|v| is_truthy(v)).cloned() {
            date.insert(Value::from("updated"), published);
        }
    }

    /// Record file timestamps under `date.created` / `date.modified`.
    ///
    /// Skipped when `date` is a plain string. Values already written in the
    /// header are kept.
    pub fn stamp_file_times(
        &mut self,
        created: Option<SystemTime>,
        modified: Option<SystemTime>,
    ) {
        if created.is_none() && modified.is_none() {
            return;
        }

        match self.get("date") {
            Some(Value::Mapping(_)) => {}
            Some(Value::Null) | None => {
                self.insert("date", Value::Mapping(Mapping::new()));
            }
            Some(_) => return,
        }
        let Some(Value::Mapping(date)) = self.get_mut("date") else {
            return;
        };

        for (key, time) in [("created", created), ("modified", modified)] {
            if let Some(time) = time
                && !date.contains_key(key)
            {
                let stamp = DateTime::<Local>::from(time).to_rfc3339();
                date.insert(Value::from(key), Value::String(stamp));
            }
        }
    }
}

impl From<Mapping> for Frontmatter {
    fn from(fields: Mapping) -> Self {
        Self { fields }
    }
}

fn stamp<'a>(stamps: &'a Mapping, key: &str) -> Option<&'a str> {
    stamps.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Whether a value counts as "set": not null, not `false`, not an empty string
/// and not an empty collection.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Number(_) | Value::Tagged(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    fn fm(yaml: &str) -> Frontmatter {
        crate::frontmatter::Frontmatter::parse(yaml)
    }

    #[test]
    fn date_ref_reads_canonical_string() {
        let fm = fm("date: 2024-01-15");
        assert_eq!(fm.date_ref(), Some(DateRef::Canonical("2024-01-15")));
    }

    #[test]
    fn date_ref_reads_stamps() {
        let fm = fm("date:\n  published: 2024-01-15\n");
        assert_eq!(
            fm.date_ref(),
            Some(DateRef::Stamps { updated: None, published: Some("2024-01-15") })
        );
    }

    #[test]
    fn backfill_copies_published_into_updated() {
        let mut fm = fm("date:\n  published: 2024-01-15\n");
        fm.backfill_updated();
        assert_eq!(
            fm.date_ref(),
            Some(DateRef::Stamps {
                updated: Some("2024-01-15"),
                published: Some("2024-01-15")
            })
        );
    }

    #[test]
    fn backfill_keeps_existing_updated() {
        let mut fm = fm("date:\n  published: 2024-01-15\n  updated: 2024-03-01\n");
        fm.backfill_updated();
        assert_eq!(
            fm.date_ref(),
            Some(DateRef::Stamps {
                updated: Some("2024-03-01"),
                published: Some("2024-01-15")
            })
        );
    }

    #[test]
    fn stamp_file_times_creates_date_mapping() {
        let mut fm = fm("title: Hello");
        let t = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        fm.stamp_file_times(Some(t), Some(t));

        let date = fm.get("date").and_then(Value::as_mapping).unwrap();
        assert!(date.get("created").and_then(Value::as_str).is_some());
        assert!(date.get("modified").and_then(Value::as_str).is_some());
    }

    #[test]
    fn stamp_file_times_skips_string_dates() {
        let mut fm = fm("date: 2024-01-15");
        fm.stamp_file_times(Some(UNIX_EPOCH), None);
        assert_eq!(fm.get_str("date"), Some("2024-01-15"));
    }

    #[test]
    fn stamp_file_times_keeps_header_values() {
        let mut fm = fm("date:\n  created: yesterday\n");
        fm.stamp_file_times(Some(UNIX_EPOCH), None);
        let date = fm.get("date").and_then(Value::as_mapping).unwrap();
        assert_eq!(date.get("created").and_then(Value::as_str), Some("yesterday"));
    }

    #[test]
    fn truthiness() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&Value::Bool(false)));
        assert!(!is_truthy(&Value::from("")));
        assert!(is_truthy(&Value::from("x")));
        assert!(is_truthy(&Value::Bool(true)));
    }
}
