//! Table of contents inferred from `##`–`####` headings.
//!
//! Headings are matched line by line, so the builder never needs a full
//! markdown parse. How levels nest depends on which levels appear in the
//! document at all:
//!
//! - only one level used: every heading is top-level;
//! - `##` used: `##` is top-level, `###` nests under it and `####` nests
//!   under the most recent `###`;
//! - no `##`: `###` is top-level and `####` nests under it.
//!
//! Headings that have no node to attach to are dropped.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{2,4}) (.+)").unwrap());
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]*\)").unwrap());
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static HYPHENS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").unwrap());

/// Whitespace and ASCII punctuation, except `-` and `_`.
static SEPARATORS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r##"[\s!"#$%&'()*+,./:;<=>?@\[\\\]^`{|}~]+"##).unwrap());

/// One entry of the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocNode {
    /// URL-safe anchor derived from the title.
    pub id: String,
    /// Heading text without link or inline-code syntax.
    pub title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<TocNode>,
}

impl TocNode {
    /// Front matter representation: `{ id, title, sections? }`.
    pub fn to_value(&self) -> Value {
        let mut node = Mapping::new();
        node.insert(Value::from("id"), Value::from(self.id.as_str()));
        node.insert(Value::from("title"), Value::from(self.title.as_str()));
        if !self.sections.is_empty() {
            node.insert(Value::from("sections"), to_value(&self.sections));
        }
        Value::Mapping(node)
    }
}

/// Front matter representation of a whole table.
pub fn to_value(table: &[TocNode]) -> Value {
    Value::Sequence(table.iter().map(TocNode::to_value).collect())
}

/// Builds heading anchors.
#[derive(Debug, Clone)]
pub struct Slugger {
    separators: Regex,
}

impl Default for Slugger {
    fn default() -> Self {
        Self { separators: SEPARATORS_RE.clone() }
    }
}

impl Slugger {
    /// Use a custom character class; every run of matches becomes one `-`.
    pub fn new(separators: &str) -> Result<Self, regex::Error> {
        Ok(Self { separators: Regex::new(separators)? })
    }

    pub fn slug(&self, title: &str) -> String {
        let lower = title.to_lowercase();
        let replaced = self.separators.replace_all(&lower, "-");
        let collapsed = HYPHENS_RE.replace_all(&replaced, "-");
        collapsed.trim_matches('-').to_string()
    }
}

/// Build the table of contents with the default [`Slugger`].
pub fn table(body: &str) -> Vec<TocNode> {
    table_with(body, &Slugger::default())
}

pub fn table_with(body: &str, slugger: &Slugger) -> Vec<TocNode> {
    let headings: Vec<(usize, &str)> = body
        .lines()
        .filter_map(|line| {
            let caps = HEADING_RE.captures(line.trim())?;
            Some((caps.get(1)?.as_str().len(), caps.get(2)?.as_str()))
        })
        .collect();

    let mut counts = [0usize; 3];
    for (level, _) in &headings {
        counts[level - 2] += 1;
    }
    let alone = counts.iter().filter(|&&c| c > 0).count() == 1;
    let has_h2 = counts[0] > 0;

    let mut table: Vec<TocNode> = Vec::new();
    for (level, raw) in headings {
        let title = clean_title(raw);
        let node = TocNode { id: slugger.slug(&title), title, sections: Vec::new() };

        if alone || level == 2 || (!has_h2 && level == 3) {
            table.push(node);
            continue;
        }

        let Some(parent) = table.last_mut() else {
            continue;
        };
        if level == 3 || (!has_h2 && level == 4) {
            parent.sections.push(node);
        } else if let Some(section) = parent.sections.last_mut() {
            section.sections.push(node);
        }
    }
    table
}

/// Strip `[text](url)` links down to their text and drop inline-code ticks.
pub fn clean_title(raw: &str) -> String {
    let title = LINK_RE.replace_all(raw.trim_end(), "$1");
    CODE_RE.replace_all(&title, "$1").into_owned()
}
