//! Recursive-descent parser for the front matter header.
//!
//! The accepted language is a small, indentation-sensitive subset of YAML:
//! column-0 `key:` entries, nested mappings, block sequences (`- item`), flow
//! sequences (`[a, b]`), block scalars (`|`) and plain or quoted scalars.
//! Only `true`, `false` and `null` are coerced; everything else, numbers and
//! dates included, stays a string.
//!
//! Parsing never fails. Input that does not fit any structure degrades to a
//! string.

use serde_yaml::{Mapping, Value};

use super::types::Frontmatter;

/// Characters whose presence means a block may have structure.
const STRUCTURAL: &[char] = &[':', '-', '[', ']', '|', '#'];

impl Frontmatter {
    /// Parse header text (the lines between the delimiters).
    ///
    /// A header that does not describe a mapping yields empty front matter.
    pub fn parse(raw: &str) -> Self {
        match construct(raw) {
            Value::Mapping(fields) => Self { fields },
            other => {
                if !raw.trim().is_empty() {
                    tracing::debug!(value = ?other, "front matter is not a mapping, ignoring");
                }
                Self::default()
            }
        }
    }
}

/// Build a value tree from a block of header text.
///
/// Returns a mapping when the block holds column-0 `key:` entries, otherwise
/// a sequence or a scalar.
pub fn construct(raw: &str) -> Value {
    let indent = indentation(raw);
    if !raw.contains(STRUCTURAL) {
        return if indent > 1 { Value::String(dedent(raw)) } else { coerce(raw) };
    }

    let raw = if indent <= 1 { raw.trim_start() } else { raw };
    if let Some(inner) = unquote(raw.trim()) {
        return Value::String(inner.to_string());
    }

    let entries = scan_entries(raw);
    if !entries.is_empty() {
        let mut mapping = Mapping::new();
        for (key, value) in entries {
            merge_entry(&mut mapping, Value::from(key), construct_value(value));
        }
        return Value::Mapping(mapping);
    }

    if raw.trim_start().starts_with('|') {
        return block_scalar(raw.trim());
    }

    let cleaned = strip_comments(raw);
    let cleaned = cleaned.trim();
    match cleaned.chars().next() {
        // items strip their own comments, so block scalars inside them keep `#`
        Some('-') => block_sequence(raw.trim()),
        Some('[') => flow_sequence(cleaned),
        Some('|') => block_scalar(cleaned),
        _ => coerce(cleaned),
    }
}

/// Parse the text that follows a `key:`.
fn construct_value(value: &str) -> Value {
    if value.trim().is_empty() {
        return Value::Mapping(Mapping::new());
    }
    if indentation(value) > 0 { construct(&dedent(value)) } else { construct(value) }
}

/// Find column-0 `key:` entries and the text belonging to each.
///
/// A value starts right after the colon (one newline directly after it is
/// skipped) and ends where the next line starting with a non-whitespace
/// character begins. Such a line that is not itself a key ends the value and
/// is otherwise ignored.
fn scan_entries(raw: &str) -> Vec<(&str, &str)> {
    let mut entries = Vec::new();
    let mut pending: Option<(&str, usize)> = None;
    let mut offset = 0;

    for line in raw.split_inclusive('\n') {
        let flush = line.chars().next().is_some_and(|c| !c.is_whitespace());
        if flush {
            if let Some((key, start)) = pending.take() {
                entries.push((key, &raw[start..offset]));
            }
            if let Some(colon) = key_end(line) {
                let mut start = offset + colon + 1;
                let rest = &raw[start..];
                if rest.starts_with("\r\n") {
                    start += 2;
                } else if rest.starts_with('\n') {
                    start += 1;
                }
                pending = Some((&line[..colon], start));
            }
        }
        offset += line.len();
    }

    if let Some((key, start)) = pending {
        entries.push((key, &raw[start.min(raw.len())..]));
    }
    entries
}

/// Byte index of the colon ending a `key:` token at the start of `line`.
///
/// The key is a run of characters that are neither colons nor whitespace,
/// and the colon must not be followed by `/` (so `https://…` is no key).
fn key_end(line: &str) -> Option<usize> {
    let colon = line.find(|c: char| c == ':' || c.is_whitespace())?;
    if colon == 0 || !line[colon..].starts_with(':') {
        return None;
    }
    if line[colon + 1..].starts_with('/') {
        return None;
    }
    Some(colon)
}

/// Insert `value` under `key`, deep-merging mappings.
///
/// An empty mapping never replaces an existing value.
fn merge_entry(mapping: &mut Mapping, key: Value, value: Value) {
    if let Value::Mapping(incoming) = value {
        if let Some(existing) = mapping.get_mut(&key) {
            if let Value::Mapping(existing) = existing {
                deep_merge(existing, incoming);
                return;
            }
            if incoming.is_empty() {
                return;
            }
        }
        mapping.insert(key, Value::Mapping(incoming));
        return;
    }
    mapping.insert(key, value);
}

/// Merge `incoming` into `target`, recursing into mappings on both sides.
pub(crate) fn deep_merge(target: &mut Mapping, incoming: Mapping) {
    for (key, value) in incoming {
        merge_entry(target, key, value);
    }
}

/// `- item` sequences. Each item's marker is turned into indentation so that
/// continuation lines keep their position relative to the first line.
fn block_sequence(block: &str) -> Value {
    let mut items: Vec<String> = Vec::new();
    for line in block.lines() {
        if let Some(rest) = line.strip_prefix('-') {
            items.push(format!(" {rest}"));
        } else if let Some(item) = items.last_mut() {
            item.push('\n');
            item.push_str(line);
        }
    }

    let values = items
        .iter()
        .filter(|item| !item.trim().is_empty())
        .map(|item| construct(&dedent(item)))
        .collect();
    Value::Sequence(values)
}

/// `[a, b, c]` sequences; every element is coerced as a scalar.
fn flow_sequence(block: &str) -> Value {
    let inner = block.strip_prefix('[').unwrap_or(block);
    let inner = inner.strip_suffix(']').unwrap_or(inner);
    if inner.trim().is_empty() {
        return Value::Sequence(Vec::new());
    }
    Value::Sequence(inner.split(',').map(coerce).collect())
}

/// `|` block scalars: the `|` and a `-`/`+` chomping marker are dropped, text
/// left on the indicator line becomes the first line and the rest is dedented.
fn block_scalar(block: &str) -> Value {
    let Some(after) = block.strip_prefix('|') else {
        return Value::String(block.to_string());
    };
    let (indicator, rest) = after.split_once('\n').unwrap_or((after, ""));
    let inline = indicator.trim_start_matches(['-', '+']).trim();
    let rest = dedent(rest);
    let rest = rest.trim_end();

    let text = match (inline.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_string(),
        (false, true) => inline.to_string(),
        (false, false) => format!("{inline}\n{rest}"),
    };
    Value::String(text)
}

/// Turn a scalar token into a value.
///
/// `true`, `false` and `null` become typed values; quoted tokens lose their
/// quotes; anything else is kept as a trimmed string.
pub fn coerce(token: &str) -> Value {
    let token = token.trim();
    match token {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => Value::String(unquote(token).unwrap_or(token).to_string()),
    }
}

/// Inner text of a single-line `"…"` or `'…'` token.
fn unquote(token: &str) -> Option<&str> {
    if token.len() < 2 || token.contains('\n') {
        return None;
    }
    ['"', '\''].into_iter().find_map(|quote| token.strip_prefix(quote)?.strip_suffix(quote))
}

/// Drop `#` comments through to the end of each line.
fn strip_comments(block: &str) -> String {
    block
        .lines()
        .map(|line| line.find('#').map_or(line, |hash| &line[..hash]))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Number of leading whitespace characters, line breaks included.
fn indentation(text: &str) -> usize {
    text.chars().take_while(|c| c.is_whitespace()).count()
}

/// Remove the indentation shared by all non-blank lines.
fn dedent(text: &str) -> String {
    let lines: Vec<&str> =
        text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line)).collect();

    let common = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.chars().take_while(|c| *c == ' ' || *c == '\t').count())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| {
            let cut = line
                .char_indices()
                .take_while(|(_, c)| *c == ' ' || *c == '\t')
                .take(common)
                .last()
                .map_or(0, |(i, c)| i + c.len_utf8());
            &line[cut..]
        })
        .collect::<Vec<_>>()
        .join("\n")
}
