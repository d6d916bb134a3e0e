//! Splitting front matter from markdown documents.

use super::types::{Frontmatter, ParsedDocument};

/// Line that opens and closes a front matter header.
pub const DELIMITER: &str = "---";

/// Raw halves of a document, before the header is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    /// Text between the two delimiter lines, if both were found.
    pub header: Option<&'a str>,
    /// Everything after the closing delimiter line.
    pub body: &'a str,
}

/// Split a document into its front matter header and body.
///
/// The first line must be exactly `---`; the header runs until the next line
/// that is exactly `---`:
/// ```markdown
/// ---
/// key: value
/// ---
/// ## Document content
/// ```
/// An opening delimiter without a closing one leaves the whole document as
/// body.
pub fn split(content: &str) -> Split<'_> {
    let mut lines = content.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return Split { header: None, body: content };
    };
    if strip_eol(first) != DELIMITER {
        return Split { header: None, body: content };
    }

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if strip_eol(line) == DELIMITER {
            let header = strip_eol(&content[header_start..offset]);
            let body = &content[offset + line.len()..];
            return Split { header: Some(header), body };
        }
        offset += line.len();
    }

    tracing::debug!("front matter opened but never closed, treating document as body");
    Split { header: None, body: content }
}

/// Parse front matter from markdown content.
///
/// Never fails: a missing or unterminated header yields `frontmatter: None`
/// and the whole input as body.
pub fn parse(content: &str) -> ParsedDocument {
    let split = split(content);
    ParsedDocument {
        frontmatter: split.header.map(|header| Frontmatter::parse(header.trim())),
        body: split.body.to_string(),
    }
}

fn strip_eol(line: &str) -> &str {
    line.strip_suffix('\n').map_or(line, |l| l.strip_suffix('\r').unwrap_or(l))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_no_frontmatter() {
        let content = "## Hello\n\nSome content";
        let result = parse(content);
        assert!(result.frontmatter.is_none());
        assert_eq!(result.body, content);
    }

    #[test]
    fn parse_simple_frontmatter() {
        let content = "---\ntitle: Hello\n---\n## Content";
        let result = parse(content);
        let fm = result.frontmatter.unwrap();
        assert_eq!(fm.get_str("title"), Some("Hello"));
        assert_eq!(result.body, "## Content");
    }

    #[test]
    fn parse_frontmatter_with_multiple_fields() {
        let content =
            "---\ntitle: Test\ndate: 2024-01-15\ntags:\n  - rust\n  - cli\n---\n\nBody";
        let result = parse(content);
        let fm = result.frontmatter.unwrap();
        assert_eq!(fm.get_str("title"), Some("Test"));
        assert_eq!(fm.get_str("date"), Some("2024-01-15"));
        assert!(fm.contains_key("tags"));
        assert_eq!(result.body, "\nBody");
    }

    #[test]
    fn parse_empty_frontmatter() {
        let content = "---\n---\n## Content";
        let result = parse(content);
        assert!(result.frontmatter.unwrap().is_empty());
        assert_eq!(result.body, "## Content");
    }

    #[test]
    fn unterminated_header_is_body() {
        let content = "---\ntitle: Hello\n\nno closing line";
        let result = parse(content);
        assert!(result.frontmatter.is_none());
        assert_eq!(result.body, content);
    }

    #[test]
    fn crlf_delimiters() {
        let content = "---\r\ntitle: Hello\r\n---\r\nBody";
        let split = split(content);
        assert_eq!(split.header, Some("title: Hello"));
        assert_eq!(split.body, "Body");
    }

    #[test]
    fn delimiter_must_be_exact() {
        let content = "----\ntitle: Hello\n----\nBody";
        assert_eq!(split(content).header, None);
    }
}
