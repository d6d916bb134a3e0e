//! Reading time estimate for a markdown body.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<(?:/?[A-Za-z][\w-]*|!--)").unwrap());
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]\n]*\]\([^)\n]+\)").unwrap());

/// Tuning knobs for [`estimate_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTimeOptions {
    pub words_per_minute: u32,
    /// Word units added for every `![alt](src)` image.
    pub image_weight: u32,
    /// Tokens must be longer than this (in characters) to count as words.
    pub min_word_len: usize,
}

impl Default for ReadTimeOptions {
    fn default() -> Self {
        Self { words_per_minute: 240, image_weight: 12, min_word_len: 1 }
    }
}

/// Estimated reading time in whole minutes, never less than 1.
pub fn estimate(body: &str) -> u32 {
    estimate_with(body, &ReadTimeOptions::default())
}

pub fn estimate_with(body: &str, options: &ReadTimeOptions) -> u32 {
    let words: usize = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(['!', '*']))
        .map(|line| if TAG_RE.is_match(line) { 1 } else { count_words(line, options) })
        .sum();

    let images = IMAGE_RE.find_iter(body).count();
    let total = words + images * options.image_weight as usize;

    let per_minute = f64::from(options.words_per_minute.max(1));
    let minutes = (total as f64 / per_minute).round() as u32;
    minutes.max(1)
}

fn count_words(line: &str, options: &ReadTimeOptions) -> usize {
    line.split(' ')
        .filter(|token| {
            token.chars().count() > options.min_word_len
                && token.chars().any(char::is_alphanumeric)
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prose(words: usize) -> String {
        vec!["word"; words].join(" ")
    }

    #[test]
    fn empty_body_is_one_minute() {
        assert_eq!(estimate(""), 1);
    }

    #[test]
    fn rounds_to_nearest_minute() {
        assert_eq!(estimate(&prose(480)), 2);
        assert_eq!(estimate(&prose(600)), 3);
        assert_eq!(estimate(&prose(599)), 2);
    }

    #[test]
    fn short_tokens_and_symbols_do_not_count() {
        let options = ReadTimeOptions { words_per_minute: 1, ..ReadTimeOptions::default() };
        assert_eq!(estimate_with("a -- ab c9 ->", &options), 2);
    }

    #[test]
    fn html_lines_count_once() {
        let options = ReadTimeOptions { words_per_minute: 1, ..ReadTimeOptions::default() };
        let body = "<div class=\"note\">lots of words in here</div>\n  <!-- comment -->";
        assert_eq!(estimate_with(body, &options), 2);
    }

    #[test]
    fn directive_and_emphasis_lines_are_skipped() {
        let options = ReadTimeOptions { words_per_minute: 1, ..ReadTimeOptions::default() };
        assert_eq!(estimate_with("*just emphasis here*\n!directive words", &options), 1);
    }

    #[test]
    fn images_add_weight() {
        let options = ReadTimeOptions { words_per_minute: 12, ..ReadTimeOptions::default() };
        // the line itself starts with '!' and is skipped; only image weight counts
        let body = "![one](a.png) and ![two](b.png)";
        assert_eq!(estimate_with(body, &options), 2);
    }

    #[test]
    fn doubling_prose_never_decreases() {
        for n in [0, 50, 119, 120, 240, 1000] {
            assert!(estimate(&prose(n * 2)) >= estimate(&prose(n)));
        }
    }
}
