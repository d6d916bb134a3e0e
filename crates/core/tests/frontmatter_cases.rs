use mdshelf_core::frontmatter::{self, Frontmatter, coerce};
use rstest::rstest;
use serde_yaml::Value;

fn header(doc: &str) -> Frontmatter {
    frontmatter::parse(doc).frontmatter.expect("document has a header")
}

#[rstest]
#[case("true", Value::Bool(true))]
#[case("false", Value::Bool(false))]
#[case("null", Value::Null)]
#[case("\"true\"", Value::from("true"))]
#[case("'false'", Value::from("false"))]
#[case("2024-01-15", Value::from("2024-01-15"))]
#[case("3.14", Value::from("3.14"))]
fn literal_coercion(#[case] token: &str, #[case] expected: Value) {
    assert_eq!(coerce(token), expected);
}

#[rstest]
#[case("---\ntitle: A\n---\nbody", true, "body")]
#[case("no header here", false, "no header here")]
#[case("---\ntitle: A\nbody without close", false, "---\ntitle: A\nbody without close")]
#[case("--- \ntitle: A\n---\nbody", false, "--- \ntitle: A\n---\nbody")]
#[case("intro\n---\ntitle: A\n---\n", false, "intro\n---\ntitle: A\n---\n")]
#[case("\n---\ntitle: A\n---\nbody", false, "\n---\ntitle: A\n---\nbody")]
fn header_detection(#[case] doc: &str, #[case] has_header: bool, #[case] body: &str) {
    let parsed = frontmatter::parse(doc);
    assert_eq!(parsed.frontmatter.is_some(), has_header);
    assert_eq!(parsed.body, body);
}

#[test]
fn blog_post_header() {
    let fm = header(
        "---\n\
         title: Writing a parser\n\
         description: \"Notes: part one\"\n\
         draft: false\n\
         tags: [rust, parsing]\n\
         authors:\n  - ana\n  - bo\n\
         date:\n  published: 2024-01-15\n\
         summary: |\n  First line\n  # not a comment\n\
         ---\n\
         ## Body\n",
    );

    assert_eq!(fm.get_str("title"), Some("Writing a parser"));
    assert_eq!(fm.get_str("description"), Some("Notes: part one"));
    assert_eq!(fm.get("draft"), Some(&Value::Bool(false)));
    assert_eq!(
        fm.get("tags"),
        Some(&Value::Sequence(vec![Value::from("rust"), Value::from("parsing")]))
    );
    assert_eq!(
        fm.get("authors"),
        Some(&Value::Sequence(vec![Value::from("ana"), Value::from("bo")]))
    );
    let date = fm.get("date").and_then(Value::as_mapping).unwrap();
    assert_eq!(date.get("published").and_then(Value::as_str), Some("2024-01-15"));
    assert_eq!(fm.get_str("summary"), Some("First line\n# not a comment"));
}

#[test]
fn keys_keep_header_order() {
    let fm = header("---\nzeta: 1\nalpha: 2\nmid: 3\n---\n");
    let keys: Vec<_> = fm.fields.keys().filter_map(Value::as_str).collect();
    assert_eq!(keys, ["zeta", "alpha", "mid"]);
}

#[test]
fn duplicate_keys_merge_or_overwrite() {
    let fm = header("---\nseo:\n  title: A\nseo:\n  image: b.png\nname: x\nname: y\n---\n");
    let seo = fm.get("seo").and_then(Value::as_mapping).unwrap();
    assert_eq!(seo.get("title").and_then(Value::as_str), Some("A"));
    assert_eq!(seo.get("image").and_then(Value::as_str), Some("b.png"));
    assert_eq!(fm.get_str("name"), Some("y"));
}

#[test]
fn merge_is_deep() {
    let mut base = header("---\ndate:\n  published: 2024-01-01\ntitle: A\n---\n");
    base.merge(header("---\ndate:\n  updated: 2024-02-01\ntitle: B\n---\n"));

    let date = base.get("date").and_then(Value::as_mapping).unwrap();
    assert_eq!(date.len(), 2);
    assert_eq!(base.get_str("title"), Some("B"));
}
