use insta::assert_snapshot;
use mdshelf_core::markdown::toc::{Slugger, TocNode, table, table_with};

fn outline(nodes: &[TocNode]) -> String {
    fn walk(nodes: &[TocNode], depth: usize, out: &mut Vec<String>) {
        for node in nodes {
            out.push(format!("{}{} #{}", "  ".repeat(depth), node.title, node.id));
            walk(&node.sections, depth + 1, out);
        }
    }
    let mut out = Vec::new();
    walk(nodes, 0, &mut out);
    out.join("\n")
}

#[test]
fn guide_with_three_levels() {
    let body = "\
Intro paragraph.

## Getting started
### Install
#### From source
#### With cargo
### Configure
## Usage
Some text with ## not a heading.
### The `compile` function
## FAQ
";
    assert_snapshot!(outline(&table(body)), @r"
    Getting started #getting-started
      Install #install
        From source #from-source
        With cargo #with-cargo
      Configure #configure
    Usage #usage
      The compile function #the-compile-function
    FAQ #faq
    ");
}

#[test]
fn single_level_stays_flat() {
    let body = "#### One\n#### Two\n#### Three\n";
    assert_snapshot!(outline(&table(body)), @r"
    One #one
    Two #two
    Three #three
    ");
}

#[test]
fn h3_is_top_level_without_h2() {
    let body = "### Alpha\n#### Alpha one\n### Beta\n#### Beta one\n#### Beta two\n";
    assert_snapshot!(outline(&table(body)), @r"
    Alpha #alpha
      Alpha one #alpha-one
    Beta #beta
      Beta one #beta-one
      Beta two #beta-two
    ");
}

#[test]
fn links_are_reduced_to_text() {
    let body = "## See [the docs](https://docs.rs)\n## What's new?\n";
    assert_snapshot!(outline(&table(body)), @r"
    See the docs #see-the-docs
    What's new? #what-s-new
    ");
}

#[test]
fn custom_slugger() {
    let slugger = Slugger::new(r"[^a-z0-9]+").unwrap();
    let body = "## snake_case Title\n";
    assert_snapshot!(outline(&table_with(body, &slugger)), @"snake_case Title #snake-case-title");
}
