use mdshelf_core::config::loader::ConfigLoader;
use mdshelf_core::{Depth, SortMode};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn load_default_profile_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
content_root = "/tmp/site/content"
depth = -1
extensions = [".md", ".markdown"]
patterns = ['^notes-\d+\.txt$']
exclude = ["rt"]
sort = "date"

[logging]
level = "debug"
file = "{{content_root}}/mdshelf.log"
"#;

    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), None).expect("should load");
    assert_eq!(rc.active_profile, "default");
    assert_eq!(rc.content_root.display().to_string(), "/tmp/site/content");
    assert_eq!(rc.logging.level, "debug");
    assert_eq!(rc.logging.file, Some(PathBuf::from("/tmp/site/content/mdshelf.log")));

    let options = rc.traverse_options();
    assert_eq!(options.entry, rc.content_root);
    assert_eq!(options.depth, Depth::Unlimited);
    assert_eq!(options.sort, SortMode::Date);
    assert!(options.file.exclude.read_time);
    assert!(!options.file.exclude.toc);
    assert!(options.accepts("post.markdown"));
    assert!(options.accepts("notes-1.txt"));
    assert!(!options.accepts("draft.post.md"));
}

#[test]
fn load_with_profile_override_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("mdshelf/config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
content_root = "/tmp/def"

[profiles.work]
content_root = "/tmp/work"
recurse = true
minimal = true
"#;
    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), Some("work")).expect("should load");
    assert_eq!(rc.active_profile, "work");
    assert_eq!(rc.content_root.display().to_string(), "/tmp/work");

    let options = rc.traverse_options();
    assert_eq!(options.depth, Depth::Unlimited);
    assert!(options.file.minimal);
    assert_eq!(options.extensions, [".md"]);
}

#[test]
fn defaults_when_fields_are_missing() {
    let rc = ConfigLoader::from_toml(
        "version = 1\n[profiles.default]\ncontent_root = \"/tmp/c\"\n",
        "inline",
        None,
    )
    .expect("should load");

    let options = rc.traverse_options();
    assert_eq!(options.depth, Depth::Limited(0));
    assert_eq!(options.sort, SortMode::Listing);
    assert!(!options.follow_links);
    assert_eq!(rc.logging.level, "info");
    assert!(rc.logging.file.is_none());
}

#[test]
fn depth_wins_over_recurse() {
    let rc = ConfigLoader::from_toml(
        "version = 1\n[profiles.default]\ncontent_root = \"/tmp/c\"\ndepth = 2\nrecurse = true\n",
        "inline",
        None,
    )
    .expect("should load");
    assert_eq!(rc.traverse_options().depth, Depth::Limited(2));
}
