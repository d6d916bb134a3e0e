//! One-shot directory listings.
//!
//! A [`Snapshot`] reads a directory once, with timestamps for every entry and
//! bytes for the files the caller asks to load. Files are then compiled from
//! the snapshot and see the rest of it as [`Siblings`], so the directory is
//! never listed twice.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// A directory entry captured at listing time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    /// Kind of the entry, or of its target for symlinks.
    pub kind: EntryKind,
    pub symlink: bool,
    /// File contents; `None` for directories and files that were not loaded.
    pub buffer: Option<Vec<u8>>,
    pub created: Option<SystemTime>,
    pub modified: Option<SystemTime>,
}

impl FileEntry {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Contents decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> Option<String> {
        self.buffer.as_deref().map(|b| String::from_utf8_lossy(b).into_owned())
    }

    /// Loaded contents, or a fresh read from disk when the entry was not loaded.
    pub fn bytes(&self) -> io::Result<Cow<'_, [u8]>> {
        match self.buffer.as_deref() {
            Some(bytes) => Ok(Cow::Borrowed(bytes)),
            None if self.is_dir() => {
                Err(io::Error::new(io::ErrorKind::IsADirectory, "entry is a directory"))
            }
            None => fs::read(&self.path).map(Cow::Owned),
        }
    }
}

/// Entries of one directory, sorted by file name.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    entries: Vec<FileEntry>,
}

impl Snapshot {
    /// List `dir` and read every file in it.
    pub fn read(dir: &Path) -> io::Result<Self> {
        Self::read_with(dir, |_| true)
    }

    /// List `dir`, reading the bytes of files whose name passes `load`.
    ///
    /// Fails only when the directory itself cannot be listed. Entries that
    /// cannot be inspected or read are logged and left out.
    pub fn read_with(dir: &Path, load: impl Fn(&str) -> bool) -> io::Result<Self> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            let wanted = load(&name);
            if let Some(file) = capture(&entry.path(), name, wanted) {
                entries.push(file);
            }
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Everything in the snapshot except the entry at `index`.
    pub fn siblings_of(&self, index: usize) -> Siblings<'_> {
        Siblings { entries: &self.entries, skip: Some(index) }
    }
}

fn capture(path: &Path, name: String, load: bool) -> Option<FileEntry> {
    let symlink = match fs::symlink_metadata(path) {
        Ok(meta) => meta.file_type().is_symlink(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping unreadable entry");
            return None;
        }
    };
    // follows symlinks; a dangling link fails here
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping unreadable entry");
            return None;
        }
    };

    let (kind, buffer) = if meta.is_dir() {
        (EntryKind::Directory, None)
    } else if meta.is_file() && !load {
        (EntryKind::File, None)
    } else if meta.is_file() {
        match fs::read(path) {
            Ok(bytes) => (EntryKind::File, Some(bytes)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable file");
                return None;
            }
        }
    } else {
        return None;
    };

    Some(FileEntry {
        name,
        path: path.to_path_buf(),
        kind,
        symlink,
        buffer,
        created: meta.created().ok(),
        modified: meta.modified().ok(),
    })
}

/// The other entries of the directory a file was found in.
#[derive(Debug, Clone, Copy)]
pub struct Siblings<'a> {
    entries: &'a [FileEntry],
    skip: Option<usize>,
}

impl<'a> Siblings<'a> {
    /// No siblings, as for a file compiled on its own.
    pub fn empty() -> Self {
        Self { entries: &[], skip: None }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a FileEntry> + 'a {
        let skip = self.skip;
        self.entries
            .iter()
            .enumerate()
            .filter(move |(index, _)| Some(*index) != skip)
            .map(|(_, entry)| entry)
    }

    pub fn files(&self) -> impl Iterator<Item = &'a FileEntry> + 'a {
        self.iter().filter(|entry| entry.is_file())
    }

    pub fn directories(&self) -> impl Iterator<Item = &'a FileEntry> + 'a {
        self.iter().filter(|entry| entry.is_dir())
    }

    pub fn find(&self, name: &str) -> Option<&'a FileEntry> {
        self.iter().find(|entry| entry.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len() - usize::from(self.skip.is_some_and(|i| i < self.entries.len()))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.md"), "# b").unwrap();
        fs::write(tmp.path().join("a.md"), "# a").unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        tmp
    }

    #[test]
    fn read_sorts_and_captures_bytes() {
        let tmp = fixture();
        let snapshot = Snapshot::read(tmp.path()).unwrap();
        let names: Vec<_> = snapshot.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a.md", "b.md", "nested"]);

        let a = &snapshot.entries()[0];
        assert!(a.is_file());
        assert_eq!(a.text().as_deref(), Some("# a"));
        assert!(a.modified.is_some());
        assert!(snapshot.entries()[2].is_dir());
        assert!(snapshot.entries()[2].buffer.is_none());
    }

    #[test]
    fn unloaded_files_read_on_demand() {
        let tmp = fixture();
        let snapshot = Snapshot::read_with(tmp.path(), |name| name == "a.md").unwrap();
        let [a, b, nested] = snapshot.entries() else {
            panic!("expected three entries");
        };

        assert!(a.buffer.is_some());
        assert!(b.is_file());
        assert!(b.buffer.is_none());
        assert_eq!(&*b.bytes().unwrap(), b"# b");
        assert!(nested.bytes().is_err());
    }

    #[test]
    fn siblings_exclude_self() {
        let tmp = fixture();
        let snapshot = Snapshot::read(tmp.path()).unwrap();
        let siblings = snapshot.siblings_of(0);

        assert_eq!(siblings.len(), 2);
        assert!(siblings.find("a.md").is_none());
        assert!(siblings.find("b.md").is_some());
        assert_eq!(siblings.files().count(), 1);
        assert_eq!(siblings.directories().count(), 1);
    }

    #[test]
    fn empty_siblings() {
        let siblings = Siblings::empty();
        assert!(siblings.is_empty());
        assert_eq!(siblings.iter().count(), 0);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(Snapshot::read(&tmp.path().join("missing")).is_err());
    }
}
