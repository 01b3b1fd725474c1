use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::data::{Kind, LibraryEntry};
use crate::error::LibraryError;

/// The Library manages the flat directory of generated result images.
///
/// There is no manifest and no database: the directory listing is the index.
/// Filenames follow `<kind>_<n>.png` with a single sequence shared across
/// kinds, and entries are immutable once written.
#[derive(Debug, Clone)]
pub struct Library {
    root: PathBuf,
}

impl Library {
    /// Create a handle over a library directory (not created until `ensure`)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Library { root: root.into() }
    }

    /// The library directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the library directory if absent. Idempotent.
    pub fn ensure(&self) -> Result<(), LibraryError> {
        fs::create_dir_all(&self.root).map_err(|e| LibraryError::Unavailable {
            path: self.root.display().to_string(),
            reason: e.to_string(),
        })?;

        let meta = fs::metadata(&self.root).map_err(|e| LibraryError::Unavailable {
            path: self.root.display().to_string(),
            reason: e.to_string(),
        })?;
        if meta.permissions().readonly() {
            return Err(LibraryError::Unavailable {
                path: self.root.display().to_string(),
                reason: "directory is read-only".into(),
            });
        }

        Ok(())
    }

    /// Next sequence number for a new entry.
    ///
    /// One past the highest `_<n>` suffix across all PNG entries, so numbers
    /// stay monotonic even after deletions. A bare entry count would reuse
    /// numbers and let two concurrent saves overwrite each other.
    pub fn next_sequence(&self) -> u32 {
        self.list()
            .iter()
            .filter_map(|entry| entry.sequence)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Persist a generated result under the next conventional filename.
    ///
    /// The name is claimed with an exclusive create: if another writer took
    /// it first, the sequence is bumped and the claim retried, so results
    /// are never silently overwritten.
    pub fn store(&self, kind: Kind, bytes: &[u8]) -> Result<LibraryEntry, LibraryError> {
        self.ensure()?;

        let mut sequence = self.next_sequence();
        loop {
            let filename = format!("{}_{}.png", kind.prefix(), sequence);
            let path = self.root.join(&filename);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    if let Err(e) = file.write_all(bytes) {
                        // Drop the half-written claim before reporting
                        let _ = fs::remove_file(&path);
                        return Err(LibraryError::Write {
                            filename,
                            reason: e.to_string(),
                        });
                    }
                    log::info!("stored {} ({} bytes)", filename, bytes.len());
                    return Ok(LibraryEntry::from_path(path));
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    sequence += 1;
                }
                Err(e) => {
                    return Err(LibraryError::Write {
                        filename,
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    /// Write bytes under an explicit filename, overwriting if present
    pub fn store_named(&self, filename: &str, bytes: &[u8]) -> Result<LibraryEntry, LibraryError> {
        self.ensure()?;

        let path = self.root.join(filename);
        fs::write(&path, bytes).map_err(|e| LibraryError::Write {
            filename: filename.to_string(),
            reason: e.to_string(),
        })?;

        Ok(LibraryEntry::from_path(path))
    }

    /// All PNG entries sorted by filename.
    ///
    /// An absent or empty directory is a normal state and yields an empty
    /// list, never an error.
    pub fn list(&self) -> Vec<LibraryEntry> {
        let mut entries: Vec<LibraryEntry> = WalkDir::new(&self.root)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("png"))
                    .unwrap_or(false)
            })
            .map(|e| LibraryEntry::from_path(e.into_path()))
            .collect();

        entries.sort_by(|a, b| a.filename.cmp(&b.filename));
        entries
    }

    /// Number of PNG entries
    pub fn count(&self) -> usize {
        self.list().len()
    }

    /// Read an entry's bytes back (for download and preview)
    pub fn read(&self, filename: &str) -> Result<Vec<u8>, LibraryError> {
        let path = self.root.join(filename);
        fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LibraryError::NotFound {
                filename: filename.to_string(),
            },
            _ => LibraryError::Read {
                filename: filename.to_string(),
                reason: e.to_string(),
            },
        })
    }

    /// Remove an entry.
    ///
    /// A missing target is `NotFound` - a user-visible warning, not fatal.
    pub fn delete(&self, filename: &str) -> Result<(), LibraryError> {
        let path = self.root.join(filename);
        fs::remove_file(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LibraryError::NotFound {
                filename: filename.to_string(),
            },
            _ => LibraryError::Write {
                filename: filename.to_string(),
                reason: e.to_string(),
            },
        })?;

        log::info!("deleted {}", filename);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    fn scratch() -> (TempDir, Library) {
        let tmp = TempDir::new("artify-library").unwrap();
        let library = Library::new(tmp.path().join("image_library"));
        (tmp, library)
    }

    #[test]
    fn test_list_on_absent_directory_is_empty() {
        let (_tmp, library) = scratch();
        assert!(library.list().is_empty());
        assert_eq!(library.count(), 0);
    }

    #[test]
    fn test_list_on_empty_directory_is_empty() {
        let (_tmp, library) = scratch();
        library.ensure().unwrap();
        assert!(library.list().is_empty());
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let (_tmp, library) = scratch();
        library.ensure().unwrap();
        library.ensure().unwrap();
    }

    #[test]
    fn test_store_assigns_sequential_names() {
        let (_tmp, library) = scratch();
        for expected in ["styled_1.png", "styled_2.png", "styled_3.png"] {
            let entry = library.store(Kind::Styled, b"png bytes").unwrap();
            assert_eq!(entry.filename, expected);
        }

        // Three existing entries: the next styled name is styled_4.png
        assert_eq!(library.next_sequence(), 4);
        let entry = library.store(Kind::Styled, b"png bytes").unwrap();
        assert_eq!(entry.filename, "styled_4.png");
    }

    #[test]
    fn test_sequence_is_shared_across_kinds() {
        let (_tmp, library) = scratch();
        library.store(Kind::Styled, b"a").unwrap();
        library.store(Kind::Styled, b"b").unwrap();

        let entry = library.store(Kind::Mixed, b"c").unwrap();
        assert_eq!(entry.filename, "mixed_3.png");
    }

    #[test]
    fn test_sequence_survives_deletion() {
        let (_tmp, library) = scratch();
        library.store(Kind::Generated, b"a").unwrap();
        let second = library.store(Kind::Generated, b"b").unwrap();
        library.delete(&second.filename).unwrap();

        // generated_2 was deleted; its number is not reused
        let third = library.store(Kind::Generated, b"c").unwrap();
        assert_eq!(third.filename, "generated_3.png");
    }

    #[test]
    fn test_store_never_overwrites_a_claimed_name() {
        let (_tmp, library) = scratch();
        library.store_named("styled_1.png", b"keep me").unwrap();

        let entry = library.store(Kind::Styled, b"new").unwrap();
        assert_eq!(entry.filename, "styled_2.png");
        assert_eq!(library.read("styled_1.png").unwrap(), b"keep me");
    }

    #[test]
    fn test_delete_then_list_excludes_entry() {
        let (_tmp, library) = scratch();
        library.store_named("a.png", b"bytes").unwrap();
        library.delete("a.png").unwrap();

        assert!(library.list().iter().all(|e| e.filename != "a.png"));

        // Deleting again is NotFound, not a crash
        let err = library.delete("a.png").unwrap_err();
        assert_eq!(
            err,
            LibraryError::NotFound {
                filename: "a.png".into()
            }
        );
    }

    #[test]
    fn test_read_missing_entry_is_not_found() {
        let (_tmp, library) = scratch();
        library.ensure().unwrap();
        assert!(matches!(
            library.read("ghost.png"),
            Err(LibraryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_list_ignores_non_png_files() {
        let (_tmp, library) = scratch();
        library.ensure().unwrap();
        std::fs::write(library.root().join("notes.txt"), b"text").unwrap();
        library.store_named("styled_1.png", b"img").unwrap();

        let entries = library.list();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].filename, "styled_1.png");
    }

    #[test]
    fn test_list_is_sorted_by_filename() {
        let (_tmp, library) = scratch();
        library.store_named("mixed_2.png", b"b").unwrap();
        library.store_named("generated_3.png", b"c").unwrap();
        library.store_named("styled_1.png", b"a").unwrap();

        let entries = library.list();
        let names: Vec<&str> = entries.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(names, vec!["generated_3.png", "mixed_2.png", "styled_1.png"]);
    }

    #[test]
    fn test_entries_parse_kind_and_sequence() {
        let (_tmp, library) = scratch();
        let entry = library.store(Kind::Mixed, b"bytes").unwrap();
        assert_eq!(entry.kind, Some(Kind::Mixed));
        assert_eq!(entry.sequence, Some(1));
        assert!(entry.created_at.is_some());
    }
}
