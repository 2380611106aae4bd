//! Directory enumeration for the dialog's list controls
//!
//! Both listings walk the root depth-first, visiting each directory's entries
//! in name order, and keep the first occurrence of every encoded string.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use indexmap::IndexSet;

use crate::codec::PathCodec;
use crate::error::{FileDialogError, FileDialogResult};
use crate::fs::{FileSystem, FsEntry};

struct Walk {
    matcher: GlobMatcher,
    max_depth: Option<usize>,
}

impl Walk {
    fn new(pattern: &str, recursive: bool) -> FileDialogResult<Self> {
        let glob = if recursive {
            format!("**/{pattern}")
        } else {
            pattern.to_owned()
        };
        let matcher = GlobBuilder::new(&glob)
            .literal_separator(true)
            .build()
            .map_err(|source| FileDialogError::Pattern {
                pattern: pattern.to_owned(),
                source,
            })?
            .compile_matcher();
        // A single-level pattern only reaches as deep as it has segments
        let max_depth = if recursive || pattern.contains("**") {
            None
        } else {
            Some(pattern.split('/').filter(|s| !s.is_empty()).count().max(1))
        };
        Ok(Self { matcher, max_depth })
    }

    fn run(&self, fs: &dyn FileSystem, root: &Path) -> FileDialogResult<Vec<FsEntry>> {
        let mut out = Vec::new();
        self.visit(fs, root, Path::new(""), 1, &mut out)?;
        Ok(out)
    }

    fn visit(
        &self,
        fs: &dyn FileSystem,
        dir: &Path,
        relative: &Path,
        depth: usize,
        out: &mut Vec<FsEntry>,
    ) -> FileDialogResult<()> {
        let mut entries = fs.read_dir(dir)?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        for entry in entries {
            let rel = relative.join(&entry.name);
            let descend = entry.is_dir
                && !entry.is_symlink
                && self.max_depth.is_none_or(|max| depth < max);
            if self.matcher.is_match(&rel) {
                out.push(entry.clone());
            }
            if descend {
                self.visit(fs, &entry.path, &rel, depth + 1, out)?;
            }
        }
        Ok(())
    }
}

fn absolute(root: &Path) -> FileDialogResult<PathBuf> {
    Ok(std::path::absolute(root)?)
}

/// Encoded directories holding a match of `pattern` under `root`, seeded with the root's own encoding.
pub fn list_directories(
    fs: &dyn FileSystem,
    root: &Path,
    pattern: &str,
    recursive: bool,
) -> FileDialogResult<Vec<String>> {
    let root = absolute(root)?;
    let walk = Walk::new(pattern, recursive)?;
    let mut seen = IndexSet::new();
    seen.insert(PathCodec::encode_dir(&root));
    for entry in walk.run(fs, &root)? {
        seen.insert(PathCodec::encode_dir(&entry.path));
    }
    #[cfg(feature = "tracing")]
    tracing::debug!(root = %root.display(), pattern, recursive, found = seen.len(), "listed directories");
    Ok(seen.into_iter().collect())
}

/// Encoded names of the non-directory matches of `pattern` under `root`.
pub fn list_files(
    fs: &dyn FileSystem,
    root: &Path,
    pattern: &str,
    recursive: bool,
) -> FileDialogResult<Vec<String>> {
    let root = absolute(root)?;
    let walk = Walk::new(pattern, recursive)?;
    let mut seen = IndexSet::new();
    for entry in walk.run(fs, &root)? {
        if entry.is_dir {
            continue;
        }
        seen.insert(PathCodec::encode_file(&entry.path));
    }
    #[cfg(feature = "tracing")]
    tracing::debug!(root = %root.display(), pattern, recursive, found = seen.len(), "listed files");
    Ok(seen.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::StdFileSystem;
    use pretty_assertions::assert_eq;
    use std::io;

    fn tree() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join("docs/old")).unwrap();
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::write(root.join("readme.txt"), "").unwrap();
        std::fs::write(root.join("docs/a.txt"), "").unwrap();
        std::fs::write(root.join("docs/b.md"), "").unwrap();
        std::fs::write(root.join("docs/old/a.txt"), "").unwrap();
        std::fs::write(root.join("src/main.rs"), "").unwrap();
        tmp
    }

    #[test]
    fn recursive_directories_start_with_root_and_dedup() {
        let tmp = tree();
        let root = tmp.path();
        let dirs = list_directories(&StdFileSystem, root, "*.txt", true).unwrap();
        assert_eq!(
            dirs,
            vec![
                PathCodec::encode_dir(root),
                PathCodec::encode_dir(&root.join("docs/a.txt")),
                PathCodec::encode_dir(&root.join("docs/old/a.txt")),
                PathCodec::encode_dir(&root.join("readme.txt")),
            ]
        );
    }

    #[test]
    fn single_level_only_descends_as_deep_as_the_pattern() {
        let tmp = tree();
        let root = tmp.path();
        let top = list_files(&StdFileSystem, root, "*.txt", false).unwrap();
        assert_eq!(top, vec!["\u{1F4C4} readme.txt".to_string()]);

        let nested = list_files(&StdFileSystem, root, "docs/*.txt", false).unwrap();
        assert_eq!(nested, vec!["\u{1F4C4} a.txt".to_string()]);
    }

    #[test]
    fn files_skip_directories_and_duplicate_names() {
        let tmp = tree();
        let files = list_files(&StdFileSystem, tmp.path(), "*", true).unwrap();
        assert_eq!(
            files,
            vec![
                "\u{1F4C4} a.txt".to_string(),
                "\u{1F4C4} b.md".to_string(),
                "\u{1F4C4} readme.txt".to_string(),
                "\u{1F4C4} main.rs".to_string(),
            ]
        );
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let tmp = tree();
        let err = list_files(&StdFileSystem, tmp.path(), "[", false).unwrap_err();
        assert!(matches!(err, FileDialogError::Pattern { ref pattern, .. } if pattern == "["));
    }

    #[test]
    fn missing_root_is_an_io_error() {
        let tmp = tree();
        let err =
            list_directories(&StdFileSystem, &tmp.path().join("nope"), "*", true).unwrap_err();
        assert!(matches!(err, FileDialogError::Io(_)));
    }

    /// Filesystem with one unreadable subdirectory.
    struct Unreadable;

    impl FileSystem for Unreadable {
        fn read_dir(&self, dir: &Path) -> io::Result<Vec<FsEntry>> {
            if dir.ends_with("locked") {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked"));
            }
            Ok(vec![FsEntry {
                name: "locked".into(),
                path: dir.join("locked"),
                is_dir: true,
                is_symlink: false,
            }])
        }
    }

    #[test]
    fn unreadable_subdirectory_propagates() {
        let err = list_files(&Unreadable, Path::new("/virtual"), "*", true).unwrap_err();
        match err {
            FileDialogError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::PermissionDenied),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
