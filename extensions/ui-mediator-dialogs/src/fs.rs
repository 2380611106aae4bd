use std::path::{Path, PathBuf};

/// Directory entry returned by [`FileSystem::read_dir`].
#[derive(Clone, Debug)]
pub struct FsEntry {
    /// Base name (no parent path)
    pub name: String,
    /// Full path
    pub path: PathBuf,
    /// Whether this entry is a directory, following symbolic links.
    pub is_dir: bool,
    /// Whether this entry itself is a symbolic link.
    pub is_symlink: bool,
}

/// Read-only file system abstraction walked by the directory enumerator.
///
/// Swap in another implementation to browse something other than the local
/// disk, or to exercise error paths in tests.
pub trait FileSystem {
    /// List entries of a directory, in any order.
    fn read_dir(&self, dir: &Path) -> std::io::Result<Vec<FsEntry>>;
}

/// Default filesystem implementation using `std::fs`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_dir(&self, dir: &Path) -> std::io::Result<Vec<FsEntry>> {
        let mut out = Vec::new();
        for e in std::fs::read_dir(dir)? {
            let e = e?;
            let ft = e.file_type()?;
            let path = e.path();
            // Dangling links count as files
            let is_dir = std::fs::metadata(&path)
                .map(|m| m.is_dir())
                .unwrap_or_else(|_| ft.is_dir());
            out.push(FsEntry {
                name: e.file_name().to_string_lossy().to_string(),
                path,
                is_dir,
                is_symlink: ft.is_symlink(),
            });
        }
        Ok(out)
    }
}
