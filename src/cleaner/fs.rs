use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: PathBuf,
    /// True only for real directories; symlinks are never followed
    pub is_dir: bool,
}

/// The filesystem operations the cleanup engine performs.
///
/// Listing a directory can fail as a whole (outer error) or per entry
/// (inner errors), and the engine counts those separately.
pub trait Filesystem {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<io::Result<Entry>>>;

    /// Size in bytes of a file or symlink, without following links
    fn file_size(&self, path: &Path) -> io::Result<u64>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Remove an empty directory
    fn remove_dir(&self, path: &Path) -> io::Result<()>;
}

/// The real, local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl Filesystem for LocalFs {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<io::Result<Entry>>> {
        let entries = fs::read_dir(dir)?
            .map(|entry| -> io::Result<Entry> {
                let entry = entry?;
                let file_type = entry.file_type()?;
                Ok(Entry {
                    path: entry.path(),
                    is_dir: file_type.is_dir(),
                })
            })
            .collect();
        Ok(entries)
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        fs::symlink_metadata(path).map(|m| m.len())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }
}
