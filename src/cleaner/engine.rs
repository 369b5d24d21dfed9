use std::path::{Path, PathBuf};
use tracing::debug;

use super::fs::{Filesystem, LocalFs};
use super::outcome::{Outcome, OutcomeKind};
use super::stats::{Observer, Stats};

/// Delete everything below `root` on the local filesystem, leaving `root`
/// itself in place. See [`clean_directory_with`].
pub fn clean_directory(root: &Path, stats: &mut Stats, observer: &mut dyn Observer) {
    clean_directory_with(&LocalFs, root, stats, observer);
}

/// Delete everything below `root`, leaving `root` itself in place.
///
/// Files in a directory are handled before its subdirectories, and every
/// subdirectory is emptied before its own removal is attempted. Each
/// filesystem operation succeeds or fails on its own: failures are folded
/// into `stats` and never abort the walk. A `root` that does not exist or
/// cannot be listed counts as a single failure.
pub fn clean_directory_with(
    fs: &dyn Filesystem,
    root: &Path,
    stats: &mut Stats,
    observer: &mut dyn Observer,
) {
    let (files, dirs) = match list_entries(fs, root, stats, observer) {
        Some(entries) => entries,
        None => return,
    };

    for file in files {
        let outcome = delete_file(fs, file);
        emit(outcome, stats, observer);
    }

    for dir in dirs {
        clean_directory_with(fs, &dir, stats, observer);
        let outcome = match fs.remove_dir(&dir) {
            Ok(()) => Outcome::dir_deleted(dir),
            Err(e) => {
                debug!(path = %dir.display(), error = %e, "failed to remove directory");
                Outcome::failed(OutcomeKind::DirFailed, dir, &e)
            }
        };
        emit(outcome, stats, observer);
    }
}

fn emit(outcome: Outcome, stats: &mut Stats, observer: &mut dyn Observer) {
    stats.record(&outcome);
    observer.on_outcome(&outcome, stats);
}

/// Split the immediate children of `dir` into (files, directories), each in
/// name order. Symlinks land with the files.
fn list_entries(
    fs: &dyn Filesystem,
    dir: &Path,
    stats: &mut Stats,
    observer: &mut dyn Observer,
) -> Option<(Vec<PathBuf>, Vec<PathBuf>)> {
    let entries = match fs.read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(path = %dir.display(), error = %e, "failed to list directory");
            emit(
                Outcome::failed(OutcomeKind::ListFailed, dir.to_path_buf(), &e),
                stats,
                observer,
            );
            return None;
        }
    };

    let mut files = Vec::new();
    let mut dirs = Vec::new();

    for entry in entries {
        match entry {
            Ok(e) if e.is_dir => dirs.push(e.path),
            Ok(e) => files.push(e.path),
            Err(e) => {
                debug!(path = %dir.display(), error = %e, "failed to read directory entry");
                emit(
                    Outcome::failed(OutcomeKind::ListFailed, dir.to_path_buf(), &e),
                    stats,
                    observer,
                );
            }
        }
    }

    files.sort();
    dirs.sort();
    Some((files, dirs))
}

/// Measure then remove a single file. A file whose size cannot be read is
/// left alone and reported as failed.
fn delete_file(fs: &dyn Filesystem, path: PathBuf) -> Outcome {
    let size = match fs.file_size(&path) {
        Ok(size) => size,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "failed to read file size");
            return Outcome::failed(OutcomeKind::FileFailed, path, &e);
        }
    };

    match fs.remove_file(&path) {
        Ok(()) => Outcome::file_deleted(path, size),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "failed to delete file");
            Outcome::failed(OutcomeKind::FileFailed, path, &e)
        }
    }
}
