use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use cachesweep::cleaner::{
    clean_directory, clean_directory_with, clean_targets, Entry, EventLog, FailureKind,
    Filesystem, LocalFs, Observer, Outcome, OutcomeKind, Stats,
};
use cachesweep::targets::CleanupTarget;

/// Local filesystem that refuses to delete chosen paths, as if they were
/// held open by another process
struct LockingFs {
    locked: HashSet<PathBuf>,
}

impl LockingFs {
    fn new(locked: &[&Path]) -> Self {
        Self {
            locked: locked.iter().map(|p| p.to_path_buf()).collect(),
        }
    }

    fn check(&self, path: &Path) -> io::Result<()> {
        if self.locked.contains(path) {
            Err(io::Error::new(io::ErrorKind::ResourceBusy, "file in use"))
        } else {
            Ok(())
        }
    }
}

impl Filesystem for LockingFs {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<io::Result<Entry>>> {
        LocalFs.read_dir(dir)
    }
    fn file_size(&self, path: &Path) -> io::Result<u64> {
        LocalFs.file_size(path)
    }
    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.check(path)?;
        LocalFs.remove_file(path)
    }
    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        self.check(path)?;
        LocalFs.remove_dir(path)
    }
}

/// Local filesystem whose size query fails for chosen paths
struct UnsizedFs {
    unsized_paths: HashSet<PathBuf>,
}

impl Filesystem for UnsizedFs {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<io::Result<Entry>>> {
        LocalFs.read_dir(dir)
    }
    fn file_size(&self, path: &Path) -> io::Result<u64> {
        if self.unsized_paths.contains(path) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        LocalFs.file_size(path)
    }
    fn remove_file(&self, path: &Path) -> io::Result<()> {
        LocalFs.remove_file(path)
    }
    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        LocalFs.remove_dir(path)
    }
}

/// Local filesystem that cannot list one chosen directory
struct UnlistableFs {
    unlistable: PathBuf,
}

impl Filesystem for UnlistableFs {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<io::Result<Entry>>> {
        if dir == self.unlistable {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        LocalFs.read_dir(dir)
    }
    fn file_size(&self, path: &Path) -> io::Result<u64> {
        LocalFs.file_size(path)
    }
    fn remove_file(&self, path: &Path) -> io::Result<()> {
        LocalFs.remove_file(path)
    }
    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        LocalFs.remove_dir(path)
    }
}

/// Keeps a copy of the totals handed to every `on_outcome` call
#[derive(Default)]
struct RunningTotals {
    snapshots: Vec<(OutcomeKind, u64, Stats)>,
}

impl Observer for RunningTotals {
    fn on_outcome(&mut self, outcome: &Outcome, stats: &Stats) {
        self.snapshots.push((outcome.kind, outcome.size_bytes, *stats));
    }
}

fn write_file(path: &Path, size: usize) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, vec![b'x'; size]).unwrap();
}

fn is_empty_dir(path: &Path) -> bool {
    std::fs::read_dir(path).unwrap().next().is_none()
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn test_two_deletable_files() {
    let root = TempDir::new().unwrap();
    write_file(&root.path().join("a.tmp"), 100);
    write_file(&root.path().join("b.tmp"), 300);

    let mut stats = Stats::new();
    clean_directory(root.path(), &mut stats, &mut EventLog::new());

    assert_eq!(stats.succeeded, 2);
    assert_eq!(stats.failed, 0);
    assert_eq!(stats.freed_bytes, 400);
    assert!(root.path().exists(), "Root itself must be kept");
    assert!(is_empty_dir(root.path()));
}

#[test]
fn test_locked_file_and_empty_subdir() {
    let root = TempDir::new().unwrap();
    let locked = root.path().join("locked.log");
    write_file(&locked, 64);
    std::fs::create_dir(root.path().join("empty")).unwrap();

    let fs = LockingFs::new(&[locked.as_path()]);
    let mut stats = Stats::new();
    let mut log = EventLog::new();
    clean_directory_with(&fs, root.path(), &mut stats, &mut log);

    assert_eq!(stats.succeeded, 1);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.freed_bytes, 0);
    assert!(locked.exists());
    assert!(!root.path().join("empty").exists());

    let failed = &log.outcomes[log.position(&locked).unwrap()];
    assert_eq!(failed.kind, OutcomeKind::FileFailed);
    assert_eq!(failed.failure, Some(FailureKind::Locked));
}

#[test]
fn test_missing_root_counts_one_failure() {
    let parent = TempDir::new().unwrap();
    let missing = parent.path().join("does-not-exist");

    let mut stats = Stats::new();
    clean_directory(&missing, &mut stats, &mut EventLog::new());

    assert_eq!(stats.failed, 1);
    assert_eq!(stats.succeeded, 0);
    assert_eq!(stats.freed_bytes, 0);
}

#[test]
fn test_nested_file_deleted_before_its_directory() {
    let root = TempDir::new().unwrap();
    let dir_a = root.path().join("A");
    let file1 = dir_a.join("file1");
    write_file(&file1, 10);

    let mut stats = Stats::new();
    let mut log = EventLog::new();
    clean_directory(root.path(), &mut stats, &mut log);

    assert_eq!(log.outcomes.len(), 2);
    assert_eq!(log.outcomes[0].path, file1);
    assert_eq!(log.outcomes[0].kind, OutcomeKind::FileDeleted);
    assert_eq!(log.outcomes[1].path, dir_a);
    assert_eq!(log.outcomes[1].kind, OutcomeKind::DirDeleted);
    assert_eq!(stats.succeeded, 2);
}

// ─── Properties ──────────────────────────────────────────────────────────────

#[test]
fn test_counts_match_attempts_and_bytes_match_deleted_files() {
    let root = TempDir::new().unwrap();
    let p = root.path();
    write_file(&p.join("top.bin"), 7);
    write_file(&p.join("x/one"), 11);
    write_file(&p.join("x/two"), 13);
    write_file(&p.join("x/y/deep"), 17);
    write_file(&p.join("z/stuck"), 19);
    std::fs::create_dir_all(p.join("x/empty")).unwrap();

    let stuck = p.join("z/stuck");
    let fs = LockingFs::new(&[stuck.as_path()]);
    let mut stats = Stats::new();
    let mut log = EventLog::new();
    clean_directory_with(&fs, p, &mut stats, &mut log);

    // 5 files + dirs x, x/y, x/empty, z
    assert_eq!(stats.attempts(), 9);
    assert_eq!(stats.attempts(), log.outcomes.len() as u64);

    let deleted_bytes: u64 = log
        .outcomes
        .iter()
        .filter(|o| o.kind == OutcomeKind::FileDeleted)
        .map(|o| o.size_bytes)
        .sum();
    assert_eq!(stats.freed_bytes, deleted_bytes);
    assert_eq!(stats.freed_bytes, 7 + 11 + 13 + 17);

    // z still holds the locked file, so it must fail too
    assert_eq!(stats.failed, 2);
    assert!(stuck.exists());
    assert!(!p.join("x").exists());
}

#[test]
fn test_directory_removed_after_all_its_files() {
    let root = TempDir::new().unwrap();
    let dir = root.path().join("cache");
    let files: Vec<PathBuf> = (0..5).map(|i| dir.join(format!("f{}", i))).collect();
    for f in &files {
        write_file(f, 3);
    }

    let mut log = EventLog::new();
    clean_directory(root.path(), &mut Stats::new(), &mut log);

    let dir_pos = log.position(&dir).unwrap();
    for f in &files {
        assert!(log.position(f).unwrap() < dir_pos);
    }
}

#[test]
fn test_second_run_is_a_no_op() {
    let root = TempDir::new().unwrap();
    write_file(&root.path().join("a/b/c"), 5);
    write_file(&root.path().join("d"), 5);

    let mut first = Stats::new();
    clean_directory(root.path(), &mut first, &mut EventLog::new());
    assert_eq!(first.failed, 0);

    let mut second = Stats::new();
    let mut log = EventLog::new();
    clean_directory(root.path(), &mut second, &mut log);

    assert_eq!(second, Stats::default());
    assert!(log.outcomes.is_empty());
}

#[test]
fn test_unsized_file_is_not_deleted() {
    let root = TempDir::new().unwrap();
    let secret = root.path().join("secret");
    write_file(&secret, 50);
    write_file(&root.path().join("plain"), 20);

    let fs = UnsizedFs {
        unsized_paths: [secret.clone()].into_iter().collect(),
    };
    let mut stats = Stats::new();
    clean_directory_with(&fs, root.path(), &mut stats, &mut EventLog::new());

    assert_eq!(stats.succeeded, 1);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.freed_bytes, 20);
    assert!(secret.exists());
}

#[test]
fn test_observer_sees_totals_after_each_outcome() {
    let root = TempDir::new().unwrap();
    let p = root.path();
    write_file(&p.join("a"), 4);
    write_file(&p.join("sub/b"), 6);
    write_file(&p.join("sub/held"), 8);
    write_file(&p.join("other/c"), 10);

    let held = p.join("sub/held");
    let fs = LockingFs::new(&[held.as_path()]);
    let mut stats = Stats::new();
    let mut totals = RunningTotals::default();
    clean_directory_with(&fs, p, &mut stats, &mut totals);

    assert!(!totals.snapshots.is_empty());
    let mut previous = Stats::default();
    for (i, (kind, size, seen)) in totals.snapshots.iter().enumerate() {
        assert_eq!(seen.attempts(), i as u64 + 1);
        if kind.is_success() {
            assert_eq!(seen.succeeded, previous.succeeded + 1);
            assert_eq!(seen.failed, previous.failed);
            assert_eq!(seen.freed_bytes, previous.freed_bytes + size);
        } else {
            assert_eq!(seen.failed, previous.failed + 1);
            assert_eq!(seen.succeeded, previous.succeeded);
            assert_eq!(seen.freed_bytes, previous.freed_bytes);
        }
        previous = *seen;
    }
    assert_eq!(previous, stats);
    // held file and its parent "sub"
    assert_eq!(stats.failed, 2);
}

#[test]
fn test_unlistable_subdir_fails_twice_and_siblings_continue() {
    let root = TempDir::new().unwrap();
    let p = root.path();
    let blocked = p.join("blocked");
    write_file(&blocked.join("inner"), 5);
    write_file(&p.join("sibling/x"), 7);
    write_file(&p.join("top"), 3);

    let fs = UnlistableFs {
        unlistable: blocked.clone(),
    };
    let mut stats = Stats::new();
    let mut log = EventLog::new();
    clean_directory_with(&fs, p, &mut stats, &mut log);

    let kinds: Vec<OutcomeKind> = log
        .outcomes
        .iter()
        .filter(|o| o.path == blocked)
        .map(|o| o.kind)
        .collect();
    assert_eq!(kinds, vec![OutcomeKind::ListFailed, OutcomeKind::DirFailed]);
    assert_eq!(
        log.outcomes[log.position(&blocked).unwrap()].failure,
        Some(FailureKind::AccessDenied)
    );

    assert_eq!(stats.failed, 2);
    // top, sibling/x, sibling
    assert_eq!(stats.succeeded, 3);
    assert_eq!(stats.freed_bytes, 10);
    assert!(blocked.join("inner").exists());
    assert!(!p.join("sibling").exists());
}

#[cfg(unix)]
#[test]
fn test_symlinked_directory_is_not_followed() {
    let outside = TempDir::new().unwrap();
    let keep = outside.path().join("keep.txt");
    write_file(&keep, 9);

    let root = TempDir::new().unwrap();
    std::os::unix::fs::symlink(outside.path(), root.path().join("link")).unwrap();

    let mut stats = Stats::new();
    clean_directory(root.path(), &mut stats, &mut EventLog::new());

    assert_eq!(stats.succeeded, 1);
    assert!(keep.exists(), "Files behind a symlink must survive");
    assert!(!root.path().join("link").exists());
}

// ─── Run driver ──────────────────────────────────────────────────────────────

#[test]
fn test_clean_targets_reports_per_target() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_file(&first.path().join("a"), 100);
    write_file(&second.path().join("sub/b"), 300);
    let missing = second.path().join("gone");

    let targets = vec![
        CleanupTarget::new("First", first.path()),
        CleanupTarget::new("Second", second.path()),
        CleanupTarget::new("Missing", &missing),
    ];

    let mut log = EventLog::new();
    let report = clean_targets(&targets, &mut log);

    assert_eq!(report.targets.len(), 3);
    assert_eq!(report.targets[0].label, "First");
    assert_eq!(report.targets[0].succeeded, 1);
    assert_eq!(report.targets[0].freed_bytes, 100);
    assert_eq!(report.targets[1].succeeded, 2);
    assert_eq!(report.targets[1].freed_bytes, 300);
    assert_eq!(report.targets[2].failed, 1);

    assert_eq!(report.totals.succeeded, 3);
    assert_eq!(report.totals.failed, 1);
    assert_eq!(report.totals.freed_bytes, 400);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].path, missing);
    assert_eq!(log.outcomes.len(), 4);
}
