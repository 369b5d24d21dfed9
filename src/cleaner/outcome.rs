use serde::Serialize;
use std::io;
use std::path::PathBuf;

/// What happened to a single filesystem entry during a cleanup pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    FileDeleted,
    FileFailed,
    DirDeleted,
    DirFailed,
    /// A directory (or one of its entries) could not be listed
    ListFailed,
}

impl OutcomeKind {
    pub fn is_success(self) -> bool {
        matches!(self, OutcomeKind::FileDeleted | OutcomeKind::DirDeleted)
    }
}

/// Why an operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The entry vanished or never existed
    NotFound,
    /// Blocked by permissions
    AccessDenied,
    /// Held open by another process, or a directory that is not empty
    Locked,
    /// Any other I/O error
    Io,
}

impl FailureKind {
    pub fn from_io(err: &io::Error) -> Self {
        // ERROR_SHARING_VIOLATION and ERROR_LOCK_VIOLATION surface as a bare
        // ErrorKind::Other
        #[cfg(windows)]
        if matches!(err.raw_os_error(), Some(32) | Some(33)) {
            return FailureKind::Locked;
        }

        match err.kind() {
            io::ErrorKind::NotFound => FailureKind::NotFound,
            io::ErrorKind::PermissionDenied | io::ErrorKind::ReadOnlyFilesystem => {
                FailureKind::AccessDenied
            }
            io::ErrorKind::ResourceBusy | io::ErrorKind::DirectoryNotEmpty => FailureKind::Locked,
            _ => FailureKind::Io,
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::NotFound => write!(f, "not found"),
            FailureKind::AccessDenied => write!(f, "access denied"),
            FailureKind::Locked => write!(f, "locked"),
            FailureKind::Io => write!(f, "I/O error"),
        }
    }
}

/// A terminal result of one delete (or listing) attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub path: PathBuf,
    /// Bytes freed; zero for directories and failures
    pub size_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl Outcome {
    pub fn file_deleted(path: PathBuf, size_bytes: u64) -> Self {
        Self {
            kind: OutcomeKind::FileDeleted,
            path,
            size_bytes,
            failure: None,
        }
    }

    pub fn dir_deleted(path: PathBuf) -> Self {
        Self {
            kind: OutcomeKind::DirDeleted,
            path,
            size_bytes: 0,
            failure: None,
        }
    }

    pub fn failed(kind: OutcomeKind, path: PathBuf, err: &io::Error) -> Self {
        Self {
            kind,
            path,
            size_bytes: 0,
            failure: Some(FailureKind::from_io(err)),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind.is_success()
    }
}
