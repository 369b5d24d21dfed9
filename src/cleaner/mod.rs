pub mod engine;
pub mod fs;
pub mod outcome;
pub mod report;
pub mod stats;

pub use engine::{clean_directory, clean_directory_with};
pub use fs::{Entry, Filesystem, LocalFs};
pub use outcome::{FailureKind, Outcome, OutcomeKind};
pub use report::{clean_targets, CleanReport, TargetReport};
pub use stats::{EventLog, Observer, Silent, Stats};
