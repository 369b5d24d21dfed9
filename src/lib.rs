//! # cachesweep
//!
//! Empties the operating system's temp and cache directories.
//!
//! Every entry below each target root is deleted depth-first, files before
//! subdirectories, with each directory removed only after its contents.
//! Every delete attempt succeeds or fails on its own and is tallied into
//! running totals (deleted, failed, bytes freed) that a live terminal panel
//! displays as the run progresses. Target roots themselves are kept.

pub mod cleaner;
pub mod cli;
pub mod common;
pub mod targets;

pub use cleaner::{clean_directory, clean_targets, CleanReport, Observer, Outcome, Stats};
pub use targets::CleanupTarget;
