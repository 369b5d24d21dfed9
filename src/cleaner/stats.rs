use serde::Serialize;
use std::path::Path;

use super::outcome::Outcome;
use crate::targets::CleanupTarget;

/// Running totals for a cleanup run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub succeeded: u64,
    pub failed: u64,
    pub freed_bytes: u64,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one outcome into the totals
    pub fn record(&mut self, outcome: &Outcome) {
        if outcome.is_success() {
            self.succeeded += 1;
            self.freed_bytes += outcome.size_bytes;
        } else {
            self.failed += 1;
        }
    }

    /// Total number of terminal outcomes seen so far
    pub fn attempts(&self) -> u64 {
        self.succeeded + self.failed
    }

    /// Counters accumulated since `earlier` was taken
    pub fn since(&self, earlier: &Stats) -> Stats {
        Stats {
            succeeded: self.succeeded - earlier.succeeded,
            failed: self.failed - earlier.failed,
            freed_bytes: self.freed_bytes - earlier.freed_bytes,
        }
    }
}

/// Receives every outcome the engine produces, after it has been folded into
/// the running totals.
pub trait Observer {
    /// Called when the driver moves on to a new target
    fn on_target(&mut self, _target: &CleanupTarget) {}

    fn on_outcome(&mut self, outcome: &Outcome, stats: &Stats);

    /// Called once a target has been fully processed
    fn on_target_done(&mut self, _target: &CleanupTarget, _stats: &Stats) {}
}

/// Observer that ignores everything
#[derive(Debug, Default)]
pub struct Silent;

impl Observer for Silent {
    fn on_outcome(&mut self, _outcome: &Outcome, _stats: &Stats) {}
}

/// Observer that keeps every outcome in order
#[derive(Debug, Default)]
pub struct EventLog {
    pub outcomes: Vec<Outcome>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of the first outcome for `path`, if any
    pub fn position(&self, path: &Path) -> Option<usize> {
        self.outcomes.iter().position(|o| o.path == path)
    }
}

impl Observer for EventLog {
    fn on_outcome(&mut self, outcome: &Outcome, _stats: &Stats) {
        self.outcomes.push(outcome.clone());
    }
}
