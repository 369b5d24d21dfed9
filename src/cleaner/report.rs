use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use super::engine::clean_directory;
use super::outcome::Outcome;
use super::stats::{Observer, Stats};
use crate::targets::CleanupTarget;

/// Failures kept in the report for display; the counters stay exact.
pub const MAX_REPORTED_FAILURES: usize = 50;

/// Totals for one target
#[derive(Debug, Clone, Serialize)]
pub struct TargetReport {
    pub label: String,
    pub path: PathBuf,
    pub succeeded: u64,
    pub failed: u64,
    pub freed_bytes: u64,
}

/// Report from a full run over all targets
#[derive(Debug, Clone, Serialize)]
pub struct CleanReport {
    pub targets: Vec<TargetReport>,
    pub totals: Stats,
    pub duration_secs: f64,
    /// First failures encountered, in order
    pub failures: Vec<Outcome>,
}

/// Forwards to the caller's observer while keeping a sample of failures
struct Recorder<'a> {
    inner: &'a mut dyn Observer,
    failures: Vec<Outcome>,
}

impl Observer for Recorder<'_> {
    fn on_target(&mut self, target: &CleanupTarget) {
        self.inner.on_target(target);
    }

    fn on_outcome(&mut self, outcome: &Outcome, stats: &Stats) {
        if !outcome.is_success() && self.failures.len() < MAX_REPORTED_FAILURES {
            self.failures.push(outcome.clone());
        }
        self.inner.on_outcome(outcome, stats);
    }

    fn on_target_done(&mut self, target: &CleanupTarget, stats: &Stats) {
        self.inner.on_target_done(target, stats);
    }
}

/// Clean every target in order, sharing one set of running totals
pub fn clean_targets(targets: &[CleanupTarget], observer: &mut dyn Observer) -> CleanReport {
    let start = Instant::now();
    let mut stats = Stats::new();
    let mut recorder = Recorder {
        inner: observer,
        failures: Vec::new(),
    };
    let mut reports = Vec::with_capacity(targets.len());

    for target in targets {
        info!(label = %target.label, path = %target.path.display(), "cleaning target");
        recorder.on_target(target);

        let before = stats;
        clean_directory(&target.path, &mut stats, &mut recorder);
        let delta = stats.since(&before);

        info!(
            label = %target.label,
            succeeded = delta.succeeded,
            failed = delta.failed,
            freed_bytes = delta.freed_bytes,
            "target finished"
        );
        recorder.on_target_done(target, &stats);

        reports.push(TargetReport {
            label: target.label.clone(),
            path: target.path.clone(),
            succeeded: delta.succeeded,
            failed: delta.failed,
            freed_bytes: delta.freed_bytes,
        });
    }

    CleanReport {
        targets: reports,
        totals: stats,
        duration_secs: start.elapsed().as_secs_f64(),
        failures: recorder.failures,
    }
}
