//! Live statistics panel.
//!
//! Three colored lines drawn at a fixed row near the bottom of the terminal
//! window and overwritten in place after every outcome, so the totals update
//! without scrolling the regular "Cleaning ..." log lines.

use colored::Colorize;
use crossterm::{cursor, queue, style::Print, terminal};
use std::io::{self, Write};
use tracing::debug;

use crate::cleaner::{Observer, Outcome, Stats};
use crate::common::format::{fit_width, format_mb};
use crate::targets::CleanupTarget;

/// Used when the terminal size cannot be queried
const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Rows the panel occupies; also the smallest usable offset
pub const PANEL_LINES: u16 = 3;

pub struct StatusPanel<W: Write> {
    out: W,
    /// Rows above the bottom edge where the first panel line goes,
    /// never less than `PANEL_LINES`
    offset: u16,
    /// Draw the panel; when false only the per-target lines are printed
    live: bool,
}

impl<W: Write> StatusPanel<W> {
    pub fn new(out: W, offset: u16, live: bool) -> Self {
        Self {
            out,
            offset: offset.max(PANEL_LINES),
            live,
        }
    }

    /// The three panel lines, uncolored
    pub fn lines(stats: &Stats) -> [String; 3] {
        [
            format!("Deleted: {} files/directories", stats.succeeded),
            format!("Failed: {} files/directories", stats.failed),
            format!("Freed: {}", format_mb(stats.freed_bytes)),
        ]
    }

    /// Draw the panel for a window of `width` x `height` cells and put the
    /// cursor back where it was.
    pub fn render_at(&mut self, stats: &Stats, width: u16, height: u16) -> io::Result<()> {
        let top = height.saturating_sub(self.offset);
        let [ok, failed, freed] = Self::lines(stats);
        let width = width as usize;

        queue!(self.out, cursor::SavePosition, cursor::MoveTo(0, top))?;
        queue!(self.out, Print(fit_width(&ok, width).green()), cursor::MoveToNextLine(1))?;
        queue!(self.out, Print(fit_width(&failed, width).red()), cursor::MoveToNextLine(1))?;
        queue!(self.out, Print(fit_width(&freed, width).yellow()))?;
        queue!(self.out, cursor::RestorePosition)?;
        self.out.flush()
    }

    fn refresh(&mut self, stats: &Stats) {
        if !self.live {
            return;
        }
        let (width, height) = terminal::size().unwrap_or(FALLBACK_SIZE);
        if let Err(e) = self.render_at(stats, width, height) {
            debug!(error = %e, "failed to draw status panel");
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Observer for StatusPanel<W> {
    fn on_target(&mut self, target: &CleanupTarget) {
        let written = writeln!(self.out, "Cleaning {}...", target.label);
        if let Err(e) = written.and_then(|_| self.out.flush()) {
            debug!(error = %e, "failed to write target line");
        }
    }

    fn on_outcome(&mut self, _outcome: &Outcome, stats: &Stats) {
        self.refresh(stats);
    }
}
