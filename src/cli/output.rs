use anyhow::Result;
use colored::*;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use std::io::{self, IsTerminal, Write};

use crate::cleaner::CleanReport;
use crate::common::format::{self, format_mb, format_path, format_size};
use crate::targets::CleanupTarget;

/// Print a clean report in human-readable format
pub fn print_clean_report(report: &CleanReport) {
    println!();
    println!("  {} {}", "✓".green(), "Cleanup complete!".bold());
    println!("{}", "─".repeat(60).dimmed());

    for t in &report.targets {
        println!(
            "  {:<24} {} deleted, {} failed, {}",
            t.label,
            t.succeeded.to_string().green(),
            t.failed.to_string().red(),
            format_size(t.freed_bytes).yellow(),
        );
    }

    println!("{}", "─".repeat(60).dimmed());
    println!(
        "  Deleted {}  •  Failed {}  •  Freed {}  •  {}",
        report.totals.succeeded.to_string().green(),
        report.totals.failed.to_string().red(),
        format_mb(report.totals.freed_bytes).yellow(),
        format::format_duration(report.duration_secs).cyan(),
    );

    if !report.failures.is_empty() {
        println!();
        println!(
            "  {} First {} failures:",
            "⚠".yellow(),
            report.failures.len().min(10)
        );
        for (i, f) in report.failures.iter().enumerate().take(10) {
            let reason = f
                .failure
                .map(|k| k.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            println!(
                "    {} {} ({})",
                format!("{}.", i + 1).dimmed(),
                format_path(&f.path).dimmed(),
                reason
            );
        }
        if report.totals.failed > 10 {
            println!(
                "    ... and {} more",
                (report.totals.failed - 10).to_string().dimmed()
            );
        }
    }
    println!();
}

/// Print a clean report as JSON
pub fn print_clean_json(report: &CleanReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Print a minimal summary
pub fn print_clean_quiet(report: &CleanReport) {
    println!(
        "{}  {}  {}",
        format_size(report.totals.freed_bytes),
        report.totals.succeeded,
        report.totals.failed
    );
}

/// Print the resolved target list
pub fn print_targets(targets: &[CleanupTarget]) {
    println!();
    println!("  {} Cleanup targets", "🧹");
    println!("{}", "─".repeat(60).dimmed());
    if targets.is_empty() {
        println!("  No targets selected.");
    }
    for t in targets {
        let marker = if t.path.is_dir() {
            "●".green()
        } else {
            "○".dimmed()
        };
        println!("  {} {:<24} {}", marker, t.label.bold(), format_path(&t.path).dimmed());
    }
    println!();
}

/// Block until one key is pressed, if a person is at the terminal
pub fn pause_for_key() -> Result<()> {
    if !io::stdin().is_terminal() {
        return Ok(());
    }
    print!("Press any key to exit...");
    io::stdout().flush()?;

    terminal::enable_raw_mode()?;
    let result = wait_for_press();
    terminal::disable_raw_mode()?;
    println!();
    result
}

fn wait_for_press() -> Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}
