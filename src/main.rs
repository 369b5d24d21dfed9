use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::io::{self, IsTerminal};
use std::path::Path;

use cachesweep::cleaner::{self, Silent};
use cachesweep::cli::args::{Cli, Commands, CompletionShell, ConfigAction, OutputFormat};
use cachesweep::cli::output;
use cachesweep::cli::panel::StatusPanel;
use cachesweep::common::config::Config;
use cachesweep::targets::{self, CleanupTarget};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("cachesweep=debug")
            .with_writer(io::stderr)
            .init();
    }

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);

    match cli.command {
        Commands::Clean {
            ref targets,
            ref only,
            no_pause,
        } => cmd_clean(&cli, &config_path, targets, only, no_pause),

        Commands::Targets { ref targets } => cmd_targets(&cli, &config_path, targets),

        Commands::Config { ref action } => cmd_config(action, &config_path),

        Commands::Completions { ref shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            let shell = match shell {
                CompletionShell::Bash => clap_complete::Shell::Bash,
                CompletionShell::Zsh => clap_complete::Shell::Zsh,
                CompletionShell::Fish => clap_complete::Shell::Fish,
            };
            clap_complete::generate(shell, &mut cmd, "cachesweep", &mut io::stdout());
            Ok(())
        }
    }
}

fn output_format(cli: &Cli) -> OutputFormat {
    if cli.quiet {
        OutputFormat::Quiet
    } else {
        cli.format
    }
}

// ─── Clean ────────────────────────────────────────────────────────────────────

fn cmd_clean(
    cli: &Cli,
    config_path: &Path,
    explicit: &[CleanupTarget],
    only: &[String],
    no_pause: bool,
) -> Result<()> {
    let config = Config::load_from(config_path)?;
    let targets = targets::resolve(&config, explicit, only);
    let format = output_format(cli);

    if targets.is_empty() {
        if format == OutputFormat::Human {
            println!("  {} No targets selected, nothing to clean.", "✨");
        }
        return Ok(());
    }

    let report = match format {
        OutputFormat::Human => {
            println!("Cleaning...");
            let live = io::stdout().is_terminal();
            let mut panel = StatusPanel::new(io::stdout(), config.panel_offset, live);
            cleaner::clean_targets(&targets, &mut panel)
        }
        OutputFormat::Json | OutputFormat::Quiet => cleaner::clean_targets(&targets, &mut Silent),
    };

    match format {
        OutputFormat::Human => output::print_clean_report(&report),
        OutputFormat::Json => output::print_clean_json(&report)?,
        OutputFormat::Quiet => output::print_clean_quiet(&report),
    }

    if format == OutputFormat::Human && config.pause_on_exit && !no_pause {
        output::pause_for_key()?;
    }

    Ok(())
}

// ─── Targets ──────────────────────────────────────────────────────────────────

fn cmd_targets(cli: &Cli, config_path: &Path, explicit: &[CleanupTarget]) -> Result<()> {
    let config = Config::load_from(config_path)?;
    let targets = targets::resolve(&config, explicit, &[]);

    match output_format(cli) {
        OutputFormat::Human => output::print_targets(&targets),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&targets)?),
        OutputFormat::Quiet => {
            for t in &targets {
                println!("{}\t{}", t.label, t.path.display());
            }
        }
    }
    Ok(())
}

// ─── Config ───────────────────────────────────────────────────────────────────

fn cmd_config(action: &ConfigAction, config_path: &Path) -> Result<()> {
    match action {
        ConfigAction::Init => {
            if config_path.exists() {
                println!("  {} Config already exists at {}", "ℹ️", config_path.display());
                return Ok(());
            }
            Config::default().save_to(config_path)?;
            println!("  {} Created {}", "✓".green(), config_path.display());
            Ok(())
        }
        ConfigAction::Show => {
            let config = Config::load_from(config_path)?;
            let rendered = toml::to_string_pretty(&config).context("Failed to render config")?;
            println!("{}", rendered);
            Ok(())
        }
        ConfigAction::Reset => {
            Config::default().save_to(config_path)?;
            println!("  {} Configuration reset to defaults", "✓".green());
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_from(config_path)?;
            config.set(key, value)?;
            config.save_to(config_path)?;
            println!("  {} Set {} = {}", "✓".green(), key, value);
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", config_path.display());
            Ok(())
        }
    }
}
