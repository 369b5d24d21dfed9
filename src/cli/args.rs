use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::targets::CleanupTarget;

/// cachesweep — clears OS cache and temp directories
#[derive(Parser, Debug)]
#[command(
    name = "cachesweep",
    version,
    about = "Recursively clears cache and temp directories with a live tally",
    long_about = "cachesweep empties the operating system's temp and cache folders,\n\
                   counting every deleted and failed entry and the space freed.",
    after_help = "EXAMPLES:\n  \
        cachesweep clean                               Clean the default targets\n  \
        cachesweep clean --only \"User cache\"           Clean a single default target\n  \
        cachesweep clean --target Build=/tmp/build     Clean an explicit directory\n  \
        cachesweep clean --format json --no-pause      Machine-readable report\n  \
        cachesweep targets                             Show what would be cleaned\n  \
        cachesweep config show                         Print the configuration"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the configuration file
    #[arg(long, global = true, value_name = "PATH", env = "CACHESWEEP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode — minimal output
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Delete everything inside the cleanup targets
    Clean {
        /// Clean this LABEL=PATH instead of the default targets (repeatable)
        #[arg(long = "target", value_name = "LABEL=PATH")]
        targets: Vec<CleanupTarget>,

        /// Only clean targets with these labels
        #[arg(long, value_delimiter = ',')]
        only: Vec<String>,

        /// Exit immediately instead of waiting for a keypress
        #[arg(long)]
        no_pause: bool,
    },

    /// List the targets a clean would process
    Targets {
        /// Use this LABEL=PATH instead of the default targets (repeatable)
        #[arg(long = "target", value_name = "LABEL=PATH")]
        targets: Vec<CleanupTarget>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset to default configuration
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },

    /// Write a default config file if none exists
    Init,

    /// Print the config file location
    Path,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
