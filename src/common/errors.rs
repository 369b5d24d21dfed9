use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading or saving the configuration file.
/// The binary wraps these in `anyhow` at the top level.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to write config '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("unknown config key: {0}")]
    UnknownKey(String),

    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}

/// Errors from parsing a `LABEL=PATH` target
#[derive(Debug, Error)]
pub enum TargetParseError {
    #[error("expected LABEL=PATH, got '{0}'")]
    MissingSeparator(String),

    #[error("target label must not be empty in '{0}'")]
    EmptyLabel(String),

    #[error("target path must be absolute: '{}'", .0.display())]
    RelativePath(PathBuf),
}
