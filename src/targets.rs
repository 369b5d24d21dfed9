use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::common::config::Config;
use crate::common::errors::TargetParseError;

/// A labeled root whose contents get cleared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupTarget {
    pub label: String,
    pub path: PathBuf,
}

impl CleanupTarget {
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

/// Parses `LABEL=PATH`
impl FromStr for CleanupTarget {
    type Err = TargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, path) = s
            .split_once('=')
            .ok_or_else(|| TargetParseError::MissingSeparator(s.to_string()))?;
        let label = label.trim();
        if label.is_empty() {
            return Err(TargetParseError::EmptyLabel(s.to_string()));
        }
        let path = PathBuf::from(path.trim());
        if !path.is_absolute() {
            return Err(TargetParseError::RelativePath(path));
        }
        Ok(CleanupTarget::new(label, path))
    }
}

// ─── Default tables ───────────────────────────────────────────────────────────

#[cfg(windows)]
pub fn default_targets() -> Vec<CleanupTarget> {
    let mut targets = vec![CleanupTarget::new("System temp folder", std::env::temp_dir())];
    if let Some(local) = dirs::data_local_dir() {
        targets.push(CleanupTarget::new("User temp folder", local.join("Temp")));
    }
    targets.push(CleanupTarget::new(
        "Windows Update cache",
        r"C:\Windows\SoftwareDistribution\Download",
    ));
    targets.push(CleanupTarget::new("Prefetch files", r"C:\Windows\Prefetch"));
    targets.push(CleanupTarget::new(
        "Error reports",
        r"C:\ProgramData\Microsoft\Windows\WER",
    ));
    if let Some(local) = dirs::data_local_dir() {
        targets.push(CleanupTarget::new(
            "Edge browser cache",
            local.join(r"Microsoft\Edge\User Data\Default\Cache"),
        ));
    }
    dedup(targets)
}

#[cfg(target_os = "macos")]
pub fn default_targets() -> Vec<CleanupTarget> {
    let mut targets = vec![CleanupTarget::new("System temp folder", std::env::temp_dir())];
    if let Some(home) = dirs::home_dir() {
        targets.push(CleanupTarget::new("User caches", home.join("Library/Caches")));
        targets.push(CleanupTarget::new("User logs", home.join("Library/Logs")));
    }
    dedup(targets)
}

#[cfg(all(unix, not(target_os = "macos")))]
pub fn default_targets() -> Vec<CleanupTarget> {
    let mut targets = vec![CleanupTarget::new("System temp folder", std::env::temp_dir())];
    if let Some(cache) = dirs::cache_dir() {
        targets.push(CleanupTarget::new("User cache", cache));
    }
    dedup(targets)
}

/// Drop later entries that point at a path already listed
fn dedup(targets: Vec<CleanupTarget>) -> Vec<CleanupTarget> {
    let mut out: Vec<CleanupTarget> = Vec::with_capacity(targets.len());
    for t in targets {
        if !out.iter().any(|o| o.path == t.path) {
            out.push(t);
        }
    }
    out
}

/// Work out which targets a run should clean.
///
/// Explicit targets replace the table entirely. Otherwise the OS defaults
/// are extended by the config's extra targets and filtered by its excluded
/// labels. `only`, when non-empty, keeps just the named labels.
pub fn resolve(
    config: &Config,
    explicit: &[CleanupTarget],
    only: &[String],
) -> Vec<CleanupTarget> {
    let mut targets = if explicit.is_empty() {
        let mut all = default_targets();
        all.extend(config.extra_targets.iter().cloned());
        all.retain(|t| !config.is_excluded(&t.label));
        dedup(all)
    } else {
        explicit.to_vec()
    };

    if !only.is_empty() {
        targets.retain(|t| only.iter().any(|o| o.eq_ignore_ascii_case(&t.label)));
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abs(p: &str) -> PathBuf {
        std::env::temp_dir().join(p)
    }

    #[test]
    fn test_parse_target() {
        let raw = format!("Scratch={}", abs("scratch").display());
        let t: CleanupTarget = raw.parse().unwrap();
        assert_eq!(t.label, "Scratch");
        assert_eq!(t.path, abs("scratch"));
    }

    #[test]
    fn test_parse_target_errors() {
        assert!(matches!(
            "no-separator".parse::<CleanupTarget>(),
            Err(TargetParseError::MissingSeparator(_))
        ));
        assert!(matches!(
            format!("={}", abs("x").display()).parse::<CleanupTarget>(),
            Err(TargetParseError::EmptyLabel(_))
        ));
        assert!(matches!(
            "Rel=some/relative".parse::<CleanupTarget>(),
            Err(TargetParseError::RelativePath(_))
        ));
    }

    #[test]
    fn test_defaults_start_with_temp() {
        let targets = default_targets();
        assert!(!targets.is_empty());
        assert_eq!(targets[0].path, std::env::temp_dir());
    }

    #[test]
    fn test_resolve_explicit_replaces_defaults() {
        let config = Config::default();
        let explicit = vec![CleanupTarget::new("Only", abs("only"))];
        let targets = resolve(&config, &explicit, &[]);
        assert_eq!(targets, explicit);
    }

    #[test]
    fn test_resolve_config_extras_and_excludes() {
        let mut config = Config::default();
        config.extra_targets.push(CleanupTarget::new("Extra", abs("extra-target")));
        config.exclude_labels.push("System temp folder".to_string());

        let targets = resolve(&config, &[], &[]);
        assert!(targets.iter().any(|t| t.label == "Extra"));
        assert!(!targets.iter().any(|t| t.label == "System temp folder"));
    }

    #[test]
    fn test_resolve_only_filter() {
        let config = Config::default();
        let explicit = vec![
            CleanupTarget::new("A", abs("a")),
            CleanupTarget::new("B", abs("b")),
        ];
        let targets = resolve(&config, &explicit, &["b".to_string()]);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].label, "B");
    }
}
