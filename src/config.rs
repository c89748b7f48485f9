use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Operational limits for one discovery call.
///
/// Immutable for the duration of the call. The defaults are the reference
/// behavior; hosts may override them via the TOML config or CLI flags.
#[derive(Debug, Clone)]
pub struct Limits {
    /// Files larger than this are silently excluded.
    pub max_file_bytes: u64,
    /// The sorted candidate list is truncated to this many files.
    pub max_file_count: usize,
    /// Upper bound on the `git ls-files` invocation.
    pub git_timeout: Duration,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_bytes: 1024 * 1024,
            max_file_count: 500,
            git_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LimitsConfig {
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    #[serde(default = "default_max_file_count")]
    pub max_file_count: usize,
    #[serde(default = "default_git_timeout_secs")]
    pub git_timeout_secs: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
            max_file_count: default_max_file_count(),
            git_timeout_secs: default_git_timeout_secs(),
        }
    }
}

fn default_max_file_bytes() -> u64 {
    1024 * 1024
}
fn default_max_file_count() -> usize {
    500
}
fn default_git_timeout_secs() -> u64 {
    10
}

impl From<&LimitsConfig> for Limits {
    fn from(c: &LimitsConfig) -> Self {
        Self {
            max_file_bytes: c.max_file_bytes,
            max_file_count: c.max_file_count,
            git_timeout: Duration::from_secs(c.git_timeout_secs),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.limits.max_file_bytes == 0 {
        anyhow::bail!("limits.max_file_bytes must be > 0");
    }
    if config.limits.max_file_count == 0 {
        anyhow::bail!("limits.max_file_count must be > 0");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_behavior() {
        let limits = Limits::default();
        assert_eq!(limits.max_file_bytes, 1024 * 1024);
        assert_eq!(limits.max_file_count, 500);
        assert_eq!(limits.git_timeout, Duration::from_secs(10));
    }

    #[test]
    fn load_config_applies_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fragments.toml");
        std::fs::write(&path, "[limits]\nmax_file_count = 20\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.limits.max_file_count, 20);
        assert_eq!(config.limits.max_file_bytes, 1024 * 1024);
    }

    #[test]
    fn load_config_rejects_zero_count() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fragments.toml");
        std::fs::write(&path, "[limits]\nmax_file_count = 0\n").unwrap();

        assert!(load_config(&path).is_err());
    }
}
