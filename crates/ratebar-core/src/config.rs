use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::progress::{DEFAULT_HISTORY_CAPACITY, DEFAULT_SAMPLE_INTERVAL};
use crate::terminal::FALLBACK_WIDTH;

/// Rate window and message column settings (optional `[bar]` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarConfig {
    /// Number of samples kept for rate estimation.
    pub history_capacity: usize,
    /// Minimum spacing between samples in milliseconds.
    pub sample_interval_ms: u64,
    /// Fixed message column width; the message's own width if unset.
    #[serde(default)]
    pub message_width: Option<usize>,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            sample_interval_ms: DEFAULT_SAMPLE_INTERVAL.as_millis() as u64,
            message_width: None,
        }
    }
}

/// Global configuration loaded from `~/.config/ratebar/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatebarConfig {
    /// How often the display loop redraws the bar.
    pub refresh_interval_ms: u64,
    /// Columns assumed when the terminal width cannot be queried.
    pub fallback_width: usize,
    #[serde(default)]
    pub bar: BarConfig,
}

impl Default for RatebarConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 100,
            fallback_width: FALLBACK_WIDTH,
            bar: BarConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ratebar")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RatebarConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<RatebarConfig> {
    if !path.exists() {
        let default_cfg = RatebarConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)
            .with_context(|| format!("failed to write default config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let cfg: RatebarConfig =
        toml::from_str(&data).with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::BarOptions;
    use std::time::Duration;

    #[test]
    fn default_config_values() {
        let cfg = RatebarConfig::default();
        assert_eq!(cfg.refresh_interval_ms, 100);
        assert_eq!(cfg.fallback_width, 80);
        assert_eq!(cfg.bar.history_capacity, 10);
        assert_eq!(cfg.bar.sample_interval_ms, 1000);
        assert!(cfg.bar.message_width.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = RatebarConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: RatebarConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_without_bar_section() {
        let toml = r#"
            refresh_interval_ms = 250
            fallback_width = 120
        "#;
        let cfg: RatebarConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.refresh_interval_ms, 250);
        assert_eq!(cfg.fallback_width, 120);
        assert_eq!(cfg.bar, BarConfig::default());
    }

    #[test]
    fn bar_section_maps_to_options() {
        let toml = r#"
            refresh_interval_ms = 100
            fallback_width = 80

            [bar]
            history_capacity = 5
            sample_interval_ms = 500
            message_width = 12
        "#;
        let cfg: RatebarConfig = toml::from_str(toml).unwrap();
        let opts = BarOptions::from(&cfg.bar);
        assert_eq!(opts.history_capacity, 5);
        assert_eq!(opts.sample_interval, Duration::from_millis(500));
        assert_eq!(opts.message_width, Some(12));
    }

    #[test]
    fn load_or_init_writes_default_then_reads_it_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let created = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        let loaded = load_or_init_at(&path).unwrap();
        assert_eq!(created, loaded);
    }

    #[test]
    fn load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "refresh_interval_ms = \"soon\"").unwrap();
        let err = load_or_init_at(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid config"));
    }
}
