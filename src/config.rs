//! Configuration System
//!
//! Loads configuration from a TOML file with environment variable
//! overrides. Every field has a default, so an empty or missing file is
//! a valid configuration.

use crate::analysis::MIN_DISTINCT_DAYS;
use crate::chart::ChartPeriod;
use crate::insights::DEFAULT_POSITIVE_THRESHOLD;
use crate::store::{BackendKind, DEFAULT_ENTRIES_KEY};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub insights: InsightsConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Entry storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: BackendKind,

    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Key the entry list is stored under
    #[serde(default = "default_key")]
    pub key: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("moodtrack").to_string_lossy().to_string())
        .unwrap_or_else(|| "./moodtrack_data".to_string())
}

fn default_key() -> String {
    DEFAULT_ENTRIES_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            data_dir: default_data_dir(),
            key: default_key(),
        }
    }
}

impl StorageConfig {
    /// Data directory with a leading `~` expanded
    pub fn data_path(&self) -> PathBuf {
        match self.data_dir.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(&self.data_dir)),
            None => PathBuf::from(&self.data_dir),
        }
    }
}

/// Pattern analysis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InsightsConfig {
    /// Distinct days needed before insights are shown
    #[serde(default = "default_min_distinct_days")]
    pub min_distinct_days: usize,

    /// Overall average above which positive-mood suggestions appear
    #[serde(default = "default_positive_threshold")]
    pub positive_threshold: f64,

    /// Fixed seed for suggestion choice; random when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_min_distinct_days() -> usize {
    MIN_DISTINCT_DAYS
}

fn default_positive_threshold() -> f64 {
    DEFAULT_POSITIVE_THRESHOLD
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            min_distinct_days: default_min_distinct_days(),
            positive_threshold: default_positive_threshold(),
            seed: None,
        }
    }
}

/// Chart configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub default_period: ChartPeriod,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("moodtrack").join("config.toml")),
            Some(PathBuf::from("./moodtrack.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first candidate file that exists and parses
    ///
    /// Unreadable candidates are skipped with a warning; with none left the
    /// defaults plus environment overrides are used.
    pub fn load_first(config_paths: &[PathBuf]) -> Self {
        for path in config_paths {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Storage overrides
        if let Some(data_dir) = lookup("MOODTRACK_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }
        if let Some(backend) = lookup("MOODTRACK_STORAGE_BACKEND") {
            match backend.parse() {
                Ok(kind) => self.storage.backend = kind,
                Err(e) => tracing::warn!("Ignoring MOODTRACK_STORAGE_BACKEND: {}", e),
            }
        }

        // Insight overrides
        if let Some(seed) = lookup("MOODTRACK_SEED") {
            match seed.parse() {
                Ok(s) => self.insights.seed = Some(s),
                Err(_) => tracing::warn!("Ignoring non-numeric MOODTRACK_SEED: {}", seed),
            }
        }

        // Logging overrides
        if let Some(level) = lookup("MOODTRACK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("MOODTRACK_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Moodtrack Configuration
#
# Environment variables override these settings:
# - MOODTRACK_DATA_DIR
# - MOODTRACK_STORAGE_BACKEND
# - MOODTRACK_SEED
# - MOODTRACK_LOG_LEVEL
# - MOODTRACK_LOG_FORMAT

[storage]
# Backend: file (one JSON file per key), sqlite, or memory (not persisted)
backend = "file"

# Directory for storing data files
data_dir = "~/.local/share/moodtrack"

# Key the entry list is stored under
key = "moodEntries"

[insights]
# Distinct days of entries needed before insights are shown
min_distinct_days = 3

# Overall average above which positive-mood suggestions appear
positive_threshold = 4.5

# Fixed seed for suggestion choice (random when unset)
# seed = 42

[chart]
# Default chart window: week or month
default_period = "week"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.storage.backend, BackendKind::File);
        assert_eq!(config.storage.key, "moodEntries");
        assert_eq!(config.insights.min_distinct_days, 3);
        assert_eq!(config.insights.positive_threshold, 4.5);
        assert_eq!(config.insights.seed, None);
        assert_eq!(config.chart.default_period, ChartPeriod::Week);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.storage.backend, BackendKind::File);
        assert_eq!(config.storage.data_dir, "~/.local/share/moodtrack");
        assert_eq!(config.insights.min_distinct_days, 3);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("moodtrack.toml");
        std::fs::write(
            &path,
            "[storage]\nbackend = \"sqlite\"\n\n[insights]\nseed = 7\n\n[chart]\ndefault_period = \"month\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.storage.backend, BackendKind::Sqlite);
        assert_eq!(config.storage.key, "moodEntries");
        assert_eq!(config.insights.seed, Some(7));
        assert_eq!(config.insights.min_distinct_days, 3);
        assert_eq!(config.chart.default_period, ChartPeriod::Month);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[storage]\nbackend = \"floppy\"\n").unwrap();
        assert!(matches!(Config::load(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_first_skips_broken_candidates() {
        let dir = tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        let good = dir.path().join("good.toml");
        std::fs::write(&broken, "[storage\nbackend = ").unwrap();
        std::fs::write(&good, "[chart]\ndefault_period = \"month\"\n").unwrap();

        let missing = dir.path().join("missing.toml");
        let config = Config::load_first(&[missing.clone(), broken.clone(), good]);
        assert_eq!(config.chart.default_period, ChartPeriod::Month);

        let config = Config::load_first(&[missing, broken]);
        assert_eq!(config.chart.default_period, ChartPeriod::Week);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("MOODTRACK_DATA_DIR", "/tmp/moods"),
            ("MOODTRACK_STORAGE_BACKEND", "memory"),
            ("MOODTRACK_SEED", "99"),
            ("MOODTRACK_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.storage.data_dir, "/tmp/moods");
        assert_eq!(config.storage.backend, BackendKind::Memory);
        assert_eq!(config.insights.seed, Some(99));
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_overrides_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|name| match name {
            "MOODTRACK_STORAGE_BACKEND" => Some("floppy".to_string()),
            "MOODTRACK_SEED" => Some("abc".to_string()),
            _ => None,
        });

        assert_eq!(config.storage.backend, BackendKind::File);
        assert_eq!(config.insights.seed, None);
    }

    #[test]
    fn test_data_path_expands_home() {
        let mut storage = StorageConfig::default();
        storage.data_dir = "/var/lib/moodtrack".to_string();
        assert_eq!(storage.data_path(), PathBuf::from("/var/lib/moodtrack"));

        storage.data_dir = "~/moods".to_string();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(storage.data_path(), home.join("moods"));
        }
    }
}
