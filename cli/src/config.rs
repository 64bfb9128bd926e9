use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use battinfo::{Backend, BatteryOptions, TempUnit, TimeFormat, DEFAULT_REFRESH_INTERVAL_MS};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;

use crate::cli::BatteryArgs;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to write config: {0}")]
    Write(#[from] std::io::Error),
    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// `None` means logging is disabled.
    pub fn as_tracing_level(&self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" | "none" => Ok(LogLevel::Off),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub index: usize,
    pub time_format: TimeFormat,
    pub temp_unit: TempUnit,
    pub refresh_ms: u32,
    pub decimals: usize,
    pub backend: Backend,
    /// Upper bound on a single hardware read; `0` disables the limit.
    pub read_timeout_ms: u64,
    pub log_level: LogLevel,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            index: 0,
            time_format: TimeFormat::Human,
            temp_unit: TempUnit::DegF,
            refresh_ms: DEFAULT_REFRESH_INTERVAL_MS,
            decimals: 1,
            backend: Backend::Auto,
            read_timeout_ms: 2000,
            log_level: LogLevel::Warn,
        }
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("battinfo")
}

pub fn runtime_dir() -> PathBuf {
    dirs::runtime_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("battinfo")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

impl UserConfig {
    /// Load the user config, or defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Apply command-line overrides on top of the file values.
    pub fn merge_with_args(&mut self, args: &BatteryArgs) {
        if let Some(index) = args.index {
            self.index = index;
        }
        if let Some(time_format) = args.time_format {
            self.time_format = time_format;
        }
        if let Some(temp_unit) = args.temp_unit {
            self.temp_unit = temp_unit;
        }
        if let Some(ms) = args.refresh_ms {
            self.refresh_ms = ms;
        }
        if let Some(decimals) = args.decimals {
            self.decimals = decimals;
        }
        if let Some(backend) = args.backend {
            self.backend = backend;
        }
    }

    pub fn battery_options(&self) -> BatteryOptions {
        BatteryOptions::default()
            .index(self.index)
            .time_format(self.time_format)
            .temp_unit(self.temp_unit)
            .refresh_interval_ms(self.refresh_ms)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_ms > 0).then(|| Duration::from_millis(self.read_timeout_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: UserConfig = toml::from_str(
            r#"
            temp_unit = "celsius"
            refresh_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            UserConfig {
                temp_unit: TempUnit::DegC,
                refresh_ms: 250,
                ..UserConfig::default()
            }
        );
    }

    #[test]
    fn test_every_field_parses() {
        let config: UserConfig = toml::from_str(
            r#"
            index = 1
            time_format = "minutes"
            temp_unit = "f"
            refresh_ms = 0
            decimals = 3
            backend = "system"
            read_timeout_ms = 0
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.index, 1);
        assert_eq!(config.time_format, TimeFormat::Minutes);
        assert_eq!(config.temp_unit, TempUnit::DegF);
        assert_eq!(config.decimals, 3);
        assert_eq!(config.backend, Backend::System);
        assert_eq!(config.read_timeout(), None);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "time_format = \"fortnights\"").unwrap();

        assert!(matches!(
            UserConfig::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = UserConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, UserConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = UserConfig {
            index: 2,
            temp_unit: TempUnit::DegC,
            ..UserConfig::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(UserConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_args_override_file() {
        let mut config = UserConfig {
            refresh_ms: 1000,
            ..UserConfig::default()
        };
        config.merge_with_args(&BatteryArgs {
            index: Some(1),
            time_format: Some(TimeFormat::Seconds),
            refresh_ms: None,
            ..BatteryArgs::default()
        });

        assert_eq!(config.index, 1);
        assert_eq!(config.time_format, TimeFormat::Seconds);
        assert_eq!(config.refresh_ms, 1000);

        let options = config.battery_options();
        assert_eq!(options.index, 1);
        assert_eq!(options.refresh_interval_ms, 1000);
    }

    #[test]
    fn test_log_level() {
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!(LogLevel::Off.as_tracing_level(), None);
        assert_eq!(LogLevel::Trace.as_tracing_level(), Some(Level::TRACE));
        assert!("loud".parse::<LogLevel>().is_err());
    }
}
