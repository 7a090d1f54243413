//! TOML configuration schema types for studio-dashboard.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so an empty file is a valid configuration.
//!
//! Duration fields use human-readable strings (e.g. `"250ms"`, `"1s"`)
//! parsed by the `humantime` crate.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// ```toml
/// [dashboard]
/// [storage]
/// [logging]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Dashboard editor settings.
    pub dashboard: DashboardConfig,
    /// Where organization settings are stored.
    pub storage: StorageConfig,
    /// Log verbosity and destination.
    pub logging: LoggingConfig,
}

impl Config {
    /// Checks every value that parses as TOML but may still be unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dashboard.tick_rate()?;
        if crate::settings::validate_org_id(&self.dashboard.organization).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "dashboard.organization",
                message: format!(
                    "'{}' must be non-empty and contain only letters, digits, '-' or '_'",
                    self.dashboard.organization
                ),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// `[dashboard]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Organization whose layout is edited when `--org` is not given.
    pub organization: String,
    /// Redraw interval of the terminal editor (e.g. `"250ms"`).
    pub tick_rate: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            organization: "default".to_string(),
            tick_rate: "250ms".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Parses [`tick_rate`](Self::tick_rate).
    pub fn tick_rate(&self) -> Result<Duration, ConfigError> {
        let rate = humantime::parse_duration(&self.tick_rate).map_err(|e| {
            ConfigError::InvalidValue {
                field: "dashboard.tick_rate",
                message: e.to_string(),
            }
        })?;
        if rate.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "dashboard.tick_rate",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(rate)
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// `[storage]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory. Empty means the platform data directory.
    /// Tilde (`~`) is expanded.
    pub data_dir: String,
}

impl StorageConfig {
    /// Resolved data directory.
    pub fn data_dir(&self) -> PathBuf {
        if self.data_dir.is_empty() {
            xdg::data_dir()
        } else {
            xdg::expand_tilde(&self.data_dir)
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// `[logging]` section. `SDASH_LOG` overrides `level` when set.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Logging verbosity.
    pub level: LogLevel,
    /// Log file used by every command. Empty means stderr, except for the
    /// terminal editor, which logs to `<data_dir>/sdash.log`.
    pub file: String,
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    #[default]
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Filter directive for this level.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_config_all_fields() {
        let toml_str = r#"
[dashboard]
organization = "acme"
tick_rate = "100ms"

[storage]
data_dir = "/srv/studio"

[logging]
level = "debug"
file = "/var/log/sdash.log"
"#;
        let config: Config = toml::from_str(toml_str).expect("valid TOML should parse");
        assert_eq!(config.dashboard.organization, "acme");
        assert_eq!(
            config.dashboard.tick_rate().expect("valid duration"),
            Duration::from_millis(100)
        );
        assert_eq!(config.storage.data_dir(), PathBuf::from("/srv/studio"));
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.file, "/var/log/sdash.log");
    }

    #[test]
    fn parse_empty_string_uses_all_defaults() {
        let config: Config = toml::from_str("").expect("empty string should parse");
        assert_eq!(config, Config::default());
        assert_eq!(config.dashboard.organization, "default");
        assert_eq!(config.dashboard.tick_rate, "250ms");
        assert!(config.storage.data_dir.is_empty());
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn parse_unknown_fields_are_ignored() {
        let toml_str = "[dashboard]\nunknown = 1\n[extra]\nkey = \"v\"\n";
        let config: Config = toml::from_str(toml_str).expect("unknown fields ignored");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn invalid_log_level_returns_error() {
        let result: Result<Config, _> = toml::from_str("[logging]\nlevel = \"loud\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn roundtrip_serialize_deserialize() {
        let config = Config::default();
        let text = toml::to_string(&config).expect("serialize");
        let back: Config = toml::from_str(&text).expect("deserialize");
        assert_eq!(config, back);
    }

    #[test]
    fn default_config_validates() {
        Config::default().validate().expect("defaults are valid");
    }

    #[test]
    fn validate_rejects_bad_tick_rate() {
        let mut config = Config::default();
        config.dashboard.tick_rate = "soon".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "dashboard.tick_rate",
                ..
            })
        ));
        config.dashboard.tick_rate = "0s".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_path_like_organization() {
        let mut config = Config::default();
        config.dashboard.organization = "../other".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "dashboard.organization",
                ..
            })
        ));
    }

    #[test]
    fn tilde_data_dir_is_expanded() {
        let storage = StorageConfig {
            data_dir: "~/studio".to_string(),
        };
        let home = dirs::home_dir().expect("home directory");
        assert_eq!(storage.data_dir(), home.join("studio"));
    }

    #[test]
    fn log_level_directives() {
        let levels = [
            (LogLevel::Error, "error"),
            (LogLevel::Warn, "warn"),
            (LogLevel::Info, "info"),
            (LogLevel::Debug, "debug"),
            (LogLevel::Trace, "trace"),
        ];
        for (level, directive) in levels {
            assert_eq!(level.as_directive(), directive);
        }
    }
}
