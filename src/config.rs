//! Persistent application configuration model and defaults.

/// Root configuration persisted to `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct AppConfig {
    /// UI preferences shared by every section.
    #[serde(default)]
    pub ui: UiConfig,
    /// Location of the persisted section state.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Log verbosity.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// UI preferences persisted between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct UiConfig {
    /// Swap the status palette for one readable with color vision deficiencies.
    #[serde(default)]
    pub enable_color_impaired_mode: bool,
}

/// Durable-state storage preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct StorageConfig {
    /// Overrides the default state file under the user data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: LogLevel,
}

#[derive(Debug, Clone, Copy, serde::Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
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
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Self::Off => log::LevelFilter::Off,
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }

    /// One step more verbose per `steps`, saturating at `Trace`.
    pub fn raised_by(self, steps: u8) -> Self {
        const ORDER: [LogLevel; 6] = [
            LogLevel::Off,
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];
        let current = ORDER.iter().position(|level| *level == self).unwrap_or(2);
        ORDER[(current + usize::from(steps)).min(ORDER.len() - 1)]
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

impl AppConfig {
    pub fn ui_settings(&self) -> crate::selectors::UiSettings {
        crate::selectors::UiSettings {
            enable_color_impaired_mode: self.ui.enable_color_impaired_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, LogLevel};

    #[test]
    fn test_empty_config_uses_defaults() {
        let parsed: AppConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(parsed, AppConfig::default());
        assert!(!parsed.ui.enable_color_impaired_mode);
        assert_eq!(parsed.storage.state_file, None);
        assert_eq!(parsed.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let parsed: AppConfig = toml::from_str(
            r#"
            [ui]
            enable_color_impaired_mode = true

            [logging]
            level = "debug"
            "#,
        )
        .expect("partial config should parse");
        assert!(parsed.ui.enable_color_impaired_mode);
        assert_eq!(parsed.logging.level, LogLevel::Debug);
        assert!(parsed.ui_settings().enable_color_impaired_mode);
    }

    #[test]
    fn test_config_serialization_omits_unset_state_file() {
        let config_text =
            toml::to_string(&AppConfig::default()).expect("default config should serialize");
        assert!(config_text.contains("enable_color_impaired_mode"));
        assert!(config_text.contains("level = \"warn\""));
        assert!(!config_text.contains("state_file"));
    }

    #[test]
    fn test_log_level_raise_saturates() {
        assert_eq!(LogLevel::Warn.raised_by(0), LogLevel::Warn);
        assert_eq!(LogLevel::Warn.raised_by(1), LogLevel::Info);
        assert_eq!(LogLevel::Warn.raised_by(9), LogLevel::Trace);
        assert_eq!(LogLevel::Off.level_filter(), log::LevelFilter::Off);
    }
}
