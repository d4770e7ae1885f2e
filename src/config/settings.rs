use serde::Deserialize;

use crate::broker::topic::MatchMode;

/// Top-level configuration settings for the application.
///
/// Includes settings for the topic registry and for logging.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Settings {
    pub registry: RegistrySettings,
    pub logging: LoggingSettings,
}

/// Configuration settings for a `TopicRegistry`.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct RegistrySettings {
    /// Rule used to find the namespaced topics a publish also reaches.
    pub match_mode: MatchMode,
}

/// Configuration settings for logging.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub registry: Option<PartialRegistrySettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialRegistrySettings {
    pub match_mode: Option<MatchMode>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl PartialSettings {
    /// Fill every missing value from `Settings::default()`.
    pub fn merge_with_defaults(self) -> Settings {
        let default = Settings::default();

        Settings {
            registry: RegistrySettings {
                match_mode: self
                    .registry
                    .as_ref()
                    .and_then(|r| r.match_mode)
                    .unwrap_or(default.registry.match_mode),
            },
            logging: LoggingSettings {
                level: self
                    .logging
                    .and_then(|l| l.level)
                    .unwrap_or(default.logging.level),
            },
        }
    }
}
