//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Ledger engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// How percentage splits deal with per-line rounding drift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentageRounding {
    /// Floor every line, then hand leftover cents to the largest remainders.
    /// The split always sums exactly to the total.
    #[default]
    LargestRemainder,
    /// Round every line on its own. The split may miss the total by a few cents.
    Preserve,
}

/// Ledger engine configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct EngineConfig {
    /// Rounding mode for percentage splits.
    #[serde(default)]
    pub percentage_rounding: PercentageRounding,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "splitledger=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `SPLITLEDGER__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SPLITLEDGER").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(
            config.engine.percentage_rounding,
            PercentageRounding::LargestRemainder
        );
        assert_eq!(config.log.filter, "splitledger=info");
        assert!(!config.log.json);
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(
            [
                "SPLITLEDGER__ENGINE__PERCENTAGE_ROUNDING",
                "SPLITLEDGER__LOG__FILTER",
                "SPLITLEDGER__LOG__JSON",
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(
                    config.engine.percentage_rounding,
                    PercentageRounding::LargestRemainder
                );
                assert_eq!(config.log.filter, "splitledger=info");
            },
        );
    }

    #[test]
    fn test_load_from_env() {
        temp_env::with_vars(
            [
                ("SPLITLEDGER__ENGINE__PERCENTAGE_ROUNDING", Some("preserve")),
                ("SPLITLEDGER__LOG__FILTER", Some("splitledger=trace")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(
                    config.engine.percentage_rounding,
                    PercentageRounding::Preserve
                );
                assert_eq!(config.log.filter, "splitledger=trace");
            },
        );
    }
}
