/// Simulator configuration
use crate::error::{Result, SimulatorError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "wave-sim.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulatorConfig {
    #[serde(default = "default_analytics")]
    pub analytics: AnalyticsSettings,

    #[serde(default = "default_logging")]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalyticsSettings {
    /// Length of every wrapped top list
    #[serde(default = "default_top_limit")]
    pub top_limit: usize,

    /// Credit paid out per premium window
    #[serde(default = "default_premium_credit")]
    pub premium_credit: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl SimulatorConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `wave-sim.toml` is read if
    /// present. Variables such as `WAVE_ANALYTICS__TOP_LIMIT` override the file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (prefixed with WAVE_)
        settings = settings.add_source(
            config::Environment::with_prefix("WAVE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.analytics.top_limit == 0 {
            return Err(SimulatorError::Config(
                "analytics.top_limit must be at least 1".to_string(),
            ));
        }

        let credit = self.analytics.premium_credit;
        if !credit.is_finite() || credit <= 0.0 {
            return Err(SimulatorError::Config(format!(
                "analytics.premium_credit must be a positive number, got {credit}"
            )));
        }

        Ok(())
    }
}

// Default values
fn default_analytics() -> AnalyticsSettings {
    AnalyticsSettings {
        top_limit: default_top_limit(),
        premium_credit: default_premium_credit(),
    }
}

fn default_top_limit() -> usize {
    wave_analytics::DEFAULT_TOP_LIMIT
}

fn default_premium_credit() -> f64 {
    wave_analytics::DEFAULT_PREMIUM_CREDIT
}

fn default_logging() -> LoggingSettings {
    LoggingSettings {
        filter: default_filter(),
    }
}

fn default_filter() -> String {
    "wave_sim=info,wave_simulator=info,wave_analytics=info".to_string()
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            analytics: default_analytics(),
            logging: default_logging(),
        }
    }
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        default_analytics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = SimulatorConfig::default();
        assert_eq!(config.analytics.top_limit, 5);
        assert_eq!(config.analytics.premium_credit, 1_000_000.0);
        config.validate().unwrap();
    }

    #[test]
    fn load_from_file_fills_missing_fields() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[analytics]\ntop_limit = 3").unwrap();

        let config = SimulatorConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.analytics.top_limit, 3);
        assert_eq!(config.analytics.premium_credit, 1_000_000.0);
        assert!(config.logging.filter.contains("wave_sim=info"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = SimulatorConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(SimulatorError::Config(_))));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = SimulatorConfig::default();
        config.analytics.top_limit = 0;
        assert!(config.validate().is_err());

        let mut config = SimulatorConfig::default();
        config.analytics.premium_credit = f64::NAN;
        assert!(config.validate().is_err());

        config.analytics.premium_credit = -1.0;
        assert!(config.validate().is_err());
    }
}
