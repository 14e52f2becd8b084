//! Main configuration type.

use hermes_extract::ExtractOptions;
use hermes_telemetry::{logging::create_env_filter, LogConfig};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, ExtractConfig, LogFormat, LoggingConfig};

/// Complete Hermes configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// # Example
///
/// ```
/// use hermes_config::HermesConfig;
///
/// let config = HermesConfig::default();
/// assert_eq!(config.extract.max_body_bytes, 1024 * 1024);
/// assert_eq!(config.logging.level, "info");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct HermesConfig {
    /// Request extraction configuration.
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HermesConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `extract.max_body_bytes` is zero
    /// - a message override is blank
    /// - `logging.level` is not a valid filter
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extract.max_body_bytes == 0 {
            return Err(ConfigError::invalid(
                "extract.max_body_bytes",
                "must be greater than 0",
            ));
        }

        if let Some((rule, _)) = self
            .extract
            .messages
            .iter()
            .find(|(_, template)| template.trim().is_empty())
        {
            return Err(ConfigError::invalid(
                format!("extract.messages.{rule}"),
                "template must not be empty",
            ));
        }

        if self.logging.enabled {
            create_env_filter(&self.logging.level)
                .map_err(|e| ConfigError::invalid("logging.level", e.to_string()))?;
        }

        Ok(())
    }

    /// Create a development configuration preset.
    ///
    /// - Pretty log output at debug level
    /// - Binding diagnostics on
    /// - `processTime` reported
    #[must_use]
    pub fn development() -> Self {
        Self {
            extract: ExtractConfig {
                report_process_time: true,
                ..ExtractConfig::default()
            },
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
                span_events: true,
                file_line_info: true,
                binding_diagnostics: true,
                ..LoggingConfig::default()
            },
        }
    }

    /// Create a production configuration preset.
    #[must_use]
    pub fn production() -> Self {
        Self::default()
    }

    /// Returns the extraction options for request contexts.
    #[must_use]
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions::from(&self.extract)
    }

    /// Returns the logging setup for `hermes_telemetry::init_logging`.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        LogConfig::from(&self.logging)
    }
}
