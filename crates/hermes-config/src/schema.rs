//! Configuration schema types.
//!
//! This module defines the structure of all configuration sections.

use std::collections::BTreeMap;

use hermes_extract::{ExtractOptions, MessageTemplates, DEFAULT_MAX_BODY_BYTES};
use hermes_telemetry::LogConfig;
use serde::{Deserialize, Serialize};

/// Request extraction section.
///
/// # Example
///
/// ```
/// use hermes_config::ExtractConfig;
/// use hermes_extract::ExtractOptions;
///
/// let config = ExtractConfig {
///     max_body_bytes: 64 * 1024,
///     report_process_time: true,
///     ..Default::default()
/// };
///
/// let options = ExtractOptions::from(&config);
/// assert_eq!(options.max_body_bytes, 65536);
/// assert!(options.report_process_time);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExtractConfig {
    /// Largest accepted JSON body, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Whether success envelopes carry `processTime`.
    #[serde(default)]
    pub report_process_time: bool,

    /// Validation message overrides, keyed by rule (`email`, `min`, ...).
    ///
    /// Templates may use `{field}` and `{param}`. Rules without an entry
    /// use the built-in messages.
    #[serde(default)]
    pub messages: BTreeMap<String, String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: default_max_body_bytes(),
            report_process_time: false,
            messages: BTreeMap::new(),
        }
    }
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

impl From<&ExtractConfig> for ExtractOptions {
    fn from(config: &ExtractConfig) -> Self {
        let templates = config
            .messages
            .iter()
            .fold(MessageTemplates::default(), |templates, (rule, template)| {
                templates.with_rule(rule.as_str(), template.as_str())
            });

        Self {
            max_body_bytes: config.max_body_bytes,
            report_process_time: config.report_process_time,
            templates,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Multi-line human-readable output.
    Pretty,
}

/// Logging section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level or filter directives.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Log span open/close events.
    #[serde(default)]
    pub span_events: bool,

    /// Include source file and line.
    #[serde(default)]
    pub file_line_info: bool,

    /// Include thread ids.
    #[serde(default)]
    pub thread_ids: bool,

    /// Include the event target.
    #[serde(default = "default_true")]
    pub include_target: bool,

    /// Log query and body rejections regardless of `level`.
    #[serde(default)]
    pub binding_diagnostics: bool,

    /// Service name reported at startup.
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            span_events: false,
            file_line_info: false,
            thread_ids: false,
            include_target: true,
            binding_diagnostics: false,
            service_name: default_service_name(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "hermes".to_string()
}

impl From<&LoggingConfig> for LogConfig {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            enabled: config.enabled,
            level: config.level.clone(),
            json_format: config.format == LogFormat::Json,
            span_events: config.span_events,
            file_line_info: config.file_line_info,
            thread_ids: config.thread_ids,
            include_target: config.include_target,
            binding_diagnostics: config.binding_diagnostics,
            service_name: config.service_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_extract::Violation;

    #[test]
    fn test_extract_defaults() {
        let config = ExtractConfig::default();
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert!(!config.report_process_time);
        assert!(config.messages.is_empty());
    }

    #[test]
    fn test_message_overrides_reach_templates() {
        let mut config = ExtractConfig::default();
        config
            .messages
            .insert("email".to_string(), "{field} is not an address".to_string());

        let options = ExtractOptions::from(&config);
        let email = Violation::new("contact", "email");
        let required = Violation::new("name", "required");

        assert_eq!(options.templates.render(&email), "contact is not an address");
        assert_eq!(options.templates.render(&required), "name is required");
    }

    #[test]
    fn test_logging_into_log_config() {
        let config = LoggingConfig {
            format: LogFormat::Pretty,
            binding_diagnostics: true,
            ..Default::default()
        };
        let log = LogConfig::from(&config);

        assert!(!log.json_format);
        assert!(log.binding_diagnostics);
        assert_eq!(log.level, "info");
        assert_eq!(log.service_name, "hermes");
    }

    #[test]
    fn test_default_logging_matches_telemetry_default() {
        assert_eq!(LogConfig::from(&LoggingConfig::default()), LogConfig::default());
    }

    #[test]
    fn test_log_format_serde() {
        let format: LogFormat = serde_json::from_str("\"pretty\"").unwrap();
        assert_eq!(format, LogFormat::Pretty);
        assert_eq!(serde_json::to_string(&LogFormat::Json).unwrap(), "\"json\"");
    }
}
