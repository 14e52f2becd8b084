//! Configuration errors.

use std::path::PathBuf;
use thiserror::Error;

/// Why a Hermes configuration could not be produced.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required config file is absent.
    #[error("config file {path} does not exist")]
    Missing {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The config file exists but could not be read.
    #[error("cannot read config file {path}")]
    Unreadable {
        /// Path of the file.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Extension or format name is neither `toml` nor `json`.
    #[error("config format {0:?} is not supported (use toml or json)")]
    UnknownFormat(String),

    /// Malformed TOML, or a key Hermes does not know.
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed JSON, or a key Hermes does not know.
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// A `.env` file exists but could not be loaded.
    #[error("cannot load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    /// A value parsed but is out of range for Hermes.
    #[error("{key}: {reason}")]
    Invalid {
        /// Dotted config key (`extract.max_body_bytes`).
        key: String,
        /// What is wrong with the value.
        reason: String,
    },

    /// An override variable holds a value of the wrong type.
    #[error("environment variable {var}: {reason}")]
    BadEnvVar {
        /// Full variable name.
        var: String,
        /// Expected type.
        reason: String,
    },
}

impl ConfigError {
    /// Builds [`ConfigError::Missing`].
    pub fn missing(path: impl Into<PathBuf>) -> Self {
        Self::Missing { path: path.into() }
    }

    /// Builds [`ConfigError::Unreadable`].
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Unreadable {
            path: path.into(),
            source,
        }
    }

    /// Builds [`ConfigError::Invalid`].
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Builds [`ConfigError::BadEnvVar`].
    pub fn bad_env_var(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BadEnvVar {
            var: var.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_names_path() {
        let err = ConfigError::missing("/etc/hermes/hermes.toml");
        assert_eq!(
            err.to_string(),
            "config file /etc/hermes/hermes.toml does not exist"
        );
    }

    #[test]
    fn test_invalid_names_key() {
        let err = ConfigError::invalid("extract.max_body_bytes", "must be greater than 0");
        assert_eq!(
            err.to_string(),
            "extract.max_body_bytes: must be greater than 0"
        );
    }

    #[test]
    fn test_bad_env_var() {
        let err = ConfigError::bad_env_var("HERMES__EXTRACT__MAX_BODY_BYTES", "expected integer");
        assert_eq!(
            err.to_string(),
            "environment variable HERMES__EXTRACT__MAX_BODY_BYTES: expected integer"
        );
    }

    #[test]
    fn test_unknown_format() {
        let err = ConfigError::UnknownFormat("yaml".to_string());
        assert_eq!(
            err.to_string(),
            "config format \"yaml\" is not supported (use toml or json)"
        );
    }
}
