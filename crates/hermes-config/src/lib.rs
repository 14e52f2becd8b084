//! Typed configuration system for Hermes.
//!
//! This crate provides a strongly-typed configuration system with support for:
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Overview
//!
//! [`HermesConfig`] holds two sections:
//!
//! - [`ExtractConfig`] - body size limit, `processTime` reporting and
//!   validation message overrides; converts into
//!   [`hermes_extract::ExtractOptions`]
//! - [`LoggingConfig`] - log level and format; converts into
//!   [`hermes_telemetry::LogConfig`]
//!
//! # Example
//!
//! ```no_run
//! use hermes_config::ConfigLoader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::new()
//!     .with_dotenv()?
//!     .with_optional_file("hermes.toml")?
//!     .with_env_prefix("HERMES")
//!     .load()?;
//!
//! hermes_telemetry::init_logging(&config.log_config())?;
//! let options = config.extract_options();
//! # let _ = options;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [extract]
//! max_body_bytes = 1048576
//! report_process_time = false
//!
//! [extract.messages]
//! email = "{field} must be a valid email address"
//! url = "{field} must be a valid URL"
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//! binding_diagnostics = false
//! service_name = "orders-api"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Values can be overridden via environment variables using the format
//! `PREFIX__SECTION__KEY`. For example:
//!
//! - `HERMES__EXTRACT__MAX_BODY_BYTES=65536`
//! - `HERMES__LOGGING__FORMAT=pretty`
//! - `HERMES__EXTRACT__MESSAGES__URL={field} must be a valid URL`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::HermesConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{ExtractConfig, LogFormat, LoggingConfig};
