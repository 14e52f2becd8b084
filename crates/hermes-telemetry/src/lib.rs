//! Structured logging for Hermes services.
//!
//! Hermes emits `tracing` events from the extraction layer (query binding
//! rejections, body validation failures, envelope fallbacks and redacted
//! server errors). This crate installs the subscriber that writes them.
//!
//! ```text
//! hermes-extract ──tracing events──▶ EnvFilter ──▶ fmt layer (JSON | pretty) ──▶ stdout
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use hermes_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::production()).expect("Failed to init logging");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{init_logging, init_test_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
