//! Error types for the metadata synchronization system.
//!
//! Field-shape problems are deliberately not errors: formatters log a warning
//! and skip the field. Structured errors cover the mount/configuration
//! surface; failures inside user-supplied computed fields travel as
//! `anyhow::Error` through the reactive runtime.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeoError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid descriptor: {0}")]
    Descriptor(String),

    #[error("Invalid logging configuration: {0}")]
    Logging(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
