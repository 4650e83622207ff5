use std::fmt;
use std::fmt::Formatter;
use thiserror::Error;
use crate::manager_owm::errors::WeatherSourceError;

/// Error depicting errors that occur while loading or validating the configuration
///
#[derive(Error, Debug)]
#[error("ConfigError: {0}")]
pub struct ConfigError(pub String);

impl From<&str> for ConfigError {
    fn from(e: &str) -> Self { ConfigError(e.to_string()) }
}
impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self { ConfigError(e.to_string()) }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self { ConfigError(e.to_string()) }
}

/// Error depicting errors that occur while setting up logging
///
#[derive(Error, Debug)]
#[error("LoggingError: {0}")]
pub struct LoggingError(pub String);

impl From<std::io::Error> for LoggingError {
    fn from(e: std::io::Error) -> Self { LoggingError(e.to_string()) }
}
impl From<log::SetLoggerError> for LoggingError {
    fn from(e: log::SetLoggerError) -> Self { LoggingError(e.to_string()) }
}

/// Error depicting errors that occur while persisting or reading the forecast snapshot
///
#[derive(Error, Debug)]
#[error("SnapshotError: {0}")]
pub struct SnapshotError(pub String);

impl From<std::io::Error> for SnapshotError {
    fn from(e: std::io::Error) -> Self { SnapshotError(e.to_string()) }
}
impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self { SnapshotError(format!("json document error: {}", e)) }
}

/// Errors raised while turning a raw forecast payload into records.
/// Any of these is fatal to the whole batch
pub enum NormalizeError {
    Document(String),
    Timestamp { index: usize, value: String, reason: String },
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            NormalizeError::Document(e) => write!(f, "NormalizeError::Document: {}", e),
            NormalizeError::Timestamp { index, value, reason } =>
                write!(f, "NormalizeError::Timestamp: entry {} has malformed dt_txt '{}': {}", index, value, reason),
        }
    }
}
impl fmt::Debug for NormalizeError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
impl std::error::Error for NormalizeError {}

impl From<serde_json::Error> for NormalizeError {
    fn from(e: serde_json::Error) -> Self {
        NormalizeError::Document(e.to_string())
    }
}

/// Top level error for a dashboard request cycle
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Source(#[from] WeatherSourceError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}
