//! Custom error types for the validator monitor
//!
//! Provides structured error handling with context for the different ways a
//! monitoring tick can fail. None of these are fatal to the process: the
//! scheduler catches them at the tick boundary and reports them to the
//! owning session.

use std::fmt;

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to load configuration file
    LoadFailed { path: String, reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },

    /// Missing required configuration
    MissingRequired { field: String },

    /// Configuration parsing error
    ParseError { reason: String },
}

/// Health pipeline error variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthError {
    /// A single reference endpoint failed; recovered by failover
    EndpointUnavailable { endpoint: String, reason: String },

    /// Every configured reference endpoint failed
    AllEndpointsUnavailable { failures: Vec<HealthError> },

    /// Local status endpoint could not be reached or answered non-2xx
    NodeUnreachable { url: String, reason: String },

    /// Local status endpoint answered with an unusable body
    MalformedResponse { url: String, reason: String },

    /// Reported block height is not an integer
    InvalidHeight { value: String },
}

/// Notification delivery error variants
#[derive(Debug)]
pub enum NotifyError {
    /// Transport-level failure reaching the sink
    DeliveryFailed { session_id: String, reason: String },

    /// Sink answered with a non-success status
    Rejected { session_id: String, status: u16 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
            ConfigError::MissingRequired { field } => {
                write!(f, "Missing required field: {}", field)
            }
            ConfigError::ParseError { reason } => {
                write!(f, "Failed to parse config: {}", reason)
            }
        }
    }
}

impl fmt::Display for HealthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthError::EndpointUnavailable { endpoint, reason } => {
                write!(f, "Endpoint {} unavailable: {}", endpoint, reason)
            }
            HealthError::AllEndpointsUnavailable { failures } => {
                write!(
                    f,
                    "All {} reference endpoints unavailable",
                    failures.len()
                )?;
                for failure in failures {
                    write!(f, "; {}", failure)?;
                }
                Ok(())
            }
            HealthError::NodeUnreachable { url, reason } => {
                write!(f, "Node status endpoint {} unreachable: {}", url, reason)
            }
            HealthError::MalformedResponse { url, reason } => {
                write!(f, "Malformed response from {}: {}", url, reason)
            }
            HealthError::InvalidHeight { value } => {
                write!(f, "Invalid block height '{}'", value)
            }
        }
    }
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::DeliveryFailed { session_id, reason } => {
                write!(f, "Delivery to session {} failed: {}", session_id, reason)
            }
            NotifyError::Rejected { session_id, status } => {
                write!(
                    f,
                    "Sink rejected message for session {} with status {}",
                    session_id, status
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for HealthError {}
impl std::error::Error for NotifyError {}
