//! Error types for Harmony core.

use thiserror::Error;

/// Core error type for shared operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Failures of the two-step login that precedes any hub session.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Could not get token from Logitech server.")]
    NoToken,

    #[error("Could not swap login token for session token.")]
    NoSessionToken,

    #[error("Identity gateway request failed: {0}")]
    Gateway(String),
}

/// Hub session errors
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Failed to connect to hub at {addr}: {message}")]
    Connect { addr: String, message: String },

    #[error("Command {command} failed on {addr}: {message}")]
    CommandFailed {
        addr: String,
        command: String,
        message: String,
    },

    #[error("Invalid response from {addr}: {message}")]
    InvalidResponse { addr: String, message: String },

    #[error("Command {command} to {addr} timed out")]
    Timeout { addr: String, command: String },

    #[error("Connection to {addr} closed")]
    Closed { addr: String },
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
