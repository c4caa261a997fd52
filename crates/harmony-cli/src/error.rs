//! Error types for Harmony CLI.
//!
//! CliError wraps CoreError from the shared library and adds the handled
//! domain failures of individual commands.

use harmony_core::error::CoreError;
use harmony_core::types::ActivityId;
use thiserror::Error;

pub use harmony_core::error::{AuthError, ConfigError, DeviceError};

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const AUTH_ERROR: i32 = 3;
    pub const DEVICE_ERROR: i32 = 4;
}

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not find activity: {0}")]
    ActivityNotFound(String),

    #[error("current activity {0} not found in config")]
    CurrentActivityNotFound(ActivityId),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(e) => match e {
                CoreError::Auth(_) => exit_codes::AUTH_ERROR,
                CoreError::Device(_) => exit_codes::DEVICE_ERROR,
                CoreError::Config(_) => exit_codes::DEVICE_ERROR,
                CoreError::Io(_) => exit_codes::GENERAL_ERROR,
                CoreError::Other(_) => exit_codes::GENERAL_ERROR,
            },
            CliError::Io(_) => exit_codes::GENERAL_ERROR,
            CliError::ActivityNotFound(_) => exit_codes::GENERAL_ERROR,
            CliError::CurrentActivityNotFound(_) => exit_codes::GENERAL_ERROR,
        }
    }

    /// Text shown on stderr for failures that were not logged. Login failures
    /// are shown bare; everything else carries an `Error:` prefix.
    pub fn user_message(&self) -> String {
        match self {
            CliError::Core(CoreError::Auth(e)) => e.to_string(),
            other => format!("Error: {}", other),
        }
    }

    /// Handled failures have already been logged by the command that hit them.
    pub fn is_reported(&self) -> bool {
        matches!(
            self,
            CliError::ActivityNotFound(_) | CliError::CurrentActivityNotFound(_)
        )
    }
}

// Conversions from core error subtypes to CliError
impl From<AuthError> for CliError {
    fn from(e: AuthError) -> Self {
        CliError::Core(CoreError::Auth(e))
    }
}

impl From<DeviceError> for CliError {
    fn from(e: DeviceError) -> Self {
        CliError::Core(CoreError::Device(e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Core(CoreError::Config(e))
    }
}
