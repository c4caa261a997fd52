//! Core library for talking to a Logitech Harmony hub.
//!
//! Holds the data model, the error taxonomy and the two collaborators the
//! CLI depends on: the cloud identity gateway and the hub session.

pub mod auth;
pub mod device;
pub mod error;
pub mod protocol;
pub mod types;

pub use error::{AuthError, ConfigError, CoreError, DeviceError, Result};
pub use types::{Activity, ActivityId, ActivityRef, DeviceConfig, SessionToken, Token};
