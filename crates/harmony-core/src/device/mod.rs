//! Hub session layer.
//!
//! [`DeviceConnector`] turns a user token into a session token and opens a
//! [`DeviceSession`]; the WebSocket implementation lives in [`hub`].

pub mod hub;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::{ActivityId, DeviceConfig, SessionToken, Token};

pub use hub::{HubConnector, HubSession, DEFAULT_PORT};

/// An open, authenticated connection to a hub.
#[async_trait]
pub trait DeviceSession: Send {
    async fn get_config(&mut self) -> Result<DeviceConfig, CoreError>;

    async fn get_current_activity(&mut self) -> Result<ActivityId, CoreError>;

    async fn start_activity(&mut self, activity_id: &str) -> Result<(), CoreError>;

    async fn sync(&mut self) -> Result<(), CoreError>;

    /// Close the session. With `send_close` the hub is told first; without
    /// it the transport is just dropped.
    async fn disconnect(&mut self, send_close: bool) -> Result<(), CoreError>;
}

/// Opens sessions against a hub at a given address.
#[async_trait]
pub trait DeviceConnector: Send + Sync {
    type Session: DeviceSession;

    /// Swap a user token for a hub-scoped session token. A refusal is
    /// `Ok(None)`.
    async fn exchange_token(
        &self,
        host: &str,
        port: u16,
        token: &Token,
    ) -> Result<Option<SessionToken>, CoreError>;

    async fn connect(
        &self,
        host: &str,
        port: u16,
        session_token: &SessionToken,
    ) -> Result<Self::Session, CoreError>;
}
