//! Login, session lifecycle and command dispatch.
//!
//! `unauthenticated -> authenticated -> connected -> disconnected`, strictly
//! in that order and never backwards.

use std::fmt;
use std::io::Write;

use harmony_core::auth::IdentityGateway;
use harmony_core::device::{DeviceConnector, DeviceSession};
use harmony_core::error::{AuthError, CoreError};
use harmony_core::types::SessionToken;

use crate::cli::{Commands, CommonArgs};
use crate::commands;
use crate::error::CliError;

/// Where to find the hub and who to log in as.
#[derive(Clone)]
pub struct ConnectionParams {
    pub email: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("email", &self.email)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

impl From<CommonArgs> for ConnectionParams {
    fn from(args: CommonArgs) -> Self {
        Self {
            email: args.email,
            password: args.password,
            host: args.harmony_ip,
            port: args.harmony_port,
        }
    }
}

fn gateway_failure(e: CoreError) -> AuthError {
    match e {
        CoreError::Auth(auth) => auth,
        other => AuthError::Gateway(other.to_string()),
    }
}

/// Log in and exchange the user token for a hub session token.
///
/// Every failure here happens before any session is opened.
pub async fn authenticate<G, C>(
    gateway: &G,
    connector: &C,
    params: &ConnectionParams,
) -> Result<SessionToken, AuthError>
where
    G: IdentityGateway + ?Sized,
    C: DeviceConnector,
{
    let token = gateway
        .login(&params.email, &params.password)
        .await
        .map_err(gateway_failure)?
        .ok_or(AuthError::NoToken)?;

    tracing::debug!("obtained user token, exchanging with {}:{}", params.host, params.port);

    connector
        .exchange_token(&params.host, params.port, &token)
        .await
        .map_err(gateway_failure)?
        .ok_or(AuthError::NoSessionToken)
}

/// Owns the two collaborators for a single invocation.
pub struct Orchestrator<G, C> {
    gateway: G,
    connector: C,
}

impl<G, C> Orchestrator<G, C>
where
    G: IdentityGateway,
    C: DeviceConnector,
{
    pub fn new(gateway: G, connector: C) -> Self {
        Self { gateway, connector }
    }

    /// Authenticate, open a session, run `command`, and always disconnect
    /// once the session is open.
    pub async fn run<W: Write>(
        &self,
        params: &ConnectionParams,
        command: Commands,
        out: &mut W,
    ) -> Result<(), CliError> {
        let session_token = authenticate(&self.gateway, &self.connector, params).await?;

        let mut session = self
            .connector
            .connect(&params.host, params.port, &session_token)
            .await?;
        tracing::debug!("connected to {}:{}", params.host, params.port);

        let result = commands::execute(&mut session, command, out).await;

        if let Err(e) = session.disconnect(true).await {
            tracing::warn!("failed to disconnect cleanly: {}", e);
        }

        result
    }
}
