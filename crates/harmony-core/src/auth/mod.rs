//! Cloud identity gateway.
//!
//! Trades an email/password pair for the long-lived user token that the hub
//! accepts during pairing.

pub mod identity;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::Token;

pub use identity::{HttpIdentityGateway, DEFAULT_LOGIN_ENDPOINT};

/// Anything that can log a user in and hand back a [`Token`].
///
/// Rejected credentials are `Ok(None)`, not an error; `Err` is reserved for
/// transport failures.
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<Option<Token>, CoreError>;
}
