//! HTTP client for the Logitech login endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::IdentityGateway;
use crate::error::{AuthError, CoreError};
use crate::types::Token;

pub const DEFAULT_LOGIN_ENDPOINT: &str =
    "https://svcs.myharmony.com/CompositeSecurityServices/Security.svc/json/GetUserAuthToken";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LoginResponse {
    get_user_auth_token_result: Option<LoginResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LoginResult {
    user_auth_token: Option<String>,
}

fn token_from_response(response: LoginResponse) -> Option<Token> {
    response
        .get_user_auth_token_result
        .and_then(|r| r.user_auth_token)
        .and_then(Token::new)
}

pub struct HttpIdentityGateway {
    client: Client,
    endpoint: String,
}

impl HttpIdentityGateway {
    pub fn new() -> Result<Self, CoreError> {
        Self::with_endpoint(DEFAULT_LOGIN_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| CoreError::Other(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl IdentityGateway for HttpIdentityGateway {
    async fn login(&self, email: &str, password: &str) -> Result<Option<Token>, CoreError> {
        tracing::debug!(endpoint = %self.endpoint, "requesting user auth token");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(|e| AuthError::Gateway(e.to_string()))?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "login rejected");
            return Ok(None);
        }

        match response.json::<LoginResponse>().await {
            Ok(body) => Ok(token_from_response(body)),
            Err(e) => {
                tracing::debug!("unreadable login response: {}", e);
                Ok(None)
            }
        }
    }
}
