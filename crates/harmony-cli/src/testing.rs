//! In-memory collaborators for command and orchestrator tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use harmony_core::device::{DeviceConnector, DeviceSession};
use harmony_core::error::{CoreError, DeviceError};
use harmony_core::types::{ActivityId, DeviceConfig, SessionToken, Token};
use harmony_core::auth::IdentityGateway;
use serde_json::json;

/// Everything the fake hub was asked to do.
#[derive(Debug, Default)]
pub struct Calls {
    pub exchanges: usize,
    pub connects: usize,
    pub disconnects: Vec<bool>,
    pub started: Vec<String>,
    pub syncs: usize,
}

pub fn sample_config() -> DeviceConfig {
    DeviceConfig::from_value(json!({
        "activity": [
            {"id": "1", "label": "Watch TV"},
            {"id": "2", "label": "Listen to Music"}
        ]
    }))
    .unwrap()
}

pub struct FakeGateway {
    token: Option<&'static str>,
    pub logins: AtomicUsize,
}

impl FakeGateway {
    pub fn returning(token: Option<&'static str>) -> Self {
        Self {
            token,
            logins: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl IdentityGateway for FakeGateway {
    async fn login(&self, _email: &str, _password: &str) -> Result<Option<Token>, CoreError> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        Ok(self.token.and_then(Token::new))
    }
}

#[derive(Clone)]
pub struct FakeHub {
    pub calls: Arc<Mutex<Calls>>,
    pub config: DeviceConfig,
    pub current: ActivityId,
    pub session_token: Option<&'static str>,
    pub fail_sync: bool,
}

impl FakeHub {
    pub fn new(current: i64) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Calls::default())),
            config: sample_config(),
            current: ActivityId(current),
            session_token: Some("session"),
            fail_sync: false,
        }
    }

    pub fn calls(&self) -> std::sync::MutexGuard<'_, Calls> {
        self.calls.lock().unwrap()
    }
}

#[async_trait]
impl DeviceConnector for FakeHub {
    type Session = FakeHub;

    async fn exchange_token(
        &self,
        _host: &str,
        _port: u16,
        _token: &Token,
    ) -> Result<Option<SessionToken>, CoreError> {
        self.calls().exchanges += 1;
        Ok(self.session_token.and_then(SessionToken::new))
    }

    async fn connect(
        &self,
        _host: &str,
        _port: u16,
        _session_token: &SessionToken,
    ) -> Result<FakeHub, CoreError> {
        self.calls().connects += 1;
        Ok(self.clone())
    }
}

#[async_trait]
impl DeviceSession for FakeHub {
    async fn get_config(&mut self) -> Result<DeviceConfig, CoreError> {
        Ok(self.config.clone())
    }

    async fn get_current_activity(&mut self) -> Result<ActivityId, CoreError> {
        Ok(self.current)
    }

    async fn start_activity(&mut self, activity_id: &str) -> Result<(), CoreError> {
        self.calls().started.push(activity_id.to_string());
        Ok(())
    }

    async fn sync(&mut self) -> Result<(), CoreError> {
        if self.fail_sync {
            return Err(DeviceError::Timeout {
                addr: "fake".to_string(),
                command: "sync".to_string(),
            }
            .into());
        }
        self.calls().syncs += 1;
        Ok(())
    }

    async fn disconnect(&mut self, send_close: bool) -> Result<(), CoreError> {
        self.calls().disconnects.push(send_close);
        Ok(())
    }
}
