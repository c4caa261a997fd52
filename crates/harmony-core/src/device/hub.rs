//! WebSocket client for the hub command channel.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use super::{DeviceConnector, DeviceSession};
use crate::error::{CoreError, DeviceError};
use crate::protocol::commands::{Commands, Request};
use crate::protocol::response::{parse_current_activity, parse_identity, Response};
use crate::types::{ActivityId, DeviceConfig, SessionToken, Token};

/// Port the hub listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 5222;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// A single WebSocket connection with request/response correlation.
struct HubConnection {
    addr: String,
    timeout: Duration,
    next_id: u64,
    ws_stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl HubConnection {
    async fn open(
        url: &str,
        addr: String,
        connect_timeout: Duration,
        cmd_timeout: Duration,
    ) -> Result<Self, CoreError> {
        let (ws_stream, _) = timeout(connect_timeout, connect_async(url))
            .await
            .map_err(|_| DeviceError::Connect {
                addr: addr.clone(),
                message: "connection timeout".to_string(),
            })?
            .map_err(|e| DeviceError::Connect {
                addr: addr.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!(%addr, "connected to hub");

        Ok(Self {
            addr,
            timeout: cmd_timeout,
            next_id: 1,
            ws_stream,
        })
    }

    /// Send one request and wait for the response carrying the same id.
    async fn request<F>(&mut self, build: F) -> Result<Value, CoreError>
    where
        F: FnOnce(String) -> Request,
    {
        let request_id = self.next_id.to_string();
        self.next_id += 1;
        let request = build(request_id.clone());
        let command = request.cmd;

        tracing::debug!(addr = %self.addr, id = %request_id, %command, "sending request");

        self.ws_stream
            .send(Message::Text(request.to_text()))
            .await
            .map_err(|e| CoreError::Other(format!("WebSocket send error: {}", e)))?;

        let addr = self.addr.clone();
        let ws_stream = &mut self.ws_stream;

        let response = timeout(self.timeout, async {
            while let Some(msg) = ws_stream.next().await {
                match msg {
                    Ok(Message::Text(text)) => match Response::parse(&text, &addr) {
                        Ok(response) if response.answers(&request_id) => return Ok(response),
                        Ok(_) => {
                            tracing::trace!(%addr, "skipping unrelated frame");
                            continue;
                        }
                        Err(e) => {
                            tracing::trace!(%addr, "skipping unreadable frame: {}", e);
                            continue;
                        }
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => continue,
                    Err(e) => return Err(CoreError::Other(format!("WebSocket error: {}", e))),
                }
            }

            Err(CoreError::Device(DeviceError::Closed { addr: addr.clone() }))
        })
        .await
        .map_err(|_| DeviceError::Timeout {
            addr: self.addr.clone(),
            command: command.to_string(),
        })??;

        Ok(response.into_data(&self.addr, command)?)
    }

    async fn close(&mut self) -> Result<(), CoreError> {
        self.ws_stream
            .close(None)
            .await
            .map_err(|e| CoreError::Other(format!("WebSocket close error: {}", e)))
    }
}

/// Opens hub sessions over WebSocket.
#[derive(Debug, Clone)]
pub struct HubConnector {
    connect_timeout: Duration,
    command_timeout: Duration,
}

impl HubConnector {
    pub fn new() -> Self {
        Self {
            connect_timeout: CONNECT_TIMEOUT,
            command_timeout: COMMAND_TIMEOUT,
        }
    }

    pub fn with_command_timeout(mut self, command_timeout: Duration) -> Self {
        self.command_timeout = command_timeout;
        self
    }
}

impl Default for HubConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceConnector for HubConnector {
    type Session = HubSession;

    async fn exchange_token(
        &self,
        host: &str,
        port: u16,
        token: &Token,
    ) -> Result<Option<SessionToken>, CoreError> {
        let addr = format!("{}:{}", host, port);
        let url = format!("ws://{}/", addr);

        let mut conn =
            HubConnection::open(&url, addr, self.connect_timeout, self.command_timeout).await?;
        let result = conn.request(|id| Commands::pair(id, token)).await;
        if let Err(e) = conn.close().await {
            tracing::debug!("closing pairing connection failed: {}", e);
        }

        Ok(parse_identity(&result?).and_then(SessionToken::new))
    }

    async fn connect(
        &self,
        host: &str,
        port: u16,
        session_token: &SessionToken,
    ) -> Result<HubSession, CoreError> {
        let addr = format!("{}:{}", host, port);
        let url = format!("ws://{}/?token={}", addr, session_token.as_str());

        let conn = HubConnection::open(&url, addr.clone(), self.connect_timeout, self.command_timeout)
            .await?;
        Ok(HubSession {
            addr,
            conn: Some(conn),
        })
    }
}

/// An open hub session. Every call after `disconnect` fails with
/// [`DeviceError::Closed`].
pub struct HubSession {
    addr: String,
    conn: Option<HubConnection>,
}

impl HubSession {
    /// `host:port` of the hub this session talks to.
    pub fn addr(&self) -> &str {
        &self.addr
    }

    fn conn(&mut self) -> Result<&mut HubConnection, CoreError> {
        let addr = &self.addr;
        self.conn.as_mut().ok_or_else(|| {
            CoreError::Device(DeviceError::Closed {
                addr: addr.clone(),
            })
        })
    }
}

#[async_trait]
impl DeviceSession for HubSession {
    async fn get_config(&mut self) -> Result<DeviceConfig, CoreError> {
        let data = self.conn()?.request(Commands::get_config).await?;
        Ok(DeviceConfig::from_value(data)?)
    }

    async fn get_current_activity(&mut self) -> Result<ActivityId, CoreError> {
        let conn = self.conn()?;
        let data = conn.request(Commands::get_current_activity).await?;
        Ok(parse_current_activity(&data, &conn.addr)?)
    }

    async fn start_activity(&mut self, activity_id: &str) -> Result<(), CoreError> {
        self.conn()?
            .request(|id| Commands::start_activity(id, activity_id))
            .await?;
        Ok(())
    }

    async fn sync(&mut self) -> Result<(), CoreError> {
        self.conn()?.request(Commands::sync).await?;
        Ok(())
    }

    async fn disconnect(&mut self, send_close: bool) -> Result<(), CoreError> {
        match self.conn.take() {
            Some(mut conn) if send_close => conn.close().await,
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::commands::{GET_CONFIG, GET_CURRENT_ACTIVITY, PAIR, START_ACTIVITY, SYNC};
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    /// Accepts one WebSocket client per connection and answers each request
    /// with a canned reply, preceded by an unrelated notification frame.
    async fn spawn_hub(seen: Arc<Mutex<Vec<Value>>>) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let seen = seen.clone();
                tokio::spawn(async move {
                    let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
                    while let Some(Ok(msg)) = ws.next().await {
                        let Message::Text(text) = msg else { continue };
                        let request: Value = serde_json::from_str(&text).unwrap();
                        seen.lock().unwrap().push(request.clone());

                        let data = match request["cmd"].as_str().unwrap() {
                            PAIR => json!({"identity": "session-identity"}),
                            GET_CONFIG => json!({
                                "activity": [{"id": "2", "label": "Listen to Music"}]
                            }),
                            GET_CURRENT_ACTIVITY => json!({"result": "2"}),
                            START_ACTIVITY | SYNC => json!({}),
                            _ => json!(null),
                        };
                        let code = if request["cmd"] == "unknown" { 404 } else { 200 };

                        ws.send(Message::Text(
                            json!({"type": "notify", "data": {}}).to_string(),
                        ))
                        .await
                        .unwrap();
                        ws.send(Message::Text(
                            json!({"id": request["id"], "code": code, "msg": "OK", "data": data})
                                .to_string(),
                        ))
                        .await
                        .unwrap();
                    }
                });
            }
        });

        port
    }

    #[tokio::test]
    async fn test_exchange_token() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let port = spawn_hub(seen.clone()).await;

        let token = Token::new("user-token").unwrap();
        let session = HubConnector::new()
            .exchange_token("127.0.0.1", port, &token)
            .await
            .unwrap();

        assert_eq!(session.unwrap().as_str(), "session-identity");
        let seen = seen.lock().unwrap();
        assert_eq!(seen[0]["cmd"], PAIR);
        assert_eq!(seen[0]["params"]["token"], "user-token");
    }

    #[tokio::test]
    async fn test_session_commands() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let port = spawn_hub(seen.clone()).await;

        let token = SessionToken::new("session-identity").unwrap();
        let mut session = HubConnector::new()
            .connect("127.0.0.1", port, &token)
            .await
            .unwrap();

        let config = session.get_config().await.unwrap();
        assert_eq!(config.activity[0].label, "Listen to Music");
        assert_eq!(session.get_current_activity().await.unwrap(), ActivityId(2));
        session.start_activity("2").await.unwrap();
        session.sync().await.unwrap();
        session.disconnect(true).await.unwrap();

        let err = session.sync().await.unwrap_err();
        let expected = format!("127.0.0.1:{}", port);
        assert!(matches!(
            err,
            CoreError::Device(DeviceError::Closed { ref addr }) if *addr == expected
        ));
        assert_eq!(session.addr(), expected);

        let seen = seen.lock().unwrap();
        let ids: Vec<&str> = seen.iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
        assert_eq!(seen[2]["params"]["activityId"], "2");
    }

    #[tokio::test]
    async fn test_connect_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let token = SessionToken::new("x").unwrap();
        let result = HubConnector::new().connect("127.0.0.1", port, &token).await;
        assert!(matches!(
            result,
            Err(CoreError::Device(DeviceError::Connect { .. }))
        ));
    }
}
