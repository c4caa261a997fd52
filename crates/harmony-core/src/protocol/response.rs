//! Response frame parsing for the hub protocol.

use serde::Deserialize;
use serde_json::Value;

use crate::error::DeviceError;
use crate::types::ActivityId;

/// Status code the hub uses for a successful command.
pub const CODE_OK: i64 = 200;

/// A single response frame.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl Response {
    /// Parse a text frame. Frames that are not JSON objects are rejected.
    pub fn parse(text: &str, addr: &str) -> Result<Self, DeviceError> {
        serde_json::from_str(text).map_err(|e| DeviceError::InvalidResponse {
            addr: addr.to_string(),
            message: format!("Failed to parse frame: {}", e),
        })
    }

    pub fn answers(&self, request_id: &str) -> bool {
        self.id.as_deref() == Some(request_id)
    }

    /// Turn a non-200 code into a command failure. A missing code counts as success.
    pub fn into_data(self, addr: &str, command: &str) -> Result<Value, DeviceError> {
        match self.code {
            Some(code) if code != CODE_OK => Err(DeviceError::CommandFailed {
                addr: addr.to_string(),
                command: command.to_string(),
                message: format!(
                    "code {}: {}",
                    code,
                    self.msg.unwrap_or_else(|| "unknown error".to_string())
                ),
            }),
            _ => Ok(self.data),
        }
    }
}

/// Extract the hub identity from a pair response. Empty or missing yields `None`.
pub fn parse_identity(data: &Value) -> Option<String> {
    data.get("identity")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Extract the current activity id. The hub sends it either as a number or
/// as a numeric string.
pub fn parse_current_activity(data: &Value, addr: &str) -> Result<ActivityId, DeviceError> {
    let result = data.get("result").ok_or_else(|| DeviceError::InvalidResponse {
        addr: addr.to_string(),
        message: "No result in current activity response".to_string(),
    })?;

    let id = match result {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    id.map(ActivityId).ok_or_else(|| DeviceError::InvalidResponse {
        addr: addr.to_string(),
        message: format!("Current activity is not an integer: {}", result),
    })
}
