//! Command frame builders for the Harmony hub command channel.

use serde::Serialize;
use serde_json::{json, Value};

use crate::types::Token;

/// Name the hub records for paired clients.
pub const CLIENT_NAME: &str = "harmony-cli#rust";

pub const PAIR: &str = "vnd.logitech.connect/vnd.logitech.pair";
pub const GET_CONFIG: &str = "vnd.logitech.harmony/vnd.logitech.harmony.engine?config";
pub const GET_CURRENT_ACTIVITY: &str =
    "vnd.logitech.harmony/vnd.logitech.harmony.engine?getCurrentActivity";
pub const START_ACTIVITY: &str = "vnd.logitech.harmony/vnd.logitech.harmony.engine?startactivity";
pub const SYNC: &str = "vnd.logitech.setup/vnd.logitech.setup.sync";

/// A single request frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    pub id: String,
    pub cmd: &'static str,
    pub params: Value,
}

impl Request {
    pub fn to_text(&self) -> String {
        // Serializing a struct of strings and a Value cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Command builders for the hub protocol
pub struct Commands;

impl Commands {
    /// Exchange a user token for a hub session identity
    pub fn pair(id: String, token: &Token) -> Request {
        Request {
            id,
            cmd: PAIR,
            params: json!({ "token": token.as_str(), "name": CLIENT_NAME }),
        }
    }

    pub fn get_config(id: String) -> Request {
        Request {
            id,
            cmd: GET_CONFIG,
            params: json!({}),
        }
    }

    pub fn get_current_activity(id: String) -> Request {
        Request {
            id,
            cmd: GET_CURRENT_ACTIVITY,
            params: json!({}),
        }
    }

    pub fn start_activity(id: String, activity_id: &str) -> Request {
        Request {
            id,
            cmd: START_ACTIVITY,
            params: json!({ "activityId": activity_id, "timestamp": 0 }),
        }
    }

    pub fn sync(id: String) -> Request {
        Request {
            id,
            cmd: SYNC,
            params: json!({}),
        }
    }
}
