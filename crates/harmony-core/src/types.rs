//! Data model shared between the hub client and the CLI.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConfigError;

/// Long-lived user token issued by the identity gateway.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

/// Hub-scoped token obtained by exchanging a [`Token`].
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

macro_rules! opaque_token {
    ($name:ident) => {
        impl $name {
            /// Wrap a raw token, treating an empty string as no token at all.
            pub fn new(raw: impl Into<String>) -> Option<Self> {
                let raw = raw.into();
                if raw.is_empty() {
                    None
                } else {
                    Some(Self(raw))
                }
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        // Tokens are credentials; keep them out of logs.
        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "(<redacted>)"))
            }
        }
    };
}

opaque_token!(Token);
opaque_token!(SessionToken);

/// Numeric activity identifier as reported by the hub. `-1` is PowerOff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityId(pub i64);

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single activity block from the hub configuration.
///
/// Only `id` and `label` are interpreted; every other key is carried through
/// untouched so the block can be printed back in full. The id is exposed as a
/// string but re-emitted in whatever JSON form the hub sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawActivity", into = "RawActivity")]
pub struct Activity {
    pub id: String,
    pub label: String,
    pub extra: Map<String, Value>,
    raw_id: Value,
}

impl Activity {
    /// The id interpreted as an integer, if it is one.
    pub fn numeric_id(&self) -> Option<ActivityId> {
        self.id.trim().parse::<i64>().ok().map(ActivityId)
    }
}

#[derive(Serialize, Deserialize)]
struct RawActivity {
    id: Value,
    label: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<RawActivity> for Activity {
    type Error = String;

    fn try_from(raw: RawActivity) -> Result<Self, Self::Error> {
        let id = match &raw.id {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            other => return Err(format!("expected string or number, got {}", other)),
        };

        Ok(Self {
            id,
            label: raw.label,
            extra: raw.extra,
            raw_id: raw.id,
        })
    }
}

impl From<Activity> for RawActivity {
    fn from(activity: Activity) -> Self {
        Self {
            id: activity.raw_id,
            label: activity.label,
            extra: activity.extra,
        }
    }
}

/// Hub configuration: the activity list plus device and command metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    #[serde(default)]
    pub activity: Vec<Activity>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeviceConfig {
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Find the activity whose id is numerically equal to `id`.
    pub fn find_by_id(&self, id: ActivityId) -> Option<&Activity> {
        self.activity.iter().find(|a| a.numeric_id() == Some(id))
    }

    /// Resolve a user-supplied reference. First match in configuration order wins.
    pub fn resolve(&self, reference: &ActivityRef) -> Option<&Activity> {
        self.activity.iter().find(|a| reference.matches(a))
    }
}

/// An activity named on the command line, either by id or by label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRef(String);

impl ActivityRef {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_all_digits(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(|c| c.is_ascii_digit())
    }

    /// True when the reference is all digits and numerically equal to the
    /// activity id, or equal to its label ignoring case.
    pub fn matches(&self, activity: &Activity) -> bool {
        let by_id = self.is_all_digits()
            && match (self.0.parse::<i64>().ok(), activity.numeric_id()) {
                (Some(wanted), Some(ActivityId(id))) => wanted == id,
                _ => false,
            };

        by_id || activity.label.to_lowercase() == self.0.to_lowercase()
    }
}

impl fmt::Display for ActivityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ActivityRef {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}
