//! Display event types: type + payload, one event per refreshed value.
//! Payloads are `serde_json::Value`; the server serializes its typed snapshots into that.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// One event on the display stream: which upstream refreshed, when, and the value.
///
/// Serialized as `{"type": "weather", "fetched_at": ..., "snapshot": {...}}` /
/// `{"type": "calendar", "fetched_at": ..., "events": [...]}`.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayEvent {
    Weather {
        fetched_at: DateTime<Utc>,
        snapshot: Value,
    },
    Calendar {
        fetched_at: DateTime<Utc>,
        events: Value,
    },
}

impl DisplayEvent {
    /// Wraps a weather snapshot, stamped with the current time.
    ///
    /// A snapshot that fails to serialize becomes `null` rather than an error;
    /// the stream keeps flowing and the display shows nothing for that tick.
    pub fn weather(snapshot: &impl Serialize) -> Self {
        Self::Weather {
            fetched_at: Utc::now(),
            snapshot: serde_json::to_value(snapshot).unwrap_or(Value::Null),
        }
    }

    /// Wraps a refreshed event list, stamped with the current time.
    pub fn calendar(events: &impl Serialize) -> Self {
        Self::Calendar {
            fetched_at: Utc::now(),
            events: serde_json::to_value(events).unwrap_or(Value::Null),
        }
    }

    /// Serializes this event to a JSON object.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
