//! Typed view over the `/presence` response

use serde_json::Value;

/// Current presence as reported by the service. Values are kept as strings
/// because the service reports states (e.g. `AvailableIdle`, `InAMeeting`)
/// that cannot be set through this client.
///
/// Each field is read on its own; a field with an unexpected type is left
/// empty without affecting the others.
#[derive(Debug, Clone, Default)]
pub struct PresenceStatus {
    pub availability: Option<String>,
    pub activity: Option<String>,
    pub device_type: Option<String>,
    pub note: Option<StatusNote>,
    pub work_location: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct StatusNote {
    pub message: Option<String>,
    pub expiry: Option<String>,
}

impl PresenceStatus {
    pub fn from_json(value: &Value) -> Self {
        Self {
            availability: string_field(value, "availability"),
            activity: string_field(value, "activity"),
            device_type: string_field(value, "deviceType"),
            note: value.get("note").and_then(StatusNote::from_json),
            work_location: value.get("workLocation").filter(|v| !v.is_null()).cloned(),
        }
    }
}

impl StatusNote {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(message) => Some(Self {
                message: Some(message.clone()),
                expiry: None,
            }),
            Value::Object(_) => Some(Self {
                message: string_field(value, "message"),
                expiry: string_field(value, "expiry"),
            }),
            _ => None,
        }
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(String::from)
}
