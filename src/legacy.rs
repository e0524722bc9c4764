use serde::Deserialize;
use serde_json::Value;

use crate::notification::Notification;

/// Notification as stored by older schedules.
///
/// Only the fields a user edits were saved back then; the runtime fields
/// are reset on conversion.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyNotification {
    pub name: String,
    pub time_from_start: i64,
    pub buzzer: bool,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub ref_step_index: Option<u32>,
}

impl From<LegacyNotification> for Notification {
    fn from(legacy: LegacyNotification) -> Self {
        let message = match legacy.message {
            Some(Value::String(text)) => text,
            _ => String::new(),
        };

        Notification {
            name: legacy.name,
            message,
            time_from_start: legacy.time_from_start,
            buzzer: legacy.buzzer,
            // Pre-step schedules were all relative to the start
            ref_step_index: legacy.ref_step_index.unwrap_or(0),
            ..Notification::default()
        }
    }
}

/// Result of parsing an incoming notification
#[derive(Debug)]
pub enum ParsedNotification {
    /// Current format
    Current(Notification),
    /// Older format, migrated on conversion
    Legacy(LegacyNotification),
}

impl ParsedNotification {
    pub fn is_legacy(&self) -> bool {
        matches!(self, ParsedNotification::Legacy(_))
    }

    pub fn into_notification(self) -> Notification {
        match self {
            ParsedNotification::Current(notification) => notification,
            ParsedNotification::Legacy(legacy) => legacy.into(),
        }
    }
}

/// Parse a payload as either the current or the legacy notification format
pub fn parse_notification(payload: &str) -> Result<ParsedNotification, serde_json::Error> {
    let value: Value = serde_json::from_str(payload)?;
    parse_notification_value(value)
}

/// Same as [`parse_notification`] for an already decoded JSON value
pub fn parse_notification_value(value: Value) -> Result<ParsedNotification, serde_json::Error> {
    let current_error = match Notification::deserialize(&value) {
        Ok(notification) => return Ok(ParsedNotification::Current(notification)),
        Err(e) => e,
    };

    // Older schedules never stored the runtime fields; a payload carrying
    // either one is current-format and must not lose data to a migration
    if !has_current_only_fields(&value) {
        if let Ok(legacy) = LegacyNotification::deserialize(&value) {
            return Ok(ParsedNotification::Legacy(legacy));
        }
    }

    // Report against the current format, that is what callers should fix
    Err(current_error)
}

fn has_current_only_fields(value: &Value) -> bool {
    match value.as_object() {
        Some(object) => object.contains_key("timePoint") || object.contains_key("timeAbsolute"),
        None => false,
    }
}
