use serde::{Deserialize, Serialize};

/// Label carried by a notification before the caller names it
pub const DEFAULT_NOTIFICATION_NAME: &str = "New Notification";

/// One notification inside a timed, multi-step schedule.
///
/// The three time fields are independent values owned by whoever drives the
/// schedule; nothing here derives one from another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Human-readable label
    pub name: String,
    /// Body text shown to the user
    pub message: String,
    /// Offset from the start of the enclosing sequence
    pub time_from_start: i64,
    /// Point-in-sequence marker set by the caller
    pub time_point: i64,
    /// Whether an audible alert accompanies the notification
    pub buzzer: bool,
    /// Delivered/acknowledged flag; absent on input means not done
    #[serde(default)]
    pub done: bool,
    /// Index of the step this notification is relative to
    pub ref_step_index: u32,
    /// Absolute anchor of the notification
    pub time_absolute: u64,
}

impl Default for Notification {
    fn default() -> Self {
        Self {
            name: DEFAULT_NOTIFICATION_NAME.to_string(),
            message: String::new(),
            time_from_start: 0,
            time_point: 0,
            buzzer: true,
            done: false,
            ref_step_index: 0,
            time_absolute: 0,
        }
    }
}

impl Notification {
    /// Create a default notification with the given name
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Check if the notification still has to be delivered
    pub fn is_pending(&self) -> bool {
        !self.done
    }

    /// Flag the notification as delivered
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Serialize to a single-line JSON object
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a JSON object in the current format
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}
