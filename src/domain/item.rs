use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Todo identity: milliseconds since the epoch at creation time
pub type TodoId = i64;

/// Wall-clock time of day at which a reminder should fire.
///
/// Persisted as "HH:MM", the value an `<input type="time">` control produces,
/// so existing stores remain readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTime {
    pub hour: u32,
    pub minute: u32,
}

/// Error returned when a string is not a valid "HH:MM" time
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid notification time: {0:?}")]
pub struct ParseNotificationTimeError(pub String);

impl NotificationTime {
    /// Create a time-of-day, or None if out of range
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }
}

impl fmt::Display for NotificationTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for NotificationTime {
    type Err = ParseNotificationTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseNotificationTimeError(s.to_string());
        let (hour, minute) = s.split_once(':').ok_or_else(err)?;
        let hour = hour.parse().map_err(|_| err())?;
        let minute = minute.parse().map_err(|_| err())?;
        Self::new(hour, minute).ok_or_else(err)
    }
}

impl Serialize for NotificationTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NotificationTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A single text reminder attached to a calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique id, used as identity for toggle/delete
    pub id: TodoId,
    /// Reminder text, non-empty after trimming
    pub text: String,
    /// Whether the todo has been completed
    #[serde(default)]
    pub done: bool,
    /// Optional alert time; absence of the field means "no alert"
    #[serde(
        rename = "notificationTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub notification_time: Option<NotificationTime>,
}
