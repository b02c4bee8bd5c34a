use std::fmt;
use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

const ID_SUFFIX_LEN: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Success,
    Error,
    Warning,
    Info,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NotificationType::Success => "success",
            NotificationType::Error => "error",
            NotificationType::Warning => "warning",
            NotificationType::Info => "info",
        };
        f.write_str(name)
    }
}

/// A user-facing message in the notification queue.
///
/// Serialized as `{id, type, title, message, duration?, persistent, timestamp}`,
/// which is also the durable storage format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    /// Milliseconds until expiry. `None` means the entry stays until dismissed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default)]
    pub persistent: bool,
    /// Creation time, epoch milliseconds.
    pub timestamp: i64,
}

impl Notification {
    pub fn new(
        kind: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
        duration: Option<u64>,
        persistent: bool,
    ) -> Self {
        let timestamp = Utc::now().timestamp_millis();
        Self {
            id: generate_notification_id(timestamp),
            kind,
            title: title.into(),
            message: message.into(),
            duration,
            persistent,
            timestamp,
        }
    }

    /// How long until the entry expires on its own, if ever.
    /// Persistent entries and a zero or absent duration never expire.
    pub fn expires_after(&self) -> Option<Duration> {
        if self.persistent {
            return None;
        }
        self.duration.filter(|ms| *ms > 0).map(Duration::from_millis)
    }
}

/// `<epoch millis><9 lowercase base-36 chars>`.
pub fn generate_notification_id(timestamp_millis: i64) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| std::char::from_digit(rng.gen_range(0..36), 36).unwrap_or('0'))
        .collect();
    format!("{}{}", timestamp_millis, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn id_is_timestamp_plus_base36_suffix() {
        let id = generate_notification_id(1_700_000_000_000);
        assert!(id.starts_with("1700000000000"));
        let suffix = &id["1700000000000".len()..];
        assert_eq!(suffix.len(), 9);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn ids_do_not_collide_within_one_millisecond() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_notification_id(42)).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn wire_format_matches_storage_layout() {
        let n = Notification {
            id: "1abc".to_string(),
            kind: NotificationType::Warning,
            title: "Heads up".to_string(),
            message: "Disk almost full".to_string(),
            duration: None,
            persistent: true,
            timestamp: 1,
        };
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1abc", "type": "warning", "title": "Heads up",
                "message": "Disk almost full", "persistent": true, "timestamp": 1
            })
        );
    }

    #[test]
    fn missing_persistent_flag_defaults_to_false() {
        let n: Notification = serde_json::from_str(
            r#"{"id":"x","type":"info","title":"t","message":"m","duration":2000,"timestamp":5}"#,
        )
        .unwrap();
        assert!(!n.persistent);
        assert_eq!(n.expires_after(), Some(Duration::from_millis(2000)));
    }

    #[test]
    fn persistent_or_zero_duration_never_expires() {
        let mut n = Notification::new(NotificationType::Info, "t", "m", Some(1000), true);
        assert_eq!(n.expires_after(), None);
        n.persistent = false;
        n.duration = Some(0);
        assert_eq!(n.expires_after(), None);
    }
}
