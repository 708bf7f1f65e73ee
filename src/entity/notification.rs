use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Importance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Task,
    Email,
    Finance,
    Security,
    #[default]
    System,
    Reminder,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NotificationKind::Task => "task",
            NotificationKind::Email => "email",
            NotificationKind::Finance => "finance",
            NotificationKind::Security => "security",
            NotificationKind::System => "system",
            NotificationKind::Reminder => "reminder",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "task" => Ok(NotificationKind::Task),
            "email" => Ok(NotificationKind::Email),
            "finance" => Ok(NotificationKind::Finance),
            "security" => Ok(NotificationKind::Security),
            "system" => Ok(NotificationKind::System),
            "reminder" => Ok(NotificationKind::Reminder),
            _ => Err(format!("Invalid notification type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub priority: Importance,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    pub action_url: Option<String>,
    pub action_label: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            message: message.into(),
            kind,
            priority: Importance::default(),
            timestamp,
            read: false,
            action_url: None,
            action_label: None,
            expires_at: None,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(at) if at <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        let mut n = Notification::new("Backup done", "", NotificationKind::System, now);
        assert!(!n.is_expired(now));

        n.expires_at = Some(now - chrono::Duration::minutes(1));
        assert!(n.is_expired(now));

        n.expires_at = Some(now + chrono::Duration::minutes(1));
        assert!(!n.is_expired(now));
    }
}
