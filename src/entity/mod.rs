mod chat;
mod email;
mod finance;
mod notification;
mod task;
mod user;

pub use chat::{ChatMessage, ChatRole, ChatSession, MessageMeta};
pub use email::{EmailCategory, EmailContact, EmailSummary};
pub use finance::{Transaction, TransactionCategory, TransactionKind};
pub use notification::{Notification, NotificationKind};
pub use task::{Attachment, SubTask, Task, TaskCategory, TaskPriority, TaskStatus};
pub use user::{
    DashboardLayout, LayoutMode, NotificationSettings, QuietHours, Theme, User, UserPreferences,
};

use serde::{Deserialize, Serialize};

/// Three-level importance scale shared by email summaries and notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for Importance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Importance::Low => write!(f, "low"),
            Importance::Medium => write!(f, "medium"),
            Importance::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Importance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Importance::Low),
            "medium" => Ok(Importance::Medium),
            "high" => Ok(Importance::High),
            _ => Err(format!("Invalid importance: {}", s)),
        }
    }
}
