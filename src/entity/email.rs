use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Importance;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailContact {
    pub name: String,
    pub email: String,
}

impl EmailContact {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Parse `"Name <addr>"` or a bare address.
    pub fn parse(s: &str) -> Self {
        if let (Some(open), Some(close)) = (s.find('<'), s.rfind('>')) {
            if open < close {
                let name = s[..open].trim();
                let addr = s[open + 1..close].trim();
                return Self::new(if name.is_empty() { addr } else { name }, addr);
            }
        }
        Self::new(s.trim(), s.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmailCategory {
    Work,
    #[default]
    Personal,
    Finance,
    Shopping,
    Social,
    Promotions,
    Spam,
}

impl std::fmt::Display for EmailCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmailCategory::Work => write!(f, "work"),
            EmailCategory::Personal => write!(f, "personal"),
            EmailCategory::Finance => write!(f, "finance"),
            EmailCategory::Shopping => write!(f, "shopping"),
            EmailCategory::Social => write!(f, "social"),
            EmailCategory::Promotions => write!(f, "promotions"),
            EmailCategory::Spam => write!(f, "spam"),
        }
    }
}

impl std::str::FromStr for EmailCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "work" => Ok(EmailCategory::Work),
            "personal" => Ok(EmailCategory::Personal),
            "finance" => Ok(EmailCategory::Finance),
            "shopping" => Ok(EmailCategory::Shopping),
            "social" => Ok(EmailCategory::Social),
            "promotions" => Ok(EmailCategory::Promotions),
            "spam" => Ok(EmailCategory::Spam),
            _ => Err(format!("Invalid email category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailSummary {
    pub id: Uuid,
    pub subject: String,
    pub sender: EmailContact,
    pub recipients: Vec<EmailContact>,
    pub summary: String,
    pub importance: Importance,
    pub action_required: bool,
    pub suggested_actions: Vec<String>,
    pub category: EmailCategory,
    pub received_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

impl EmailSummary {
    pub fn new(
        subject: impl Into<String>,
        sender: EmailContact,
        received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject: subject.into(),
            sender,
            recipients: Vec::new(),
            summary: String::new(),
            importance: Importance::default(),
            action_required: false,
            suggested_actions: Vec::new(),
            category: EmailCategory::default(),
            received_at,
            read_at: None,
        }
    }

    pub fn is_unread(&self) -> bool {
        self.read_at.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_parse_angle_form() {
        let c = EmailContact::parse("Dana Reeve <dana@example.com>");
        assert_eq!(c.name, "Dana Reeve");
        assert_eq!(c.email, "dana@example.com");
    }

    #[test]
    fn test_contact_parse_bare_address() {
        let c = EmailContact::parse("ops@example.com");
        assert_eq!(c.name, "ops@example.com");
        assert_eq!(c.email, "ops@example.com");
    }

    #[test]
    fn test_unread_until_read() {
        let now = Utc::now();
        let mut email = EmailSummary::new("Invoice", EmailContact::parse("a@b.c"), now);
        assert!(email.is_unread());
        email.read_at = Some(now);
        assert!(!email.is_unread());
    }
}
