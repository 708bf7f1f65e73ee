use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{EmailCategory, EmailSummary, Importance};
use crate::error::{AtriumError, Result};

/// Typed update payload for an email summary. Sender, recipients and
/// timestamps are immutable once ingested.
#[derive(Debug, Default)]
pub struct EmailPatch {
    pub subject: Option<String>,
    pub summary: Option<String>,
    pub importance: Option<Importance>,
    pub action_required: Option<bool>,
    pub category: Option<EmailCategory>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct EmailStore {
    emails: Vec<EmailSummary>,
}

impl EmailStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_all(&mut self, emails: Vec<EmailSummary>) {
        self.emails = emails;
    }

    /// Prepend, newest first: the email list is a feed.
    pub fn add(&mut self, email: EmailSummary) -> Result<()> {
        if self.emails.iter().any(|e| e.id == email.id) {
            return Err(AtriumError::DuplicateId(email.id.to_string()));
        }
        tracing::debug!(id = %email.id, subject = %email.subject, "email added");
        self.emails.insert(0, email);
        Ok(())
    }

    pub fn update(&mut self, id: &Uuid, patch: EmailPatch) -> Result<()> {
        let email = self
            .emails
            .iter_mut()
            .find(|e| e.id == *id)
            .ok_or_else(|| AtriumError::NotFound(id.to_string()))?;

        if let Some(subject) = patch.subject {
            email.subject = subject;
        }
        if let Some(summary) = patch.summary {
            email.summary = summary;
        }
        if let Some(importance) = patch.importance {
            email.importance = importance;
        }
        if let Some(action_required) = patch.action_required {
            email.action_required = action_required;
        }
        if let Some(category) = patch.category {
            email.category = category;
        }
        Ok(())
    }

    pub fn remove(&mut self, id: &Uuid) -> Result<EmailSummary> {
        let pos = self
            .emails
            .iter()
            .position(|e| e.id == *id)
            .ok_or_else(|| AtriumError::NotFound(id.to_string()))?;
        Ok(self.emails.remove(pos))
    }

    /// Set `read_at` on first read; already-read emails are left untouched.
    /// The stored instant never precedes `received_at`.
    pub fn mark_read(&mut self, id: &Uuid, at: DateTime<Utc>) -> Result<()> {
        let email = self
            .emails
            .iter_mut()
            .find(|e| e.id == *id)
            .ok_or_else(|| AtriumError::NotFound(id.to_string()))?;
        if email.read_at.is_none() {
            email.read_at = Some(at.max(email.received_at));
        }
        Ok(())
    }

    pub fn get(&self, id: &Uuid) -> Option<&EmailSummary> {
        self.emails.iter().find(|e| e.id == *id)
    }

    pub fn all(&self) -> &[EmailSummary] {
        &self.emails
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn unread(&self) -> Vec<&EmailSummary> {
        self.emails.iter().filter(|e| e.is_unread()).collect()
    }

    pub fn unread_count(&self) -> usize {
        self.emails.iter().filter(|e| e.is_unread()).count()
    }

    pub fn important_count(&self) -> usize {
        self.emails
            .iter()
            .filter(|e| e.importance == Importance::High)
            .count()
    }

    pub fn action_required_count(&self) -> usize {
        self.emails.iter().filter(|e| e.action_required).count()
    }

    pub fn by_category(&self, category: EmailCategory) -> Vec<&EmailSummary> {
        self.emails.iter().filter(|e| e.category == category).collect()
    }
}
