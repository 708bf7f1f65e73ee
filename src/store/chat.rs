use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{ChatMessage, ChatSession};
use crate::error::{AtriumError, Result};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ChatStore {
    sessions: Vec<ChatSession>,
    current: Option<Uuid>,
    // Transient UI state, never snapshotted.
    #[serde(skip)]
    typing: bool,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all sessions; the current-session pointer is kept only if it
    /// still resolves.
    pub fn set_all(&mut self, sessions: Vec<ChatSession>) {
        self.sessions = sessions;
        if let Some(id) = self.current {
            if !self.sessions.iter().any(|s| s.id == id) {
                self.current = None;
            }
        }
    }

    /// Create a session, prepend it, and make it current.
    pub fn create_session(&mut self, title: impl Into<String>, at: DateTime<Utc>) -> Uuid {
        let session = ChatSession::new(title, at);
        let id = session.id;
        tracing::debug!(id = %id, "chat session created");
        self.sessions.insert(0, session);
        self.current = Some(id);
        id
    }

    /// Append a message and refresh the session's `updated_at`.
    pub fn add_message(&mut self, session_id: &Uuid, message: ChatMessage) -> Result<()> {
        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.id == *session_id)
            .ok_or_else(|| AtriumError::NotFound(session_id.to_string()))?;
        session.updated_at = session.updated_at.max(message.timestamp);
        session.messages.push(message);
        Ok(())
    }

    pub fn set_current(&mut self, id: Option<Uuid>) -> Result<()> {
        if let Some(id) = id {
            if !self.sessions.iter().any(|s| s.id == id) {
                return Err(AtriumError::NotFound(id.to_string()));
            }
        }
        self.current = id;
        Ok(())
    }

    pub fn current(&self) -> Option<&ChatSession> {
        self.current.and_then(|id| self.get(&id))
    }

    pub fn set_archived(&mut self, id: &Uuid, archived: bool, at: DateTime<Utc>) -> Result<()> {
        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.id == *id)
            .ok_or_else(|| AtriumError::NotFound(id.to_string()))?;
        session.archived = archived;
        session.updated_at = session.updated_at.max(at);
        Ok(())
    }

    pub fn remove(&mut self, id: &Uuid) -> Result<ChatSession> {
        let pos = self
            .sessions
            .iter()
            .position(|s| s.id == *id)
            .ok_or_else(|| AtriumError::NotFound(id.to_string()))?;
        if self.current == Some(*id) {
            self.current = None;
        }
        Ok(self.sessions.remove(pos))
    }

    pub fn get(&self, id: &Uuid) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.id == *id)
    }

    pub fn all(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn active(&self) -> Vec<&ChatSession> {
        self.sessions.iter().filter(|s| !s.archived).collect()
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn set_typing(&mut self, typing: bool) {
        self.typing = typing;
    }
}
