use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{Importance, Notification};
use crate::error::{AtriumError, Result};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct NotificationStore {
    notifications: Vec<Notification>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_all(&mut self, notifications: Vec<Notification>) {
        self.notifications = notifications;
    }

    /// Prepend, newest first.
    pub fn add(&mut self, notification: Notification) -> Result<()> {
        if self.notifications.iter().any(|n| n.id == notification.id) {
            return Err(AtriumError::DuplicateId(notification.id.to_string()));
        }
        tracing::debug!(id = %notification.id, kind = %notification.kind, "notification added");
        self.notifications.insert(0, notification);
        Ok(())
    }

    pub fn mark_read(&mut self, id: &Uuid) -> Result<()> {
        let n = self
            .notifications
            .iter_mut()
            .find(|n| n.id == *id)
            .ok_or_else(|| AtriumError::NotFound(id.to_string()))?;
        n.read = true;
        Ok(())
    }

    pub fn mark_all_read(&mut self) {
        for n in &mut self.notifications {
            n.read = true;
        }
    }

    pub fn remove(&mut self, id: &Uuid) -> Result<Notification> {
        let pos = self
            .notifications
            .iter()
            .position(|n| n.id == *id)
            .ok_or_else(|| AtriumError::NotFound(id.to_string()))?;
        Ok(self.notifications.remove(pos))
    }

    pub fn clear(&mut self) {
        self.notifications.clear();
    }

    /// Drop notifications whose expiry has passed. Returns how many were
    /// removed.
    pub fn prune_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.notifications.len();
        self.notifications.retain(|n| !n.is_expired(now));
        before - self.notifications.len()
    }

    pub fn get(&self, id: &Uuid) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == *id)
    }

    pub fn all(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn unread(&self) -> Vec<&Notification> {
        self.notifications.iter().filter(|n| !n.read).collect()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn critical_count(&self) -> usize {
        self.notifications
            .iter()
            .filter(|n| n.priority == Importance::High)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::NotificationKind;

    fn notification(title: &str, at: DateTime<Utc>) -> Notification {
        Notification::new(title, "msg", NotificationKind::System, at)
    }

    #[test]
    fn test_unread_count_tracks_reads() {
        let now = Utc::now();
        let mut store = NotificationStore::new();
        store.add(notification("a", now)).unwrap();
        store.add(notification("b", now)).unwrap();
        assert_eq!(store.unread_count(), 2);

        let id = store.all()[0].id;
        store.mark_read(&id).unwrap();
        assert_eq!(store.unread_count(), 1);

        store.mark_all_read();
        assert_eq!(store.unread_count(), 0);
    }

    #[test]
    fn test_remove_does_not_drift_unread_count() {
        let now = Utc::now();
        let mut store = NotificationStore::new();
        store.add(notification("a", now)).unwrap();
        store.add(notification("b", now)).unwrap();
        let read_id = store.all()[0].id;
        store.mark_read(&read_id).unwrap();

        store.remove(&read_id).unwrap();
        assert_eq!(store.unread_count(), 1);
    }

    #[test]
    fn test_prune_expired() {
        let now = Utc::now();
        let mut store = NotificationStore::new();
        let mut stale = notification("stale", now);
        stale.expires_at = Some(now - chrono::Duration::hours(1));
        store.add(stale).unwrap();
        store.add(notification("fresh", now)).unwrap();

        assert_eq!(store.prune_expired(now), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].title, "fresh");
    }

    #[test]
    fn test_mark_read_unknown_id_is_not_found() {
        let mut store = NotificationStore::new();
        assert!(matches!(
            store.mark_read(&Uuid::new_v4()),
            Err(AtriumError::NotFound(_))
        ));
    }
}
