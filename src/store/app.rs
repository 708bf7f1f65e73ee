use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Theme, User};

/// The small slice of UI state that survives restarts on its own
/// (the key-value preference snapshot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Prefs {
    pub theme: Theme,
    pub sidebar_collapsed: bool,
}

/// Application-level state: signed-in user, UI flags, system health.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppStore {
    user: Option<User>,
    authenticated: bool,
    theme: Theme,
    sidebar_collapsed: bool,
    current_page: String,
    system_health: u8,
    last_updated: Option<DateTime<Utc>>,
}

impl Default for AppStore {
    fn default() -> Self {
        Self {
            user: None,
            authenticated: false,
            theme: Theme::default(),
            sidebar_collapsed: false,
            current_page: "dashboard".to_string(),
            system_health: 85,
            last_updated: None,
        }
    }
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&mut self, user: User) {
        tracing::debug!(email = %user.email, "user signed in");
        self.user = Some(user);
        self.authenticated = true;
    }

    pub fn sign_out(&mut self) {
        self.user = None;
        self.authenticated = false;
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) {
        self.sidebar_collapsed = collapsed;
    }

    pub fn current_page(&self) -> &str {
        &self.current_page
    }

    pub fn set_current_page(&mut self, page: impl Into<String>) {
        self.current_page = page.into();
    }

    pub fn system_health(&self) -> u8 {
        self.system_health
    }

    pub fn set_system_health(&mut self, health: u8) {
        self.system_health = health.min(100);
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.last_updated = Some(at);
    }

    pub fn prefs(&self) -> Prefs {
        Prefs {
            theme: self.theme,
            sidebar_collapsed: self.sidebar_collapsed,
        }
    }

    pub fn apply_prefs(&mut self, prefs: Prefs) {
        self.theme = prefs.theme;
        self.sidebar_collapsed = prefs.sidebar_collapsed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_out() {
        let mut store = AppStore::new();
        assert!(!store.is_authenticated());

        store.sign_in(User::new("Ada", "ada@example.com", Utc::now()));
        assert!(store.is_authenticated());
        assert_eq!(store.user().unwrap().name, "Ada");

        store.sign_out();
        assert!(!store.is_authenticated());
        assert!(store.user().is_none());
    }

    #[test]
    fn test_prefs_partialize_roundtrip() {
        let mut store = AppStore::new();
        store.set_theme(Theme::Dark);
        store.set_sidebar_collapsed(true);
        store.set_current_page("finance");

        let prefs = store.prefs();
        let mut fresh = AppStore::new();
        fresh.apply_prefs(prefs);

        assert_eq!(fresh.theme(), Theme::Dark);
        assert!(fresh.sidebar_collapsed());
        // Everything outside the partialized slice stays at its default.
        assert_eq!(fresh.current_page(), "dashboard");
    }

    #[test]
    fn test_system_health_clamped() {
        let mut store = AppStore::new();
        store.set_system_health(250);
        assert_eq!(store.system_health(), 100);
    }
}
