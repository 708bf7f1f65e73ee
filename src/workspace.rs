//! Workspace lifecycle and snapshot persistence.
//!
//! A `Workspace` owns one store per entity kind and is the only mutation path
//! into them. It is constructed explicitly at application start and passed to
//! whatever needs it; there are no module-level singletons. State snapshots
//! to `.atrium/state.json` as lossless JSON (ISO-8601 dates, lowercase enum
//! literals), and the theme/sidebar preference slice additionally snapshots
//! to `.atrium/prefs.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AtriumError, Result};
use crate::store::{AppStore, ChatStore, EmailStore, FinanceStore, NotificationStore, TaskStore};

const ATRIUM_DIR: &str = ".atrium";
const STATE_FILE: &str = "state.json";
const PREFS_FILE: &str = "prefs.json";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Workspace {
    pub tasks: TaskStore,
    pub emails: EmailStore,
    pub finance: FinanceStore,
    pub notifications: NotificationStore,
    pub chat: ChatStore,
    pub app: AppStore,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Workspace {
    /// An in-memory workspace with no backing snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Test-harness hook: drop all state, keep the snapshot binding.
    pub fn reset(&mut self) {
        let path = self.path.take();
        *self = Self::default();
        self.path = path;
    }

    /// Initialize a new workspace directory with an empty snapshot.
    pub fn init(root: &Path) -> Result<Self> {
        let dir = root.join(ATRIUM_DIR);

        if dir.exists() {
            return Err(AtriumError::AlreadyInitialized);
        }

        fs::create_dir_all(&dir)?;

        let mut workspace = Self::new();
        workspace.path = Some(dir.join(STATE_FILE));
        workspace.save()?;

        Ok(workspace)
    }

    /// Open an existing workspace snapshot.
    pub fn open(root: &Path) -> Result<Self> {
        let path = root.join(ATRIUM_DIR).join(STATE_FILE);

        if !path.exists() {
            return Err(AtriumError::NotInitialized);
        }

        let bytes = fs::read(&path)?;
        let mut workspace: Workspace = serde_json::from_slice(&bytes)?;
        workspace.path = Some(path.clone());

        // The preference snapshot wins over whatever the state file carried.
        let prefs_path = path.with_file_name(PREFS_FILE);
        if prefs_path.exists() {
            let prefs = serde_json::from_slice(&fs::read(&prefs_path)?)?;
            workspace.app.apply_prefs(prefs);
        }

        tracing::debug!(path = %path.display(), "workspace opened");
        Ok(workspace)
    }

    /// Write the state snapshot and the preference slice back to disk.
    pub fn save(&self) -> Result<()> {
        let path = self.path.as_ref().ok_or(AtriumError::NotInitialized)?;

        fs::write(path, serde_json::to_vec_pretty(self)?)?;
        fs::write(
            path.with_file_name(PREFS_FILE),
            serde_json::to_vec_pretty(&self.app.prefs())?,
        )?;

        tracing::debug!(path = %path.display(), "workspace saved");
        Ok(())
    }

    pub fn atrium_dir(&self) -> Option<&Path> {
        self.path.as_deref().and_then(Path::parent)
    }
}
