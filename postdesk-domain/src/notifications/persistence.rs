use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info, warn};

use super::errors::StorageError;
use super::persistence_iface::NotificationStorage;
use super::types::Notification;
use crate::store::{Action, AppState, CommitObserver};

/// Stores the persistent notifications as one JSON array in one file.
pub struct FileNotificationStorage {
    path: PathBuf,
}

impl FileNotificationStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Write { path: self.path.clone(), source }
    }
}

#[async_trait]
impl NotificationStorage for FileNotificationStorage {
    async fn load(&self) -> Result<Vec<Notification>, StorageError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Notification storage {:?} not found. Starting with no persistent notifications.", self.path);
                return Ok(Vec::new());
            }
            Err(source) => return Err(StorageError::Read { path: self.path.clone(), source }),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let notifications: Vec<Notification> = serde_json::from_str(&content)?;
        debug!("Loaded {} persistent notifications from {:?}", notifications.len(), self.path);
        Ok(notifications)
    }

    /// Writes a sibling temp file and renames it over the target, so a reader
    /// never sees a half-written snapshot.
    async fn save(&self, notifications: &[Notification]) -> Result<(), StorageError> {
        let content = serde_json::to_string(notifications)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| self.write_error(e))?;
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, content).await.map_err(|e| self.write_error(e))?;
        fs::rename(&tmp, &self.path).await.map_err(|e| self.write_error(e))?;
        debug!("Saved {} persistent notifications to {:?}", notifications.len(), self.path);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.write_error(e)),
        }
    }
}

#[derive(Default)]
struct InMemoryState {
    raw: Option<String>,
    fail: bool,
}

/// Keeps the serialized snapshot in memory. Can be told to fail every call.
#[derive(Clone, Default)]
pub struct InMemoryNotificationStorage {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryNotificationStorage {
    pub fn new() -> Self {
        Default::default()
    }

    /// Starts with arbitrary stored content, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.lock().raw = Some(raw.into());
        storage
    }

    pub fn set_failing(&self, fail: bool) {
        self.lock().fail = fail;
    }

    pub fn raw(&self) -> Option<String> {
        self.lock().raw.clone()
    }

    /// Currently stored notifications; unreadable content reads as empty.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.raw()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InMemoryState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn check(&self, operation: &str) -> Result<(), StorageError> {
        if self.lock().fail {
            return Err(StorageError::Unavailable(format!("{} rejected by in-memory storage", operation)));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationStorage for InMemoryNotificationStorage {
    async fn load(&self) -> Result<Vec<Notification>, StorageError> {
        self.check("load")?;
        match self.raw() {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, notifications: &[Notification]) -> Result<(), StorageError> {
        self.check("save")?;
        let raw = serde_json::to_string(notifications)?;
        self.lock().raw = Some(raw);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.check("clear")?;
        self.lock().raw = None;
        Ok(())
    }
}

/// Loads the persisted notifications, keeping only persistent entries.
/// When entries were dropped, or the content was malformed, the snapshot is
/// rewritten so it matches what was restored. Any other storage failure
/// reads as an empty list and leaves storage alone.
pub async fn restore_persistent(storage: &dyn NotificationStorage) -> Vec<Notification> {
    let (restored, rewrite) = match storage.load().await {
        Ok(loaded) => {
            let total = loaded.len();
            let kept: Vec<Notification> = loaded.into_iter().filter(|n| n.persistent).collect();
            let dropped = total - kept.len();
            if dropped > 0 {
                info!("Dropping {} non-persistent entries from notification storage", dropped);
            }
            (kept, dropped > 0)
        }
        Err(e @ StorageError::Corrupt(_)) => {
            warn!("Notification storage is malformed, starting empty: {}", e);
            (Vec::new(), true)
        }
        Err(e) => {
            warn!("Could not restore persistent notifications, starting empty: {}", e);
            (Vec::new(), false)
        }
    };

    if rewrite {
        if let Err(e) = storage.save(&restored).await {
            warn!("Failed to rewrite notification storage after restore: {}", e);
        }
    }
    restored
}

/// Mirrors the persistent subset of the queue into durable storage after
/// every notification commit.
pub struct PersistenceObserver {
    storage: Arc<dyn NotificationStorage>,
}

impl PersistenceObserver {
    pub fn new(storage: Arc<dyn NotificationStorage>) -> Self {
        Self { storage }
    }

    async fn save_subset(&self, state: &AppState) {
        let persistent = state.notifications.persistent();
        if let Err(e) = self.storage.save(&persistent).await {
            warn!("Failed to save persistent notifications: {}", e);
        }
    }
}

#[async_trait]
impl CommitObserver for PersistenceObserver {
    async fn on_commit(&self, action: &Action, state: &AppState) {
        match action {
            Action::AddNotification(_) | Action::RemoveNotification(_) => {
                self.save_subset(state).await;
            }
            // Only transient entries leave the queue, the persistent subset is unchanged.
            Action::ClearTemporaryNotifications => {}
            Action::ClearAllNotifications => {
                if let Err(e) = self.storage.clear().await {
                    warn!("Failed to clear persistent notifications: {}", e);
                }
            }
            _ => {}
        }
    }
}
