//! Notification engine: creation, dismissal, timed expiry and durable
//! persistence of the notification queue held by the [`AppStore`].
//!
//! Expiry is driven by one tokio task per transient notification. Each task
//! owns a [`CancellationToken`] registered under the notification id; the
//! token is cancelled as soon as the entry leaves the queue for any reason,
//! so a dismissed notification can never be removed a second time by a late
//! timer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use async_trait::async_trait;
use postdesk_core::config::NotificationsConfig;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use super::persistence::{restore_persistent, PersistenceObserver};
use super::persistence_iface::NotificationStorage;
use super::types::{Notification, NotificationType};
use crate::store::{Action, AppState, AppStore, CommitObserver, NotificationsState};

/// Keeps one expiry timer per transient notification.
pub struct ExpiryScheduler {
    store: Weak<AppStore>,
    timers: Mutex<HashMap<String, CancellationToken>>,
}

impl ExpiryScheduler {
    pub fn new(store: &Arc<AppStore>) -> Self {
        Self {
            store: Arc::downgrade(store),
            timers: Mutex::new(HashMap::new()),
        }
    }

    fn timers(&self) -> MutexGuard<'_, HashMap<String, CancellationToken>> {
        match self.timers.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn schedule(&self, id: &str, after: Duration) {
        let token = CancellationToken::new();
        if let Some(previous) = self.timers().insert(id.to_string(), token.clone()) {
            previous.cancel();
        }

        let store = self.store.clone();
        let id = id.to_string();
        trace!("Scheduling expiry of notification {} in {:?}", id, after);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    trace!("Expiry timer for notification {} cancelled", id);
                }
                _ = tokio::time::sleep(after) => {
                    if let Some(store) = store.upgrade() {
                        debug!("Notification {} expired", id);
                        store.dispatch(Action::RemoveNotification(id)).await;
                    }
                }
            }
        });
    }

    /// Cancels every timer whose notification is no longer queued.
    fn reconcile(&self, state: &NotificationsState) {
        self.timers().retain(|id, token| {
            let keep = state.contains(id);
            if !keep {
                token.cancel();
            }
            keep
        });
    }

    pub fn cancel_all(&self) {
        let mut timers = self.timers();
        for (_, token) in timers.drain() {
            token.cancel();
        }
    }

    pub fn pending(&self) -> usize {
        self.timers().len()
    }
}

#[async_trait]
impl CommitObserver for ExpiryScheduler {
    async fn on_commit(&self, action: &Action, state: &AppState) {
        match action {
            Action::AddNotification(notification) => {
                if let Some(after) = notification.expires_after() {
                    self.schedule(&notification.id, after);
                }
            }
            Action::RemoveNotification(_) | Action::ClearAllNotifications | Action::ClearTemporaryNotifications => {
                self.reconcile(&state.notifications);
            }
            _ => {}
        }
    }
}

/// Default display durations per notification type, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationDurations {
    pub success: u64,
    pub info: u64,
    pub warning: u64,
    pub error: u64,
}

impl NotificationDurations {
    pub fn for_type(&self, kind: NotificationType) -> u64 {
        match kind {
            NotificationType::Success => self.success,
            NotificationType::Info => self.info,
            NotificationType::Warning => self.warning,
            NotificationType::Error => self.error,
        }
    }
}

impl From<&NotificationsConfig> for NotificationDurations {
    fn from(config: &NotificationsConfig) -> Self {
        Self {
            success: config.success_duration_ms,
            info: config.info_duration_ms,
            warning: config.warning_duration_ms,
            error: config.error_duration_ms,
        }
    }
}

impl Default for NotificationDurations {
    fn default() -> Self {
        Self::from(&NotificationsConfig::default())
    }
}

pub struct NotificationEngine {
    store: Arc<AppStore>,
    scheduler: Arc<ExpiryScheduler>,
    durations: NotificationDurations,
}

impl NotificationEngine {
    /// Builds a store whose notification queue starts with the persisted
    /// notifications, then attaches an engine to it.
    pub async fn restore(storage: Arc<dyn NotificationStorage>, durations: NotificationDurations) -> Self {
        let restored = restore_persistent(storage.as_ref()).await;
        info!("Restored {} persistent notifications", restored.len());
        let initial = AppState {
            notifications: NotificationsState { notifications: restored },
            ..AppState::default()
        };
        Self::attach(Arc::new(AppStore::with_state(initial)), storage, durations)
    }

    /// Hooks persistence and expiry into an existing store.
    pub fn attach(store: Arc<AppStore>, storage: Arc<dyn NotificationStorage>, durations: NotificationDurations) -> Self {
        let scheduler = Arc::new(ExpiryScheduler::new(&store));
        store.register_observer(Arc::new(PersistenceObserver::new(storage)));
        store.register_observer(scheduler.clone());
        Self { store, scheduler, durations }
    }

    pub fn store(&self) -> &Arc<AppStore> {
        &self.store
    }

    pub fn durations(&self) -> NotificationDurations {
        self.durations
    }

    pub async fn add_notification(
        &self,
        kind: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
        duration: Option<u64>,
        persistent: bool,
    ) -> Notification {
        let notification = Notification::new(kind, title, message, duration, persistent);
        debug!("Adding {} notification {} '{}'", notification.kind, notification.id, notification.title);
        self.store.dispatch(Action::AddNotification(notification.clone())).await;
        notification
    }

    pub async fn success(&self, title: impl Into<String>, message: impl Into<String>) -> Notification {
        self.typed(NotificationType::Success, title, message).await
    }

    pub async fn info(&self, title: impl Into<String>, message: impl Into<String>) -> Notification {
        self.typed(NotificationType::Info, title, message).await
    }

    pub async fn warning(&self, title: impl Into<String>, message: impl Into<String>) -> Notification {
        self.typed(NotificationType::Warning, title, message).await
    }

    pub async fn error(&self, title: impl Into<String>, message: impl Into<String>) -> Notification {
        self.typed(NotificationType::Error, title, message).await
    }

    async fn typed(&self, kind: NotificationType, title: impl Into<String>, message: impl Into<String>) -> Notification {
        let duration = self.durations.for_type(kind);
        self.add_notification(kind, title, message, Some(duration), false).await
    }

    /// Dismisses a notification. Unknown ids are ignored.
    pub async fn remove_notification(&self, id: &str) {
        self.store.dispatch(Action::RemoveNotification(id.to_string())).await;
    }

    pub async fn clear_all_notifications(&self) {
        self.store.dispatch(Action::ClearAllNotifications).await;
    }

    pub async fn clear_temporary_notifications(&self) {
        self.store.dispatch(Action::ClearTemporaryNotifications).await;
    }

    pub async fn notifications_for_display(&self) -> Vec<Notification> {
        self.store.notifications_for_display().await
    }

    /// Number of expiry timers still armed.
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn shutdown(&self) {
        debug!("Cancelling {} pending expiry timers", self.scheduler.pending());
        self.scheduler.cancel_all();
    }
}
