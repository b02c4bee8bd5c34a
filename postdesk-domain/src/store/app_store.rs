use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, trace};

use super::actions::{Action, Slice};
use super::events::StoreEvent;
use super::reducers;
use super::state::{AppState, NotificationsState, PostsState};
use crate::notifications::types::Notification;
use crate::posts::types::Post;

pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Side-effect hook run after each reducer commit, still under the store lock,
/// so observers see commits in dispatch order.
///
/// Observers must not dispatch synchronously: spawn a task instead.
#[async_trait]
pub trait CommitObserver: Send + Sync {
    async fn on_commit(&self, action: &Action, state: &AppState);
}

/// The single state container of an application context.
pub struct AppStore {
    state: Mutex<AppState>,
    observers: RwLock<Vec<Arc<dyn CommitObserver>>>,
    event_publisher: broadcast::Sender<StoreEvent>,
}

impl AppStore {
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    pub fn with_state(initial: AppState) -> Self {
        let (event_publisher, _) = broadcast::channel(DEFAULT_EVENT_CAPACITY);
        Self {
            state: Mutex::new(initial),
            observers: RwLock::new(Vec::new()),
            event_publisher,
        }
    }

    pub fn register_observer(&self, observer: Arc<dyn CommitObserver>) {
        match self.observers.write() {
            Ok(mut observers) => observers.push(observer),
            Err(poisoned) => {
                error!("Observer list lock was poisoned; recovering");
                poisoned.into_inner().push(observer);
            }
        }
    }

    fn observers(&self) -> Vec<Arc<dyn CommitObserver>> {
        match self.observers.read() {
            Ok(observers) => observers.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.event_publisher.subscribe()
    }

    /// Applies `action` atomically, runs commit observers, then notifies subscribers.
    pub async fn dispatch(&self, action: Action) {
        let mut guard = self.state.lock().await;
        let next = reducers::reduce(&guard, &action);
        *guard = next;
        trace!("Committed {}", action.name());

        for observer in self.observers() {
            observer.on_commit(&action, &guard).await;
        }

        let event = match action.slice() {
            Slice::Posts => StoreEvent::PostsChanged { state: guard.posts.clone(), action },
            Slice::Notifications => StoreEvent::NotificationsChanged { state: guard.notifications.clone(), action },
        };
        drop(guard);

        if self.event_publisher.send(event).is_err() {
            debug!("No store subscribers listening");
        }
    }

    pub async fn snapshot(&self) -> AppState {
        self.state.lock().await.clone()
    }

    pub async fn posts_state(&self) -> PostsState {
        self.state.lock().await.posts.clone()
    }

    pub async fn notifications_state(&self) -> NotificationsState {
        self.state.lock().await.notifications.clone()
    }

    pub async fn posts(&self) -> Vec<Post> {
        self.state.lock().await.posts.posts.clone()
    }

    pub async fn selected_post(&self) -> Option<Post> {
        self.state.lock().await.posts.selected_post.clone()
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.state.lock().await.notifications.notifications.clone()
    }

    /// Most recent first. Ties keep insertion order.
    pub async fn notifications_for_display(&self) -> Vec<Notification> {
        let mut notifications = self.notifications().await;
        notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        notifications
    }
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new()
    }
}
