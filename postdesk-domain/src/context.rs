//! Wiring of one application instance: store, notification engine and
//! posts controller sharing a single [`AppStore`].

use std::sync::Arc;
use std::time::Duration;

use postdesk_core::config::AppConfig;
use tracing::{info, warn};

use crate::error::DomainResult;
use crate::notifications::{
    FileNotificationStorage, InMemoryNotificationStorage, NotificationDurations, NotificationEngine,
    NotificationStorage,
};
use crate::posts::{HttpPostRepository, PostRepository, PostsController, SearchDebouncer, SearchInput};
use crate::store::AppStore;

pub struct AppContext {
    pub config: AppConfig,
    pub store: Arc<AppStore>,
    pub notifications: Arc<NotificationEngine>,
    pub posts: Arc<PostsController>,
}

impl AppContext {
    /// Builds the context against the configured backend and file storage.
    pub async fn bootstrap(config: AppConfig) -> DomainResult<Self> {
        let storage: Arc<dyn NotificationStorage> = match &config.notifications.storage_path {
            Some(path) => Arc::new(FileNotificationStorage::new(path.clone())),
            None => {
                warn!("No notification storage path configured; persistent notifications will not survive restarts");
                Arc::new(InMemoryNotificationStorage::new())
            }
        };
        let repository: Arc<dyn PostRepository> = Arc::new(HttpPostRepository::new(&config.api)?);
        info!("Using posts API at {}", config.api.base_url);
        Ok(Self::with_parts(config, storage, repository).await)
    }

    pub async fn with_parts(
        config: AppConfig,
        storage: Arc<dyn NotificationStorage>,
        repository: Arc<dyn PostRepository>,
    ) -> Self {
        let durations = NotificationDurations::from(&config.notifications);
        let notifications = Arc::new(NotificationEngine::restore(storage, durations).await);
        let store = notifications.store().clone();
        let posts = Arc::new(PostsController::new(
            repository,
            store.clone(),
            notifications.clone(),
            config.posts.page_size,
        ));
        Self { config, store, notifications, posts }
    }

    /// A search box debounced by `posts.search_debounce_ms`. Feed the
    /// debouncer to [`PostsController::run_search_loop`].
    pub fn search_channel(&self) -> (SearchInput, SearchDebouncer) {
        SearchDebouncer::channel(Duration::from_millis(self.config.posts.search_debounce_ms))
    }

    /// Cancels every pending expiry timer.
    pub fn shutdown(&self) {
        info!("Shutting down application context");
        self.notifications.shutdown();
    }
}
