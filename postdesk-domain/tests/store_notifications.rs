use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use postdesk_core::config::AppConfig;
use postdesk_domain::notifications::{
    FileNotificationStorage, Notification, NotificationDurations, NotificationEngine, NotificationStorage,
    NotificationType,
};
use postdesk_domain::posts::{ListParams, NewPost, Post, PostEcho, PostError, PostId, PostRepository, PostUpdate};
use postdesk_domain::store::{Action, StoreEvent};
use postdesk_domain::AppContext;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

/// Backend that is never reachable.
struct OfflineRepository;

#[async_trait]
impl PostRepository for OfflineRepository {
    async fn list(&self, _params: ListParams) -> Result<Vec<Post>, PostError> {
        Err(PostError::transport("list", None, "offline"))
    }
    async fn get_by_id(&self, _id: PostId) -> Result<Post, PostError> {
        Err(PostError::transport("get_by_id", None, "offline"))
    }
    async fn create(&self, _data: NewPost) -> Result<Post, PostError> {
        Err(PostError::transport("create", None, "offline"))
    }
    async fn update(&self, _id: PostId, _data: PostUpdate) -> Result<PostEcho, PostError> {
        Err(PostError::transport("update", None, "offline"))
    }
    async fn remove(&self, _id: PostId) -> Result<(), PostError> {
        Err(PostError::transport("remove", None, "offline"))
    }
}

fn persistent_subset(notifications: &[Notification]) -> Vec<Notification> {
    notifications.iter().filter(|n| n.persistent).cloned().collect()
}

async fn file_engine(path: &std::path::Path) -> (NotificationEngine, Arc<FileNotificationStorage>) {
    let storage = Arc::new(FileNotificationStorage::new(path));
    let engine = NotificationEngine::restore(storage.clone(), NotificationDurations::default()).await;
    (engine, storage)
}

#[tokio::test(start_paused = true)]
async fn dismissed_middle_notification_does_not_disturb_the_others() {
    let dir = tempdir().unwrap();
    let (engine, _storage) = file_engine(&dir.path().join("notes.json")).await;

    let first = engine.add_notification(NotificationType::Success, "one", "m", Some(3000), false).await;
    let middle = engine.add_notification(NotificationType::Success, "two", "m", Some(3000), false).await;
    let last = engine.add_notification(NotificationType::Success, "three", "m", Some(3000), false).await;

    tokio::time::sleep(Duration::from_millis(500)).await;
    engine.remove_notification(&middle.id).await;
    let remaining: Vec<String> = engine.store().notifications().await.into_iter().map(|n| n.id).collect();
    assert_eq!(remaining, vec![first.id.clone(), last.id.clone()]);
    assert_eq!(engine.pending_timers(), 2);

    tokio::time::sleep(Duration::from_millis(2600)).await;
    assert!(engine.store().notifications().await.is_empty());
    assert_eq!(engine.pending_timers(), 0);
}

#[tokio::test]
async fn durable_snapshot_tracks_persistent_subset_after_every_mutation() {
    let dir = tempdir().unwrap();
    let (engine, storage) = file_engine(&dir.path().join("state").join("notes.json")).await;

    let check = |label: &'static str| {
        let engine = &engine;
        let storage = storage.clone();
        async move {
            let queue = engine.store().notifications().await;
            let stored = storage.load().await.unwrap();
            assert_eq!(stored, persistent_subset(&queue), "after {}", label);
        }
    };

    let a = engine.add_notification(NotificationType::Info, "a", "m", None, true).await;
    check("persistent add").await;
    engine.add_notification(NotificationType::Info, "b", "m", Some(60_000), false).await;
    check("transient add").await;
    let c = engine.add_notification(NotificationType::Error, "c", "m", None, true).await;
    check("second persistent add").await;
    engine.remove_notification(&a.id).await;
    check("remove").await;
    engine.remove_notification(&a.id).await;
    check("repeated remove").await;
    engine.clear_temporary_notifications().await;
    check("clear temporary").await;
    assert_eq!(engine.store().notifications().await, vec![c]);
    engine.clear_all_notifications().await;
    check("clear all").await;
    assert!(!storage.path().exists());

    engine.shutdown();
}

#[tokio::test]
async fn persistent_notifications_survive_a_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.json");

    let kept = {
        let (engine, _) = file_engine(&path).await;
        let kept = engine.add_notification(NotificationType::Warning, "Offline", "Working locally", None, true).await;
        engine.info("Saved", "ok").await;
        engine.shutdown();
        kept
    };

    let (engine, _) = file_engine(&path).await;
    assert_eq!(engine.store().notifications().await, vec![kept]);
    assert_eq!(engine.pending_timers(), 0);
}

#[tokio::test]
async fn restart_rewrites_snapshot_without_transient_entries() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.json");
    let sticky = Notification::new(NotificationType::Error, "p", "m", None, true);
    let stray = Notification::new(NotificationType::Info, "t", "m", Some(2000), false);
    std::fs::write(&path, serde_json::to_string(&vec![&sticky, &stray]).unwrap()).unwrap();

    let (engine, storage) = file_engine(&path).await;
    let queue = engine.store().notifications().await;
    assert_eq!(queue, vec![sticky.clone()]);
    assert_eq!(storage.load().await.unwrap(), persistent_subset(&queue));

    engine.clear_temporary_notifications().await;
    assert_eq!(storage.load().await.unwrap(), vec![sticky]);
}

#[tokio::test]
async fn corrupt_snapshot_file_starts_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.json");
    std::fs::write(&path, "[{\"id\": 1").unwrap();

    let (engine, storage) = file_engine(&path).await;
    assert!(engine.store().notifications().await.is_empty());
    assert_eq!(storage.load().await.unwrap(), Vec::new());

    let added = engine.add_notification(NotificationType::Info, "fresh", "m", None, true).await;
    let stored: Vec<Notification> = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored, vec![added]);
}

#[tokio::test]
async fn context_wires_store_events_and_failure_notifications() {
    let dir = tempdir().unwrap();
    let mut config = AppConfig::default();
    config.notifications.storage_path = Some(dir.path().join("notes.json"));
    let storage = Arc::new(FileNotificationStorage::new(dir.path().join("notes.json")));

    let context = AppContext::with_parts(config, storage, Arc::new(OfflineRepository)).await;
    let mut events = context.store.subscribe();

    context.posts.refresh().await;

    match events.recv().await.unwrap() {
        StoreEvent::PostsChanged { action, state } => {
            assert_eq!(action, Action::SetPosts(Vec::new()));
            assert!(state.posts.is_empty());
        }
        other => panic!("unexpected event: {:?}", other),
    }
    match events.recv().await.unwrap() {
        StoreEvent::NotificationsChanged { state, .. } => {
            assert_eq!(state.notifications.len(), 1);
            assert_eq!(state.notifications[0].kind, NotificationType::Error);
        }
        other => panic!("unexpected event: {:?}", other),
    }

    assert!(context.posts.delete(1).await.is_err());
    assert_eq!(context.notifications.pending_timers(), 2);
    context.shutdown();
    assert_eq!(context.notifications.pending_timers(), 0);
}

#[tokio::test]
async fn search_channel_uses_configured_debounce() {
    let dir = tempdir().unwrap();
    let mut config = AppConfig::default();
    config.posts.search_debounce_ms = 250;
    let storage = Arc::new(FileNotificationStorage::new(dir.path().join("notes.json")));

    let context = AppContext::with_parts(config, storage, Arc::new(OfflineRepository)).await;
    let (_input, debouncer) = context.search_channel();
    assert_eq!(debouncer.delay(), Duration::from_millis(250));
}
