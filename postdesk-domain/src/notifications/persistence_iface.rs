use async_trait::async_trait;

use super::errors::StorageError;
use super::types::Notification;

/// Durable home of the persistent notification subset, kept under a single key.
#[async_trait]
pub trait NotificationStorage: Send + Sync {
    /// Absent storage yields an empty list.
    async fn load(&self) -> Result<Vec<Notification>, StorageError>;
    /// Overwrites the whole snapshot.
    async fn save(&self, notifications: &[Notification]) -> Result<(), StorageError>;
    async fn clear(&self) -> Result<(), StorageError>;
}
