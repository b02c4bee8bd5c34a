//! Notification queue management: typed notifications, durable storage of
//! the persistent subset, and the engine that schedules expiry.

pub mod engine;
pub mod errors;
pub mod persistence;
pub mod persistence_iface;
pub mod types;

pub use engine::{ExpiryScheduler, NotificationDurations, NotificationEngine};
pub use errors::StorageError;
pub use persistence::{FileNotificationStorage, InMemoryNotificationStorage, PersistenceObserver};
pub use persistence_iface::NotificationStorage;
pub use types::{Notification, NotificationType};
