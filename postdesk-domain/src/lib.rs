//! Domain layer for the Postdesk posts manager.
//!
//! - [`store`]: the application store with its posts and notifications slices.
//! - [`notifications`]: the notification engine, expiry timers and durable storage.
//! - [`posts`]: the post model, the REST repository and the posts controller.
//! - [`context`]: wiring of all of the above into an [`AppContext`].

pub use postdesk_core as core;

pub mod context;
pub mod error;
pub mod notifications;
pub mod posts;
pub mod store;

pub use context::AppContext;
pub use error::{DomainError, DomainResult};
pub use notifications::{Notification, NotificationEngine, NotificationType};
pub use posts::{Post, PostDraft, PostRepository, PostsController};
pub use store::{Action, AppState, AppStore, StoreEvent};
