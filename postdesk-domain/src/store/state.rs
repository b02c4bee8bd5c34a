use crate::notifications::types::Notification;
use crate::posts::types::Post;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostsState {
    pub posts: Vec<Post>,
    pub selected_post: Option<Post>,
}

/// Queue of live notifications, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationsState {
    pub notifications: Vec<Notification>,
}

impl NotificationsState {
    /// The subset that must be mirrored to durable storage.
    pub fn persistent(&self) -> Vec<Notification> {
        self.notifications.iter().filter(|n| n.persistent).cloned().collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.notifications.iter().any(|n| n.id == id)
    }
}

/// Whole application state. The two slices never read each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub posts: PostsState,
    pub notifications: NotificationsState,
}
