use super::actions::Action;
use super::state::{NotificationsState, PostsState};

/// Published after every committed action, carrying the slice it touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    PostsChanged { action: Action, state: PostsState },
    NotificationsChanged { action: Action, state: NotificationsState },
}

impl StoreEvent {
    pub fn action(&self) -> &Action {
        match self {
            StoreEvent::PostsChanged { action, .. } => action,
            StoreEvent::NotificationsChanged { action, .. } => action,
        }
    }
}
