use crate::notifications::types::Notification;
use crate::posts::types::{Post, PostId};

/// Every mutation the store accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Posts slice
    SetPosts(Vec<Post>),
    AddPost(Post),
    UpdatePost(Post),
    DeletePost(PostId),
    SetSelectedPost(Option<Post>),

    // Notifications slice
    AddNotification(Notification),
    RemoveNotification(String),
    ClearAllNotifications,
    ClearTemporaryNotifications,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slice {
    Posts,
    Notifications,
}

impl Action {
    pub fn slice(&self) -> Slice {
        match self {
            Action::SetPosts(_)
            | Action::AddPost(_)
            | Action::UpdatePost(_)
            | Action::DeletePost(_)
            | Action::SetSelectedPost(_) => Slice::Posts,
            Action::AddNotification(_)
            | Action::RemoveNotification(_)
            | Action::ClearAllNotifications
            | Action::ClearTemporaryNotifications => Slice::Notifications,
        }
    }

    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetPosts(_) => "posts/setPosts",
            Action::AddPost(_) => "posts/addPost",
            Action::UpdatePost(_) => "posts/updatePost",
            Action::DeletePost(_) => "posts/deletePost",
            Action::SetSelectedPost(_) => "posts/setSelectedPost",
            Action::AddNotification(_) => "notifications/addNotification",
            Action::RemoveNotification(_) => "notifications/removeNotification",
            Action::ClearAllNotifications => "notifications/clearAllNotifications",
            Action::ClearTemporaryNotifications => "notifications/clearTemporaryNotifications",
        }
    }
}
