//! Pure state transitions. No I/O, no timers, no clocks.

use super::actions::Action;
use super::state::{AppState, NotificationsState, PostsState};

pub fn reduce(state: &AppState, action: &Action) -> AppState {
    AppState {
        posts: reduce_posts(&state.posts, action),
        notifications: reduce_notifications(&state.notifications, action),
    }
}

pub fn reduce_posts(state: &PostsState, action: &Action) -> PostsState {
    let mut next = state.clone();
    match action {
        Action::SetPosts(posts) => {
            next.posts = posts.clone();
        }
        Action::AddPost(post) => {
            next.posts.insert(0, post.clone());
        }
        Action::UpdatePost(post) => {
            // Unknown ids are ignored.
            if let Some(existing) = next.posts.iter_mut().find(|p| p.id == post.id) {
                *existing = post.clone();
            }
        }
        Action::DeletePost(id) => {
            next.posts.retain(|p| p.id != *id);
        }
        Action::SetSelectedPost(post) => {
            next.selected_post = post.clone();
        }
        _ => {}
    }
    next
}

pub fn reduce_notifications(state: &NotificationsState, action: &Action) -> NotificationsState {
    let mut next = state.clone();
    match action {
        Action::AddNotification(notification) => {
            next.notifications.push(notification.clone());
        }
        Action::RemoveNotification(id) => {
            next.notifications.retain(|n| &n.id != id);
        }
        Action::ClearAllNotifications => {
            next.notifications.clear();
        }
        Action::ClearTemporaryNotifications => {
            next.notifications.retain(|n| n.persistent);
        }
        _ => {}
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::types::{Notification, NotificationType};
    use crate::posts::types::Post;
    use pretty_assertions::assert_eq;

    fn post(id: i64, title: &str) -> Post {
        Post { id, user_id: 1, title: title.to_string(), body: format!("body of {}", title) }
    }

    fn note(id: &str, persistent: bool) -> Notification {
        Notification {
            id: id.to_string(),
            kind: NotificationType::Info,
            title: "t".to_string(),
            message: "m".to_string(),
            duration: Some(1000),
            persistent,
            timestamp: 0,
        }
    }

    fn ids(state: &PostsState) -> Vec<i64> {
        state.posts.iter().map(|p| p.id).collect()
    }

    #[test]
    fn add_post_prepends() {
        let state = reduce_posts(&PostsState::default(), &Action::SetPosts(vec![post(1, "a"), post(2, "b")]));
        let state = reduce_posts(&state, &Action::AddPost(post(3, "c")));
        assert_eq!(ids(&state), vec![3, 1, 2]);
    }

    #[test]
    fn set_posts_replaces_without_dedupe() {
        let state = reduce_posts(&PostsState::default(), &Action::SetPosts(vec![post(1, "a")]));
        let state = reduce_posts(&state, &Action::SetPosts(vec![post(2, "b"), post(2, "b")]));
        assert_eq!(ids(&state), vec![2, 2]);
    }

    #[test]
    fn update_post_replaces_first_match_only() {
        let state = PostsState { posts: vec![post(1, "a"), post(2, "b"), post(1, "dup")], selected_post: None };
        let next = reduce_posts(&state, &Action::UpdatePost(post(1, "edited")));
        assert_eq!(next.posts[0].title, "edited");
        assert_eq!(next.posts[1].title, "b");
        assert_eq!(next.posts[2].title, "dup");
    }

    #[test]
    fn update_unknown_post_is_noop() {
        let state = PostsState { posts: vec![post(1, "a"), post(2, "b")], selected_post: None };
        let next = reduce_posts(&state, &Action::UpdatePost(post(99, "ghost")));
        assert_eq!(next, state);
    }

    #[test]
    fn delete_post_twice_is_noop() {
        let state = PostsState { posts: vec![post(1, "a"), post(2, "b")], selected_post: None };
        let once = reduce_posts(&state, &Action::DeletePost(1));
        let twice = reduce_posts(&once, &Action::DeletePost(1));
        assert_eq!(ids(&once), vec![2]);
        assert_eq!(once, twice);
    }

    #[test]
    fn selected_post_is_set_and_cleared() {
        let state = reduce_posts(&PostsState::default(), &Action::SetSelectedPost(Some(post(5, "x"))));
        assert_eq!(state.selected_post.as_ref().map(|p| p.id), Some(5));
        let state = reduce_posts(&state, &Action::SetSelectedPost(None));
        assert_eq!(state.selected_post, None);
    }

    #[test]
    fn notifications_are_appended_and_removed() {
        let state = reduce_notifications(&NotificationsState::default(), &Action::AddNotification(note("a", false)));
        let state = reduce_notifications(&state, &Action::AddNotification(note("b", true)));
        assert_eq!(state.notifications.len(), 2);

        let removed = reduce_notifications(&state, &Action::RemoveNotification("a".to_string()));
        let again = reduce_notifications(&removed, &Action::RemoveNotification("a".to_string()));
        assert_eq!(removed.notifications.len(), 1);
        assert_eq!(removed, again);
    }

    #[test]
    fn clear_temporary_keeps_persistent_entries() {
        let state = NotificationsState { notifications: vec![note("a", false), note("b", true), note("c", false)] };
        let next = reduce_notifications(&state, &Action::ClearTemporaryNotifications);
        assert_eq!(next.notifications.iter().map(|n| n.id.as_str()).collect::<Vec<_>>(), vec!["b"]);
        assert!(reduce_notifications(&state, &Action::ClearAllNotifications).notifications.is_empty());
    }

    #[test]
    fn slices_do_not_touch_each_other() {
        let state = AppState {
            posts: PostsState { posts: vec![post(1, "a")], selected_post: None },
            notifications: NotificationsState { notifications: vec![note("n", false)] },
        };
        let after_posts = reduce(&state, &Action::DeletePost(1));
        assert_eq!(after_posts.notifications, state.notifications);
        let after_notes = reduce(&state, &Action::ClearAllNotifications);
        assert_eq!(after_notes.posts, state.posts);
    }
}
