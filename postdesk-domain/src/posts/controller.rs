//! Connects repository calls to the store: every outcome is committed as an
//! action and reported to the user as a notification.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::errors::PostError;
use super::repository::PostRepository;
use super::types::{ListParams, Post, PostDraft, PostId};
use super::view::SearchDebouncer;
use crate::notifications::NotificationEngine;
use crate::store::{Action, AppStore};

/// Listing state: which page, how many rows, and the active search text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub page: u32,
    pub limit: u32,
    pub search: String,
}

impl PostQuery {
    pub fn new(limit: u32) -> Self {
        Self { page: 1, limit, search: String::new() }
    }

    pub fn to_list_params(&self) -> ListParams {
        let params = ListParams::new(self.page, self.limit);
        if self.search.trim().is_empty() {
            params
        } else {
            params.with_search(self.search.clone())
        }
    }
}

pub struct PostsController {
    repository: Arc<dyn PostRepository>,
    store: Arc<AppStore>,
    notifications: Arc<NotificationEngine>,
    query: Mutex<PostQuery>,
}

impl PostsController {
    pub fn new(
        repository: Arc<dyn PostRepository>,
        store: Arc<AppStore>,
        notifications: Arc<NotificationEngine>,
        page_size: u32,
    ) -> Self {
        Self {
            repository,
            store,
            notifications,
            query: Mutex::new(PostQuery::new(page_size)),
        }
    }

    pub async fn query(&self) -> PostQuery {
        self.query.lock().await.clone()
    }

    pub async fn set_page(&self, page: u32) {
        self.query.lock().await.page = page.max(1);
    }

    /// Changing the page size goes back to the first page.
    pub async fn set_limit(&self, limit: u32) {
        let mut query = self.query.lock().await;
        query.limit = limit.max(1);
        query.page = 1;
    }

    /// A different search text goes back to the first page.
    pub async fn set_search(&self, search: impl Into<String>) {
        let search = search.into();
        let mut query = self.query.lock().await;
        if query.search != search {
            query.page = 1;
        }
        query.search = search;
    }

    /// Loads the current page into the store. Failures empty the list and
    /// raise an error notification instead of propagating.
    pub async fn refresh(&self) {
        let params = self.query().await.to_list_params();
        match self.repository.list(params.clone()).await {
            Ok(posts) => {
                debug!("Loaded {} posts for page {}", posts.len(), params.page);
                self.store.dispatch(Action::SetPosts(posts)).await;
            }
            Err(e) => {
                warn!("Failed to load posts: {}", e);
                self.store.dispatch(Action::SetPosts(Vec::new())).await;
                self.notifications.error("Could not load posts", e.to_string()).await;
            }
        }
    }

    /// Fetches one post for the detail view and selects it.
    pub async fn open_details(&self, id: PostId) -> Option<Post> {
        match self.repository.get_by_id(id).await {
            Ok(post) => {
                self.store.dispatch(Action::SetSelectedPost(Some(post.clone()))).await;
                Some(post)
            }
            Err(e) => {
                warn!("Failed to load post {}: {}", id, e);
                self.notifications
                    .error("Could not load post", "The post details could not be loaded")
                    .await;
                self.store.dispatch(Action::SetSelectedPost(None)).await;
                None
            }
        }
    }

    pub async fn close_details(&self) {
        self.store.dispatch(Action::SetSelectedPost(None)).await;
    }

    pub async fn create(&self, draft: PostDraft) -> Result<Post, PostError> {
        draft.validate()?;
        self.notifications.info("Creating post...", "Saving to the server").await;

        match self.repository.create(draft.into_new_post()).await {
            Ok(post) => {
                info!("Created post {}", post.id);
                self.store.dispatch(Action::AddPost(post.clone())).await;
                self.notifications
                    .success("Post created", format!("\"{}\" was created", post.title))
                    .await;
                Ok(post)
            }
            Err(e) => {
                warn!("Failed to create post: {}", e);
                self.notifications.error("Could not create post", "The post could not be created").await;
                Err(e)
            }
        }
    }

    pub async fn update(&self, id: PostId, draft: PostDraft) -> Result<Post, PostError> {
        draft.validate()?;
        self.notifications.info("Updating post...", "Saving changes").await;

        // The echo of a partial update may leave fields out; the edited post
        // with the submitted values fills them in.
        let owner = self.store.posts().await.iter().find(|p| p.id == id).map(|p| p.user_id);
        let known = Post {
            id,
            user_id: owner.unwrap_or(draft.user_id),
            title: draft.title.clone(),
            body: draft.body.clone(),
        };
        match self.repository.update(id, draft.into_update()).await {
            Ok(echo) => {
                let post = echo.merge_over(known);
                info!("Updated post {}", post.id);
                self.store.dispatch(Action::UpdatePost(post.clone())).await;
                self.notifications.success("Post updated", "Changes saved").await;
                Ok(post)
            }
            Err(e) => {
                warn!("Failed to update post {}: {}", id, e);
                self.notifications.error("Could not update post", "Changes could not be saved").await;
                Err(e)
            }
        }
    }

    pub async fn delete(&self, id: PostId) -> Result<(), PostError> {
        match self.repository.remove(id).await {
            Ok(()) => {
                info!("Deleted post {}", id);
                self.store.dispatch(Action::DeletePost(id)).await;
                self.notifications.success("Post deleted", format!("Post {} was deleted", id)).await;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to delete post {}: {}", id, e);
                self.notifications.error("Could not delete post", "The post could not be deleted").await;
                Err(e)
            }
        }
    }

    /// Applies each settled search text and reloads, until the input closes.
    pub async fn run_search_loop(&self, mut debouncer: SearchDebouncer) {
        while let Some(search) = debouncer.next_settled().await {
            debug!("Search settled on '{}'", search);
            self.set_search(search).await;
            self.refresh().await;
        }
    }
}
