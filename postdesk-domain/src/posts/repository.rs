//! Typed façade over the REST backend.
//!
//! ```text
//! GET    /posts?_page=&_limit=&q=
//! GET    /posts/:id
//! POST   /posts
//! PUT    /posts/:id
//! DELETE /posts/:id
//! ```
//!
//! Failures are never retried; callers turn them into notifications.

use std::time::Duration;

use async_trait::async_trait;
use postdesk_core::config::ApiConfig;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::errors::PostError;
use super::types::{ListParams, NewPost, Post, PostEcho, PostId, PostUpdate};

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn list(&self, params: ListParams) -> Result<Vec<Post>, PostError>;
    async fn get_by_id(&self, id: PostId) -> Result<Post, PostError>;
    async fn create(&self, data: NewPost) -> Result<Post, PostError>;
    /// Returns the backend's echo, which may omit fields of a partial update.
    async fn update(&self, id: PostId, data: PostUpdate) -> Result<PostEcho, PostError>;
    async fn remove(&self, id: PostId) -> Result<(), PostError>;
}

/// `PostRepository` backed by `reqwest`.
pub struct HttpPostRepository {
    client: Client,
    base_url: Url,
}

impl HttpPostRepository {
    pub fn new(config: &ApiConfig) -> Result<Self, PostError> {
        let base = config.base_url.trim().trim_end_matches('/');
        let base_url = Url::parse(base).map_err(|e| PostError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(PostError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        let mut builder = Client::builder();
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder
            .build()
            .map_err(|e| PostError::transport("build_client", None, e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn posts_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("posts");
        }
        url
    }

    fn post_url(&self, id: PostId) -> Url {
        let mut url = self.posts_url();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(&id.to_string());
        }
        url
    }

    pub(crate) fn list_url(&self, params: &ListParams) -> Url {
        let mut url = self.posts_url();
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(query) = params.effective_search() {
                pairs.append_pair("q", query);
            }
            pairs
                .append_pair("_page", &params.page.to_string())
                .append_pair("_limit", &params.limit.to_string());
        }
        url
    }

    async fn send(&self, operation: &str, request: RequestBuilder) -> Result<Response, PostError> {
        let response = request.send().await.map_err(|e| {
            warn!("Request '{}' failed: {}", operation, e);
            PostError::transport(operation, e.status().map(|s| s.as_u16()), e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .ok()
                .filter(|body| !body.trim().is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
            warn!("Request '{}' returned status {}", operation, status);
            return Err(PostError::transport(operation, Some(status.as_u16()), message));
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, operation: &str, request: RequestBuilder) -> Result<T, PostError> {
        let response = self.send(operation, request).await?;
        let status = response.status().as_u16();
        response.json::<T>().await.map_err(|e| {
            warn!("Request '{}' returned an undecodable body: {}", operation, e);
            PostError::transport(operation, Some(status), format!("Invalid response body: {}", e))
        })
    }
}

#[async_trait]
impl PostRepository for HttpPostRepository {
    async fn list(&self, params: ListParams) -> Result<Vec<Post>, PostError> {
        let url = self.list_url(&params);
        debug!("Listing posts: {}", url);
        self.send_json("list", self.client.get(url)).await
    }

    async fn get_by_id(&self, id: PostId) -> Result<Post, PostError> {
        debug!("Fetching post {}", id);
        self.send_json("get_by_id", self.client.get(self.post_url(id))).await
    }

    async fn create(&self, data: NewPost) -> Result<Post, PostError> {
        debug!("Creating post '{}'", data.title);
        self.send_json("create", self.client.post(self.posts_url()).json(&data)).await
    }

    async fn update(&self, id: PostId, data: PostUpdate) -> Result<PostEcho, PostError> {
        debug!("Updating post {}", id);
        self.send_json("update", self.client.put(self.post_url(id)).json(&data)).await
    }

    async fn remove(&self, id: PostId) -> Result<(), PostError> {
        debug!("Deleting post {}", id);
        self.send("remove", self.client.delete(self.post_url(id))).await.map(|_| ())
    }
}
