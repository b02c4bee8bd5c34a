use serde::{Deserialize, Serialize};

use super::errors::PostError;

pub type PostId = i64;

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 50;
pub const BODY_MIN_CHARS: usize = 10;

/// A post as stored by the backend: `{id, userId, title, body}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub user_id: i64,
    pub title: String,
    pub body: String,
}

/// Payload for `POST /posts`. The backend assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub user_id: i64,
    pub title: String,
    pub body: String,
}

/// Partial payload for `PUT /posts/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// What the backend echoes after `PUT /posts/:id`. A partial update may come
/// back with only the fields that were sent, so every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostEcho {
    pub id: Option<PostId>,
    pub user_id: Option<i64>,
    pub title: Option<String>,
    pub body: Option<String>,
}

impl PostEcho {
    /// Fields present in the echo win, the rest come from `known`.
    pub fn merge_over(self, known: Post) -> Post {
        Post {
            id: self.id.unwrap_or(known.id),
            user_id: self.user_id.unwrap_or(known.user_id),
            title: self.title.unwrap_or(known.title),
            body: self.body.unwrap_or(known.body),
        }
    }
}

/// Form input for creating or editing a post. Length rules live here and
/// nowhere else: the store accepts whatever the backend returns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostDraft {
    pub user_id: i64,
    pub title: String,
    pub body: String,
}

impl PostDraft {
    pub fn new(user_id: i64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self { user_id, title: title.into(), body: body.into() }
    }

    /// Checks the form rules: title 3 to 50 characters, body at least 10.
    /// Lengths are counted in characters after trimming.
    pub fn validate(&self) -> Result<(), PostError> {
        let title_len = self.title.trim().chars().count();
        if title_len < TITLE_MIN_CHARS {
            return Err(PostError::Validation {
                field: "title".to_string(),
                reason: format!("must be at least {} characters", TITLE_MIN_CHARS),
            });
        }
        if title_len > TITLE_MAX_CHARS {
            return Err(PostError::Validation {
                field: "title".to_string(),
                reason: format!("must be at most {} characters", TITLE_MAX_CHARS),
            });
        }
        if self.body.trim().chars().count() < BODY_MIN_CHARS {
            return Err(PostError::Validation {
                field: "body".to_string(),
                reason: format!("must be at least {} characters", BODY_MIN_CHARS),
            });
        }
        Ok(())
    }

    pub fn into_new_post(self) -> NewPost {
        NewPost { user_id: self.user_id, title: self.title, body: self.body }
    }

    pub fn into_update(self) -> PostUpdate {
        PostUpdate { title: Some(self.title), body: Some(self.body) }
    }
}

impl From<&Post> for PostDraft {
    fn from(post: &Post) -> Self {
        Self { user_id: post.user_id, title: post.title.clone(), body: post.body.clone() }
    }
}

/// Offset pagination plus optional full-text filter for `GET /posts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
}

impl ListParams {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit, search: None }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// The search term to send, if any. Blank input means "no filter".
    pub fn effective_search(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn post_uses_camel_case_wire_format() {
        let post = Post { id: 1, user_id: 7, title: "hello".into(), body: "world body".into() };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "userId": 7, "title": "hello", "body": "world body"}));
    }

    #[test]
    fn partial_echo_keeps_known_fields() {
        let echo: PostEcho = serde_json::from_str(r#"{"id": 4, "title": "Renamed"}"#).unwrap();
        let known = Post { id: 4, user_id: 9, title: "Old".into(), body: "old body text".into() };
        assert_eq!(
            echo.merge_over(known),
            Post { id: 4, user_id: 9, title: "Renamed".into(), body: "old body text".into() }
        );
    }

    #[test]
    fn echoed_zero_owner_is_kept() {
        let echo: PostEcho = serde_json::from_str(r#"{"id": 4, "userId": 0}"#).unwrap();
        let known = Post { id: 4, user_id: 9, title: "t".into(), body: "b".into() };
        assert_eq!(echo.merge_over(known).user_id, 0);
    }

    #[test]
    fn full_post_requires_owner() {
        assert!(serde_json::from_str::<Post>(r#"{"id": 4, "title": "t", "body": "b"}"#).is_err());
    }

    #[test]
    fn post_update_skips_absent_fields() {
        let update = PostUpdate { title: Some("New title".into()), body: None };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"title":"New title"}"#);
    }

    #[test]
    fn draft_validation_bounds() {
        assert!(PostDraft::new(1, "abc", "0123456789").validate().is_ok());
        assert!(PostDraft::new(1, "a".repeat(50), "0123456789").validate().is_ok());

        match PostDraft::new(1, "ab", "0123456789").validate() {
            Err(PostError::Validation { field, .. }) => assert_eq!(field, "title"),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(PostDraft::new(1, "a".repeat(51), "0123456789").validate().is_err());
        match PostDraft::new(1, "title", "too short").validate() {
            Err(PostError::Validation { field, .. }) => assert_eq!(field, "body"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn draft_counts_characters_not_bytes() {
        assert!(PostDraft::new(1, "ééé", "ñññññññññññ").validate().is_ok());
    }

    #[test]
    fn blank_search_is_not_sent() {
        assert_eq!(ListParams::new(1, 10).with_search("   ").effective_search(), None);
        assert_eq!(ListParams::new(1, 10).with_search(" rust ").effective_search(), Some("rust"));
    }
}
