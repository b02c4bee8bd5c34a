//! Posts: the wire model, the REST repository, the controller that ties
//! repository calls to the store, and client-side listing helpers.

pub mod controller;
pub mod errors;
pub mod repository;
pub mod types;
pub mod view;

pub use controller::{PostQuery, PostsController};
pub use errors::PostError;
pub use repository::{HttpPostRepository, PostRepository};
pub use types::{ListParams, NewPost, Post, PostDraft, PostEcho, PostId, PostUpdate};
pub use view::{has_next_page, PostSort, SearchDebouncer, SearchInput, SortDirection, SortField};
