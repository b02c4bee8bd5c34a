//! Application store: one state container with a posts slice and a
//! notifications slice, pure reducers, commit observers and a broadcast
//! channel for subscribers.

pub mod actions;
pub mod app_store;
pub mod events;
pub mod reducers;
pub mod state;

pub use actions::{Action, Slice};
pub use app_store::{AppStore, CommitObserver};
pub use events::StoreEvent;
pub use state::{AppState, NotificationsState, PostsState};
