//! Client-side listing helpers: column sorting of the current page, the
//! next-page rule, and search input debouncing.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tokio::sync::watch;

use super::types::Post;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Id,
    UserId,
    Title,
    Body,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" => Ok(SortField::Id),
            "userid" | "user_id" | "user" => Ok(SortField::UserId),
            "title" => Ok(SortField::Title),
            "body" => Ok(SortField::Body),
            other => Err(format!("Unknown sort field '{}'", other)),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortField::Id => "id",
            SortField::UserId => "userId",
            SortField::Title => "title",
            SortField::Body => "body",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Sorting applied to the rows already fetched. Never sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostSort {
    pub field: Option<SortField>,
    pub direction: SortDirection,
}

impl PostSort {
    pub fn by(field: SortField, direction: SortDirection) -> Self {
        Self { field: Some(field), direction }
    }

    /// Same column flips the direction, a new column starts ascending.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == Some(field) {
            self.direction = self.direction.flipped();
        } else {
            self.field = Some(field);
            self.direction = SortDirection::Asc;
        }
    }

    pub fn apply(&self, posts: &[Post]) -> Vec<Post> {
        let mut sorted = posts.to_vec();
        let Some(field) = self.field else {
            return sorted;
        };
        sorted.sort_by(|a, b| {
            let ordering = compare(field, a, b);
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        sorted
    }
}

fn compare(field: SortField, a: &Post, b: &Post) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::UserId => a.user_id.cmp(&b.user_id),
        SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortField::Body => a.body.to_lowercase().cmp(&b.body.to_lowercase()),
    }
}

/// The backend gives no total count: a short page means there is no next one.
pub fn has_next_page(rows: usize, limit: u32) -> bool {
    limit > 0 && rows >= limit as usize
}

/// Writer half of a search box.
#[derive(Debug)]
pub struct SearchInput {
    tx: watch::Sender<String>,
}

impl SearchInput {
    pub fn set(&self, value: impl Into<String>) {
        self.tx.send_replace(value.into());
    }
}

/// Yields the search text only once it has stopped changing for `delay`.
#[derive(Debug)]
pub struct SearchDebouncer {
    rx: watch::Receiver<String>,
    delay: Duration,
}

impl SearchDebouncer {
    pub fn channel(delay: Duration) -> (SearchInput, SearchDebouncer) {
        let (tx, rx) = watch::channel(String::new());
        (SearchInput { tx }, SearchDebouncer { rx, delay })
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits for the next edit and then for a quiet period. Returns `None`
    /// once the input side is gone and nothing is left to flush.
    pub async fn next_settled(&mut self) -> Option<String> {
        self.rx.changed().await.ok()?;
        loop {
            match tokio::time::timeout(self.delay, self.rx.changed()).await {
                Ok(Ok(())) => continue,
                // Input dropped mid-burst: flush what we have.
                Ok(Err(_)) | Err(_) => break,
            }
        }
        Some(self.rx.borrow_and_update().clone())
    }
}
