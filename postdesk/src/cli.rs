//! Command line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use postdesk_domain::notifications::NotificationType;
use postdesk_domain::posts::SortField;

#[derive(Debug, Parser)]
#[command(name = "postdesk", version, about = "Manage posts on a REST backend from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to POSTDESK_CONFIG, then the user config dir).
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding the configuration.
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List one page of posts.
    List(ListArgs),

    /// Show a single post.
    Show {
        id: i64,
    },

    /// Create a post.
    Create(PostArgs),

    /// Replace the title and body of a post.
    Update {
        id: i64,
        #[command(flatten)]
        post: PostArgs,
    },

    /// Delete a post.
    Delete {
        id: i64,
    },

    /// Queue a notification. Persistent ones are kept across runs.
    Notify(NotifyArgs),

    /// Print the notification queue, most recent first.
    Notifications,

    /// Dismiss one notification by id.
    Dismiss {
        id: String,
    },

    /// Drop queued notifications.
    ClearNotifications {
        /// Keep persistent notifications.
        #[arg(long)]
        temporary: bool,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Rows per page (defaults to `posts.page_size`).
    #[arg(long)]
    pub limit: Option<u32>,

    /// Full-text filter.
    #[arg(long)]
    pub search: Option<String>,

    /// Sort the page by id, userId, title or body.
    #[arg(long, value_parser = parse_sort_field)]
    pub sort: Option<SortField>,

    /// Sort descending.
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

#[derive(Debug, Args)]
pub struct PostArgs {
    #[arg(long = "user-id", default_value_t = 1)]
    pub user_id: i64,

    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub body: String,
}

#[derive(Debug, Args)]
pub struct NotifyArgs {
    #[arg(long, value_enum, default_value = "info")]
    pub kind: KindArg,

    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub message: String,

    /// Expiry in milliseconds. Omit for a notification that stays until dismissed.
    #[arg(long)]
    pub duration: Option<u64>,

    #[arg(long)]
    pub persistent: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Success,
    Error,
    Warning,
    Info,
}

impl From<KindArg> for NotificationType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Success => NotificationType::Success,
            KindArg::Error => NotificationType::Error,
            KindArg::Warning => NotificationType::Warning,
            KindArg::Info => NotificationType::Info,
        }
    }
}

fn parse_sort_field(value: &str) -> Result<SortField, String> {
    value.parse()
}
