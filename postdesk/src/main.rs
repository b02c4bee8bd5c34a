// Postdesk command line entry point

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use postdesk_core::config::ConfigLoader;
use postdesk_core::logging::{init_logging, init_minimal_logging};
use postdesk_domain::notifications::Notification;
use postdesk_domain::posts::{has_next_page, Post, PostDraft, PostSort, SortDirection};
use postdesk_domain::AppContext;
use tracing::{info, warn};

use cli::{Cli, Command, ListArgs};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match ConfigLoader::load_with(cli.config.clone(), cli.api_url.clone()) {
        Ok(config) => config,
        Err(e) => {
            init_minimal_logging();
            return Err(e).context("Failed to load configuration");
        }
    };
    if let Err(e) = init_logging(&config.logging, false) {
        init_minimal_logging();
        warn!("Falling back to minimal logging: {}", e);
    }

    info!("Starting postdesk against {}", config.api.base_url);
    let context = AppContext::bootstrap(config).await.context("Failed to initialize postdesk")?;

    let outcome = run(&context, cli.command).await;
    print_notifications(&context.notifications.notifications_for_display().await);
    context.shutdown();
    outcome
}

async fn run(context: &AppContext, command: Command) -> Result<()> {
    match command {
        Command::List(args) => list(context, args).await,
        Command::Show { id } => {
            if let Some(post) = context.posts.open_details(id).await {
                println!("#{} (user {})\n{}\n\n{}", post.id, post.user_id, post.title, post.body);
            }
            Ok(())
        }
        Command::Create(args) => {
            let post = context
                .posts
                .create(PostDraft::new(args.user_id, args.title, args.body))
                .await
                .context("Failed to create post")?;
            print_posts(&[post]);
            Ok(())
        }
        Command::Update { id, post } => {
            let post = context
                .posts
                .update(id, PostDraft::new(post.user_id, post.title, post.body))
                .await
                .with_context(|| format!("Failed to update post {}", id))?;
            print_posts(&[post]);
            Ok(())
        }
        Command::Delete { id } => {
            context.posts.delete(id).await.with_context(|| format!("Failed to delete post {}", id))
        }
        Command::Notify(args) => {
            context
                .notifications
                .add_notification(args.kind.into(), args.title, args.message, args.duration, args.persistent)
                .await;
            Ok(())
        }
        Command::Notifications => Ok(()),
        Command::Dismiss { id } => {
            if !context.store.notifications_state().await.contains(&id) {
                warn!("No queued notification with id {}", id);
            }
            context.notifications.remove_notification(&id).await;
            Ok(())
        }
        Command::ClearNotifications { temporary } => {
            if temporary {
                context.notifications.clear_temporary_notifications().await;
            } else {
                context.notifications.clear_all_notifications().await;
            }
            Ok(())
        }
    }
}

async fn list(context: &AppContext, args: ListArgs) -> Result<()> {
    if let Some(limit) = args.limit {
        context.posts.set_limit(limit).await;
    }
    context.posts.set_search(args.search.unwrap_or_default()).await;
    context.posts.set_page(args.page).await;
    context.posts.refresh().await;

    let query = context.posts.query().await;
    let direction = if args.desc { SortDirection::Desc } else { SortDirection::Asc };
    let sort = PostSort { field: args.sort, direction };
    let rows = sort.apply(&context.store.posts().await);

    print_posts(&rows);
    println!(
        "Page {} ({} posts){}",
        query.page,
        rows.len(),
        if has_next_page(rows.len(), query.limit) { ", more available" } else { "" }
    );
    Ok(())
}

fn print_posts(posts: &[Post]) {
    for post in posts {
        println!("{:>5}  {:>4}  {}", post.id, post.user_id, post.title);
    }
}

fn print_notifications(notifications: &[Notification]) {
    for n in notifications {
        println!("{}", notification_line(n));
    }
}

/// One queue entry; `*` marks persistent ones. The id is what `dismiss` takes.
fn notification_line(n: &Notification) -> String {
    let marker = if n.persistent { "*" } else { " " };
    format!("{}{}  [{}] {}: {}", marker, n.id, n.kind, n.title, n.message)
}
