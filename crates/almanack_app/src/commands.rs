//! Subcommand handlers. Each loads through the engine and prints plain
//! text summaries of the resulting view-models.

use std::sync::Arc;

use almanack_core::{
    ApiError, ArcArticle, Editable, Page, ResourceSnapshot, SharedArticle, UserInfo,
};
use almanack_engine::{ApiClient, AsyncResource, LocalStore, UpcomingFeed};
use almanack_logging::{almanack_info, almanack_warn};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use serde_json::Value;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Upcoming wire stories, falling back to the last cached copy.
    Upcoming,
    /// Wire stories available for scheduling.
    Available,
    /// One wire story with its content blocks.
    Article { id: String },
    /// One CMS page.
    Page { id: String },
    /// Internally shared stories and their sharing status.
    Shared,
    /// The signed-in account and its roles.
    Whoami,
}

pub async fn run(
    command: Command,
    client: &ApiClient,
    store: Arc<dyn LocalStore>,
) -> Result<(), ApiError> {
    almanack_info!("running {:?}", command);
    match command {
        Command::Upcoming => {
            let feed = UpcomingFeed::new(client.clone(), store);
            feed.reload(false).await;
            if let Some(err) = feed.snapshot().error {
                almanack_warn!("upcoming feed failed: {}", err);
                eprintln!("{}: {} (showing cached copy)", err.name(), err);
            }
            for article in feed.articles() {
                println!("{}", article_line(&article));
            }
        }
        Command::Available => {
            let articles = load(|| client.list_available()).await?;
            for article in ArcArticle::list_from(&articles) {
                println!("{}", article_line(&article));
            }
        }
        Command::Article { id } => {
            let raw = load(|| client.get_available(&id)).await?;
            print!("{}", article_details(&ArcArticle::from_raw(&raw)));
        }
        Command::Page { id } => {
            let raw = load(|| client.get_page(&id)).await?;
            print!("{}", page_details(&Page::from_raw(&raw), Utc::now()));
        }
        Command::Shared => {
            let raw = load(|| client.list_shared_articles()).await?;
            let now = Utc::now();
            for article in SharedArticle::list_from(&raw) {
                println!("{}", shared_line(&article, now));
            }
        }
        Command::Whoami => {
            let user = UserInfo::from_raw(&client.user_info().await?);
            println!("{} <{}>", user.full_name, user.email);
            println!("roles: {}", user.roles.join(", "));
            println!("editor: {}", user.is_editor());
        }
    }
    Ok(())
}

/// Runs one load through a fresh resource and hands back the settled data.
async fn load<F, Fut>(operation: F) -> Result<Value, ApiError>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<Value, ApiError>>,
{
    let resource = AsyncResource::<Value>::new();
    resource.exec(operation).await;
    settled(resource.snapshot())
}

fn settled(snapshot: ResourceSnapshot<Value>) -> Result<Value, ApiError> {
    match (snapshot.error, snapshot.raw_data) {
        (Some(err), _) => Err(err),
        (None, Some(data)) => Ok(data),
        (None, None) => Ok(Value::Null),
    }
}

fn date_or_dash(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub(crate) fn article_line(article: &ArcArticle) -> String {
    format!(
        "{:<16} {:<11} {:<24} {}",
        date_or_dash(article.planned_date),
        article.wire_status().verbose(),
        article.slug,
        article.headline
    )
}

pub(crate) fn article_details(article: &ArcArticle) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", article.headline));
    out.push_str(&format!("by {}\n", article.byline()));
    out.push_str(&format!("status: {}\n", article.wire_status().verbose()));
    if !article.budget_line.is_empty() {
        out.push_str(&format!("budget: {}\n", article.budget_line));
    }
    if !article.note.is_empty() {
        out.push_str(&format!("note: {}\n", article.note));
    }
    if let Some(image) = article.featured_image() {
        out.push_str(&format!("image: {image}\n"));
    }
    let blocks = article.blocks();
    out.push_str(&format!(
        "blocks: {} ({} embeds)\n",
        blocks.blocks().len(),
        blocks.embed_count()
    ));
    out.push_str(&format!("edit: {}\n", article.arc_url()));
    let url = article.pub_url();
    if !url.is_empty() {
        out.push_str(&format!("public: {url}\n"));
    }
    out
}

pub(crate) fn page_details(page: &Page, now: DateTime<Utc>) -> String {
    let mut out = format!("{}: {}\n", page.kicker, page.title);
    out.push_str(&format!("status: {}\n", page.status.verbose()));
    if let Some(at) = page.schedule_for {
        out.push_str(&format!("scheduled: {}\n", date_or_dash(Some(at))));
    }
    out.push_str(&format!("link: {}\n", page.link(now)));
    out
}

pub(crate) fn shared_line(article: &SharedArticle, now: DateTime<Utc>) -> String {
    format!(
        "{:<10} {:<24} {}",
        article.sharing_status_at(now).label(),
        article.story.slug,
        article.story.headline
    )
}
