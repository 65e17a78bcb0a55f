//! View-models projected from raw content API records.
mod arc_article;
mod editors_picks;
mod page;
mod scheduled_article;
mod shared_article;
mod user;

pub use arc_article::ArcArticle;
pub use editors_picks::EditorsPicks;
pub use page::{Page, PageListItem};
pub use scheduled_article::ScheduledArticle;
pub use shared_article::SharedArticle;
pub use user::UserInfo;

use chrono::{DateTime, Utc};

/// A flat reference to another view, by route name and resource id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    pub name: &'static str,
    pub id: String,
}

impl Route {
    pub fn new(name: &'static str, id: &str) -> Self {
        Self {
            name,
            id: id.to_string(),
        }
    }
}

/// Sorts newest first; undated items go last.
fn sort_by_planned_date<T>(items: &mut [T], key: impl Fn(&T) -> Option<DateTime<Utc>>) {
    items.sort_by(|a, b| match (key(a), key(b)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
