use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::blocks::ContentBlocks;
use crate::dates::maybe_date;
use crate::getter::{get_prop, prop_array, prop_bool, prop_f64, prop_i64, prop_str};
use crate::imgproxy::proxy_image_path;
use crate::links::{arc_url, pub_url, pubslug};
use crate::model::{sort_by_planned_date, Route};
use crate::status::WireStatus;
use crate::text::comma_and;

/// A story record from the wire service feed.
#[derive(Debug, Clone)]
pub struct ArcArticle {
    raw: Value,
    pub id: String,
    pub slug: String,
    pub headline: String,
    pub description: String,
    pub budget_line: String,
    pub note: String,
    pub featured_image_caption: String,
    pub planned_word_count: Option<i64>,
    pub actual_word_count: Option<i64>,
    pub actual_line_count: Option<i64>,
    pub actual_inch_count: Option<f64>,
    pub planned_date: Option<DateTime<Utc>>,
    blocks: OnceLock<ContentBlocks>,
}

impl PartialEq for ArcArticle {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl ArcArticle {
    pub fn from_raw(raw: &Value) -> Self {
        let note = match prop_str(raw, "almanack-note") {
            note if note.is_empty() => prop_str(raw, "planning.internal_note"),
            note => note,
        };
        Self {
            id: prop_str(raw, "_id"),
            slug: prop_str(raw, "slug"),
            headline: prop_str(raw, "headlines.basic"),
            description: prop_str(raw, "description.basic"),
            budget_line: prop_str(raw, "planning.budget_line"),
            note,
            featured_image_caption: prop_str(raw, "promo_items.basic.caption"),
            planned_word_count: prop_i64(raw, "planning.story_length.word_count_planned"),
            actual_word_count: prop_i64(raw, "planning.story_length.word_count_actual"),
            actual_line_count: prop_i64(raw, "planning.story_length.line_count_actual"),
            actual_inch_count: prop_f64(raw, "planning.story_length.inch_count_actual"),
            planned_date: maybe_date(raw, "planning.scheduling.planned_publish_date"),
            raw: raw.clone(),
            blocks: OnceLock::new(),
        }
    }

    /// Builds the feed list, newest planned date first. Accepts either a bare
    /// array or an object with a `contents` array.
    pub fn list_from(payload: &Value) -> Vec<Self> {
        let items = match payload {
            Value::Array(items) => items.as_slice(),
            other => prop_array(other, "contents"),
        };
        let mut articles: Vec<Self> = items.iter().map(Self::from_raw).collect();
        sort_by_planned_date(&mut articles, |a| a.planned_date);
        articles
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn prop(&self, path: &str) -> Option<&Value> {
        get_prop(&self.raw, path)
    }

    pub fn pubslug(&self) -> String {
        pubslug(&prop_str(&self.raw, "canonical_url"))
    }

    pub fn pub_url(&self) -> String {
        pub_url(&self.pubslug(), self.planned_date.as_ref())
    }

    pub fn arc_url(&self) -> String {
        arc_url(&self.id)
    }

    pub fn details_route(&self) -> Route {
        Route::new("article", &self.id)
    }

    pub fn authors(&self) -> Vec<String> {
        prop_array(&self.raw, "credits.by")
            .iter()
            .map(author_name)
            .collect()
    }

    pub fn byline(&self) -> String {
        comma_and(&self.authors())
    }

    pub fn is_published(&self) -> bool {
        prop_bool(&self.raw, "additional_properties.is_published")
            || prop_bool(&self.raw, "additional_properties.has_published_copy")
    }

    pub fn wire_status(&self) -> WireStatus {
        WireStatus::from_code(
            prop_i64(&self.raw, "workflow.status_code"),
            self.is_published(),
        )
    }

    /// Source URL of the featured image. Only images already on the CDN's
    /// public path are usable; otherwise the resizer URL is used.
    pub fn featured_image(&self) -> Option<String> {
        let url = prop_str(&self.raw, "promo_items.basic.url");
        if url.contains("/public/") {
            return Some(url);
        }
        let resized = prop_str(&self.raw, "promo_items.basic.additional_properties.resizeUrl");
        (!resized.is_empty()).then_some(resized)
    }

    /// Console proxy path for the featured image, empty without one.
    pub fn featured_image_proxy(&self) -> String {
        self.featured_image()
            .map(|src| proxy_image_path(&src))
            .unwrap_or_default()
    }

    pub fn featured_image_credits(&self) -> Vec<String> {
        prop_array(&self.raw, "promo_items.basic.credits.by")
            .iter()
            .map(|item| match prop_str(item, "name") {
                name if name.is_empty() => prop_str(item, "byline"),
                name => name,
            })
            .collect()
    }

    /// Body blocks, parsed on first use.
    pub fn blocks(&self) -> &ContentBlocks {
        self.blocks.get_or_init(|| ContentBlocks::from_story(&self.raw))
    }
}

fn author_name(item: &Value) -> String {
    let byline = prop_str(item, "additional_properties.original.byline");
    if !byline.is_empty() {
        return byline;
    }
    let name = prop_str(item, "name");
    // Some wire names already carry their organization.
    if name.contains(" of ") {
        return name;
    }
    match prop_str(item, "org") {
        org if org.is_empty() => name,
        org => format!("{name} of {org}"),
    }
}
