use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

use crate::dates::{date_to_json, maybe_date, nullable_date, nullable_date_to_json};
use crate::edit::{Editable, SaveIntent};
use crate::getter::{is_truthy, prop_array, prop_str};
use crate::imgproxy::{image_proxy_url, ImgproxyOptions};
use crate::links::{arc_url, news_dir, to_abs};
use crate::status::PageStatus;
use crate::text::derive_slug;
use crate::ApiError;

/// A CMS page: Hugo-style frontmatter plus a markdown body.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: String,
    pub body: String,
    /// Frontmatter as loaded; keys this type doesn't model survive a save.
    pub frontmatter: Map<String, Value>,
    pub file_path: String,
    pub url_path: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub last_published: Option<DateTime<Utc>>,
    pub schedule_for: Option<DateTime<Utc>>,
    pub arc_id: String,
    pub kicker: String,
    pub title: String,
    pub internal_id: String,
    pub link_title: String,
    pub title_tag: String,
    pub authors: Vec<String>,
    pub byline: String,
    pub summary: String,
    pub blurb: String,
    pub topics: Vec<String>,
    pub series: Vec<String>,
    pub image: String,
    pub image_description: String,
    pub image_credit: String,
    pub image_size: String,
    pub language_code: String,
    pub slug: String,
    pub extended_kicker: String,
    pub modal_exclude: bool,
    pub no_index: bool,
    pub override_url: String,
    pub aliases: Vec<String>,
    pub layout: String,
    /// Publication state at load time. Not recomputed by edits.
    pub status: PageStatus,
}

impl Page {
    pub fn is_published(&self) -> bool {
        self.last_published.is_some()
    }

    pub fn is_future_dated(&self, now: DateTime<Utc>) -> bool {
        self.published_at.is_some_and(|published| published > now)
    }

    /// True when the chosen schedule date has already passed.
    pub fn schedule_is_past(&self, now: DateTime<Utc>) -> bool {
        self.schedule_for.is_some_and(|at| at <= now)
    }

    /// Public URL of the page. News pages without a stored path are filed
    /// under the month of their schedule date, or of `now`.
    pub fn link(&self, now: DateTime<Utc>) -> String {
        if !self.url_path.is_empty() {
            return to_abs(&self.url_path);
        }
        if !self.override_url.is_empty() {
            return to_abs(&self.override_url);
        }
        let Some((dir, fname)) = split_content_path(&self.file_path) else {
            return String::new();
        };
        let slug = if self.slug.is_empty() { fname } else { &self.slug };
        let dir = if dir == "news" {
            news_dir(&self.schedule_for.unwrap_or(now))
        } else {
            dir.to_string()
        };
        to_abs(&format!("/{dir}/{slug}/"))
    }

    /// Thumbnail for images stored in the site bucket; remote images get none.
    pub fn image_preview_url(&self) -> String {
        if self.image.is_empty() || self.image.starts_with("http") {
            return String::new();
        }
        image_proxy_url(&self.image, &ImgproxyOptions::default())
    }

    pub fn arc_url(&self) -> String {
        if self.arc_id.is_empty() {
            return String::new();
        }
        arc_url(&self.arc_id)
    }

    pub fn derive_slug(&mut self) {
        self.slug = derive_slug(&self.title);
    }

    pub fn publish_now(&mut self, now: DateTime<Utc>) {
        self.schedule_for = Some(now);
    }

    pub fn set_schedule(&mut self, at: DateTime<Utc>) {
        self.schedule_for = Some(at);
    }

    /// Saves without publishing by clearing any pending schedule.
    pub fn update_only(&mut self) {
        self.schedule_for = None;
    }
}

fn split_content_path(file_path: &str) -> Option<(&str, &str)> {
    let rest = file_path.strip_prefix("content/")?;
    let (dir, file) = rest.rsplit_once('/')?;
    let (fname, _) = file.split_once(".md")?;
    (!dir.is_empty() && !fname.is_empty()).then_some((dir, fname))
}

fn fm_str(frontmatter: &Value, key: &str) -> String {
    frontmatter
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn fm_strings(frontmatter: &Value, key: &str) -> Vec<String> {
    frontmatter
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(ToOwned::to_owned))
                .collect()
        })
        .unwrap_or_default()
}

fn fm_bool(frontmatter: &Value, key: &str) -> bool {
    frontmatter.get(key).is_some_and(is_truthy)
}

impl Editable for Page {
    fn from_raw(raw: &Value) -> Self {
        let fm = raw.get("frontmatter").cloned().unwrap_or(Value::Null);
        let last_published = nullable_date(raw, "last_published");
        let schedule_for = nullable_date(raw, "schedule_for");
        Self {
            id: prop_str(raw, "id"),
            body: prop_str(raw, "body"),
            file_path: prop_str(raw, "file_path"),
            url_path: prop_str(raw, "url_path.String"),
            created_at: maybe_date(raw, "created_at"),
            updated_at: maybe_date(raw, "updated_at"),
            published_at: maybe_date(&fm, "published"),
            last_published,
            schedule_for,
            arc_id: fm_str(&fm, "arc-id"),
            kicker: fm_str(&fm, "kicker"),
            title: fm_str(&fm, "title"),
            internal_id: fm_str(&fm, "internal-id"),
            link_title: fm_str(&fm, "linktitle"),
            title_tag: fm_str(&fm, "title-tag"),
            authors: fm_strings(&fm, "authors"),
            byline: fm_str(&fm, "byline"),
            summary: fm_str(&fm, "description"),
            blurb: fm_str(&fm, "blurb"),
            topics: fm_strings(&fm, "topics"),
            series: fm_strings(&fm, "series"),
            image: fm_str(&fm, "image"),
            image_description: fm_str(&fm, "image-description"),
            image_credit: fm_str(&fm, "image-credit"),
            image_size: fm_str(&fm, "image-size"),
            language_code: fm_str(&fm, "language-code"),
            slug: fm_str(&fm, "slug"),
            extended_kicker: fm_str(&fm, "extended-kicker"),
            modal_exclude: fm_bool(&fm, "modal-exclude"),
            no_index: fm_bool(&fm, "no-index"),
            override_url: fm_str(&fm, "url"),
            aliases: fm_strings(&fm, "aliases"),
            layout: fm_str(&fm, "layout"),
            status: PageStatus::from_dates(last_published.as_ref(), schedule_for.as_ref()),
            frontmatter: match fm {
                Value::Object(map) => map,
                _ => Map::new(),
            },
        }
    }

    fn to_json(&self) -> Value {
        let mut frontmatter = self.frontmatter.clone();
        let fields = [
            ("published", date_to_json(self.published_at.as_ref())),
            ("arc-id", json!(self.arc_id)),
            ("kicker", json!(self.kicker)),
            ("title", json!(self.title)),
            ("internal-id", json!(self.internal_id)),
            ("linktitle", json!(self.link_title)),
            ("title-tag", json!(self.title_tag)),
            ("authors", json!(self.authors)),
            ("byline", json!(self.byline)),
            ("description", json!(self.summary)),
            ("blurb", json!(self.blurb)),
            ("topics", json!(self.topics)),
            ("series", json!(self.series)),
            ("image", json!(self.image)),
            ("image-description", json!(self.image_description)),
            ("image-credit", json!(self.image_credit)),
            ("image-size", json!(self.image_size)),
            ("language-code", json!(self.language_code)),
            ("slug", json!(self.slug)),
            ("extended-kicker", json!(self.extended_kicker)),
            ("modal-exclude", json!(self.modal_exclude)),
            ("no-index", json!(self.no_index)),
            ("url", json!(self.override_url)),
            ("aliases", json!(self.aliases)),
            ("layout", json!(self.layout)),
        ];
        for (key, value) in fields {
            frontmatter.insert(key.to_string(), value);
        }

        json!({
            "file_path": self.file_path,
            "set_frontmatter": true,
            "frontmatter": frontmatter,
            "set_body": true,
            "body": self.body,
            "set_schedule_for": true,
            "schedule_for": nullable_date_to_json(self.schedule_for.as_ref()),
            // blank leaves the stored path alone
            "url_path": "",
            "set_last_published": false,
        })
    }

    fn validate(&self, intent: SaveIntent) -> Result<(), ApiError> {
        let required = [
            ("kicker", &self.kicker),
            ("title", &self.title),
            ("slug", &self.slug),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ApiError::validation(*field, format!("{field} is required")));
        }
        if intent == SaveIntent::Schedule && self.image.trim().is_empty() {
            return Err(ApiError::validation(
                "image",
                "an image is required before publishing",
            ));
        }
        Ok(())
    }
}

/// A row of the page index.
#[derive(Debug, Clone, PartialEq)]
pub struct PageListItem {
    pub id: String,
    pub internal_id: String,
    pub title: String,
    pub blurb: String,
    pub description: String,
    pub file_path: String,
    pub url_path: String,
    pub image: String,
    pub created_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_published: Option<DateTime<Utc>>,
    pub schedule_for: Option<DateTime<Utc>>,
}

impl PageListItem {
    pub fn from_raw(raw: &Value) -> Self {
        Self {
            id: prop_str(raw, "id"),
            internal_id: prop_str(raw, "internal_id"),
            title: prop_str(raw, "title"),
            blurb: prop_str(raw, "blurb"),
            description: prop_str(raw, "description"),
            file_path: prop_str(raw, "file_path"),
            url_path: prop_str(raw, "url_path"),
            image: prop_str(raw, "image"),
            created_at: maybe_date(raw, "created_at"),
            published_at: maybe_date(raw, "published_at"),
            updated_at: maybe_date(raw, "updated_at"),
            last_published: nullable_date(raw, "last_published"),
            schedule_for: nullable_date(raw, "schedule_for"),
        }
    }

    /// Items of a `{"pages": [...]}` payload, in server order.
    pub fn list_from(payload: &Value) -> Vec<Self> {
        prop_array(payload, "pages")
            .iter()
            .map(Self::from_raw)
            .collect()
    }

    pub fn is_published(&self) -> bool {
        self.last_published.is_some()
    }

    pub fn status(&self) -> PageStatus {
        PageStatus::from_dates(self.last_published.as_ref(), self.schedule_for.as_ref())
    }

    pub fn link(&self) -> String {
        to_abs(&self.url_path)
    }
}
