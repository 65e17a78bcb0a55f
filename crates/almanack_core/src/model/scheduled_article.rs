use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::dates::{coerce_date, date_to_json};
use crate::edit::{Editable, SaveIntent};
use crate::getter::{get_prop, prop_str, prop_strings};
use crate::ApiError;

/// A wire story being prepared for the public site.
///
/// Date fields keep the server's own text so a save sends back exactly what
/// was loaded; typed views are available through the accessor methods.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledArticle {
    pub id: String,
    pub arc_id: String,
    pub body: String,
    pub blurb: String,
    pub hed: String,
    pub image_caption: String,
    pub image_credit: String,
    pub image_url: String,
    pub link_title: String,
    pub slug: String,
    pub subhead: String,
    pub summary: String,
    pub authors: Vec<String>,
    schedule_for: Value,
    last_arc_sync: Value,
    pub_date: Value,
}

impl ScheduledArticle {
    pub fn schedule_for(&self) -> Option<DateTime<Utc>> {
        coerce_date(&self.schedule_for)
    }

    pub fn set_schedule_for(&mut self, at: Option<DateTime<Utc>>) {
        self.schedule_for = date_to_json(at.as_ref());
    }

    pub fn last_arc_sync(&self) -> Option<DateTime<Utc>> {
        coerce_date(&self.last_arc_sync)
    }

    pub fn pub_date(&self) -> Option<DateTime<Utc>> {
        coerce_date(&self.pub_date)
    }
}

impl std::fmt::Display for ScheduledArticle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Scheduled Article {}", self.id)
    }
}

fn raw_or(raw: &Value, key: &str, fallback: Value) -> Value {
    get_prop(raw, key).cloned().unwrap_or(fallback)
}

impl Editable for ScheduledArticle {
    fn from_raw(raw: &Value) -> Self {
        Self {
            id: prop_str(raw, "ID"),
            arc_id: prop_str(raw, "ArcID"),
            body: prop_str(raw, "Body"),
            blurb: prop_str(raw, "Blurb"),
            hed: prop_str(raw, "Hed"),
            image_caption: prop_str(raw, "ImageCaption"),
            image_credit: prop_str(raw, "ImageCredit"),
            image_url: prop_str(raw, "ImageURL"),
            link_title: prop_str(raw, "LinkTitle"),
            slug: prop_str(raw, "Slug"),
            subhead: prop_str(raw, "Subhead"),
            summary: prop_str(raw, "Summary"),
            authors: prop_strings(raw, "Authors"),
            schedule_for: raw_or(raw, "ScheduleFor", Value::Null),
            last_arc_sync: raw_or(raw, "LastArcSync", json!("")),
            pub_date: raw_or(raw, "PubDate", json!("")),
        }
    }

    fn to_json(&self) -> Value {
        json!({
            "ID": self.id,
            "ArcID": self.arc_id,
            "Body": self.body,
            "Blurb": self.blurb,
            "Hed": self.hed,
            "ImageCaption": self.image_caption,
            "ImageCredit": self.image_credit,
            "ImageURL": self.image_url,
            "LinkTitle": self.link_title,
            "Slug": self.slug,
            "Subhead": self.subhead,
            "Summary": self.summary,
            "Authors": self.authors,
            "ScheduleFor": self.schedule_for,
            "LastArcSync": self.last_arc_sync,
            "PubDate": self.pub_date,
        })
    }

    fn validate(&self, intent: SaveIntent) -> Result<(), ApiError> {
        if self.hed.trim().is_empty() {
            return Err(ApiError::validation("hed", "headline is required"));
        }
        if self.slug.trim().is_empty() {
            return Err(ApiError::validation("slug", "slug is required"));
        }
        if intent == SaveIntent::Schedule && self.image_url.trim().is_empty() {
            return Err(ApiError::validation(
                "image_url",
                "an image is required before scheduling",
            ));
        }
        Ok(())
    }
}
