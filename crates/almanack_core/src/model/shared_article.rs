use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::dates::maybe_date;
use crate::getter::{prop_array, prop_str};
use crate::links::ADMIN_ORIGIN;
use crate::model::{sort_by_planned_date, ArcArticle, Route};
use crate::status::{SharingFlags, SharingStatus, WireStatus};
use crate::text::{format_ap_date, intcomma};

/// An internally shared story: sharing metadata around a wire record
/// stored under `raw_data`.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedArticle {
    raw: Value,
    pub id: String,
    pub source_id: String,
    pub note: String,
    pub status_code: String,
    pub embargo_until: Option<DateTime<Utc>>,
    pub story: ArcArticle,
}

impl SharedArticle {
    pub fn from_raw(raw: &Value) -> Self {
        Self {
            id: prop_str(raw, "id"),
            source_id: prop_str(raw, "source_id"),
            note: prop_str(raw, "note"),
            status_code: prop_str(raw, "status"),
            embargo_until: maybe_date(raw, "embargo_until"),
            story: ArcArticle::from_raw(raw.get("raw_data").unwrap_or(&Value::Null)),
            raw: raw.clone(),
        }
    }

    /// Reads `contents` of a list payload, newest planned date first.
    pub fn list_from(payload: &Value) -> Vec<Self> {
        let mut articles: Vec<Self> = prop_array(payload, "contents")
            .iter()
            .map(Self::from_raw)
            .collect();
        sort_by_planned_date(&mut articles, |a| a.story.planned_date);
        articles
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn is_previewed(&self) -> bool {
        matches!(self.status_code.as_str(), "P" | "S")
    }

    pub fn is_shared(&self) -> bool {
        self.status_code == "S"
    }

    pub fn sharing_flags(&self) -> SharingFlags {
        SharingFlags {
            has_id: !self.id.is_empty() || !self.source_id.is_empty(),
            is_previewed: self.is_previewed(),
            is_shared: self.is_shared(),
            embargo_until: self.embargo_until,
        }
    }

    pub fn sharing_status_at(&self, now: DateTime<Utc>) -> SharingStatus {
        self.sharing_flags().status_at(now)
    }

    /// Status as of the moment of rendering.
    pub fn sharing_status(&self) -> SharingStatus {
        self.sharing_status_at(Utc::now())
    }

    pub fn wire_status(&self) -> WireStatus {
        self.story.wire_status()
    }

    pub fn details_route(&self) -> Route {
        Route::new("article", &self.source_id)
    }

    pub fn email_subject(&self) -> String {
        format!("New Spotlight PA story {}", self.story.slug)
    }

    pub fn email_body(&self) -> String {
        let story = &self.story;
        let planned = story
            .planned_date
            .map(|d| format_ap_date(d.date_naive()))
            .unwrap_or_default();
        let notes = if self.note.is_empty() {
            String::new()
        } else {
            format!("\n\nPublication Notes:\n\n{}", self.note)
        };
        let count = |n: Option<i64>| n.map(intcomma).unwrap_or_default();
        let inches = story
            .actual_inch_count
            .map(|n| n.to_string())
            .unwrap_or_default();

        format!(
            "New {slug}\n\n\
             {ADMIN_ORIGIN}/articles/{id}\n\n\
             Planned for {planned}{notes}\n\n\
             Budget:\n\n\
             {budget}\n\n\
             Word count planned: {planned_words}\n\
             Word count actual: {actual_words}\n\
             Lines: {lines}\n\
             Column inches: {inches}",
            slug = story.slug,
            id = self.source_id,
            budget = story.budget_line,
            planned_words = count(story.planned_word_count),
            actual_words = count(story.actual_word_count),
            lines = story
                .actual_line_count
                .map(|n| n.to_string())
                .unwrap_or_default(),
        )
        .trim()
        .to_string()
    }
}
