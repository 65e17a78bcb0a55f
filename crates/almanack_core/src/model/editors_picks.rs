use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::dates::{date_to_json, maybe_date};
use crate::getter::prop_array;

/// One homepage configuration: the curated story slots and when they go live.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorsPicks {
    pub featured_stories: Vec<Value>,
    pub subfeatures: Vec<Value>,
    pub top_slots: Vec<Value>,
    pub topper: Vec<Value>,
    pub schedule_for: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    /// The configuration live on the site at load time.
    pub is_current: bool,
}

impl EditorsPicks {
    pub fn from_raw(site_config: &Value) -> Self {
        let slot = |name: &str| prop_array(site_config, &format!("data.{name}")).to_vec();
        let published_at = maybe_date(site_config, "published_at");
        Self {
            featured_stories: slot("featuredStories"),
            subfeatures: slot("subfeatures"),
            top_slots: slot("topSlots"),
            topper: slot("topper"),
            schedule_for: maybe_date(site_config, "schedule_for"),
            is_current: published_at.is_some(),
            published_at,
        }
    }

    /// Reloads every slot from a server configuration.
    pub fn reset(&mut self, site_config: &Value) {
        *self = Self::from_raw(site_config);
    }

    /// Copies the slots into a new, unpublished configuration.
    pub fn clone_for(&self, schedule_for: Option<DateTime<Utc>>) -> Self {
        Self {
            schedule_for,
            published_at: None,
            is_current: false,
            ..self.clone()
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "schedule_for": date_to_json(self.schedule_for.as_ref()),
            "data": {
                "featuredStories": self.featured_stories,
                "subfeatures": self.subfeatures,
                "topSlots": self.top_slots,
                "topper": self.topper,
            },
        })
    }

    /// Configurations of a `{"configs": [...]}` payload.
    pub fn list_from(payload: &Value) -> Vec<Self> {
        prop_array(payload, "configs")
            .iter()
            .map(Self::from_raw)
            .collect()
    }

    /// Body for saving every configuration at once.
    pub fn configs_payload(picks: &[Self]) -> Value {
        json!({ "configs": picks.iter().map(Self::to_json).collect::<Vec<_>>() })
    }
}
