use std::sync::Arc;

use almanack_core::{ArcArticle, ResourceSnapshot};
use almanack_logging::{almanack_debug, almanack_warn};
use serde_json::Value;

use crate::persist::LocalStore;
use crate::{ApiClient, AsyncResource};

/// Store key of the last good upcoming-articles payload.
pub const UPCOMING_CACHE_KEY: &str = "almanack:upcoming:cache";

/// The upcoming wire-articles feed, backed by a local copy of the last good
/// payload for when the live feed is loading, failing or empty.
pub struct UpcomingFeed {
    client: ApiClient,
    resource: AsyncResource<Value>,
    store: Arc<dyn LocalStore>,
}

impl UpcomingFeed {
    pub fn new(client: ApiClient, store: Arc<dyn LocalStore>) -> Self {
        Self {
            client,
            resource: AsyncResource::new(),
            store,
        }
    }

    pub fn resource(&self) -> &AsyncResource<Value> {
        &self.resource
    }

    pub fn snapshot(&self) -> ResourceSnapshot<Value> {
        self.resource.snapshot()
    }

    /// Loads the feed and, if this load succeeded, refreshes the local copy.
    pub async fn reload(&self, force: bool) {
        let client = &self.client;
        if force {
            self.resource.exec_forced(|| client.list_upcoming()).await;
        } else {
            self.resource.exec(|| client.list_upcoming()).await;
        }

        let snapshot = self.resource.snapshot();
        if snapshot.is_loading || snapshot.error.is_some() {
            return;
        }
        if let Some(payload) = &snapshot.raw_data {
            match self.store.store(UPCOMING_CACHE_KEY, payload) {
                Ok(()) => almanack_debug!("cached upcoming feed"),
                Err(err) => almanack_warn!("could not cache upcoming feed: {}", err),
            }
        }
    }

    /// Articles to show: the live payload when settled, the cached one otherwise.
    pub fn articles(&self) -> Vec<ArcArticle> {
        let snapshot = self.resource.snapshot();
        if let Some(articles) = snapshot.project_settled(ArcArticle::list_from) {
            return articles;
        }
        match self.store.load(UPCOMING_CACHE_KEY) {
            Ok(Some(cached)) => ArcArticle::list_from(&cached),
            Ok(None) => Vec::new(),
            Err(err) => {
                almanack_warn!("could not read cached upcoming feed: {}", err);
                Vec::new()
            }
        }
    }

    /// Looks up one article of the current list by id.
    pub fn article(&self, id: &str) -> Option<ArcArticle> {
        self.articles().into_iter().find(|article| article.id == id)
    }
}
