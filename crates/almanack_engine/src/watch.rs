use std::future::Future;
use std::sync::Arc;

use almanack_core::{ApiError, ResourceSnapshot};
use almanack_logging::almanack_debug;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::AsyncResource;

type Fetcher<K, T> = Arc<dyn Fn(K) -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>;

/// A resource that re-fetches whenever its key changes.
///
/// Loads immediately for the current key. Each key change starts a forced
/// load, so the result for an older key can never overwrite a newer one.
/// Dropping the handle stops watching; a load already running still lands
/// on the (now unobserved) resource.
pub struct WatchedResource<K, T> {
    resource: AsyncResource<T>,
    key: watch::Receiver<K>,
    fetcher: Fetcher<K, T>,
    cancel: CancellationToken,
}

impl<K, T> WatchedResource<K, T>
where
    K: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Must be called from within a tokio runtime.
    pub fn new<F, Fut>(key: watch::Receiver<K>, fetch: F) -> Self
    where
        F: Fn(K) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let fetcher: Fetcher<K, T> = Arc::new(move |key| fetch(key).boxed());
        let this = Self {
            resource: AsyncResource::new(),
            key,
            fetcher,
            cancel: CancellationToken::new(),
        };
        this.spawn_watcher();
        this
    }

    fn spawn_watcher(&self) {
        let resource = self.resource.clone();
        let fetcher = Arc::clone(&self.fetcher);
        let cancel = self.cancel.clone();
        let mut key = self.key.clone();

        tokio::spawn(async move {
            let mut current = key.borrow_and_update().clone();
            loop {
                let load = {
                    let resource = resource.clone();
                    let fetcher = Arc::clone(&fetcher);
                    async move { resource.exec_forced(|| fetcher(current)).await }
                };
                tokio::spawn(load);

                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    changed = key.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        almanack_debug!("watched key changed, reloading");
                        current = key.borrow_and_update().clone();
                    }
                }
            }
        });
    }

    pub fn resource(&self) -> &AsyncResource<T> {
        &self.resource
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceSnapshot<T>> {
        self.resource.subscribe()
    }

    pub fn snapshot(&self) -> ResourceSnapshot<T> {
        self.resource.snapshot()
    }

    /// Re-runs the load for the current key; dropped if one is in flight.
    pub async fn fetch(&self) {
        let key = self.key.borrow().clone();
        self.resource.exec(|| (self.fetcher)(key)).await
    }

    /// Derives a view-model from the current data.
    pub fn project<V>(&self, f: impl FnOnce(&T) -> V) -> Option<V> {
        self.resource.snapshot().project(f)
    }
}

impl<K, T> Drop for WatchedResource<K, T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
