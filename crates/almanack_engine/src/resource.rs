use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::{Duration, Instant};

use almanack_core::{
    update, ApiError, ResourceEffect, ResourceMsg, ResourceSnapshot, ResourceState,
};
use almanack_logging::{almanack_debug, almanack_trace};
use tokio::sync::watch;

/// Clock used for the throttle window. Follows tokio's clock so paused-time
/// tests can drive it.
pub(crate) fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

struct Inner<T> {
    state: Mutex<ResourceState<T>>,
    tx: watch::Sender<ResourceSnapshot<T>>,
}

impl<T: Clone> Inner<T> {
    fn publish(&self, state: &ResourceState<T>) {
        self.tx.send_replace(state.view(now()));
    }

    fn republish(&self) {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        self.publish(&state);
    }
}

/// One network-backed value with loading, error and has-loaded flags.
///
/// At most one load runs at a time: [`exec`](Self::exec) is dropped while a
/// load is in flight, [`exec_forced`](Self::exec_forced) supersedes it.
/// Dropping an `exec` future before it settles ends the load, keeping the
/// previous data and error. Every state change is published to the receivers of
/// [`subscribe`](Self::subscribe).
pub struct AsyncResource<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for AsyncResource<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for AsyncResource<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::from_state(ResourceState::new())
    }
}

impl<T> AsyncResource<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_throttle_window(window: Duration) -> Self {
        Self::from_state(ResourceState::with_throttle_window(window))
    }

    fn from_state(state: ResourceState<T>) -> Self {
        let (tx, _) = watch::channel(state.view(now()));
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                tx,
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceSnapshot<T>> {
        self.inner.tx.subscribe()
    }

    /// Current state, with the throttled flag evaluated now.
    pub fn snapshot(&self) -> ResourceSnapshot<T> {
        let state = self.inner.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.view(now())
    }

    pub async fn exec<F, Fut>(&self, operation: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        self.run(false, operation).await
    }

    pub async fn exec_forced<F, Fut>(&self, operation: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        self.run(true, operation).await
    }

    async fn run<F, Fut>(&self, force: bool, operation: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let effects = self.apply(ResourceMsg::LoadRequested { force, at: now() });
        let Some(generation) = effects.iter().find_map(|effect| match effect {
            ResourceEffect::Exec { generation } => Some(*generation),
            ResourceEffect::RefreshAt { .. } => None,
        }) else {
            return;
        };

        let pending = PendingLoad {
            resource: self,
            generation,
            armed: true,
        };
        let result = operation().await;
        pending.disarm();

        let effects = self.apply(ResourceMsg::LoadSettled {
            generation,
            result,
            at: now(),
        });
        self.run_effects(effects);
    }

    fn apply(&self, msg: ResourceMsg<T>) -> Vec<ResourceEffect> {
        let mut guard = self.inner.state.lock().unwrap_or_else(PoisonError::into_inner);
        let (next, effects) = update(std::mem::take(&mut *guard), msg);
        *guard = next;
        self.inner.publish(&guard);
        effects
    }

    fn run_effects(&self, effects: Vec<ResourceEffect>) {
        for effect in effects {
            match effect {
                ResourceEffect::RefreshAt { at } => self.refresh_at(at),
                ResourceEffect::Exec { .. } => {}
            }
        }
    }

    /// Re-publishes when the throttle window closes, so observers see the
    /// throttled flag drop. Does not keep the resource alive.
    fn refresh_at(&self, at: Instant) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let weak: Weak<Inner<T>> = Arc::downgrade(&self.inner);
        runtime.spawn(async move {
            tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await;
            if let Some(inner) = weak.upgrade() {
                almanack_trace!("throttle window closed");
                inner.republish();
            }
        });
    }
}

/// Marks a load as abandoned if the `exec` future is dropped mid-flight,
/// so the resource does not stay loading forever.
struct PendingLoad<'a, T>
where
    T: Clone + Send + Sync + 'static,
{
    resource: &'a AsyncResource<T>,
    generation: u64,
    armed: bool,
}

impl<T> PendingLoad<'_, T>
where
    T: Clone + Send + Sync + 'static,
{
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<T> Drop for PendingLoad<'_, T>
where
    T: Clone + Send + Sync + 'static,
{
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        almanack_debug!("exec dropped before generation {} settled", self.generation);
        let effects = self.resource.apply(ResourceMsg::LoadAbandoned {
            generation: self.generation,
            at: now(),
        });
        self.resource.run_effects(effects);
    }
}
