use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, PoisonError};

use almanack_core::ApiError;
use almanack_logging::almanack_debug;
use futures_util::future::{BoxFuture, FutureExt, Shared};

type SharedCall<T> = Shared<BoxFuture<'static, Result<T, ApiError>>>;

/// Keyed single-flight: callers arriving while a call for the same key is
/// outstanding await that call instead of issuing their own.
pub struct RequestCoalescer<T> {
    inflight: Mutex<HashMap<String, SharedCall<T>>>,
}

impl<T> Default for RequestCoalescer<T> {
    fn default() -> Self {
        Self {
            inflight: Mutex::new(HashMap::new()),
        }
    }
}

impl<T> RequestCoalescer<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `start()` unless a call for `key` is already in flight, in which
    /// case its result is shared.
    pub async fn run<F, Fut>(&self, key: &str, start: F) -> Result<T, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let call = {
            let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
            match inflight.get(key) {
                Some(existing) => {
                    almanack_debug!("joining in-flight call for {}", key);
                    existing.clone()
                }
                None => {
                    let call = start().boxed().shared();
                    inflight.insert(key.to_string(), call.clone());
                    call
                }
            }
        };

        let result = call.clone().await;

        let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
        if inflight.get(key).is_some_and(|current| current.ptr_eq(&call)) {
            inflight.remove(key);
        }
        result
    }

    pub fn in_flight(&self) -> usize {
        self.inflight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
