use std::time::{Duration, Instant};

use crate::throttle::ThrottleToggle;
use crate::view_model::ResourceSnapshot;
use crate::ApiError;

/// State of one network-backed resource.
///
/// Only [`crate::update`] mutates it. `generation` identifies the latest
/// started load so that a superseded result can be recognised and dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    raw_data: Option<T>,
    is_loading: bool,
    error: Option<ApiError>,
    did_load: bool,
    throttle: ThrottleToggle,
    generation: u64,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            raw_data: None,
            is_loading: false,
            error: None,
            did_load: false,
            throttle: ThrottleToggle::default(),
            generation: 0,
        }
    }
}

impl<T> ResourceState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_throttle_window(window: Duration) -> Self {
        Self {
            throttle: ThrottleToggle::new(window),
            ..Self::default()
        }
    }

    /// Seeds a resource with data that is already known, e.g. after a save.
    pub fn with_data(data: T) -> Self {
        Self {
            raw_data: Some(data),
            did_load: true,
            ..Self::default()
        }
    }

    pub fn raw_data(&self) -> Option<&T> {
        self.raw_data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn did_load(&self) -> bool {
        self.did_load
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading_throttled(&self, now: Instant) -> bool {
        self.throttle.is_active(now)
    }

    pub fn throttle_expires_at(&self) -> Option<Instant> {
        self.throttle.expires_at()
    }

    pub fn view(&self, now: Instant) -> ResourceSnapshot<T>
    where
        T: Clone,
    {
        ResourceSnapshot {
            raw_data: self.raw_data.clone(),
            is_loading: self.is_loading,
            is_loading_throttled: self.is_loading_throttled(now),
            error: self.error.clone(),
            did_load: self.did_load,
        }
    }

    pub(crate) fn begin_load(&mut self, at: Instant) -> u64 {
        self.generation += 1;
        self.is_loading = true;
        self.throttle.set(true, at);
        self.generation
    }

    /// Ends the current load without touching data, error or `did_load`.
    pub(crate) fn abandon(&mut self, at: Instant) {
        self.is_loading = false;
        self.throttle.set(false, at);
    }

    pub(crate) fn settle(&mut self, result: Result<T, ApiError>, at: Instant) {
        self.is_loading = false;
        self.throttle.set(false, at);
        match result {
            Ok(data) => {
                self.raw_data = Some(data);
                self.error = None;
                self.did_load = true;
            }
            Err(err) => {
                self.error = Some(err);
            }
        }
    }
}
