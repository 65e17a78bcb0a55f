use crate::ApiError;

/// What observers of a resource see.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSnapshot<T> {
    pub raw_data: Option<T>,
    pub is_loading: bool,
    pub is_loading_throttled: bool,
    pub error: Option<ApiError>,
    pub did_load: bool,
}

impl<T> Default for ResourceSnapshot<T> {
    fn default() -> Self {
        Self {
            raw_data: None,
            is_loading: false,
            is_loading_throttled: false,
            error: None,
            did_load: false,
        }
    }
}

impl<T> ResourceSnapshot<T> {
    /// Derives a view-model from the current raw data, stale or not.
    pub fn project<V>(&self, f: impl FnOnce(&T) -> V) -> Option<V> {
        self.raw_data.as_ref().map(f)
    }

    /// Derives a view-model only when the last load succeeded and none is running.
    pub fn project_settled<V>(&self, f: impl FnOnce(&T) -> V) -> Option<V> {
        if self.is_loading || self.error.is_some() {
            return None;
        }
        self.project(f)
    }
}
