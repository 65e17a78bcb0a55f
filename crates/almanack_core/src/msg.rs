use std::time::Instant;

use crate::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum ResourceMsg<T> {
    /// A caller asked for a load. Dropped while a load is in flight unless forced.
    LoadRequested { force: bool, at: Instant },
    /// The operation started by `ResourceEffect::Exec` finished.
    LoadSettled {
        generation: u64,
        result: Result<T, ApiError>,
        at: Instant,
    },
    /// The caller stopped waiting before the operation finished.
    LoadAbandoned { generation: u64, at: Instant },
}
