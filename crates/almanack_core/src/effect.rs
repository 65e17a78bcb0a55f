use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceEffect {
    /// Run the operation; report back with this generation.
    Exec { generation: u64 },
    /// Re-publish state at this instant, when the throttled flag turns off.
    RefreshAt { at: Instant },
}
