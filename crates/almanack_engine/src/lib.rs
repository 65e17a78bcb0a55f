//! Almanack engine: HTTP client and async drivers for the core state machine.
mod auth;
mod client;
mod coalesce;
pub mod endpoints;
mod feed;
mod persist;
mod resource;
mod settings;
mod watch;

pub use auth::{HeaderSource, NoCredentials, StaticToken};
pub use client::{ApiClient, SaveTarget};
pub use coalesce::RequestCoalescer;
pub use feed::{UpcomingFeed, UPCOMING_CACHE_KEY};
pub use persist::{ensure_cache_dir, AtomicFileWriter, FileStore, LocalStore, PersistError};
pub use resource::AsyncResource;
pub use settings::ClientSettings;
pub use watch::WatchedResource;
