//! Almanack core: pure resource state machine and view-model projection.
pub mod blocks;
pub mod dates;
mod edit;
mod effect;
mod error;
pub mod getter;
pub mod imgproxy;
pub mod links;
pub mod model;
mod msg;
mod state;
pub mod status;
pub mod text;
mod throttle;
mod update;
mod view_model;

pub use blocks::{ContentBlock, ContentBlocks, ContentEntry, EmbedEntry, HtmlEntry};
pub use edit::{EditSession, Editable, SaveIntent};
pub use effect::ResourceEffect;
pub use error::{ApiError, TransportKind};
pub use model::{
    ArcArticle, EditorsPicks, Page, PageListItem, Route, ScheduledArticle, SharedArticle, UserInfo,
};
pub use msg::ResourceMsg;
pub use state::ResourceState;
pub use status::{PageStatus, SharingFlags, SharingStatus, WireStatus};
pub use throttle::{ThrottleToggle, DEFAULT_THROTTLE_WINDOW};
pub use update::update;
pub use view_model::ResourceSnapshot;
