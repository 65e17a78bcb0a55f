//! Paths of the console REST API, relative to the client's base URL.

pub const ALL_SERIES: &str = "/api/all-series";
pub const ALL_TOPICS: &str = "/api/all-topics";
pub const AVAILABLE_ARTICLES: &str = "/api/available-articles";
pub const CREATE_SIGNED_UPLOAD: &str = "/api/create-signed-upload";
pub const EDITORS_PICKS: &str = "/api/editors-picks";
pub const IMAGE_UPDATE: &str = "/api/image-update";
pub const IMAGES: &str = "/api/images";
pub const LIST_ARC_REFRESH: &str = "/api/list-arc-refresh";
pub const PAGE: &str = "/api/page";
pub const PAGES: &str = "/api/pages";
pub const SCHEDULED_ARTICLES: &str = "/api/scheduled-articles";
pub const SHARED_ARTICLE: &str = "/api/shared-article";
pub const SHARED_ARTICLES: &str = "/api/shared-articles";
pub const UPCOMING_ARTICLES: &str = "/api/upcoming-articles";
pub const USER_INFO: &str = "/api/user-info";
