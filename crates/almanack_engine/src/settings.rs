use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Origin the `/api/...` paths are resolved against.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8888".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}
