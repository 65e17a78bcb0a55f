use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

/// Supplies credentials for each API call.
///
/// `None` means no valid credential is available; the client then fails the
/// call with `ApiError::Unauthorized` without touching the network.
#[async_trait::async_trait]
pub trait HeaderSource: Send + Sync {
    async fn headers(&self) -> Option<HeaderMap>;
}

/// A fixed bearer token, e.g. from the command line or environment.
#[derive(Clone)]
pub struct StaticToken {
    header: HeaderValue,
}

impl StaticToken {
    /// Returns `None` for an empty token or one that is not a valid header value.
    pub fn new(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        let mut header = HeaderValue::from_str(&format!("Bearer {token}")).ok()?;
        header.set_sensitive(true);
        Some(Self { header })
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(..)")
    }
}

#[async_trait::async_trait]
impl HeaderSource for StaticToken {
    async fn headers(&self) -> Option<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.header.clone());
        Some(headers)
    }
}

/// Logged-out state.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

#[async_trait::async_trait]
impl HeaderSource for NoCredentials {
    async fn headers(&self) -> Option<HeaderMap> {
        None
    }
}
