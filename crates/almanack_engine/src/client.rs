use std::sync::Arc;

use almanack_core::getter::prop_str;
use almanack_core::{
    ApiError, EditSession, Editable, Page, SaveIntent, ScheduledArticle, TransportKind,
};
use almanack_logging::{almanack_debug, almanack_warn, next_request_id};
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde_json::{json, Map, Value};
use url::Url;

use crate::auth::HeaderSource;
use crate::coalesce::RequestCoalescer;
use crate::endpoints;
use crate::settings::ClientSettings;

/// An editable view-model and the endpoint that accepts its serialized form.
pub trait SaveTarget: Editable + Send {
    const ENDPOINT: &'static str;
}

impl SaveTarget for Page {
    const ENDPOINT: &'static str = endpoints::PAGE;
}

impl SaveTarget for ScheduledArticle {
    const ENDPOINT: &'static str = endpoints::SCHEDULED_ARTICLES;
}

/// Client for the console REST API.
///
/// Built once and shared; clones are cheap and share the connection pool,
/// the credential source and the coalescing buffer.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    auth: Arc<dyn HeaderSource>,
    coalesced: Arc<RequestCoalescer<Value>>,
}

impl ApiClient {
    pub fn new(settings: &ClientSettings, auth: Arc<dyn HeaderSource>) -> Result<Self, ApiError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::transport(TransportKind::Other, err.to_string()))?;
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(map_reqwest_error)?;
        Ok(Self {
            http,
            base,
            auth,
            coalesced: Arc::new(RequestCoalescer::new()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        let url = self.endpoint(path)?;
        self.request(Method::GET, url, params, None).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let url = self.endpoint(path)?;
        self.request(Method::POST, url, &[], Some(body)).await
    }

    /// GETs `<path>/<id>`, with the id escaped as a single path segment.
    pub async fn get_item(&self, path: &str, id: &str) -> Result<Value, ApiError> {
        if matches!(id, "" | "." | "..") {
            return Err(ApiError::validation("id", format!("invalid id {id:?}")));
        }
        let mut url = self.endpoint(path)?;
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::transport(TransportKind::Other, "base URL cannot hold a path")
            })?
            .push(id);
        self.request(Method::GET, url, &[], None).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|err| ApiError::transport(TransportKind::Other, err.to_string()))
    }

    async fn request(
        &self,
        method: Method,
        mut url: Url,
        params: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let Some(headers) = self.auth.headers().await else {
            almanack_warn!("no credentials available for {} {}", method, url.path());
            return Err(ApiError::Unauthorized);
        };

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        let request_id = next_request_id();
        almanack_debug!("[{}] {} {}", request_id, method, url);

        let mut builder = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        let response = builder.send().await.map_err(|err| {
            almanack_warn!("[{}] request failed: {}", request_id, err);
            map_reqwest_error(err)
        })?;
        let status = response.status();
        if !status.is_success() {
            let bytes = response.bytes().await.unwrap_or_default();
            almanack_warn!("[{}] {} ({} bytes)", request_id, status, bytes.len());
            return Err(unexpected_response(status, &bytes));
        }
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        almanack_debug!("[{}] {} ({} bytes)", request_id, status, bytes.len());
        serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
    }

    pub async fn list_upcoming(&self) -> Result<Value, ApiError> {
        self.get_json(endpoints::UPCOMING_ARTICLES, &[]).await
    }

    pub async fn list_available(&self) -> Result<Value, ApiError> {
        self.get_json(endpoints::AVAILABLE_ARTICLES, &[]).await
    }

    pub async fn get_available(&self, id: &str) -> Result<Value, ApiError> {
        self.get_item(endpoints::AVAILABLE_ARTICLES, id).await
    }

    pub async fn get_scheduled_article(&self, id: &str) -> Result<Value, ApiError> {
        self.get_item(endpoints::SCHEDULED_ARTICLES, id).await
    }

    pub async fn get_page(&self, id: &str) -> Result<Value, ApiError> {
        self.get_json(endpoints::PAGE, &[("id", id)]).await
    }

    pub async fn list_pages(&self) -> Result<Value, ApiError> {
        self.get_json(endpoints::PAGES, &[]).await
    }

    pub async fn list_shared_articles(&self) -> Result<Value, ApiError> {
        self.get_json(endpoints::SHARED_ARTICLES, &[]).await
    }

    pub async fn get_shared_article(&self, id: &str) -> Result<Value, ApiError> {
        self.get_json(endpoints::SHARED_ARTICLE, &[("id", id)]).await
    }

    pub async fn list_images(&self) -> Result<Value, ApiError> {
        self.get_json(endpoints::IMAGES, &[]).await
    }

    pub async fn list_refresh_arc(&self) -> Result<Value, ApiError> {
        self.get_json(endpoints::LIST_ARC_REFRESH, &[]).await
    }

    pub async fn list_all_topics(&self) -> Result<Value, ApiError> {
        self.get_json(endpoints::ALL_TOPICS, &[]).await
    }

    pub async fn list_all_series(&self) -> Result<Value, ApiError> {
        self.get_json(endpoints::ALL_SERIES, &[]).await
    }

    pub async fn get_editors_picks(&self) -> Result<Value, ApiError> {
        self.get_json(endpoints::EDITORS_PICKS, &[]).await
    }

    pub async fn save_editors_picks(&self, body: &Value) -> Result<Value, ApiError> {
        self.post_json(endpoints::EDITORS_PICKS, body).await
    }

    /// Current user. Concurrent callers share one request.
    pub async fn user_info(&self) -> Result<Value, ApiError> {
        let client = self.clone();
        self.coalesced
            .run(endpoints::USER_INFO, move || async move {
                client.get_json(endpoints::USER_INFO, &[]).await
            })
            .await
    }

    /// Sets image metadata. Empty strings leave the stored value alone.
    pub async fn update_image(
        &self,
        path: &str,
        credit: &str,
        description: &str,
    ) -> Result<Value, ApiError> {
        let body = json!({
            "path": path,
            "credit": credit,
            "set_credit": !credit.is_empty(),
            "description": description,
            "set_description": !description.is_empty(),
        });
        self.post_json(endpoints::IMAGE_UPDATE, &body).await
    }

    /// Uploads a file and registers it, returning the stored filename.
    ///
    /// Three steps: ask for a signed URL, PUT the bytes there without our
    /// credentials, then record the image. A failure stops the chain.
    pub async fn upload_file(&self, body: Bytes, content_type: &str) -> Result<String, ApiError> {
        let signed = self
            .post_json(endpoints::CREATE_SIGNED_UPLOAD, &json!({ "type": content_type }))
            .await?;
        let signed_url = prop_str(&signed, "signed-url");
        let filename = prop_str(&signed, "filename");
        if signed_url.is_empty() || filename.is_empty() {
            return Err(ApiError::Decode(
                "signed upload response is missing signed-url or filename".to_string(),
            ));
        }

        let request_id = next_request_id();
        almanack_debug!("[{}] PUT {} ({} bytes)", request_id, filename, body.len());
        let response = self
            .http
            .put(signed_url.as_str())
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            let bytes = response.bytes().await.unwrap_or_default();
            almanack_warn!("[{}] upload rejected: {}", request_id, status);
            return Err(unexpected_response(status, &bytes));
        }

        self.update_image(&filename, "", "").await?;
        Ok(filename)
    }

    /// Validates and submits an edit buffer.
    ///
    /// Validation failures never reach the network. Whatever the outcome,
    /// the session reflects it: the canonical server copy on success, the
    /// error (with edits intact) on failure.
    pub async fn save<M: SaveTarget>(
        &self,
        session: &mut EditSession<M>,
        intent: SaveIntent,
    ) -> Result<(), ApiError> {
        let body = session.begin_save(intent)?;
        let result = self.post_json(M::ENDPOINT, &body).await;
        session.finish_save(result)
    }
}

fn unexpected_response(status: StatusCode, body: &[u8]) -> ApiError {
    let name = match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    };
    let details = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| match value.get("details") {
            Some(Value::Object(details)) => Some(details.clone()),
            _ => None,
        })
        .unwrap_or_else(Map::new);
    ApiError::UnexpectedResponse { name, details }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    let kind = if err.is_timeout() {
        TransportKind::Timeout
    } else if err.is_connect() {
        TransportKind::Connect
    } else {
        TransportKind::Other
    };
    ApiError::transport(kind, err.to_string())
}
