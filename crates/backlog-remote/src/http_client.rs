//! JSON-over-HTTP implementation of [`BacklogApi`].
//!
//! Endpoints, relative to the configured base URL:
//! - `GET backlog?search=&priority=` list items
//! - `POST backlog` create an item
//! - `PATCH backlog/{id}` update an item
//! - `DELETE backlog/{id}` delete an item
//! - `PUT backlog/reorder` persist a full ordering
//! - `POST backlog/convert` move items to an existing or weekly board
//! - `GET boards/mine?limit=` boards for the picker

use async_trait::async_trait;
use backlog_core::{AppConfig, BacklogError, BacklogResult};
use backlog_domain::{
    BacklogItem, BoardSummary, ConvertRequest, ConvertResponse, DataResponse, ItemPosition,
    ItemQuery, ItemUpdate, ListResponse, NewBacklogItem, ReorderRequest,
};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::traits::BacklogApi;

/// Header carrying a per-request id, for matching client and server logs.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

const MAX_ERROR_BODY_CHARS: usize = 200;

/// Error body shape: `{"message": ...}` or `{"error": ...}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Acknowledgement body for calls that return no data.
#[derive(Debug, Deserialize)]
struct Ack {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

fn default_success() -> bool {
    true
}

#[derive(Clone)]
pub struct HttpBacklogApi {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl fmt::Debug for HttpBacklogApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpBacklogApi")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl HttpBacklogApi {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> BacklogResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            BacklogError::Configuration(format!("invalid API base URL '{}': {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(BacklogError::Configuration(format!(
                "'{}' cannot be used as an API base URL",
                base_url
            )));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BacklogError::Configuration(format!("HTTP client setup failed: {}", e)))?;
        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    pub fn from_config(config: &AppConfig) -> BacklogResult<Self> {
        Self::new(
            config.effective_api_base_url(),
            config.api_token.clone(),
            config.effective_request_timeout(),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with path segments appended. Segments are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> BacklogResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                BacklogError::Configuration(format!(
                    "'{}' cannot be used as an API base URL",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request_id = Uuid::new_v4();
        debug!(%request_id, %method, %url, "Sending backlog API request");
        let builder = self
            .client
            .request(method, url)
            .header(REQUEST_ID_HEADER, request_id.to_string());
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and map transport errors and non-2xx statuses.
    async fn execute(&self, builder: RequestBuilder) -> BacklogResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| BacklogError::Connection(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        warn!(
            "Backlog API returned {}: {}",
            status,
            message.as_deref().unwrap_or("<no body>")
        );
        Err(BacklogError::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> BacklogResult<T> {
        let response = self.execute(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| BacklogError::Serialization(format!("unexpected response body: {}", e)))
    }

    async fn send_ack(&self, builder: RequestBuilder) -> BacklogResult<()> {
        let response = self.execute(builder).await?;
        let body = response
            .text()
            .await
            .map_err(|e| BacklogError::Connection(e.to_string()))?;
        if body.trim().is_empty() {
            return Ok(());
        }
        match serde_json::from_str::<Ack>(&body) {
            Ok(ack) if !ack.success => Err(BacklogError::Rejected {
                message: ack.message,
            }),
            Ok(_) => Ok(()),
            Err(_) => {
                debug!("Ignoring non-JSON acknowledgement body");
                Ok(())
            }
        }
    }

    fn unwrap_data(response: DataResponse<BacklogItem>) -> BacklogResult<BacklogItem> {
        match response {
            DataResponse {
                success: true,
                data: Some(item),
                ..
            } => Ok(item),
            DataResponse { message, .. } => Err(BacklogError::Rejected { message }),
        }
    }

    fn unwrap_list<T>(response: ListResponse<T>) -> BacklogResult<Vec<T>> {
        if response.success {
            Ok(response.data)
        } else {
            Err(BacklogError::Rejected {
                message: response.message,
            })
        }
    }
}

#[async_trait]
impl BacklogApi for HttpBacklogApi {
    async fn list_backlog_items(&self, query: &ItemQuery) -> BacklogResult<Vec<BacklogItem>> {
        let url = self.endpoint(&["backlog"])?;
        let response: ListResponse<BacklogItem> =
            self.send_json(self.request(Method::GET, url).query(query)).await?;
        Self::unwrap_list(response)
    }

    async fn create_backlog_item(&self, item: NewBacklogItem) -> BacklogResult<BacklogItem> {
        let url = self.endpoint(&["backlog"])?;
        let response = self
            .send_json(self.request(Method::POST, url).json(&item))
            .await?;
        Self::unwrap_data(response)
    }

    async fn update_backlog_item(
        &self,
        id: &str,
        update: ItemUpdate,
    ) -> BacklogResult<BacklogItem> {
        let url = self.endpoint(&["backlog", id])?;
        let response = self
            .send_json(self.request(Method::PATCH, url).json(&update))
            .await?;
        Self::unwrap_data(response)
    }

    async fn delete_backlog_item(&self, id: &str) -> BacklogResult<()> {
        let url = self.endpoint(&["backlog", id])?;
        self.send_ack(self.request(Method::DELETE, url)).await
    }

    async fn reorder_backlog_items(&self, items: Vec<ItemPosition>) -> BacklogResult<()> {
        let url = self.endpoint(&["backlog", "reorder"])?;
        let body = ReorderRequest { items };
        self.send_ack(self.request(Method::PUT, url).json(&body))
            .await
    }

    async fn convert_backlog_items_to_board(
        &self,
        request: ConvertRequest,
    ) -> BacklogResult<ConvertResponse> {
        let url = self.endpoint(&["backlog", "convert"])?;
        self.send_json(self.request(Method::POST, url).json(&request))
            .await
    }

    async fn fetch_my_boards(&self, limit: u32) -> BacklogResult<Vec<BoardSummary>> {
        let url = self.endpoint(&["boards", "mine"])?;
        let response: ListResponse<BoardSummary> = self
            .send_json(self.request(Method::GET, url).query(&[("limit", limit)]))
            .await?;
        Self::unwrap_list(response)
    }
}

/// Pull a human-readable message out of an error response body.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(trimmed) {
        return parsed.message.or(parsed.error);
    }
    Some(trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect())
}
