//! Google Drive v3 implementation of [`RemoteStore`]

use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use serde::Deserialize;
use url::Url;

use crate::config::HttpConfig;
use crate::error::{Error, Result};
use crate::session::Session;
use crate::types::{ExportFormat, ItemId, RemoteItem};

use super::{ItemContent, ListPage, RemoteStore};

/// Field projection requested from the listing endpoint
const LIST_FIELDS: &str = "nextPageToken, files(id, name, mimeType)";

/// Drive API client
///
/// Listing and token requests are bounded by the configured request timeout;
/// content streams are not, since a large transfer may legitimately run
/// longer.
pub struct DriveStore {
    http: reqwest::Client,
    base_url: String,
    request_timeout: std::time::Duration,
    session: Arc<Session>,
}

/// Wire shape of one listing response
#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

/// Wire shape of one file entry
#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
    name: String,
    #[serde(rename = "mimeType", default)]
    mime_type: String,
}

impl DriveStore {
    /// Create a Drive client over an authenticated session
    pub fn new(http_config: &HttpConfig, session: Arc<Session>) -> Result<Self> {
        // Validate the base URL up front so a bad config fails at setup, not
        // on the first page fetch
        Url::parse(&http_config.base_url)?;

        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            base_url: http_config.base_url.trim_end_matches('/').to_string(),
            request_timeout: http_config.request_timeout,
            session,
        })
    }

    /// Turn a non-success response into an [`Error::Api`]
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::Api {
            status: status.as_u16(),
            body,
        })
    }

    /// Open a chunked content stream from a GET request
    async fn open_stream(&self, request: reqwest::RequestBuilder) -> Result<ItemContent> {
        let token = self.session.bearer_token().await?;
        let response = request.bearer_auth(token).send().await?;
        let response = Self::check_status(response).await?;

        let len = response.content_length();
        let stream = response.bytes_stream().map_err(Error::from);
        Ok(ItemContent::new(len, Box::pin(stream)))
    }
}

#[async_trait]
impl RemoteStore for DriveStore {
    async fn next_page(&self, page_token: Option<&str>, page_size: usize) -> Result<ListPage> {
        let token = self.session.bearer_token().await?;

        let mut request = self
            .http
            .get(format!("{}/files", self.base_url))
            .timeout(self.request_timeout)
            .bearer_auth(token)
            .query(&[("pageSize", page_size.to_string())])
            .query(&[("fields", LIST_FIELDS)]);
        if let Some(page_token) = page_token {
            request = request.query(&[("pageToken", page_token)]);
        }

        let response = Self::check_status(request.send().await?).await?;
        let list: DriveFileList = response.json().await?;

        tracing::debug!(
            items = list.files.len(),
            has_next = list.next_page_token.is_some(),
            "fetched listing page"
        );

        Ok(ListPage {
            items: list
                .files
                .into_iter()
                .map(|f| RemoteItem {
                    id: ItemId::new(f.id),
                    name: f.name,
                    content_type: f.mime_type,
                })
                .collect(),
            next_page_token: list.next_page_token,
        })
    }

    async fn open_content(&self, id: &str) -> Result<ItemContent> {
        let request = self
            .http
            .get(format!("{}/files/{}", self.base_url, id))
            .query(&[("alt", "media")]);
        self.open_stream(request).await
    }

    async fn open_export(&self, id: &str, format: ExportFormat) -> Result<ItemContent> {
        let request = self
            .http
            .get(format!("{}/files/{}/export", self.base_url, id))
            .query(&[("mimeType", format.mime_type())]);
        self.open_stream(request).await
    }
}
