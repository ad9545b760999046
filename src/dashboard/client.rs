//! # API Client
//!
//! HTTP client for the dashboard API. One method per endpoint; no retries.

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// API location used when none is given
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Result type for client calls
pub type ClientResult<T> = Result<T, ClientError>;

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Dashboard API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: Client,
}

impl ApiClient {
    /// Create a client for the API at `base_url`
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base =
            Url::parse(base_url).map_err(|_| ClientError::InvalidBaseUrl(base_url.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            base,
            http: Client::new(),
        })
    }

    /// Build an endpoint URL; each segment is percent-encoded
    pub fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        Ok(response.error_for_status()?.json::<T>().await?)
    }

    /// `GET /collections`
    pub async fn list_collections(&self) -> ClientResult<Vec<String>> {
        let url = self.endpoint(&["collections"])?;
        Self::read(self.http.get(url).send().await?).await
    }

    /// `GET /data/:collection`
    pub async fn fetch_documents(&self, collection: &str) -> ClientResult<Vec<Value>> {
        let url = self.endpoint(&["data", collection])?;
        Self::read(self.http.get(url).send().await?).await
    }

    /// `POST /data/:collection`
    pub async fn insert_document(&self, collection: &str, document: &Value) -> ClientResult<Value> {
        let url = self.endpoint(&["data", collection])?;
        Self::read(self.http.post(url).json(document).send().await?).await
    }

    /// `PUT /data/:collection/:id`
    ///
    /// `Value::Null` when no document had that id.
    pub async fn replace_document(
        &self,
        collection: &str,
        id: &str,
        document: &Value,
    ) -> ClientResult<Value> {
        let url = self.endpoint(&["data", collection, id])?;
        Self::read(self.http.put(url).json(document).send().await?).await
    }

    /// `DELETE /data/:collection/:id`
    pub async fn delete_document(&self, collection: &str, id: &str) -> ClientResult<()> {
        let url = self.endpoint(&["data", collection, id])?;
        self.http.delete(url).send().await?.error_for_status()?;
        Ok(())
    }

    /// `DELETE /collection/:collection`
    pub async fn drop_collection(&self, collection: &str) -> ClientResult<()> {
        let url = self.endpoint(&["collection", collection])?;
        self.http.delete(url).send().await?.error_for_status()?;
        Ok(())
    }
}
