//! Index acquisition boundary.
//!
//! The store only knows [`IndexSource`]; the one real implementation fetches
//! a JSON array from a fixed endpoint. Tests substitute in-memory sources.

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::models::Document;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("index request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("index payload malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Producer of the document index, fetched as a single atomic unit.
#[async_trait]
pub trait IndexSource: Send + Sync {
    async fn fetch_index(&self) -> SourceResult<Vec<Document>>;
}

/// Fetches the index over HTTP: one GET with an explicit JSON accept
/// header. A non-success status is an error like any transport failure; the
/// store turns all of them into the empty index.
pub struct HttpIndexSource {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpIndexSource {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    pub fn with_client(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl IndexSource for HttpIndexSource {
    async fn fetch_index(&self) -> SourceResult<Vec<Document>> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?;
        let body = response.bytes().await?;
        let docs = serde_json::from_slice(&body)?;
        Ok(docs)
    }
}
