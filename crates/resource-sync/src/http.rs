//! # HTTP Collection
//!
//! [`RemoteCollection`] over a JSON REST API using [`reqwest`]. The collection lives at
//! `{base_url}/{T::RESOURCE}` and single records at `{base_url}/{T::RESOURCE}/{id}`.

use crate::record::Record;
use crate::remote::{RemoteCollection, RemoteError};
use async_trait::async_trait;
use std::marker::PhantomData;
use std::time::Duration;

/// HTTP client for one remote collection.
pub struct HttpCollection<T> {
    client: reqwest::Client,
    base_url: String,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for HttpCollection<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            _record: PhantomData,
        }
    }
}

impl<T: Record> HttpCollection<T> {
    /// Create a collection client with its own connection pool.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a collection client reusing an existing [`reqwest::Client`], so the three
    /// console pages can share one connection pool.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            _record: PhantomData,
        }
    }

    pub fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, T::RESOURCE)
    }

    pub fn record_url(&self, id: T::Id) -> String {
        format!("{}/{}/{}", self.base_url, T::RESOURCE, id)
    }

    // ---- private helpers ----

    /// Turns a non-2xx status into [`RemoteError::Rejected`] carrying the body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(RemoteError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<R: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<R, RemoteError> {
        let response = Self::ensure_success(response).await?;
        response
            .json::<R>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

/// Builds a shared [`reqwest::Client`], optionally with a request timeout.
pub fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client, RemoteError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(transport)
}

fn transport(e: reqwest::Error) -> RemoteError {
    RemoteError::Transport(e.to_string())
}

#[async_trait]
impl<T: Record> RemoteCollection<T> for HttpCollection<T> {
    async fn list(&self) -> Result<Vec<T>, RemoteError> {
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(transport)?;
        Self::parse_response(response).await
    }

    async fn create(&self, record: &T) -> Result<T, RemoteError> {
        let response = self
            .client
            .post(self.collection_url())
            .json(record)
            .send()
            .await
            .map_err(transport)?;
        Self::parse_response(response).await
    }

    async fn update(&self, id: T::Id, record: &T) -> Result<Option<T>, RemoteError> {
        let response = self
            .client
            .put(self.record_url(id))
            .json(record)
            .send()
            .await
            .map_err(transport)?;
        let response = Self::ensure_success(response).await?;
        let body = response.text().await.map_err(transport)?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        // Any 2xx counts; only a body that reads as an identified record is handed back.
        Ok(serde_json::from_str::<T>(&body)
            .ok()
            .filter(|record| record.id().is_some()))
    }

    async fn delete(&self, id: T::Id) -> Result<(), RemoteError> {
        let response = self
            .client
            .delete(self.record_url(id))
            .send()
            .await
            .map_err(transport)?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}
