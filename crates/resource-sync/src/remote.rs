//! # Remote Collection
//!
//! The seam between a [`Synchronizer`](crate::Synchronizer) and the server. One
//! implementation talks HTTP ([`HttpCollection`](crate::HttpCollection)); tests use
//! [`MockCollection`](crate::mock::MockCollection).

use crate::record::Record;
use async_trait::async_trait;

/// Errors from a remote collection call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RemoteError {
    /// The request never got a response (connection refused, DNS, timeout, ...).
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("Remote rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// The server answered with a body that is not what the operation expects.
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl RemoteError {
    /// Whether resubmitting the same request could succeed. Transport failures and
    /// rejections are retried by the operator; a body we cannot read will not improve.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, RemoteError::Decode(_))
    }
}

/// List/create/update/delete for one collection of records.
#[async_trait]
pub trait RemoteCollection<T: Record>: Send + Sync {
    /// `GET /{resource}`
    async fn list(&self) -> Result<Vec<T>, RemoteError>;

    /// `POST /{resource}`; returns the record with its server-assigned identity.
    async fn create(&self, record: &T) -> Result<T, RemoteError>;

    /// `PUT /{resource}/{id}`; returns the updated record when the server echoes one,
    /// `None` for a bare acknowledgement.
    async fn update(&self, id: T::Id, record: &T) -> Result<Option<T>, RemoteError>;

    /// `DELETE /{resource}/{id}`
    async fn delete(&self, id: T::Id) -> Result<(), RemoteError>;
}
