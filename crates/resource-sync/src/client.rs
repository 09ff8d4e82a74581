//! # Synchronizer Client
//!
//! `SyncClient<T>` is the cloneable handle to a [`SyncActor<T>`](crate::SyncActor).
//! It only holds a sender, so clones are cheap and can be shared across tasks.

use crate::error::SyncError;
use crate::message::{Response, SyncRequest};
use crate::record::Record;
use crate::synchronizer::{Submitted, SyncView};
use tokio::sync::{mpsc, oneshot};

pub struct SyncClient<T: Record> {
    sender: mpsc::Sender<SyncRequest<T>>,
}

impl<T: Record> Clone for SyncClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Record> SyncClient<T> {
    pub fn new(sender: mpsc::Sender<SyncRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> SyncRequest<T>,
    ) -> Result<R, SyncError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| SyncError::ActorClosed)?;
        response.await.map_err(|_| SyncError::ActorDropped)?
    }

    /// Refetches the mirror; returns its new size.
    pub async fn load(&self) -> Result<usize, SyncError> {
        self.request(|respond_to| SyncRequest::Load { respond_to }).await
    }

    pub async fn begin_create(&self) -> Result<(), SyncError> {
        self.request(|respond_to| SyncRequest::BeginCreate { respond_to }).await
    }

    pub async fn begin_edit(&self, record: T) -> Result<(), SyncError> {
        self.request(|respond_to| SyncRequest::BeginEdit { record, respond_to }).await
    }

    pub async fn begin_edit_id(&self, id: T::Id) -> Result<(), SyncError> {
        self.request(|respond_to| SyncRequest::BeginEditId { id, respond_to }).await
    }

    pub async fn update_field(
        &self,
        field: impl Into<String>,
        raw: impl Into<String>,
    ) -> Result<(), SyncError> {
        let (field, raw) = (field.into(), raw.into());
        self.request(|respond_to| SyncRequest::UpdateField {
            field,
            raw,
            respond_to,
        })
        .await
    }

    pub async fn submit(&self) -> Result<Submitted<T>, SyncError> {
        self.request(|respond_to| SyncRequest::Submit { respond_to }).await
    }

    pub async fn remove(&self, id: T::Id) -> Result<(), SyncError> {
        self.request(|respond_to| SyncRequest::Remove { id, respond_to }).await
    }

    pub async fn snapshot(&self) -> Result<SyncView<T>, SyncError> {
        self.request(|respond_to| SyncRequest::Snapshot { respond_to }).await
    }
}
