//! # PageClient Trait
//!
//! Common interface for the page clients, with default methods built on top of a
//! generic `SyncClient`.
use async_trait::async_trait;
use resource_sync::{Record, Submitted, SyncClient, SyncError, SyncView};

/// Trait for page clients to inherit the standard synchronizer operations.
///
/// Implementors only supply [`inner`](PageClient::inner); a page with extra
/// dependencies (the product page needs categories) overrides the methods it has to.
#[async_trait]
pub trait PageClient<T: Record>: Send + Sync {
    /// Access the inner generic SyncClient.
    fn inner(&self) -> &SyncClient<T>;

    /// Refetch the page's mirror.
    #[tracing::instrument(skip(self), fields(resource = T::RESOURCE))]
    async fn load(&self) -> Result<usize, SyncError> {
        tracing::debug!("Sending request");
        self.inner().load().await
    }

    #[tracing::instrument(skip(self), fields(resource = T::RESOURCE))]
    async fn begin_create(&self) -> Result<(), SyncError> {
        self.inner().begin_create().await
    }

    #[tracing::instrument(skip(self), fields(resource = T::RESOURCE))]
    async fn begin_edit(&self, record: T) -> Result<(), SyncError> {
        self.inner().begin_edit(record).await
    }

    /// Open the form on the mirrored row with this identity.
    #[tracing::instrument(skip(self), fields(resource = T::RESOURCE))]
    async fn begin_edit_id(&self, id: T::Id) -> Result<(), SyncError> {
        self.inner().begin_edit_id(id).await
    }

    #[tracing::instrument(skip(self), fields(resource = T::RESOURCE))]
    async fn set_field(&self, field: String, value: String) -> Result<(), SyncError> {
        self.inner().update_field(field, value).await
    }

    #[tracing::instrument(skip(self), fields(resource = T::RESOURCE))]
    async fn submit(&self) -> Result<Submitted<T>, SyncError> {
        tracing::debug!("Sending request");
        self.inner().submit().await
    }

    #[tracing::instrument(skip(self), fields(resource = T::RESOURCE))]
    async fn remove(&self, id: T::Id) -> Result<(), SyncError> {
        tracing::debug!("Sending request");
        self.inner().remove(id).await
    }

    async fn snapshot(&self) -> Result<SyncView<T>, SyncError> {
        self.inner().snapshot().await
    }
}
