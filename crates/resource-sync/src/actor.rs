//! # Synchronizer Actor
//!
//! `SyncActor<T>` owns a [`Synchronizer<T>`] inside one Tokio task and processes
//! [`SyncRequest`]s strictly one at a time.
//!
//! **Concurrency Model**:
//! All requests for one resource type share a single mailbox, so a submit, a delete and
//! a reload issued back to back run in issue order and never interleave. A load can
//! therefore never be overwritten by an older one. Different resource types run in
//! different actors and proceed in parallel.
//!
//! ```rust,ignore
//! let (actor, client) = SyncActor::<Warehouse>::new(32, Box::new(collection), SyncOptions::default());
//! tokio::spawn(actor.run());
//! client.load().await?;
//! ```

use crate::client::SyncClient;
use crate::message::SyncRequest;
use crate::record::Record;
use crate::remote::RemoteCollection;
use crate::synchronizer::{SyncOptions, Synchronizer};
use tokio::sync::mpsc;
use tracing::info;

pub struct SyncActor<T: Record> {
    receiver: mpsc::Receiver<SyncRequest<T>>,
    sync: Synchronizer<T>,
}

impl<T: Record> SyncActor<T> {
    /// Creates the actor and its client.
    ///
    /// * `buffer_size` - mailbox capacity; callers wait when it is full.
    pub fn new(
        buffer_size: usize,
        remote: Box<dyn RemoteCollection<T>>,
        options: SyncOptions,
    ) -> (Self, SyncClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            sync: Synchronizer::new(remote, options),
        };
        (actor, SyncClient::new(sender))
    }

    /// Runs the message loop until every client is dropped.
    pub async fn run(mut self) {
        let resource = T::RESOURCE;
        info!(resource, "Synchronizer started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SyncRequest::Load { respond_to } => {
                    let _ = respond_to.send(self.sync.load().await);
                }
                SyncRequest::BeginCreate { respond_to } => {
                    self.sync.begin_create();
                    let _ = respond_to.send(Ok(()));
                }
                SyncRequest::BeginEdit { record, respond_to } => {
                    let _ = respond_to.send(self.sync.begin_edit(record));
                }
                SyncRequest::BeginEditId { id, respond_to } => {
                    let _ = respond_to.send(self.sync.begin_edit_id(id));
                }
                SyncRequest::UpdateField {
                    field,
                    raw,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.sync.update_field(&field, &raw));
                }
                SyncRequest::Submit { respond_to } => {
                    let _ = respond_to.send(self.sync.submit().await);
                }
                SyncRequest::Remove { id, respond_to } => {
                    let _ = respond_to.send(self.sync.remove(id).await);
                }
                SyncRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.sync.view()));
                }
            }
        }

        info!(resource, size = self.sync.mirror().len(), "Shutdown");
    }
}
