//! # Synchronizer Messages
//!
//! Requests sent from a [`SyncClient`](crate::SyncClient) to its
//! [`SyncActor`](crate::SyncActor). Each carries a one-shot channel for the reply.

use crate::error::SyncError;
use crate::record::Record;
use crate::synchronizer::{Submitted, SyncView};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, SyncError>>;

/// One synchronizer operation. The variants map one to one onto
/// [`Synchronizer`](crate::Synchronizer) methods, plus `Snapshot` for renderers.
#[derive(Debug)]
pub enum SyncRequest<T: Record> {
    Load {
        respond_to: Response<usize>,
    },
    BeginCreate {
        respond_to: Response<()>,
    },
    BeginEdit {
        record: T,
        respond_to: Response<()>,
    },
    BeginEditId {
        id: T::Id,
        respond_to: Response<()>,
    },
    UpdateField {
        field: String,
        raw: String,
        respond_to: Response<()>,
    },
    Submit {
        respond_to: Response<Submitted<T>>,
    },
    Remove {
        id: T::Id,
        respond_to: Response<()>,
    },
    Snapshot {
        respond_to: Response<SyncView<T>>,
    },
}
