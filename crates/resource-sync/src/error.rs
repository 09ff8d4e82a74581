//! # Synchronizer Errors
//!
//! Every synchronizer operation returns `Result<_, SyncError>`. Failures are also
//! logged by the synchronizer itself, so callers may ignore them and still leave a
//! trace for the operator.

use crate::binder::BindError;
use crate::record::Violation;
use crate::remote::RemoteError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyncError {
    #[error("Synchronizer closed")]
    ActorClosed,
    #[error("Synchronizer dropped response channel")]
    ActorDropped,
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Bind(#[from] BindError),
    #[error("Record not in mirror: {0}")]
    NotFound(String),
    #[error("Record has no server-assigned identity")]
    MissingIdentity,
    #[error("Draft failed validation: {}", list(.0))]
    Invalid(Vec<Violation>),
}

impl SyncError {
    /// Whether the operator can reasonably try the same operation again.
    pub fn is_retryable(&self) -> bool {
        match self {
            SyncError::Remote(e) => e.is_retryable(),
            _ => false,
        }
    }
}

fn list(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
