//! # Console Errors

use crate::config::ConfigError;
use crate::shell::CommandError;
use resource_sync::{RemoteError, SyncError};

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Sync(#[from] SyncError),
    #[error("HTTP client setup failed: {0}")]
    Client(#[from] RemoteError),
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Synchronizer task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
