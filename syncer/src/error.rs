use std::error::Error;

use sync::error::SyncError;
use thiserror::Error as ThisError;

/// Result type for syncer operations.
pub type SyncerResult<T> = Result<T, SyncerError>;

/// Error type for the syncer service.
///
/// Wraps [`SyncError`] for pipeline errors and provides variants for
/// infrastructure failures around it. Returned from `main`, so any variant
/// terminates the process with a non-zero status.
#[derive(Debug, ThisError)]
pub enum SyncerError {
    /// Sync pipeline or collaborator error.
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Configuration loading or validation error.
    #[error("configuration error: {0}")]
    Config(#[source] Box<dyn Error + Send + Sync>),

    /// I/O error, e.g. while building the runtime.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyncerError {
    /// Creates a configuration error from any boxed source.
    pub fn config<E: Error + Send + Sync + 'static>(err: E) -> Self {
        SyncerError::Config(Box::new(err))
    }
}
