//! Error types and result definitions for sync operations.
//!
//! Provides a classified error system with captured diagnostic metadata.
//! [`SyncError`] carries an [`ErrorKind`] for dispatch decisions (fatal vs
//! per-record), a static description, optional dynamic detail, an optional
//! source error, and the callsite location.

use std::borrow::Cow;
use std::error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Convenient result type for sync operations using [`SyncError`] as the error type.
pub type SyncResult<T> = Result<T, SyncError>;

/// Main error type for sync operations.
#[derive(Debug, Clone)]
pub struct SyncError {
    kind: ErrorKind,
    description: Cow<'static, str>,
    detail: Option<Cow<'static, str>>,
    source: Option<Arc<dyn error::Error + Send + Sync>>,
    location: &'static Location<'static>,
}

/// Specific categories of errors that can occur during a sync run.
///
/// The kind determines how the orchestrator reacts: configuration and
/// connection kinds abort the run, destination operation failures stay within
/// the per-record boundary, and session teardown failures are only warned
/// about.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    // Configuration errors
    ConfigError,
    ValidationError,
    MappingInvalid,

    // Connection errors
    SourceConnectionFailed,
    DestinationConnectionFailed,
    AuthenticationError,

    // Query & execution errors
    SourceQueryFailed,
    DestinationOperationFailed,
    DestinationSessionFailed,

    // Data errors
    InvalidData,

    // IO & serialization errors
    IoError,
    SerializationError,
    DeserializationError,

    // Unknown / uncategorized
    Unknown,
}

impl SyncError {
    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the detailed error information if available.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Returns the captured callsite location for this error.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Attaches an originating [`error::Error`] to this error and returns the modified instance.
    ///
    /// The stored source is preserved across clones and exposed via [`error::Error::source`].
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: error::Error + Send + Sync + 'static,
    {
        self.source = Some(Arc::new(source));
        self
    }

    /// Creates a [`SyncError`] from its components.
    #[track_caller]
    fn from_components(
        kind: ErrorKind,
        description: Cow<'static, str>,
        detail: Option<Cow<'static, str>>,
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    ) -> Self {
        SyncError {
            kind,
            description,
            detail,
            source,
            location: Location::caller(),
        }
    }
}

impl PartialEq for SyncError {
    fn eq(&self, other: &SyncError) -> bool {
        self.kind == other.kind
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "[{:?}] {} @ {}:{}:{}",
            self.kind,
            self.description,
            self.location.file(),
            self.location.line(),
            self.location.column()
        )?;

        if let Some(detail) = self.detail.as_deref() {
            write!(f, " ({detail})")?;
        }

        Ok(())
    }
}

impl error::Error for SyncError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|source| source as &(dyn error::Error + 'static))
    }
}

/// Creates a [`SyncError`] from an error kind and static description.
impl From<(ErrorKind, &'static str)> for SyncError {
    #[track_caller]
    fn from((kind, desc): (ErrorKind, &'static str)) -> SyncError {
        SyncError::from_components(kind, Cow::Borrowed(desc), None, None)
    }
}

/// Creates a [`SyncError`] from an error kind, static description, and dynamic detail.
impl<D> From<(ErrorKind, &'static str, D)> for SyncError
where
    D: Into<Cow<'static, str>>,
{
    #[track_caller]
    fn from((kind, desc, detail): (ErrorKind, &'static str, D)) -> SyncError {
        SyncError::from_components(kind, Cow::Borrowed(desc), Some(detail.into()), None)
    }
}

/// Converts [`std::io::Error`] to [`SyncError`] with [`ErrorKind::IoError`].
impl From<std::io::Error> for SyncError {
    #[track_caller]
    fn from(err: std::io::Error) -> SyncError {
        let detail = err.to_string();
        SyncError::from_components(
            ErrorKind::IoError,
            Cow::Borrowed("I/O operation failed"),
            Some(Cow::Owned(detail)),
            Some(Arc::new(err)),
        )
    }
}

/// Converts [`serde_json::Error`] to [`SyncError`] with the appropriate error kind.
impl From<serde_json::Error> for SyncError {
    #[track_caller]
    fn from(err: serde_json::Error) -> SyncError {
        let kind = match err.classify() {
            serde_json::error::Category::Io => ErrorKind::IoError,
            _ => ErrorKind::DeserializationError,
        };

        let detail = err.to_string();
        SyncError::from_components(
            kind,
            Cow::Borrowed("JSON handling failed"),
            Some(Cow::Owned(detail)),
            Some(Arc::new(err)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync_error;

    #[test]
    fn errors_compare_by_kind() {
        let a = sync_error!(ErrorKind::MappingInvalid, "Field mapping is empty");
        let b = sync_error!(
            ErrorKind::MappingInvalid,
            "Field mapping is empty",
            "other detail"
        );

        assert_eq!(a, b);
        assert_eq!(a.kind(), ErrorKind::MappingInvalid);
    }

    #[test]
    fn display_includes_description_and_detail() {
        let err = sync_error!(
            ErrorKind::SourceQueryFailed,
            "Roster query failed",
            "column 3"
        );
        let rendered = err.to_string();

        assert!(rendered.contains("SourceQueryFailed"));
        assert!(rendered.contains("Roster query failed"));
        assert!(rendered.contains("column 3"));
    }

    #[test]
    fn source_errors_are_exposed() {
        let io = std::io::Error::other("disk gone");
        let err = sync_error!(ErrorKind::IoError, "I/O operation failed", source: io);

        assert!(std::error::Error::source(&err).is_some());
    }
}
