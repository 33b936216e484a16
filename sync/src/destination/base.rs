use std::future::Future;

use crate::error::SyncResult;
use crate::types::{DirectoryUser, FieldMap};

/// Trait for the remote user directory the roster is reconciled against.
///
/// Mirrors the REST operations the sync needs: a full listing, payload-based
/// create and update calls, and explicit session teardown. Create and update
/// failures are per-record and must not poison the session; the orchestrator
/// continues with the next employee.
pub trait UserDirectory {
    /// Returns the name of the directory.
    fn name() -> &'static str;

    /// Lists every user record in the directory.
    fn list_users(&self) -> impl Future<Output = SyncResult<Vec<DirectoryUser>>> + Send;

    /// Creates a user from a full payload and returns the assigned id.
    fn create_user(&self, payload: FieldMap) -> impl Future<Output = SyncResult<u64>> + Send;

    /// Applies an update payload; the payload carries the target user id.
    fn update_user(&self, payload: FieldMap) -> impl Future<Output = SyncResult<()>> + Send;

    /// Ends the directory session.
    ///
    /// Called on every exit path of a run, including after fatal errors.
    /// Failures are reported as warnings and never change the run outcome.
    fn end_session(&self) -> impl Future<Output = SyncResult<()>> + Send;
}
