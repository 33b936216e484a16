use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::info;

use crate::destination::base::UserDirectory;
use crate::error::{ErrorKind, SyncResult};
use crate::types::{DirectoryUser, FieldMap};
use crate::{bail, sync_error};

#[derive(Debug, Default)]
struct Inner {
    users: Vec<DirectoryUser>,
    created: Vec<FieldMap>,
    updated: Vec<FieldMap>,
    next_id: u64,
    fail_create_keys: HashSet<String>,
    fail_update_ids: HashSet<u64>,
    fail_listing: bool,
    fail_end_session: bool,
    session_ended: bool,
}

/// In-memory user directory for testing and development purposes.
///
/// Stores the directory state in memory and records every create and update
/// payload it receives, so tests can assert on exactly what a run would have
/// sent. Individual operations can be made to fail to exercise the
/// per-record and teardown error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryDirectory {
    /// Creates an empty memory directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a memory directory pre-populated with the given users.
    pub fn with_users(users: Vec<DirectoryUser>) -> Self {
        let inner = Inner {
            next_id: 1 + users.iter().filter_map(|user| user.id).max().unwrap_or(0),
            users,
            ..Default::default()
        };

        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Returns every create payload received so far.
    pub async fn created(&self) -> Vec<FieldMap> {
        self.inner.lock().await.created.clone()
    }

    /// Returns every update payload received so far.
    pub async fn updated(&self) -> Vec<FieldMap> {
        self.inner.lock().await.updated.clone()
    }

    /// Returns whether the session has been ended.
    pub async fn session_ended(&self) -> bool {
        self.inner.lock().await.session_ended
    }

    /// Makes creation fail for payloads whose `registration_number` is `key`.
    pub async fn fail_create_for(&self, key: &str) {
        self.inner
            .lock()
            .await
            .fail_create_keys
            .insert(key.to_string());
    }

    /// Makes updates fail for payloads addressed to the user `id`.
    pub async fn fail_update_for(&self, id: u64) {
        self.inner.lock().await.fail_update_ids.insert(id);
    }

    /// Makes the next listing call fail.
    pub async fn fail_listing(&self) {
        self.inner.lock().await.fail_listing = true;
    }

    /// Makes session teardown fail.
    pub async fn fail_end_session(&self) {
        self.inner.lock().await.fail_end_session = true;
    }
}

impl UserDirectory for MemoryDirectory {
    fn name() -> &'static str {
        "memory"
    }

    async fn list_users(&self) -> SyncResult<Vec<DirectoryUser>> {
        let inner = self.inner.lock().await;

        if inner.fail_listing {
            bail!(
                ErrorKind::DestinationOperationFailed,
                "User listing failed",
                "injected failure"
            );
        }

        Ok(inner.users.clone())
    }

    async fn create_user(&self, payload: FieldMap) -> SyncResult<u64> {
        let mut inner = self.inner.lock().await;

        if let Some(Value::String(key)) = payload.get("registration_number") {
            if inner.fail_create_keys.contains(key) {
                bail!(
                    ErrorKind::DestinationOperationFailed,
                    "User could not be created",
                    format!("injected failure for {key}")
                );
            }
        }

        let id = inner.next_id.max(1);
        inner.next_id = id + 1;

        info!(id, "memory directory storing created user");
        inner.created.push(payload);

        Ok(id)
    }

    async fn update_user(&self, payload: FieldMap) -> SyncResult<()> {
        let mut inner = self.inner.lock().await;

        let target = payload.get("id").and_then(Value::as_u64);
        if let Some(id) = target {
            if inner.fail_update_ids.contains(&id) {
                bail!(
                    ErrorKind::DestinationOperationFailed,
                    "User could not be updated",
                    format!("injected failure for id {id}")
                );
            }
        } else {
            return Err(sync_error!(
                ErrorKind::InvalidData,
                "Update payload is missing the user id"
            ));
        }

        info!(id = target, "memory directory storing update");
        inner.updated.push(payload);

        Ok(())
    }

    async fn end_session(&self) -> SyncResult<()> {
        let mut inner = self.inner.lock().await;

        inner.session_ended = true;

        if inner.fail_end_session {
            bail!(
                ErrorKind::DestinationSessionFailed,
                "Session teardown failed",
                "injected failure"
            );
        }

        Ok(())
    }
}
