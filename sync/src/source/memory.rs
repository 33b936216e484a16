use crate::error::{ErrorKind, SyncResult};
use crate::source::base::RosterSource;
use crate::source::rows::{collect_roster, RosterRow};
use crate::types::Roster;

/// In-memory roster source for testing and development purposes.
///
/// Holds raw [`RosterRow`]s and runs them through the same materialization
/// path as the database-backed source, so trimming, key validation, and
/// duplicate handling are exercised identically.
#[derive(Debug, Clone, Default)]
pub struct MemoryRosterSource {
    rows: Vec<RosterRow>,
    fail: bool,
}

impl MemoryRosterSource {
    /// Creates a memory source that will materialize the given rows.
    pub fn new(rows: Vec<RosterRow>) -> Self {
        Self { rows, fail: false }
    }

    /// Creates a memory source whose fetch fails, for fatal-path tests.
    pub fn failing() -> Self {
        Self {
            rows: Vec::new(),
            fail: true,
        }
    }
}

impl RosterSource for MemoryRosterSource {
    fn name() -> &'static str {
        "memory"
    }

    async fn fetch_roster(&self) -> SyncResult<Roster> {
        if self.fail {
            crate::bail!(
                ErrorKind::SourceQueryFailed,
                "Roster query failed",
                "injected failure"
            );
        }

        Ok(collect_roster(self.rows.iter().cloned()))
    }
}
