/// Outcome counters for one reconciliation run.
///
/// Accumulated by the pipeline and returned to the caller; nothing is
/// persisted between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Users created in the destination (or counted as such in dry-run).
    pub created: u64,
    /// Users updated in the destination (or counted as such in dry-run).
    pub updated: u64,
    /// Reserved; deactivations clear `is_active` and are counted as updates.
    pub disabled: u64,
    /// Employees whose destination record already matched.
    pub skipped: u64,
    /// Per-record failures, plus exactly one increment when a run aborts.
    pub errors: u64,
}
