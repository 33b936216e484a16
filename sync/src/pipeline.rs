use tracing::{error, info, warn};

use crate::destination::UserDirectory;
use crate::error::SyncResult;
use crate::mapping::MappingConfig;
use crate::reconcile::{build_create_payload, compute_changes, UserIndex};
use crate::source::RosterSource;
use crate::types::{DirectoryUser, Employee, SyncReport};

/// The sequential reconciliation run over one roster and one directory.
///
/// Employees are processed strictly in order with no overlapping destination
/// mutations. Per-record failures are counted and the run continues; a
/// failure to read the roster or to list the directory aborts the run with a
/// single error increment. The directory session is ended on every exit path
/// and the summary block is logged regardless of outcome.
#[derive(Debug)]
pub struct SyncPipeline<S, D> {
    source: S,
    directory: D,
    mapping: MappingConfig,
    entities_id: u64,
    dry_run: bool,
}

impl<S, D> SyncPipeline<S, D>
where
    S: RosterSource,
    D: UserDirectory,
{
    /// Creates a pipeline over an already-connected directory.
    pub fn new(
        source: S,
        directory: D,
        mapping: MappingConfig,
        entities_id: u64,
        dry_run: bool,
    ) -> Self {
        Self {
            source,
            directory,
            mapping,
            entities_id,
            dry_run,
        }
    }

    /// Runs the reconciliation and returns the outcome counters.
    ///
    /// Fatal errors propagate to the caller after the session teardown and
    /// the summary log.
    pub async fn run(self) -> SyncResult<SyncReport> {
        info!(
            source = S::name(),
            directory = D::name(),
            dry_run = self.dry_run,
            "===== roster sync started ====="
        );

        let mut report = SyncReport::default();
        let outcome = self.reconcile(&mut report).await;

        if outcome.is_err() {
            report.errors += 1;
        }

        match self.directory.end_session().await {
            Ok(()) => info!("directory session ended"),
            Err(err) => warn!("failed to end the directory session: {err}"),
        }

        self.log_summary(&report);

        outcome.map(|()| report)
    }

    async fn reconcile(&self, report: &mut SyncReport) -> SyncResult<()> {
        let roster = self.source.fetch_roster().await?;

        let users = self.directory.list_users().await?;
        let index = UserIndex::build(users, self.mapping.key_field());

        for (code, employee) in &roster {
            match index.get(code) {
                None => self.create(code, employee, report).await,
                Some(user) => self.update(code, employee, user, report).await,
            }
        }

        Ok(())
    }

    async fn create(&self, code: &str, employee: &Employee, report: &mut SyncReport) {
        let payload = build_create_payload(employee, &self.mapping, self.entities_id);
        info!(payload = ?payload, "[create] user {code}");

        if self.dry_run {
            report.created += 1;
            return;
        }

        match self.directory.create_user(payload).await {
            Ok(id) => {
                info!("[create] user {code} created with id {id}");
                report.created += 1;
            }
            Err(err) => {
                error!("[create] user {code} failed: {err}");
                report.errors += 1;
            }
        }
    }

    async fn update(
        &self,
        code: &str,
        employee: &Employee,
        user: &DirectoryUser,
        report: &mut SyncReport,
    ) {
        let changes = match compute_changes(employee, &self.mapping, user, self.entities_id) {
            Ok(changes) => changes,
            Err(err) => {
                error!("[update] user {code} failed: {err}");
                report.errors += 1;
                return;
            }
        };

        if changes.is_empty() {
            report.skipped += 1;
            return;
        }

        info!(changes = ?changes.fields(), "[update] user {code}");

        if self.dry_run {
            report.updated += 1;
            return;
        }

        match self.directory.update_user(changes.into_fields()).await {
            Ok(()) => {
                info!("[update] user {code} applied");
                report.updated += 1;
            }
            Err(err) => {
                error!("[update] user {code} failed: {err}");
                report.errors += 1;
            }
        }
    }

    fn log_summary(&self, report: &SyncReport) {
        info!("===== sync summary =====");
        info!("created : {}", report.created);
        info!("updated : {}", report.updated);
        info!("disabled: {}", report.disabled);
        info!("skipped : {}", report.skipped);
        info!("errors  : {}", report.errors);
        info!("dry run : {}", self.dry_run);
        info!("===== roster sync finished =====");
    }
}
