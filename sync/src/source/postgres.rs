use config::shared::PgConnectionConfig;
use sqlx::postgres::PgRow;
use sqlx::{Connection, PgConnection, Row};
use tracing::{info, warn};

use crate::error::{ErrorKind, SyncResult};
use crate::source::base::RosterSource;
use crate::source::rows::{collect_roster, RosterRow};
use crate::sync_error;
use crate::types::Roster;

/// The fixed projection used to read the employee roster.
///
/// Column order is load-bearing: [`RosterRow`] is built positionally.
const ROSTER_QUERY: &str = "\
SELECT employee_code, first_name, last_name, email, phone_number, department, job_title, status \
FROM employees";

/// Roster source backed by the HR Postgres database.
///
/// The connection is opened inside [`RosterSource::fetch_roster`] and closed
/// before it returns; the source database is touched exactly once per run.
#[derive(Debug, Clone)]
pub struct PgRosterSource {
    config: PgConnectionConfig,
}

impl PgRosterSource {
    /// Creates a roster source for the given connection configuration.
    pub fn new(config: PgConnectionConfig) -> Self {
        Self { config }
    }
}

impl RosterSource for PgRosterSource {
    fn name() -> &'static str {
        "postgres"
    }

    async fn fetch_roster(&self) -> SyncResult<Roster> {
        info!(
            host = self.config.host,
            port = self.config.port,
            dbname = self.config.name,
            "connecting to the source database"
        );

        let mut connection = PgConnection::connect_with(&self.config.connect_options())
            .await
            .map_err(|err| {
                sync_error!(
                    ErrorKind::SourceConnectionFailed,
                    "Source database connection failed",
                    source: err
                )
            })?;

        info!("running the roster query");

        let rows = sqlx::query(ROSTER_QUERY)
            .fetch_all(&mut connection)
            .await
            .map_err(|err| {
                sync_error!(
                    ErrorKind::SourceQueryFailed,
                    "Roster query failed",
                    source: err
                )
            })?;

        if let Err(err) = connection.close().await {
            warn!("failed to close the source connection cleanly: {err}");
        }

        let raw_rows = rows
            .iter()
            .map(decode_row)
            .collect::<SyncResult<Vec<_>>>()?;
        let roster = collect_roster(raw_rows);

        info!("source roster loaded with {} employees", roster.len());

        Ok(roster)
    }
}

/// Decodes one result row into a [`RosterRow`], positionally.
fn decode_row(row: &PgRow) -> SyncResult<RosterRow> {
    Ok(RosterRow {
        employee_code: column(row, 0)?,
        first_name: column(row, 1)?,
        last_name: column(row, 2)?,
        email: column(row, 3)?,
        phone_number: column(row, 4)?,
        department: column(row, 5)?,
        job_title: column(row, 6)?,
        status: column(row, 7)?,
    })
}

fn column(row: &PgRow, index: usize) -> SyncResult<Option<String>> {
    row.try_get(index).map_err(|err| {
        sync_error!(
            ErrorKind::SourceQueryFailed,
            "Roster row could not be decoded",
            format!("column index {index}"),
            source: err
        )
    })
}
