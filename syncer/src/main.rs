//! Roster synchronization service binary.
//!
//! Loads configuration, initializes tracing, starts the async runtime, and
//! runs one reconciliation pass from the source roster database to the GLPI
//! user directory. Any fatal error is logged once and terminates the process
//! with a non-zero status.

// Leading `::` disambiguates the `config` crate from the local module.
use ::config::shared::SyncerConfig;
use tracing::error;

use crate::config::load_syncer_config;
use crate::core::run_sync_with_config;
use crate::error::{SyncerError, SyncerResult};

mod config;
mod core;
mod error;

/// Entry point for the syncer service.
///
/// Loads and validates configuration, initializes tracing (the returned
/// flusher guard must outlive the run), then builds the runtime and executes
/// the sync pass.
fn main() -> SyncerResult<()> {
    let syncer_config = load_syncer_config()?;

    let _log_flusher =
        telemetry::tracing::init_tracing(env!("CARGO_BIN_NAME")).map_err(SyncerError::config)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async_main(syncer_config))?;

    Ok(())
}

/// Main async entry point that runs the sync pass and reports failures.
async fn async_main(syncer_config: SyncerConfig) -> SyncerResult<()> {
    if let Err(err) = run_sync_with_config(syncer_config).await {
        error!("{err}");
        return Err(err);
    }

    Ok(())
}
