use std::path::Path;

use ::config::shared::{GlpiConfig, PgConnectionConfig, SyncConfig, SyncerConfig};
use sync::destination::glpi::GlpiDirectory;
use sync::mapping::MappingConfig;
use sync::pipeline::SyncPipeline;
use sync::source::postgres::PgRosterSource;
use tracing::{debug, info};

use crate::error::SyncerResult;

/// Runs one reconciliation pass with the provided configuration.
///
/// Loads the field mapping, opens the GLPI session, and hands both to the
/// pipeline together with the roster source. The mapping is loaded before any
/// connection is made, so configuration errors abort early.
pub async fn run_sync_with_config(syncer_config: SyncerConfig) -> SyncerResult<()> {
    info!("starting roster syncer");

    log_config(&syncer_config);

    let mapping = MappingConfig::from_path(Path::new(&syncer_config.sync.mapping_path))?;
    let attributes = mapping.fields().keys().cloned().collect::<Vec<_>>();
    info!(
        key_field = mapping.key_field(),
        attributes = %attributes.join(", "),
        "field mapping loaded"
    );

    let source = PgRosterSource::new(syncer_config.source.clone());
    let directory = GlpiDirectory::connect(&syncer_config.glpi).await?;

    let pipeline = SyncPipeline::new(
        source,
        directory,
        mapping,
        syncer_config.glpi.entities_id,
        syncer_config.sync.dry_run,
    );
    let report = pipeline.run().await?;

    info!(?report, "roster syncer completed");

    Ok(())
}

fn log_config(config: &SyncerConfig) {
    log_source_config(&config.source);
    log_glpi_config(&config.glpi);
    log_sync_config(&config.sync);
}

fn log_source_config(config: &PgConnectionConfig) {
    debug!(
        host = config.host,
        port = config.port,
        dbname = config.name,
        username = config.username,
        tls_enabled = config.tls.enabled,
        "source database connection config",
    );
}

fn log_glpi_config(config: &GlpiConfig) {
    debug!(
        base_url = config.base_url,
        entities_id = config.entities_id,
        "glpi destination config"
    );
}

fn log_sync_config(config: &SyncConfig) {
    debug!(
        mapping_path = config.mapping_path,
        dry_run = config.dry_run,
        "sync run config"
    );
}
