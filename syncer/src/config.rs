use ::config::load_config;
use ::config::shared::SyncerConfig;

use crate::error::{SyncerError, SyncerResult};

/// Loads and validates the syncer configuration.
///
/// Uses the standard hierarchical configuration loading from [`config`] and
/// validates the resulting [`SyncerConfig`] before returning it, so every
/// missing setting is reported before any connection is attempted.
pub fn load_syncer_config() -> SyncerResult<SyncerConfig> {
    let config = load_config::<SyncerConfig>().map_err(SyncerError::config)?;
    config.validate().map_err(SyncerError::config)?;

    Ok(config)
}
