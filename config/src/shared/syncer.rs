use serde::Deserialize;

use crate::shared::{GlpiConfig, PgConnectionConfig, SyncConfig, ValidationError};
use crate::Config;

/// Complete configuration for the syncer service.
///
/// Aggregates the source database connection, the GLPI destination, and the
/// run-level sync settings. Typically loaded from configuration files at
/// startup. Not `Serialize` so the contained secrets cannot leak into
/// serialized forms.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncerConfig {
    /// Connection to the source-of-truth employee database.
    pub source: PgConnectionConfig,
    /// Connection to the GLPI destination.
    pub glpi: GlpiConfig,
    /// Run-level sync settings.
    pub sync: SyncConfig,
}

impl SyncerConfig {
    /// Validates the complete syncer configuration.
    ///
    /// Every missing or empty required setting is reported in a single
    /// [`ValidationError::MissingSettings`] error so operators can fix the
    /// whole set at once.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.source.tls.validate()?;

        let mut missing = Vec::new();
        self.source.collect_missing_settings(&mut missing);
        self.glpi.collect_missing_settings(&mut missing);
        self.sync.collect_missing_settings(&mut missing);

        if !missing.is_empty() {
            return Err(ValidationError::MissingSettings(missing));
        }

        Ok(())
    }
}

impl Config for SyncerConfig {
    const LIST_PARSE_KEYS: &'static [&'static str] = &[];
}
