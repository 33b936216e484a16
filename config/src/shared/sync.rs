use serde::{Deserialize, Serialize};

/// Run-level settings for one synchronization pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SyncConfig {
    /// Path to the JSON field-mapping file.
    pub mapping_path: String,
    /// When true, decisions and logs are produced but no destination call is made.
    #[serde(default)]
    pub dry_run: bool,
}

impl SyncConfig {
    /// Appends the names of missing required settings to `missing`.
    pub(crate) fn collect_missing_settings(&self, missing: &mut Vec<String>) {
        if self.mapping_path.is_empty() {
            missing.push("sync.mapping_path".to_string());
        }
    }
}
