use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::SerializableSecretString;

/// Configuration for the GLPI REST API destination.
///
/// This intentionally does not implement `Serialize` to avoid accidentally
/// leaking the API tokens into serialized forms.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GlpiConfig {
    /// Base URL of the GLPI REST endpoint, e.g. `http://glpi.local/apirest.php`.
    pub base_url: String,
    /// Application token registered in GLPI for this client.
    pub app_token: SerializableSecretString,
    /// User token used to open the API session.
    pub user_token: SerializableSecretString,
    /// Identifier of the GLPI entity that owns synchronized users.
    pub entities_id: u64,
}

impl GlpiConfig {
    /// Appends the names of missing required settings to `missing`.
    pub(crate) fn collect_missing_settings(&self, missing: &mut Vec<String>) {
        if self.base_url.is_empty() {
            missing.push("glpi.base_url".to_string());
        }
        if self.app_token.expose_secret().is_empty() {
            missing.push("glpi.app_token".to_string());
        }
        if self.user_token.expose_secret().is_empty() {
            missing.push("glpi.user_token".to_string());
        }
    }
}
