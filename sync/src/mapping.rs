//! Externalized source-attribute → destination-field mapping.
//!
//! The mapping is a small declarative rule set loaded once per run from a
//! JSON file with two top-level keys: the destination business-key field name
//! and the field map itself. One source attribute may fan out to several
//! destination fields; every target receives the identical source value.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ErrorKind, SyncResult};
use crate::{bail, sync_error};

/// Destination field used as the business key when the file does not name one.
pub const DEFAULT_KEY_FIELD: &str = "registration_number";

/// Destination field name(s) a source attribute maps to.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldTargets {
    /// The attribute populates a single destination field.
    One(String),
    /// The attribute fans out to several destination fields.
    Many(Vec<String>),
}

impl FieldTargets {
    /// Iterates over the destination field names.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        match self {
            FieldTargets::One(field) => std::slice::from_ref(field),
            FieldTargets::Many(fields) => fields.as_slice(),
        }
        .iter()
        .map(String::as_str)
    }
}

/// The loaded mapping configuration.
///
/// Immutable for the whole run. A missing or empty field map is a fatal
/// configuration error: with no rules, every record would be mapped
/// inconsistently.
#[derive(Debug, Clone, Deserialize)]
pub struct MappingConfig {
    /// Destination field holding the business key.
    #[serde(default = "default_key_field")]
    key_field: String,
    /// Source attribute name → destination field name(s).
    #[serde(default)]
    fields: BTreeMap<String, FieldTargets>,
}

fn default_key_field() -> String {
    DEFAULT_KEY_FIELD.to_string()
}

impl MappingConfig {
    /// Parses a mapping from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> SyncResult<Self> {
        let mapping: MappingConfig = serde_json::from_slice(bytes).map_err(|err| {
            sync_error!(
                ErrorKind::MappingInvalid,
                "Field mapping could not be parsed",
                err.to_string(),
                source: err
            )
        })?;

        if mapping.fields.is_empty() {
            bail!(
                ErrorKind::MappingInvalid,
                "Field mapping is empty",
                "the `fields` object must map at least one source attribute"
            );
        }

        Ok(mapping)
    }

    /// Reads and parses the mapping file at `path`.
    pub fn from_path(path: &Path) -> SyncResult<Self> {
        let bytes = std::fs::read(path).map_err(|err| {
            sync_error!(
                ErrorKind::ConfigError,
                "Mapping file could not be read",
                path.display().to_string(),
                source: err
            )
        })?;

        Self::from_slice(&bytes)
    }

    /// Returns the destination field holding the business key.
    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    /// Returns the source attribute → destination field rules.
    pub fn fields(&self) -> &BTreeMap<String, FieldTargets> {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_and_fanout_targets() {
        let mapping = MappingConfig::from_slice(
            br#"{
                "key_field": "registration_number",
                "fields": {
                    "first_name": "firstname",
                    "phone_number": ["phone", "mobile"]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(mapping.key_field(), "registration_number");

        let targets: Vec<&str> = mapping.fields()["phone_number"].iter().collect();
        assert_eq!(targets, vec!["phone", "mobile"]);

        let targets: Vec<&str> = mapping.fields()["first_name"].iter().collect();
        assert_eq!(targets, vec!["firstname"]);
    }

    #[test]
    fn key_field_defaults_when_unspecified() {
        let mapping =
            MappingConfig::from_slice(br#"{ "fields": { "email": "name" } }"#).unwrap();

        assert_eq!(mapping.key_field(), DEFAULT_KEY_FIELD);
    }

    #[test]
    fn empty_field_map_is_rejected() {
        let error = MappingConfig::from_slice(br#"{ "fields": {} }"#).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MappingInvalid);

        let error = MappingConfig::from_slice(br#"{ "key_field": "code" }"#).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MappingInvalid);
    }

    #[test]
    fn unparsable_mapping_is_rejected() {
        let error = MappingConfig::from_slice(b"not json").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MappingInvalid);
    }

    #[test]
    fn missing_mapping_file_is_a_config_error() {
        let error =
            MappingConfig::from_path(Path::new("/nonexistent/field_mapping.json")).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ConfigError);
    }
}
