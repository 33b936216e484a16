use std::collections::{BTreeSet, HashMap};

use serde_json::Value;
use tracing::{info, warn};

use crate::types::DirectoryUser;

/// Destination users indexed by business key.
///
/// Invariant: at most one destination record should exist per business key.
/// Violations are reported and the colliding later records are dropped; the
/// first-seen record stays in the index, so the engine never has to choose
/// between duplicates.
#[derive(Debug, Default)]
pub struct UserIndex {
    by_key: HashMap<String, DirectoryUser>,
    duplicate_keys: BTreeSet<String>,
}

impl UserIndex {
    /// Indexes destination users by the value of the business-key field.
    ///
    /// Key values are stringified and trimmed; users whose key is empty or
    /// absent are not sync targets and are excluded entirely. On collision the
    /// first-seen record is kept, the key is recorded as duplicated, and a
    /// warning names both identifiers.
    pub fn build(users: Vec<DirectoryUser>, key_field: &str) -> Self {
        let mut index = UserIndex::default();
        let total = users.len();

        for user in users {
            let key = match user.field(key_field) {
                Some(value) => key_string(&value),
                None => continue,
            };
            if key.is_empty() {
                continue;
            }

            if let Some(existing) = index.by_key.get(&key) {
                warn!(
                    key_field,
                    key,
                    first_id = existing.id,
                    second_id = user.id,
                    "duplicate business key in destination"
                );
                index.duplicate_keys.insert(key);
                continue;
            }

            index.by_key.insert(key, user);
        }

        info!(
            "destination listed {total} users, {} with {key_field} set",
            index.len()
        );
        if !index.duplicate_keys.is_empty() {
            warn!(
                "duplicated {key_field} values: {}",
                index
                    .duplicate_keys
                    .iter()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        index
    }

    /// Looks the destination user up for a business key.
    pub fn get(&self, key: &str) -> Option<&DirectoryUser> {
        self.by_key.get(key)
    }

    /// Returns the number of indexed users.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Returns whether the index holds no users.
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Returns the business keys that appeared more than once, for reporting.
    pub fn duplicate_keys(&self) -> &BTreeSet<String> {
        &self.duplicate_keys
    }
}

/// Renders a key-field value the way a business key is written.
///
/// Destination APIs serve numeric-looking keys as numbers; those compare
/// equal to their string form here.
fn key_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.trim().to_string(),
        other => other.to_string(),
    }
}
