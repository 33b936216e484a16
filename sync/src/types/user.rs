use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Bare field-name → value payload sent to the destination on create/update.
pub type FieldMap = BTreeMap<String, Value>;

/// A user record as returned by the destination directory.
///
/// Only the fields the reconciliation logic understands are modeled
/// explicitly; everything else the API returns lands in [`DirectoryUser::extra`]
/// so destination-side fields unknown to the mapping survive untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryUser {
    /// Destination-assigned identifier, required to address updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    /// Activation flag. The API serves it as an int, a bool, or a digit
    /// string depending on version, so it is read leniently.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_flag"
    )]
    pub is_active: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Every destination field not modeled above.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl DirectoryUser {
    /// Looks a destination field up by name, named fields first.
    pub fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => self.id.map(Value::from),
            "name" => self.name.clone().map(Value::from),
            "registration_number" => self.registration_number.clone().map(Value::from),
            "is_active" => self.is_active.map(Value::from),
            "entities_id" => self.entities_id.map(Value::from),
            "comment" => self.comment.clone().map(Value::from),
            other => self.extra.get(other).cloned(),
        }
    }
}

/// Coerces an activation flag out of whatever JSON shape the API served.
fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(value.as_ref().and_then(coerce_flag))
}

fn coerce_flag(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::Bool(flag) => Some(i64::from(*flag)),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
