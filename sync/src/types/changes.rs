use serde_json::Value;

use crate::types::FieldMap;

/// The sparse set of destination fields whose values must change.
///
/// An empty change set means no update is needed. A non-empty change set also
/// carries the destination `id` and the `entities_id` — the destination
/// requires both to accept an update, and they are not counted as changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    fields: FieldMap,
}

impl ChangeSet {
    /// Returns whether no field needs to change.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Stages a new value for a destination field, replacing any staged value.
    pub fn stage(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns the staged fields.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Consumes the change set into the update payload.
    pub fn into_fields(self) -> FieldMap {
        self.fields
    }
}
