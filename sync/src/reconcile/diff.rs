//! Payload construction and field-level diffing.
//!
//! Both entry points are pure: they read one employee, the mapping, and at
//! most one destination record, and produce a payload or a change set. The
//! diff is recomputed from scratch on every run; applying a change set and
//! diffing again yields an empty set.

use serde_json::Value;

use crate::error::{ErrorKind, SyncResult};
use crate::mapping::MappingConfig;
use crate::sync_error;
use crate::types::{ChangeSet, DirectoryUser, Employee, FieldMap};

/// Synthesizes the human-readable comment stored on every synchronized user.
pub fn build_comment(employee: &Employee) -> String {
    format!(
        "Synchro Oracle - Dept={}, Job={}",
        employee.department, employee.job_title
    )
}

/// Returns the destination activation flag for an employee, exactly 1 or 0.
fn activation_flag(employee: &Employee) -> i64 {
    i64::from(employee.is_active())
}

/// Builds the full creation payload for an employee with no destination record.
///
/// Every mapped source attribute is resolved on the employee and assigned to
/// each of its target destination fields; attributes unknown to the roster
/// resolve to null. `name` and the business-key field default to the employee
/// code unless the mapping already set them (a mapped null counts as set).
/// The activation flag, the organizational entity, and the synthesized
/// comment are always assigned last.
pub fn build_create_payload(
    employee: &Employee,
    mapping: &MappingConfig,
    entities_id: u64,
) -> FieldMap {
    let mut payload = FieldMap::new();

    for (attribute, targets) in mapping.fields() {
        let value = attribute_value(employee, attribute);
        for field in targets.iter() {
            payload.insert(field.to_string(), value.clone());
        }
    }

    payload
        .entry("name".to_string())
        .or_insert_with(|| Value::from(employee.employee_code.clone()));
    payload
        .entry(mapping.key_field().to_string())
        .or_insert_with(|| Value::from(employee.employee_code.clone()));

    payload.insert("is_active".to_string(), Value::from(activation_flag(employee)));
    payload.insert("entities_id".to_string(), Value::from(entities_id));
    payload.insert("comment".to_string(), Value::from(build_comment(employee)));

    payload
}

/// Computes the minimal change set for an employee with a destination record.
///
/// For every mapped attribute and each fan-out target, the employee value is
/// compared against the destination value: absent or null destination values
/// read as empty strings, string comparison is exact, and non-string
/// destination values never equal a source value. The activation flag (an
/// absent destination flag reads as active) and the synthesized comment are
/// compared as well. A non-empty change set carries the destination `id` and
/// the `entities_id`; a matched user without an id cannot be updated.
pub fn compute_changes(
    employee: &Employee,
    mapping: &MappingConfig,
    user: &DirectoryUser,
    entities_id: u64,
) -> SyncResult<ChangeSet> {
    let mut changes = ChangeSet::default();

    for (attribute, targets) in mapping.fields() {
        let value = employee.attribute(attribute);
        for field in targets.iter() {
            let old = user.field(field);
            if !string_values_equal(old.as_ref(), value) {
                changes.stage(field, attribute_value(employee, attribute));
            }
        }
    }

    let new_active = activation_flag(employee);
    let old_active = user.is_active.unwrap_or(1);
    if old_active != new_active {
        changes.stage("is_active", new_active);
    }

    let new_comment = build_comment(employee);
    if user.comment.as_deref().unwrap_or("") != new_comment {
        changes.stage("comment", new_comment);
    }

    if !changes.is_empty() {
        let id = user.id.ok_or_else(|| {
            sync_error!(
                ErrorKind::InvalidData,
                "Destination user has no id, update cannot be addressed"
            )
        })?;
        changes.stage("id", id);
        changes.stage("entities_id", entities_id);
    }

    Ok(changes)
}

fn attribute_value(employee: &Employee, attribute: &str) -> Value {
    employee
        .attribute(attribute)
        .map(Value::from)
        .unwrap_or(Value::Null)
}

/// Compares a destination value against a source string, null-as-empty.
fn string_values_equal(old: Option<&Value>, new: Option<&str>) -> bool {
    let new = new.unwrap_or("");

    match old {
        None | Some(Value::Null) => new.is_empty(),
        Some(Value::String(text)) => text == new,
        Some(_) => false,
    }
}
