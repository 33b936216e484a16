use std::collections::BTreeMap;

/// Status value that marks an employee as active, compared case-insensitively.
pub const ACTIVE_STATUS: &str = "ACTIVE";

/// The full employee roster, keyed by business key.
///
/// Ordered so iteration, logs, and destination calls are deterministic.
pub type Roster = BTreeMap<String, Employee>;

/// A single employee read from the source-of-truth database.
///
/// All fields are trimmed strings; the source reader maps NULL columns to
/// empty strings. Immutable once read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// Business key used to match this employee to a destination user.
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub department: String,
    pub job_title: String,
    /// Free-text status; only [`ACTIVE_STATUS`] (case-insensitive) means active.
    pub status: String,
}

impl Employee {
    /// Returns whether this employee counts as active.
    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case(ACTIVE_STATUS)
    }

    /// Resolves a source attribute by the name used in the field mapping.
    ///
    /// Returns [`None`] for attribute names the roster does not carry; the
    /// mapped destination fields then receive a null value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "employee_code" => Some(&self.employee_code),
            "first_name" => Some(&self.first_name),
            "last_name" => Some(&self.last_name),
            "email" => Some(&self.email),
            "phone_number" => Some(&self.phone_number),
            "department" => Some(&self.department),
            "job_title" => Some(&self.job_title),
            "status" => Some(&self.status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(status: &str) -> Employee {
        Employee {
            employee_code: "E1".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: "123".to_string(),
            department: "IT".to_string(),
            job_title: "Dev".to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn active_status_is_case_insensitive() {
        assert!(employee("ACTIVE").is_active());
        assert!(employee("active").is_active());
        assert!(employee("Active").is_active());
        assert!(!employee("INACTIVE").is_active());
        assert!(!employee("").is_active());
    }

    #[test]
    fn attributes_resolve_by_mapping_name() {
        let emp = employee("ACTIVE");

        assert_eq!(emp.attribute("first_name"), Some("Ada"));
        assert_eq!(emp.attribute("employee_code"), Some("E1"));
        assert_eq!(emp.attribute("badge_color"), None);
    }
}
