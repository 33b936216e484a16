use tracing::warn;

use crate::types::{Employee, Roster};

/// One raw roster row in query projection order, before trimming and validation.
#[derive(Debug, Clone, Default)]
pub struct RosterRow {
    pub employee_code: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub department: Option<String>,
    pub job_title: Option<String>,
    pub status: Option<String>,
}

/// Materializes raw rows into a roster keyed by business key.
///
/// String fields are trimmed and NULLs read as empty strings. Rows whose
/// trimmed business key is empty cannot be reconciled and are dropped with a
/// warning. When the same key appears twice the later row silently replaces
/// the earlier one.
pub fn collect_roster<I>(rows: I) -> Roster
where
    I: IntoIterator<Item = RosterRow>,
{
    let mut roster = Roster::new();

    for row in rows {
        let employee = Employee {
            employee_code: trimmed(row.employee_code),
            first_name: trimmed(row.first_name),
            last_name: trimmed(row.last_name),
            email: trimmed(row.email),
            phone_number: trimmed(row.phone_number),
            department: trimmed(row.department),
            job_title: trimmed(row.job_title),
            status: trimmed(row.status),
        };

        if employee.employee_code.is_empty() {
            warn!(
                last_name = employee.last_name,
                email = employee.email,
                "roster row dropped: empty employee_code"
            );
            continue;
        }

        roster.insert(employee.employee_code.clone(), employee);
    }

    roster
}

fn trimmed(value: Option<String>) -> String {
    value
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(code: &str, email: &str) -> RosterRow {
        RosterRow {
            employee_code: Some(code.to_string()),
            email: Some(email.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn trims_fields_and_reads_nulls_as_empty() {
        let roster = collect_roster([RosterRow {
            employee_code: Some("  E1  ".to_string()),
            first_name: Some(" Ada ".to_string()),
            last_name: None,
            ..Default::default()
        }]);

        let employee = &roster["E1"];
        assert_eq!(employee.first_name, "Ada");
        assert_eq!(employee.last_name, "");
    }

    #[test]
    fn drops_rows_without_business_key() {
        let roster = collect_roster([
            row("", "nobody@example.com"),
            RosterRow {
                employee_code: Some("   ".to_string()),
                ..Default::default()
            },
            RosterRow::default(),
            row("E1", "ada@example.com"),
        ]);

        assert_eq!(roster.len(), 1);
        assert!(roster.contains_key("E1"));
    }

    #[test]
    fn later_duplicate_keys_replace_earlier_rows() {
        let roster = collect_roster([row("E1", "old@example.com"), row("E1", "new@example.com")]);

        assert_eq!(roster.len(), 1);
        assert_eq!(roster["E1"].email, "new@example.com");
    }
}
