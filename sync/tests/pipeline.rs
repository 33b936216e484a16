use serde_json::json;
use sync::destination::memory::MemoryDirectory;
use sync::error::ErrorKind;
use sync::mapping::MappingConfig;
use sync::pipeline::SyncPipeline;
use sync::source::memory::MemoryRosterSource;
use sync::source::rows::RosterRow;
use sync::types::{DirectoryUser, SyncReport};
use telemetry::tracing::init_test_tracing;

const ENTITIES_ID: u64 = 3;

fn mapping() -> MappingConfig {
    MappingConfig::from_slice(
        br#"{
            "key_field": "registration_number",
            "fields": {
                "employee_code": "registration_number",
                "first_name": "firstname",
                "last_name": "realname",
                "phone_number": ["phone", "mobile"]
            }
        }"#,
    )
    .unwrap()
}

/// A complete roster row for an active employee.
fn active_row(code: &str) -> RosterRow {
    RosterRow {
        employee_code: Some(code.to_string()),
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        email: Some("ada@example.com".to_string()),
        phone_number: Some("123".to_string()),
        department: Some("IT".to_string()),
        job_title: Some("Dev".to_string()),
        status: Some("ACTIVE".to_string()),
    }
}

/// A directory user that exactly matches [`active_row`] under [`mapping`].
fn matching_user(id: u64, code: &str) -> DirectoryUser {
    serde_json::from_value(json!({
        "id": id,
        "registration_number": code,
        "is_active": 1,
        "comment": "Synchro Oracle - Dept=IT, Job=Dev",
        "firstname": "Ada",
        "realname": "Lovelace",
        "phone": "123",
        "mobile": "123"
    }))
    .unwrap()
}

fn pipeline(
    source: MemoryRosterSource,
    directory: MemoryDirectory,
    dry_run: bool,
) -> SyncPipeline<MemoryRosterSource, MemoryDirectory> {
    SyncPipeline::new(source, directory, mapping(), ENTITIES_ID, dry_run)
}

#[tokio::test]
async fn creates_missing_users_with_full_payload() {
    init_test_tracing();

    let source = MemoryRosterSource::new(vec![active_row("E1")]);
    let directory = MemoryDirectory::new();

    let report = pipeline(source, directory.clone(), false).run().await.unwrap();

    assert_eq!(
        report,
        SyncReport {
            created: 1,
            ..Default::default()
        }
    );

    let created = directory.created().await;
    assert_eq!(created.len(), 1);

    let payload = &created[0];
    assert_eq!(payload["registration_number"], json!("E1"));
    assert_eq!(payload["name"], json!("E1"));
    assert_eq!(payload["is_active"], json!(1));
    assert_eq!(payload["entities_id"], json!(ENTITIES_ID));
    assert_eq!(payload["comment"], json!("Synchro Oracle - Dept=IT, Job=Dev"));
    assert_eq!(payload["firstname"], json!("Ada"));
    assert_eq!(payload["phone"], json!("123"));
    assert_eq!(payload["mobile"], json!("123"));

    assert!(directory.session_ended().await);
}

#[tokio::test]
async fn skips_unchanged_users_without_destination_calls() {
    init_test_tracing();

    let source = MemoryRosterSource::new(vec![active_row("E1")]);
    let directory = MemoryDirectory::with_users(vec![matching_user(7, "E1")]);

    let report = pipeline(source, directory.clone(), false).run().await.unwrap();

    assert_eq!(
        report,
        SyncReport {
            skipped: 1,
            ..Default::default()
        }
    );
    assert!(directory.created().await.is_empty());
    assert!(directory.updated().await.is_empty());
}

#[tokio::test]
async fn updates_changed_fields_with_carriers_only() {
    init_test_tracing();

    let mut user = matching_user(7, "E1");
    user.extra.insert("firstname".to_string(), json!("Adeline"));

    let source = MemoryRosterSource::new(vec![active_row("E1")]);
    let directory = MemoryDirectory::with_users(vec![user]);

    let report = pipeline(source, directory.clone(), false).run().await.unwrap();

    assert_eq!(
        report,
        SyncReport {
            updated: 1,
            ..Default::default()
        }
    );

    let updated = directory.updated().await;
    assert_eq!(updated.len(), 1);

    let payload = &updated[0];
    assert_eq!(payload.len(), 3);
    assert_eq!(payload["firstname"], json!("Ada"));
    assert_eq!(payload["id"], json!(7));
    assert_eq!(payload["entities_id"], json!(ENTITIES_ID));
}

#[tokio::test]
async fn deactivation_sends_exactly_flag_and_carriers() {
    init_test_tracing();

    let mut row = active_row("E1");
    row.status = Some("INACTIVE".to_string());

    let source = MemoryRosterSource::new(vec![row]);
    let directory = MemoryDirectory::with_users(vec![matching_user(7, "E1")]);

    let report = pipeline(source, directory.clone(), false).run().await.unwrap();

    assert_eq!(
        report,
        SyncReport {
            updated: 1,
            ..Default::default()
        }
    );

    let updated = directory.updated().await;
    let payload = &updated[0];
    assert_eq!(payload.len(), 3);
    assert_eq!(payload["is_active"], json!(0));
    assert_eq!(payload["id"], json!(7));
    assert_eq!(payload["entities_id"], json!(ENTITIES_ID));
}

#[tokio::test]
async fn dry_run_counts_without_destination_calls() {
    init_test_tracing();

    let mut changed = matching_user(7, "E1");
    changed.extra.insert("firstname".to_string(), json!("Adeline"));

    let source = MemoryRosterSource::new(vec![active_row("E1"), active_row("E2")]);
    let directory = MemoryDirectory::with_users(vec![changed]);

    let report = pipeline(source, directory.clone(), true).run().await.unwrap();

    assert_eq!(
        report,
        SyncReport {
            created: 1,
            updated: 1,
            ..Default::default()
        }
    );
    assert!(directory.created().await.is_empty());
    assert!(directory.updated().await.is_empty());
    assert!(directory.session_ended().await);
}

#[tokio::test]
async fn per_record_create_failure_does_not_abort_the_run() {
    init_test_tracing();

    let source = MemoryRosterSource::new(vec![active_row("E1"), active_row("E2")]);
    let directory = MemoryDirectory::new();
    directory.fail_create_for("E1").await;

    let report = pipeline(source, directory.clone(), false).run().await.unwrap();

    assert_eq!(
        report,
        SyncReport {
            created: 1,
            errors: 1,
            ..Default::default()
        }
    );

    let created = directory.created().await;
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["registration_number"], json!("E2"));
}

#[tokio::test]
async fn per_record_update_failure_does_not_abort_the_run() {
    init_test_tracing();

    let mut changed = matching_user(7, "E1");
    changed.extra.insert("firstname".to_string(), json!("Adeline"));

    let source = MemoryRosterSource::new(vec![active_row("E1"), active_row("E2")]);
    let directory = MemoryDirectory::with_users(vec![changed]);
    directory.fail_update_for(7).await;

    let report = pipeline(source, directory.clone(), false).run().await.unwrap();

    assert_eq!(
        report,
        SyncReport {
            created: 1,
            errors: 1,
            ..Default::default()
        }
    );
}

#[tokio::test]
async fn duplicate_destination_keys_match_only_the_first_record() {
    init_test_tracing();

    // The second record diverges wildly; it must never be matched or updated.
    let mut shadow = matching_user(8, "E1");
    shadow.extra.insert("firstname".to_string(), json!("Impostor"));
    shadow.is_active = Some(0);

    let source = MemoryRosterSource::new(vec![active_row("E1")]);
    let directory = MemoryDirectory::with_users(vec![matching_user(7, "E1"), shadow]);

    let report = pipeline(source, directory.clone(), false).run().await.unwrap();

    assert_eq!(
        report,
        SyncReport {
            skipped: 1,
            ..Default::default()
        }
    );
    assert!(directory.updated().await.is_empty());
}

#[tokio::test]
async fn fatal_source_failure_aborts_but_ends_the_session() {
    init_test_tracing();

    let directory = MemoryDirectory::new();

    let error = pipeline(MemoryRosterSource::failing(), directory.clone(), false)
        .run()
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::SourceQueryFailed);
    assert!(directory.session_ended().await);
    assert!(directory.created().await.is_empty());
}

#[tokio::test]
async fn fatal_listing_failure_aborts_before_any_mutation() {
    init_test_tracing();

    let source = MemoryRosterSource::new(vec![active_row("E1")]);
    let directory = MemoryDirectory::new();
    directory.fail_listing().await;

    let error = pipeline(source, directory.clone(), false)
        .run()
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::DestinationOperationFailed);
    assert!(directory.created().await.is_empty());
    assert!(directory.session_ended().await);
}

#[tokio::test]
async fn session_teardown_failure_does_not_change_the_outcome() {
    init_test_tracing();

    let source = MemoryRosterSource::new(vec![active_row("E1")]);
    let directory = MemoryDirectory::new();
    directory.fail_end_session().await;

    let report = pipeline(source, directory.clone(), false).run().await.unwrap();

    assert_eq!(
        report,
        SyncReport {
            created: 1,
            ..Default::default()
        }
    );
}
