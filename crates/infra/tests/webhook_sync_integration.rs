//! End-to-end coverage of the webhook strategy: coordinator + SQLite mapping
//! store + dispatcher against a mock automation endpoint.

use eventsync_domain::{StrategyKind, SyncResult, SyncStatus};
use eventsync_infra::build_coordinator;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[path = "support.rs"]
mod support;

use support::{onboarding_event, webhook_config, TestDatabase};

#[tokio::test(flavor = "multi_thread")]
async fn webhook_id_becomes_remote_reference() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hooks/calendar"))
        .and(body_partial_json(json!({"lifecycleKind": "created"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "hook-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let db = TestDatabase::new();
    let coordinator =
        build_coordinator(&webhook_config(&format!("{}/hooks/calendar", server.uri())), db.store());
    assert_eq!(coordinator.strategy_kind(), Some(StrategyKind::Webhook));

    let result = coordinator.on_created(&onboarding_event("evt-1")).await;

    assert_eq!(result, SyncResult::synced("hook-1"));
    assert_eq!(coordinator.sync_status("evt-1").await.remote_object_id.as_deref(), Some("hook-1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_envelope_carries_previous_mapping() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"lifecycleKind": "created"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"appointmentId": "appt-5"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "lifecycleKind": "updated",
            "referenceMapping": {"remoteObjectId": "appt-5", "status": "Synced"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let db = TestDatabase::new();
    let coordinator = build_coordinator(&webhook_config(&server.uri()), db.store());
    let event = onboarding_event("evt-1");

    coordinator.on_created(&event).await;
    let updated = coordinator.on_updated(&event).await;

    // The update answer carries no id; the stored reference is kept.
    assert_eq!(updated, SyncResult::dispatched(None));
    assert_eq!(coordinator.sync_status("evt-1").await.remote_object_id.as_deref(), Some("appt-5"));
}

#[tokio::test(flavor = "multi_thread")]
async fn webhook_without_id_falls_back_to_local_reference() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let db = TestDatabase::new();
    let coordinator = build_coordinator(&webhook_config(&server.uri()), db.store());

    let result = coordinator.on_created(&onboarding_event("evt-1")).await;

    assert_eq!(result, SyncResult::dispatched(None));
    let report = coordinator.sync_status("evt-1").await;
    assert!(report.synced);
    assert_eq!(report.remote_object_id.as_deref(), Some("evt-1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_webhook_marks_failed_and_delete_removes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"lifecycleKind": "created"})))
        .respond_with(ResponseTemplate::new(422).set_body_string("missing field"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"lifecycleKind": "deleted", "eventData": {"local_id": "evt-1"}})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let db = TestDatabase::new();
    let coordinator = build_coordinator(&webhook_config(&server.uri()), db.store());

    let created = coordinator.on_created(&onboarding_event("evt-1")).await;
    assert_eq!(created, SyncResult::failed("webhook returned HTTP 422: missing field"));
    assert_eq!(coordinator.sync_status("evt-1").await.status, Some(SyncStatus::Failed));

    let deleted = coordinator.on_deleted("evt-1").await;

    assert!(deleted.success);
    assert_eq!(db.mapping_rows(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_delete_keeps_mapping_as_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"lifecycleKind": "created"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "hook-1"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"lifecycleKind": "deleted"})))
        .respond_with(ResponseTemplate::new(500).set_body_string("try later"))
        .mount(&server)
        .await;

    let db = TestDatabase::new();
    let coordinator = build_coordinator(&webhook_config(&server.uri()), db.store());
    coordinator.on_created(&onboarding_event("evt-1")).await;

    let deleted = coordinator.on_deleted("evt-1").await;

    assert!(!deleted.success);
    let report = coordinator.sync_status("evt-1").await;
    assert_eq!(report.status, Some(SyncStatus::Failed));
    assert!(report.remote_object_id.is_none());
    assert_eq!(report.error.as_deref(), Some("webhook returned HTTP 500: try later"));
}
