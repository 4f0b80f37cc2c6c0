use landlord_aid::workflows::dashboard::{Dashboard, FollowUp};
use landlord_aid::workflows::eligibility::ScoringMode;
use landlord_aid::workflows::intake::{
    AddressBook, ContactMethod, CostRange, FormStep, IntakeForm, RentalStatus,
};
use landlord_aid::workflows::records::{
    records_router, JsonlRecordStore, PayloadPolicy, RecordService, RecordStore,
};
use landlord_aid::workflows::submission::{
    ApplicationTransport, HttpTransport, JsonFileStore, LocalStore, SubmissionClient,
    SubmissionError, TransportError,
};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

async fn spawn_intake_server(store_path: &Path, policy: PayloadPolicy) -> String {
    let store = Arc::new(JsonlRecordStore::new(store_path));
    let app = records_router(Arc::new(RecordService::new(store, policy)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server runs");
    });
    format!("http://{addr}")
}

fn fill_out_form() -> IntakeForm {
    let mut form = IntakeForm::new(Arc::new(AddressBook::bundled()));

    form.set_first_name("Denise");
    form.set_last_name("Walker");
    form.set_email("denise@example.com");
    form.set_preferred_contact(Some(ContactMethod::Email))
        .expect("email is filled in");
    assert_eq!(form.next().expect("contact step valid"), FormStep::Property);

    form.set_property_address("123 M");
    form.focus_address();
    assert_eq!(
        form.autocomplete().suggestions(),
        ["123 Main St, Philadelphia, PA 19102".to_string()]
    );
    form.select_address_suggestion(0, Instant::now())
        .expect("suggestion visible");
    form.set_number_of_units("2");
    assert_eq!(form.next().expect("property step valid"), FormStep::Rental);

    form.set_unit_rent(0, "1350").expect("unit 0 exists");
    form.set_unit_vacant(1, true).expect("unit 1 exists");
    form.set_rented_out(RentalStatus::Yes);
    assert_eq!(form.next().expect("rental step valid"), FormStep::Repairs);

    for repair in ["Plumbing", "Roofing", "Windows"] {
        form.toggle_repair(repair, true).expect("catalog repair");
    }
    form.set_estimated_cost(Some(CostRange::From51kTo75k));
    form
}

#[tokio::test]
async fn completed_form_is_appended_saved_and_scored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ledger = dir.path().join("applications.jsonl");
    let base_url = spawn_intake_server(&ledger, PayloadPolicy::Validated).await;

    let local_state = Arc::new(JsonFileStore::new(dir.path().join("state.json")));
    let client = SubmissionClient::new(Arc::new(HttpTransport::new(&base_url)), local_state.clone());
    let mut form = fill_out_form();

    let outcome = client.submit(&mut form).await.expect("submission delivered");
    assert_eq!(outcome.destination.path(), "/dashboard");
    assert_eq!(outcome.acknowledgement.status, 200);
    assert_eq!(
        outcome.acknowledgement.body,
        json!({ "message": "Application saved" })
    );

    let raw = std::fs::read_to_string(&ledger).expect("ledger written");
    assert_eq!(raw.lines().count(), 1);
    assert!(raw.starts_with(r#"{"firstName":"Denise""#));
    assert!(raw.ends_with('\n'));
    let stored = JsonlRecordStore::new(&ledger).read_all().expect("ledger parses");
    assert_eq!(stored[0]["estimatedCost"], "51-75k");
    assert_eq!(stored[0]["units"][1]["monthlyRent"], "0");

    let saved = local_state.load().expect("state readable");
    assert_eq!(saved.as_ref(), Some(&outcome.data));

    let dashboard = Dashboard::load(local_state.as_ref(), ScoringMode::Heuristic)
        .expect("dashboard loads");
    let summary = dashboard.summary().expect("dashboard ready");
    assert_eq!(summary.property.total_monthly_rent_label, "$1,350");
    match &summary.follow_up {
        FollowUp::Assessed {
            status_label,
            funding_label,
            ..
        } => {
            assert_eq!(*status_label, "Highly Eligible");
            assert_eq!(funding_label, "$75,000");
        }
        other => panic!("expected scored follow-up, got {other:?}"),
    }
}

#[tokio::test]
async fn validated_endpoint_rejects_incomplete_payloads() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ledger = dir.path().join("applications.jsonl");
    let base_url = spawn_intake_server(&ledger, PayloadPolicy::Validated).await;

    let err = HttpTransport::new(&base_url)
        .send(&json!({ "firstName": "NoContact" }))
        .await
        .expect_err("incomplete payload rejected");

    assert_eq!(err, TransportError::Rejected { status: 422 });
    assert!(!ledger.exists());
}

#[tokio::test]
async fn unreachable_endpoint_leaves_form_and_local_state_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let closed = std::net::TcpListener::bind("127.0.0.1:0").expect("reserve port");
    let addr = closed.local_addr().expect("reserved address");
    drop(closed);

    let local_state = Arc::new(JsonFileStore::new(dir.path().join("state.json")));
    let client = SubmissionClient::new(
        Arc::new(HttpTransport::new(&format!("http://{addr}"))),
        local_state.clone(),
    );
    let mut form = fill_out_form();

    let err = client.submit(&mut form).await.expect_err("delivery fails");

    assert!(matches!(err, SubmissionError::Transport(TransportError::Network(_))));
    assert!(err.user_notice().is_some());
    assert_eq!(form.step(), FormStep::Repairs);
    assert!(local_state.load().expect("state readable").is_none());
    assert!(!client.is_submitting());
}
