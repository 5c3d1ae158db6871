use super::*;
use async_trait::async_trait;
use shared::protocol::ServiceStatus;
use std::time::Duration;
use tokio::sync::Notify;

struct ScriptedBackend {
    result: Option<PredictionResult>,
    fail_with: Option<String>,
    gate: Option<Arc<Notify>>,
    calls: Arc<Mutex<Vec<RiskFactorInput>>>,
}

impl ScriptedBackend {
    fn ok(result: PredictionResult) -> Self {
        Self {
            result: Some(result),
            fail_with: None,
            gate: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn failing(message: impl Into<String>) -> Self {
        Self {
            result: None,
            fail_with: Some(message.into()),
            gate: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn gated(result: PredictionResult, gate: Arc<Notify>) -> Self {
        let mut backend = Self::ok(result);
        backend.gate = Some(gate);
        backend
    }
}

#[async_trait]
impl ScoringBackend for ScriptedBackend {
    async fn predict(&self, input: &RiskFactorInput) -> Result<PredictionResult, ScoringError> {
        self.calls.lock().await.push(*input);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(message) = &self.fail_with {
            return Err(ScoringError::Service(message.clone()));
        }
        Ok(self.result.clone().expect("scripted result"))
    }

    async fn health(&self) -> Result<ServiceStatus, ScoringError> {
        Ok(ServiceStatus {
            status: "ok".into(),
        })
    }
}

fn low_risk() -> PredictionResult {
    PredictionResult {
        prediction: 0,
        probability: 0.12,
        message: "Low risk".into(),
    }
}

async fn wait_for_calls(calls: &Arc<Mutex<Vec<RiskFactorInput>>>, expected: usize) {
    for _ in 0..200 {
        if calls.lock().await.len() >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("backend never observed {expected} call(s)");
}

#[test]
fn default_draft_snapshots_to_documented_initial_values() {
    let snapshot = DraftInput::default().snapshot().expect("snapshot");
    assert_eq!(snapshot, RiskFactorInput::default());
}

#[test]
fn with_field_replaces_only_the_named_field() {
    let draft = DraftInput::default();
    let updated = draft.with_field(FieldKey::Age, FieldValue::Number(48.0));

    assert_eq!(updated.get(FieldKey::Age), FieldValue::Number(48.0));
    for key in FieldKey::ALL {
        if key != FieldKey::Age {
            assert_eq!(updated.get(key), draft.get(key), "field {key}");
        }
    }
}

#[test]
fn raw_text_coercion_handles_empty_and_garbage() {
    assert_eq!(FieldValue::from_raw(""), FieldValue::Empty);
    assert_eq!(FieldValue::from_raw("  "), FieldValue::Empty);
    assert_eq!(FieldValue::from_raw("42.5"), FieldValue::Number(42.5));
    match FieldValue::from_raw("abc") {
        FieldValue::Number(value) => assert!(value.is_nan()),
        other => panic!("expected NaN coercion, got {other:?}"),
    }
}

#[test]
fn snapshot_renormalizes_binary_fields_to_strict_zero_or_one() {
    let draft = DraftInput::default()
        .with_field(FieldKey::Diabetes, FieldValue::Number(3.0))
        .with_field(FieldKey::Male, FieldValue::Number(0.0))
        .with_field(FieldKey::BpMeds, FieldValue::Number(0.5));

    let snapshot = draft.snapshot().expect("snapshot");
    assert_eq!(snapshot.diabetes, 1.0);
    assert_eq!(snapshot.male, 0.0);
    assert_eq!(snapshot.bp_meds, 1.0);
    // Continuous fields pass through untouched.
    assert_eq!(snapshot.tot_chol, 170.0);
}

#[tokio::test]
async fn successful_submission_completes_with_parsed_result() {
    let session = FormSession::new(Arc::new(ScriptedBackend::ok(low_risk())));

    let phase = session.submit().await;
    assert_eq!(phase, SubmissionPhase::Completed(low_risk()));

    let phase = session.phase().await;
    assert!(!phase.is_loading());
    assert_eq!(phase.result(), Some(&low_risk()));
    assert_eq!(phase.error(), None);
}

#[tokio::test]
async fn failed_submission_stores_error_and_no_result() {
    let session = FormSession::new(Arc::new(ScriptedBackend::failing("model unavailable")));

    let phase = session.submit().await;
    assert_eq!(phase.error(), Some("model unavailable"));
    assert_eq!(phase.result(), None);
    assert!(!phase.is_loading());
}

#[tokio::test]
async fn failed_submission_leaves_the_session_retryable() {
    let backend = Arc::new(ScriptedBackend::failing("model unavailable"));
    let calls = Arc::clone(&backend.calls);
    let session = FormSession::new(backend);

    assert!(session.submit().await.error().is_some());
    assert!(session.submit().await.error().is_some());
    assert_eq!(calls.lock().await.len(), 2, "each retry issues a fresh request");
}

#[tokio::test]
async fn empty_field_fails_without_issuing_a_request() {
    let backend = Arc::new(ScriptedBackend::ok(low_risk()));
    let calls = Arc::clone(&backend.calls);
    let session = FormSession::new(backend);

    session.update_field(FieldKey::Age, "").await;
    let phase = session.submit().await;

    assert_eq!(phase.error(), Some("field 'age' is empty"));
    assert!(calls.lock().await.is_empty());
}

#[tokio::test]
async fn unparseable_text_fails_without_issuing_a_request() {
    let backend = Arc::new(ScriptedBackend::ok(low_risk()));
    let calls = Arc::clone(&backend.calls);
    let session = FormSession::new(backend);

    session.update_field(FieldKey::Bmi, "twenty-four").await;
    let phase = session.submit().await;

    assert_eq!(phase.error(), Some("field 'BMI' is not a finite number"));
    assert!(calls.lock().await.is_empty());
}

#[tokio::test]
async fn submit_while_in_flight_is_a_noop() {
    let gate = Arc::new(Notify::new());
    let backend = Arc::new(ScriptedBackend::gated(low_risk(), Arc::clone(&gate)));
    let calls = Arc::clone(&backend.calls);
    let session = Arc::new(FormSession::new(backend));

    let first = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.submit().await })
    };
    wait_for_calls(&calls, 1).await;

    let second = session.submit().await;
    assert!(second.is_loading());
    assert_eq!(calls.lock().await.len(), 1, "no second request issued");

    gate.notify_one();
    let resolved = first.await.expect("join");
    assert_eq!(resolved, SubmissionPhase::Completed(low_risk()));
    assert_eq!(session.phase().await, SubmissionPhase::Completed(low_risk()));
}

#[tokio::test]
async fn edits_during_flight_affect_only_the_next_snapshot() {
    let gate = Arc::new(Notify::new());
    let backend = Arc::new(ScriptedBackend::gated(low_risk(), Arc::clone(&gate)));
    let calls = Arc::clone(&backend.calls);
    let session = Arc::new(FormSession::new(backend));

    let first = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.submit().await })
    };
    wait_for_calls(&calls, 1).await;

    session.update_field(FieldKey::Age, "50").await;
    gate.notify_one();
    first.await.expect("join");

    // The in-flight snapshot kept the old value.
    assert_eq!(calls.lock().await[0].age, 32.0);

    gate.notify_one();
    session.submit().await;
    wait_for_calls(&calls, 2).await;
    assert_eq!(calls.lock().await[1].age, 50.0);
}
