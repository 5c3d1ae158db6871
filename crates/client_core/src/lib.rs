//! Client-side core for the CHD risk predictor: form state, submission
//! lifecycle, and the typed contract with the remote scoring service.

use std::sync::Arc;

use shared::{
    domain::FieldKey,
    protocol::{PredictionResult, RiskFactorInput},
};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub mod config;
pub mod scoring;

pub use scoring::{HttpScoringClient, ScoringBackend, ScoringError};

/// Value of a single form field while it is being edited.
///
/// A field may transiently hold no value at all (the user cleared the input);
/// it collapses to a strict number only when the draft is snapshotted for
/// submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Empty,
    Number(f64),
}

impl FieldValue {
    /// Best-effort coercion of raw input text. Empty text stays empty;
    /// unparseable text coerces to NaN and is rejected at snapshot time.
    pub fn from_raw(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            FieldValue::Empty
        } else {
            FieldValue::Number(raw.parse().unwrap_or(f64::NAN))
        }
    }

    pub fn as_number(self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(value),
            FieldValue::Empty => None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DraftError {
    #[error("field '{0}' is empty")]
    EmptyField(FieldKey),
    #[error("field '{0}' is not a finite number")]
    NonFiniteField(FieldKey),
}

/// The fourteen risk-factor fields as currently edited, one `FieldValue`
/// per field in `FieldKey` declaration order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DraftInput {
    fields: [FieldValue; 14],
}

impl Default for DraftInput {
    fn default() -> Self {
        Self::from_input(&RiskFactorInput::default())
    }
}

impl DraftInput {
    pub fn from_input(input: &RiskFactorInput) -> Self {
        let mut fields = [FieldValue::Empty; 14];
        for key in FieldKey::ALL {
            fields[key as usize] = FieldValue::Number(input.get(key));
        }
        Self { fields }
    }

    pub fn get(&self, key: FieldKey) -> FieldValue {
        self.fields[key as usize]
    }

    /// A copy of this draft with exactly one field replaced.
    pub fn with_field(mut self, key: FieldKey, value: FieldValue) -> Self {
        self.fields[key as usize] = value;
        self
    }

    /// Collapses the draft to a strict all-numeric record.
    ///
    /// Every field must hold a finite number. Binary indicators are
    /// re-normalized to exactly 0 or 1 regardless of their stored value; the
    /// presentation boundary already bounds them, this is the safety net.
    pub fn snapshot(&self) -> Result<RiskFactorInput, DraftError> {
        let mut input = RiskFactorInput::default();
        for key in FieldKey::ALL {
            let value = self
                .get(key)
                .as_number()
                .ok_or(DraftError::EmptyField(key))?;
            if !value.is_finite() {
                return Err(DraftError::NonFiniteField(key));
            }
            let value = if key.is_binary() {
                if value != 0.0 {
                    1.0
                } else {
                    0.0
                }
            } else {
                value
            };
            input.set(key, value);
        }
        Ok(input)
    }
}

/// Submission lifecycle for the single in-flight request. The sum type makes
/// the loading/result/error mutual exclusion structural: a session is in
/// exactly one phase at any time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    InFlight,
    Completed(PredictionResult),
    Failed(String),
}

impl SubmissionPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, SubmissionPhase::InFlight)
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            SubmissionPhase::Completed(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmissionPhase::Failed(message) => Some(message),
            _ => None,
        }
    }
}

struct SessionState {
    draft: DraftInput,
    phase: SubmissionPhase,
}

/// Owns the current field values and drives the submission lifecycle.
///
/// At most one prediction request is ever outstanding: `submit` refuses to
/// start while a request is in flight. Field edits are always allowed; they
/// affect only the next submission's snapshot, never the one already sent.
pub struct FormSession {
    backend: Arc<dyn ScoringBackend>,
    inner: Mutex<SessionState>,
}

impl FormSession {
    pub fn new(backend: Arc<dyn ScoringBackend>) -> Self {
        Self {
            backend,
            inner: Mutex::new(SessionState {
                draft: DraftInput::default(),
                phase: SubmissionPhase::Idle,
            }),
        }
    }

    /// Replaces a single field's value from raw input text. All other fields
    /// keep their prior values.
    pub async fn update_field(&self, key: FieldKey, raw: &str) {
        let mut inner = self.inner.lock().await;
        inner.draft = inner.draft.with_field(key, FieldValue::from_raw(raw));
    }

    pub async fn draft(&self) -> DraftInput {
        self.inner.lock().await.draft
    }

    pub async fn phase(&self) -> SubmissionPhase {
        self.inner.lock().await.phase.clone()
    }

    /// Submits the current draft to the scoring service and resolves the
    /// phase to `Completed` or `Failed`. A no-op while a submission is
    /// already in flight. Returns the phase after this call.
    pub async fn submit(&self) -> SubmissionPhase {
        let snapshot = {
            let mut inner = self.inner.lock().await;
            if inner.phase.is_loading() {
                info!("submit ignored: a prediction request is already in flight");
                return inner.phase.clone();
            }
            match inner.draft.snapshot() {
                Ok(snapshot) => {
                    inner.phase = SubmissionPhase::InFlight;
                    snapshot
                }
                Err(err) => {
                    inner.phase = SubmissionPhase::Failed(err.to_string());
                    return inner.phase.clone();
                }
            }
        };

        // The snapshot is a value copy; edits made while the request is in
        // flight cannot affect it.
        let resolved = match self.backend.predict(&snapshot).await {
            Ok(result) => SubmissionPhase::Completed(result),
            Err(err) => {
                warn!("prediction request failed: {err}");
                SubmissionPhase::Failed(err.to_string())
            }
        };

        let mut inner = self.inner.lock().await;
        inner.phase = resolved.clone();
        resolved
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
