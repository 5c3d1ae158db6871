use serde::{Deserialize, Serialize};

use crate::domain::FieldKey;

/// One patient's fourteen risk-factor measurements, as submitted per
/// prediction request. Field renames match the scoring service's wire keys
/// exactly; binary indicators carry 0.0 or 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskFactorInput {
    pub male: f64,
    pub age: f64,
    #[serde(rename = "currentSmoker")]
    pub current_smoker: f64,
    #[serde(rename = "cigsPerDay")]
    pub cigs_per_day: f64,
    #[serde(rename = "BPMeds")]
    pub bp_meds: f64,
    #[serde(rename = "prevalentStroke")]
    pub prevalent_stroke: f64,
    #[serde(rename = "prevalentHyp")]
    pub prevalent_hyp: f64,
    pub diabetes: f64,
    #[serde(rename = "totChol")]
    pub tot_chol: f64,
    #[serde(rename = "sysBP")]
    pub sys_bp: f64,
    #[serde(rename = "diaBP")]
    pub dia_bp: f64,
    #[serde(rename = "BMI")]
    pub bmi: f64,
    #[serde(rename = "heartRate")]
    pub heart_rate: f64,
    pub glucose: f64,
}

impl RiskFactorInput {
    pub fn get(&self, key: FieldKey) -> f64 {
        match key {
            FieldKey::Male => self.male,
            FieldKey::Age => self.age,
            FieldKey::CurrentSmoker => self.current_smoker,
            FieldKey::CigsPerDay => self.cigs_per_day,
            FieldKey::BpMeds => self.bp_meds,
            FieldKey::PrevalentStroke => self.prevalent_stroke,
            FieldKey::PrevalentHyp => self.prevalent_hyp,
            FieldKey::Diabetes => self.diabetes,
            FieldKey::TotChol => self.tot_chol,
            FieldKey::SysBp => self.sys_bp,
            FieldKey::DiaBp => self.dia_bp,
            FieldKey::Bmi => self.bmi,
            FieldKey::HeartRate => self.heart_rate,
            FieldKey::Glucose => self.glucose,
        }
    }

    pub fn set(&mut self, key: FieldKey, value: f64) {
        match key {
            FieldKey::Male => self.male = value,
            FieldKey::Age => self.age = value,
            FieldKey::CurrentSmoker => self.current_smoker = value,
            FieldKey::CigsPerDay => self.cigs_per_day = value,
            FieldKey::BpMeds => self.bp_meds = value,
            FieldKey::PrevalentStroke => self.prevalent_stroke = value,
            FieldKey::PrevalentHyp => self.prevalent_hyp = value,
            FieldKey::Diabetes => self.diabetes = value,
            FieldKey::TotChol => self.tot_chol = value,
            FieldKey::SysBp => self.sys_bp = value,
            FieldKey::DiaBp => self.dia_bp = value,
            FieldKey::Bmi => self.bmi = value,
            FieldKey::HeartRate => self.heart_rate = value,
            FieldKey::Glucose => self.glucose = value,
        }
    }
}

impl Default for RiskFactorInput {
    /// The form's documented starting values.
    fn default() -> Self {
        Self {
            male: 1.0,
            age: 32.0,
            current_smoker: 0.0,
            cigs_per_day: 0.0,
            bp_meds: 0.0,
            prevalent_stroke: 0.0,
            prevalent_hyp: 0.0,
            diabetes: 0.0,
            tot_chol: 170.0,
            sys_bp: 120.0,
            dia_bp: 80.0,
            bmi: 24.0,
            heart_rate: 70.0,
            glucose: 90.0,
        }
    }
}

/// Typed response from the scoring service. Overwritten by each successful
/// submission; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// 0 = negative, 1 = positive risk class.
    pub prediction: i64,
    /// Service confidence in the positive class, in [0,1].
    pub probability: f64,
    /// Human-readable summary; wording owned by the service.
    pub message: String,
}

/// Error body the service attaches to non-2xx responses. `detail` is
/// optional; an absent or unparseable body falls back to the status code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
}
