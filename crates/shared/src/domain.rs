use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Identifier for one of the fourteen risk-factor fields.
///
/// The set is closed: the scoring service accepts exactly these keys and the
/// form renders exactly these inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKey {
    Male,
    Age,
    CurrentSmoker,
    CigsPerDay,
    BpMeds,
    PrevalentStroke,
    PrevalentHyp,
    Diabetes,
    TotChol,
    SysBp,
    DiaBp,
    Bmi,
    HeartRate,
    Glucose,
}

/// Binary indicators are constrained to {0,1}; continuous measurements are
/// any finite non-negative number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Binary,
    Continuous,
}

impl FieldKey {
    pub const ALL: [FieldKey; 14] = [
        FieldKey::Male,
        FieldKey::Age,
        FieldKey::CurrentSmoker,
        FieldKey::CigsPerDay,
        FieldKey::BpMeds,
        FieldKey::PrevalentStroke,
        FieldKey::PrevalentHyp,
        FieldKey::Diabetes,
        FieldKey::TotChol,
        FieldKey::SysBp,
        FieldKey::DiaBp,
        FieldKey::Bmi,
        FieldKey::HeartRate,
        FieldKey::Glucose,
    ];

    /// JSON key used on the wire. Spelling is owned by the scoring service.
    pub fn wire_name(self) -> &'static str {
        match self {
            FieldKey::Male => "male",
            FieldKey::Age => "age",
            FieldKey::CurrentSmoker => "currentSmoker",
            FieldKey::CigsPerDay => "cigsPerDay",
            FieldKey::BpMeds => "BPMeds",
            FieldKey::PrevalentStroke => "prevalentStroke",
            FieldKey::PrevalentHyp => "prevalentHyp",
            FieldKey::Diabetes => "diabetes",
            FieldKey::TotChol => "totChol",
            FieldKey::SysBp => "sysBP",
            FieldKey::DiaBp => "diaBP",
            FieldKey::Bmi => "BMI",
            FieldKey::HeartRate => "heartRate",
            FieldKey::Glucose => "glucose",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldKey::Male => "Gender (1=Male, 0=Female)",
            FieldKey::Age => "Age",
            FieldKey::CurrentSmoker => "Current Smoker (1/0)",
            FieldKey::CigsPerDay => "Cigarettes/day",
            FieldKey::BpMeds => "BP Meds (1/0)",
            FieldKey::PrevalentStroke => "Prevalent Stroke (1/0)",
            FieldKey::PrevalentHyp => "Prevalent Hypertension (1/0)",
            FieldKey::Diabetes => "Diabetes (1/0)",
            FieldKey::TotChol => "Total Cholesterol",
            FieldKey::SysBp => "Systolic BP",
            FieldKey::DiaBp => "Diastolic BP",
            FieldKey::Bmi => "BMI",
            FieldKey::HeartRate => "Heart Rate",
            FieldKey::Glucose => "Glucose",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            FieldKey::Male
            | FieldKey::CurrentSmoker
            | FieldKey::BpMeds
            | FieldKey::PrevalentStroke
            | FieldKey::PrevalentHyp
            | FieldKey::Diabetes => FieldKind::Binary,
            _ => FieldKind::Continuous,
        }
    }

    pub fn is_binary(self) -> bool {
        self.kind() == FieldKind::Binary
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldKey(pub String);

impl fmt::Display for UnknownFieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown risk-factor field '{}'", self.0)
    }
}

impl std::error::Error for UnknownFieldKey {}

impl FromStr for FieldKey {
    type Err = UnknownFieldKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .into_iter()
            .find(|key| key.wire_name() == s)
            .ok_or_else(|| UnknownFieldKey(s.to_string()))
    }
}
