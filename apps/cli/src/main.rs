use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use client_core::{config, FormSession, HttpScoringClient, ScoringBackend, SubmissionPhase};
use shared::domain::FieldKey;

/// Command-line form for the CHD risk scoring service: fill in the fourteen
/// patient measurements and submit them for a 10-year risk prediction.
#[derive(Parser, Debug)]
#[command(name = "chd-predict")]
struct Args {
    /// Scoring service base URL (overrides client.toml and environment).
    #[arg(long)]
    api_url: Option<String>,

    /// Check service health instead of submitting a prediction.
    #[arg(long)]
    health: bool,

    /// Gender (1=Male, 0=Female)
    #[arg(long, default_value = "1")]
    male: String,
    /// Age
    #[arg(long, default_value = "32")]
    age: String,
    /// Current Smoker (1/0)
    #[arg(long, default_value = "0")]
    current_smoker: String,
    /// Cigarettes/day
    #[arg(long, default_value = "0")]
    cigs_per_day: String,
    /// BP Meds (1/0)
    #[arg(long, default_value = "0")]
    bp_meds: String,
    /// Prevalent Stroke (1/0)
    #[arg(long, default_value = "0")]
    prevalent_stroke: String,
    /// Prevalent Hypertension (1/0)
    #[arg(long, default_value = "0")]
    prevalent_hyp: String,
    /// Diabetes (1/0)
    #[arg(long, default_value = "0")]
    diabetes: String,
    /// Total Cholesterol
    #[arg(long, default_value = "170")]
    tot_chol: String,
    /// Systolic BP
    #[arg(long, default_value = "120")]
    sys_bp: String,
    /// Diastolic BP
    #[arg(long, default_value = "80")]
    dia_bp: String,
    /// BMI
    #[arg(long, default_value = "24")]
    bmi: String,
    /// Heart Rate
    #[arg(long, default_value = "70")]
    heart_rate: String,
    /// Glucose
    #[arg(long, default_value = "90")]
    glucose: String,
}

impl Args {
    fn field_entries(&self) -> [(FieldKey, &str); 14] {
        [
            (FieldKey::Male, self.male.as_str()),
            (FieldKey::Age, self.age.as_str()),
            (FieldKey::CurrentSmoker, self.current_smoker.as_str()),
            (FieldKey::CigsPerDay, self.cigs_per_day.as_str()),
            (FieldKey::BpMeds, self.bp_meds.as_str()),
            (FieldKey::PrevalentStroke, self.prevalent_stroke.as_str()),
            (FieldKey::PrevalentHyp, self.prevalent_hyp.as_str()),
            (FieldKey::Diabetes, self.diabetes.as_str()),
            (FieldKey::TotChol, self.tot_chol.as_str()),
            (FieldKey::SysBp, self.sys_bp.as_str()),
            (FieldKey::DiaBp, self.dia_bp.as_str()),
            (FieldKey::Bmi, self.bmi.as_str()),
            (FieldKey::HeartRate, self.heart_rate.as_str()),
            (FieldKey::Glucose, self.glucose.as_str()),
        ]
    }
}

fn format_percent(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(api_url) = args.api_url.clone() {
        settings.api_url = api_url;
    }
    let backend = Arc::new(HttpScoringClient::new(settings.api_url.clone()));

    if args.health {
        let status = backend
            .health()
            .await
            .map_err(|err| anyhow!(err.to_string()))?;
        println!("Scoring service at {}: {}", settings.api_url, status.status);
        return Ok(());
    }

    let session = FormSession::new(backend);
    for (key, raw) in args.field_entries() {
        session.update_field(key, raw).await;
    }

    match session.submit().await {
        SubmissionPhase::Completed(result) => {
            println!("{}", result.message);
            println!(
                "Probability (positive class): {}",
                format_percent(result.probability)
            );
            Ok(())
        }
        SubmissionPhase::Failed(message) => Err(anyhow!(message)),
        phase @ (SubmissionPhase::Idle | SubmissionPhase::InFlight) => {
            Err(anyhow!("submission did not resolve: {phase:?}"))
        }
    }
}
