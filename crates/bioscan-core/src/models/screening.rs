//! Wire shapes exchanged with the remote screening API.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::assessment::ValidatedAssessment;
use super::lifestyle::Choice;
use super::measurement::Field;

// ── Auth & accounts ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    Doctor,
    Patient,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Access/refresh pair returned by the login and refresh endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    /// The refresh endpoint only returns a new access token.
    #[serde(default)]
    pub refresh: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub profile_photo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DoctorProfile {
    pub id: i64,
    pub user: User,
    pub hospital_name: String,
    pub specialization: String,
    pub license_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientProfile {
    pub id: i64,
    pub user: User,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    #[serde(default)]
    pub lifestyle_data: Option<serde_json::Value>,
    #[serde(default)]
    pub family_history: Vec<String>,
    #[serde(default)]
    pub conditions: Vec<String>,
}

// ── Screenings ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Screening {
    pub id: i64,
    pub patient: i64,
    pub doctor: Option<i64>,
    pub status: String,
    #[serde(default)]
    pub vitals: Option<serde_json::Value>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    pub created_at: jiff::Timestamp,
    #[serde(default)]
    pub biomarker_panel: Option<BiomarkerPanel>,
}

/// Body of `POST screenings/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewScreening {
    pub vitals: serde_json::Value,
    pub symptoms: Vec<String>,
    pub lifestyle_data: serde_json::Value,
    pub family_history: Vec<String>,
    pub conditions: Vec<String>,
}

impl NewScreening {
    pub fn from_assessment(assessment: &ValidatedAssessment) -> Self {
        let mut vitals = serde_json::Map::new();
        for field in [
            Field::Age,
            Field::Height,
            Field::Weight,
            Field::Systolic,
            Field::Diastolic,
            Field::HeartRate,
            Field::Waist,
        ] {
            if let Some(v) = assessment.get(field) {
                vitals.insert(field.key().to_string(), serde_json::json!(v));
            }
        }
        if let Some(gender) = assessment.gender {
            vitals.insert("gender".to_string(), serde_json::json!(gender.label()));
        }

        let lifestyle_data = serde_json::json!({
            "smoking_status": assessment.smoking_status.map(|s| s.label()),
            "alcohol": assessment.alcohol.map(|a| a.label()),
            "sleep": assessment.sleep.map(|s| s.label()),
            "physical_activity": assessment.physical_activity.map(|p| p.label()),
        });

        Self {
            vitals: serde_json::Value::Object(vitals),
            symptoms: assessment.symptoms.iter().map(str::to_string).collect(),
            lifestyle_data,
            family_history: assessment
                .family_history
                .iter()
                .map(str::to_string)
                .collect(),
            conditions: assessment
                .medical_history
                .iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Lab values attached to a screening. Keys follow the backend's naming.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BiomarkerPanel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screening: Option<i64>,
    pub glucose_fasting: Option<f64>,
    pub glucose_pp: Option<f64>,
    pub hba1c: Option<f64>,
    pub hdl: Option<f64>,
    pub ldl: Option<f64>,
    pub triglycerides: Option<f64>,
    pub cholesterol: Option<f64>,
    pub creatinine: Option<f64>,
    pub urea: Option<f64>,
    pub alt: Option<f64>,
    pub ast: Option<f64>,
    pub insulin: Option<f64>,
    pub tsh: Option<f64>,
    pub crp: Option<f64>,
    pub esr: Option<f64>,
}

impl BiomarkerPanel {
    pub fn from_assessment(assessment: &ValidatedAssessment) -> Self {
        let v = |f| assessment.get(f);
        Self {
            id: None,
            screening: None,
            glucose_fasting: v(Field::Fpg),
            glucose_pp: v(Field::Ppg),
            hba1c: v(Field::Hba1c),
            hdl: v(Field::Hdl),
            ldl: v(Field::Ldl),
            triglycerides: v(Field::Triglycerides),
            cholesterol: v(Field::TotalCholesterol),
            creatinine: v(Field::Creatinine),
            urea: v(Field::Bun),
            alt: v(Field::Alt),
            ast: v(Field::Ast),
            insulin: v(Field::Insulin),
            tsh: v(Field::Tsh),
            crp: v(Field::Hscrp),
            esr: v(Field::Esr),
        }
    }
}

// ── Analysis ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Band a 0–100 metabolic score the same way the backend does.
    pub fn from_score(score: u8) -> Self {
        if score > 60 {
            RiskLevel::High
        } else if score > 30 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }
}

/// Result of a remote analysis run, as consumed by the result stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnalysisResult {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub screening: Option<i64>,
    pub metabolic_score: u8,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub diabetes_risk_1yr: Option<f64>,
    #[serde(default)]
    pub diabetes_risk_5yr: Option<f64>,
    #[serde(default)]
    pub heart_risk: Option<f64>,
    #[serde(default)]
    pub fatty_liver_risk: Option<f64>,
    #[serde(default)]
    pub syndrome_flags: Vec<String>,
    #[serde(default)]
    pub abnormal_markers: Vec<String>,
}

impl AnalysisResult {
    /// Risk level as reported, or derived from the score when absent.
    pub fn effective_risk_level(&self) -> RiskLevel {
        self.risk_level
            .unwrap_or_else(|| RiskLevel::from_score(self.metabolic_score))
    }
}
