use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{FieldError, FieldErrorReason};

/// Every numeric field collected by the assessment wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Field {
    // Demographics
    Age,
    Height,
    Weight,
    // Vitals
    Systolic,
    Diastolic,
    HeartRate,
    Waist,
    // Glucose
    Fpg,
    Ppg,
    Hba1c,
    // Lipids
    TotalCholesterol,
    Ldl,
    Hdl,
    Triglycerides,
    // Kidney
    Creatinine,
    Bun,
    // Liver
    Alt,
    Ast,
    Ggt,
    // Hormones
    Insulin,
    Tsh,
    // Inflammation
    Hscrp,
    Esr,
}

impl Field {
    pub const ALL: [Field; 23] = [
        Field::Age,
        Field::Height,
        Field::Weight,
        Field::Systolic,
        Field::Diastolic,
        Field::HeartRate,
        Field::Waist,
        Field::Fpg,
        Field::Ppg,
        Field::Hba1c,
        Field::TotalCholesterol,
        Field::Ldl,
        Field::Hdl,
        Field::Triglycerides,
        Field::Creatinine,
        Field::Bun,
        Field::Alt,
        Field::Ast,
        Field::Ggt,
        Field::Insulin,
        Field::Tsh,
        Field::Hscrp,
        Field::Esr,
    ];

    /// Label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Age => "Age",
            Field::Height => "Height",
            Field::Weight => "Weight",
            Field::Systolic => "Systolic (Top)",
            Field::Diastolic => "Diastolic (Bottom)",
            Field::HeartRate => "Resting Heart Rate",
            Field::Waist => "Waist Circumference (Optional)",
            Field::Fpg => "FPG",
            Field::Ppg => "PPG",
            Field::Hba1c => "HbA1c",
            Field::TotalCholesterol => "Total Cholesterol",
            Field::Ldl => "LDL",
            Field::Hdl => "HDL",
            Field::Triglycerides => "Triglycerides",
            Field::Creatinine => "Creatinine",
            Field::Bun => "BUN",
            Field::Alt => "ALT",
            Field::Ast => "AST",
            Field::Ggt => "GGT",
            Field::Insulin => "Fasting Insulin",
            Field::Tsh => "TSH",
            Field::Hscrp => "hs-CRP",
            Field::Esr => "ESR",
        }
    }

    /// Unit suffix shown inside the input.
    pub fn unit(&self) -> &'static str {
        match self {
            Field::Age => "years",
            Field::Height | Field::Waist => "cm",
            Field::Weight => "kg",
            Field::Systolic | Field::Diastolic => "mmHg",
            Field::HeartRate => "bpm",
            Field::Fpg
            | Field::Ppg
            | Field::TotalCholesterol
            | Field::Ldl
            | Field::Hdl
            | Field::Triglycerides
            | Field::Creatinine
            | Field::Bun => "mg/dL",
            Field::Hba1c => "%",
            Field::Alt | Field::Ast | Field::Ggt => "U/L",
            Field::Insulin => "μIU/mL",
            Field::Tsh => "mIU/L",
            Field::Hscrp => "mg/L",
            Field::Esr => "mm/hr",
        }
    }

    /// Stable snake_case key, identical to the serde representation.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Age => "age",
            Field::Height => "height",
            Field::Weight => "weight",
            Field::Systolic => "systolic",
            Field::Diastolic => "diastolic",
            Field::HeartRate => "heart_rate",
            Field::Waist => "waist",
            Field::Fpg => "fpg",
            Field::Ppg => "ppg",
            Field::Hba1c => "hba1c",
            Field::TotalCholesterol => "total_cholesterol",
            Field::Ldl => "ldl",
            Field::Hdl => "hdl",
            Field::Triglycerides => "triglycerides",
            Field::Creatinine => "creatinine",
            Field::Bun => "bun",
            Field::Alt => "alt",
            Field::Ast => "ast",
            Field::Ggt => "ggt",
            Field::Insulin => "insulin",
            Field::Tsh => "tsh",
            Field::Hscrp => "hscrp",
            Field::Esr => "esr",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Whether the field belongs to the lab-data section rather than intake.
    pub fn is_lab_value(&self) -> bool {
        !matches!(
            self,
            Field::Age
                | Field::Height
                | Field::Weight
                | Field::Systolic
                | Field::Diastolic
                | Field::HeartRate
                | Field::Waist
        )
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A numeric value exactly as the user typed it.
///
/// Entry never rejects text; the value is only checked when the assessment
/// is validated for submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Measurement(String);

impl Measurement {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn raw(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Lenient parse for display purposes. Anything unparseable is `None`.
    pub fn value(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Strict parse used at submission. Blank is allowed and yields `None`.
    pub fn validate(&self, field: Field) -> Result<Option<f64>, FieldError> {
        let trimmed = self.0.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let fail = |reason| FieldError {
            field,
            raw: self.0.clone(),
            reason,
        };
        let value: f64 = trimmed
            .parse()
            .map_err(|_| fail(FieldErrorReason::NotANumber))?;
        if !value.is_finite() {
            return Err(fail(FieldErrorReason::NotFinite));
        }
        if value < 0.0 {
            return Err(fail(FieldErrorReason::Negative));
        }
        Ok(Some(value))
    }
}

impl From<&str> for Measurement {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Measurement {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for Measurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
