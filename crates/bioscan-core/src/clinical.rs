//! Display rules behind the result stages: metabolic-syndrome criteria,
//! reference-range comparison bars, and the HOMA-IR insulin index.
//!
//! Thresholds are taken from the range labels the stages print (for example
//! "≥ 130/85 mmHg"), so the label and the comparison can never disagree.

use serde::{Deserialize, Serialize};

use crate::models::assessment::AssessmentData;
use crate::models::lifestyle::Gender;
use crate::models::measurement::Field;

// ── Metabolic syndrome ───────────────────────────────────────────────────────

/// Number of met criteria at which the syndrome is considered present.
pub const SYNDROME_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionStatus {
    Met,
    NotMet,
    /// The value needed to decide was blank or unparseable.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionResult {
    pub label: &'static str,
    pub target: &'static str,
    pub status: CriterionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetabolicSyndromeReport {
    pub criteria: Vec<CriterionResult>,
    pub met: usize,
    pub present: bool,
}

fn status(value: Option<bool>) -> CriterionStatus {
    match value {
        Some(true) => CriterionStatus::Met,
        Some(false) => CriterionStatus::NotMet,
        None => CriterionStatus::Unknown,
    }
}

/// Evaluate the five metabolic-syndrome criteria against `data`.
///
/// Sex-specific cut-offs use the female threshold only when the record says
/// female; any other value uses the male threshold.
pub fn metabolic_syndrome(data: &AssessmentData) -> MetabolicSyndromeReport {
    let female = data.gender == Some(Gender::Female);

    let blood_pressure = match (data.value(Field::Systolic), data.value(Field::Diastolic)) {
        (None, None) => None,
        (sys, dia) => Some(sys.is_some_and(|s| s >= 130.0) || dia.is_some_and(|d| d >= 85.0)),
    };
    let hdl_cutoff = if female { 50.0 } else { 40.0 };
    let waist_cutoff = if female { 80.0 } else { 90.0 };

    let criteria = vec![
        CriterionResult {
            label: "Blood Pressure",
            target: "≥ 130/85 mmHg",
            status: status(blood_pressure),
        },
        CriterionResult {
            label: "Fasting Glucose",
            target: "≥ 100 mg/dL",
            status: status(data.value(Field::Fpg).map(|v| v >= 100.0)),
        },
        CriterionResult {
            label: "Triglycerides",
            target: "≥ 150 mg/dL",
            status: status(data.value(Field::Triglycerides).map(|v| v >= 150.0)),
        },
        CriterionResult {
            label: "HDL Cholesterol",
            target: "< 40 mg/dL (M) / 50 (F)",
            status: status(data.value(Field::Hdl).map(|v| v < hdl_cutoff)),
        },
        CriterionResult {
            label: "Waist Circumference",
            target: "> 90 cm (M) / 80 (F)",
            status: status(data.value(Field::Waist).map(|v| v > waist_cutoff)),
        },
    ];

    let met = criteria
        .iter()
        .filter(|c| c.status == CriterionStatus::Met)
        .count();

    MetabolicSyndromeReport {
        criteria,
        met,
        present: met >= SYNDROME_THRESHOLD,
    }
}

// ── Reference-range comparison ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceRange {
    pub field: Field,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub higher_is_better: bool,
}

/// The four markers shown on the normal-range comparison stage.
pub const COMPARISON_RANGES: [ReferenceRange; 4] = [
    ReferenceRange {
        field: Field::Fpg,
        label: "Fasting Glucose",
        min: 70.0,
        max: 100.0,
        higher_is_better: false,
    },
    ReferenceRange {
        field: Field::Ldl,
        label: "LDL Cholesterol",
        min: 0.0,
        max: 100.0,
        higher_is_better: false,
    },
    ReferenceRange {
        field: Field::Triglycerides,
        label: "Triglycerides",
        min: 0.0,
        max: 150.0,
        higher_is_better: false,
    },
    ReferenceRange {
        field: Field::Hdl,
        label: "HDL Cholesterol",
        min: 40.0,
        max: 60.0,
        higher_is_better: true,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub label: &'static str,
    pub value: Option<f64>,
    pub unit: &'static str,
    pub normal: bool,
    /// Marker offset along the bar, 0.0 (left) to 1.0 (right).
    pub position: f64,
}

impl ReferenceRange {
    pub fn is_normal(&self, value: f64) -> bool {
        if self.higher_is_better {
            value >= self.min
        } else {
            value <= self.max
        }
    }

    /// Bar extent: the target range padded on both sides.
    pub fn display_bounds(&self) -> (f64, f64) {
        let buffer = (self.max - self.min).max(self.max * 0.2);
        ((self.min - buffer).max(0.0), self.max + buffer)
    }

    pub fn position(&self, value: f64) -> f64 {
        let (lo, hi) = self.display_bounds();
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    }

    /// A missing value is drawn as zero, at the left edge of the bar.
    pub fn compare(&self, data: &AssessmentData) -> Comparison {
        let value = data.value(self.field);
        let numeric = value.unwrap_or(0.0);
        Comparison {
            label: self.label,
            value,
            unit: self.field.unit(),
            normal: self.is_normal(numeric),
            position: self.position(numeric),
        }
    }
}

pub fn compare_all(data: &AssessmentData) -> Vec<Comparison> {
    COMPARISON_RANGES.iter().map(|r| r.compare(data)).collect()
}

// ── HOMA-IR ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsulinResistance {
    Optimal,
    Normal,
    EarlyResistance,
    SignificantResistance,
}

impl InsulinResistance {
    pub fn from_index(index: f64) -> Self {
        if index < 1.0 {
            InsulinResistance::Optimal
        } else if index < 1.9 {
            InsulinResistance::Normal
        } else if index <= 3.0 {
            InsulinResistance::EarlyResistance
        } else {
            InsulinResistance::SignificantResistance
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InsulinResistance::Optimal => "Optimal",
            InsulinResistance::Normal => "Normal",
            InsulinResistance::EarlyResistance => "Early Resistance",
            InsulinResistance::SignificantResistance => "Significant Resistance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomaIr {
    pub index: f64,
    pub band: InsulinResistance,
}

/// HOMA-IR from fasting glucose (mg/dL) and fasting insulin (μIU/mL).
pub fn homa_ir(data: &AssessmentData) -> Option<HomaIr> {
    let glucose = data.value(Field::Fpg)?;
    let insulin = data.value(Field::Insulin)?;
    let index = glucose * insulin / 405.0;
    Some(HomaIr {
        index,
        band: InsulinResistance::from_index(index),
    })
}
