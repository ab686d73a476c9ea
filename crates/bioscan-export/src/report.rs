use jiff::civil::Date;
use serde::Serialize;

use bioscan_core::clinical::{
    self, Comparison, HomaIr, MetabolicSyndromeReport, COMPARISON_RANGES,
};
use bioscan_core::models::assessment::AssessmentData;
use bioscan_core::models::measurement::Field;
use bioscan_core::models::screening::AnalysisResult;

pub const REPORT_TITLE: &str = "BioScan AI";
pub const REPORT_SUBTITLE: &str = "Metabolic Assessment Report";
pub const REPORT_FOOTER: &str = "Powered by BioScan AI Medical Engine • Not a diagnosis";

/// Markers listed under "Key Biomarkers", in print order, with their
/// report captions.
pub const KEY_BIOMARKERS: [(Field, &str); 4] = [
    (Field::Fpg, "Fasting Glucose"),
    (Field::Hba1c, "HbA1c"),
    (Field::Triglycerides, "Triglycerides"),
    (Field::Ldl, "LDL"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanItem {
    pub title: &'static str,
    pub description: &'static str,
}

pub const PLAN_ITEMS: [PlanItem; 3] = [
    PlanItem {
        title: "Dietary Adjustments",
        description: "Reduce refined carbs and increase fiber intake.",
    },
    PlanItem {
        title: "Exercise Plan",
        description: "At least 150 min of moderate activity per week.",
    },
    PlanItem {
        title: "Sleep Hygiene",
        description: "Maintain consistent 7-8 hours of sleep.",
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiomarkerLine {
    pub label: &'static str,
    /// As entered; empty when the field was left blank.
    pub value: String,
    pub unit: &'static str,
    /// Outside its reference range. Only markers with a range can be flagged.
    pub flagged: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomaLine {
    /// One decimal place.
    pub index: String,
    pub band: &'static str,
}

impl From<HomaIr> for HomaLine {
    fn from(h: HomaIr) -> Self {
        Self {
            index: format!("{:.1}", h.index),
            band: h.band.label(),
        }
    }
}

/// Everything the report template can reference.
#[derive(Debug, Clone, Serialize)]
pub struct ReportContext {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub date: String,
    pub patient_ref: Option<String>,
    pub biomarkers: Vec<BiomarkerLine>,
    pub comparisons: Vec<Comparison>,
    pub syndrome: MetabolicSyndromeReport,
    pub syndrome_total: usize,
    pub homa_ir: Option<HomaLine>,
    pub analysis: Option<AnalysisResult>,
    pub risk_level: Option<&'static str>,
    pub plan: Vec<PlanItem>,
    pub footer: &'static str,
}

impl ReportContext {
    pub fn build(data: &AssessmentData, analysis: Option<&AnalysisResult>, date: Date) -> Self {
        let syndrome = clinical::metabolic_syndrome(data);
        Self {
            title: REPORT_TITLE,
            subtitle: REPORT_SUBTITLE,
            date: date.strftime("%b %d, %Y").to_string(),
            patient_ref: None,
            biomarkers: KEY_BIOMARKERS
                .iter()
                .map(|&(field, label)| biomarker_line(data, field, label))
                .collect(),
            comparisons: clinical::compare_all(data),
            syndrome_total: syndrome.criteria.len(),
            syndrome,
            homa_ir: clinical::homa_ir(data).map(HomaLine::from),
            risk_level: analysis.map(|a| a.effective_risk_level().label()),
            analysis: analysis.cloned(),
            plan: PLAN_ITEMS.to_vec(),
            footer: REPORT_FOOTER,
        }
    }

    pub fn with_patient_ref(mut self, patient_ref: impl Into<String>) -> Self {
        self.patient_ref = Some(patient_ref.into());
        self
    }
}

fn biomarker_line(data: &AssessmentData, field: Field, label: &'static str) -> BiomarkerLine {
    let flagged = match (
        COMPARISON_RANGES.iter().find(|r| r.field == field),
        data.value(field),
    ) {
        (Some(range), Some(value)) => !range.is_normal(value),
        _ => false,
    };
    BiomarkerLine {
        label,
        value: data.measurement(field).raw().trim().to_string(),
        unit: field.unit(),
        flagged,
    }
}
