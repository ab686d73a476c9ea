//! Seams to the external collaborators the wizard waits on.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;

use bioscan_core::clinical::{self, InsulinResistance};
use bioscan_core::models::assessment::AssessmentData;
use bioscan_core::models::measurement::Field;
use bioscan_core::models::screening::{AnalysisResult, RiskLevel};

use crate::error::WizardError;
use crate::flow::ExtractedValues;

/// Produces the analysis the result stages display.
pub trait AnalysisPort: Send + Sync {
    fn analyze(
        &self,
        data: Arc<AssessmentData>,
    ) -> BoxFuture<'static, Result<AnalysisResult, WizardError>>;
}

/// Reads lab values out of an uploaded report.
pub trait ExtractionPort: Send + Sync {
    fn extract(&self) -> BoxFuture<'static, Result<ExtractedValues, WizardError>>;
}

/// Local stand-in for the remote analysis, built from the display rules.
///
/// The score is a rough count of what the result stages flag, not a
/// clinical model.
#[derive(Debug, Clone, Default)]
pub struct SimulatedAnalysis;

impl SimulatedAnalysis {
    pub fn evaluate(data: &AssessmentData) -> AnalysisResult {
        let syndrome = clinical::metabolic_syndrome(data);
        let comparisons = clinical::compare_all(data);
        let homa = clinical::homa_ir(data);

        let syndrome_flags: Vec<String> = syndrome
            .criteria
            .iter()
            .filter(|c| c.status == clinical::CriterionStatus::Met)
            .map(|c| c.label.to_string())
            .collect();
        let abnormal_markers: Vec<String> = comparisons
            .iter()
            .filter(|c| c.value.is_some() && !c.normal)
            .map(|c| c.label.to_string())
            .collect();

        let mut insights: Vec<String> = abnormal_markers
            .iter()
            .map(|label| format!("{label} is outside the target range."))
            .collect();
        if let Some(homa) = homa
            && matches!(
                homa.band,
                InsulinResistance::EarlyResistance | InsulinResistance::SignificantResistance
            )
        {
            insights.push(format!(
                "HOMA-IR of {:.1} suggests {}.",
                homa.index,
                homa.band.label().to_lowercase()
            ));
        }
        if syndrome.present {
            insights.push(format!(
                "{} of 5 metabolic syndrome criteria are met.",
                syndrome.met
            ));
        }

        let score = (syndrome.met * 12 + abnormal_markers.len() * 8).min(100) as u8;
        AnalysisResult {
            id: None,
            screening: None,
            metabolic_score: score,
            risk_level: Some(RiskLevel::from_score(score)),
            insights,
            diabetes_risk_1yr: None,
            diabetes_risk_5yr: None,
            heart_risk: None,
            fatty_liver_risk: None,
            syndrome_flags,
            abnormal_markers,
        }
    }
}

impl AnalysisPort for SimulatedAnalysis {
    fn analyze(
        &self,
        data: Arc<AssessmentData>,
    ) -> BoxFuture<'static, Result<AnalysisResult, WizardError>> {
        async move { Ok(SimulatedAnalysis::evaluate(&data)) }.boxed()
    }
}

/// Values the demo extraction "reads" from any upload.
pub const MOCK_EXTRACTION: [(Field, &str); 6] = [
    (Field::Fpg, "108"),
    (Field::Hba1c, "5.9"),
    (Field::Ldl, "145"),
    (Field::Hdl, "42"),
    (Field::Triglycerides, "160"),
    (Field::Tsh, "2.5"),
];

/// Extraction that returns [`MOCK_EXTRACTION`] after an optional delay.
#[derive(Debug, Clone, Default)]
pub struct MockExtraction {
    pub delay: Duration,
}

impl ExtractionPort for MockExtraction {
    fn extract(&self) -> BoxFuture<'static, Result<ExtractedValues, WizardError>> {
        let delay = self.delay;
        async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            Ok(MOCK_EXTRACTION
                .iter()
                .map(|(field, value)| (*field, (*value).into()))
                .collect())
        }
        .boxed()
    }
}
