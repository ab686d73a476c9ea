//! Wizard step model.
//!
//! The product addresses screens by an integer pair `(step, sub_step)`.
//! Inside the crate every screen is a [`WizardStep`] variant, so pairs that
//! name no screen cannot be held at all; [`WizardPosition`] exists only at
//! the boundary and converts in both directions.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use bioscan_core::models::measurement::Field;

use crate::error::WizardError;

/// Linear questionnaire sections, steps 1–7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Section {
    Demographics,
    Lifestyle,
    FamilyHistory,
    MedicalHistory,
    Vitals,
    Symptoms,
    Review,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Demographics,
        Section::Lifestyle,
        Section::FamilyHistory,
        Section::MedicalHistory,
        Section::Vitals,
        Section::Symptoms,
        Section::Review,
    ];

    pub fn number(&self) -> u8 {
        match self {
            Section::Demographics => 1,
            Section::Lifestyle => 2,
            Section::FamilyHistory => 3,
            Section::MedicalHistory => 4,
            Section::Vitals => 5,
            Section::Symptoms => 6,
            Section::Review => 7,
        }
    }

    pub fn from_number(n: u8) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.number() == n)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Demographics => "Basic Information",
            Section::Lifestyle => "Lifestyle",
            Section::FamilyHistory => "Family History",
            Section::MedicalHistory => "Medical History",
            Section::Vitals => "Vital Signs",
            Section::Symptoms => "Symptoms",
            Section::Review => "Review Data",
        }
    }

    /// Numeric fields typed on this section.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Section::Demographics => &[Field::Age, Field::Height, Field::Weight],
            Section::Vitals => &[
                Field::Systolic,
                Field::Diastolic,
                Field::HeartRate,
                Field::Waist,
            ],
            _ => &[],
        }
    }

    pub fn next(&self) -> Option<Section> {
        Section::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<Section> {
        Section::from_number(self.number() - 1)
    }
}

/// Lab-entry panels, sub-steps 1–6 of step 8.
///
/// Sub-step 7 has no panel. Next from [`LabPanel::Inflammation`] goes
/// straight to the biomarker review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LabPanel {
    Glucose,
    Lipid,
    Kidney,
    Liver,
    Hormone,
    Inflammation,
}

impl LabPanel {
    pub const ALL: [LabPanel; 6] = [
        LabPanel::Glucose,
        LabPanel::Lipid,
        LabPanel::Kidney,
        LabPanel::Liver,
        LabPanel::Hormone,
        LabPanel::Inflammation,
    ];

    pub fn number(&self) -> u8 {
        match self {
            LabPanel::Glucose => 1,
            LabPanel::Lipid => 2,
            LabPanel::Kidney => 3,
            LabPanel::Liver => 4,
            LabPanel::Hormone => 5,
            LabPanel::Inflammation => 6,
        }
    }

    pub fn from_number(n: u8) -> Option<LabPanel> {
        LabPanel::ALL.into_iter().find(|p| p.number() == n)
    }

    pub fn title(&self) -> &'static str {
        match self {
            LabPanel::Glucose => "Glucose Profile",
            LabPanel::Lipid => "Lipid Profile",
            LabPanel::Kidney => "Kidney Function",
            LabPanel::Liver => "Liver Function",
            LabPanel::Hormone => "Hormone Panel",
            LabPanel::Inflammation => "Inflammation",
        }
    }

    pub fn fields(&self) -> &'static [Field] {
        match self {
            LabPanel::Glucose => &[Field::Fpg, Field::Ppg, Field::Hba1c],
            LabPanel::Lipid => &[
                Field::TotalCholesterol,
                Field::Ldl,
                Field::Hdl,
                Field::Triglycerides,
            ],
            LabPanel::Kidney => &[Field::Creatinine, Field::Bun],
            LabPanel::Liver => &[Field::Alt, Field::Ast, Field::Ggt],
            LabPanel::Hormone => &[Field::Insulin, Field::Tsh],
            LabPanel::Inflammation => &[Field::Hscrp, Field::Esr],
        }
    }

    pub fn next(&self) -> Option<LabPanel> {
        LabPanel::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<LabPanel> {
        LabPanel::from_number(self.number() - 1)
    }
}

/// Result presentation stages, steps 10–18. Step 19 is [`WizardStep::Report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ResultStage {
    Overview,
    Comparison,
    Patterns,
    Insulin,
    Heart,
    MetabolicSyndrome,
    RiskAssessment,
    DiabetesRisk,
    Plan,
}

impl ResultStage {
    pub const ALL: [ResultStage; 9] = [
        ResultStage::Overview,
        ResultStage::Comparison,
        ResultStage::Patterns,
        ResultStage::Insulin,
        ResultStage::Heart,
        ResultStage::MetabolicSyndrome,
        ResultStage::RiskAssessment,
        ResultStage::DiabetesRisk,
        ResultStage::Plan,
    ];

    pub fn number(&self) -> u8 {
        match self {
            ResultStage::Overview => 10,
            ResultStage::Comparison => 11,
            ResultStage::Patterns => 12,
            ResultStage::Insulin => 13,
            ResultStage::Heart => 14,
            ResultStage::MetabolicSyndrome => 15,
            ResultStage::RiskAssessment => 16,
            ResultStage::DiabetesRisk => 17,
            ResultStage::Plan => 18,
        }
    }

    pub fn from_number(n: u8) -> Option<ResultStage> {
        ResultStage::ALL.into_iter().find(|s| s.number() == n)
    }

    pub fn title(&self) -> &'static str {
        match self {
            ResultStage::Overview => "AI Analysis Results",
            ResultStage::Comparison => "Analysis: Comparison",
            ResultStage::Patterns => "Analysis: Patterns",
            ResultStage::Insulin => "Analysis: Insulin",
            ResultStage::Heart => "Analysis: Heart",
            ResultStage::MetabolicSyndrome => "Metabolic Syndrome",
            ResultStage::RiskAssessment => "Risk Assessment",
            ResultStage::DiabetesRisk => "Diabetes Risk",
            ResultStage::Plan => "Your Plan",
        }
    }

    /// Label of the button that leaves this stage.
    pub fn next_label(&self) -> &'static str {
        match self {
            ResultStage::Overview => "Verify & Continue",
            ResultStage::Comparison => "Next: Pattern Detection",
            ResultStage::Patterns => "Next: Insulin Analysis",
            ResultStage::Insulin => "Next: Heart Risk",
            ResultStage::Heart => "Next: Metabolic Syndrome",
            ResultStage::MetabolicSyndrome => "Next: Risk Assessment",
            ResultStage::RiskAssessment => "Next: Diabetes Risk",
            ResultStage::DiabetesRisk => "Next: Your Plan",
            ResultStage::Plan => "View Full Report",
        }
    }

    pub fn next(&self) -> Option<ResultStage> {
        ResultStage::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<ResultStage> {
        ResultStage::from_number(self.number() - 1)
    }
}

/// Every screen of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum WizardStep {
    /// Entry screen with its own start and back buttons.
    #[default]
    Intro,
    Section(Section),
    /// Manual entry vs. AI extraction chooser.
    LabMethod,
    LabPanel(LabPanel),
    LabReview,
    /// Timed analysis sequence, advances on its own.
    Analyzing,
    Result(ResultStage),
    /// Terminal report screen.
    Report,
}

/// The integer address of a screen as the product and hosts see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WizardPosition {
    pub step: u8,
    pub sub_step: u8,
}

/// Sub-step value held on every step after the lab section.
pub const REVIEW_SUB_STEP: u8 = 8;

impl WizardPosition {
    pub fn new(step: u8, sub_step: u8) -> Self {
        Self { step, sub_step }
    }
}

impl fmt::Display for WizardPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.step, self.sub_step)
    }
}

impl WizardStep {
    /// All screens in forward order.
    pub fn all() -> Vec<WizardStep> {
        let mut steps = vec![WizardStep::Intro];
        steps.extend(Section::ALL.into_iter().map(WizardStep::Section));
        steps.push(WizardStep::LabMethod);
        steps.extend(LabPanel::ALL.into_iter().map(WizardStep::LabPanel));
        steps.push(WizardStep::LabReview);
        steps.push(WizardStep::Analyzing);
        steps.extend(ResultStage::ALL.into_iter().map(WizardStep::Result));
        steps.push(WizardStep::Report);
        steps
    }

    /// Sections report sub-step 0; once the lab section has been reviewed the
    /// sub-step stays at 8 for the rest of the flow.
    pub fn position(&self) -> WizardPosition {
        match self {
            WizardStep::Intro => WizardPosition::new(0, 0),
            WizardStep::Section(s) => WizardPosition::new(s.number(), 0),
            WizardStep::LabMethod => WizardPosition::new(8, 0),
            WizardStep::LabPanel(p) => WizardPosition::new(8, p.number()),
            WizardStep::LabReview => WizardPosition::new(8, REVIEW_SUB_STEP),
            WizardStep::Analyzing => WizardPosition::new(9, REVIEW_SUB_STEP),
            WizardStep::Result(r) => WizardPosition::new(r.number(), REVIEW_SUB_STEP),
            WizardStep::Report => WizardPosition::new(19, REVIEW_SUB_STEP),
        }
    }

    /// Resolve an integer address, failing on pairs that name no screen.
    ///
    /// The sub-step is only read inside the lab section; every other step
    /// accepts whatever sub-step it is paired with.
    pub fn from_position(position: WizardPosition) -> Result<WizardStep, WizardError> {
        let WizardPosition { step, sub_step } = position;
        let unmapped = WizardError::UnmappedPosition { step, sub_step };

        let resolved = match (step, sub_step) {
            (0, _) => Some(WizardStep::Intro),
            (1..=7, _) => Section::from_number(step).map(WizardStep::Section),
            (8, 0) => Some(WizardStep::LabMethod),
            (8, REVIEW_SUB_STEP) => Some(WizardStep::LabReview),
            (8, n) => LabPanel::from_number(n).map(WizardStep::LabPanel),
            (9, _) => Some(WizardStep::Analyzing),
            (10..=18, _) => ResultStage::from_number(step).map(WizardStep::Result),
            (19, _) => Some(WizardStep::Report),
            _ => None,
        };
        resolved.ok_or(unmapped)
    }
}

impl TryFrom<WizardPosition> for WizardStep {
    type Error = WizardError;

    fn try_from(position: WizardPosition) -> Result<Self, Self::Error> {
        WizardStep::from_position(position)
    }
}

impl From<WizardStep> for WizardPosition {
    fn from(step: WizardStep) -> Self {
        step.position()
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardStep::Intro => write!(f, "intro"),
            WizardStep::Section(s) => write!(f, "section {} ({})", s.number(), s.title()),
            WizardStep::LabMethod => write!(f, "lab entry method"),
            WizardStep::LabPanel(p) => write!(f, "lab panel {} ({})", p.number(), p.title()),
            WizardStep::LabReview => write!(f, "biomarker review"),
            WizardStep::Analyzing => write!(f, "analysis"),
            WizardStep::Result(r) => write!(f, "result stage {} ({})", r.number(), r.title()),
            WizardStep::Report => write!(f, "medical report"),
        }
    }
}
